//! Message routing for concurrent Copilot CLI sessions.
//!
//! The Copilot CLI speaks JSON-RPC 2.0 over a single TCP connection, while a
//! debate keeps one conversation session open per participant. [`MessageRouter`]
//! runs a background reader task that owns the read half exclusively and
//! routes incoming messages to the right [`SessionChannel`] by `sessionId`.

use crate::copilot::error::{CopilotError, Result};
use crate::copilot::protocol::{
    CreateSessionParams, DestroyParams, JsonRpcNotification, JsonRpcRequest, JsonRpcResponse,
    JsonRpcResponseOut, ToolCallParams,
};
use crate::copilot::transport::{MessageKind, classify_message, encode_frame, parse_content_length};
use serde::Serialize;
use std::collections::HashMap;
use std::process::Stdio;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncReadExt, AsyncWriteExt, BufReader, BufWriter};
use tokio::net::TcpStream;
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::process::{Child, Command};
use tokio::sync::{Mutex, mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::{debug, info, trace, warn};

/// Timeout for session creation (waiting for `session.start`).
const SESSION_CREATE_TIMEOUT: Duration = Duration::from_secs(30);

/// Reply sent for any `tool.call`: the committee never executes client-side tools.
const TOOL_REJECTED: &str = "Client-side tools are not available in this session";

type Routes = Arc<std::sync::RwLock<HashMap<String, mpsc::UnboundedSender<RoutedMessage>>>>;
type Pending = Arc<Mutex<HashMap<u64, oneshot::Sender<JsonRpcResponse>>>>;
type Writer = Arc<Mutex<BufWriter<OwnedWriteHalf>>>;

/// A message routed to a specific session's channel.
#[derive(Debug)]
pub enum RoutedMessage {
    /// A `session.event` notification (delta, message, idle, ...)
    SessionEvent {
        event_type: String,
        event: serde_json::Value,
    },
    /// An incoming `tool.call` request from the CLI
    ToolCall {
        request_id: u64,
        params: ToolCallParams,
    },
}

#[derive(Debug)]
struct SessionStartEvent {
    session_id: String,
}

/// A per-session channel for receiving routed messages.
///
/// Dropping the channel deregisters the session from the router.
pub struct SessionChannel {
    rx: mpsc::UnboundedReceiver<RoutedMessage>,
    session_id: String,
    router: Arc<MessageRouter>,
}

impl SessionChannel {
    /// Receive the next routed message.
    ///
    /// Returns [`CopilotError::RouterStopped`] once the reader task has ended.
    pub async fn recv(&mut self) -> Result<RoutedMessage> {
        self.rx.recv().await.ok_or(CopilotError::RouterStopped)
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    pub fn router(&self) -> &Arc<MessageRouter> {
        &self.router
    }
}

impl Drop for SessionChannel {
    fn drop(&mut self) {
        self.router.deregister_session(&self.session_id);
    }
}

/// Demultiplexes one Copilot CLI connection across many sessions.
///
/// 1. Spawns `copilot --server` and connects to the port it announces
/// 2. Owns the read half in a background task
/// 3. Routes `session.event` notifications and `tool.call` requests by session id
/// 4. Correlates request/response pairs through `oneshot` channels
/// 5. Serializes session creation so `session.start` events cannot be mixed up
pub struct MessageRouter {
    reader_handle: JoinHandle<()>,
    routes: Routes,
    pending_responses: Pending,
    session_start_rx: Mutex<mpsc::UnboundedReceiver<SessionStartEvent>>,
    create_lock: Mutex<()>,
    writer: Writer,
    /// The CLI process, killed on shutdown or drop. `None` for attached connections.
    child: std::sync::Mutex<Option<Child>>,
}

impl MessageRouter {
    /// Spawn the Copilot CLI in server mode and build the router.
    pub async fn spawn(command: &str, args: &[String]) -> Result<Arc<Self>> {
        debug!("Spawning Copilot CLI: {} --server {}", command, args.join(" "));

        let mut cmd = Command::new(command);
        cmd.arg("--server")
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit());

        // Linux: have the kernel SIGTERM the child if we die without running Drop.
        #[cfg(target_os = "linux")]
        unsafe {
            cmd.pre_exec(|| {
                libc::prctl(libc::PR_SET_PDEATHSIG, libc::SIGTERM);
                Ok(())
            });
        }

        let mut child = cmd.spawn()?;

        let stdout = child.stdout.take().ok_or_else(|| {
            CopilotError::SpawnError(std::io::Error::other("Failed to capture stdout"))
        })?;
        let mut stdout_reader = BufReader::new(stdout);
        let mut line = String::new();

        let port: u16 = loop {
            line.clear();
            if stdout_reader.read_line(&mut line).await? == 0 {
                let _ = child.start_kill();
                return Err(CopilotError::UnexpectedResponse(
                    "Copilot CLI exited without announcing port".into(),
                ));
            }

            let trimmed = line.trim();
            debug!("Copilot CLI output: {}", trimmed);

            if let Some(port_str) = trimmed.strip_prefix("CLI server listening on port ") {
                match port_str.trim().parse::<u16>() {
                    Ok(p) => break p,
                    Err(_) => {
                        let _ = child.start_kill();
                        return Err(CopilotError::UnexpectedResponse(format!(
                            "Failed to parse port number: {}",
                            port_str
                        )));
                    }
                }
            }
        };

        info!("Copilot CLI listening on port {}, connecting...", port);
        let stream = match TcpStream::connect(("127.0.0.1", port)).await {
            Ok(stream) => stream,
            Err(e) => {
                let _ = child.start_kill();
                return Err(e.into());
            }
        };

        Ok(Self::attach(stream, Some(child)))
    }

    /// Build a router over an established connection.
    pub fn attach(stream: TcpStream, child: Option<Child>) -> Arc<Self> {
        let (read_half, write_half) = stream.into_split();

        let routes: Routes = Arc::new(std::sync::RwLock::new(HashMap::new()));
        let pending_responses: Pending = Arc::new(Mutex::new(HashMap::new()));
        let (session_start_tx, session_start_rx) = mpsc::unbounded_channel();
        let writer: Writer = Arc::new(Mutex::new(BufWriter::new(write_half)));

        let reader_handle = tokio::spawn(Self::reader_loop(
            BufReader::new(read_half),
            Arc::clone(&routes),
            Arc::clone(&pending_responses),
            session_start_tx,
            Arc::clone(&writer),
        ));

        Arc::new(Self {
            reader_handle,
            routes,
            pending_responses,
            session_start_rx: Mutex::new(session_start_rx),
            create_lock: Mutex::new(()),
            writer,
            child: std::sync::Mutex::new(child),
        })
    }

    /// Background reader loop, the single owner of the read half.
    ///
    /// When it exits every route and pending sender is dropped, so waiting
    /// receivers observe [`CopilotError::RouterStopped`].
    async fn reader_loop(
        mut reader: BufReader<OwnedReadHalf>,
        routes: Routes,
        pending_responses: Pending,
        session_start_tx: mpsc::UnboundedSender<SessionStartEvent>,
        writer: Writer,
    ) {
        loop {
            let json_value = match read_frame(&mut reader).await {
                Ok(Some(value)) => value,
                Ok(None) => continue,
                Err(e) => {
                    warn!("Reader loop: {}", e);
                    break;
                }
            };

            match classify_message(&json_value) {
                MessageKind::Response => {
                    let response: JsonRpcResponse = match serde_json::from_value(json_value) {
                        Ok(r) => r,
                        Err(e) => {
                            warn!("Router: failed to parse response: {}", e);
                            continue;
                        }
                    };
                    let Some(id) = response.id else { continue };
                    let sender = pending_responses.lock().await.remove(&id);
                    match sender {
                        Some(tx) => {
                            let _ = tx.send(response);
                        }
                        None => debug!("Router: no pending receiver for response id={}", id),
                    }
                }

                MessageKind::IncomingRequest { id } => {
                    let method = json_value
                        .get("method")
                        .and_then(|v| v.as_str())
                        .unwrap_or_default();
                    if method != "tool.call" {
                        debug!("Router: ignoring incoming request method={}", method);
                        continue;
                    }
                    let Some(params) = json_value
                        .get("params")
                        .and_then(|p| serde_json::from_value::<ToolCallParams>(p.clone()).ok())
                    else {
                        warn!("Router: failed to parse tool.call params (id={})", id);
                        continue;
                    };

                    let session_id = params.session_id.clone();
                    let routed = {
                        let routes_read = routes.read().unwrap_or_else(|e| e.into_inner());
                        routes_read.get(&session_id).is_some_and(|tx| {
                            tx.send(RoutedMessage::ToolCall {
                                request_id: id,
                                params,
                            })
                            .is_ok()
                        })
                    };
                    if !routed {
                        // Session already gone; answer so the CLI does not hang.
                        warn!("Router: no route for tool.call session_id={}", session_id);
                        let response = JsonRpcResponseOut::tool_rejected(id, TOOL_REJECTED);
                        if let Err(e) = write_frame(&writer, &response).await {
                            warn!("Router: failed to reject orphaned tool.call: {}", e);
                        }
                    }
                }

                MessageKind::Notification => {
                    let notification: JsonRpcNotification =
                        match serde_json::from_value(json_value) {
                            Ok(n) => n,
                            Err(e) => {
                                warn!("Router: failed to parse notification: {}", e);
                                continue;
                            }
                        };
                    if notification.method != "session.event" {
                        trace!("Router: ignoring notification method={}", notification.method);
                        continue;
                    }
                    let Some(params) = notification.params else { continue };
                    let session_id = params.get("sessionId").and_then(|v| v.as_str());
                    let event = params.get("event");
                    let (Some(sid), Some(ev)) = (session_id, event) else {
                        debug!("Router: session.event without sessionId/event");
                        continue;
                    };
                    let event_type = ev
                        .get("type")
                        .and_then(|t| t.as_str())
                        .unwrap_or_default()
                        .to_string();

                    if event_type == "session.start" {
                        debug!("Router: session.start for {}", sid);
                        let _ = session_start_tx.send(SessionStartEvent {
                            session_id: sid.to_string(),
                        });
                        continue;
                    }

                    let routes_read = routes.read().unwrap_or_else(|e| e.into_inner());
                    match routes_read.get(sid) {
                        Some(tx) => {
                            let _ = tx.send(RoutedMessage::SessionEvent {
                                event_type,
                                event: ev.clone(),
                            });
                        }
                        None => debug!(
                            "Router: no route for session_id={}, dropping {}",
                            sid, event_type
                        ),
                    }
                }
            }
        }

        info!("Router: reader loop ended, closing all session channels");
        routes.write().unwrap_or_else(|e| e.into_inner()).clear();
        pending_responses.lock().await.clear();
    }

    /// Create a session and return its channel.
    ///
    /// The `session.create` reply is awaited like any other request, so an
    /// error reply fails at once with [`CopilotError::RpcError`]. The session
    /// id comes from the reply; `session.start` is only consulted when the
    /// reply carries none. Serialized through `create_lock` so each caller
    /// gets its own `session.start`.
    pub async fn create_session(self: &Arc<Self>, params: CreateSessionParams) -> Result<SessionChannel> {
        let _guard = self.create_lock.lock().await;

        let params_value = serde_json::to_value(&params)?;
        trace!("session.create params: {}", params_value);
        let request = JsonRpcRequest::new("session.create", Some(params_value));

        let outcome =
            tokio::time::timeout(SESSION_CREATE_TIMEOUT, self.await_created_session(&request)).await;
        let session_id = match outcome {
            Ok(result) => result?,
            Err(_) => {
                self.pending_responses.lock().await.remove(&request.id);
                return Err(CopilotError::Timeout(
                    "session.create timed out waiting for the session id".into(),
                ));
            }
        };
        debug!("Router: session created: {} ({})", session_id, params.model);

        let (tx, rx) = mpsc::unbounded_channel();
        self.routes
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .insert(session_id.clone(), tx);

        Ok(SessionChannel {
            rx,
            session_id,
            router: Arc::clone(self),
        })
    }

    async fn await_created_session(&self, request: &JsonRpcRequest) -> Result<String> {
        let response = self.request(request).await?;
        if let Some(error) = response.error {
            return Err(CopilotError::RpcError {
                code: error.code,
                message: error.message,
            });
        }
        if let Some(session_id) = response
            .result
            .as_ref()
            .and_then(|r| r.get("sessionId"))
            .and_then(|v| v.as_str())
        {
            return Ok(session_id.to_string());
        }

        let mut start_rx = self.session_start_rx.lock().await;
        loop {
            let event = start_rx.recv().await.ok_or(CopilotError::RouterStopped)?;
            let known = self
                .routes
                .read()
                .unwrap_or_else(|e| e.into_inner())
                .contains_key(&event.session_id);
            if known {
                // Announcement for a session already created from its reply
                trace!("Router: skipping stale session.start for {}", event.session_id);
                continue;
            }
            return Ok(event.session_id);
        }
    }

    /// Send a request and wait for the correlated response.
    pub async fn request(&self, request: &JsonRpcRequest) -> Result<JsonRpcResponse> {
        let (tx, rx) = oneshot::channel();
        let request_id = request.id;
        self.pending_responses.lock().await.insert(request_id, tx);

        if let Err(e) = self.send_request(request).await {
            self.pending_responses.lock().await.remove(&request_id);
            return Err(e);
        }

        rx.await.map_err(|_| CopilotError::RouterStopped)
    }

    /// Send a request and fail on a JSON-RPC error reply.
    pub async fn call(&self, method: &str, params: impl Serialize) -> Result<serde_json::Value> {
        let request = JsonRpcRequest::new(method, Some(serde_json::to_value(params)?));
        let response = self.request(&request).await?;
        if let Some(error) = response.error {
            return Err(CopilotError::RpcError {
                code: error.code,
                message: error.message,
            });
        }
        Ok(response.result.unwrap_or(serde_json::Value::Null))
    }

    /// Send a request without waiting for a response.
    pub async fn send_request(&self, request: &JsonRpcRequest) -> Result<()> {
        write_frame(&self.writer, request).await
    }

    /// Send a response to an incoming CLI request.
    pub async fn send_response(&self, response: &JsonRpcResponseOut) -> Result<()> {
        write_frame(&self.writer, response).await
    }

    /// Reject an incoming `tool.call`.
    pub async fn reject_tool_call(&self, request_id: u64, params: &ToolCallParams) -> Result<()> {
        warn!(
            "Rejecting tool.call '{}' for session {}",
            params.tool_name, params.session_id
        );
        self.send_response(&JsonRpcResponseOut::tool_rejected(request_id, TOOL_REJECTED))
            .await
    }

    /// Ask the CLI to destroy a session.
    pub async fn destroy_session(&self, session_id: &str) -> Result<()> {
        self.call(
            "session.destroy",
            DestroyParams {
                session_id: session_id.to_string(),
            },
        )
        .await?;
        debug!("Router: session destroyed: {}", session_id);
        Ok(())
    }

    /// Remove a session from the routing table.
    pub fn deregister_session(&self, session_id: &str) {
        let mut routes = self.routes.write().unwrap_or_else(|e| e.into_inner());
        if routes.remove(session_id).is_some() {
            debug!("Router: deregistered session {}", session_id);
        }
    }

    pub fn session_count(&self) -> usize {
        self.routes.read().unwrap_or_else(|e| e.into_inner()).len()
    }

    /// Stop reading and kill the CLI process. Safe to call more than once.
    pub fn shutdown(&self) {
        self.reader_handle.abort();
        self.routes.write().unwrap_or_else(|e| e.into_inner()).clear();
        let mut child = self.child.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(mut child) = child.take() {
            debug!("Killing Copilot CLI child process");
            let _ = child.start_kill();
        }
    }
}

impl Drop for MessageRouter {
    fn drop(&mut self) {
        self.shutdown();
    }
}

/// Read one `Content-Length` framed JSON message.
///
/// `Ok(None)` means the frame was unreadable JSON and should be skipped.
pub async fn read_frame<R>(reader: &mut R) -> Result<Option<serde_json::Value>>
where
    R: AsyncBufRead + Unpin,
{
    let mut line = String::new();
    let content_length = loop {
        line.clear();
        if reader.read_line(&mut line).await? == 0 {
            return Err(CopilotError::TransportClosed);
        }
        if let Some(len) = parse_content_length(&line) {
            break len;
        }
    };

    // Remaining headers end at the blank line
    loop {
        line.clear();
        if reader.read_line(&mut line).await? == 0 {
            return Err(CopilotError::TransportClosed);
        }
        if line.trim().is_empty() {
            break;
        }
    }

    let mut body = vec![0u8; content_length];
    reader.read_exact(&mut body).await?;
    trace!("Router received: {}", String::from_utf8_lossy(&body));

    match serde_json::from_slice(&body) {
        Ok(value) => Ok(Some(value)),
        Err(e) => {
            warn!("Router: failed to parse JSON: {}", e);
            Ok(None)
        }
    }
}

async fn write_frame(writer: &Writer, message: &impl Serialize) -> Result<()> {
    let json = serde_json::to_string(message)?;
    trace!("Router sending: {}", json);
    let mut w = writer.lock().await;
    w.write_all(encode_frame(&json).as_bytes()).await?;
    w.flush().await?;
    Ok(())
}


#[cfg(test)]
mod tests {
    use super::fake_cli::connect;
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_create_session_registers_route() {
        let (router, mut cli) = connect().await;
        let create = tokio::spawn({
            let router = Arc::clone(&router);
            async move {
                router
                    .create_session(CreateSessionParams::new("gpt-5-mini"))
                    .await
            }
        });

        let request = cli.accept_create("sess-1").await;
        assert_eq!(request["params"]["model"], "gpt-5-mini");
        assert_eq!(request["params"]["streaming"], true);

        let channel = create.await.unwrap().unwrap();
        assert_eq!(channel.session_id(), "sess-1");
        assert_eq!(router.session_count(), 1);

        drop(channel);
        assert_eq!(router.session_count(), 0);
    }

    #[tokio::test]
    async fn test_create_session_error_reply_fails_immediately() {
        let (router, mut cli) = connect().await;
        let create = tokio::spawn({
            let router = Arc::clone(&router);
            async move {
                router
                    .create_session(CreateSessionParams::new("no-such-model"))
                    .await
            }
        });

        let request = cli.next().await;
        assert_eq!(request["method"], "session.create");
        cli.send(json!({
            "jsonrpc": "2.0",
            "id": request["id"],
            "error": {"code": -32000, "message": "Model not available"}
        }))
        .await;

        let outcome = tokio::time::timeout(Duration::from_secs(5), create)
            .await
            .expect("create_session should not wait for session.start")
            .unwrap();
        assert!(matches!(
            outcome,
            Err(CopilotError::RpcError { code: -32000, ref message }) if message == "Model not available"
        ));
        assert_eq!(router.session_count(), 0);
    }

    #[tokio::test]
    async fn test_create_session_falls_back_to_session_start() {
        let (router, mut cli) = connect().await;
        let create = tokio::spawn({
            let router = Arc::clone(&router);
            async move {
                let first = router.create_session(CreateSessionParams::new("m")).await;
                let second = router.create_session(CreateSessionParams::new("m")).await;
                (first, second)
            }
        });

        // First session: id in the reply, announcement arrives afterwards
        cli.accept_create("early").await;

        // Second session: reply without an id
        let request = cli.next().await;
        assert_eq!(request["method"], "session.create");
        cli.reply(&request["id"], json!({})).await;
        cli.event("late", json!({"type": "session.start"})).await;

        let (first, second) = create.await.unwrap();
        assert_eq!(first.unwrap().session_id(), "early");
        assert_eq!(second.unwrap().session_id(), "late");
    }

    #[tokio::test]
    async fn test_events_are_routed_by_session_id() {
        let (router, mut cli) = connect().await;
        let create = tokio::spawn({
            let router = Arc::clone(&router);
            async move {
                let a = router.create_session(CreateSessionParams::new("m")).await;
                let b = router.create_session(CreateSessionParams::new("m")).await;
                (a, b)
            }
        });
        cli.accept_create("a").await;
        cli.accept_create("b").await;
        let (a, b) = create.await.unwrap();
        let (mut a, mut b) = (a.unwrap(), b.unwrap());

        cli.event("b", json!({"type": "session.idle"})).await;
        cli.event("a", json!({"type": "assistant.message.delta", "data": {"content": "x"}}))
            .await;

        match a.recv().await.unwrap() {
            RoutedMessage::SessionEvent { event_type, .. } => {
                assert_eq!(event_type, "assistant.message.delta")
            }
            other => panic!("unexpected {:?}", other),
        }
        match b.recv().await.unwrap() {
            RoutedMessage::SessionEvent { event_type, .. } => assert_eq!(event_type, "session.idle"),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_call_surfaces_rpc_error() {
        let (router, mut cli) = connect().await;
        let call = tokio::spawn({
            let router = Arc::clone(&router);
            async move { router.destroy_session("gone").await }
        });

        let request = cli.next().await;
        assert_eq!(request["method"], "session.destroy");
        assert_eq!(request["params"]["sessionId"], "gone");
        cli.send(json!({
            "jsonrpc": "2.0",
            "id": request["id"],
            "error": {"code": -32602, "message": "unknown session"}
        }))
        .await;

        let err = call.await.unwrap().unwrap_err();
        assert!(matches!(err, CopilotError::RpcError { code: -32602, .. }));
    }

    #[tokio::test]
    async fn test_orphaned_tool_call_is_rejected() {
        let (_router, mut cli) = connect().await;
        cli.send(json!({
            "jsonrpc": "2.0",
            "id": 41,
            "method": "tool.call",
            "params": {"sessionId": "nobody", "toolName": "shell"}
        }))
        .await;

        let reply = cli.next().await;
        assert_eq!(reply["id"], 41);
        assert_eq!(reply["result"]["resultType"], "error");
    }

    #[tokio::test]
    async fn test_closed_connection_stops_channels() {
        let (router, mut cli) = connect().await;
        let create = tokio::spawn({
            let router = Arc::clone(&router);
            async move { router.create_session(CreateSessionParams::new("m")).await }
        });
        cli.accept_create("s").await;
        let mut channel = create.await.unwrap().unwrap();

        drop(cli);
        assert!(matches!(
            channel.recv().await,
            Err(CopilotError::RouterStopped)
        ));
    }

    #[tokio::test]
    async fn test_read_frame_skips_invalid_json() {
        let data = format!("{}{}", encode_frame("not json"), encode_frame("{\"id\":1}"));
        let mut reader = BufReader::new(data.as_bytes());
        assert!(read_frame(&mut reader).await.unwrap().is_none());
        assert_eq!(read_frame(&mut reader).await.unwrap().unwrap()["id"], 1);
        assert!(matches!(
            read_frame(&mut reader).await,
            Err(CopilotError::TransportClosed)
        ));
    }
}
