//! Wire-level helpers for Copilot CLI communication.
//!
//! - [`classify_message`]: decides how the router dispatches a frame
//! - [`encode_frame`]: `Content-Length` framing for outgoing messages
//! - [`TurnAccumulator`]: folds the `session.event` stream of one turn into
//!   [`StreamEvent`]s for the application layer

use committee_application::StreamEvent;
use tracing::{debug, trace, warn};

/// Classification of an incoming JSON-RPC message.
#[derive(Debug, PartialEq, Eq)]
pub enum MessageKind {
    /// A response to a request we sent (has `id`, no `method`).
    Response,
    /// An incoming request from the CLI (has `id` + `method`), e.g. `tool.call`.
    IncomingRequest { id: u64 },
    /// A notification (has `method`, no `id`), e.g. `session.event`.
    Notification,
}

/// Classify a JSON-RPC message by inspecting `id` and `method` fields.
pub fn classify_message(json: &serde_json::Value) -> MessageKind {
    let has_id = json.get("id").and_then(|v| v.as_u64());
    let has_method = json.get("method").and_then(|v| v.as_str());

    match (has_id, has_method) {
        (Some(id), Some(_)) => MessageKind::IncomingRequest { id },
        (Some(_), None) => MessageKind::Response,
        _ => MessageKind::Notification,
    }
}

/// Prefix a JSON body with its `Content-Length` header.
pub fn encode_frame(body: &str) -> String {
    format!("Content-Length: {}\r\n\r\n{}", body.len(), body)
}

/// Parse a `Content-Length: N` header line.
pub fn parse_content_length(line: &str) -> Option<usize> {
    line.trim()
        .strip_prefix("Content-Length:")
        .and_then(|len| len.trim().parse().ok())
}

/// What a single session event means for the turn in progress
#[derive(Debug, PartialEq, Eq)]
pub enum TurnStep {
    /// Keep reading; forward the event if there is one
    Continue(Option<StreamEvent>),
    /// `session.idle`: the turn is over, with the final assistant message
    Completed(String),
    /// `session.error`
    Failed(String),
}

/// Accumulates one turn's reply from the CLI event stream.
///
/// A turn may hold several assistant messages (a preamble, a tool call, then
/// the answer). Every fragment is forwarded for display, but only the last
/// message becomes the reply.
#[derive(Debug, Default)]
pub struct TurnAccumulator {
    /// Text streamed for the assistant message in progress
    streamed: String,
    /// Last complete assistant message
    last_message: Option<String>,
    turn_delta_bytes: usize,
}

impl TurnAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// The reply as it stands now.
    pub fn text(&self) -> &str {
        if self.streamed.is_empty() {
            self.last_message.as_deref().unwrap_or_default()
        } else {
            &self.streamed
        }
    }

    pub fn apply(&mut self, event_type: &str, event: &serde_json::Value) -> TurnStep {
        match event_type {
            "assistant.message.delta" | "assistant.message_delta" => {
                match data_str(event, "content").or_else(|| data_str(event, "deltaContent")) {
                    Some(chunk) => {
                        self.turn_delta_bytes += chunk.len();
                        self.streamed.push_str(chunk);
                        delta(chunk)
                    }
                    None => TurnStep::Continue(None),
                }
            }
            "assistant.message" | "assistant.message.completed" => {
                let Some(content) = data_str(event, "content") else {
                    return TurnStep::Continue(None);
                };
                let already_shown = self.turn_delta_bytes > 0;
                self.turn_delta_bytes += content.len();
                self.finish_message(content.to_string());
                if already_shown {
                    TurnStep::Continue(None)
                } else {
                    delta(content)
                }
            }
            "assistant.turn_start" => {
                self.turn_delta_bytes = 0;
                self.streamed.clear();
                TurnStep::Continue(None)
            }
            "assistant.turn_end" => {
                if self.turn_delta_bytes == 0
                    && let Some(text) = extract_event_text(event)
                {
                    debug!("Stream: turn_end fallback content ({} bytes)", text.len());
                    let step = delta(&text);
                    self.finish_message(text);
                    return step;
                }
                TurnStep::Continue(None)
            }
            "tool.execution_start" => {
                let tool = event
                    .get("data")
                    .and_then(|d| d.get("toolName").or_else(|| d.get("name")))
                    .and_then(|v| v.as_str())
                    .unwrap_or("unknown");
                debug!("Stream: tool.execution_start ({})", tool);
                TurnStep::Continue(Some(StreamEvent::ToolInvoked(tool.to_string())))
            }
            "session.idle" => {
                let reply = self.text().to_string();
                debug!("Session idle, turn complete ({} bytes)", reply.len());
                self.streamed.clear();
                self.last_message = None;
                TurnStep::Completed(reply)
            }
            "session.error" => {
                let message = data_str(event, "message").unwrap_or("Unknown session error");
                warn!("Session error: {}", message);
                TurnStep::Failed(message.to_string())
            }
            "pending_messages.modified"
            | "user.message"
            | "session.usage_info"
            | "assistant.usage"
            | "assistant.reasoning"
            | "tool.execution_partial_result"
            | "tool.execution_complete" => {
                trace!("Stream: {}", event_type);
                TurnStep::Continue(None)
            }
            other => {
                debug!("Stream: unhandled event '{}'", other);
                TurnStep::Continue(None)
            }
        }
    }

    fn finish_message(&mut self, content: String) {
        self.streamed.clear();
        self.last_message = Some(content);
    }
}

fn delta(chunk: &str) -> TurnStep {
    TurnStep::Continue(Some(StreamEvent::Delta(chunk.to_string())))
}

fn data_str<'a>(event: &'a serde_json::Value, field: &str) -> Option<&'a str> {
    event
        .get("data")
        .and_then(|d| d.get(field))
        .and_then(|v| v.as_str())
        .filter(|s| !s.is_empty())
}

/// Try to extract text content from an event's data payload.
///
/// Accepts `data.content` as a string or as an array of text blocks,
/// `data.message.content`, and `data.text`.
pub fn extract_event_text(event: &serde_json::Value) -> Option<String> {
    let data = event.get("data")?;

    if let Some(s) = data.get("content").and_then(|c| c.as_str())
        && !s.is_empty()
    {
        return Some(s.to_string());
    }

    if let Some(blocks) = data.get("content").and_then(|c| c.as_array()) {
        let text = blocks
            .iter()
            .filter_map(|block| block.get("text").and_then(|t| t.as_str()))
            .collect::<Vec<_>>()
            .join("\n");
        if !text.is_empty() {
            return Some(text);
        }
    }

    if let Some(s) = data
        .get("message")
        .and_then(|m| m.get("content"))
        .and_then(|c| c.as_str())
        && !s.is_empty()
    {
        return Some(s.to_string());
    }

    data.get("text")
        .and_then(|t| t.as_str())
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn classify_frames() {
        assert_eq!(
            classify_message(&json!({"id": 1, "result": {}})),
            MessageKind::Response
        );
        assert_eq!(
            classify_message(&json!({"id": 3, "method": "tool.call", "params": {}})),
            MessageKind::IncomingRequest { id: 3 }
        );
        assert_eq!(
            classify_message(&json!({"method": "session.event", "params": {}})),
            MessageKind::Notification
        );
        assert_eq!(
            classify_message(&json!({"data": "something"})),
            MessageKind::Notification
        );
    }

    #[test]
    fn frame_round_trip_header() {
        let frame = encode_frame("{\"a\":1}");
        assert!(frame.starts_with("Content-Length: 7\r\n\r\n"));
        assert_eq!(parse_content_length("Content-Length: 7\r\n"), Some(7));
        assert_eq!(parse_content_length("Content-Type: json"), None);
    }

    #[test]
    fn accumulator_streams_deltas_until_idle() {
        let mut acc = TurnAccumulator::new();
        assert_eq!(
            acc.apply("assistant.message.delta", &json!({"data": {"content": "Hel"}})),
            TurnStep::Continue(Some(StreamEvent::Delta("Hel".into())))
        );
        acc.apply("assistant.message_delta", &json!({"data": {"deltaContent": "lo"}}));
        // Completed message is ignored once deltas arrived
        assert_eq!(
            acc.apply("assistant.message", &json!({"data": {"content": "Hello"}})),
            TurnStep::Continue(None)
        );
        assert_eq!(
            acc.apply("session.idle", &json!({})),
            TurnStep::Completed("Hello".into())
        );
    }

    #[test]
    fn accumulator_uses_full_message_without_deltas() {
        let mut acc = TurnAccumulator::new();
        assert_eq!(
            acc.apply("assistant.message", &json!({"data": {"content": "Whole reply"}})),
            TurnStep::Continue(Some(StreamEvent::Delta("Whole reply".into())))
        );
        assert_eq!(acc.text(), "Whole reply");
    }

    #[test]
    fn accumulator_turn_end_fallback() {
        let mut acc = TurnAccumulator::new();
        acc.apply("assistant.turn_start", &json!({}));
        let step = acc.apply(
            "assistant.turn_end",
            &json!({"data": {"content": [{"type": "text", "text": "From blocks"}]}}),
        );
        assert_eq!(
            step,
            TurnStep::Continue(Some(StreamEvent::Delta("From blocks".into())))
        );
    }

    #[test]
    fn accumulator_keeps_only_last_message_of_multi_step_turn() {
        let mut acc = TurnAccumulator::new();
        let steps = [
            ("assistant.turn_start", json!({})),
            ("assistant.message_delta", json!({"data": {"deltaContent": "Let me search."}})),
            ("assistant.message", json!({"data": {"content": "Let me search."}})),
            ("tool.execution_start", json!({"data": {"toolName": "web_search"}})),
            ("assistant.turn_end", json!({})),
            ("assistant.turn_start", json!({})),
            ("assistant.message_delta", json!({"data": {"deltaContent": "Final answer."}})),
            ("assistant.message", json!({"data": {"content": "Final answer."}})),
        ];
        let mut shown = String::new();
        for (event_type, event) in &steps {
            if let TurnStep::Continue(Some(StreamEvent::Delta(chunk))) = acc.apply(event_type, event)
            {
                shown.push_str(&chunk);
            }
        }
        assert_eq!(shown, "Let me search.Final answer.");
        assert_eq!(
            acc.apply("session.idle", &json!({})),
            TurnStep::Completed("Final answer.".into())
        );
    }

    #[test]
    fn accumulator_uses_trailing_deltas_after_earlier_message() {
        let mut acc = TurnAccumulator::new();
        acc.apply("assistant.message", &json!({"data": {"content": "Checking."}}));
        acc.apply("assistant.turn_start", &json!({}));
        acc.apply("assistant.message.delta", &json!({"data": {"content": "Done"}}));
        assert_eq!(
            acc.apply("session.idle", &json!({})),
            TurnStep::Completed("Done".into())
        );
    }

    #[test]
    fn accumulator_reports_tools_and_errors() {
        let mut acc = TurnAccumulator::new();
        assert_eq!(
            acc.apply("tool.execution_start", &json!({"data": {"toolName": "web_search"}})),
            TurnStep::Continue(Some(StreamEvent::ToolInvoked("web_search".into())))
        );
        assert_eq!(
            acc.apply("session.error", &json!({"data": {"message": "quota exceeded"}})),
            TurnStep::Failed("quota exceeded".into())
        );
        assert_eq!(
            acc.apply("session.error", &json!({})),
            TurnStep::Failed("Unknown session error".into())
        );
    }

    #[test]
    fn extract_text_variants() {
        assert_eq!(
            extract_event_text(&json!({"data": {"message": {"content": "Nested"}}})).as_deref(),
            Some("Nested")
        );
        assert_eq!(
            extract_event_text(&json!({"data": {"text": "Direct"}})).as_deref(),
            Some("Direct")
        );
        assert!(extract_event_text(&json!({"data": {"content": ""}})).is_none());
        assert!(extract_event_text(&json!({"type": "assistant.turn_end"})).is_none());
    }
}
