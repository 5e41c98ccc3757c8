//! Parsing of `--member NAME=MODEL[@BACKEND]:ROLE`

use committee_domain::{Backend, ModelSelector, ParticipantSpec, Role};

/// Parse a roster entry from the command line.
///
/// `MODEL` may be empty (`Judge=:adjudicator`) to use the default model.
pub fn parse_member(s: &str) -> Result<ParticipantSpec, String> {
    let (name, rest) = s
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=MODEL[@BACKEND]:ROLE, got '{}'", s))?;
    let name = name.trim();
    if name.is_empty() {
        return Err("member name cannot be empty".to_string());
    }

    let (model_part, role) = rest
        .rsplit_once(':')
        .ok_or_else(|| format!("missing ':ROLE' in '{}'", s))?;
    let role: Role = role.parse()?;

    let (model, backend) = match model_part.split_once('@') {
        Some((model, backend)) => (model.trim(), backend.parse::<Backend>().map_err(|e| e.to_string())?),
        None => (model_part.trim(), Backend::default()),
    };

    let selector = if model.is_empty() {
        ModelSelector {
            backend,
            ..ModelSelector::default()
        }
    } else {
        ModelSelector::new(model, backend)
    };
    Ok(ParticipantSpec::new(name, selector, role))
}
