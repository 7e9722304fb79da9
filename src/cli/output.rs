use serde::Serialize;

use crate::model::config::AppConfig;
use crate::model::session::{SessionState, Variant};

// ---------------------------------------------------------------------------
// JSON output structs
// ---------------------------------------------------------------------------

#[derive(Serialize)]
pub struct ShowJson {
    pub variant: Variant,
    pub start: String,
    pub end: String,
    /// Header line as shown in the TUI, empty while an endpoint is blank
    pub range: String,
    pub tasks: Vec<RoleJson>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_saved: Option<String>,
}

#[derive(Serialize)]
pub struct RoleJson {
    pub role: String,
    pub label: String,
    pub text: String,
}

#[derive(Serialize)]
pub struct DocumentJson {
    pub document: String,
    pub text: String,
}

#[derive(Serialize)]
pub struct IndentJson {
    pub text: String,
    pub cursor: usize,
}

// ---------------------------------------------------------------------------
// Conversions
// ---------------------------------------------------------------------------

pub fn show_json(state: &SessionState, config: &AppConfig, range: String) -> ShowJson {
    ShowJson {
        variant: config.variant,
        start: state.start.clone(),
        end: state.end.clone(),
        range,
        tasks: config
            .variant
            .roles()
            .iter()
            .map(|&role| RoleJson {
                role: role.key().to_string(),
                label: config.labels.for_role(role).to_string(),
                text: state.tasks.get(role).to_string(),
            })
            .collect(),
        last_saved: state.last_saved.map(|t| t.to_rfc3339()),
    }
}

// ---------------------------------------------------------------------------
// Text output
// ---------------------------------------------------------------------------

/// Human-readable session listing: range, then each role with its text indented
pub fn format_show(state: &SessionState, config: &AppConfig, range: &str) -> String {
    let mut out = String::new();
    if range.is_empty() {
        out.push_str(&format!("{}〜{}\n", state.start, state.end));
    } else {
        out.push_str(range);
        out.push('\n');
    }
    for &role in config.variant.roles() {
        out.push('\n');
        out.push_str(config.labels.for_role(role));
        out.push_str(":\n");
        let text = state.tasks.get(role);
        if text.trim().is_empty() {
            out.push_str("  (empty)\n");
        } else {
            for line in text.lines() {
                out.push_str("  ");
                out.push_str(line);
                out.push('\n');
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::session::TaskSet;
    use pretty_assertions::assert_eq;

    fn state() -> SessionState {
        SessionState {
            start: "09:00".into(),
            end: "10:00".into(),
            tasks: TaskSet {
                next: "- a\n  - b".into(),
                must: "m".into(),
                ..Default::default()
            },
            last_saved: None,
        }
    }

    #[test]
    fn show_text_lists_roles_in_screen_order() {
        let out = format_show(&state(), &AppConfig::default(), "2025/10/17 09:00〜10:00");
        assert_eq!(
            out,
            "2025/10/17 09:00〜10:00\n\nmust:\n  m\n\nhave to:\n  (empty)\n\n次にやること:\n  - a\n    - b\n"
        );
    }

    #[test]
    fn show_json_follows_variant() {
        let config = AppConfig {
            variant: Variant::Rotate,
            ..Default::default()
        };
        let json = serde_json::to_value(show_json(&state(), &config, String::new())).unwrap();
        assert_eq!(json["variant"], "rotate");
        assert_eq!(json["tasks"][0]["role"], "completed");
        assert_eq!(json["tasks"][1]["text"], "- a\n  - b");
        assert!(json.get("last_saved").is_none());
    }
}
