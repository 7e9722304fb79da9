use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::session::{Role, Variant};

/// Configuration from config.toml
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub variant: Variant,
    #[serde(default)]
    pub time: TimeConfig,
    #[serde(default)]
    pub labels: LabelConfig,
    #[serde(default)]
    pub clipboard: ClipboardConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeConfig {
    /// Durations offered as "from now" presets, ascending
    #[serde(default = "default_presets")]
    pub presets: Vec<u32>,
    /// Step sizes for the relative-adjustment keys
    #[serde(default = "default_adjust_steps")]
    pub adjust_steps: Vec<u32>,
    /// Length of the interval a fresh session starts with
    #[serde(default = "default_duration")]
    pub default_duration: u32,
    /// strftime pattern for the calendar date
    #[serde(default = "default_date_format")]
    pub date_format: String,
}

impl Default for TimeConfig {
    fn default() -> Self {
        TimeConfig {
            presets: default_presets(),
            adjust_steps: default_adjust_steps(),
            default_duration: default_duration(),
            date_format: default_date_format(),
        }
    }
}

impl TimeConfig {
    /// Presets sorted ascending with zero and duplicate entries removed
    pub fn sorted_presets(&self) -> Vec<u32> {
        let mut presets: Vec<u32> = self.presets.iter().copied().filter(|m| *m > 0).collect();
        presets.sort_unstable();
        presets.dedup();
        presets
    }
}

fn default_presets() -> Vec<u32> {
    vec![5, 10, 15, 20, 25, 30, 45, 60]
}

fn default_adjust_steps() -> Vec<u32> {
    vec![5, 15, 30]
}

fn default_duration() -> u32 {
    60
}

fn default_date_format() -> String {
    "%Y/%m/%d".to_string()
}

/// Section labels used in the generated documents
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelConfig {
    #[serde(default = "default_next_label")]
    pub next: String,
    #[serde(default = "default_completed_label")]
    pub completed: String,
    #[serde(default = "default_must_label")]
    pub must: String,
    #[serde(default = "default_have_to_label")]
    pub have_to: String,
}

impl Default for LabelConfig {
    fn default() -> Self {
        LabelConfig {
            next: default_next_label(),
            completed: default_completed_label(),
            must: default_must_label(),
            have_to: default_have_to_label(),
        }
    }
}

impl LabelConfig {
    pub fn for_role(&self, role: Role) -> &str {
        match role {
            Role::Completed => &self.completed,
            Role::Next => &self.next,
            Role::Must => &self.must,
            Role::HaveTo => &self.have_to,
        }
    }
}

fn default_next_label() -> String {
    "次にやること".to_string()
}

fn default_completed_label() -> String {
    "やったこと".to_string()
}

fn default_must_label() -> String {
    "must".to_string()
}

fn default_have_to_label() -> String {
    "have to".to_string()
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClipboardConfig {
    /// Program and arguments that read the text to copy from stdin.
    /// If absent, pbcopy / wl-copy / xclip is picked for the platform.
    #[serde(default)]
    pub command: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory holding current.json and logs/
    #[serde(default)]
    pub state_dir: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UiConfig {
    /// Color overrides keyed by theme slot (e.g. `highlight = "#FB4196"`)
    #[serde(default)]
    pub colors: HashMap<String, String>,
    #[serde(default = "default_true")]
    pub show_key_hints: bool,
}

impl Default for UiConfig {
    fn default() -> Self {
        UiConfig {
            colors: HashMap::new(),
            show_key_hints: true,
        }
    }
}

fn default_true() -> bool {
    true
}
