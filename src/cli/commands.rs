use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "tp", about = concat!("taskpost v", env!("CARGO_PKG_VERSION"), " - status posts from a time slot and a few notes"), version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Use a different config file
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// Keep the session in a different directory
    #[arg(long = "state-dir", global = true)]
    pub state_dir: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show the time range and every task field
    Show,
    /// Print the composed chat message
    Message,
    /// Print the to-do block
    Todo,
    /// Copy the chat message (or the to-do block) to the clipboard
    Copy(CopyArgs),
    /// Replace a task field (reads stdin when TEXT is omitted)
    Set(SetArgs),
    /// Set the start time
    Start(TimeArg),
    /// Set the end time
    End(TimeArg),
    /// Shift the start or end time by signed minutes
    Adjust(AdjustArgs),
    /// Start now and end after a preset number of minutes
    Preset(PresetArgs),
    /// Normalize bullet text from stdin
    Normalize,
    /// Indent or outdent the line under the cursor in stdin text
    Indent(IndentArgs),
    /// Configuration helpers
    Config(ConfigCmd),
}

// ---------------------------------------------------------------------------
// Session args
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct CopyArgs {
    /// Copy the to-do block instead of the chat message
    #[arg(long)]
    pub todo: bool,
}

#[derive(Args)]
pub struct SetArgs {
    /// Role to set (completed, next, must, have-to)
    pub role: String,
    /// New text
    pub text: Option<String>,
}

#[derive(Args)]
pub struct TimeArg {
    /// HH:MM, or "now"
    pub time: String,
}

#[derive(Args)]
pub struct AdjustArgs {
    /// Which endpoint to shift (start or end)
    pub which: String,
    /// Signed minutes, e.g. 15 or -5
    #[arg(allow_hyphen_values = true)]
    pub minutes: i32,
}

#[derive(Args)]
pub struct PresetArgs {
    /// Duration in minutes (one of the configured presets)
    pub minutes: u32,
}

// ---------------------------------------------------------------------------
// Text tool args
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct IndentArgs {
    /// Byte offset of the cursor in the input
    #[arg(long)]
    pub cursor: usize,
    /// Outdent instead of indent (Shift+Tab)
    #[arg(long)]
    pub outdent: bool,
}

// ---------------------------------------------------------------------------
// Config args
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct ConfigCmd {
    #[command(subcommand)]
    pub action: ConfigAction,
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Print the config file location
    Path,
    /// Set a value, e.g. `config set time.default_duration 45`
    Set(ConfigSetArgs),
}

#[derive(Args)]
pub struct ConfigSetArgs {
    /// Dotted key (variant, time.presets, labels.next, ...)
    pub key: String,
    /// Value; TOML literals like [15, 30] or true are kept as such
    #[arg(allow_hyphen_values = true)]
    pub value: String,
}
