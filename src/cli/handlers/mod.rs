use std::io::Read;
use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDate, Utc};

use crate::cli::commands::*;
use crate::cli::output::*;
use crate::io::clipboard::SystemClipboard;
use crate::io::config_io;
use crate::io::logging::{self, LogTarget};
use crate::io::state;
use crate::model::clock::TimeOfDay;
use crate::model::config::AppConfig;
use crate::model::session::{Role, SessionState};
use crate::ops::compose::{ComposeContext, CopyTarget, compose};
use crate::ops::emit::{self, Notice, NotificationSink};
use crate::ops::line_edit::{self, StructuralKey};
use crate::ops::reduce::{Event, reduce};
use crate::ops::time_ops;
use crate::parse;

type CmdResult = Result<(), Box<dyn std::error::Error>>;

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

pub fn dispatch(cli: Cli) -> CmdResult {
    if let Err(e) = logging::init(LogTarget::Stderr, logging::CLI_LOG_LEVEL) {
        eprintln!("warning: {}", e);
    }

    let json = cli.json;
    let config_path = cli
        .config
        .as_deref()
        .map(PathBuf::from)
        .unwrap_or_else(config_io::default_config_path);

    let Some(cmd) = cli.command else {
        return Err("no subcommand given (run `tp` without arguments for the TUI)".into());
    };
    let state_dir = cli.state_dir.as_deref();
    let session = || load_context(&config_path, state_dir, json);

    match cmd {
        // Text tools and config helpers never touch the session
        Commands::Normalize => cmd_normalize(),
        Commands::Indent(args) => cmd_indent(args, json),
        Commands::Config(args) => cmd_config(args, &config_path),

        Commands::Show => cmd_show(&session()?),
        Commands::Message => cmd_message(&session()?),
        Commands::Todo => cmd_todo(&session()?),
        Commands::Copy(args) => cmd_copy(&session()?, args),
        Commands::Set(args) => cmd_set(&session()?, args),
        Commands::Start(args) => cmd_endpoint(&session()?, args, Endpoint::Start),
        Commands::End(args) => cmd_endpoint(&session()?, args, Endpoint::End),
        Commands::Adjust(args) => cmd_adjust(&session()?, args),
        Commands::Preset(args) => cmd_preset(&session()?, args),
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

struct Context {
    config: AppConfig,
    state_dir: PathBuf,
    json: bool,
}

fn load_context(
    config_path: &Path,
    state_dir: Option<&str>,
    json: bool,
) -> Result<Context, config_io::ConfigError> {
    let config = config_io::read_config(config_path)?;
    Ok(Context {
        state_dir: config_io::resolve_state_dir(state_dir, &config),
        config,
        json,
    })
}

#[derive(Clone, Copy)]
enum Endpoint {
    Start,
    End,
}

fn now_time() -> TimeOfDay {
    time_ops::to_time_of_day(&Local::now())
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

fn load(ctx: &Context) -> SessionState {
    state::load_session(&ctx.state_dir, now_time(), ctx.config.time.default_duration)
}

/// Run one event through the reducer and persist the result
fn apply(ctx: &Context, event: Event) -> SessionState {
    let current = load(ctx);
    let next = reduce(&current, event, ctx.config.variant);
    state::save_session(&ctx.state_dir, &next, Utc::now())
}

fn range_display(ctx: &Context, state: &SessionState) -> String {
    let date = time_ops::format_date(today(), &ctx.config.time.date_format);
    time_ops::format_range(&date, &state.start, &state.end)
}

/// Print the session after a time change: JSON, or just the range
fn print_times(ctx: &Context, state: &SessionState) -> CmdResult {
    if ctx.json {
        let out = show_json(state, &ctx.config, range_display(ctx, state));
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        println!("{}〜{}", state.start, state.end);
    }
    Ok(())
}

fn print_document(ctx: &Context, document: &str, text: &str) -> CmdResult {
    if ctx.json {
        let out = DocumentJson {
            document: document.to_string(),
            text: text.to_string(),
        };
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        println!("{}", text);
    }
    Ok(())
}

fn read_stdin() -> Result<String, std::io::Error> {
    let mut buf = String::new();
    std::io::stdin().read_to_string(&mut buf)?;
    Ok(buf)
}

/// Notices go to stderr so stdout stays clean for piping
struct StderrNotifier;

impl NotificationSink for StderrNotifier {
    fn notify(&mut self, notice: Notice) {
        eprintln!("{}: {}", notice.title, notice.description);
    }
}

// ---------------------------------------------------------------------------
// Read commands
// ---------------------------------------------------------------------------

fn cmd_show(ctx: &Context) -> CmdResult {
    let session = load(ctx);
    let range = range_display(ctx, &session);
    if ctx.json {
        let out = show_json(&session, &ctx.config, range);
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        print!("{}", format_show(&session, &ctx.config, &range));
    }
    Ok(())
}

fn cmd_message(ctx: &Context) -> CmdResult {
    let session = load(ctx);
    let composed = compose(
        &ComposeContext::new(&session, &ctx.config, today()),
        &session.tasks,
    );
    print_document(ctx, "message", &composed.chat_message)
}

fn cmd_todo(ctx: &Context) -> CmdResult {
    let session = load(ctx);
    let composed = compose(
        &ComposeContext::new(&session, &ctx.config, today()),
        &session.tasks,
    );
    let block = composed
        .todo_block
        .ok_or_else(|| format!("the {} variant has no to-do block", ctx.config.variant))?;
    print_document(ctx, "todo", &block)
}

// ---------------------------------------------------------------------------
// Write commands
// ---------------------------------------------------------------------------

fn cmd_copy(ctx: &Context, args: CopyArgs) -> CmdResult {
    let target = if args.todo {
        CopyTarget::Todo
    } else {
        CopyTarget::Message
    };
    let session = load(ctx);
    let mut clipboard = SystemClipboard::new(ctx.config.clipboard.command.as_deref());
    let (next, result) = emit::copy_and_advance(
        &session,
        target,
        &ctx.config,
        today(),
        &mut clipboard,
        &mut StderrNotifier,
    );
    result?;
    if next != session {
        state::save_session(&ctx.state_dir, &next, Utc::now());
    }
    Ok(())
}

fn cmd_set(ctx: &Context, args: SetArgs) -> CmdResult {
    let role: Role = args.role.parse()?;
    if !ctx.config.variant.roles().contains(&role) {
        return Err(format!(
            "role '{}' is not used by the {} variant",
            role, ctx.config.variant
        )
        .into());
    }
    let text = match args.text {
        Some(text) => text,
        None => {
            let raw = read_stdin()?;
            raw.strip_suffix('\n').unwrap_or(&raw).to_string()
        }
    };
    let next = apply(ctx, Event::TaskEdited { role, text });
    if ctx.json {
        print_times(ctx, &next)?;
    }
    Ok(())
}

fn cmd_endpoint(ctx: &Context, args: TimeArg, endpoint: Endpoint) -> CmdResult {
    let event = if args.time.trim().eq_ignore_ascii_case("now") {
        match endpoint {
            Endpoint::Start => Event::StartSetToNow(now_time()),
            Endpoint::End => Event::EndSetToNow(now_time()),
        }
    } else {
        let time = TimeOfDay::parse(&args.time)
            .ok_or_else(|| format!("invalid time '{}' (expected HH:MM or now)", args.time))?;
        match endpoint {
            Endpoint::Start => Event::StartEdited(time.to_string()),
            Endpoint::End => Event::EndEdited(time.to_string()),
        }
    };
    let next = apply(ctx, event);
    print_times(ctx, &next)
}

fn cmd_adjust(ctx: &Context, args: AdjustArgs) -> CmdResult {
    let event = match args.which.trim().to_ascii_lowercase().as_str() {
        "start" => Event::StartAdjusted(args.minutes),
        "end" => Event::EndAdjusted(args.minutes),
        other => return Err(format!("unknown endpoint '{}' (expected start or end)", other).into()),
    };
    let next = apply(ctx, event);
    print_times(ctx, &next)
}

fn cmd_preset(ctx: &Context, args: PresetArgs) -> CmdResult {
    let presets = ctx.config.time.sorted_presets();
    if !presets.contains(&args.minutes) {
        let available: Vec<String> = presets.iter().map(|m| m.to_string()).collect();
        return Err(format!(
            "{} is not a configured preset (available: {})",
            args.minutes,
            available.join(", ")
        )
        .into());
    }
    let next = apply(
        ctx,
        Event::PresetApplied {
            now: now_time(),
            minutes: args.minutes,
        },
    );
    print_times(ctx, &next)
}

// ---------------------------------------------------------------------------
// Text tools
// ---------------------------------------------------------------------------

fn cmd_normalize() -> CmdResult {
    let raw = read_stdin()?;
    println!("{}", parse::normalize(&raw));
    Ok(())
}

fn cmd_indent(args: IndentArgs, json: bool) -> CmdResult {
    let text = read_stdin()?;
    if args.cursor > text.len() {
        return Err(format!(
            "cursor {} is past the end of the input ({} bytes)",
            args.cursor,
            text.len()
        )
        .into());
    }
    let edit = line_edit::on_structural_key(&text, args.cursor, StructuralKey::Tab, args.outdent);
    if json {
        let out = IndentJson {
            text: edit.text,
            cursor: edit.cursor,
        };
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        print!("{}", edit.text);
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

fn cmd_config(args: ConfigCmd, config_path: &Path) -> CmdResult {
    match args.action {
        ConfigAction::Path => {
            println!("{}", config_path.display());
        }
        ConfigAction::Set(set) => {
            config_io::update_config_file(config_path, &set.key, &set.value)?;
            log::info!("event=config_set status=ok key={}", set.key);
            println!("{} = {}", set.key, set.value);
        }
    }
    Ok(())
}
