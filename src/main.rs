use clap::Parser;
use taskpost::cli::commands::Cli;
use taskpost::cli::handlers;

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        // No subcommand → launch TUI
        None => taskpost::tui::run(cli.config.as_deref(), cli.state_dir.as_deref()),
        Some(_) => handlers::dispatch(cli),
    };
    if let Err(e) = result {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}
