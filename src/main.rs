use anyhow::Result;
use clap::Parser;
use framectl::cli::{Cli, Commands};
use framectl::commands;
use tracing::error;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Only use colors when outputting to a TTY (not when piped to a file)
    let use_color = atty::is(atty::Stream::Stdout);
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .with_target(true)
        .with_ansi(use_color)
        .init();

    let result = match cli.cmd {
        Commands::Init(args) => commands::cmd_init(&cli.opts, args).await,
        Commands::Status(args) => commands::cmd_status(&cli.opts, args).await,
        Commands::Modes(args) => commands::cmd_modes(&cli.opts, args).await,
        Commands::Switch(args) => commands::cmd_switch(&cli.opts, args).await,
        Commands::Restart => commands::cmd_restart(&cli.opts).await,
        Commands::Reload => commands::cmd_reload(&cli.opts).await,
        Commands::Report(args) => commands::cmd_report(&cli.opts, args).await,
    };

    // The only place an error terminates the process
    if let Err(e) = &result {
        error!("Error: {:#}", e);
        std::process::exit(1);
    }

    result
}
