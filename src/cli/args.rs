use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "framectl", version, about = "Mode controller for a digital photo frame kiosk")]
pub struct Cli {
    #[command(flatten)]
    pub opts: GlobalOpts,

    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Args, Debug, Clone)]
pub struct GlobalOpts {
    /// Configuration file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Directory holding the mode store
    #[arg(long, global = true)]
    pub store_dir: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Provision the mode store
    Init(InitArgs),
    /// Show the current mode
    Status(StatusArgs),
    /// List configured modes
    Modes(ModesArgs),
    /// Switch to another mode
    Switch(SwitchArgs),
    /// Stop and start the current mode
    Restart,
    /// Run the current mode's restart command under the lock
    Reload,
    /// Record the mode a mode process has entered
    Report(ReportArgs),
}

#[derive(Args, Debug)]
pub struct InitArgs {
    /// Initial mode name
    #[arg(long, default_value = "standby")]
    pub mode: String,
}

#[derive(Args, Debug)]
pub struct StatusArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct ModesArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct SwitchArgs {
    /// Mode name or numeric id
    pub mode: String,

    /// Run the full stop/start cycle even when already in the requested mode
    #[arg(long)]
    pub force: bool,
}

#[derive(Args, Debug)]
pub struct ReportArgs {
    /// Mode name or numeric id
    pub mode: String,
}
