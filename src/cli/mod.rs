pub mod args;

pub use args::{
    Cli, Commands, GlobalOpts, InitArgs, ModesArgs, ReportArgs, StatusArgs, SwitchArgs,
};
