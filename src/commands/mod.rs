pub mod common;
pub mod init;
pub mod modes;
pub mod report;
pub mod restart;
pub mod status;
pub mod switch;

// Re-export command functions
pub use init::cmd_init;
pub use modes::cmd_modes;
pub use report::cmd_report;
pub use restart::{cmd_reload, cmd_restart};
pub use status::cmd_status;
pub use switch::cmd_switch;
