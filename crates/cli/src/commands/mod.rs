pub mod analyze;
pub mod init;
pub mod run;
pub mod stub;
pub mod styles;

pub use analyze::analyze_command;
pub use init::init_command;
pub use run::run_command;
pub use stub::stub_command;
pub use styles::styles_command;
