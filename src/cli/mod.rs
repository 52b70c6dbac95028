pub mod args;
pub mod commands;

pub use args::{Cli, Commands, OutputFormat, QueryOp};
pub use commands::run;
