mod process;

pub use process::{run_command, run_command_with_timeout};
