pub mod command;
pub mod command_handler;

pub use command_handler::{CommandDispatcher, FAREWELL, Reply, render_error};
