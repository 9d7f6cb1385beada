//! Application-Layer: Commands, Undo/Redo, Kommando-Log und Session.

pub mod command;
pub mod command_log;
pub mod command_stack;
pub mod hooks;
pub mod session;

pub use command::{Command, CommandKind};
pub use command_log::{parse_command_log, write_command_log};
pub use command_stack::CommandStack;
pub use hooks::{HostHooks, NullHooks};
pub use session::DigitizerSession;
