//! Terminal front end for the wizard.

pub mod command;
pub mod event_port;
pub mod render;
pub mod session;

pub use command::{CommandError, ConsoleCommand};
pub use event_port::ConsoleEventPort;
pub use render::{CompactLayout, ConsoleLayout, SnapshotRenderer, WideLayout};
pub use session::run_console;
