pub mod menu;
pub mod request;

pub use menu::{MenuChoice, MenuShell, PromptDefaults, ShellState};
pub use request::Request;
