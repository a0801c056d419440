// CLI module
// Interactive chat loop and command output formatting

mod chat;
pub mod format;
mod input;

pub use chat::ChatRepl;
pub use input::{InputEvent, InputHandler};
