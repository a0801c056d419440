// Chat prompt on top of rustyline
//
// Lines are classified here so the chat loop only sees what to do next.

use anyhow::{Context, Result};
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::path::PathBuf;

use crate::config::moodwall_dir;

const EXIT_COMMANDS: [&str; 2] = ["/quit", "/exit"];

/// What the user did at the prompt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    /// Text to send (trimmed, never blank)
    Message(String),
    /// Blank line
    Skip,
    /// Ctrl+C, Ctrl+D or an exit command
    Exit,
}

impl InputEvent {
    pub fn from_line(line: &str) -> Self {
        let line = line.trim();
        if line.is_empty() {
            InputEvent::Skip
        } else if EXIT_COMMANDS.contains(&line) {
            InputEvent::Exit
        } else {
            InputEvent::Message(line.to_string())
        }
    }
}

pub struct InputHandler {
    editor: DefaultEditor,
    history_path: Option<PathBuf>,
}

impl InputHandler {
    /// Prompt with history kept in ~/.moodwall/chat_history.txt
    pub fn new() -> Result<Self> {
        let mut handler = Self::without_history()?;
        let path = moodwall_dir().join("chat_history.txt");

        // an unreadable history file only costs the recall list
        if let Err(e) = handler.editor.load_history(&path) {
            tracing::debug!("No chat history loaded from {}: {}", path.display(), e);
        }
        handler.history_path = Some(path);

        Ok(handler)
    }

    pub fn without_history() -> Result<Self> {
        let editor = DefaultEditor::new().context("Failed to initialize line editor")?;
        Ok(Self {
            editor,
            history_path: None,
        })
    }

    /// Block until the user submits a line
    pub fn next_event(&mut self, prompt: &str) -> Result<InputEvent> {
        let line = match self.editor.readline(prompt) {
            Ok(line) => line,
            Err(ReadlineError::Interrupted | ReadlineError::Eof) => return Ok(InputEvent::Exit),
            Err(e) => return Err(e).context("Failed to read chat input"),
        };

        let event = InputEvent::from_line(&line);
        if let InputEvent::Message(text) = &event {
            self.editor.add_history_entry(text.as_str())?;
        }

        Ok(event)
    }

    /// Write history back; no-op without a history file
    pub fn persist(&mut self) -> Result<()> {
        let Some(path) = &self.history_path else {
            return Ok(());
        };

        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create directory: {}", dir.display()))?;
        }

        self.editor
            .save_history(path)
            .with_context(|| format!("Failed to write chat history: {}", path.display()))
    }
}
