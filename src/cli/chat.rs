// Interactive conversation with the healing assistant

use anyhow::Result;
use std::sync::Arc;

use super::format;
use super::input::{InputEvent, InputHandler};
use crate::conversation::{ConversationSession, SessionError};

const PROMPT: &str = "> ";

/// Line-based chat loop over one conversation session
///
/// The whole transcript is echoed in order, so delayed safety messages show
/// up before the next prompt.
pub struct ChatRepl {
    session: Arc<ConversationSession>,
    input: InputHandler,
    printed: usize,
}

impl ChatRepl {
    pub fn new(session: Arc<ConversationSession>, input: InputHandler) -> Self {
        Self {
            session,
            input,
            printed: 0,
        }
    }

    /// Run until the user quits; closes the session on exit
    pub async fn run(mut self) -> Result<()> {
        println!("Type a message and press Enter. /quit to leave.\n");

        loop {
            self.print_new_messages();

            let event = tokio::task::block_in_place(|| self.input.next_event(PROMPT))?;
            let text = match event {
                InputEvent::Message(text) => text,
                InputEvent::Skip => continue,
                InputEvent::Exit => break,
            };

            match self.session.send(&text).await {
                Ok(_) => {}
                Err(SessionError::EmptyMessage) => {}
                Err(e) => eprintln!("⚠️  {}", e),
            }
        }

        self.session.close();
        if let Err(e) = self.input.persist() {
            tracing::warn!("Failed to save chat history: {:#}", e);
        }

        println!("再见，照顾好自己 💝");
        Ok(())
    }

    fn print_new_messages(&mut self) {
        let messages = self.session.messages();
        for message in messages.iter().skip(self.printed) {
            println!("{}\n", format::message(message));
        }
        self.printed = messages.len();
    }
}
