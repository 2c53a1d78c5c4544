use std::fmt;

use crate::models::chat::{ Message, Role };
use super::WidgetState;

pub const THINKING_TEXT: &str = "Thinking...";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Start,
    End,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BubbleKind {
    Message(Role),
    Thinking,
}

/// One row of the rendered transcript.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bubble<'a> {
    pub kind: BubbleKind,
    pub align: Align,
    pub text: &'a str,
}

impl<'a> From<&'a Message> for Bubble<'a> {
    fn from(message: &'a Message) -> Self {
        let align = match message.role {
            Role::User => Align::End,
            Role::Assistant => Align::Start,
        };
        Bubble { kind: BubbleKind::Message(message.role), align, text: &message.content }
    }
}

impl<'a> Bubble<'a> {
    pub fn thinking() -> Self {
        Bubble { kind: BubbleKind::Thinking, align: Align::Start, text: THINKING_TEXT }
    }
}

impl fmt::Display for Bubble<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            BubbleKind::Message(Role::User) => write!(f, "you > {}", self.text),
            BubbleKind::Message(Role::Assistant) => write!(f, "bot > {}", self.text),
            BubbleKind::Thinking => write!(f, "bot > ({})", self.text),
        }
    }
}

impl WidgetState {
    /// Lazy view of the transcript, with a trailing "Thinking..." bubble while
    /// a request is in flight. Clone the iterator or call again to restart.
    pub fn transcript(&self) -> impl Iterator<Item = Bubble<'_>> + Clone + '_ {
        self.messages()
            .iter()
            .map(Bubble::from)
            .chain(self.is_loading().then(Bubble::thinking))
    }

    pub fn bubble_count(&self) -> usize {
        self.messages().len() + usize::from(self.is_loading())
    }

    /// Index of the bubble the view should be scrolled to, if it is visible.
    pub fn scroll_anchor(&self) -> Option<usize> {
        if !self.is_open() {
            return None;
        }
        self.bubble_count().checked_sub(1)
    }
}
