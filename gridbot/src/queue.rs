//! Ordered program of player commands.
//!
//! The queue itself only stores commands; the run gate and pose reset that
//! accompany every edit live in [`crate::session::Session`].

use crate::core::command::{Action, Command, CommandId};

/// Commands in append order. Never reordered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandQueue {
    commands: Vec<Command>,
    next_id: u64,
}

impl Default for CommandQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandQueue {
    pub fn new() -> Self {
        Self {
            commands: Vec::new(),
            next_id: 1,
        }
    }

    pub fn from_actions<I: IntoIterator<Item = Action>>(actions: I) -> Self {
        let mut queue = Self::new();
        for action in actions {
            queue.append(action);
        }
        queue
    }

    /// Append a command with a fresh id.
    pub fn append(&mut self, action: Action) -> CommandId {
        let id = CommandId(self.next_id);
        self.next_id += 1;
        self.commands.push(Command { id, action });
        id
    }

    /// Remove the command at `index`, or `None` if out of range.
    pub fn remove_at(&mut self, index: usize) -> Option<Command> {
        if index >= self.commands.len() {
            return None;
        }
        Some(self.commands.remove(index))
    }

    /// Drop every command. Ids keep increasing so they stay unique.
    pub fn clear(&mut self) {
        self.commands.clear();
    }

    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    pub fn actions(&self) -> Vec<Action> {
        self.commands.iter().map(|command| command.action).collect()
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}
