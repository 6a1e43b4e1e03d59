//! Command queue using mpsc channels.
//!
//! The bus provides a simple publish/drain mechanism where:
//! - window procedures and content hosts publish via `CommandPublisher::publish()`
//! - the message loop drains via `CommandBus::drain()` between messages

use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};

use super::types::Command;

/// Queue of commands waiting for the application root.
///
/// # Example
///
/// ```
/// use glasspane::events::{CommandBus, Command};
///
/// let bus = CommandBus::new();
/// let publisher = bus.publisher();
///
/// publisher.publish(Command::Toggle);
///
/// let commands = bus.drain();
/// assert_eq!(commands.len(), 1);
/// ```
pub struct CommandBus {
    sender: Sender<Command>,
    receiver: Receiver<Command>,
}

impl CommandBus {
    pub fn new() -> Self {
        let (sender, receiver) = mpsc::channel();
        Self { sender, receiver }
    }

    /// Get a publisher handle. Publishers are cheap to clone.
    pub fn publisher(&self) -> CommandPublisher {
        CommandPublisher {
            sender: self.sender.clone(),
        }
    }

    /// Try to receive the next command without blocking.
    pub fn try_recv(&self) -> Option<Command> {
        match self.receiver.try_recv() {
            Ok(command) => Some(command),
            // The bus owns a sender, so Disconnected cannot happen while it lives.
            Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => None,
        }
    }

    /// Drain all pending commands in publish order.
    pub fn drain(&self) -> Vec<Command> {
        let mut commands = Vec::new();
        while let Some(command) = self.try_recv() {
            commands.push(command);
        }
        commands
    }
}

impl Default for CommandBus {
    fn default() -> Self {
        Self::new()
    }
}

/// A cloneable command publisher.
#[derive(Clone)]
pub struct CommandPublisher {
    sender: Sender<Command>,
}

impl CommandPublisher {
    /// Queue a command for the next drain. Never blocks.
    ///
    /// If the bus has been dropped (app shutting down) the command is
    /// discarded.
    pub fn publish(&self, command: Command) {
        let _ = self.sender.send(command);
    }
}
