//! Command dispatcher.
//!
//! Called by the message loop after every OS message. It drains the command
//! bus and applies each command to the application root, in publish order.
//!
//! ```text
//! CommandBus::drain() → dispatch_commands() → App::handle()
//! ```

use tracing::debug;

use crate::app::{App, Flow};
use crate::events::CommandBus;
use crate::input::HotkeyBackend;
use crate::storage::ConfigBackend;
use crate::window::{NativeWindow, WindowFactory};

/// Apply all pending commands.
///
/// Stops at the first command that ends the app; anything queued behind it
/// is discarded.
pub fn dispatch_commands<F, E, H, S>(app: &mut App<F, E, H, S>, bus: &CommandBus) -> Flow
where
    F: WindowFactory + 'static,
    E: NativeWindow + 'static,
    H: HotkeyBackend,
    S: ConfigBackend,
{
    for command in bus.drain() {
        if app.handle(command) == Flow::Exit {
            let dropped = bus.drain().len();
            if dropped > 0 {
                debug!(dropped, "commands discarded after shutdown");
            }
            return Flow::Exit;
        }
    }
    Flow::Continue
}
