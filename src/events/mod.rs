//! Command system for decoupled state mutation.
//!
//! Presentation code never mutates state directly. It publishes a typed
//! [`Command`]; the message loop drains the [`CommandBus`] and hands each
//! command to the application root.
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │   Window    │     │   Content   │     │   Editing   │
//! │  procedure  │     │    host     │     │   surface   │
//! └──────┬──────┘     └──────┬──────┘     └──────┬──────┘
//!        │ publish()         │ publish()         │ publish()
//!        ▼                   ▼                   ▼
//! ┌─────────────────────────────────────────────────────┐
//! │                     CommandBus                      │
//! └─────────────────────────┬───────────────────────────┘
//!                           │ drain()
//!                           ▼
//! ┌─────────────────────────────────────────────────────┐
//! │                  App::handle()                      │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! Global hotkeys do not go through the bus: they are dispatched
//! synchronously by `input::HotkeyDispatcher`.

pub mod bus;
pub mod types;

pub use bus::{CommandBus, CommandPublisher};
pub use types::Command;
