//! Command handling.
//!
//! This module contains the dispatcher that drains the command bus and
//! feeds the application root.

pub mod dispatcher;

pub use dispatcher::dispatch_commands;
