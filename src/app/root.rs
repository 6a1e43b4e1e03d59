//! The application root.
//!
//! Built once at startup and passed by reference to whatever needs it;
//! nothing here is reachable through statics.

use tracing::{debug, error, info, trace, warn};

use super::notice::Notice;
use crate::coordinator::OverlayCoordinator;
use crate::error::{AppError, PersistenceError};
use crate::events::Command;
use crate::input::{HotkeyBackend, HotkeyDispatcher};
use crate::model::{KeybindingSet, RegistryState, ACTION_TOGGLE};
use crate::storage::{ConfigBackend, ConfigStore};
use crate::window::{NativeWindow, WindowFactory, WindowModeController};

fn toggle_action<F: WindowFactory, E: NativeWindow>(coordinator: &mut Coordinator<F, E>) {
    coordinator.toggle();
}

/// Whether the message loop keeps running after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

pub type Coordinator<F, E> = OverlayCoordinator<F, E>;

pub struct App<F, E, H, S>
where
    F: WindowFactory + 'static,
    E: NativeWindow + 'static,
    H: HotkeyBackend,
    S: ConfigBackend,
{
    coordinator: Coordinator<F, E>,
    hotkeys: HotkeyDispatcher<H, Coordinator<F, E>>,
    store: ConfigStore<S>,
    keybindings: KeybindingSet,
    debug_logging: bool,
    notices: Vec<Notice>,
}

impl<F, E, H, S> App<F, E, H, S>
where
    F: WindowFactory + 'static,
    E: NativeWindow + 'static,
    H: HotkeyBackend,
    S: ConfigBackend,
{
    /// Assemble the root from already loaded state. Nothing is opened or
    /// registered until [`start`](Self::start).
    pub fn new(
        store: ConfigStore<S>,
        state: RegistryState,
        factory: F,
        editor: E,
        hotkey_backend: H,
        controller: WindowModeController,
    ) -> Self {
        Self {
            coordinator: OverlayCoordinator::new(factory, editor, &state, controller),
            hotkeys: HotkeyDispatcher::new(hotkey_backend),
            store,
            keybindings: state.keybindings,
            debug_logging: state.debug_logging,
            notices: Vec::new(),
        }
    }

    /// Open every window in edit mode and claim the configured hotkeys.
    pub fn start(&mut self) {
        self.coordinator.open_all();

        let bindings: Vec<(String, String)> = self
            .keybindings
            .iter()
            .map(|(a, c)| (a.to_string(), c.to_string()))
            .collect();
        for (action, combo) in bindings {
            let result = match action.as_str() {
                ACTION_TOGGLE => self.hotkeys.register(&action, &combo, toggle_action::<F, E>),
                other => {
                    warn!(action = other, "ignoring keybinding for unknown action");
                    continue;
                }
            };
            if let Err(e) = result {
                self.notify(Notice::error(format!(
                    "Hotkey for '{}' is not active: {}",
                    action, e
                )));
            }
        }
        info!(sources = self.coordinator.sources().len(), "started");
    }

    pub fn coordinator(&self) -> &Coordinator<F, E> {
        &self.coordinator
    }

    pub fn coordinator_mut(&mut self) -> &mut Coordinator<F, E> {
        &mut self.coordinator
    }

    pub fn hotkeys(&self) -> &HotkeyDispatcher<H, Coordinator<F, E>> {
        &self.hotkeys
    }

    pub fn keybindings(&self) -> &KeybindingSet {
        &self.keybindings
    }

    /// OS hotkey notification; runs the bound action before returning.
    pub fn on_hotkey(&mut self, id: i32) -> bool {
        self.hotkeys.dispatch(id, &mut self.coordinator)
    }

    /// Apply one command. Failures become notices; nothing here panics or
    /// stops the loop except [`Command::Shutdown`].
    pub fn handle(&mut self, command: Command) -> Flow {
        if command.is_notification() {
            trace!(command = command.description(), "handling command");
        } else {
            debug!(command = command.description(), "handling command");
        }
        match command {
            Command::Toggle => {
                self.coordinator.toggle();
            }
            Command::AddSource(request) => match self.coordinator.add_source(request) {
                Ok(id) => debug!(%id, "source added"),
                Err(e) => self.reject("Could not add source", e),
            },
            Command::RemoveSource(id) => {
                if self.coordinator.remove_source(id).is_none() {
                    debug!(%id, "remove for unknown source ignored");
                }
            }
            Command::Reorder(order) => {
                if let Err(e) = self.coordinator.reorder(&order) {
                    self.reject("Could not reorder sources", e);
                }
            }
            Command::Rename { id, name } => {
                if let Err(e) = self.coordinator.rename(id, &name) {
                    self.reject("Could not rename source", e);
                }
            }
            Command::SetUrl { id, url } => {
                if let Err(e) = self.coordinator.set_url(id, &url) {
                    self.reject("Could not change url", e);
                }
            }
            Command::Reload(id) => {
                if let Err(e) = self.coordinator.reload(id) {
                    self.reject("Could not reload source", e);
                }
            }
            Command::ReloadAll => self.coordinator.reload_all(),
            Command::BoundsChanged { id, bounds } => self.coordinator.set_from_external(id, bounds),
            Command::EditorBoundsChanged(bounds) => self.coordinator.set_editor_bounds(bounds),
            Command::ContentReady(id) => {
                self.coordinator.mark_ready(id);
            }
            Command::RebindHotkey { action, combo } => self.rebind(&action, &combo),
            Command::Save => {
                let _ = self.save();
            }
            Command::Shutdown => {
                self.shutdown();
                return Flow::Exit;
            }
        }
        Flow::Continue
    }

    fn rebind(&mut self, action: &str, combo: &str) {
        match self.hotkeys.rebind(action, combo) {
            Ok(bound) => {
                self.keybindings.set(action, bound.to_string());
                self.notify(Notice::info(format!("'{}' is now bound to {}", action, bound)));
            }
            Err(e) => self.notify(Notice::error(format!(
                "Hotkey for '{}' is not active: {}",
                action, e
            ))),
        }
    }

    /// Persist current state. A failure is also queued as a notice.
    pub fn save(&mut self) -> Result<(), PersistenceError> {
        let result = self
            .store
            .save(&mut self.coordinator, &self.keybindings, self.debug_logging);
        if let Err(e) = &result {
            error!(error = %e, "save failed");
            self.notify(Notice::error(format!("Settings were not saved: {}", e)));
        }
        result
    }

    /// Save, then close every window. Hotkeys are released when the app is
    /// dropped.
    pub fn shutdown(&mut self) {
        let _ = self.save();
        self.coordinator.close_all();
        self.coordinator.editor_mut().close();
        info!("shut down");
    }

    fn reject(&mut self, what: &str, e: AppError) {
        warn!(error = %e, "{}", what);
        self.notify(Notice::warning(format!("{}: {}", what, e)));
    }

    fn notify(&mut self, notice: Notice) {
        self.notices.push(notice);
    }

    /// Notices raised since the last call, oldest first.
    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }
}
