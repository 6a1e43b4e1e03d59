//! Global hotkey registration and dispatch.
//!
//! One combo per named action is claimed process-wide through a
//! [`HotkeyBackend`]. The OS notifies the UI thread with the registration
//! id; [`HotkeyDispatcher::dispatch`] runs the bound callback right there.

use std::collections::BTreeMap;

use tracing::{debug, info, warn};

use super::combo::Combo;
use crate::error::HotkeyError;
use crate::model::constants::{FIRST_HOTKEY_ID, MAX_HOTKEY_ID};

/// OS side of global hotkeys.
pub trait HotkeyBackend {
    /// Claim `combo` under `id`. `RegistrationConflict` when another
    /// application already owns it.
    fn register(&mut self, id: i32, combo: &Combo) -> Result<(), HotkeyError>;

    fn unregister(&mut self, id: i32);
}

/// Action body, run on the UI thread with the dispatch context.
pub type HotkeyCallback<C> = Box<dyn FnMut(&mut C)>;

#[derive(Debug, Clone, Copy)]
struct Binding {
    id: i32,
    combo: Combo,
}

struct ActionSlot<C> {
    callback: HotkeyCallback<C>,
    binding: Option<Binding>,
}

/// Named actions bound to global combos.
///
/// `C` is whatever the callbacks operate on; it is passed in at dispatch time
/// so the dispatcher never holds a reference to application state.
pub struct HotkeyDispatcher<B: HotkeyBackend, C> {
    backend: B,
    actions: BTreeMap<String, ActionSlot<C>>,
    next_id: i32,
}

impl<B: HotkeyBackend, C> HotkeyDispatcher<B, C> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            actions: BTreeMap::new(),
            next_id: FIRST_HOTKEY_ID,
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Attach `callback` to `action` and claim `combo` for it.
    ///
    /// Any combo the action held before is released first. On failure the
    /// action is left unbound but keeps its callback, so a corrected combo
    /// can be applied with [`rebind`](Self::rebind).
    pub fn register<F>(&mut self, action: &str, combo: &str, callback: F) -> Result<Combo, HotkeyError>
    where
        F: FnMut(&mut C) + 'static,
    {
        self.unbind(action);
        self.actions.insert(
            action.to_string(),
            ActionSlot {
                callback: Box::new(callback),
                binding: None,
            },
        );
        self.bind(action, combo)
    }

    /// Move `action` to a new combo.
    ///
    /// The old combo is released before the new one is parsed and claimed.
    /// If either step fails the action ends unbound and never falls back to
    /// the old combo.
    pub fn rebind(&mut self, action: &str, combo: &str) -> Result<Combo, HotkeyError> {
        if !self.actions.contains_key(action) {
            return Err(HotkeyError::UnknownAction(action.to_string()));
        }
        self.unbind(action);
        self.bind(action, combo)
    }

    /// Release the combo held by `action`. Returns whether one was held.
    pub fn unbind(&mut self, action: &str) -> bool {
        let Some(binding) = self
            .actions
            .get_mut(action)
            .and_then(|slot| slot.binding.take())
        else {
            return false;
        };
        self.backend.unregister(binding.id);
        info!(action, combo = %binding.combo, id = binding.id, "hotkey unregistered");
        true
    }

    fn bind(&mut self, action: &str, combo: &str) -> Result<Combo, HotkeyError> {
        let parsed = Combo::parse(combo).inspect_err(|e| {
            warn!(action, error = %e, "hotkey left unbound");
        })?;
        self.claim(action, parsed)
    }

    fn claim(&mut self, action: &str, combo: Combo) -> Result<Combo, HotkeyError> {
        let id = self.allocate_id();
        self.backend.register(id, &combo).inspect_err(|e| {
            warn!(action, error = %e, "hotkey left unbound");
        })?;

        if let Some(slot) = self.actions.get_mut(action) {
            slot.binding = Some(Binding { id, combo });
        }
        info!(action, combo = %combo, id, "hotkey registered");
        Ok(combo)
    }

    /// Next id not held by any binding. Every registration gets a fresh one so
    /// a late notification for a released combo matches nothing.
    fn allocate_id(&mut self) -> i32 {
        loop {
            let id = self.next_id;
            self.next_id = if id >= MAX_HOTKEY_ID {
                FIRST_HOTKEY_ID
            } else {
                id + 1
            };
            let in_use = self
                .actions
                .values()
                .any(|slot| slot.binding.is_some_and(|b| b.id == id));
            if !in_use {
                return id;
            }
        }
    }

    pub fn binding(&self, action: &str) -> Option<Combo> {
        self.actions
            .get(action)
            .and_then(|slot| slot.binding)
            .map(|b| b.combo)
    }

    pub fn is_bound(&self, action: &str) -> bool {
        self.binding(action).is_some()
    }

    /// Run the action registered under `id`, synchronously, with `ctx`.
    ///
    /// Returns `false` when no action holds `id`.
    pub fn dispatch(&mut self, id: i32, ctx: &mut C) -> bool {
        let hit = self
            .actions
            .iter_mut()
            .find(|(_, slot)| slot.binding.is_some_and(|b| b.id == id));

        match hit {
            Some((action, slot)) => {
                debug!(action = action.as_str(), id, "hotkey dispatched");
                (slot.callback)(ctx);
                true
            }
            None => {
                debug!(id, "hotkey notification with no bound action");
                false
            }
        }
    }
}

impl<B: HotkeyBackend, C> Drop for HotkeyDispatcher<B, C> {
    fn drop(&mut self) {
        for (action, slot) in self.actions.iter_mut() {
            if let Some(binding) = slot.binding.take() {
                self.backend.unregister(binding.id);
                debug!(action = action.as_str(), id = binding.id, "hotkey released on teardown");
            }
        }
    }
}
