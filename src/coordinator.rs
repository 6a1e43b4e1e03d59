//! Live overlay windows and the global Locked/Unlocked mode.
//!
//! The coordinator owns the source registry, one window per source, the
//! editor surface, and the mode. Every window presents the same mode; a
//! toggle walks them in registration order without yielding in between.

use indexmap::IndexMap;
use tracing::{debug, info, warn};

use crate::error::AppError;
use crate::model::{Bounds, KeybindingSet, ModeState, NewSource, RegistryState, Source, SourceId};
use crate::registry::SourceRegistry;
use crate::window::{
    ModeTransition, NativeWindow, OverlayWindow, WindowFactory, WindowMode, WindowModeController,
};

struct WindowSlot<W> {
    window: W,
    /// Content host reported its first load.
    ready: bool,
}

/// What one toggle did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToggleReport {
    pub mode: ModeState,
    /// Windows whose styles actually changed.
    pub applied: usize,
    /// Windows skipped because their handle was stale or the OS refused.
    pub skipped: Vec<SourceId>,
}

pub struct OverlayCoordinator<F: WindowFactory, E: NativeWindow> {
    factory: F,
    registry: SourceRegistry,
    windows: IndexMap<SourceId, WindowSlot<F::Window>>,
    editor: E,
    editor_bounds: Bounds,
    controller: WindowModeController,
    mode: ModeState,
}

impl<F: WindowFactory, E: NativeWindow> OverlayCoordinator<F, E> {
    /// Build from loaded state. No windows are opened until
    /// [`open_all`](Self::open_all).
    pub fn new(factory: F, editor: E, state: &RegistryState, controller: WindowModeController) -> Self {
        Self {
            factory,
            registry: SourceRegistry::from_sources(state.sources.clone()),
            windows: IndexMap::new(),
            editor,
            editor_bounds: state.editor_bounds,
            controller,
            mode: ModeState::default(),
        }
    }

    pub fn mode(&self) -> ModeState {
        self.mode
    }

    pub fn registry(&self) -> &SourceRegistry {
        &self.registry
    }

    pub fn sources(&self) -> &[Source] {
        self.registry.all()
    }

    pub fn editor(&self) -> &E {
        &self.editor
    }

    pub fn editor_mut(&mut self) -> &mut E {
        &mut self.editor
    }

    pub fn editor_bounds(&self) -> Bounds {
        self.editor_bounds
    }

    pub fn window(&self, id: SourceId) -> Option<&F::Window> {
        self.windows.get(&id).map(|slot| &slot.window)
    }

    pub fn window_mut(&mut self, id: SourceId) -> Option<&mut F::Window> {
        self.windows.get_mut(&id).map(|slot| &mut slot.window)
    }

    /// Ids with an open window, in registration order.
    pub fn open_ids(&self) -> Vec<SourceId> {
        self.windows.keys().copied().collect()
    }

    /// Open a window for every registered source that has none, in
    /// registry order. Sources whose window fails to open stay registered.
    pub fn open_all(&mut self) {
        for id in self.registry.ids() {
            if self.windows.contains_key(&id) {
                continue;
            }
            if let Err(e) = self.open_window(id) {
                warn!(%id, error = %e, "could not open overlay window");
            }
        }
        self.apply_editor(WindowMode::from(self.mode));
    }

    fn open_window(&mut self, id: SourceId) -> Result<(), AppError> {
        let source = self.registry.get(id).ok_or(AppError::UnknownSource(id))?;
        let mut window = self.factory.open(source)?;
        window.content().load(&source.url);
        info!(%id, url = %source.url, "overlay window opened");

        if let Err(e) = self.controller.set_mode(&mut window, WindowMode::from(self.mode)) {
            warn!(%id, error = %e, "new window could not take the current mode");
        }
        self.windows.insert(id, WindowSlot { window, ready: false });
        Ok(())
    }

    /// Register a new source and open its window in the current mode.
    ///
    /// A bad URL is rejected before anything changes. If the window cannot be
    /// opened the source is withdrawn again.
    pub fn add_source(&mut self, request: NewSource) -> Result<SourceId, AppError> {
        let source = Source::create(request)?;
        let id = source.id;
        self.registry.add(source)?;

        if let Err(e) = self.open_window(id) {
            self.registry.remove(id);
            return Err(e);
        }
        Ok(id)
    }

    /// Close the source's window, if any, and drop it from the registry.
    pub fn remove_source(&mut self, id: SourceId) -> Option<Source> {
        if let Some(mut slot) = self.windows.shift_remove(&id) {
            slot.window.close();
            info!(%id, "overlay window closed");
        }
        self.registry.remove(id)
    }

    /// Replace the source order; `new_order` must be a permutation of the
    /// current ids.
    pub fn reorder(&mut self, new_order: &[SourceId]) -> Result<(), AppError> {
        self.registry.reorder(new_order)
    }

    pub fn rename(&mut self, id: SourceId, name: &str) -> Result<(), AppError> {
        self.registry.rename(id, name)
    }

    /// Point a source at a new URL and load it into its window.
    pub fn set_url(&mut self, id: SourceId, url: &str) -> Result<(), AppError> {
        let normalized = self.registry.set_url(id, url)?;
        if let Some(slot) = self.windows.get_mut(&id) {
            slot.ready = false;
            slot.window.content().load(&normalized);
        }
        Ok(())
    }

    pub fn reload(&mut self, id: SourceId) -> Result<(), AppError> {
        let slot = self.windows.get_mut(&id).ok_or(AppError::UnknownSource(id))?;
        slot.window.content().reload();
        Ok(())
    }

    pub fn reload_all(&mut self) {
        for slot in self.windows.values_mut() {
            slot.window.content().reload();
        }
    }

    /// Record the content host's ready signal. Returns `false` for ids with
    /// no open window.
    pub fn mark_ready(&mut self, id: SourceId) -> bool {
        match self.windows.get_mut(&id) {
            Some(slot) => {
                slot.ready = true;
                debug!(%id, "content ready");
                true
            }
            None => false,
        }
    }

    pub fn is_ready(&self, id: SourceId) -> bool {
        self.windows.get(&id).is_some_and(|slot| slot.ready)
    }

    /// Flip Locked/Unlocked and present every window and the editor in the
    /// new mode.
    ///
    /// Never aborts part way: a window that fails is logged, listed in the
    /// report, and the rest still transition.
    pub fn toggle(&mut self) -> ToggleReport {
        self.mode = self.mode.toggled();
        let mode = WindowMode::from(self.mode);

        let mut applied = 0;
        let mut skipped = Vec::new();
        for (id, slot) in self.windows.iter_mut() {
            match self.controller.set_mode(&mut slot.window, mode) {
                Ok(ModeTransition::Applied) => applied += 1,
                Ok(transition) => debug!(%id, ?transition, "window not changed"),
                Err(e) => {
                    warn!(%id, error = %e, "skipping window during toggle");
                    skipped.push(*id);
                }
            }
        }

        self.apply_editor(mode);

        info!(mode = ?self.mode, applied, skipped = skipped.len(), "mode toggled");
        ToggleReport {
            mode: self.mode,
            applied,
            skipped,
        }
    }

    /// The editor follows the mode and is hidden while locked.
    fn apply_editor(&mut self, mode: WindowMode) {
        if let Err(e) = self.controller.set_mode(&mut self.editor, mode) {
            warn!(error = %e, "editor surface could not change mode");
        }
        if let Err(e) = self.editor.set_visible(mode == WindowMode::Edit) {
            warn!(error = %e, "editor surface could not change visibility");
        }
    }

    /// Live bounds reported while the operator drags or resizes. Kept in
    /// memory until the next save.
    pub fn set_from_external(&mut self, id: SourceId, bounds: Bounds) {
        if let Err(e) = self.registry.set_bounds(id, bounds) {
            debug!(%id, error = %e, "ignoring bounds for unknown source");
        }
    }

    pub fn set_editor_bounds(&mut self, bounds: Bounds) {
        self.editor_bounds = bounds.sanitized();
    }

    /// Pull live bounds from every open window and the editor into the
    /// registry. Windows that cannot report keep their last known bounds.
    pub fn capture_bounds(&mut self) {
        for (id, slot) in self.windows.iter() {
            match slot.window.bounds() {
                Ok(bounds) => {
                    if let Err(e) = self.registry.set_bounds(*id, bounds) {
                        debug!(%id, error = %e, "open window has no registry entry");
                    }
                }
                Err(e) => warn!(%id, error = %e, "keeping last known bounds"),
            }
        }
        match self.editor.bounds() {
            Ok(bounds) => self.editor_bounds = bounds.sanitized(),
            Err(e) => warn!(error = %e, "keeping last known editor bounds"),
        }
    }

    /// Snapshot for persistence.
    pub fn registry_state(&self, keybindings: &KeybindingSet, debug_logging: bool) -> RegistryState {
        RegistryState {
            sources: self.registry.all().to_vec(),
            editor_bounds: self.editor_bounds,
            keybindings: keybindings.clone(),
            debug_logging,
        }
    }

    /// Close every overlay window. Sources stay registered.
    pub fn close_all(&mut self) {
        for (id, mut slot) in self.windows.drain(..) {
            slot.window.close();
            debug!(%id, "overlay window closed on shutdown");
        }
    }
}
