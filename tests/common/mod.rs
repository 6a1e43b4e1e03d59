//! In-memory stand-ins for the OS seams.
#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use glasspane::coordinator::OverlayCoordinator;
use glasspane::error::{HotkeyError, PersistenceError, WindowError};
use glasspane::input::{Combo, HotkeyBackend};
use glasspane::model::{Bounds, NewSource, RegistryState, Source, SourceId};
use glasspane::storage::{ConfigBackend, ConfigStore};
use glasspane::window::{
    ColorKey, ContentHost, ModeTransition, NativeWindow, OverlayWindow, StyleBits, WindowFactory,
    WindowMode, WindowModeController,
};
use glasspane::App;

// === Windows ===

#[derive(Debug, Default)]
pub struct FakeContent {
    pub loads: Vec<String>,
    pub reloads: usize,
}

impl ContentHost for FakeContent {
    fn load(&mut self, url: &str) {
        self.loads.push(url.to_string());
    }

    fn reload(&mut self) {
        self.reloads += 1;
    }
}

/// Records every presentation call; `stale` makes the handle unusable.
pub struct FakeWindow {
    pub has_handle: bool,
    pub stale: bool,
    pub style: StyleBits,
    pub bounds: Bounds,
    pub visible: bool,
    pub color_key: Option<ColorKey>,
    pub topmost: bool,
    pub style_writes: usize,
    pub recreates: usize,
    pub closed: bool,
    /// Presentation calls in order, by method name.
    pub calls: Vec<&'static str>,
    pub content: FakeContent,
    /// Simulates a window message that re-enters the controller while
    /// styles are being written.
    pub reenter: Option<Rc<WindowModeController>>,
    pub nested: Vec<ModeTransition>,
}

impl FakeWindow {
    pub fn new(bounds: Bounds) -> Self {
        Self {
            has_handle: false,
            stale: false,
            style: StyleBits::initial(WindowMode::Edit),
            bounds,
            visible: true,
            color_key: None,
            topmost: false,
            style_writes: 0,
            recreates: 0,
            closed: false,
            calls: Vec::new(),
            content: FakeContent::default(),
            reenter: None,
            nested: Vec::new(),
        }
    }

    pub fn editor() -> Self {
        Self::new(Bounds::default_editor())
    }

    fn check(&self) -> Result<(), WindowError> {
        if self.stale || self.closed || !self.has_handle {
            Err(WindowError::StaleHandle)
        } else {
            Ok(())
        }
    }

    pub fn is_overlay(&self) -> bool {
        self.style.is_input_transparent() && self.style.is_topmost() && !self.style.has_frame()
    }
}

impl NativeWindow for FakeWindow {
    fn ensure_handle(&mut self) -> Result<(), WindowError> {
        if self.stale || self.closed {
            return Err(WindowError::StaleHandle);
        }
        self.has_handle = true;
        Ok(())
    }

    fn read_style(&self) -> Result<StyleBits, WindowError> {
        self.check()?;
        Ok(self.style)
    }

    fn write_style(&mut self, style: StyleBits) -> Result<(), WindowError> {
        self.check()?;
        self.calls.push("write_style");
        self.style = style;
        self.style_writes += 1;
        if let Some(controller) = self.reenter.clone() {
            let mut other = FakeWindow::new(self.bounds);
            if let Ok(outcome) = controller.set_mode(&mut other, WindowMode::Overlay) {
                self.nested.push(outcome);
            }
        }
        Ok(())
    }

    fn set_color_key(&mut self, key: Option<ColorKey>) -> Result<(), WindowError> {
        self.check()?;
        self.calls.push("set_color_key");
        self.color_key = key;
        Ok(())
    }

    fn refresh_frame(&mut self, topmost: bool) -> Result<(), WindowError> {
        self.check()?;
        self.calls.push("refresh_frame");
        self.topmost = topmost;
        Ok(())
    }

    fn recreate(&mut self) -> Result<(), WindowError> {
        self.check()?;
        self.calls.push("recreate");
        self.recreates += 1;
        Ok(())
    }

    fn set_visible(&mut self, visible: bool) -> Result<(), WindowError> {
        self.check()?;
        self.visible = visible;
        Ok(())
    }

    fn bounds(&self) -> Result<Bounds, WindowError> {
        self.check()?;
        Ok(self.bounds)
    }

    fn close(&mut self) {
        self.closed = true;
    }
}

impl OverlayWindow for FakeWindow {
    fn content(&mut self) -> &mut dyn ContentHost {
        &mut self.content
    }
}

/// Opens [`FakeWindow`]s; URLs listed in `refuse` fail to open.
#[derive(Default)]
pub struct FakeFactory {
    pub refuse: Vec<String>,
    pub opened: usize,
}

impl WindowFactory for FakeFactory {
    type Window = FakeWindow;

    fn open(&mut self, source: &Source) -> Result<FakeWindow, WindowError> {
        if self.refuse.contains(&source.url) {
            return Err(WindowError::Os("refused".into()));
        }
        self.opened += 1;
        let mut window = FakeWindow::new(source.bounds);
        window.ensure_handle()?;
        Ok(window)
    }
}

pub type TestCoordinator = OverlayCoordinator<FakeFactory, FakeWindow>;

pub fn state_with(urls: &[&str]) -> RegistryState {
    let mut state = RegistryState::default();
    for url in urls {
        state
            .sources
            .push(Source::create(NewSource::new(*url)).unwrap());
    }
    state
}

/// Coordinator over `urls` with every window already open.
pub fn coordinator_with(urls: &[&str]) -> TestCoordinator {
    let state = state_with(urls);
    let mut coordinator = OverlayCoordinator::new(
        FakeFactory::default(),
        FakeWindow::editor(),
        &state,
        WindowModeController::default(),
    );
    coordinator.open_all();
    coordinator
}

pub fn ids(coordinator: &TestCoordinator) -> Vec<SourceId> {
    coordinator.sources().iter().map(|s| s.id).collect()
}

// === Hotkeys ===

/// Process-wide hotkey table shared between fake backends, standing in for
/// the OS.
#[derive(Debug, Default)]
pub struct FakeOs {
    /// Combos held by other applications.
    pub foreign: Vec<Combo>,
    pub claimed: Vec<(i32, Combo)>,
    pub unregistered: Vec<i32>,
}

impl FakeOs {
    pub fn shared() -> Rc<RefCell<FakeOs>> {
        Rc::new(RefCell::new(FakeOs::default()))
    }

    /// The registration id the OS would report for a key press.
    pub fn press(&self, combo: &str) -> Option<i32> {
        let combo = Combo::parse(combo).ok()?;
        self.claimed
            .iter()
            .find(|(_, c)| *c == combo)
            .map(|(id, _)| *id)
    }
}

pub struct FakeHotkeyBackend {
    pub os: Rc<RefCell<FakeOs>>,
}

impl FakeHotkeyBackend {
    pub fn new(os: &Rc<RefCell<FakeOs>>) -> Self {
        Self { os: Rc::clone(os) }
    }
}

impl HotkeyBackend for FakeHotkeyBackend {
    fn register(&mut self, id: i32, combo: &Combo) -> Result<(), HotkeyError> {
        let mut os = self.os.borrow_mut();
        let taken = os.foreign.contains(combo) || os.claimed.iter().any(|(_, c)| c == combo);
        if taken {
            return Err(HotkeyError::RegistrationConflict(combo.to_string()));
        }
        os.claimed.push((id, *combo));
        Ok(())
    }

    fn unregister(&mut self, id: i32) {
        let mut os = self.os.borrow_mut();
        os.claimed.retain(|(held, _)| *held != id);
        os.unregistered.push(id);
    }
}

// === Persistence ===

/// Stored state shared with the test; `fail_saves` makes every save fail.
#[derive(Clone, Default)]
pub struct MemoryBackend {
    pub stored: Rc<RefCell<Option<RegistryState>>>,
    pub fail_saves: bool,
}

impl ConfigBackend for MemoryBackend {
    fn load(&self) -> Result<Option<RegistryState>, PersistenceError> {
        Ok(self.stored.borrow().clone())
    }

    fn save(&self, state: &RegistryState) -> Result<(), PersistenceError> {
        if self.fail_saves {
            return Err(PersistenceError::Io {
                path: "memory".into(),
                source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only"),
            });
        }
        *self.stored.borrow_mut() = Some(state.clone());
        Ok(())
    }
}

pub type TestApp = App<FakeFactory, FakeWindow, FakeHotkeyBackend, MemoryBackend>;

/// Started app over `state`, persisting into `backend`.
pub fn app_with(state: RegistryState, backend: MemoryBackend, os: &Rc<RefCell<FakeOs>>) -> TestApp {
    let mut app = App::new(
        ConfigStore::new(backend),
        state,
        FakeFactory::default(),
        FakeWindow::editor(),
        FakeHotkeyBackend::new(os),
        WindowModeController::default(),
    );
    app.start();
    app
}
