//! Windows entry point and message loop.

use windows::Win32::UI::HiDpi::{
    SetProcessDpiAwarenessContext, DPI_AWARENESS_CONTEXT_PER_MONITOR_AWARE_V2,
};
use windows::Win32::UI::WindowsAndMessaging::{
    DispatchMessageW, GetMessageW, TranslateMessage, MSG, WM_HOTKEY,
};

use tracing::{debug, error, info, warn};

use super::hotkeys::Win32HotkeyBackend;
use super::window::{register_class, Win32WindowFactory};
use crate::app::{App, Flow, NoticeLevel};
use crate::error::AppError;
use crate::events::CommandBus;
use crate::handlers::dispatch_commands;
use crate::input::HotkeyBackend;
use crate::logging;
use crate::storage::{ConfigBackend, ConfigStore, JsonFileBackend};
use crate::window::{NativeWindow, WindowFactory, WindowModeController};

/// Main entry point for Windows.
pub fn run() {
    if let Err(e) = run_app() {
        error!(error = %e, "glasspane stopped");
        eprintln!("glasspane error: {}", e);
        std::process::exit(1);
    }
}

fn run_app() -> Result<(), AppError> {
    let store = ConfigStore::new(JsonFileBackend::at_default_location()?);
    let (state, outcome) = store.read();
    logging::init(state.debug_logging);
    outcome.log(&state);
    info!(path = %store.backend().path().display(), "using config file");

    if let Err(e) = unsafe {
        SetProcessDpiAwarenessContext(DPI_AWARENESS_CONTEXT_PER_MONITOR_AWARE_V2)
    } {
        debug!(error = %e, "DPI awareness already set");
    }

    let controller = WindowModeController::default();
    let instance = register_class(controller.color_key())?;

    let bus = CommandBus::new();
    let factory = Win32WindowFactory::new(instance, bus.publisher());
    let editor = factory.editor(state.editor_bounds);
    let hotkeys = Win32HotkeyBackend::new(instance)?;

    let mut app = App::new(store, state, factory, editor, hotkeys, controller);
    app.start();

    let mut flow = dispatch_commands(&mut app, &bus);
    report_notices(&mut app);

    let mut msg = MSG::default();
    while flow == Flow::Continue {
        let status = unsafe { GetMessageW(&mut msg, None, 0, 0) };
        if status.0 <= 0 {
            // WM_QUIT or a broken queue; close down the same way.
            app.shutdown();
            break;
        }

        if msg.message == WM_HOTKEY {
            app.on_hotkey(msg.wParam.0 as i32);
        } else {
            unsafe {
                let _ = TranslateMessage(&msg);
                DispatchMessageW(&msg);
            }
        }

        flow = dispatch_commands(&mut app, &bus);
        report_notices(&mut app);
    }
    Ok(())
}

/// No editing surface renders notices yet, so they go to the log.
fn report_notices<F, E, H, S>(app: &mut App<F, E, H, S>)
where
    F: WindowFactory + 'static,
    E: NativeWindow + 'static,
    H: HotkeyBackend,
    S: ConfigBackend,
{
    for notice in app.take_notices() {
        match notice.level {
            NoticeLevel::Info => info!("{}", notice.message),
            NoticeLevel::Warning => warn!("{}", notice.message),
            NoticeLevel::Error => error!("{}", notice.message),
        }
    }
}
