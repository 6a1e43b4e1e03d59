//! Win32 overlay and editor windows.
//!
//! Each window owns one `HWND` at a time. The handle is replaceable: a mode
//! transition ends with [`NativeWindow::recreate`], which destroys it and
//! builds a new one with the same styles, bounds and title. Everything the
//! window procedure needs lives in a boxed `WindowContext` behind
//! `GWLP_USERDATA`, freed on `WM_NCDESTROY`.

use windows::core::{w, HSTRING, PCWSTR};
use windows::Win32::Foundation::{COLORREF, HINSTANCE, HWND, LPARAM, LRESULT, RECT, WPARAM};
use windows::Win32::Graphics::Gdi::CreateSolidBrush;
use windows::Win32::System::LibraryLoader::GetModuleHandleW;
use windows::Win32::UI::WindowsAndMessaging::{
    CreateWindowExW, DefWindowProcW, DestroyWindow, GetWindowLongPtrW, GetWindowRect, IsWindow,
    LoadCursorW, RegisterClassW, SetLayeredWindowAttributes, SetWindowLongPtrW, SetWindowPos,
    ShowWindow, CS_HREDRAW, CS_VREDRAW, GWLP_USERDATA, GWL_EXSTYLE, GWL_STYLE, HWND_NOTOPMOST,
    HWND_TOPMOST, IDC_ARROW, LWA_COLORKEY, SWP_FRAMECHANGED, SWP_NOACTIVATE, SWP_NOMOVE,
    SWP_NOSIZE, SW_HIDE, SW_SHOWNOACTIVATE, WINDOW_EX_STYLE, WINDOW_STYLE, WM_CLOSE,
    WM_EXITSIZEMOVE, WM_NCDESTROY, WNDCLASSW,
};

use tracing::{debug, warn};

use super::content::PlaceholderContent;
use crate::error::WindowError;
use crate::events::{Command, CommandPublisher};
use crate::model::{Bounds, Source, SourceId};
use crate::window::{
    ColorKey, ContentHost, NativeWindow, OverlayWindow, StyleBits, WindowFactory, WindowMode,
};

const CLASS_NAME: PCWSTR = w!("GlasspaneWindow");

pub(crate) fn os_error(e: windows::core::Error) -> WindowError {
    WindowError::Os(e.to_string())
}

/// Which surface a window procedure is serving.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowRole {
    Overlay(SourceId),
    Editor,
}

/// Per-handle state reachable from the window procedure.
struct WindowContext {
    role: WindowRole,
    publisher: CommandPublisher,
}

/// Register the shared window class. Its background brush is the color key,
/// so unpainted client area becomes transparent in overlay mode.
pub fn register_class(color_key: ColorKey) -> Result<HINSTANCE, WindowError> {
    unsafe {
        let instance: HINSTANCE = GetModuleHandleW(None).map_err(os_error)?.into();
        let wc = WNDCLASSW {
            style: CS_HREDRAW | CS_VREDRAW,
            lpfnWndProc: Some(wndproc),
            hInstance: instance,
            hCursor: LoadCursorW(None, IDC_ARROW).map_err(os_error)?,
            hbrBackground: CreateSolidBrush(COLORREF(color_key.to_colorref())),
            lpszClassName: CLASS_NAME,
            ..Default::default()
        };
        if RegisterClassW(&wc) == 0 {
            return Err(WindowError::Os("window class registration failed".into()));
        }
        Ok(instance)
    }
}

extern "system" fn wndproc(hwnd: HWND, msg: u32, wparam: WPARAM, lparam: LPARAM) -> LRESULT {
    unsafe {
        match msg {
            WM_NCDESTROY => {
                let ptr = SetWindowLongPtrW(hwnd, GWLP_USERDATA, 0) as *mut WindowContext;
                if !ptr.is_null() {
                    drop(Box::from_raw(ptr));
                }
                DefWindowProcW(hwnd, msg, wparam, lparam)
            }

            WM_EXITSIZEMOVE => {
                if let Some(context) = context(hwnd) {
                    if let Ok(bounds) = window_rect(hwnd) {
                        let command = match context.role {
                            WindowRole::Overlay(id) => Command::BoundsChanged { id, bounds },
                            WindowRole::Editor => Command::EditorBoundsChanged(bounds),
                        };
                        context.publisher.publish(command);
                    }
                }
                LRESULT(0)
            }

            // Overlays are only removed through the editor.
            WM_CLOSE => {
                if let Some(context) = context(hwnd) {
                    if context.role == WindowRole::Editor {
                        context.publisher.publish(Command::Shutdown);
                    }
                }
                LRESULT(0)
            }

            _ => DefWindowProcW(hwnd, msg, wparam, lparam),
        }
    }
}

unsafe fn context<'a>(hwnd: HWND) -> Option<&'a WindowContext> {
    let ptr = GetWindowLongPtrW(hwnd, GWLP_USERDATA) as *const WindowContext;
    ptr.as_ref()
}

fn window_rect(hwnd: HWND) -> Result<Bounds, WindowError> {
    let mut rect = RECT::default();
    unsafe { GetWindowRect(hwnd, &mut rect) }.map_err(os_error)?;
    Ok(Bounds::new(
        rect.left,
        rect.top,
        rect.right - rect.left,
        rect.bottom - rect.top,
    ))
}

/// One top-level window: an overlay bound to a source, or the editor.
pub struct Win32Window {
    role: WindowRole,
    instance: HINSTANCE,
    publisher: CommandPublisher,
    hwnd: Option<HWND>,
    title: String,
    /// Used when the handle is (re)built.
    bounds: Bounds,
    style: StyleBits,
    color_key: Option<ColorKey>,
    visible: bool,
    content: PlaceholderContent,
}

impl Win32Window {
    pub fn new(
        role: WindowRole,
        instance: HINSTANCE,
        publisher: CommandPublisher,
        title: impl Into<String>,
        bounds: Bounds,
    ) -> Self {
        let id = match role {
            WindowRole::Overlay(id) => Some(id),
            WindowRole::Editor => None,
        };
        Self {
            role,
            instance,
            content: PlaceholderContent::new(id, publisher.clone()),
            publisher,
            hwnd: None,
            title: title.into(),
            bounds: bounds.sanitized(),
            style: StyleBits::initial(WindowMode::Edit),
            color_key: None,
            visible: true,
        }
    }

    /// The current handle, or `StaleHandle` if it is gone.
    fn live(&self) -> Result<HWND, WindowError> {
        match self.hwnd {
            Some(hwnd) if unsafe { IsWindow(Some(hwnd)) }.as_bool() => Ok(hwnd),
            _ => Err(WindowError::StaleHandle),
        }
    }

    fn create(&mut self) -> Result<HWND, WindowError> {
        let Bounds { x, y, width, height } = self.bounds;
        let hwnd = unsafe {
            CreateWindowExW(
                WINDOW_EX_STYLE(self.style.ex_style.bits()),
                CLASS_NAME,
                &HSTRING::from(self.title.as_str()),
                WINDOW_STYLE(self.style.style.bits()),
                x,
                y,
                width,
                height,
                None,
                None,
                Some(self.instance),
                None,
            )
        }
        .map_err(os_error)?;

        // Attached after creation so a failed create leaks nothing.
        let context = Box::into_raw(Box::new(WindowContext {
            role: self.role,
            publisher: self.publisher.clone(),
        }));
        unsafe { SetWindowLongPtrW(hwnd, GWLP_USERDATA, context as isize) };
        self.hwnd = Some(hwnd);
        self.content.attach(Some(hwnd));

        if let Some(key) = self.color_key {
            apply_color_key(hwnd, key)?;
        }
        unsafe {
            let _ = ShowWindow(hwnd, if self.visible { SW_SHOWNOACTIVATE } else { SW_HIDE });
        }
        debug!(role = ?self.role, "native window created");
        Ok(hwnd)
    }

    fn destroy(&mut self) {
        self.content.attach(None);
        if let Some(hwnd) = self.hwnd.take() {
            if unsafe { IsWindow(Some(hwnd)) }.as_bool() {
                if let Err(e) = unsafe { DestroyWindow(hwnd) } {
                    warn!(role = ?self.role, error = %e, "DestroyWindow failed");
                }
            }
        }
    }
}

fn apply_color_key(hwnd: HWND, key: ColorKey) -> Result<(), WindowError> {
    unsafe { SetLayeredWindowAttributes(hwnd, COLORREF(key.to_colorref()), 255, LWA_COLORKEY) }
        .map_err(os_error)
}

impl NativeWindow for Win32Window {
    fn ensure_handle(&mut self) -> Result<(), WindowError> {
        match self.hwnd {
            None => self.create().map(|_| ()),
            Some(_) => self.live().map(|_| ()),
        }
    }

    fn read_style(&self) -> Result<StyleBits, WindowError> {
        let hwnd = self.live()?;
        let (style, ex_style) = unsafe {
            (
                GetWindowLongPtrW(hwnd, GWL_STYLE) as u32,
                GetWindowLongPtrW(hwnd, GWL_EXSTYLE) as u32,
            )
        };
        Ok(StyleBits::from_raw(style, ex_style))
    }

    fn write_style(&mut self, style: StyleBits) -> Result<(), WindowError> {
        let hwnd = self.live()?;
        unsafe {
            SetWindowLongPtrW(hwnd, GWL_STYLE, style.style.bits() as isize);
            SetWindowLongPtrW(hwnd, GWL_EXSTYLE, style.ex_style.bits() as isize);
        }
        self.style = style;
        Ok(())
    }

    fn set_color_key(&mut self, key: Option<ColorKey>) -> Result<(), WindowError> {
        let hwnd = self.live()?;
        if let Some(key) = key {
            apply_color_key(hwnd, key)?;
        }
        // Without WS_EX_LAYERED the attributes no longer apply.
        self.color_key = key;
        Ok(())
    }

    fn refresh_frame(&mut self, topmost: bool) -> Result<(), WindowError> {
        let hwnd = self.live()?;
        let band = if topmost { HWND_TOPMOST } else { HWND_NOTOPMOST };
        unsafe {
            SetWindowPos(
                hwnd,
                Some(band),
                0,
                0,
                0,
                0,
                SWP_FRAMECHANGED | SWP_NOMOVE | SWP_NOSIZE | SWP_NOACTIVATE,
            )
        }
        .map_err(os_error)
    }

    fn recreate(&mut self) -> Result<(), WindowError> {
        let hwnd = self.live()?;
        self.bounds = window_rect(hwnd)?;
        self.style = self.read_style()?;
        self.destroy();
        self.create()?;
        if self.style.is_topmost() {
            self.refresh_frame(true)?;
        }
        Ok(())
    }

    fn set_visible(&mut self, visible: bool) -> Result<(), WindowError> {
        let hwnd = self.live()?;
        unsafe {
            let _ = ShowWindow(hwnd, if visible { SW_SHOWNOACTIVATE } else { SW_HIDE });
        }
        self.visible = visible;
        Ok(())
    }

    fn bounds(&self) -> Result<Bounds, WindowError> {
        window_rect(self.live()?)
    }

    fn close(&mut self) {
        self.destroy();
    }
}

impl OverlayWindow for Win32Window {
    fn content(&mut self) -> &mut dyn ContentHost {
        &mut self.content
    }
}

impl Drop for Win32Window {
    fn drop(&mut self) {
        self.destroy();
    }
}

/// Opens one [`Win32Window`] per source.
pub struct Win32WindowFactory {
    instance: HINSTANCE,
    publisher: CommandPublisher,
}

impl Win32WindowFactory {
    pub fn new(instance: HINSTANCE, publisher: CommandPublisher) -> Self {
        Self {
            instance,
            publisher,
        }
    }

    /// The editing surface. Its handle is created on first use.
    pub fn editor(&self, bounds: Bounds) -> Win32Window {
        Win32Window::new(
            WindowRole::Editor,
            self.instance,
            self.publisher.clone(),
            "glasspane",
            bounds,
        )
    }
}

impl WindowFactory for Win32WindowFactory {
    type Window = Win32Window;

    fn open(&mut self, source: &Source) -> Result<Self::Window, WindowError> {
        let mut window = Win32Window::new(
            WindowRole::Overlay(source.id),
            self.instance,
            self.publisher.clone(),
            source.label(),
            source.bounds,
        );
        window.ensure_handle()?;
        Ok(window)
    }
}
