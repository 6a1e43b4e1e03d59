//! Stand-in content host.
//!
//! Shows the loaded URL in the window caption and reports ready at once.
//! A web view plugs in behind the same trait.

use windows::core::HSTRING;
use windows::Win32::Foundation::HWND;
use windows::Win32::UI::WindowsAndMessaging::SetWindowTextW;

use tracing::{debug, warn};

use crate::events::{Command, CommandPublisher};
use crate::model::SourceId;
use crate::window::ContentHost;

pub struct PlaceholderContent {
    /// `None` for the editor, which has no source.
    id: Option<SourceId>,
    publisher: CommandPublisher,
    hwnd: Option<HWND>,
    url: Option<String>,
}

impl PlaceholderContent {
    pub fn new(id: Option<SourceId>, publisher: CommandPublisher) -> Self {
        Self {
            id,
            publisher,
            hwnd: None,
            url: None,
        }
    }

    /// Follow the owning window onto a new native handle.
    pub(crate) fn attach(&mut self, hwnd: Option<HWND>) {
        self.hwnd = hwnd;
        if hwnd.is_some() {
            self.show();
        }
    }

    fn show(&self) {
        let (Some(hwnd), Some(url)) = (self.hwnd, self.url.as_deref()) else {
            return;
        };
        if let Err(e) = unsafe { SetWindowTextW(hwnd, &HSTRING::from(url)) } {
            warn!(url, error = %e, "could not set window caption");
        }
    }

    fn report_ready(&self) {
        if let Some(id) = self.id {
            self.publisher.publish(Command::ContentReady(id));
        }
    }
}

impl ContentHost for PlaceholderContent {
    fn load(&mut self, url: &str) {
        debug!(url, "loading content");
        self.url = Some(url.to_string());
        self.show();
        self.report_ready();
    }

    fn reload(&mut self) {
        if self.url.is_some() {
            self.show();
            self.report_ready();
        }
    }
}
