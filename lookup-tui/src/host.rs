//! Terminal host for the lookup.

use lookup::{LookupHost, OptionEntry};

use crate::wakeup::WakeupSender;

/// Host that asks the event loop to redraw.
///
/// The loop pulls a fresh `LookupView` on every redraw, so the host only
/// needs to wake it up.
pub struct TerminalHost {
    wakeup: WakeupSender,
}

impl TerminalHost {
    pub fn new(wakeup: WakeupSender) -> Self {
        Self { wakeup }
    }
}

impl LookupHost for TerminalHost {
    fn render_options(&self, entries: &[OptionEntry]) {
        log::debug!("TerminalHost rendering {} entries", entries.len());
    }

    fn refresh_list(&self) {
        self.wakeup.send();
    }

    fn focus_search(&self) {
        self.wakeup.send();
    }

    fn render_button(&self, label: &str) {
        log::debug!("TerminalHost button label {:?}", label);
        self.wakeup.send();
    }

    fn close_list(&self) {
        self.wakeup.send();
    }
}
