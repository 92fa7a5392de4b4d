//! Rendering substrate the lookup draws through.
//!
//! The lookup never draws. It hands its rebuilt option list to a
//! [`LookupHost`] and asks it to refresh, focus the search field, redraw the
//! trigger button or close the dropdown. Hook calls happen outside the
//! lookup's internal lock, so a host may read the lookup from inside them.
//! Accepted result lists are rendered one at a time, in the order they were
//! accepted; `render_options` and `refresh_list` must not feed the lookup new
//! search text.

use crate::options::OptionEntry;

/// Capability set of the toolkit that renders a lookup.
pub trait LookupHost: Send + Sync {
    /// Replace the rendered option entries.
    fn render_options(&self, entries: &[OptionEntry]);

    /// Redraw the option list from the entries last passed to
    /// `render_options`.
    fn refresh_list(&self);

    /// Give keyboard focus to the search field.
    fn focus_search(&self) {}

    /// Redraw the trigger button with the committed label.
    fn render_button(&self, _label: &str) {}

    /// Hide the option list.
    fn close_list(&self) {}
}

/// Host that renders nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullHost;

impl LookupHost for NullHost {
    fn render_options(&self, _entries: &[OptionEntry]) {}

    fn refresh_list(&self) {}
}
