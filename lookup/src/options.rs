//! The displayed option list.
//!
//! The list always starts with a placeholder entry meaning "nothing selected",
//! followed by one entry per search result. Displayed index `i + 1` therefore
//! corresponds to result index `i`.

use crate::record::ResultSet;

/// Label of the placeholder entry.
pub const PLACEHOLDER_LABEL: &str = "--------";

/// A single rendered option.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionEntry {
    /// Position in the displayed list (0 is the placeholder).
    pub index: usize,
    /// Option value: the record id, or empty for the placeholder.
    pub value: String,
    /// Text shown to the user.
    pub label: String,
    /// Whether the rebuild marked this entry as initially selected.
    pub selected: bool,
}

impl OptionEntry {
    /// Whether this is the leading "no selection" entry.
    pub fn is_placeholder(&self) -> bool {
        self.index == 0
    }
}

/// Placeholder entry followed by one entry per result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionList {
    entries: Vec<OptionEntry>,
}

impl Default for OptionList {
    fn default() -> Self {
        Self::placeholder_only(PLACEHOLDER_LABEL)
    }
}

impl OptionList {
    /// A list holding only the placeholder, used before any search completes.
    pub fn placeholder_only(placeholder_label: &str) -> Self {
        Self {
            entries: vec![placeholder(placeholder_label, true)],
        }
    }

    /// Rebuild the list from a result set.
    ///
    /// With `auto_select_first_result` the first result entry is marked
    /// selected when there is one; otherwise the placeholder carries the mark.
    pub fn rebuild(
        results: &ResultSet,
        placeholder_label: &str,
        auto_select_first_result: bool,
    ) -> Self {
        let mark_first = auto_select_first_result && !results.is_empty();

        let mut entries = Vec::with_capacity(results.len() + 1);
        entries.push(placeholder(placeholder_label, !mark_first));
        entries.extend(results.iter().enumerate().map(|(i, record)| OptionEntry {
            index: i + 1,
            value: record.id.as_str().to_string(),
            label: record.display.clone(),
            selected: mark_first && i == 0,
        }));

        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Never true: the placeholder is always present.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&OptionEntry> {
        self.entries.get(index)
    }

    pub fn entries(&self) -> &[OptionEntry] {
        &self.entries
    }

    /// Labels in display order.
    pub fn labels(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.label.as_str()).collect()
    }

    /// Index of the entry the rebuild marked as selected.
    pub fn initially_selected(&self) -> usize {
        self.entries
            .iter()
            .position(|e| e.selected)
            .unwrap_or(0)
    }
}

fn placeholder(label: &str, selected: bool) -> OptionEntry {
    OptionEntry {
        index: 0,
        value: String::new(),
        label: label.to_string(),
        selected,
    }
}
