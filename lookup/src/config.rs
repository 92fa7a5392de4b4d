//! Lookup configuration.

use std::fmt;
use std::sync::Arc;

use crate::options::PLACEHOLDER_LABEL;
use crate::provider::SearchProvider;

/// Configuration for a [`Lookup`](crate::Lookup).
///
/// ```ignore
/// let config = LookupConfig::new()
///     .id("city")
///     .search(CatalogSearch::new(cities))
///     .auto_select_first_result(false);
/// ```
#[derive(Clone)]
pub struct LookupConfig {
    /// Identifier used in logs. Generated when unset.
    pub id: Option<String>,

    /// Search provider invoked on every edit of the search field.
    /// When unset, typing never changes the option list.
    pub search: Option<Arc<dyn SearchProvider>>,

    /// Mark the first result (instead of the placeholder) as selected when a
    /// result set is rendered.
    pub auto_select_first_result: bool,

    /// Label of the leading "no selection" entry.
    pub placeholder_label: String,

    /// Hint text shown in the empty search field.
    pub search_placeholder: String,
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            id: None,
            search: None,
            auto_select_first_result: true,
            placeholder_label: PLACEHOLDER_LABEL.to_string(),
            search_placeholder: "Search".to_string(),
        }
    }
}

impl LookupConfig {
    /// Create a config with default settings and no search provider.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the id used in logs.
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Set the search provider.
    pub fn search(mut self, provider: impl SearchProvider + 'static) -> Self {
        self.search = Some(Arc::new(provider));
        self
    }

    /// Set a shared search provider.
    pub fn search_shared(mut self, provider: Arc<dyn SearchProvider>) -> Self {
        self.search = Some(provider);
        self
    }

    /// Set the first-result auto-selection policy.
    pub fn auto_select_first_result(mut self, enabled: bool) -> Self {
        self.auto_select_first_result = enabled;
        self
    }

    /// Set the placeholder entry label.
    pub fn placeholder_label(mut self, label: impl Into<String>) -> Self {
        self.placeholder_label = label.into();
        self
    }

    /// Set the search field hint text.
    pub fn search_placeholder(mut self, hint: impl Into<String>) -> Self {
        self.search_placeholder = hint.into();
        self
    }
}

impl fmt::Debug for LookupConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LookupConfig")
            .field("id", &self.id)
            .field("search", &self.search.as_ref().map(|_| "<provider>"))
            .field("auto_select_first_result", &self.auto_select_first_result)
            .field("placeholder_label", &self.placeholder_label)
            .field("search_placeholder", &self.search_placeholder)
            .finish()
    }
}
