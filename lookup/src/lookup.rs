//! The lookup control.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, RwLock};

use crate::config::LookupConfig;
use crate::error::LookupError;
use crate::events::{EventResult, ListenerId, Listeners, LookupEvent, LookupEventKind};
use crate::host::{LookupHost, NullHost};
use crate::input::{Key, KeyCombo};
use crate::options::{OptionEntry, OptionList};
use crate::provider::SearchCompletion;
use crate::record::{ResultRecord, ResultSet};

/// Unique identifier for a Lookup instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LookupId(usize);

impl LookupId {
    fn new() -> Self {
        static COUNTER: AtomicUsize = AtomicUsize::new(0);
        Self(COUNTER.fetch_add(1, Ordering::SeqCst))
    }
}

impl std::fmt::Display for LookupId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "__lookup_{}", self.0)
    }
}

/// Where the lookup is in its open/search cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    /// Option list hidden.
    #[default]
    Closed,
    /// Option list visible, no search outstanding.
    Open,
    /// A search was issued for the current text and has not been answered.
    SearchPending,
    /// A fresh answer was applied and the list is being refreshed.
    SearchedWithResults,
}

/// An option the user committed, with the record behind it.
#[derive(Debug, Clone)]
struct Committed {
    entry: OptionEntry,
    record: Option<ResultRecord>,
}

/// Internal state for a Lookup.
#[derive(Debug, Default)]
struct LookupInner {
    phase: Phase,
    /// Live contents of the search field
    search_text: String,
    /// Sequence number of the most recently issued search
    latest_seq: u64,
    /// Results of the last accepted search
    results: ResultSet,
    /// Placeholder + one entry per result
    options: OptionList,
    /// Last committed option (None until the first commit)
    selected: Option<Committed>,
    /// Index a commit is compared against for `Change`: the entry marked
    /// selected by the last rebuild, or the last commit since then
    baseline: usize,
    /// Highlighted entry while open (for keyboard navigation)
    cursor: usize,
}

/// State shared between a lookup and its outstanding search completions.
pub(crate) struct Shared {
    id: LookupId,
    name: String,
    config: LookupConfig,
    inner: RwLock<LookupInner>,
    /// Held from the freshness check through `refresh_list` so the host sees
    /// accepted lists in acceptance order
    render: Mutex<()>,
    host: Arc<dyn LookupHost>,
    listeners: Listeners,
    dirty: AtomicBool,
}

impl Shared {
    /// Apply a provider answer if it is still fresh.
    ///
    /// Fresh means it answers the most recently issued search and echoes the
    /// text currently in the search field.
    pub(crate) fn apply_results(
        shared: &Arc<Shared>,
        seq: u64,
        echoed_query: &str,
        results: Vec<ResultRecord>,
    ) -> bool {
        let _render = match shared.render.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };

        let entries = {
            let Ok(mut guard) = shared.inner.write() else {
                log::warn!("Lookup {} state lock poisoned, dropping results", shared.name);
                return false;
            };

            if seq != guard.latest_seq || echoed_query != guard.search_text {
                log::debug!(
                    "Lookup {} discarding stale results seq={} query={:?} (latest seq={} text={:?})",
                    shared.name,
                    seq,
                    echoed_query,
                    guard.latest_seq,
                    guard.search_text
                );
                return false;
            }

            let results = ResultSet::new(results);
            let options = OptionList::rebuild(
                &results,
                &shared.config.placeholder_label,
                shared.config.auto_select_first_result,
            );
            log::debug!(
                "Lookup {} applying {} results for seq={} query={:?}",
                shared.name,
                results.len(),
                seq,
                echoed_query
            );

            guard.cursor = options.initially_selected();
            guard.baseline = options.initially_selected();
            guard.results = results;
            guard.options = options;
            if guard.phase != Phase::Closed {
                guard.phase = Phase::SearchedWithResults;
            }
            guard.options.entries().to_vec()
        };

        shared.host.render_options(&entries);
        shared.host.refresh_list();

        if let Ok(mut guard) = shared.inner.write()
            && guard.phase == Phase::SearchedWithResults
        {
            guard.phase = Phase::Open;
        }
        shared.dirty.store(true, Ordering::SeqCst);
        true
    }
}

/// Snapshot of everything a host needs to draw a lookup.
///
/// The search field comes first, then the options, matching the dropdown's
/// layout.
#[derive(Debug, Clone, PartialEq)]
pub struct LookupView {
    pub open: bool,
    pub phase: Phase,
    /// Label on the trigger button: committed label or the placeholder.
    pub button_label: String,
    pub search_text: String,
    pub search_placeholder: String,
    pub options: Vec<OptionEntry>,
    pub cursor: usize,
}

/// A select widget whose options come from an external search.
///
/// Every edit of the search field issues a search through the configured
/// [`SearchProvider`](crate::SearchProvider). Searches are never cancelled;
/// each one is tagged with an increasing sequence number, and only an answer
/// carrying the latest number (and echoing the current text) replaces the
/// option list. Older answers are dropped whenever they arrive.
///
/// Committing an option maps the displayed index back to the search result
/// (displayed index `k` is result `k - 1`; the placeholder has no record) and
/// notifies listeners.
///
/// Cloning yields another handle to the same lookup.
#[derive(Clone)]
pub struct Lookup {
    shared: Arc<Shared>,
}

impl Lookup {
    /// Create a lookup that draws nowhere.
    pub fn new(config: LookupConfig) -> Self {
        Self::with_shared_host(config, Arc::new(NullHost))
    }

    /// Create a lookup drawing through `host`.
    pub fn with_host(config: LookupConfig, host: impl LookupHost + 'static) -> Self {
        Self::with_shared_host(config, Arc::new(host))
    }

    /// Create a lookup drawing through a shared host.
    pub fn with_shared_host(config: LookupConfig, host: Arc<dyn LookupHost>) -> Self {
        let id = LookupId::new();
        let name = config.id.clone().unwrap_or_else(|| id.to_string());
        let options = OptionList::placeholder_only(&config.placeholder_label);

        if config.search.is_none() {
            log::debug!("Lookup {} created without a search provider", name);
        }

        let entries = options.entries().to_vec();
        let shared = Arc::new(Shared {
            id,
            name,
            config,
            inner: RwLock::new(LookupInner {
                options,
                ..Default::default()
            }),
            render: Mutex::new(()),
            host,
            listeners: Listeners::default(),
            dirty: AtomicBool::new(true),
        });

        // Search field sits above this initial placeholder-only list
        shared.host.render_options(&entries);

        Self { shared }
    }

    /// Get the unique ID for this lookup.
    pub fn id(&self) -> LookupId {
        self.shared.id
    }

    /// The configured id, or the generated one.
    pub fn name(&self) -> &str {
        &self.shared.name
    }

    pub fn config(&self) -> &LookupConfig {
        &self.shared.config
    }

    // -------------------------------------------------------------------------
    // Open/close state
    // -------------------------------------------------------------------------

    /// Current phase.
    pub fn phase(&self) -> Phase {
        self.shared
            .inner
            .read()
            .map(|guard| guard.phase)
            .unwrap_or_default()
    }

    /// Check if the option list is visible.
    pub fn is_open(&self) -> bool {
        self.phase() != Phase::Closed
    }

    /// Show the option list and focus the search field.
    pub fn open(&self) {
        let opened = match self.shared.inner.write() {
            Ok(mut guard) if guard.phase == Phase::Closed => {
                guard.phase = Phase::Open;
                let last = guard.options.len().saturating_sub(1);
                guard.cursor = match &guard.selected {
                    Some(committed) => committed.entry.index.min(last),
                    None => guard.options.initially_selected(),
                };
                true
            }
            _ => false,
        };

        if opened {
            log::debug!("Lookup {} opened", self.shared.name);
            self.mark_dirty();
            self.shared.host.focus_search();
            self.shared.listeners.emit(&LookupEvent::Open);
        }
    }

    /// Hide the option list.
    pub fn close(&self) {
        let closed = match self.shared.inner.write() {
            Ok(mut guard) if guard.phase != Phase::Closed => {
                guard.phase = Phase::Closed;
                true
            }
            _ => false,
        };

        if closed {
            log::debug!("Lookup {} closed", self.shared.name);
            self.mark_dirty();
            self.shared.host.close_list();
            self.shared.listeners.emit(&LookupEvent::Close);
        }
    }

    /// Toggle the option list open/closed.
    pub fn toggle(&self) {
        if self.is_open() {
            self.close();
        } else {
            self.open();
        }
    }

    // -------------------------------------------------------------------------
    // Search
    // -------------------------------------------------------------------------

    /// Live contents of the search field.
    pub fn search_text(&self) -> String {
        self.shared
            .inner
            .read()
            .map(|guard| guard.search_text.clone())
            .unwrap_or_default()
    }

    /// Sequence number of the most recently issued search.
    pub fn latest_seq(&self) -> u64 {
        self.shared
            .inner
            .read()
            .map(|guard| guard.latest_seq)
            .unwrap_or(0)
    }

    /// The search field changed to `text`: issue a search for it.
    ///
    /// Without a configured provider this only updates the field.
    pub fn on_search_input(&self, text: impl Into<String>) {
        let text = text.into();
        let provider = self.shared.config.search.clone();

        let seq = {
            let Ok(mut guard) = self.shared.inner.write() else {
                return;
            };
            guard.search_text = text.clone();
            guard.latest_seq += 1;
            if provider.is_some() && guard.phase != Phase::Closed {
                guard.phase = Phase::SearchPending;
            }
            guard.latest_seq
        };
        self.mark_dirty();

        match provider {
            Some(provider) => {
                log::debug!(
                    "Lookup {} issuing search seq={} query={:?}",
                    self.shared.name,
                    seq,
                    text
                );
                provider.search(&text, SearchCompletion::new(&self.shared, seq, &text));
            }
            None => {
                log::debug!(
                    "Lookup {} has no search provider, ignoring query {:?}",
                    self.shared.name,
                    text
                );
            }
        }
    }

    /// Results of the last accepted search.
    pub fn results(&self) -> ResultSet {
        self.shared
            .inner
            .read()
            .map(|guard| guard.results.clone())
            .unwrap_or_default()
    }

    /// The displayed option list.
    pub fn options(&self) -> OptionList {
        self.shared
            .inner
            .read()
            .map(|guard| guard.options.clone())
            .unwrap_or_default()
    }

    /// Result at `index` of the current result set.
    ///
    /// `index` is a result index, not a displayed index: result 0 is shown at
    /// displayed index 1.
    pub fn get_data_at(&self, index: usize) -> Option<ResultRecord> {
        self.shared
            .inner
            .read()
            .ok()
            .and_then(|guard| guard.results.get(index).cloned())
    }

    // -------------------------------------------------------------------------
    // Selection
    // -------------------------------------------------------------------------

    /// Displayed index of the last committed option.
    pub fn selected_index(&self) -> Option<usize> {
        self.shared
            .inner
            .read()
            .ok()
            .and_then(|guard| guard.selected.as_ref().map(|c| c.entry.index))
    }

    /// The last committed option.
    pub fn selected_entry(&self) -> Option<OptionEntry> {
        self.shared
            .inner
            .read()
            .ok()
            .and_then(|guard| guard.selected.as_ref().map(|c| c.entry.clone()))
    }

    /// The record behind the last committed option.
    pub fn selected_record(&self) -> Option<ResultRecord> {
        self.shared
            .inner
            .read()
            .ok()
            .and_then(|guard| guard.selected.as_ref().and_then(|c| c.record.clone()))
    }

    /// Label for the trigger button.
    pub fn button_label(&self) -> String {
        self.shared
            .inner
            .read()
            .ok()
            .and_then(|guard| guard.selected.as_ref().map(|c| c.entry.label.clone()))
            .unwrap_or_else(|| self.shared.config.placeholder_label.clone())
    }

    /// Commit the displayed entry at `index`.
    ///
    /// Emits `Select` on every commit, `Clear` when the placeholder is
    /// committed, and `Change` when `index` differs from the currently
    /// selected index. Each rebuild of the list resets that index to the entry
    /// it marks selected (the first hit, or the placeholder). Closes the list
    /// afterwards.
    pub fn commit(&self, index: usize) -> Result<(), LookupError> {
        let (entry, record, old_index) = {
            let Ok(mut guard) = self.shared.inner.write() else {
                log::warn!("Lookup {} state lock poisoned, commit skipped", self.shared.name);
                return Err(LookupError::Poisoned);
            };

            let entry = guard
                .options
                .get(index)
                .cloned()
                .ok_or(LookupError::NoSuchOption {
                    index,
                    len: guard.options.len(),
                })?;

            // Displayed index k maps to result k - 1; the placeholder has none
            let record = index
                .checked_sub(1)
                .and_then(|i| guard.results.get(i).cloned());
            let old_index = guard.baseline;

            guard.selected = Some(Committed {
                entry: entry.clone(),
                record: record.clone(),
            });
            guard.cursor = index;
            guard.baseline = index;
            (entry, record, old_index)
        };

        log::debug!(
            "Lookup {} committed index={} value={:?} (was {})",
            self.shared.name,
            index,
            entry.value,
            old_index
        );
        self.mark_dirty();
        self.shared.host.render_button(&entry.label);

        let is_placeholder = entry.is_placeholder();
        self.shared.listeners.emit(&LookupEvent::Select {
            entry: entry.clone(),
            record,
        });
        if is_placeholder {
            self.shared.listeners.emit(&LookupEvent::Clear {
                entry: entry.clone(),
            });
        }
        if index != old_index {
            self.shared.listeners.emit(&LookupEvent::Change { entry });
        }

        self.close();
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Listeners
    // -------------------------------------------------------------------------

    /// Receive every notification.
    pub fn subscribe(&self, handler: impl Fn(&LookupEvent) + Send + Sync + 'static) -> ListenerId {
        self.shared.listeners.add(None, Arc::new(handler))
    }

    /// Receive notifications of one kind.
    pub fn subscribe_to(
        &self,
        kind: LookupEventKind,
        handler: impl Fn(&LookupEvent) + Send + Sync + 'static,
    ) -> ListenerId {
        self.shared.listeners.add(Some(kind), Arc::new(handler))
    }

    /// Remove a listener. Returns false if it was not registered.
    pub fn unsubscribe(&self, id: ListenerId) -> bool {
        self.shared.listeners.remove(id)
    }

    // -------------------------------------------------------------------------
    // Cursor navigation (when open)
    // -------------------------------------------------------------------------

    /// Get the highlighted entry.
    pub fn cursor(&self) -> usize {
        self.shared
            .inner
            .read()
            .map(|guard| guard.cursor)
            .unwrap_or(0)
    }

    /// Set the highlighted entry, clamped to the list.
    pub fn set_cursor(&self, index: usize) {
        if let Ok(mut guard) = self.shared.inner.write() {
            let max = guard.options.len().saturating_sub(1);
            guard.cursor = index.min(max);
        }
        self.mark_dirty();
    }

    /// Move cursor up.
    pub fn cursor_up(&self) {
        let current = self.cursor();
        if current > 0 {
            self.set_cursor(current - 1);
        }
    }

    /// Move cursor down.
    pub fn cursor_down(&self) {
        self.set_cursor(self.cursor() + 1);
    }

    // -------------------------------------------------------------------------
    // Keyboard
    // -------------------------------------------------------------------------

    /// Handle a key press while the lookup has focus.
    pub fn handle_key(&self, key: &KeyCombo) -> EventResult {
        log::trace!("Lookup {} key {:?}", self.shared.name, key);

        // Ignore keys with ctrl/alt modifiers
        if key.modifiers.ctrl || key.modifiers.alt {
            return EventResult::Ignored;
        }

        if !self.is_open() {
            // Closed state - open on Enter, Space, or Down
            return match key.key {
                Key::Enter | Key::Space | Key::Down => {
                    self.open();
                    EventResult::Consumed
                }
                _ => EventResult::Ignored,
            };
        }

        match key.key {
            Key::Up => self.cursor_up(),
            Key::Down => self.cursor_down(),
            Key::Home => self.set_cursor(0),
            Key::End => self.set_cursor(usize::MAX),
            Key::Enter => {
                let cursor = self.cursor();
                if let Err(err) = self.commit(cursor) {
                    log::debug!("Lookup {} commit failed: {}", self.shared.name, err);
                }
            }
            Key::Escape => self.close(),
            Key::Backspace => {
                let mut text = self.search_text();
                if text.pop().is_none() {
                    return EventResult::Consumed;
                }
                self.on_search_input(text);
            }
            _ => match key.typed_char() {
                Some(c) => {
                    let mut text = self.search_text();
                    text.push(c);
                    self.on_search_input(text);
                }
                None => return EventResult::Ignored,
            },
        }
        EventResult::Consumed
    }

    // -------------------------------------------------------------------------
    // Rendering
    // -------------------------------------------------------------------------

    /// Snapshot for drawing.
    pub fn view(&self) -> LookupView {
        let button_label = self.button_label();
        let Ok(guard) = self.shared.inner.read() else {
            return LookupView {
                open: false,
                phase: Phase::Closed,
                button_label,
                search_text: String::new(),
                search_placeholder: self.shared.config.search_placeholder.clone(),
                options: Vec::new(),
                cursor: 0,
            };
        };

        LookupView {
            open: guard.phase != Phase::Closed,
            phase: guard.phase,
            button_label,
            search_text: guard.search_text.clone(),
            search_placeholder: self.shared.config.search_placeholder.clone(),
            options: guard.options.entries().to_vec(),
            cursor: guard.cursor,
        }
    }

    // -------------------------------------------------------------------------
    // Dirty tracking
    // -------------------------------------------------------------------------

    fn mark_dirty(&self) {
        self.shared.dirty.store(true, Ordering::SeqCst);
    }

    /// Check if the lookup changed since the last `clear_dirty`.
    pub fn is_dirty(&self) -> bool {
        self.shared.dirty.load(Ordering::SeqCst)
    }

    /// Clear the dirty flag.
    pub fn clear_dirty(&self) {
        self.shared.dirty.store(false, Ordering::SeqCst);
    }
}

impl std::fmt::Debug for Lookup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Lookup")
            .field("id", &self.shared.id)
            .field("name", &self.shared.name)
            .field("phase", &self.phase())
            .field("search_text", &self.search_text())
            .finish()
    }
}
