//! Lookup notifications and event results.
//!
//! Listeners registered with [`Lookup::subscribe`](crate::Lookup::subscribe)
//! receive a [`LookupEvent`] whenever the list opens or closes and whenever an
//! option is committed.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};

use crate::options::OptionEntry;
use crate::record::ResultRecord;

// =============================================================================
// Lookup Events
// =============================================================================

/// Identifies which kind of notification a [`LookupEvent`] is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LookupEventKind {
    /// Option list became visible
    Open,
    /// Option list was dismissed or closed after a commit
    Close,
    /// An option was committed (fires on every commit)
    Select,
    /// The committed index differs from the previous one
    Change,
    /// The placeholder was committed
    Clear,
}

/// A notification emitted by the lookup.
#[derive(Debug, Clone, PartialEq)]
pub enum LookupEvent {
    /// Option list opened and the search field took focus.
    Open,
    /// Option list closed.
    Close,
    /// An option was committed.
    ///
    /// `record` is the search result behind the entry, or `None` when the
    /// placeholder was committed.
    Select {
        entry: OptionEntry,
        record: Option<ResultRecord>,
    },
    /// The committed index differs from the previously selected index.
    Change { entry: OptionEntry },
    /// The placeholder was committed: nothing is selected anymore.
    Clear { entry: OptionEntry },
}

impl LookupEvent {
    /// The kind of this event.
    pub fn kind(&self) -> LookupEventKind {
        match self {
            LookupEvent::Open => LookupEventKind::Open,
            LookupEvent::Close => LookupEventKind::Close,
            LookupEvent::Select { .. } => LookupEventKind::Select,
            LookupEvent::Change { .. } => LookupEventKind::Change,
            LookupEvent::Clear { .. } => LookupEventKind::Clear,
        }
    }
}

// =============================================================================
// Event Result
// =============================================================================

/// Result of handling an input event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventResult {
    /// Event was ignored, try other handlers.
    Ignored,
    /// Event was consumed, stop propagation.
    Consumed,
}

impl EventResult {
    /// Check if the event was handled.
    pub fn is_handled(&self) -> bool {
        !matches!(self, EventResult::Ignored)
    }
}

// =============================================================================
// Listeners
// =============================================================================

/// Handle returned by `subscribe`, used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(usize);

impl ListenerId {
    fn new() -> Self {
        static COUNTER: AtomicUsize = AtomicUsize::new(0);
        Self(COUNTER.fetch_add(1, Ordering::SeqCst))
    }
}

pub(crate) type ListenerFn = Arc<dyn Fn(&LookupEvent) + Send + Sync>;

struct Listener {
    id: ListenerId,
    kind: Option<LookupEventKind>,
    handler: ListenerFn,
}

/// Registered listeners, in registration order.
#[derive(Default)]
pub(crate) struct Listeners {
    entries: RwLock<Vec<Listener>>,
}

impl Listeners {
    pub(crate) fn add(&self, kind: Option<LookupEventKind>, handler: ListenerFn) -> ListenerId {
        let id = ListenerId::new();
        if let Ok(mut guard) = self.entries.write() {
            guard.push(Listener { id, kind, handler });
        }
        id
    }

    pub(crate) fn remove(&self, id: ListenerId) -> bool {
        self.entries
            .write()
            .map(|mut guard| {
                let before = guard.len();
                guard.retain(|l| l.id != id);
                guard.len() != before
            })
            .unwrap_or(false)
    }

    /// Deliver an event. Handlers run after the registry lock is released,
    /// so a handler may subscribe or unsubscribe.
    pub(crate) fn emit(&self, event: &LookupEvent) {
        let kind = event.kind();
        let handlers: Vec<ListenerFn> = self
            .entries
            .read()
            .map(|guard| {
                guard
                    .iter()
                    .filter(|l| l.kind.is_none_or(|k| k == kind))
                    .map(|l| Arc::clone(&l.handler))
                    .collect()
            })
            .unwrap_or_default();

        for handler in handlers {
            handler(event);
        }
    }
}
