//! Lookup - a select widget with an incremental search box.
//!
//! The option list of a [`Lookup`] is not fixed. Every edit of the search field
//! is handed to a caller-supplied [`SearchProvider`], and whatever the provider
//! answers for the *latest* query replaces the options below a `--------`
//! placeholder entry.
//!
//! The widget is headless: drawing is delegated to a [`LookupHost`], which
//! receives the rebuilt option list and refresh requests.
//!
//! # Example
//!
//! ```ignore
//! use lookup::{CatalogSearch, Lookup, LookupConfig, LookupEvent, ResultRecord};
//!
//! let catalog = CatalogSearch::new(vec![
//!     ResultRecord::new(1, "Alpha"),
//!     ResultRecord::new(2, "Abacus"),
//! ]);
//! let lookup = Lookup::new(LookupConfig::new().search(catalog));
//!
//! lookup.subscribe(|event| {
//!     if let LookupEvent::Select { record: Some(record), .. } = event {
//!         println!("picked {}", record.display);
//!     }
//! });
//!
//! lookup.open();
//! lookup.on_search_input("ab");
//! lookup.commit(1)?;
//! ```

pub mod config;
pub mod error;
pub mod events;
pub mod host;
pub mod input;
pub mod options;
pub mod provider;
pub mod record;

mod lookup;

pub use config::LookupConfig;
pub use error::LookupError;
pub use events::{EventResult, ListenerId, LookupEvent, LookupEventKind};
pub use host::{LookupHost, NullHost};
pub use input::{Key, KeyCombo, Modifiers};
pub use lookup::{Lookup, LookupId, LookupView, Phase};
pub use options::{OptionEntry, OptionList, PLACEHOLDER_LABEL};
pub use provider::{AsyncSearch, CatalogSearch, SearchCompletion, SearchProvider};
pub use record::{RecordId, ResultRecord, ResultSet};
