mod catalog;
mod error;
mod events;
mod host;
mod paths;
mod settings;
mod terminal;
mod wakeup;

use std::fs::{self, File};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crossterm::event::{Event as CrosstermEvent, EventStream};
use futures::StreamExt;
use rand::Rng;
use simplelog::{Config, LevelFilter, WriteLogger};

use lookup::{AsyncSearch, CatalogSearch, EventResult, Lookup, LookupConfig, LookupEvent};

use crate::error::AppError;
use crate::host::TerminalHost;
use crate::settings::Settings;
use crate::terminal::Terminal;

fn init_logging() {
    let path = paths::log_file().unwrap_or_else(|| "lookup-tui.log".into());
    if let Some(parent) = path.parent() {
        let _ = fs::create_dir_all(parent);
    }
    match File::create(&path) {
        Ok(log_file) => {
            if let Err(e) = WriteLogger::init(LevelFilter::Debug, Config::default(), log_file) {
                eprintln!("Failed to initialize logger: {}", e);
            }
        }
        Err(e) => eprintln!("Failed to create log file {}: {}", path.display(), e),
    }
}

/// Catalogue search answering after a random delay.
fn delayed_catalog(settings: &Settings) -> Result<AsyncSearch, AppError> {
    let records = match &settings.catalog {
        Some(path) => catalog::load(path)?,
        None => catalog::builtin(),
    };
    let catalog = CatalogSearch::new(records).with_limit(settings.limit);
    let latency = settings.latency_ms;
    let jitter = settings.jitter_ms;

    let provider = AsyncSearch::new(move |query: String| {
        let catalog = catalog.clone();
        let delay = latency + rand::rng().random_range(0..=jitter);
        async move {
            tokio::time::sleep(Duration::from_millis(delay)).await;
            let found = catalog.find(&query);
            log::debug!("Answering {:?} after {}ms with {} cities", query, delay, found.len());
            found
        }
    })?;
    Ok(provider)
}

fn describe(event: &LookupEvent) -> Option<String> {
    match event {
        LookupEvent::Select {
            record: Some(record),
            ..
        } => Some(format!("Selected #{}: {}", record.id, record.display)),
        LookupEvent::Clear { .. } => Some("Selection cleared".to_string()),
        _ => None,
    }
}

async fn run() -> Result<(), AppError> {
    let settings = Settings::load()?;
    let provider = delayed_catalog(&settings)?;

    let (wakeup_tx, mut wakeup_rx) = wakeup::channel();
    let lookup = Lookup::with_host(
        LookupConfig::new()
            .id("city")
            .search(provider)
            .auto_select_first_result(settings.auto_select_first_result),
        TerminalHost::new(wakeup_tx.clone()),
    );

    let status = Arc::new(Mutex::new(String::from("Nothing selected")));
    let sink = Arc::clone(&status);
    lookup.subscribe(move |event| {
        if let Some(text) = describe(event)
            && let Ok(mut guard) = sink.lock()
        {
            *guard = text;
            wakeup_tx.send();
        }
    });

    let mut terminal = Terminal::new()?;
    let mut input = EventStream::new();
    let mut redraw = true;

    loop {
        if redraw || lookup.is_dirty() {
            lookup.clear_dirty();
            redraw = false;
            let line = status.lock().map(|s| s.clone()).unwrap_or_default();
            terminal.draw(&lookup.view(), &line)?;
        }

        tokio::select! {
            event = input.next() => match event {
                Some(Ok(CrosstermEvent::Key(key_event))) => {
                    if events::is_quit(&key_event) {
                        break;
                    }
                    if let Some(combo) = events::convert_key_event(key_event)
                        && lookup.handle_key(&combo) == EventResult::Ignored
                        && combo.typed_char() == Some('q')
                    {
                        break;
                    }
                }
                Some(Ok(CrosstermEvent::Resize(..))) => redraw = true,
                Some(Ok(_)) => {}
                Some(Err(e)) => return Err(e.into()),
                None => break,
            },
            _ = wakeup_rx.recv() => {
                let collapsed = wakeup_rx.drain();
                log::trace!("Redraw requested ({} more collapsed)", collapsed);
                redraw = true;
            }
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() {
    init_logging();

    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
