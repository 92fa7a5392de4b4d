//! Redraw requests from the lookup host.
//!
//! Search answers are applied on tokio workers while the main loop sits in
//! `select!` on terminal input. `TerminalHost` pokes this channel so the loop
//! repaints without waiting for the next key.

use tokio::sync::mpsc;

/// Pending redraws beyond this are dropped; one queued redraw is enough.
const CAPACITY: usize = 16;

/// Handle the host uses to request a redraw.
#[derive(Clone, Debug)]
pub struct WakeupSender {
    tx: mpsc::Sender<()>,
}

impl WakeupSender {
    /// Request a redraw without blocking the caller.
    pub fn send(&self) {
        // Full: a redraw is already queued. Closed: the loop has exited.
        let _ = self.tx.try_send(());
    }
}

/// The event loop's end of the channel.
pub struct WakeupReceiver {
    rx: mpsc::Receiver<()>,
}

impl WakeupReceiver {
    /// Wait for the next redraw request.
    pub async fn recv(&mut self) -> Option<()> {
        self.rx.recv().await
    }

    /// Discard requests queued behind the one just received.
    ///
    /// Returns how many were discarded.
    pub fn drain(&mut self) -> usize {
        let mut dropped = 0;
        while self.rx.try_recv().is_ok() {
            dropped += 1;
        }
        dropped
    }
}

pub fn channel() -> (WakeupSender, WakeupReceiver) {
    let (tx, rx) = mpsc::channel(CAPACITY);
    (WakeupSender { tx }, WakeupReceiver { rx })
}
