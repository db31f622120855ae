//! Screen controllers. Each one spawns its backend calls on the runtime and
//! applies their results, in arrival order, on the caller's task.

pub mod edit;
pub mod list;
pub mod notice;

use std::future::Future;

use tokio::sync::mpsc;

use crate::error::ApiError;

pub use edit::{EditArgs, EditEvent, EditScreen, EditState};
pub use list::{ListEvent, ListScreen, ListState, StatusAction, TaskRow, Treatment};
pub use notice::{Notice, NoticeKind, Notices};

/// Fire-and-forget requests whose completions are queued as screen events.
#[derive(Debug)]
struct Requests<E> {
    tx: mpsc::UnboundedSender<E>,
    rx: mpsc::UnboundedReceiver<E>,
    in_flight: usize,
}
impl<E: Send + 'static> Requests<E> {
    fn new() -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self { tx, rx, in_flight: 0 }
    }

    fn spawn<T, F>(&mut self, request: F, into_event: fn(Result<T, ApiError>) -> E)
    where
        T: Send + 'static,
        F: Future<Output = Result<T, ApiError>> + Send + 'static,
    {
        self.in_flight += 1;
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let result = request.await;
            // nobody listens once the screen is gone
            let _ = tx.send(into_event(result));
        });
    }

    fn in_flight(&self) -> usize {
        self.in_flight
    }

    /// Waits for the next completion. Pending forever while nothing is in flight.
    async fn next(&mut self) -> Option<E> {
        let event = self.rx.recv().await?;
        self.in_flight = self.in_flight.saturating_sub(1);
        Some(event)
    }
}
