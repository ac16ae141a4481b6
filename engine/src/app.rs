//! Application state machine.
//!
//! [`App`] owns the per-mount display state. A mount issues exactly one
//! fetch; the spawned task reports back over a bounded channel, and the
//! render loop drains that channel once per frame. Each outcome carries the
//! mount generation it belongs to, so a response that arrives after a
//! remount is discarded instead of being applied to the wrong mount.

use roster_client::{FetchError, ItemsClient};
use roster_types::{Item, UiOptions, ViewPhase};
use tokio::sync::mpsc;

/// One fetch outcome per frame is typical; a small buffer absorbs a stale
/// outcome racing a remount.
const OUTCOME_CHANNEL_CAPACITY: usize = 4;

#[derive(Debug)]
struct FetchOutcome {
    generation: u64,
    result: Result<Vec<Item>, FetchError>,
}

/// Per-instance application state.
///
/// State machine: `Loading` (initial) -> `Loaded` | `Failed` (terminal).
/// Nothing leaves a terminal phase short of a fresh [`App::mount`].
pub struct App {
    client: ItemsClient,
    phase: ViewPhase,
    /// Bumped on every mount; outcomes from older generations are stale.
    generation: u64,
    outcome_tx: mpsc::Sender<FetchOutcome>,
    outcome_rx: mpsc::Receiver<FetchOutcome>,
    ui_options: UiOptions,
    spinner_tick: usize,
    scroll: usize,
    should_quit: bool,
}

impl App {
    /// Create an app in the `Loading` phase. No fetch is issued until
    /// [`App::mount`] is called.
    #[must_use]
    pub fn new(client: ItemsClient, ui_options: UiOptions) -> Self {
        let (outcome_tx, outcome_rx) = mpsc::channel(OUTCOME_CHANNEL_CAPACITY);
        Self {
            client,
            phase: ViewPhase::Loading,
            generation: 0,
            outcome_tx,
            outcome_rx,
            ui_options,
            spinner_tick: 0,
            scroll: 0,
            should_quit: false,
        }
    }

    /// Begin a mount: reset the view state and issue the single fetch.
    ///
    /// Must be called from within a tokio runtime. The fetch task is
    /// fire-and-forget; its result arrives via
    /// [`App::process_fetch_outcomes`].
    pub fn mount(&mut self) {
        self.generation += 1;
        self.phase = ViewPhase::Loading;
        self.scroll = 0;

        let generation = self.generation;
        let client = self.client.clone();
        let tx = self.outcome_tx.clone();
        tracing::debug!(generation, endpoint = %client.endpoint(), "mounting item list");
        tokio::spawn(async move {
            let result = client.fetch_items().await;
            // A closed channel means the app is gone; nothing to deliver.
            let _ = tx.send(FetchOutcome { generation, result }).await;
        });
    }

    /// Drain pending fetch outcomes and apply the one for the current
    /// generation, if any. Called once per frame by the event loop.
    pub fn process_fetch_outcomes(&mut self) {
        while let Ok(outcome) = self.outcome_rx.try_recv() {
            if outcome.generation != self.generation {
                tracing::debug!(
                    stale = outcome.generation,
                    current = self.generation,
                    "discarding stale fetch outcome"
                );
                continue;
            }
            if self.phase.is_terminal() {
                // A mount resolves at most once.
                continue;
            }
            self.phase = match outcome.result {
                Ok(items) => {
                    tracing::info!(count = items.len(), "items loaded");
                    ViewPhase::Loaded(items)
                }
                Err(err) => {
                    tracing::warn!(error = %err, "items fetch failed");
                    ViewPhase::Failed(err.to_string())
                }
            };
        }
    }

    /// Advance animation state by one frame.
    pub fn tick(&mut self) {
        self.spinner_tick = self.spinner_tick.wrapping_add(1);
    }

    #[must_use]
    pub fn phase(&self) -> &ViewPhase {
        &self.phase
    }

    #[must_use]
    pub const fn ui_options(&self) -> UiOptions {
        self.ui_options
    }

    #[must_use]
    pub const fn spinner_tick(&self) -> usize {
        self.spinner_tick
    }

    /// Row offset into the loaded table. The view clamps it to the row
    /// count, so the engine only tracks intent.
    #[must_use]
    pub const fn scroll(&self) -> usize {
        self.scroll
    }

    pub fn scroll_up(&mut self, rows: usize) {
        self.scroll = self.scroll.saturating_sub(rows);
    }

    pub fn scroll_down(&mut self, rows: usize) {
        let max = match &self.phase {
            ViewPhase::Loaded(items) => items.len().saturating_sub(1),
            _ => 0,
        };
        self.scroll = self.scroll.saturating_add(rows).min(max);
    }

    pub fn scroll_home(&mut self) {
        self.scroll = 0;
    }

    pub fn request_quit(&mut self) {
        self.should_quit = true;
    }

    #[must_use]
    pub const fn should_quit(&self) -> bool {
        self.should_quit
    }
}
