//! Input handling for the Roster TUI.

use anyhow::{Result, anyhow};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::{
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
    thread,
    time::Duration,
};
use tokio::sync::mpsc;

use roster_engine::App;

const INPUT_POLL_TIMEOUT: Duration = Duration::from_millis(25); // shutdown responsiveness
const INPUT_CHANNEL_CAPACITY: usize = 1024; // bounded: no OOM
const MAX_EVENTS_PER_FRAME: usize = 64; // never starve rendering
const PAGE_ROWS: usize = 10;

enum InputMsg {
    Event(Event),
    Error(String),
}

/// Background reader for terminal events.
///
/// A dedicated thread polls crossterm and forwards events into a bounded
/// channel; [`handle_events`] drains that channel non-blockingly once per
/// frame so rendering never waits on input.
pub struct InputPump {
    rx: mpsc::Receiver<InputMsg>,
    stop: Arc<AtomicBool>,
    reader: Option<thread::JoinHandle<()>>,
}

impl InputPump {
    #[must_use]
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel(INPUT_CHANNEL_CAPACITY);
        let stop = Arc::new(AtomicBool::new(false));
        let stop_flag = Arc::clone(&stop);

        let reader = thread::spawn(move || {
            while !stop_flag.load(Ordering::Relaxed) {
                match event::poll(INPUT_POLL_TIMEOUT) {
                    Ok(false) => {}
                    Ok(true) => match event::read() {
                        Ok(ev) => {
                            if tx.blocking_send(InputMsg::Event(ev)).is_err() {
                                break;
                            }
                        }
                        Err(e) => {
                            let _ = tx.blocking_send(InputMsg::Error(e.to_string()));
                            break;
                        }
                    },
                    Err(e) => {
                        let _ = tx.blocking_send(InputMsg::Error(e.to_string()));
                        break;
                    }
                }
            }
        });

        Self {
            rx,
            stop,
            reader: Some(reader),
        }
    }

    fn try_recv(&mut self) -> Option<InputMsg> {
        self.rx.try_recv().ok()
    }

    /// Stop the reader thread and wait for it to exit.
    pub fn shutdown(mut self) {
        self.stop.store(true, Ordering::Relaxed);
        if let Some(reader) = self.reader.take() {
            let _ = reader.join();
        }
    }
}

impl Default for InputPump {
    fn default() -> Self {
        Self::new()
    }
}

/// Drain queued input and apply it to the app.
///
/// Returns `Ok(true)` when the user asked to quit. At most
/// [`MAX_EVENTS_PER_FRAME`] events are processed per call.
pub fn handle_events(app: &mut App, input: &mut InputPump) -> Result<bool> {
    for _ in 0..MAX_EVENTS_PER_FRAME {
        let Some(msg) = input.try_recv() else {
            break;
        };
        match msg {
            InputMsg::Error(e) => return Err(anyhow!("terminal input failed: {e}")),
            InputMsg::Event(Event::Key(key)) if key.kind == KeyEventKind::Press => {
                if handle_key(app, key) {
                    app.request_quit();
                    return Ok(true);
                }
            }
            // Resize is handled by ratatui on the next draw; other events
            // carry nothing we act on.
            InputMsg::Event(_) => {}
        }
    }
    Ok(false)
}

fn handle_key(app: &mut App, key: KeyEvent) -> bool {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return true;
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => true,
        KeyCode::Up | KeyCode::Char('k') => {
            app.scroll_up(1);
            false
        }
        KeyCode::Down | KeyCode::Char('j') => {
            app.scroll_down(1);
            false
        }
        KeyCode::PageUp => {
            app.scroll_up(PAGE_ROWS);
            false
        }
        KeyCode::PageDown => {
            app.scroll_down(PAGE_ROWS);
            false
        }
        KeyCode::Home | KeyCode::Char('g') => {
            app.scroll_home();
            false
        }
        _ => false,
    }
}
