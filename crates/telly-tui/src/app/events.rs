//! Event handling for the TUI

use std::time::Duration;

use crossterm::event::{Event as CrosstermEvent, EventStream, KeyEvent, KeyEventKind};
use futures::StreamExt;
use telly_guard::AppLifecycle;
use tokio::time::{interval, Interval, MissedTickBehavior};

/// Application events
#[derive(Debug, Clone)]
pub enum Event {
    /// Keyboard input
    Key(KeyEvent),
    /// Terminal focus changed; mapped onto the app lifecycle
    Lifecycle(AppLifecycle),
    /// Redraw tick
    Tick,
    /// Terminal resized
    Resize,
}

/// Merges terminal input with a redraw tick
pub struct EventHandler {
    stream: EventStream,
    ticker: Interval,
}

impl EventHandler {
    /// Create a new event handler
    pub fn new(tick_rate: Duration) -> Self {
        let mut ticker = interval(tick_rate);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        Self {
            stream: EventStream::new(),
            ticker,
        }
    }

    /// Wait for the next event; `None` once the terminal stream has ended
    pub async fn next(&mut self) -> std::io::Result<Option<Event>> {
        loop {
            tokio::select! {
                _ = self.ticker.tick() => return Ok(Some(Event::Tick)),
                raw = self.stream.next() => {
                    let raw = match raw {
                        Some(raw) => raw?,
                        None => return Ok(None),
                    };
                    if let Some(event) = translate(raw) {
                        return Ok(Some(event));
                    }
                }
            }
        }
    }
}

/// Map a terminal event; returns `None` for events the app ignores
pub fn translate(raw: CrosstermEvent) -> Option<Event> {
    match raw {
        CrosstermEvent::Key(key) if key.kind == KeyEventKind::Press => Some(Event::Key(key)),
        CrosstermEvent::FocusLost => Some(Event::Lifecycle(AppLifecycle::Background)),
        CrosstermEvent::FocusGained => Some(Event::Lifecycle(AppLifecycle::Active)),
        CrosstermEvent::Resize(_, _) => Some(Event::Resize),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEventState, KeyModifiers};

    #[test]
    fn test_focus_maps_to_lifecycle() {
        assert!(matches!(
            translate(CrosstermEvent::FocusLost),
            Some(Event::Lifecycle(AppLifecycle::Background))
        ));
        assert!(matches!(
            translate(CrosstermEvent::FocusGained),
            Some(Event::Lifecycle(AppLifecycle::Active))
        ));
    }

    #[test]
    fn test_key_release_ignored() {
        let release = KeyEvent {
            code: KeyCode::Char('1'),
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        };
        assert!(translate(CrosstermEvent::Key(release)).is_none());

        let press = KeyEvent::new(KeyCode::Char('1'), KeyModifiers::NONE);
        assert!(matches!(translate(CrosstermEvent::Key(press)), Some(Event::Key(_))));
    }
}
