//! Application state and event handling

mod events;

pub use events::{translate, Event, EventHandler};

use std::sync::Arc;
use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::prelude::*;
use telly_guard::{
    CollectingReporter, Favorites, GuardConfig, GuardState, LockScreen, PinOutcome, Route,
    RouteGate, SessionGuard, SharedStore, View,
};

use crate::ui::{self, Theme};

/// Redraw interval
const TICK_RATE: Duration = Duration::from_millis(100);

/// Shown when stored data could not be read at startup; details go to the log
pub const STARTUP_READ_FAILED: &str = "Stored session could not be read; locked";

/// Shown when a background write fails; details go to the log
pub const SAVE_FAILED: &str = "Changes could not be saved";

/// Main application struct
pub struct App {
    /// Session lock
    pub guard: SessionGuard,

    /// Favorited shows
    pub favorites: Favorites,

    /// PIN keypad, present only while locked
    pub lock_screen: Option<LockScreen>,

    /// Current content route
    pub route: Route,

    /// Favorites list selection index
    pub favorites_index: usize,

    /// Last status or error message
    pub status_message: Option<String>,

    /// Visual theme
    pub theme: Theme,

    /// Whether the app should quit
    pub should_quit: bool,

    /// Tick counter for animations
    pub tick: u64,

    gate: RouteGate,
    config: GuardConfig,
    reporter: Arc<CollectingReporter>,
}

impl App {
    /// Create the app; the guard stays initializing until [`App::initialize`]
    pub async fn new(config: GuardConfig, store: SharedStore) -> Self {
        let reporter = Arc::new(CollectingReporter::new());
        let guard = SessionGuard::new(Arc::clone(&store), reporter.clone());
        let favorites = Favorites::load(store, reporter.clone()).await;

        Self {
            guard,
            favorites,
            lock_screen: None,
            route: Route::Home,
            favorites_index: 0,
            status_message: None,
            theme: Theme::default(),
            should_quit: false,
            tick: 0,
            gate: RouteGate::new(),
            config,
            reporter,
        }
    }

    /// Run the application main loop
    pub async fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> anyhow::Result<()> {
        let mut events = EventHandler::new(TICK_RATE);

        // First frame is the loading view; redirects wait for it
        terminal.draw(|frame| ui::render(frame, self))?;
        self.mark_mounted();
        self.initialize().await;

        while !self.should_quit {
            terminal.draw(|frame| ui::render(frame, self))?;

            match events.next().await? {
                Some(event) => self.handle_event(event),
                None => break,
            }
        }

        Ok(())
    }

    /// What to render right now
    pub fn view(&self) -> View {
        RouteGate::view(self.guard.state(), self.route)
    }

    /// Record that the first frame has been drawn
    pub fn mark_mounted(&mut self) {
        self.gate.mark_mounted();
        self.sync();
    }

    /// Resolve the stored lock state
    pub async fn initialize(&mut self) {
        self.guard.init().await;
        if !self.reporter.drain().is_empty() {
            self.status_message = Some(STARTUP_READ_FAILED.to_string());
        }
        self.sync();
    }

    /// Apply one event
    pub fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(key) => self.handle_key(key),
            Event::Lifecycle(lifecycle) => {
                self.guard.on_lifecycle(lifecycle);
            }
            Event::Tick => self.tick = self.tick.wrapping_add(1),
            Event::Resize => {}
        }
        self.sync();
    }

    /// Flush pending writes and stop background tasks
    pub async fn shutdown(self) {
        self.guard.teardown().await;
        self.favorites.shutdown().await;
    }

    /// Follow guard state: redirect, and mount or drop the keypad
    fn sync(&mut self) {
        let state = self.guard.state();

        if let Some(route) = self.gate.redirect(state) {
            self.route = route;
        }

        if state == GuardState::Locked {
            if self.lock_screen.is_none() {
                self.lock_screen = Some(LockScreen::from_config(&self.config));
            }
        } else {
            // Dropping the lock screen cancels any pending clear
            self.lock_screen = None;
        }

        // Startup failures are drained by `initialize`
        if state.is_known() && !self.reporter.drain().is_empty() {
            self.status_message = Some(SAVE_FAILED.to_string());
        }
    }

    fn navigate(&mut self, route: Route) {
        self.route = RouteGate::authorize(route, self.guard.state());
    }

    /// Handle key press events
    fn handle_key(&mut self, key: KeyEvent) {
        // Global quit handler
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }

        match self.view() {
            View::Loading => {}
            View::Pin => self.handle_pin_key(key.code),
            View::Content(Route::Favorites) => self.handle_favorites_key(key.code),
            View::Content(Route::Home | Route::Show(_) | Route::Pin) => {
                self.handle_home_key(key.code)
            }
        }
    }

    fn handle_pin_key(&mut self, key: KeyCode) {
        let Some(screen) = self.lock_screen.as_mut() else {
            return;
        };

        match key {
            KeyCode::Char(c) if c.is_ascii_digit() => {
                if let PinOutcome::Accepted(token) = screen.submit_digit(c) {
                    self.lock_screen = None;
                    self.guard.unlock(token);
                }
            }
            KeyCode::Backspace => screen.backspace(),
            KeyCode::Esc => self.should_quit = true,
            _ => {}
        }
    }

    fn handle_home_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Char('f') => {
                self.favorites_index = 0;
                self.navigate(Route::Favorites);
            }
            KeyCode::Char('l') => {
                self.guard.logout();
            }
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            _ => {}
        }
    }

    fn handle_favorites_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Esc | KeyCode::Char('b') => self.navigate(Route::Home),
            KeyCode::Up | KeyCode::Char('k') => {
                self.favorites_index = self.favorites_index.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if self.favorites_index + 1 < self.favorites.len() {
                    self.favorites_index += 1;
                }
            }
            KeyCode::Char('d') | KeyCode::Delete => self.remove_selected_favorite(),
            KeyCode::Char('l') => {
                self.guard.logout();
            }
            _ => {}
        }
    }

    fn remove_selected_favorite(&mut self) {
        let Some(show) = self.favorites.list().get(self.favorites_index) else {
            return;
        };
        let (id, name) = (show.id, show.name.clone());

        if self.favorites.remove(id) {
            self.status_message = Some(format!("Removed {} from favorites", name));
        }
        self.favorites_index = self
            .favorites_index
            .min(self.favorites.len().saturating_sub(1));
    }
}
