//! UI rendering

pub mod layout;
pub mod screens;
pub mod theme;

pub use theme::Theme;

use ratatui::prelude::*;
use telly_guard::{Route, View};

use crate::app::App;

/// Main render function - delegates to appropriate screen
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();
    match app.view() {
        View::Loading => screens::loading::draw(frame, area, app),
        View::Pin => screens::pin_entry::draw(frame, area, app),
        View::Content(Route::Favorites) => screens::favorites::draw(frame, area, app),
        // No detail screen; show routes fall back to home
        View::Content(Route::Home | Route::Show(_) | Route::Pin) => {
            screens::home::draw(frame, area, app)
        }
    }
}
