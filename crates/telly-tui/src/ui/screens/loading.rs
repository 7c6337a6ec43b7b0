//! Placeholder shown until the stored lock state is read

use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use crate::app::App;
use crate::ui::layout::centered_rect;

const SPINNER: [&str; 4] = ["|", "/", "-", "\\"];

/// Draw the loading screen
pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let dialog = centered_rect(40, 20, area);

    let frame_index = (app.tick % SPINNER.len() as u64) as usize;
    let text = format!("{} Loading", SPINNER[frame_index]);
    let widget = Paragraph::new(text)
        .style(theme.text_secondary())
        .alignment(Alignment::Center);
    frame.render_widget(widget, dialog);
}
