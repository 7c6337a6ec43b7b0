//! PIN entry screen shown while the session is locked

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph};
use telly_core::PIN_LENGTH;

use crate::app::App;
use crate::ui::layout::centered_rect;

const ERROR_TEXT: &str = "Incorrect PIN. Please try again.";

/// Draw the PIN entry screen
pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let dialog = centered_rect(50, 40, area);

    let block = Block::default()
        .title(" Locked ")
        .title_style(theme.title())
        .borders(Borders::ALL)
        .border_style(theme.border_focused());

    let inner = block.inner(dialog);
    frame.render_widget(block, dialog);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(2), // Title
            Constraint::Length(2), // Instructions
            Constraint::Length(2), // PIN dots
            Constraint::Length(2), // Error message
            Constraint::Min(0),    // Spacer
            Constraint::Length(1), // Help
        ])
        .split(inner);

    let title = Paragraph::new("\u{25B6} TV SERIES")
        .style(theme.title())
        .alignment(Alignment::Center);
    frame.render_widget(title, chunks[0]);

    let instructions = Paragraph::new("Enter PIN")
        .style(theme.text_secondary())
        .alignment(Alignment::Center);
    frame.render_widget(instructions, chunks[1]);

    let (filled, has_error) = app
        .lock_screen
        .as_ref()
        .map(|screen| (screen.digit_count(), screen.has_error()))
        .unwrap_or((0, false));

    let pin_style = if has_error {
        theme.danger()
    } else {
        theme.text()
    };
    let dots = Paragraph::new(pin_dots(filled))
        .style(pin_style)
        .alignment(Alignment::Center);
    frame.render_widget(dots, chunks[2]);

    if has_error {
        let error_widget = Paragraph::new(ERROR_TEXT)
            .style(theme.danger())
            .alignment(Alignment::Center);
        frame.render_widget(error_widget, chunks[3]);
    }

    let help = Paragraph::new("[0-9] Digit    [Backspace] Delete    [Esc] Quit")
        .style(theme.text_muted())
        .alignment(Alignment::Center);
    frame.render_widget(help, chunks[5]);
}

/// One dot per PIN position, filled for entered digits
fn pin_dots(filled: usize) -> String {
    (0..PIN_LENGTH)
        .map(|i| if i < filled { "\u{25CF}" } else { "\u{25CB}" })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0, "\u{25CB} \u{25CB} \u{25CB} \u{25CB}")]
    #[case(2, "\u{25CF} \u{25CF} \u{25CB} \u{25CB}")]
    #[case(4, "\u{25CF} \u{25CF} \u{25CF} \u{25CF}")]
    fn test_pin_dots(#[case] filled: usize, #[case] expected: &str) {
        assert_eq!(pin_dots(filled), expected);
    }
}
