use crate::app::AppState;
use crate::ui::styles::{error_style, hint_style};
use ratatui::{layout::Rect, text::{Line, Span}, widgets::Paragraph, Frame};

/// Render the status line: remaining count, slot name, and the last message
pub fn render_status_bar(f: &mut Frame, app: &AppState, area: Rect) {
    let (done, total) = app.counts();
    let mut spans = vec![Span::styled(
        format!(" {} left · slot '{}'", total - done, app.store.adapter().slot()),
        hint_style(),
    )];

    if let Some(message) = &app.status_message {
        let style = if app.store.is_dirty() {
            error_style()
        } else {
            hint_style()
        };
        spans.push(Span::styled(format!("  ·  {}", message), style));
    }

    f.render_widget(Paragraph::new(Line::from(spans)), area);
}
