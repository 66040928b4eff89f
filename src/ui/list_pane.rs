use crate::app::AppState;
use crate::domain::Item;
use crate::ui::styles::{
    border_style, checkbox_done_style, default_style, done_style, selected_style, title_style,
};
use ratatui::{
    layout::Rect,
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

/// Checkbox glyph for an item
fn checkbox(is_done: bool, use_unicode: bool) -> &'static str {
    match (is_done, use_unicode) {
        (true, true) => "[✔]",
        (false, true) => "[·]",
        (true, false) => "[x]",
        (false, false) => "[ ]",
    }
}

/// Render the list pane
pub fn render_list_pane(f: &mut Frame, app: &AppState, area: Rect) {
    let collection = app.store.collection();
    let (done, total) = app.counts();
    let title = format!(" Todo List ({}/{} done) ", done, total);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style())
        .title(Span::styled(title, title_style()));

    if collection.is_empty() {
        let empty = Paragraph::new(Line::raw("  Nothing here yet. Press 'a' to add a task."))
            .style(default_style())
            .block(block);
        f.render_widget(empty, area);
        return;
    }

    let items: Vec<ListItem> = collection
        .iter()
        .enumerate()
        .map(|(idx, item)| {
            let selected = idx == app.selected_index;
            ListItem::new(create_item_line(item, app.use_unicode, selected))
        })
        .collect();

    // ListState keeps the selected row scrolled into view
    let mut state = ListState::default().with_selected(Some(app.selected_index));
    let list = List::new(items).block(block);

    f.render_stateful_widget(list, area, &mut state);
}

/// Create a single row
/// Format: [✔] Buy milk
fn create_item_line(item: &Item, use_unicode: bool, selected: bool) -> Line<'static> {
    let (box_style, text_style) = if selected {
        let highlight = selected_style();
        let text = if item.is_done {
            highlight.add_modifier(Modifier::CROSSED_OUT)
        } else {
            highlight
        };
        (highlight, text)
    } else if item.is_done {
        (checkbox_done_style(), done_style())
    } else {
        (default_style(), default_style())
    };

    Line::from(vec![
        Span::styled(format!(" {} ", checkbox(item.is_done, use_unicode)), box_style),
        Span::styled(item.title.clone(), text_style),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ItemId;

    #[test]
    fn test_create_item_line() {
        let item = Item::new(ItemId::new(1), "Buy milk");
        let line = create_item_line(&item, false, false);

        assert_eq!(line.spans.len(), 2);
        assert_eq!(line.spans[0].content, " [ ] ");
        assert_eq!(line.spans[1].content, "Buy milk");
        assert!(!line.spans[1].style.add_modifier.contains(Modifier::CROSSED_OUT));
    }

    #[test]
    fn test_done_item_is_crossed_out() {
        let mut item = Item::new(ItemId::new(1), "Buy milk");
        item.is_done = true;

        let line = create_item_line(&item, true, false);
        assert_eq!(line.spans[0].content, " [✔] ");
        assert!(line.spans[1].style.add_modifier.contains(Modifier::CROSSED_OUT));

        let selected = create_item_line(&item, true, true);
        assert!(selected.spans[1].style.add_modifier.contains(Modifier::CROSSED_OUT));
    }

    #[test]
    fn test_checkbox_glyphs() {
        assert_eq!(checkbox(false, true), "[·]");
        assert_eq!(checkbox(true, false), "[x]");
    }
}
