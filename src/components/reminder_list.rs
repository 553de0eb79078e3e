use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

use crate::reminders::{Reminder, SortKey};
use crate::theme;

/// Lines per rendered card: name, due time, separator.
const CARD_LINES: usize = 3;

pub struct ReminderList;

impl ReminderList {
    /// Render the visible cards. `visible` holds store indices in display
    /// order (the filter already applied); `selected` is a position within
    /// `visible`.
    pub fn render(
        frame: &mut Frame,
        area: Rect,
        reminders: &[Reminder],
        visible: &[usize],
        selected: usize,
        search_term: &str,
        sort: SortKey,
    ) {
        let w = area.width as usize;

        let title = if w >= 30 && visible.len() != reminders.len() {
            format!(" Reminders ({} of {}) ", visible.len(), reminders.len())
        } else if w >= 25 {
            format!(" Reminders ({}) ", reminders.len())
        } else {
            " Reminders ".to_string()
        };

        let block = Block::default()
            .title(title)
            .title_style(theme::current().header)
            .title_bottom(Line::from(Span::styled(
                format!(" sorted by {} ", sort.label()),
                theme::current().dim,
            )))
            .borders(Borders::ALL)
            .border_style(theme::current().border);

        if visible.is_empty() {
            let inner = block.inner(area);
            frame.render_widget(block, area);
            let msg = if reminders.is_empty() {
                "No reminders yet. Press n to add one.".to_string()
            } else {
                format!("No reminders match \"{}\".", search_term.trim())
            };
            frame.render_widget(Paragraph::new(msg).style(theme::current().dim), inner);
            return;
        }

        let inner_w = area.width.saturating_sub(2) as usize;
        let inner_h = area.height.saturating_sub(2) as usize;

        // Page-based scroll keeping the selected card on screen.
        let per_page = (inner_h / CARD_LINES).max(1);
        let first = (selected / per_page) * per_page;

        let mut items: Vec<ListItem> = Vec::new();
        for (pos, &idx) in visible.iter().enumerate().skip(first).take(per_page) {
            let reminder = &reminders[idx];
            let is_selected = pos == selected;

            let marker = if is_selected { "> " } else { "  " };
            let name_style = if is_selected {
                theme::current().selected
            } else {
                Style::default().add_modifier(Modifier::BOLD)
            };

            items.push(ListItem::new(Line::from(vec![
                Span::styled(
                    marker,
                    if is_selected {
                        theme::current().selected
                    } else {
                        Style::default()
                    },
                ),
                Span::styled(truncate(&reminder.name, inner_w.saturating_sub(2)), name_style),
            ])));
            items.push(ListItem::new(Line::from(Span::styled(
                format!("    {}", truncate(&reminder.display_when(), inner_w.saturating_sub(4))),
                theme::current().dim,
            ))));
            items.push(ListItem::new(Line::from("")));
        }

        let list = List::new(items).block(block);
        frame.render_widget(list, area);
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else if max > 3 {
        let cut: String = s.chars().take(max - 3).collect();
        format!("{}...", cut)
    } else {
        s.chars().take(max).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_keeps_short_strings_and_clips_long_ones() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("a very long reminder name", 10), "a very ...");
        assert_eq!(truncate("abc", 2), "ab");
    }

    #[test]
    fn block_chrome_takes_its_styles_from_the_active_theme() {
        use ratatui::{backend::TestBackend, Terminal};

        let mut terminal = Terminal::new(TestBackend::new(40, 10)).unwrap();
        terminal
            .draw(|frame| {
                ReminderList::render(frame, frame.area(), &[], &[], 0, "", SortKey::Date);
            })
            .unwrap();

        let buffer = terminal.backend().buffer();
        let title_cell = (0..40u16)
            .filter_map(|x| buffer.cell((x, 0)))
            .find(|c| c.symbol() == "R")
            .unwrap();
        assert_eq!(title_cell.style().fg, theme::current().header.fg);

        let footer_cell = (0..40u16)
            .filter_map(|x| buffer.cell((x, 9)))
            .find(|c| c.symbol() == "s")
            .unwrap();
        assert_eq!(footer_cell.style().fg, theme::current().dim.fg);
    }
}
