use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::reminders::Reminder;
use crate::theme;

pub struct ConfirmDelete;

impl ConfirmDelete {
    pub fn render(frame: &mut Frame, area: Rect, reminder: &Reminder) {
        let popup_w = area.width.min(44).max(26);
        let popup_h = area.height.min(7).max(6);
        let x = area.x + (area.width.saturating_sub(popup_w)) / 2;
        let y = area.y + (area.height.saturating_sub(popup_h)) / 2;
        let popup_area = Rect::new(x, y, popup_w, popup_h);

        frame.render_widget(Clear, popup_area);

        let block = Block::default()
            .title(" Delete Reminder? ")
            .title_style(theme::current().danger.add_modifier(Modifier::BOLD))
            .borders(Borders::ALL)
            .border_style(theme::current().danger);

        let inner = block.inner(popup_area);
        frame.render_widget(block, popup_area);

        let rows = Layout::vertical([
            Constraint::Length(1), // name
            Constraint::Length(1), // when
            Constraint::Length(1), // spacer
            Constraint::Length(1), // help
            Constraint::Min(0),
        ])
        .split(inner);

        let max = inner.width.saturating_sub(2) as usize;
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(
                format!(" {}", clip(&reminder.name, max)),
                Style::default().add_modifier(Modifier::BOLD),
            ))),
            rows[0],
        );
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(
                format!(" {}", clip(&reminder.display_when(), max)),
                theme::current().dim,
            ))),
            rows[1],
        );

        let help = Line::from(vec![
            Span::styled(" y", Style::default().add_modifier(Modifier::BOLD)),
            Span::styled(":Delete ", theme::current().dim),
            Span::styled("n", Style::default().add_modifier(Modifier::BOLD)),
            Span::styled("/", theme::current().dim),
            Span::styled("Esc", Style::default().add_modifier(Modifier::BOLD)),
            Span::styled(":Cancel", theme::current().dim),
        ]);
        frame.render_widget(Paragraph::new(help), rows[3]);
    }
}

fn clip(s: &str, max: usize) -> String {
    s.chars().take(max).collect()
}
