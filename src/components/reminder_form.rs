use chrono::Local;
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::reminders::{reminder::parse_date_time, Reminder};
use crate::theme;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FormField {
    Name,
    When,
}

impl FormField {
    pub fn next(&self) -> Self {
        match self {
            FormField::Name => FormField::When,
            FormField::When => FormField::Name,
        }
    }

    pub fn prev(&self) -> Self {
        // Two fields, so Tab and Shift-Tab land in the same place.
        self.next()
    }
}

/// One add/edit session. The edit target lives here, not in ambient app
/// state, so a session can only ever touch the reminder it was opened on.
#[derive(Debug, Clone)]
pub struct FormState {
    pub name: String,
    pub date_time: String,
    pub active_field: FormField,
    pub target: Option<usize>,
}

impl FormState {
    pub fn new() -> Self {
        Self {
            name: String::new(),
            date_time: Local::now().format("%Y-%m-%dT%H:%M").to_string(),
            active_field: FormField::Name,
            target: None,
        }
    }

    /// Prefill from the reminder at `index`. The datetime is normalized to
    /// the form shape, falling back to now when the record is malformed.
    pub fn edit(index: usize, reminder: &Reminder) -> Self {
        Self {
            name: reminder.name.clone(),
            date_time: reminder.form_value(),
            active_field: FormField::Name,
            target: Some(index),
        }
    }

    pub fn is_edit(&self) -> bool {
        self.target.is_some()
    }

    pub fn input_char(&mut self, c: char) {
        match self.active_field {
            FormField::Name => self.name.push(c),
            FormField::When => self.date_time.push(c),
        }
    }

    pub fn backspace(&mut self) {
        match self.active_field {
            FormField::Name => {
                self.name.pop();
            }
            FormField::When => {
                self.date_time.pop();
            }
        }
    }
}

pub struct ReminderForm;

impl ReminderForm {
    pub fn render(frame: &mut Frame, area: Rect, state: &FormState) {
        // Center the form popup
        let form_w = area.width.min(48).max(30);
        let form_h = area.height.min(9).max(7);
        let x = area.x + (area.width.saturating_sub(form_w)) / 2;
        let y = area.y + (area.height.saturating_sub(form_h)) / 2;
        let form_area = Rect::new(x, y, form_w, form_h);

        // Clear background
        frame.render_widget(Clear, form_area);

        let title = if state.is_edit() {
            " Edit Reminder "
        } else {
            " New Reminder "
        };
        let block = Block::default()
            .title(title)
            .title_style(theme::current().accent.add_modifier(Modifier::BOLD))
            .borders(Borders::ALL)
            .border_style(theme::current().accent);

        let inner = block.inner(form_area);
        frame.render_widget(block, form_area);

        let rows = Layout::vertical([
            Constraint::Length(1), // name
            Constraint::Length(1), // datetime
            Constraint::Length(1), // datetime preview / format hint
            Constraint::Length(1), // spacer
            Constraint::Length(1), // help
            Constraint::Min(0),
        ])
        .split(inner);

        render_field(frame, rows[0], "Name:", &state.name, state.active_field == FormField::Name);
        render_field(frame, rows[1], "When:", &state.date_time, state.active_field == FormField::When);

        // Echo how the datetime will read on the card, or the expected
        // shape when it does not parse yet.
        let hint = match parse_date_time(&state.date_time) {
            Some(_) => Reminder::new(&state.name, &state.date_time).display_when(),
            None => "format: YYYY-MM-DDTHH:MM".to_string(),
        };
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(
                format!("       {}", hint),
                theme::current().dim,
            ))),
            rows[2],
        );

        let help = Line::from(vec![
            Span::styled("Tab", Style::default().add_modifier(Modifier::BOLD)),
            Span::styled(":Next ", theme::current().dim),
            Span::styled("Enter", Style::default().add_modifier(Modifier::BOLD)),
            Span::styled(":Save ", theme::current().dim),
            Span::styled("Esc", Style::default().add_modifier(Modifier::BOLD)),
            Span::styled(":Cancel", theme::current().dim),
        ]);
        frame.render_widget(Paragraph::new(help), rows[4]);
    }
}

fn render_field(frame: &mut Frame, area: Rect, label: &str, value: &str, active: bool) {
    let cursor = if active { "_" } else { "" };

    let style = if active {
        Style::default().fg(ratatui::style::Color::Cyan)
    } else {
        Style::default()
    };

    let spans = vec![
        Span::styled(format!("{:<7}", label), theme::current().dim),
        Span::styled(format!("{}{}", value, cursor), style),
    ];

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edit_prefills_from_the_target() {
        let r = Reminder::new("Pay rent", "2025-01-01T09:00:30");
        let form = FormState::edit(3, &r);
        assert_eq!(form.target, Some(3));
        assert_eq!(form.name, "Pay rent");
        assert_eq!(form.date_time, "2025-01-01T09:00");
        assert!(form.is_edit());
    }

    #[test]
    fn input_goes_to_the_active_field() {
        let mut form = FormState::new();
        form.input_char('h');
        form.input_char('i');
        form.active_field = form.active_field.next();
        form.backspace();
        form.input_char('9');
        assert_eq!(form.name, "hi");
        assert!(form.date_time.ends_with('9'));
    }

    #[test]
    fn tab_cycles_both_ways() {
        assert_eq!(FormField::Name.next(), FormField::When);
        assert_eq!(FormField::When.next(), FormField::Name);
        assert_eq!(FormField::Name.prev(), FormField::When);
    }
}
