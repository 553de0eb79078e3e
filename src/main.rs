mod app;
mod components;
mod event;
mod reminders;
mod theme;
mod tui;

use std::time::Duration;

use app::{App, InputMode};
use color_eyre::Result;
use crossterm::event::{KeyCode, KeyModifiers};
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

fn main() -> Result<()> {
    color_eyre::install()?;

    let mut app = App::new()?;

    tui::install_panic_hook();
    let mut terminal = tui::init()?;
    let result = run(&mut terminal, &mut app);
    tui::restore()?;
    result
}

fn run(terminal: &mut tui::Tui, app: &mut App) -> Result<()> {
    while app.running {
        terminal.draw(|frame| {
            let area = frame.area();

            // Main layout: search row + list + status bar
            let layout = Layout::vertical([
                Constraint::Length(1),
                Constraint::Min(1),
                Constraint::Length(1),
            ])
            .split(area);

            render_search_row(frame, layout[0], app);

            components::ReminderList::render(
                frame,
                layout[1],
                app.store().reminders(),
                &app.visible,
                app.selected,
                &app.search_term,
                app.store().sort_key(),
            );

            // Add/edit form overlay
            if let Some(ref form) = app.form {
                components::ReminderForm::render(frame, area, form);
            }

            // Delete confirmation overlay
            if let Some(index) = app.pending_delete {
                if let Some(reminder) = app.store().reminders().get(index) {
                    components::ConfirmDelete::render(frame, area, reminder);
                }
            }

            // Help overlay
            if app.show_help {
                render_help(frame, area);
            }

            render_status_bar(frame, layout[2], app);
        })?;

        if let Some(key) = event::next_key_event(Duration::from_millis(100))? {
            // Clear status message on any key
            app.status_message = None;

            // Help overlay takes priority
            if app.show_help {
                if key.code == KeyCode::Esc || key.code == KeyCode::Char('?') {
                    app.show_help = false;
                }
                continue;
            }

            match app.input_mode {
                InputMode::Normal => handle_normal_input(app, key.code, key.modifiers),
                InputMode::Form => handle_form_input(app, key.code),
                InputMode::Search => handle_search_input(app, key.code),
                InputMode::ConfirmDelete => handle_confirm_input(app, key.code),
            }
        }
    }

    Ok(())
}

fn handle_normal_input(app: &mut App, code: KeyCode, modifiers: KeyModifiers) {
    match (code, modifiers) {
        (KeyCode::Char('q'), _) | (KeyCode::Char('c'), KeyModifiers::CONTROL) => {
            app.running = false;
        }
        (KeyCode::Down, _) | (KeyCode::Char('j'), _) => app.select_next(),
        (KeyCode::Up, _) | (KeyCode::Char('k'), _) => app.select_prev(),
        (KeyCode::Char('n'), _) => app.open_add_form(),
        (KeyCode::Char('e'), _) | (KeyCode::Enter, _) => app.open_edit_form(),
        (KeyCode::Char('d'), _) => app.request_delete(),
        (KeyCode::Char('s'), _) => app.toggle_sort(),
        (KeyCode::Char('/'), _) => app.open_search(),
        (KeyCode::Char('?'), _) => app.show_help = true,
        _ => {}
    }
}

fn handle_form_input(app: &mut App, code: KeyCode) {
    match code {
        KeyCode::Esc => app.close_form(),
        KeyCode::Enter => app.submit_form(),
        KeyCode::Tab => app.form_tab(),
        KeyCode::BackTab => app.form_backtab(),
        KeyCode::Backspace => app.form_backspace(),
        KeyCode::Char(c) => app.form_input_char(c),
        _ => {}
    }
}

fn handle_search_input(app: &mut App, code: KeyCode) {
    match code {
        KeyCode::Esc => app.close_search(true),
        KeyCode::Enter => app.close_search(false),
        KeyCode::Backspace => app.search_backspace(),
        KeyCode::Char(c) => app.search_input_char(c),
        _ => {}
    }
}

fn handle_confirm_input(app: &mut App, code: KeyCode) {
    match code {
        KeyCode::Char('y') | KeyCode::Enter => app.confirm_delete(),
        KeyCode::Char('n') | KeyCode::Esc => app.cancel_delete(),
        _ => {}
    }
}

fn render_search_row(frame: &mut ratatui::Frame, area: Rect, app: &App) {
    let searching = app.input_mode == InputMode::Search;

    let term_style = if searching {
        Style::default().fg(ratatui::style::Color::Cyan)
    } else if app.search_term.is_empty() {
        theme::current().dim
    } else {
        Style::default()
    };
    let cursor = if searching { "_" } else { "" };
    let term = if app.search_term.is_empty() && !searching {
        "(/ to search)".to_string()
    } else {
        format!("{}{}", app.search_term, cursor)
    };

    let line = Line::from(vec![
        Span::styled(" Search: ", theme::current().dim),
        Span::styled(term, term_style),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

fn render_status_bar(frame: &mut ratatui::Frame, area: Rect, app: &App) {
    let w = area.width as usize;

    let mode_str = match app.input_mode {
        InputMode::Normal => "[List]",
        InputMode::Form if app.form.as_ref().is_some_and(|f| f.is_edit()) => "[Edit]",
        InputMode::Form => "[New]",
        InputMode::Search => "[Search]",
        InputMode::ConfirmDelete => "[Delete]",
    };

    // Show status message if present, otherwise show context-aware hints
    let right_text = if let Some(ref msg) = app.status_message {
        format!(" {} ", msg)
    } else {
        match app.input_mode {
            InputMode::Normal if w >= 80 => {
                " jk:Nav n:New e:Edit d:Del s:Sort /:Search ?:Help q:Quit".to_string()
            }
            InputMode::Normal if w >= 45 => " n:New e:Edit d:Del q:Quit".to_string(),
            InputMode::Form => " Tab:Next Enter:Save Esc:Cancel".to_string(),
            InputMode::Search => " Enter:Keep filter Esc:Clear".to_string(),
            InputMode::ConfirmDelete => " y:Delete n:Cancel".to_string(),
            _ => " ?:Help q:Quit".to_string(),
        }
    };

    let left = format!(" {} ", mode_str);
    let padding_len = w.saturating_sub(left.len() + right_text.len());
    let padding = " ".repeat(padding_len);

    let line = Line::from(vec![
        Span::styled(left, theme::current().status),
        Span::styled(padding, theme::current().status),
        Span::styled(right_text, theme::current().status),
    ]);

    let bar = Paragraph::new(line).style(theme::current().status);
    frame.render_widget(bar, area);
}

fn render_help(frame: &mut ratatui::Frame, area: Rect) {
    use ratatui::widgets::{Block, Borders, Clear, Wrap};

    let popup_w = area.width.min(48).max(30);
    let popup_h = area.height.min(18).max(12);
    let x = area.x + (area.width.saturating_sub(popup_w)) / 2;
    let y = area.y + (area.height.saturating_sub(popup_h)) / 2;
    let popup_area = Rect::new(x, y, popup_w, popup_h);

    frame.render_widget(Clear, popup_area);

    let block = Block::default()
        .title(" Keybindings ")
        .title_style(theme::current().accent.add_modifier(Modifier::BOLD))
        .borders(Borders::ALL)
        .border_style(theme::current().accent);

    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    let key_style = Style::default()
        .fg(ratatui::style::Color::Cyan)
        .add_modifier(Modifier::BOLD);
    let desc_style = Style::default();
    let section_style = Style::default().add_modifier(Modifier::BOLD | Modifier::UNDERLINED);

    let lines = vec![
        Line::from(Span::styled("List", section_style)),
        Line::from(vec![
            Span::styled("  j/k ", key_style),
            Span::styled("or ", theme::current().dim),
            Span::styled("\u{2191}/\u{2193}  ", key_style),
            Span::styled("Move selection", desc_style),
        ]),
        Line::from(vec![
            Span::styled("  s         ", key_style),
            Span::styled("Toggle sort (date / name)", desc_style),
        ]),
        Line::from(vec![
            Span::styled("  /         ", key_style),
            Span::styled("Filter by name", desc_style),
        ]),
        Line::from(""),
        Line::from(Span::styled("Reminders", section_style)),
        Line::from(vec![
            Span::styled("  n         ", key_style),
            Span::styled("New reminder", desc_style),
        ]),
        Line::from(vec![
            Span::styled("  e", key_style),
            Span::styled(" / ", theme::current().dim),
            Span::styled("Enter ", key_style),
            Span::styled("  Edit selected", desc_style),
        ]),
        Line::from(vec![
            Span::styled("  d         ", key_style),
            Span::styled("Delete selected (asks first)", desc_style),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled("  q", key_style),
            Span::styled(" / ", theme::current().dim),
            Span::styled("Esc     ", key_style),
            Span::styled("Quit / close popup", desc_style),
        ]),
    ];

    let para = Paragraph::new(lines).wrap(Wrap { trim: false });
    frame.render_widget(para, inner);
}
