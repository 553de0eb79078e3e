use color_eyre::eyre::eyre;
use color_eyre::Result;

use crate::components::reminder_form::FormState;
use crate::reminders::{SortKey, Store};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputMode {
    Normal,
    Form,
    Search,
    ConfirmDelete,
}

pub struct App {
    pub running: bool,
    pub input_mode: InputMode,
    pub search_term: String,
    /// Store indices passing the filter, in display order.
    pub visible: Vec<usize>,
    /// Position within `visible`.
    pub selected: usize,
    pub form: Option<FormState>,
    /// Store index awaiting delete confirmation.
    pub pending_delete: Option<usize>,
    pub status_message: Option<String>,
    pub show_help: bool,
    store: Store,
}

impl App {
    pub fn new() -> Result<Self> {
        let path = Store::data_path()
            .ok_or_else(|| eyre!("could not determine a data directory"))?;
        let (store, warning) = Store::load(path);
        Ok(Self::from_store(store, warning))
    }

    fn from_store(store: Store, warning: Option<String>) -> Self {
        let mut app = Self {
            running: true,
            input_mode: InputMode::Normal,
            search_term: String::new(),
            visible: Vec::new(),
            selected: 0,
            form: None,
            pending_delete: None,
            status_message: warning,
            show_help: false,
            store,
        };
        app.refresh_visible();
        app
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn selected_store_index(&self) -> Option<usize> {
        self.visible.get(self.selected).copied()
    }

    fn refresh_visible(&mut self) {
        self.visible = self.store.matching_indices(&self.search_term);
        if self.selected >= self.visible.len() {
            self.selected = self.visible.len().saturating_sub(1);
        }
    }

    pub fn select_next(&mut self) {
        if !self.visible.is_empty() && self.selected + 1 < self.visible.len() {
            self.selected += 1;
        }
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    // ── add/edit form session ──

    pub fn open_add_form(&mut self) {
        self.form = Some(FormState::new());
        self.input_mode = InputMode::Form;
    }

    pub fn open_edit_form(&mut self) {
        if let Some(index) = self.selected_store_index() {
            let reminder = &self.store.reminders()[index];
            self.form = Some(FormState::edit(index, reminder));
            self.input_mode = InputMode::Form;
        }
    }

    pub fn close_form(&mut self) {
        self.form = None;
        self.input_mode = InputMode::Normal;
    }

    /// Commit the open form. Validation failures land on the status line and
    /// leave the form open; success closes it and re-sorts the list.
    pub fn submit_form(&mut self) {
        let Some(form) = self.form.clone() else {
            return;
        };
        let result = match form.target {
            Some(index) => self.store.update(index, &form.name, &form.date_time),
            None => self.store.add(&form.name, &form.date_time),
        };
        match result {
            Ok(()) => {
                self.status_message = Some(if form.is_edit() {
                    "Reminder updated".to_string()
                } else {
                    "Reminder added".to_string()
                });
                self.form = None;
                self.input_mode = InputMode::Normal;
                self.refresh_visible();
            }
            Err(err) => {
                self.status_message = Some(err.to_string());
            }
        }
    }

    pub fn form_input_char(&mut self, c: char) {
        if let Some(ref mut form) = self.form {
            form.input_char(c);
        }
    }

    pub fn form_backspace(&mut self) {
        if let Some(ref mut form) = self.form {
            form.backspace();
        }
    }

    pub fn form_tab(&mut self) {
        if let Some(ref mut form) = self.form {
            form.active_field = form.active_field.next();
        }
    }

    pub fn form_backtab(&mut self) {
        if let Some(ref mut form) = self.form {
            form.active_field = form.active_field.prev();
        }
    }

    // ── delete confirmation ──

    pub fn request_delete(&mut self) {
        if let Some(index) = self.selected_store_index() {
            self.pending_delete = Some(index);
            self.input_mode = InputMode::ConfirmDelete;
        }
    }

    pub fn confirm_delete(&mut self) {
        if let Some(index) = self.pending_delete.take() {
            match self.store.remove(index) {
                Ok(removed) => {
                    self.status_message = Some(format!("Deleted \"{}\"", removed.name));
                }
                Err(err) => {
                    self.status_message = Some(err.to_string());
                }
            }
            self.refresh_visible();
        }
        self.input_mode = InputMode::Normal;
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
        self.input_mode = InputMode::Normal;
    }

    // ── sort & search ──

    pub fn toggle_sort(&mut self) {
        let key = self.store.sort_key().toggled();
        match self.store.set_sort(key) {
            Ok(()) => {
                let unreadable = self.store.unreadable_dates();
                self.status_message = Some(if key == SortKey::Date && unreadable > 0 {
                    format!(
                        "Sorted by date ({} unreadable date{} left in place)",
                        unreadable,
                        if unreadable == 1 { "" } else { "s" }
                    )
                } else {
                    format!("Sorted by {}", key.label())
                });
            }
            Err(err) => {
                self.status_message = Some(err.to_string());
            }
        }
        self.refresh_visible();
    }

    pub fn open_search(&mut self) {
        self.input_mode = InputMode::Search;
    }

    pub fn search_input_char(&mut self, c: char) {
        self.search_term.push(c);
        self.refresh_visible();
    }

    pub fn search_backspace(&mut self) {
        self.search_term.pop();
        self.refresh_visible();
    }

    /// Leave search mode. Esc clears the term, restoring every card; Enter
    /// keeps the filter applied.
    pub fn close_search(&mut self, clear: bool) {
        if clear {
            self.search_term.clear();
            self.refresh_visible();
        }
        self.input_mode = InputMode::Normal;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reminders::store::DATA_FILE;
    use tempfile::TempDir;

    fn app_with(entries: &[(&str, &str)]) -> (App, TempDir) {
        let dir = TempDir::new().unwrap();
        let (mut store, _) = Store::load(dir.path().join(DATA_FILE));
        for (name, dt) in entries {
            store.add(name, dt).unwrap();
        }
        (App::from_store(store, None), dir)
    }

    #[test]
    fn startup_warning_lands_on_the_status_line() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(DATA_FILE);
        std::fs::write(&path, "[[[").unwrap();
        let (store, warning) = Store::load(&path);
        let app = App::from_store(store, warning);
        assert!(app.status_message.as_deref().unwrap().contains("corrupt"));
        assert!(app.visible.is_empty());
    }

    #[test]
    fn search_narrows_and_esc_restores() {
        let (mut app, _dir) = app_with(&[
            ("Pay rent", "2025-01-01T09:00"),
            ("Call Alex", "2024-12-31T10:00"),
        ]);
        app.open_search();
        for c in "pay".chars() {
            app.search_input_char(c);
        }
        assert_eq!(app.visible.len(), 1);
        assert_eq!(app.store().reminders()[app.visible[0]].name, "Pay rent");

        app.close_search(true);
        assert_eq!(app.visible.len(), 2);
        assert_eq!(app.input_mode, InputMode::Normal);
    }

    #[test]
    fn submit_with_empty_name_keeps_the_form_open() {
        let (mut app, _dir) = app_with(&[]);
        app.open_add_form();
        app.submit_form();
        assert!(app.form.is_some());
        assert_eq!(app.input_mode, InputMode::Form);
        assert!(app
            .status_message
            .as_deref()
            .unwrap()
            .contains("fill out both fields"));
        assert!(app.store().is_empty());
    }

    #[test]
    fn add_form_appends_and_closes() {
        let (mut app, _dir) = app_with(&[]);
        app.open_add_form();
        // Prefilled datetime is fine; just type a name.
        for c in "Water plants".chars() {
            app.form_input_char(c);
        }
        app.submit_form();
        assert!(app.form.is_none());
        assert_eq!(app.input_mode, InputMode::Normal);
        assert_eq!(app.store().len(), 1);
        assert_eq!(app.visible.len(), 1);
    }

    #[test]
    fn edit_targets_the_reminder_the_session_was_opened_on() {
        let (mut app, _dir) = app_with(&[
            ("Call Alex", "2024-12-31T10:00"),
            ("Pay rent", "2025-01-01T09:00"),
        ]);
        // Select "Pay rent" (second in date order) and open the editor.
        app.select_next();
        app.open_edit_form();
        let form = app.form.as_ref().unwrap();
        assert_eq!(form.name, "Pay rent");

        // A stray second open starts a fresh session on the current
        // selection; the old target cannot leak into it.
        app.selected = 0;
        app.open_edit_form();
        assert_eq!(app.form.as_ref().unwrap().name, "Call Alex");
        assert_eq!(app.form.as_ref().unwrap().target, Some(0));

        app.form_backspace();
        app.submit_form();
        assert_eq!(app.store().reminders()[0].name, "Call Ale");
        assert_eq!(app.store().len(), 2);
    }

    #[test]
    fn delete_is_gated_on_confirmation() {
        let (mut app, _dir) = app_with(&[
            ("Call Alex", "2024-12-31T10:00"),
            ("Pay rent", "2025-01-01T09:00"),
        ]);
        app.request_delete();
        assert_eq!(app.input_mode, InputMode::ConfirmDelete);
        app.cancel_delete();
        assert_eq!(app.store().len(), 2);

        app.request_delete();
        app.confirm_delete();
        assert_eq!(app.store().len(), 1);
        assert_eq!(app.store().reminders()[0].name, "Pay rent");
        assert!(app.status_message.as_deref().unwrap().contains("Call Alex"));
    }

    #[test]
    fn deleting_a_filtered_entry_removes_the_right_one() {
        let (mut app, _dir) = app_with(&[
            ("Call Alex", "2024-12-31T10:00"),
            ("Pay rent", "2025-01-01T09:00"),
            ("Pay taxes", "2025-04-15T09:00"),
        ]);
        app.open_search();
        for c in "taxes".chars() {
            app.search_input_char(c);
        }
        app.close_search(false);
        app.request_delete();
        app.confirm_delete();

        let names: Vec<_> = app.store().reminders().iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["Call Alex", "Pay rent"]);
    }

    #[test]
    fn toggle_sort_flips_criterion_and_order() {
        let (mut app, _dir) = app_with(&[
            ("banana", "2025-01-01T09:00"),
            ("Apple", "2025-06-01T09:00"),
        ]);
        // Date order first.
        assert_eq!(app.store().reminders()[0].name, "banana");
        app.toggle_sort();
        assert_eq!(app.store().sort_key(), SortKey::Name);
        assert_eq!(app.store().reminders()[0].name, "Apple");
    }

    #[test]
    fn selection_clamps_when_the_list_shrinks() {
        let (mut app, _dir) = app_with(&[
            ("a", "2025-01-01T09:00"),
            ("b", "2025-01-02T09:00"),
        ]);
        app.select_next();
        app.request_delete();
        app.confirm_delete();
        assert_eq!(app.selected, 0);
        assert_eq!(app.selected_store_index(), Some(0));
    }
}
