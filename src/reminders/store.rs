use std::fs;
use std::path::{Path, PathBuf};

use color_eyre::eyre::{eyre, Result, WrapErr};

use super::reminder::Reminder;

pub const DATA_FILE: &str = "reminders.json";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    #[default]
    Date,
    Name,
}

impl SortKey {
    pub fn toggled(self) -> Self {
        match self {
            SortKey::Date => SortKey::Name,
            SortKey::Name => SortKey::Date,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SortKey::Date => "date",
            SortKey::Name => "name",
        }
    }
}

/// The authoritative reminder list. Every mutation rewrites the whole data
/// file in current display order before returning, so disk and screen never
/// disagree. The file is read once, at construction.
pub struct Store {
    path: PathBuf,
    reminders: Vec<Reminder>,
    sort: SortKey,
}

impl Store {
    /// Read the list from `path`. A missing file is an empty list; an
    /// unreadable or malformed one is an empty list plus a warning for the
    /// status line. The active criterion (date, the default for a fresh
    /// session) is re-applied to the loaded list, so display order never
    /// disagrees with the advertised sort; the file itself is only rewritten
    /// on the next mutation.
    pub fn load(path: impl Into<PathBuf>) -> (Self, Option<String>) {
        let path = path.into();
        let mut warning = None;

        let reminders = match fs::read_to_string(&path) {
            Ok(raw) => match serde_json::from_str(&raw) {
                Ok(list) => list,
                Err(err) => {
                    warning = Some(format!("Ignoring corrupt {}: {}", DATA_FILE, err));
                    Vec::new()
                }
            },
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Vec::new(),
            Err(err) => {
                warning = Some(format!("Could not read {}: {}", path.display(), err));
                Vec::new()
            }
        };

        let mut store = Self {
            path,
            reminders,
            sort: SortKey::default(),
        };
        store.apply_sort();
        (store, warning)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn reminders(&self) -> &[Reminder] {
        &self.reminders
    }

    pub fn len(&self) -> usize {
        self.reminders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reminders.is_empty()
    }

    pub fn sort_key(&self) -> SortKey {
        self.sort
    }

    /// Append a reminder, re-sort per the active criterion, persist.
    pub fn add(&mut self, name: &str, date_time: &str) -> Result<()> {
        validate(name, date_time)?;
        self.reminders
            .push(Reminder::new(name.trim(), date_time.trim()));
        self.apply_sort();
        self.persist()
    }

    /// Replace the name/datetime of the entry at `index` in place.
    pub fn update(&mut self, index: usize, name: &str, date_time: &str) -> Result<()> {
        validate(name, date_time)?;
        let entry = self
            .reminders
            .get_mut(index)
            .ok_or_else(|| eyre!("no reminder at index {}", index))?;
        entry.name = name.trim().to_string();
        entry.date_time = date_time.trim().to_string();
        self.apply_sort();
        self.persist()
    }

    /// Remove exactly the entry at `index`, returning it.
    pub fn remove(&mut self, index: usize) -> Result<Reminder> {
        if index >= self.reminders.len() {
            return Err(eyre!("no reminder at index {}", index));
        }
        let removed = self.reminders.remove(index);
        self.persist()?;
        Ok(removed)
    }

    pub fn set_sort(&mut self, key: SortKey) -> Result<()> {
        self.sort = key;
        self.apply_sort();
        self.persist()
    }

    /// Indices of reminders whose name contains `term`, case-insensitively.
    /// Pure query: touches neither the list nor the file. An empty term
    /// matches everything.
    pub fn matching_indices(&self, term: &str) -> Vec<usize> {
        let needle = term.trim().to_lowercase();
        self.reminders
            .iter()
            .enumerate()
            .filter(|(_, r)| needle.is_empty() || r.name.to_lowercase().contains(&needle))
            .map(|(i, _)| i)
            .collect()
    }

    /// Entries whose datetime fails to parse. They rank as ties when sorting
    /// by date, so the caller may want to mention them on the status line.
    pub fn unreadable_dates(&self) -> usize {
        self.reminders.iter().filter(|r| r.parsed().is_none()).count()
    }

    fn apply_sort(&mut self) {
        match self.sort {
            SortKey::Name => {
                self.reminders
                    .sort_by_cached_key(|r| r.name.trim().to_lowercase());
            }
            SortKey::Date => {
                // Entries with unreadable datetimes hold their positions;
                // the parseable rest sort ascending around them. Stable, so
                // duplicate instants keep their relative order.
                let mut parseable: Vec<usize> = (0..self.reminders.len())
                    .filter(|&i| self.reminders[i].parsed().is_some())
                    .collect();
                parseable.sort_by_key(|&i| self.reminders[i].parsed());

                let slots: Vec<usize> = (0..self.reminders.len())
                    .filter(|&i| self.reminders[i].parsed().is_some())
                    .collect();
                let mut list = std::mem::take(&mut self.reminders);
                let reordered: Vec<Reminder> = parseable
                    .iter()
                    .map(|&i| list[i].clone())
                    .collect();
                for (slot, reminder) in slots.into_iter().zip(reordered) {
                    list[slot] = reminder;
                }
                self.reminders = list;
            }
        }
    }

    fn persist(&self) -> Result<()> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir)
                .wrap_err_with(|| format!("creating {}", dir.display()))?;
        }
        let json = serde_json::to_string_pretty(&self.reminders)?;
        fs::write(&self.path, json)
            .wrap_err_with(|| format!("writing {}", self.path.display()))
    }

    pub fn data_path() -> Option<PathBuf> {
        dirs::data_dir().map(|d| d.join("reminder-tui").join(DATA_FILE))
    }
}

fn validate(name: &str, date_time: &str) -> Result<()> {
    if name.trim().is_empty() || date_time.trim().is_empty() {
        return Err(eyre!("Please fill out both fields before saving"));
    }
    Ok(())
}
