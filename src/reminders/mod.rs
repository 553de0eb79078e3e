pub mod reminder;
pub mod store;

pub use reminder::Reminder;
pub use store::{SortKey, Store};
