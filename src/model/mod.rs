// File: ./src/model/mod.rs
pub mod date;
pub mod item;
pub mod matcher;

pub use date::normalize_date_text;
pub use item::{EventRecord, load_events};
pub use matcher::{ALL_CATEGORIES, FilterCriteria, NormalizedCriteria, filter_events, visibility};
