// crates/domain/src/lib.rs

pub mod category;
pub mod field;
pub mod image;
pub mod locale;
pub mod query;
pub mod resolve;
pub mod setting;
pub mod view;

pub use locale::{Locale, DEFAULT_LOCALE};
pub use resolve::{EmptyPolicy, LocalizedResolver};
