pub mod cli;
pub mod router;
pub mod view;

mod error;

pub use error::Error;
