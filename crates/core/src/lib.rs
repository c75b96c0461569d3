pub mod classify;
pub mod config;
pub mod error;
pub mod extract;
pub mod level;
pub mod model;
pub mod time;
pub mod value;

pub use classify::{Classified, classify_line, classify_value};
pub use error::{Result, ViceError};
pub use level::Level;
pub use model::record::LogRecord;
