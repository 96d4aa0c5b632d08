//! Type definitions for awsprice

mod document;
mod error;
mod record;

pub use document::*;
pub use error::*;
pub use record::*;
