//! Helper functions shared by the page components
//!
//! Date formatting and URL generation used while rendering markup.

mod date;
mod url;

pub use date::*;
pub use url::*;
