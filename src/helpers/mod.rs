//! Helper functions shared by the artifact generators

mod date;
mod url;

pub use self::date::*;
pub use self::url::*;
