//! Error taxonomy for the content pipeline

use std::path::PathBuf;
use thiserror::Error;

/// An entry failed the project schema.
///
/// Fatal to the whole build: no partial collection is ever produced.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid project entry `{id}`: field `{field}` {reason}")]
pub struct SchemaValidationError {
    /// Id of the offending entry
    pub id: String,
    /// Path of the offending field, e.g. `promptSnippets[1].effectiveness`
    pub field: String,
    /// The violated constraint
    pub reason: String,
}

impl SchemaValidationError {
    pub fn new(id: &str, field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            id: id.to_string(),
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// Site-level failures raised by artifact generators
#[derive(Error, Debug)]
pub enum JournalError {
    #[error("site root URL is not configured; {artifact} cannot be generated (set `url` in _config.yml or pass --site)")]
    MissingSiteConfiguration { artifact: &'static str },

    #[error("site root URL `{url}` is invalid: {source}")]
    InvalidSiteUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
}

/// Vector-to-bitmap conversion failed for one entry
#[derive(Error, Debug)]
pub enum RasterizationError {
    #[error("malformed SVG markup: {0}")]
    Markup(String),
    #[error("cannot allocate a {width}x{height} canvas")]
    Canvas { width: u32, height: u32 },
    #[error("PNG encoding failed: {0}")]
    Encode(String),
}

/// The embedded typeface could not be loaded
#[derive(Error, Debug)]
pub enum AssetLoadError {
    #[error("cannot read font file {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("font file {0:?} contains no usable font faces")]
    NoFaces(PathBuf),
}
