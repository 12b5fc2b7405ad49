//! Document Configuration

use arbor_html::{ParseOptions, SerializeOptions};
use arbor_select::CacheConfig;
use serde::{Deserialize, Serialize};

/// Options for parsing, rendering and selector caching of a document
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentOptions {
    pub parse: ParseOptions,
    pub serialize: SerializeOptions,
    /// Used when the document builds its own selector cache
    pub cache: CacheConfig,
}
