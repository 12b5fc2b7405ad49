//! Arbor Select - CSS selectors
//!
//! Selector parsing and right-to-left matching over an [`arbor_dom::DomTree`],
//! a shareable cache of compiled selectors, and the query functions built on
//! top of them.

mod cache;
mod error;
mod matcher;
mod parser;
mod query;
pub mod selector;

pub use cache::{CacheConfig, CacheStats, SelectorCache};
pub use error::{SelectorError, SelectorResult};
pub use matcher::{CompiledSelector, Compiler, CssCompiler, Matcher};
pub use parser::parse_selector_list;
pub use query::{matches, query_all, query_first};
pub use selector::SelectorList;
