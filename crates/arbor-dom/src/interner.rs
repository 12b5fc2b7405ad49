//! String Interner - Deduplicate tag names
//!
//! Every element carries an interned tag identifier next to its tag name, so
//! tag comparisons during searches are a `u32` compare.

use std::collections::HashMap;

/// Interned string ID - just 4 bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(transparent)]
pub struct InternedString(pub u32);

impl InternedString {
    /// Empty string
    pub const EMPTY: InternedString = InternedString(0);
}

/// String interner for tag names
#[derive(Debug, Clone)]
pub struct StringInterner {
    strings: Vec<Box<str>>,
    map: HashMap<Box<str>, u32>,
}

impl StringInterner {
    /// Create a new interner with common HTML tag names pre-interned
    pub fn new() -> Self {
        let mut interner = Self {
            strings: Vec::with_capacity(128),
            map: HashMap::with_capacity(128),
        };

        // Index 0 is always the empty string
        interner.intern("");

        const COMMON_TAGS: &[&str] = &[
            "html", "head", "body", "title", "meta", "link", "script", "style",
            "div", "span", "p", "a", "area", "img", "form", "input", "button",
            "ul", "ol", "li", "table", "tr", "td", "th", "thead", "tbody",
            "h1", "h2", "h3", "h4", "h5", "h6", "br", "hr", "template",
        ];

        for tag in COMMON_TAGS {
            interner.intern(tag);
        }

        interner
    }

    /// Intern a string, returning its ID
    pub fn intern(&mut self, s: &str) -> InternedString {
        if let Some(&id) = self.map.get(s) {
            return InternedString(id);
        }

        let id = self.strings.len() as u32;
        self.strings.push(s.into());
        self.map.insert(s.into(), id);
        InternedString(id)
    }

    /// Look up a string without interning it
    pub fn lookup(&self, s: &str) -> Option<InternedString> {
        self.map.get(s).map(|&id| InternedString(id))
    }

    /// Get the string for an interned ID
    #[inline]
    pub fn get(&self, id: InternedString) -> &str {
        self.strings.get(id.0 as usize).map(|s| &**s).unwrap_or("")
    }

    /// Number of interned strings
    pub fn len(&self) -> usize {
        self.strings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }
}

impl Default for StringInterner {
    fn default() -> Self {
        Self::new()
    }
}
