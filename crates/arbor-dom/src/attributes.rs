//! Element Attributes
//!
//! Ordered attribute list: get, set, remove, has, with namespaced variants and
//! `class` token helpers.
//!
//! Every key-only operation acts on the *first* entry with that key, whatever
//! its namespace. Two entries may share a key under different namespaces; only
//! the first one is reachable without naming the namespace.

use std::fmt;

use serde::{Deserialize, Serialize};

const CLASS: &str = "class";

/// Single attribute
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Attribute {
    /// Namespace prefix (`xlink`, `xml`, ...), `None` for plain attributes
    pub namespace: Option<String>,
    pub key: String,
    pub value: String,
}

impl Attribute {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            namespace: None,
            key: key.into(),
            value: value.into(),
        }
    }

    pub fn with_namespace(
        namespace: impl Into<String>,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self {
            namespace: Some(namespace.into()),
            key: key.into(),
            value: value.into(),
        }
    }

    #[inline]
    fn is_ns(&self, namespace: Option<&str>, key: &str) -> bool {
        self.namespace.as_deref() == namespace && self.key == key
    }
}

/// Ordered attribute list of one element
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttributeList {
    attrs: Vec<Attribute>,
}

impl AttributeList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.attrs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attrs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Attribute> {
        self.attrs.iter()
    }

    pub fn as_slice(&self) -> &[Attribute] {
        &self.attrs
    }

    /// Position of the first entry with `key`
    pub fn index_of(&self, key: &str) -> Option<usize> {
        self.attrs.iter().position(|a| a.key == key)
    }

    /// Position of the first entry with (`namespace`, `key`)
    pub fn index_of_ns(&self, namespace: Option<&str>, key: &str) -> Option<usize> {
        self.attrs.iter().position(|a| a.is_ns(namespace, key))
    }

    /// Position of the first entry equal to `attr` (namespace, key and value)
    pub fn index_of_attr(&self, attr: &Attribute) -> Option<usize> {
        self.attrs.iter().position(|a| a == attr)
    }

    pub fn has(&self, key: &str) -> bool {
        self.index_of(key).is_some()
    }

    pub fn has_ns(&self, namespace: Option<&str>, key: &str) -> bool {
        self.index_of_ns(namespace, key).is_some()
    }

    pub fn has_attr(&self, attr: &Attribute) -> bool {
        self.index_of_attr(attr).is_some()
    }

    /// True when the first entry with `key` has exactly `value`
    pub fn has_value(&self, key: &str, value: &str) -> bool {
        self.get(key) == Some(value)
    }

    pub fn has_value_ns(&self, namespace: Option<&str>, key: &str, value: &str) -> bool {
        self.get_ns(namespace, key) == Some(value)
    }

    /// Value of the first entry with `key`
    pub fn get(&self, key: &str) -> Option<&str> {
        self.get_attr(key).map(|a| a.value.as_str())
    }

    pub fn get_ns(&self, namespace: Option<&str>, key: &str) -> Option<&str> {
        self.get_attr_ns(namespace, key).map(|a| a.value.as_str())
    }

    /// First entry with `key`
    pub fn get_attr(&self, key: &str) -> Option<&Attribute> {
        self.index_of(key).map(|i| &self.attrs[i])
    }

    pub fn get_attr_ns(&self, namespace: Option<&str>, key: &str) -> Option<&Attribute> {
        self.index_of_ns(namespace, key).map(|i| &self.attrs[i])
    }

    /// Overwrite the value of the first entry with `key`, keeping its
    /// namespace, or append a new plain entry.
    pub fn set(&mut self, key: &str, value: &str) {
        match self.index_of(key) {
            Some(i) => self.attrs[i].value = value.to_string(),
            None => self.attrs.push(Attribute::new(key, value)),
        }
    }

    /// Overwrite or append scoped to (`namespace`, `key`)
    pub fn set_ns(&mut self, namespace: Option<&str>, key: &str, value: &str) {
        match self.index_of_ns(namespace, key) {
            Some(i) => self.attrs[i].value = value.to_string(),
            None => self.attrs.push(Attribute {
                namespace: namespace.map(str::to_string),
                key: key.to_string(),
                value: value.to_string(),
            }),
        }
    }

    /// Replace the first entry with the same key as `attr`, namespace
    /// included, or append it.
    pub fn set_attr(&mut self, attr: Attribute) {
        match self.index_of(&attr.key) {
            Some(i) => self.attrs[i] = attr,
            None => self.attrs.push(attr),
        }
    }

    /// Replace the first entry with the same (namespace, key) or append it
    pub fn set_attr_ns(&mut self, attr: Attribute) {
        match self.index_of_ns(attr.namespace.as_deref(), &attr.key) {
            Some(i) => self.attrs[i] = attr,
            None => self.attrs.push(attr),
        }
    }

    /// Remove the first entry with `key`
    pub fn remove(&mut self, key: &str) -> Option<Attribute> {
        self.index_of(key).map(|i| self.attrs.remove(i))
    }

    pub fn remove_ns(&mut self, namespace: Option<&str>, key: &str) -> Option<Attribute> {
        self.index_of_ns(namespace, key).map(|i| self.attrs.remove(i))
    }

    /// Remove the first entry equal to `attr`
    pub fn remove_attr(&mut self, attr: &Attribute) -> Option<Attribute> {
        self.index_of_attr(attr).map(|i| self.attrs.remove(i))
    }

    /// Parsed `class` tokens
    pub fn class_list(&self) -> ClassList {
        ClassList::from_string(self.get(CLASS).unwrap_or(""))
    }

    pub fn has_class(&self, token: &str) -> bool {
        self.class_list().contains(token)
    }

    /// Append `token` to `class` unless it is already there
    pub fn add_class(&mut self, token: &str) {
        let token = token.trim();
        if token.is_empty() {
            return;
        }
        match self.index_of(CLASS) {
            None => self.attrs.push(Attribute::new(CLASS, token)),
            Some(i) => {
                let current = &self.attrs[i].value;
                if ClassList::from_string(current).contains(token) {
                    return;
                }
                let trimmed = current.trim();
                self.attrs[i].value = if trimmed.is_empty() {
                    token.to_string()
                } else {
                    format!("{trimmed} {token}")
                };
            }
        }
    }

    /// Remove every occurrence of `token`; the remaining tokens are joined by
    /// single spaces. The `class` attribute itself stays.
    pub fn remove_class(&mut self, token: &str) {
        let token = token.trim();
        if token.is_empty() {
            return;
        }
        if let Some(i) = self.index_of(CLASS) {
            let mut list = ClassList::from_string(&self.attrs[i].value);
            if list.contains(token) {
                list.remove(token);
                self.attrs[i].value = list.value();
            }
        }
    }

    /// Add `token` if absent, remove it otherwise. Returns the new state.
    pub fn toggle_class(&mut self, token: &str) -> bool {
        if self.has_class(token.trim()) {
            self.remove_class(token);
            false
        } else {
            self.add_class(token);
            !token.trim().is_empty()
        }
    }
}

impl From<Vec<Attribute>> for AttributeList {
    fn from(attrs: Vec<Attribute>) -> Self {
        Self { attrs }
    }
}

impl FromIterator<Attribute> for AttributeList {
    fn from_iter<I: IntoIterator<Item = Attribute>>(iter: I) -> Self {
        Self {
            attrs: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a AttributeList {
    type Item = &'a Attribute;
    type IntoIter = std::slice::Iter<'a, Attribute>;

    fn into_iter(self) -> Self::IntoIter {
        self.attrs.iter()
    }
}

/// Whitespace-separated token list (`classList`)
///
/// Splitting collapses runs of whitespace, so `"a  b\tc"` has three tokens.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassList {
    tokens: Vec<String>,
}

impl ClassList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse from a whitespace-separated string
    pub fn from_string(s: &str) -> Self {
        let tokens = s.split_whitespace().map(str::to_string).collect();
        Self { tokens }
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn item(&self, index: usize) -> Option<&str> {
        self.tokens.get(index).map(String::as_str)
    }

    pub fn contains(&self, token: &str) -> bool {
        self.tokens.iter().any(|t| t == token)
    }

    fn remove(&mut self, token: &str) {
        self.tokens.retain(|t| t != token);
    }

    /// Tokens joined by single spaces
    pub fn value(&self) -> String {
        self.tokens.join(" ")
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.tokens.iter().map(String::as_str)
    }
}

impl fmt::Display for ClassList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(list: &AttributeList) -> Vec<&str> {
        list.iter().map(|a| a.key.as_str()).collect()
    }

    #[test]
    fn test_index_of() {
        let list: AttributeList = vec![
            Attribute::new("key-0", ""),
            Attribute::new("key-1", ""),
            Attribute::new("key-2", ""),
        ]
        .into();
        assert_eq!(list.index_of("key-2"), Some(2));
        assert_eq!(list.index_of("missing"), None);
    }

    #[test]
    fn test_index_of_ns() {
        let list: AttributeList = vec![
            Attribute::with_namespace("foo", "key", ""),
            Attribute::with_namespace("bar", "key", ""),
            Attribute::with_namespace("baz", "key", ""),
        ]
        .into();
        assert_eq!(list.index_of_ns(Some("baz"), "key"), Some(2));
        assert_eq!(list.index_of_ns(None, "key"), None);
        assert_eq!(list.index_of("key"), Some(0));
    }

    #[test]
    fn test_has_value_checks_first_entry_only() {
        let list: AttributeList = vec![
            Attribute::with_namespace("xlink", "href", "a"),
            Attribute::new("href", "b"),
        ]
        .into();
        assert!(list.has_value("href", "a"));
        assert!(!list.has_value("href", "b"));
        assert_eq!(list.get_ns(None, "href"), Some("b"));
        assert!(list.has_value_ns(None, "href", "b"));
        assert!(!list.has_value_ns(Some("xlink"), "href", "b"));
    }

    #[test]
    fn test_set_is_idempotent() {
        let mut list = AttributeList::new();
        list.set("id", "main");
        list.set("id", "main");
        assert_eq!(list.len(), 1);
        assert_eq!(list.get("id"), Some("main"));
    }

    #[test]
    fn test_set_preserves_namespace() {
        let mut list: AttributeList = vec![Attribute::with_namespace("xlink", "href", "old")].into();
        list.set("href", "new");
        let attr = list.get_attr("href").unwrap();
        assert_eq!(attr.namespace.as_deref(), Some("xlink"));
        assert_eq!(attr.value, "new");
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn test_set_ns_appends_distinct_namespace() {
        let mut list = AttributeList::new();
        list.set("href", "plain");
        list.set_ns(Some("xlink"), "href", "linked");
        assert_eq!(list.len(), 2);
        assert_eq!(list.get("href"), Some("plain"));
        assert_eq!(list.get_ns(Some("xlink"), "href"), Some("linked"));

        list.set_ns(Some("xlink"), "href", "relinked");
        assert_eq!(list.len(), 2);
        assert_eq!(list.get_ns(Some("xlink"), "href"), Some("relinked"));
    }

    #[test]
    fn test_set_attr_replaces_whole_entry() {
        let mut list: AttributeList = vec![Attribute::with_namespace("xlink", "href", "old")].into();
        list.set_attr(Attribute::new("href", "new"));
        let attr = list.get_attr("href").unwrap();
        assert_eq!(attr.namespace, None);
        assert_eq!(attr.value, "new");
    }

    #[test]
    fn test_remove_first_match_only() {
        let mut list: AttributeList = vec![
            Attribute::with_namespace("a", "key", "1"),
            Attribute::with_namespace("b", "key", "2"),
        ]
        .into();
        let removed = list.remove("key").unwrap();
        assert_eq!(removed.value, "1");
        assert!(list.has("key"));
        list.remove("key");
        assert!(!list.has("key"));
        assert!(list.remove("key").is_none());
    }

    #[test]
    fn test_remove_attr_exact() {
        let mut list: AttributeList = vec![
            Attribute::new("key", "1"),
            Attribute::new("key", "2"),
        ]
        .into();
        list.remove_attr(&Attribute::new("key", "2"));
        assert_eq!(keys(&list), vec!["key"]);
        assert_eq!(list.get("key"), Some("1"));
    }

    #[test]
    fn test_add_class() {
        let mut list = AttributeList::new();
        list.add_class("btn");
        assert_eq!(list.get("class"), Some("btn"));
        list.add_class("active");
        list.add_class("btn");
        assert_eq!(list.get("class"), Some("btn active"));
    }

    #[test]
    fn test_class_tokens_split_on_whitespace_runs() {
        let mut list = AttributeList::new();
        list.set("class", "  a\t\tb \n c ");
        assert!(list.has_class("b"));
        assert_eq!(list.class_list().len(), 3);
        list.remove_class("b");
        assert_eq!(list.get("class"), Some("a c"));
    }

    #[test]
    fn test_toggle_class() {
        let mut list = AttributeList::new();
        assert!(list.toggle_class("open"));
        assert!(list.has_class("open"));
        assert!(!list.toggle_class("open"));
        assert!(!list.has_class("open"));
        assert_eq!(list.get("class"), Some(""));
    }

    #[test]
    fn test_empty_token_is_ignored() {
        let mut list = AttributeList::new();
        list.add_class("   ");
        assert!(!list.has("class"));
        assert!(!list.toggle_class(""));
    }
}
