//! Selector model
//!
//! A [`SelectorList`] is a comma-separated list of complex selectors. Each
//! complex selector is a chain of compound selectors joined by combinators,
//! stored right to left so matching starts at the subject.

/// An+B expression for :nth-* selectors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NthExpression {
    /// Coefficient (A in An+B)
    pub a: i32,
    /// Offset (B in An+B)
    pub b: i32,
}

impl NthExpression {
    /// Create "odd" expression (2n+1)
    pub fn odd() -> Self {
        Self { a: 2, b: 1 }
    }

    /// Create "even" expression (2n)
    pub fn even() -> Self {
        Self { a: 2, b: 0 }
    }

    /// Create a simple index (0n+b)
    pub fn index(n: i32) -> Self {
        Self { a: 0, b: n }
    }

    pub fn new(a: i32, b: i32) -> Self {
        Self { a, b }
    }

    /// Parse from string like "2n+1", "odd", "even", "3", "-n + 2"
    pub fn parse(s: &str) -> Option<Self> {
        let s: String = s
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect::<String>()
            .to_ascii_lowercase();

        match s.as_str() {
            "odd" => return Some(Self::odd()),
            "even" => return Some(Self::even()),
            "" => return None,
            _ => {}
        }

        if let Ok(n) = s.parse::<i32>() {
            return Some(Self::index(n));
        }

        let n_pos = s.find('n')?;
        let a = match &s[..n_pos] {
            "" | "+" => 1,
            "-" => -1,
            a_str => a_str.parse().ok()?,
        };

        let rest = &s[n_pos + 1..];
        let b = if rest.is_empty() {
            0
        } else {
            // A sign is mandatory between An and B
            if !rest.starts_with(['+', '-']) {
                return None;
            }
            rest.parse().ok()?
        };

        Some(Self::new(a, b))
    }

    /// Check if index n (1-based) matches this expression
    pub fn matches(&self, n: i32) -> bool {
        // Widened so that B or A at the ends of the i32 range cannot overflow
        let (a, b, n) = (i64::from(self.a), i64::from(self.b), i64::from(n));
        if a == 0 {
            return n == b;
        }

        let diff = n - b;
        if a > 0 {
            diff >= 0 && diff % a == 0
        } else {
            diff <= 0 && diff % a == 0
        }
    }
}

/// Attribute selector
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeSelector {
    /// Attribute name, lower case
    pub name: String,
    pub matcher: Option<AttributeMatcher>,
    /// `[attr=value i]`
    pub case_insensitive: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttributeMatcher {
    /// [attr=value] - exact match
    Exact(String),
    /// [attr~=value] - whitespace-separated list contains
    Contains(String),
    /// [attr|=value] - exact or prefix with hyphen
    DashMatch(String),
    /// [attr^=value] - starts with
    Prefix(String),
    /// [attr$=value] - ends with
    Suffix(String),
    /// [attr*=value] - contains substring
    Substring(String),
}

impl AttributeSelector {
    /// Check if an attribute value matches
    pub fn matches(&self, value: Option<&str>) -> bool {
        let (matcher, value) = match (&self.matcher, value) {
            (_, None) => return false,
            (None, Some(_)) => return true,
            (Some(matcher), Some(value)) => (matcher, value),
        };

        let fold = |s: &str| {
            if self.case_insensitive {
                s.to_ascii_lowercase()
            } else {
                s.to_string()
            }
        };
        let value = fold(value);

        match matcher {
            AttributeMatcher::Exact(expected) => value == fold(expected),
            AttributeMatcher::Contains(expected) => {
                let expected = fold(expected);
                !expected.is_empty() && value.split_whitespace().any(|w| w == expected)
            }
            AttributeMatcher::DashMatch(expected) => {
                let expected = fold(expected);
                value == expected
                    || value
                        .strip_prefix(expected.as_str())
                        .is_some_and(|rest| rest.starts_with('-'))
            }
            // Empty operands never match for the substring operators
            AttributeMatcher::Prefix(expected) => {
                !expected.is_empty() && value.starts_with(&fold(expected))
            }
            AttributeMatcher::Suffix(expected) => {
                !expected.is_empty() && value.ends_with(&fold(expected))
            }
            AttributeMatcher::Substring(expected) => {
                !expected.is_empty() && value.contains(&fold(expected))
            }
        }
    }
}

/// Supported pseudo-classes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PseudoClass {
    Root,
    Empty,
    FirstChild,
    LastChild,
    OnlyChild,
    FirstOfType,
    LastOfType,
    OnlyOfType,
    NthChild(NthExpression),
    NthLastChild(NthExpression),
    NthOfType(NthExpression),
    NthLastOfType(NthExpression),
    Checked,
    Disabled,
    Enabled,
    /// `:not(a, b)` matches when no listed selector matches
    Not(SelectorList),
}

/// A simple selector inside a compound
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectorComponent {
    /// Universal selector *
    Universal,
    /// Type selector (tag name, lower case)
    Type(String),
    /// ID selector #id
    Id(String),
    /// Class selector .class
    Class(String),
    /// Attribute selector [attr], [attr=value], etc.
    Attribute(AttributeSelector),
    /// Pseudo-class :first-child, :nth-child(), etc.
    PseudoClass(PseudoClass),
}

/// Relationship between two compound selectors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Combinator {
    /// `a b`
    Descendant,
    /// `a > b`
    Child,
    /// `a + b`
    NextSibling,
    /// `a ~ b`
    SubsequentSibling,
}

/// Simple selectors that must all match the same element
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompoundSelector {
    pub components: Vec<SelectorComponent>,
}

/// Compound selectors joined by combinators.
///
/// `compounds[0]` is the subject; `combinators[i]` links `compounds[i]` to
/// `compounds[i + 1]`, the compound on its left in source order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComplexSelector {
    pub compounds: Vec<CompoundSelector>,
    pub combinators: Vec<Combinator>,
}

/// Comma-separated selector group
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectorList(pub Vec<ComplexSelector>);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nth_expression_odd() {
        let odd = NthExpression::odd();
        assert!(odd.matches(1));
        assert!(!odd.matches(2));
        assert!(odd.matches(3));
    }

    #[test]
    fn test_nth_expression_even() {
        let even = NthExpression::even();
        assert!(!even.matches(1));
        assert!(even.matches(2));
        assert!(even.matches(4));
    }

    #[test]
    fn test_nth_expression_parse() {
        assert_eq!(NthExpression::parse("odd"), Some(NthExpression::odd()));
        assert_eq!(NthExpression::parse("3"), Some(NthExpression::index(3)));
        assert_eq!(NthExpression::parse("2n+1"), Some(NthExpression::new(2, 1)));
        assert_eq!(NthExpression::parse("-n + 3"), Some(NthExpression::new(-1, 3)));
        assert_eq!(NthExpression::parse("n"), Some(NthExpression::new(1, 0)));
        assert_eq!(NthExpression::parse("2n1"), None);
        assert_eq!(NthExpression::parse("foo"), None);
    }

    #[test]
    fn test_nth_negative_coefficient() {
        let first_three = NthExpression::new(-1, 3);
        assert!(first_three.matches(1));
        assert!(first_three.matches(3));
        assert!(!first_three.matches(4));
    }

    #[test]
    fn test_nth_extreme_offsets() {
        let from_min = NthExpression::parse("n-2147483648").unwrap();
        assert_eq!(from_min, NthExpression::new(1, i32::MIN));
        assert!(from_min.matches(1));
        assert!(from_min.matches(i32::MAX));

        let up_to_min = NthExpression::parse("-n-2147483648").unwrap();
        assert_eq!(up_to_min, NthExpression::new(-1, i32::MIN));
        assert!(!up_to_min.matches(1));
        assert!(!up_to_min.matches(i32::MAX));

        let last = NthExpression::parse("2n+2147483647").unwrap();
        assert!(last.matches(i32::MAX));
        assert!(!last.matches(1));

        let wide = NthExpression::new(i32::MIN, i32::MAX);
        assert!(wide.matches(i32::MAX));
        assert!(!wide.matches(1));
        assert!(!NthExpression::new(i32::MIN, 0).matches(1));
    }

    #[test]
    fn test_attribute_selector_exact() {
        let sel = AttributeSelector {
            name: "type".into(),
            matcher: Some(AttributeMatcher::Exact("text".into())),
            case_insensitive: false,
        };
        assert!(sel.matches(Some("text")));
        assert!(!sel.matches(Some("TEXT")));
        assert!(!sel.matches(None));

        let folded = AttributeSelector {
            case_insensitive: true,
            ..sel
        };
        assert!(folded.matches(Some("TEXT")));
    }

    #[test]
    fn test_attribute_selector_operators() {
        let make = |matcher| AttributeSelector {
            name: "x".into(),
            matcher: Some(matcher),
            case_insensitive: false,
        };
        assert!(make(AttributeMatcher::Contains("b".into())).matches(Some("a b c")));
        assert!(make(AttributeMatcher::DashMatch("en".into())).matches(Some("en-US")));
        assert!(!make(AttributeMatcher::DashMatch("en".into())).matches(Some("english")));
        assert!(make(AttributeMatcher::Prefix("ht".into())).matches(Some("http")));
        assert!(make(AttributeMatcher::Suffix(".png".into())).matches(Some("a.png")));
        assert!(make(AttributeMatcher::Substring("ell".into())).matches(Some("hello")));
        assert!(!make(AttributeMatcher::Prefix(String::new())).matches(Some("x")));
    }
}
