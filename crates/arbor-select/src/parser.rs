//! Selector parser
//!
//! Hand-written recursive descent over the selector text. Produces a
//! [`SelectorList`]; anything outside the supported subset is an error rather
//! than a selector that silently matches nothing.

use crate::selector::{
    AttributeMatcher, AttributeSelector, Combinator, ComplexSelector, CompoundSelector,
    NthExpression, PseudoClass, SelectorComponent, SelectorList,
};
use crate::{SelectorError, SelectorResult};

/// Parse a selector group such as `ul > li.item, #main a[href]`
///
/// `:not()` may nest at most 32 levels deep; past that the result is
/// [`SelectorError::TooDeep`].
pub fn parse_selector_list(input: &str) -> SelectorResult<SelectorList> {
    let mut parser = Parser::new(input);
    parser.skip_whitespace();
    if parser.at_end() {
        return Err(SelectorError::Empty);
    }
    let list = parser.parse_list()?;
    parser.skip_whitespace();
    match parser.peek() {
        None => Ok(list),
        Some(found) => Err(parser.unexpected(found)),
    }
}

/// Deepest accepted `:not()` nesting
const MAX_NESTING: usize = 32;

struct Parser {
    chars: Vec<char>,
    pos: usize,
    /// Open `:not(` groups around the current position
    depth: usize,
}

impl Parser {
    fn new(input: &str) -> Self {
        Self {
            chars: input.chars().collect(),
            pos: 0,
            depth: 0,
        }
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<char> {
        self.chars.get(self.pos + offset).copied()
    }

    fn at_end(&self) -> bool {
        self.pos >= self.chars.len()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += 1;
        Some(c)
    }

    fn eat(&mut self, c: char) -> bool {
        if self.peek() == Some(c) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn expect(&mut self, c: char, expected: &'static str) -> SelectorResult<()> {
        match self.peek() {
            Some(found) if found == c => {
                self.pos += 1;
                Ok(())
            }
            Some(found) => Err(self.unexpected(found)),
            None => Err(SelectorError::UnexpectedEnd { expected }),
        }
    }

    /// Returns true when any whitespace was skipped
    fn skip_whitespace(&mut self) -> bool {
        let start = self.pos;
        while self.peek().is_some_and(char::is_whitespace) {
            self.pos += 1;
        }
        self.pos > start
    }

    fn unexpected(&self, found: char) -> SelectorError {
        SelectorError::UnexpectedChar {
            offset: self.pos,
            found,
        }
    }

    fn parse_list(&mut self) -> SelectorResult<SelectorList> {
        let mut selectors = vec![self.parse_complex()?];
        loop {
            self.skip_whitespace();
            if !self.eat(',') {
                break;
            }
            self.skip_whitespace();
            selectors.push(self.parse_complex()?);
        }
        Ok(SelectorList(selectors))
    }

    fn parse_complex(&mut self) -> SelectorResult<ComplexSelector> {
        // Source order, reversed at the end
        let mut compounds = vec![self.parse_compound()?];
        let mut combinators = Vec::new();

        loop {
            let had_space = self.skip_whitespace();
            let combinator = match self.peek() {
                Some('>') => Combinator::Child,
                Some('+') => Combinator::NextSibling,
                Some('~') => Combinator::SubsequentSibling,
                None | Some(',') | Some(')') => break,
                Some(_) if had_space => Combinator::Descendant,
                Some(found) => return Err(self.unexpected(found)),
            };
            if combinator != Combinator::Descendant {
                self.pos += 1;
                self.skip_whitespace();
            }
            combinators.push(combinator);
            compounds.push(self.parse_compound()?);
        }

        compounds.reverse();
        combinators.reverse();
        Ok(ComplexSelector {
            compounds,
            combinators,
        })
    }

    fn parse_compound(&mut self) -> SelectorResult<CompoundSelector> {
        let mut components = Vec::new();

        if self.eat('*') {
            components.push(SelectorComponent::Universal);
        } else if self.peek().is_some_and(is_ident_start) {
            let name = self.parse_ident()?;
            components.push(SelectorComponent::Type(name.to_ascii_lowercase()));
        }

        loop {
            match self.peek() {
                Some('#') => {
                    self.pos += 1;
                    let id = self.parse_name()?;
                    components.push(SelectorComponent::Id(id));
                }
                Some('.') => {
                    self.pos += 1;
                    let class = self.parse_ident()?;
                    components.push(SelectorComponent::Class(class));
                }
                Some('[') => {
                    self.pos += 1;
                    components.push(SelectorComponent::Attribute(self.parse_attribute()?));
                }
                Some(':') => {
                    self.pos += 1;
                    components.push(SelectorComponent::PseudoClass(self.parse_pseudo()?));
                }
                _ => break,
            }
        }

        if components.is_empty() {
            return Err(match self.peek() {
                Some(found) => self.unexpected(found),
                None => SelectorError::UnexpectedEnd {
                    expected: "a selector",
                },
            });
        }
        Ok(CompoundSelector { components })
    }

    fn parse_attribute(&mut self) -> SelectorResult<AttributeSelector> {
        self.skip_whitespace();
        let name = self.parse_ident()?.to_ascii_lowercase();
        self.skip_whitespace();

        let op = match self.peek() {
            Some(']') => {
                self.pos += 1;
                return Ok(AttributeSelector {
                    name,
                    matcher: None,
                    case_insensitive: false,
                });
            }
            Some('=') => {
                self.pos += 1;
                '='
            }
            Some(c @ ('~' | '|' | '^' | '$' | '*')) if self.peek_at(1) == Some('=') => {
                self.pos += 2;
                c
            }
            Some(found) => return Err(self.unexpected(found)),
            None => return Err(SelectorError::UnexpectedEnd { expected: "]" }),
        };

        self.skip_whitespace();
        let value = match self.peek() {
            Some(quote @ ('"' | '\'')) => {
                self.pos += 1;
                self.parse_string(quote)?
            }
            _ => self.parse_ident()?,
        };

        self.skip_whitespace();
        let mut case_insensitive = false;
        if let Some(flag @ ('i' | 'I' | 's' | 'S')) = self.peek() {
            self.pos += 1;
            case_insensitive = flag.eq_ignore_ascii_case(&'i');
            self.skip_whitespace();
        }
        self.expect(']', "]")?;

        let matcher = match op {
            '=' => AttributeMatcher::Exact(value),
            '~' => AttributeMatcher::Contains(value),
            '|' => AttributeMatcher::DashMatch(value),
            '^' => AttributeMatcher::Prefix(value),
            '$' => AttributeMatcher::Suffix(value),
            _ => AttributeMatcher::Substring(value),
        };
        Ok(AttributeSelector {
            name,
            matcher: Some(matcher),
            case_insensitive,
        })
    }

    fn parse_pseudo(&mut self) -> SelectorResult<PseudoClass> {
        if self.eat(':') {
            let name = self.parse_ident()?;
            return Err(SelectorError::PseudoElement(name));
        }

        let name = self.parse_ident()?.to_ascii_lowercase();
        if self.eat('(') {
            return self.parse_functional_pseudo(name);
        }

        let pseudo = match name.as_str() {
            "root" => PseudoClass::Root,
            "empty" => PseudoClass::Empty,
            "first-child" => PseudoClass::FirstChild,
            "last-child" => PseudoClass::LastChild,
            "only-child" => PseudoClass::OnlyChild,
            "first-of-type" => PseudoClass::FirstOfType,
            "last-of-type" => PseudoClass::LastOfType,
            "only-of-type" => PseudoClass::OnlyOfType,
            "checked" => PseudoClass::Checked,
            "disabled" => PseudoClass::Disabled,
            "enabled" => PseudoClass::Enabled,
            "before" | "after" | "first-line" | "first-letter" => {
                return Err(SelectorError::PseudoElement(name));
            }
            _ => return Err(SelectorError::UnsupportedPseudoClass(name)),
        };
        Ok(pseudo)
    }

    fn parse_functional_pseudo(&mut self, name: String) -> SelectorResult<PseudoClass> {
        if name == "not" {
            if self.depth == MAX_NESTING {
                return Err(SelectorError::TooDeep { limit: MAX_NESTING });
            }
            self.depth += 1;
            self.skip_whitespace();
            let list = self.parse_list()?;
            self.depth -= 1;
            self.skip_whitespace();
            self.expect(')', ")")?;
            return Ok(PseudoClass::Not(list));
        }

        let make: fn(NthExpression) -> PseudoClass = match name.as_str() {
            "nth-child" => PseudoClass::NthChild,
            "nth-last-child" => PseudoClass::NthLastChild,
            "nth-of-type" => PseudoClass::NthOfType,
            "nth-last-of-type" => PseudoClass::NthLastOfType,
            _ => return Err(SelectorError::UnsupportedPseudoClass(name)),
        };

        let start = self.pos;
        while self.peek().is_some_and(|c| c != ')') {
            self.pos += 1;
        }
        let argument: String = self.chars[start..self.pos].iter().collect();
        self.expect(')', ")")?;
        NthExpression::parse(&argument)
            .map(make)
            .ok_or(SelectorError::InvalidNth(argument))
    }

    /// CSS identifier: may not start with a digit (or `-` + digit)
    fn parse_ident(&mut self) -> SelectorResult<String> {
        match self.peek() {
            Some(c) if is_ident_start(c) => {}
            Some('-') if self.peek_at(1).is_some_and(|c| is_ident_start(c) || c == '-') => {}
            Some(found) => return Err(self.unexpected(found)),
            None => {
                return Err(SelectorError::UnexpectedEnd {
                    expected: "an identifier",
                });
            }
        }
        self.parse_name()
    }

    /// Run of name characters, as after `#`
    fn parse_name(&mut self) -> SelectorResult<String> {
        let mut out = String::new();
        while let Some(c) = self.peek() {
            if c == '\\' {
                self.pos += 1;
                out.push(self.parse_escape()?);
            } else if is_name_char(c) {
                self.pos += 1;
                out.push(c);
            } else {
                break;
            }
        }
        if out.is_empty() {
            return Err(match self.peek() {
                Some(found) => self.unexpected(found),
                None => SelectorError::UnexpectedEnd {
                    expected: "a name",
                },
            });
        }
        Ok(out)
    }

    /// After a backslash: up to six hex digits plus one optional space, or
    /// any other single character taken literally.
    fn parse_escape(&mut self) -> SelectorResult<char> {
        let start = self.pos;
        while self.pos - start < 6 && self.peek().is_some_and(|c| c.is_ascii_hexdigit()) {
            self.pos += 1;
        }
        if self.pos > start {
            let hex: String = self.chars[start..self.pos].iter().collect();
            self.eat(' ');
            let code = u32::from_str_radix(&hex, 16).unwrap_or(0xFFFD);
            return Ok(char::from_u32(code)
                .filter(|&c| c != '\0')
                .unwrap_or('\u{FFFD}'));
        }
        self.bump().ok_or(SelectorError::UnexpectedEnd {
            expected: "an escaped character",
        })
    }

    fn parse_string(&mut self, quote: char) -> SelectorResult<String> {
        let mut out = String::new();
        loop {
            match self.bump() {
                Some(c) if c == quote => return Ok(out),
                Some('\\') => out.push(self.parse_escape()?),
                Some(c) => out.push(c),
                None => {
                    return Err(SelectorError::UnexpectedEnd {
                        expected: "closing quote",
                    });
                }
            }
        }
    }
}

fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_' || c == '\\' || !c.is_ascii()
}

fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_' || !c.is_ascii()
}
