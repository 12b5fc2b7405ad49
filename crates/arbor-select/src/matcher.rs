//! Selector matching
//!
//! [`Matcher`] and [`Compiler`] are the seams the selector cache works
//! through. [`CssCompiler`] is the built-in compiler; it produces
//! [`CompiledSelector`]s that match right to left, starting at the subject
//! compound and backtracking through ancestors and siblings.

use std::fmt;
use std::iter;
use std::sync::Arc;

use arbor_dom::{Collection, DomTree, ElementData, NodeId};

use crate::SelectorResult;
use crate::parser::parse_selector_list;
use crate::selector::{
    AttributeSelector, Combinator, ComplexSelector, CompoundSelector, NthExpression, PseudoClass,
    SelectorComponent, SelectorList,
};

/// A compiled selector that can test nodes of a tree
pub trait Matcher: Send + Sync + fmt::Debug {
    /// Test a single node
    fn matches(&self, tree: &DomTree, node: NodeId) -> bool;

    /// Source text the matcher was compiled from
    fn selector_text(&self) -> &str;

    /// `root` and its descendants that match, in document order
    fn match_all(&self, tree: &DomTree, root: NodeId) -> Collection {
        iter::once(root)
            .chain(tree.descendants(root))
            .filter(|&node| self.matches(tree, node))
            .collect()
    }

    /// First of `root` and its descendants that matches
    fn match_first(&self, tree: &DomTree, root: NodeId) -> Option<NodeId> {
        iter::once(root)
            .chain(tree.descendants(root))
            .find(|&node| self.matches(tree, node))
    }
}

/// Turns selector text into a [`Matcher`]
pub trait Compiler: Send + Sync + fmt::Debug {
    fn compile(&self, selector: &str) -> SelectorResult<Arc<dyn Matcher>>;
}

/// Built-in CSS selector compiler
#[derive(Debug, Clone, Copy, Default)]
pub struct CssCompiler;

impl Compiler for CssCompiler {
    fn compile(&self, selector: &str) -> SelectorResult<Arc<dyn Matcher>> {
        Ok(Arc::new(CompiledSelector::parse(selector)?))
    }
}

/// Parsed selector list together with its source text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledSelector {
    text: String,
    list: SelectorList,
}

impl CompiledSelector {
    pub fn parse(text: &str) -> SelectorResult<Self> {
        Ok(Self {
            text: text.to_string(),
            list: parse_selector_list(text)?,
        })
    }

    pub fn list(&self) -> &SelectorList {
        &self.list
    }
}

impl Matcher for CompiledSelector {
    fn matches(&self, tree: &DomTree, node: NodeId) -> bool {
        list_matches(tree, node, &self.list)
    }

    fn selector_text(&self) -> &str {
        &self.text
    }
}

fn list_matches(tree: &DomTree, node: NodeId, list: &SelectorList) -> bool {
    list.0
        .iter()
        .any(|complex| complex_matches(tree, node, complex, 0))
}

/// Match `complex.compounds[index..]` with `node` as the element for
/// `compounds[index]`.
fn complex_matches(tree: &DomTree, node: NodeId, complex: &ComplexSelector, index: usize) -> bool {
    let Some(compound) = complex.compounds.get(index) else {
        return false;
    };
    if !compound_matches(tree, node, compound) {
        return false;
    }
    let Some(&combinator) = complex.combinators.get(index) else {
        return true;
    };

    let next = index + 1;
    match combinator {
        Combinator::Child => tree
            .parent(node)
            .filter(|&parent| tree.is_element(parent))
            .is_some_and(|parent| complex_matches(tree, parent, complex, next)),
        Combinator::Descendant => {
            let mut ancestor = tree.parent_element(node);
            while let Some(current) = ancestor {
                if complex_matches(tree, current, complex, next) {
                    return true;
                }
                ancestor = tree.parent_element(current);
            }
            false
        }
        Combinator::NextSibling => tree
            .previous_element_sibling(node)
            .is_some_and(|sibling| complex_matches(tree, sibling, complex, next)),
        Combinator::SubsequentSibling => tree
            .previous_element_siblings(node)
            .iter()
            .any(|sibling| complex_matches(tree, sibling, complex, next)),
    }
}

fn compound_matches(tree: &DomTree, node: NodeId, compound: &CompoundSelector) -> bool {
    let Some(element) = tree.get(node).and_then(|n| n.as_element()) else {
        return false;
    };
    compound
        .components
        .iter()
        .all(|component| component_matches(tree, node, element, component))
}

fn component_matches(
    tree: &DomTree,
    node: NodeId,
    element: &ElementData,
    component: &SelectorComponent,
) -> bool {
    match component {
        SelectorComponent::Universal => true,
        SelectorComponent::Type(name) => element.name.eq_ignore_ascii_case(name),
        SelectorComponent::Id(id) => element.attrs.get("id") == Some(id.as_str()),
        SelectorComponent::Class(class) => element.attrs.has_class(class),
        SelectorComponent::Attribute(selector) => attribute_matches(element, selector),
        SelectorComponent::PseudoClass(pseudo) => pseudo_matches(tree, node, element, pseudo),
    }
}

fn attribute_matches(element: &ElementData, selector: &AttributeSelector) -> bool {
    let value = element
        .attrs
        .iter()
        .find(|attr| attr.key.eq_ignore_ascii_case(&selector.name))
        .map(|attr| attr.value.as_str());
    selector.matches(value)
}

fn pseudo_matches(
    tree: &DomTree,
    node: NodeId,
    element: &ElementData,
    pseudo: &PseudoClass,
) -> bool {
    let of_type = Some(element.name.as_str());
    match pseudo {
        PseudoClass::Root => tree.parent(node).is_some_and(|p| tree.is_document(p)),
        PseudoClass::Empty => tree.children_of(node).all(|child| {
            tree.get(child)
                .is_some_and(|c| !c.is_element() && c.as_text().is_none_or(str::is_empty))
        }),
        PseudoClass::FirstChild => nth_child(tree, node, None, false, NthExpression::index(1)),
        PseudoClass::LastChild => nth_child(tree, node, None, true, NthExpression::index(1)),
        PseudoClass::OnlyChild => {
            nth_child(tree, node, None, false, NthExpression::index(1))
                && nth_child(tree, node, None, true, NthExpression::index(1))
        }
        PseudoClass::FirstOfType => nth_child(tree, node, of_type, false, NthExpression::index(1)),
        PseudoClass::LastOfType => nth_child(tree, node, of_type, true, NthExpression::index(1)),
        PseudoClass::OnlyOfType => {
            nth_child(tree, node, of_type, false, NthExpression::index(1))
                && nth_child(tree, node, of_type, true, NthExpression::index(1))
        }
        PseudoClass::NthChild(nth) => nth_child(tree, node, None, false, *nth),
        PseudoClass::NthLastChild(nth) => nth_child(tree, node, None, true, *nth),
        PseudoClass::NthOfType(nth) => nth_child(tree, node, of_type, false, *nth),
        PseudoClass::NthLastOfType(nth) => nth_child(tree, node, of_type, true, *nth),
        PseudoClass::Checked => match element.name.as_str() {
            "input" => {
                element.attrs.has("checked")
                    && element.attrs.get("type").is_some_and(|t| {
                        t.eq_ignore_ascii_case("checkbox") || t.eq_ignore_ascii_case("radio")
                    })
            }
            "option" => element.attrs.has("selected"),
            _ => false,
        },
        PseudoClass::Disabled => is_form_control(element) && element.attrs.has("disabled"),
        PseudoClass::Enabled => is_form_control(element) && !element.attrs.has("disabled"),
        PseudoClass::Not(list) => !list_matches(tree, node, list),
    }
}

/// 1-based position among element siblings (optionally of the same type),
/// counted from the end when `from_end`. Detached nodes have no position.
fn nth_child(
    tree: &DomTree,
    node: NodeId,
    of_type: Option<&str>,
    from_end: bool,
    nth: NthExpression,
) -> bool {
    if tree.parent(node).is_none() {
        return false;
    }
    let siblings = if from_end {
        tree.next_element_siblings(node)
    } else {
        tree.previous_element_siblings(node)
    };
    let before = siblings
        .iter()
        .filter(|&sibling| match of_type {
            Some(name) => tree
                .get(sibling)
                .and_then(|n| n.as_element())
                .is_some_and(|e| e.name == name),
            None => true,
        })
        .count();
    i32::try_from(before + 1).is_ok_and(|position| nth.matches(position))
}

fn is_form_control(element: &ElementData) -> bool {
    matches!(
        element.name.as_str(),
        "button" | "input" | "select" | "textarea" | "optgroup" | "option" | "fieldset"
    )
}
