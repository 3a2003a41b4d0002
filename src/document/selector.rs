//! Child-combinator selectors.
//!
//! Rules address elements by an exact path from the document root, e.g.
//! `html > head > meta[name="viewport"]`. Only the child combinator and a
//! single attribute filter per step are supported; that is all the rule table
//! needs.

use super::Element;
use std::fmt;

/// Attribute constraint on one selector step
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttrFilter {
    /// `[name]`
    Present(&'static str),
    /// `[name="value"]`, value compared ignoring ASCII case
    Equals(&'static str, &'static str),
}

/// One `tag[filter]` step
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    tag: &'static str,
    filter: Option<AttrFilter>,
}

impl Step {
    pub fn tag(&self) -> &'static str {
        self.tag
    }

    /// Whether an element satisfies this step
    pub fn matches(&self, element: &Element) -> bool {
        if element.name() != self.tag {
            return false;
        }
        match &self.filter {
            None => true,
            Some(AttrFilter::Present(name)) => element.has_attr(name),
            Some(AttrFilter::Equals(name, value)) => element
                .attr(name)
                .map(|v| v.eq_ignore_ascii_case(value))
                .unwrap_or(false),
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tag)?;
        match &self.filter {
            None => Ok(()),
            Some(AttrFilter::Present(name)) => write!(f, "[{}]", name),
            Some(AttrFilter::Equals(name, value)) => write!(f, "[{}=\"{}\"]", name, value),
        }
    }
}

/// Path of steps from the document root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    steps: Vec<Step>,
}

impl Selector {
    /// Start at a top-level element
    pub fn root(tag: &'static str) -> Self {
        Selector {
            steps: vec![Step { tag, filter: None }],
        }
    }

    /// Descend to a direct child
    pub fn child(mut self, tag: &'static str) -> Self {
        self.steps.push(Step { tag, filter: None });
        self
    }

    /// Require an attribute on the last step
    pub fn with_attr(self, name: &'static str) -> Self {
        self.filter_last(AttrFilter::Present(name))
    }

    /// Require an attribute value on the last step
    pub fn with_attr_value(self, name: &'static str, value: &'static str) -> Self {
        self.filter_last(AttrFilter::Equals(name, value))
    }

    fn filter_last(mut self, filter: AttrFilter) -> Self {
        if let Some(last) = self.steps.last_mut() {
            last.filter = Some(filter);
        }
        self
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Tag name of the final step
    pub fn target(&self) -> &'static str {
        self.steps.last().map(|s| s.tag).unwrap_or("")
    }

    /// Selector for the parent of the final step
    pub fn parent(&self) -> Option<Selector> {
        if self.steps.len() < 2 {
            return None;
        }
        Some(Selector {
            steps: self.steps[..self.steps.len() - 1].to_vec(),
        })
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, step) in self.steps.iter().enumerate() {
            if i > 0 {
                write!(f, " > ")?;
            }
            write!(f, "{}", step)?;
        }
        Ok(())
    }
}
