//! Compiled pattern nodes.

use std::fmt;

use jdec_stack::ensure_sufficient_stack;

use crate::property::{
    ConstType, ExitType, ExprType, FunctionType, IfType, MatchProperty, StatementType,
};

/// Which kind of target node a pattern node matches.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum MatchNodeKind {
    Statement,
    Expression,
}

impl MatchNodeKind {
    /// Kind named by the first token of a pattern line.
    ///
    /// Only `statement` is special; any other token denotes an expression.
    pub fn from_token(token: &str) -> Self {
        if token == "statement" {
            MatchNodeKind::Statement
        } else {
            MatchNodeKind::Expression
        }
    }
}

impl fmt::Display for MatchNodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            MatchNodeKind::Statement => "statement",
            MatchNodeKind::Expression => "expression",
        })
    }
}

/// The resolved value of a rule.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum MatchValue {
    StatementType(StatementType),
    IfType(IfType),
    ExprType(ExprType),
    FunctionType(FunctionType),
    ExitType(ExitType),
    ConstType(ConstType),
    /// `statsize` / `exprsize`.
    Size(i32),
    /// Compared verbatim against the target's rendering of the property.
    Literal(String),
    /// `$name$`: bound on first use, compared on every later use.
    Variable(String),
}

impl MatchValue {
    pub fn as_variable(&self) -> Option<&str> {
        match self {
            MatchValue::Variable(name) => Some(name),
            _ => None,
        }
    }

    pub fn as_literal(&self) -> Option<&str> {
        match self {
            MatchValue::Literal(text) => Some(text),
            _ => None,
        }
    }
}

/// One `property[:parameter]:value` constraint.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Rule {
    pub property: MatchProperty,
    /// Middle field of the three-field form, e.g. the argument position in
    /// `parameter:1:$a$`. The two-field form has parameter 0.
    pub parameter: u32,
    pub value: MatchValue,
}

/// A node of a compiled pattern.
///
/// Rules and children keep their order in the pattern text. Child order is
/// significant: the n-th statement child is matched against the target's
/// n-th statement child, and likewise for expressions.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct MatchNode {
    kind: MatchNodeKind,
    rules: Vec<Rule>,
    children: Vec<MatchNode>,
}

impl MatchNode {
    pub(crate) fn new(kind: MatchNodeKind, rules: Vec<Rule>) -> Self {
        MatchNode {
            kind,
            rules,
            children: Vec::new(),
        }
    }

    pub(crate) fn push_child(&mut self, child: MatchNode) {
        self.children.push(child);
    }

    pub fn kind(&self) -> MatchNodeKind {
        self.kind
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Rules on `property`, in declaration order.
    pub fn rules_for(&self, property: MatchProperty) -> impl Iterator<Item = &Rule> {
        self.rules.iter().filter(move |rule| rule.property == property)
    }

    /// Value of the first rule on `property`.
    pub fn rule(&self, property: MatchProperty) -> Option<&MatchValue> {
        self.rules_for(property).next().map(|rule| &rule.value)
    }

    pub fn children(&self) -> &[MatchNode] {
        &self.children
    }

    /// Number of nodes in this subtree, this one included.
    pub fn subtree_len(&self) -> usize {
        ensure_sufficient_stack(|| {
            1 + self.children.iter().map(MatchNode::subtree_len).sum::<usize>()
        })
    }
}
