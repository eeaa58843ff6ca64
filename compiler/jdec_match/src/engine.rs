//! Structural matching of a compiled pattern against a target tree.
//!
//! Matching is depth-first and never backtracks. At each pattern node the
//! target decides whether it satisfies the node's rules (binding or checking
//! variables as it goes). Then each pattern child is matched against the
//! target child at the same per-kind position: the n-th statement child of
//! the pattern goes to the target's n-th statement child, and expression
//! children count separately. The first failure fails the whole match.

use std::sync::Arc;

use jdec_stack::ensure_sufficient_stack;
use tracing::trace;

use crate::bindings::VariableBindings;
use crate::compile::MatchPattern;
use crate::error::PatternError;
use crate::node::{MatchNode, MatchNodeKind};

/// A target tree node the engine can match against.
///
/// Implemented by the statement and expression trees of the caller; `V` is
/// the type of value their variables bind.
pub trait Matchable<V> {
    /// Whether this node satisfies every rule of `node`.
    ///
    /// Variable-valued rules go through
    /// [`VariableBindings::check_and_set`]; a conflicting binding means the
    /// node does not satisfy the pattern.
    fn satisfies(&self, node: &MatchNode, bindings: &mut VariableBindings<V>) -> bool;

    /// This node's `index`-th child of the kind `node` matches, if any.
    fn child_at(&self, node: &MatchNode, index: usize) -> Option<&dyn Matchable<V>>;
}

/// A pattern plus the bindings of its most recent match.
///
/// The pattern is shared; the bindings are not, so each thread matching
/// the same pattern needs its own engine.
#[derive(Debug)]
pub struct MatchEngine<V> {
    pattern: Arc<MatchPattern>,
    bindings: VariableBindings<V>,
}

impl<V: PartialEq> MatchEngine<V> {
    pub fn new(pattern: Arc<MatchPattern>) -> Self {
        MatchEngine {
            pattern,
            bindings: VariableBindings::new(),
        }
    }

    /// Compile `text` into a fresh engine.
    pub fn compile(text: &str) -> Result<Self, PatternError> {
        MatchPattern::compile(text).map(|pattern| Self::new(Arc::new(pattern)))
    }

    pub fn pattern(&self) -> &Arc<MatchPattern> {
        &self.pattern
    }

    /// Match the pattern against `target`.
    ///
    /// Bindings from the previous call are discarded first. After a
    /// successful match they hold every variable the pattern bound.
    #[tracing::instrument(level = "trace", skip_all)]
    pub fn matches(&mut self, target: &dyn Matchable<V>) -> bool {
        self.bindings.clear();
        let matched = match_node(self.pattern.root(), target, &mut self.bindings);
        trace!(matched, bound = self.bindings.len(), "match finished");
        matched
    }

    /// Value bound to `name` by the last match.
    pub fn variable(&self, name: &str) -> Option<&V> {
        self.bindings.get(name)
    }

    pub fn bindings(&self) -> &VariableBindings<V> {
        &self.bindings
    }
}

fn match_node<V: PartialEq>(
    node: &MatchNode,
    target: &dyn Matchable<V>,
    bindings: &mut VariableBindings<V>,
) -> bool {
    ensure_sufficient_stack(|| {
        if !target.satisfies(node, bindings) {
            trace!(kind = %node.kind(), "rules not satisfied");
            return false;
        }

        let mut statements = 0;
        let mut expressions = 0;
        for child in node.children() {
            let counter = match child.kind() {
                MatchNodeKind::Statement => &mut statements,
                MatchNodeKind::Expression => &mut expressions,
            };
            let index = *counter;
            *counter += 1;

            let Some(target_child) = target.child_at(child, index) else {
                trace!(kind = %child.kind(), index, "target child missing");
                return false;
            };
            if !match_node(child, target_child, bindings) {
                return false;
            }
        }
        true
    })
}
