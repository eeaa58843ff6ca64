//! Pattern text to [`MatchPattern`].
//!
//! ```text
//! line := indent kind (property[:param]:value)*
//! ```
//!
//! One node per line. Nesting depth is the number of leading spaces past
//! the root line's indentation, so a child is indented exactly one space
//! more than its parent. Open nodes are kept on a stack; a node is attached
//! to its parent when it is popped, so no partially built tree escapes a
//! failed compile.

use std::str::FromStr;

use tracing::debug;

use crate::error::PatternError;
use crate::node::{MatchNode, MatchNodeKind, Rule};
use crate::property::MatchProperty;

/// A compiled, immutable pattern tree.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct MatchPattern {
    root: MatchNode,
}

impl MatchPattern {
    /// Compile pattern text.
    pub fn compile(text: &str) -> Result<Self, PatternError> {
        let mut open: Vec<MatchNode> = Vec::new();
        let mut root_indent = None;
        let mut root = None;

        for (index, line) in text.lines().enumerate() {
            let line_no = index + 1;
            if line.trim().is_empty() {
                continue;
            }

            let indent = leading_spaces(line);
            if line[indent..].starts_with('\t') {
                return Err(PatternError::TabIndent { line: line_no });
            }

            let depth = match root_indent {
                None => {
                    root_indent = Some(indent);
                    0
                }
                Some(base) if indent <= base => {
                    return Err(PatternError::MultipleRoots { line: line_no });
                }
                Some(base) => indent - base,
            };
            // The previous node sits at depth `open.len() - 1`.
            if depth > open.len() {
                return Err(PatternError::IndentTooDeep { line: line_no });
            }
            while open.len() > depth {
                close_top(&mut open, &mut root);
            }

            open.push(parse_line(&line[indent..], line_no)?);
        }

        while !open.is_empty() {
            close_top(&mut open, &mut root);
        }

        let root = root.ok_or(PatternError::Empty)?;
        debug!(nodes = root.subtree_len(), "compiled match pattern");
        Ok(MatchPattern { root })
    }

    pub fn root(&self) -> &MatchNode {
        &self.root
    }

    pub fn node_count(&self) -> usize {
        self.root.subtree_len()
    }
}

impl FromStr for MatchPattern {
    type Err = PatternError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        MatchPattern::compile(text)
    }
}

/// Pop the innermost open node into its parent, or into `root` when it has
/// none.
fn close_top(open: &mut Vec<MatchNode>, root: &mut Option<MatchNode>) {
    if let Some(node) = open.pop() {
        match open.last_mut() {
            Some(parent) => parent.push_child(node),
            None => *root = Some(node),
        }
    }
}

fn leading_spaces(line: &str) -> usize {
    line.bytes().take_while(|&b| b == b' ').count()
}

fn parse_line(content: &str, line: usize) -> Result<MatchNode, PatternError> {
    let mut tokens = content.split_whitespace();
    // `content` is non-blank, so there is always a first token.
    let kind = MatchNodeKind::from_token(tokens.next().unwrap_or_default());
    let rules = tokens
        .map(|token| parse_rule(kind, token, line))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(MatchNode::new(kind, rules))
}

fn parse_rule(kind: MatchNodeKind, token: &str, line: usize) -> Result<Rule, PatternError> {
    let fields: Vec<&str> = token.split(':').collect();
    let (name, parameter, value) = match fields[..] {
        [name, value] => (name, None, value),
        [name, parameter, value] => (name, Some(parameter), value),
        _ => return Err(malformed(token, line)),
    };
    if name.is_empty() || value.is_empty() || parameter.is_some_and(str::is_empty) {
        return Err(malformed(token, line));
    }

    let property =
        MatchProperty::lookup(kind, name).ok_or_else(|| PatternError::UnknownProperty {
            line,
            kind,
            name: name.to_owned(),
        })?;
    let parameter = match parameter {
        Some(text) => text
            .parse::<u32>()
            .map_err(|_| PatternError::InvalidParameter {
                line,
                parameter: text.to_owned(),
            })?,
        None => 0,
    };
    let value = property
        .parse_value(value)
        .ok_or_else(|| PatternError::InvalidValue {
            line,
            property,
            value: value.to_owned(),
        })?;

    Ok(Rule {
        property,
        parameter,
        value,
    })
}

#[cold]
fn malformed(token: &str, line: usize) -> PatternError {
    PatternError::MalformedRule {
        line,
        token: token.to_owned(),
    }
}
