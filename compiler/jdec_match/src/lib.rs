//! Declarative structural matching for the jdec decompiler.
//!
//! Idiom-recognition passes describe the statement/expression shapes they
//! rewrite as indented pattern text:
//!
//! ```text
//! statement type:if
//!  expression type:function functype:eq
//!   expression type:var index:$x$
//!   expression type:constant consttype:null
//! ```
//!
//! [`MatchPattern::compile`] turns the text into an immutable tree of
//! [`MatchNode`]s. A [`MatchEngine`] matches that tree against any target
//! implementing [`Matchable`], recording `$name$` variables in
//! [`VariableBindings`] so the pass can read them afterwards.
//!
//! # Failure Model
//!
//! Malformed pattern text is a [`PatternError`] at compile time. A target
//! that does not fit the pattern is not an error; matching returns `false`.

mod bindings;
mod compile;
mod engine;
mod error;
mod node;
mod property;

#[cfg(test)]
mod test_helpers;

pub use bindings::VariableBindings;
pub use compile::MatchPattern;
pub use engine::{MatchEngine, Matchable};
pub use error::PatternError;
pub use node::{MatchNode, MatchNodeKind, MatchValue, Rule};
pub use property::{
    ConstType, ExitType, ExprType, FunctionType, IfType, MatchProperty, StatementType,
};
