//! Property names and value vocabularies of the pattern language.
//!
//! Both are fixed at compile time. Property names are looked up in one of
//! two tables depending on the node kind (`type` means a statement type on
//! a statement node and an expression type on an expression node). Values
//! of properties with a closed vocabulary are resolved to enums here, so a
//! typo in a pattern fails compilation instead of silently never matching.

use std::fmt;

use crate::node::{MatchNodeKind, MatchValue};

/// Define a closed vocabulary enum with its pattern-text names.
///
/// Each generated type has:
/// - `NAMES`, the name table in declaration order
/// - `from_name()` and `name()` for lookup in both directions
/// - `Display` showing the pattern-text name
macro_rules! vocabulary {
    ($($(#[$meta:meta])* $name:ident { $($variant:ident => $text:literal),+ $(,)? })*) => { $(
        $(#[$meta])*
        #[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub const NAMES: &[(&str, $name)] = &[$(($text, $name::$variant)),+];

            pub fn from_name(name: &str) -> Option<Self> {
                Self::NAMES
                    .iter()
                    .find(|(text, _)| *text == name)
                    .map(|&(_, value)| value)
            }

            pub fn name(self) -> &'static str {
                match self {
                    $($name::$variant => $text),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.name())
            }
        }
    )* };
}

vocabulary! {
    /// Statement kinds a pattern can name.
    StatementType {
        If => "if",
        Do => "do",
        Switch => "switch",
        TryCatch => "trycatch",
        BasicBlock => "basicblock",
        Sequence => "sequence",
    }

    /// Shape of an `if` statement.
    IfType {
        If => "if",
        IfElse => "ifelse",
    }

    /// Expression kinds a pattern can name.
    ExprType {
        Array => "array",
        Assignment => "assignment",
        Constant => "constant",
        Exit => "exit",
        Field => "field",
        Function => "function",
        If => "if",
        Invocation => "invocation",
        Monitor => "monitor",
        New => "new",
        Switch => "switch",
        Var => "var",
        Annotation => "annotation",
        Assert => "assert",
    }

    /// Operator of a function expression.
    FunctionType {
        Eq => "eq",
    }

    /// Kind of an exit expression.
    ExitType {
        Return => "return",
        Throw => "throw",
    }

    /// Type of a constant expression.
    ConstType {
        Null => "null",
        String => "string",
    }
}

/// A property a rule can constrain.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum MatchProperty {
    // Statement properties
    StatementType,
    StatementRet,
    StatementPosition,
    StatementStatSize,
    StatementExprSize,
    StatementIfType,

    // Expression properties
    ExprType,
    ExprRet,
    ExprPosition,
    ExprFuncType,
    ExprExitType,
    ExprConstType,
    ExprConstValue,
    InvocationClass,
    InvocationSignature,
    InvocationParameter,
    VarIndex,
    FieldName,
}

static STATEMENT_PROPERTIES: [(&str, MatchProperty); 6] = [
    ("type", MatchProperty::StatementType),
    ("ret", MatchProperty::StatementRet),
    ("position", MatchProperty::StatementPosition),
    ("statsize", MatchProperty::StatementStatSize),
    ("exprsize", MatchProperty::StatementExprSize),
    ("iftype", MatchProperty::StatementIfType),
];

static EXPRESSION_PROPERTIES: [(&str, MatchProperty); 12] = [
    ("type", MatchProperty::ExprType),
    ("ret", MatchProperty::ExprRet),
    ("position", MatchProperty::ExprPosition),
    ("functype", MatchProperty::ExprFuncType),
    ("exittype", MatchProperty::ExprExitType),
    ("consttype", MatchProperty::ExprConstType),
    ("constvalue", MatchProperty::ExprConstValue),
    ("invclass", MatchProperty::InvocationClass),
    ("signature", MatchProperty::InvocationSignature),
    ("parameter", MatchProperty::InvocationParameter),
    ("index", MatchProperty::VarIndex),
    ("name", MatchProperty::FieldName),
];

impl MatchProperty {
    /// Resolve a property name in the table for `kind`.
    pub fn lookup(kind: MatchNodeKind, name: &str) -> Option<Self> {
        Self::table(kind)
            .iter()
            .find(|(text, _)| *text == name)
            .map(|&(_, property)| property)
    }

    /// The pattern-text name of this property.
    pub fn name(self) -> &'static str {
        Self::table(self.node_kind())
            .iter()
            .find(|&&(_, property)| property == self)
            .map_or("?", |&(text, _)| text)
    }

    /// The node kind whose rules may use this property.
    pub fn node_kind(self) -> MatchNodeKind {
        match self {
            MatchProperty::StatementType
            | MatchProperty::StatementRet
            | MatchProperty::StatementPosition
            | MatchProperty::StatementStatSize
            | MatchProperty::StatementExprSize
            | MatchProperty::StatementIfType => MatchNodeKind::Statement,
            _ => MatchNodeKind::Expression,
        }
    }

    /// Resolve the value text of a rule on this property.
    ///
    /// Vocabulary properties map through their name table and sizes parse as
    /// integers; `None` means the text is not a valid value. Every other
    /// property keeps the text, as a variable reference when it has the form
    /// `$name$` and as a literal otherwise.
    pub fn parse_value(self, text: &str) -> Option<MatchValue> {
        match self {
            MatchProperty::StatementType => {
                StatementType::from_name(text).map(MatchValue::StatementType)
            }
            MatchProperty::StatementIfType => IfType::from_name(text).map(MatchValue::IfType),
            MatchProperty::ExprType => ExprType::from_name(text).map(MatchValue::ExprType),
            MatchProperty::ExprFuncType => {
                FunctionType::from_name(text).map(MatchValue::FunctionType)
            }
            MatchProperty::ExprExitType => ExitType::from_name(text).map(MatchValue::ExitType),
            MatchProperty::ExprConstType => ConstType::from_name(text).map(MatchValue::ConstType),
            MatchProperty::StatementStatSize | MatchProperty::StatementExprSize => {
                text.parse().ok().map(MatchValue::Size)
            }
            MatchProperty::StatementRet
            | MatchProperty::StatementPosition
            | MatchProperty::ExprRet
            | MatchProperty::ExprPosition
            | MatchProperty::ExprConstValue
            | MatchProperty::InvocationClass
            | MatchProperty::InvocationSignature
            | MatchProperty::InvocationParameter
            | MatchProperty::VarIndex
            | MatchProperty::FieldName => Some(match variable_name(text) {
                Some(name) => MatchValue::Variable(name.to_owned()),
                None => MatchValue::Literal(text.to_owned()),
            }),
        }
    }

    fn table(kind: MatchNodeKind) -> &'static [(&'static str, MatchProperty)] {
        match kind {
            MatchNodeKind::Statement => &STATEMENT_PROPERTIES,
            MatchNodeKind::Expression => &EXPRESSION_PROPERTIES,
        }
    }
}

impl fmt::Display for MatchProperty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The name inside a `$name$` variable reference.
fn variable_name(text: &str) -> Option<&str> {
    text.strip_prefix('$')?
        .strip_suffix('$')
        .filter(|name| !name.is_empty())
}
