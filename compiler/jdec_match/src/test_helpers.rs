//! A small statement/expression tree for exercising the engine.

use crate::bindings::VariableBindings;
use crate::engine::Matchable;
use crate::node::{MatchNode, MatchNodeKind, MatchValue};
use crate::property::{
    ConstType, ExitType, ExprType, FunctionType, MatchProperty, StatementType,
};

/// What the toy tree binds to variables.
#[derive(Clone, Debug, PartialEq)]
pub enum Bound {
    Text(String),
    Node(Expr),
}

#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    Var(u32),
    Field(String),
    /// `None` is the null constant.
    Const(Option<String>),
    Exit(ExitType, Option<Box<Expr>>),
    Invoke { class: String, args: Vec<Expr> },
    Eq(Box<Expr>, Box<Expr>),
}

impl Expr {
    pub fn equals(lhs: Expr, rhs: Expr) -> Self {
        Expr::Eq(Box::new(lhs), Box::new(rhs))
    }

    pub fn ret(value: Expr) -> Self {
        Expr::Exit(ExitType::Return, Some(Box::new(value)))
    }

    fn expr_type(&self) -> ExprType {
        match self {
            Expr::Var(_) => ExprType::Var,
            Expr::Field(_) => ExprType::Field,
            Expr::Const(_) => ExprType::Constant,
            Expr::Exit(..) => ExprType::Exit,
            Expr::Invoke { .. } => ExprType::Invocation,
            Expr::Eq(..) => ExprType::Function,
        }
    }

    fn operands(&self) -> Vec<&Expr> {
        match self {
            Expr::Exit(_, Some(value)) => vec![value.as_ref()],
            Expr::Invoke { args, .. } => args.iter().collect(),
            Expr::Eq(lhs, rhs) => vec![lhs.as_ref(), rhs.as_ref()],
            _ => Vec::new(),
        }
    }

    fn satisfies_rule(
        &self,
        property: MatchProperty,
        parameter: u32,
        value: &MatchValue,
        bindings: &mut VariableBindings<Bound>,
    ) -> bool {
        match (property, self) {
            (MatchProperty::ExprType, _) => *value == MatchValue::ExprType(self.expr_type()),
            (MatchProperty::ExprExitType, Expr::Exit(kind, _)) => {
                *value == MatchValue::ExitType(*kind)
            }
            (MatchProperty::ExprFuncType, Expr::Eq(..)) => {
                *value == MatchValue::FunctionType(FunctionType::Eq)
            }
            (MatchProperty::ExprConstType, Expr::Const(text)) => {
                let kind = if text.is_some() {
                    ConstType::String
                } else {
                    ConstType::Null
                };
                *value == MatchValue::ConstType(kind)
            }
            (MatchProperty::ExprConstValue, Expr::Const(Some(text)))
            | (MatchProperty::FieldName, Expr::Field(text))
            | (MatchProperty::InvocationClass, Expr::Invoke { class: text, .. }) => {
                text_rule(value, text, bindings)
            }
            (MatchProperty::VarIndex, Expr::Var(index)) => {
                text_rule(value, &index.to_string(), bindings)
            }
            (MatchProperty::InvocationParameter, Expr::Invoke { args, .. }) => {
                let arg = usize::try_from(parameter).ok().and_then(|p| args.get(p));
                match (arg, value.as_variable()) {
                    (Some(arg), Some(name)) => {
                        bindings.check_and_set(name, Bound::Node(arg.clone()))
                    }
                    _ => false,
                }
            }
            _ => false,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Stmt {
    pub kind: StatementType,
    pub exprs: Vec<Expr>,
    pub stats: Vec<Stmt>,
}

impl Stmt {
    pub fn new(kind: StatementType, exprs: Vec<Expr>, stats: Vec<Stmt>) -> Self {
        Stmt { kind, exprs, stats }
    }
}

fn text_rule(value: &MatchValue, actual: &str, bindings: &mut VariableBindings<Bound>) -> bool {
    match value {
        MatchValue::Literal(text) => text == actual,
        MatchValue::Variable(name) => {
            bindings.check_and_set(name, Bound::Text(actual.to_owned()))
        }
        _ => false,
    }
}

fn size_rule(value: &MatchValue, actual: usize) -> bool {
    matches!(value, MatchValue::Size(n) if usize::try_from(*n).ok() == Some(actual))
}

impl Matchable<Bound> for Stmt {
    fn satisfies(&self, node: &MatchNode, _bindings: &mut VariableBindings<Bound>) -> bool {
        if node.kind() != MatchNodeKind::Statement {
            return false;
        }
        node.rules().iter().all(|rule| match rule.property {
            MatchProperty::StatementType => rule.value == MatchValue::StatementType(self.kind),
            MatchProperty::StatementStatSize => size_rule(&rule.value, self.stats.len()),
            MatchProperty::StatementExprSize => size_rule(&rule.value, self.exprs.len()),
            _ => false,
        })
    }

    fn child_at(&self, node: &MatchNode, index: usize) -> Option<&dyn Matchable<Bound>> {
        match node.kind() {
            MatchNodeKind::Statement => self.stats.get(index).map(|s| s as &dyn Matchable<Bound>),
            MatchNodeKind::Expression => self.exprs.get(index).map(|e| e as &dyn Matchable<Bound>),
        }
    }
}

impl Matchable<Bound> for Expr {
    fn satisfies(&self, node: &MatchNode, bindings: &mut VariableBindings<Bound>) -> bool {
        node.kind() == MatchNodeKind::Expression
            && node.rules().iter().all(|rule| {
                self.satisfies_rule(rule.property, rule.parameter, &rule.value, bindings)
            })
    }

    fn child_at(&self, node: &MatchNode, index: usize) -> Option<&dyn Matchable<Bound>> {
        if node.kind() != MatchNodeKind::Expression {
            return None;
        }
        let operand = self.operands().get(index).copied()?;
        Some(operand as &dyn Matchable<Bound>)
    }
}
