//! End-to-end decoding and matching through the public API.

#![allow(
    clippy::unwrap_used,
    reason = "tests use unwrap to panic on unexpected state"
)]

use std::sync::Arc;

use jdec::classfile::{
    decode_element_value, decode_type_annotation, ByteReader, Constant, ElementPair,
    LocalVarRange, PrimitiveKind, TargetInfo, TargetType, VarType,
};
use jdec::matching::{ExprType, MatchNode, MatchNodeKind, MatchProperty, MatchValue};
use jdec::{
    parse_annotations_attribute, parse_type_annotations_attribute, AnnotationNode,
    AnnotationValue, ConstantPool, DecodeError, MatchEngine, MatchPattern, Matchable,
    VariableBindings,
};
use pretty_assertions::assert_eq;

// === Decoding ===

#[test]
fn foo_with_integer_value() {
    let mut pool = ConstantPool::new();
    let foo = pool.push_str("Foo");
    let value = pool.push_str("value");
    let one = pool.push(Constant::Integer(1));

    let mut body = vec![0x00, 0x01];
    body.extend(foo.to_be_bytes());
    body.extend([0x00, 0x01]);
    body.extend(value.to_be_bytes());
    body.push(b'I');
    body.extend(one.to_be_bytes());

    assert_eq!(
        parse_annotations_attribute(&body, &pool),
        Ok(vec![AnnotationNode {
            type_name: "Foo".to_owned(),
            pairs: vec![ElementPair {
                name: "value".to_owned(),
                value: AnnotationValue::Primitive {
                    kind: PrimitiveKind::Int,
                    value: Constant::Integer(1),
                },
            }],
        }])
    );
}

#[test]
fn empty_array_is_object_array() {
    let bytes = [b'[', 0x00, 0x00];
    let value = decode_element_value(&mut ByteReader::new(&bytes), &ConstantPool::new());
    assert_eq!(
        value,
        Ok(AnnotationValue::Array {
            array_type: VarType::object_array(),
            elements: Vec::new(),
        })
    );
}

#[test]
fn local_variable_target_consumes_exact_table() {
    let mut pool = ConstantPool::new();
    let ty = pool.push_str("La/NonNull;");

    let mut bytes = vec![TargetType::LocalVariable.tag()];
    bytes.extend([0x00, 0x02]);
    bytes.extend([0x00, 0x00, 0x00, 0x08, 0x00, 0x01]);
    bytes.extend([0x00, 0x0A, 0x00, 0x04, 0x00, 0x01]);
    bytes.push(0x00); // empty type path
    bytes.extend(ty.to_be_bytes());
    bytes.extend([0x00, 0x00]);

    let mut reader = ByteReader::new(&bytes);
    let annotation = decode_type_annotation(&mut reader, &pool).unwrap();

    assert_eq!(
        annotation.target_info,
        TargetInfo::LocalVar(vec![
            LocalVarRange {
                start_pc: 0,
                length: 8,
                index: 1,
            },
            LocalVarRange {
                start_pc: 10,
                length: 4,
                index: 1,
            },
        ])
    );
    // tag, table, path length, annotation
    assert_eq!(reader.position(), 1 + (2 + 2 * 3 * 2) + 1 + 4);
    assert!(annotation.is_top_level());
    assert_eq!(annotation.annotation.type_name, "a/NonNull");
}

#[test]
fn unknown_element_tag_stops_after_tag() {
    let bytes = [0x00, 0xAA, 0xBB];
    let mut reader = ByteReader::new(&bytes);

    let result = decode_element_value(&mut reader, &ConstantPool::new());
    assert_eq!(result, Err(DecodeError::InvalidElementTag { tag: 0x00 }));
    assert_eq!(reader.position(), 1);
}

#[test]
fn leftover_attribute_bytes_are_rejected() {
    let body = [0x00, 0x00, 0xFF];
    assert_eq!(
        parse_type_annotations_attribute(&body, &ConstantPool::new()),
        Err(DecodeError::TrailingBytes {
            offset: 2,
            remaining: 1,
        })
    );
}

// === Matching ===

/// Minimal statement/expression tree: expressions carry a type and an
/// optional variable index.
struct Node {
    kind: MatchNodeKind,
    expr_type: Option<ExprType>,
    var_index: Option<u32>,
    children: Vec<Node>,
}

impl Node {
    fn statement(children: Vec<Node>) -> Self {
        Node {
            kind: MatchNodeKind::Statement,
            expr_type: None,
            var_index: None,
            children,
        }
    }

    fn expression(expr_type: ExprType, children: Vec<Node>) -> Self {
        Node {
            kind: MatchNodeKind::Expression,
            expr_type: Some(expr_type),
            var_index: None,
            children,
        }
    }

    fn var(index: u32) -> Self {
        Node {
            var_index: Some(index),
            ..Node::expression(ExprType::Var, Vec::new())
        }
    }
}

impl Matchable<u32> for Node {
    fn satisfies(&self, node: &MatchNode, bindings: &mut VariableBindings<u32>) -> bool {
        node.kind() == self.kind
            && node.rules().iter().all(|rule| match (rule.property, &rule.value) {
                (MatchProperty::ExprType, MatchValue::ExprType(ty)) => {
                    self.expr_type == Some(*ty)
                }
                (MatchProperty::VarIndex, MatchValue::Variable(name)) => self
                    .var_index
                    .is_some_and(|index| bindings.check_and_set(name, index)),
                _ => false,
            })
    }

    fn child_at(&self, node: &MatchNode, index: usize) -> Option<&dyn Matchable<u32>> {
        self.children
            .iter()
            .filter(|child| child.kind == node.kind())
            .nth(index)
            .map(|child| child as &dyn Matchable<u32>)
    }
}

#[test]
fn statement_needs_its_expression_child() {
    let mut engine: MatchEngine<u32> =
        MatchEngine::compile("statement\n expression type:var").unwrap();

    assert!(!engine.matches(&Node::statement(Vec::new())));
    assert!(!engine.matches(&Node::statement(vec![Node::statement(vec![])])));
    assert!(engine.matches(&Node::statement(vec![Node::var(0)])));
}

#[test]
fn shared_variable_must_agree() {
    let pattern: MatchPattern = "\
statement
 expression type:function
  expression type:var index:$v$
  expression type:var index:$v$
"
    .parse()
    .unwrap();
    let mut engine: MatchEngine<u32> = MatchEngine::new(Arc::new(pattern));
    let compare = |a, b| {
        Node::statement(vec![Node::expression(
            ExprType::Function,
            vec![Node::var(a), Node::var(b)],
        )])
    };

    assert!(engine.matches(&compare(2, 2)));
    assert_eq!(engine.variable("v"), Some(&2));
    assert!(!engine.matches(&compare(2, 5)));
}
