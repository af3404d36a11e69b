//! Shared helpers for the integration tests.

#![allow(dead_code, clippy::unwrap_used, clippy::expect_used)]

use std::io::Write;
use std::process::{Command, Stdio};

use rustc_hash::FxHashMap;
use shroud_ir::{BigInt, BinaryOp, Constant, Expr, ExprKind, StmtKind, UnaryOp};

/// Run `source` under a local `python3`, returning its stdout, or `None`
/// when no interpreter is available.
pub fn run_python(source: &str) -> Option<String> {
    let mut child = Command::new("python3")
        .arg("-")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .ok()?;
    child
        .stdin
        .take()
        .expect("stdin is piped")
        .write_all(source.as_bytes())
        .expect("write program");
    let output = child.wait_with_output().expect("python3 runs");
    assert!(
        output.status.success(),
        "python3 failed:\n{}\n--- program ---\n{source}",
        String::from_utf8_lossy(&output.stderr)
    );
    Some(String::from_utf8(output.stdout).expect("utf-8 stdout"))
}

/// Assert that the original and obfuscated programs print the same thing,
/// when `python3` is present.
pub fn assert_same_output(original: &str, obfuscated: &str) {
    let Some(expected) = run_python(original) else {
        return;
    };
    let actual = run_python(obfuscated).expect("python3 present for the second run");
    assert_eq!(expected, actual, "--- obfuscated ---\n{obfuscated}");
}

/// Values of the numeric subset the encoders produce.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Int(BigInt),
    Float(f64),
    Str(String),
    Seq(usize),
}

impl Value {
    fn truthy(&self) -> bool {
        match self {
            Value::Int(n) => *n != BigInt::from(0),
            Value::Float(x) => *x != 0.0,
            Value::Str(s) => !s.is_empty(),
            Value::Seq(len) => *len > 0,
        }
    }

    fn int(self) -> BigInt {
        match self {
            Value::Int(n) => n,
            other => panic!("not an int: {other:?}"),
        }
    }
}

/// Executes straight-line assignments of obfuscated numeric programs.
#[derive(Default)]
pub struct Evaluator {
    pub env: FxHashMap<String, Value>,
}

impl Evaluator {
    /// Run every top-level `name = expr` statement of `source`.
    pub fn exec(source: &str) -> Self {
        let module = shroud_parse::parse(source).unwrap();
        let mut eval = Evaluator::default();
        for stmt in &module.body {
            let StmtKind::Assign { targets, value } = &stmt.kind else {
                panic!("unexpected statement {stmt:?}");
            };
            let name = targets[0].as_name().expect("name target").to_string();
            let value = eval.eval(value);
            eval.env.insert(name, value);
        }
        eval
    }

    pub fn get(&self, name: &str) -> &Value {
        &self.env[name]
    }

    pub fn eval(&self, expr: &Expr) -> Value {
        match &expr.kind {
            ExprKind::Name { id, .. } => self.env[id].clone(),
            ExprKind::Constant(Constant::Int(n)) => Value::Int(n.clone()),
            ExprKind::Constant(Constant::Float(x)) => Value::Float(*x),
            ExprKind::Constant(Constant::Str(s)) => Value::Str(s.clone()),
            ExprKind::Constant(Constant::Bool(b)) => Value::Int(BigInt::from(u8::from(*b))),
            ExprKind::Tuple { elts, .. } | ExprKind::List { elts, .. } => Value::Seq(elts.len()),
            ExprKind::UnaryOp { op, operand } => {
                let value = self.eval(operand);
                match (op, value) {
                    (UnaryOp::Not, value) => Value::Int(BigInt::from(u8::from(!value.truthy()))),
                    (UnaryOp::Invert, value) => Value::Int(-value.int() - 1),
                    (UnaryOp::USub, Value::Float(x)) => Value::Float(-x),
                    (UnaryOp::USub, value) => Value::Int(-value.int()),
                    (UnaryOp::UAdd, value) => value,
                }
            }
            ExprKind::BinOp { left, op, right } => {
                let left = self.eval(left).int();
                let right = self.eval(right).int();
                Value::Int(match op {
                    BinaryOp::Add => left + right,
                    BinaryOp::Mul => left * right,
                    BinaryOp::LShift => left << usize::try_from(&right).unwrap(),
                    other => panic!("unexpected operator {other:?}"),
                })
            }
            ExprKind::Call { func, args, .. } if func.as_name() == Some("float") => {
                match self.eval(&args[0]) {
                    Value::Str(text) => Value::Float(parse_float(&text)),
                    other => panic!("float() of {other:?}"),
                }
            }
            other => panic!("unexpected expression {other:?}"),
        }
    }
}

fn parse_float(text: &str) -> f64 {
    match text {
        "inf" => f64::INFINITY,
        "-inf" => f64::NEG_INFINITY,
        _ => text.parse().unwrap(),
    }
}
