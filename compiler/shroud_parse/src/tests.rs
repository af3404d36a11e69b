#![allow(clippy::unwrap_used, clippy::expect_used)]

use super::*;
use pretty_assertions::assert_eq;
use shroud_ir::{
    BinaryOp, BoolOp, CmpOp, Constant, Conversion, Expr, ExprContext, ExprKind, FStringPart,
    PatternKind, Stmt, StmtKind, UnaryOp,
};

fn parse_ok(source: &str) -> Module {
    parse(source).unwrap_or_else(|err| panic!("parsing {source:?} failed: {err} at {}", err.span))
}

fn first_stmt(source: &str) -> Stmt {
    parse_ok(source).body.into_iter().next().expect("empty module")
}

fn expr(source: &str) -> Expr {
    match first_stmt(source).kind {
        StmtKind::Expr(expr) => expr,
        other => panic!("expected expression statement, got {other:?}"),
    }
}

fn name_of(expr: &Expr) -> &str {
    expr.as_name().unwrap_or_else(|| panic!("expected name, got {expr:?}"))
}

fn int_value(expr: &Expr) -> i64 {
    match &expr.kind {
        ExprKind::Constant(Constant::Int(value)) => i64::try_from(value).unwrap(),
        other => panic!("expected int, got {other:?}"),
    }
}

// === Statements ===

#[test]
fn chained_assignment() {
    let StmtKind::Assign { targets, value } = first_stmt("a = b = 1\n").kind else {
        panic!("expected assignment");
    };
    assert_eq!(targets.len(), 2);
    assert!(targets
        .iter()
        .all(|t| matches!(t.kind, ExprKind::Name { ctx: ExprContext::Store, .. })));
    assert_eq!(int_value(&value), 1);
}

#[test]
fn tuple_unpacking_target() {
    let StmtKind::Assign { targets, .. } = first_stmt("a, *b = xs\n").kind else {
        panic!("expected assignment");
    };
    let ExprKind::Tuple { elts, ctx } = &targets[0].kind else {
        panic!("expected tuple target");
    };
    assert_eq!(*ctx, ExprContext::Store);
    assert!(matches!(
        elts[1].kind,
        ExprKind::Starred { ctx: ExprContext::Store, .. }
    ));
}

#[test]
fn annotated_and_augmented_assignment() {
    let StmtKind::AnnAssign { simple, value, .. } = first_stmt("x: int = 3\n").kind else {
        panic!("expected annotated assignment");
    };
    assert!(simple);
    assert!(value.is_some());

    let StmtKind::AnnAssign { simple, .. } = first_stmt("(x): int\n").kind else {
        panic!("expected annotated assignment");
    };
    assert!(!simple);

    let StmtKind::AugAssign { op, .. } = first_stmt("total //= 2\n").kind else {
        panic!("expected augmented assignment");
    };
    assert_eq!(op, BinaryOp::FloorDiv);
}

#[test]
fn semicolon_separated_statements() {
    let module = parse_ok("a = 1; b = 2;\nc = 3\n");
    assert_eq!(module.body.len(), 3);
}

#[test]
fn imports() {
    let StmtKind::Import(names) = first_stmt("import os.path as p, sys\n").kind else {
        panic!("expected import");
    };
    assert_eq!(names[0].name, "os.path");
    assert_eq!(names[0].asname.as_deref(), Some("p"));
    assert_eq!(names[1].binding(), "sys");

    let StmtKind::ImportFrom {
        module,
        names,
        level,
    } = first_stmt("from ..pkg import (a as b, c,)\n").kind
    else {
        panic!("expected from-import");
    };
    assert_eq!(module.as_deref(), Some("pkg"));
    assert_eq!(level, 2);
    assert_eq!(names.len(), 2);
    assert_eq!(names[0].asname.as_deref(), Some("b"));

    let StmtKind::ImportFrom { module, level, .. } = first_stmt("from . import x\n").kind else {
        panic!("expected from-import");
    };
    assert_eq!(module, None);
    assert_eq!(level, 1);
}

#[test]
fn if_elif_else_chain() {
    let source = "if a:\n    x\nelif b:\n    y\nelse:\n    z\n";
    let StmtKind::If { orelse, .. } = first_stmt(source).kind else {
        panic!("expected if");
    };
    assert_eq!(orelse.len(), 1);
    let StmtKind::If { orelse: inner, .. } = &orelse[0].kind else {
        panic!("elif should nest as if");
    };
    assert_eq!(inner.len(), 1);
}

#[test]
fn function_definition_with_all_parameter_kinds() {
    let source = "@dec\nasync def f(a, /, b=1, *args, c, d=2, **kw) -> int:\n    return a\n";
    let StmtKind::FunctionDef(def) = first_stmt(source).kind else {
        panic!("expected def");
    };
    assert!(def.is_async);
    assert_eq!(def.name, "f");
    assert_eq!(def.decorators.len(), 1);
    assert!(def.returns.is_some());
    let names: Vec<&str> = def.args.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, ["a", "b", "args", "c", "d", "kw"]);
    assert_eq!(def.args.posonlyargs.len(), 1);
    assert_eq!(def.args.kwonlyargs.len(), 2);
}

#[test]
fn class_definition() {
    let source = "class A(Base, metaclass=Meta):\n    x = 1\n    def m(self): pass\n";
    let StmtKind::ClassDef(class) = first_stmt(source).kind else {
        panic!("expected class");
    };
    assert_eq!(class.name, "A");
    assert_eq!(class.bases.len(), 1);
    assert_eq!(class.keywords[0].arg.as_deref(), Some("metaclass"));
    assert_eq!(class.body.len(), 2);
}

#[test]
fn try_statement() {
    let source = "try:\n    a\nexcept (E, F) as e:\n    b\nexcept:\n    c\nelse:\n    d\nfinally:\n    f\n";
    let StmtKind::Try {
        handlers,
        orelse,
        finalbody,
        ..
    } = first_stmt(source).kind
    else {
        panic!("expected try");
    };
    assert_eq!(handlers.len(), 2);
    assert_eq!(handlers[0].name.as_deref(), Some("e"));
    assert!(handlers[1].type_.is_none());
    assert_eq!(orelse.len(), 1);
    assert_eq!(finalbody.len(), 1);
}

#[test]
fn with_statement_forms() {
    let StmtKind::With { items, .. } = first_stmt("with open(p) as f, lock:\n    pass\n").kind
    else {
        panic!("expected with");
    };
    assert_eq!(items.len(), 2);
    assert!(items[0].optional_vars.is_some());

    let StmtKind::With { items, .. } =
        first_stmt("with (open(a) as f,\n      open(b) as g):\n    pass\n").kind
    else {
        panic!("expected with");
    };
    assert_eq!(items.len(), 2);

    let StmtKind::With { items, .. } = first_stmt("with (a, b) as c:\n    pass\n").kind else {
        panic!("expected with");
    };
    assert_eq!(items.len(), 1);
    assert!(matches!(items[0].context_expr.kind, ExprKind::Tuple { .. }));
}

#[test]
fn for_loop_with_tuple_target() {
    let StmtKind::For { target, orelse, .. } =
        first_stmt("for i, x in enumerate(xs):\n    pass\nelse:\n    pass\n").kind
    else {
        panic!("expected for");
    };
    assert!(matches!(target.kind, ExprKind::Tuple { ctx: ExprContext::Store, .. }));
    assert_eq!(orelse.len(), 1);
}

#[test]
fn global_nonlocal_del_assert_raise() {
    let module = parse_ok("global a, b\ndel x[0], y\nassert x, 'msg'\nraise E from err\n");
    assert!(matches!(&module.body[0].kind, StmtKind::Global(names) if names.len() == 2));
    assert!(matches!(&module.body[1].kind, StmtKind::Delete(targets) if targets.len() == 2));
    assert!(matches!(&module.body[2].kind, StmtKind::Assert { msg: Some(_), .. }));
    assert!(matches!(&module.body[3].kind, StmtKind::Raise { cause: Some(_), .. }));
}

#[test]
fn match_statement_patterns() {
    let source = "match command.split():\n    case [action, *rest] if rest:\n        pass\n    case {'k': Color.RED, **others}:\n        pass\n    case Point(0, y=-1) | None as hit:\n        pass\n    case _:\n        pass\n";
    let StmtKind::Match { subject, cases } = first_stmt(source).kind else {
        panic!("expected match");
    };
    assert!(matches!(subject.kind, ExprKind::Call { .. }));
    assert_eq!(cases.len(), 4);

    let PatternKind::Sequence(items) = &cases[0].pattern.kind else {
        panic!("expected sequence, got {:?}", cases[0].pattern);
    };
    assert!(matches!(&items[0].kind, PatternKind::As { pattern: None, name: Some(n) } if n == "action"));
    assert!(matches!(&items[1].kind, PatternKind::Star(Some(n)) if n == "rest"));
    assert!(cases[0].guard.is_some());

    let PatternKind::Mapping { keys, patterns, rest } = &cases[1].pattern.kind else {
        panic!("expected mapping");
    };
    assert_eq!(keys.len(), 1);
    assert!(matches!(&patterns[0].kind, PatternKind::Value(e) if matches!(e.kind, ExprKind::Attribute { .. })));
    assert_eq!(rest.as_deref(), Some("others"));

    let PatternKind::As { pattern: Some(inner), name } = &cases[2].pattern.kind else {
        panic!("expected as-pattern");
    };
    assert_eq!(name.as_deref(), Some("hit"));
    let PatternKind::Or(alternatives) = &inner.kind else {
        panic!("expected or-pattern");
    };
    let PatternKind::Class { cls, patterns, kwd_attrs, kwd_patterns } = &alternatives[0].kind else {
        panic!("expected class pattern");
    };
    assert_eq!(name_of(cls), "Point");
    assert_eq!(patterns.len(), 1);
    assert_eq!(kwd_attrs, &["y".to_string()]);
    assert!(matches!(&kwd_patterns[0].kind, PatternKind::Value(e) if matches!(e.kind, ExprKind::UnaryOp { .. })));

    assert!(cases[3].pattern.kind.is_wildcard());
}

#[test]
fn open_and_parenthesized_sequences() {
    let source = "match a, b:\n    case x, (1 | 2):\n        pass\n    case (y,):\n        pass\n";
    let StmtKind::Match { subject, cases } = first_stmt(source).kind else {
        panic!("expected match");
    };
    assert!(matches!(subject.kind, ExprKind::Tuple { .. }));
    let PatternKind::Sequence(items) = &cases[0].pattern.kind else {
        panic!("expected sequence");
    };
    assert!(matches!(items[1].kind, PatternKind::Or(_)));
    assert!(matches!(&cases[1].pattern.kind, PatternKind::Sequence(items) if items.len() == 1));
}

#[test]
fn match_and_type_remain_ordinary_names() {
    let module = parse_ok("match = 1
match(x)
match[x]: int = 2
type = 3
type(x)
");
    assert!(matches!(&module.body[0].kind, StmtKind::Assign { .. }));
    assert!(matches!(&module.body[1].kind, StmtKind::Expr(_)));
    assert!(matches!(&module.body[2].kind, StmtKind::AnnAssign { .. }));
    assert!(matches!(&module.body[3].kind, StmtKind::Assign { .. }));
    assert!(matches!(&module.body[4].kind, StmtKind::Expr(_)));
}

#[test]
fn except_star_and_type_alias() {
    let source = "try:\n    a\nexcept* ValueError as group:\n    b\n";
    let StmtKind::Try { handlers, is_star, .. } = first_stmt(source).kind else {
        panic!("expected try");
    };
    assert!(is_star);
    assert_eq!(handlers[0].name.as_deref(), Some("group"));

    let StmtKind::TypeAlias { name, value } = first_stmt("type Pair = tuple[int, int]\n").kind
    else {
        panic!("expected type alias");
    };
    assert!(matches!(name.kind, ExprKind::Name { ctx: ExprContext::Store, .. }));
    assert!(matches!(value.kind, ExprKind::Subscript { .. }));
}

// === Expressions ===

#[test]
fn precedence_of_arithmetic() {
    let e = expr("1 + 2 * 3 ** -4\n");
    let ExprKind::BinOp { op, right, .. } = &e.kind else {
        panic!("expected binop");
    };
    assert_eq!(*op, BinaryOp::Add);
    let ExprKind::BinOp { op, right, .. } = &right.kind else {
        panic!("expected product");
    };
    assert_eq!(*op, BinaryOp::Mul);
    let ExprKind::BinOp { op, right, .. } = &right.kind else {
        panic!("expected power");
    };
    assert_eq!(*op, BinaryOp::Pow);
    assert!(matches!(right.kind, ExprKind::UnaryOp { op: UnaryOp::USub, .. }));
}

#[test]
fn power_binds_tighter_than_unary_minus() {
    let e = expr("-2 ** 2\n");
    let ExprKind::UnaryOp { op, operand } = &e.kind else {
        panic!("expected unary");
    };
    assert_eq!(*op, UnaryOp::USub);
    assert!(matches!(operand.kind, ExprKind::BinOp { op: BinaryOp::Pow, .. }));
}

#[test]
fn boolean_and_comparison_chains() {
    let e = expr("a < b <= c and not x in y or p is not q\n");
    let ExprKind::BoolOp { op, values } = &e.kind else {
        panic!("expected or");
    };
    assert_eq!(*op, BoolOp::Or);
    let ExprKind::BoolOp { values: conj, .. } = &values[0].kind else {
        panic!("expected and");
    };
    let ExprKind::Compare { ops, .. } = &conj[0].kind else {
        panic!("expected chain");
    };
    assert_eq!(ops, &[CmpOp::Lt, CmpOp::LtE]);
    assert!(matches!(conj[1].kind, ExprKind::UnaryOp { op: UnaryOp::Not, .. }));
    let ExprKind::Compare { ops, .. } = &values[1].kind else {
        panic!("expected is not");
    };
    assert_eq!(ops, &[CmpOp::IsNot]);

    let ExprKind::Compare { ops, .. } = &expr("a not in b\n").kind else {
        panic!("expected not in");
    };
    assert_eq!(ops, &[CmpOp::NotIn]);
}

#[test]
fn calls_with_keywords_and_unpacking() {
    let e = expr("f(1, *rest, key=2, **opts)\n");
    let ExprKind::Call {
        func,
        args,
        keywords,
    } = &e.kind
    else {
        panic!("expected call");
    };
    assert_eq!(name_of(func), "f");
    assert_eq!(args.len(), 2);
    assert_eq!(keywords.len(), 2);
    assert_eq!(keywords[0].arg.as_deref(), Some("key"));
    assert_eq!(keywords[1].arg, None);
}

#[test]
fn generator_argument() {
    let e = expr("sum(x for x in xs if x)\n");
    let ExprKind::Call { args, .. } = &e.kind else {
        panic!("expected call");
    };
    assert!(matches!(args[0].kind, ExprKind::GeneratorExp { .. }));
}

#[test]
fn attribute_and_subscript_trailers() {
    let e = expr("a.b[1:2, ::3].c\n");
    let ExprKind::Attribute { value, attr, .. } = &e.kind else {
        panic!("expected attribute");
    };
    assert_eq!(attr, "c");
    let ExprKind::Subscript { slice, .. } = &value.kind else {
        panic!("expected subscript");
    };
    let ExprKind::Tuple { elts, .. } = &slice.kind else {
        panic!("expected slice tuple");
    };
    assert!(matches!(elts[0].kind, ExprKind::Slice { step: None, .. }));
    assert!(matches!(elts[1].kind, ExprKind::Slice { lower: None, upper: None, step: Some(_) }));
}

#[test]
fn displays_and_comprehensions() {
    assert!(matches!(expr("[]\n").kind, ExprKind::List { .. }));
    assert!(matches!(expr("()\n").kind, ExprKind::Tuple { .. }));
    assert!(matches!(expr("{}\n").kind, ExprKind::Dict { .. }));
    assert!(matches!(expr("{1, 2}\n").kind, ExprKind::Set(_)));
    assert!(matches!(expr("(1,)\n").kind, ExprKind::Tuple { .. }));
    assert!(matches!(expr("(1)\n").kind, ExprKind::Constant(_)));
    assert!(matches!(expr("[x for x in y]\n").kind, ExprKind::ListComp { .. }));
    assert!(matches!(expr("{x for x in y}\n").kind, ExprKind::SetComp { .. }));
    assert!(matches!(expr("{k: v for k, v in y}\n").kind, ExprKind::DictComp { .. }));
    assert!(matches!(expr("(x for x in y)\n").kind, ExprKind::GeneratorExp { .. }));

    let ExprKind::Dict { keys, .. } = expr("{'a': 1, **rest}\n").kind else {
        panic!("expected dict");
    };
    assert!(keys[0].is_some());
    assert!(keys[1].is_none());
}

#[test]
fn lambda_ternary_and_walrus() {
    let e = expr("(lambda x, *, y=1: x if y else -x)\n");
    let ExprKind::Lambda { args, body } = &e.kind else {
        panic!("expected lambda");
    };
    assert_eq!(args.kwonlyargs.len(), 1);
    assert!(matches!(body.kind, ExprKind::IfExp { .. }));

    let StmtKind::If { test, .. } = first_stmt("if (n := len(a)) > 10:\n    pass\n").kind else {
        panic!("expected if");
    };
    let ExprKind::Compare { left, .. } = &test.kind else {
        panic!("expected compare");
    };
    assert!(matches!(left.kind, ExprKind::NamedExpr { .. }));
}

#[test]
fn yield_and_await() {
    let source = "async def f():\n    x = yield 1\n    yield from g()\n    await h()\n";
    let StmtKind::FunctionDef(def) = first_stmt(source).kind else {
        panic!("expected def");
    };
    assert!(matches!(
        &def.body[0].kind,
        StmtKind::Assign { value: Expr { kind: ExprKind::Yield(Some(_)), .. }, .. }
    ));
    assert!(matches!(
        &def.body[1].kind,
        StmtKind::Expr(Expr { kind: ExprKind::YieldFrom(_), .. })
    ));
    assert!(matches!(
        &def.body[2].kind,
        StmtKind::Expr(Expr { kind: ExprKind::Await(_), .. })
    ));
}

// === Strings ===

#[test]
fn implicit_concatenation() {
    let e = expr("'a' \"b\"\n");
    assert_eq!(e.kind, ExprKind::Constant(Constant::Str("ab".into())));
    let e = expr("b'a' b'b'\n");
    assert_eq!(e.kind, ExprKind::Constant(Constant::Bytes(b"ab".to_vec())));
}

#[test]
fn fstring_parts() {
    let e = expr("'x' f'{a!r:>{w}} y' 'z'\n");
    let ExprKind::FString(parts) = &e.kind else {
        panic!("expected f-string");
    };
    assert_eq!(parts.len(), 3);
    assert_eq!(parts[0], FStringPart::Literal("x".into()));
    let FStringPart::Slot(slot) = &parts[1] else {
        panic!("expected slot");
    };
    assert_eq!(name_of(&slot.value), "a");
    assert_eq!(slot.conversion, Some(Conversion::Repr));
    assert_eq!(slot.format_spec.len(), 2);
    assert_eq!(parts[2], FStringPart::Literal(" yz".into()));
}

#[test]
fn fstring_self_documenting_field() {
    let e = expr("f'{x=}'\n");
    let ExprKind::FString(parts) = &e.kind else {
        panic!("expected f-string");
    };
    assert_eq!(parts[0], FStringPart::Literal("x=".into()));
    let FStringPart::Slot(slot) = &parts[1] else {
        panic!("expected slot");
    };
    assert_eq!(slot.conversion, Some(Conversion::Repr));
}

#[test]
fn fstring_field_spans_point_into_file() {
    let err = parse("x = f'{1 +}'\n").unwrap_err();
    assert!(matches!(err.kind, ParseErrorKind::UnexpectedToken { .. }));
    assert_eq!(err.span.start, 10);
}

// === Errors ===

#[test]
fn syntax_errors() {
    let kind = |source: &str| parse(source).map(|_| ()).map_err(|e| e.kind);
    assert!(matches!(kind("1 = x\n"), Err(ParseErrorKind::InvalidTarget { .. })));
    assert!(matches!(kind("f() += 1\n"), Err(ParseErrorKind::InvalidTarget { .. })));
    assert!(matches!(kind("  x = 1\n"), Err(ParseErrorKind::UnexpectedIndent)));
    assert!(matches!(kind("if x:\npass\n"), Err(ParseErrorKind::ExpectedIndentedBlock)));
    assert!(matches!(kind("def f(a=1, b): pass\n"), Err(ParseErrorKind::NonDefaultAfterDefault)));
    assert!(matches!(kind("f(a=1, b)\n"), Err(ParseErrorKind::PositionalAfterKeyword)));
    assert!(matches!(kind("'a' b'b'\n"), Err(ParseErrorKind::MixedBytesAndStr)));
    assert!(matches!(kind("x = (1, 2\n"), Err(ParseErrorKind::UnexpectedToken { .. })));
    assert!(matches!(kind("try:\n    pass\nx = 1\n"), Err(ParseErrorKind::UnexpectedToken { .. })));
    assert!(matches!(kind("x = 'abc\n"), Err(ParseErrorKind::Lex(_))));
    assert!(matches!(
        kind("try:\n    a\nexcept* E:\n    b\nexcept F:\n    c\n"),
        Err(ParseErrorKind::MixedExceptStar)
    ));
    assert!(matches!(
        kind("match x:\n    case y as _:\n        pass\n"),
        Err(ParseErrorKind::InvalidPattern(_))
    ));
    assert!(matches!(
        kind("match x:\n    case C(a=1, b):\n        pass\n"),
        Err(ParseErrorKind::InvalidPattern(_))
    ));
    assert!(matches!(
        kind("match x:\n    y = 1\n"),
        Err(ParseErrorKind::UnexpectedToken { .. })
    ));
}

#[test]
fn deeply_nested_expression_does_not_overflow() {
    let depth = 5_000;
    let source = format!("x = {}1{}\n", "(".repeat(depth), ")".repeat(depth));
    let StmtKind::Assign { value, .. } = first_stmt(&source).kind else {
        panic!("expected assignment");
    };
    assert_eq!(int_value(&value), 1);
}
