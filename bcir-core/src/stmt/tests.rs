//! Unit tests for the statement contract

use super::*;
use crate::constants::Constant;
use crate::expr::{BinopExpr, BinopOp, Expr, InvokeExpr, InvokeKind};
use crate::refs::{IdentityRef, InstanceFieldRef, Ref, StaticFieldRef};
use crate::signature::{FieldSignature, MethodSignature};
use crate::types::{ClassType, Type};
use crate::values::{Immediate, Local};
use pretty_assertions::assert_eq;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn local(name: &str, ty: Type) -> Local {
    Local::new(name, ty)
}

fn int(name: &str) -> Local {
    local(name, Type::Int)
}

fn pos() -> Position {
    Position::line(7)
}

fn add(a: impl Into<Immediate>, b: impl Into<Immediate>) -> BinopExpr {
    BinopExpr::new(BinopOp::Add, a, b)
}

fn point_x() -> FieldSignature {
    FieldSignature::new(ClassType::new("Point"), "x", Type::Int)
}

fn counter() -> FieldSignature {
    FieldSignature::new(ClassType::new("Stats"), "counter", Type::Long)
}

fn println() -> MethodSignature {
    MethodSignature::new(
        ClassType::new("java.io.PrintStream"),
        "println",
        vec![Type::Int],
        Type::Void,
    )
}

fn every_kind() -> Vec<Statement> {
    let cond = BinopExpr::new(BinopOp::Lt, int("a"), int("b"));
    vec![
        AssignStmt::new(int("x"), add(int("a"), int("b")), pos()).into(),
        IdentityStmt::new(int("p"), IdentityRef::Parameter { index: 0, ty: Type::Int }, pos()).into(),
        InvokeStmt::new(InvokeExpr::new_static(println(), vec![int("a").into()]), pos()).into(),
        IfStmt::new(cond, pos()).into(),
        GotoStmt::new(pos()).into(),
        SwitchStmt::new(int("k"), vec![1, 2, 3], pos()).into(),
        ReturnStmt::new(int("a"), pos()).into(),
        ReturnVoidStmt::new(pos()).into(),
        ThrowStmt::new(local("e", Type::class("java.lang.Exception")), pos()).into(),
        EnterMonitorStmt::new(local("lock", Type::class("java.lang.Object")), pos()).into(),
        ExitMonitorStmt::new(local("lock", Type::class("java.lang.Object")), pos()).into(),
        NopStmt::new(pos()).into(),
    ]
}

#[test]
fn test_uses_and_defs_is_uses_then_def() {
    for stmt in every_kind() {
        let mut expected = stmt.uses();
        if let Some(def) = stmt.def() {
            expected.push(def.into());
        }
        assert_eq!(stmt.uses_and_defs(), expected, "{stmt}");
    }
}

#[test]
fn test_assign_footprint() {
    let stmt = AssignStmt::new(int("x"), add(int("a"), Constant::int(1)), pos());
    let rhs: Value = add(int("a"), Constant::int(1)).into();

    assert_eq!(
        stmt.uses(),
        vec![Value::from(int("a")), Value::from(Constant::int(1)), rhs.clone()]
    );
    assert_eq!(stmt.def(), Some(LValue::Local(int("x"))));
    assert_eq!(
        stmt.uses_and_defs(),
        vec![Value::from(int("a")), Value::from(Constant::int(1)), rhs, Value::from(int("x"))]
    );
}

#[test]
fn test_array_store_uses_target_operands_first() {
    let arr = local("arr", Type::array_of(Type::Int));
    let stmt = AssignStmt::new(ArrayRef::new(arr.clone(), int("i")), int("v"), pos());

    assert_eq!(
        stmt.uses(),
        vec![Value::from(arr.clone()), Value::from(int("i")), Value::from(int("v"))]
    );
    assert_eq!(stmt.def(), Some(LValue::Array(ArrayRef::new(arr, int("i")))));
}

#[test]
fn test_uses_are_fresh_each_call() {
    let stmt: Statement = ReturnStmt::new(int("r"), pos()).into();
    let mut first = stmt.uses();
    first.clear();
    assert_eq!(stmt.uses(), vec![Value::from(int("r"))]);
}

#[test]
fn test_no_def_for_non_assignments() {
    for stmt in every_kind() {
        match stmt {
            Statement::Assign(_) | Statement::Identity(_) => assert!(stmt.def().is_some()),
            _ => {
                assert!(stmt.def().is_none(), "{stmt}");
                assert_eq!(stmt.uses_and_defs(), stmt.uses());
            }
        }
    }
}

#[test]
fn test_expected_successor_counts() {
    let counts: Vec<usize> = every_kind().iter().map(|s| s.expected_successor_count()).collect();
    // assign identity invoke if goto switch return return-void throw enter exit nop
    assert_eq!(counts, vec![1, 1, 1, 2, 1, 4, 0, 0, 0, 1, 1, 1]);
}

#[test]
fn test_fall_through_and_branching() {
    let goto: Statement = GotoStmt::new(pos()).into();
    assert!(!goto.falls_through());
    assert!(goto.branches());

    let cond: Statement = IfStmt::new(BinopExpr::new(BinopOp::Eq, int("a"), Constant::int(0)), pos()).into();
    assert!(cond.falls_through());
    assert!(cond.branches());

    let nop: Statement = NopStmt::new(pos()).into();
    assert!(nop.falls_through());
    assert!(!nop.branches());

    let ret: Statement = ReturnVoidStmt::new(pos()).into();
    assert!(!ret.falls_through());
}

#[test]
fn test_position_passes_through() {
    let stmt: Statement = NopStmt::new(Position::new(3, 1, 4, 2)).into();
    assert_eq!(stmt.position(), Position::new(3, 1, 4, 2));
}

#[test]
fn test_array_ref_guard() {
    let arr = local("arr", Type::array_of(Type::Long));
    let load: Statement = AssignStmt::new(local("v", Type::Long), ArrayRef::new(arr.clone(), Constant::int(2)), pos()).into();
    assert!(load.contains_array_ref());
    assert_eq!(load.array_ref(), &ArrayRef::new(arr.clone(), Constant::int(2)));

    let store: Statement = AssignStmt::new(ArrayRef::new(arr.clone(), int("i")), Constant::long(5), pos()).into();
    assert!(store.contains_array_ref());
    assert_eq!(store.array_ref().base, arr);
}

#[test]
fn test_no_array_ref_for_other_kinds() {
    for stmt in every_kind() {
        assert!(!stmt.contains_array_ref(), "{stmt}");
    }
}

#[test]
#[should_panic(expected = "precondition violated: `nop` contains no array reference")]
fn test_array_ref_without_guard_panics() {
    let stmt: Statement = NopStmt::new(pos()).into();
    stmt.array_ref();
}

#[test]
#[should_panic(expected = "contains no array reference")]
fn test_array_ref_on_plain_assign_panics() {
    let stmt: Statement = AssignStmt::new(int("x"), int("y"), pos()).into();
    assert!(!stmt.contains_array_ref());
    stmt.array_ref();
}

#[test]
fn test_field_ref_guard() {
    let obj = local("p", Type::class("Point"));
    let load: Statement = AssignStmt::new(int("x"), InstanceFieldRef::new(obj.clone(), point_x()), pos()).into();
    assert!(load.contains_field_ref());
    assert_eq!(load.field_ref().field(), &point_x());
    assert!(!load.field_ref().is_static());

    let store: Statement = AssignStmt::new(StaticFieldRef::new(counter()), Constant::long(0), pos()).into();
    assert!(store.contains_field_ref());
    assert!(store.field_ref().is_static());
    assert_eq!(store.field_ref().field().name(), "counter");
}

#[test]
#[should_panic(expected = "contains no field reference")]
fn test_field_ref_without_guard_panics() {
    let stmt: Statement = ReturnStmt::new(int("x"), pos()).into();
    assert!(!stmt.contains_field_ref());
    stmt.field_ref();
}

#[test]
fn test_invokable_statements() {
    let call = InvokeExpr::new_instance(
        InvokeKind::Virtual,
        local("out", Type::class("java.io.PrintStream")),
        println(),
        vec![int("a").into()],
    );

    let stmt: Statement = InvokeStmt::new(call.clone(), pos()).into();
    assert!(stmt.is_invokable_stmt());
    let view = stmt.as_invokable_stmt();
    assert_eq!(view.invoke_expr(), Some(&call));
    assert!(!view.invokes_static_initializer());
    assert_eq!(view.position(), pos());

    let assign: Statement = AssignStmt::new(int("r"), call.clone(), pos()).into();
    assert!(assign.is_invokable_stmt());
    assert!(assign.as_invokable_stmt().contains_invoke_expr());
}

#[test]
fn test_implied_class_initialization() {
    let alloc: Statement = AssignStmt::new(local("o", Type::class("Point")), Expr::New(ClassType::new("Point")), pos()).into();
    assert!(alloc.is_invokable_stmt());
    let view = alloc.as_invokable_stmt();
    assert!(view.invoke_expr().is_none());
    assert!(view.invokes_static_initializer());

    let read: Statement = AssignStmt::new(local("c", Type::Long), StaticFieldRef::new(counter()), pos()).into();
    assert!(read.as_invokable_stmt().invokes_static_initializer());

    let static_call: Statement = InvokeStmt::new(InvokeExpr::new_static(println(), vec![]), pos()).into();
    assert!(static_call.as_invokable_stmt().invokes_static_initializer());
}

#[test]
#[should_panic(expected = "is not an invokable statement")]
fn test_as_invokable_without_guard_panics() {
    let stmt: Statement = AssignStmt::new(int("x"), add(int("a"), int("b")), pos()).into();
    assert!(!stmt.is_invokable_stmt());
    stmt.as_invokable_stmt();
}

#[test]
fn test_with_new_use_replaces_every_occurrence() {
    init_logging();
    let stmt: Statement = AssignStmt::new(int("x"), add(int("a"), int("a")), pos()).into();
    let rewritten = stmt.with_new_use(&int("a").into(), &int("c").into());

    assert_eq!(rewritten, Statement::from(AssignStmt::new(int("x"), add(int("c"), int("c")), pos())));
    assert!(!rewritten.uses().contains(&int("a").into()));
}

#[test]
fn test_with_new_use_accepts_constants_in_immediate_slots() {
    let stmt: Statement = ReturnStmt::new(int("r"), pos()).into();
    let rewritten = stmt.with_new_use(&int("r").into(), &Constant::int(0).into());
    assert_eq!(rewritten.uses(), vec![Value::from(Constant::int(0))]);
}

#[test]
fn test_with_new_use_incompatible_slot_is_noop() {
    init_logging();
    let stmt: Statement = AssignStmt::new(int("x"), add(int("a"), int("b")), pos()).into();
    let composite: Value = add(int("c"), int("d")).into();

    assert_eq!(stmt.with_new_use(&int("a").into(), &composite), stmt);
}

#[test]
fn test_with_new_use_array_base_needs_local() {
    let arr = local("arr", Type::array_of(Type::Int));
    let stmt: Statement = AssignStmt::new(int("v"), ArrayRef::new(arr.clone(), int("i")), pos()).into();

    assert_eq!(stmt.with_new_use(&arr.clone().into(), &Constant::Null.into()), stmt);

    let other = local("other", Type::array_of(Type::Int));
    let rewritten = stmt.with_new_use(&arr.into(), &other.clone().into());
    assert_eq!(rewritten.array_ref().base, other);
}

#[test]
fn test_with_new_use_whole_rhs() {
    let stmt: Statement = AssignStmt::new(int("x"), int("y"), pos()).into();
    let replacement: Value = add(int("a"), int("b")).into();
    let rewritten = stmt.with_new_use(&int("y").into(), &replacement);
    assert_eq!(rewritten, Statement::from(AssignStmt::new(int("x"), replacement, pos())));

    // A store into memory only takes an immediate
    let arr = local("arr", Type::array_of(Type::Int));
    let store: Statement = AssignStmt::new(ArrayRef::new(arr, int("i")), int("y"), pos()).into();
    assert_eq!(store.with_new_use(&int("y").into(), &add(int("a"), int("b")).into()), store);
}

#[test]
fn test_with_new_use_rejects_identity_ref_on_rhs() {
    let stmt: Statement = AssignStmt::new(int("x"), int("y"), pos()).into();
    let this: Value = Ref::Identity(IdentityRef::This(Type::class("Point"))).into();
    assert_eq!(stmt.with_new_use(&int("y").into(), &this), stmt);
}

#[test]
fn test_with_new_use_distinguishes_signed_zero() {
    let f = |name: &str| local(name, Type::Float);
    let stmt: Statement = AssignStmt::new(
        f("y"),
        BinopExpr::new(BinopOp::Add, Constant::float(-0.0), f("z")),
        pos(),
    )
    .into();

    assert_eq!(stmt.with_new_use(&Constant::float(0.0).into(), &f("t").into()), stmt);

    let rewritten = stmt.with_new_use(&Constant::float(-0.0).into(), &f("t").into());
    assert_eq!(
        rewritten,
        Statement::from(AssignStmt::new(f("y"), BinopExpr::new(BinopOp::Add, f("t"), f("z")), pos()))
    );
}

#[test]
fn test_with_new_use_replaces_nan() {
    let stmt: Statement = ReturnStmt::new(Constant::double(f64::NAN), pos()).into();
    assert_eq!(stmt, stmt.clone());

    let t = local("t", Type::Double);
    let rewritten = stmt.with_new_use(&Constant::double(f64::NAN).into(), &t.clone().into());
    assert_eq!(rewritten, Statement::from(ReturnStmt::new(t, pos())));
}

#[test]
fn test_with_new_use_leaves_definition_alone() {
    let stmt: Statement = AssignStmt::new(int("x"), add(int("x"), Constant::int(1)), pos()).into();
    let rewritten = stmt.with_new_use(&int("x").into(), &int("t").into());
    assert_eq!(rewritten.def(), Some(LValue::Local(int("x"))));
    assert_eq!(rewritten, Statement::from(AssignStmt::new(int("x"), add(int("t"), Constant::int(1)), pos())));
}

#[test]
fn test_with_new_use_without_occurrence_is_equal() {
    for stmt in every_kind() {
        let rewritten = stmt.with_new_use(&int("unused").into(), &int("other").into());
        assert_eq!(rewritten, stmt);
    }
}

#[test]
fn test_with_new_use_in_condition() {
    let cond = BinopExpr::new(BinopOp::Ge, int("a"), int("b"));
    let stmt: Statement = IfStmt::new(cond.clone(), pos()).into();

    let rewritten = stmt.with_new_use(&int("b").into(), &Constant::int(10).into());
    assert_eq!(rewritten, Statement::from(IfStmt::new(BinopExpr::new(BinopOp::Ge, int("a"), Constant::int(10)), pos())));

    let swapped = BinopExpr::new(BinopOp::Lt, int("b"), int("a"));
    let rewritten = stmt.with_new_use(&cond.clone().into(), &swapped.clone().into());
    assert_eq!(rewritten, Statement::from(IfStmt::new(swapped, pos())));

    // Arithmetic is not a condition
    let rewritten = stmt.with_new_use(&cond.into(), &add(int("a"), int("b")).into());
    assert_eq!(rewritten, stmt);
}

#[test]
fn test_with_new_use_in_invoke() {
    let receiver = local("out", Type::class("java.io.PrintStream"));
    let call = InvokeExpr::new_instance(InvokeKind::Virtual, receiver.clone(), println(), vec![int("a").into()]);
    let stmt: Statement = InvokeStmt::new(call, pos()).into();

    let rewritten = stmt.with_new_use(&int("a").into(), &Constant::int(42).into());
    assert_eq!(rewritten.as_invokable_stmt().invoke_expr().map(|i| i.args.clone()), Some(vec![Immediate::from(Constant::int(42))]));

    // The receiver must stay a local
    assert_eq!(stmt.with_new_use(&receiver.into(), &Constant::Null.into()), stmt);
}

#[test]
fn test_with_new_use_on_concrete_kind() {
    let stmt = SwitchStmt::new(int("k"), vec![0, 1], pos());
    let rewritten = stmt.with_new_use(&int("k").into(), &int("j").into());
    assert_eq!(rewritten, Statement::from(SwitchStmt::new(int("j"), vec![0, 1], pos())));
}

#[test]
fn test_statement_display() {
    let stmt: Statement = AssignStmt::new(int("x"), add(int("a"), Constant::int(1)), pos()).into();
    assert_eq!(stmt.to_string(), "x = a + 1");

    let stmt: Statement = IdentityStmt::new(local("this", Type::class("Point")), IdentityRef::This(Type::class("Point")), pos()).into();
    assert_eq!(stmt.to_string(), "this := @this: Point");

    let stmt: Statement = InvokeStmt::new(InvokeExpr::new_static(println(), vec![Constant::int(1).into()]), pos()).into();
    assert_eq!(stmt.to_string(), "staticinvoke <java.io.PrintStream: void println(int)>(1)");
}
