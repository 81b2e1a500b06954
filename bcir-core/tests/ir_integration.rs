//! End-to-end scenarios across statements, expressions and signatures

use bcir_core::*;
use pretty_assertions::assert_eq;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::Arc;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn rhs_type(stmt: &Statement) -> Type {
    match stmt {
        Statement::Assign(assign) => assign.rhs.ty(),
        other => panic!("not an assignment: {other}"),
    }
}

#[test]
fn substitution_retypes_binary_expression() {
    init_logging();
    let a = Local::new("a", Type::Int);
    let b = Local::new("b", Type::Short);
    let wide = Local::new("wide", Type::Long);

    let stmt: Statement = AssignStmt::new(
        Local::new("x", Type::Int),
        BinopExpr::new(BinopOp::Add, a.clone(), b),
        Position::line(12),
    )
    .into();
    assert_eq!(rhs_type(&stmt), Type::Int);

    let rewritten = stmt.with_new_use(&a.into(), &wide.clone().into());
    assert_eq!(rhs_type(&rewritten), Type::Long);
    assert!(rewritten.uses().contains(&wide.into()));
    assert_eq!(rewritten.position(), Position::line(12));

    // The original is untouched
    assert_eq!(rhs_type(&stmt), Type::Int);
}

#[test]
fn rejected_substitution_keeps_statement() {
    init_logging();
    let a = Local::new("a", Type::Int);
    let stmt: Statement = AssignStmt::new(
        Local::new("x", Type::Int),
        BinopExpr::new(BinopOp::Mul, a.clone(), Constant::int(2)),
        Position::none(),
    )
    .into();

    let call = InvokeExpr::new_static(
        MethodSignature::new(ClassType::new("Util"), "next", vec![], Type::Int),
        vec![],
    );
    let result = stmt.with_new_use(&a.into(), &call.into());
    assert_eq!(result, stmt);
}

#[test]
fn def_use_chains_over_a_method_body() {
    let i = Local::new("i", Type::Int);
    let n = Local::new("n", Type::Int);
    let sum = Local::new("sum", Type::Long);

    let body: Vec<Statement> = vec![
        IdentityStmt::new(n.clone(), IdentityRef::Parameter { index: 0, ty: Type::Int }, Position::line(1)).into(),
        AssignStmt::new(i.clone(), Constant::int(0), Position::line(2)).into(),
        AssignStmt::new(sum.clone(), Constant::long(0), Position::line(2)).into(),
        IfStmt::new(BinopExpr::new(BinopOp::Ge, i.clone(), n.clone()), Position::line(3)).into(),
        AssignStmt::new(sum.clone(), BinopExpr::new(BinopOp::Add, sum.clone(), i.clone()), Position::line(4)).into(),
        AssignStmt::new(i.clone(), BinopExpr::new(BinopOp::Add, i.clone(), Constant::int(1)), Position::line(5)).into(),
        GotoStmt::new(Position::line(5)).into(),
        ReturnStmt::new(sum.clone(), Position::line(6)).into(),
    ];

    let mut defs: BTreeMap<String, Vec<usize>> = BTreeMap::new();
    let mut uses: BTreeMap<String, Vec<usize>> = BTreeMap::new();
    for (idx, stmt) in body.iter().enumerate() {
        if let Some(LValue::Local(local)) = stmt.def() {
            defs.entry(local.name).or_default().push(idx);
        }
        for value in stmt.uses() {
            if let Some(local) = value.as_local() {
                uses.entry(local.name.clone()).or_default().push(idx);
            }
        }
    }

    assert_eq!(defs["i"], vec![1, 5]);
    assert_eq!(defs["sum"], vec![2, 4]);
    assert_eq!(defs["n"], vec![0]);
    assert_eq!(uses["i"], vec![3, 4, 5]);
    assert_eq!(uses["n"], vec![3]);
    assert_eq!(uses["sum"], vec![4, 7]);

    let edges: usize = body.iter().map(|s| s.expected_successor_count()).sum();
    // one edge each, two for the if, none for the return
    assert_eq!(edges, 8);
}

#[test]
fn constant_folding_through_logical_capability() {
    fn fold(stmt: &Statement) -> Option<Statement> {
        let Statement::Assign(assign) = stmt else { return None };
        let Value::Expr(Expr::Binop(binop)) = &assign.rhs else { return None };
        let (Immediate::Constant(lhs), Immediate::Constant(rhs)) = (&binop.op1, &binop.op2) else {
            return None;
        };
        let folded = fold_logical(binop.op, lhs, rhs)?;
        Some(AssignStmt::new(assign.lhs.clone(), folded, assign.position).into())
    }

    let mask = Local::new("mask", Type::Int);
    let stmt: Statement = AssignStmt::new(
        mask.clone(),
        BinopExpr::new(BinopOp::And, Constant::int(0xF0), Constant::int(0x3C)),
        Position::none(),
    )
    .into();
    assert_eq!(fold(&stmt), Some(Statement::from(AssignStmt::new(mask, Constant::int(0x30), Position::none()))));

    let flag = Local::new("flag", Type::Boolean);
    let stmt: Statement = AssignStmt::new(
        flag,
        BinopExpr::new(BinopOp::Or, Constant::boolean(false), Constant::boolean(true)),
        Position::none(),
    )
    .into();
    let folded = fold(&stmt).expect("boolean or folds");
    assert_eq!(folded.uses(), vec![Value::from(Constant::boolean(true))]);

    let stmt: Statement = AssignStmt::new(
        Local::new("x", Type::Long),
        BinopExpr::new(BinopOp::Xor, Constant::int(1), Constant::long(1)),
        Position::none(),
    )
    .into();
    assert_eq!(fold(&stmt), None);
}

#[test]
fn member_tables_index_by_sub_signature() {
    let owner = ClassType::new("com.example.Buffer");
    let fields = [
        FieldSignature::new(owner.clone(), "limit", Type::Int),
        FieldSignature::new(owner.clone(), "data", Type::array_of(Type::Byte)),
        FieldSignature::new(owner.clone(), "limit", Type::Long),
    ];

    let mut by_sub: HashMap<FieldSubSignature, &FieldSignature> = HashMap::new();
    for field in &fields {
        by_sub.insert(field.sub.clone(), field);
    }
    let probe = FieldSubSignature::new("limit", Type::Long);
    assert_eq!(by_sub.get(&probe).map(|f| f.ty()), Some(&Type::Long));

    let mut ordered: Vec<&FieldSubSignature> = by_sub.keys().collect();
    ordered.sort();
    let text: Vec<&str> = ordered.iter().map(|s| s.canonical_text()).collect();
    assert_eq!(text, vec!["byte[] data", "int limit", "long limit"]);

    let methods: HashSet<MethodSubSignature> = [
        MethodSubSignature::new("get", vec![Type::Int], Type::Byte),
        MethodSubSignature::new("get", vec![Type::Int], Type::Byte),
        MethodSubSignature::new("get", vec![], Type::Byte),
    ]
    .into_iter()
    .collect();
    assert_eq!(methods.len(), 2);
}

#[test]
fn statements_are_shared_across_threads() {
    let a = Local::new("a", Type::Int);
    let stmt: Arc<Statement> = Arc::new(
        AssignStmt::new(
            Local::new("x", Type::Int),
            BinopExpr::new(BinopOp::Sub, a.clone(), Constant::int(1)),
            Position::none(),
        )
        .into(),
    );
    let sig = Arc::new(SubSignature::new("x", Type::Int));

    let handles: Vec<_> = (0..4)
        .map(|n| {
            let stmt = Arc::clone(&stmt);
            let sig = Arc::clone(&sig);
            std::thread::spawn(move || {
                let replacement = Local::new(format!("t{n}"), Type::Long);
                let rewritten = stmt.with_new_use(&Value::from(Local::new("a", Type::Int)), &replacement.into());
                (rhs_type(&rewritten), stmt.uses_and_defs().len(), sig.canonical_text().to_string())
            })
        })
        .collect();

    for handle in handles {
        let (ty, footprint, text) = handle.join().unwrap();
        assert_eq!(ty, Type::Long);
        assert_eq!(footprint, 4);
        assert_eq!(text, "int x");
    }
    assert_eq!(rhs_type(&stmt), Type::Int);
    assert!(stmt.uses().contains(&a.into()));
}
