//! ホスト向けディスパッチ面の統合テスト
//!
//! テンプレートホストが実際に行う呼び出し方（名前でlookup/dispatchし、
//! リスト値を渡して結果を受け取る）をそのまま通す。

use listops::value::Value;
use listops::{dispatch, function_names, lookup};

fn s(v: &str) -> Value {
    Value::String(v.to_string())
}

fn list(vals: &[&str]) -> Value {
    Value::List(vals.iter().map(|v| s(v)).collect())
}

#[test]
fn dispatch_union_default_mode() {
    let result = dispatch("union", &[list(&["a", "b"]), list(&["b", "c"])]).unwrap();
    assert_eq!(result, list(&["a", "b", "c"]));
}

#[test]
fn dispatch_chained_template_expression() {
    // [% lists.sorted(lists.union(l1, l2)).join(", ") %] 相当
    let union = dispatch("union", &[list(&["c", "a"]), list(&["b", "a"])]).unwrap();
    let sorted = dispatch("sorted", &[union]).unwrap();
    let joined = dispatch("join", &[sorted, s(", ")]).unwrap();
    assert_eq!(joined, s("a, b, c"));
}

#[test]
fn dispatch_mode_argument_passes_through() {
    let result = dispatch(
        "difference",
        &[list(&["a", "a", "b", "c"]), list(&["a"]), s("duplicates")],
    )
    .unwrap();
    assert_eq!(result, list(&["a", "b", "c"]));
}

#[test]
fn dispatch_reports_operation_errors() {
    // リストでない第1引数はそのままエラーとして返る
    let err = dispatch("union", &[s("a"), list(&["b"])]).unwrap_err();
    assert!(err.contains("union"), "got: {}", err);
}

#[test]
fn dispatch_unknown_operation_suggests_name() {
    let err = dispatch("interssection", &[]).unwrap_err();
    assert!(err.contains("intersection"), "got: {}", err);
}

#[test]
fn lookup_exposes_registration_tables() {
    assert!(lookup("symmetric_difference").is_some());
    assert!(lookup("shiftval").is_none());

    let names = function_names();
    for expected in [
        "unique", "compact", "union", "difference", "intersection", "symmetric_difference",
        "delete", "is_equal", "not_equal", "sorted", "at", "first", "last", "unshiftval",
        "pushval", "indexval", "rindexval", "set", "minval", "maxval", "minalph", "maxalph",
        "count", "impose", "reverse", "rotate", "clear", "fill", "join", "splice",
    ] {
        assert!(names.contains(&expected), "missing: {}", expected);
    }
}

#[test]
fn mutating_accessors_are_bound_directly() {
    let mut items: im::Vector<Value> = vec![s("a"), s("b"), s("c")].into();
    assert_eq!(listops::builtins::access::shiftval(&mut items), s("a"));
    assert_eq!(listops::builtins::access::popval(&mut items), s("c"));
    assert_eq!(items, im::Vector::from(vec![s("b")]));
}
