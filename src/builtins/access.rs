//! 位置アクセス・要素操作関数
//!
//! 範囲外アクセスと空リストはエラーにせずnilを返す。
//! shiftval/popvalだけは入力リストをその場で変更するため、
//! ディスパッチテーブルには載せずホストが直接束縛する
//! （可変参照が必要なのでfn(&[Value])には収まらない）。

use crate::builtins::helpers::flatten_values;
use crate::builtins::value_helpers::{get_index_arg, get_int_arg, get_list_ref};
use crate::check_args;
use crate::value::Value;
use im::Vector;

/// at - ゼロ基点のインデックスで要素を取得（範囲外はnil）
pub fn native_at(args: &[Value]) -> Result<Value, String> {
    check_args!(args, 2, "at");
    let items = get_list_ref(args, 0, "at")?;
    let pos = get_int_arg(args, 1, "at")?;

    if pos < 0 {
        return Ok(Value::Nil);
    }
    Ok(items.get(pos as usize).cloned().unwrap_or(Value::Nil))
}

/// first - 先頭要素（空リストはnil）
pub fn native_first(args: &[Value]) -> Result<Value, String> {
    check_args!(args, 1, "first");
    let items = get_list_ref(args, 0, "first")?;
    Ok(items.front().cloned().unwrap_or(Value::Nil))
}

/// last - 末尾要素（空リストはnil）
pub fn native_last(args: &[Value]) -> Result<Value, String> {
    check_args!(args, 1, "last");
    let items = get_list_ref(args, 0, "last")?;
    Ok(items.back().cloned().unwrap_or(Value::Nil))
}

/// shiftval - 先頭要素を取り除いて返す（リストをその場で変更）
///
/// 空リストはnilを返し、リストは空のまま。
pub fn shiftval(list: &mut Vector<Value>) -> Value {
    list.pop_front().unwrap_or(Value::Nil)
}

/// popval - 末尾要素を取り除いて返す（リストをその場で変更）
///
/// 空リストはnilを返し、リストは空のまま。
pub fn popval(list: &mut Vector<Value>) -> Value {
    list.pop_back().unwrap_or(Value::Nil)
}

/// unshiftval - 値を先頭に追加した新しいリストを返す
///
/// 第2引数は単一値またはリスト。3個以上の引数はすべて個別の値として追加。
pub fn native_unshiftval(args: &[Value]) -> Result<Value, String> {
    check_args!(args, 2.., "unshiftval");
    let items = get_list_ref(args, 0, "unshiftval")?;

    let mut result = flatten_values(&args[1..]);
    result.append(items.clone());
    Ok(Value::List(result))
}

/// pushval - 値を末尾に追加した新しいリストを返す
///
/// 第2引数は単一値またはリスト。3個以上の引数はすべて個別の値として追加。
pub fn native_pushval(args: &[Value]) -> Result<Value, String> {
    check_args!(args, 2.., "pushval");
    let items = get_list_ref(args, 0, "pushval")?;

    let mut result = items.clone();
    result.append(flatten_values(&args[1..]));
    Ok(Value::List(result))
}

/// indexval - 値が最初に現れるインデックス（見つからなければnil）
pub fn native_indexval(args: &[Value]) -> Result<Value, String> {
    check_args!(args, 2, "indexval");
    let items = get_list_ref(args, 0, "indexval")?;
    let val = &args[1];

    match items.iter().position(|v| v == val) {
        Some(i) => Ok(Value::Integer(i as i64)),
        None => Ok(Value::Nil),
    }
}

/// rindexval - 値が最後に現れるインデックス（見つからなければnil）
pub fn native_rindexval(args: &[Value]) -> Result<Value, String> {
    check_args!(args, 2, "rindexval");
    let items = get_list_ref(args, 0, "rindexval")?;
    let val = &args[1];

    let mut found = None;
    for (i, v) in items.iter().enumerate() {
        if v == val {
            found = Some(i);
        }
    }
    match found {
        Some(i) => Ok(Value::Integer(i as i64)),
        None => Ok(Value::Nil),
    }
}

/// set - 指定インデックスの要素を置き換えた新しいリストを返す
///
/// 長さを超えるインデックスはリストを拡張し、隙間はnilで埋める
/// （fillの拡張規則と同じ）。
pub fn native_set(args: &[Value]) -> Result<Value, String> {
    check_args!(args, 3, "set");
    let items = get_list_ref(args, 0, "set")?;
    let index = get_index_arg(args, 1, "set")?;
    let val = args[2].clone();

    let mut result = items.clone();
    if index < result.len() {
        result.set(index, val);
    } else {
        while result.len() < index {
            result.push_back(Value::Nil);
        }
        result.push_back(val);
    }
    Ok(Value::List(result))
}

// ========================================
// 関数登録テーブル
// ========================================

/// 登録すべき関数のリスト（可変参照が必要なshiftval/popvalを除く）
pub const FUNCTIONS: super::NativeFunctions = &[
    ("at", native_at),
    ("first", native_first),
    ("last", native_last),
    ("unshiftval", native_unshiftval),
    ("pushval", native_pushval),
    ("indexval", native_indexval),
    ("rindexval", native_rindexval),
    ("set", native_set),
];
