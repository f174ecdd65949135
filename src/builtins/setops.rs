//! 集合演算関数
//!
//! union / difference / intersection / symmetric_difference / delete /
//! is_equal は共通の契約を持つ: 1〜2個のリストと省略可能なモード
//! （unique がデフォルト、duplicates で多重集合扱い）を受け取り、
//! 入力を変更せず新しいリストを返す。

use crate::builtins::helpers::{check_hashable, counts, DupMode};
use crate::builtins::value_helpers::get_list_ref;
use crate::check_args;
use crate::new_hashset;
use crate::value::Value;
use im::Vector;

/// 先頭出現順を保った重複除去（union/uniqueの共通処理）
fn dedup_items(items: &Vector<Value>, func: &str) -> Result<Vector<Value>, String> {
    check_hashable(items, func)?;

    let mut seen = new_hashset();
    let mut result = Vector::new();
    for item in items {
        if seen.insert(item.clone()) {
            result.push_back(item.clone());
        }
    }
    Ok(result)
}

/// unique - 重複除去（先頭出現順を保持）
pub fn native_unique(args: &[Value]) -> Result<Value, String> {
    check_args!(args, 1, "unique");
    let items = get_list_ref(args, 0, "unique")?;
    Ok(Value::List(dedup_items(items, "unique")?))
}

/// compact - nil要素を除去
pub fn native_compact(args: &[Value]) -> Result<Value, String> {
    check_args!(args, 1, "compact");
    let items = get_list_ref(args, 0, "compact")?;

    let result: Vector<Value> = items
        .iter()
        .filter(|v| !matches!(v, Value::Nil))
        .cloned()
        .collect();
    Ok(Value::List(result))
}

/// union - 和集合（list1 + list2）
///
/// uniqueモードでは連結後に重複除去、duplicatesモードでは連結そのまま。
pub fn native_union(args: &[Value]) -> Result<Value, String> {
    check_args!(args, 2..=3, "union");
    let list1 = get_list_ref(args, 0, "union")?;
    let list2 = get_list_ref(args, 1, "union")?;
    let mode = DupMode::from_args(args, 2, "union")?;

    let mut combined = list1.clone();
    combined.append(list2.clone());

    match mode {
        DupMode::Unique => Ok(Value::List(dedup_items(&combined, "union")?)),
        DupMode::Duplicates => Ok(Value::List(combined)),
    }
}

/// difference - 差集合（list1からlist2の要素を除く）
///
/// uniqueモードは値単位（一致する値の全出現を除去）、
/// duplicatesモードは出現単位（list2の1出現がlist1の1出現を左から打ち消す）。
pub fn native_difference(args: &[Value]) -> Result<Value, String> {
    check_args!(args, 2..=3, "difference");
    let list1 = get_list_ref(args, 0, "difference")?;
    let list2 = get_list_ref(args, 1, "difference")?;
    let mode = DupMode::from_args(args, 2, "difference")?;

    check_hashable(list1, "difference")?;
    check_hashable(list2, "difference")?;

    match mode {
        DupMode::Unique => {
            let mut exclude = new_hashset();
            for item in list2 {
                exclude.insert(item.clone());
            }

            let result: Vector<Value> = list1
                .iter()
                .filter(|v| !exclude.contains(v))
                .cloned()
                .collect();
            Ok(Value::List(result))
        }
        DupMode::Duplicates => {
            // list2の出現数だけlist1の出現を打ち消す。余剰は単に未使用。
            let mut budget = counts(list2);
            let mut result = Vector::new();
            for item in list1 {
                match budget.get_mut(item) {
                    Some(n) if *n > 0 => *n -= 1,
                    _ => result.push_back(item.clone()),
                }
            }
            Ok(Value::List(result))
        }
    }
}

/// intersection - 積集合
///
/// list1の出現順に、list2側の残出現数がある値だけを採用する。
/// list1側のnil要素はスキップされる。
pub fn native_intersection(args: &[Value]) -> Result<Value, String> {
    check_args!(args, 2..=3, "intersection");
    let list1 = get_list_ref(args, 0, "intersection")?;
    let list2 = get_list_ref(args, 1, "intersection")?;
    let mode = DupMode::from_args(args, 2, "intersection")?;

    check_hashable(list1, "intersection")?;
    check_hashable(list2, "intersection")?;

    let mut available = counts(list2);
    let mut emitted = Vector::new();
    for item in list1 {
        if matches!(item, Value::Nil) {
            continue;
        }
        if let Some(n) = available.get_mut(item) {
            if *n > 0 {
                *n -= 1;
                emitted.push_back(item.clone());
            }
        }
    }

    match mode {
        DupMode::Unique => Ok(Value::List(dedup_items(&emitted, "intersection")?)),
        DupMode::Duplicates => Ok(Value::List(emitted)),
    }
}

/// symmetric_difference - 対称差
///
/// uniqueモード: どちらか一方にのみ存在する値（重複除去、list1→list2の走査順）。
/// duplicatesモード: 両側でmin(count1, count2)出現を打ち消し、
/// 残り|count1 - count2|出現を値の初出位置（list1→list2走査）にまとめて出力する。
pub fn native_symmetric_difference(args: &[Value]) -> Result<Value, String> {
    check_args!(args, 2..=3, "symmetric_difference");
    let list1 = get_list_ref(args, 0, "symmetric_difference")?;
    let list2 = get_list_ref(args, 1, "symmetric_difference")?;
    let mode = DupMode::from_args(args, 2, "symmetric_difference")?;

    check_hashable(list1, "symmetric_difference")?;
    check_hashable(list2, "symmetric_difference")?;

    match mode {
        DupMode::Unique => {
            let set1: crate::HashSet<Value> = list1.iter().cloned().collect();
            let set2: crate::HashSet<Value> = list2.iter().cloned().collect();

            let mut seen = new_hashset();
            let mut result = Vector::new();

            // list1にのみ存在する値
            for item in list1 {
                if !set2.contains(item) && seen.insert(item.clone()) {
                    result.push_back(item.clone());
                }
            }

            // list2にのみ存在する値
            for item in list2 {
                if !set1.contains(item) && seen.insert(item.clone()) {
                    result.push_back(item.clone());
                }
            }

            Ok(Value::List(result))
        }
        DupMode::Duplicates => {
            let count1 = counts(list1);
            let count2 = counts(list2);

            let mut seen = new_hashset();
            let mut result = Vector::new();
            for item in list1.iter().chain(list2.iter()) {
                if seen.insert(item.clone()) {
                    let n1 = count1.get(item).copied().unwrap_or(0);
                    let n2 = count2.get(item).copied().unwrap_or(0);
                    for _ in 0..n1.abs_diff(n2) {
                        result.push_back(item.clone());
                    }
                }
            }

            Ok(Value::List(result))
        }
    }
}

/// delete - 値を削除
///
/// uniqueモードは全出現、duplicatesモードは最初の1出現のみ削除する。
pub fn native_delete(args: &[Value]) -> Result<Value, String> {
    check_args!(args, 2..=3, "delete");
    let items = get_list_ref(args, 0, "delete")?;
    let val = &args[1];
    let mode = DupMode::from_args(args, 2, "delete")?;

    match mode {
        DupMode::Unique => {
            let result: Vector<Value> = items.iter().filter(|v| *v != val).cloned().collect();
            Ok(Value::List(result))
        }
        DupMode::Duplicates => {
            let mut removed = false;
            let mut result = Vector::new();
            for item in items {
                if !removed && item == val {
                    removed = true;
                    continue;
                }
                result.push_back(item.clone());
            }
            Ok(Value::List(result))
        }
    }
}

/// 順序無視の等価判定（is_equal/not_equal共通）
fn lists_equal(args: &[Value], func: &str) -> Result<bool, String> {
    let list1 = get_list_ref(args, 0, func)?;
    let list2 = get_list_ref(args, 1, func)?;
    let mode = DupMode::from_args(args, 2, func)?;

    check_hashable(list1, func)?;
    check_hashable(list2, func)?;

    match mode {
        // 値の集合として比較（出現数は無視）
        DupMode::Unique => {
            let set1: crate::HashSet<Value> = list1.iter().cloned().collect();
            let set2: crate::HashSet<Value> = list2.iter().cloned().collect();
            Ok(set1 == set2)
        }
        // 出現数まで含めた多重集合として比較
        DupMode::Duplicates => Ok(counts(list1) == counts(list2)),
    }
}

/// is_equal - 順序無視の等価判定
pub fn native_is_equal(args: &[Value]) -> Result<Value, String> {
    check_args!(args, 2..=3, "is_equal");
    Ok(Value::Bool(lists_equal(args, "is_equal")?))
}

/// not_equal - is_equalの論理否定
pub fn native_not_equal(args: &[Value]) -> Result<Value, String> {
    check_args!(args, 2..=3, "not_equal");
    Ok(Value::Bool(!lists_equal(args, "not_equal")?))
}

// ========================================
// 関数登録テーブル
// ========================================

/// 登録すべき関数のリスト
pub const FUNCTIONS: super::NativeFunctions = &[
    ("unique", native_unique),
    ("compact", native_compact),
    ("union", native_union),
    ("difference", native_difference),
    ("intersection", native_intersection),
    ("symmetric_difference", native_symmetric_difference),
    ("delete", native_delete),
    ("is_equal", native_is_equal),
    ("not_equal", native_not_equal),
];
