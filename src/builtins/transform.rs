//! 集計・変形関数
//!
//! すべて入力リストを変更せず、新しいリストまたはスカラーを返す。

use crate::builtins::helpers::{flatten_values, Direction, Placement};
use crate::builtins::value_helpers::{
    get_index_arg, get_list_ref, get_opt_int, get_opt_string_ref, get_string_ref,
};
use crate::check_args;
use crate::i18n::{fmt_msg, MsgKey};
use crate::value::Value;
use im::Vector;

/// キー関数で極値要素を選ぶ（同値は先勝ち）
fn extreme_by<K: PartialOrd>(
    items: &Vector<Value>,
    key: impl Fn(&Value) -> K,
    want_max: bool,
) -> Value {
    let mut best: Option<(K, &Value)> = None;
    for item in items {
        let k = key(item);
        let better = match &best {
            None => true,
            Some((bk, _)) => {
                if want_max {
                    k > *bk
                } else {
                    k < *bk
                }
            }
        };
        if better {
            best = Some((k, item));
        }
    }
    best.map(|(_, v)| v.clone()).unwrap_or(Value::Nil)
}

/// minval - 数値として最小の要素（空リストはnil）
pub fn native_minval(args: &[Value]) -> Result<Value, String> {
    check_args!(args, 1, "minval");
    let items = get_list_ref(args, 0, "minval")?;
    Ok(extreme_by(items, |v| v.as_number(), false))
}

/// maxval - 数値として最大の要素（空リストはnil）
pub fn native_maxval(args: &[Value]) -> Result<Value, String> {
    check_args!(args, 1, "maxval");
    let items = get_list_ref(args, 0, "maxval")?;
    Ok(extreme_by(items, |v| v.as_number(), true))
}

/// minalph - 辞書順で最小の要素（空リストはnil）
pub fn native_minalph(args: &[Value]) -> Result<Value, String> {
    check_args!(args, 1, "minalph");
    let items = get_list_ref(args, 0, "minalph")?;
    Ok(extreme_by(items, |v| v.as_text(), false))
}

/// maxalph - 辞書順で最大の要素（空リストはnil）
pub fn native_maxalph(args: &[Value]) -> Result<Value, String> {
    check_args!(args, 1, "maxalph");
    let items = get_list_ref(args, 0, "maxalph")?;
    Ok(extreme_by(items, |v| v.as_text(), true))
}

/// count - 値に等しい要素の個数
pub fn native_count(args: &[Value]) -> Result<Value, String> {
    check_args!(args, 2, "count");
    let items = get_list_ref(args, 0, "count")?;
    let val = &args[1];

    let n = items.iter().filter(|v| *v == val).count();
    Ok(Value::Integer(n as i64))
}

/// impose - 全要素に文字列を連結した新しいリストを返す
///
/// 配置はappend（デフォルト）で後ろ、prependで前。
/// nil要素は空文字列として扱われる。
pub fn native_impose(args: &[Value]) -> Result<Value, String> {
    check_args!(args, 2..=3, "impose");
    let items = get_list_ref(args, 0, "impose")?;
    let text = get_string_ref(args, 1, "impose")?;
    let placement = Placement::from_args(args, 2, "impose")?;

    let result: Vector<Value> = items
        .iter()
        .map(|v| {
            let s = match placement {
                Placement::Append => format!("{}{}", v.as_text(), text),
                Placement::Prepend => format!("{}{}", text, v.as_text()),
            };
            Value::String(s)
        })
        .collect();
    Ok(Value::List(result))
}

/// reverse - 要素順を反転した新しいリストを返す
pub fn native_reverse(args: &[Value]) -> Result<Value, String> {
    check_args!(args, 1, "reverse");
    let items = get_list_ref(args, 0, "reverse")?;

    let result: Vector<Value> = items.iter().rev().cloned().collect();
    Ok(Value::List(result))
}

/// rotate - リストを回転した新しいリストを返す
///
/// 方向はftol（先頭→末尾、デフォルト）/ ltof（末尾→先頭）、回数は
/// デフォルト1。方向を省略して数値を渡した場合はftolの回数とみなす。
/// 回数はリスト長で正規化されるため負数・超過も扱える。
pub fn native_rotate(args: &[Value]) -> Result<Value, String> {
    check_args!(args, 1..=3, "rotate");
    let items = get_list_ref(args, 0, "rotate")?;

    let (direction, num) = match args.get(1) {
        None | Some(Value::Nil) => (Direction::FrontToLast, 1),
        Some(Value::String(s)) => {
            let dir = Direction::parse(s, "rotate")?;
            let num = get_opt_int(args, 2, "rotate")?.unwrap_or(1);
            (dir, num)
        }
        // 方向省略で回数だけ渡された形（rotate(list, 2)）
        Some(Value::Integer(n)) if args.len() == 2 => (Direction::FrontToLast, *n),
        Some(v) => {
            return Err(fmt_msg(MsgKey::InvalidDirection, &["rotate", &v.as_text()]));
        }
    };

    let len = items.len();
    if len == 0 {
        return Ok(Value::List(Vector::new()));
    }

    let shift = match direction {
        Direction::FrontToLast => num.rem_euclid(len as i64) as usize,
        Direction::LastToFront => (len as i64 - num.rem_euclid(len as i64)) as usize % len,
    };

    let mut result = items.clone();
    let front = result.slice(..shift);
    result.append(front);
    Ok(Value::List(result))
}

/// clear - 空リストを返す
pub fn native_clear(args: &[Value]) -> Result<Value, String> {
    check_args!(args, 1, "clear");
    Ok(Value::List(Vector::new()))
}

/// fill - インデックス範囲を値で埋めた新しいリストを返す
///
/// デフォルトはval=""、start=0、length=リスト末尾まで。範囲が末尾を
/// 超える場合はvalで拡張し、旧末尾とstartの間の隙間はnilで埋める。
pub fn native_fill(args: &[Value]) -> Result<Value, String> {
    check_args!(args, 1..=4, "fill");
    let items = get_list_ref(args, 0, "fill")?;
    let val = args.get(1).cloned().unwrap_or(Value::String(String::new()));
    let start = match get_opt_int(args, 2, "fill")? {
        Some(n) if n < 0 => {
            return Err(fmt_msg(MsgKey::MustBeNonNegative, &["fill", "third argument"]));
        }
        Some(n) => n as usize,
        None => 0,
    };
    let length = match get_opt_int(args, 3, "fill")? {
        Some(n) if n < 0 => {
            return Err(fmt_msg(MsgKey::MustBeNonNegative, &["fill", "fourth argument"]));
        }
        Some(n) => n as usize,
        None => items.len().saturating_sub(start),
    };

    let total = items.len().max(start + length);
    let mut result = Vector::new();
    for i in 0..total {
        if i >= start && i < start + length {
            result.push_back(val.clone());
        } else if i < items.len() {
            result.push_back(items.get(i).cloned().unwrap_or(Value::Nil));
        } else {
            result.push_back(Value::Nil);
        }
    }
    Ok(Value::List(result))
}

/// join - 全要素を区切り文字で連結した文字列を返す
///
/// 区切り文字のデフォルトは空文字列。nil要素は空文字列になる。
pub fn native_join(args: &[Value]) -> Result<Value, String> {
    check_args!(args, 1..=2, "join");
    let items = get_list_ref(args, 0, "join")?;
    let sep = get_opt_string_ref(args, 1, "join")?.unwrap_or("");

    let joined = items
        .iter()
        .map(|v| v.as_text())
        .collect::<Vec<_>>()
        .join(sep);
    Ok(Value::String(joined))
}

/// splice - 範囲を削除して値を挿入した新しいリストを返す
///
/// デフォルトはstart=0、length=リスト末尾まで。範囲は長さに
/// クランプされる。挿入値は単一値・リスト・複数引数のいずれでも良い。
pub fn native_splice(args: &[Value]) -> Result<Value, String> {
    check_args!(args, 1.., "splice");
    let items = get_list_ref(args, 0, "splice")?;
    let start = match args.get(1) {
        None | Some(Value::Nil) => 0,
        Some(_) => get_index_arg(args, 1, "splice")?,
    }
    .min(items.len());
    let length = match get_opt_int(args, 2, "splice")? {
        Some(n) if n < 0 => {
            return Err(fmt_msg(MsgKey::MustBeNonNegative, &["splice", "third argument"]));
        }
        Some(n) => (n as usize).min(items.len() - start),
        None => items.len() - start,
    };
    let vals = match args.get(3..) {
        Some(rest) if !rest.is_empty() => flatten_values(rest),
        _ => Vector::new(),
    };

    let mut result = items.clone();
    let tail = result.split_off(start + length);
    result.truncate(start);
    result.append(vals);
    result.append(tail);
    Ok(Value::List(result))
}

// ========================================
// 関数登録テーブル
// ========================================

/// 登録すべき関数のリスト
pub const FUNCTIONS: super::NativeFunctions = &[
    ("minval", native_minval),
    ("maxval", native_maxval),
    ("minalph", native_minalph),
    ("maxalph", native_maxalph),
    ("count", native_count),
    ("impose", native_impose),
    ("reverse", native_reverse),
    ("rotate", native_rotate),
    ("clear", native_clear),
    ("fill", native_fill),
    ("join", native_join),
    ("splice", native_splice),
];

#[cfg(test)]
mod tests {
    use super::*;

    fn s(v: &str) -> Value {
        Value::String(v.to_string())
    }

    fn list(vals: &[&str]) -> Value {
        Value::List(vals.iter().map(|v| s(v)).collect())
    }

    #[test]
    fn test_minval_maxval_numeric() {
        let l = list(&["10", "9", "100"]);
        assert_eq!(native_minval(&[l.clone()]).unwrap(), s("9"));
        assert_eq!(native_maxval(&[l]).unwrap(), s("100"));
    }

    #[test]
    fn test_minval_empty_is_nil() {
        let empty = Value::List(Vector::new());
        assert_eq!(native_minval(&[empty]).unwrap(), Value::Nil);
    }

    #[test]
    fn test_minalph_maxalph() {
        let l = list(&["banana", "apple", "cherry"]);
        assert_eq!(native_minalph(&[l.clone()]).unwrap(), s("apple"));
        assert_eq!(native_maxalph(&[l]).unwrap(), s("cherry"));
    }

    #[test]
    fn test_count() {
        let l = list(&["a", "b", "a", "a"]);
        assert_eq!(native_count(&[l, s("a")]).unwrap(), Value::Integer(3));
    }

    #[test]
    fn test_impose_append_default() {
        let result = native_impose(&[list(&["a", "b"]), s(".txt")]).unwrap();
        assert_eq!(result, list(&["a.txt", "b.txt"]));
    }

    #[test]
    fn test_impose_prepend() {
        let result = native_impose(&[list(&["a", "b"]), s("/tmp/"), s("prepend")]).unwrap();
        assert_eq!(result, list(&["/tmp/a", "/tmp/b"]));
    }

    #[test]
    fn test_reverse_twice_is_identity() {
        let l = list(&["a", "b", "c"]);
        let once = native_reverse(&[l.clone()]).unwrap();
        assert_eq!(once, list(&["c", "b", "a"]));
        let twice = native_reverse(&[once]).unwrap();
        assert_eq!(twice, l);
    }

    #[test]
    fn test_rotate_ftol() {
        let result =
            native_rotate(&[list(&["a", "b", "c", "d"]), s("ftol"), Value::Integer(1)]).unwrap();
        assert_eq!(result, list(&["b", "c", "d", "a"]));
    }

    #[test]
    fn test_rotate_ltof() {
        let result =
            native_rotate(&[list(&["a", "b", "c", "d"]), s("ltof"), Value::Integer(1)]).unwrap();
        assert_eq!(result, list(&["d", "a", "b", "c"]));
    }

    #[test]
    fn test_rotate_roundtrip() {
        let l = list(&["a", "b", "c", "d"]);
        let once = native_rotate(&[l.clone(), s("ftol"), Value::Integer(1)]).unwrap();
        let back = native_rotate(&[once, s("ltof"), Value::Integer(1)]).unwrap();
        assert_eq!(back, l);
    }

    #[test]
    fn test_rotate_count_without_direction() {
        let result = native_rotate(&[list(&["a", "b", "c", "d"]), Value::Integer(2)]).unwrap();
        assert_eq!(result, list(&["c", "d", "a", "b"]));
    }

    #[test]
    fn test_rotate_default_is_ftol_once() {
        let result = native_rotate(&[list(&["a", "b", "c"])]).unwrap();
        assert_eq!(result, list(&["b", "c", "a"]));
    }

    #[test]
    fn test_rotate_normalizes_count() {
        let l = list(&["a", "b", "c"]);
        let result = native_rotate(&[l.clone(), Value::Integer(5)]).unwrap();
        assert_eq!(result, list(&["c", "a", "b"]));
        let result = native_rotate(&[l, Value::Integer(-1)]).unwrap();
        assert_eq!(result, list(&["c", "a", "b"]));
    }

    #[test]
    fn test_rotate_empty_list() {
        let result = native_rotate(&[Value::List(Vector::new())]).unwrap();
        assert_eq!(result, Value::List(Vector::new()));
    }

    #[test]
    fn test_clear() {
        let result = native_clear(&[list(&["a", "b"])]).unwrap();
        assert_eq!(result, Value::List(Vector::new()));
    }

    #[test]
    fn test_fill_extends_past_end() {
        let result = native_fill(&[
            list(&["a", "b", "c"]),
            s("x"),
            Value::Integer(1),
            Value::Integer(4),
        ])
        .unwrap();
        assert_eq!(result, list(&["a", "x", "x", "x", "x"]));
    }

    #[test]
    fn test_fill_defaults_to_rest_of_list() {
        let result = native_fill(&[list(&["a", "b", "c"]), s("x"), Value::Integer(1)]).unwrap();
        assert_eq!(result, list(&["a", "x", "x"]));
    }

    #[test]
    fn test_fill_default_value_is_empty_string() {
        let result = native_fill(&[list(&["a", "b"])]).unwrap();
        assert_eq!(result, list(&["", ""]));
    }

    #[test]
    fn test_fill_gap_beyond_end_is_nil() {
        let result =
            native_fill(&[list(&["a"]), s("x"), Value::Integer(3), Value::Integer(1)]).unwrap();
        assert_eq!(
            result,
            Value::List(vec![s("a"), Value::Nil, Value::Nil, s("x")].into())
        );
    }

    #[test]
    fn test_join_with_separator() {
        let result = native_join(&[list(&["a", "b", "c"]), s(", ")]).unwrap();
        assert_eq!(result, s("a, b, c"));
    }

    #[test]
    fn test_join_default_separator_and_nil() {
        let input = Value::List(vec![s("a"), Value::Nil, s("b")].into());
        let result = native_join(&[input]).unwrap();
        assert_eq!(result, s("ab"));
    }

    #[test]
    fn test_splice_removes_and_inserts() {
        let result = native_splice(&[
            list(&["a", "b", "c", "d"]),
            Value::Integer(1),
            Value::Integer(2),
            list(&["x", "y", "z"]),
        ])
        .unwrap();
        assert_eq!(result, list(&["a", "x", "y", "z", "d"]));
    }

    #[test]
    fn test_splice_defaults_remove_all() {
        let result = native_splice(&[list(&["a", "b"])]).unwrap();
        assert_eq!(result, Value::List(Vector::new()));
    }

    #[test]
    fn test_splice_roundtrip() {
        let l = list(&["a", "b", "c"]);
        let result =
            native_splice(&[l.clone(), Value::Integer(0), Value::Integer(3), l.clone()]).unwrap();
        assert_eq!(result, l);
    }

    #[test]
    fn test_splice_length_clamps() {
        let result =
            native_splice(&[list(&["a", "b"]), Value::Integer(1), Value::Integer(10)]).unwrap();
        assert_eq!(result, list(&["a"]));
    }

    #[test]
    fn test_splice_does_not_mutate_input() {
        let l = list(&["a", "b", "c"]);
        let _ = native_splice(&[l.clone(), Value::Integer(1), Value::Integer(1)]).unwrap();
        assert_eq!(l, list(&["a", "b", "c"]));
    }
}
