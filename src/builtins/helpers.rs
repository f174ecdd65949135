//! ビルトイン関数共通のヘルパー
//!
//! マルチセット集計、引数の平坦化、モードフラグのパースなど、
//! 複数のモジュールから使う処理をまとめています。

use crate::i18n::{fmt_msg, MsgKey};
use crate::value::Value;
use crate::{new_hashmap, HashMap};
use im::Vector;

/// ハッシュ化できない値が含まれているかチェック
///
/// FloatはNaNがEq/Hashを壊すため、マルチセット集計を行う操作では
/// 事前に除外する。
pub fn check_hashable(items: &Vector<Value>, func: &str) -> Result<(), String> {
    for item in items {
        if let Value::Float(_) = item {
            return Err(fmt_msg(MsgKey::NotComparable, &[func, item.type_name()]));
        }
    }
    Ok(())
}

/// 要素の出現回数を集計（マルチセットビュー）
pub fn counts(items: &Vector<Value>) -> HashMap<Value, usize> {
    let mut map = new_hashmap();
    for item in items {
        *map.entry(item.clone()).or_insert(0) += 1;
    }
    map
}

/// 追加値引数を平坦化する
///
/// 単一のリスト引数ならその要素列、それ以外なら各引数を
/// 個別の値として扱う（unshiftval/pushval/spliceの引数規約）。
pub fn flatten_values(args: &[Value]) -> Vector<Value> {
    if args.len() == 1 {
        if let Value::List(items) = &args[0] {
            return items.clone();
        }
    }
    args.iter().cloned().collect()
}

/// 重複処理モード（集合演算系で共通）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DupMode {
    Unique,
    Duplicates,
}

impl DupMode {
    /// 省略可能なモード引数をパース（デフォルト: unique）
    pub fn from_args(args: &[Value], idx: usize, func: &str) -> Result<Self, String> {
        match args.get(idx) {
            None | Some(Value::Nil) => Ok(DupMode::Unique),
            Some(Value::String(s)) => match s.as_str() {
                "unique" => Ok(DupMode::Unique),
                "duplicates" => Ok(DupMode::Duplicates),
                other => Err(fmt_msg(MsgKey::InvalidOpMode, &[func, other])),
            },
            Some(v) => Err(fmt_msg(MsgKey::InvalidOpMode, &[func, &v.as_text()])),
        }
    }
}

/// rotateの回転方向
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// 先頭の要素を末尾へ送る（front to last）
    FrontToLast,
    /// 末尾の要素を先頭へ送る（last to front）
    LastToFront,
}

impl Direction {
    pub fn parse(s: &str, func: &str) -> Result<Self, String> {
        match s {
            "ftol" => Ok(Direction::FrontToLast),
            "ltof" => Ok(Direction::LastToFront),
            other => Err(fmt_msg(MsgKey::InvalidDirection, &[func, other])),
        }
    }
}

/// imposeの文字列配置
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    Append,
    Prepend,
}

impl Placement {
    /// 省略可能な配置引数をパース（デフォルト: append）
    pub fn from_args(args: &[Value], idx: usize, func: &str) -> Result<Self, String> {
        match args.get(idx) {
            None | Some(Value::Nil) => Ok(Placement::Append),
            Some(Value::String(s)) => match s.as_str() {
                "append" => Ok(Placement::Append),
                "prepend" => Ok(Placement::Prepend),
                other => Err(fmt_msg(MsgKey::InvalidPlacement, &[func, other])),
            },
            Some(v) => Err(fmt_msg(MsgKey::InvalidPlacement, &[func, &v.as_text()])),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn s(v: &str) -> Value {
        Value::String(v.to_string())
    }

    #[test]
    fn test_check_hashable_rejects_float() {
        let items: Vector<Value> = vec![s("a"), Value::Float(1.5)].into();
        assert!(check_hashable(&items, "union").is_err());
    }

    #[test]
    fn test_counts_multiset() {
        let items: Vector<Value> = vec![s("a"), s("a"), s("b")].into();
        let map = counts(&items);
        assert_eq!(map.get(&s("a")), Some(&2));
        assert_eq!(map.get(&s("b")), Some(&1));
        assert_eq!(map.get(&s("c")), None);
    }

    #[test]
    fn test_flatten_values_single_list() {
        let args = vec![Value::List(vec![s("a"), s("b")].into())];
        let flat = flatten_values(&args);
        assert_eq!(flat, Vector::from(vec![s("a"), s("b")]));
    }

    #[test]
    fn test_flatten_values_trailing_args() {
        let args = vec![s("a"), s("b"), s("c")];
        let flat = flatten_values(&args);
        assert_eq!(flat.len(), 3);
    }

    #[test]
    fn test_dup_mode_default_and_error() {
        assert_eq!(DupMode::from_args(&[], 2, "union").unwrap(), DupMode::Unique);
        let args = vec![Value::Nil, Value::Nil, s("duplicates")];
        assert_eq!(
            DupMode::from_args(&args, 2, "union").unwrap(),
            DupMode::Duplicates
        );
        let args = vec![Value::Nil, Value::Nil, s("bogus")];
        assert!(DupMode::from_args(&args, 2, "union").is_err());
    }
}
