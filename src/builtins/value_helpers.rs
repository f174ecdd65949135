//! Value型の抽出・変換ヘルパー関数
//!
//! ネイティブ関数でのValue型チェックとデータ抽出を統一するヘルパー関数群。
//! パターンマッチの重複を削減し、エラーメッセージを統一します。

use crate::i18n::{fmt_msg, MsgKey};
use crate::value::Value;
use im::Vector;

/// 引数位置の説明（エラーメッセージ用）
fn ordinal(idx: usize) -> &'static str {
    match idx {
        0 => "first argument",
        1 => "second argument",
        2 => "third argument",
        3 => "fourth argument",
        _ => "argument",
    }
}

/// 引数からリストの参照を抽出
///
/// # 使用例
///
/// ```
/// use listops::value::Value;
/// use listops::builtins::value_helpers::get_list_ref;
///
/// let args = vec![Value::List(vec![Value::Integer(1)].into())];
/// let items = get_list_ref(&args, 0, "unique").unwrap();
/// assert_eq!(items.len(), 1);
/// ```
pub fn get_list_ref<'a>(
    args: &'a [Value],
    idx: usize,
    func: &str,
) -> Result<&'a Vector<Value>, String> {
    args.get(idx)
        .and_then(|v| v.as_seq())
        .ok_or_else(|| fmt_msg(MsgKey::MustBeList, &[func, ordinal(idx)]))
}

/// 引数からString型の参照を抽出（クローンなし）
pub fn get_string_ref<'a>(args: &'a [Value], idx: usize, func: &str) -> Result<&'a str, String> {
    args.get(idx)
        .and_then(|v| match v {
            Value::String(s) => Some(s.as_str()),
            _ => None,
        })
        .ok_or_else(|| fmt_msg(MsgKey::MustBeString, &[func, ordinal(idx)]))
}

/// 引数からInteger型を抽出
pub fn get_int_arg(args: &[Value], idx: usize, func: &str) -> Result<i64, String> {
    args.get(idx)
        .and_then(|v| match v {
            Value::Integer(n) => Some(*n),
            _ => None,
        })
        .ok_or_else(|| fmt_msg(MsgKey::MustBeInteger, &[func, ordinal(idx)]))
}

/// 省略可能なString引数を抽出
///
/// 引数が存在しない・nilの場合はNone。文字列以外が渡された場合はエラー。
pub fn get_opt_string_ref<'a>(
    args: &'a [Value],
    idx: usize,
    func: &str,
) -> Result<Option<&'a str>, String> {
    match args.get(idx) {
        None | Some(Value::Nil) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.as_str())),
        Some(_) => Err(fmt_msg(MsgKey::MustBeString, &[func, ordinal(idx)])),
    }
}

/// 省略可能なInteger引数を抽出
///
/// 引数が存在しない・nilの場合はNone。整数以外が渡された場合はエラー。
pub fn get_opt_int(args: &[Value], idx: usize, func: &str) -> Result<Option<i64>, String> {
    match args.get(idx) {
        None | Some(Value::Nil) => Ok(None),
        Some(Value::Integer(n)) => Ok(Some(*n)),
        Some(_) => Err(fmt_msg(MsgKey::MustBeInteger, &[func, ordinal(idx)])),
    }
}

/// 非負のインデックス引数を抽出
pub fn get_index_arg(args: &[Value], idx: usize, func: &str) -> Result<usize, String> {
    let n = get_int_arg(args, idx, func)?;
    if n < 0 {
        return Err(fmt_msg(MsgKey::MustBeNonNegative, &[func, ordinal(idx)]));
    }
    Ok(n as usize)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_list_ref_rejects_non_list() {
        let args = vec![Value::String("x".to_string())];
        assert!(get_list_ref(&args, 0, "unique").is_err());
    }

    #[test]
    fn test_get_opt_string_absent_is_none() {
        let args: Vec<Value> = vec![];
        assert_eq!(get_opt_string_ref(&args, 1, "sorted").unwrap(), None);
    }

    #[test]
    fn test_get_opt_int_rejects_string() {
        let args = vec![Value::Nil, Value::String("3".to_string())];
        assert!(get_opt_int(&args, 1, "rotate").is_err());
    }

    #[test]
    fn test_get_index_arg_rejects_negative() {
        let args = vec![Value::Integer(-1)];
        assert!(get_index_arg(&args, 0, "set").is_err());
    }
}
