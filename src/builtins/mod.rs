//! リスト操作関数モジュール
//!
//! このモジュールはテンプレートホストへ公開する操作を機能別に整理しています:
//! - setops: 集合演算（unique, compact, union, difference, intersection,
//!   symmetric_difference, delete, is_equal, not_equal）
//! - sort: ソート（sorted + メソッドレジストリ）
//! - access: 位置アクセス（at, first, last, unshiftval, pushval,
//!   indexval, rindexval, set）
//! - transform: 集計・変形（minval, maxval, minalph, maxalph, count,
//!   impose, reverse, rotate, clear, fill, join, splice）
//!
//! 注意: shiftval/popvalは入力リストへの可変参照が必要なため、
//! FUNCTIONSテーブルには載らず、ホストがaccess::shiftval/popvalを
//! 直接束縛します。

pub mod access;
pub mod helpers;
pub mod macros;
pub mod setops;
pub mod sort;
pub mod transform;
pub mod value_helpers;

use crate::i18n::{fmt_msg, MsgKey};
use crate::value::Value;

/// ネイティブ関数の型
pub type NativeFn = fn(&[Value]) -> Result<Value, String>;

/// モジュールごとの関数登録テーブルの型
pub type NativeFunctions = &'static [(&'static str, NativeFn)];

/// 全モジュールの登録テーブル
const MODULE_TABLES: &[NativeFunctions] = &[
    setops::FUNCTIONS,
    sort::FUNCTIONS,
    access::FUNCTIONS,
    transform::FUNCTIONS,
];

/// 名前からネイティブ関数を検索
pub fn lookup(name: &str) -> Option<NativeFn> {
    MODULE_TABLES
        .iter()
        .flat_map(|table| table.iter())
        .find(|(fname, _)| *fname == name)
        .map(|(_, func)| *func)
}

/// 登録されている操作名の一覧（テーブル順）
pub fn function_names() -> Vec<&'static str> {
    MODULE_TABLES
        .iter()
        .flat_map(|table| table.iter())
        .map(|(name, _)| *name)
        .collect()
}

/// 名前でネイティブ関数を呼び出す
///
/// 未知の名前は編集距離で最も近い操作名をサジェストしたエラーになる。
pub fn dispatch(name: &str, args: &[Value]) -> Result<Value, String> {
    match lookup(name) {
        Some(func) => func(args),
        None => {
            let mut best: Option<(f64, &str)> = None;
            for candidate in function_names() {
                let score = strsim::jaro_winkler(name, candidate);
                if score > best.map(|(s, _)| s).unwrap_or(0.0) {
                    best = Some((score, candidate));
                }
            }
            match best {
                Some((score, candidate)) if score >= 0.7 => Err(fmt_msg(
                    MsgKey::UnknownFunctionWithSuggestion,
                    &[name, candidate],
                )),
                _ => Err(fmt_msg(MsgKey::UnknownFunction, &[name])),
            }
        }
    }
}
