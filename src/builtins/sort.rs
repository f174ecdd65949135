//! sorted - ソートメソッド群と名前ディスパッチ
//!
//! メソッド名はレガシー別名テーブルを通して正規名に解決される。
//! 正規メソッド: alphabetic / reverse-alphabetic / numeric /
//! reverse-numeric / random / ipsort / date / reverse-date。
//! ホストは register_sort_method で独自メソッドを追加できる。

use crate::builtins::value_helpers::{get_list_ref, get_opt_string_ref};
use crate::check_args;
use crate::i18n::{fmt_msg, MsgKey};
use crate::value::Value;
use dashmap::DashMap;
use once_cell::sync::Lazy;

#[cfg(feature = "sort-dates")]
use chrono::{DateTime, NaiveDate, NaiveDateTime};
#[cfg(feature = "sort-random")]
use parking_lot::Mutex;
#[cfg(feature = "sort-random")]
use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};

/// ホスト登録ソートメソッドの型
///
/// 要素列と追加引数を受け取り、並べ替えた要素列を返す。
pub type SortMethodFn = fn(Vec<Value>, &[Value]) -> Result<Vec<Value>, String>;

/// 正規メソッド名
const METHOD_NAMES: &[&str] = &[
    "alphabetic",
    "reverse-alphabetic",
    "numeric",
    "reverse-numeric",
    "random",
    "ipsort",
    "date",
    "reverse-date",
];

/// レガシー別名 → 正規名
const METHOD_ALIASES: &[(&str, &str)] = &[
    ("forward", "alphabetic"),
    ("reverse", "reverse-alphabetic"),
    ("forw_num", "numeric"),
    ("rev_num", "reverse-numeric"),
    ("dates", "date"),
    ("rev_dates", "reverse-date"),
];

/// ホスト登録メソッドのレジストリ
static CUSTOM_METHODS: Lazy<DashMap<String, SortMethodFn>> = Lazy::new(DashMap::new);

/// 名前付きソートメソッドを登録する
///
/// 同名の再登録は上書きになる。正規メソッドと別名が優先されるため、
/// それらと同じ名前は登録しても到達しない。
pub fn register_sort_method(name: &str, func: SortMethodFn) {
    CUSTOM_METHODS.insert(name.to_string(), func);
}

/// 別名テーブルを通して正規名へ解決
fn canonical_method(name: &str) -> &str {
    METHOD_ALIASES
        .iter()
        .find(|(alias, _)| *alias == name)
        .map(|(_, canonical)| *canonical)
        .unwrap_or(name)
}

/// sorted - リストをソートして新しいリストを返す
///
/// デフォルトメソッドはalphabetic。入力リストは変更されない。
pub fn native_sorted(args: &[Value]) -> Result<Value, String> {
    check_args!(args, 1.., "sorted");
    let items = get_list_ref(args, 0, "sorted")?;
    let method_raw = get_opt_string_ref(args, 1, "sorted")?.unwrap_or("alphabetic");
    let extra = args.get(2..).unwrap_or(&[]);

    let out: Vec<Value> = items.iter().cloned().collect();
    let sorted = match canonical_method(method_raw) {
        "alphabetic" => sort_by_text(out, false),
        "reverse-alphabetic" => sort_by_text(out, true),
        "numeric" => sort_by_number(out, false),
        "reverse-numeric" => sort_by_number(out, true),
        "ipsort" => sort_by_ip(out)?,
        #[cfg(feature = "sort-random")]
        "random" => sort_random(out),
        #[cfg(feature = "sort-dates")]
        "date" => sort_by_date(out, false),
        #[cfg(feature = "sort-dates")]
        "reverse-date" => sort_by_date(out, true),
        other => dispatch_custom(other, out, extra)?,
    };

    Ok(Value::List(sorted.into()))
}

/// ホスト登録メソッドへのディスパッチ（未知名はサジェスト付きエラー）
fn dispatch_custom(name: &str, items: Vec<Value>, extra: &[Value]) -> Result<Vec<Value>, String> {
    if let Some(func) = CUSTOM_METHODS.get(name) {
        return (*func)(items, extra);
    }

    // feature無効ビルドで落ちてきた正規名は専用メッセージにする
    match name {
        "random" => Err(fmt_msg(MsgKey::MethodRequiresFeature, &[name, "sort-random"])),
        "date" | "reverse-date" => {
            Err(fmt_msg(MsgKey::MethodRequiresFeature, &[name, "sort-dates"]))
        }
        _ => Err(unknown_method_error(name)),
    }
}

/// 未知メソッド名のエラー（編集距離で最も近い候補をサジェスト）
fn unknown_method_error(name: &str) -> String {
    let mut best: Option<(f64, String)> = None;
    let candidates = METHOD_NAMES
        .iter()
        .map(|n| n.to_string())
        .chain(METHOD_ALIASES.iter().map(|(alias, _)| alias.to_string()))
        .chain(CUSTOM_METHODS.iter().map(|e| e.key().clone()));

    for candidate in candidates {
        let score = strsim::jaro_winkler(name, &candidate);
        if score > best.as_ref().map(|(s, _)| *s).unwrap_or(0.0) {
            best = Some((score, candidate));
        }
    }

    match best {
        Some((score, candidate)) if score >= 0.7 => {
            fmt_msg(MsgKey::UnknownSortMethodWithSuggestion, &[name, &candidate])
        }
        _ => fmt_msg(MsgKey::UnknownSortMethod, &[name]),
    }
}

// ========================================
// 比較メソッド実装
// ========================================

/// 文字列表現でソート（バイト順）
fn sort_by_text(items: Vec<Value>, reverse: bool) -> Vec<Value> {
    // decorate-sort-undecorate（キー計算は要素あたり1回）
    let mut keyed: Vec<(String, Value)> = items.into_iter().map(|v| (v.as_text(), v)).collect();
    keyed.sort_by(|a, b| if reverse { b.0.cmp(&a.0) } else { a.0.cmp(&b.0) });
    keyed.into_iter().map(|(_, v)| v).collect()
}

/// 数値としてソート（数値化できない要素は0扱い）
fn sort_by_number(items: Vec<Value>, reverse: bool) -> Vec<Value> {
    let mut keyed: Vec<(f64, Value)> = items.into_iter().map(|v| (v.as_number(), v)).collect();
    keyed.sort_by(|a, b| {
        let ord = a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal);
        if reverse {
            ord.reverse()
        } else {
            ord
        }
    });
    keyed.into_iter().map(|(_, v)| v).collect()
}

/// IPv4アドレスを4オクテットにパース
///
/// オクテット数の不足・超過、数値でない部分、255超はすべてエラー。
/// 不正な入力で黙って壊れた順序を返してはいけない。
fn parse_ipv4(text: &str) -> Option<[u8; 4]> {
    let mut octets = [0u8; 4];
    let mut count = 0;
    for part in text.split('.') {
        if count == 4 || part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        octets[count] = part.parse::<u8>().ok()?;
        count += 1;
    }
    if count != 4 {
        return None;
    }
    Some(octets)
}

/// IPアドレスとしてソート（オクテットごとの数値比較）
fn sort_by_ip(items: Vec<Value>) -> Result<Vec<Value>, String> {
    // 全要素を先にパースする。ソート開始後にエラーは出せないため。
    let mut keyed = Vec::with_capacity(items.len());
    for item in items {
        let text = item.as_text();
        match parse_ipv4(&text) {
            Some(octets) => keyed.push((octets, item)),
            None => return Err(fmt_msg(MsgKey::InvalidIpAddress, &[&text])),
        }
    }
    keyed.sort_by(|a, b| a.0.cmp(&b.0));
    Ok(keyed.into_iter().map(|(_, v)| v).collect())
}

/// 日付としてパース（RFC 3339と主要な書式を順に試す）
#[cfg(feature = "sort-dates")]
fn parse_date(text: &str) -> Option<NaiveDateTime> {
    let text = text.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.naive_utc());
    }
    for fmt in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(text, fmt) {
            return Some(dt);
        }
    }
    for fmt in ["%Y-%m-%d", "%Y/%m/%d", "%d %b %Y"] {
        if let Ok(d) = NaiveDate::parse_from_str(text, fmt) {
            return d.and_hms_opt(0, 0, 0);
        }
    }
    None
}

/// 日付順にソート
///
/// sort_byは安定ソートなので、同時刻の要素は入力順を保つ。
/// パースできない要素はNoneキーになり、時系列順では先頭に並ぶ。
#[cfg(feature = "sort-dates")]
fn sort_by_date(items: Vec<Value>, reverse: bool) -> Vec<Value> {
    let mut keyed: Vec<(Option<NaiveDateTime>, Value)> = items
        .into_iter()
        .map(|v| (parse_date(&v.as_text()), v))
        .collect();
    keyed.sort_by(|a, b| if reverse { b.0.cmp(&a.0) } else { a.0.cmp(&b.0) });
    keyed.into_iter().map(|(_, v)| v).collect()
}

/// シャッフル用RNG
///
/// プロセスで一度だけ現在時刻からシードされ、以後再シードされない。
/// 初回初期化はLazyが直列化する。
#[cfg(feature = "sort-random")]
static SHUFFLE_RNG: Lazy<Mutex<StdRng>> = Lazy::new(|| {
    let seed = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0);
    Mutex::new(StdRng::seed_from_u64(seed))
});

/// ランダムな並び替え
#[cfg(feature = "sort-random")]
fn sort_random(mut items: Vec<Value>) -> Vec<Value> {
    let mut rng = SHUFFLE_RNG.lock();
    items.shuffle(&mut *rng);
    items
}

// ========================================
// 関数登録テーブル
// ========================================

/// 登録すべき関数のリスト
pub const FUNCTIONS: super::NativeFunctions = &[("sorted", native_sorted)];
