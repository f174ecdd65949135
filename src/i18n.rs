/// 国際化メッセージ管理
///
/// 言語設定の優先順位:
/// 1. LISTOPS_LANG 環境変数（listops専用の設定）
/// 2. LANG 環境変数（システムのロケール設定）
/// 3. デフォルト: en
use std::sync::OnceLock;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(usize)]
pub enum Lang {
    En = 0,
    Ja = 1,
}

impl Lang {
    /// 環境変数から言語を取得
    /// 優先順位: LISTOPS_LANG > LANG > デフォルト(en)
    pub fn from_env() -> Self {
        // LISTOPS_LANGが設定されていればそれを優先
        if let Ok(lang) = std::env::var("LISTOPS_LANG") {
            return Self::parse(&lang);
        }

        // LANGから言語コードを取得（ja_JP.UTF-8 -> ja）
        if let Ok(lang) = std::env::var("LANG") {
            let lang_code = lang.split('_').next().unwrap_or("");
            return Self::parse(lang_code);
        }

        // デフォルトは英語
        Lang::En
    }

    /// 言語コードをパース
    fn parse(code: &str) -> Self {
        match code {
            "ja" | "ja_JP" => Lang::Ja,
            "en" | "en_US" | "en_GB" => Lang::En,
            _ => Lang::En, // 未対応言語は英語にフォールバック
        }
    }
}

/// エラーメッセージキー
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(usize)]
pub enum MsgKey {
    // 引数エラー（汎用）
    Need1Arg,         // {0}には1つの引数が必要
    Need2Args,        // {0}には2つの引数が必要
    Need3Args,        // {0}には3つの引数が必要
    NeedAtLeastNArgs, // {0}には少なくとも{1}個の引数が必要
    NeedNToMArgs,     // {0}には{1}〜{2}個の引数が必要

    // 型エラー（汎用）
    MustBeList,        // {0}: {1}はリストである必要があります
    MustBeInteger,     // {0}: {1}は整数である必要があります
    MustBeString,      // {0}: {1}は文字列である必要があります
    MustBeNonNegative, // {0}: {1}は非負の数である必要があります
    NotComparable,     // {0}: {1}値は集合演算に使用できません

    // モードフラグエラー
    InvalidOpMode,    // {0}: 不明なモード '{1}'
    InvalidDirection, // {0}: 不明な方向 '{1}'
    InvalidPlacement, // {0}: 不明な配置 '{1}'

    // ソートエラー
    UnknownSortMethod,               // sorted: 不明なソートメソッド '{0}'
    UnknownSortMethodWithSuggestion, // sorted: 不明なソートメソッド（サジェスト付き）
    InvalidIpAddress,                // sorted: 不正なIPアドレス '{0}'
    MethodRequiresFeature,           // sorted: '{0}'はクレートfeature '{1}'が必要

    // ディスパッチエラー
    UnknownFunction,               // 不明なリスト操作: {0}
    UnknownFunctionWithSuggestion, // 不明なリスト操作（サジェスト付き）
}

/// 英語メッセージ（MsgKeyのusize値でインデックス）
static EN_MSGS: &[&str] = &[
    "{0} requires 1 argument",                                // Need1Arg
    "{0} requires 2 arguments",                               // Need2Args
    "{0} requires 3 arguments",                               // Need3Args
    "{0} requires at least {1} arguments",                    // NeedAtLeastNArgs
    "{0} requires {1} to {2} arguments",                      // NeedNToMArgs
    "{0}: {1} must be a list",                                // MustBeList
    "{0}: {1} must be an integer",                            // MustBeInteger
    "{0}: {1} must be a string",                              // MustBeString
    "{0}: {1} must be non-negative",                          // MustBeNonNegative
    "{0}: {1} values cannot be used in multiset operations",  // NotComparable
    "{0}: unknown mode '{1}' (valid: unique, duplicates)",    // InvalidOpMode
    "{0}: unknown direction '{1}' (valid: ftol, ltof)",       // InvalidDirection
    "{0}: unknown placement '{1}' (valid: append, prepend)",  // InvalidPlacement
    "sorted: unknown sort method '{0}'",                      // UnknownSortMethod
    "sorted: unknown sort method '{0}' (did you mean '{1}'?)", // UnknownSortMethodWithSuggestion
    "sorted: invalid IP address '{0}'",                       // InvalidIpAddress
    "sorted: method '{0}' requires crate feature '{1}'",      // MethodRequiresFeature
    "unknown list operation: {0}",                            // UnknownFunction
    "unknown list operation: {0} (did you mean '{1}'?)",      // UnknownFunctionWithSuggestion
];

/// 日本語メッセージ（MsgKeyのusize値でインデックス）
static JA_MSGS: &[&str] = &[
    "{0}には1つの引数が必要です",                             // Need1Arg
    "{0}には2つの引数が必要です",                             // Need2Args
    "{0}には3つの引数が必要です",                             // Need3Args
    "{0}には少なくとも{1}個の引数が必要です",                 // NeedAtLeastNArgs
    "{0}には{1}〜{2}個の引数が必要です",                      // NeedNToMArgs
    "{0}: {1}はリストである必要があります",                   // MustBeList
    "{0}: {1}は整数である必要があります",                     // MustBeInteger
    "{0}: {1}は文字列である必要があります",                   // MustBeString
    "{0}: {1}は非負の数である必要があります",                 // MustBeNonNegative
    "{0}: {1}値は集合演算に使用できません",                   // NotComparable
    "{0}: 不明なモード '{1}'（有効: unique, duplicates）",    // InvalidOpMode
    "{0}: 不明な方向 '{1}'（有効: ftol, ltof）",              // InvalidDirection
    "{0}: 不明な配置 '{1}'（有効: append, prepend）",         // InvalidPlacement
    "sorted: 不明なソートメソッド '{0}'",                     // UnknownSortMethod
    "sorted: 不明なソートメソッド '{0}'（もしかして '{1}'？）", // UnknownSortMethodWithSuggestion
    "sorted: 不正なIPアドレス '{0}'",                         // InvalidIpAddress
    "sorted: '{0}'にはクレートfeature '{1}'が必要です",       // MethodRequiresFeature
    "不明なリスト操作: {0}",                                  // UnknownFunction
    "不明なリスト操作: {0}（もしかして '{1}'？）",            // UnknownFunctionWithSuggestion
];

/// メッセージマネージャー（配列ベース、高速アクセス）
pub struct Messages {
    lang: Lang,
}

impl Messages {
    /// 言語設定でMessagesインスタンスを作成
    pub fn new(lang: Lang) -> Self {
        Self { lang }
    }

    /// メッセージを取得
    pub fn get(&self, key: MsgKey) -> &'static str {
        match self.lang {
            Lang::En => EN_MSGS[key as usize],
            Lang::Ja => JA_MSGS[key as usize],
        }
    }

    /// メッセージをフォーマット（プレースホルダー {0}, {1}, ... を置換）
    pub fn fmt(&self, key: MsgKey, args: &[&str]) -> String {
        let template = self.get(key);
        let mut result = template.to_string();

        for (i, arg) in args.iter().enumerate() {
            let placeholder = format!("{{{}}}", i);
            result = result.replace(&placeholder, arg);
        }

        result
    }
}

// ========================================
// グローバルインスタンス
// ========================================

static MESSAGES: OnceLock<Messages> = OnceLock::new();

/// グローバルなメッセージインスタンスを取得
pub fn messages() -> &'static Messages {
    MESSAGES.get_or_init(|| Messages::new(Lang::from_env()))
}

/// メッセージを取得してフォーマット
pub fn fmt_msg(key: MsgKey, args: &[&str]) -> String {
    messages().fmt(key, args)
}

/// メッセージを取得
pub fn msg(key: MsgKey) -> &'static str {
    messages().get(key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_msg_tables_cover_all_keys() {
        // 両テーブルの要素数がキー数と一致すること
        assert_eq!(EN_MSGS.len(), JA_MSGS.len());
        assert_eq!(
            EN_MSGS.len(),
            MsgKey::UnknownFunctionWithSuggestion as usize + 1
        );
    }

    #[test]
    fn test_fmt_replaces_placeholders() {
        let m = Messages::new(Lang::En);
        assert_eq!(
            m.fmt(MsgKey::InvalidOpMode, &["union", "bogus"]),
            "union: unknown mode 'bogus' (valid: unique, duplicates)"
        );
    }

    #[test]
    fn test_lang_parse_fallback() {
        assert_eq!(Lang::parse("ja"), Lang::Ja);
        assert_eq!(Lang::parse("fr"), Lang::En);
    }
}
