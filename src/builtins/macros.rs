//! ビルトイン関数用のユーティリティマクロ
//!
//! 引数チェックなど、ネイティブ関数で繰り返し使用されるパターンを
//! 統一するマクロを提供します。

/// 引数の個数をチェックするマクロ
///
/// # 使用例
///
/// ```ignore
/// // 引数が正確に2個必要な場合
/// check_args!(args, 2, "count");
///
/// // 引数が1〜2個の場合
/// check_args!(args, 1..=2, "join");
///
/// // 引数が最低2個必要な場合
/// check_args!(args, 2.., "pushval");
/// ```
#[macro_export]
macro_rules! check_args {
    // 引数が正確に1個
    ($args:expr, 1, $name:expr) => {
        if $args.len() != 1 {
            return Err($crate::i18n::fmt_msg(
                $crate::i18n::MsgKey::Need1Arg,
                &[$name],
            ));
        }
    };

    // 引数が正確に2個
    ($args:expr, 2, $name:expr) => {
        if $args.len() != 2 {
            return Err($crate::i18n::fmt_msg(
                $crate::i18n::MsgKey::Need2Args,
                &[$name],
            ));
        }
    };

    // 引数が正確に3個
    ($args:expr, 3, $name:expr) => {
        if $args.len() != 3 {
            return Err($crate::i18n::fmt_msg(
                $crate::i18n::MsgKey::Need3Args,
                &[$name],
            ));
        }
    };

    // 引数がmin〜max個
    ($args:expr, $min:literal ..= $max:literal, $name:expr) => {
        if $args.len() < $min || $args.len() > $max {
            return Err($crate::i18n::fmt_msg(
                $crate::i18n::MsgKey::NeedNToMArgs,
                &[$name, &$min.to_string(), &$max.to_string()],
            ));
        }
    };

    // 引数が最低min個
    ($args:expr, $min:literal .., $name:expr) => {
        if $args.len() < $min {
            return Err($crate::i18n::fmt_msg(
                $crate::i18n::MsgKey::NeedAtLeastNArgs,
                &[$name, &$min.to_string()],
            ));
        }
    };
}
