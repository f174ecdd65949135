pub mod builtins;
pub mod i18n;
pub mod value;

pub use builtins::sort::register_sort_method;
pub use builtins::{dispatch, function_names, lookup, NativeFn, NativeFunctions};
pub use value::Value;

// ========================================
// システム共通型定義
// ========================================

use ahash::RandomState;

/// listops専用のHashMap型（std::collections::HashMapにahashを適用）
///
/// ahashは高速な非暗号学的ハッシュ（SIMD最適化）。
/// マルチセット集計は要素数に比例してハッシュするため、ここが効く。
/// 将来的にハッシュアルゴリズムを変更する場合もここだけ修正すればOK。
pub type HashMap<K, V> = std::collections::HashMap<K, V, RandomState>;

/// listops専用HashMapを作成するヘルパー関数
#[inline]
pub fn new_hashmap<K, V>() -> HashMap<K, V> {
    HashMap::default()
}

/// listops専用のHashSet型（std::collections::HashSetにahashを適用）
pub type HashSet<T> = std::collections::HashSet<T, RandomState>;

/// listops専用HashSetを作成するヘルパー関数
#[inline]
pub fn new_hashset<T>() -> HashSet<T> {
    HashSet::default()
}
