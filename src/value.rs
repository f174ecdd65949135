use im::Vector;
use std::fmt;
use std::hash::{Hash, Hasher};

/// テンプレートホストと受け渡しする値を表現する型
///
/// リスト要素は基本的に文字列だが、ホストによっては数値や
/// 欠損値（Nil）がそのまま渡ってくる。
#[derive(Debug, Clone)]
pub enum Value {
    /// nil値（欠損・範囲外アクセスの結果）
    Nil,
    /// bool値
    Bool(bool),
    /// 整数
    Integer(i64),
    /// 浮動小数点数
    Float(f64),
    /// 文字列
    String(String),
    /// リスト
    List(Vector<Value>),
}

impl Value {
    /// 型名を取得（エラーメッセージ用）
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Nil => "nil",
            Value::Bool(_) => "boolean",
            Value::Integer(_) => "integer",
            Value::Float(_) => "float",
            Value::String(_) => "string",
            Value::List(_) => "list",
        }
    }

    /// リストの内部データ（im::Vector）への参照を返す
    ///
    /// リストでない場合はNoneを返す
    pub fn as_seq(&self) -> Option<&Vector<Value>> {
        match self {
            Value::List(v) => Some(v),
            _ => None,
        }
    }

    /// テンプレート出力用のテキスト表現
    ///
    /// Displayと違い文字列を引用符で囲まず、nilは空文字列になる。
    /// join/imposeなど要素を連結する操作はこちらを使う。
    pub fn as_text(&self) -> String {
        match self {
            Value::Nil => String::new(),
            Value::Bool(b) => b.to_string(),
            Value::Integer(n) => n.to_string(),
            Value::Float(n) => n.to_string(),
            Value::String(s) => s.clone(),
            Value::List(items) => items
                .iter()
                .map(|v| v.as_text())
                .collect::<Vec<_>>()
                .join(" "),
        }
    }

    /// 数値としての解釈
    ///
    /// 数値でない文字列とnilは0として扱う（ホスト言語の数値変換規則）。
    pub fn as_number(&self) -> f64 {
        match self {
            Value::Integer(n) => *n as f64,
            Value::Float(n) => *n,
            Value::Bool(true) => 1.0,
            Value::String(s) => s.trim().parse::<f64>().unwrap_or(0.0),
            _ => 0.0,
        }
    }
}

/// ValueのPartialEq実装
///
/// IntegerとFloatは数値として比較する（ホストは区別しないため）
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Nil, Value::Nil) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Integer(a), Value::Integer(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::Integer(a), Value::Float(b)) | (Value::Float(b), Value::Integer(a)) => {
                *a as f64 == *b
            }
            (Value::String(a), Value::String(b)) => a == b,
            (Value::List(a), Value::List(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Value {}

/// ValueのHash実装
///
/// マルチセット集計（HashMap/HashSetのキー）に必要。
/// FloatはNaNがEqを壊すため、集合演算側のcheck_hashableで事前に
/// 除外される。ここではビット表現をハッシュするに留める。
impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self {
            Value::Nil => 0u8.hash(state),
            Value::Bool(b) => {
                1u8.hash(state);
                b.hash(state);
            }
            // Integer(2) と Float(2.0) は等しいので同じハッシュにする
            Value::Integer(n) => {
                2u8.hash(state);
                (*n as f64).to_bits().hash(state);
            }
            Value::Float(n) => {
                2u8.hash(state);
                n.to_bits().hash(state);
            }
            Value::String(s) => {
                3u8.hash(state);
                s.hash(state);
            }
            Value::List(items) => {
                4u8.hash(state);
                for item in items {
                    item.hash(state);
                }
            }
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Nil => write!(f, "nil"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Integer(n) => write!(f, "{}", n),
            Value::Float(n) => write!(f, "{}", n),
            Value::String(s) => write!(f, "\"{}\"", s),
            Value::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, " ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "]")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integer_float_equality() {
        assert_eq!(Value::Integer(2), Value::Float(2.0));
        assert_ne!(Value::Integer(2), Value::Float(2.5));
    }

    #[test]
    fn test_as_text() {
        assert_eq!(Value::Nil.as_text(), "");
        assert_eq!(Value::String("abc".to_string()).as_text(), "abc");
        assert_eq!(Value::Integer(42).as_text(), "42");
    }

    #[test]
    fn test_as_number_coercion() {
        assert_eq!(Value::String("3.5".to_string()).as_number(), 3.5);
        assert_eq!(Value::String("abc".to_string()).as_number(), 0.0);
        assert_eq!(Value::Nil.as_number(), 0.0);
    }

    #[test]
    fn test_display_quotes_strings() {
        let list = Value::List(vec![Value::String("a".to_string()), Value::Integer(1)].into());
        assert_eq!(format!("{}", list), "[\"a\" 1]");
    }
}
