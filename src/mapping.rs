use std::collections::HashMap;

/// String-keyed associative container the operations in this crate work on.
///
/// Iteration order is whatever `HashMap` yields and must not be relied upon.
pub type Mapping<V> = HashMap<String, V>;

/// Values that can carry a "no value" sentinel.
///
/// `collect` drops every entry whose value reports `is_null() == true`.
pub trait Nullable {
    fn is_null(&self) -> bool;
}

impl<T> Nullable for Option<T> {
    fn is_null(&self) -> bool {
        self.is_none()
    }
}

impl Nullable for serde_yaml::Value {
    fn is_null(&self) -> bool {
        matches!(self, serde_yaml::Value::Null)
    }
}

impl Nullable for serde_json::Value {
    fn is_null(&self) -> bool {
        matches!(self, serde_json::Value::Null)
    }
}

impl<T: Nullable + ?Sized> Nullable for &T {
    fn is_null(&self) -> bool {
        (**self).is_null()
    }
}

/// Linear membership check over a requested key list.
pub(crate) fn includes(key: &str, keys: &[&str]) -> bool {
    keys.iter().any(|k| *k == key)
}
