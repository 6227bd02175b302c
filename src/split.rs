use crate::mapping::Mapping;

/// Split a mapping into aligned key and value sequences.
///
/// `values[i]` is always the value stored under `keys[i]`. The order of the
/// pairs themselves follows the mapping's iteration order and may change
/// between calls.
pub fn split<V>(input: &Mapping<V>) -> (Vec<&str>, Vec<&V>) {
    if input.is_empty() {
        return (Vec::new(), Vec::new());
    }

    let mut keys = Vec::with_capacity(input.len());
    let mut values = Vec::with_capacity(input.len());
    for (key, value) in input {
        keys.push(key.as_str());
        values.push(value);
    }
    (keys, values)
}

/// Keys of the mapping, in unspecified order.
pub fn keys<V>(input: &Mapping<V>) -> Vec<&str> {
    split(input).0
}

/// Values of the mapping, in unspecified order.
pub fn values<V>(input: &Mapping<V>) -> Vec<&V> {
    split(input).1
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture() -> Mapping<Option<i64>> {
        Mapping::from([
            ("key1".to_string(), Some(1)),
            ("key2".to_string(), Some(2)),
            ("key3".to_string(), Some(292929)),
            ("key4".to_string(), Some(4)),
            ("key5".to_string(), None),
        ])
    }

    #[test]
    fn test_split_keeps_pairs_aligned() {
        let input = fixture();
        let (keys, values) = split(&input);

        assert_eq!(keys.len(), input.len());
        assert_eq!(values.len(), input.len());

        for (index, key) in keys.iter().enumerate() {
            assert_eq!(input.get(*key), Some(values[index]));
        }
    }

    #[test]
    fn test_split_empty() {
        let input: Mapping<i32> = Mapping::new();
        let (keys, values) = split(&input);
        assert!(keys.is_empty());
        assert!(values.is_empty());
    }

    #[test]
    fn test_keys_and_values() {
        let input = fixture();

        let mut got_keys = keys(&input);
        got_keys.sort();
        assert_eq!(got_keys, vec!["key1", "key2", "key3", "key4", "key5"]);

        let got_values = values(&input);
        assert_eq!(got_values.len(), 5);
        assert!(got_values.contains(&&Some(292929)));
        assert!(got_values.contains(&&None));
    }
}
