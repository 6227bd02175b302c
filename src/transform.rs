use std::borrow::Cow;

use tracing::debug;

use crate::mapping::Mapping;

/// Rename every key with `f`, keeping values attached to their entry.
///
/// `f` should be injective over the keys of `input`. When two keys are
/// renamed to the same string only one entry survives, and which one is
/// decided by iteration order, so it is unspecified.
pub fn map_keys<V, F>(f: F, input: &Mapping<V>) -> Cow<'_, Mapping<V>>
where
    V: Clone,
    F: Fn(&str) -> String,
{
    if input.is_empty() {
        return Cow::Borrowed(input);
    }

    let mut output = Mapping::with_capacity(input.len());
    for (key, value) in input {
        insert_reporting_collision(&mut output, key, f(key), value.clone());
    }
    Cow::Owned(output)
}

/// Replace every value with `f(value)`. Keys are untouched.
pub fn map_values<V, U, F>(f: F, input: &Mapping<V>) -> Mapping<U>
where
    F: Fn(&V) -> U,
{
    input
        .iter()
        .map(|(key, value)| (key.clone(), f(value)))
        .collect()
}

/// Replace every entry with the pair returned by `f(key, value)`.
///
/// Colliding output keys follow the same rule as [`map_keys`].
pub fn map<V, U, F>(f: F, input: &Mapping<V>) -> Mapping<U>
where
    F: Fn(&str, &V) -> (String, U),
{
    let mut output = Mapping::with_capacity(input.len());
    for (key, value) in input {
        let (new_key, new_value) = f(key, value);
        insert_reporting_collision(&mut output, key, new_key, new_value);
    }
    output
}

fn insert_reporting_collision<V>(output: &mut Mapping<V>, source_key: &str, key: String, value: V) {
    if output.contains_key(&key) {
        debug!(
            source_key,
            key = key.as_str(),
            "transformed key already present, overwriting earlier entry"
        );
    }
    output.insert(key, value);
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_yaml::Value;

    fn yaml_mapping(source: &str) -> Mapping<Value> {
        serde_yaml::from_str(source).unwrap()
    }

    #[test]
    fn test_map_keys_lowercase() {
        let input = yaml_mapping(
            r#"
            key1: 2
            KEY3: aw
            NIL: ~
            "#,
        );

        let got = map_keys(|key| key.to_lowercase(), &input);

        assert_eq!(*got, yaml_mapping("{key1: 2, key3: aw, nil: ~}"));
    }

    #[test]
    fn test_map_keys_uppercase() {
        let input = Mapping::from([("a".to_string(), 1), ("b".to_string(), 2)]);
        let got = map_keys(|key| key.to_uppercase(), &input);

        assert_eq!(
            got.into_owned(),
            Mapping::from([("A".to_string(), 1), ("B".to_string(), 2)])
        );
    }

    #[test]
    fn test_map_keys_collision_keeps_one_entry() {
        let input = Mapping::from([("a".to_string(), 1), ("A".to_string(), 2)]);
        let got = map_keys(|key| key.to_lowercase(), &input);

        assert_eq!(got.len(), 1);
        let survivor = got["a"];
        assert!(survivor == 1 || survivor == 2);
    }

    #[test]
    fn test_map_keys_empty_borrows_input() {
        let input: Mapping<i32> = Mapping::new();
        let got = map_keys(|key| key.to_uppercase(), &input);
        assert!(matches!(got, Cow::Borrowed(_)));
    }

    #[test]
    fn test_map_values() {
        let input = yaml_mapping("{key1: 2, key3: aw, nil: ~}");
        let got = map_values(|_| "1".to_string(), &input);

        assert_eq!(got.len(), 3);
        assert!(got.values().all(|value| value == "1"));
    }

    #[test]
    fn test_map_values_changes_type() {
        let input = Mapping::from([("a".to_string(), 1), ("b".to_string(), 2)]);
        let got = map_values(|value| value * 10 + 1, &input);

        assert_eq!(got, Mapping::from([("a".to_string(), 11), ("b".to_string(), 21)]));
    }

    #[test]
    fn test_map_pairs() {
        let input = Mapping::from([("a".to_string(), 1), ("b".to_string(), 2)]);
        let got = map(|key, value| (format!("{key}_{value}"), value.to_string()), &input);

        assert_eq!(
            got,
            Mapping::from([
                ("a_1".to_string(), "1".to_string()),
                ("b_2".to_string(), "2".to_string()),
            ])
        );
    }

    #[test]
    fn test_map_collision_keeps_one_entry() {
        let input = Mapping::from([("left".to_string(), 1), ("right".to_string(), 2)]);
        let got = map(|_, value| ("side".to_string(), *value), &input);

        assert_eq!(got.len(), 1);
        let survivor = got["side"];
        assert!(survivor == 1 || survivor == 2);
    }

    #[test]
    fn test_map_empty() {
        let input: Mapping<i32> = Mapping::new();
        let got = map(|key, value| (key.to_string(), *value), &input);
        assert!(got.is_empty());
    }
}
