use std::borrow::Cow;

use tracing::trace;

use crate::mapping::{includes, Mapping, Nullable};

/// Which side of a key-set membership test survives filtering
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum KeyFilter {
    Select,
    Reject,
}

impl KeyFilter {
    fn keeps(self, is_member: bool) -> bool {
        match self {
            KeyFilter::Select => is_member,
            KeyFilter::Reject => !is_member,
        }
    }
}

/// Keep only the entries whose key is listed in `keys`.
///
/// An empty key list returns the input itself. Requested keys that are not
/// present are ignored.
pub fn select<'a, V: Clone>(input: &'a Mapping<V>, keys: &[&str]) -> Cow<'a, Mapping<V>> {
    filter_keys(KeyFilter::Select, input, keys)
}

/// Drop the entries whose key is listed in `keys`.
///
/// An empty key list returns the input itself.
pub fn reject<'a, V: Clone>(input: &'a Mapping<V>, keys: &[&str]) -> Cow<'a, Mapping<V>> {
    filter_keys(KeyFilter::Reject, input, keys)
}

fn filter_keys<'a, V: Clone>(
    filter: KeyFilter,
    input: &'a Mapping<V>,
    keys: &[&str],
) -> Cow<'a, Mapping<V>> {
    if input.is_empty() {
        return Cow::Owned(Mapping::new());
    }
    if keys.is_empty() {
        return Cow::Borrowed(input);
    }

    let capacity = match filter {
        KeyFilter::Select => keys.len().min(input.len()),
        KeyFilter::Reject => input.len().saturating_sub(keys.len()),
    };
    let mut output = Mapping::with_capacity(capacity);
    for (key, value) in input {
        if filter.keeps(includes(key, keys)) {
            output.insert(key.clone(), value.clone());
        }
    }
    Cow::Owned(output)
}

/// Keep only the entries for which `predicate(key, value)` holds.
///
/// With no predicate, or an empty input, the input is returned as-is.
pub fn select_func<'a, V, F>(predicate: Option<F>, input: &'a Mapping<V>) -> Cow<'a, Mapping<V>>
where
    V: Clone,
    F: Fn(&str, &V) -> bool,
{
    let predicate = match predicate {
        Some(predicate) if !input.is_empty() => predicate,
        _ => return Cow::Borrowed(input),
    };

    let output = input
        .iter()
        .filter(|(key, value)| predicate(key, value))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect();
    Cow::Owned(output)
}

/// Split a mapping in two by `predicate(key, value)`.
///
/// Returns `(matching, non_matching)`. An absent input yields `(None, None)`
/// and an empty input yields `(Some(empty), None)`; any other input yields
/// two present mappings, either of which may be empty.
pub fn partition<V, F>(
    predicate: F,
    input: Option<&Mapping<V>>,
) -> (Option<Mapping<V>>, Option<Mapping<V>>)
where
    V: Clone,
    F: Fn(&str, &V) -> bool,
{
    let input = match input {
        None => return (None, None),
        Some(input) if input.is_empty() => return (Some(Mapping::new()), None),
        Some(input) => input,
    };

    let mut matching = Mapping::new();
    let mut rest = Mapping::new();
    for (key, value) in input {
        if predicate(key, value) {
            matching.insert(key.clone(), value.clone());
        } else {
            rest.insert(key.clone(), value.clone());
        }
    }

    trace!(
        matching = matching.len(),
        rest = rest.len(),
        "partitioned mapping"
    );
    (Some(matching), Some(rest))
}

/// Drop every entry whose value is null.
pub fn collect<V>(input: &Mapping<V>) -> Cow<'_, Mapping<V>>
where
    V: Clone + Nullable,
{
    if input.is_empty() {
        return Cow::Borrowed(input);
    }

    let output = input
        .iter()
        .filter(|(_, value)| !value.is_null())
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect();
    Cow::Owned(output)
}
