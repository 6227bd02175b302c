use std::borrow::Cow;

use tracing::trace;

use crate::mapping::Mapping;

/// Union of all `inputs`, where later mappings override earlier ones.
///
/// No inputs gives an empty mapping and a single input is returned as-is.
pub fn merge<'a, V: Clone>(inputs: &[&'a Mapping<V>]) -> Cow<'a, Mapping<V>> {
    match inputs {
        [] => Cow::Owned(Mapping::new()),
        [single] => Cow::Borrowed(*single),
        _ => {
            let capacity = inputs.iter().map(|input| input.len()).max().unwrap_or(0);
            let mut output = Mapping::with_capacity(capacity);
            for input in inputs {
                output.extend(input.iter().map(|(key, value)| (key.clone(), value.clone())));
            }

            trace!(inputs = inputs.len(), entries = output.len(), "merged mappings");
            Cow::Owned(output)
        }
    }
}
