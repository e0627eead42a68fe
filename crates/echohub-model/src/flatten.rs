//! Multi-value flattening.
//!
//! Query strings, form bodies, and HTTP headers may legally repeat a key.
//! The echo documents collapse single-element value lists to scalars and
//! keep multi-element lists as ordered arrays. This is a pure, total
//! transformation with no failure modes.

use serde_json::Value;

use crate::types::FlatMap;

/// Group an ordered stream of `(key, value)` pairs into `(key, values)`
/// groups, preserving first-seen key order and per-key value order.
///
/// # Examples
///
/// ```
/// use echohub_model::group_pairs;
///
/// let groups = group_pairs([("a", "1"), ("b", "2"), ("a", "3")]);
/// assert_eq!(groups[0], ("a".to_owned(), vec!["1".to_owned(), "3".to_owned()]));
/// assert_eq!(groups[1], ("b".to_owned(), vec!["2".to_owned()]));
/// ```
pub fn group_pairs<I, K, V>(pairs: I) -> Vec<(String, Vec<String>)>
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
{
    let mut groups: Vec<(String, Vec<String>)> = Vec::new();
    for (key, value) in pairs {
        let key = key.into();
        let value = value.into();
        match groups.iter_mut().find(|(name, _)| *name == key) {
            Some((_, values)) => values.push(value),
            None => groups.push((key, vec![value])),
        }
    }
    groups
}

/// Flatten `(key, values)` groups into a JSON mapping where single-element
/// groups become scalar strings and multi-element groups become arrays.
///
/// Keys with no values are skipped, so empty input yields an empty map and
/// the omit-when-empty response contract holds.
///
/// # Examples
///
/// ```
/// use echohub_model::flatten;
///
/// let map = flatten([
///     ("x".to_owned(), vec!["1".to_owned()]),
///     ("y".to_owned(), vec!["a".to_owned(), "b".to_owned()]),
/// ]);
/// assert_eq!(map["x"], "1");
/// assert_eq!(map["y"], serde_json::json!(["a", "b"]));
/// ```
pub fn flatten<I>(groups: I) -> FlatMap
where
    I: IntoIterator<Item = (String, Vec<String>)>,
{
    let mut out = FlatMap::new();
    for (key, mut values) in groups {
        match values.len() {
            0 => {}
            1 => {
                out.insert(key, Value::String(values.remove(0)));
            }
            _ => {
                out.insert(
                    key,
                    Value::Array(values.into_iter().map(Value::String).collect()),
                );
            }
        }
    }
    out
}
