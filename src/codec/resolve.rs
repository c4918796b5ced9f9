use std::borrow::Cow;

use indexmap::IndexMap;
use tracing::{debug, trace};

use super::SchemaCodec;
use super::index::Binding;
use crate::config::DuplicateKeys;
use crate::qs;
use crate::value::{Map, Value};

/// A shared query key waiting for its discriminants.
struct Pending<'a> {
    query: Cow<'a, str>,
    raw: &'a str,
    candidates: &'a [usize],
}

impl SchemaCodec {
    /// Rebuilds a data object from a querystring.
    ///
    /// Always returns an object. Unknown keys, values that decode as
    /// absent, and shared keys whose conditions all fail are left out.
    pub fn decode(&self, query: &str) -> Value {
        let mut selected: IndexMap<Cow<'_, str>, &str> = IndexMap::new();
        for (key, raw) in qs::parse(query) {
            if !self.index.contains(&key) {
                trace!(key = %key, "unknown query key ignored");
                continue;
            }
            match self.config.duplicate_keys {
                DuplicateKeys::First => {
                    selected.entry(key).or_insert(raw);
                }
                DuplicateKeys::Last => {
                    selected.insert(key, raw);
                }
            }
        }

        let mut output = Map::new();
        let mut pending = Vec::new();
        for (query, raw) in selected {
            let candidates = self.index.candidates(&query);
            match candidates {
                [only] => self.write(&mut output, &self.index.bindings[*only], raw),
                _ => pending.push(Pending {
                    query,
                    raw,
                    candidates,
                }),
            }
        }

        while !pending.is_empty() {
            let ready: Vec<bool> = (0..pending.len())
                .map(|i| {
                    !pending
                        .iter()
                        .enumerate()
                        .any(|(j, other)| i != j && self.could_feed(other, &pending[i]))
                })
                .collect();
            let stalled = !ready.contains(&true);
            if stalled {
                let keys: Vec<&str> = pending.iter().map(|p| p.query.as_ref()).collect();
                debug!(
                    ?keys,
                    "decode conditions depend on each other, resolving with the fields decoded so far"
                );
            }

            let mut waiting = Vec::new();
            for (entry, is_ready) in pending.into_iter().zip(ready) {
                if is_ready || stalled {
                    self.resolve(&mut output, &entry);
                } else {
                    waiting.push(entry);
                }
            }
            pending = waiting;
        }

        Value::Object(output)
    }

    /// Whether resolving `producer` could write a field that one of
    /// `consumer`'s conditions looks up.
    fn could_feed(&self, producer: &Pending<'_>, consumer: &Pending<'_>) -> bool {
        consumer.candidates.iter().any(|&c| {
            let target = &self.index.bindings[c];
            let Some(condition) = target.handler().condition() else {
                return false;
            };
            producer.candidates.iter().any(|&p| {
                reads_through(condition, target.scope(), self.index.bindings[p].path())
            })
        })
    }

    fn resolve(&self, output: &mut Map, entry: &Pending<'_>) {
        let chosen = entry
            .candidates
            .iter()
            .map(|&position| &self.index.bindings[position])
            .find(|binding| {
                binding
                    .handler()
                    .condition()
                    .is_some_and(|condition| condition_holds(output, binding.scope(), condition))
            });
        match chosen {
            Some(binding) => self.write(output, binding, entry.raw),
            None => debug!(query = %entry.query, "no decode condition matched, field left out"),
        }
    }

    fn write(&self, output: &mut Map, binding: &Binding, raw: &str) {
        match binding.handler().decode(raw) {
            Some(value) => insert_at(output, binding.path(), value),
            None => trace!(path = %binding.dotted_path(), "value decoded as absent"),
        }
    }
}

/// Whether a condition looked up from `scope` can see a value written at
/// `path`: some segment of `path` is a condition key and everything above
/// it is an enclosing object of `scope`. Nested patterns read below their
/// key, so `{ filter: { mode: .. } }` sees `filter.mode`.
fn reads_through(condition: &Map, scope: &[String], path: &[String]) -> bool {
    path.iter().enumerate().any(|(depth, segment)| {
        depth <= scope.len() && scope[..depth] == path[..depth] && condition.contains_key(segment)
    })
}

/// True when every entry of `condition` matches the nearest value of the
/// same name, looking from `scope` outward to the root.
fn condition_holds(output: &Map, scope: &[String], condition: &Map) -> bool {
    condition.iter().all(|(key, expected)| {
        lookup(output, scope, key).is_some_and(|actual| pattern_matches(actual, expected))
    })
}

fn lookup<'a>(output: &'a Map, scope: &[String], key: &str) -> Option<&'a Value> {
    (0..=scope.len())
        .rev()
        .filter_map(|depth| object_at(output, &scope[..depth]))
        .find_map(|object| object.get(key))
}

fn object_at<'a>(root: &'a Map, path: &[String]) -> Option<&'a Map> {
    path.iter()
        .try_fold(root, |map, segment| map.get(segment)?.as_object())
}

/// Objects in a pattern match as subsets, everything else by equality.
fn pattern_matches(actual: &Value, expected: &Value) -> bool {
    match (actual, expected) {
        (Value::Object(actual), Value::Object(expected)) => expected.iter().all(|(key, value)| {
            actual
                .get(key)
                .is_some_and(|found| pattern_matches(found, value))
        }),
        _ => actual == expected,
    }
}

/// Writes `value` at `path`, creating intermediate objects as needed.
fn insert_at(root: &mut Map, path: &[String], value: Value) {
    let Some((field, parents)) = path.split_last() else {
        return;
    };
    let mut current = root;
    for segment in parents {
        let slot = current
            .entry(segment.clone())
            .or_insert_with(|| Value::Object(Map::new()));
        if !matches!(slot, Value::Object(_)) {
            *slot = Value::Object(Map::new());
        }
        current = match slot {
            Value::Object(map) => map,
            _ => unreachable!(),
        };
    }
    current.insert(field.clone(), value);
}
