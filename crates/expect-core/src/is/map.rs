use crate::expectation::{expect_fn, Expectation};
use std::collections::{BTreeMap, HashMap};
use std::fmt::Debug;
use std::hash::{BuildHasher, Hash};

/// Key lookup and length over the standard maps.
pub trait MapLike<K, V>: Debug {
    fn lookup(&self, key: &K) -> Option<&V>;
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<K, V, S> MapLike<K, V> for HashMap<K, V, S>
where
    K: Eq + Hash + Debug,
    V: Debug,
    S: BuildHasher,
{
    fn lookup(&self, key: &K) -> Option<&V> {
        self.get(key)
    }

    fn len(&self) -> usize {
        HashMap::len(self)
    }
}

impl<K, V> MapLike<K, V> for BTreeMap<K, V>
where
    K: Ord + Debug,
    V: Debug,
{
    fn lookup(&self, key: &K) -> Option<&V> {
        self.get(key)
    }

    fn len(&self) -> usize {
        BTreeMap::len(self)
    }
}

/// `map` holds `key` mapped to `value`.
pub fn map_containing<'a, M, K, V>(map: &'a M, key: K, value: V) -> impl Expectation + 'a
where
    M: MapLike<K, V>,
    K: Debug + 'a,
    V: PartialEq + Debug + 'a,
{
    expect_fn(move |reporter| match map.lookup(&key) {
        None => reporter.error(&format!(
            "expected <{:?}> to contain key <{:?}> but that key does not exist",
            map, key
        )),
        Some(got) if *got != value => reporter.error(&format!(
            "expected <{:?}> to contain key <{:?}> with value <{:?}> but got <{:?}>",
            map, key, value, got
        )),
        Some(_) => {}
    })
}

/// `map` has exactly `want` entries.
pub fn map_of_len<K, V, M>(map: &M, want: usize) -> impl Expectation + '_
where
    M: MapLike<K, V>,
{
    expect_fn(move |reporter| {
        let got = map.len();
        if got != want {
            reporter.error(&format!(
                "expected {:?} to have len {} but got {}",
                map, want, got
            ));
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reporter::RecordingReporter;

    #[test]
    fn test_map_containing() {
        let mut map = BTreeMap::new();
        map.insert("spam", 1);

        let mut reporter = RecordingReporter::new();
        map_containing(&map, "spam", 1).expect(&mut reporter);
        assert!(!reporter.failed);

        map_containing(&map, "eggs", 1).expect(&mut reporter);
        map_containing(&map, "spam", 2).expect(&mut reporter);
        assert_eq!(
            reporter.logs,
            vec![
                "expected <{\"spam\": 1}> to contain key <\"eggs\"> but that key does not exist",
                "expected <{\"spam\": 1}> to contain key <\"spam\"> with value <2> but got <1>",
            ]
        );
    }

    #[test]
    fn test_map_of_len() {
        let mut map = HashMap::new();
        map.insert(1, "one");

        let mut reporter = RecordingReporter::new();
        map_of_len(&map, 1).expect(&mut reporter);
        map_of_len(&map, 2).expect(&mut reporter);
        assert_eq!(
            reporter.logs,
            vec!["expected {1: \"one\"} to have len 2 but got 1"]
        );
    }
}
