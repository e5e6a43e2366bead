use im::Vector;

use crate::Value;

/// An insertion-ordered persistent map.
///
/// Keys are compared structurally, so they cannot be hashed in general (a
/// key may be a list or a float). Maps in scripts are small; lookups are a
/// linear scan.
#[derive(Clone, Default)]
pub struct MapValue {
    entries: Vector<(Value, Value)>,
}

impl MapValue {
    pub fn new() -> Self {
        MapValue::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn position(&self, key: &Value) -> Option<usize> {
        self.entries.iter().position(|(k, _)| k == key)
    }

    pub fn get(&self, key: &Value) -> Option<&Value> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn contains_key(&self, key: &Value) -> bool {
        self.position(key).is_some()
    }

    /// A map with `key` bound to `value`. An existing key keeps its position.
    #[must_use]
    pub fn insert(&self, key: Value, value: Value) -> Self {
        let mut entries = self.entries.clone();
        match self.position(&key) {
            Some(index) => {
                entries.set(index, (key, value));
            }
            None => entries.push_back((key, value)),
        }
        MapValue { entries }
    }

    #[must_use]
    pub fn remove(&self, key: &Value) -> Self {
        let mut entries = self.entries.clone();
        if let Some(index) = self.position(key) {
            entries.remove(index);
        }
        MapValue { entries }
    }

    pub fn iter(&self) -> impl Iterator<Item = &(Value, Value)> {
        self.entries.iter()
    }
}

impl FromIterator<(Value, Value)> for MapValue {
    /// Later duplicates replace earlier ones.
    fn from_iter<I: IntoIterator<Item = (Value, Value)>>(iter: I) -> Self {
        iter.into_iter()
            .fold(MapValue::new(), |map, (k, v)| map.insert(k, v))
    }
}

/// Equal when both hold the same keys bound to equal values, in any order.
impl PartialEq for MapValue {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .iter()
                .all(|(k, v)| other.get(k).is_some_and(|theirs| theirs == v))
    }
}
