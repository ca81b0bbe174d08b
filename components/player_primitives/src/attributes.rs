use std::str::FromStr;
use tracing::debug;

/// Key-value reply for one entity, in the order the server sent it.
///
/// Keys may repeat (a multi-entity reply is one long list); `get` returns
/// the first occurrence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attributes(Vec<(String, String)>);

impl Attributes {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn push(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.push((key.into(), value.into()));
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Splits a multi-entity reply into one mapping per entity.
    ///
    /// Every entity starts at `delimiter` (`file` for songs). Pairs before
    /// the first delimiter belong to no entity and are dropped.
    pub fn split_on(&self, delimiter: &str) -> Vec<Attributes> {
        let mut entities = Vec::new();
        let mut current: Option<Attributes> = None;

        for (key, value) in &self.0 {
            if key == delimiter {
                if let Some(done) = current.take() {
                    entities.push(done);
                }
                current = Some(Attributes::new());
            }
            if let Some(entity) = current.as_mut() {
                entity.push(key.clone(), value.clone());
            }
        }
        entities.extend(current);
        entities
    }

    /// All values stored under `key`, in reply order.
    pub fn values<'a>(&'a self, key: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.0
            .iter()
            .filter(move |(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Numeric field with a zero fallback. Missing and malformed values
    /// both yield `T::default()`; malformed ones are logged.
    pub(crate) fn parse_or_default<T>(&self, key: &str) -> T
    where
        T: FromStr + Default,
    {
        match self.get(key) {
            None => T::default(),
            Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
                debug!(key, raw, "unparsable attribute, using zero");
                T::default()
            }),
        }
    }
}

impl<K, V> FromIterator<(K, V)> for Attributes
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}
