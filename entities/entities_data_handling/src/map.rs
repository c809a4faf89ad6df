//! Map Module
//!
//! Provides the key/value container behind `Term::Map` and `Term::Struct`.
//!
//! Terms hold floats, so they cannot be hashed; the map is a vector of pairs
//! with linear lookup. Pairs keep the order they were inserted (or read off
//! the wire), which is also the order the encoder writes them in. Equality
//! ignores that order.

use crate::atom::STRUCT_MARKER;
use crate::term::Term;

/// Insertion ordered key/value pairs
#[derive(Clone, Debug, Default)]
pub struct TermMap {
    entries: Vec<(Term, Term)>,
}

impl TermMap {
    /// Create an empty map
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty map with room for `capacity` pairs
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
        }
    }

    /// Append a pair without checking for an existing key
    ///
    /// Used by the decoder, which keeps every pair the wire declares.
    pub fn push(&mut self, key: Term, value: Term) {
        self.entries.push((key, value));
    }

    /// Insert a pair, replacing the value of an existing equal key
    ///
    /// # Returns
    /// * `Some(old)` - The replaced value
    /// * `None` - The key was new
    pub fn insert(&mut self, key: Term, value: Term) -> Option<Term> {
        match self.entries.iter_mut().rev().find(|(k, _)| *k == key) {
            Some((_, slot)) => Some(std::mem::replace(slot, value)),
            None => {
                self.entries.push((key, value));
                None
            }
        }
    }

    /// Look up a key; with duplicate keys the last pair wins
    pub fn get(&self, key: &Term) -> Option<&Term> {
        self.entries
            .iter()
            .rev()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    /// Look up an atom key by name
    pub fn get_atom(&self, name: &str) -> Option<&Term> {
        self.entries
            .iter()
            .rev()
            .find(|(k, _)| matches!(k, Term::Atom(atom) if atom.as_str() == name))
            .map(|(_, v)| v)
    }

    /// The value stored under `__struct__`, if any
    pub fn struct_marker(&self) -> Option<&Term> {
        self.get_atom(STRUCT_MARKER)
    }

    /// Whether the map holds `key`
    pub fn contains_key(&self, key: &Term) -> bool {
        self.get(key).is_some()
    }

    /// Remove every pair with an equal key, returning the last value
    pub fn remove(&mut self, key: &Term) -> Option<Term> {
        let mut removed = None;
        let mut kept = Vec::with_capacity(self.entries.len());
        for (k, v) in self.entries.drain(..) {
            if k == *key {
                removed = Some(v);
            } else {
                kept.push((k, v));
            }
        }
        self.entries = kept;
        removed
    }

    /// Copy of this map without the `__struct__` pair(s)
    pub fn without_struct_marker(&self) -> TermMap {
        self.entries
            .iter()
            .filter(|(k, _)| !k.is_struct_marker())
            .cloned()
            .collect()
    }

    /// Number of pairs
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the map holds no pairs
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over pairs in insertion order
    pub fn iter(&self) -> std::slice::Iter<'_, (Term, Term)> {
        self.entries.iter()
    }

    /// Iterate over keys in insertion order
    pub fn keys(&self) -> impl Iterator<Item = &Term> {
        self.entries.iter().map(|(k, _)| k)
    }
}

impl PartialEq for TermMap {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self.iter().all(|(k, v)| other.get(k) == Some(v))
            && other.iter().all(|(k, v)| self.get(k) == Some(v))
    }
}

impl FromIterator<(Term, Term)> for TermMap {
    fn from_iter<I: IntoIterator<Item = (Term, Term)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for TermMap {
    type Item = (Term, Term);
    type IntoIter = std::vec::IntoIter<(Term, Term)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a> IntoIterator for &'a TermMap {
    type Item = &'a (Term, Term);
    type IntoIter = std::slice::Iter<'a, (Term, Term)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::atom::Atom;

    fn atom(name: &str) -> Term {
        Term::Atom(Atom::new(name).unwrap())
    }

    #[test]
    fn test_insert_replaces() {
        let mut map = TermMap::new();
        assert_eq!(map.insert(atom("a"), Term::from(1)), None);
        assert_eq!(map.insert(atom("a"), Term::from(2)), Some(Term::from(1)));
        assert_eq!(map.len(), 1);
        assert_eq!(map.get(&atom("a")), Some(&Term::from(2)));
    }

    #[test]
    fn test_push_keeps_duplicates_last_wins() {
        let mut map = TermMap::new();
        map.push(atom("a"), Term::from(1));
        map.push(atom("a"), Term::from(2));
        assert_eq!(map.len(), 2);
        assert_eq!(map.get_atom("a"), Some(&Term::from(2)));
    }

    #[test]
    fn test_equality_ignores_order() {
        let left: TermMap = vec![(atom("a"), Term::from(1)), (atom("b"), Term::from(2))]
            .into_iter()
            .collect();
        let right: TermMap = vec![(atom("b"), Term::from(2)), (atom("a"), Term::from(1))]
            .into_iter()
            .collect();
        assert_eq!(left, right);

        let different: TermMap = vec![(atom("a"), Term::from(1)), (atom("b"), Term::from(3))]
            .into_iter()
            .collect();
        assert_ne!(left, different);
    }

    #[test]
    fn test_struct_marker_helpers() {
        let mut map = TermMap::new();
        map.push(Term::Atom(Atom::struct_marker()), atom("Elixir.Foo"));
        map.push(atom("x"), Term::from(1));
        assert_eq!(map.struct_marker(), Some(&atom("Elixir.Foo")));

        let stripped = map.without_struct_marker();
        assert_eq!(stripped.len(), 1);
        assert!(stripped.struct_marker().is_none());
    }

    #[test]
    fn test_remove() {
        let mut map = TermMap::new();
        map.push(atom("a"), Term::from(1));
        map.push(atom("b"), Term::from(2));
        assert_eq!(map.remove(&atom("a")), Some(Term::from(1)));
        assert_eq!(map.remove(&atom("a")), None);
        assert_eq!(map.len(), 1);
    }
}
