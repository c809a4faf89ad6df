//! Atom Module
//!
//! Provides the atom name type used by `Term::Atom`, pid and reference nodes.
//!
//! Atoms are stored as `Arc<str>` so cloning a decoded term never copies names.
//! Frequently used names are interned once per process.

use crate::error::DataError;
use lazy_static::lazy_static;
use std::fmt;
use std::sync::Arc;

/// Maximum atom length in bytes (`ATOM_UTF8_EXT` carries a 2-byte length)
pub const MAX_ATOM_BYTES: usize = 65535;

/// Maximum atom length in characters accepted by the encoder
pub const MAX_ATOM_CHARS: usize = 255;

/// Reserved map key naming the record type of a struct
pub const STRUCT_MARKER: &str = "__struct__";

/// Default node name for locally created pids and references
pub const LOCAL_NODE: &str = "nonode@nohost";

lazy_static! {
    static ref STRUCT_MARKER_ATOM: Atom = Atom(Arc::from(STRUCT_MARKER));
    static ref LOCAL_NODE_ATOM: Atom = Atom(Arc::from(LOCAL_NODE));
}

/// Validated atom name
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Atom(Arc<str>);

impl Atom {
    /// Create an atom from a name
    ///
    /// # Arguments
    /// * `name` - Atom text
    ///
    /// # Returns
    /// * `Ok(Atom)` - Name is at most 65535 bytes
    /// * `Err(DataError::AtomTooLong)` - Name does not fit `ATOM_UTF8_EXT`
    pub fn new(name: &str) -> Result<Self, DataError> {
        if name.len() > MAX_ATOM_BYTES {
            return Err(DataError::AtomTooLong(name.len()));
        }
        Ok(Atom(Arc::from(name)))
    }

    /// Create an atom from UTF-8 bytes read off the wire
    pub fn from_utf8(bytes: &[u8]) -> Result<Self, DataError> {
        let name = std::str::from_utf8(bytes).map_err(|_| DataError::InvalidUtf8)?;
        Self::new(name)
    }

    /// Create an atom from Latin-1 bytes (legacy `ATOM_EXT` / `SMALL_ATOM_EXT`)
    ///
    /// Every Latin-1 byte maps to the Unicode code point of the same value.
    /// The length limit applies to the Latin-1 bytes; the UTF-8 form of a
    /// non-ASCII name may be up to twice as long.
    pub fn from_latin1(bytes: &[u8]) -> Result<Self, DataError> {
        if bytes.len() > MAX_ATOM_BYTES {
            return Err(DataError::AtomTooLong(bytes.len()));
        }
        if bytes.is_ascii() {
            return Self::from_utf8(bytes);
        }
        let name: String = bytes.iter().map(|&b| b as char).collect();
        Ok(Atom(Arc::from(name)))
    }

    /// The `__struct__` atom
    pub fn struct_marker() -> Atom {
        STRUCT_MARKER_ATOM.clone()
    }

    /// The `nonode@nohost` atom
    pub fn local_node() -> Atom {
        LOCAL_NODE_ATOM.clone()
    }

    /// Atom text
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Length in bytes
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the name is empty (the atom `''`)
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Length in characters
    pub fn char_len(&self) -> usize {
        self.0.chars().count()
    }

    /// Whether the atom prints without quotes in Erlang syntax
    pub fn is_bare(&self) -> bool {
        let mut chars = self.0.chars();
        match chars.next() {
            Some(first) if first.is_ascii_lowercase() => {
                chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '@')
            }
            _ => false,
        }
    }
}

impl TryFrom<&str> for Atom {
    type Error = DataError;

    fn try_from(name: &str) -> Result<Self, Self::Error> {
        Atom::new(name)
    }
}

impl fmt::Debug for Atom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, ":{}", self.0)
    }
}

impl fmt::Display for Atom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_bare() {
            return f.write_str(&self.0);
        }
        f.write_str("'")?;
        for c in self.0.chars() {
            match c {
                '\'' => f.write_str("\\'")?,
                '\\' => f.write_str("\\\\")?,
                _ => write!(f, "{}", c)?,
            }
        }
        f.write_str("'")
    }
}
