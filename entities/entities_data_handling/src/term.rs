//! Term Module
//!
//! Provides the closed `Term` enum produced by the decoder and consumed by the
//! encoder, along with the record types it carries.
//!
//! ## Integers
//!
//! A term integer is canonical when values in the signed 32-bit range are held
//! as `SmallInt` and everything else as `BigInt`. The decoder only produces
//! canonical integers, and `Term::from(i64)` / `Term::from(BigNumber)`
//! canonicalize, so `decode(encode(t)) == t` holds for canonical terms.

use crate::atom::{Atom, STRUCT_MARKER};
use crate::bits::BitString;
use crate::error::DataError;
use crate::map::TermMap;
use crate::object::Object;
use entities_utilities::BigNumber;
use std::sync::Arc;

/// A decoded (or to-be-encoded) Erlang term
#[derive(Clone, Debug, PartialEq)]
pub enum Term {
    /// The atom `nil`
    Nil,
    /// The atoms `true` / `false`
    Bool(bool),
    /// Integer held in machine width
    SmallInt(i64),
    /// Arbitrary precision integer
    BigInt(BigNumber),
    /// IEEE-754 double
    Float(f64),
    /// Any atom not special-cased and not resolved to a type
    Atom(Atom),
    /// `BINARY_EXT` payload
    Binary(Vec<u8>),
    /// `STRING_EXT` payload: a list of small integers sent compactly
    ///
    /// `STRING_EXT` holds at most 65535 bytes. Longer byte lists are written
    /// as a `LIST_EXT` of small integers and decode back as `Term::List`.
    ByteList(Vec<u8>),
    /// Proper or improper list
    List(List),
    /// Fixed arity tuple
    Tuple(Vec<Term>),
    /// Map
    Map(TermMap),
    /// Typed record decoded from (or encoded as) a map with `__struct__`
    Struct(Struct),
    /// Module atom resolved to a registered host type
    Type(TypeName),
    /// Host value that encodes itself or exposes a field map
    Object(Object),
    /// Process identifier
    Pid(Pid),
    /// Reference
    Reference(Reference),
    /// Byte string with a partial last byte
    BitString(BitString),
}

/// List elements plus an optional improper tail
#[derive(Clone, Debug, Default, PartialEq)]
pub struct List {
    pub elements: Vec<Term>,
    pub tail: Option<Box<Term>>,
}

impl List {
    /// Proper list
    pub fn proper(elements: Vec<Term>) -> Self {
        Self {
            elements,
            tail: None,
        }
    }

    /// Improper list ending in `tail`
    pub fn improper(elements: Vec<Term>, tail: Term) -> Self {
        Self {
            elements,
            tail: Some(Box::new(tail)),
        }
    }

    /// Whether the list ends in the empty list
    pub fn is_proper(&self) -> bool {
        self.tail.is_none()
    }

    /// Whether this is `[]`
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty() && self.tail.is_none()
    }
}

/// Fully qualified host type name, e.g. `MyApp::User`
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeName(Arc<str>);

impl TypeName {
    pub fn new(name: &str) -> Self {
        TypeName(Arc::from(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the name is empty (an anonymous type)
    pub fn is_anonymous(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&str> for TypeName {
    fn from(name: &str) -> Self {
        TypeName::new(name)
    }
}

impl std::fmt::Display for TypeName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Generic typed record: a type name plus its fields
///
/// `fields` never holds the `__struct__` key; the encoder writes it.
#[derive(Clone, Debug, PartialEq)]
pub struct Struct {
    pub type_name: TypeName,
    pub fields: TermMap,
}

impl Struct {
    pub fn new(type_name: TypeName, fields: TermMap) -> Self {
        Self {
            type_name,
            fields: fields.without_struct_marker(),
        }
    }

    /// Look up a field by atom name
    pub fn field(&self, name: &str) -> Option<&Term> {
        self.fields.get_atom(name)
    }
}

/// Process identifier (`NEW_PID_EXT`)
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Pid {
    pub node: Atom,
    pub id: u32,
    pub serial: u32,
    pub creation: u32,
}

impl Pid {
    pub fn new(node: Atom, id: u32, serial: u32, creation: u32) -> Self {
        Self {
            node,
            id,
            serial,
            creation,
        }
    }

    /// Pid on `nonode@nohost`
    pub fn local(id: u32, serial: u32, creation: u32) -> Self {
        Self::new(Atom::local_node(), id, serial, creation)
    }
}

/// Reference (`NEWER_REFERENCE_EXT`)
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Reference {
    pub node: Atom,
    pub creation: u32,
    pub ids: Vec<u32>,
}

impl Reference {
    pub fn new(node: Atom, creation: u32, ids: Vec<u32>) -> Self {
        Self {
            node,
            creation,
            ids,
        }
    }

    /// Reference on `nonode@nohost`
    pub fn local(creation: u32, ids: Vec<u32>) -> Self {
        Self::new(Atom::local_node(), creation, ids)
    }
}

impl Term {
    /// Atom term from a name
    pub fn atom(name: &str) -> Result<Term, DataError> {
        Atom::new(name).map(Term::Atom)
    }

    /// Proper list term
    pub fn list(elements: Vec<Term>) -> Term {
        Term::List(List::proper(elements))
    }

    /// Improper list term
    pub fn improper_list(elements: Vec<Term>, tail: Term) -> Term {
        Term::List(List::improper(elements, tail))
    }

    /// The empty list `[]`
    pub fn empty_list() -> Term {
        Term::List(List::default())
    }

    /// Tuple term
    pub fn tuple(elements: Vec<Term>) -> Term {
        Term::Tuple(elements)
    }

    /// Binary term
    pub fn binary(bytes: impl Into<Vec<u8>>) -> Term {
        Term::Binary(bytes.into())
    }

    /// Byte list term (`STRING_EXT`)
    pub fn byte_list(bytes: impl Into<Vec<u8>>) -> Term {
        Term::ByteList(bytes.into())
    }

    /// Canonical integer term from an arbitrary precision value
    pub fn integer(value: BigNumber) -> Term {
        match value.to_i32() {
            Some(small) => Term::SmallInt(small as i64),
            None => Term::BigInt(value),
        }
    }

    /// Whether this is `[]`
    pub fn is_empty_list(&self) -> bool {
        matches!(self, Term::List(list) if list.is_empty())
    }

    /// Whether this is the `__struct__` atom
    pub fn is_struct_marker(&self) -> bool {
        matches!(self, Term::Atom(atom) if atom.as_str() == STRUCT_MARKER)
    }

    /// Integer value as i64, for either integer variant
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Term::SmallInt(value) => Some(*value),
            Term::BigInt(value) => value.to_i64(),
            _ => None,
        }
    }

    /// Atom name, for `Atom` terms
    pub fn as_atom(&self) -> Option<&Atom> {
        match self {
            Term::Atom(atom) => Some(atom),
            _ => None,
        }
    }
}

impl From<bool> for Term {
    fn from(value: bool) -> Self {
        Term::Bool(value)
    }
}

impl From<i64> for Term {
    fn from(value: i64) -> Self {
        if i32::try_from(value).is_ok() {
            Term::SmallInt(value)
        } else {
            Term::BigInt(BigNumber::from_i64(value))
        }
    }
}

impl From<i32> for Term {
    fn from(value: i32) -> Self {
        Term::SmallInt(value as i64)
    }
}

impl From<u32> for Term {
    fn from(value: u32) -> Self {
        Term::from(value as i64)
    }
}

impl From<BigNumber> for Term {
    fn from(value: BigNumber) -> Self {
        Term::integer(value)
    }
}

impl From<f64> for Term {
    fn from(value: f64) -> Self {
        Term::Float(value)
    }
}

impl From<&str> for Term {
    fn from(value: &str) -> Self {
        Term::Binary(value.as_bytes().to_vec())
    }
}

impl From<String> for Term {
    fn from(value: String) -> Self {
        Term::Binary(value.into_bytes())
    }
}

impl From<Vec<u8>> for Term {
    fn from(value: Vec<u8>) -> Self {
        Term::Binary(value)
    }
}

impl From<Vec<Term>> for Term {
    fn from(value: Vec<Term>) -> Self {
        Term::list(value)
    }
}

impl From<Atom> for Term {
    fn from(value: Atom) -> Self {
        Term::Atom(value)
    }
}

impl From<TermMap> for Term {
    fn from(value: TermMap) -> Self {
        Term::Map(value)
    }
}

impl From<Struct> for Term {
    fn from(value: Struct) -> Self {
        Term::Struct(value)
    }
}

impl From<TypeName> for Term {
    fn from(value: TypeName) -> Self {
        Term::Type(value)
    }
}

impl From<Object> for Term {
    fn from(value: Object) -> Self {
        Term::Object(value)
    }
}

impl From<Pid> for Term {
    fn from(value: Pid) -> Self {
        Term::Pid(value)
    }
}

impl From<Reference> for Term {
    fn from(value: Reference) -> Self {
        Term::Reference(value)
    }
}

impl From<BitString> for Term {
    fn from(value: BitString) -> Self {
        Term::BitString(value)
    }
}
