//! Size Calculation Module
//!
//! Provides the number of bytes a term takes once encoded. The encoder uses
//! it to reserve its output buffer up front.

use entities_data_handling::{NamespaceTranslator, Term, TermMap};
use infrastructure_bignum_encoding::BignumCodec;
use entities_utilities::BigNumber;

use crate::config::DEFAULT_MAX_DEPTH;
use crate::constants::{MAX_STRING_EXT_LEN, STRUCT_MARKER_BYTES};

/// Bytes assumed for an object, whose encoding is not known in advance
const OBJECT_SIZE_ESTIMATE: usize = 64;

/// Calculate the encoded size of a term, version byte excluded
///
/// Exact for every native variant that encodes successfully; objects count
/// as a fixed estimate. Terms that fail to encode still get a size.
///
/// # Arguments
/// * `term` - The term to measure
/// * `namespace` - Translator used for type names
pub fn encoded_size(term: &Term, namespace: &NamespaceTranslator) -> usize {
    encoded_size_with_depth(term, namespace, DEFAULT_MAX_DEPTH)
}

/// Calculate the encoded size, descending at most `max_depth` levels
///
/// Anything below the limit counts as zero bytes.
pub fn encoded_size_with_depth(term: &Term, namespace: &NamespaceTranslator, max_depth: usize) -> usize {
    size_of_term(term, namespace, max_depth)
}

fn atom_size(byte_len: usize) -> usize {
    if byte_len < 256 {
        2 + byte_len
    } else {
        3 + byte_len
    }
}

fn integer_size(value: i64) -> usize {
    if (0..=255).contains(&value) {
        2
    } else if i32::try_from(value).is_ok() {
        5
    } else {
        BignumCodec::encoded_len(&BigNumber::from_i64(value))
    }
}

fn pairs_size<'a>(
    pairs: impl Iterator<Item = &'a (Term, Term)>,
    namespace: &NamespaceTranslator,
    depth: usize,
) -> usize {
    pairs.fold(0usize, |acc, (key, value)| {
        acc.saturating_add(size_of_term(key, namespace, depth))
            .saturating_add(size_of_term(value, namespace, depth))
    })
}

fn struct_size(type_name: &str, fields: &TermMap, namespace: &NamespaceTranslator, depth: usize) -> usize {
    let name_len = namespace.to_foreign(type_name).len();
    let fields = fields.iter().filter(|(key, _)| !key.is_struct_marker());
    (5 + STRUCT_MARKER_BYTES.len() + atom_size(name_len)).saturating_add(pairs_size(fields, namespace, depth))
}

fn size_of_term(term: &Term, namespace: &NamespaceTranslator, depth: usize) -> usize {
    if depth == 0 {
        return 0;
    }
    let inner = depth - 1;
    match term {
        Term::Nil => atom_size(3),
        Term::Bool(true) => atom_size(4),
        Term::Bool(false) => atom_size(5),
        Term::SmallInt(value) => integer_size(*value),
        Term::BigInt(value) => match value.to_i64() {
            Some(small) => integer_size(small),
            None => BignumCodec::encoded_len(value),
        },
        Term::Float(_) => 9,
        Term::Atom(atom) => atom_size(atom.len()),
        Term::Binary(bytes) => 5 + bytes.len(),
        Term::ByteList(bytes) if bytes.len() <= MAX_STRING_EXT_LEN => 3 + bytes.len(),
        Term::ByteList(bytes) => 6 + 2 * bytes.len(),
        Term::List(list) if list.is_empty() => 1,
        Term::List(list) => {
            let elements = list.elements.iter().fold(0usize, |acc, element| {
                acc.saturating_add(size_of_term(element, namespace, inner))
            });
            let tail = match &list.tail {
                Some(tail) => size_of_term(tail, namespace, inner),
                None => 1,
            };
            (5 + tail).saturating_add(elements)
        }
        Term::Tuple(elements) => {
            let header = if elements.len() < 256 { 2 } else { 5 };
            elements.iter().fold(header, |acc: usize, element| {
                acc.saturating_add(size_of_term(element, namespace, inner))
            })
        }
        Term::Map(map) => 5usize.saturating_add(pairs_size(map.iter(), namespace, inner)),
        Term::Struct(s) => struct_size(s.type_name.as_str(), &s.fields, namespace, inner),
        Term::Type(type_name) => atom_size(namespace.to_foreign(type_name.as_str()).len()),
        Term::Object(_) => OBJECT_SIZE_ESTIMATE,
        Term::Pid(pid) => 1 + atom_size(pid.node.len()) + 12,
        Term::Reference(reference) => {
            (1 + 2 + atom_size(reference.node.len()) + 4).saturating_add(4 * reference.ids.len())
        }
        Term::BitString(bits) => 6 + bits.bytes().len(),
    }
}
