//! Decoding Module
//!
//! Provides the external term format decoder.
//!
//! The decoder walks a `ByteCursor` recursively, one tag at a time. Atoms
//! are resolved as they are read: `true`, `false` and `nil` become native
//! values, module atoms that the registry knows become `Term::Type`, and maps
//! carrying `__struct__` are handed to the registry once all their pairs are
//! read. Any failure aborts the whole decode.

use entities_data_handling::{
    Atom, BitString, List, Pid, Reference, Term, TermMap, TypeName,
};
use infrastructure_bignum_encoding::BignumCodec;
use infrastructure_utilities::{decompress, CompressionError};
use tracing::{debug, trace, warn};

use crate::config::{ByteListMode, CodecConfig};
use crate::constants::*;
use crate::cursor::ByteCursor;
use crate::error::{CodecError, CodecResult};
use crate::registry::TypeRegistry;

/// Decode a term with the default configuration
///
/// # Arguments
/// * `data` - The encoded bytes
/// * `skip_version_check` - The input starts directly at a tag, with no
///   version byte
/// * `registry` - Known host types
///
/// # Returns
/// * `Ok(Term)` - Decoded term
/// * `Err(CodecError)` - Decoding error
pub fn decode(data: &[u8], skip_version_check: bool, registry: &dyn TypeRegistry) -> CodecResult<Term> {
    decode_with_config(data, skip_version_check, registry, &CodecConfig::default())
}

/// Decode a term
///
/// Same as [`decode`] with an explicit configuration.
pub fn decode_with_config(
    data: &[u8],
    skip_version_check: bool,
    registry: &dyn TypeRegistry,
    config: &CodecConfig,
) -> CodecResult<Term> {
    debug!(len = data.len(), skip_version_check, "decoding term");
    let mut decoder = Decoder::new(data, registry, config);
    if !skip_version_check {
        let version = decoder.cursor.read_u8()?;
        if version != VERSION_MAGIC {
            return Err(CodecError::MalformedHeader(version));
        }
    }
    let term = decoder.dec_term()?;
    decoder.finish()?;
    Ok(term)
}

/// Recursive descent over one buffer
pub struct Decoder<'a> {
    cursor: ByteCursor<'a>,
    registry: &'a dyn TypeRegistry,
    config: &'a CodecConfig,
    depth: usize,
}

impl<'a> Decoder<'a> {
    pub fn new(data: &'a [u8], registry: &'a dyn TypeRegistry, config: &'a CodecConfig) -> Self {
        Self {
            cursor: ByteCursor::new(data),
            registry,
            config,
            depth: 0,
        }
    }

    /// Reject leftover bytes when the config is strict
    pub fn finish(&self) -> CodecResult<()> {
        let left = self.cursor.remaining();
        if left > 0 && !self.config.allow_trailing_bytes {
            return Err(CodecError::TrailingBytes(left));
        }
        Ok(())
    }

    /// Decode the term at the cursor
    pub fn dec_term(&mut self) -> CodecResult<Term> {
        if self.depth >= self.config.max_depth {
            return Err(CodecError::DepthLimitExceeded(self.config.max_depth));
        }
        self.depth += 1;
        let result = self.dec_tagged();
        self.depth -= 1;
        result
    }

    fn dec_tagged(&mut self) -> CodecResult<Term> {
        let tag = self.cursor.read_u8()?;
        match tag {
            SMALL_INTEGER_EXT => Ok(Term::SmallInt(self.cursor.read_u8()? as i64)),
            INTEGER_EXT => Ok(Term::SmallInt(self.cursor.read_i32_be()? as i64)),
            SMALL_BIG_EXT => {
                let len = self.cursor.read_u8()? as usize;
                self.dec_big(len)
            }
            LARGE_BIG_EXT => {
                let len = self.cursor.read_u32_be()? as usize;
                self.dec_big(len)
            }
            NEW_FLOAT_EXT => Ok(Term::Float(self.cursor.read_f64_be()?)),
            SMALL_ATOM_UTF8_EXT | ATOM_UTF8_EXT | SMALL_ATOM_EXT | ATOM_EXT => {
                let atom = self.dec_atom_body(tag)?;
                Ok(self.resolve_atom(atom))
            }
            BINARY_EXT => {
                let len = self.cursor.read_u32_be()? as usize;
                Ok(Term::Binary(self.cursor.read_bytes(len)?.to_vec()))
            }
            SMALL_TUPLE_EXT => {
                let arity = self.cursor.read_u8()? as usize;
                self.dec_tuple(arity)
            }
            LARGE_TUPLE_EXT => {
                let arity = self.cursor.read_u32_be()? as usize;
                self.dec_tuple(arity)
            }
            NIL_EXT => Ok(Term::empty_list()),
            STRING_EXT => {
                let len = self.cursor.read_u16_be()? as usize;
                let bytes = self.cursor.read_bytes(len)?.to_vec();
                Ok(match self.config.byte_list_mode {
                    ByteListMode::Integers => Term::ByteList(bytes),
                    ByteListMode::Binary => Term::Binary(bytes),
                })
            }
            LIST_EXT => self.dec_list(),
            MAP_EXT => self.dec_map(),
            NEW_PID_EXT => self.dec_pid(),
            NEWER_REFERENCE_EXT => self.dec_reference(),
            BIT_BINARY_EXT => {
                let len = self.cursor.read_u32_be()? as usize;
                let bits = self.cursor.read_u8()?;
                let bytes = self.cursor.read_bytes(len)?.to_vec();
                Ok(Term::BitString(BitString::new(bytes, bits)?))
            }
            COMPRESSED => self.dec_compressed(),
            other => Err(CodecError::UnknownTag(other)),
        }
    }

    /// Number of items worth reserving room for
    ///
    /// Every item takes at least `min_item_bytes` on the wire, so a count
    /// larger than the remaining input can afford is a lie.
    fn capacity_hint(&self, count: usize, min_item_bytes: usize) -> usize {
        count.min(self.cursor.remaining() / min_item_bytes)
    }

    fn dec_big(&mut self, len: usize) -> CodecResult<Term> {
        let negative = self.cursor.read_u8()? != 0;
        let magnitude = self.cursor.read_bytes(len)?;
        Ok(Term::integer(BignumCodec::decode_magnitude(negative, magnitude)))
    }

    /// Read the length and name of an atom whose tag was already consumed
    fn dec_atom_body(&mut self, tag: u8) -> CodecResult<Atom> {
        let atom = match tag {
            SMALL_ATOM_UTF8_EXT => {
                let len = self.cursor.read_u8()? as usize;
                Atom::from_utf8(self.cursor.read_bytes(len)?)?
            }
            ATOM_UTF8_EXT => {
                let len = self.cursor.read_u16_be()? as usize;
                Atom::from_utf8(self.cursor.read_bytes(len)?)?
            }
            SMALL_ATOM_EXT => {
                let len = self.cursor.read_u8()? as usize;
                Atom::from_latin1(self.cursor.read_bytes(len)?)?
            }
            ATOM_EXT => {
                let len = self.cursor.read_u16_be()? as usize;
                Atom::from_latin1(self.cursor.read_bytes(len)?)?
            }
            other => {
                return Err(CodecError::UnexpectedTag {
                    expected: "atom",
                    found: other,
                })
            }
        };
        Ok(atom)
    }

    /// Atom with no special-name or type resolution, as pid and reference
    /// nodes are read
    fn dec_raw_atom(&mut self) -> CodecResult<Atom> {
        let tag = self.cursor.read_u8()?;
        self.dec_atom_body(tag)
    }

    fn resolve_atom(&self, atom: Atom) -> Term {
        match atom.as_str() {
            "true" => return Term::Bool(true),
            "false" => return Term::Bool(false),
            "nil" => return Term::Nil,
            _ => {}
        }
        if let Some(host_name) = self.config.namespace.to_host(atom.as_str()) {
            if let Some(type_name) = self.registry.resolve_name(&host_name) {
                trace!(atom = atom.as_str(), type_name = type_name.as_str(), "resolved type");
                return Term::Type(type_name);
            }
            trace!(atom = atom.as_str(), "no registered type for module atom");
        }
        Term::Atom(atom)
    }

    fn dec_tuple(&mut self, arity: usize) -> CodecResult<Term> {
        let mut elements = Vec::with_capacity(self.capacity_hint(arity, 1));
        for _ in 0..arity {
            elements.push(self.dec_term()?);
        }
        Ok(Term::Tuple(elements))
    }

    fn dec_list(&mut self) -> CodecResult<Term> {
        let len = self.cursor.read_u32_be()? as usize;
        let mut elements = Vec::with_capacity(self.capacity_hint(len, 1));
        for _ in 0..len {
            elements.push(self.dec_term()?);
        }
        let tail = self.dec_term()?;
        let list = if tail.is_empty_list() {
            List::proper(elements)
        } else {
            List::improper(elements, tail)
        };
        Ok(Term::List(list))
    }

    fn dec_map(&mut self) -> CodecResult<Term> {
        let count = self.cursor.read_u32_be()? as usize;
        let mut map = TermMap::with_capacity(self.capacity_hint(count, 2));
        for _ in 0..count {
            let key = self.dec_term()?;
            let value = self.dec_term()?;
            map.push(key, value);
        }
        self.resolve_struct(map)
    }

    /// Hand a map carrying a known `__struct__` type to the registry
    fn resolve_struct(&self, map: TermMap) -> CodecResult<Term> {
        let type_name: TypeName = match map.struct_marker() {
            Some(Term::Type(type_name)) => type_name.clone(),
            _ => return Ok(Term::Map(map)),
        };
        trace!(type_name = type_name.as_str(), "map carries struct marker");
        match self.registry.decode_from_map(&type_name, &map) {
            Some(Ok(term)) => Ok(term),
            Some(Err(reason)) => {
                warn!(type_name = type_name.as_str(), %reason, "struct decoder rejected map");
                Err(CodecError::StructDecode {
                    type_name: type_name.as_str().to_string(),
                    reason,
                })
            }
            None => Ok(Term::Map(map)),
        }
    }

    fn dec_pid(&mut self) -> CodecResult<Term> {
        let node = self.dec_raw_atom()?;
        let id = self.cursor.read_u32_be()?;
        let serial = self.cursor.read_u32_be()?;
        let creation = self.cursor.read_u32_be()?;
        Ok(Term::Pid(Pid::new(node, id, serial, creation)))
    }

    fn dec_reference(&mut self) -> CodecResult<Term> {
        let count = self.cursor.read_u16_be()? as usize;
        let node = self.dec_raw_atom()?;
        let creation = self.cursor.read_u32_be()?;
        let mut ids = Vec::with_capacity(self.capacity_hint(count, 4));
        for _ in 0..count {
            ids.push(self.cursor.read_u32_be()?);
        }
        Ok(Term::Reference(Reference::new(node, creation, ids)))
    }

    /// Inflate the rest of the input and decode it as a version-less term
    fn dec_compressed(&mut self) -> CodecResult<Term> {
        let expected = self.cursor.read_u32_be()? as usize;
        let compressed = self.cursor.rest();
        let inflated = match decompress(compressed, expected) {
            Ok(inflated) => inflated,
            Err(CompressionError::LimitExceeded(_)) => {
                return Err(CodecError::SizeMismatch {
                    expected,
                    actual: expected + 1,
                })
            }
            // The zlib stream runs to the end of the input, so it is cut there
            Err(CompressionError::Truncated) => {
                return Err(CodecError::TruncatedInput {
                    offset: self.cursor.offset(),
                    needed: 1,
                    available: 0,
                })
            }
            Err(err) => return Err(err.into()),
        };
        if inflated.len() != expected {
            return Err(CodecError::SizeMismatch {
                expected,
                actual: inflated.len(),
            });
        }
        debug!(compressed = compressed.len(), expected, "inflated compressed term");

        let mut inner = Decoder::new(&inflated, self.registry, self.config);
        inner.depth = self.depth;
        let term = inner.dec_term()?;
        inner.finish()?;
        Ok(term)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::{EmptyRegistry, StructRegistry};

    fn dec(data: &[u8]) -> CodecResult<Term> {
        decode(data, false, &EmptyRegistry)
    }

    #[test]
    fn test_dec_small_integer() {
        assert_eq!(dec(&[131, 97, 42]).unwrap(), Term::SmallInt(42));
    }

    #[test]
    fn test_dec_integer() {
        assert_eq!(dec(&[131, 98, 0xFF, 0xFF, 0xFF, 0xFF]).unwrap(), Term::SmallInt(-1));
    }

    #[test]
    fn test_dec_small_big() {
        // -300
        assert_eq!(dec(&[131, 110, 2, 1, 44, 1]).unwrap(), Term::SmallInt(-300));
        // 2^31
        match dec(&[131, 110, 4, 0, 0, 0, 0, 0x80]).unwrap() {
            Term::BigInt(value) => assert_eq!(value.to_i64(), Some(2_147_483_648)),
            other => panic!("expected bigint, got {:?}", other),
        }
    }

    #[test]
    fn test_dec_zero_length_big() {
        assert_eq!(dec(&[131, 110, 0, 0]).unwrap(), Term::SmallInt(0));
    }

    #[test]
    fn test_dec_special_atoms() {
        assert_eq!(dec(b"\x83\x77\x04true").unwrap(), Term::Bool(true));
        assert_eq!(dec(b"\x83\x77\x05false").unwrap(), Term::Bool(false));
        assert_eq!(dec(b"\x83\x77\x03nil").unwrap(), Term::Nil);
        assert_eq!(dec(b"\x83\x76\x00\x03nil").unwrap(), Term::Nil);
        assert_eq!(dec(b"\x83\x64\x00\x04true").unwrap(), Term::Bool(true));
    }

    #[test]
    fn test_dec_latin1_atom() {
        let term = dec(&[131, 115, 2, b'c', 0xE9]).unwrap();
        assert_eq!(term, Term::atom("cé").unwrap());
    }

    #[test]
    fn test_dec_long_latin1_atom() {
        // 40000 Latin-1 bytes fit ATOM_EXT but take 80000 bytes as UTF-8
        let mut data = vec![131, 100, 0x9C, 0x40];
        data.extend(std::iter::repeat(0xE9).take(40_000));
        match dec(&data).unwrap() {
            Term::Atom(atom) => {
                assert_eq!(atom.char_len(), 40_000);
                assert!(atom.as_str().chars().all(|c| c == 'é'));
            }
            other => panic!("expected atom, got {:?}", other),
        }
    }

    #[test]
    fn test_dec_invalid_utf8_atom() {
        assert!(matches!(
            dec(&[131, 119, 2, 0xC3, 0x28]),
            Err(CodecError::InvalidAtom(_))
        ));
    }

    #[test]
    fn test_dec_module_atom_unresolved() {
        let term = dec(b"\x83\x77\x0bElixir.Date").unwrap();
        assert_eq!(term, Term::atom("Elixir.Date").unwrap());
    }

    #[test]
    fn test_dec_module_atom_resolved() {
        let registry = StructRegistry::builder().register_opaque("Foo::Bar").build();
        let term = decode(b"\x83\x77\x0eElixir.Foo.Bar", false, &registry).unwrap();
        assert_eq!(term, Term::Type(TypeName::new("Foo::Bar")));
    }

    #[test]
    fn test_dec_nil_ext() {
        assert_eq!(dec(&[131, 106]).unwrap(), Term::empty_list());
    }

    #[test]
    fn test_dec_improper_list() {
        let term = dec(&[131, 108, 0, 0, 0, 1, 97, 1, 97, 2]).unwrap();
        assert_eq!(
            term,
            Term::improper_list(vec![Term::SmallInt(1)], Term::SmallInt(2))
        );
    }

    #[test]
    fn test_dec_string_ext_modes() {
        let data = [131, 107, 0, 2, b'h', b'i'];
        assert_eq!(dec(&data).unwrap(), Term::ByteList(b"hi".to_vec()));
        let config = CodecConfig::default().with_byte_list_mode(ByteListMode::Binary);
        assert_eq!(
            decode_with_config(&data, false, &EmptyRegistry, &config).unwrap(),
            Term::Binary(b"hi".to_vec())
        );
    }

    #[test]
    fn test_dec_pid() {
        let mut data = vec![131, 88, 119, 13];
        data.extend_from_slice(b"nonode@nohost");
        data.extend_from_slice(&[0, 0, 0, 1, 0, 0, 0, 2, 0, 0, 0, 3]);
        assert_eq!(dec(&data).unwrap(), Term::Pid(Pid::local(1, 2, 3)));
    }

    #[test]
    fn test_dec_pid_node_not_atom() {
        let data = [131, 88, 97, 1, 0, 0, 0, 1, 0, 0, 0, 2, 0, 0, 0, 3];
        assert_eq!(
            dec(&data),
            Err(CodecError::UnexpectedTag {
                expected: "atom",
                found: 97
            })
        );
    }

    #[test]
    fn test_dec_pid_node_keeps_special_name() {
        let data = [131, 88, 119, 4, b't', b'r', b'u', b'e', 0, 0, 0, 1, 0, 0, 0, 2, 0, 0, 0, 3];
        match dec(&data).unwrap() {
            Term::Pid(pid) => assert_eq!(pid.node.as_str(), "true"),
            other => panic!("expected pid, got {:?}", other),
        }
    }

    #[test]
    fn test_dec_bit_binary() {
        let term = dec(&[131, 77, 0, 0, 0, 1, 3, 0xA0]).unwrap();
        assert_eq!(term, Term::BitString(BitString::new(vec![0xA0], 3).unwrap()));
        assert_eq!(
            dec(&[131, 77, 0, 0, 0, 1, 8, 0xA0]),
            Err(CodecError::InvalidBitCount(8))
        );
    }

    #[test]
    fn test_dec_version_check() {
        assert_eq!(dec(&[130, 97, 1]), Err(CodecError::MalformedHeader(130)));
        assert_eq!(decode(&[97, 1], true, &EmptyRegistry).unwrap(), Term::SmallInt(1));
    }

    #[test]
    fn test_dec_empty_input() {
        assert!(matches!(dec(&[]), Err(CodecError::TruncatedInput { .. })));
        assert!(matches!(
            decode(&[], true, &EmptyRegistry),
            Err(CodecError::TruncatedInput { .. })
        ));
    }

    #[test]
    fn test_dec_unknown_tag() {
        assert_eq!(dec(&[131, 1]), Err(CodecError::UnknownTag(1)));
        // LOCAL_EXT is not supported
        assert_eq!(dec(&[131, 121]), Err(CodecError::UnknownTag(121)));
    }

    #[test]
    fn test_dec_trailing_bytes() {
        // Anything after the first term is ignored by default
        assert_eq!(dec(&[131, 97, 1, 0]).unwrap(), Term::SmallInt(1));
        assert_eq!(dec(&[131, 97, 1, 131, 97, 2]).unwrap(), Term::SmallInt(1));

        let strict = CodecConfig::default().with_trailing_bytes(false);
        assert_eq!(
            decode_with_config(&[131, 97, 1, 0], false, &EmptyRegistry, &strict),
            Err(CodecError::TrailingBytes(1))
        );
        assert_eq!(
            decode_with_config(&[131, 97, 1], false, &EmptyRegistry, &strict).unwrap(),
            Term::SmallInt(1)
        );
    }

    #[test]
    fn test_dec_depth_limit() {
        // [[[1]]] needs four levels
        let data = [
            131, 108, 0, 0, 0, 1, 108, 0, 0, 0, 1, 108, 0, 0, 0, 1, 97, 1, 106, 106, 106,
        ];
        let config = CodecConfig::default().with_max_depth(3);
        assert_eq!(
            decode_with_config(&data, false, &EmptyRegistry, &config),
            Err(CodecError::DepthLimitExceeded(3))
        );
        let config = CodecConfig::default().with_max_depth(4);
        assert!(decode_with_config(&data, false, &EmptyRegistry, &config).is_ok());
    }

    #[test]
    fn test_dec_hostile_count() {
        // A tuple claiming u32::MAX elements with nothing behind it
        let data = [131, 105, 0xFF, 0xFF, 0xFF, 0xFF];
        assert!(matches!(dec(&data), Err(CodecError::TruncatedInput { .. })));
    }

    #[test]
    fn test_dec_struct_decoder_rejects() {
        let registry = StructRegistry::builder()
            .register_with("Foo", |_, _| Err("bad fields".to_string()))
            .build();
        let mut data = vec![131, 116, 0, 0, 0, 1];
        data.extend_from_slice(b"\x77\x0a__struct__\x77\x0aElixir.Foo");
        assert_eq!(
            decode(&data, false, &registry),
            Err(CodecError::StructDecode {
                type_name: "Foo".to_string(),
                reason: "bad fields".to_string()
            })
        );
    }
}
