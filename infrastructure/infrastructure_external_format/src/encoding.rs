//! Encoding Module
//!
//! Provides the external term format encoder.
//!
//! Every term is written with the smallest tag that represents it: integers
//! go through `SMALL_INTEGER_EXT`, `INTEGER_EXT`, `SMALL_BIG_EXT` and
//! `LARGE_BIG_EXT` in that order of preference, atoms through
//! `SMALL_ATOM_UTF8_EXT` before `ATOM_UTF8_EXT`. Structs and objects are
//! written as maps keyed by `__struct__`.

use std::cell::Cell;

use entities_data_handling::{
    BigNumber, BitString, List, NamespaceTranslator, Object, OutputBuffer, Pid, Reference,
    Term, TermMap, TypeName,
};
use entities_data_handling::atom::MAX_ATOM_CHARS;
use infrastructure_bignum_encoding::BignumCodec;
use infrastructure_utilities::compress;
use tracing::debug;

use crate::config::CodecConfig;
use crate::constants::*;
use crate::error::{checked_u16, checked_u32, CodecError, CodecResult};
use crate::size_calculation::encoded_size_with_depth;

thread_local! {
    /// Depth of the encoder that is inside an object's `encode_direct`
    static OBJECT_DEPTH: Cell<usize> = const { Cell::new(0) };
}

/// Encode a term with the default configuration
///
/// # Arguments
/// * `term` - The term to encode
/// * `compress` - Wrap the payload in a zlib `COMPRESSED` envelope
///
/// # Returns
/// * `Ok(Vec<u8>)` - Encoded bytes, version byte first
/// * `Err(CodecError)` - Encoding error
pub fn encode(term: &Term, compress: bool) -> CodecResult<Vec<u8>> {
    encode_with_config(term, compress, &CodecConfig::default())
}

/// Encode a term
///
/// Same as [`encode`] with an explicit configuration.
pub fn encode_with_config(term: &Term, compressed: bool, config: &CodecConfig) -> CodecResult<Vec<u8>> {
    let size = encoded_size_with_depth(term, &config.namespace, config.max_depth);

    if !compressed {
        let mut out = OutputBuffer::with_capacity(size + 1);
        out.put_u8(VERSION_MAGIC);
        encode_at(term, &mut out, config, 0)?;
        debug!(len = out.len(), "encoded term");
        return Ok(out.into_vec());
    }

    let mut raw = OutputBuffer::with_capacity(size);
    encode_at(term, &mut raw, config, 0)?;
    let raw_len = checked_u32(raw.len(), "uncompressed term")?;
    let deflated = compress(raw.as_slice(), config.compression_level)?;

    let mut out = OutputBuffer::with_capacity(deflated.len() + 6);
    out.put_u8(VERSION_MAGIC);
    out.put_u8(COMPRESSED);
    out.put_u32_be(raw_len);
    out.put_slice(&deflated);
    debug!(raw = raw_len, len = out.len(), "encoded compressed term");
    Ok(out.into_vec())
}

/// Append a term's encoding (no version byte) to `out`
///
/// Direct-encoding objects can call this to write their own nested terms.
/// Called from inside `encode_direct`, it continues at the depth of the
/// object so `max_depth` bounds the whole term.
pub fn encode_term_into(term: &Term, out: &mut OutputBuffer, config: &CodecConfig) -> CodecResult<()> {
    encode_at(term, out, config, OBJECT_DEPTH.with(Cell::get))
}

fn encode_at(term: &Term, out: &mut OutputBuffer, config: &CodecConfig, depth: usize) -> CodecResult<()> {
    Encoder {
        out,
        namespace: &config.namespace,
        max_depth: config.max_depth,
        depth,
    }
    .enc_term(term)
}

/// Publishes the encoder depth while an object writes itself, restoring the
/// previous value on drop
struct ObjectDepthScope(usize);

impl ObjectDepthScope {
    fn enter(depth: usize) -> Self {
        ObjectDepthScope(OBJECT_DEPTH.with(|current| current.replace(depth)))
    }
}

impl Drop for ObjectDepthScope {
    fn drop(&mut self) {
        OBJECT_DEPTH.with(|current| current.set(self.0));
    }
}

struct Encoder<'a> {
    out: &'a mut OutputBuffer,
    namespace: &'a NamespaceTranslator,
    max_depth: usize,
    depth: usize,
}

impl Encoder<'_> {
    fn enc_term(&mut self, term: &Term) -> CodecResult<()> {
        if self.depth >= self.max_depth {
            return Err(CodecError::DepthLimitExceeded(self.max_depth));
        }
        self.depth += 1;
        let result = self.enc_tagged(term);
        self.depth -= 1;
        result
    }

    fn enc_tagged(&mut self, term: &Term) -> CodecResult<()> {
        match term {
            Term::Nil => self.enc_atom("nil"),
            Term::Bool(true) => self.enc_atom("true"),
            Term::Bool(false) => self.enc_atom("false"),
            Term::SmallInt(value) => self.enc_integer(*value),
            Term::BigInt(value) => match value.to_i64() {
                Some(small) => self.enc_integer(small),
                None => self.enc_big(value),
            },
            Term::Float(value) => {
                if !value.is_finite() {
                    return Err(CodecError::NonFiniteFloat(*value));
                }
                self.out.put_u8(NEW_FLOAT_EXT);
                self.out.put_f64_be(*value);
                Ok(())
            }
            Term::Atom(atom) => self.enc_atom(atom.as_str()),
            Term::Binary(bytes) => {
                let len = checked_u32(bytes.len(), "binary length")?;
                self.out.put_u8(BINARY_EXT);
                self.out.put_u32_be(len);
                self.out.put_slice(bytes);
                Ok(())
            }
            Term::ByteList(bytes) => self.enc_byte_list(bytes),
            Term::List(list) => self.enc_list(list),
            Term::Tuple(elements) => self.enc_tuple(elements),
            Term::Map(map) => self.enc_map(map),
            Term::Struct(s) => self.enc_struct(&s.type_name, &s.fields),
            Term::Type(type_name) => self.enc_type_name(type_name),
            Term::Object(object) => self.enc_object(object),
            Term::Pid(pid) => self.enc_pid(pid),
            Term::Reference(reference) => self.enc_reference(reference),
            Term::BitString(bits) => self.enc_bit_string(bits),
        }
    }

    fn enc_integer(&mut self, value: i64) -> CodecResult<()> {
        if (0..=255).contains(&value) {
            self.out.put_u8(SMALL_INTEGER_EXT);
            self.out.put_u8(value as u8);
            return Ok(());
        }
        match i32::try_from(value) {
            Ok(small) => {
                self.out.put_u8(INTEGER_EXT);
                self.out.put_i32_be(small);
                Ok(())
            }
            Err(_) => self.enc_big(&BigNumber::from_i64(value)),
        }
    }

    fn enc_big(&mut self, value: &BigNumber) -> CodecResult<()> {
        BignumCodec::encode(value, self.out)?;
        Ok(())
    }

    /// Write an atom with the smallest UTF-8 atom tag
    fn enc_atom(&mut self, name: &str) -> CodecResult<()> {
        let chars = name.chars().count();
        if chars > MAX_ATOM_CHARS {
            return Err(CodecError::AtomTooLong(chars));
        }
        self.put_atom_bytes(name);
        Ok(())
    }

    /// 255 characters are at most 1020 bytes, so `ATOM_UTF8_EXT` always fits
    fn put_atom_bytes(&mut self, name: &str) {
        let bytes = name.as_bytes();
        if bytes.len() < 256 {
            self.out.put_u8(SMALL_ATOM_UTF8_EXT);
            self.out.put_u8(bytes.len() as u8);
        } else {
            self.out.put_u8(ATOM_UTF8_EXT);
            self.out.put_u16_be(bytes.len() as u16);
        }
        self.out.put_slice(bytes);
    }

    /// Write a host type name as its module atom
    fn enc_type_name(&mut self, type_name: &TypeName) -> CodecResult<()> {
        if type_name.is_anonymous() {
            return Err(CodecError::AnonymousType);
        }
        let foreign = self.namespace.to_foreign(type_name.as_str());
        let chars = foreign.chars().count();
        if chars > MAX_ATOM_CHARS {
            return Err(CodecError::NameTooLong(chars));
        }
        self.put_atom_bytes(&foreign);
        Ok(())
    }

    /// `STRING_EXT` up to 65535 bytes, otherwise a list of small integers
    /// that the decoder returns as `Term::List`
    fn enc_byte_list(&mut self, bytes: &[u8]) -> CodecResult<()> {
        if bytes.len() <= MAX_STRING_EXT_LEN {
            self.out.put_u8(STRING_EXT);
            self.out.put_u16_be(bytes.len() as u16);
            self.out.put_slice(bytes);
            return Ok(());
        }
        let len = checked_u32(bytes.len(), "list length")?;
        self.out.put_u8(LIST_EXT);
        self.out.put_u32_be(len);
        for &byte in bytes {
            self.out.put_u8(SMALL_INTEGER_EXT);
            self.out.put_u8(byte);
        }
        self.out.put_u8(NIL_EXT);
        Ok(())
    }

    fn enc_list(&mut self, list: &List) -> CodecResult<()> {
        if list.is_empty() {
            self.out.put_u8(NIL_EXT);
            return Ok(());
        }
        let len = checked_u32(list.elements.len(), "list length")?;
        self.out.put_u8(LIST_EXT);
        self.out.put_u32_be(len);
        for element in &list.elements {
            self.enc_term(element)?;
        }
        match &list.tail {
            Some(tail) => self.enc_term(tail),
            None => {
                self.out.put_u8(NIL_EXT);
                Ok(())
            }
        }
    }

    fn enc_tuple(&mut self, elements: &[Term]) -> CodecResult<()> {
        if elements.len() < 256 {
            self.out.put_u8(SMALL_TUPLE_EXT);
            self.out.put_u8(elements.len() as u8);
        } else {
            let arity = checked_u32(elements.len(), "tuple arity")?;
            self.out.put_u8(LARGE_TUPLE_EXT);
            self.out.put_u32_be(arity);
        }
        for element in elements {
            self.enc_term(element)?;
        }
        Ok(())
    }

    fn enc_map(&mut self, map: &TermMap) -> CodecResult<()> {
        let count = checked_u32(map.len(), "map size")?;
        self.out.put_u8(MAP_EXT);
        self.out.put_u32_be(count);
        for (key, value) in map {
            self.enc_term(key)?;
            self.enc_term(value)?;
        }
        Ok(())
    }

    /// Write `%{__struct__: Type, field: value, ...}`
    ///
    /// Any `__struct__` key already in `fields` is left out.
    fn enc_struct(&mut self, type_name: &TypeName, fields: &TermMap) -> CodecResult<()> {
        let field_count = fields.keys().filter(|key| !key.is_struct_marker()).count();
        let count = checked_u32(field_count + 1, "map size")?;
        self.out.put_u8(MAP_EXT);
        self.out.put_u32_be(count);
        self.out.put_slice(STRUCT_MARKER_BYTES);
        self.enc_type_name(type_name)?;
        for (key, value) in fields.iter().filter(|(key, _)| !key.is_struct_marker()) {
            self.enc_term(key)?;
            self.enc_term(value)?;
        }
        Ok(())
    }

    fn enc_object(&mut self, object: &Object) -> CodecResult<()> {
        let value = object.get();
        let direct = {
            let _scope = ObjectDepthScope::enter(self.depth);
            value.encode_direct(self.out)
        };
        if let Some(result) = direct {
            return result.map_err(CodecError::from);
        }
        match value.as_map() {
            Some(fields) => {
                let type_name = value.type_name().ok_or(CodecError::AnonymousType)?;
                self.enc_struct(&type_name, &fields)
            }
            None => Err(CodecError::UnsupportedValue(format!("{:?}", value))),
        }
    }

    fn enc_pid(&mut self, pid: &Pid) -> CodecResult<()> {
        self.out.put_u8(NEW_PID_EXT);
        self.enc_atom(pid.node.as_str())?;
        self.out.put_u32_be(pid.id);
        self.out.put_u32_be(pid.serial);
        self.out.put_u32_be(pid.creation);
        Ok(())
    }

    fn enc_reference(&mut self, reference: &Reference) -> CodecResult<()> {
        let count = checked_u16(reference.ids.len(), "reference id count")?;
        self.out.put_u8(NEWER_REFERENCE_EXT);
        self.out.put_u16_be(count);
        self.enc_atom(reference.node.as_str())?;
        self.out.put_u32_be(reference.creation);
        for &id in &reference.ids {
            self.out.put_u32_be(id);
        }
        Ok(())
    }

    fn enc_bit_string(&mut self, bits: &BitString) -> CodecResult<()> {
        let len = checked_u32(bits.bytes().len(), "bit binary length")?;
        self.out.put_u8(BIT_BINARY_EXT);
        self.out.put_u32_be(len);
        self.out.put_u8(bits.trailing_bits());
        self.out.put_slice(bits.bytes());
        Ok(())
    }
}
