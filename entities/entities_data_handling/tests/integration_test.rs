//! Integration tests for entities_data_handling
//!
//! Exercises the term model the way the codec layers use it.

use entities_data_handling::{
    Atom, BigNumber, BitString, DataError, NamespaceTranslator, OutputBuffer, Struct, Term,
    TermMap, TypeName,
};

#[test]
fn test_nested_term_equality() {
    let build = || {
        let mut map = TermMap::new();
        map.push(
            Term::atom("items").unwrap(),
            Term::list(vec![Term::tuple(vec![Term::from(1), Term::Float(2.5)])]),
        );
        Term::Map(map)
    };
    assert_eq!(build(), build());
}

#[test]
fn test_struct_from_map_with_marker() {
    let ns = NamespaceTranslator::default();
    let mut map = TermMap::new();
    map.push(
        Term::Atom(Atom::struct_marker()),
        Term::atom(&ns.to_foreign("Shop::Order")).unwrap(),
    );
    map.push(Term::atom("total").unwrap(), Term::from(BigNumber::from_i64(10)));

    let marker = map.struct_marker().and_then(Term::as_atom).unwrap();
    let host = ns.to_host(marker.as_str()).unwrap();
    let record = Struct::new(TypeName::new(&host), map);

    assert_eq!(record.type_name.as_str(), "Shop::Order");
    assert_eq!(record.field("total"), Some(&Term::SmallInt(10)));
    assert_eq!(record.fields.len(), 1);
}

#[test]
fn test_constructor_errors() {
    assert!(matches!(
        Term::atom(&"x".repeat(70_000)),
        Err(DataError::AtomTooLong(70_000))
    ));
    assert_eq!(
        BitString::new(vec![], 9),
        Err(DataError::InvalidBitCount(9))
    );
}

#[test]
fn test_output_buffer_collects_bytes() {
    let mut buf = OutputBuffer::with_capacity(4);
    buf.put_u8(131);
    buf.put_u8(106);
    assert_eq!(buf.into_vec(), vec![131, 106]);
}
