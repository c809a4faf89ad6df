//! Print Term Module
//!
//! Provides `Display` for terms using Erlang syntax, e.g. `[1,2|3]`,
//! `{ok,<<"data">>}`, `#{a => 1}`. Structs print Elixir style with their host
//! type name: `%MyApp::User{name => <<"joe">>}`.

use crate::bits::BitString;
use crate::map::TermMap;
use crate::term::{List, Term};
use std::fmt::{self, Write};

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Term::Nil => f.write_str("nil"),
            Term::Bool(value) => write!(f, "{}", value),
            Term::SmallInt(value) => write!(f, "{}", value),
            Term::BigInt(value) => write!(f, "{}", value),
            Term::Float(value) => write!(f, "{:?}", value),
            Term::Atom(atom) => write!(f, "{}", atom),
            Term::Binary(bytes) => print_binary(f, bytes),
            Term::ByteList(bytes) => {
                f.write_char('[')?;
                for (i, byte) in bytes.iter().enumerate() {
                    if i > 0 {
                        f.write_char(',')?;
                    }
                    write!(f, "{}", byte)?;
                }
                f.write_char(']')
            }
            Term::List(list) => print_list(f, list),
            Term::Tuple(elements) => {
                f.write_char('{')?;
                print_sequence(f, elements)?;
                f.write_char('}')
            }
            Term::Map(map) => {
                f.write_char('#')?;
                print_pairs(f, map)
            }
            Term::Struct(record) => {
                write!(f, "%{}", record.type_name)?;
                print_pairs(f, &record.fields)
            }
            Term::Type(name) => write!(f, "{}", name),
            Term::Object(object) => match object.get().type_name() {
                Some(name) => write!(f, "#Object<{}>", name),
                None => f.write_str("#Object<>"),
            },
            Term::Pid(pid) => write!(
                f,
                "#PID<{}.{}.{}.{}>",
                pid.node, pid.id, pid.serial, pid.creation
            ),
            Term::Reference(reference) => {
                write!(f, "#Ref<{}.{}", reference.node, reference.creation)?;
                for id in &reference.ids {
                    write!(f, ".{}", id)?;
                }
                f.write_char('>')
            }
            Term::BitString(bits) => print_bit_string(f, bits),
        }
    }
}

fn print_sequence(f: &mut fmt::Formatter<'_>, elements: &[Term]) -> fmt::Result {
    for (i, element) in elements.iter().enumerate() {
        if i > 0 {
            f.write_char(',')?;
        }
        write!(f, "{}", element)?;
    }
    Ok(())
}

fn print_list(f: &mut fmt::Formatter<'_>, list: &List) -> fmt::Result {
    f.write_char('[')?;
    print_sequence(f, &list.elements)?;
    if let Some(tail) = &list.tail {
        write!(f, "|{}", tail)?;
    }
    f.write_char(']')
}

fn print_pairs(f: &mut fmt::Formatter<'_>, map: &TermMap) -> fmt::Result {
    f.write_char('{')?;
    for (i, (key, value)) in map.iter().enumerate() {
        if i > 0 {
            f.write_char(',')?;
        }
        write!(f, "{} => {}", key, value)?;
    }
    f.write_char('}')
}

fn is_printable(bytes: &[u8]) -> bool {
    !bytes.is_empty() && bytes.iter().all(|&b| (0x20..0x7F).contains(&b))
}

fn print_binary(f: &mut fmt::Formatter<'_>, bytes: &[u8]) -> fmt::Result {
    f.write_str("<<")?;
    if is_printable(bytes) {
        f.write_char('"')?;
        for &b in bytes {
            match b {
                b'"' => f.write_str("\\\"")?,
                b'\\' => f.write_str("\\\\")?,
                _ => f.write_char(b as char)?,
            }
        }
        f.write_char('"')?;
    } else {
        for (i, byte) in bytes.iter().enumerate() {
            if i > 0 {
                f.write_char(',')?;
            }
            write!(f, "{}", byte)?;
        }
    }
    f.write_str(">>")
}

fn print_bit_string(f: &mut fmt::Formatter<'_>, bits: &BitString) -> fmt::Result {
    let bytes = bits.bytes();
    let trailing = bits.trailing_bits();
    if trailing == 0 || bytes.is_empty() {
        return print_binary(f, bytes);
    }
    let (last, whole) = match bytes.split_last() {
        Some(split) => split,
        None => return print_binary(f, bytes),
    };
    f.write_str("<<")?;
    for byte in whole {
        write!(f, "{},", byte)?;
    }
    // Erlang keeps the used bits in the high end of the last byte.
    write!(f, "{}:{}>>", last >> (8 - trailing), trailing)
}

#[cfg(test)]
mod tests {
    use crate::atom::Atom;
    use crate::bits::BitString;
    use crate::map::TermMap;
    use crate::term::{Pid, Reference, Struct, Term, TypeName};

    #[test]
    fn test_print_scalars() {
        assert_eq!(Term::Nil.to_string(), "nil");
        assert_eq!(Term::Bool(true).to_string(), "true");
        assert_eq!(Term::from(-42).to_string(), "-42");
        assert_eq!(Term::Float(1.0).to_string(), "1.0");
        assert_eq!(Term::atom("ok").unwrap().to_string(), "ok");
    }

    #[test]
    fn test_print_lists() {
        let proper = Term::list(vec![Term::from(1), Term::from(2)]);
        assert_eq!(proper.to_string(), "[1,2]");
        let improper = Term::improper_list(vec![Term::from(1), Term::from(2)], Term::from(3));
        assert_eq!(improper.to_string(), "[1,2|3]");
        assert_eq!(Term::empty_list().to_string(), "[]");
        assert_eq!(Term::byte_list(vec![104, 105]).to_string(), "[104,105]");
    }

    #[test]
    fn test_print_binaries() {
        assert_eq!(Term::from("hi").to_string(), "<<\"hi\">>");
        assert_eq!(Term::binary(vec![0, 255]).to_string(), "<<0,255>>");
        assert_eq!(Term::binary(vec![]).to_string(), "<<>>");
        let bits = BitString::new(vec![1, 0b1010_0000], 3).unwrap();
        assert_eq!(Term::BitString(bits).to_string(), "<<1,5:3>>");
    }

    #[test]
    fn test_print_containers() {
        let tuple = Term::tuple(vec![Term::atom("ok").unwrap(), Term::from(1)]);
        assert_eq!(tuple.to_string(), "{ok,1}");

        let mut map = TermMap::new();
        map.push(Term::atom("a").unwrap(), Term::from(1));
        assert_eq!(Term::Map(map.clone()).to_string(), "#{a => 1}");

        let record = Struct::new(TypeName::new("MyApp::User"), map);
        assert_eq!(Term::Struct(record).to_string(), "%MyApp::User{a => 1}");
    }

    #[test]
    fn test_print_identifiers() {
        let pid = Pid::new(Atom::new("node@host").unwrap(), 1, 2, 3);
        assert_eq!(Term::Pid(pid).to_string(), "#PID<node@host.1.2.3>");
        let reference = Reference::local(7, vec![1, 2]);
        assert_eq!(
            Term::Reference(reference).to_string(),
            "#Ref<nonode@nohost.7.1.2>"
        );
    }
}
