//! Entities Layer: Data Handling
//!
//! Provides the term data model for the External Term Format codec.
//!
//! ## Overview
//!
//! The `entities_data_handling` crate defines everything a decoded term can be,
//! independent of how it is read or written:
//!
//! - **[`term`](term/index.html)**: The closed [`Term`] enum and its record types
//!   (`List`, `Struct`, `Pid`, `Reference`, `TypeName`)
//! - **[`atom`](atom/index.html)**: Validated, cheaply clonable atom names
//! - **[`map`](map/index.html)**: Insertion ordered key/value container
//! - **[`bits`](bits/index.html)**: Byte strings with a partial final byte
//! - **[`object`](object/index.html)**: Capability trait for host values that
//!   encode themselves or expose a field map
//! - **[`buffer`](buffer/index.html)**: Append-only output buffer
//! - **[`namespace`](namespace/index.html)**: `Elixir.Foo.Bar` <-> `Foo::Bar`
//! - **[`print_term`](print_term/index.html)**: Erlang syntax `Display` for terms
//!
//! ## See Also
//!
//! - [`entities_utilities`](../entities_utilities/index.html): BigNumber
//! - [`infrastructure_external_format`](../../infrastructure/infrastructure_external_format/index.html): Encoder and decoder

pub mod atom;
pub mod bits;
pub mod buffer;
pub mod error;
pub mod map;
pub mod namespace;
pub mod object;
pub mod print_term;
pub mod term;

pub use atom::Atom;
pub use bits::BitString;
pub use buffer::OutputBuffer;
pub use error::DataError;
pub use map::TermMap;
pub use namespace::NamespaceTranslator;
pub use object::{EtfObject, Object, ObjectError};
pub use term::{List, Pid, Reference, Struct, Term, TypeName};

pub use entities_utilities::BigNumber;
