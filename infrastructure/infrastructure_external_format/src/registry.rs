//! Registry Module
//!
//! Provides the type registry the decoder consults when it meets a module
//! atom or a map carrying `__struct__`.
//!
//! A registry answers two questions:
//! - does a host type with this name exist (so the atom becomes a
//!   `Term::Type` instead of a plain atom)
//! - can that type be rebuilt from a decoded field map
//!
//! `StructRegistry` is the stock implementation, assembled once with a
//! builder and read-only afterwards.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use entities_data_handling::{Struct, Term, TermMap, TypeName};

/// Lookup of host types by name
pub trait TypeRegistry: Send + Sync {
    /// Resolve a host type name (`Foo::Bar`) to a known type
    fn resolve_name(&self, host_name: &str) -> Option<TypeName>;

    /// Rebuild a value of `type_name` from a decoded map
    ///
    /// # Returns
    /// * `None` - The type cannot be built from a map; the map is kept
    /// * `Some(Ok(term))` - The rebuilt value
    /// * `Some(Err(reason))` - The type rejected the map
    fn decode_from_map(&self, type_name: &TypeName, map: &TermMap) -> Option<Result<Term, String>>;
}

/// Registry that knows no types
#[derive(Debug, Clone, Copy, Default)]
pub struct EmptyRegistry;

impl TypeRegistry for EmptyRegistry {
    fn resolve_name(&self, _host_name: &str) -> Option<TypeName> {
        None
    }

    fn decode_from_map(&self, _type_name: &TypeName, _map: &TermMap) -> Option<Result<Term, String>> {
        None
    }
}

impl<R: TypeRegistry + ?Sized> TypeRegistry for Arc<R> {
    fn resolve_name(&self, host_name: &str) -> Option<TypeName> {
        (**self).resolve_name(host_name)
    }

    fn decode_from_map(&self, type_name: &TypeName, map: &TermMap) -> Option<Result<Term, String>> {
        (**self).decode_from_map(type_name, map)
    }
}

/// Custom map-to-value conversion
pub type StructDecoder = Arc<dyn Fn(&TypeName, &TermMap) -> Result<Term, String> + Send + Sync>;

#[derive(Clone)]
enum Capability {
    /// Rebuilt as a generic `Term::Struct`
    Fields,
    /// Rebuilt by a registered function
    Custom(StructDecoder),
    /// Name only; maps stay maps
    Opaque,
}

impl fmt::Debug for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Capability::Fields => f.write_str("Fields"),
            Capability::Custom(_) => f.write_str("Custom(..)"),
            Capability::Opaque => f.write_str("Opaque"),
        }
    }
}

/// Name-keyed registry of host types
#[derive(Debug, Clone, Default)]
pub struct StructRegistry {
    types: HashMap<String, (TypeName, Capability)>,
}

impl StructRegistry {
    pub fn builder() -> StructRegistryBuilder {
        StructRegistryBuilder::default()
    }

    /// Number of registered types
    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    pub fn contains(&self, host_name: &str) -> bool {
        self.types.contains_key(host_name)
    }
}

impl TypeRegistry for StructRegistry {
    fn resolve_name(&self, host_name: &str) -> Option<TypeName> {
        self.types.get(host_name).map(|(name, _)| name.clone())
    }

    fn decode_from_map(&self, type_name: &TypeName, map: &TermMap) -> Option<Result<Term, String>> {
        let (name, capability) = self.types.get(type_name.as_str())?;
        match capability {
            Capability::Fields => Some(Ok(Term::Struct(Struct::new(name.clone(), map.clone())))),
            Capability::Custom(decoder) => Some(decoder(name, map)),
            Capability::Opaque => None,
        }
    }
}

/// Builder for [`StructRegistry`]
///
/// Registering a name twice keeps the last registration.
#[derive(Debug, Default)]
pub struct StructRegistryBuilder {
    types: HashMap<String, (TypeName, Capability)>,
}

impl StructRegistryBuilder {
    fn register(mut self, host_name: &str, capability: Capability) -> Self {
        self.types
            .insert(host_name.to_string(), (TypeName::new(host_name), capability));
        self
    }

    /// Register a type rebuilt as a generic `Term::Struct`
    pub fn register_struct(self, host_name: &str) -> Self {
        self.register(host_name, Capability::Fields)
    }

    /// Register a type rebuilt by `decoder`
    pub fn register_with<F>(self, host_name: &str, decoder: F) -> Self
    where
        F: Fn(&TypeName, &TermMap) -> Result<Term, String> + Send + Sync + 'static,
    {
        self.register(host_name, Capability::Custom(Arc::new(decoder)))
    }

    /// Register a type that resolves by name but is never built from a map
    pub fn register_opaque(self, host_name: &str) -> Self {
        self.register(host_name, Capability::Opaque)
    }

    pub fn build(self) -> StructRegistry {
        StructRegistry { types: self.types }
    }
}
