//! Namespace Module
//!
//! Translates between Elixir module atoms (`Elixir.MyApp.User`) and host type
//! names (`MyApp::User`). Both directions are pure string rewrites.

/// Prefix Elixir puts in front of every module atom
pub const ELIXIR_PREFIX: &str = "Elixir.";

/// Separator between module segments in atoms
pub const FOREIGN_SEPARATOR: &str = ".";

/// Separator between path segments in host type names
pub const HOST_SEPARATOR: &str = "::";

/// Rewrites module names between the wire and host conventions
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NamespaceTranslator {
    prefix: String,
    foreign_separator: String,
    host_separator: String,
}

impl Default for NamespaceTranslator {
    fn default() -> Self {
        Self::new(ELIXIR_PREFIX, FOREIGN_SEPARATOR, HOST_SEPARATOR)
    }
}

impl NamespaceTranslator {
    /// Create a translator with custom conventions
    pub fn new(prefix: &str, foreign_separator: &str, host_separator: &str) -> Self {
        Self {
            prefix: prefix.to_string(),
            foreign_separator: foreign_separator.to_string(),
            host_separator: host_separator.to_string(),
        }
    }

    /// Atom prefix
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Translate an atom name to a host type name
    ///
    /// # Returns
    /// * `Some(host_name)` - The atom carries the prefix
    /// * `None` - The atom is not a module name
    pub fn to_host(&self, atom_name: &str) -> Option<String> {
        atom_name
            .strip_prefix(self.prefix.as_str())
            .map(|rest| rest.replace(self.foreign_separator.as_str(), &self.host_separator))
    }

    /// Translate a host type name to an atom name
    pub fn to_foreign(&self, host_name: &str) -> String {
        let translated = host_name.replace(self.host_separator.as_str(), &self.foreign_separator);
        let mut name = String::with_capacity(self.prefix.len() + translated.len());
        name.push_str(&self.prefix);
        name.push_str(&translated);
        name
    }
}
