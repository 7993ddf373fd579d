use crate::builtin::{C_SYNTAX, RUST_SYNTAX};
use crate::SyntaxDescriptor;

static BUILTIN: [SyntaxDescriptor; 2] = [C_SYNTAX, RUST_SYNTAX];

/// An ordered set of language descriptors.
///
/// Selection walks the descriptors in registration order and returns the first one with a
/// matching file pattern. Selected descriptors are handed out as `&'static` references so a buffer
/// can hold on to one without owning it.
#[derive(Debug, Clone)]
pub struct SyntaxRegistry {
    entries: Vec<&'static SyntaxDescriptor>,
}

impl SyntaxRegistry {
    /// Create an empty registry (highlighting is never selected).
    ///
    /// Unlike [`SyntaxRegistry::default`], which holds the built-ins, this starts from nothing so
    /// callers can register their own descriptors in their own order.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Create a registry holding the built-in descriptors (C/C++, then Rust).
    pub fn builtin() -> Self {
        Self {
            entries: BUILTIN.iter().collect(),
        }
    }

    /// Append a descriptor. It is consulted after every descriptor registered before it.
    pub fn register(&mut self, descriptor: &'static SyntaxDescriptor) {
        self.entries.push(descriptor);
    }

    /// Select the descriptor for `filename`: first match in registration order wins.
    pub fn select(&self, filename: &str) -> Option<&'static SyntaxDescriptor> {
        self.entries
            .iter()
            .copied()
            .find(|descriptor| descriptor.matches_filename(filename))
    }

    /// Iterate over the registered descriptors in order.
    pub fn iter(&self) -> impl Iterator<Item = &'static SyntaxDescriptor> + '_ {
        self.entries.iter().copied()
    }

    /// Number of registered descriptors.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no descriptor is registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// The built-in registry, same as [`SyntaxRegistry::builtin`].
impl Default for SyntaxRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}
