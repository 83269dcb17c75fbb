//! Element identifiers backed by a global string interner.
//!
//! Hosts name their elements however they like (`"hero"`, `"card-17"`) and
//! the layout engine works with the resulting [`ElementId`], which is `Copy`,
//! hashable and cheap to compare.

use std::{
    fmt,
    sync::{Mutex, MutexGuard, OnceLock},
};

use string_interner::{DefaultStringInterner, DefaultSymbol};

/// Global string interner shared by all identifiers.
static INTERNER: OnceLock<Mutex<DefaultStringInterner>> = OnceLock::new();

fn interner() -> MutexGuard<'static, DefaultStringInterner> {
    INTERNER
        .get_or_init(|| Mutex::new(DefaultStringInterner::new()))
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Identifier of an element managed by the layout.
///
/// # Examples
///
/// ```
/// use mason_core::identifier::ElementId;
///
/// let hero = ElementId::new("hero");
/// let again: ElementId = "hero".into();
/// assert_eq!(hero, again);
/// assert_eq!(hero, "hero");
///
/// let anon = ElementId::from_anonymous(3);
/// assert_ne!(anon, hero);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ElementId(DefaultSymbol);

impl ElementId {
    /// Creates an `ElementId` from a name, interning it on first use.
    pub fn new(name: &str) -> Self {
        Self(interner().get_or_intern(name))
    }

    /// Creates an identifier for an element the host did not name.
    ///
    /// The same index always maps to the same identifier.
    pub fn from_anonymous(idx: usize) -> Self {
        Self::new(&format!("__{idx}"))
    }

    /// Returns the interned name of this identifier.
    pub fn name(&self) -> String {
        interner().resolve(self.0).unwrap_or_default().to_string()
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let interner = interner();
        let name = interner.resolve(self.0).unwrap_or_default();
        f.write_str(name)
    }
}

impl From<&str> for ElementId {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl PartialEq<str> for ElementId {
    fn eq(&self, other: &str) -> bool {
        interner().resolve(self.0) == Some(other)
    }
}

impl PartialEq<&str> for ElementId {
    fn eq(&self, other: &&str) -> bool {
        self == *other
    }
}
