use core::fmt::{self, Display, Formatter};

/// Suffix that attribute type names may carry, e.g. `ScopedAttribute`
pub const ATTRIBUTE_SUFFIX: &str = "Attribute";

/// Registration category of a service.
///
/// Derived from an attribute name, never stored on the declaration itself.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LifetimeTag {
    /// One instance per unit of work
    Scoped,
    /// One instance shared by the whole application
    Singleton,
    /// A fresh instance per request
    Transient,
}

impl LifetimeTag {
    /// Maps an attribute name to a lifetime tag.
    ///
    /// The [`ATTRIBUTE_SUFFIX`] is stripped first; the rest must be one of the tag names,
    /// either in the canonical spelling (`Scoped`) or the attribute spelling (`scoped`).
    /// Any other name isn't a lifetime tag.
    #[must_use]
    pub fn from_attribute_name(name: &str) -> Option<Self> {
        match name.strip_suffix(ATTRIBUTE_SUFFIX).unwrap_or(name) {
            "Scoped" | "scoped" => Some(Self::Scoped),
            "Singleton" | "singleton" => Some(Self::Singleton),
            "Transient" | "transient" => Some(Self::Transient),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Scoped => "Scoped",
            Self::Singleton => "Singleton",
            Self::Transient => "Transient",
        }
    }

    #[inline]
    #[must_use]
    pub const fn all() -> [Self; 3] {
        [Self::Scoped, Self::Singleton, Self::Transient]
    }
}

impl Display for LifetimeTag {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
