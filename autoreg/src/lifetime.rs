/// How long a container reuses an instance of a registered service
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum Lifetime {
    /// One instance per scope (a unit of work)
    Scoped,
    /// One instance for the whole application
    Singleton,
    /// A fresh instance per request
    Transient,
}

impl Lifetime {
    #[inline]
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Lifetime::Scoped => "scoped",
            Lifetime::Singleton => "singleton",
            Lifetime::Transient => "transient",
        }
    }

    #[inline]
    #[must_use]
    pub const fn all() -> [Self; 3] {
        use Lifetime::{Scoped, Singleton, Transient};

        [Scoped, Singleton, Transient]
    }
}
