use core::{
    cmp::Ordering,
    fmt::{self, Display, Formatter},
    hash::{Hash, Hasher},
};
use proc_macro2::Span;
use quote::ToTokens as _;
use syn::{Ident, Path, PathArguments};

/// Crates whose paths are interchangeable, `std` re-exports `core` and `alloc` items at the same paths
const STD_CRATES: [&str; 3] = ["core", "alloc", "std"];

/// Fully-qualified path of a type or a trait.
///
/// An identity can only be built from a well-formed path, so every identity that reaches the emitter
/// can be rendered. Two identities are equal when their canonical names are equal:
/// `::std::ops::Drop`, `std::ops::Drop` and `core::ops::Drop` are the same identity.
#[derive(Clone, Debug)]
pub struct TypeIdentity {
    name: String,
    canonical: String,
    base: String,
    path: Path,
}

impl TypeIdentity {
    /// Parses an identity from its textual form, e.g. `crate::services::UserService`.
    /// Returns [`None`] if the text isn't a path.
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        syn::parse_str::<Path>(name).ok().map(Self::from_path)
    }

    #[inline]
    #[must_use]
    pub fn from_path(path: Path) -> Self {
        let canonical = canonical_path(&path);
        let mut base = canonical.clone();
        if let Some(last) = base.segments.last_mut() {
            last.arguments = PathArguments::None;
        }

        Self {
            name: display_path(&path),
            canonical: display_path(&canonical),
            base: display_path(&base),
            path,
        }
    }

    /// Name as written, e.g. `::std::convert::From<u8>`
    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Name without the generic arguments of the last segment, in the spelling shared by
    /// `std`, `core` and `alloc` paths, e.g. `core::convert::From` for `::std::convert::From<u8>`
    #[inline]
    #[must_use]
    pub fn base_name(&self) -> &str {
        &self.base
    }

    #[inline]
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PartialEq for TypeIdentity {
    fn eq(&self, other: &Self) -> bool {
        self.canonical == other.canonical
    }
}

impl Eq for TypeIdentity {}

impl PartialOrd for TypeIdentity {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for TypeIdentity {
    fn cmp(&self, other: &Self) -> Ordering {
        self.canonical.cmp(&other.canonical)
    }
}

impl Hash for TypeIdentity {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.canonical.hash(state);
    }
}

impl Display for TypeIdentity {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

fn canonical_path(path: &Path) -> Path {
    let mut path = path.clone();
    let is_std_crate = path
        .segments
        .first()
        .is_some_and(|first| STD_CRATES.iter().any(|krate| first.ident == krate));
    if is_std_crate {
        path.leading_colon = None;
        path.segments[0].ident = Ident::new(STD_CRATES[0], Span::call_site());
    }
    path
}

/// Renders a path without the token spacing of [`proc_macro2::TokenStream`]'s `Display`,
/// so `crate :: Handler < Vec < u8 > >` becomes `crate::Handler<Vec<u8>>`.
pub(crate) fn display_path(path: &Path) -> String {
    let raw = path.to_token_stream().to_string();
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch != ' ' {
            out.push(ch);
            continue;
        }
        let glued_to_prev = matches!(out.chars().last(), Some(':' | '<' | '&' | '('));
        let glued_to_next = matches!(chars.peek(), Some(':' | '<' | '>' | ',' | '(' | ')'));
        if !glued_to_prev && !glued_to_next {
            out.push(ch);
        }
    }

    out
}
