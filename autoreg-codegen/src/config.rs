/// Standard traits a service is never registered under.
///
/// Most of them can't be used as `dyn Trait`, the rest describe a capability of the value
/// (formatting, conversion, iteration) rather than a service.
pub const DEFAULT_EXCLUDED_CONTRACTS: &[&str] = &[
    "core::borrow::Borrow",
    "core::borrow::BorrowMut",
    "core::clone::Clone",
    "core::cmp::Eq",
    "core::cmp::Ord",
    "core::cmp::PartialEq",
    "core::cmp::PartialOrd",
    "core::convert::AsMut",
    "core::convert::AsRef",
    "core::convert::From",
    "core::convert::Into",
    "core::convert::TryFrom",
    "core::convert::TryInto",
    "core::default::Default",
    "core::error::Error",
    "core::fmt::Debug",
    "core::fmt::Display",
    "core::hash::Hash",
    "core::iter::DoubleEndedIterator",
    "core::iter::ExactSizeIterator",
    "core::iter::Extend",
    "core::iter::FromIterator",
    "core::iter::IntoIterator",
    "core::iter::Iterator",
    "core::marker::Copy",
    "core::marker::Send",
    "core::marker::Sized",
    "core::marker::Sync",
    "core::marker::Unpin",
    "core::ops::Deref",
    "core::ops::DerefMut",
    "core::ops::Fn",
    "core::ops::FnMut",
    "core::ops::FnOnce",
    "core::str::FromStr",
    "alloc::borrow::ToOwned",
    "alloc::string::ToString",
];

/// Config for a generator
/// ## Fields
/// - `marker_contract`:
///   Interface that is never used as a contract, because it marks resource cleanup instead of a service.
///   `core`, `alloc` and `std` spellings of the same path are the same interface.
///
/// - `excluded_contracts`:
///   Interfaces that are skipped like the marker, compared without generic arguments,
///   so `core::convert::From` excludes `From<u8>` too.
///   Defaults to [`DEFAULT_EXCLUDED_CONTRACTS`].
///
/// - `crate_root`:
///   Path prefix of identities resolved from Rust sources.
///   `crate` fits an entry point included into the same crate.
///
/// - `entry_point`:
///   Name of the generated registration function.
///
/// - `registrar_trait`, `lifetime_enum`:
///   Paths the generated code uses to reach the container integration.
///
/// - `file_name`:
///   Name the host should give to the generated source unit.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    pub marker_contract: String,
    pub excluded_contracts: Vec<String>,
    pub crate_root: String,
    pub entry_point: String,
    pub registrar_trait: String,
    pub lifetime_enum: String,
    pub file_name: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            marker_contract: "core::ops::Drop".to_owned(),
            excluded_contracts: DEFAULT_EXCLUDED_CONTRACTS.iter().map(|&contract| contract.to_owned()).collect(),
            crate_root: "crate".to_owned(),
            entry_point: "register_services".to_owned(),
            registrar_trait: "::autoreg::ServiceRegistrar".to_owned(),
            lifetime_enum: "::autoreg::Lifetime".to_owned(),
            file_name: "registrations.rs".to_owned(),
        }
    }
}
