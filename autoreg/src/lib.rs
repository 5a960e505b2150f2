#![no_std]

extern crate alloc;

pub(crate) mod any;
pub(crate) mod lifetime;
pub(crate) mod registrar;

pub use any::TypeInfo;
pub use lifetime::Lifetime;
pub use registrar::{Registration, Registrations, ServiceRegistrar};

#[cfg(feature = "macros")]
pub use autoreg_macros::{scoped, singleton, transient};
