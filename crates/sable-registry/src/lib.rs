//! Sable type registry.
//!
//! [`TypeRegistry`] is the reference provider of the
//! [`TypeQuery`](sable_core::TypeQuery) capability: it owns declared types and
//! functions, the platform types every compilation needs, and a compute-once
//! store of constructed types (generic instances, arrays, pointers).

mod platform;
mod registry;

pub use registry::TypeRegistry;
