//! Error handling for the Omi backend.

pub mod domain;

pub use domain::{CapacityKind, ConflictKind, DomainError, NotFoundKind, ValidationKind};
