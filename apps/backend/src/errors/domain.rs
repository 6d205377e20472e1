//! Domain-level error type used across the rule engine and services.
//!
//! Every rejection is surfaced to the originating connection only, as an
//! `error { message }` frame built from this type's `Display`. Nothing in
//! here is fatal to a room or to the process.

use thiserror::Error;

/// Validation kinds: turn, phase, and rule violations.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ValidationKind {
    OutOfTurn,
    NotTrumpSelector,
    PhaseMismatch,
    GamePaused,
    MustFollowSuit,
    ParseCard,
    NotAdmin,
    Other(String),
}

/// Semantic conflict kinds.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConflictKind {
    DuplicateName,
    AlreadySeated,
}

/// Missing resources in domain terms.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum NotFoundKind {
    Room,
    Seat,
    Card,
}

/// Capacity limits.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CapacityKind {
    RoomFull,
    ServerFull,
}

/// Central domain error type.
///
/// `Display` is the human-readable reason shown to the player, so details
/// are written as full sentences ("Room is full", "Must follow Hearts").
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DomainError {
    #[error("{detail}")]
    Validation { kind: ValidationKind, detail: String },
    #[error("{detail}")]
    Conflict { kind: ConflictKind, detail: String },
    #[error("{detail}")]
    NotFound { kind: NotFoundKind, detail: String },
    #[error("{detail}")]
    Capacity { kind: CapacityKind, detail: String },
}

impl DomainError {
    pub fn validation(kind: ValidationKind, detail: impl Into<String>) -> Self {
        Self::Validation {
            kind,
            detail: detail.into(),
        }
    }

    pub fn validation_other(detail: impl Into<String>) -> Self {
        let detail = detail.into();
        Self::Validation {
            kind: ValidationKind::Other(detail.clone()),
            detail,
        }
    }

    pub fn conflict(kind: ConflictKind, detail: impl Into<String>) -> Self {
        Self::Conflict {
            kind,
            detail: detail.into(),
        }
    }

    pub fn not_found(kind: NotFoundKind, detail: impl Into<String>) -> Self {
        Self::NotFound {
            kind,
            detail: detail.into(),
        }
    }

    pub fn capacity(kind: CapacityKind, detail: impl Into<String>) -> Self {
        Self::Capacity {
            kind,
            detail: detail.into(),
        }
    }
}
