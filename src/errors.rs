//! Typed error taxonomy for the case record store and the mutation gateway.
//!
//! Every store operation fails into one of four buckets:
//! - `Validation` — bad input on create, surfaced to the user and blocking
//! - `NotFound` — mutation target no longer exists; the next refetch drops it
//! - `Conflict` — the store rejected a concurrent stage write
//! - `Transport` — network or server failure; the user may simply retry
//!
//! The gateway catches all of these at its boundary and reports them without
//! rethrowing. No failure leaves the local collection partially mutated,
//! because no local mutation is ever applied before server confirmation.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("validation failed: {0}")]
    Validation(String),

    #[error("case {id} not found")]
    NotFound { id: String },

    #[error("conflicting write for case {id}")]
    Conflict { id: String },

    #[error("transport failure: {0}")]
    Transport(String),
}

impl StoreError {
    pub fn not_found(id: impl Into<String>) -> Self {
        Self::NotFound { id: id.into() }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_carries_id() {
        let err = StoreError::not_found("case-42");
        assert!(err.is_not_found());
        assert!(err.to_string().contains("case-42"));
    }

    #[test]
    fn variants_are_distinct() {
        let validation = StoreError::Validation("case_number is required".into());
        assert!(!validation.is_not_found());
        assert!(!validation.is_transport());
        assert!(StoreError::Transport("connection refused".into()).is_transport());
    }

    #[test]
    fn implements_std_error() {
        fn assert_std_error<E: std::error::Error>(_: &E) {}
        assert_std_error(&StoreError::Conflict { id: "x".into() });
    }
}
