//! Errors surfaced by fallible lazy initialization.

use thiserror::Error;

/// Failure to obtain a lazily-constructed instance.
///
/// `E` is the constructor's own error type.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConstructionError<E> {
    /// The constructor ran on this call and returned an error.
    #[error("instance constructor failed")]
    Failed(#[source] E),
    /// An earlier construction failed and the cell refuses to retry.
    #[error("instance construction failed earlier; the cell is poisoned")]
    Poisoned,
}

impl<E> ConstructionError<E> {
    /// Returns `true` for [`ConstructionError::Poisoned`].
    pub fn is_poisoned(&self) -> bool {
        matches!(self, Self::Poisoned)
    }

    /// The constructor's error, if this call ran the constructor.
    pub fn into_source(self) -> Option<E> {
        match self {
            Self::Failed(e) => Some(e),
            Self::Poisoned => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;
    use std::io;

    #[test]
    fn test_poisoned_has_no_source() {
        let err: ConstructionError<io::Error> = ConstructionError::Poisoned;
        assert!(err.is_poisoned());
        assert!(err.source().is_none());
        assert_eq!(
            err.to_string(),
            "instance construction failed earlier; the cell is poisoned"
        );
        assert!(err.into_source().is_none());
    }

    #[test]
    fn test_failed_exposes_constructor_error() {
        let err = ConstructionError::Failed(io::Error::new(io::ErrorKind::NotFound, "no config"));
        assert!(!err.is_poisoned());
        assert_eq!(err.to_string(), "instance constructor failed");
        assert_eq!(err.source().map(|e| e.to_string()).as_deref(), Some("no config"));

        let inner = err.into_source().expect("failed carries its source");
        assert_eq!(inner.kind(), io::ErrorKind::NotFound);
    }
}
