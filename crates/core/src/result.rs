//! Result type definition and logging combinators.
//!
//! Event callbacks have nowhere to propagate an error to, so they log it and
//! carry on. These combinators keep that pattern free of unwrap/expect.

use std::fmt::Display;

use crate::error::Error;

/// The standard Result type for examboard operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Extension trait for Results whose error is only worth logging.
pub trait ResultExt<T> {
    /// Convert a Result to an Option, logging the error if present.
    fn into_option_logged(self) -> Option<T>;
}

impl<T, E: Display> ResultExt<T> for std::result::Result<T, E> {
    fn into_option_logged(self) -> Option<T> {
        match self {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::error!("Operation failed: {}", e);
                None
            }
        }
    }
}
