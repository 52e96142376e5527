//! Path suppliers.

use std::collections::BTreeSet;

use crate::context::{ContextKey, OperationContext};
use crate::error::PathRetrievalError;

/// Context entry holding the paths an operation started from.
pub const INITIAL_PATHS: ContextKey<Vec<String>> = ContextKey::new("initialPaths");

/// Supplies the set of paths to distribute for an operation.
///
/// Suppliers read whatever they need from the operation context, typically
/// [`INITIAL_PATHS`], and may expand, narrow or replace it.
pub trait DistributionPathSupplier: Send + Sync {
    /// Returns the paths to distribute.
    ///
    /// Fails with [`PathRetrievalError`] when the paths cannot be determined;
    /// the error reaches the caller unmodified.
    fn distribution_paths(
        &self,
        context: &OperationContext,
    ) -> Result<BTreeSet<String>, PathRetrievalError>;
}

impl<F> DistributionPathSupplier for F
where
    F: Fn(&OperationContext) -> Result<BTreeSet<String>, PathRetrievalError> + Send + Sync,
{
    fn distribution_paths(
        &self,
        context: &OperationContext,
    ) -> Result<BTreeSet<String>, PathRetrievalError> {
        self(context)
    }
}
