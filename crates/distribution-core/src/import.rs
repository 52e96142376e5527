//! Hooks run before distributed content is imported.

use crate::error::ImportPreProcessError;
use crate::event::Properties;

/// Runs checks before the import of distributed content.
///
/// A pre-processor does not modify the content. It either lets the import
/// proceed or vetoes it by returning an [`ImportPreProcessError`].
pub trait ImportPreProcessor: Send + Sync {
    /// Inspects the properties describing the content about to be imported.
    fn process(&self, props: &Properties) -> Result<(), ImportPreProcessError>;
}

/// Runs every pre-processor in order, stopping at the first veto.
pub fn run_pre_processors(
    processors: &[&dyn ImportPreProcessor],
    props: &Properties,
) -> Result<(), ImportPreProcessError> {
    processors
        .iter()
        .try_for_each(|processor| processor.process(props))
}
