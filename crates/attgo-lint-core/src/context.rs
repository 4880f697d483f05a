//! Context types for rule execution.

use crate::index::DeclarationIndex;
use crate::model::{SourceFile, SourceUnit};
use crate::resolver::TypeResolver;

/// Everything a rule may read while checking one unit.
///
/// Built once per unit by the analyzer and shared by every rule of the pass.
#[derive(Clone, Copy)]
pub struct UnitContext<'a> {
    /// The unit being analyzed.
    pub unit: &'a SourceUnit,
    /// Declarations of the unit.
    pub index: &'a DeclarationIndex<'a>,
    /// Type facts about the unit.
    pub resolver: &'a dyn TypeResolver,
    /// Calendar year used for copyright freshness.
    pub current_year: i32,
}

impl<'a> UnitContext<'a> {
    /// Creates a new unit context.
    #[must_use]
    pub fn new(
        unit: &'a SourceUnit,
        index: &'a DeclarationIndex<'a>,
        resolver: &'a dyn TypeResolver,
        current_year: i32,
    ) -> Self {
        Self {
            unit,
            index,
            resolver,
            current_year,
        }
    }

    /// Files of the unit in host order.
    pub fn files(&self) -> impl Iterator<Item = &'a SourceFile> {
        self.unit.files.iter()
    }
}

impl std::fmt::Debug for UnitContext<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UnitContext")
            .field("package_path", &self.unit.package_path)
            .field("files", &self.unit.files.len())
            .field("current_year", &self.current_year)
            .finish_non_exhaustive()
    }
}
