//! Per-unit declaration index.
//!
//! Built in a single pass over a [`SourceUnit`] before any rule runs, so that
//! rules can look up declarations regardless of textual order.

use crate::model::{FuncDecl, SourceFile, SourceUnit, TypeBody, TypeDecl};
use std::collections::HashMap;
use tracing::debug;

/// A type declaration together with the file that declares it.
#[derive(Debug, Clone, Copy)]
pub struct TypeEntry<'u> {
    /// The declaration.
    pub decl: &'u TypeDecl,
    /// The declaring file.
    pub file: &'u SourceFile,
}

impl<'u> TypeEntry<'u> {
    /// Declared name.
    #[must_use]
    pub fn name(&self) -> &'u str {
        &self.decl.name.name
    }

    /// Returns true for a non-alias struct declaration.
    #[must_use]
    pub fn is_struct(&self) -> bool {
        !self.decl.alias && matches!(self.decl.body, TypeBody::Struct(_))
    }

    /// Returns true for a non-alias interface declaration.
    #[must_use]
    pub fn is_interface(&self) -> bool {
        !self.decl.alias && matches!(self.decl.body, TypeBody::Interface(_))
    }
}

/// A function declaration together with the file that declares it.
#[derive(Debug, Clone, Copy)]
pub struct FuncEntry<'u> {
    /// The declaration.
    pub decl: &'u FuncDecl,
    /// The declaring file.
    pub file: &'u SourceFile,
}

/// Immutable catalogue of the declarations in one unit.
#[derive(Debug, Default)]
pub struct DeclarationIndex<'u> {
    types: Vec<TypeEntry<'u>>,
    type_lookup: HashMap<&'u str, usize>,
    functions: HashMap<&'u str, FuncEntry<'u>>,
    methods: HashMap<&'u str, Vec<FuncEntry<'u>>>,
}

impl<'u> DeclarationIndex<'u> {
    /// Indexes every declaration in `unit`.
    #[must_use]
    pub fn build(unit: &'u SourceUnit) -> Self {
        let mut index = Self::default();

        for file in &unit.files {
            for decl in &file.types {
                let name = decl.name.name.as_str();
                if index.type_lookup.contains_key(name) {
                    debug!(type_name = name, file = %file.path.display(), "duplicate type declaration ignored");
                    continue;
                }
                index.type_lookup.insert(name, index.types.len());
                index.types.push(TypeEntry { decl, file });
            }

            for decl in &file.funcs {
                let entry = FuncEntry { decl, file };
                match &decl.receiver {
                    Some(receiver) => index
                        .methods
                        .entry(receiver.type_name.as_str())
                        .or_default()
                        .push(entry),
                    None => {
                        index
                            .functions
                            .entry(decl.name.name.as_str())
                            .or_insert(entry);
                    }
                }
            }
        }

        debug!(
            package = %unit.package_path,
            types = index.types.len(),
            functions = index.functions.len(),
            "indexed unit"
        );
        index
    }

    /// All type declarations in declaration order.
    #[must_use]
    pub fn types(&self) -> &[TypeEntry<'u>] {
        &self.types
    }

    /// Looks up a type declaration by name.
    #[must_use]
    pub fn type_decl(&self, name: &str) -> Option<TypeEntry<'u>> {
        self.type_lookup.get(name).map(|&i| self.types[i])
    }

    /// Struct declarations in declaration order.
    pub fn structs(&self) -> impl Iterator<Item = TypeEntry<'u>> + '_ {
        self.types.iter().copied().filter(TypeEntry::is_struct)
    }

    /// Interface declarations in declaration order.
    pub fn interfaces(&self) -> impl Iterator<Item = TypeEntry<'u>> + '_ {
        self.types.iter().copied().filter(TypeEntry::is_interface)
    }

    /// Looks up a free function by name.
    #[must_use]
    pub fn function(&self, name: &str) -> Option<FuncEntry<'u>> {
        self.functions.get(name).copied()
    }

    /// Methods declared with `type_name` as receiver base type.
    #[must_use]
    pub fn methods_of(&self, type_name: &str) -> &[FuncEntry<'u>] {
        self.methods.get(type_name).map_or(&[], Vec::as_slice)
    }
}
