//! Import resolution for referenced user-defined types.

use crate::error::ImportResolutionError;
use crate::layout::{FileCategory, OutputLayout};
use crate::naming::is_valid_identifier;
use crate::source::DependencyKind;
use crate::typescript::TargetImport;

/// The kind of declaration doing the importing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConsumerRole {
    /// A plain data class, emitted into the model directory.
    Class,
    /// An HTTP service, emitted into the service directory.
    Service,
}

impl ConsumerRole {
    /// Category of the file the consumer is emitted as.
    pub fn category(self) -> FileCategory {
        match self {
            ConsumerRole::Class => FileCategory::Model,
            ConsumerRole::Service => FileCategory::Service,
        }
    }
}

impl From<DependencyKind> for FileCategory {
    fn from(kind: DependencyKind) -> Self {
        match kind {
            DependencyKind::Model => FileCategory::Model,
            DependencyKind::Enum => FileCategory::Enum,
        }
    }
}

/// Resolves referenced types to import entries using the output layout.
///
/// The module path depends only on the dependency kind and the consumer role;
/// both are looked up in the layout's directory table.
#[derive(Debug, Clone, Copy)]
pub struct DependencyResolver<'a> {
    layout: &'a OutputLayout,
}

impl<'a> DependencyResolver<'a> {
    /// Resolver over `layout`.
    pub fn new(layout: &'a OutputLayout) -> Self {
        Self { layout }
    }

    /// Import entry for `name` as seen from a `consumer`.
    pub fn resolve_import(
        &self,
        name: &str,
        kind: DependencyKind,
        consumer: ConsumerRole,
    ) -> Result<TargetImport, ImportResolutionError> {
        if !is_valid_identifier(name) {
            return Err(ImportResolutionError::InvalidName(name.to_string()));
        }
        let path = self
            .layout
            .import_path(consumer.category(), name, kind.into())?;
        Ok(TargetImport {
            names: vec![name.to_string()],
            path,
        })
    }
}

/// Import list that keeps one entry per module path.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportSet {
    entries: Vec<TargetImport>,
}

impl ImportSet {
    /// Empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an import, merging its names into an existing entry with the same
    /// path.
    pub fn insert(&mut self, import: TargetImport) {
        match self.entries.iter_mut().find(|e| e.path == import.path) {
            Some(existing) => {
                for name in import.names {
                    if !existing.names.contains(&name) {
                        existing.names.push(name);
                    }
                }
            }
            None => {
                let mut names: Vec<String> = Vec::with_capacity(import.names.len());
                for name in import.names {
                    if !names.contains(&name) {
                        names.push(name);
                    }
                }
                self.entries.push(TargetImport {
                    names,
                    path: import.path,
                });
            }
        }
    }

    /// Number of distinct module paths.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no import was added.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The merged entries in first-seen order.
    pub fn into_imports(self) -> Vec<TargetImport> {
        self.entries
    }
}

impl Extend<TargetImport> for ImportSet {
    fn extend<I: IntoIterator<Item = TargetImport>>(&mut self, iter: I) {
        for import in iter {
            self.insert(import);
        }
    }
}
