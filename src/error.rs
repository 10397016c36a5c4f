use std::fmt;

use thiserror::Error;

use crate::manifest::ComponentKind;

/// A transform literal that doesn't follow the authoring tool's `repr` grammar.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LiteralError {
    #[error("malformed {kind} literal: `{text}`")]
    Malformed { kind: ComponentKind, text: String },
    #[error("invalid number `{text}`")]
    InvalidNumber { text: String },
    #[error("unsupported rotation order `{order}` (only XYZ is supported)")]
    UnsupportedRotationOrder { order: String },
}

/// Failure of a single manifest entry. The run skips the entry and carries on.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EntryError {
    #[error("missing {0} record")]
    ComponentMissing(ComponentKind),
    #[error("more than one {0} record")]
    DuplicateComponent(ComponentKind),
    #[error("component record has {populated} populated fields, expected exactly one")]
    MalformedComponent { populated: usize },
    #[error("`{}` record is not a string", .0.field_name())]
    ComponentNotText(ComponentKind),
    #[error("malformed entry: {reason}")]
    MalformedEntry { reason: &'static str },
    #[error(transparent)]
    Literal(#[from] LiteralError),
    #[error("no template matches `{name}`")]
    TemplateNotFound { name: String },
    #[error("template `{name}` was found but couldn't be loaded")]
    TemplateLoadFailed { name: String },
}

/// Coarse classification of [`EntryError`]s used for report counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryErrorKind {
    ComponentMissing,
    LiteralParse,
    TemplateNotFound,
}

impl EntryError {
    pub fn kind(&self) -> EntryErrorKind {
        match self {
            EntryError::ComponentMissing(_) => EntryErrorKind::ComponentMissing,
            EntryError::DuplicateComponent(_)
            | EntryError::MalformedComponent { .. }
            | EntryError::ComponentNotText(_)
            | EntryError::MalformedEntry { .. }
            | EntryError::Literal(_) => EntryErrorKind::LiteralParse,
            EntryError::TemplateNotFound { .. } | EntryError::TemplateLoadFailed { .. } => {
                EntryErrorKind::TemplateNotFound
            }
        }
    }
}

impl fmt::Display for EntryErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EntryErrorKind::ComponentMissing => "ComponentMissingError",
            EntryErrorKind::LiteralParse => "LiteralParseError",
            EntryErrorKind::TemplateNotFound => "TemplateNotFoundError",
        };
        f.write_str(name)
    }
}

/// Errors that abort a whole run before any entry is placed.
#[derive(Debug, Error)]
pub enum AssemblyError {
    #[error("failed to parse manifest: {0}")]
    ManifestParse(#[from] serde_json::Error),
    #[error("root object `{name}` doesn't exist in the scene")]
    RootNotFound { name: String },
}
