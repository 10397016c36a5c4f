pub mod literal;
pub mod model;

pub use model::{
    ComponentKind, ComponentRecord, Manifest, ManifestEntry, TransformComponent, TransformLiterals,
};
