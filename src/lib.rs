//! Rebuilds a scene from an authoring tool's placement manifest.
//!
//! A manifest lists named objects with their transforms, written in the authoring tool's
//! coordinate system. Each entry is matched against a [`catalog::TemplateCatalog`], converted into
//! engine space and instantiated under a `<root>_Decoration` container in a
//! [`scene_graph::SceneHost`].

pub mod catalog;
pub mod config;
pub mod error;
pub mod manifest;
pub mod math;
pub mod placement;
pub mod scene_graph;

pub use config::AssemblyConfig;
pub use error::{AssemblyError, EntryError, EntryErrorKind, LiteralError};
pub use placement::{place_manifest, run, EntryFailure, PlacedInstance, PlacementReport};
