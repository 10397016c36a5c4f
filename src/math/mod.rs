pub mod coords;

pub use coords::{convert, SourceTransform, TargetTransform};
