pub mod host;
pub mod object3d;
pub mod scene;
pub mod transform;

pub use host::SceneHost;
pub use object3d::{Object3D, ObjectId};
pub use scene::{HierarchyDisplay, Scene};
pub use transform::Transform;
