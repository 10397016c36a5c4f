use crate::catalog::Template;
use crate::math::TargetTransform;
use crate::scene_graph::object3d::ObjectId;
use crate::scene_graph::scene::Scene;

/// Object graph that placements are written into.
pub trait SceneHost {
    type Node: Copy;

    fn find_node(&self, name: &str) -> Option<Self::Node>;

    /// Returns the node called `name`, creating it if needed, and makes sure it's parented under
    /// `parent`. Calling this repeatedly never creates duplicates.
    fn find_or_create_node(&mut self, name: &str, parent: Self::Node) -> Self::Node;

    fn instantiate(&mut self, template: &Template, parent: Self::Node) -> Self::Node;

    /// Applies an engine-space transform. Position and rotation are world space, scale is local.
    fn set_transform(&mut self, node: Self::Node, transform: &TargetTransform);
}

impl SceneHost for Scene {
    type Node = ObjectId;

    fn find_node(&self, name: &str) -> Option<ObjectId> {
        self.get_object_by_name(name)
    }

    fn find_or_create_node(&mut self, name: &str, parent: ObjectId) -> ObjectId {
        match self.get_object_by_name(name) {
            Some(node) => {
                if node != parent {
                    self.set_object_parent(node, Some(parent));
                }
                node
            }
            None => self.create_object(name, Some(parent)),
        }
    }

    fn instantiate(&mut self, template: &Template, parent: ObjectId) -> ObjectId {
        self.spawn_template(template, Some(parent))
    }

    fn set_transform(&mut self, node: ObjectId, transform: &TargetTransform) {
        self.set_object_world_transform(
            node,
            transform.position,
            transform.rotation_quat(),
            transform.scale,
        );
    }
}
