use glam::{Mat4, Quat, Vec3};
use id_arena::Arena;
use std::fmt;

use crate::catalog::{Template, TemplatePart};
use crate::scene_graph::object3d::{Object3D, ObjectId};
use crate::scene_graph::transform::Transform;

/// Arena-backed object hierarchy that placed templates are spawned into.
pub struct Scene {
    pub objects: Arena<Object3D>,
}

impl Scene {
    pub fn new() -> Self {
        Self {
            objects: Arena::new(),
        }
    }

    pub fn add_object(&mut self, object: Object3D) -> ObjectId {
        self.objects.alloc(object)
    }

    pub fn get_object(&self, id: ObjectId) -> Option<&Object3D> {
        self.objects.get(id)
    }

    /// First object with the given name, in creation order.
    pub fn get_object_by_name(&self, name: &str) -> Option<ObjectId> {
        self.objects
            .iter()
            .find(|(_, object)| object.name == name)
            .map(|(id, _)| id)
    }

    /// Creates an empty object, optionally parented.
    pub fn create_object(&mut self, name: impl Into<String>, parent: Option<ObjectId>) -> ObjectId {
        let object_id = self.add_object(Object3D::named(name));
        if parent.is_some() {
            self.set_object_parent(object_id, parent);
        }
        object_id
    }

    /// Spawns a copy of `template` under `parent` and returns the instance root.
    pub fn spawn_template(&mut self, template: &Template, parent: Option<ObjectId>) -> ObjectId {
        let mut object = Object3D::named(template.name.clone());
        object.template = Some(template.name.clone());
        let object_id = self.add_object(object);

        if parent.is_some() {
            self.set_object_parent(object_id, parent);
        }

        for part in &template.parts {
            self.spawn_template_part(part, object_id);
        }

        object_id
    }

    fn spawn_template_part(&mut self, part: &TemplatePart, parent: ObjectId) -> ObjectId {
        let object = Object3D {
            name: part.name.clone(),
            transform: Transform::new(part.translation, part.rotation, part.scale),
            ..Default::default()
        };

        let object_id = self.add_object(object);
        self.set_object_parent(object_id, Some(parent));

        for child in &part.children {
            self.spawn_template_part(child, object_id);
        }

        object_id
    }

    pub fn roots(&self) -> impl Iterator<Item = ObjectId> + '_ {
        self.objects.iter().filter_map(|(id, object)| {
            if object.parent_id.is_none() {
                Some(id)
            } else {
                None
            }
        })
    }

    /// Updates all object transforms in hierarchical order
    fn update_transforms(&self) {
        for root_id in self.roots() {
            self.update_object_transform_recursive(root_id, Mat4::IDENTITY);
        }
    }

    /// Recursively updates an object's world transform and its children
    fn update_object_transform_recursive(&self, object_id: ObjectId, parent_world_matrix: Mat4) {
        if let Some(object) = self.objects.get(object_id) {
            if object.transform.is_world_dirty() {
                let local_matrix = *object.transform.get_local_matrix();
                let world_matrix = parent_world_matrix * local_matrix;
                object.transform.set_world_matrix(world_matrix);
            }

            let world_matrix = *object.transform.get_world_matrix();
            for &child_id in &object.child_ids {
                self.update_object_transform_recursive(child_id, world_matrix);
            }
        }
    }

    /// Invalidates world transforms for an object and all its descendants
    pub fn invalidate_object_hierarchy(&self, object_id: ObjectId) {
        if let Some(object) = self.objects.get(object_id) {
            object.transform.invalidate_world();

            for &child_id in &object.child_ids {
                self.invalidate_object_hierarchy(child_id);
            }
        }
    }

    /// Sets the parent of an object and updates child relationships
    ///
    /// The object keeps its local transform, so its world pose follows the new parent.
    pub fn set_object_parent(&mut self, child_id: ObjectId, new_parent_id: Option<ObjectId>) {
        if let Some(child) = self.objects.get(child_id) {
            if child.parent_id == new_parent_id {
                return;
            }

            if let Some(old_parent_id) = child.parent_id {
                if let Some(old_parent) = self.objects.get_mut(old_parent_id) {
                    old_parent.child_ids.retain(|&id| id != child_id);
                }
            }
        }

        if let Some(child) = self.objects.get_mut(child_id) {
            child.parent_id = new_parent_id;

            if let Some(new_parent_id) = new_parent_id {
                if let Some(new_parent) = self.objects.get_mut(new_parent_id) {
                    new_parent.child_ids.push(child_id);
                }
            }
        }

        self.invalidate_object_hierarchy(child_id);
    }

    pub fn set_object_transform(
        &mut self,
        object_id: ObjectId,
        translation: Vec3,
        rotation: Quat,
        scale: Vec3,
    ) {
        if let Some(object) = self.objects.get_mut(object_id) {
            object.transform.set_transform(translation, rotation, scale);
        }
        self.invalidate_object_hierarchy(object_id);
    }

    /// Places an object at a world-space position and rotation. `scale` stays local.
    pub fn set_object_world_transform(
        &mut self,
        object_id: ObjectId,
        position: Vec3,
        rotation: Quat,
        scale: Vec3,
    ) {
        let parent_world_matrix = self
            .get_object(object_id)
            .and_then(|object| object.parent_id)
            .and_then(|parent_id| self.world_matrix(parent_id))
            .unwrap_or(Mat4::IDENTITY);

        let (_, parent_rotation, _) = parent_world_matrix.to_scale_rotation_translation();
        let translation = parent_world_matrix.inverse().transform_point3(position);
        let rotation = (parent_rotation.inverse() * rotation).normalize();

        self.set_object_transform(object_id, translation, rotation, scale);
    }

    pub fn get_object_transform(&self, object_id: ObjectId) -> Option<&Transform> {
        self.objects.get(object_id).map(|object| &object.transform)
    }

    /// Up to date world matrix of an object. Only the object's ancestors are refreshed.
    pub fn world_matrix(&self, object_id: ObjectId) -> Option<Mat4> {
        let object = self.objects.get(object_id)?;
        if !object.transform.is_world_dirty() {
            return Some(*object.transform.get_world_matrix());
        }

        let parent_world_matrix = match object.parent_id {
            Some(parent_id) => self.world_matrix(parent_id)?,
            None => Mat4::IDENTITY,
        };

        let local_matrix = *object.transform.get_local_matrix();
        let world_matrix = parent_world_matrix * local_matrix;
        object.transform.set_world_matrix(world_matrix);
        Some(world_matrix)
    }

    pub fn world_translation(&self, object_id: ObjectId) -> Option<Vec3> {
        self.world_matrix(object_id)
            .map(|matrix| matrix.w_axis.truncate())
    }

    pub fn late_update(&mut self) {
        self.update_transforms();
    }

    /// Indented outline of the hierarchy, one object per line.
    pub fn hierarchy(&self) -> HierarchyDisplay<'_> {
        HierarchyDisplay { scene: self }
    }
}

pub struct HierarchyDisplay<'a> {
    scene: &'a Scene,
}

impl HierarchyDisplay<'_> {
    fn fmt_object(
        &self,
        f: &mut fmt::Formatter<'_>,
        object_id: ObjectId,
        depth: usize,
    ) -> fmt::Result {
        let Some(object) = self.scene.objects.get(object_id) else {
            return Ok(());
        };

        let t = object.transform.translation();
        write!(f, "{}{}", "  ".repeat(depth), object.name)?;
        if let Some(template) = &object.template {
            write!(f, " [{}]", template)?;
        }
        writeln!(f, " ({:.3}, {:.3}, {:.3})", t.x, t.y, t.z)?;

        for &child_id in &object.child_ids {
            self.fmt_object(f, child_id, depth + 1)?;
        }

        Ok(())
    }
}

impl fmt::Display for HierarchyDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for root_id in self.scene.roots() {
            self.fmt_object(f, root_id, 0)?;
        }
        Ok(())
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}
