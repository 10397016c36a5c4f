use glam::{Quat, Vec3};
use serde::Deserialize;

/// A named, reusable object prototype. Placing a template spawns a copy of its part hierarchy.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Template {
    pub name: String,
    #[serde(default)]
    pub parts: Vec<TemplatePart>,
}

/// Node of a template's own hierarchy, positioned relative to its parent.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TemplatePart {
    pub name: String,
    #[serde(default)]
    pub translation: Vec3,
    #[serde(default)]
    pub rotation: Quat,
    #[serde(default = "unit_scale")]
    pub scale: Vec3,
    #[serde(default)]
    pub children: Vec<TemplatePart>,
}

fn unit_scale() -> Vec3 {
    Vec3::ONE
}

impl Template {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parts: Vec::new(),
        }
    }

    pub fn with_part(mut self, part: TemplatePart) -> Self {
        self.parts.push(part);
        self
    }
}

impl TemplatePart {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            translation: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
            children: Vec::new(),
        }
    }

    pub fn with_translation(mut self, translation: Vec3) -> Self {
        self.translation = translation;
        self
    }

    pub fn with_child(mut self, child: TemplatePart) -> Self {
        self.children.push(child);
        self
    }
}
