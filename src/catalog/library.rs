use id_arena::Arena;
use itertools::Itertools;
use serde::Deserialize;

use crate::catalog::template::Template;
use crate::catalog::{TemplateCatalog, TemplateId};

/// In-memory template catalog.
///
/// Name lookup is a case-insensitive substring search. Results are ordered so the first one is the
/// best match: an exact name first, then the remaining matches by name, then by insertion order.
pub struct TemplateLibrary {
    templates: Arena<Template>,
}

#[derive(Deserialize)]
struct CatalogFile {
    templates: Vec<Template>,
}

impl TemplateLibrary {
    pub fn new() -> Self {
        Self {
            templates: Arena::new(),
        }
    }

    /// Loads a catalog file of the form `{ "templates": [ { "name": ..., "parts": [...] } ] }`.
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        let file: CatalogFile = serde_json::from_str(text)?;
        let mut library = Self::new();
        for template in file.templates {
            library.add_template(template);
        }
        Ok(library)
    }

    pub fn add_template(&mut self, template: Template) -> TemplateId {
        self.templates.alloc(template)
    }

    pub fn get(&self, id: TemplateId) -> Option<&Template> {
        self.templates.get(id)
    }

    pub fn templates(&self) -> impl Iterator<Item = &Template> {
        self.templates.iter().map(|(_, template)| template)
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.len() == 0
    }
}

impl Default for TemplateLibrary {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateCatalog for TemplateLibrary {
    fn find_by_name(&self, name: &str) -> Vec<TemplateId> {
        if name.is_empty() {
            return Vec::new();
        }

        let needle = name.to_lowercase();

        self.templates
            .iter()
            .filter(|(_, template)| template.name.to_lowercase().contains(&needle))
            .sorted_by(|(a_id, a), (b_id, b)| {
                (a.name != name)
                    .cmp(&(b.name != name))
                    .then_with(|| a.name.cmp(&b.name))
                    .then_with(|| a_id.index().cmp(&b_id.index()))
            })
            .map(|(id, _)| id)
            .collect()
    }

    fn load(&self, id: TemplateId) -> Option<&Template> {
        self.get(id)
    }
}
