pub mod library;
pub mod template;

pub use library::TemplateLibrary;
pub use template::{Template, TemplatePart};

use id_arena::Id;
use log::debug;

use crate::error::EntryError;

pub type TemplateId = Id<Template>;

/// Source of placeable templates.
pub trait TemplateCatalog {
    /// Returns every template matching `name`, best match first. The order must be stable.
    fn find_by_name(&self, name: &str) -> Vec<TemplateId>;

    /// Loads a template found by [`TemplateCatalog::find_by_name`]. `None` means the asset is
    /// listed but can't be used.
    fn load(&self, id: TemplateId) -> Option<&Template>;
}

/// Strips a trailing `.<digits>` suffix, the way duplicated objects are named (`Rock.012`).
pub fn strip_disambiguation_suffix(name: &str) -> &str {
    match name.rsplit_once('.') {
        Some((base, suffix))
            if !suffix.is_empty() && suffix.bytes().all(|b| b.is_ascii_digit()) =>
        {
            base
        }
        _ => name,
    }
}

/// Maps manifest entry names to templates.
pub struct TemplateResolver<'c, C: TemplateCatalog + ?Sized> {
    catalog: &'c C,
    strip_suffix: bool,
}

impl<'c, C: TemplateCatalog + ?Sized> TemplateResolver<'c, C> {
    pub fn new(catalog: &'c C) -> Self {
        Self {
            catalog,
            strip_suffix: true,
        }
    }

    pub fn with_suffix_stripping(mut self, strip_suffix: bool) -> Self {
        self.strip_suffix = strip_suffix;
        self
    }

    /// Name that will be looked up for `entry_name`.
    pub fn lookup_name<'n>(&self, entry_name: &'n str) -> &'n str {
        if self.strip_suffix {
            strip_disambiguation_suffix(entry_name)
        } else {
            entry_name
        }
    }

    pub fn resolve(&self, entry_name: &str) -> Result<&'c Template, EntryError> {
        let name = self.lookup_name(entry_name);

        let id = self
            .catalog
            .find_by_name(name)
            .into_iter()
            .next()
            .ok_or_else(|| EntryError::TemplateNotFound {
                name: name.to_string(),
            })?;

        let template = self
            .catalog
            .load(id)
            .ok_or_else(|| EntryError::TemplateLoadFailed {
                name: name.to_string(),
            })?;

        debug!("Resolved `{}` to template `{}`", entry_name, template.name);
        Ok(template)
    }
}
