//! The placement pass: manifest in, template instances out.
//!
//! Every entry goes through parse, convert, resolve and place on its own. A broken entry is
//! recorded in the [`PlacementReport`] and skipped. Only an unreadable manifest (or a missing root)
//! stops the run, and it does so before anything is placed.

use std::fmt;

use log::{debug, error, info, warn};

use crate::catalog::{TemplateCatalog, TemplateResolver};
use crate::config::AssemblyConfig;
use crate::error::{AssemblyError, EntryError, EntryErrorKind};
use crate::manifest::{Manifest, ManifestEntry};
use crate::math::TargetTransform;
use crate::scene_graph::SceneHost;

#[derive(Debug, Clone, PartialEq)]
pub struct PlacedInstance {
    pub entry_name: String,
    pub template_name: String,
    pub transform: TargetTransform,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EntryFailure {
    pub entry_name: String,
    pub error: EntryError,
}

impl EntryFailure {
    pub fn kind(&self) -> EntryErrorKind {
        self.error.kind()
    }
}

/// Outcome of a run, entries in manifest order.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacementReport {
    pub container_name: String,
    pub placed: Vec<PlacedInstance>,
    pub failures: Vec<EntryFailure>,
}

impl PlacementReport {
    fn new(container_name: String) -> Self {
        Self {
            container_name,
            placed: Vec::new(),
            failures: Vec::new(),
        }
    }

    pub fn attempted(&self) -> usize {
        self.placed.len() + self.failures.len()
    }

    pub fn placed_count(&self) -> usize {
        self.placed.len()
    }

    pub fn skipped_missing_template(&self) -> usize {
        self.count_failures(EntryErrorKind::TemplateNotFound)
    }

    pub fn skipped_parse_error(&self) -> usize {
        self.count_failures(EntryErrorKind::LiteralParse)
    }

    pub fn skipped_missing_component(&self) -> usize {
        self.count_failures(EntryErrorKind::ComponentMissing)
    }

    fn count_failures(&self, kind: EntryErrorKind) -> usize {
        self.failures.iter().filter(|f| f.kind() == kind).count()
    }
}

impl fmt::Display for PlacementReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "placed {} of {} entries into `{}` ({} missing template, {} parse error, {} missing component)",
            self.placed_count(),
            self.attempted(),
            self.container_name,
            self.skipped_missing_template(),
            self.skipped_parse_error(),
            self.skipped_missing_component(),
        )?;

        for failure in &self.failures {
            writeln!(
                f,
                "  {}: {} ({})",
                failure.entry_name,
                failure.kind(),
                failure.error
            )?;
        }

        Ok(())
    }
}

/// Parses `manifest_text` and places its entries under `<root_name><suffix>`.
pub fn run<C, H>(
    manifest_text: &str,
    root_name: &str,
    catalog: &C,
    host: &mut H,
    config: &AssemblyConfig,
) -> Result<PlacementReport, AssemblyError>
where
    C: TemplateCatalog + ?Sized,
    H: SceneHost + ?Sized,
{
    let manifest = Manifest::from_json(manifest_text).map_err(|e| {
        error!("Failed to parse manifest: {}", e);
        AssemblyError::ManifestParse(e)
    })?;

    place_manifest(&manifest, root_name, catalog, host, config)
}

/// Places the entries of an already parsed manifest.
pub fn place_manifest<C, H>(
    manifest: &Manifest,
    root_name: &str,
    catalog: &C,
    host: &mut H,
    config: &AssemblyConfig,
) -> Result<PlacementReport, AssemblyError>
where
    C: TemplateCatalog + ?Sized,
    H: SceneHost + ?Sized,
{
    let root = host.find_node(root_name).ok_or_else(|| {
        error!("Root object `{}` not found", root_name);
        AssemblyError::RootNotFound {
            name: root_name.to_string(),
        }
    })?;

    let container_name = config.container_name(root_name);
    let container = host.find_or_create_node(&container_name, root);

    let resolver =
        TemplateResolver::new(catalog).with_suffix_stripping(config.strip_disambiguation_suffix);

    let mut report = PlacementReport::new(container_name);

    for entry in &manifest.items {
        match place_entry(entry, &resolver, host, container) {
            Ok(placed) => report.placed.push(placed),
            Err(error) => {
                warn!("Skipping `{}`: {} ({})", entry.name, error.kind(), error);
                report.failures.push(EntryFailure {
                    entry_name: entry.name.clone(),
                    error,
                });
            }
        }
    }

    info!(
        "Placed {}/{} entries under `{}`",
        report.placed_count(),
        report.attempted(),
        report.container_name
    );

    Ok(report)
}

fn place_entry<C, H>(
    entry: &ManifestEntry,
    resolver: &TemplateResolver<C>,
    host: &mut H,
    container: H::Node,
) -> Result<PlacedInstance, EntryError>
where
    C: TemplateCatalog + ?Sized,
    H: SceneHost + ?Sized,
{
    let source = entry.source_transform()?;
    let transform = source.to_target();
    debug!("`{}`: {:?} -> {:?}", entry.name, source, transform);

    let template = resolver.resolve(&entry.name)?;

    let instance = host.instantiate(template, container);
    host.set_transform(instance, &transform);

    Ok(PlacedInstance {
        entry_name: entry.name.clone(),
        template_name: template.name.clone(),
        transform,
    })
}
