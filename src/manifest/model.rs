use std::fmt;

use serde::Deserialize;
use serde_json::Value;

use crate::error::EntryError;
use crate::manifest::literal::{parse_euler, parse_vector};
use crate::math::coords::SourceTransform;

/// Name reported for entries that don't carry a usable one.
pub const UNNAMED_ENTRY: &str = "<unnamed>";

/// Parsed manifest document. Entries keep their document order.
#[derive(Debug, Clone, Deserialize)]
pub struct Manifest {
    pub items: Vec<ManifestEntry>,
}

impl Manifest {
    /// Parses the manifest JSON. Only the document itself has to be well formed here: each item
    /// is taken as-is and its shape is checked later, per entry, so one bad entry can't take the
    /// whole manifest down.
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(from = "Value")]
pub struct ManifestEntry {
    /// Full object name, including a possible `.NNN` disambiguation suffix.
    pub name: String,
    pub records: Vec<ComponentRecord>,
    shape_error: Option<EntryError>,
}

impl From<Value> for ManifestEntry {
    fn from(value: Value) -> Self {
        let malformed = |reason| Some(EntryError::MalformedEntry { reason });

        if !value.is_object() {
            return Self {
                name: UNNAMED_ENTRY.to_string(),
                records: Vec::new(),
                shape_error: malformed("entry is not an object"),
            };
        }

        let (name, name_error) = match value.get("name") {
            Some(Value::String(name)) => (name.clone(), None),
            Some(other) => (other.to_string(), malformed("`name` is not a string")),
            None => (UNNAMED_ENTRY.to_string(), malformed("missing `name`")),
        };

        let (records, data_error) = match value.get("data") {
            Some(Value::Array(elements)) => {
                match elements
                    .iter()
                    .map(ComponentRecord::from_value)
                    .collect::<Result<Vec<_>, _>>()
                {
                    Ok(records) => (records, None),
                    Err(error) => (Vec::new(), Some(error)),
                }
            }
            Some(_) => (Vec::new(), malformed("`data` is not an array")),
            None => (
                Vec::new(),
                Some(EntryError::ComponentMissing(ComponentKind::Position)),
            ),
        };

        Self {
            name,
            records,
            shape_error: name_error.or(data_error),
        }
    }
}

/// One element of an entry's `data` array. Exactly one field is expected to be set, and it has
/// to hold a string.
#[derive(Debug, Clone, Default)]
pub struct ComponentRecord {
    pub location: Option<Value>,
    pub euler: Option<Value>,
    pub scale: Option<Value>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentKind {
    Position,
    Rotation,
    Scale,
}

impl ComponentKind {
    pub const ALL: [ComponentKind; 3] = [
        ComponentKind::Position,
        ComponentKind::Rotation,
        ComponentKind::Scale,
    ];

    /// Key used for this component in the manifest's `data` records.
    pub fn field_name(self) -> &'static str {
        match self {
            ComponentKind::Position => "location",
            ComponentKind::Rotation => "euler",
            ComponentKind::Scale => "scale",
        }
    }
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ComponentKind::Position => "position",
            ComponentKind::Rotation => "rotation",
            ComponentKind::Scale => "scale",
        };
        f.write_str(name)
    }
}

/// A single validated record, still holding the raw literal text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransformComponent<'a> {
    Position(&'a str),
    Rotation(&'a str),
    Scale(&'a str),
}

impl<'a> TransformComponent<'a> {
    pub fn new(kind: ComponentKind, literal: &'a str) -> Self {
        match kind {
            ComponentKind::Position => TransformComponent::Position(literal),
            ComponentKind::Rotation => TransformComponent::Rotation(literal),
            ComponentKind::Scale => TransformComponent::Scale(literal),
        }
    }

    pub fn kind(&self) -> ComponentKind {
        match self {
            TransformComponent::Position(_) => ComponentKind::Position,
            TransformComponent::Rotation(_) => ComponentKind::Rotation,
            TransformComponent::Scale(_) => ComponentKind::Scale,
        }
    }

    pub fn literal(&self) -> &'a str {
        match *self {
            TransformComponent::Position(text)
            | TransformComponent::Rotation(text)
            | TransformComponent::Scale(text) => text,
        }
    }
}

impl ComponentRecord {
    fn from_value(value: &Value) -> Result<Self, EntryError> {
        let object = value.as_object().ok_or(EntryError::MalformedEntry {
            reason: "`data` element is not an object",
        })?;

        let field = |kind: ComponentKind| {
            object
                .get(kind.field_name())
                .filter(|value| !value.is_null())
                .cloned()
        };

        Ok(Self {
            location: field(ComponentKind::Position),
            euler: field(ComponentKind::Rotation),
            scale: field(ComponentKind::Scale),
        })
    }

    pub fn field(&self, kind: ComponentKind) -> Option<&Value> {
        match kind {
            ComponentKind::Position => self.location.as_ref(),
            ComponentKind::Rotation => self.euler.as_ref(),
            ComponentKind::Scale => self.scale.as_ref(),
        }
    }

    pub fn component(&self) -> Result<TransformComponent<'_>, EntryError> {
        let populated: Vec<(ComponentKind, &Value)> = ComponentKind::ALL
            .into_iter()
            .filter_map(|kind| self.field(kind).map(|value| (kind, value)))
            .collect();

        let [(kind, value)] = populated[..] else {
            return Err(EntryError::MalformedComponent {
                populated: populated.len(),
            });
        };

        let text = value.as_str().ok_or(EntryError::ComponentNotText(kind))?;
        Ok(TransformComponent::new(kind, text))
    }
}

/// The three literals an entry needs for placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransformLiterals<'a> {
    pub position: &'a str,
    pub rotation: &'a str,
    pub scale: &'a str,
}

impl ManifestEntry {
    /// Validates the entry's records: every record must hold exactly one field and each kind may
    /// only appear once.
    pub fn components(&self) -> Result<Vec<TransformComponent<'_>>, EntryError> {
        if let Some(error) = &self.shape_error {
            return Err(error.clone());
        }

        let mut components: Vec<TransformComponent> = Vec::with_capacity(self.records.len());

        for record in &self.records {
            let component = record.component()?;
            if components.iter().any(|c| c.kind() == component.kind()) {
                return Err(EntryError::DuplicateComponent(component.kind()));
            }
            components.push(component);
        }

        Ok(components)
    }

    pub fn transform_literals(&self) -> Result<TransformLiterals<'_>, EntryError> {
        let components = self.components()?;

        let find = |kind: ComponentKind| {
            components
                .iter()
                .find(|c| c.kind() == kind)
                .map(|c| c.literal())
                .ok_or(EntryError::ComponentMissing(kind))
        };

        Ok(TransformLiterals {
            position: find(ComponentKind::Position)?,
            rotation: find(ComponentKind::Rotation)?,
            scale: find(ComponentKind::Scale)?,
        })
    }

    /// Parses the entry's literals into a source-space transform.
    pub fn source_transform(&self) -> Result<SourceTransform, EntryError> {
        let literals = self.transform_literals()?;

        Ok(SourceTransform {
            position: parse_vector(literals.position, ComponentKind::Position)?,
            rotation: parse_euler(literals.rotation)?,
            scale: parse_vector(literals.scale, ComponentKind::Scale)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn full_entry(name: &str) -> ManifestEntry {
        ManifestEntry::from(json!({
            "name": name,
            "data": [
                { "location": "<Vector (1.0, 2.0, 3.0)>" },
                { "euler": "<Euler (x=0.0, y=0.0, z=0.0), order='XYZ'>" },
                { "scale": "<Vector (1.0, 1.0, 1.0)>" },
            ],
        }))
    }

    #[test]
    fn parses_manifest_in_document_order() {
        let manifest = Manifest::from_json(
            r#"{"items": [
                {"name": "Chair.001", "data": [{"location": "<Vector (0, 0, 0)>"}]},
                {"name": "Lamp", "data": []}
            ]}"#,
        )
        .unwrap();

        let names: Vec<_> = manifest.items.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["Chair.001", "Lamp"]);
        assert_eq!(
            manifest.items[0].records[0].field(ComponentKind::Position),
            Some(&json!("<Vector (0, 0, 0)>"))
        );
    }

    #[test]
    fn rejects_document_without_items() {
        assert!(Manifest::from_json(r#"{"entries": []}"#).is_err());
        assert!(Manifest::from_json("not json").is_err());
    }

    #[test]
    fn extracts_literals_in_any_record_order() {
        let entry = ManifestEntry::from(json!({
            "name": "Chair",
            "data": [
                { "scale": "S" },
                { "location": "P" },
                { "euler": "R" },
            ],
        }));

        assert_eq!(
            entry.transform_literals(),
            Ok(TransformLiterals {
                position: "P",
                rotation: "R",
                scale: "S",
            })
        );
    }

    #[test]
    fn reports_first_missing_kind() {
        let entry = ManifestEntry::from(json!({
            "name": "Chair",
            "data": [{ "euler": "R" }],
        }));

        assert_eq!(
            entry.transform_literals(),
            Err(EntryError::ComponentMissing(ComponentKind::Position))
        );
    }

    #[test]
    fn record_must_hold_exactly_one_field() {
        let empty = ManifestEntry::from(json!({ "name": "A", "data": [{}] }));
        assert_eq!(
            empty.components(),
            Err(EntryError::MalformedComponent { populated: 0 })
        );

        let crowded = ManifestEntry::from(json!({
            "name": "B",
            "data": [{ "location": "P", "scale": "S" }],
        }));
        assert_eq!(
            crowded.components(),
            Err(EntryError::MalformedComponent { populated: 2 })
        );
    }

    #[test]
    fn null_fields_count_as_absent() {
        let entry = ManifestEntry::from(json!({
            "name": "A",
            "data": [{ "location": "P", "euler": null }],
        }));

        assert_eq!(entry.components(), Ok(vec![TransformComponent::Position("P")]));
    }

    #[test]
    fn duplicate_kind_is_rejected() {
        let entry = ManifestEntry::from(json!({
            "name": "A",
            "data": [{ "scale": "S" }, { "scale": "T" }],
        }));

        assert_eq!(
            entry.components(),
            Err(EntryError::DuplicateComponent(ComponentKind::Scale))
        );
    }

    #[test]
    fn non_string_literal_is_reported_per_entry() {
        let entry = ManifestEntry::from(json!({
            "name": "A",
            "data": [{ "location": 5 }],
        }));

        let error = entry.components().unwrap_err();
        assert_eq!(error, EntryError::ComponentNotText(ComponentKind::Position));
        assert_eq!(error.to_string(), "`location` record is not a string");
    }

    #[test]
    fn missing_data_means_missing_position() {
        let entry = ManifestEntry::from(json!({ "name": "A" }));

        assert_eq!(entry.name, "A");
        assert_eq!(
            entry.source_transform(),
            Err(EntryError::ComponentMissing(ComponentKind::Position))
        );
    }

    #[test]
    fn malformed_entry_shapes_become_entry_errors() {
        let cases = [
            (json!(42), UNNAMED_ENTRY, "entry is not an object"),
            (json!({ "data": [] }), UNNAMED_ENTRY, "missing `name`"),
            (json!({ "name": 7, "data": [] }), "7", "`name` is not a string"),
            (json!({ "name": "A", "data": {} }), "A", "`data` is not an array"),
            (json!({ "name": "A", "data": ["P"] }), "A", "`data` element is not an object"),
        ];

        for (value, name, reason) in cases {
            let entry = ManifestEntry::from(value);
            assert_eq!(entry.name, name);
            assert_eq!(
                entry.components(),
                Err(EntryError::MalformedEntry { reason })
            );
        }
    }

    #[test]
    fn builds_source_transform() {
        let source = full_entry("Chair").source_transform().unwrap();

        assert_eq!(source.position, glam::Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(source.rotation, glam::Vec3::ZERO);
        assert_eq!(source.scale, glam::Vec3::ONE);
    }
}
