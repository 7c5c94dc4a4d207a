//! Structural schema descriptors.
//!
//! A descriptor declares field presence, JSON type, numeric bounds and enum
//! membership. Human-readable field semantics live in a separate
//! [`FieldDescriptions`] map and are only merged in when rendering the JSON
//! Schema sent to the model.

use serde_json::{json, Map, Value};
use std::collections::HashMap;

use crate::domain::evaluation::tool::ToolSpec;
use crate::domain::evaluation::variant::EvaluationVariant;
use crate::domain::json::join_path;

use super::registry::field_descriptions;

/// Expected shape of a single value.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldKind {
    /// A JSON number within inclusive bounds.
    Number { min: f64, max: f64 },
    /// Any JSON string.
    Text,
    /// A JSON string drawn from a closed set of members.
    Enum(&'static [&'static str]),
    /// A JSON array whose elements all have the given kind.
    List(Box<FieldKind>),
    /// A nested JSON object.
    Object(ObjectSchema),
}

impl FieldKind {
    /// The unit interval used by every score in an evaluation.
    pub fn unit_score() -> Self {
        FieldKind::Number { min: 0.0, max: 1.0 }
    }

    pub fn text_list() -> Self {
        FieldKind::List(Box::new(FieldKind::Text))
    }

    /// JSON type name expected for this kind.
    pub fn json_type(&self) -> &'static str {
        match self {
            FieldKind::Number { .. } => "number",
            FieldKind::Text | FieldKind::Enum(_) => "string",
            FieldKind::List(_) => "array",
            FieldKind::Object(_) => "object",
        }
    }
}

/// One named field of an object schema.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSpec {
    name: &'static str,
    kind: FieldKind,
    required: bool,
}

impl FieldSpec {
    pub fn required(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            kind,
            required: true,
        }
    }

    pub fn optional(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            kind,
            required: false,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn kind(&self) -> &FieldKind {
        &self.kind
    }

    pub fn is_required(&self) -> bool {
        self.required
    }
}

/// Ordered set of declared fields of an object.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ObjectSchema {
    fields: Vec<FieldSpec>,
}

impl ObjectSchema {
    pub fn new(fields: Vec<FieldSpec>) -> Self {
        Self { fields }
    }

    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }
}

/// Human-readable field semantics keyed by dotted field path.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldDescriptions(HashMap<String, &'static str>);

impl FieldDescriptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, path: impl Into<String>, description: &'static str) {
        self.0.insert(path.into(), description);
    }

    pub fn get(&self, path: &str) -> Option<&'static str> {
        self.0.get(path).copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Immutable output contract of one evaluation variant.
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaDescriptor {
    variant: EvaluationVariant,
    tool_description: &'static str,
    root: ObjectSchema,
}

impl SchemaDescriptor {
    pub fn new(variant: EvaluationVariant, tool_description: &'static str, root: ObjectSchema) -> Self {
        Self {
            variant,
            tool_description,
            root,
        }
    }

    pub fn variant(&self) -> EvaluationVariant {
        self.variant
    }

    pub fn tool_name(&self) -> &'static str {
        self.variant.tool_name()
    }

    pub fn tool_description(&self) -> &'static str {
        self.tool_description
    }

    pub fn root(&self) -> &ObjectSchema {
        &self.root
    }

    /// Renders the JSON Schema of this variant with its registered descriptions.
    pub fn to_json_schema(&self) -> Value {
        self.render_json_schema(field_descriptions(self.variant))
    }

    /// Renders the JSON Schema combining structure with the given descriptions.
    pub fn render_json_schema(&self, descriptions: &FieldDescriptions) -> Value {
        render_object(&self.root, "", descriptions)
    }

    /// The tool the model is forced to invoke for this variant.
    pub fn tool_spec(&self) -> ToolSpec {
        ToolSpec::new(self.tool_name(), self.tool_description, self.to_json_schema())
    }
}

fn render_object(schema: &ObjectSchema, path: &str, descriptions: &FieldDescriptions) -> Value {
    let mut properties = Map::new();
    let mut required = Vec::new();

    for field in schema.fields() {
        let field_path = join_path(path, field.name());
        let mut rendered = render_kind(field.kind(), &field_path, descriptions);
        if let (Some(description), Some(obj)) =
            (descriptions.get(&field_path), rendered.as_object_mut())
        {
            obj.insert("description".to_string(), json!(description));
        }
        properties.insert(field.name().to_string(), rendered);
        if field.is_required() {
            required.push(json!(field.name()));
        }
    }

    json!({
        "type": "object",
        "properties": properties,
        "required": required,
    })
}

fn render_kind(kind: &FieldKind, path: &str, descriptions: &FieldDescriptions) -> Value {
    match kind {
        FieldKind::Number { min, max } => json!({
            "type": "number",
            "minimum": min,
            "maximum": max,
        }),
        FieldKind::Text => json!({ "type": "string" }),
        FieldKind::Enum(members) => json!({ "type": "string", "enum": members }),
        FieldKind::List(item) => json!({
            "type": "array",
            "items": render_kind(item, path, descriptions),
        }),
        FieldKind::Object(schema) => render_object(schema, path, descriptions),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> SchemaDescriptor {
        SchemaDescriptor::new(
            EvaluationVariant::Evaluator,
            "Evalúa",
            ObjectSchema::new(vec![
                FieldSpec::required("score", FieldKind::unit_score()),
                FieldSpec::optional("strengths", FieldKind::text_list()),
                FieldSpec::required(
                    "analysis",
                    FieldKind::Object(ObjectSchema::new(vec![FieldSpec::required(
                        "rationale",
                        FieldKind::Text,
                    )])),
                ),
            ]),
        )
    }

    #[test]
    fn renders_required_list_and_bounds() {
        let schema = sample().render_json_schema(&FieldDescriptions::new());

        assert_eq!(schema["type"], "object");
        assert_eq!(schema["required"], json!(["score", "analysis"]));
        assert_eq!(schema["properties"]["score"]["minimum"], 0.0);
        assert_eq!(schema["properties"]["score"]["maximum"], 1.0);
        assert_eq!(schema["properties"]["strengths"]["items"]["type"], "string");
        assert_eq!(
            schema["properties"]["analysis"]["properties"]["rationale"],
            json!({ "type": "string" })
        );
    }

    #[test]
    fn descriptions_are_attached_by_path() {
        let mut descriptions = FieldDescriptions::new();
        descriptions.insert("score", "Puntuación global");
        descriptions.insert("analysis.rationale", "Justificación");

        let schema = sample().render_json_schema(&descriptions);

        assert_eq!(schema["properties"]["score"]["description"], "Puntuación global");
        assert_eq!(
            schema["properties"]["analysis"]["properties"]["rationale"]["description"],
            "Justificación"
        );
        assert!(schema["properties"]["strengths"].get("description").is_none());
    }

    #[test]
    fn structure_does_not_depend_on_descriptions() {
        let descriptor = sample();
        let mut descriptions = FieldDescriptions::new();
        descriptions.insert("score", "Puntuación");

        let mut bare = descriptor.render_json_schema(&FieldDescriptions::new());
        let mut described = descriptor.render_json_schema(&descriptions);
        bare["properties"]["score"]
            .as_object_mut()
            .unwrap()
            .remove("description");
        described["properties"]["score"]
            .as_object_mut()
            .unwrap()
            .remove("description");
        assert_eq!(bare, described);
    }

    #[test]
    fn enum_kind_lists_members() {
        let rendered = render_kind(
            &FieldKind::Enum(&["A", "B"]),
            "x",
            &FieldDescriptions::new(),
        );
        assert_eq!(rendered, json!({ "type": "string", "enum": ["A", "B"] }));
    }
}
