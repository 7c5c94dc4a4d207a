//! Schema registry: per-variant output contracts and their validation.

mod descriptor;
mod registry;
mod validate;

pub use descriptor::{FieldDescriptions, FieldKind, FieldSpec, ObjectSchema, SchemaDescriptor};
pub use registry::{define, field_descriptions, tool_spec};
pub use validate::{validate, ROOT_PATH};
