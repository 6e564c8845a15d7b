use rmcp::model::JsonObject;
use rmcp::schemars::{self, JsonSchema, generate::SchemaSettings};
use std::sync::Arc;

/// Generate an inline JSON schema for an MCP tool's parameters.
///
/// Subschemas are inlined instead of referenced through `$defs`, so enum
/// parameters such as the output format show up as plain string enums.
pub fn inline_schema_for_type<T: JsonSchema>() -> Arc<JsonObject> {
    let mut settings = SchemaSettings::draft07();
    settings.transforms = vec![Box::new(schemars::transform::AddNullable::default())];
    settings.inline_subschemas = true;

    let schema = settings.into_generator().into_root_schema_for::<T>();
    match serde_json::to_value(schema) {
        Ok(serde_json::Value::Object(object)) => Arc::new(object),
        Ok(other) => {
            tracing::warn!(
                "Schema for {} is not an object: {}",
                std::any::type_name::<T>(),
                other
            );
            Arc::new(JsonObject::new())
        }
        Err(e) => {
            tracing::warn!(
                "Failed to serialize schema for {}: {}",
                std::any::type_name::<T>(),
                e
            );
            Arc::new(JsonObject::new())
        }
    }
}
