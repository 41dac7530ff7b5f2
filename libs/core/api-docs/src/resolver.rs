//! Schema name resolution
//!
//! Decides the component name a schema is published under, and therefore
//! the target of every `#/components/schemas/...` reference to it.

use utoipa::ToSchema;

/// Suffix stripped from schema type names.
pub const SCHEMA_SUFFIX: &str = "Schema";

/// Type name shared by all internally generated wrapper schemas.
pub const META_SCHEMA: &str = "MetaSchema";

/// Origin of a generated wrapper schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaMeta {
    /// Name of the schema (or operation) the wrapper was generated for
    pub parent_schema_name: String,
    /// Model the wrapper describes
    pub model: String,
}

/// Identifies a schema type for naming purposes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaDescriptor {
    pub name: String,
    pub meta: Option<SchemaMeta>,
}

impl SchemaDescriptor {
    /// A plain named schema type.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            meta: None,
        }
    }

    /// A generated wrapper schema carrying its parent and model.
    pub fn generated(parent_schema_name: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            name: META_SCHEMA.to_string(),
            meta: Some(SchemaMeta {
                parent_schema_name: parent_schema_name.into(),
                model: model.into(),
            }),
        }
    }

    /// Descriptor for a type deriving [`ToSchema`].
    pub fn of<T: ToSchema>() -> Self {
        Self::named(T::name())
    }
}

impl From<&str> for SchemaDescriptor {
    fn from(name: &str) -> Self {
        Self::named(name)
    }
}

/// Resolves the published component name of a schema.
///
/// - generated wrappers (`MetaSchema` with meta) become `"{parent}.{model}"`
/// - a trailing `Schema` is stripped, unless nothing would be left
/// - anything else is kept as is
///
/// ```
/// use api_docs::{SchemaDescriptor, resolve_schema_name};
///
/// assert_eq!(resolve_schema_name(&"ContactSchema".into()), "Contact");
/// assert_eq!(resolve_schema_name(&"Schema".into()), "Schema");
/// assert_eq!(
///     resolve_schema_name(&SchemaDescriptor::generated("ContactApi.get_list", "Contact")),
///     "ContactApi.get_list.Contact"
/// );
/// ```
pub fn resolve_schema_name(schema: &SchemaDescriptor) -> String {
    if schema.name == META_SCHEMA {
        if let Some(meta) = &schema.meta {
            return format!("{}.{}", meta.parent_schema_name, meta.model);
        }
    }

    match schema.name.strip_suffix(SCHEMA_SUFFIX) {
        Some(stripped) if !stripped.is_empty() => stripped.to_string(),
        _ => schema.name.clone(),
    }
}
