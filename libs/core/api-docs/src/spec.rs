//! Per-version OpenAPI document assembly
//!
//! [`ApiSpec`] keeps the document header (`openapi`, `info`, `servers`) as a
//! `utoipa` object and everything views contribute (paths, components, tags)
//! as serialized JSON. Contributions are only ever serialized, never parsed
//! back into the `utoipa` model, so any schema a view can derive can be
//! published. Schema names always go through the resolver.

use crate::error::{ApiDocsError, Result};
use crate::resolver::{SchemaDescriptor, resolve_schema_name};
use serde_json::{Map, Value};
use std::collections::{BTreeMap, HashMap};
use tracing::{debug, warn};
use utoipa::openapi::{InfoBuilder, OpenApi, OpenApiBuilder, PathItem, Ref, RefOr, Schema, Server};

/// Prefix of every component schema reference.
pub const SCHEMA_REF_PREFIX: &str = "#/components/schemas/";

const SCHEMAS: &str = "schemas";

/// OpenAPI document for a single API version.
#[derive(Clone)]
pub struct ApiSpec {
    version: String,
    header: OpenApi,
    paths: Map<String, Value>,
    /// Component section (`schemas`, `responses`, ...) to its named entries
    components: BTreeMap<String, Map<String, Value>>,
    tags: Vec<Value>,
}

impl ApiSpec {
    /// Creates an empty spec titled and described after the application,
    /// served from `/api/{version}`.
    pub fn new(app_name: &str, version: &str) -> Self {
        let info = InfoBuilder::new()
            .title(app_name)
            .version(version)
            .description(Some(app_name))
            .build();

        let header = OpenApiBuilder::new()
            .info(info)
            .servers(Some(vec![Server::new(format!("/api/{}", version))]))
            .build();

        Self {
            version: version.to_string(),
            header,
            paths: Map::new(),
            components: BTreeMap::new(),
            tags: Vec::new(),
        }
    }

    /// The API version this spec documents.
    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn has_path(&self, path: &str) -> bool {
        self.paths.contains_key(path)
    }

    pub fn has_schema(&self, name: &str) -> bool {
        self.components
            .get(SCHEMAS)
            .is_some_and(|schemas| schemas.contains_key(name))
    }

    /// Stores a schema under its resolved name and returns a reference to it.
    pub fn register_schema(
        &mut self,
        descriptor: &SchemaDescriptor,
        schema: impl Into<RefOr<Schema>>,
    ) -> Result<Ref> {
        let name = resolve_schema_name(descriptor);
        let schema = serde_json::to_value(schema.into())?;
        self.insert_component(SCHEMAS, name.clone(), schema);

        Ok(Ref::from_schema_name(name))
    }

    /// Adds a path item, relative to the `/api/{version}` server.
    ///
    /// When the path is already documented the operations are merged, and an
    /// operation for the same method replaces the existing one.
    pub fn add_path(&mut self, path: impl Into<String>, item: PathItem) -> Result<()> {
        let item = serde_json::to_value(&item)?;
        self.merge_path_item(path.into(), item);
        Ok(())
    }

    /// Merges a derived document into this spec.
    ///
    /// Paths are mounted under `prefix`. Component schemas are renamed
    /// through the resolver and every reference to them is rewritten.
    /// Components and tags are merged; the document header is ignored.
    pub fn merge_document(&mut self, prefix: &str, document: OpenApi) -> Result<()> {
        let invalid = |reason: &str| ApiDocsError::InvalidDocument {
            view: prefix.to_string(),
            reason: reason.to_string(),
        };

        let Value::Object(mut root) = serde_json::to_value(&document)? else {
            return Err(invalid("not an object"));
        };

        let renames = rename_component_schemas(&mut root, prefix);
        if !renames.is_empty() {
            for child in root.values_mut() {
                rewrite_schema_refs(child, &renames);
            }
        }

        match root.remove("paths") {
            Some(Value::Object(paths)) => {
                for (path, item) in paths {
                    self.merge_path_item(join_path(prefix, &path), item);
                }
            }
            Some(_) => return Err(invalid("paths is not an object")),
            None => {}
        }

        match root.remove("components") {
            Some(Value::Object(components)) => {
                for (section, entries) in components {
                    let Value::Object(entries) = entries else {
                        return Err(invalid("component section is not an object"));
                    };
                    for (name, component) in entries {
                        self.insert_component(&section, name, component);
                    }
                }
            }
            Some(_) => return Err(invalid("components is not an object")),
            None => {}
        }

        if let Some(Value::Array(tags)) = root.remove("tags") {
            for tag in tags {
                let known = self
                    .tags
                    .iter()
                    .any(|existing| existing.get("name") == tag.get("name"));
                if !known {
                    self.tags.push(tag);
                }
            }
        }

        Ok(())
    }

    /// Serializes the spec to a JSON value.
    pub fn to_json(&self) -> Result<Value> {
        let mut document = serde_json::to_value(&self.header)?;
        let Value::Object(root) = &mut document else {
            return Err(ApiDocsError::InvalidDocument {
                view: self.version.clone(),
                reason: "header is not an object".to_string(),
            });
        };

        root.insert("paths".to_string(), Value::Object(self.paths.clone()));
        if !self.components.is_empty() {
            let components = self
                .components
                .iter()
                .map(|(section, entries)| (section.clone(), Value::Object(entries.clone())))
                .collect();
            root.insert("components".to_string(), Value::Object(components));
        }
        if !self.tags.is_empty() {
            root.insert("tags".to_string(), Value::Array(self.tags.clone()));
        }

        Ok(document)
    }

    fn merge_path_item(&mut self, path: String, item: Value) {
        match self.paths.get_mut(&path) {
            Some(Value::Object(existing)) => {
                if let Value::Object(operations) = item {
                    existing.extend(operations);
                }
            }
            _ => {
                self.paths.insert(path, item);
            }
        }
    }

    fn insert_component(&mut self, section: &str, name: String, component: Value) {
        let entries = self.components.entry(section.to_string()).or_default();
        if section == SCHEMAS && entries.contains_key(&name) {
            debug!(schema = %name, version = %self.version, "Replacing registered schema");
        }
        entries.insert(name, component);
    }
}

/// Renames the document's component schemas through the resolver.
///
/// Returns the renamed entries (old name to new name). When two schemas
/// resolve to the same name only one is kept: the one already published
/// under that name, otherwise the first in document order.
fn rename_component_schemas(root: &mut Map<String, Value>, view: &str) -> HashMap<String, String> {
    let Some(Value::Object(schemas)) = root
        .get_mut("components")
        .and_then(|components| components.get_mut(SCHEMAS))
    else {
        return HashMap::new();
    };

    let mut renames = HashMap::new();
    let mut sources: HashMap<String, String> = HashMap::new();
    let mut resolved = Map::new();

    for (name, schema) in std::mem::take(schemas) {
        let target = resolve_schema_name(&SchemaDescriptor::named(name.as_str()));
        if target != name {
            renames.insert(name.clone(), target.clone());
        }

        let Some(existing) = sources.get(&target).cloned() else {
            sources.insert(target.clone(), name);
            resolved.insert(target, schema);
            continue;
        };

        let replace = name == target;
        let (kept, dropped) = if replace {
            (name.as_str(), existing.as_str())
        } else {
            (existing.as_str(), name.as_str())
        };
        warn!(
            view,
            schema = %target,
            kept,
            dropped,
            "Component schemas resolve to the same name, references now share one schema"
        );

        if replace {
            sources.insert(target.clone(), name);
            resolved.insert(target, schema);
        }
    }

    *schemas = resolved;
    renames
}

fn rewrite_schema_refs(value: &mut Value, renames: &HashMap<String, String>) {
    match value {
        Value::Object(map) => {
            for (key, child) in map.iter_mut() {
                if key == "$ref" {
                    if let Value::String(reference) = child {
                        if let Some(resolved) = reference
                            .strip_prefix(SCHEMA_REF_PREFIX)
                            .and_then(|name| renames.get(name))
                        {
                            *reference = format!("{}{}", SCHEMA_REF_PREFIX, resolved);
                        }
                    }
                } else {
                    rewrite_schema_refs(child, renames);
                }
            }
        }
        Value::Array(items) => {
            for item in items {
                rewrite_schema_refs(item, renames);
            }
        }
        _ => {}
    }
}

/// Joins a mount prefix and a document path without doubling slashes.
///
/// A document path of `""` or `"/"` is the prefix itself.
pub(crate) fn join_path(prefix: &str, path: &str) -> String {
    let prefix = prefix.trim_end_matches('/');
    let path = path.trim_start_matches('/');
    match (prefix.is_empty(), path.is_empty()) {
        (true, true) => "/".to_string(),
        (_, true) => prefix.to_string(),
        _ => format!("{}/{}", prefix, path),
    }
}
