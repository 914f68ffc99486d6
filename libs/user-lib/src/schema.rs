//! JSON Schema documents for user payloads and the adapter that turns
//! `jsonschema` violations into client messages.
//!
//! Messages follow the `instance.<field> ...` wording clients already match on,
//! e.g. `instance.email is not of a type(s) string`, and are reported in the
//! schema's declared field order.

use std::fmt;
use std::sync::LazyLock;

use jsonschema::error::{TypeKind, ValidationErrorKind};
use jsonschema::JSONSchema;
use serde_json::{json, Value};

/// A compiled object schema plus the order its fields are reported in.
pub struct Schema {
    pub name: &'static str,
    pub fields: &'static [&'static str],
    compiled: LazyLock<Result<JSONSchema, String>>,
}

impl fmt::Debug for Schema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Schema")
            .field("name", &self.name)
            .field("fields", &self.fields)
            .finish()
    }
}

fn compile(document: Value) -> Result<JSONSchema, String> {
    JSONSchema::compile(&document).map_err(|e| e.to_string())
}

const NEW_USER_FIELDS: &[&str] = &[
    "username",
    "password",
    "first_name",
    "last_name",
    "email",
    "photo_url",
];

const USER_PATCH_FIELDS: &[&str] = &["password", "first_name", "last_name", "email", "photo_url"];

pub static NEW_USER_SCHEMA: Schema = Schema {
    name: "new user",
    fields: NEW_USER_FIELDS,
    compiled: LazyLock::new(|| {
        compile(json!({
            "type": "object",
            "properties": {
                "username": { "type": "string" },
                "password": { "type": "string" },
                "first_name": { "type": "string" },
                "last_name": { "type": "string" },
                "email": { "type": "string" },
                "photo_url": { "type": "string" }
            },
            "required": NEW_USER_FIELDS
        }))
    }),
};

/// `username` and `is_admin` are absent on purpose: neither may be changed by a patch.
pub static USER_PATCH_SCHEMA: Schema = Schema {
    name: "user patch",
    fields: USER_PATCH_FIELDS,
    compiled: LazyLock::new(|| {
        compile(json!({
            "type": "object",
            "properties": {
                "password": { "type": "string" },
                "first_name": { "type": "string" },
                "last_name": { "type": "string" },
                "email": { "type": "string" },
                "photo_url": { "type": "string" }
            },
            "additionalProperties": false
        }))
    }),
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldError {
    WrongType { path: String, expected: String },
    MissingProperty { property: String },
    AdditionalProperty { property: String },
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldError::WrongType { path, expected } => {
                write!(f, "{path} is not of a type(s) {expected}")
            }
            FieldError::MissingProperty { property } => {
                write!(f, "instance requires property \"{property}\"")
            }
            FieldError::AdditionalProperty { property } => {
                write!(f, "instance is not allowed to have the additional property \"{property}\"")
            }
        }
    }
}

impl FieldError {
    /// Root errors first, then declared fields in schema order, then unknown keys by name.
    fn sort_key(&self, schema: &Schema) -> (u8, usize, String) {
        let position = |name: &str| {
            schema
                .fields
                .iter()
                .position(|field| *field == name)
                .unwrap_or(usize::MAX)
        };

        match self {
            FieldError::WrongType { path, .. } if path == "instance" => (0, 0, String::new()),
            FieldError::WrongType { path, .. } => {
                let field = path.trim_start_matches("instance.");
                (1, position(field), field.to_string())
            }
            FieldError::MissingProperty { property } => (1, position(property), property.clone()),
            FieldError::AdditionalProperty { property } => (2, 0, property.clone()),
        }
    }
}

fn instance_path(pointer: &str) -> String {
    if pointer.is_empty() {
        "instance".to_string()
    } else {
        format!("instance{}", pointer.replace('/', "."))
    }
}

fn type_name(kind: TypeKind) -> String {
    match kind {
        TypeKind::Single(ty) => ty.to_string(),
        TypeKind::Multiple(types) => types
            .into_iter()
            .map(|ty| ty.to_string())
            .collect::<Vec<_>>()
            .join(","),
    }
}

/// Checks `payload` against `schema` and returns every violation in schema order.
///
/// Fails only when the schema document itself does not compile.
pub fn validate(schema: &Schema, payload: &Value) -> anyhow::Result<Vec<FieldError>> {
    let compiled = schema
        .compiled
        .as_ref()
        .map_err(|e| anyhow::anyhow!("{} schema does not compile: {e}", schema.name))?;

    let mut errors = Vec::new();
    if let Err(violations) = compiled.validate(payload) {
        for violation in violations {
            match violation.kind {
                ValidationErrorKind::Type { kind } => errors.push(FieldError::WrongType {
                    path: instance_path(&violation.instance_path.to_string()),
                    expected: type_name(kind),
                }),
                ValidationErrorKind::Required { property } => {
                    errors.push(FieldError::MissingProperty {
                        property: property
                            .as_str()
                            .map(str::to_string)
                            .unwrap_or_else(|| property.to_string()),
                    })
                }
                ValidationErrorKind::AdditionalProperties { unexpected } => errors.extend(
                    unexpected
                        .into_iter()
                        .map(|property| FieldError::AdditionalProperty { property }),
                ),
                other => {
                    tracing::warn!(schema = schema.name, kind = ?other, "unmapped schema violation")
                }
            }
        }
    }

    errors.sort_by_cached_key(|error| error.sort_key(schema));
    Ok(errors)
}

/// Renders violations as the message list returned to clients.
pub fn messages(errors: &[FieldError]) -> Vec<String> {
    errors.iter().map(ToString::to_string).collect()
}
