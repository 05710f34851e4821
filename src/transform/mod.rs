//! Transformation of legacy records into declarative objects
//!
//! Each record goes through name derivation, `register`/`use` resolution
//! and one per-type rewrite (see [`rules`]). The [`ConversionContext`] is
//! passed explicitly and only ever appended to.

mod context;
mod error;
mod object;
mod pending;
pub mod rules;

pub use context::{ConversionContext, DroppedProperty, ObjectRef};
pub use error::TransformError;
pub use object::{Object, Value, ValueMap};
pub use pending::Pending;
pub use rules::Rule;

use crate::parser::Record;
use crate::settings::Settings;

/// Convert one record, registering the result in `ctx`
pub fn transform(
    record: &Record,
    settings: &Settings,
    ctx: &mut ConversionContext,
) -> Result<Object, TransformError> {
    let mut pending = Pending::new(record);
    let name = derive_name(record, &mut pending)?;
    let mut object = Object::new(record.object_type.clone(), name);

    if let Some(raw) = pending.take("register") {
        let register = rules::parse_integer(raw).ok_or_else(|| {
            TransformError::conversion(&object.object_type, &object.name, "register", raw, "an integer")
        })?;
        if register == 0 {
            object.is_abstract = true;
        }
    }

    if let Some(parents) = pending.take("use") {
        object.parents = parents.split(',').map(str::to_string).collect();
    }

    let rule = Rule::for_type(&record.object_type);
    match rule {
        Rule::Command => rules::rewrite_command(&mut object, &mut pending, &settings.bridge.name),
        Rule::Group => rules::rewrite_group(&mut object, &mut pending),
        Rule::Service => rules::rewrite_service(&mut object, &mut pending)?,
        Rule::PassThrough => {}
    }

    let leftovers = pending.remaining();
    if rule.drops_leftovers() {
        let mut legacy = ValueMap::new();
        for (key, value) in leftovers {
            tracing::debug!(
                object_type = %object.object_type,
                name = %object.name,
                key,
                "dropping unconverted property"
            );
            ctx.record_dropped(&object, key, record.line);
            legacy.insert(key, value);
        }
        if settings.keep_legacy && !legacy.is_empty() {
            object.properties.insert("legacy", legacy);
        }
    } else {
        for (key, value) in leftovers {
            object.properties.insert(key, value);
        }
    }

    if !ctx.register(&object, record.line) {
        tracing::debug!(
            object_type = %object.object_type,
            name = %object.name,
            line = record.line,
            "object defined more than once"
        );
    }
    tracing::debug!(
        object_type = %object.object_type,
        name = %object.name,
        parents = object.parents.len(),
        "converted object"
    );

    Ok(object)
}

/// `<type>_name`, then `name`, then (services) `<service_description>-<host_name>`
///
/// Both `<type>_name` and `name` are consumed when present. The service
/// description is left in place for the service rewrite.
fn derive_name(record: &Record, pending: &mut Pending<'_>) -> Result<String, TransformError> {
    let object_type = record.object_type.as_str();
    let type_key = format!("{}_name", object_type);
    let by_type = pending.take(&type_key);
    let generic = pending.take("name");

    let name = match (by_type, generic) {
        (Some(name), _) | (None, Some(name)) => name.to_string(),
        (None, None) if object_type == "service" => {
            match (pending.peek("service_description"), pending.peek("host_name")) {
                (Some(description), Some(host)) => format!("{}-{}", description, host),
                (Some(_), None) => {
                    return Err(TransformError::identity(
                        object_type,
                        record.line,
                        "service_description given without host_name",
                    ))
                }
                (None, _) => {
                    return Err(TransformError::identity(
                        object_type,
                        record.line,
                        "no service_name, name or service_description",
                    ))
                }
            }
        }
        (None, None) => {
            return Err(TransformError::identity(
                object_type,
                record.line,
                format!("no {} or name", type_key),
            ))
        }
    };

    if name.is_empty() {
        return Err(TransformError::identity(object_type, record.line, "name is empty"));
    }
    Ok(name)
}
