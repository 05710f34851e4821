//! Per-type rewrite rules

use super::error::TransformError;
use super::object::{Object, Value, ValueMap};
use super::pending::Pending;

/// Legacy group types whose `members` become a list
const GROUP_TYPES: &[&str] = &["contactgroup", "hostgroup", "servicegroup"];

/// Which rewrite applies to a legacy type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    Command,
    Group,
    Service,
    /// Unknown types keep their remaining properties as strings
    PassThrough,
}

impl Rule {
    pub fn for_type(object_type: &str) -> Self {
        match object_type {
            "command" => Rule::Command,
            "service" => Rule::Service,
            t if GROUP_TYPES.contains(&t) => Rule::Group,
            _ => Rule::PassThrough,
        }
    }

    /// Whether properties left over after the rewrite are dropped
    pub fn drops_leftovers(self) -> bool {
        !matches!(self, Rule::PassThrough)
    }
}

/// A command becomes an abstract service template inheriting the bridge template
pub fn rewrite_command(object: &mut Object, pending: &mut Pending<'_>, bridge: &str) {
    object.object_type = "service".to_string();
    object.is_abstract = true;
    object.parents.push(bridge.to_string());

    if let Some(command_line) = pending.take("command_line") {
        object.properties.insert("check_command", command_line);
    }
}

pub fn rewrite_group(object: &mut Object, pending: &mut Pending<'_>) {
    if let Some(alias) = pending.take("alias") {
        object.properties.insert("alias", alias);
    }
    if let Some(members) = pending.take("members") {
        let members: Vec<Value> = members.split(',').map(Value::from).collect();
        object.properties.insert("members", members);
    }
}

pub fn rewrite_service(object: &mut Object, pending: &mut Pending<'_>) -> Result<(), TransformError> {
    let mut macros = ValueMap::new();
    let mut properties = ValueMap::new();

    if let Some(check_command) = pending.take("check_command") {
        let mut tokens = check_command.split('!');
        if let Some(command) = tokens.next() {
            object.parents.push(command.to_string());
        }
        for (index, arg) in tokens.enumerate() {
            macros.insert(format!("ARG{}", index + 1), arg);
        }
    }

    for key in ["check_interval", "retry_interval"] {
        if let Some(raw) = pending.take(key) {
            let seconds = minutes_to_seconds(raw).ok_or_else(|| {
                TransformError::conversion(&object.object_type, &object.name, key, raw, "a number of minutes")
            })?;
            properties.insert(key, seconds);
        }
    }

    if let Some(raw) = pending.take("max_check_attempts") {
        let attempts = parse_integer(raw).ok_or_else(|| {
            TransformError::conversion(&object.object_type, &object.name, "max_check_attempts", raw, "an integer")
        })?;
        properties.insert("max_check_attempts", attempts);
    }

    macros.insert("SERVICEDESC", object.name.clone());

    if let Some(host) = pending.take("host_name") {
        properties.insert("host_name", host);
        macros.insert("HOSTNAME", host);
    }

    if let Some(description) = pending.take("service_description") {
        properties.insert("alias", description);
    }

    for (key, value) in pending.take_where(|key| key.starts_with('_')) {
        macros.insert(key, value);
    }

    object.properties.insert("macros", macros);
    object.properties.extend(properties);
    Ok(())
}

/// Legacy intervals are minutes, possibly fractional
pub fn minutes_to_seconds(raw: &str) -> Option<i64> {
    let minutes: f64 = raw.trim().parse().ok()?;
    let seconds = (minutes * 60.0).round();
    if !seconds.is_finite() || seconds.abs() >= i64::MAX as f64 {
        return None;
    }
    Some(seconds as i64)
}

pub fn parse_integer(raw: &str) -> Option<i64> {
    raw.trim().parse().ok()
}
