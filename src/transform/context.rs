//! Append-only registry of converted objects

use std::collections::BTreeMap;

use super::object::Object;

/// What the context remembers about a converted object
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectRef {
    pub object_type: String,
    pub name: String,
    pub parents: Vec<String>,
    /// Line of the `define` header; 0 for synthesized objects
    pub line: usize,
}

/// A legacy property that no rewrite rule consumed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DroppedProperty {
    pub object_type: String,
    pub name: String,
    pub key: String,
    pub line: usize,
}

/// State threaded through every transform step
#[derive(Debug, Default)]
pub struct ConversionContext {
    /// type -> name -> number of definitions
    objects_by_type: BTreeMap<String, BTreeMap<String, usize>>,
    all_objects: Vec<ObjectRef>,
    dropped: Vec<DroppedProperty>,
}

impl ConversionContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a converted object; returns false if `(type, name)` was already known
    pub fn register(&mut self, object: &Object, line: usize) -> bool {
        let count = self
            .objects_by_type
            .entry(object.object_type.clone())
            .or_default()
            .entry(object.name.clone())
            .or_insert(0);
        *count += 1;

        self.all_objects.push(ObjectRef {
            object_type: object.object_type.clone(),
            name: object.name.clone(),
            parents: object.parents.clone(),
            line,
        });
        *count == 1
    }

    pub fn record_dropped(&mut self, object: &Object, key: &str, line: usize) {
        self.dropped.push(DroppedProperty {
            object_type: object.object_type.clone(),
            name: object.name.clone(),
            key: key.to_string(),
            line,
        });
    }

    pub fn contains(&self, object_type: &str, name: &str) -> bool {
        self.objects_by_type
            .get(object_type)
            .is_some_and(|names| names.contains_key(name))
    }

    /// Converted objects in input order
    pub fn objects(&self) -> &[ObjectRef] {
        &self.all_objects
    }

    /// `(type, name, count)` for every name defined more than once
    pub fn duplicates(&self) -> impl Iterator<Item = (&str, &str, usize)> {
        self.objects_by_type.iter().flat_map(|(object_type, names)| {
            names
                .iter()
                .filter(|(_, count)| **count > 1)
                .map(move |(name, count)| (object_type.as_str(), name.as_str(), *count))
        })
    }

    pub fn dropped(&self) -> &[DroppedProperty] {
        &self.dropped
    }

    pub fn len(&self) -> usize {
        self.all_objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.all_objects.is_empty()
    }
}
