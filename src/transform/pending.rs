//! Consuming view over a record's properties

use crate::parser::Record;

/// Tracks which properties of an immutable [`Record`] have been translated
pub struct Pending<'a> {
    record: &'a Record,
    taken: Vec<bool>,
}

impl<'a> Pending<'a> {
    pub fn new(record: &'a Record) -> Self {
        Self {
            record,
            taken: vec![false; record.properties.len()],
        }
    }

    fn position(&self, key: &str) -> Option<usize> {
        self.record
            .properties
            .iter()
            .enumerate()
            .find(|(index, (k, _))| !self.taken[*index] && *k == key)
            .map(|(index, _)| index)
    }

    fn value_at(&self, index: usize) -> Option<(&'a str, &'a str)> {
        self.record.properties.iter().nth(index)
    }

    /// Look at an unconsumed property without taking it
    pub fn peek(&self, key: &str) -> Option<&'a str> {
        let index = self.position(key)?;
        self.value_at(index).map(|(_, value)| value)
    }

    /// Consume a property
    pub fn take(&mut self, key: &str) -> Option<&'a str> {
        let index = self.position(key)?;
        self.taken[index] = true;
        self.value_at(index).map(|(_, value)| value)
    }

    /// Consume every property whose key matches, in input order
    pub fn take_where(&mut self, mut matches: impl FnMut(&str) -> bool) -> Vec<(&'a str, &'a str)> {
        let record = self.record;
        let mut taken = Vec::new();
        for (index, (key, value)) in record.properties.iter().enumerate() {
            if !self.taken[index] && matches(key) {
                self.taken[index] = true;
                taken.push((key, value));
            }
        }
        taken
    }

    /// Consume everything left
    pub fn remaining(mut self) -> Vec<(&'a str, &'a str)> {
        self.take_where(|_| true)
    }
}
