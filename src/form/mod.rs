//! Form model: named controls, field-set capture, validation and payload.

mod preset;

pub use preset::Preset;

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::error::ValidationError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Control {
    pub name: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Form {
    id: String,
    controls: Vec<Control>,
}

impl Form {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into(), controls: Vec::new() }
    }

    /// A form pre-populated with the preset's controls, all empty.
    pub fn with_preset(id: impl Into<String>, preset: Preset) -> Self {
        let mut form = Self::new(id);
        for name in preset.fields() {
            form.add_control(*name, "");
        }
        form
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Appends a control even if one with the same name exists.
    pub fn add_control(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.controls.push(Control { name: name.into(), value: value.into() });
    }

    /// Sets every control named `name`, or appends one when none exists.
    pub fn set(&mut self, name: &str, value: impl Into<String>) {
        let value = value.into();
        let mut found = false;
        for c in self.controls.iter_mut().filter(|c| c.name == name) {
            c.value = value.clone();
            found = true;
        }
        if !found {
            self.add_control(name, value);
        }
    }

    /// Snapshot of the current control values.
    pub fn capture(&self) -> FieldSet {
        FieldSet {
            entries: self.controls.iter().map(|c| (c.name.clone(), c.value.clone())).collect(),
        }
    }
}

/// Ordered (name, value) pairs captured at submission time. Names may repeat.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldSet {
    entries: Vec<(String, String)>,
}

impl FieldSet {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Every captured value must be non-empty.
    pub fn validate(&self) -> Result<(), ValidationError> {
        match self.entries.iter().find(|(_, v)| v.is_empty()) {
            Some((name, _)) => Err(ValidationError { field: name.clone() }),
            None => Ok(()),
        }
    }

    /// One key per name in first-seen order; a repeated name keeps its last value.
    pub fn to_payload(&self) -> Payload {
        let mut fields: Vec<(String, String)> = Vec::with_capacity(self.entries.len());
        for (name, value) in &self.entries {
            match fields.iter_mut().find(|(k, _)| k == name) {
                Some(slot) => slot.1 = value.clone(),
                None => fields.push((name.clone(), value.clone())),
            }
        }
        Payload { fields }
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FieldSet {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self { entries: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect() }
    }
}

/// JSON request body: an object of string values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Payload {
    fields: Vec<(String, String)>,
}

impl Payload {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields.iter().find(|(k, _)| k == name).map(|(_, v)| v.as_str())
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

impl Serialize for Payload {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (k, v) in &self.fields {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

/// Parses `NAME=VALUE`. The value may be empty; the name may not.
pub fn parse_assignment(s: &str) -> Result<(String, String), String> {
    let (name, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=VALUE, got {:?}", s))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("missing field name in {:?}", s));
    }
    Ok((name.to_string(), value.to_string()))
}

/// Reads fields piped on stdin: a JSON object of strings, or `NAME=VALUE` lines.
pub fn parse_field_input(text: &str) -> Result<Vec<(String, String)>, String> {
    let trimmed = text.trim();
    if trimmed.starts_with('{') {
        let map: serde_json::Map<String, serde_json::Value> =
            serde_json::from_str(trimmed).map_err(|e| format!("invalid JSON fields: {}", e))?;
        return map
            .into_iter()
            .map(|(k, v)| match v {
                serde_json::Value::String(s) => Ok((k, s)),
                other => Err(format!("field {} must be a string, got {}", k, other)),
            })
            .collect();
    }
    trimmed
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty() && !l.starts_with('#'))
        .map(parse_assignment)
        .collect()
}
