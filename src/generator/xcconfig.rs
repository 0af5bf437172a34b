//! Build settings files.

use std::collections::BTreeMap;

use super::Generator;

/// A flat settings file: one `KEY = value` line per setting, in key order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Xcconfig {
    settings: BTreeMap<String, String>,
}

impl Xcconfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.settings.insert(key.into(), value.into());
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.settings.get(key).map(String::as_str)
    }

    pub fn settings(&self) -> &BTreeMap<String, String> {
        &self.settings
    }
}

impl Generator for Xcconfig {
    fn generate(&self) -> String {
        let mut output = String::new();
        for (key, value) in &self.settings {
            let line = format!("{} = {}", key, value);
            output.push_str(line.trim_end());
            output.push('\n');
        }
        output
    }
}
