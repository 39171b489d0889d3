//! Single-line text input

use crate::builder_field;
use crate::error::Result;
use crate::reactive::FieldName;
use crate::widget_identity;

use super::{Widget, WidgetKind};

/// A free-form text field.
#[derive(Debug, Clone)]
pub struct TextInput {
    name: FieldName,
    label: String,
    value: String,
    placeholder: String,
}

impl TextInput {
    pub fn new(name: FieldName, label: impl Into<String>) -> Self {
        Self {
            name,
            label: label.into(),
            value: String::new(),
            placeholder: String::new(),
        }
    }

    builder_field!(placeholder, String);

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self
    }

    pub fn text(&self) -> &str {
        &self.value
    }

    pub fn placeholder_text(&self) -> &str {
        &self.placeholder
    }
}

impl Widget for TextInput {
    type Value = String;

    widget_identity!();

    fn kind(&self) -> WidgetKind {
        WidgetKind::TextInput
    }

    fn value(&self) -> &String {
        &self.value
    }

    fn store(&mut self, value: String) {
        self.value = value;
    }

    fn parse(&self, raw: &str) -> Result<String> {
        Ok(raw.to_string())
    }

    fn display_value(&self) -> String {
        self.value.clone()
    }
}
