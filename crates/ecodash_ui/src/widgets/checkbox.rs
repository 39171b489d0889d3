//! Checkbox widget

use crate::error::{Result, WidgetError};
use crate::reactive::FieldName;
use crate::widget_identity;

use super::{Widget, WidgetKind};

/// A boolean toggle.
#[derive(Debug, Clone)]
pub struct Checkbox {
    name: FieldName,
    label: String,
    value: bool,
}

impl Checkbox {
    pub fn new(name: FieldName, label: impl Into<String>, value: bool) -> Self {
        Self {
            name,
            label: label.into(),
            value,
        }
    }

    pub fn is_checked(&self) -> bool {
        self.value
    }
}

impl Widget for Checkbox {
    type Value = bool;

    widget_identity!();

    fn kind(&self) -> WidgetKind {
        WidgetKind::Checkbox
    }

    fn value(&self) -> &bool {
        &self.value
    }

    fn store(&mut self, value: bool) {
        self.value = value;
    }

    fn parse(&self, raw: &str) -> Result<bool> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "true" | "yes" | "on" | "1" => Ok(true),
            "false" | "no" | "off" | "0" => Ok(false),
            _ => Err(WidgetError::invalid_value(
                self.name,
                raw,
                "expected true/false",
            )),
        }
    }

    fn display_value(&self) -> String {
        self.value.to_string()
    }
}
