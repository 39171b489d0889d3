//! Numeric input, shown either as a plain number field or as an editable slider.

use crate::builder_field;
use crate::error::{Result, WidgetError};
use crate::reactive::FieldName;
use crate::widget_identity;

use super::{Widget, WidgetKind};

/// How the number is presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NumberStyle {
    #[default]
    Input,
    Slider,
}

/// A bounded floating point input.
#[derive(Debug, Clone)]
pub struct NumberInput {
    name: FieldName,
    label: String,
    value: f64,
    start: f64,
    end: f64,
    step: f64,
    style: NumberStyle,
}

impl NumberInput {
    /// Create a number input with range `[start, end]`.
    pub fn new(name: FieldName, label: impl Into<String>, start: f64, end: f64) -> Self {
        Self {
            name,
            label: label.into(),
            value: start.max(0.0).min(end),
            start,
            end,
            step: 0.01,
            style: NumberStyle::Input,
        }
    }

    /// Create an editable slider with range `[start, end]`.
    pub fn slider(name: FieldName, label: impl Into<String>, start: f64, end: f64) -> Self {
        Self::new(name, label, start, end).style(NumberStyle::Slider)
    }

    builder_field!(step, f64);
    builder_field!(style, NumberStyle);

    /// Set the initial value. Out-of-range initial values are clamped.
    pub fn with_value(mut self, value: f64) -> Self {
        self.value = value.clamp(self.start, self.end);
        self
    }

    pub fn get(&self) -> f64 {
        self.value
    }

    pub fn range(&self) -> (f64, f64) {
        (self.start, self.end)
    }

    pub fn increment(&self) -> f64 {
        self.step
    }
}

impl Widget for NumberInput {
    type Value = f64;

    widget_identity!();

    fn kind(&self) -> WidgetKind {
        match self.style {
            NumberStyle::Input => WidgetKind::NumberInput,
            NumberStyle::Slider => WidgetKind::Slider,
        }
    }

    fn value(&self) -> &f64 {
        &self.value
    }

    fn validate(&self, value: &f64) -> Result<()> {
        if !value.is_finite() {
            return Err(WidgetError::invalid_value(
                self.name,
                value.to_string(),
                "not a finite number",
            ));
        }
        if *value < self.start || *value > self.end {
            return Err(WidgetError::OutOfRange {
                field: self.name.to_string(),
                value: *value,
                start: self.start,
                end: self.end,
            });
        }
        Ok(())
    }

    fn store(&mut self, value: f64) {
        self.value = value;
    }

    fn parse(&self, raw: &str) -> Result<f64> {
        raw.trim()
            .parse::<f64>()
            .map_err(|e| WidgetError::invalid_value(self.name, raw, e.to_string()))
    }

    fn display_value(&self) -> String {
        self.value.to_string()
    }
}
