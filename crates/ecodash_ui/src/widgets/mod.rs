//! Input widgets.
//!
//! A widget is a named value holder with constraints. Widgets never notify
//! anyone themselves: a [`crate::Session`] stores the new value through
//! [`Widget::set`] and then notifies the reactions watching the widget's
//! field name.

mod button;
mod checkbox;
mod choice;
mod file_selector;
mod number_input;
mod text_input;

pub use button::{Button, ButtonStyle};
pub use checkbox::Checkbox;
pub use choice::{Choice, ChoiceKey, ChoiceStyle};
pub use file_selector::FileSelector;
pub use number_input::{NumberInput, NumberStyle};
pub use text_input::TextInput;

use serde::Serialize;

use crate::error::{Result, WidgetError};
use crate::reactive::FieldName;

/// What kind of control a widget is rendered as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WidgetKind {
    FileSelector,
    NumberInput,
    Slider,
    Checkbox,
    TextInput,
    RadioButtons,
    RadioBoxes,
    Select,
    Button,
}

/// A typed widget.
pub trait Widget {
    /// The value type held by this widget.
    type Value: Clone + PartialEq;

    /// Field name used for reaction dependencies.
    fn name(&self) -> FieldName;

    /// Human-readable label.
    fn label(&self) -> &str;

    fn kind(&self) -> WidgetKind;

    fn value(&self) -> &Self::Value;

    /// Check a candidate value against the widget's constraints.
    fn validate(&self, _value: &Self::Value) -> Result<()> {
        Ok(())
    }

    /// Store a value that already passed validation.
    fn store(&mut self, value: Self::Value);

    /// Parse user input into a value (not yet validated).
    fn parse(&self, raw: &str) -> Result<Self::Value>;

    /// Value formatted for display and snapshots.
    fn display_value(&self) -> String;

    /// Validate and store `value`. Returns whether the value changed.
    fn set(&mut self, value: Self::Value) -> Result<bool> {
        self.validate(&value)?;
        if *self.value() == value {
            return Ok(false);
        }
        self.store(value);
        Ok(true)
    }

    /// Register a click. Only buttons accept this.
    fn press(&mut self) -> Result<()> {
        Err(WidgetError::NotAButton(self.name().to_string()))
    }
}

/// Object-safe view of a widget, used for lookups by field name.
pub trait DynWidget {
    fn name(&self) -> FieldName;
    fn label(&self) -> &str;
    fn kind(&self) -> WidgetKind;
    fn display_value(&self) -> String;

    /// Parse, validate and store raw input. Returns whether the value changed.
    fn set_from_str(&mut self, raw: &str) -> Result<bool>;

    fn press(&mut self) -> Result<()>;
}

impl<W: Widget> DynWidget for W {
    fn name(&self) -> FieldName {
        Widget::name(self)
    }

    fn label(&self) -> &str {
        Widget::label(self)
    }

    fn kind(&self) -> WidgetKind {
        Widget::kind(self)
    }

    fn display_value(&self) -> String {
        Widget::display_value(self)
    }

    fn set_from_str(&mut self, raw: &str) -> Result<bool> {
        let value = self.parse(raw)?;
        self.set(value)
    }

    fn press(&mut self) -> Result<()> {
        Widget::press(self)
    }
}
