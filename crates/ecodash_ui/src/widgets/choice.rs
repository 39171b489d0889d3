//! Single selection from a fixed list of labelled options.
//!
//! Covers radio button groups, radio box groups and select dropdowns; they
//! differ only in presentation.

use std::fmt;

use crate::error::{Result, WidgetError};
use crate::reactive::FieldName;
use crate::widget_identity;

use super::{Widget, WidgetKind};

/// An option key that can be matched against user input.
pub trait ChoiceKey: Copy + PartialEq + fmt::Debug + 'static {
    /// Stable string form of the key.
    fn key(&self) -> &'static str;
}

impl ChoiceKey for &'static str {
    fn key(&self) -> &'static str {
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChoiceStyle {
    #[default]
    RadioButtons,
    RadioBoxes,
    Select,
}

/// A widget whose value is one of a set of `(label, key)` options.
#[derive(Debug, Clone)]
pub struct Choice<K: ChoiceKey> {
    name: FieldName,
    label: String,
    options: Vec<(&'static str, K)>,
    value: K,
    style: ChoiceStyle,
}

impl<K: ChoiceKey> Choice<K> {
    /// Create a choice defaulting to the first option.
    ///
    /// # Panics
    ///
    /// Panics if `options` is empty.
    pub fn new(name: FieldName, label: impl Into<String>, options: Vec<(&'static str, K)>) -> Self {
        let value = options
            .first()
            .map(|(_, key)| *key)
            .expect("a choice needs at least one option");
        Self {
            name,
            label: label.into(),
            options,
            value,
            style: ChoiceStyle::default(),
        }
    }

    pub fn style(mut self, style: ChoiceStyle) -> Self {
        self.style = style;
        self
    }

    /// Set the initial value. Ignored if `value` is not one of the options.
    pub fn with_value(mut self, value: K) -> Self {
        if self.contains(&value) {
            self.value = value;
        } else {
            log::warn!(
                "Ignoring initial value {:?} for '{}': not an option",
                value,
                self.name
            );
        }
        self
    }

    pub fn selected(&self) -> K {
        self.value
    }

    /// Label of the selected option.
    pub fn selected_label(&self) -> &'static str {
        self.options
            .iter()
            .find(|(_, key)| *key == self.value)
            .map(|(label, _)| *label)
            .unwrap_or("---")
    }

    pub fn options(&self) -> &[(&'static str, K)] {
        &self.options
    }

    fn contains(&self, value: &K) -> bool {
        self.options.iter().any(|(_, key)| key == value)
    }

    fn expected(&self) -> String {
        self.options
            .iter()
            .map(|(_, key)| key.key())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl<K: ChoiceKey> Widget for Choice<K> {
    type Value = K;

    widget_identity!();

    fn kind(&self) -> WidgetKind {
        match self.style {
            ChoiceStyle::RadioButtons => WidgetKind::RadioButtons,
            ChoiceStyle::RadioBoxes => WidgetKind::RadioBoxes,
            ChoiceStyle::Select => WidgetKind::Select,
        }
    }

    fn value(&self) -> &K {
        &self.value
    }

    fn validate(&self, value: &K) -> Result<()> {
        if self.contains(value) {
            Ok(())
        } else {
            Err(WidgetError::UnknownOption {
                field: self.name.to_string(),
                option: value.key().to_string(),
                expected: self.expected(),
            })
        }
    }

    fn store(&mut self, value: K) {
        self.value = value;
    }

    /// Accepts either an option key or its label.
    fn parse(&self, raw: &str) -> Result<K> {
        let raw = raw.trim();
        self.options
            .iter()
            .find(|(label, key)| key.key() == raw || *label == raw)
            .map(|(_, key)| *key)
            .ok_or_else(|| WidgetError::UnknownOption {
                field: self.name.to_string(),
                option: raw.to_string(),
                expected: self.expected(),
            })
    }

    fn display_value(&self) -> String {
        self.value.key().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widgets::DynWidget;

    fn tiles() -> Choice<&'static str> {
        Choice::new(
            "map_tile",
            "Map tile",
            vec![("OSM", "OSM"), ("Carto Dark", "CartoDark")],
        )
        .style(ChoiceStyle::Select)
    }

    #[test]
    fn test_defaults_to_first_option() {
        let choice = tiles();
        assert_eq!(choice.selected(), "OSM");
        assert_eq!(Widget::kind(&choice), WidgetKind::Select);
    }

    #[test]
    fn test_parse_by_key_or_label() {
        let mut choice = tiles();
        assert!(choice.set_from_str("Carto Dark").unwrap());
        assert_eq!(choice.selected(), "CartoDark");
        assert!(choice.set_from_str("OSM").unwrap());
        assert_eq!(choice.selected_label(), "OSM");
    }

    #[test]
    fn test_unknown_option_is_rejected() {
        let mut choice = tiles();
        let err = choice.set_from_str("Nope").unwrap_err();
        assert!(matches!(err, WidgetError::UnknownOption { .. }));
        assert_eq!(choice.selected(), "OSM");
    }

    #[test]
    fn test_with_value_ignores_unknown() {
        let choice = tiles().with_value("Stamen");
        assert_eq!(choice.selected(), "OSM");
    }
}
