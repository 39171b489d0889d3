//! Button widget
//!
//! A button's value is its click count, so every press is a distinct change.

use crate::error::{Result, WidgetError};
use crate::reactive::FieldName;
use crate::widget_identity;

use super::{Widget, WidgetKind};

/// Button visual style
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ButtonStyle {
    #[default]
    Default,
    Primary,
}

/// A clickable button
#[derive(Debug, Clone)]
pub struct Button {
    name: FieldName,
    label: String,
    clicks: u64,
    style: ButtonStyle,
}

impl Button {
    pub fn new(name: FieldName, label: impl Into<String>) -> Self {
        Self {
            name,
            label: label.into(),
            clicks: 0,
            style: ButtonStyle::Default,
        }
    }

    pub fn primary(name: FieldName, label: impl Into<String>) -> Self {
        Self {
            style: ButtonStyle::Primary,
            ..Self::new(name, label)
        }
    }

    pub fn clicks(&self) -> u64 {
        self.clicks
    }

    pub fn button_style(&self) -> ButtonStyle {
        self.style
    }

    pub fn click(&mut self) {
        self.clicks = self.clicks.wrapping_add(1);
    }
}

impl Widget for Button {
    type Value = u64;

    widget_identity!();

    fn kind(&self) -> WidgetKind {
        WidgetKind::Button
    }

    fn value(&self) -> &u64 {
        &self.clicks
    }

    fn store(&mut self, value: u64) {
        self.clicks = value;
    }

    fn parse(&self, raw: &str) -> Result<u64> {
        Err(WidgetError::invalid_value(
            self.name,
            raw,
            "buttons are clicked, not set",
        ))
    }

    fn display_value(&self) -> String {
        self.clicks.to_string()
    }

    fn press(&mut self) -> Result<()> {
        self.click();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widgets::DynWidget;

    #[test]
    fn test_press_counts_clicks() {
        let mut button = Button::primary("go", "Go");
        DynWidget::press(&mut button).unwrap();
        DynWidget::press(&mut button).unwrap();
        assert_eq!(button.clicks(), 2);
        assert_eq!(button.button_style(), ButtonStyle::Primary);
    }

    #[test]
    fn test_buttons_reject_text_input() {
        let mut button = Button::new("go", "Go");
        assert!(button.set_from_str("1").is_err());
        assert_eq!(button.clicks(), 0);
    }
}
