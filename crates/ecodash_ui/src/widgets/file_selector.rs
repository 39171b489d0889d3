//! File path picker.
//!
//! Only the selected path and the expanded/collapsed state of the browser
//! are modelled; browsing itself happens outside the session.

use crate::error::Result;
use crate::reactive::FieldName;
use crate::widget_identity;

use super::{Widget, WidgetKind};

#[derive(Debug, Clone)]
pub struct FileSelector {
    name: FieldName,
    label: String,
    path: String,
    expanded: bool,
}

impl FileSelector {
    pub fn new(name: FieldName, label: impl Into<String>) -> Self {
        Self {
            name,
            label: label.into(),
            path: String::new(),
            expanded: true,
        }
    }

    pub fn expanded(mut self, expanded: bool) -> Self {
        self.expanded = expanded;
        self
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// Whether a path has been chosen.
    pub fn has_selection(&self) -> bool {
        !self.path.trim().is_empty()
    }

    pub fn is_expanded(&self) -> bool {
        self.expanded
    }

    /// Expand or collapse the browser. Not a watched change.
    pub fn set_expanded(&mut self, expanded: bool) {
        self.expanded = expanded;
    }
}

impl Widget for FileSelector {
    type Value = String;

    widget_identity!();

    fn kind(&self) -> WidgetKind {
        WidgetKind::FileSelector
    }

    fn value(&self) -> &String {
        &self.path
    }

    fn store(&mut self, value: String) {
        self.path = value;
    }

    fn parse(&self, raw: &str) -> Result<String> {
        Ok(raw.trim().to_string())
    }

    fn display_value(&self) -> String {
        self.path.clone()
    }
}
