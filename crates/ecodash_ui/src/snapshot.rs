//! Serializable pictures of a session, for headless front ends and tests.

use serde::Serialize;

use crate::widgets::{DynWidget, WidgetKind};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionSnapshot {
    pub title: String,
    pub status: String,
    pub alert: String,
    pub loading: bool,
    pub slots: Vec<SlotSnapshot>,
    pub widgets: Vec<WidgetSnapshot>,
}

impl SessionSnapshot {
    pub fn slot(&self, name: &str) -> Option<&ContentSnapshot> {
        self.slots
            .iter()
            .find(|s| s.slot == name)
            .map(|s| &s.content)
    }

    pub fn widget(&self, name: &str) -> Option<&WidgetSnapshot> {
        self.widgets.iter().find(|w| w.name == name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SlotSnapshot {
    pub slot: String,
    pub content: ContentSnapshot,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ContentSnapshot {
    Empty,
    Markdown {
        text: String,
    },
    Widgets {
        group: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        title: Option<String>,
        widgets: Vec<String>,
    },
    Plot {
        summary: String,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WidgetSnapshot {
    pub name: String,
    pub label: String,
    pub kind: WidgetKind,
    pub value: String,
}

impl WidgetSnapshot {
    pub fn from_widget(widget: &dyn DynWidget) -> Self {
        Self {
            name: widget.name().to_string(),
            label: widget.label().to_string(),
            kind: widget.kind(),
            value: widget.display_value(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widgets::Checkbox;

    #[test]
    fn test_content_is_tagged_by_kind() {
        let json = serde_json::to_value(ContentSnapshot::Markdown {
            text: "## Create a subset!".to_string(),
        })
        .unwrap();
        assert_eq!(json["kind"], "markdown");
        assert_eq!(json["text"], "## Create a subset!");
    }

    #[test]
    fn test_widget_snapshot_uses_display_value() {
        let checkbox = Checkbox::new("clip", "Clip", true);
        let snapshot = WidgetSnapshot::from_widget(&checkbox);
        assert_eq!(snapshot.value, "true");
        assert_eq!(snapshot.kind, WidgetKind::Checkbox);
    }
}
