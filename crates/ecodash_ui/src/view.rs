//! View composition: an ordered list of tagged display slots.
//!
//! Handlers never address slots by position. Each application defines a
//! slot tag type (usually a small `Copy` enum) and replaces slot content by
//! tag.

use std::fmt;
use std::rc::Rc;

use crate::reactive::FieldName;
use crate::snapshot::{ContentSnapshot, SlotSnapshot};

/// Something that can be drawn into a plot slot.
pub trait Renderable: fmt::Debug {
    /// Short human-readable description, used in snapshots and logs.
    fn summary(&self) -> String;

    /// Render as a standalone SVG document.
    fn to_svg(&self) -> String;
}

/// A titled group of widgets, referenced by field name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidgetGroup {
    id: &'static str,
    title: Option<String>,
    widgets: Vec<FieldName>,
}

impl WidgetGroup {
    pub fn new(id: &'static str, widgets: Vec<FieldName>) -> Self {
        Self {
            id,
            title: None,
            widgets,
        }
    }

    pub fn titled(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn id(&self) -> &'static str {
        self.id
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn widgets(&self) -> &[FieldName] {
        &self.widgets
    }

    /// Append a widget if it is not already in the group.
    pub fn push(&mut self, field: FieldName) {
        if !self.contains(field) {
            self.widgets.push(field);
        }
    }

    pub fn contains(&self, field: &str) -> bool {
        self.widgets.iter().any(|w| *w == field)
    }
}

/// Content occupying a single slot.
#[derive(Debug, Clone, Default)]
pub enum Content {
    #[default]
    Empty,
    Markdown(String),
    Widgets(WidgetGroup),
    Plot(Rc<dyn Renderable>),
}

impl Content {
    pub fn markdown(text: impl Into<String>) -> Self {
        Content::Markdown(text.into())
    }

    pub fn plot(renderable: impl Renderable + 'static) -> Self {
        Content::Plot(Rc::new(renderable))
    }

    pub fn as_markdown(&self) -> Option<&str> {
        match self {
            Content::Markdown(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_widgets(&self) -> Option<&WidgetGroup> {
        match self {
            Content::Widgets(group) => Some(group),
            _ => None,
        }
    }

    pub fn as_plot(&self) -> Option<&Rc<dyn Renderable>> {
        match self {
            Content::Plot(plot) => Some(plot),
            _ => None,
        }
    }

    pub(crate) fn snapshot(&self) -> ContentSnapshot {
        match self {
            Content::Empty => ContentSnapshot::Empty,
            Content::Markdown(text) => ContentSnapshot::Markdown { text: text.clone() },
            Content::Widgets(group) => ContentSnapshot::Widgets {
                group: group.id.to_string(),
                title: group.title.clone(),
                widgets: group.widgets.iter().map(|w| w.to_string()).collect(),
            },
            Content::Plot(plot) => ContentSnapshot::Plot {
                summary: plot.summary(),
            },
        }
    }
}

/// Plots compare by identity; everything else by value.
impl PartialEq for Content {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Content::Empty, Content::Empty) => true,
            (Content::Markdown(a), Content::Markdown(b)) => a == b,
            (Content::Widgets(a), Content::Widgets(b)) => a == b,
            (Content::Plot(a), Content::Plot(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

/// Ordered display slots plus the loading indicator.
#[derive(Debug, Clone)]
pub struct View<S> {
    slots: Vec<(S, Content)>,
    loading: usize,
}

impl<S> Default for View<S> {
    fn default() -> Self {
        Self {
            slots: Vec::new(),
            loading: 0,
        }
    }
}

impl<S: Copy + Eq + fmt::Debug> View<S> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a slot. Declaring the same tag twice replaces the earlier content.
    pub fn with_slot(mut self, slot: S, content: Content) -> Self {
        self.replace(slot, content);
        self
    }

    pub fn get(&self, slot: S) -> Option<&Content> {
        self.slots
            .iter()
            .find(|(tag, _)| *tag == slot)
            .map(|(_, content)| content)
    }

    /// Replace the content of `slot`, appending the slot if it does not exist.
    pub fn replace(&mut self, slot: S, content: Content) {
        log::trace!("Replacing view slot {:?}", slot);
        match self.slots.iter_mut().find(|(tag, _)| *tag == slot) {
            Some((_, existing)) => *existing = content,
            None => self.slots.push((slot, content)),
        }
    }

    /// Slots in display order.
    pub fn slots(&self) -> impl Iterator<Item = (S, &Content)> + '_ {
        self.slots.iter().map(|(tag, content)| (*tag, content))
    }

    pub fn is_loading(&self) -> bool {
        self.loading > 0
    }

    pub(crate) fn start_loading(&mut self) {
        self.loading += 1;
    }

    pub(crate) fn stop_loading(&mut self) {
        self.loading = self.loading.saturating_sub(1);
    }

    pub(crate) fn snapshot(&self) -> Vec<SlotSnapshot> {
        self.slots
            .iter()
            .map(|(tag, content)| SlotSnapshot {
                slot: format!("{tag:?}"),
                content: content.snapshot(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Dot;

    impl Renderable for Dot {
        fn summary(&self) -> String {
            "dot".to_string()
        }

        fn to_svg(&self) -> String {
            "<svg/>".to_string()
        }
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Slot {
        Header,
        Body,
    }

    #[test]
    fn test_replace_keeps_slot_order() {
        let mut view = View::new()
            .with_slot(Slot::Header, Content::markdown("# Title"))
            .with_slot(Slot::Body, Content::Empty);

        view.replace(Slot::Header, Content::markdown("# Other"));

        let tags: Vec<Slot> = view.slots().map(|(tag, _)| tag).collect();
        assert_eq!(tags, vec![Slot::Header, Slot::Body]);
        assert_eq!(
            view.get(Slot::Header).and_then(Content::as_markdown),
            Some("# Other")
        );
    }

    #[test]
    fn test_plot_content_compares_by_identity() {
        let plot = Content::plot(Dot);
        assert_eq!(plot, plot.clone());
        assert_ne!(plot, Content::plot(Dot));
    }

    #[test]
    fn test_loading_is_counted() {
        let mut view: View<Slot> = View::new();
        view.start_loading();
        view.start_loading();
        view.stop_loading();
        assert!(view.is_loading());
        view.stop_loading();
        view.stop_loading();
        assert!(!view.is_loading());
    }

    #[test]
    fn test_widget_group_push_is_idempotent() {
        let mut group = WidgetGroup::new("options", vec!["a"]);
        group.push("b");
        group.push("a");
        assert_eq!(group.widgets(), &["a", "b"]);
    }
}
