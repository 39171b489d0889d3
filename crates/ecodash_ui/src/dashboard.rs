//! Object-safe handle on a running session.

use std::rc::Rc;

use crate::error::Result;
use crate::reactive::{Model, Session};
use crate::snapshot::SessionSnapshot;
use crate::view::Renderable;

/// Type-erased interface a front end uses to drive any application.
pub trait Dashboard {
    fn title(&self) -> String;

    fn status(&self) -> String;

    /// Text currently displayed by the status alert.
    fn alert_text(&self) -> String;

    /// Field names of the user-facing widgets, in display order.
    fn field_names(&self) -> Vec<&'static str>;

    /// Apply raw user input to a widget. Returns whether the value changed.
    fn input(&mut self, field: &str, raw: &str) -> Result<bool>;

    /// Press a button.
    fn press(&mut self, field: &str) -> Result<()>;

    fn snapshot(&self) -> SessionSnapshot;

    /// Plots currently shown, in slot order.
    fn plots(&self) -> Vec<Rc<dyn Renderable>>;
}

impl<M: Model> Dashboard for Session<M> {
    fn title(&self) -> String {
        self.model().title().to_string()
    }

    fn status(&self) -> String {
        Session::status(self).to_string()
    }

    fn alert_text(&self) -> String {
        self.alert().object().to_string()
    }

    fn field_names(&self) -> Vec<&'static str> {
        self.model().widgets().iter().map(|w| w.name()).collect()
    }

    fn input(&mut self, field: &str, raw: &str) -> Result<bool> {
        Session::input(self, field, raw)
    }

    fn press(&mut self, field: &str) -> Result<()> {
        Session::press(self, field)
    }

    fn snapshot(&self) -> SessionSnapshot {
        Session::snapshot(self)
    }

    fn plots(&self) -> Vec<Rc<dyn Renderable>> {
        self.view()
            .slots()
            .filter_map(|(_, content)| content.as_plot().cloned())
            .collect()
    }
}
