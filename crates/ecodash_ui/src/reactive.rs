//! Reaction graph and session state.
//!
//! A [`Session`] owns one application instance: its model (widgets and
//! derived fields), its [`View`] slots, the status message and the alert
//! that mirrors it. Reactions are declared against field names and run
//! synchronously when one of those fields is notified:
//!
//! - reactions run in declaration order, once per notification
//! - a reaction that changes another watched field runs that field's
//!   reactions to completion before it continues (depth-first)
//! - a reaction that fails is logged and turned into a status message; the
//!   error never escapes [`Session::notify`] and nothing is rolled back
//!
//! # Example
//!
//! ```
//! use ecodash_ui::prelude::*;
//!
//! struct Counter {
//!     step: NumberInput,
//! }
//!
//! impl Model for Counter {
//!     type Slot = u8;
//!
//!     fn title(&self) -> &str {
//!         "Counter"
//!     }
//!
//!     fn widgets(&self) -> Vec<&dyn DynWidget> {
//!         vec![&self.step]
//!     }
//!
//!     fn widget_mut(&mut self, name: &str) -> Option<&mut dyn DynWidget> {
//!         (name == "step").then_some(&mut self.step as &mut dyn DynWidget)
//!     }
//! }
//!
//! let model = Counter { step: NumberInput::new("step", "Step", 0.0, 10.0) };
//! let mut session = Session::new(model, View::new());
//! session.declare("report", &["step"], |s: &mut Session<Counter>| {
//!     let step = s.model().step.get();
//!     s.set_status(format!("step is {step}"));
//!     Ok(())
//! });
//!
//! session.input("step", "2").unwrap();
//! assert_eq!(session.alert().object(), "step is 2");
//! ```

use std::error::Error;
use std::fmt;
use std::rc::Rc;

use web_time::Instant;

use crate::error::{Result, WidgetError};
use crate::snapshot::{SessionSnapshot, WidgetSnapshot};
use crate::status::{mirror_status, Alert};
use crate::view::View;
use crate::widgets::{Button, DynWidget, Widget};

/// Name of a watchable field.
pub type FieldName = &'static str;

/// Result type returned by reaction handlers.
pub type HandlerResult = std::result::Result<(), Box<dyn Error>>;

/// Field name of the session's status message.
pub const STATUS_FIELD: FieldName = "status_text";

/// Status shown when a reaction fails and declared no message of its own.
pub const DEFAULT_FAILURE_MESSAGE: &str = "Error... Check options and try again";

/// Status of a freshly constructed session.
pub const INITIAL_STATUS: &str = "Ready...";

/// Maximum nesting of reentrant notifications.
pub const MAX_REACTION_DEPTH: usize = 64;

/// Application state driven by a [`Session`].
pub trait Model: 'static {
    /// Tag type naming the view's display regions.
    type Slot: Copy + Eq + fmt::Debug + 'static;

    fn title(&self) -> &str;

    /// All user-facing widgets, in display order.
    fn widgets(&self) -> Vec<&dyn DynWidget>;

    /// Look up a widget by field name.
    fn widget_mut(&mut self, name: &str) -> Option<&mut dyn DynWidget>;
}

type Handler<M> = dyn Fn(&mut Session<M>) -> HandlerResult;

/// A handler bound to a set of field names.
pub struct Reaction<M: Model> {
    name: &'static str,
    dependencies: Vec<FieldName>,
    failure_message: String,
    handler: Box<Handler<M>>,
}

impl<M: Model> Reaction<M> {
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn dependencies(&self) -> &[FieldName] {
        &self.dependencies
    }

    pub fn failure_message(&self) -> &str {
        &self.failure_message
    }

    pub fn depends_on(&self, field: &str) -> bool {
        self.dependencies.iter().any(|dep| *dep == field)
    }
}

impl<M: Model> fmt::Debug for Reaction<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Reaction")
            .field("name", &self.name)
            .field("dependencies", &self.dependencies)
            .field("failure_message", &self.failure_message)
            .finish_non_exhaustive()
    }
}

/// One running application instance.
pub struct Session<M: Model> {
    model: M,
    view: View<M::Slot>,
    status: String,
    alert: Alert,
    reactions: Vec<Rc<Reaction<M>>>,
    depth: usize,
}

impl<M: Model> Session<M> {
    /// Create a session and register the status mirror.
    pub fn new(model: M, view: View<M::Slot>) -> Self {
        let mut session = Self {
            model,
            view,
            status: INITIAL_STATUS.to_string(),
            alert: Alert::new(INITIAL_STATUS),
            reactions: Vec::new(),
            depth: 0,
        };
        session.declare("update_status_text", &[STATUS_FIELD], mirror_status::<M>);
        session
    }

    /// Register a reaction using the default failure message.
    pub fn declare<F>(&mut self, name: &'static str, dependencies: &[FieldName], handler: F)
    where
        F: Fn(&mut Session<M>) -> HandlerResult + 'static,
    {
        self.declare_with_message(name, dependencies, DEFAULT_FAILURE_MESSAGE, handler);
    }

    /// Register a reaction that reports `failure_message` when it fails.
    pub fn declare_with_message<F>(
        &mut self,
        name: &'static str,
        dependencies: &[FieldName],
        failure_message: impl Into<String>,
        handler: F,
    ) where
        F: Fn(&mut Session<M>) -> HandlerResult + 'static,
    {
        log::debug!("Declaring reaction '{}' on {:?}", name, dependencies);
        self.reactions.push(Rc::new(Reaction {
            name,
            dependencies: dependencies.to_vec(),
            failure_message: failure_message.into(),
            handler: Box::new(handler),
        }));
    }

    /// Run every reaction watching `field`, in declaration order.
    pub fn notify(&mut self, field: &str) {
        if self.depth >= MAX_REACTION_DEPTH {
            log::error!(
                "Dropping notification for '{}': reactions nested {} deep",
                field,
                self.depth
            );
            return;
        }

        let pending: Vec<Rc<Reaction<M>>> = self
            .reactions
            .iter()
            .filter(|reaction| reaction.depends_on(field))
            .cloned()
            .collect();

        if pending.is_empty() {
            log::trace!("No reactions watch '{}'", field);
            return;
        }

        self.depth += 1;
        for reaction in pending {
            self.dispatch(&reaction, field);
        }
        self.depth -= 1;
    }

    fn dispatch(&mut self, reaction: &Reaction<M>, trigger: &str) {
        let started = Instant::now();
        log::debug!("Reaction '{}' triggered by '{}'", reaction.name, trigger);

        if let Err(err) = (reaction.handler)(self) {
            log::warn!(
                "{} (reaction '{}'): {}",
                reaction.failure_message,
                reaction.name,
                error_chain(err.as_ref())
            );
            self.set_status(reaction.failure_message.clone());
        }

        log::debug!(
            "Reaction '{}' finished in {:?}",
            reaction.name,
            started.elapsed()
        );
    }

    /// Names of the declared reactions, in declaration order.
    pub fn reaction_names(&self) -> Vec<&'static str> {
        self.reactions.iter().map(|r| r.name).collect()
    }

    pub fn model(&self) -> &M {
        &self.model
    }

    /// Mutable access to the model without notifying anyone.
    pub fn model_mut(&mut self) -> &mut M {
        &mut self.model
    }

    pub fn view(&self) -> &View<M::Slot> {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut View<M::Slot> {
        &mut self.view
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn alert(&self) -> &Alert {
        &self.alert
    }

    pub(crate) fn alert_mut(&mut self) -> &mut Alert {
        &mut self.alert
    }

    /// Replace the status message, notifying watchers if it changed.
    pub fn set_status(&mut self, text: impl Into<String>) {
        let text = text.into();
        if text.is_empty() {
            log::warn!("Ignoring empty status message");
            return;
        }
        if text == self.status {
            return;
        }
        log::info!("{}", text);
        self.status = text;
        self.notify(STATUS_FIELD);
    }

    /// Set a typed widget's value and notify its watchers if it changed.
    pub fn set_widget<W, F>(&mut self, select: F, value: W::Value) -> Result<bool>
    where
        W: Widget,
        F: FnOnce(&mut M) -> &mut W,
    {
        let widget = select(&mut self.model);
        let name = Widget::name(&*widget);
        let changed = widget.set(value)?;
        if changed {
            self.notify(name);
        }
        Ok(changed)
    }

    /// Click a button and notify its watchers.
    pub fn click<F>(&mut self, select: F)
    where
        F: FnOnce(&mut M) -> &mut Button,
    {
        let button = select(&mut self.model);
        button.click();
        let name = Widget::name(&*button);
        self.notify(name);
    }

    /// Apply raw user input to the widget named `field`.
    pub fn input(&mut self, field: &str, raw: &str) -> Result<bool> {
        let widget = self
            .model
            .widget_mut(field)
            .ok_or_else(|| WidgetError::UnknownField(field.to_string()))?;
        let name = widget.name();
        let changed = widget.set_from_str(raw)?;
        if changed {
            self.notify(name);
        }
        Ok(changed)
    }

    /// Press the button named `field`.
    pub fn press(&mut self, field: &str) -> Result<()> {
        let widget = self
            .model
            .widget_mut(field)
            .ok_or_else(|| WidgetError::UnknownField(field.to_string()))?;
        let name = widget.name();
        widget.press()?;
        self.notify(name);
        Ok(())
    }

    /// Mutate a derived field and notify its watchers unconditionally.
    pub fn update<R, F>(&mut self, field: FieldName, f: F) -> R
    where
        F: FnOnce(&mut M) -> R,
    {
        let result = f(&mut self.model);
        self.notify(field);
        result
    }

    /// Run `f` with the view's loading indicator shown.
    ///
    /// The indicator is released when `f` returns, whatever it returns.
    pub fn with_loading<R, F>(&mut self, f: F) -> R
    where
        F: FnOnce(&mut Self) -> R,
    {
        self.view.start_loading();
        let result = f(self);
        self.view.stop_loading();
        result
    }

    /// Serializable picture of the current state.
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            title: self.model.title().to_string(),
            status: self.status.clone(),
            alert: self.alert.object().to_string(),
            loading: self.view.is_loading(),
            slots: self.view.snapshot(),
            widgets: self
                .model
                .widgets()
                .into_iter()
                .map(WidgetSnapshot::from_widget)
                .collect(),
        }
    }
}

impl<M: Model + fmt::Debug> fmt::Debug for Session<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("model", &self.model)
            .field("status", &self.status)
            .field("reactions", &self.reaction_names())
            .finish_non_exhaustive()
    }
}

/// Render an error followed by its sources.
fn error_chain(err: &dyn Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(&format!("\n  caused by: {cause}"));
        source = cause.source();
    }
    message
}
