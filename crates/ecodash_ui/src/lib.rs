//! ecodash_ui - reactive view-state engine for headless dashboards
//!
//! Widgets hold user-editable values, reactions declare which fields they
//! watch, and a [`Session`] owns the model, the view slots and the status
//! message. Changing a watched field synchronously runs every dependent
//! reaction in declaration order.

mod dashboard;
mod error;
mod macros;
mod reactive;
mod registry;
mod snapshot;
mod status;
mod view;
pub mod widgets;

pub use dashboard::Dashboard;
pub use error::{Result, WidgetError};
pub use reactive::{
    FieldName, HandlerResult, Model, Reaction, Session, DEFAULT_FAILURE_MESSAGE, INITIAL_STATUS,
    MAX_REACTION_DEPTH, STATUS_FIELD,
};
pub use registry::{display_name, AppEntry, AppRegistry};
pub use snapshot::{ContentSnapshot, SessionSnapshot, SlotSnapshot, WidgetSnapshot};
pub use status::Alert;
pub use view::{Content, Renderable, View, WidgetGroup};
pub use widgets::{DynWidget, Widget, WidgetKind};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::reactive::{FieldName, HandlerResult, Model, Session, STATUS_FIELD};
    pub use crate::view::{Content, Renderable, View, WidgetGroup};
    pub use crate::widgets::{
        Button, Checkbox, Choice, ChoiceKey, ChoiceStyle, DynWidget, FileSelector, NumberInput,
        NumberStyle, TextInput, Widget,
    };
    pub use crate::Dashboard;
}
