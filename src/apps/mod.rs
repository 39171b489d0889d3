//! The dashboard applications and the registry that mounts them.

pub mod subsetter;
pub mod tracks_explorer;

#[cfg(test)]
mod tests;

use std::rc::Rc;

use ecodash_ui::{AppRegistry, Dashboard};

use crate::config::AppConfig;
use crate::services::EcoServices;

pub use subsetter::{Subsetter, SubsetterSlot, SubsetOption};
pub use tracks_explorer::{TracksExplorer, TracksSlot};

/// URL stem of the Subsetter.
pub const SUBSETTER_URL: &str = "subsetter_app";

/// URL stem of the Tracks Explorer.
pub const TRACKS_EXPLORER_URL: &str = "tracks_explorer_app";

/// Registry of every application. Each `create` builds a fresh session.
pub fn registry(services: Rc<dyn EcoServices>, config: AppConfig) -> AppRegistry<Box<dyn Dashboard>> {
    let config = Rc::new(config);
    let mut registry: AppRegistry<Box<dyn Dashboard>> = AppRegistry::new();

    let (svc, cfg) = (Rc::clone(&services), Rc::clone(&config));
    registry.register(SUBSETTER_URL, move || {
        Box::new(subsetter::session(Rc::clone(&svc), &cfg)) as Box<dyn Dashboard>
    });

    let (svc, cfg) = (services, config);
    registry.register(TRACKS_EXPLORER_URL, move || {
        Box::new(tracks_explorer::session(Rc::clone(&svc), &cfg)) as Box<dyn Dashboard>
    });

    registry
}
