//! Application behaviour tests.
//!
//! Sessions are driven through the same field/button interface a front end
//! uses, with a recording [`mock::MockServices`] in place of the real
//! geospatial services.

mod tracks_explorer_tests;

use std::cell::RefCell;
use std::rc::Rc;

use ecodash_ui::{Model, Session, STATUS_FIELD};

/// Record every status message set after this call.
fn record_statuses<M: Model>(session: &mut Session<M>) -> Rc<RefCell<Vec<String>>> {
    let log = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&log);
    session.declare("record_status", &[STATUS_FIELD], move |s: &mut Session<M>| {
        sink.borrow_mut().push(s.status().to_string());
        Ok(())
    });
    log
}

#[test]
fn test_registry_mounts_both_apps() {
    use crate::apps::{registry, SUBSETTER_URL, TRACKS_EXPLORER_URL};
    use crate::config::AppConfig;
    use crate::services::EcoServices;

    let services: Rc<dyn EcoServices> = mock::MockServices::new();
    let registry = registry(services, AppConfig::default());

    assert_eq!(registry.urls(), vec![SUBSETTER_URL, TRACKS_EXPLORER_URL]);
    let names: Vec<&str> = registry.entries().iter().map(|e| e.name()).collect();
    assert_eq!(names, vec!["Subsetter App", "Tracks Explorer App"]);

    let app = registry.get("/tracks_explorer_app/").unwrap().create();
    assert_eq!(app.title(), "Tracks Explorer");
    assert_eq!(app.status(), "Ready...");
}
