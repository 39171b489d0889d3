//! Application registry keyed by URL stem.

use std::fmt;

/// Display name for an app mounted at `url`.
///
/// Takes the first path segment, turns `-` and `_` into spaces and title
/// cases each word: `tracks_explorer_app` becomes `Tracks Explorer App`.
pub fn display_name(url: &str) -> String {
    let stem = url.trim_matches('/').split('/').next().unwrap_or_default();

    let mut name = String::with_capacity(stem.len());
    let mut in_word = false;
    for ch in stem.chars() {
        let ch = if ch == '-' || ch == '_' { ' ' } else { ch };
        if ch.is_alphabetic() {
            if in_word {
                name.extend(ch.to_lowercase());
            } else {
                name.extend(ch.to_uppercase());
            }
            in_word = true;
        } else {
            name.push(ch);
            in_word = false;
        }
    }
    name
}

/// One registered application.
pub struct AppEntry<T> {
    url: String,
    name: String,
    factory: Box<dyn Fn() -> T>,
}

impl<T> AppEntry<T> {
    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Build a fresh instance.
    pub fn create(&self) -> T {
        (self.factory)()
    }
}

impl<T> fmt::Debug for AppEntry<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppEntry")
            .field("url", &self.url)
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// Registry of application factories, in registration order.
pub struct AppRegistry<T> {
    entries: Vec<AppEntry<T>>,
}

impl<T> Default for AppRegistry<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<T> AppRegistry<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `factory` under `url`, naming it by the slug rule.
    pub fn register<F>(&mut self, url: &str, factory: F)
    where
        F: Fn() -> T + 'static,
    {
        let name = display_name(url);
        self.register_named(url, name, factory);
    }

    /// Register `factory` under `url` with an explicit display name.
    ///
    /// A later registration under the same URL replaces the earlier one.
    pub fn register_named<F>(&mut self, url: &str, name: impl Into<String>, factory: F)
    where
        F: Fn() -> T + 'static,
    {
        let url = url.trim_matches('/').to_string();
        let entry = AppEntry {
            url: url.clone(),
            name: name.into(),
            factory: Box::new(factory),
        };
        log::debug!("Registering app '{}' at /{}", entry.name, url);

        match self.entries.iter_mut().find(|e| e.url == url) {
            Some(existing) => {
                log::warn!("Replacing app registered at /{}", url);
                *existing = entry;
            }
            None => self.entries.push(entry),
        }
    }

    pub fn get(&self, url: &str) -> Option<&AppEntry<T>> {
        let url = url.trim_matches('/');
        self.entries.iter().find(|e| e.url == url)
    }

    pub fn entries(&self) -> &[AppEntry<T>] {
        &self.entries
    }

    pub fn urls(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.url.as_str()).collect()
    }
}

impl<T> fmt::Debug for AppRegistry<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(&self.entries).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name_slug_rule() {
        assert_eq!(display_name("tracks_explorer_app"), "Tracks Explorer App");
        assert_eq!(display_name("subsetter_app"), "Subsetter App");
        assert_eq!(display_name("/my-tool/extra"), "My Tool");
        assert_eq!(display_name("eBIRD_data"), "Ebird Data");
        assert_eq!(display_name("app2go"), "App2Go");
    }

    #[test]
    fn test_registry_lookup_and_replace() {
        let mut registry: AppRegistry<u32> = AppRegistry::new();
        registry.register("subsetter_app", || 1);
        registry.register("/tracks_explorer_app/", || 2);
        registry.register_named("subsetter_app", "Subsetter", || 3);

        assert_eq!(registry.urls(), vec!["subsetter_app", "tracks_explorer_app"]);
        let entry = registry.get("/subsetter_app").unwrap();
        assert_eq!(entry.name(), "Subsetter");
        assert_eq!(entry.create(), 3);
        assert_eq!(registry.get("tracks_explorer_app").unwrap().name(), "Tracks Explorer App");
        assert!(registry.get("missing").is_none());
    }
}
