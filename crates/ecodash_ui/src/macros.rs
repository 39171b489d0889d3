//! Macros for reducing boilerplate in widget definitions.

/// Generates a builder-style setter method.
///
/// # Usage
///
/// ```ignore
/// builder_field!(step, f64);
/// // Generates: pub fn step(mut self, value: f64) -> Self { self.step = value; self }
/// ```
#[macro_export]
macro_rules! builder_field {
    // Method name matches field name
    ($name:ident, $type:ty) => {
        pub fn $name(mut self, value: $type) -> Self {
            self.$name = value;
            self
        }
    };
    // Method name differs from field name
    ($method:ident, $field:ident, $type:ty) => {
        pub fn $method(mut self, value: $type) -> Self {
            self.$field = value;
            self
        }
    };
}

/// Generates the name/label accessors every widget exposes through
/// [`crate::Widget`].
#[macro_export]
macro_rules! widget_identity {
    () => {
        fn name(&self) -> $crate::FieldName {
            self.name
        }

        fn label(&self) -> &str {
            &self.label
        }
    };
}
