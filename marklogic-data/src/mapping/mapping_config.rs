/// Settings that apply to every entity resolved by a
/// [MappingContext](crate::mapping::MappingContext).
///
/// # Examples
///
/// ```rust,ignore
/// let context = MappingContext::builder()
///     .default_namespace("/app")
///     .strict(true)
///     .register::<Person>()
///     .build()?;
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MappingConfig {
    strict: bool,
    default_namespace: Option<String>,
}

impl MappingConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// When strict, only registered types can be looked up; otherwise a type's
    /// metadata is built on first use.
    pub fn is_strict(&self) -> bool {
        self.strict
    }

    pub fn set_strict(&mut self, strict: bool) {
        self.strict = strict;
    }

    /// Namespace of entities that do not declare one.
    pub fn default_namespace(&self) -> Option<&str> {
        self.default_namespace.as_deref()
    }

    pub fn set_default_namespace(&mut self, namespace: Option<&str>) {
        self.default_namespace = namespace.map(str::to_string);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = MappingConfig::new();
        assert!(!config.is_strict());
        assert!(config.default_namespace().is_none());
    }

    #[test]
    fn test_setters() {
        let mut config = MappingConfig::new();
        config.set_strict(true);
        config.set_default_namespace(Some("/app"));
        assert!(config.is_strict());
        assert_eq!(config.default_namespace(), Some("/app"));

        config.set_default_namespace(None);
        assert!(config.default_namespace().is_none());
    }
}
