//! Cross-cutting facts threaded through every validation call.

use indexmap::IndexMap;

use crate::value::{ConfigMap, ConfigValue};

/// An external dependency the root module makes available to child modules.
#[derive(Debug, Clone, PartialEq)]
pub struct ProvidedExternal {
    /// Exact semantic version of the provided module.
    pub version: String,
    /// Handle to the provided module itself.
    pub module: ConfigValue,
}

/// Externals provided by the root module, keyed by external name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProvidedExternals {
    entries: IndexMap<String, ProvidedExternal>,
}

impl ProvidedExternals {
    pub fn new() -> Self {
        Self::default()
    }

    /// Collect the `providedExternals` declared by a (validated) root config.
    ///
    /// Entries without a string `version` are skipped; the root validator
    /// already rejects those.
    pub fn from_root_config(root_config: &ConfigValue) -> Self {
        let mut externals = Self::new();
        let Some(declared) = root_config.get("providedExternals").and_then(ConfigValue::as_object)
        else {
            return externals;
        };
        for (name, entry) in declared {
            if let Some(version) = entry.get("version").and_then(ConfigValue::as_str) {
                let module = entry.get("module").cloned().unwrap_or(ConfigValue::Null);
                externals.insert(name.clone(), version, module);
            }
        }
        externals
    }

    pub fn insert(
        &mut self,
        name: impl Into<String>,
        version: impl Into<String>,
        module: ConfigValue,
    ) -> &mut Self {
        self.entries.insert(
            name.into(),
            ProvidedExternal {
                version: version.into(),
                module,
            },
        );
        self
    }

    pub fn get(&self, name: &str) -> Option<&ProvidedExternal> {
        self.entries.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ProvidedExternal)> {
        self.entries.iter().map(|(name, external)| (name.as_str(), external))
    }
}

/// Facts about the module being validated and the host it is loading into.
///
/// Built once per module-load event by the caller and only read by the
/// validators. A caller validating a root module and then its children can
/// derive each child's context with [`ValidationContext::for_module`].
///
/// # Examples
///
/// ```rust
/// use modcfg::validation::{ProvidedExternals, ValidationContext};
/// use modcfg::value::ConfigValue;
///
/// let mut externals = ProvidedExternals::new();
/// externals.insert("some-library", "9.8.7", ConfigValue::object::<&str, ConfigValue, _>([]));
///
/// let root = ValidationContext::new("some-root", "1.2.3", "5.0.0");
/// let child = root.for_module("child-module", "1.0.0").with_provided_externals(externals);
///
/// assert_eq!(child.module_label(), "child-module@1.0.0");
/// assert_eq!(child.app_version(), "5.0.0");
/// assert!(child.provided_externals().contains("some-library"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct ValidationContext {
    module_name: String,
    module_version: String,
    app_version: String,
    provided_externals: ProvidedExternals,
    server_state_config: ConfigMap,
    client_state_config: ConfigMap,
}

impl ValidationContext {
    pub fn new(
        module_name: impl Into<String>,
        module_version: impl Into<String>,
        app_version: impl Into<String>,
    ) -> Self {
        Self {
            module_name: module_name.into(),
            module_version: module_version.into(),
            app_version: app_version.into(),
            ..Self::default()
        }
    }

    /// Same host facts, different module identity.
    #[must_use]
    pub fn for_module(
        &self,
        module_name: impl Into<String>,
        module_version: impl Into<String>,
    ) -> Self {
        Self {
            module_name: module_name.into(),
            module_version: module_version.into(),
            ..self.clone()
        }
    }

    #[must_use]
    pub fn with_provided_externals(mut self, provided_externals: ProvidedExternals) -> Self {
        self.provided_externals = provided_externals;
        self
    }

    #[must_use]
    pub fn with_server_state_config(mut self, state_config: ConfigMap) -> Self {
        self.server_state_config = state_config;
        self
    }

    #[must_use]
    pub fn with_client_state_config(mut self, state_config: ConfigMap) -> Self {
        self.client_state_config = state_config;
        self
    }

    pub fn module_name(&self) -> &str {
        &self.module_name
    }

    pub fn module_version(&self) -> &str {
        &self.module_version
    }

    pub fn app_version(&self) -> &str {
        &self.app_version
    }

    pub const fn provided_externals(&self) -> &ProvidedExternals {
        &self.provided_externals
    }

    pub const fn server_state_config(&self) -> &ConfigMap {
        &self.server_state_config
    }

    pub const fn client_state_config(&self) -> &ConfigMap {
        &self.client_state_config
    }

    /// `name@version` of the module under validation.
    pub fn module_label(&self) -> String {
        format!("{}@{}", self.module_name, self.module_version)
    }
}
