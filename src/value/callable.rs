//! Invocable capabilities carried inside module configuration.
//!
//! Modules hand the host functions (request-log configurers, SSR fetch
//! factories, state validators, web manifest factories). At the validation
//! boundary these are opaque: the engine only needs to know that a value is
//! invocable, how many arguments it declares, and occasionally to call it.

use std::fmt;
use std::sync::Arc;

use super::ConfigValue;

/// Signature shared by every callable stored in a [`ConfigValue`].
///
/// A callable receives its positional arguments and either produces a value
/// or rejects the call with a human-readable reason.
pub type CallableFn = dyn Fn(&[ConfigValue]) -> Result<ConfigValue, String> + Send + Sync;

/// A function-typed configuration value with a declared arity.
///
/// Cloning a `Callable` is cheap and keeps identity: two clones compare equal,
/// two separately constructed callables never do, even if they wrap the same
/// closure body.
///
/// # Examples
///
/// ```rust
/// use modcfg::value::{Callable, ConfigValue};
///
/// let always_ok = Callable::new(1, |_args| Ok(ConfigValue::Bool(true)));
/// assert_eq!(always_ok.arity(), 1);
/// assert_eq!(always_ok.call(&[ConfigValue::Null]), Ok(ConfigValue::Bool(true)));
/// ```
#[derive(Clone)]
pub struct Callable {
    name: Option<String>,
    arity: usize,
    func: Arc<CallableFn>,
}

impl Callable {
    /// Wrap a closure declaring `arity` positional parameters.
    pub fn new<F>(arity: usize, func: F) -> Self
    where
        F: Fn(&[ConfigValue]) -> Result<ConfigValue, String> + Send + Sync + 'static,
    {
        Self {
            name: None,
            arity,
            func: Arc::new(func),
        }
    }

    /// Attach a display name, used only for debugging output.
    #[must_use]
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Number of parameters the callable declares.
    pub const fn arity(&self) -> usize {
        self.arity
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Invoke the callable.
    ///
    /// # Errors
    ///
    /// Returns the callable's own rejection reason.
    pub fn call(&self, args: &[ConfigValue]) -> Result<ConfigValue, String> {
        (self.func)(args)
    }
}

impl PartialEq for Callable {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.func, &other.func)
    }
}

impl fmt::Debug for Callable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(name) => write!(f, "[Function: {name}]"),
            None => f.write_str("[Function]"),
        }
    }
}
