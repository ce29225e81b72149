//! Names and defaults shared by the host config loader and the CLI.

/// File name searched for when no host config path is given.
pub const HOST_CONFIG_FILE_NAME: &str = "modcfg.toml";

/// Environment variable naming an explicit host config file.
///
/// Checked after `--config` and before the directory search.
pub const HOST_CONFIG_ENV_VAR: &str = "MODCFG_CONFIG";

/// Version assumed for a module file that does not declare one.
pub const DEFAULT_MODULE_VERSION: &str = "0.0.0";
