//! Default configuration values

/// Default configuration file name (TOML)
pub const DEFAULT_CONFIG_TOML: &str = "tagship.toml";

/// Default configuration file name (YAML)
pub const DEFAULT_CONFIG_YAML: &str = "tagship.yaml";

/// Get list of config file names to search for
pub fn config_file_names() -> Vec<&'static str> {
    vec![
        DEFAULT_CONFIG_TOML,
        DEFAULT_CONFIG_YAML,
        ".tagship.toml",
        ".tagship.yaml",
    ]
}

/// Environment variable overriding the configured version
pub const VERSION_ENV: &str = "TAGSHIP_PUBLISH_VERSION";
