//! Configuration types for notifeed.
//!
//! This crate provides the configuration used by a feed generation run,
//! read from an optional `notifeed.yaml` in the project directory and
//! overridable through `NOTIFEED_*` environment variables.

pub mod env;
pub mod loader;
pub mod types;

pub use env::*;
pub use loader::*;
pub use types::*;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_has_sensible_values() {
        let config = FeedConfig::default();

        assert_eq!(config.input_dir, std::path::PathBuf::from("notifications"));
        assert_eq!(config.output_dir, std::path::PathBuf::from("out"));
        assert_eq!(config.output_file, "feed.yaml");
        assert_eq!(config.extensions, vec!["yml".to_string(), "yaml".to_string()]);
        assert_eq!(config.ordering, OrderingMode::Priority);
        assert_eq!(config.max_file_size, 1024 * 1024);
    }

    #[test]
    fn test_config_serializes_to_yaml() {
        let yaml = serde_yaml::to_string(&FeedConfig::default()).unwrap();

        assert!(yaml.contains("input_dir: notifications"));
        assert!(yaml.contains("output_dir: out"));
        assert!(yaml.contains("output_file: feed.yaml"));
        assert!(yaml.contains("ordering: priority"));
    }

    #[test]
    fn test_partial_configs_merge_with_defaults() {
        let config: FeedConfig = serde_yaml::from_str("ordering: discovery\n").unwrap();

        assert_eq!(config.ordering, OrderingMode::Discovery);
        assert_eq!(config.input_dir, std::path::PathBuf::from("notifications"));
        assert_eq!(config.extensions.len(), 2);
    }
}
