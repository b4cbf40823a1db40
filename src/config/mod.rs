pub mod hosts;
pub mod topology;

pub use hosts::{
    example_hosts, format_example_hosts, parse_hosts, strip_jsonc_comments, Host, HostsError,
    HostsFormat,
};
pub use topology::ClusterTopologyConfig;

use std::path::Path;
use thiserror::Error;

/// Errors for file I/O operations (separate from pure parsing errors)
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Hosts error: {0}")]
    HostsError(#[from] HostsError),
}

// ============================================================================
// SBIO: I/O wrapper - thin layer over pure functions
// ============================================================================

/// Load and parse a hosts file from disk.
/// The format follows the file extension: `.yaml`/`.yml` is YAML, anything
/// else is JSON with optional comments.
pub fn load_hosts_file(path: &Path) -> Result<Vec<Host>, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    let format = HostsFormat::from_extension(path.extension().and_then(|e| e.to_str()));
    let hosts = parse_hosts(&content, format)?;
    Ok(hosts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::{Builder, NamedTempFile};

    fn create_temp_file(suffix: &str, content: &str) -> NamedTempFile {
        let mut file = Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_json_hosts_file() {
        let content = r#"[
            {"hostname": "node-1", "ip": "10.0.0.1"},
            {"hostname": "node-2", "ip": "10.0.0.2"}
        ]"#;

        let file = create_temp_file(".json", content);
        let hosts = load_hosts_file(file.path()).unwrap();
        assert_eq!(hosts.len(), 2);
    }

    #[test]
    fn test_load_yaml_hosts_file() {
        let file = create_temp_file(".yaml", "- hostname: node-1\n  ip: 10.0.0.1\n");
        let hosts = load_hosts_file(file.path()).unwrap();
        assert_eq!(hosts, vec![Host::new("node-1", "10.0.0.1")]);
    }

    #[test]
    fn test_load_malformed_file() {
        let file = create_temp_file(".json", "{ not json");
        let result = load_hosts_file(file.path());
        assert!(matches!(
            result,
            Err(ConfigError::HostsError(HostsError::ParseError(_)))
        ));
    }

    #[test]
    fn test_load_nonexistent_file() {
        let result = load_hosts_file(Path::new("/nonexistent/hosts.json"));
        assert!(matches!(result, Err(ConfigError::IoError(_))));
    }
}
