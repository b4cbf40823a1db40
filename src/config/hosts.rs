use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur while parsing a hosts file
#[derive(Error, Debug, PartialEq)]
pub enum HostsError {
    #[error("JSON parse error: {0}")]
    ParseError(String),

    #[error("YAML parse error: {0}")]
    YamlError(String),

    /// Only reachable if serde_json fails to encode plain string fields;
    /// kept so `--init` reports instead of panicking.
    #[error("Could not encode JSON: {0}")]
    EncodeError(String),
}

/// A single machine from the hosts file.
///
/// Hosts are identified by their position in the file, so there is no
/// dedup and the address is passed through to the plan as written.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Host {
    pub hostname: String,

    /// IP address or DNS name used to reach the host over SSH
    #[serde(rename = "ip", alias = "address")]
    pub address: String,
}

impl Host {
    pub fn new(hostname: impl Into<String>, address: impl Into<String>) -> Self {
        Self {
            hostname: hostname.into(),
            address: address.into(),
        }
    }
}

/// Input format of a hosts file, picked from its extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostsFormat {
    Json,
    Yaml,
}

impl HostsFormat {
    /// YAML for `.yaml`/`.yml`, JSON (with comments allowed) otherwise.
    pub fn from_extension(ext: Option<&str>) -> Self {
        match ext {
            Some("yaml") | Some("yml") => Self::Yaml,
            _ => Self::Json,
        }
    }
}

// ============================================================================
// SBIO: Pure parsing functions (no I/O)
// ============================================================================

/// Where the comment stripper is inside the input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Scan {
    Code,
    /// A `/` outside a string that may open a comment
    Slash,
    Str,
    /// Character after a backslash inside a string
    Escape,
    LineComment,
    BlockComment,
    /// A `*` inside a block comment that may close it
    BlockStar,
}

/// Emit `c` seen in plain JSON and return the next state.
fn scan_code(out: &mut String, c: char) -> Scan {
    match c {
        '/' => Scan::Slash,
        '"' => {
            out.push(c);
            Scan::Str
        }
        _ => {
            out.push(c);
            Scan::Code
        }
    }
}

/// Strip `//` and `/* */` comments so hand-annotated hosts files parse as JSON.
/// Line comments keep their newline; string contents are untouched.
/// This is a pure function - no I/O.
pub fn strip_jsonc_comments(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut state = Scan::Code;

    for c in input.chars() {
        state = match (state, c) {
            (Scan::Code, _) => scan_code(&mut out, c),
            (Scan::Slash, '/') => Scan::LineComment,
            (Scan::Slash, '*') => Scan::BlockComment,
            (Scan::Slash, _) => {
                out.push('/');
                scan_code(&mut out, c)
            }
            (Scan::Str, '\\') => {
                out.push(c);
                Scan::Escape
            }
            (Scan::Str, '"') => {
                out.push(c);
                Scan::Code
            }
            (Scan::Str, _) | (Scan::Escape, _) => {
                out.push(c);
                Scan::Str
            }
            (Scan::LineComment, '\n') => {
                out.push('\n');
                Scan::Code
            }
            (Scan::LineComment, _) => Scan::LineComment,
            (Scan::BlockComment | Scan::BlockStar, '*') => Scan::BlockStar,
            (Scan::BlockStar, '/') => Scan::Code,
            (Scan::BlockComment | Scan::BlockStar, _) => Scan::BlockComment,
        };
    }

    // A trailing lone slash is not a comment
    if state == Scan::Slash {
        out.push('/');
    }
    out
}

/// Parse a hosts list in the given format.
/// This is a pure function - no I/O.
pub fn parse_hosts(content: &str, format: HostsFormat) -> Result<Vec<Host>, HostsError> {
    match format {
        HostsFormat::Json => {
            let stripped = strip_jsonc_comments(content);
            serde_json::from_str(&stripped).map_err(|e| HostsError::ParseError(e.to_string()))
        }
        HostsFormat::Yaml => {
            serde_yaml::from_str(content).map_err(|e| HostsError::YamlError(e.to_string()))
        }
    }
}

/// Hosts written by `--init`, a starting point for a real inventory.
pub fn example_hosts() -> Vec<Host> {
    vec![
        Host::new("node-1", "192.168.128.102"),
        Host::new("node-2", "192.168.128.103"),
        Host::new("node-3", "192.168.128.104"),
    ]
}

/// Pretty-printed JSON for the example hosts file.
pub fn format_example_hosts() -> Result<String, HostsError> {
    serde_json::to_string_pretty(&example_hosts())
        .map_err(|e| HostsError::EncodeError(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_json_hosts() {
        let json = r#"[
            {"hostname": "node-1", "ip": "192.168.128.102"},
            {"hostname": "node-2", "ip": "192.168.128.103"}
        ]"#;

        let hosts = parse_hosts(json, HostsFormat::Json).unwrap();
        assert_eq!(hosts.len(), 2);
        assert_eq!(hosts[0], Host::new("node-1", "192.168.128.102"));
        assert_eq!(hosts[1].address, "192.168.128.103");
    }

    #[test]
    fn test_parse_address_alias() {
        let json = r#"[{"hostname": "node-1", "address": "10.0.0.1"}]"#;
        let hosts = parse_hosts(json, HostsFormat::Json).unwrap();
        assert_eq!(hosts[0].address, "10.0.0.1");
    }

    #[test]
    fn test_parse_with_comments() {
        let jsonc = r#"[
            // rack A
            {"hostname": "node-1", "ip": "10.0.0.1"},
            /* rack B */
            {"hostname": "node-2", "ip": "10.0.0.2"}
        ]"#;

        let hosts = parse_hosts(jsonc, HostsFormat::Json).unwrap();
        assert_eq!(hosts.len(), 2);
        assert_eq!(hosts[1].hostname, "node-2");
    }

    #[test]
    fn test_preserve_strings_with_slashes() {
        let input = r#"[{"hostname": "a//b", "ip": "10.0.0.1"}]"#;
        assert_eq!(strip_jsonc_comments(input), input);
    }

    #[test]
    fn test_strip_keeps_escaped_quotes_and_trailing_slash() {
        let input = r#"[{"hostname": "say \"/*hi*/\"", "ip": "10.0.0.1"}] /"#;
        assert_eq!(strip_jsonc_comments(input), input);
    }

    #[test]
    fn test_strip_block_comment_with_stars() {
        let input = "[1, /** note ** */ 2 // tail\n, 3]";
        assert_eq!(strip_jsonc_comments(input), "[1,  2 \n, 3]");
    }

    #[test]
    fn test_parse_yaml_hosts() {
        let yaml = "- hostname: node-1\n  ip: 10.0.0.1\n- hostname: node-2\n  address: 10.0.0.2\n";
        let hosts = parse_hosts(yaml, HostsFormat::Yaml).unwrap();
        assert_eq!(
            hosts,
            vec![Host::new("node-1", "10.0.0.1"), Host::new("node-2", "10.0.0.2")]
        );
    }

    #[test]
    fn test_parse_empty_list() {
        let hosts = parse_hosts("[]", HostsFormat::Json).unwrap();
        assert!(hosts.is_empty());
    }

    #[test]
    fn test_parse_missing_address() {
        let result = parse_hosts(r#"[{"hostname": "node-1"}]"#, HostsFormat::Json);
        assert!(matches!(result, Err(HostsError::ParseError(_))));
    }

    #[test]
    fn test_parse_invalid_yaml() {
        let result = parse_hosts("hostname: [unclosed", HostsFormat::Yaml);
        assert!(matches!(result, Err(HostsError::YamlError(_))));
    }

    #[test]
    fn test_format_from_extension() {
        assert_eq!(HostsFormat::from_extension(Some("yml")), HostsFormat::Yaml);
        assert_eq!(HostsFormat::from_extension(Some("yaml")), HostsFormat::Yaml);
        assert_eq!(HostsFormat::from_extension(Some("json")), HostsFormat::Json);
        assert_eq!(HostsFormat::from_extension(None), HostsFormat::Json);
    }

    #[test]
    fn test_example_hosts_use_ip_key() {
        let output = format_example_hosts().unwrap();
        assert!(output.contains("\"ip\": \"192.168.128.102\""));
        assert!(output.contains("\"hostname\": \"node-3\""));

        let parsed = parse_hosts(&output, HostsFormat::Json).unwrap();
        assert_eq!(parsed, example_hosts());
    }
}
