use serde::{Deserialize, Serialize};
use tracing::warn;

pub const DEFAULT_CONTROL_PLANE_COUNT: i64 = 3;
pub const DEFAULT_USER: &str = "root";
pub const DEFAULT_KUBECONFIG_PATH: &str = "kubeconfig";
pub const DEFAULT_KUBECONFIG_CONTEXT: &str = "default";

/// Settings for one planning run.
///
/// Values are taken as given; malformed numbers are clamped when read
/// through [`ClusterTopologyConfig::control_plane_target`] and
/// [`ClusterTopologyConfig::effective_host_limit`] rather than rejected.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct ClusterTopologyConfig {
    /// Number of hosts to dedicate to the control plane, primary included
    pub desired_control_plane_count: i64,

    /// SSH login user for every host
    pub login_user: String,

    /// Where the primary writes the kubeconfig locally
    pub kubeconfig_path: String,

    pub kubeconfig_context: String,

    /// SAN for the API server certificate, may be a comma-separated list
    #[serde(default)]
    pub tls_san: Option<String>,

    #[serde(default)]
    pub control_plane_extra_args: Option<String>,

    #[serde(default)]
    pub worker_extra_args: Option<String>,

    /// Append `&` to join commands so they run concurrently
    #[serde(default)]
    pub run_agents_in_background: bool,

    /// Maximum number of hosts to plan; `None` or `<= 0` means all of them
    #[serde(default)]
    pub host_limit: Option<i64>,
}

impl Default for ClusterTopologyConfig {
    fn default() -> Self {
        Self {
            desired_control_plane_count: DEFAULT_CONTROL_PLANE_COUNT,
            login_user: DEFAULT_USER.to_string(),
            kubeconfig_path: DEFAULT_KUBECONFIG_PATH.to_string(),
            kubeconfig_context: DEFAULT_KUBECONFIG_CONTEXT.to_string(),
            tls_san: None,
            control_plane_extra_args: None,
            worker_extra_args: None,
            run_agents_in_background: false,
            host_limit: None,
        }
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

impl ClusterTopologyConfig {
    pub fn with_control_planes(mut self, count: i64) -> Self {
        self.desired_control_plane_count = count;
        self
    }

    pub fn with_user(mut self, user: impl Into<String>) -> Self {
        self.login_user = user.into();
        self
    }

    pub fn with_tls_san(mut self, san: impl Into<String>) -> Self {
        self.tls_san = Some(san.into());
        self
    }

    pub fn with_control_plane_extra_args(mut self, args: impl Into<String>) -> Self {
        self.control_plane_extra_args = Some(args.into());
        self
    }

    pub fn with_worker_extra_args(mut self, args: impl Into<String>) -> Self {
        self.worker_extra_args = Some(args.into());
        self
    }

    pub fn with_background(mut self, background: bool) -> Self {
        self.run_agents_in_background = background;
        self
    }

    pub fn with_host_limit(mut self, limit: i64) -> Self {
        self.host_limit = Some(limit);
        self
    }

    /// Control-plane size to plan for, never less than one.
    ///
    /// A cluster always has a primary, so zero and negative counts are
    /// treated as 1.
    pub fn control_plane_target(&self) -> usize {
        if self.desired_control_plane_count < 1 {
            warn!(
                requested = self.desired_control_plane_count,
                "Control-plane count below 1, using a single server"
            );
            return 1;
        }
        usize::try_from(self.desired_control_plane_count).unwrap_or(usize::MAX)
    }

    /// Host cap, or `None` when every host should be planned.
    pub fn effective_host_limit(&self) -> Option<usize> {
        match self.host_limit {
            Some(limit) if limit > 0 => Some(usize::try_from(limit).unwrap_or(usize::MAX)),
            _ => None,
        }
    }

    pub fn tls_san(&self) -> Option<&str> {
        non_empty(&self.tls_san)
    }

    pub fn control_plane_extra_args(&self) -> Option<&str> {
        non_empty(&self.control_plane_extra_args)
    }

    pub fn worker_extra_args(&self) -> Option<&str> {
        non_empty(&self.worker_extra_args)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ClusterTopologyConfig::default();
        assert_eq!(config.desired_control_plane_count, 3);
        assert_eq!(config.login_user, "root");
        assert_eq!(config.kubeconfig_path, "kubeconfig");
        assert_eq!(config.kubeconfig_context, "default");
        assert!(config.tls_san().is_none());
        assert!(!config.run_agents_in_background);
        assert!(config.effective_host_limit().is_none());
    }

    #[test]
    fn test_control_plane_target_clamps_to_one() {
        let target = |count| {
            ClusterTopologyConfig::default()
                .with_control_planes(count)
                .control_plane_target()
        };
        assert_eq!(target(0), 1);
        assert_eq!(target(-4), 1);
        assert_eq!(target(5), 5);
    }

    #[test]
    fn test_host_limit_non_positive_is_unbounded() {
        let config = ClusterTopologyConfig::default();
        assert_eq!(config.clone().with_host_limit(0).effective_host_limit(), None);
        assert_eq!(config.clone().with_host_limit(-1).effective_host_limit(), None);
        assert_eq!(config.with_host_limit(2).effective_host_limit(), Some(2));
    }

    #[test]
    fn test_empty_strings_are_absent() {
        let config = ClusterTopologyConfig::default()
            .with_tls_san("")
            .with_control_plane_extra_args("")
            .with_worker_extra_args("--node-label role=edge");

        assert!(config.tls_san().is_none());
        assert!(config.control_plane_extra_args().is_none());
        assert_eq!(config.worker_extra_args(), Some("--node-label role=edge"));
    }

    #[test]
    fn test_deserialize_partial() {
        let json = r#"{
            "desired-control-plane-count": 1,
            "login-user": "ubuntu",
            "kubeconfig-path": "./kc",
            "kubeconfig-context": "lab",
            "tls-san": "api.lab.local"
        }"#;

        let config: ClusterTopologyConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.login_user, "ubuntu");
        assert_eq!(config.tls_san(), Some("api.lab.local"));
        assert!(config.host_limit.is_none());
    }
}
