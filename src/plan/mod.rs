//! Cluster bootstrap planning
//!
//! [`plan`] is the entry point: it assigns roles to the hosts and renders the
//! resulting script. Both steps are pure; reading hosts and printing the plan
//! happen in the CLI.

pub mod render;
pub mod roles;

pub use render::{CommandBlock, Plan, PlanRenderer, JOIN_TOKEN_VAR, SCRIPT_HEADER};
pub use roles::{assign_roles, Role, RoleAssignment};

use tracing::{info, warn};

use crate::config::{ClusterTopologyConfig, Host};

/// Plan the installation of `hosts` in input order.
///
/// An empty host list gives an empty plan, not an error.
pub fn plan(hosts: &[Host], config: &ClusterTopologyConfig) -> Plan {
    if hosts.is_empty() {
        warn!("No hosts given, the plan will be empty");
        return Plan::default();
    }

    let assigned = assign_roles(
        hosts,
        config.control_plane_target(),
        config.effective_host_limit(),
    );
    let plan = PlanRenderer::new(config).render(&assigned);

    info!(
        hosts = hosts.len(),
        planned = plan.len(),
        servers = plan.count_role(Role::PrimaryControlPlane)
            + plan.count_role(Role::AdditionalControlPlane),
        workers = plan.count_role(Role::Worker),
        "Planned cluster"
    );
    plan
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plan_is_deterministic() {
        let hosts = vec![
            Host::new("node-1", "10.0.0.1"),
            Host::new("node-2", "10.0.0.2"),
            Host::new("node-3", "10.0.0.3"),
            Host::new("node-4", "10.0.0.4"),
        ];
        let config = ClusterTopologyConfig::default()
            .with_tls_san("k8s.lab")
            .with_background(true);

        assert_eq!(plan(&hosts, &config).to_script(), plan(&hosts, &config).to_script());
    }

    #[test]
    fn test_plan_empty_hosts() {
        let plan = plan(&[], &ClusterTopologyConfig::default());
        assert!(plan.is_empty());
        assert_eq!(plan.to_script(), SCRIPT_HEADER);
    }

    #[test]
    fn test_plan_clamps_control_planes() {
        let hosts = vec![Host::new("a", "10.0.0.1"), Host::new("b", "10.0.0.2")];
        let config = ClusterTopologyConfig::default().with_control_planes(-2);
        let plan = plan(&hosts, &config);

        assert_eq!(plan.count_role(Role::PrimaryControlPlane), 1);
        assert_eq!(plan.count_role(Role::Worker), 1);
    }
}
