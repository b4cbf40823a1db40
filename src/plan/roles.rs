//! Role assignment for hosts
//!
//! Hosts are classified strictly by their position in the input: the first
//! host initializes the cluster, the next ones fill the remaining
//! control-plane seats, and everything after that joins as a worker.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::Host;

/// Role of a host in the planned cluster
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Role {
    /// First server; initializes the cluster and issues the join token
    PrimaryControlPlane,
    /// Further server joining the primary's control plane
    AdditionalControlPlane,
    /// Agent node
    Worker,
}

impl Role {
    pub fn is_control_plane(&self) -> bool {
        !matches!(self, Role::Worker)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Role::PrimaryControlPlane => "primary",
            Role::AdditionalControlPlane => "server",
            Role::Worker => "worker",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Role of one host plus its 1-based position among hosts of that kind.
///
/// Control-plane ordinals are shared by primary and additional servers, so
/// the primary is always server 1 and the first additional server is 2.
/// Worker ordinals count workers only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleAssignment {
    pub role: Role,
    pub ordinal: usize,
}

/// Assign a role to each host, in input order.
///
/// `control_planes` below 1 is treated as 1. When `limit` is set, only the
/// first `limit` hosts are assigned; the rest are left out of the result.
/// Pure function - no I/O.
pub fn assign_roles<'a>(
    hosts: &'a [Host],
    control_planes: usize,
    limit: Option<usize>,
) -> Vec<(&'a Host, RoleAssignment)> {
    let control_planes = control_planes.max(1);
    let take = limit.unwrap_or(hosts.len());

    let mut servers = 0usize;
    let mut workers = 0usize;
    let mut assigned = Vec::with_capacity(take.min(hosts.len()));

    for host in hosts.iter().take(take) {
        let assignment = if servers == 0 {
            servers = 1;
            RoleAssignment {
                role: Role::PrimaryControlPlane,
                ordinal: 1,
            }
        } else if servers < control_planes {
            servers += 1;
            RoleAssignment {
                role: Role::AdditionalControlPlane,
                ordinal: servers,
            }
        } else {
            workers += 1;
            RoleAssignment {
                role: Role::Worker,
                ordinal: workers,
            }
        };

        debug!(
            hostname = %host.hostname,
            address = %host.address,
            role = %assignment.role,
            ordinal = assignment.ordinal,
            "Assigned role"
        );
        assigned.push((host, assignment));
    }

    assigned
}
