//! Rendering of role-assigned hosts into an install script
//!
//! The output is a POSIX shell script driving `k3sup`: the primary server is
//! installed first and its node token captured into a shell variable, then
//! every other host joins using that token and the primary's address.

use std::fmt;

use serde::Serialize;
use tracing::warn;

use super::roles::{Role, RoleAssignment};
use crate::config::{ClusterTopologyConfig, Host};

/// First line of every plan
pub const SCRIPT_HEADER: &str = "#!/bin/sh\n\n";

/// Shell variable holding the join token once the primary is up
pub const JOIN_TOKEN_VAR: &str = "NODE_TOKEN";

/// Script text for one host
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommandBlock {
    pub hostname: String,
    pub host_address: String,
    pub role: Role,
    pub ordinal: usize,
    pub rendered_text: String,
}

/// Ordered command blocks, primary first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Plan {
    pub blocks: Vec<CommandBlock>,
}

impl Plan {
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    /// The block that initializes the cluster, if any host was planned
    pub fn primary(&self) -> Option<&CommandBlock> {
        self.blocks
            .iter()
            .find(|b| b.role == Role::PrimaryControlPlane)
    }

    pub fn count_role(&self, role: Role) -> usize {
        self.blocks.iter().filter(|b| b.role == role).count()
    }

    /// Full script text: header followed by every block in order.
    pub fn to_script(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Plan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(SCRIPT_HEADER)?;
        for block in &self.blocks {
            f.write_str(&block.rendered_text)?;
        }
        Ok(())
    }
}

/// Join token produced by the primary and consumed by every later block.
///
/// Only the shell variable name is carried; the token value itself exists
/// solely when the script runs.
#[derive(Debug, Clone, PartialEq, Eq)]
struct JoinToken {
    variable: &'static str,
}

impl JoinToken {
    fn capture(address: &str, user: &str) -> (Self, String) {
        let token = Self {
            variable: JOIN_TOKEN_VAR,
        };
        let text = format!(
            "\necho \"Fetching the server's node-token into memory\"\n\n\
             export {}=$(k3sup node-token --host {} --user {})\n",
            token.variable, address, user
        );
        (token, text)
    }

    fn reference(&self) -> String {
        format!("\"${}\"", self.variable)
    }
}

/// Address of the primary and the token it exported
#[derive(Debug, Clone)]
struct Primary {
    address: String,
    token: JoinToken,
}

/// ` \` line continuation followed by `flag value`, or nothing when the
/// value is absent.
fn clause(flag: &str, value: Option<&str>) -> String {
    value
        .map(|v| format!(" \\\n{} {}", flag, v))
        .unwrap_or_default()
}

fn extra_args_clause(args: Option<&str>) -> String {
    args.map(|a| format!(" \\\n--k3s-extra-args \"{}\"", a))
        .unwrap_or_default()
}

/// Walks role-assigned hosts and accumulates their command blocks.
pub struct PlanRenderer<'a> {
    config: &'a ClusterTopologyConfig,
    primary: Option<Primary>,
    blocks: Vec<CommandBlock>,
    tls_san: String,
    server_extra_args: String,
    agent_extra_args: String,
    background: &'static str,
}

impl<'a> PlanRenderer<'a> {
    pub fn new(config: &'a ClusterTopologyConfig) -> Self {
        Self {
            config,
            primary: None,
            blocks: Vec::new(),
            tls_san: clause("--tls-san", config.tls_san()),
            server_extra_args: extra_args_clause(config.control_plane_extra_args()),
            agent_extra_args: extra_args_clause(config.worker_extra_args()),
            background: if config.run_agents_in_background {
                " &"
            } else {
                ""
            },
        }
    }

    /// Render every assigned host, stopping after the configured host limit.
    pub fn render(mut self, assigned: &[(&Host, RoleAssignment)]) -> Plan {
        let limit = self.config.effective_host_limit();

        for (host, assignment) in assigned {
            self.push(host, *assignment);

            if limit.is_some_and(|l| self.blocks.len() >= l) {
                break;
            }
        }

        Plan {
            blocks: self.blocks,
        }
    }

    fn push(&mut self, host: &Host, assignment: RoleAssignment) {
        let text = match assignment.role {
            Role::PrimaryControlPlane => self.render_primary(host, assignment.ordinal),
            Role::AdditionalControlPlane | Role::Worker => {
                let Some(primary) = self.primary.as_ref() else {
                    warn!(
                        hostname = %host.hostname,
                        "No primary server planned before this host, skipping"
                    );
                    return;
                };
                if assignment.role == Role::Worker {
                    self.render_worker(primary, host, assignment.ordinal)
                } else {
                    self.render_server(primary, host, assignment.ordinal)
                }
            }
        };

        self.blocks.push(CommandBlock {
            hostname: host.hostname.clone(),
            host_address: host.address.clone(),
            role: assignment.role,
            ordinal: assignment.ordinal,
            rendered_text: text,
        });
    }

    fn render_primary(&mut self, host: &Host, ordinal: usize) -> String {
        let user = &self.config.login_user;
        let mut text = String::new();

        text.push_str(&format!("echo \"Setting up primary server {}\"\n", ordinal));
        text.push_str(&format!(
            "k3sup install --host {} \\\n\
             --user {} \\\n\
             --cluster \\\n\
             --local-path {} \\\n\
             --context {}{}{}\n",
            host.address,
            user,
            self.config.kubeconfig_path,
            self.config.kubeconfig_context,
            self.tls_san,
            self.server_extra_args
        ));

        let (token, capture) = JoinToken::capture(&host.address, user);
        text.push_str(&capture);

        self.primary = Some(Primary {
            address: host.address.clone(),
            token,
        });
        text
    }

    fn render_server(&self, primary: &Primary, host: &Host, ordinal: usize) -> String {
        let mut text = String::new();

        text.push_str(&format!("\necho \"Setting up additional server: {}\"\n", ordinal));
        text.push_str(&format!(
            "k3sup join \\\n\
             --host {} \\\n\
             --server-host {} \\\n\
             --server \\\n\
             --node-token {} \\\n\
             --user {}{}{}{}\n",
            host.address,
            primary.address,
            primary.token.reference(),
            self.config.login_user,
            self.tls_san,
            self.server_extra_args,
            self.background
        ));
        text
    }

    fn render_worker(&self, primary: &Primary, host: &Host, ordinal: usize) -> String {
        let mut text = String::new();

        text.push_str(&format!("\necho \"Setting up worker: {}\"\n", ordinal));
        text.push_str(&format!(
            "k3sup join \\\n\
             --host {} \\\n\
             --server-host {} \\\n\
             --node-token {} \\\n\
             --user {}{}{}\n",
            host.address,
            primary.address,
            primary.token.reference(),
            self.config.login_user,
            self.agent_extra_args,
            self.background
        ));
        text
    }
}
