//! CLI module for clusterplan
//!
//! A single command that reads a hosts file and prints the install plan:
//! - `clusterplan hosts.json` - print the script
//! - `clusterplan hosts.json --roles` - print the role of each host
//! - `clusterplan --init` - print an example hosts file

use clap::{ArgAction, Parser};
use std::path::PathBuf;

mod display;

pub use display::*;

use crate::config::topology::{
    DEFAULT_CONTROL_PLANE_COUNT, DEFAULT_KUBECONFIG_CONTEXT, DEFAULT_KUBECONFIG_PATH,
    DEFAULT_USER,
};
use crate::config::ClusterTopologyConfig;

#[derive(Parser, Debug)]
#[command(name = "clusterplan")]
#[command(about = "Plan an installation of K3s for a Highly Available cluster")]
#[command(
    long_about = "Generate a shell script of installation commands for a Highly Available \
K3s cluster. The first hosts in the file become servers, the rest join as agents.\n\n\
Example hosts file:\n\n\
[{\"hostname\": \"node-1\", \"ip\": \"192.168.128.102\"},\n\
 {\"hostname\": \"node-2\", \"ip\": \"192.168.128.103\"},\n\
 {\"hostname\": \"node-3\", \"ip\": \"192.168.128.104\"}]"
)]
#[command(version)]
pub struct Args {
    /// Path to the hosts file (JSON, JSONC or YAML)
    #[arg(required_unless_present = "init", value_name = "HOSTS_FILE")]
    pub hosts_file: Option<PathBuf>,

    /// Enable verbose logging output (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Number of servers to use from the hosts file
    #[arg(
        long,
        env = "CLUSTERPLAN_SERVERS",
        default_value_t = DEFAULT_CONTROL_PLANE_COUNT,
        allow_negative_numbers = true
    )]
    pub servers: i64,

    /// Username for SSH login
    #[arg(long, env = "CLUSTERPLAN_USER", default_value = DEFAULT_USER)]
    pub user: String,

    /// Where to save the kubeconfig file
    #[arg(long, env = "CLUSTERPLAN_LOCAL_PATH", default_value = DEFAULT_KUBECONFIG_PATH)]
    pub local_path: String,

    /// Name of the kubeconfig context to use
    #[arg(long, env = "CLUSTERPLAN_CONTEXT", default_value = DEFAULT_KUBECONFIG_CONTEXT)]
    pub context: String,

    /// SAN for TLS certificates, can be a comma-separated list
    #[arg(long, env = "CLUSTERPLAN_TLS_SAN")]
    pub tls_san: Option<String>,

    /// Extra arguments to be passed into the k3s server
    #[arg(long, value_name = "ARGS", allow_hyphen_values = true)]
    pub server_k3s_extra_args: Option<String>,

    /// Extra arguments to be passed into the k3s agent
    #[arg(long, value_name = "ARGS", allow_hyphen_values = true)]
    pub agent_k3s_extra_args: Option<String>,

    /// Run the installation in the background for all agents/nodes after the first server is up
    #[arg(long)]
    pub background: bool,

    /// Maximum number of nodes to use from the hosts file, 0 to use all of them
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    pub limit: i64,

    /// Output an example hosts.json file
    #[arg(long)]
    pub init: bool,

    /// Print the role assigned to each host instead of the script
    #[arg(long)]
    pub roles: bool,

    /// Write the plan to a file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

impl Args {
    /// Topology settings for the planner, taken from the flags.
    pub fn topology(&self) -> ClusterTopologyConfig {
        ClusterTopologyConfig {
            desired_control_plane_count: self.servers,
            login_user: self.user.clone(),
            kubeconfig_path: self.local_path.clone(),
            kubeconfig_context: self.context.clone(),
            tls_san: self.tls_san.clone(),
            control_plane_extra_args: self.server_k3s_extra_args.clone(),
            worker_extra_args: self.agent_k3s_extra_args.clone(),
            run_agents_in_background: self.background,
            host_limit: Some(self.limit),
        }
    }
}
