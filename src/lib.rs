//! Plan a Highly Available K3s cluster installation from a list of hosts.
//!
//! The planner is pure: [`plan::plan`] turns hosts and a
//! [`config::ClusterTopologyConfig`] into a [`plan::Plan`] whose text is a
//! shell script. Reading the hosts file and printing the script are left to
//! the binary.

pub mod cli;
pub mod config;
pub mod plan;
