use std::process;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use clusterplan::cli::{format_plan_output, format_plan_summary, Args};
use clusterplan::config::{format_example_hosts, load_hosts_file};
use clusterplan::plan::plan;

fn main() {
    let args = Args::parse();

    // Initialize logging
    let filter = match args.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    // stdout carries only the script
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    if args.init {
        match format_example_hosts() {
            Ok(example) => println!("{}", example),
            Err(e) => {
                error!("{}", e);
                process::exit(1);
            }
        }
        return;
    }

    let Some(hosts_file) = args.hosts_file.as_deref() else {
        error!("Give a path to a JSON file containing a list of hosts");
        process::exit(1);
    };

    let hosts = match load_hosts_file(hosts_file) {
        Ok(hosts) => hosts,
        Err(e) => {
            error!(
                "Failed to load hosts file {}: {}",
                hosts_file.display(),
                e
            );
            process::exit(1);
        }
    };

    let plan = plan(&hosts, &args.topology());

    let output = format_plan_output(&plan, args.roles);
    match args.output {
        Some(ref path) => {
            if let Err(e) = std::fs::write(path, &output) {
                error!("Failed to write plan to {}: {}", path.display(), e);
                process::exit(1);
            }
            info!("Wrote plan to {}", path.display());
            eprint!("{}", format_plan_summary(&plan));
        }
        None => print!("{}", output),
    }
}
