//! Display formatting for CLI output
//!
//! SBIO pattern: Pure functions that format data for display

use crate::plan::{Plan, Role};

const ROLE_HEADERS: [&str; 4] = ["HOSTNAME", "ADDRESS", "ROLE", "ORDINAL"];
const COLUMN_GAP: &str = "   ";

/// One line of the role table, each cell padded to its column width
fn format_row<S: AsRef<str>>(cells: &[S], widths: &[usize]) -> String {
    let line = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!("{:width$}", cell.as_ref(), width = *width))
        .collect::<Vec<_>>()
        .join(COLUMN_GAP);
    format!("{}\n", line.trim_end())
}

/// Format the role of every planned host, in plan order
pub fn format_role_table(plan: &Plan) -> String {
    if plan.is_empty() {
        return "No hosts planned.\n".to_string();
    }

    let rows: Vec<[String; 4]> = plan
        .blocks
        .iter()
        .map(|b| {
            [
                b.hostname.clone(),
                b.host_address.clone(),
                b.role.to_string(),
                b.ordinal.to_string(),
            ]
        })
        .collect();

    let mut widths = ROLE_HEADERS.map(str::len);
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.len());
        }
    }

    let mut output = format_row(&ROLE_HEADERS, &widths);
    for row in &rows {
        output.push_str(&format_row(row, &widths));
    }
    output
}

/// One-line count of servers and workers in a plan
pub fn format_plan_summary(plan: &Plan) -> String {
    let servers =
        plan.count_role(Role::PrimaryControlPlane) + plan.count_role(Role::AdditionalControlPlane);
    format!(
        "{} host(s): {} server(s), {} worker(s)\n",
        plan.len(),
        servers,
        plan.count_role(Role::Worker)
    )
}

/// Text the CLI emits for a plan: the role table with `--roles`, otherwise
/// the script. Printed to stdout or written to `--output` as-is.
pub fn format_plan_output(plan: &Plan, roles: bool) -> String {
    if roles {
        format_role_table(plan)
    } else {
        format!("{}\n", plan.to_script())
    }
}
