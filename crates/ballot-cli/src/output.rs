//! Output formatting utilities.
//!
//! Pretty printing for session reports.

use ballot_types::Address;
use colored::Colorize;
use tabled::{Table, Tabled};

use crate::driver::{CallOutcome, SessionReport};

/// Format address (short version).
pub fn format_address_short(addr: &Address) -> String {
    let s = format!("{:x}", addr);
    format!("{}...{}", &s[..10], &s[s.len() - 8..])
}

/// Print success message.
pub fn print_success(msg: &str) {
    println!("{}", format!("✓ {}", msg).green());
}

/// Print error message.
pub fn print_error(msg: &str) {
    eprintln!("{}", format!("✗ {}", msg).red());
}

/// Print info message.
pub fn print_info(msg: &str) {
    println!("{}", format!("ℹ {}", msg).blue());
}

fn print_outcome(outcome: &CallOutcome) {
    let line = format!(
        "#{:<3} {:<8} {:<22} {}",
        outcome.index,
        outcome.action,
        format_address_short(&outcome.caller),
        outcome.detail
    );
    if outcome.ok {
        println!("{}", line.green());
    } else {
        let kind = outcome.error_kind.unwrap_or("error");
        println!("{} {}", line.red(), format!("[{}]", kind).dimmed());
    }
}

/// Print tally table.
pub fn print_tally_table(tally: &[(String, u64)], winner: usize) {
    #[derive(Tabled)]
    struct TallyRow {
        index: usize,
        proposal: String,
        weight: u64,
        winner: String,
    }

    let rows: Vec<TallyRow> = tally
        .iter()
        .enumerate()
        .map(|(index, (name, weight))| TallyRow {
            index,
            proposal: name.clone(),
            weight: *weight,
            winner: if index == winner { "*".to_string() } else { String::new() },
        })
        .collect();

    println!("{}", Table::new(rows));
}

/// Print a full session report.
pub fn print_report(report: &SessionReport) {
    println!("{}", format!("Session: {}", report.name).bold());
    println!("{}", "=".repeat(50));
    println!("Chairperson:  {}", report.chairperson.to_string().bright_cyan());
    println!();

    for outcome in &report.outcomes {
        print_outcome(outcome);
    }
    println!();

    print_tally_table(&report.tally, report.winning_proposal);
    println!("Counted weight: {}", report.total_votes.to_string().bright_yellow());
    println!("Pending weight: {}", report.unsettled_weight.to_string().bright_yellow());
    println!();

    print_success(&format!(
        "Winning proposal: #{} {}",
        report.winning_proposal, report.winning_proposal_name
    ));
    if report.failures() > 0 {
        print_info(&format!("{} call(s) failed", report.failures()));
    }
}
