//! Human-readable CLI output formatting.
//!
//! JSON output bypasses this module; commands serialize their results
//! directly when `--json` is given.

use tether_common::capability::CapabilityStatus;
use tether_store::RecordSummary;

/// Print the non-secret fields of a stored registration.
pub fn record_detail(summary: &RecordSummary) {
    println!("{}", summary.client_id);
    println!("  Profile: {}", summary.profile);
    println!("  URI:     {}", summary.registration_uri);
    if let Some(public_key) = &summary.public_key {
        println!("  Public key:");
        for line in public_key.lines() {
            println!("    {line}");
        }
    }
}

/// Print one capability line: `[ok]  NAME\tSUMMARY`.
pub fn capability_line(status: &CapabilityStatus) {
    let marker = if status.healthy { "ok" } else { "!!" };
    println!("[{marker}]  {}\t{}", status.name, status.summary);
}

/// Print the onboarding state line of `tether status`.
pub fn onboarding_line(onboarded: bool, path: &std::path::Path) {
    if onboarded {
        println!("[ok]  credentials\t{}", path.display());
    } else {
        println!("[--]  credentials\tnot onboarded ({})", path.display());
    }
}
