//! Validate command.

use clap::Args;
use mixdown_core::ValidationReport;
use std::path::PathBuf;

use super::common::load_sequence;

#[derive(Args)]
pub struct ValidateArgs {
    /// Timeline JSON file
    timeline: PathBuf,
}

pub fn run(args: ValidateArgs) -> anyhow::Result<()> {
    let sequence = load_sequence(&args.timeline)?;
    let issues = sequence.validate();

    if issues.is_empty() {
        println!(
            "ok: {} track(s), {} clip(s), {:.0} ms",
            sequence.tracks.len(),
            sequence.clip_count(),
            sequence.effective_duration_ms()
        );
        return Ok(());
    }

    let count = issues.len();
    println!("{}", ValidationReport(issues));
    anyhow::bail!("{count} issue(s) found in '{}'", args.timeline.display())
}
