//! `harbour-xcode flags` command

use anyhow::Result;

use crate::cli::FlagsArgs;
use crate::commands::{config_for, manifest_path};
use harbour_xcode::ops::flags_report;

pub fn execute(args: FlagsArgs) -> Result<()> {
    let manifest_path = manifest_path(args.manifest)?;
    let config = config_for(&manifest_path);

    let report = flags_report(&manifest_path, args.group.as_deref(), &config)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    for (i, group) in report.iter().enumerate() {
        if i > 0 {
            println!();
        }
        println!("# Compiler flags for `{}`:", group.group);
        println!("  arc:     {}", display_flags(&group.arc));
        println!("  non-arc: {}", display_flags(&group.non_arc));
    }

    Ok(())
}

fn display_flags(flags: &str) -> &str {
    if flags.is_empty() {
        "(none)"
    } else {
        flags
    }
}
