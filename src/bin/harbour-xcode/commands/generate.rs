//! `harbour-xcode generate` command

use anyhow::Result;

use crate::cli::GenerateArgs;
use crate::commands::{config_for, manifest_dir, manifest_path};
use harbour_xcode::ops::{format_summary, generate, GenerateOptions};

pub fn execute(args: GenerateArgs) -> Result<()> {
    let manifest_path = manifest_path(args.manifest)?;

    let mut config = config_for(&manifest_path);
    if args.project_name.is_some() {
        config.xcode.project_name = args.project_name;
    }
    if args.inhibit_all_warnings {
        config.xcode.inhibit_all_warnings = Some(true);
    }

    let sandbox_root = args
        .sandbox
        .unwrap_or_else(|| manifest_dir(&manifest_path).join(".harbour").join("xcode"));

    let result = generate(&GenerateOptions {
        manifest_path,
        sandbox_root,
        config,
    })?;

    if args.json {
        println!("{}", result.project.to_json()?);
    } else {
        print!("{}", format_summary(&result));
    }

    Ok(())
}
