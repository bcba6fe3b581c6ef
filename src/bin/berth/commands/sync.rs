//! `berth sync` command

use anyhow::Result;

use crate::cli::SyncArgs;
use berth::ops::sync::{sync, SyncOptions};

pub fn execute(args: SyncArgs) -> Result<()> {
    // Flags only move a setting away from its model-file value, so absent
    // flags map to None and leave the file's choice in force
    let opts = SyncOptions {
        model: args.model,
        module: args.module,
        link_modules: args.no_link_modules.then_some(false),
        use_full_names: args.use_full_names.then_some(true),
        use_classifiers: args.use_classifiers.then_some(true),
        source_classifier: args.source_classifier,
        javadoc_classifier: args.javadoc_classifier,
        exclude: args.exclude,
        overwrite: args.overwrite,
    };

    let report = sync(&opts)?;

    eprintln!("    Synced {} module descriptor(s)", report.written.len());

    Ok(())
}
