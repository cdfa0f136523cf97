use std::fs;

use anyhow::{bail, Context};
use colored::Colorize;
use regex::Regex;
use tracing::debug;

use vobdiff_engine::{assemble, reduce_branch, reduce_checkedout, ReduceOptions};
use vobdiff_source::{ClearTool, RecordFilter, RevisionSource, ViewKind};

use crate::cli::Cli;

pub fn run(cli: Cli) -> anyhow::Result<()> {
    let filter = match &cli.exclude {
        Some(pattern) => {
            debug!(pattern = %pattern, "excluding files");
            let regex = Regex::new(pattern)
                .with_context(|| format!("invalid --exclude pattern {pattern:?}"))?;
            RecordFilter::new(Some(regex))
        }
        None => RecordFilter::new(None),
    };

    let source = ClearTool::detect()?;
    if cli.track_branch.is_some() && source.view_kind() != ViewKind::Dynamic {
        bail!("generating a diff from a branch requires a dynamic view");
    }

    let records = match &cli.track_branch {
        Some(branch) => source.branch_changeset(branch)?,
        None => source.checkedout_changeset()?,
    };
    let records = filter.apply(records);

    let entries = match &cli.track_branch {
        Some(_) => reduce_branch(
            &records,
            ReduceOptions {
                exclude_merges: cli.exclude_merge,
            },
        )?,
        None => reduce_checkedout(&records),
    };

    if entries.is_empty() {
        eprintln!(
            "{} no pending changes in the current view",
            "warning:".yellow().bold()
        );
    }

    let (diff, _parent) = assemble(&source, &entries)?;

    match &cli.output {
        Some(path) => fs::write(path, &diff)
            .with_context(|| format!("writing diff to {}", path.display()))?,
        None => print!("{diff}"),
    }

    Ok(())
}
