use anyhow::Result;
use cleanse_core::MissingPolicy;
use tracing::info;

use crate::cli::RunArgs;

pub async fn handle(args: RunArgs) -> Result<()> {
    let (settings, targets) = super::load_targets(&args.targets)?;

    let policy = if args.fail_fast {
        Some(MissingPolicy::FailFast)
    } else if args.skip_missing {
        Some(MissingPolicy::Skip)
    } else {
        None
    };

    let runner = settings.runner(args.dry_run, policy);
    info!(
        targets = targets.len(),
        dry_run = args.dry_run,
        policy = %runner.policy(),
        "Starting cleanse run"
    );
    let json = args.json;

    let report = runner
        .run(&targets, |outcome| {
            if !json {
                println!("{}", outcome);
            }
        })
        .await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    }

    Ok(())
}
