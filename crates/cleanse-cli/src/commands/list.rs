use anyhow::Result;

use crate::cli::TargetArgs;

pub fn handle(args: TargetArgs) -> Result<()> {
    let (settings, targets) = super::load_targets(&args)?;

    if targets.is_empty() {
        println!("No targets configured.");
        return Ok(());
    }

    println!("Targets ({} missing-file policy):", settings.missing);
    for target in &targets {
        if target.exists() {
            println!("  {}", target.display());
        } else {
            println!("  {} (missing)", target.display());
        }
    }

    let redactor = settings.redactor(true);
    println!(
        "Banner: {} lines, placeholder {:?}",
        redactor.banner().len(),
        redactor.placeholder()
    );

    Ok(())
}
