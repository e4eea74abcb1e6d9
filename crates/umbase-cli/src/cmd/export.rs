//! Export command

use anyhow::Result;
use umbase_core::recipe::{changed_recipes, discover};
use umbase_core::{ExportPlan, ProcessRunner};
use umbase_schema::Channel;

use crate::ExportArgs;

/// Export the changed (or all) recipes under the channel derived from the ref.
pub fn export(args: &ExportArgs, dry_run: bool) -> Result<()> {
    let channel = Channel::from_ref_name(&args.ref_name);
    let recipes = match &args.all {
        Some(dir) => discover(dir)?,
        None => changed_recipes(&args.files),
    };

    if recipes.is_empty() {
        println!("No recipes to export");
        return Ok(());
    }

    let plan = ExportPlan::build(&recipes, &args.user, &channel)?;
    if plan.is_empty() {
        println!("No exportable versions found");
        return Ok(());
    }

    if dry_run {
        for export in plan.refs() {
            println!(
                "{} export {} {export}",
                args.conan,
                export.recipe_root.display()
            );
        }
        return Ok(());
    }

    plan.execute(&args.conan, &ProcessRunner)?;
    println!("Exported {} reference(s) to channel {channel}", plan.len());
    Ok(())
}
