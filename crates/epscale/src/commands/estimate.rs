//! Estimate command handler.

use crate::cli::{EstimateArgs, GlobalOpts};
use crate::error::CliError;
use crate::output;

use super::util;

pub fn handle(args: EstimateArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let mut inventory = util::load_inventory(global)?;

    // One-shot override; not persisted back to the inventory file.
    if let Some(multiplier) = args.multiplier {
        inventory.set_multiplier(multiplier);
    }

    let result = inventory.estimate();
    let out = output::render_single(&global.output, &result, util::format_result, |r| {
        util::fmt_num(r.total_eps)
    });
    output::print_output(&out, global.quiet);
    Ok(())
}
