//! Device-inventory command handlers.
//!
//! Every mutation persists the inventory file and reprints the headline
//! totals, so the estimate always reflects the last edit.

use tabled::Tabled;

use epscale_core::{DeviceCategory, Inventory, recommended_eps};

use crate::cli::{DevicesArgs, DevicesCommand, GlobalOpts};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct CategoryRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Type")]
    device_type: String,
    #[tabled(rename = "Source")]
    source: String,
    #[tabled(rename = "Count")]
    count: u32,
    #[tabled(rename = "Rate")]
    rate: String,
    #[tabled(rename = "EPS")]
    eps: String,
}

impl CategoryRow {
    fn from_category(c: &DeviceCategory, inventory: &Inventory) -> Self {
        Self {
            id: c.id.clone(),
            name: c.name.clone(),
            device_type: c.device_type.to_string(),
            source: c.log_source_type.to_string(),
            count: c.count,
            rate: util::fmt_num(c.base_eps_multiplier),
            eps: util::fmt_num(c.eps(inventory.multiplier)),
        }
    }
}

fn detail(c: &DeviceCategory) -> String {
    [
        format!("ID:          {}", c.id),
        format!("Name:        {}", c.name),
        format!("Type:        {}", c.device_type),
        format!("Log source:  {}", c.log_source_type),
        format!("Count:       {}", c.count),
        format!("Rate:        {} EPS/unit", util::fmt_num(c.base_eps_multiplier)),
        format!(
            "Description: {}",
            if c.description.is_empty() { "-" } else { &c.description }
        ),
    ]
    .join("\n")
}

// ── Handler ─────────────────────────────────────────────────────────

#[allow(clippy::too_many_lines)]
pub fn handle(args: DevicesArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let mut inventory = util::load_inventory(global)?;

    match args.command {
        DevicesCommand::List => {
            let out = output::render_list(
                &global.output,
                &inventory.categories,
                |c| CategoryRow::from_category(c, &inventory),
                |c| c.id.clone(),
            );
            output::print_output(&out, global.quiet);
            util::print_totals(&inventory, global);
            Ok(())
        }

        DevicesCommand::Show { id } => {
            let category = inventory.get(&id).ok_or_else(|| CliError::NotFound {
                resource_type: "device category".into(),
                identifier: id,
                list_command: "devices list".into(),
            })?;
            let out =
                output::render_single(&global.output, category, detail, |c| c.id.clone());
            output::print_output(&out, global.quiet);
            Ok(())
        }

        DevicesCommand::SetCount { id, count } => {
            inventory.set_count(&id, count)?;
            util::save_inventory(global, &inventory)?;
            if !global.quiet {
                eprintln!("Set count of '{id}' to {count}");
            }
            util::print_totals(&inventory, global);
            Ok(())
        }

        DevicesCommand::SetRate { id, rate } => {
            inventory.set_rate(&id, rate)?;
            util::save_inventory(global, &inventory)?;
            if !global.quiet {
                // Report the stored value; negative input clamps to zero.
                let stored = inventory.get(&id).map_or(rate, |c| c.base_eps_multiplier);
                eprintln!("Set rate of '{id}' to {} EPS/unit", util::fmt_num(stored));
            }
            util::print_totals(&inventory, global);
            Ok(())
        }

        DevicesCommand::SetSource { id, source } => {
            inventory.set_log_source(&id, util::log_source(source))?;
            util::save_inventory(global, &inventory)?;
            if !global.quiet {
                let rate = inventory.get(&id).map_or(0.0, |c| c.base_eps_multiplier);
                eprintln!(
                    "Changed log source of '{id}'; rate re-seeded to {} EPS/unit",
                    util::fmt_num(rate)
                );
            }
            util::print_totals(&inventory, global);
            Ok(())
        }

        DevicesCommand::SetMultiplier { value } => {
            inventory.set_multiplier(value);
            util::save_inventory(global, &inventory)?;
            if !global.quiet {
                // Out-of-range input clamps into [0.5, 2.0].
                eprintln!("Traffic multiplier set to {}", inventory.multiplier.value());
            }
            util::print_totals(&inventory, global);
            Ok(())
        }

        DevicesCommand::Add {
            id,
            name,
            class,
            source,
            count,
            rate,
            description,
        } => {
            let device_type = util::device_type(class);
            let log_source_type = util::log_source(source);
            let category = DeviceCategory {
                id: id.unwrap_or_else(|| uuid::Uuid::new_v4().to_string()),
                name,
                device_type,
                log_source_type,
                count,
                base_eps_multiplier: rate
                    .unwrap_or_else(|| recommended_eps(device_type, log_source_type)),
                description,
            };
            let added_id = category.id.clone();
            inventory.add(category)?;
            util::save_inventory(global, &inventory)?;
            if !global.quiet {
                eprintln!("Added category '{added_id}'");
            }
            util::print_totals(&inventory, global);
            Ok(())
        }

        DevicesCommand::Remove { id } => {
            if !util::confirm(&format!("Remove category '{id}'?"), global.yes)? {
                return Ok(());
            }
            let removed = inventory.remove(&id)?;
            util::save_inventory(global, &inventory)?;
            if !global.quiet {
                eprintln!("Removed category '{}' ({})", removed.id, removed.name);
            }
            util::print_totals(&inventory, global);
            Ok(())
        }

        DevicesCommand::Reset => {
            if !util::confirm("Restore the seed catalog and default multiplier?", global.yes)? {
                return Ok(());
            }
            inventory.reset();
            util::save_inventory(global, &inventory)?;
            if !global.quiet {
                eprintln!("Inventory reset to the seed catalog");
            }
            util::print_totals(&inventory, global);
            Ok(())
        }
    }
}
