//! Baseline table listing command.

use crate::cli::common::{print_json, CliResult};
use crate::keymap::baseline::{BASELINE_KEYMAP, VENDOR_KEY_MAP};
use clap::Args;
use serde::Serialize;

/// List the embedded ZIE baseline keymap or the PCOMM key mappings
#[derive(Debug, Clone, Args)]
pub struct BaselineArgs {
    /// List PCOMM to ZIE key mappings instead of baseline defaults
    #[arg(long)]
    pub mappings: bool,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Serialize)]
struct BaselineRow {
    key: &'static str,
    value: &'static str,
}

#[derive(Debug, Serialize)]
struct MappingRow {
    vendor: &'static str,
    baseline: &'static str,
}

impl BaselineArgs {
    /// Execute the baseline command
    pub fn execute(&self) -> CliResult<()> {
        if self.mappings {
            if self.json {
                let rows: Vec<MappingRow> = VENDOR_KEY_MAP
                    .iter()
                    .map(|&(vendor, baseline)| MappingRow { vendor, baseline })
                    .collect();
                return print_json(&rows);
            }
            for (vendor, baseline) in VENDOR_KEY_MAP {
                println!("{vendor:<8} -> {baseline}");
            }
            return Ok(());
        }

        if self.json {
            let rows: Vec<BaselineRow> = BASELINE_KEYMAP
                .iter()
                .map(|&(key, value)| BaselineRow { key, value })
                .collect();
            return print_json(&rows);
        }
        for (key, value) in BASELINE_KEYMAP {
            println!("{key}={value}");
        }

        Ok(())
    }
}
