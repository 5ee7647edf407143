/*
 * Copyright © 2024, United States Government, as represented by the Administrator of 
 * the National Aeronautics and Space Administration. All rights reserved.
 *
 * The “ODIN” software is licensed under the Apache License, Version 2.0 (the "License"); 
 * you may not use this file except in compliance with the License. You may obtain a copy 
 * of the License at http://www.apache.org/licenses/LICENSE-2.0.
 *
 * Unless required by applicable law or agreed to in writing, software distributed under
 * the License is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND,
 * either express or implied. See the License for the specific language governing permissions
 * and limitations under the License.
 */

use std::path::PathBuf;
use anyhow::{Result, bail};
use tracing::info;
use fim_common::{define_cli, check_cli, init_tracing};
use fim_mannings::{ManningsParams, UnitStatus, run_batch};

define_cli! { ARGS [about="variable_mannings_n - vary the Manning's n values for in-channel vs. floodplain (recalculate Manning's eq for Discharge)"] =
    fim_dir: PathBuf [help="FIM output dir", long],
    bankfull_src_column: String [help="SRC attribute containing the channel vs. floodplain attribute", long],
    mann_n_table: PathBuf [help="path to a csv file containing Manning's n values by feature_id", long],
    hydrotable_suffix: String [help="suffix to append to the new hydroTable csv file (e.g. '_global_0-6_0-11')", long, allow_hyphen_values=true],
    number_of_jobs: usize [help="number of workers", short='j', long, default_value="1"],
    src_plot_option: bool [help="create SRC plots for all HydroIDs (long runtime)", long],
    font: Option<PathBuf> [help="TTF font file for plot labels, defaults to the bundled font", long]
}

fn main () -> Result<()> {
    check_cli!(ARGS);
    init_tracing();

    let params = ManningsParams {
        fim_dir: ARGS.fim_dir.clone(),
        bankfull_src_column: ARGS.bankfull_src_column.clone(),
        mann_n_table: ARGS.mann_n_table.clone(),
        hydrotable_suffix: ARGS.hydrotable_suffix.clone(),
        number_of_jobs: ARGS.number_of_jobs,
        src_plot_option: ARGS.src_plot_option,
        font: ARGS.font.clone(),
    };

    let reports = run_batch( &params)?;

    let n_processed = reports.iter().filter( |r| matches!( r.status, UnitStatus::Processed{..})).count();
    let n_skipped = reports.iter().filter( |r| matches!( r.status, UnitStatus::Skipped(_))).count();
    let failed: Vec<&str> = reports.iter().filter( |r| r.is_failed()).map( |r| r.huc.as_str()).collect();
    info!("{n_processed} hucs processed, {n_skipped} skipped, {} failed", failed.len());

    if !failed.is_empty() {
        bail!("failed hucs: {}", failed.join(", "))
    }
    Ok(())
}
