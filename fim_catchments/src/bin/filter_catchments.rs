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
use anyhow::Result;
use tracing::info;
use fim_common::{define_cli, check_cli, init_tracing};
use fim_catchments::{CatchmentFilterArgs, FilterOutcome, run_filter};

define_cli! { ARGS [about="filter_catchments - restrict catchments and flows to a HUC8 and annotate masked catchments"] =
    catchments: PathBuf [help="input catchment polygons", long],
    flows: PathBuf [help="input flow lines", long],
    out_catchments: PathBuf [help="output catchment GeoPackage", long],
    out_flows: PathBuf [help="output flow GeoPackage", long],
    wbd: PathBuf [help="watershed boundary dataset with HUC8 and fossid fields", long],
    huc: String [help="HUC8 code to filter for", long],
    mask: PathBuf [help="mask polygons (ocean, great lakes)", long]
}

fn main () -> Result<()> {
    check_cli!(ARGS);
    init_tracing();

    let args = CatchmentFilterArgs {
        catchments: ARGS.catchments.clone(),
        flows: ARGS.flows.clone(),
        out_catchments: ARGS.out_catchments.clone(),
        out_flows: ARGS.out_flows.clone(),
        wbd: ARGS.wbd.clone(),
        huc: ARGS.huc.clone(),
        mask: ARGS.mask.clone(),
    };

    match run_filter( &args)? {
        FilterOutcome::Written { catchments, flows } => {
            info!("wrote {catchments} catchments to {:?} and {flows} flows to {:?}", args.out_catchments, args.out_flows)
        }
        FilterOutcome::NoMatchingFlows => info!("no matching flows for HUC {}", args.huc)
    }
    Ok(())
}
