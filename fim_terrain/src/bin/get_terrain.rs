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

use std::{path::PathBuf, time::Duration};
use anyhow::Result;
use tracing::info;
use fim_common::{define_cli, check_cli, init_tracing, config::load_config};
use fim_terrain::{TerrainConfig, run_terrain};

define_cli! { ARGS [about="get_terrain - retrieve clipped and reprojected terrain rasters for area-of-interest polygons"] =
    config: Option<PathBuf> [help="RON file with TerrainConfig", long, short],
    input_path: Option<PathBuf> [help="vector file with area-of-interest polygons", long, short],
    output_dir: Option<PathBuf> [help="directory for tiles and results", long, short],
    zoom: Option<u8> [help="tile zoom level (max 14)", long, short],
    convert_to_feet: Option<bool> [help="convert elevations from meters to feet", long],
    keep_mosaic: Option<bool> [help="keep the unclipped tile mosaic", long],
    url_base: Option<String> [help="terrain tile server URL base", long],
    http_timeout: Option<u64> [help="tile request timeout in seconds", long]
}

fn main () -> Result<()> {
    check_cli!(ARGS);
    init_tracing();

    let mut config: TerrainConfig = match &ARGS.config {
        Some(path) => load_config( path)?,
        None => TerrainConfig::default()
    };

    if let Some(p) = &ARGS.input_path { config.input_path = p.clone() }
    if let Some(p) = &ARGS.output_dir { config.output_dir = p.clone() }
    if let Some(z) = ARGS.zoom { config.zoom = z }
    if let Some(b) = ARGS.convert_to_feet { config.convert_to_feet = b }
    if let Some(b) = ARGS.keep_mosaic { config.keep_mosaic = b }
    if let Some(u) = &ARGS.url_base { config.url_base = u.clone() }
    if let Some(secs) = ARGS.http_timeout { config.http_timeout = Some(Duration::from_secs(secs)) }

    let results = run_terrain( &config)?;
    info!("created {} terrain rasters", results.len());
    Ok(())
}
