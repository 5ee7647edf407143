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

//! recalculation of synthetic rating curves (SRC) with variable Manning's n. For each hydrologic unit
//! directory of a FIM output we merge per-feature channel and floodplain roughness values into the
//! bankfull rating curve table, compute a composite roughness from the channel volume ratio, recompute
//! discharge with Manning's equation and write the updated rating curve and a new hydro table

use std::path::{Path, PathBuf};
use rayon::prelude::*;
use ab_glyph::FontVec;
use tracing::{info, warn, error, debug};

use fim_common::fs::{existing_file, sorted_sub_dirs};

pub mod errors;
pub mod table;
pub mod plot;

use errors::{Result, invalid_args, op_failed};
use table::{Table, MergeKey};

// rating curve (SRC) columns
pub const FEATURE_ID: &str = "feature_id";
pub const HYDRO_ID: &str = "HydroID";
pub const CHANN_VOLUME_RATIO: &str = "chann_volume_ratio";
pub const SLOPE: &str = "SLOPE";
pub const STAGE: &str = "Stage";
pub const STAGE_1_5: &str = "Stage_1_5";
pub const HYDRAULIC_RADIUS: &str = "HydraulicRadius (m)";
pub const HYDRAULIC_RADIUS_BATHY: &str = "HydraulicRadius (m)_bathy_adj";
pub const WET_AREA: &str = "WetArea (m2)";
pub const WET_AREA_BATHY: &str = "WetArea (m2)_bathy_adj";
pub const DISCHARGE: &str = "Discharge (m3s-1)";
pub const DISCHARGE_VAR_MANN: &str = "Discharge (m3s-1)_varMann";
pub const LOOKUP_MANNING_N: &str = "lookup_ManningN";
pub const COMP_MANNING_N: &str = "comp_ManningN";

// roughness table columns, also the values of the bankfull classification column
pub const CHANNEL: &str = "channel";
pub const FLOODPLAIN: &str = "floodplain";

// hydro table columns
pub const HT_STAGE: &str = "stage";
pub const HT_DISCHARGE: &str = "discharge_cms";

pub const SRC_FILE_NAME: &str = "src_full_crosswalked_bankfull.csv";
pub const HYDRO_TABLE_FILE_NAME: &str = "hydroTable.csv";
pub const PLOT_DIR_NAME: &str = "src_plots";

pub fn hydro_table_file_name (suffix: &str) -> String {
    format!("hydroTable{suffix}.csv")
}

/// blend of channel and floodplain roughness by the channel volume ratio
pub fn composite_roughness (chann_volume_ratio: f64, channel_n: f64, floodplain_n: f64) -> f64 {
    chann_volume_ratio * channel_n + (1.0 - chann_volume_ratio) * floodplain_n
}

/// Manning's equation `Q = A * R^(2/3) * S^(1/2) / n`
pub fn manning_discharge (wet_area: f64, hydraulic_radius: f64, slope: f64, mannings_n: f64) -> f64 {
    wet_area * hydraulic_radius.powf(2.0/3.0) * slope.sqrt() / mannings_n
}

/// the bathymetry adjusted column if present, the plain one otherwise
fn preferred_column<'a> (table: &Table, adjusted: &'a str, plain: &'a str) -> &'a str {
    if table.has_column(adjusted) { adjusted } else { plain }
}

/// merge the roughness table into the rating curve table and add the `lookup_ManningN`, `comp_ManningN` and
/// `Discharge (m3s-1)_varMann` columns. Returns the new table and the number of rows without composite roughness
pub fn apply_variable_roughness (src: &Table, mann: &Table, bankfull_column: &str) -> Result<(Table,usize)> {
    let mut df = src.left_merge( mann, &[FEATURE_ID], MergeKey::Text)?;

    let class_col = df.require_column( bankfull_column)?;
    let channel_col = df.require_column( CHANNEL)?;
    let floodplain_col = df.require_column( FLOODPLAIN)?;

    // rows with other classifications keep what they had
    let lookup_col = df.column_index( LOOKUP_MANNING_N);
    let lookup: Vec<Option<String>> = (0..df.len()).map( |r| {
        match df.cell(r, class_col) {
            Some(CHANNEL) => df.cell(r, channel_col).map( |s| s.to_string()),
            Some(FLOODPLAIN) => df.cell(r, floodplain_col).map( |s| s.to_string()),
            _ => lookup_col.and_then( |c| df.cell(r,c)).map( |s| s.to_string())
        }
    }).collect();
    df.set_column( LOOKUP_MANNING_N, lookup)?;

    let ratio = df.numbers( CHANN_VOLUME_RATIO)?;
    let channel = df.numbers( CHANNEL)?;
    let floodplain = df.numbers( FLOODPLAIN)?;
    let comp_n: Vec<Option<f64>> = (0..df.len()).map( |r| {
        Some( composite_roughness( ratio[r]?, channel[r]?, floodplain[r]?))
    }).collect();
    let missing = comp_n.iter().filter( |v| v.is_none()).count();
    df.set_number_column( COMP_MANNING_N, &comp_n)?;

    let wet_area = df.numbers( preferred_column( &df, WET_AREA_BATHY, WET_AREA))?;
    let hydr_radius = df.numbers( preferred_column( &df, HYDRAULIC_RADIUS_BATHY, HYDRAULIC_RADIUS))?;
    let slope = df.numbers( SLOPE)?;
    let discharge: Vec<Option<f64>> = (0..df.len()).map( |r| {
        let q = manning_discharge( wet_area[r]?, hydr_radius[r]?, slope[r]?, comp_n[r]?);
        if q.is_finite() { Some(q) } else { None }
    }).collect();
    df.set_number_column( DISCHARGE_VAR_MANN, &discharge)?;

    Ok( (df, missing) )
}

/// replace the discharge of the hydro table with the recomputed discharge of the rating curve,
/// matched by (HydroID, stage)
pub fn update_hydro_table (htable: &Table, src: &Table) -> Result<Table> {
    let mut trimmed = src.select( &[HYDRO_ID, STAGE, DISCHARGE_VAR_MANN])?;
    trimmed.rename_column( STAGE, HT_STAGE)?;
    trimmed.rename_column( DISCHARGE_VAR_MANN, HT_DISCHARGE)?;

    let mut ht = htable.clone();
    ht.drop_column( HT_DISCHARGE);
    ht.left_merge( &trimmed, &[HYDRO_ID, HT_STAGE], MergeKey::Numeric)
}

/* #region batch processing ***************************************************************************/

#[derive(Debug,Clone)]
pub struct ManningsParams {
    /// directory with one sub-directory per hydrologic unit
    pub fim_dir: PathBuf,

    /// SRC column with the "channel" / "floodplain" classification
    pub bankfull_src_column: String,

    /// CSV with feature_id, channel and floodplain roughness values
    pub mann_n_table: PathBuf,

    /// appended to the name of the new hydro table (e.g. "_global_0-6_0-11")
    pub hydrotable_suffix: String,

    pub number_of_jobs: usize,
    pub src_plot_option: bool,

    /// TTF font for plot labels. The bundled default font is used if this is None
    pub font: Option<PathBuf>,
}

impl ManningsParams {
    pub fn validate (&self) -> Result<()> {
        if !self.fim_dir.is_dir() { return Err( invalid_args( format!("FIM output dir not found: {:?}", self.fim_dir))) }
        if !self.mann_n_table.is_file() { return Err( invalid_args( format!("Manning's n table not found: {:?}", self.mann_n_table))) }
        if self.bankfull_src_column.is_empty() { return Err( invalid_args("empty bankfull SRC column name")) }
        if self.number_of_jobs < 1 { return Err( invalid_args("number of jobs has to be at least 1")) }
        if let Some(font) = &self.font {
            if !font.is_file() { return Err( invalid_args( format!("font not found: {font:?}"))) }
        }
        Ok(())
    }
}

#[derive(Debug,Clone,PartialEq)]
pub enum UnitStatus {
    Processed { rows: usize, missing_roughness: usize, plots: usize },
    Skipped(String),
    Failed(String),
}

#[derive(Debug,Clone,PartialEq)]
pub struct UnitReport {
    pub huc: String,
    pub status: UnitStatus,
}

impl UnitReport {
    pub fn is_failed (&self) -> bool { matches!( self.status, UnitStatus::Failed(_)) }
}

/// the hydrologic unit directories of a FIM output dir in ascending order. Log directories are skipped
pub fn discover_units (fim_dir: impl AsRef<Path>) -> Result<Vec<String>> {
    let units = sorted_sub_dirs( fim_dir)?
        .into_iter()
        .filter( |name| name != "logs" && !name.ends_with("log"))
        .collect();
    Ok(units)
}

/// recompute rating curve and hydro table of a single unit. Units without rating curve are skipped
pub fn process_unit (params: &ManningsParams, mann: &Table, font: Option<&FontVec>, huc: &str) -> UnitReport {
    let unit_dir = params.fim_dir.join( huc);
    let src_path = unit_dir.join( SRC_FILE_NAME);

    let status = if !src_path.is_file() {
        let msg = format!("{huc} --> can not find the {SRC_FILE_NAME} in the fim output dir: {}", unit_dir.display());
        info!("{msg}");
        UnitStatus::Skipped(msg)

    } else {
        match recompute_unit( params, mann, font, huc, &unit_dir, &src_path) {
            Ok(status) => status,
            Err(e) => {
                error!("processing {huc} failed: {e}");
                UnitStatus::Failed( e.to_string())
            }
        }
    };

    UnitReport { huc: huc.to_string(), status }
}

fn recompute_unit (params: &ManningsParams, mann: &Table, font: Option<&FontVec>, huc: &str, unit_dir: &Path, src_path: &Path) -> Result<UnitStatus> {
    let src = Table::read_csv( src_path)?;
    let (src, missing_roughness) = apply_variable_roughness( &src, mann, &params.bankfull_src_column)?;
    if missing_roughness > 0 {
        warn!("!!!!Missing values in the var_ManningN merge {huc} --> missing entries= {missing_roughness}");
    }

    replace_csv( &src, src_path)?;

    let htable = Table::read_csv( existing_file( unit_dir.join( HYDRO_TABLE_FILE_NAME))?)?;
    let htable = update_hydro_table( &htable, &src)?;
    let ht_path = unit_dir.join( hydro_table_file_name( &params.hydrotable_suffix));
    htable.write_csv( &ht_path)?;
    debug!("wrote {}", ht_path.display());

    let plots = if params.src_plot_option {
        let font = font.ok_or_else( || op_failed("no font for SRC plot labels"))?;
        plot::generate_src_plots( &src, &unit_dir.join( PLOT_DIR_NAME), font)?
    } else { 0 };

    Ok( UnitStatus::Processed { rows: src.len(), missing_roughness, plots } )
}

/// write to a sibling temp file first so that a failed write does not leave a truncated table
fn replace_csv (table: &Table, path: &Path) -> Result<()> {
    let tmp_path = path.with_extension("csv.tmp");
    table.write_csv( &tmp_path)?;
    std::fs::rename( &tmp_path, path)?;
    Ok(())
}

/// process all units of `params.fim_dir` with a pool of `params.number_of_jobs` threads
pub fn run_batch (params: &ManningsParams) -> Result<Vec<UnitReport>> {
    params.validate()?;

    let mann = Table::read_csv( &params.mann_n_table)?;
    // plots require a label font
    let font = if params.src_plot_option {
        let font = match &params.font {
            Some(path) => plot::load_font( path)?,
            None => plot::load_default_font()?
        };
        Some(font)
    } else { None };

    let units = discover_units( &params.fim_dir)?;
    for huc in &units { info!("Processing: {huc}") }
    info!("Applying variable Manning's n to SRC calcs for {} hucs using {} jobs", units.len(), params.number_of_jobs);

    let pool = rayon::ThreadPoolBuilder::new().num_threads( params.number_of_jobs).build()?;
    let reports: Vec<UnitReport> = pool.install( || {
        units.par_iter().map( |huc| process_unit( params, &mann, font.as_ref(), huc)).collect()
    });

    Ok(reports)
}

/* #endregion batch processing */
