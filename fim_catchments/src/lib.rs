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
//! filtering of hydrologic catchment polygons and flow lines for a single HUC8 watershed.
//! Catchments are restricted to flows whose HydroID starts with one of the watershed's fossids,
//! merged with their flow attributes, de-duplicated and annotated with the mask polygon they
//! intersect (if any)

use std::{collections::HashMap, path::PathBuf};
use serde::{Serialize, Deserialize};
use geo::{Area, BoundingRect, Buffer, Geometry, Intersects, Rect};
use tracing::{info, debug, warn};

use fim_common::{HydroId, fs::{existing_file, filestem}};
use fim_gdal::vector::{AttrValue, FeatureRecord, FeatureSet, read_feature_set, write_gpkg};

pub mod errors;
use errors::{CatchmentError, Result, invalid_args};

pub const HYDRO_ID: &str = "HydroID";
pub const HUC8: &str = "HUC8";
pub const FOSSID: &str = "fossid";
pub const MASK_ID: &str = "MaskID";
pub const AREA_SQKM: &str = "areasqkm";

/// MaskID of catchments that don't intersect any mask polygon
pub const NO_MASK: i64 = -999;

/// mask polygons are shrunk by this distance (in layer units) so that catchments which only
/// touch a mask boundary are not flagged
pub const MASK_SHRINK_DISTANCE: f64 = 1.0;

/// input and output files of a single filter run
#[derive(Debug,Clone,Serialize,Deserialize)]
pub struct CatchmentFilterArgs {
    pub catchments: PathBuf,
    pub flows: PathBuf,
    pub out_catchments: PathBuf,
    pub out_flows: PathBuf,
    pub wbd: PathBuf,
    pub huc: String,
    pub mask: PathBuf,
}

impl CatchmentFilterArgs {
    pub fn validate (&self) -> Result<()> {
        for p in [&self.catchments, &self.flows, &self.wbd, &self.mask] {
            existing_file(p).map_err(|e| invalid_args(e))?;
        }

        if self.huc.is_empty() || !self.huc.chars().all(|c| c.is_ascii_digit()) {
            return Err( invalid_args( format!("HUC code has to be numeric: {:?}", self.huc)))
        }

        if self.out_catchments == self.out_flows {
            return Err( invalid_args("catchment and flow outputs have to be different files"))
        }
        Ok(())
    }
}

#[derive(Debug,Clone,Copy,PartialEq,Eq)]
pub enum FilterOutcome {
    Written { catchments: usize, flows: usize },
    /// no flow matched the HUC prefixes, nothing was written
    NoMatchingFlows,
}

/// the HydroID prefixes of all WBD rows whose HUC8 contains `huc`.
/// Note the fossid leading zeros have to be dropped for prefix matching
pub fn accepted_prefixes (wbd: &FeatureSet, huc: &str) -> Result<Vec<String>> {
    let mut prefixes: Vec<String> = Vec::new();

    for f in &wbd.features {
        let matches = f.get(HUC8).and_then(|v| v.as_text()).map( |s| s.contains(huc)).unwrap_or(false);
        if matches {
            let fossid = f.get(FOSSID).ok_or( CatchmentError::MissingField{ layer: "wbd", field: FOSSID })?;
            let id = fossid.as_hydro_id()
                .ok_or_else( || CatchmentError::InvalidId{ layer: "wbd", field: FOSSID, value: fossid.to_string() })?;

            let prefix = id.canonical_text();
            if !prefixes.contains(&prefix) {
                prefixes.push( prefix);
            }
        }
    }
    Ok(prefixes)
}

/// keep flows whose HydroID starts with any of the prefixes. Retained flows get their HydroID stored as integer
pub fn filter_flows (flows: &FeatureSet, prefixes: &[String]) -> FeatureSet {
    let mut retained: Vec<FeatureRecord> = Vec::new();

    for f in &flows.features {
        match f.hydro_id(HYDRO_ID) {
            Some(id) => {
                if prefixes.iter().any( |p| id.has_prefix(p)) {
                    let mut f = f.clone();
                    f.set( HYDRO_ID, AttrValue::Int(id.value()));
                    retained.push(f);
                }
            }
            None => debug!("ignoring flow without valid HydroID: {:?}", f.get(HYDRO_ID))
        }
    }

    FeatureSet::new( flows.srs_wkt.clone(), retained)
}

/// inner join of catchments and flow attributes on HydroID. Each (catchment,flow) pair
/// produces one row in catchment order. Flow attributes that already exist in the catchment are not added
pub fn merge_flow_attributes (catchments: &FeatureSet, flows: &FeatureSet) -> Result<Vec<FeatureRecord>> {
    let mut flows_by_id: HashMap<HydroId,Vec<&FeatureRecord>> = HashMap::new();
    for f in &flows.features {
        if let Some(id) = f.hydro_id(HYDRO_ID) {
            flows_by_id.entry(id).or_default().push(f);
        }
    }

    let mut merged: Vec<FeatureRecord> = Vec::new();
    for c in &catchments.features {
        let id = catchment_id(c)?;

        if let Some(matching) = flows_by_id.get(&id) {
            for flow in matching {
                let mut row = c.clone();
                row.set( HYDRO_ID, AttrValue::Int(id.value()));
                for (name,value) in &flow.attributes {
                    if !row.has(name) {
                        row.attributes.push( (name.clone(), value.clone()));
                    }
                }
                merged.push(row);
            }
        }
    }
    Ok(merged)
}

fn catchment_id (c: &FeatureRecord) -> Result<HydroId> {
    let v = c.get(HYDRO_ID).ok_or( CatchmentError::MissingField{ layer: "catchments", field: HYDRO_ID })?;
    v.as_hydro_id().ok_or_else( || CatchmentError::InvalidId{ layer: "catchments", field: HYDRO_ID, value: v.to_string() })
}

/// planar area of a feature geometry in squared layer units
pub fn feature_area (f: &FeatureRecord) -> f64 {
    f.geometry.as_ref().map( |g| g.unsigned_area()).unwrap_or(0.0)
}

/// for each HydroID keep only the row with the largest area. If several rows share the
/// largest area the first one (in input order) is kept
pub fn dedup_largest (catchments: Vec<FeatureRecord>) -> Vec<FeatureRecord> {
    let areas: Vec<f64> = catchments.iter().map(feature_area).collect();

    let mut keep_idx: HashMap<Option<HydroId>,usize> = HashMap::new();
    for (i,c) in catchments.iter().enumerate() {
        let id = c.hydro_id(HYDRO_ID);
        match keep_idx.get(&id) {
            Some(&j) if areas[j] >= areas[i] => {}
            _ => { keep_idx.insert( id, i); }
        }
    }

    let n_dropped = catchments.len() - keep_idx.len();
    if n_dropped > 0 {
        debug!("dropping {n_dropped} smaller duplicate catchments");
    }

    catchments.into_iter().enumerate()
        .filter( |(i,c)| keep_idx.get( &c.hydro_id(HYDRO_ID)) == Some(i))
        .map( |(_,c)| c)
        .collect()
}

/// a negatively buffered mask polygon with its bounding rect
#[derive(Debug,Clone)]
pub struct MaskGeometry {
    pub geometry: Geometry<f64>,
    pub bounds: Option<Rect<f64>>,
}

/// shrink all mask geometries by `distance`. Features without geometry yield `None` so that
/// mask indices stay aligned with the mask layer
pub fn shrink_mask (mask: &FeatureSet, distance: f64) -> Vec<Option<MaskGeometry>> {
    mask.features.iter().map( |f| {
        f.geometry.as_ref().map( |g| {
            let geometry = Geometry::MultiPolygon( g.buffer( -distance));
            let bounds = geometry.bounding_rect();
            MaskGeometry { geometry, bounds }
        })
    }).collect()
}

/// set `MaskID` to the index of the first mask geometry the catchment intersects, or [`NO_MASK`].
/// No other attribute is changed
pub fn assign_mask_ids (catchments: &mut [FeatureRecord], mask: &[Option<MaskGeometry>]) {
    for c in catchments.iter_mut() {
        let mask_id = c.geometry.as_ref()
            .and_then( |g| first_intersecting_mask( g, mask))
            .map( |idx| idx as i64)
            .unwrap_or(NO_MASK);
        c.set( MASK_ID, AttrValue::Int(mask_id));
    }
}

fn first_intersecting_mask (geom: &Geometry<f64>, mask: &[Option<MaskGeometry>]) -> Option<usize> {
    let bounds = geom.bounding_rect()?;

    mask.iter().position( |m| {
        match m {
            Some(m) => {
                match m.bounds {
                    Some(mb) => mb.intersects(&bounds) && geom.intersects(&m.geometry),
                    None => false // empty after shrinking
                }
            }
            None => false
        }
    })
}

/// set `areasqkm` from the planar geometry area, which has to be in square meters
pub fn add_area_sqkm (catchments: &mut [FeatureRecord]) {
    for c in catchments.iter_mut() {
        let area = feature_area(c) / 1_000_000.0;
        c.set( AREA_SQKM, AttrValue::Real(area));
    }
}

/// the in-memory part of the filter: returns `None` if no flow matches the HUC
pub fn filter_catchments (catchments: &FeatureSet, flows: &FeatureSet, wbd: &FeatureSet, mask: &FeatureSet, huc: &str) -> Result<Option<(FeatureSet,FeatureSet)>> {
    let prefixes = accepted_prefixes( wbd, huc)?;
    debug!("accepted HydroID prefixes for {huc}: {prefixes:?}");

    let out_flows = filter_flows( flows, &prefixes);
    if out_flows.is_empty() {
        return Ok(None)
    }

    let merged = merge_flow_attributes( catchments, &out_flows)?;
    let mut out_catchments = dedup_largest( merged);

    info!("removing mask layer...");
    let shrunk = shrink_mask( mask, MASK_SHRINK_DISTANCE);
    assign_mask_ids( &mut out_catchments, &shrunk);
    info!("done removing mask layer...");

    add_area_sqkm( &mut out_catchments);

    Ok( Some(( FeatureSet::new( catchments.srs_wkt.clone(), out_catchments), out_flows )) )
}

/// read the input layers, filter and write the catchment and flow GeoPackages.
/// If no flow matches the HUC nothing is written
pub fn run_filter (args: &CatchmentFilterArgs) -> Result<FilterOutcome> {
    args.validate()?;

    let catchments = read_feature_set( &args.catchments)?;
    let flows = read_feature_set( &args.flows)?;
    let wbd = read_feature_set( &args.wbd)?;
    let mask = read_feature_set( &args.mask)?;
    info!("read {} catchments, {} flows, {} WBD and {} mask features", catchments.len(), flows.len(), wbd.len(), mask.len());

    match filter_catchments( &catchments, &flows, &wbd, &mask, &args.huc)? {
        Some((out_catchments, out_flows)) => {
            write_gpkg( &args.out_catchments, layer_name(&args.out_catchments, "catchments"), &out_catchments)?;
            write_gpkg( &args.out_flows, layer_name(&args.out_flows, "flows"), &out_flows)?;

            Ok( FilterOutcome::Written { catchments: out_catchments.len(), flows: out_flows.len() } )
        }
        None => {
            warn!("no flows match HUC {}, no output written", args.huc);
            Ok( FilterOutcome::NoMatchingFlows )
        }
    }
}

fn layer_name<'a> (path: &'a PathBuf, default: &'a str) -> &'a str {
    filestem(path).unwrap_or(default)
}
