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
//! retrieval of terrain data for area-of-interest polygons from the public elevation tile archive
//! (https://registry.opendata.aws/terrain-tiles/). For each input polygon we download the covering
//! GeoTIFF tiles, mosaic them, reproject into the SRS of the input, optionally convert
//! elevations to feet and clip to the polygon

use std::{path::PathBuf, time::Duration};
use serde::{Serialize, Deserialize};
use geo::{BoundingRect, Geometry};
use reqwest::blocking::Client;
use tracing::{info, debug};

use fim_common::{BoundingBox, fs::{ensure_writable_dir, existing_file, remove_file_if_exists}, net::{http_client, download_url}};
use fim_gdal::{
    Dataset, SpatialRef, srs_from_wkt, srs_lon_lat, reproject_geometry,
    vector::read_feature_set,
    raster::{build_mosaic, read_float32_grid, write_float32_tiff},
    warp::warp_to_srs
};

pub mod errors;
pub mod tiles;
pub mod clip;

use errors::{Result, TerrainError, invalid_config};
use tiles::{MAX_ZOOM, TileRange, tile_url};
use clip::{clip_and_scale, NO_DATA, FEET_PER_METER};

pub const DEFAULT_URL_BASE: &str = "https://s3.amazonaws.com/elevation-tiles-prod/geotiff";

#[derive(Debug,Clone,Serialize,Deserialize,PartialEq)]
#[serde(default)]
pub struct TerrainConfig {
    /// vector file with area-of-interest polygons (e.g. a shapefile)
    pub input_path: PathBuf,

    /// where tiles, mosaics and results are stored
    pub output_dir: PathBuf,

    pub zoom: u8,

    /// scale elevations from meters to feet
    pub convert_to_feet: bool,

    pub url_base: String,

    /// keep the unclipped mosaic of each polygon
    pub keep_mosaic: bool,

    /// tile request timeout. None means no timeout
    pub http_timeout: Option<Duration>,
}

impl Default for TerrainConfig {
    fn default () -> Self {
        TerrainConfig {
            input_path: PathBuf::new(),
            output_dir: PathBuf::from("."),
            zoom: MAX_ZOOM,
            convert_to_feet: true,
            url_base: DEFAULT_URL_BASE.to_string(),
            keep_mosaic: true,
            http_timeout: None,
        }
    }
}

impl TerrainConfig {
    pub fn validate (&self) -> Result<()> {
        if self.zoom > MAX_ZOOM {
            return Err( invalid_config( format!("zoom level {} exceeds max {}", self.zoom, MAX_ZOOM)))
        }
        if !(self.url_base.starts_with("http://") || self.url_base.starts_with("https://")) {
            return Err( invalid_config( format!("not a http(s) url base: {}", self.url_base)))
        }
        existing_file( &self.input_path).map_err(|e| invalid_config(e))?;
        Ok(())
    }

    pub fn scale (&self) -> f64 {
        if self.convert_to_feet { FEET_PER_METER } else { 1.0 }
    }

    pub fn tile_path (&self, poly_idx: usize, n: usize) -> PathBuf {
        self.output_dir.join( format!("AWS_{poly_idx}_TileImage_{n}.tif"))
    }

    pub fn mosaic_path (&self, poly_idx: usize) -> PathBuf {
        self.output_dir.join( format!("AWS_{poly_idx}_dem_merge.tif"))
    }

    pub fn result_path (&self, poly_idx: usize) -> PathBuf {
        self.output_dir.join( format!("AWS_{poly_idx}_dem_clip_project.tif"))
    }
}

/// lon/lat bounds of a geometry
pub fn geo_bounds (geom: &Geometry<f64>) -> Option<BoundingBox<f64>> {
    geom.bounding_rect().map( |r| BoundingBox::new( r.min().x, r.min().y, r.max().x, r.max().y))
}

/// the URLs of all tiles that cover the bounding box of a lon/lat geometry
pub fn tile_urls_for (geo_geom: &Geometry<f64>, zoom: u8, url_base: &str) -> Vec<String> {
    match geo_bounds( geo_geom) {
        Some(bbox) => TileRange::for_bounds( &bbox, zoom).tiles().iter().map( |t| tile_url( url_base, t)).collect(),
        None => Vec::new()
    }
}

/// download tiles into `AWS_<idx>_TileImage_<n>.tif` files. Any failed download aborts
pub fn download_tiles (client: &Client, config: &TerrainConfig, poly_idx: usize, urls: &[String]) -> Result<Vec<PathBuf>> {
    let mut paths: Vec<PathBuf> = Vec::with_capacity( urls.len());
    for (i,url) in urls.iter().enumerate() {
        let path = config.tile_path( poly_idx, i+1);
        let len = download_url( client, url, &path)?;
        debug!("downloaded {url} ({len} bytes)");
        paths.push( path);
    }
    Ok(paths)
}

/// create the clipped and reprojected terrain raster for a single polygon (in the SRS `srs`)
pub fn process_polygon (client: &Client, config: &TerrainConfig, poly_idx: usize, polygon: &Geometry<f64>, srs: &SpatialRef) -> Result<PathBuf> {
    let geo_polygon = reproject_geometry( polygon, srs, &srs_lon_lat()?)?;
    let urls = tile_urls_for( &geo_polygon, config.zoom, &config.url_base);
    info!("polygon {poly_idx}: retrieving {} tiles at zoom level {}", urls.len(), config.zoom);

    let tile_paths = download_tiles( client, config, poly_idx, &urls)?;

    let mosaic_path = config.mosaic_path( poly_idx);
    let res = build_mosaic( &tile_paths, &mosaic_path);
    for p in &tile_paths {
        remove_file_if_exists(p)?;
    }
    res?;

    let grid = {
        let mosaic = Dataset::open( &mosaic_path).map_err( fim_gdal::errors::gdal_error)?;
        let warped = warp_to_srs( &mosaic, srs, NO_DATA)?;
        read_float32_grid( &warped)?
    };

    let clipped = clip_and_scale( &grid, polygon, config.scale())?;
    let result_path = config.result_path( poly_idx);
    write_float32_tiff( &result_path, &clipped, srs)?;

    if !config.keep_mosaic {
        remove_file_if_exists( &mosaic_path)?;
    }
    info!("polygon {poly_idx}: terrain written to {:?}", result_path);

    Ok(result_path)
}

/// process all polygons of the configured input file in order, aborting on the first error
pub fn run_terrain (config: &TerrainConfig) -> Result<Vec<PathBuf>> {
    config.validate()?;
    ensure_writable_dir( &config.output_dir)?;

    let aoi = read_feature_set( &config.input_path)?;
    let wkt = aoi.srs_wkt.as_ref().ok_or_else( || TerrainError::MissingSrs( config.input_path.to_string_lossy().to_string()))?;
    let srs = srs_from_wkt( wkt)?;
    let client = http_client( config.http_timeout)?;

    let mut results: Vec<PathBuf> = Vec::with_capacity( aoi.len());
    for (i,f) in aoi.features.iter().enumerate() {
        let polygon = f.geometry.as_ref().ok_or( TerrainError::NoGeometry(i))?;
        results.push( process_polygon( &client, config, i, polygon, &srs)?);
    }
    Ok(results)
}
