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

use std::path::{Path, PathBuf};
use gdal::{Dataset, DriverManager, GeoTransform, GeoTransformEx};
use gdal::programs::raster::build_vrt;
use gdal::raster::{Buffer, RasterCreationOptions};
use gdal::spatial_ref::SpatialRef;
use tracing::debug;

use crate::errors::{Result, misc_error};

/// a single band Float32 raster held in memory (row-major, north-up)
#[derive(Debug,Clone,PartialEq)]
pub struct Float32Grid {
    pub cols: usize,
    pub rows: usize,
    pub geo_transform: GeoTransform,
    pub no_data: Option<f64>,
    pub data: Vec<f32>,
}

impl Float32Grid {
    pub fn new (cols: usize, rows: usize, geo_transform: GeoTransform, no_data: Option<f64>, data: Vec<f32>) -> Result<Self> {
        if data.len() != cols * rows {
            return Err( misc_error( format!("grid data length {} does not match {}x{}", data.len(), cols, rows)))
        }
        Ok( Float32Grid { cols, rows, geo_transform, no_data, data } )
    }

    pub fn filled (cols: usize, rows: usize, geo_transform: GeoTransform, value: f32) -> Self {
        Float32Grid { cols, rows, geo_transform, no_data: None, data: vec![value; cols*rows] }
    }

    #[inline]
    pub fn value (&self, col: usize, row: usize) -> f32 {
        self.data[row * self.cols + col]
    }

    pub fn is_no_data (&self, v: f32) -> bool {
        match self.no_data {
            Some(nd) => (v as f64) == nd || (nd.is_nan() && v.is_nan()),
            None => false
        }
    }

    /// world coordinates of the pixel center
    pub fn pixel_center (&self, col: usize, row: usize) -> (f64,f64) {
        self.geo_transform.apply( col as f64 + 0.5, row as f64 + 0.5)
    }

    /// fractional pixel position of world coordinates
    pub fn pixel_of (&self, x: f64, y: f64) -> Result<(f64,f64)> {
        let inv = self.geo_transform.invert()?;
        Ok( inv.apply( x, y) )
    }
}

/// read the first band of a dataset as Float32 grid
pub fn read_float32_grid (ds: &Dataset) -> Result<Float32Grid> {
    let band = ds.rasterband(1)?;
    let no_data = band.no_data_value();
    let buf: Buffer<f32> = band.read_band_as::<f32>()?;
    let ((cols,rows), data) = buf.into_shape_and_vec();

    Float32Grid::new( cols, rows, ds.geo_transform()?, no_data, data)
}

/// write grid as LZW compressed single band Float32 GeoTIFF
pub fn write_float32_tiff (path: impl AsRef<Path>, grid: &Float32Grid, srs: &SpatialRef) -> Result<()> {
    let path = path.as_ref();
    let driver = DriverManager::get_driver_by_name("GTiff")?;

    let mut options = RasterCreationOptions::new();
    options.add_name_value("COMPRESS", "LZW")?;
    options.add_name_value("TILED", "YES")?;

    let mut ds = driver.create_with_band_type_with_options::<f32,_>( path, grid.cols, grid.rows, 1, &options)?;
    ds.set_geo_transform( &grid.geo_transform)?;
    ds.set_spatial_ref( srs)?;

    let mut band = ds.rasterband(1)?;
    if let Some(nd) = grid.no_data {
        band.set_no_data_value( Some(nd))?;
    }
    let mut buf = Buffer::new( (grid.cols, grid.rows), grid.data.clone());
    band.write( (0,0), (grid.cols, grid.rows), &mut buf)?;
    debug!("wrote {}x{} grid to {:?}", grid.cols, grid.rows, path);

    Ok(())
}

/// merge raster files into a single GeoTIFF by means of an in-memory VRT
pub fn build_mosaic (inputs: &[PathBuf], output: impl AsRef<Path>) -> Result<()> {
    if inputs.is_empty() {
        return Err( misc_error("no mosaic input rasters"))
    }

    let mut datasets: Vec<Dataset> = Vec::with_capacity( inputs.len());
    for p in inputs {
        datasets.push( Dataset::open(p)?);
    }

    let vrt = build_vrt( None, &datasets, None)?;
    let driver = DriverManager::get_driver_by_name("GTiff")?;
    vrt.create_copy( &driver, output.as_ref(), &RasterCreationOptions::new())?;

    Ok(())
}
