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

use geo::{BoundingRect, Contains, Geometry, Point};
use fim_gdal::{geotransform_from_upper_left, GeoTransformEx, raster::Float32Grid};

use crate::errors::{Result, TerrainError};

/// nodata value of clipped terrain rasters
pub const NO_DATA: f64 = -9999.0;

pub const FEET_PER_METER: f64 = 3.28084;

/// crop `grid` to the pixel window covering the polygon bounds, set all cells whose center
/// is outside the polygon (or that are nodata in the source) to [`NO_DATA`] and multiply
/// the remaining values by `scale`. The grid has to be north-up
pub fn clip_and_scale (grid: &Float32Grid, polygon: &Geometry<f64>, scale: f64) -> Result<Float32Grid> {
    let bounds = polygon.bounding_rect().ok_or_else(|| TerrainError::NoOverlap("empty polygon".to_string()))?;

    let (c0,r0,c1,r1) = pixel_window( grid, bounds.min().x, bounds.min().y, bounds.max().x, bounds.max().y)?;
    let cols = c1 - c0;
    let rows = r1 - r0;

    let gt = &grid.geo_transform;
    let (x_ul, y_ul) = gt.apply( c0 as f64, r0 as f64);
    let clip_gt = geotransform_from_upper_left( x_ul, y_ul, gt[1], gt[5]);

    let mut data: Vec<f32> = Vec::with_capacity( cols * rows);
    for r in r0..r1 {
        for c in c0..c1 {
            let v = grid.value(c,r);
            let (x,y) = grid.pixel_center(c,r);

            if v.is_nan() || grid.is_no_data(v) || !polygon.contains( &Point::new(x,y)) {
                data.push( NO_DATA as f32);
            } else {
                data.push( (v as f64 * scale) as f32);
            }
        }
    }

    Ok( Float32Grid::new( cols, rows, clip_gt, Some(NO_DATA), data)? )
}

/// the [c0,c1) x [r0,r1) pixel window of the grid that overlaps the given world bounds
fn pixel_window (grid: &Float32Grid, x_min: f64, y_min: f64, x_max: f64, y_max: f64) -> Result<(usize,usize,usize,usize)> {
    let corners = [
        grid.pixel_of( x_min, y_max)?,
        grid.pixel_of( x_max, y_max)?,
        grid.pixel_of( x_min, y_min)?,
        grid.pixel_of( x_max, y_min)?,
    ];

    let px_min = corners.iter().map(|p| p.0).fold( f64::INFINITY, f64::min);
    let px_max = corners.iter().map(|p| p.0).fold( f64::NEG_INFINITY, f64::max);
    let py_min = corners.iter().map(|p| p.1).fold( f64::INFINITY, f64::min);
    let py_max = corners.iter().map(|p| p.1).fold( f64::NEG_INFINITY, f64::max);

    let c0 = px_min.floor().max(0.0) as usize;
    let r0 = py_min.floor().max(0.0) as usize;
    let c1 = (px_max.ceil().max(0.0) as usize).min( grid.cols);
    let r1 = (py_max.ceil().max(0.0) as usize).min( grid.rows);

    if c0 >= c1 || r0 >= r1 {
        Err( TerrainError::NoOverlap( format!("[{x_min},{y_min},{x_max},{y_max}]")))
    } else {
        Ok( (c0,r0,c1,r1) )
    }
}
