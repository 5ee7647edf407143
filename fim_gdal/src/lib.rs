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
pub mod errors;
pub mod vector;
pub mod raster;
pub mod warp;

use geo::{Geometry, Rect, coord};

// re-exported so that client crates don't need a direct gdal dependency
pub use gdal::{self, Driver, DriverManager, Dataset, GeoTransform, GeoTransformEx, cpl::CslStringList};
pub use gdal::spatial_ref::{AxisMappingStrategy, SpatialRef};

use gdal::vector::ToGdal;
use crate::errors::Result;

pub fn new_geotransform (x_upper_left: f64, x_resolution: f64, row_rotation: f64,
                         y_upper_left: f64, col_rotation: f64, y_resolution: f64) -> GeoTransform {
    [x_upper_left,x_resolution,row_rotation,y_upper_left,col_rotation,y_resolution]
}

/// geotransform of a north-up raster whose upper left pixel corner is at (x_ul,y_ul)
pub fn geotransform_from_upper_left (x_ul: f64, y_ul: f64, x_resolution: f64, y_resolution: f64) -> GeoTransform {
    new_geotransform( x_ul, x_resolution, 0.0, y_ul, 0.0, y_resolution)
}

/// the geographic bounds covered by a raster of `cols` x `rows` pixels
pub fn raster_bounds (gt: &GeoTransform, cols: usize, rows: usize) -> Rect<f64> {
    let (x0,y0) = gt.apply( 0.0, 0.0);
    let (x1,y1) = gt.apply( cols as f64, rows as f64);
    Rect::new( coord!{ x: x0, y: y0 }, coord!{ x: x1, y: y1 })
}

/* #region well known SpatialRefs *********************************************************************************/

/// WGS84 with lon,lat axis order
pub fn srs_lon_lat () -> Result<SpatialRef> {
    let mut srs = SpatialRef::from_epsg(4326)?;
    srs.set_axis_mapping_strategy( AxisMappingStrategy::TraditionalGisOrder);
    Ok(srs)
}

/// SpatialRef from WKT that always uses x,y (lon,lat) axis order
pub fn srs_from_wkt (wkt: &str) -> Result<SpatialRef> {
    let mut srs = SpatialRef::from_wkt(wkt)?;
    srs.set_axis_mapping_strategy( AxisMappingStrategy::TraditionalGisOrder);
    Ok(srs)
}

/* #endregion well known SpatialRefs */

/// transform a geo geometry from one SpatialRef into another
pub fn reproject_geometry (geom: &Geometry<f64>, s_srs: &SpatialRef, t_srs: &SpatialRef) -> Result<Geometry<f64>> {
    let mut s_srs = s_srs.clone();
    s_srs.set_axis_mapping_strategy( AxisMappingStrategy::TraditionalGisOrder);
    let mut t_srs = t_srs.clone();
    t_srs.set_axis_mapping_strategy( AxisMappingStrategy::TraditionalGisOrder);

    let mut gdal_geom = geom.to_gdal()?;
    gdal_geom.set_spatial_ref( s_srs);
    let transformed = gdal_geom.transform_to( &t_srs)?;
    Ok( transformed.to_geo()? )
}
