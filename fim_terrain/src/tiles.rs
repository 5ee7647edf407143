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

//! slippy map tile addressing, see https://wiki.openstreetmap.org/wiki/Slippy_map_tilenames

use std::f64::consts::PI;
use fim_common::BoundingBox;

/// the most detailed zoom level of the terrain tile archive
pub const MAX_ZOOM: u8 = 14;

#[derive(Debug,Clone,Copy,PartialEq,Eq,Hash)]
pub struct TileIndex {
    pub zoom: u8,
    pub x: u32,
    pub y: u32,
}

/// tile numbers (x,y) for a lat/lon position at given zoom level. Values are truncated
/// (no sub-tile interpolation) and kept within the valid tile range of the zoom level
pub fn deg2num (lat_deg: f64, lon_deg: f64, zoom: u8) -> (u32,u32) {
    let n = 2.0f64.powi( zoom as i32);
    let lat_rad = lat_deg.to_radians();

    let x = ((lon_deg + 180.0) / 360.0 * n) as i64;
    let y = ((1.0 - lat_rad.tan().asinh() / PI) / 2.0 * n) as i64;

    let max = n as i64 - 1;
    (x.clamp(0,max) as u32, y.clamp(0,max) as u32)
}

/// inclusive rectangular range of tiles. Note that y grows from north to south
#[derive(Debug,Clone,Copy,PartialEq,Eq)]
pub struct TileRange {
    pub zoom: u8,
    pub x_min: u32,
    pub x_max: u32,
    pub y_min: u32,
    pub y_max: u32,
}

impl TileRange {
    /// all tiles that overlap the given lon/lat bounds
    pub fn for_bounds (bbox: &BoundingBox<f64>, zoom: u8) -> Self {
        let (x_min, y_max) = deg2num( bbox.south, bbox.west, zoom);
        let (x_max, y_min) = deg2num( bbox.north, bbox.east, zoom);
        TileRange { zoom, x_min, x_max, y_min, y_max }
    }

    pub fn len (&self) -> usize {
        ((self.x_max - self.x_min + 1) * (self.y_max - self.y_min + 1)) as usize
    }

    /// tiles ordered by x (west to east), then y (north to south)
    pub fn tiles (&self) -> Vec<TileIndex> {
        let mut tiles = Vec::with_capacity( self.len());
        for x in self.x_min..=self.x_max {
            for y in self.y_min..=self.y_max {
                tiles.push( TileIndex { zoom: self.zoom, x, y });
            }
        }
        tiles
    }
}

/// `{url_base}/{zoom}/{x}/{y}.tif`
pub fn tile_url (url_base: &str, tile: &TileIndex) -> String {
    format!("{}/{}/{}/{}.tif", url_base.trim_end_matches('/'), tile.zoom, tile.x, tile.y)
}
