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
#![allow(unused)]

use std::path::PathBuf;
use gdal::{Dataset, Metadata, raster::GdalDataType, spatial_ref::SpatialRef};
use fim_gdal::{geotransform_from_upper_left, raster_bounds};
use fim_gdal::raster::{Float32Grid, read_float32_grid, write_float32_tiff, build_mosaic};
use fim_gdal::warp::warp_to_srs;

// run with "cargo test test_xx -- --nocapture"

const NO_DATA: f64 = -9999.0;

/// a 4x3 UTM 15N tile with 30m pixels and its upper left corner at (x,y)
fn utm_tile (x: f64, y: f64, value: f32) -> Float32Grid {
    let gt = geotransform_from_upper_left( x, y, 30.0, -30.0);
    let mut data = vec![value; 12];
    data[11] = NO_DATA as f32;
    Float32Grid::new( 4, 3, gt, Some(NO_DATA), data).unwrap()
}

fn utm_srs () -> SpatialRef { SpatialRef::from_epsg(32615).unwrap() }

#[test]
fn test_grid_geometry() {
    let gt = geotransform_from_upper_left( 100.0, 200.0, 10.0, -10.0);
    let grid = Float32Grid::filled( 4, 3, gt, 1.0);

    assert_eq!( grid.pixel_center(0,0), (105.0, 195.0));
    assert_eq!( grid.pixel_center(3,2), (135.0, 175.0));

    let (px,py) = grid.pixel_of( 125.0, 180.0).unwrap();
    assert!( (px - 2.5).abs() < 1e-9 && (py - 2.0).abs() < 1e-9);

    let r = raster_bounds( &gt, 4, 3);
    assert_eq!( (r.min().x, r.min().y, r.max().x, r.max().y), (100.0, 170.0, 140.0, 200.0));
}

#[test]
fn test_grid_no_data() {
    let gt = geotransform_from_upper_left( 0.0, 0.0, 1.0, -1.0);
    let grid = Float32Grid::new( 2, 1, gt, Some(-9999.0), vec![-9999.0, 3.0]).unwrap();
    assert!( grid.is_no_data( grid.value(0,0)));
    assert!( !grid.is_no_data( grid.value(1,0)));

    assert!( Float32Grid::new( 2, 2, gt, None, vec![1.0]).is_err());
}

#[test]
fn test_write_read_tiff() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tile.tif");
    let grid = utm_tile( 500000.0, 4100000.0, 1.5);

    write_float32_tiff( &path, &grid, &utm_srs()).unwrap();

    let ds = Dataset::open( &path).unwrap();
    let band = ds.rasterband(1).unwrap();
    assert_eq!( band.band_type(), GdalDataType::Float32);
    assert_eq!( band.no_data_value(), Some(NO_DATA));
    assert_eq!( ds.metadata_item("COMPRESSION", "IMAGE_STRUCTURE").as_deref(), Some("LZW"));
    assert_eq!( ds.spatial_ref().unwrap().auth_code().unwrap(), 32615);

    let read = read_float32_grid( &ds).unwrap();
    assert_eq!( read, grid);
    assert!( read.is_no_data( read.value(3,2)));
}

#[test]
fn test_mosaic_adjacent_tiles() {
    let dir = tempfile::tempdir().unwrap();
    let left = dir.path().join("left.tif");
    let right = dir.path().join("right.tif");
    let mosaic = dir.path().join("mosaic.tif");

    let left_grid = utm_tile( 500000.0, 4100000.0, 1.0);
    write_float32_tiff( &left, &left_grid, &utm_srs()).unwrap();
    write_float32_tiff( &right, &utm_tile( 500120.0, 4100000.0, 2.0), &utm_srs()).unwrap();

    build_mosaic( &[left, right], &mosaic).unwrap();

    let ds = Dataset::open( &mosaic).unwrap();
    assert_eq!( ds.raster_size(), (8, 3));
    assert_eq!( ds.geo_transform().unwrap(), left_grid.geo_transform);

    let grid = read_float32_grid( &ds).unwrap();
    assert_eq!( grid.value(0,0), 1.0);
    assert_eq!( grid.value(4,0), 2.0);
    assert_eq!( grid.value(7,0), 2.0);

    assert!( build_mosaic( &[], dir.path().join("empty.tif")).is_err());
}

#[test]
fn test_warp_to_lon_lat() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tile.tif");
    write_float32_tiff( &path, &utm_tile( 500000.0, 4100000.0, 1.0), &utm_srs()).unwrap();

    let src = Dataset::open( &path).unwrap();
    let t_srs = SpatialRef::from_epsg(4326).unwrap();
    let warped = warp_to_srs( &src, &t_srs, NO_DATA).unwrap();

    assert_eq!( warped.spatial_ref().unwrap().auth_code().unwrap(), 4326);
    assert_eq!( warped.rasterband(1).unwrap().band_type(), GdalDataType::Float32);
    assert_eq!( warped.rasterband(1).unwrap().no_data_value(), Some(NO_DATA));

    // easting 500000 is the central meridian of UTM zone 15
    let gt = warped.geo_transform().unwrap();
    println!("warped geotransform: {gt:?}");
    assert!( (gt[0] - (-93.0)).abs() < 0.01);
    assert!( gt[3] > 37.0 && gt[3] < 37.1);
}
