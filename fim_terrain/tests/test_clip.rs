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
use geo::{Geometry, polygon};
use fim_gdal::{geotransform_from_upper_left, raster::Float32Grid};
use fim_terrain::clip::{clip_and_scale, NO_DATA, FEET_PER_METER};

fn grid_4x4 () -> Float32Grid {
    let gt = geotransform_from_upper_left( 0.0, 4.0, 1.0, -1.0);
    let mut grid = Float32Grid::filled( 4, 4, gt, 10.0);
    grid.no_data = Some(-32768.0);
    grid
}

#[test]
fn test_clip_to_square() {
    let mut grid = grid_4x4();
    grid.data[2*4 + 2] = -32768.0; // col 2, row 2

    let square = Geometry::Polygon( polygon![(x: 1.0, y: 1.0), (x: 3.0, y: 1.0), (x: 3.0, y: 3.0), (x: 1.0, y: 3.0), (x: 1.0, y: 1.0)]);
    let clipped = clip_and_scale( &grid, &square, FEET_PER_METER).unwrap();

    assert_eq!( (clipped.cols, clipped.rows), (2, 2));
    assert_eq!( clipped.geo_transform, [1.0, 1.0, 0.0, 3.0, 0.0, -1.0]);
    assert_eq!( clipped.no_data, Some(NO_DATA));

    let feet = (10.0 * FEET_PER_METER) as f32;
    assert_eq!( clipped.data, vec![feet, feet, feet, NO_DATA as f32]);
}

#[test]
fn test_clip_to_triangle() {
    let grid = grid_4x4();
    let triangle = Geometry::Polygon( polygon![(x: 0.0, y: 0.0), (x: 4.0, y: 0.0), (x: 0.0, y: 4.0), (x: 0.0, y: 0.0)]);
    let clipped = clip_and_scale( &grid, &triangle, 1.0).unwrap();

    assert_eq!( (clipped.cols, clipped.rows), (4, 4));
    for r in 0..4 {
        for c in 0..4 {
            let v = clipped.value(c,r);
            if c < r {
                assert_eq!( v, 10.0, "cell {c},{r} should be inside");
            } else {
                assert_eq!( v, NO_DATA as f32, "cell {c},{r} should be outside");
            }
        }
    }
}

#[test]
fn test_clip_without_overlap() {
    let grid = grid_4x4();
    let far_away = Geometry::Polygon( polygon![(x: 100.0, y: 100.0), (x: 101.0, y: 100.0), (x: 101.0, y: 101.0), (x: 100.0, y: 100.0)]);
    assert!( clip_and_scale( &grid, &far_away, 1.0).is_err());
}
