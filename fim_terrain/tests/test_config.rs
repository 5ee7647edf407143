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

use std::{path::PathBuf, time::Duration};
use fim_common::config::config_from_str;
use fim_terrain::{TerrainConfig, DEFAULT_URL_BASE};

#[test]
fn test_default_config() {
    let config = TerrainConfig::default();
    assert_eq!( config.zoom, 14);
    assert!( config.convert_to_feet);
    assert!( config.keep_mosaic);
    assert_eq!( config.url_base, DEFAULT_URL_BASE);
    assert_eq!( config.http_timeout, None);
    assert!( (config.scale() - 3.28084).abs() < 1e-12);
}

#[test]
fn test_partial_ron_config() {
    let config: TerrainConfig = config_from_str( r#"TerrainConfig( input_path: "aoi.shp", zoom: 12, convert_to_feet: false )"#).unwrap();
    assert_eq!( config.input_path, PathBuf::from("aoi.shp"));
    assert_eq!( config.zoom, 12);
    assert_eq!( config.scale(), 1.0);
    assert!( config.keep_mosaic);
}

#[test]
fn test_config_file() {
    let path = PathBuf::from( env!("CARGO_MANIFEST_DIR")).join("configs/terrain_default.ron");
    let config: TerrainConfig = fim_common::config::load_config( &path).unwrap();
    assert_eq!( config.output_dir, PathBuf::from("terrain"));
}

#[test]
fn test_validate() {
    let tmp = tempfile::tempdir().unwrap();
    let input = tmp.path().join("aoi.gpkg");
    std::fs::write( &input, b"placeholder").unwrap();

    let mut config = TerrainConfig { input_path: input, output_dir: tmp.path().to_path_buf(), ..TerrainConfig::default() };
    assert!( config.validate().is_ok());

    config.zoom = 15;
    assert!( config.validate().is_err());

    config.zoom = 14;
    config.url_base = "ftp://somewhere".to_string();
    assert!( config.validate().is_err());

    config.url_base = DEFAULT_URL_BASE.to_string();
    config.input_path = tmp.path().join("missing.shp");
    assert!( config.validate().is_err());
}

#[test]
fn test_output_names() {
    let config = TerrainConfig { output_dir: PathBuf::from("/tmp/terrain"), ..TerrainConfig::default() };
    assert_eq!( config.tile_path(0, 1), PathBuf::from("/tmp/terrain/AWS_0_TileImage_1.tif"));
    assert_eq!( config.mosaic_path(2), PathBuf::from("/tmp/terrain/AWS_2_dem_merge.tif"));
    assert_eq!( config.result_path(2), PathBuf::from("/tmp/terrain/AWS_2_dem_clip_project.tif"));
}
