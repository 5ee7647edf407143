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

use std::fs;
use fim_common::fs::{sorted_sub_dirs, remove_file_if_exists, existing_file, ensure_writable_dir};
use fim_common::config::{config_from_str, load_config};
use fim_common::net::url_file_name;
use serde::Deserialize;

#[test]
fn test_sorted_sub_dirs() {
    let tmp = tempfile::tempdir().unwrap();
    for d in ["12090301", "logs", "01010002"] {
        fs::create_dir( tmp.path().join(d)).unwrap();
    }
    fs::write( tmp.path().join("readme.txt"), "not a dir").unwrap();

    let dirs = sorted_sub_dirs( tmp.path()).unwrap();
    println!("{dirs:?}");
    assert_eq!( dirs, vec!["01010002", "12090301", "logs"]);
}

#[test]
fn test_remove_file_if_exists() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("tile.tif");
    fs::write( &path, b"x").unwrap();

    assert!( existing_file(&path).is_ok());
    assert!( remove_file_if_exists(&path).unwrap());
    assert!( !remove_file_if_exists(&path).unwrap());
    assert!( existing_file(&path).is_err());
}

#[test]
fn test_ensure_writable_dir() {
    let tmp = tempfile::tempdir().unwrap();
    let dir = tmp.path().join("a").join("b");
    ensure_writable_dir(&dir).unwrap();
    assert!( dir.is_dir());
}

#[derive(Deserialize,Debug,PartialEq)]
struct TestConfig {
    name: String,
    zoom: u8,
}

#[test]
fn test_load_config() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("test.ron");
    fs::write( &path, r#"TestConfig( name: "x", zoom: 14 )"#).unwrap();

    let config: TestConfig = load_config(&path).unwrap();
    assert_eq!( config, TestConfig{ name: "x".to_string(), zoom: 14 });

    assert!( config_from_str::<TestConfig>("TestConfig( name: 1 )").is_err());
    assert!( load_config::<TestConfig>( tmp.path().join("missing.ron")).is_err());
}

#[test]
fn test_url_file_name() {
    assert_eq!( url_file_name("https://s3.amazonaws.com/elevation-tiles-prod/geotiff/14/2620/6331.tif"), Some("6331.tif"));
    assert_eq!( url_file_name("https://host/dir/"), None);
}

#[test]
fn test_pkg_data_dir() {
    use std::path::PathBuf;
    use fim_common::fs::{pkg_data_dir, DATA_DIR_ENV};

    match std::env::var(DATA_DIR_ENV) {
        Ok(root) if !root.is_empty() => {
            assert_eq!( pkg_data_dir("fim_mannings", "/src/fim_mannings"), PathBuf::from(root).join("fim_mannings"));
        }
        _ => {
            assert_eq!( pkg_data_dir("fim_mannings", "/src/fim_mannings"), PathBuf::from("/src/fim_mannings/data"));
            assert!( fim_common::pkg_data_dir!().ends_with("fim_common/data"));
        }
    }
}
