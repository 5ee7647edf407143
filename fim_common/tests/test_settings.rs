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

use std::path::Path;
use fim_common::{SharedSettings, TermColors, FimCommonError, settings::OUTPUTS_DIR_ENV};

#[test]
fn test_settings_from_lookup() {
    let settings = SharedSettings::from_lookup( |key| {
        if key == OUTPUTS_DIR_ENV { Some("/data/outputs".to_string()) } else { None }
    }).unwrap();

    assert_eq!( settings.outputs_dir, Path::new("/data/outputs"));
    assert_eq!( settings.test_cases_dir, Path::new("/data/test_cases/"));
    assert_eq!( settings.benchmark_categories, vec!["ble", "nws", "usgs", "ifc"]);
    assert_eq!( settings.magnitudes_of("ble"), Some(["100yr", "500yr"].as_slice()));
    assert!( settings.is_ahps_category("nws"));
    assert!( !settings.is_ahps_category("ble"));
}

#[test]
fn test_missing_outputs_dir() {
    match SharedSettings::from_lookup( |_| None) {
        Err(FimCommonError::MissingEnvVar(name)) => {
            println!("got expected error for {name}");
            assert_eq!( name, "outputDataDir");
        }
        other => panic!("expected MissingEnvVar error, got {other:?}")
    }
}

#[test]
fn test_paint() {
    let s = TermColors::paint( TermColors::RED_BOLD, "failed");
    assert_eq!( s, "\x1b[31;1mfailed\x1b[m");
}
