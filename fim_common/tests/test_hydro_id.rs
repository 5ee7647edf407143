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

use fim_common::HydroId;

// run with "cargo test test_xx -- --nocapture"

#[test]
fn test_leading_zeros_dropped() {
    let id = HydroId::parse_text("0012345").unwrap();
    assert_eq!( id.value(), 12345);
    assert_eq!( id.canonical_text(), "12345");
}

#[test]
fn test_whitespace_and_integral_floats() {
    assert_eq!( HydroId::parse_text(" 17820017 ").unwrap(), HydroId::new(17820017));
    assert_eq!( HydroId::parse_text("123.0").unwrap(), HydroId::new(123));
    assert_eq!( "42".parse::<HydroId>().unwrap().to_string(), "42");
}

#[test]
fn test_invalid_ids() {
    assert!( HydroId::parse_text("").is_err());
    assert!( HydroId::parse_text("abc").is_err());
    assert!( HydroId::parse_text("12.5").is_err());
    assert!( HydroId::from_real(f64::NAN).is_err());
}

#[test]
fn test_prefix_matching() {
    let id = HydroId::parse_text("17820017").unwrap();
    let prefix = HydroId::parse_text("01782").unwrap().canonical_text();
    println!("prefix: {prefix}");
    assert!( id.has_prefix(&prefix));
    assert!( !id.has_prefix("1783"));
}
