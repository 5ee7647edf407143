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

use fim_mannings::*;
use fim_mannings::table::Table;

fn table (headers: &[&str], rows: &[&[&str]]) -> Table {
    let headers: Vec<String> = headers.iter().map( |h| h.to_string()).collect();
    let rows: Vec<Vec<Option<String>>> = rows.iter()
        .map( |r| r.iter().map( |c| if c.is_empty() { None } else { Some(c.to_string()) }).collect())
        .collect();
    Table::from_rows( headers, rows).unwrap()
}

fn approx_eq (a: f64, b: f64) -> bool { (a - b).abs() < 1e-6 }

fn src_table (with_bathy: bool) -> Table {
    let mut headers = vec!["HydroID", "feature_id", "Stage", "chann_volume_ratio", "SLOPE", "HydraulicRadius (m)", "WetArea (m2)", "Discharge (m3s-1)", "Stage_1_5", "bankfull"];
    if with_bathy { headers.extend( ["HydraulicRadius (m)_bathy_adj", "WetArea (m2)_bathy_adj"]) }

    let rows: Vec<Vec<&str>> = vec![
        vec!["100", "0012", "0.3048", "0.6", "0.0025", "1.5", "12.0", "5.0", "0.5", "channel", "0.8", "8.0"],
        vec!["100", "0012", "0.6096", "0.2", "0.0025", "1.5", "12.0", "9.0", "0.5", "floodplain", "0.8", "8.0"],
        vec!["101", "0099", "0.3048", "0.5", "0.0025", "1.0", "4.0", "2.0", "0.4", "unknown", "1.0", "4.0"],
    ];
    let rows: Vec<Vec<&str>> = rows.into_iter().map( |r| r[..headers.len()].to_vec()).collect();
    let row_refs: Vec<&[&str]> = rows.iter().map( |r| r.as_slice()).collect();
    table( &headers, &row_refs)
}

fn mann_table () -> Table {
    table( &["feature_id", "channel", "floodplain"], &[
        &["0012", "0.08", "0.12"],
        &["0013", "0.05", "0.10"],
    ])
}

#[test]
fn test_formulas () {
    assert!( approx_eq( composite_roughness( 0.6, 0.08, 0.12), 0.096));
    assert!( approx_eq( composite_roughness( 1.0, 0.08, 0.12), 0.08));
    assert!( approx_eq( composite_roughness( 0.0, 0.08, 0.12), 0.12));

    let n = composite_roughness( 0.4, 0.06, 0.12);
    assert!( approx_eq( n, 0.096));
    // 10 * sqrt(0.001) / 0.096 = 3.29404, not the 3.2992 that is sometimes quoted for this case
    let q = manning_discharge( 10.0, 1.0, 0.001, n);
    assert!( (q - 3.29404).abs() < 1e-4);

    let q = manning_discharge( 12.0, 1.5, 0.0025, 0.096);
    println!("Q = {q}");
    assert!( (q - 8.189817).abs() < 1e-5);
}

#[test]
fn test_apply_variable_roughness () {
    let (df, missing) = apply_variable_roughness( &src_table(false), &mann_table(), "bankfull").unwrap();

    // feature 0099 has no roughness values
    assert_eq!( missing, 1);
    assert_eq!( df.len(), 3);

    let lookup = df.require_column( LOOKUP_MANNING_N).unwrap();
    assert_eq!( df.cell(0,lookup), Some("0.08"));
    assert_eq!( df.cell(1,lookup), Some("0.12"));
    assert_eq!( df.cell(2,lookup), None);

    let comp = df.numbers( COMP_MANNING_N).unwrap();
    assert!( approx_eq( comp[0].unwrap(), 0.096));
    assert!( approx_eq( comp[1].unwrap(), 0.2*0.08 + 0.8*0.12));
    assert_eq!( comp[2], None);

    let q = df.numbers( DISCHARGE_VAR_MANN).unwrap();
    assert!( (q[0].unwrap() - 8.189817).abs() < 1e-5);
    assert_eq!( q[2], None);

    // the original discharge is untouched
    let q0 = df.numbers( DISCHARGE).unwrap();
    assert_eq!( q0, vec![Some(5.0), Some(9.0), Some(2.0)]);
}

#[test]
fn test_bathy_adjusted_columns_preferred () {
    let (df, _) = apply_variable_roughness( &src_table(true), &mann_table(), "bankfull").unwrap();
    let q = df.numbers( DISCHARGE_VAR_MANN).unwrap();
    let expected = manning_discharge( 8.0, 0.8, 0.0025, 0.096);
    assert!( approx_eq( q[0].unwrap(), expected));
}

#[test]
fn test_missing_classification_column () {
    assert!( apply_variable_roughness( &src_table(false), &mann_table(), "no_such_column").is_err());
}

#[test]
fn test_update_hydro_table () {
    let (src, _) = apply_variable_roughness( &src_table(false), &mann_table(), "bankfull").unwrap();
    let htable = table( &["HydroID", "feature_id", "stage", "discharge_cms", "HUC"], &[
        &["100", "12", "0.3048", "5.0", "05040001"],
        &["100", "12", "0.6096", "9.0", "05040001"],
        &["102", "14", "0.3048", "1.0", "05040001"],
    ]);

    let ht = update_hydro_table( &htable, &src).unwrap();
    assert_eq!( ht.headers(), &["HydroID", "feature_id", "stage", "HUC", "discharge_cms"]);
    assert_eq!( ht.len(), 3);

    let q = ht.numbers( HT_DISCHARGE).unwrap();
    assert!( (q[0].unwrap() - 8.189817).abs() < 1e-5);
    assert!( q[1].is_some());
    assert_eq!( q[2], None);
    assert_eq!( ht.cell(0,3), Some("05040001"));
}
