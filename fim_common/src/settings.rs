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

//! process wide settings shared by the evaluation tools. These used to be global constants -
//! now they are constructed once at startup and passed by reference

use std::{collections::BTreeMap, path::PathBuf};

use crate::{FimCommonError, Result};

/// name of the (required) environment variable that holds the outputs root dir
pub const OUTPUTS_DIR_ENV: &str = "outputDataDir";

#[derive(Debug,Clone)]
pub struct SharedSettings {
    pub test_cases_dir: PathBuf,
    pub previous_fim_dir: PathBuf,
    pub outputs_dir: PathBuf,
    pub inputs_dir: PathBuf,

    pub benchmark_categories: Vec<&'static str>,
    pub ahps_benchmark_categories: Vec<&'static str>,
    pub fr_benchmark_categories: Vec<&'static str>,

    pub printworthy_stats: Vec<&'static str>,
    pub go_up_stats: Vec<&'static str>,
    pub go_down_stats: Vec<&'static str>,

    pub magnitudes: BTreeMap<&'static str, Vec<&'static str>>,
}

impl SharedSettings {
    pub fn from_env () -> Result<Self> {
        Self::from_lookup( |key| std::env::var(key).ok())
    }

    /// `lookup` resolves environment variable names. Fails if [`OUTPUTS_DIR_ENV`] is not set
    pub fn from_lookup <F> (lookup: F) -> Result<Self> where F: Fn(&str)->Option<String> {
        let outputs_dir = lookup(OUTPUTS_DIR_ENV)
            .filter(|s| !s.is_empty())
            .ok_or_else(|| FimCommonError::MissingEnvVar(OUTPUTS_DIR_ENV.to_string()))?;

        let magnitudes = BTreeMap::from([
            ("ble", vec!["100yr", "500yr"]),
            ("ifc", vec!["10yr", "25yr", "50yr", "100yr", "200yr", "500yr"]),
            ("nws", vec!["action", "minor", "moderate", "major"]),
            ("usgs", vec!["action", "minor", "moderate", "major"]),
        ]);

        Ok( SharedSettings {
            test_cases_dir: PathBuf::from("/data/test_cases/"),
            previous_fim_dir: PathBuf::from("/data/previous_fim"),
            outputs_dir: PathBuf::from(outputs_dir),
            inputs_dir: PathBuf::from("/data/inputs"),

            benchmark_categories: vec!["ble", "nws", "usgs", "ifc"],
            ahps_benchmark_categories: vec!["usgs", "nws"],
            fr_benchmark_categories: vec!["ble", "ifc"],

            printworthy_stats: vec![
                "CSI", "TPR", "TNR", "FAR", "MCC", "TP_area_km2", "FP_area_km2", "TN_area_km2", "FN_area_km2",
                "contingency_tot_area_km2", "TP_perc", "FP_perc", "TN_perc", "FN_perc"
            ],
            go_up_stats: vec!["CSI", "TPR", "MCC", "TN_area_km2", "TP_area_km2", "TN_perc", "TP_perc", "TNR"],
            go_down_stats: vec!["FAR", "FN_area_km2", "FP_area_km2", "FP_perc", "FN_perc"],

            magnitudes
        })
    }

    pub fn magnitudes_of (&self, category: &str) -> Option<&[&'static str]> {
        self.magnitudes.get(category).map(|v| v.as_slice())
    }

    pub fn is_ahps_category (&self, category: &str) -> bool {
        self.ahps_benchmark_categories.contains(&category)
    }
}

/// ANSI terminal escape sequences
pub struct TermColors;

impl TermColors {
    pub const ENDC: &'static str = "\x1b[m";
    pub const GREEN_BOLD: &'static str = "\x1b[32;1m";
    pub const GREEN: &'static str = "\x1b[32m";
    pub const RED_BOLD: &'static str = "\x1b[31;1m";
    pub const WHITE: &'static str = "\x1b[37m";
    pub const WHITE_BOLD: &'static str = "\x1b[37;1m";
    pub const CYAN_BOLD: &'static str = "\x1b[36;1m";

    /// wrap `s` into `color` and reset sequences
    pub fn paint (color: &str, s: &str) -> String {
        format!("{color}{s}{}", Self::ENDC)
    }
}
