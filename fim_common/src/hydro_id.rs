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

use std::{fmt, str::FromStr};
use serde::{Serialize,Deserialize};

use crate::{FimCommonError, Result};

/// numeric hydrologic feature identifier (HydroID, fossid).
/// Source data often carries these ids as text with leading zeros, which we drop once at ingestion.
/// Prefix matching between ids is always done on the [`HydroId::canonical_text`] form
#[derive(Debug,Clone,Copy,PartialEq,Eq,Hash,PartialOrd,Ord,Serialize,Deserialize)]
#[serde(transparent)]
pub struct HydroId(i64);

impl HydroId {
    pub fn new (id: i64) -> Self { HydroId(id) }

    pub fn value (&self) -> i64 { self.0 }

    /// decimal text without leading zeros
    pub fn canonical_text (&self) -> String { self.0.to_string() }

    /// parse from text such as "0012345", " 17820017 " or "123.0"
    pub fn parse_text (s: &str) -> Result<Self> {
        let t = s.trim();
        if t.is_empty() {
            return Err( FimCommonError::InvalidHydroId(s.to_string()))
        }

        if let Ok(v) = t.parse::<i64>() {
            Ok( HydroId(v) )
        } else if let Ok(v) = t.parse::<f64>() {
            Self::from_real(v).map_err(|_| FimCommonError::InvalidHydroId(s.to_string()))
        } else {
            Err( FimCommonError::InvalidHydroId(s.to_string()))
        }
    }

    /// only accepts finite reals without fractional part
    pub fn from_real (v: f64) -> Result<Self> {
        if v.is_finite() && v.fract() == 0.0 && v.abs() < i64::MAX as f64 {
            Ok( HydroId(v as i64) )
        } else {
            Err( FimCommonError::InvalidHydroId(v.to_string()))
        }
    }

    pub fn has_prefix (&self, prefix: &str) -> bool {
        self.canonical_text().starts_with(prefix)
    }
}

impl From<i64> for HydroId {
    fn from (v: i64) -> Self { HydroId(v) }
}

impl From<i32> for HydroId {
    fn from (v: i32) -> Self { HydroId(v as i64) }
}

impl FromStr for HydroId {
    type Err = FimCommonError;

    fn from_str (s: &str) -> Result<Self> {
        HydroId::parse_text(s)
    }
}

impl fmt::Display for HydroId {
    fn fmt (&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
