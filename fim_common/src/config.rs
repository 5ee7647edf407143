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

//! loading of RON configuration files

use std::path::Path;
use serde::de::DeserializeOwned;

use crate::{FimCommonError, Result};

/// read and deserialize a RON config file
pub fn load_config <C: DeserializeOwned> (pathname: impl AsRef<Path>) -> Result<C> {
    let path = pathname.as_ref();
    if path.is_file() {
        let contents = std::fs::read_to_string(path)?;
        config_from_str(&contents)
    } else {
        Err( FimCommonError::ConfigFileNotFound( path.to_string_lossy().to_string()))
    }
}

pub fn config_from_str <C: DeserializeOwned> (s: &str) -> Result<C> {
    Ok( ron::from_str::<C>(s)? )
}
