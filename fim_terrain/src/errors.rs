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

use thiserror::Error;
use fim_common::{FimCommonError, net::FimNetError};
use fim_gdal::errors::FimGdalError;

pub type Result<T> = std::result::Result<T, TerrainError>;

#[derive(Error,Debug)]
pub enum TerrainError {

    #[error("invalid terrain config: {0}")]
    InvalidConfig(String),

    #[error("input has no spatial reference system: {0}")]
    MissingSrs(String),

    #[error("input feature {0} has no geometry")]
    NoGeometry(usize),

    #[error("polygon does not overlap raster: {0}")]
    NoOverlap(String),

    // pass through for tile download errors
    #[error("tile download failed: {0}")]
    Net( #[from] FimNetError),

    #[error("terrain gdal error: {0}")]
    Gdal( #[from] FimGdalError),

    #[error("common error: {0}")]
    Common( #[from] FimCommonError),

    #[error("terrain IO error: {0}")]
    IOError( #[from] std::io::Error),

    // generic self-created error
    #[error("terrain operation failed: {0}")]
    OpFailed(String),
}

pub fn invalid_config (msg: impl ToString) -> TerrainError {
    TerrainError::InvalidConfig(msg.to_string())
}
