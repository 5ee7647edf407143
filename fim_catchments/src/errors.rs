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
use fim_common::FimCommonError;
use fim_gdal::errors::FimGdalError;

pub type Result<T> = std::result::Result<T, CatchmentError>;

#[derive(Error,Debug)]
pub enum CatchmentError {

    #[error("invalid filter arguments: {0}")]
    InvalidArgs(String),

    #[error("invalid {field} value in {layer}: {value}")]
    InvalidId { layer: &'static str, field: &'static str, value: String },

    #[error("missing {field} in {layer}")]
    MissingField { layer: &'static str, field: &'static str },

    // pass through for IO errors
    #[error("catchment IO error: {0}")]
    IOError( #[from] std::io::Error),

    #[error("common error: {0}")]
    CommonError( #[from] FimCommonError),

    // pass through for GDAL vector errors
    #[error("gdal error: {0}")]
    GdalError( #[from] FimGdalError),

    // generic self-created error
    #[error("catchment filter failed: {0}")]
    OpFailed(String),
}

pub fn invalid_args (msg: impl ToString) -> CatchmentError {
    CatchmentError::InvalidArgs(msg.to_string())
}
