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

use std::ffi::CStr;
use thiserror::Error;
use gdal::errors::GdalError;

pub type Result<T> = std::result::Result<T, FimGdalError>;

#[derive(Error,Debug)]
pub enum FimGdalError {

    #[error("gdal error: {0}")]
    GdalError( #[from] GdalError),

    #[error("IO error: {0}")]
    IOError( #[from] std::io::Error),

    #[error("invalid C string: {0}")]
    NulError( #[from] std::ffi::NulError),

    #[error("unsupported geometry: {0}")]
    UnsupportedGeometry(String),

    #[error("no layer {0}")]
    NoSuchLayer(String),

    // generic self-created error
    #[error("gdal operation failed: {0}")]
    MiscError(String),
}

pub fn misc_error (msg: impl ToString) -> FimGdalError {
    FimGdalError::MiscError(msg.to_string())
}

pub fn gdal_error (e: GdalError) -> FimGdalError {
    FimGdalError::GdalError(e)
}

/// turn the last error message GDAL recorded into a FimGdalError
pub fn last_gdal_error () -> FimGdalError {
    let msg = unsafe {
        let pc_msg = gdal_sys::CPLGetLastErrorMsg();
        if pc_msg.is_null() {
            String::new()
        } else {
            CStr::from_ptr(pc_msg).to_string_lossy().to_string()
        }
    };
    unsafe { gdal_sys::CPLErrorReset(); }

    if msg.is_empty() {
        misc_error("unknown GDAL error")
    } else {
        misc_error(msg)
    }
}
