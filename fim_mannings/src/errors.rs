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

use fim_common::{define_error, FimCommonError};

pub type Result<T> = std::result::Result<T, ManningsError>;

define_error!{ pub ManningsError =
    IOError(#[from] std::io::Error) : "IO error: {0}",
    CsvError(#[from] csv::Error) : "CSV error: {0}",
    ImageError(#[from] image::ImageError) : "image error: {0}",
    InvalidFont(#[from] ab_glyph::InvalidFont) : "invalid font error: {0}",
    ThreadPoolError(#[from] rayon::ThreadPoolBuildError) : "thread pool error: {0}",
    CommonError(#[from] FimCommonError) : "common error: {0}",
    MissingColumn(String) : "missing column: {0}",
    InvalidTable(String) : "invalid table: {0}",
    InvalidArgs(String) : "invalid arguments: {0}",
    OpFailed(String) : "operation failed: {0}"
}

pub fn op_failed (msg: impl ToString) -> ManningsError {
    ManningsError::OpFailed(msg.to_string())
}

pub fn missing_column (name: &str) -> ManningsError {
    ManningsError::MissingColumn(name.to_string())
}

pub fn invalid_args (msg: impl ToString) -> ManningsError {
    ManningsError::InvalidArgs(msg.to_string())
}
