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

//! blocking HTTP download support

use std::{fs::File, path::Path, time::Duration};
use reqwest::{StatusCode, blocking::Client};

use crate::define_error;

define_error!{ pub FimNetError = 
    IOError(#[from] std::io::Error) : "IO error: {0}",
    NotFoundError(String) : "not found {0}",
    HttpError(#[from] reqwest::Error) : "http error: {0}",
    OpFailed(String) : "operation failed: {0}"
}

pub type Result<T> = std::result::Result<T, FimNetError>;

/// a blocking client. A `None` timeout means requests never time out
pub fn http_client (timeout: Option<Duration>) -> Result<Client> {
    Ok( Client::builder().timeout(timeout).build()? )
}

/// retrieve `url` with HTTP GET and store the response body verbatim in `path`.
/// The file is only created if the server responds with 200, returns the number of bytes written
pub fn download_url (client: &Client, url: &str, path: impl AsRef<Path>) -> Result<u64> {
    let mut response = client.get(url).send()?;

    match response.status() {
        StatusCode::OK => {
            let mut file = File::create(path.as_ref())?;
            Ok( response.copy_to(&mut file)? )
        }
        StatusCode::NOT_FOUND => {
            Err( FimNetError::NotFoundError( url.to_string()))
        }
        other => {
            Err( FimNetError::OpFailed( format!("response status {other:?} for {url}")))
        }
    }
}

/// the last path element of a URL, if any
pub fn url_file_name (url: &str) -> Option<&str> {
    let path = url.split(['?','#']).next()?;
    match path.rfind('/') {
        Some(idx) if idx < path.len()-1 => Some(&path[idx+1..]),
        _ => None
    }
}
