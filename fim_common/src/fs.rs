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

use std::fs;
use std::io::{self,ErrorKind::*};
use std::path::{Path,PathBuf};

use crate::macros::io_error;

type Result<T> = std::result::Result<T,std::io::Error>;

pub fn filestem <'a,T: AsRef<Path>> (path: &'a T)->Option<&'a str> {
    path.as_ref().file_stem().and_then(|ostr| ostr.to_str())
}

pub fn ensure_dir (path: impl AsRef<Path>)->io::Result<()> {
    let path = path.as_ref();
    if !path.is_dir() {
        std::fs::create_dir_all(path)?;
    }
    Ok(())
}

/// check if dir pathname exists and is writable, try to create dir otherwise
pub fn ensure_writable_dir (path: impl AsRef<Path>) -> io::Result<()> {
    let path = path.as_ref();
    if path.is_dir() {
        let md = fs::metadata(&path)?;
        if md.permissions().readonly() {
            Err(io_error!(PermissionDenied, "output_dir {:?} not writable", &path))
        } else {
            Ok(())
        }
    } else {
        fs::create_dir_all(path)
    }
}

/// fails with `NotFound` if path does not exist and with `Other` if it is not a regular file
pub fn existing_file (path: impl AsRef<Path>) -> Result<PathBuf> {
    let path = path.as_ref();
    if !path.exists() {
        Err(io_error!(NotFound, "file not found: {:?}", path))
    } else if !path.is_file() {
        Err(io_error!(Other, "not a regular file: {:?}", path))
    } else {
        Ok(path.to_path_buf())
    }
}

/// remove file if it exists, returning true if something was removed
pub fn remove_file_if_exists (path: impl AsRef<Path>) -> Result<bool> {
    let path = path.as_ref();
    if path.is_file() {
        fs::remove_file(path)?;
        Ok(true)
    } else {
        Ok(false)
    }
}

/// the names of all direct sub-directories of `dir` in ascending order
pub fn sorted_sub_dirs (dir: impl AsRef<Path>) -> Result<Vec<String>> {
    let mut names: Vec<String> = Vec::new();
    for e in fs::read_dir(dir.as_ref())? {
        let e = e?;
        if e.file_type()?.is_dir() {
            if let Some(name) = e.file_name().to_str() {
                names.push( name.to_string());
            }
        }
    }
    names.sort();
    Ok(names)
}

/// environment variable for an alternative root of package data dirs (e.g. for installed binaries)
pub const DATA_DIR_ENV: &str = "FIM_DATA_DIR";

/// the data directory of package `pkg_name`: `$FIM_DATA_DIR/<pkg_name>` if the variable is set,
/// `<manifest_dir>/data` otherwise. Use the [`crate::pkg_data_dir`] macro to call this for the current package
pub fn pkg_data_dir (pkg_name: &str, manifest_dir: &str) -> PathBuf {
    match std::env::var(DATA_DIR_ENV) {
        Ok(root) if !root.is_empty() => Path::new(&root).join(pkg_name),
        _ => Path::new(manifest_dir).join("data")
    }
}
