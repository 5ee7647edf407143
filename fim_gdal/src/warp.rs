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

//! reprojection of raster datasets through the GDALWarp utility API

use std::{ffi::{CString, c_int}, ptr::null_mut};
use gdal::{Dataset, cpl::CslStringList};
use gdal::spatial_ref::SpatialRef;

use crate::errors::{Result, misc_error, last_gdal_error};

/// owns the GDALWarpAppOptions handle for the duration of a warp call
struct WarpAppOptions {
    options: *mut gdal_sys::GDALWarpAppOptions,
}

impl WarpAppOptions {
    fn new (args: &[String]) -> Result<Self> {
        let mut c_args = CslStringList::new();
        for a in args {
            c_args.add_string(a)?;
        }

        let options = unsafe { gdal_sys::GDALWarpAppOptionsNew( c_args.as_ptr(), null_mut()) };
        if options.is_null() {
            Err( misc_error( format!("invalid warp options {args:?}")))
        } else {
            Ok( WarpAppOptions { options } )
        }
    }
}

impl Drop for WarpAppOptions {
    fn drop (&mut self) {
        unsafe { gdal_sys::GDALWarpAppOptionsFree( self.options); }
    }
}

/// command line style arguments to warp into an in-memory Float32 dataset in the target SRS
pub fn mem_warp_args (t_srs: &SpatialRef, dst_no_data: f64) -> Result<Vec<String>> {
    Ok( vec![
        "-of".to_string(), "MEM".to_string(),
        "-ot".to_string(), "Float32".to_string(),
        "-t_srs".to_string(), t_srs.to_wkt()?,
        "-r".to_string(), "near".to_string(),
        "-dstnodata".to_string(), dst_no_data.to_string(),
    ])
}

/// run GDALWarp on `src_ds` with the given command line style arguments. The output dataset is
/// created by GDAL, `dest` is ignored by the MEM driver
pub fn warp_with_args (src_ds: &Dataset, dest: &str, args: &[String]) -> Result<Dataset> {
    let options = WarpAppOptions::new(args)?;
    let c_dest = CString::new(dest)?;

    unsafe {
        let mut usage_error: c_int = 0;
        let mut h_src = src_ds.c_dataset();
        let h_dst = gdal_sys::GDALWarp(
            c_dest.as_ptr(),
            null_mut(),
            1,
            &mut h_src,
            options.options,
            &mut usage_error,
        );

        if usage_error != 0 {
            return Err( misc_error( format!("GDALWarp: invalid arguments {args:?}")))
        }
        if h_dst.is_null() {
            return Err( last_gdal_error())
        }
        Ok( Dataset::from_c_dataset(h_dst) )
    }
}

/// reproject `src_ds` into an in-memory Float32 dataset in `t_srs`
pub fn warp_to_srs (src_ds: &Dataset, t_srs: &SpatialRef, dst_no_data: f64) -> Result<Dataset> {
    let args = mem_warp_args( t_srs, dst_no_data)?;
    warp_with_args( src_ds, "", &args)
}
