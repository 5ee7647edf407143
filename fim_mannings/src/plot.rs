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

//! diagnostic rating curve plots: original and recomputed discharge over stage for each HydroID,
//! together with the 1.5yr reference stage of the NWM

use std::{collections::BTreeMap, path::{Path, PathBuf}};
use image::{Rgb, RgbImage};
use imageproc::{drawing::{draw_filled_circle_mut, draw_line_segment_mut, draw_polygon_mut, draw_hollow_rect_mut, draw_text_mut}, point::Point, rect::Rect};
use ab_glyph::{FontVec, PxScale};
use tracing::info;

use fim_common::{fs::ensure_dir, pkg_data_dir};
use crate::{DISCHARGE, DISCHARGE_VAR_MANN, HYDRO_ID, STAGE, STAGE_1_5, table::Table};
use crate::errors::{Result, op_failed};

pub const PLOT_WIDTH: u32 = 800;
pub const PLOT_HEIGHT: u32 = 800;
const MARGIN: f32 = 60.0;
const N_GRID: usize = 5;
const POINT_RADIUS: i32 = 3;

const BACKGROUND: Rgb<u8> = Rgb([255,255,255]);
const GRID: Rgb<u8> = Rgb([220,220,220]);
const FRAME: Rgb<u8> = Rgb([96,96,96]);
pub const TEXT: Rgb<u8> = Rgb([0,0,0]);
const ORIGINAL: Rgb<u8> = Rgb([0,0,255]);
const VAR_MANN: Rgb<u8> = Rgb([255,165,0]);
const REFERENCE: Rgb<u8> = Rgb([0,128,0]);
const REFERENCE_FILL: Rgb<u8> = Rgb([143,187,217]);

/* #region font resources ****************************************************************************/

/// bundled label font, has to be in the package data dir
pub const DEFAULT_FONT_NAME: &str = "DejaVuSansMono.ttf";

pub fn default_font_path () -> PathBuf {
    pkg_data_dir!().join( DEFAULT_FONT_NAME)
}

pub fn load_font (path: impl AsRef<Path>) -> Result<FontVec> {
    let path = path.as_ref();
    if !path.is_file() {
        Err( op_failed( format!("font not found: {}", path.display())))
    } else {
        let data = std::fs::read( path)?;
        Ok( FontVec::try_from_vec( data)? )
    }
}

pub fn load_default_font () -> Result<FontVec> {
    load_font( default_font_path())
}

/* #endregion font resources */

/// one data row of a rating curve plot. Values are None if the cell is null or not a number
#[derive(Debug,Clone,Copy,PartialEq)]
pub struct CurvePoint {
    pub discharge: Option<f64>,
    pub discharge_var_mann: Option<f64>,
    pub stage: Option<f64>,
    pub stage_1_5: Option<f64>,
}

/// group the rating curve rows by HydroID (in order of first appearance)
pub fn curves_by_hydro_id (src: &Table) -> Result<Vec<(String,Vec<CurvePoint>)>> {
    let id_col = src.require_column(HYDRO_ID)?;
    let q = src.numbers(DISCHARGE)?;
    let q_var = src.numbers(DISCHARGE_VAR_MANN)?;
    let stage = src.numbers(STAGE)?;
    let stage_15 = src.numbers(STAGE_1_5)?;

    let mut order: Vec<String> = Vec::new();
    let mut curves: BTreeMap<String,Vec<CurvePoint>> = BTreeMap::new();

    for row in 0..src.len() {
        let Some(id) = src.cell(row,id_col) else { continue };
        let id = id.trim().to_string();
        let p = CurvePoint { discharge: q[row], discharge_var_mann: q_var[row], stage: stage[row], stage_1_5: stage_15[row] };
        match curves.get_mut(&id) {
            Some(pts) => pts.push(p),
            None => {
                order.push( id.clone());
                curves.insert( id, vec![p]);
            }
        }
    }

    Ok( order.into_iter().filter_map( |id| curves.remove(&id).map( |pts| (id,pts))).collect() )
}

/// median of the defined values, None if there are none
pub fn median (values: impl Iterator<Item=Option<f64>>) -> Option<f64> {
    let mut vs: Vec<f64> = values.flatten().filter( |v| v.is_finite()).collect();
    if vs.is_empty() { return None }

    vs.sort_by( |a,b| a.total_cmp(b));
    let n = vs.len();
    if n % 2 == 1 { Some(vs[n/2]) } else { Some( (vs[n/2 - 1] + vs[n/2]) / 2.0) }
}

struct Axis { min: f64, max: f64 }

impl Axis {
    fn new (values: impl Iterator<Item=f64>) -> Self {
        let (mut min, mut max) = (f64::INFINITY, f64::NEG_INFINITY);
        for v in values.filter( |v| v.is_finite()) {
            min = min.min(v);
            max = max.max(v);
        }
        if !min.is_finite() { (min,max) = (0.0, 1.0) }
        if max <= min { max = min + 1.0 }
        Axis { min, max }
    }

    fn fraction (&self, v: f64) -> f32 { ((v - self.min) / (self.max - self.min)) as f32 }
}

/// render the rating curve of one HydroID
pub fn render_src_plot (title: &str, points: &[CurvePoint], font: &FontVec) -> RgbImage {
    let mut img = RgbImage::from_pixel( PLOT_WIDTH, PLOT_HEIGHT, BACKGROUND);

    let x_axis = Axis::new( points.iter().flat_map( |p| [p.discharge, p.discharge_var_mann]).flatten());
    let y_axis = Axis::new( points.iter().flat_map( |p| [p.stage, p.stage_1_5]).flatten());

    let left = MARGIN;
    let right = PLOT_WIDTH as f32 - MARGIN;
    let top = MARGIN;
    let bottom = PLOT_HEIGHT as f32 - MARGIN;
    let px = |v: f64| left + x_axis.fraction(v) * (right - left);
    let py = |v: f64| bottom - y_axis.fraction(v) * (bottom - top);

    for i in 0..=N_GRID {
        let f = i as f32 / N_GRID as f32;
        let x = left + f * (right - left);
        let y = top + f * (bottom - top);
        draw_line_segment_mut( &mut img, (x, top), (x, bottom), GRID);
        draw_line_segment_mut( &mut img, (left, y), (right, y), GRID);
    }
    draw_hollow_rect_mut( &mut img, Rect::at( left as i32, top as i32).of_size( (right - left) as u32, (bottom - top) as u32), FRAME);

    // reference stage line over original discharge, filled down to the lower plot boundary
    let mut line: Vec<(f64,f64)> = points.iter().filter_map( |p| Some( (p.discharge?, p.stage_1_5?))).collect();
    line.sort_by( |a,b| a.0.total_cmp(&b.0));

    if line.len() > 1 {
        let base = bottom.round() as i32;
        let mut poly: Vec<Point<i32>> = Vec::with_capacity( line.len() + 2);
        poly.push( Point::new( px(line[0].0).round() as i32, base));
        for (q,s) in &line {
            let p = Point::new( px(*q).round() as i32, py(*s).round() as i32);
            if poly.last() != Some(&p) { poly.push(p) }
        }
        let end = Point::new( px(line[line.len()-1].0).round() as i32, base);
        if poly.last() != Some(&end) { poly.push(end) }

        if poly.len() > 2 && poly[0] != poly[poly.len()-1] {
            draw_polygon_mut( &mut img, &poly, REFERENCE_FILL);
        }

        for w in line.windows(2) {
            draw_line_segment_mut( &mut img, (px(w[0].0), py(w[0].1)), (px(w[1].0), py(w[1].1)), REFERENCE);
        }
    }

    for p in points {
        if let (Some(q), Some(s)) = (p.discharge, p.stage) {
            draw_filled_circle_mut( &mut img, (px(q).round() as i32, py(s).round() as i32), POINT_RADIUS, ORIGINAL);
        }
        if let (Some(q), Some(s)) = (p.discharge_var_mann, p.stage) {
            draw_filled_circle_mut( &mut img, (px(q).round() as i32, py(s).round() as i32), POINT_RADIUS, VAR_MANN);
        }
    }

    draw_text_mut( &mut img, TEXT, left as i32, (MARGIN / 3.0) as i32, PxScale::from(24.0), font, title);

    let q_med = median( points.iter().map( |p| p.discharge));
    let s_med = median( points.iter().map( |p| p.stage_1_5));
    if let (Some(q), Some(s)) = (q_med, s_med) {
        let label = format!("NWM 1.5yr: {s}");
        draw_text_mut( &mut img, TEXT, px(q) as i32, py(s) as i32 - 20, PxScale::from(16.0), font, &label);
    }

    img
}

/// write one `<HydroID>.png` per HydroID of the rating curve table into `out_dir`, returning the number of plots
pub fn generate_src_plots (src: &Table, out_dir: &Path, font: &FontVec) -> Result<usize> {
    ensure_dir( out_dir)?;

    let curves = curves_by_hydro_id( src)?;
    for (id,points) in &curves {
        info!("Creating SRC plot: {id}");
        let img = render_src_plot( id, points, font);
        let path: PathBuf = out_dir.join( format!("{id}.png"));
        img.save( &path)?;
    }

    Ok( curves.len() )
}
