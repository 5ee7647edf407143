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

//! a minimal column-ordered CSV table. All cells are kept as text so that columns we don't
//! touch are written back exactly as they were read. Empty cells are nulls

use std::{collections::HashMap, path::Path};
use csv::{ReaderBuilder, WriterBuilder};

use crate::errors::{Result, ManningsError, missing_column};

#[derive(Debug,Clone,PartialEq,Default)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<Option<String>>>,
}

/// how join keys are compared
#[derive(Debug,Clone,Copy,PartialEq,Eq)]
pub enum MergeKey {
    /// exact text match (e.g. zero padded feature ids)
    Text,
    /// numeric value match, so that "12", "12.0" and " 12" are the same key
    Numeric,
}

impl Table {
    pub fn new (headers: Vec<String>) -> Self {
        Table { headers, rows: Vec::new() }
    }

    pub fn from_rows (headers: Vec<String>, rows: Vec<Vec<Option<String>>>) -> Result<Self> {
        if let Some(row) = rows.iter().find( |r| r.len() != headers.len()) {
            return Err( ManningsError::InvalidTable( format!("row has {} cells, expected {}", row.len(), headers.len())))
        }
        Ok( Table { headers, rows } )
    }

    pub fn read_csv (path: impl AsRef<Path>) -> Result<Self> {
        let mut rdr = ReaderBuilder::new().has_headers(true).from_path( path.as_ref())?;
        let headers: Vec<String> = rdr.headers()?.iter().map( |h| h.to_string()).collect();

        let mut rows: Vec<Vec<Option<String>>> = Vec::new();
        for rec in rdr.records() {
            let rec = rec?;
            rows.push( rec.iter().map(to_cell).collect());
        }
        Self::from_rows( headers, rows)
    }

    pub fn write_csv (&self, path: impl AsRef<Path>) -> Result<()> {
        let mut wtr = WriterBuilder::new().from_path( path.as_ref())?;
        wtr.write_record( &self.headers)?;
        for row in &self.rows {
            wtr.write_record( row.iter().map( |c| c.as_deref().unwrap_or("")))?;
        }
        wtr.flush()?;
        Ok(())
    }

    pub fn headers (&self) -> &[String] { &self.headers }
    pub fn len (&self) -> usize { self.rows.len() }
    pub fn is_empty (&self) -> bool { self.rows.is_empty() }

    pub fn column_index (&self, name: &str) -> Option<usize> {
        self.headers.iter().position( |h| h == name)
    }

    pub fn has_column (&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    pub fn require_column (&self, name: &str) -> Result<usize> {
        self.column_index(name).ok_or_else( || missing_column(name))
    }

    pub fn cell (&self, row: usize, col: usize) -> Option<&str> {
        self.rows.get(row).and_then( |r| r.get(col)).and_then( |c| c.as_deref())
    }

    /// numeric value of a cell. Nulls, unparsable text and NaNs are `None`
    pub fn number (&self, row: usize, col: usize) -> Option<f64> {
        self.cell(row,col).and_then( parse_number)
    }

    /// all numeric values of a column
    pub fn numbers (&self, name: &str) -> Result<Vec<Option<f64>>> {
        let col = self.require_column(name)?;
        Ok( (0..self.len()).map( |r| self.number(r,col)).collect() )
    }

    /// replace the values of an existing column or append a new one
    pub fn set_column (&mut self, name: &str, values: Vec<Option<String>>) -> Result<()> {
        if values.len() != self.rows.len() {
            return Err( ManningsError::InvalidTable( format!("column {name} has {} values for {} rows", values.len(), self.rows.len())))
        }

        match self.column_index(name) {
            Some(col) => {
                for (row,v) in self.rows.iter_mut().zip( values.into_iter()) { row[col] = v }
            }
            None => {
                self.headers.push( name.to_string());
                for (row,v) in self.rows.iter_mut().zip( values.into_iter()) { row.push(v) }
            }
        }
        Ok(())
    }

    pub fn set_number_column (&mut self, name: &str, values: &[Option<f64>]) -> Result<()> {
        let cells: Vec<Option<String>> = values.iter().map( |v| v.filter(|v| !v.is_nan()).map(format_number)).collect();
        self.set_column( name, cells)
    }

    /// remove a column, returning false if there was none
    pub fn drop_column (&mut self, name: &str) -> bool {
        match self.column_index(name) {
            Some(col) => {
                self.headers.remove(col);
                for row in self.rows.iter_mut() { row.remove(col); }
                true
            }
            None => false
        }
    }

    pub fn rename_column (&mut self, from: &str, to: &str) -> Result<()> {
        let col = self.require_column(from)?;
        self.headers[col] = to.to_string();
        Ok(())
    }

    /// a new table with the given columns in the given order
    pub fn select (&self, names: &[&str]) -> Result<Table> {
        let cols: Vec<usize> = names.iter().map( |n| self.require_column(n)).collect::<Result<Vec<usize>>>()?;
        let headers: Vec<String> = names.iter().map( |n| n.to_string()).collect();
        let rows: Vec<Vec<Option<String>>> = self.rows.iter().map( |r| cols.iter().map( |c| r[*c].clone()).collect()).collect();
        Ok( Table { headers, rows } )
    }

    /// left join on the `on` columns, which have to exist in both tables. Each matching right row
    /// produces a separate output row, left rows without match get nulls. Non-key columns that exist in
    /// both tables are suffixed with `_x` (left) and `_y` (right)
    pub fn left_merge (&self, right: &Table, on: &[&str], key: MergeKey) -> Result<Table> {
        let left_keys: Vec<usize> = on.iter().map( |n| self.require_column(n)).collect::<Result<Vec<usize>>>()?;
        let right_keys: Vec<usize> = on.iter().map( |n| right.require_column(n)).collect::<Result<Vec<usize>>>()?;
        let right_cols: Vec<usize> = (0..right.headers.len()).filter( |c| !right_keys.contains(c)).collect();

        let is_collision = |name: &str| -> bool { !on.contains(&name) && self.has_column(name) && right.has_column(name) };

        let mut headers: Vec<String> = self.headers.iter()
            .map( |h| if is_collision(h) { format!("{h}_x") } else { h.clone() })
            .collect();
        for c in &right_cols {
            let h = &right.headers[*c];
            headers.push( if is_collision(h) { format!("{h}_y") } else { h.clone() });
        }

        let mut right_index: HashMap<Vec<String>,Vec<usize>> = HashMap::new();
        for (i,row) in right.rows.iter().enumerate() {
            if let Some(k) = row_key( row, &right_keys, key) {
                right_index.entry(k).or_default().push(i);
            }
        }

        let mut rows: Vec<Vec<Option<String>>> = Vec::with_capacity( self.rows.len());
        for row in &self.rows {
            let matches = row_key( row, &left_keys, key).and_then( |k| right_index.get(&k));
            match matches {
                Some(idxs) => {
                    for i in idxs {
                        let mut out = row.clone();
                        out.extend( right_cols.iter().map( |c| right.rows[*i][*c].clone()));
                        rows.push(out);
                    }
                }
                None => {
                    let mut out = row.clone();
                    out.extend( right_cols.iter().map( |_| None));
                    rows.push(out);
                }
            }
        }

        Ok( Table { headers, rows } )
    }
}

fn to_cell (s: &str) -> Option<String> {
    if s.is_empty() { None } else { Some(s.to_string()) }
}

pub fn parse_number (s: &str) -> Option<f64> {
    s.trim().parse::<f64>().ok().filter( |v| !v.is_nan())
}

pub fn format_number (v: f64) -> String {
    format!("{v}")
}

fn row_key (row: &[Option<String>], cols: &[usize], key: MergeKey) -> Option<Vec<String>> {
    cols.iter().map( |c| {
        let cell = row[*c].as_deref()?;
        match key {
            MergeKey::Text => Some( cell.to_string()),
            MergeKey::Numeric => parse_number(cell).map( |v| format_number( if v == 0.0 { 0.0 } else { v })),
        }
    }).collect()
}
