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

//! in-memory representation of vector layers. We read whole layers into `FeatureSet`s of geo
//! geometries plus ordered attribute lists, transform them with plain Rust code and write
//! the results back out as GeoPackage layers

use std::{fmt, path::Path};
use geo::Geometry;
use gdal::{Dataset, DriverManager};
use gdal::vector::{FieldValue, LayerAccess, LayerOptions, OGRFieldType, OGRwkbGeometryType, ToGdal};
use tracing::debug;

use fim_common::{HydroId, fs::remove_file_if_exists};
use crate::{srs_from_wkt, errors::{Result, FimGdalError, misc_error}};

/// a single attribute value of a feature
#[derive(Debug,Clone,PartialEq)]
pub enum AttrValue {
    Null,
    Int(i64),
    Real(f64),
    Text(String),
}

impl AttrValue {
    pub fn is_null (&self) -> bool { matches!(self, AttrValue::Null) }

    pub fn as_f64 (&self) -> Option<f64> {
        match self {
            AttrValue::Int(v) => Some(*v as f64),
            AttrValue::Real(v) => Some(*v),
            AttrValue::Text(s) => s.trim().parse().ok(),
            AttrValue::Null => None,
        }
    }

    /// text as it would show up in a CSV cell. Integral reals are printed without fraction
    pub fn as_text (&self) -> Option<String> {
        match self {
            AttrValue::Int(v) => Some(v.to_string()),
            AttrValue::Real(v) => Some(v.to_string()),
            AttrValue::Text(s) => Some(s.clone()),
            AttrValue::Null => None,
        }
    }

    /// ids can be stored as integer, real or (zero padded) text fields
    pub fn as_hydro_id (&self) -> Option<HydroId> {
        match self {
            AttrValue::Int(v) => Some(HydroId::new(*v)),
            AttrValue::Real(v) => HydroId::from_real(*v).ok(),
            AttrValue::Text(s) => HydroId::parse_text(s).ok(),
            AttrValue::Null => None,
        }
    }

    fn field_type (&self) -> Option<OGRFieldType::Type> {
        match self {
            AttrValue::Int(_) => Some(OGRFieldType::OFTInteger64),
            AttrValue::Real(_) => Some(OGRFieldType::OFTReal),
            AttrValue::Text(_) => Some(OGRFieldType::OFTString),
            AttrValue::Null => None,
        }
    }

    fn to_field_value (&self, field_type: OGRFieldType::Type) -> Option<FieldValue> {
        match (self, field_type) {
            (AttrValue::Null, _) => None,
            (AttrValue::Int(v), OGRFieldType::OFTInteger64) => Some(FieldValue::Integer64Value(*v)),
            (AttrValue::Int(v), OGRFieldType::OFTReal) => Some(FieldValue::RealValue(*v as f64)),
            (AttrValue::Real(v), OGRFieldType::OFTReal) => Some(FieldValue::RealValue(*v)),
            (v, _) => v.as_text().map(FieldValue::StringValue),
        }
    }
}

impl From<Option<FieldValue>> for AttrValue {
    fn from (fv: Option<FieldValue>) -> Self {
        match fv {
            None => AttrValue::Null,
            Some(FieldValue::IntegerValue(v)) => AttrValue::Int(v as i64),
            Some(FieldValue::Integer64Value(v)) => AttrValue::Int(v),
            Some(FieldValue::RealValue(v)) => AttrValue::Real(v),
            Some(FieldValue::StringValue(s)) => AttrValue::Text(s),
            Some(FieldValue::IntegerListValue(vs)) => AttrValue::Text( join_list(&vs)),
            Some(FieldValue::Integer64ListValue(vs)) => AttrValue::Text( join_list(&vs)),
            Some(FieldValue::RealListValue(vs)) => AttrValue::Text( join_list(&vs)),
            Some(FieldValue::StringListValue(vs)) => AttrValue::Text( vs.join(",")),
            Some(FieldValue::DateValue(d)) => AttrValue::Text( d.to_string()),
            Some(FieldValue::DateTimeValue(dt)) => AttrValue::Text( dt.to_rfc3339()),
        }
    }
}

fn join_list<T: ToString> (vs: &[T]) -> String {
    vs.iter().map(|v| v.to_string()).collect::<Vec<String>>().join(",")
}

impl fmt::Display for AttrValue {
    fn fmt (&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttrValue::Null => write!(f, ""),
            AttrValue::Int(v) => write!(f, "{v}"),
            AttrValue::Real(v) => write!(f, "{v}"),
            AttrValue::Text(s) => write!(f, "{s}"),
        }
    }
}

/// a feature with an optional geometry and attributes in layer field order
#[derive(Debug,Clone,PartialEq)]
pub struct FeatureRecord {
    pub geometry: Option<Geometry<f64>>,
    pub attributes: Vec<(String,AttrValue)>,
}

impl FeatureRecord {
    pub fn new (geometry: Option<Geometry<f64>>) -> Self {
        FeatureRecord { geometry, attributes: Vec::new() }
    }

    pub fn with_attr (mut self, name: &str, value: AttrValue) -> Self {
        self.set( name, value);
        self
    }

    pub fn get (&self, name: &str) -> Option<&AttrValue> {
        self.attributes.iter().find( |(n,_)| n == name).map( |(_,v)| v)
    }

    pub fn has (&self, name: &str) -> bool {
        self.attributes.iter().any( |(n,_)| n == name)
    }

    /// replace the value of an existing attribute or append a new one
    pub fn set (&mut self, name: &str, value: AttrValue) {
        if let Some(e) = self.attributes.iter_mut().find( |(n,_)| n == name) {
            e.1 = value;
        } else {
            self.attributes.push( (name.to_string(), value));
        }
    }

    pub fn remove (&mut self, name: &str) -> Option<AttrValue> {
        let idx = self.attributes.iter().position( |(n,_)| n == name)?;
        Some( self.attributes.remove(idx).1 )
    }

    pub fn hydro_id (&self, name: &str) -> Option<HydroId> {
        self.get(name).and_then( |v| v.as_hydro_id())
    }
}

/// all features of a layer plus the WKT of its spatial reference system
#[derive(Debug,Clone,PartialEq,Default)]
pub struct FeatureSet {
    pub srs_wkt: Option<String>,
    pub features: Vec<FeatureRecord>,
}

impl FeatureSet {
    pub fn new (srs_wkt: Option<String>, features: Vec<FeatureRecord>) -> Self {
        FeatureSet { srs_wkt, features }
    }

    pub fn len (&self) -> usize { self.features.len() }
    pub fn is_empty (&self) -> bool { self.features.is_empty() }

    /// ordered union of all attribute names (first appearance wins)
    pub fn field_names (&self) -> Vec<String> {
        let mut names: Vec<String> = Vec::new();
        for f in &self.features {
            for (n,_) in &f.attributes {
                if !names.contains(n) { names.push( n.clone()) }
            }
        }
        names
    }

    /// the field type for column `name`: text if any value is text, real if any value is real, integer otherwise.
    /// Columns without any non-null value are written as text
    fn field_type (&self, name: &str) -> OGRFieldType::Type {
        let mut ft: Option<OGRFieldType::Type> = None;
        for v in self.features.iter().filter_map( |f| f.get(name)) {
            match (ft, v.field_type()) {
                (_, None) => {}
                (None, t) => ft = t,
                (Some(OGRFieldType::OFTString), _) => {}
                (_, Some(OGRFieldType::OFTString)) => ft = Some(OGRFieldType::OFTString),
                (Some(OGRFieldType::OFTInteger64), Some(OGRFieldType::OFTReal)) => ft = Some(OGRFieldType::OFTReal),
                _ => {}
            }
        }
        ft.unwrap_or(OGRFieldType::OFTString)
    }
}

/// read the first layer of a vector dataset
pub fn read_feature_set (path: impl AsRef<Path>) -> Result<FeatureSet> {
    read_feature_set_layer( path, None)
}

/// read the named layer (or the first layer if `layer_name` is `None`) of a vector dataset
pub fn read_feature_set_layer (path: impl AsRef<Path>, layer_name: Option<&str>) -> Result<FeatureSet> {
    let path = path.as_ref();
    let ds = Dataset::open(path)?;

    let mut layer = match layer_name {
        Some(name) => ds.layer_by_name(name).map_err(|_| FimGdalError::NoSuchLayer(name.to_string()))?,
        None => ds.layer(0).map_err(|_| FimGdalError::NoSuchLayer(format!("0 in {:?}", path)))?,
    };

    let srs_wkt = match layer.spatial_ref() {
        Some(srs) => Some( srs.to_wkt()?),
        None => None
    };

    let mut features: Vec<FeatureRecord> = Vec::new();
    for feature in layer.features() {
        let geometry = match feature.geometry() {
            Some(g) => Some( g.to_geo()?),
            None => None
        };
        let attributes: Vec<(String,AttrValue)> = feature.fields().map( |(n,v)| (n, AttrValue::from(v))).collect();
        features.push( FeatureRecord { geometry, attributes });
    }
    debug!("read {} features from {:?}", features.len(), path);

    Ok( FeatureSet { srs_wkt, features } )
}

/// write a feature set as a single layer GeoPackage. An existing file is replaced
pub fn write_gpkg (path: impl AsRef<Path>, layer_name: &str, fs: &FeatureSet) -> Result<()> {
    let path = path.as_ref();
    remove_file_if_exists(path)?;

    let driver = DriverManager::get_driver_by_name("GPKG")?;
    let mut ds = driver.create_vector_only(path)?;

    let srs = match &fs.srs_wkt {
        Some(wkt) => Some( srs_from_wkt(wkt)?),
        None => None
    };

    let field_names = fs.field_names();
    let field_types: Vec<OGRFieldType::Type> = field_names.iter().map(|n| fs.field_type(n)).collect();
    {
        let layer = ds.create_layer( LayerOptions {
            name: layer_name,
            srs: srs.as_ref(),
            ty: OGRwkbGeometryType::wkbUnknown,
            ..Default::default()
        })?;
        let defs: Vec<(&str,OGRFieldType::Type)> = field_names.iter().map(|n| n.as_str()).zip( field_types.iter().copied()).collect();
        layer.create_defn_fields( &defs)?;
    }

    let txn = ds.start_transaction()?;
    {
        let mut layer = txn.layer_by_name(layer_name)?;
        for f in &fs.features {
            let geom = match &f.geometry {
                Some(g) => g.to_gdal()?,
                None => return Err( misc_error("feature without geometry")),
            };

            let mut names: Vec<&str> = Vec::with_capacity( f.attributes.len());
            let mut values: Vec<FieldValue> = Vec::with_capacity( f.attributes.len());
            for (name,ft) in field_names.iter().zip( field_types.iter()) {
                if let Some(fv) = f.get(name).and_then( |v| v.to_field_value(*ft)) {
                    names.push( name.as_str());
                    values.push( fv);
                }
            }
            layer.create_feature_fields( geom, &names, &values)?;
        }
    }
    txn.commit()?;
    debug!("wrote {} features to {:?}", fs.len(), path);

    Ok(())
}
