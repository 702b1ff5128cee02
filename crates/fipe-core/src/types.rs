//! Domain and wire types shared across the workspace.
//!
//! Wire field names follow the upstream catalog (`codigo`, `nome`, `Valor`,
//! ...) and the persisted history format (`tipo`, `marca`, `modelo`, `ano`);
//! Rust-side names stay descriptive via `#[serde(rename)]`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Vehicle categories supported by the upstream catalog.
///
/// Serializes to the catalog's path segments (`carros`, `motos`,
/// `caminhoes`), which are also the values persisted in history records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VehicleType {
    #[serde(rename = "carros")]
    Car,
    #[serde(rename = "motos")]
    Motorcycle,
    #[serde(rename = "caminhoes")]
    Truck,
}

impl VehicleType {
    /// The path segment used in upstream catalog URLs.
    #[must_use]
    pub fn as_path_segment(self) -> &'static str {
        match self {
            Self::Car => "carros",
            Self::Motorcycle => "motos",
            Self::Truck => "caminhoes",
        }
    }
}

impl fmt::Display for VehicleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_path_segment())
    }
}

impl FromStr for VehicleType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "carros" => Ok(Self::Car),
            "motos" => Ok(Self::Motorcycle),
            "caminhoes" => Ok(Self::Truck),
            other => Err(CoreError::ParseError(format!(
                "unknown vehicle type: {other}"
            ))),
        }
    }
}

/// A catalog brand option.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Brand {
    #[serde(rename = "codigo")]
    pub code: String,
    #[serde(rename = "nome")]
    pub name: String,
}

/// A catalog model option. The upstream sends the model code as a number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Model {
    #[serde(rename = "codigo")]
    pub code: i64,
    #[serde(rename = "nome")]
    pub name: String,
}

/// Upstream response for the model stage. The `anos` sibling list is part of
/// the wire format but the model stage only consumes `modelos`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelsResponse {
    #[serde(rename = "modelos")]
    pub models: Vec<Model>,
    #[serde(rename = "anos", default)]
    pub years: Vec<YearEntry>,
}

/// A year-stage option. `label` combines a 4-digit year with a fuel
/// qualifier (e.g. "2015 Gasolina"); `code` is the upstream key ("2015-1").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearEntry {
    #[serde(rename = "codigo")]
    pub code: String,
    #[serde(rename = "nome")]
    pub label: String,
}

/// The priced result for a fully specified (type, brand, model, year) tuple.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricedVehicle {
    #[serde(rename = "Valor")]
    pub value: String,
    #[serde(rename = "Marca")]
    pub brand: String,
    #[serde(rename = "Modelo")]
    pub model: String,
    #[serde(rename = "AnoModelo")]
    pub model_year: i32,
    #[serde(rename = "Combustivel")]
    pub fuel: String,
    #[serde(rename = "CodigoFipe")]
    pub fipe_code: String,
    #[serde(rename = "MesReferencia")]
    pub reference_month: String,
    #[serde(rename = "TipoVeiculo")]
    pub vehicle_type: i32,
    #[serde(rename = "SiglaCombustivel")]
    pub fuel_acronym: String,
}

/// One completed lookup, as persisted by the history store.
///
/// `vehicle_type` stays a free string on the read side: the store accepts
/// arbitrary records, and display tolerates values outside the known
/// catalog segments as long as they are non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryRecord {
    #[serde(rename = "tipo")]
    pub vehicle_type: String,
    #[serde(rename = "marca")]
    pub brand: String,
    #[serde(rename = "modelo")]
    pub model: String,
    #[serde(rename = "ano")]
    pub year: String,
}

impl HistoryRecord {
    /// Lenient typed view over a stored value. `None` when the value is not
    /// an object carrying all four fields.
    #[must_use]
    pub fn from_value(value: &serde_json::Value) -> Option<Self> {
        serde_json::from_value(value.clone()).ok()
    }

    /// A record is displayable when all four fields are non-empty.
    #[must_use]
    pub fn is_displayable(&self) -> bool {
        !self.vehicle_type.is_empty()
            && !self.brand.is_empty()
            && !self.model.is_empty()
            && !self.year.is_empty()
    }
}

/// The consuming-layer view of a stored history list: typed, displayable
/// records only. Malformed entries are skipped here, never deleted from
/// storage.
#[must_use]
pub fn displayable_records(values: &[serde_json::Value]) -> Vec<HistoryRecord> {
    values
        .iter()
        .filter_map(HistoryRecord::from_value)
        .filter(HistoryRecord::is_displayable)
        .collect()
}
