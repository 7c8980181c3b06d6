#![no_std]

extern crate alloc;

pub mod elam;

use alloc::string::String;
use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

pub use elam::{ParseError, parse_elam};

/// Per-element cross-section table, as compiled into the binary blob.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct CrossSectionTable {
    pub elements: Vec<ElementRecord>,
    pub xray_levels: Vec<XrayLevelRecord>,
    pub photoabsorption: Vec<PhotoabsorptionRecord>,
    pub scattering: Vec<ScatteringRecord>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ElementRecord {
    pub symbol: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct XrayLevelRecord {
    pub element: String,
    pub iupac_symbol: String,
    pub fluorescence_yield: f64,
}

/// Photoabsorption in log-log space: `ln(eV)` against `ln(cm²/g)`, with
/// the second derivatives needed for cubic spline evaluation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhotoabsorptionRecord {
    pub element: String,
    pub log_energy: Vec<f64>,
    pub log_photoabsorption: Vec<f64>,
    pub log_photoabsorption_spline: Vec<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScatteringRecord {
    pub element: String,
    pub log_energy: Vec<f64>,
    pub log_coherent_scatter: Vec<f64>,
    pub log_coherent_scatter_spline: Vec<f64>,
    pub log_incoherent_scatter: Vec<f64>,
    pub log_incoherent_scatter_spline: Vec<f64>,
}

impl CrossSectionTable {
    pub fn element(&self, symbol: &str) -> Option<&ElementRecord> {
        self.elements
            .iter()
            .find(|e| e.symbol.eq_ignore_ascii_case(symbol))
    }

    pub fn photo(&self, symbol: &str) -> Option<&PhotoabsorptionRecord> {
        self.photoabsorption.iter().find(|r| r.element == symbol)
    }

    pub fn scatter(&self, symbol: &str) -> Option<&ScatteringRecord> {
        self.scattering.iter().find(|r| r.element == symbol)
    }

    /// Edge records for one element, in file order.
    pub fn levels<'a>(&'a self, symbol: &'a str) -> impl Iterator<Item = &'a XrayLevelRecord> {
        self.xray_levels.iter().filter(move |l| l.element == symbol)
    }
}
