use std::path::Path;

use log::debug;
use xafsprep_data::{CrossSectionTable, parse_elam};

use crate::constants::{ELAM_MAX_KEV, ELAM_MIN_KEV, EV_PER_KEV};
use crate::error::{LookupError, TableLoadError};
use crate::provider::{CrossSectionData, CrossSectionProvider};
use crate::spline::Spline;

/// Edges whose fluorescence yields are reported, in [`CrossSectionData::yields`] order.
const YIELD_EDGES: [&str; 4] = ["K", "L1", "L2", "L3"];

/// Cross-section provider backed by the Elam, Ravel and Sieber tables.
///
/// Photoabsorption and the two scattering channels are spline-interpolated
/// in log-log space; the total is their sum.
#[derive(Debug)]
pub struct ElamTable {
    table: CrossSectionTable,
}

impl ElamTable {
    pub fn new(table: CrossSectionTable) -> Self {
        ElamTable { table }
    }

    /// Parse the raw text of an `elam.dat` file.
    pub fn from_elam_text(text: &str) -> Result<Self, TableLoadError> {
        Ok(Self::new(parse_elam(text)?))
    }

    /// Decode a zstd-compressed postcard blob written by `xafsprep-generate`.
    pub fn from_compressed(bytes: &[u8]) -> Result<Self, TableLoadError> {
        let mut decoder = ruzstd::decoding::StreamingDecoder::new(bytes)
            .map_err(|e| TableLoadError::Decompress(e.to_string()))?;
        let mut decompressed = Vec::new();
        std::io::Read::read_to_end(&mut decoder, &mut decompressed)
            .map_err(|e| TableLoadError::Decompress(e.to_string()))?;

        let table: CrossSectionTable = postcard::from_bytes(&decompressed)
            .map_err(|e| TableLoadError::Decode(e.to_string()))?;
        Ok(Self::new(table))
    }

    /// Load a table from disk. `.dat` and `.txt` files are parsed as raw
    /// Elam text; anything else is treated as a compressed blob.
    pub fn open(path: &Path) -> Result<Self, TableLoadError> {
        let read_err = |source| TableLoadError::Read {
            path: path.display().to_string(),
            source,
        };
        let is_text = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("dat") || e.eq_ignore_ascii_case("txt"));

        if is_text {
            let text = std::fs::read_to_string(path).map_err(read_err)?;
            Self::from_elam_text(&text)
        } else {
            let bytes = std::fs::read(path).map_err(read_err)?;
            Self::from_compressed(&bytes)
        }
    }

    pub fn table(&self) -> &CrossSectionTable {
        &self.table
    }

    pub fn len(&self) -> usize {
        self.table.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.elements.is_empty()
    }

    fn spline_at(
        &self,
        symbol: &str,
        x: &[f64],
        y: &[f64],
        y2: &[f64],
        log_energy: f64,
    ) -> Result<f64, LookupError> {
        let spline = Spline::new(x, y, y2).ok_or_else(|| {
            LookupError::TableError(format!("malformed spline table for {symbol}"))
        })?;
        Ok(spline.eval(log_energy).exp())
    }
}

impl CrossSectionProvider for ElamTable {
    fn lookup(&self, symbol: &str, energy_kev: f64) -> Result<CrossSectionData, LookupError> {
        if !(ELAM_MIN_KEV..=ELAM_MAX_KEV).contains(&energy_kev) {
            return Err(LookupError::EnergyOutOfRange {
                energy_kev,
                min_kev: ELAM_MIN_KEV,
                max_kev: ELAM_MAX_KEV,
            });
        }

        let sym = self
            .table
            .element(symbol)
            .map(|e| e.symbol.as_str())
            .ok_or_else(|| LookupError::UnknownElement(symbol.to_string()))?;

        let photo_row = self
            .table
            .photo(sym)
            .ok_or_else(|| LookupError::TableError(format!("no photoabsorption data for {sym}")))?;
        let scatter_row = self
            .table
            .scatter(sym)
            .ok_or_else(|| LookupError::TableError(format!("no scattering data for {sym}")))?;

        let log_en = (energy_kev * EV_PER_KEV).ln();

        let photo = self.spline_at(
            sym,
            &photo_row.log_energy,
            &photo_row.log_photoabsorption,
            &photo_row.log_photoabsorption_spline,
            log_en,
        )?;
        let coherent = self.spline_at(
            sym,
            &scatter_row.log_energy,
            &scatter_row.log_coherent_scatter,
            &scatter_row.log_coherent_scatter_spline,
            log_en,
        )?;
        let incoherent = self.spline_at(
            sym,
            &scatter_row.log_energy,
            &scatter_row.log_incoherent_scatter,
            &scatter_row.log_incoherent_scatter_spline,
            log_en,
        )?;

        let mut yields = [0.0; 4];
        for level in self.table.levels(sym) {
            if let Some(slot) = YIELD_EDGES.iter().position(|&e| e == level.iupac_symbol) {
                yields[slot] = level.fluorescence_yield;
            }
        }

        let data = CrossSectionData::from_parts(photo, coherent, incoherent, yields);
        debug!(
            "{sym} at {energy_kev} keV: total {:.4} cm^2/g",
            data.mass_absorption()
        );
        Ok(data)
    }
}
