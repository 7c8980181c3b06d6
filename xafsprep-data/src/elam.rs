//! Parser for the Elam, Ravel and Sieber X-ray data file (`elam.dat`).
//!
//! Only the blocks needed for attenuation lookups are kept: `Element`
//! headers, `Edge` levels, and the `Photo` and `Scatter` spline tables.
//! Emission lines and Coster-Kronig blocks are skipped.

use alloc::string::{String, ToString};
use alloc::vec::Vec;

use crate::{
    CrossSectionTable, ElementRecord, PhotoabsorptionRecord, ScatteringRecord, XrayLevelRecord,
};

const HEADER_MARKER: &str = "Elam, Ravel, Sieber";

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ParseError {
    #[error("source is not an Elam data file (missing 'Elam, Ravel, Sieber' header)")]
    UnrecognizedHeader,
    #[error("line {line}: expected {expected} fields, found {found}")]
    MissingField {
        line: usize,
        expected: usize,
        found: usize,
    },
    #[error("line {line}: invalid number '{text}'")]
    InvalidNumber { line: usize, text: String },
    #[error("line {line}: '{block}' block appears before any Element header")]
    OrphanBlock { line: usize, block: String },
}

/// Parse the text of an Elam data file into a [`CrossSectionTable`].
pub fn parse_elam(text: &str) -> Result<CrossSectionTable, ParseError> {
    let lines: Vec<&str> = text.lines().collect();

    if !lines.first().is_some_and(|l| l.contains(HEADER_MARKER)) {
        return Err(ParseError::UnrecognizedHeader);
    }

    let mut table = CrossSectionTable::default();
    let mut current: Option<String> = None;

    let mut idx = 0;
    while idx < lines.len() {
        let line = lines[idx];
        let lineno = idx + 1;

        if line.starts_with('/') {
            idx += 1;
            continue;
        }

        if line.starts_with("Element") {
            // Element sym num mw rho
            let parts = fields(line, 5, lineno)?;
            let symbol = parts[1].to_string();
            table.elements.push(ElementRecord {
                symbol: symbol.clone(),
            });
            current = Some(symbol);
        } else if line.starts_with("Edge") {
            // Edge label energy yield jump
            let element = owner(&current, "Edge", lineno)?;
            let parts = fields(line, 5, lineno)?;
            table.xray_levels.push(XrayLevelRecord {
                element,
                iupac_symbol: parts[1].to_string(),
                fluorescence_yield: parse_num(parts[3], lineno)?,
            });
        } else if line.starts_with("Photo") {
            let element = owner(&current, "Photo", lineno)?;
            let (rows, next) = read_block(&lines, idx + 1, 3)?;
            table.photoabsorption.push(PhotoabsorptionRecord {
                element,
                log_energy: column(&rows, 0),
                log_photoabsorption: column(&rows, 1),
                log_photoabsorption_spline: column(&rows, 2),
            });
            idx = next;
            continue;
        } else if line.starts_with("Scatter") {
            let element = owner(&current, "Scatter", lineno)?;
            let (rows, next) = read_block(&lines, idx + 1, 5)?;
            table.scattering.push(ScatteringRecord {
                element,
                log_energy: column(&rows, 0),
                log_coherent_scatter: column(&rows, 1),
                log_coherent_scatter_spline: column(&rows, 2),
                log_incoherent_scatter: column(&rows, 3),
                log_incoherent_scatter_spline: column(&rows, 4),
            });
            idx = next;
            continue;
        }

        idx += 1;
    }

    Ok(table)
}

fn owner(current: &Option<String>, block: &str, line: usize) -> Result<String, ParseError> {
    current.clone().ok_or_else(|| ParseError::OrphanBlock {
        line,
        block: block.to_string(),
    })
}

fn fields(line: &str, expected: usize, lineno: usize) -> Result<Vec<&str>, ParseError> {
    let parts: Vec<&str> = line.split_whitespace().collect();
    if parts.len() < expected {
        return Err(ParseError::MissingField {
            line: lineno,
            expected,
            found: parts.len(),
        });
    }
    Ok(parts)
}

fn parse_num<T: core::str::FromStr>(text: &str, line: usize) -> Result<T, ParseError> {
    text.parse().map_err(|_| ParseError::InvalidNumber {
        line,
        text: text.to_string(),
    })
}

/// Read the indented numeric rows following a block header. Returns the
/// rows and the index of the first line after the block.
fn read_block(
    lines: &[&str],
    start: usize,
    width: usize,
) -> Result<(Vec<Vec<f64>>, usize), ParseError> {
    let mut rows = Vec::new();
    let mut idx = start;
    while idx < lines.len() && lines[idx].starts_with("    ") {
        let parts = fields(lines[idx], width, idx + 1)?;
        let row = parts[..width]
            .iter()
            .map(|p| parse_num::<f64>(p, idx + 1))
            .collect::<Result<Vec<f64>, _>>()?;
        rows.push(row);
        idx += 1;
    }
    Ok((rows, idx))
}

fn column(rows: &[Vec<f64>], col: usize) -> Vec<f64> {
    rows.iter().map(|r| r[col]).collect()
}
