#![allow(dead_code)]

use std::collections::HashMap;
use std::path::PathBuf;

use xafsprep::{CrossSectionData, CrossSectionProvider, LookupError};

/// Energy-independent totals per element.
pub struct FixedProvider {
    totals: HashMap<String, f64>,
}

impl FixedProvider {
    pub fn new(pairs: &[(&str, f64)]) -> Self {
        FixedProvider {
            totals: pairs.iter().map(|&(s, v)| (s.to_string(), v)).collect(),
        }
    }
}

impl CrossSectionProvider for FixedProvider {
    fn lookup(&self, symbol: &str, _energy_kev: f64) -> Result<CrossSectionData, LookupError> {
        self.totals
            .get(symbol)
            .map(|&total| CrossSectionData::from_parts(total, 0.0, 0.0, [0.0; 4]))
            .ok_or_else(|| LookupError::UnknownElement(symbol.to_string()))
    }
}

/// Rough 10 keV totals (cm²/g) for the elements used across the tests.
pub fn provider() -> FixedProvider {
    FixedProvider::new(&[
        ("Fe", 171.0),
        ("O", 5.95),
        ("B", 2.3),
        ("N", 3.7),
        ("Zn", 49.0),
        ("Ar", 0.0),
        ("Ne", 0.0),
    ])
}

/// Fresh scratch directory for one test.
pub fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("xafsprep-{}-{name}", std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);
    dir
}
