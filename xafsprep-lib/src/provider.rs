//! Cross-section lookup seam.
//!
//! The engine asks a [`CrossSectionProvider`] for one element at one photon
//! energy and only reads the total mass absorption term. Anything that can
//! answer that question (tabulated data, a fixed map in tests) can drive a
//! session.

use crate::error::LookupError;

/// Index of the photoelectric term in [`CrossSectionData::cross_sections`].
pub const PHOTO: usize = 0;
/// Index of the coherent scattering term.
pub const COHERENT: usize = 1;
/// Index of the incoherent scattering term.
pub const INCOHERENT: usize = 2;
/// Index of the total term: the mass absorption cross-section.
pub const TOTAL: usize = 3;

/// Cross-sections (cm²/g) and fluorescence yields for one element at one
/// energy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CrossSectionData {
    /// Photoelectric, coherent, incoherent and total, in that order.
    pub cross_sections: [f64; 4],
    /// Fluorescence yields of the K, L1, L2 and L3 edges (0 when absent).
    pub yields: [f64; 4],
}

impl CrossSectionData {
    /// Builds a record whose total is the sum of the three partial terms.
    pub fn from_parts(photo: f64, coherent: f64, incoherent: f64, yields: [f64; 4]) -> Self {
        let mut cross_sections = [0.0; 4];
        cross_sections[PHOTO] = photo;
        cross_sections[COHERENT] = coherent;
        cross_sections[INCOHERENT] = incoherent;
        cross_sections[TOTAL] = photo + coherent + incoherent;
        CrossSectionData {
            cross_sections,
            yields,
        }
    }

    /// The term the mixture calculation accumulates.
    pub fn mass_absorption(&self) -> f64 {
        self.cross_sections[TOTAL]
    }
}

pub trait CrossSectionProvider {
    fn lookup(&self, symbol: &str, energy_kev: f64) -> Result<CrossSectionData, LookupError>;
}

impl<P: CrossSectionProvider + ?Sized> CrossSectionProvider for &P {
    fn lookup(&self, symbol: &str, energy_kev: f64) -> Result<CrossSectionData, LookupError> {
        (**self).lookup(symbol, energy_kev)
    }
}

impl<P: CrossSectionProvider + ?Sized> CrossSectionProvider for Box<P> {
    fn lookup(&self, symbol: &str, energy_kev: f64) -> Result<CrossSectionData, LookupError> {
        (**self).lookup(symbol, energy_kev)
    }
}
