//! A single pellet sample: composition, density and derived pellet geometry.

use std::f64::consts::PI;

use log::info;

use crate::constants::{BN_BORON_FRACTION, BN_NITROGEN_FRACTION, PELLET_RADIUS_CM, UM_PER_CM};
use crate::error::{PrepError, Result};
use crate::provider::CrossSectionProvider;
use crate::report::{PelletReport, SampleReport, format_general};

/// One element of a sample and its mass fraction.
#[derive(Debug, Clone, PartialEq)]
pub struct Constituent {
    pub element: String,
    pub mass_fraction: f64,
}

/// Quantities derived by [`Sample::compute`] at one photon energy.
///
/// `masses_g` is parallel to the sample's constituents at the time of the
/// computation; any change to the composition discards the pellet.
#[derive(Debug, Clone, PartialEq)]
pub struct Pellet {
    pub energy_kev: f64,
    /// Linear absorption coefficient (1/cm).
    pub mu: f64,
    pub absorption_length_um: f64,
    pub radius_cm: f64,
    pub volume_cm3: f64,
    pub mass_g: f64,
    pub masses_g: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    name: String,
    constituents: Vec<Constituent>,
    density: Option<f64>,
    pellet: Option<Pellet>,
}

impl Sample {
    pub fn new(name: impl Into<String>) -> Self {
        Sample {
            name: name.into(),
            constituents: Vec::new(),
            density: None,
            pellet: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn rename(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn constituents(&self) -> &[Constituent] {
        &self.constituents
    }

    pub fn elements(&self) -> impl Iterator<Item = &str> {
        self.constituents.iter().map(|c| c.element.as_str())
    }

    pub fn mass_fractions(&self) -> impl Iterator<Item = f64> + '_ {
        self.constituents.iter().map(|c| c.mass_fraction)
    }

    /// Fraction of `element`, matched exactly.
    pub fn fraction_of(&self, element: &str) -> Option<f64> {
        self.constituents
            .iter()
            .find(|c| c.element == element)
            .map(|c| c.mass_fraction)
    }

    /// Bulk density in g/cm³, if set.
    pub fn density(&self) -> Option<f64> {
        self.density
    }

    /// Energy of the last successful computation, in keV.
    pub fn energy(&self) -> Option<f64> {
        self.pellet.as_ref().map(|p| p.energy_kev)
    }

    pub fn pellet(&self) -> Option<&Pellet> {
        self.pellet.as_ref()
    }

    /// Replace the composition and density. Previously derived values are
    /// discarded.
    pub fn set_composition(
        &mut self,
        elements: Vec<String>,
        mass_fractions: Vec<f64>,
        density: f64,
    ) -> Result<()> {
        if elements.len() != mass_fractions.len() {
            return Err(PrepError::Validation(format!(
                "{} elements given with {} mass fractions",
                elements.len(),
                mass_fractions.len()
            )));
        }
        self.constituents = elements
            .into_iter()
            .zip(mass_fractions)
            .map(|(element, mass_fraction)| Constituent {
                element,
                mass_fraction,
            })
            .collect();
        self.density = Some(density);
        self.pellet = None;
        Ok(())
    }

    /// Compute the absorption coefficient and pellet geometry at
    /// `energy_kev`.
    ///
    /// Either every derived value is replaced or, on error, none is.
    pub fn compute<P>(&mut self, energy_kev: f64, provider: &P) -> Result<&Pellet>
    where
        P: CrossSectionProvider + ?Sized,
    {
        let density = self
            .density
            .ok_or_else(|| PrepError::MissingDensity(self.name.clone()))?;
        if !(density.is_finite() && density > 0.0) {
            return Err(PrepError::InvalidComputation(format!(
                "density must be positive, got {density} g/cm^3"
            )));
        }
        if !(energy_kev.is_finite() && energy_kev > 0.0) {
            return Err(PrepError::InvalidComputation(format!(
                "photon energy must be positive, got {energy_kev} keV"
            )));
        }

        let mut accum_mu = 0.0;
        for c in &self.constituents {
            let xs = provider
                .lookup(&c.element, energy_kev)
                .map_err(|source| PrepError::Provider {
                    element: c.element.clone(),
                    source,
                })?;
            accum_mu += c.mass_fraction * xs.mass_absorption();
        }

        let mu = accum_mu * density;
        if !(mu.is_finite() && mu > 0.0) {
            return Err(PrepError::InvalidComputation(format!(
                "absorption coefficient of '{}' is {mu} 1/cm at {energy_kev} keV",
                self.name
            )));
        }

        let absorption_length_um = UM_PER_CM / mu;
        let radius_cm = PELLET_RADIUS_CM;
        let volume_cm3 = PI * radius_cm * radius_cm * (absorption_length_um / UM_PER_CM);
        let mass_g = volume_cm3 * density;
        let masses_g = self
            .constituents
            .iter()
            .map(|c| c.mass_fraction * mass_g)
            .collect();

        info!(
            "computed '{}' at {energy_kev} keV: mu = {mu:.4} 1/cm, pellet mass = {mass_g:.5} g",
            self.name
        );

        Ok(&*self.pellet.insert(Pellet {
            energy_kev,
            mu,
            absorption_length_um,
            radius_cm,
            volume_cm3,
            mass_g,
            masses_g,
        }))
    }

    /// Mix in a boron nitride binder making up `percent` of the total mass.
    ///
    /// B and N are appended if missing; every other constituent is scaled by
    /// `1 - percent`. `percent` is expected in `[0, 1]` and is not checked.
    /// Derived values are discarded.
    pub fn dilute(&mut self, percent: f64) {
        let b = self.index_or_insert("B");
        let n = self.index_or_insert("N");

        for (i, c) in self.constituents.iter_mut().enumerate() {
            if i != b && i != n {
                c.mass_fraction *= 1.0 - percent;
            }
        }

        self.constituents[b].mass_fraction = BN_BORON_FRACTION * percent;
        self.constituents[n].mass_fraction = BN_NITROGEN_FRACTION * percent;
        self.pellet = None;
    }

    /// A diluted copy named `<name>_%_<percent>`. `self` is left untouched.
    pub fn diluted(&self, percent: f64) -> Sample {
        let mut copy = self.clone();
        copy.dilute(percent);
        copy.name = format!("{}_%_{}", self.name, format_general(percent, 6));
        copy
    }

    fn index_or_insert(&mut self, element: &str) -> usize {
        if let Some(i) = self.constituents.iter().position(|c| c.element == element) {
            return i;
        }
        self.constituents.push(Constituent {
            element: element.to_string(),
            mass_fraction: 0.0,
        });
        self.constituents.len() - 1
    }

    pub fn report(&self) -> SampleReport {
        SampleReport {
            name: self.name.clone(),
            composition: self
                .constituents
                .iter()
                .map(|c| (c.mass_fraction, c.element.clone()))
                .collect(),
            density: self.density,
            pellet: self.pellet.as_ref().map(|p| PelletReport {
                energy_kev: p.energy_kev,
                mu: p.mu,
                absorption_length_um: p.absorption_length_um,
                radius_cm: p.radius_cm,
                volume_cm3: p.volume_cm3,
                mass_g: p.mass_g,
                masses: p
                    .masses_g
                    .iter()
                    .zip(&self.constituents)
                    .map(|(&m, c)| (m, c.element.clone()))
                    .collect(),
            }),
        }
    }
}
