//! Structured sample reports and their text rendering.
//!
//! The same text goes to the screen and to `<samples_dir>/<name>.txt`.

use std::fmt;
use std::path::{Path, PathBuf};

use log::info;

const BORDER: &str = "------------------------------------";

/// Snapshot of a sample suitable for rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleReport {
    pub name: String,
    /// `(mass_fraction, element)` pairs in composition order.
    pub composition: Vec<(f64, String)>,
    pub density: Option<f64>,
    /// `None` until the sample has been computed.
    pub pellet: Option<PelletReport>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PelletReport {
    pub energy_kev: f64,
    pub mu: f64,
    pub absorption_length_um: f64,
    pub radius_cm: f64,
    pub volume_cm3: f64,
    pub mass_g: f64,
    /// `(element_mass, element)` pairs in composition order.
    pub masses: Vec<(f64, String)>,
}

impl SampleReport {
    /// Path of the report file for this sample under `dir`.
    pub fn file_path(&self, dir: &Path) -> PathBuf {
        dir.join(format!("{}.txt", self.name))
    }

    /// Write the rendered report to `<dir>/<name>.txt`, creating `dir` if
    /// needed and overwriting any previous report.
    pub fn write_to_dir(&self, dir: &Path) -> std::io::Result<PathBuf> {
        std::fs::create_dir_all(dir)?;
        let path = self.file_path(dir);
        std::fs::write(&path, self.to_string())?;
        info!("wrote report for '{}' to {}", self.name, path.display());
        Ok(path)
    }
}

impl fmt::Display for SampleReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f)?;
        writeln!(f, "{BORDER}")?;
        writeln!(f)?;
        writeln!(f, "Sample Name: {}", self.name)?;
        writeln!(f)?;
        writeln!(f, "Sample Composition:")?;
        writeln!(f)?;
        for (fraction, element) in &self.composition {
            writeln!(f, "{}  {element}", format_general(*fraction, 5))?;
        }
        writeln!(f)?;

        let density = self
            .density
            .map_or_else(|| "not set".to_string(), |d| format_general(d, 5));

        match &self.pellet {
            Some(p) => {
                writeln!(f, "Photon Energy (keV): {}", format_general(p.energy_kev, 5))?;
                writeln!(f, "Absorption Coefficient (1/cm): {}", format_general(p.mu, 5))?;
                writeln!(
                    f,
                    "Absorption Length (um): {}",
                    format_general(p.absorption_length_um, 5)
                )?;
                writeln!(f)?;
                writeln!(f, "Pellet Density (g/cm^3): {density}")?;
                writeln!(f, "Pellet Radius (cm): {}", format_general(p.radius_cm, 5))?;
                writeln!(f, "Pellet Volume (cm^3): {}", format_general(p.volume_cm3, 5))?;
                writeln!(f, "Pellet Mass (g): {}", format_general(p.mass_g, 5))?;
                writeln!(f)?;
                writeln!(f, "Pellet Masses by Element (g):")?;
                writeln!(f)?;
                for (mass, element) in &p.masses {
                    writeln!(f, "{}  {element}", format_general(*mass, 5))?;
                }
            }
            None => {
                writeln!(f, "Absorption Coefficient (1/cm): not computed")?;
                writeln!(f, "Absorption Length (um): not computed")?;
                writeln!(f)?;
                writeln!(f, "Pellet Density (g/cm^3): {density}")?;
                writeln!(f, "Pellet Radius (cm): not computed")?;
                writeln!(f, "Pellet Volume (cm^3): not computed")?;
                writeln!(f, "Pellet Mass (g): not computed")?;
            }
        }

        writeln!(f)?;
        writeln!(f, "{BORDER}")?;
        writeln!(f)
    }
}

/// Format with `precision` significant digits, switching to exponent
/// notation for very large or small magnitudes (like C's `%g`).
pub fn format_general(value: f64, precision: usize) -> String {
    if value == 0.0 || !value.is_finite() {
        return value.to_string();
    }
    let precision = precision.max(1);

    let sci = format!("{:.*e}", precision - 1, value);
    let Some((mantissa, exp)) = sci.split_once('e') else {
        return sci;
    };
    let Ok(exp) = exp.parse::<i32>() else {
        return sci;
    };

    if exp < -4 || exp >= precision as i32 {
        let sign = if exp < 0 { '-' } else { '+' };
        format!("{}e{sign}{:02}", trim_fraction(mantissa), exp.abs())
    } else {
        let decimals = (precision as i32 - 1 - exp) as usize;
        trim_fraction(&format!("{value:.decimals$}")).to_string()
    }
}

fn trim_fraction(s: &str) -> &str {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.')
    } else {
        s
    }
}
