/// Pellet radius for the sample holder (cm).
pub const PELLET_RADIUS_CM: f64 = 0.65;

/// Microns per centimetre.
pub const UM_PER_CM: f64 = 10_000.0;

/// Boron mass fraction in boron nitride (10.81 / 24.82).
pub const BN_BORON_FRACTION: f64 = 0.436;

/// Nitrogen mass fraction in boron nitride (14.01 / 24.82).
pub const BN_NITROGEN_FRACTION: f64 = 0.564;

/// eV per keV.
pub const EV_PER_KEV: f64 = 1000.0;

/// Energy range covered by the Elam tables (keV).
pub const ELAM_MIN_KEV: f64 = 0.1;
pub const ELAM_MAX_KEV: f64 = 800.0;
