use phf::phf_map;

/// Radius used for any element missing from [`VDW_RADII`] (carbon).
pub const DEFAULT_VDW_RADIUS: f64 = 1.7;

/// Bondi-style van der Waals radii in Angstroms, keyed by uppercase element symbol.
pub static VDW_RADII: phf::Map<&'static str, f64> = phf_map! {
    "H" => 1.2,
    "C" => 1.7,
    "N" => 1.55,
    "O" => 1.52,
    "S" => 1.8,
    "P" => 1.8,
    "F" => 1.47,
    "CL" => 1.75,
    "BR" => 1.85,
    "I" => 1.98,
};

#[inline]
pub fn vdw_radius(element: &str) -> f64 {
    VDW_RADII.get(element).copied().unwrap_or(DEFAULT_VDW_RADIUS)
}
