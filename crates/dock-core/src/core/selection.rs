use crate::core::models::atom::Atom;
use crate::engine::config::AtomMode;

pub const ALPHA_CARBON_NAME: &str = "CA";
pub const BACKBONE_NAMES: [&str; 4] = ["N", "CA", "C", "O"];

/// Returns `true` if `atom` belongs to the subset described by `mode`.
#[inline]
pub fn matches(atom: &Atom, mode: AtomMode) -> bool {
    match mode {
        AtomMode::AlphaCarbon => atom.name == ALPHA_CARBON_NAME,
        AtomMode::Backbone => BACKBONE_NAMES.contains(&atom.name.as_str()),
        AtomMode::Heavy => !atom.is_hydrogen(),
    }
}

/// Filters an atom set to the subset named by `mode`, preserving input order.
pub fn select_atoms(atoms: &[Atom], mode: AtomMode) -> Vec<Atom> {
    atoms
        .iter()
        .filter(|atom| matches(atom, mode))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Point3;

    fn residue() -> Vec<Atom> {
        ["N", "CA", "C", "O", "CB", "H", "HA", "OG"]
            .iter()
            .enumerate()
            .map(|(i, name)| Atom::new(name, Point3::new(i as f64, 0.0, 0.0)))
            .collect()
    }

    fn names(atoms: &[Atom]) -> Vec<&str> {
        atoms.iter().map(|a| a.name.as_str()).collect()
    }

    #[test]
    fn alpha_carbon_mode_keeps_only_ca() {
        assert_eq!(names(&select_atoms(&residue(), AtomMode::AlphaCarbon)), ["CA"]);
    }

    #[test]
    fn backbone_mode_keeps_four_backbone_atoms_in_order() {
        assert_eq!(
            names(&select_atoms(&residue(), AtomMode::Backbone)),
            ["N", "CA", "C", "O"]
        );
    }

    #[test]
    fn heavy_mode_drops_hydrogens() {
        assert_eq!(
            names(&select_atoms(&residue(), AtomMode::Heavy)),
            ["N", "CA", "C", "O", "CB", "OG"]
        );
    }

    #[test]
    fn selection_does_not_touch_coordinates() {
        let atoms = residue();
        let selected = select_atoms(&atoms, AtomMode::Heavy);
        assert_eq!(selected[4].position, atoms[4].position);
    }

    #[test]
    fn selecting_from_empty_set_is_empty() {
        assert!(select_atoms(&[], AtomMode::Heavy).is_empty());
    }
}
