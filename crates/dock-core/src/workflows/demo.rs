//! Built-in demo structures substituted when a caller omits an input.
//!
//! Each is a short alpha-carbon trace of four residues. The traces lie on
//! opposite sides of the origin, their outermost atoms 16 Angstroms apart.

pub const DEMO_RECEPTOR_PDB: &str = "\
ATOM      1  CA  ALA A   1      -8.000   0.000   0.000  1.00  0.00           C
ATOM      2  CA  ALA A   2      -6.600   1.200   0.200  1.00  0.00           C
ATOM      3  CA  ALA A   3      -5.200   0.100   1.200  1.00  0.00           C
ATOM      4  CA  ALA A   4      -3.800   1.400   1.400  1.00  0.00           C
END
";

pub const DEMO_LIGAND_PDB: &str = "\
ATOM      1  CA  GLY B   1       8.000   0.000   0.000  1.00  0.00           C
ATOM      2  CA  GLY B   2       6.800  -1.100  -0.100  1.00  0.00           C
ATOM      3  CA  GLY B   3       5.600  -0.200  -1.100  1.00  0.00           C
ATOM      4  CA  GLY B   4       4.400  -1.300  -1.300  1.00  0.00           C
END
";
