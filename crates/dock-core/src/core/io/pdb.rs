use crate::core::models::atom::{Atom, DEFAULT_CHAIN_ID, DEFAULT_RESIDUE_INDEX, UNKNOWN_RESIDUE, infer_element};
use nalgebra::Point3;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::Path;
use thiserror::Error;

/// Shortest record that still carries all three coordinate fields.
pub const MIN_RECORD_LEN: usize = 54;

#[derive(Debug, Error)]
pub enum PdbError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

fn slice_and_trim(line: &str, start: usize, end: usize) -> &str {
    line.get(start..end).unwrap_or("").trim()
}

fn is_coordinate_record(line: &str) -> bool {
    line.starts_with("ATOM") || line.starts_with("HETATM")
}

/// Parses a single `ATOM`/`HETATM` record.
///
/// Returns `None` for anything that is not a complete coordinate record: other
/// record types, truncated lines, blank atom names and coordinates that do not
/// parse to finite numbers.
pub fn parse_record(line: &str) -> Option<Atom> {
    if !is_coordinate_record(line) || line.len() < MIN_RECORD_LEN {
        return None;
    }

    let coordinate = |start, end| {
        slice_and_trim(line, start, end)
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
    };
    let x = coordinate(30, 38)?;
    let y = coordinate(38, 46)?;
    let z = coordinate(46, 54)?;

    let name = slice_and_trim(line, 12, 16);
    if name.is_empty() {
        return None;
    }

    let residue_name = match slice_and_trim(line, 17, 20) {
        "" => UNKNOWN_RESIDUE,
        s => s,
    };
    let chain_id = slice_and_trim(line, 21, 22)
        .chars()
        .next()
        .unwrap_or(DEFAULT_CHAIN_ID);
    // Zero is not a valid residue number and reads as the default.
    let residue_index = slice_and_trim(line, 22, 26)
        .parse::<i32>()
        .ok()
        .filter(|&i| i != 0)
        .unwrap_or(DEFAULT_RESIDUE_INDEX);
    let element = infer_element(line.get(76..78), name);

    Some(Atom {
        name: name.to_string(),
        residue_name: residue_name.to_string(),
        chain_id,
        residue_index,
        position: Point3::new(x, y, z),
        element,
    })
}

/// Parses free-form structure text into atoms, in input order.
///
/// Malformed or non-coordinate lines are skipped silently; the result may be empty.
pub fn parse_pdb_str(text: &str) -> Vec<Atom> {
    text.lines().filter_map(parse_record).collect()
}

pub fn read_pdb(reader: impl BufRead) -> Result<Vec<Atom>, PdbError> {
    let mut atoms = Vec::new();
    for line in reader.lines() {
        if let Some(atom) = parse_record(&line?) {
            atoms.push(atom);
        }
    }
    Ok(atoms)
}

pub fn read_pdb_path<P: AsRef<Path>>(path: P) -> Result<Vec<Atom>, PdbError> {
    let file = File::open(path)?;
    read_pdb(BufReader::new(file))
}

fn format_atom_name(atom: &Atom) -> String {
    if atom.name.len() < 4 && atom.element.len() == 1 {
        format!(" {:<3}", atom.name)
    } else {
        format!("{:<4.4}", atom.name)
    }
}

fn write_record(writer: &mut impl Write, serial: usize, atom: &Atom) -> io::Result<()> {
    writeln!(
        writer,
        "ATOM  {:>5} {} {:>3.3} {}{:>4}    {:>8.3}{:>8.3}{:>8.3}{:>6.2}{:>6.2}          {:>2}",
        serial % 100_000,
        format_atom_name(atom),
        atom.residue_name,
        atom.chain_id,
        atom.residue_index,
        atom.position.x,
        atom.position.y,
        atom.position.z,
        1.0,
        0.0,
        atom.element,
    )
}

/// Writes atoms as fixed-column `ATOM` records followed by `END`.
pub fn write_atoms(writer: &mut impl Write, atoms: &[Atom]) -> Result<(), PdbError> {
    for (i, atom) in atoms.iter().enumerate() {
        write_record(writer, i + 1, atom)?;
    }
    writeln!(writer, "END")?;
    Ok(())
}

/// Writes a docked complex: the receptor, a `TER` record, then the posed ligand.
pub fn write_complex(
    writer: &mut impl Write,
    receptor: &[Atom],
    ligand: &[Atom],
) -> Result<(), PdbError> {
    let mut serial = 1;
    for atom in receptor {
        write_record(writer, serial, atom)?;
        serial += 1;
    }
    writeln!(writer, "TER")?;
    for atom in ligand {
        write_record(writer, serial, atom)?;
        serial += 1;
    }
    writeln!(writer, "END")?;
    Ok(())
}

pub fn write_complex_path<P: AsRef<Path>>(
    path: P,
    receptor: &[Atom],
    ligand: &[Atom],
) -> Result<(), PdbError> {
    let mut writer = io::BufWriter::new(File::create(path)?);
    write_complex(&mut writer, receptor, ligand)?;
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const CA_LINE: &str =
        "ATOM      1  CA  ALA A   1      -8.000   0.000   0.000  1.00  0.00           C";

    #[test]
    fn parses_fixed_column_fields() {
        let atom = parse_record(CA_LINE).unwrap();

        assert_eq!(atom.name, "CA");
        assert_eq!(atom.residue_name, "ALA");
        assert_eq!(atom.chain_id, 'A');
        assert_eq!(atom.residue_index, 1);
        assert_eq!(atom.position, Point3::new(-8.0, 0.0, 0.0));
        assert_eq!(atom.element, "C");
    }

    #[test]
    fn hetatm_records_are_accepted() {
        let line = "HETATM  100 CL1  LIG B 301       1.000   2.000   3.000  1.00  0.00          Cl";
        let atom = parse_record(line).unwrap();

        assert_eq!(atom.name, "CL1");
        assert_eq!(atom.chain_id, 'B');
        assert_eq!(atom.residue_index, 301);
        assert_eq!(atom.element, "CL");
    }

    #[test]
    fn blank_optional_fields_fall_back_to_defaults() {
        let line = "ATOM      1  OG         xx       1.000   2.000   3.000";
        let atom = parse_record(line).unwrap();

        assert_eq!(atom.residue_name, "UNK");
        assert_eq!(atom.chain_id, 'A');
        assert_eq!(atom.residue_index, 1);
        assert_eq!(atom.element, "O");
    }

    #[test]
    fn residue_number_zero_reads_as_default() {
        let zero = CA_LINE.replacen("A   1 ", "A   0 ", 1);
        assert_eq!(parse_record(&zero).unwrap().residue_index, 1);

        let negative = CA_LINE.replacen("A   1 ", "A  -3 ", 1);
        assert_eq!(parse_record(&negative).unwrap().residue_index, -3);
    }

    #[test]
    fn unparsable_coordinates_drop_the_line() {
        let line = "ATOM      1  CA  ALA A   1      -8.000     abc   0.000  1.00  0.00           C";
        assert!(parse_record(line).is_none());

        let line = "ATOM      1  CA  ALA A   1         NaN   0.000   0.000  1.00  0.00           C";
        assert!(parse_record(line).is_none());
    }

    #[test]
    fn mixed_text_yields_only_valid_records_in_order() {
        let text = format!(
            "HEADER    TEST\nREMARK 1\n{CA_LINE}\nATOM      2  CA  ALA A   2\n\
             ATOM      3  N   ALA A   3       1.000   1.000   1.000\r\nTER\nEND\n"
        );
        let atoms = parse_pdb_str(&text);

        assert_eq!(atoms.len(), 2);
        assert_eq!(atoms[0].name, "CA");
        assert_eq!(atoms[1].name, "N");
        assert_eq!(atoms[1].residue_index, 3);
    }

    #[test]
    fn text_without_records_yields_empty_set() {
        assert!(parse_pdb_str("HEADER only\nEND").is_empty());
        assert!(parse_pdb_str("").is_empty());
    }

    #[test]
    fn read_pdb_matches_string_parser() {
        let atoms = read_pdb(Cursor::new(CA_LINE)).unwrap();
        assert_eq!(atoms, parse_pdb_str(CA_LINE));
    }

    #[test]
    fn read_pdb_path_reports_missing_file() {
        let result = read_pdb_path("/definitely/not/here.pdb");
        assert!(matches!(result, Err(PdbError::Io(_))));
    }

    #[test]
    fn written_records_parse_back_to_the_same_atoms() {
        let receptor = vec![
            Atom::new("CA", Point3::new(-1.25, 2.5, 0.125)).with_residue("ALA", 'A', 1),
            Atom::new("OG1", Point3::new(10.0, -20.0, 30.0)).with_residue("THR", 'A', 2),
        ];
        let ligand = vec![
            Atom::new("CL1", Point3::new(0.0, 0.0, 0.0))
                .with_residue("LIG", 'L', 1)
                .with_element("CL"),
        ];

        let mut buffer = Vec::new();
        write_complex(&mut buffer, &receptor, &ligand).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        let parsed = parse_pdb_str(&text);

        assert_eq!(parsed.len(), 3);
        assert_eq!(&parsed[..2], &receptor[..]);
        assert_eq!(parsed[2], ligand[0]);
        assert!(text.contains("\nTER\n"));
        assert!(text.ends_with("END\n"));
    }

    #[test]
    fn write_complex_path_creates_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("complex.pdb");
        let atoms = vec![Atom::new("CA", Point3::new(1.0, 2.0, 3.0))];

        write_complex_path(&path, &atoms, &atoms).unwrap();

        assert_eq!(read_pdb_path(&path).unwrap().len(), 2);
    }

    #[test]
    fn write_atoms_emits_one_record_per_atom() {
        let atoms = vec![Atom::new("CA", Point3::origin()); 3];
        let mut buffer = Vec::new();
        write_atoms(&mut buffer, &atoms).unwrap();
        let text = String::from_utf8(buffer).unwrap();

        assert_eq!(text.lines().filter(|l| l.starts_with("ATOM")).count(), 3);
        assert_eq!(text.lines().next().unwrap().len(), 78);
    }
}
