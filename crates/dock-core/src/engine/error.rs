use thiserror::Error;

/// Which of the two input structures an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StructureRole {
    Receptor,
    Ligand,
}

impl std::fmt::Display for StructureRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StructureRole::Receptor => f.write_str("receptor"),
            StructureRole::Ligand => f.write_str("ligand"),
        }
    }
}

#[derive(Debug, Error)]
pub enum DockingError {
    /// Parsing produced no atoms. Fatal to the invocation; never retried.
    #[error("PDB parse failed: {structure} structure contains no valid ATOM/HETATM records")]
    Parse { structure: StructureRole },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_error_names_the_structure() {
        let err = DockingError::Parse {
            structure: StructureRole::Ligand,
        };
        assert_eq!(
            err.to_string(),
            "PDB parse failed: ligand structure contains no valid ATOM/HETATM records"
        );
    }
}
