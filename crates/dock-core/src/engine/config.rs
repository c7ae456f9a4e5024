use crate::core::scoring::ScoringParams;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

pub const DEFAULT_SAMPLES: usize = 6000;
pub const DEFAULT_MAX_TRANS: f64 = 12.0;
pub const DEFAULT_CONTACT_CUT: f64 = 4.8;
pub const DEFAULT_CLASH_FACTOR: f64 = 0.85;
pub const DEFAULT_W_CONTACT: f64 = 1.0;
pub const DEFAULT_W_CLASH: f64 = 6.0;
pub const DEFAULT_SOFT: f64 = 0.5;
pub const DEFAULT_TOP_N: usize = 8;
pub const DEFAULT_SEED: u32 = 42;
pub const DEFAULT_DUP_ANGLE: f64 = 12.0;
pub const DEFAULT_DUP_TRANS: f64 = 2.0;

/// The diversity filter sees this many candidates per requested pose.
pub const CANDIDATE_POOL_FACTOR: usize = 3;

#[derive(Debug, Error, PartialEq, Clone)]
pub enum ConfigError {
    #[error("Invalid value for parameter '{name}': {value} ({reason})")]
    InvalidParameter {
        name: &'static str,
        value: f64,
        reason: &'static str,
    },
    #[error("Unknown atom mode '{0}'. Expected HEAVY, BACKBONE or ALPHA_CARBON.")]
    UnknownAtomMode(String),
}

/// The atom subset of each structure that takes part in scoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum AtomMode {
    /// Every atom whose element is not hydrogen.
    #[default]
    #[serde(rename = "HEAVY")]
    Heavy,
    /// Backbone atoms N, CA, C and O.
    #[serde(rename = "BACKBONE", alias = "BB")]
    Backbone,
    /// Alpha carbons only.
    #[serde(rename = "ALPHA_CARBON", alias = "CA")]
    AlphaCarbon,
}

impl fmt::Display for AtomMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            AtomMode::Heavy => "HEAVY",
            AtomMode::Backbone => "BACKBONE",
            AtomMode::AlphaCarbon => "ALPHA_CARBON",
        };
        f.write_str(s)
    }
}

impl FromStr for AtomMode {
    type Err = ConfigError;

    /// Parses an atom mode name, case-insensitively, accepting the short forms
    /// `BB` and `CA` as well as hyphenated spellings.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().replace('-', "_").as_str() {
            "HEAVY" => Ok(AtomMode::Heavy),
            "BACKBONE" | "BB" => Ok(AtomMode::Backbone),
            "ALPHA_CARBON" | "CA" => Ok(AtomMode::AlphaCarbon),
            _ => Err(ConfigError::UnknownAtomMode(s.to_string())),
        }
    }
}

/// Configuration bundle controlling sampling, scoring and pose selection.
///
/// Treated as a value object. Every field has a default, and deserialization
/// fills in defaults for omitted fields, so `{}` is a valid parameter set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DockingParameters {
    /// Number of poses sampled.
    pub samples: usize,
    /// Half-width of the translation cube, in Angstroms.
    pub max_trans: f64,
    /// Pairs at or below this distance (and not clashing) count as contacts.
    pub contact_cut: f64,
    /// Multiplier on the summed van der Waals radii defining the clash cutoff.
    pub clash_factor: f64,
    pub w_contact: f64,
    pub w_clash: f64,
    /// Saturation constant of the soft clash penalty.
    pub soft: f64,
    /// Number of poses returned.
    pub top_n: usize,
    pub seed: u32,
    pub atom_mode: AtomMode,
    /// Diversity filter angular threshold, in degrees.
    pub dup_angle: f64,
    /// Diversity filter translational threshold, in Angstroms.
    pub dup_trans: f64,
}

impl Default for DockingParameters {
    fn default() -> Self {
        Self {
            samples: DEFAULT_SAMPLES,
            max_trans: DEFAULT_MAX_TRANS,
            contact_cut: DEFAULT_CONTACT_CUT,
            clash_factor: DEFAULT_CLASH_FACTOR,
            w_contact: DEFAULT_W_CONTACT,
            w_clash: DEFAULT_W_CLASH,
            soft: DEFAULT_SOFT,
            top_n: DEFAULT_TOP_N,
            seed: DEFAULT_SEED,
            atom_mode: AtomMode::default(),
            dup_angle: DEFAULT_DUP_ANGLE,
            dup_trans: DEFAULT_DUP_TRANS,
        }
    }
}

impl DockingParameters {
    pub fn builder() -> DockingParametersBuilder {
        DockingParametersBuilder::new()
    }

    pub fn scoring(&self) -> ScoringParams {
        ScoringParams {
            contact_cut: self.contact_cut,
            clash_factor: self.clash_factor,
            w_contact: self.w_contact,
            w_clash: self.w_clash,
            soft: self.soft,
        }
    }

    /// Size of the score-ranked head handed to the diversity filter.
    pub fn candidate_pool_size(&self) -> usize {
        self.top_n.saturating_mul(CANDIDATE_POOL_FACTOR)
    }
}

#[derive(Default)]
pub struct DockingParametersBuilder {
    samples: Option<usize>,
    max_trans: Option<f64>,
    contact_cut: Option<f64>,
    clash_factor: Option<f64>,
    w_contact: Option<f64>,
    w_clash: Option<f64>,
    soft: Option<f64>,
    top_n: Option<usize>,
    seed: Option<u32>,
    atom_mode: Option<AtomMode>,
    dup_angle: Option<f64>,
    dup_trans: Option<f64>,
}

impl DockingParametersBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn samples(mut self, samples: usize) -> Self {
        self.samples = Some(samples);
        self
    }
    pub fn max_trans(mut self, max_trans: f64) -> Self {
        self.max_trans = Some(max_trans);
        self
    }
    pub fn contact_cut(mut self, cut: f64) -> Self {
        self.contact_cut = Some(cut);
        self
    }
    pub fn clash_factor(mut self, factor: f64) -> Self {
        self.clash_factor = Some(factor);
        self
    }
    pub fn w_contact(mut self, weight: f64) -> Self {
        self.w_contact = Some(weight);
        self
    }
    pub fn w_clash(mut self, weight: f64) -> Self {
        self.w_clash = Some(weight);
        self
    }
    pub fn soft(mut self, soft: f64) -> Self {
        self.soft = Some(soft);
        self
    }
    pub fn top_n(mut self, n: usize) -> Self {
        self.top_n = Some(n);
        self
    }
    pub fn seed(mut self, seed: u32) -> Self {
        self.seed = Some(seed);
        self
    }
    pub fn atom_mode(mut self, mode: AtomMode) -> Self {
        self.atom_mode = Some(mode);
        self
    }
    pub fn dup_angle(mut self, degrees: f64) -> Self {
        self.dup_angle = Some(degrees);
        self
    }
    pub fn dup_trans(mut self, distance: f64) -> Self {
        self.dup_trans = Some(distance);
        self
    }

    /// Fills unset fields with defaults and validates the floating-point parameters.
    pub fn build(self) -> Result<DockingParameters, ConfigError> {
        let defaults = DockingParameters::default();
        let params = DockingParameters {
            samples: self.samples.unwrap_or(defaults.samples),
            max_trans: self.max_trans.unwrap_or(defaults.max_trans),
            contact_cut: self.contact_cut.unwrap_or(defaults.contact_cut),
            clash_factor: self.clash_factor.unwrap_or(defaults.clash_factor),
            w_contact: self.w_contact.unwrap_or(defaults.w_contact),
            w_clash: self.w_clash.unwrap_or(defaults.w_clash),
            soft: self.soft.unwrap_or(defaults.soft),
            top_n: self.top_n.unwrap_or(defaults.top_n),
            seed: self.seed.unwrap_or(defaults.seed),
            atom_mode: self.atom_mode.unwrap_or(defaults.atom_mode),
            dup_angle: self.dup_angle.unwrap_or(defaults.dup_angle),
            dup_trans: self.dup_trans.unwrap_or(defaults.dup_trans),
        };
        validate(&params)?;
        Ok(params)
    }
}

fn check(
    name: &'static str,
    value: f64,
    ok: impl Fn(f64) -> bool,
    reason: &'static str,
) -> Result<(), ConfigError> {
    if value.is_finite() && ok(value) {
        Ok(())
    } else {
        Err(ConfigError::InvalidParameter {
            name,
            value,
            reason,
        })
    }
}

/// Rejects parameter sets the scoring function cannot evaluate meaningfully.
pub fn validate(params: &DockingParameters) -> Result<(), ConfigError> {
    let non_negative = |v: f64| v >= 0.0;
    check("max_trans", params.max_trans, non_negative, "must be >= 0")?;
    check("contact_cut", params.contact_cut, non_negative, "must be >= 0")?;
    check("clash_factor", params.clash_factor, |v| v > 0.0, "must be > 0")?;
    check("w_contact", params.w_contact, |_| true, "must be finite")?;
    check("w_clash", params.w_clash, non_negative, "must be >= 0")?;
    check("soft", params.soft, non_negative, "must be >= 0")?;
    check("dup_angle", params.dup_angle, non_negative, "must be >= 0")?;
    check("dup_trans", params.dup_trans, non_negative, "must be >= 0")?;
    Ok(())
}
