use super::file::FileConfig;
use crate::cli::DockArgs;
use crate::error::{CliError, Result};
use rigidock::engine::config::{AtomMode, DockingParameters};
use std::str::FromStr;

/// Resolves the final docking parameters.
///
/// Precedence, highest first: dedicated CLI flags, `-S key=value` overrides,
/// the config file, built-in defaults.
pub fn build_params(args: &DockArgs) -> Result<DockingParameters> {
    let defaults = DockingParameters::default();

    let file_config = match &args.config {
        Some(path) => FileConfig::from_file(path)?,
        None => FileConfig::default(),
    };
    let file_config = apply_set_values(file_config, &args.set_values)?;

    let sampling = file_config.sampling.unwrap_or_default();
    let scoring = file_config.scoring.unwrap_or_default();
    let output = file_config.output.unwrap_or_default();

    let file_atom_mode = scoring
        .atom_mode
        .as_deref()
        .map(AtomMode::from_str)
        .transpose()
        .map_err(|e| CliError::Config(e.to_string()))?;

    DockingParameters::builder()
        .samples(args.samples.or(sampling.samples).unwrap_or(defaults.samples))
        .max_trans(args.max_trans.or(sampling.max_trans).unwrap_or(defaults.max_trans))
        .seed(args.seed.or(sampling.seed).unwrap_or(defaults.seed))
        .contact_cut(scoring.contact_cut.unwrap_or(defaults.contact_cut))
        .clash_factor(scoring.clash_factor.unwrap_or(defaults.clash_factor))
        .w_contact(scoring.w_contact.unwrap_or(defaults.w_contact))
        .w_clash(scoring.w_clash.unwrap_or(defaults.w_clash))
        .soft(scoring.soft.unwrap_or(defaults.soft))
        .atom_mode(args.atom_mode.or(file_atom_mode).unwrap_or(defaults.atom_mode))
        .top_n(args.top_n.or(output.top_n).unwrap_or(defaults.top_n))
        .dup_angle(output.dup_angle.unwrap_or(defaults.dup_angle))
        .dup_trans(output.dup_trans.unwrap_or(defaults.dup_trans))
        .build()
        .map_err(|e| CliError::Config(e.to_string()))
}

fn parse_value<T: FromStr>(key: &str, value: &str, kind: &str) -> Result<T> {
    value
        .trim()
        .parse()
        .map_err(|_| CliError::Config(format!("Invalid {} value for {}: {}", kind, key, value)))
}

fn apply_set_values(mut config: FileConfig, set_values: &[String]) -> Result<FileConfig> {
    for kv_pair in set_values {
        let Some((key, value_str)) = kv_pair.split_once('=') else {
            return Err(CliError::Config(format!(
                "Invalid --set format: '{}'. Expected KEY=VALUE.",
                kv_pair
            )));
        };
        let key = key.trim();

        match key {
            "sampling.samples" => {
                config.sampling.get_or_insert_with(Default::default).samples =
                    Some(parse_value(key, value_str, "integer")?);
            }
            "sampling.max-trans" => {
                config.sampling.get_or_insert_with(Default::default).max_trans =
                    Some(parse_value(key, value_str, "float")?);
            }
            "sampling.seed" => {
                config.sampling.get_or_insert_with(Default::default).seed =
                    Some(parse_value(key, value_str, "integer")?);
            }
            "scoring.contact-cut" => {
                config.scoring.get_or_insert_with(Default::default).contact_cut =
                    Some(parse_value(key, value_str, "float")?);
            }
            "scoring.clash-factor" => {
                config.scoring.get_or_insert_with(Default::default).clash_factor =
                    Some(parse_value(key, value_str, "float")?);
            }
            "scoring.w-contact" => {
                config.scoring.get_or_insert_with(Default::default).w_contact =
                    Some(parse_value(key, value_str, "float")?);
            }
            "scoring.w-clash" => {
                config.scoring.get_or_insert_with(Default::default).w_clash =
                    Some(parse_value(key, value_str, "float")?);
            }
            "scoring.soft" => {
                config.scoring.get_or_insert_with(Default::default).soft =
                    Some(parse_value(key, value_str, "float")?);
            }
            "scoring.atom-mode" => {
                config.scoring.get_or_insert_with(Default::default).atom_mode =
                    Some(value_str.trim().to_string());
            }
            "output.top-n" => {
                config.output.get_or_insert_with(Default::default).top_n =
                    Some(parse_value(key, value_str, "integer")?);
            }
            "output.dup-angle" => {
                config.output.get_or_insert_with(Default::default).dup_angle =
                    Some(parse_value(key, value_str, "float")?);
            }
            "output.dup-trans" => {
                config.output.get_or_insert_with(Default::default).dup_trans =
                    Some(parse_value(key, value_str, "float")?);
            }
            _ => {
                return Err(CliError::Config(format!(
                    "Unsupported configuration key for --set: '{}'",
                    key
                )));
            }
        }
    }
    Ok(config)
}
