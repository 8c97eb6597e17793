use crate::cli::ExtractArgs;
use crate::error::{CliError, Result};
use ligpocket::engine::config::{ExtractionConfig, ExtractionConfigBuilder};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::debug;

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
struct PartialExtractionSection {
    chain_id: Option<char>,
    ligand_resname: Option<String>,
    distance_cutoff: Option<f64>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
struct PartialOutputSection {
    path: Option<PathBuf>,
}

/// Extraction settings read from a TOML file, every field optional.
///
/// ```toml
/// [extraction]
/// chain-id = "A"
/// ligand-resname = "EST"
/// distance-cutoff = 5.0
///
/// [output]
/// path = "pocket.pdb"
/// ```
#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
pub struct PartialExtractionConfig {
    extraction: Option<PartialExtractionSection>,
    output: Option<PartialOutputSection>,
}

fn parse_set_value<T: FromStr>(key: &str, value: &str, kind: &str) -> Result<T> {
    value.parse().map_err(|_| {
        CliError::Config(format!("Invalid {} value for {}: {}", kind, key, value))
    })
}

impl PartialExtractionConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from file: {:?}", path);
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })
    }

    fn from_toml_str(content: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Resolves the final configuration: command-line flags win over `--set`
    /// values, which win over the file, which wins over built-in defaults.
    pub fn merge_with_cli(mut self, args: &ExtractArgs) -> Result<ExtractionConfig> {
        self.apply_set_values(&args.set_values)?;

        let extraction = self.extraction.take().unwrap_or_default();
        let output = self.output.take().unwrap_or_default();

        let chain_id = args.chain.or(extraction.chain_id).ok_or_else(|| {
            CliError::Config(
                "A chain is required either via --chain or `extraction.chain-id`.".to_string(),
            )
        })?;
        let ligand_resname = args
            .ligand
            .clone()
            .or(extraction.ligand_resname)
            .ok_or_else(|| {
                let hint = "either via --ligand or `extraction.ligand-resname`";
                CliError::Config(format!("A ligand residue name is required {}.", hint))
            })?;

        let mut builder = ExtractionConfigBuilder::new()
            .input_path(args.input.clone())
            .output_path(args.output.clone().or(output.path))
            .chain_id(chain_id)
            .ligand_resname(ligand_resname);
        if let Some(cutoff) = args.distance_cutoff.or(extraction.distance_cutoff) {
            builder = builder.distance_cutoff(cutoff);
        }

        builder.build().map_err(|e| CliError::Config(e.to_string()))
    }

    fn apply_set_values(&mut self, set_values: &[String]) -> Result<()> {
        for kv_pair in set_values {
            let Some((key, value_str)) = kv_pair.split_once('=') else {
                return Err(CliError::Config(format!(
                    "Invalid --set format: '{}'. Expected KEY=VALUE.",
                    kv_pair
                )));
            };

            match key {
                "extraction.chain-id" => {
                    self.extraction
                        .get_or_insert_with(Default::default)
                        .chain_id = Some(parse_set_value(key, value_str, "single-character")?);
                }
                "extraction.ligand-resname" => {
                    self.extraction
                        .get_or_insert_with(Default::default)
                        .ligand_resname = Some(value_str.to_string());
                }
                "extraction.distance-cutoff" => {
                    self.extraction
                        .get_or_insert_with(Default::default)
                        .distance_cutoff = Some(parse_set_value(key, value_str, "float")?);
                }
                "output.path" => {
                    self.output.get_or_insert_with(Default::default).path =
                        Some(PathBuf::from(value_str));
                }
                _ => {
                    return Err(CliError::Config(format!(
                        "Unsupported configuration key for --set: '{}'",
                        key
                    )));
                }
            }
        }
        Ok(())
    }
}
