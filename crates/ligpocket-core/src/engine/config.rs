use std::path::PathBuf;
use thiserror::Error;

/// Neighbor search radius used when none is given, in Angstroms.
pub const DEFAULT_DISTANCE_CUTOFF: f64 = 5.0;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ConfigError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),
    #[error("Invalid value for parameter '{name}': {reason}")]
    InvalidParameter { name: &'static str, reason: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExtractionConfig {
    pub input_path: PathBuf,
    /// Destination of the filtered structure. Derived from the input name when `None`.
    pub output_path: Option<PathBuf>,
    pub chain_id: char,
    pub ligand_resname: String,
    pub distance_cutoff: f64,
}

#[derive(Default)]
pub struct ExtractionConfigBuilder {
    input_path: Option<PathBuf>,
    output_path: Option<PathBuf>,
    chain_id: Option<char>,
    ligand_resname: Option<String>,
    distance_cutoff: Option<f64>,
}

impl ExtractionConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn input_path(mut self, path: PathBuf) -> Self {
        self.input_path = Some(path);
        self
    }
    pub fn output_path(mut self, path: Option<PathBuf>) -> Self {
        self.output_path = path;
        self
    }
    pub fn chain_id(mut self, chain_id: char) -> Self {
        self.chain_id = Some(chain_id);
        self
    }
    pub fn ligand_resname(mut self, name: impl Into<String>) -> Self {
        self.ligand_resname = Some(name.into());
        self
    }
    pub fn distance_cutoff(mut self, cutoff: f64) -> Self {
        self.distance_cutoff = Some(cutoff);
        self
    }

    pub fn build(self) -> Result<ExtractionConfig, ConfigError> {
        let ligand_resname = self
            .ligand_resname
            .ok_or(ConfigError::MissingParameter("ligand_resname"))?;
        if ligand_resname.trim().is_empty() {
            return Err(ConfigError::InvalidParameter {
                name: "ligand_resname",
                reason: "must not be blank".to_string(),
            });
        }

        let distance_cutoff = self.distance_cutoff.unwrap_or(DEFAULT_DISTANCE_CUTOFF);
        if !distance_cutoff.is_finite() || distance_cutoff <= 0.0 {
            return Err(ConfigError::InvalidParameter {
                name: "distance_cutoff",
                reason: format!(
                    "expected a positive number of Angstroms, got {}",
                    distance_cutoff
                ),
            });
        }

        Ok(ExtractionConfig {
            input_path: self
                .input_path
                .ok_or(ConfigError::MissingParameter("input_path"))?,
            output_path: self.output_path,
            chain_id: self
                .chain_id
                .ok_or(ConfigError::MissingParameter("chain_id"))?,
            ligand_resname,
            distance_cutoff,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete_builder() -> ExtractionConfigBuilder {
        ExtractionConfigBuilder::new()
            .input_path(PathBuf::from("1a52.pdb"))
            .chain_id('A')
            .ligand_resname("EST")
    }

    #[test]
    fn build_succeeds_with_required_parameters_and_default_cutoff() {
        let config = complete_builder().build().unwrap();
        assert_eq!(config.input_path, PathBuf::from("1a52.pdb"));
        assert_eq!(config.output_path, None);
        assert_eq!(config.chain_id, 'A');
        assert_eq!(config.ligand_resname, "EST");
        assert_eq!(config.distance_cutoff, DEFAULT_DISTANCE_CUTOFF);
    }

    #[test]
    fn build_keeps_explicit_output_path_and_cutoff() {
        let config = complete_builder()
            .output_path(Some(PathBuf::from("pocket.pdb")))
            .distance_cutoff(4.0)
            .build()
            .unwrap();
        assert_eq!(config.output_path, Some(PathBuf::from("pocket.pdb")));
        assert_eq!(config.distance_cutoff, 4.0);
    }

    #[test]
    fn build_fails_on_missing_input_path() {
        let result = ExtractionConfigBuilder::new()
            .chain_id('A')
            .ligand_resname("EST")
            .build();
        assert_eq!(result, Err(ConfigError::MissingParameter("input_path")));
    }

    #[test]
    fn build_fails_on_missing_chain_id() {
        let result = ExtractionConfigBuilder::new()
            .input_path(PathBuf::from("x.pdb"))
            .ligand_resname("EST")
            .build();
        assert_eq!(result, Err(ConfigError::MissingParameter("chain_id")));
    }

    #[test]
    fn build_fails_on_missing_ligand_resname() {
        let result = ExtractionConfigBuilder::new()
            .input_path(PathBuf::from("x.pdb"))
            .chain_id('A')
            .build();
        assert_eq!(result, Err(ConfigError::MissingParameter("ligand_resname")));
    }

    #[test]
    fn build_rejects_blank_ligand_resname() {
        let result = complete_builder().ligand_resname("   ").build();
        assert!(matches!(
            result,
            Err(ConfigError::InvalidParameter { name: "ligand_resname", .. })
        ));
    }

    #[test]
    fn build_rejects_non_positive_or_non_finite_cutoff() {
        for cutoff in [0.0, -1.5, f64::NAN, f64::INFINITY] {
            let result = complete_builder().distance_cutoff(cutoff).build();
            assert!(
                matches!(
                    result,
                    Err(ConfigError::InvalidParameter { name: "distance_cutoff", .. })
                ),
                "cutoff {} should be rejected",
                cutoff
            );
        }
    }
}
