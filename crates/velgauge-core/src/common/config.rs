//! JSON run configuration for angular matrix assembly.

use super::constants::MAX_SUPPORTED_LMAX;
use crate::domain::{CouplingTerm, VelgaugeError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_CHARGE: f64 = -1.0;

fn default_charge() -> f64 {
    DEFAULT_CHARGE
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CouplingConfig {
    pub lmax: u32,
    #[serde(default)]
    pub term: CouplingTerm,
    /// Signed particle charge; matrix elements carry a factor `-charge`.
    #[serde(default = "default_charge")]
    pub charge: f64,
}

impl Default for CouplingConfig {
    fn default() -> Self {
        Self {
            lmax: 0,
            term: CouplingTerm::Body,
            charge: DEFAULT_CHARGE,
        }
    }
}

/// Command-line values that take precedence over the file.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CouplingConfigOverrides {
    pub lmax: Option<u32>,
    pub term: Option<CouplingTerm>,
    pub charge: Option<f64>,
}

impl CouplingConfig {
    pub fn with_overrides(mut self, overrides: CouplingConfigOverrides) -> Self {
        if let Some(lmax) = overrides.lmax {
            self.lmax = lmax;
        }
        if let Some(term) = overrides.term {
            self.term = term;
        }
        if let Some(charge) = overrides.charge {
            self.charge = charge;
        }
        self
    }

    pub fn validate(&self) -> Result<(), CouplingConfigError> {
        if self.lmax > MAX_SUPPORTED_LMAX {
            return Err(CouplingConfigError::Invalid(format!(
                "lmax {} exceeds the supported maximum {}",
                self.lmax, MAX_SUPPORTED_LMAX
            )));
        }
        if !self.charge.is_finite() {
            return Err(CouplingConfigError::Invalid(format!(
                "charge must be finite, got {}",
                self.charge
            )));
        }
        Ok(())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CouplingConfigError {
    #[error("failed to read coupling config '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse coupling config '{}': {source}", path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("invalid coupling config: {0}")]
    Invalid(String),
}

impl From<CouplingConfigError> for VelgaugeError {
    fn from(error: CouplingConfigError) -> Self {
        match &error {
            CouplingConfigError::Read { .. } => {
                VelgaugeError::io_system("IO.CONFIG_READ", error.to_string())
            }
            CouplingConfigError::Parse { .. } => {
                VelgaugeError::input_validation("INPUT.CONFIG_PARSE", error.to_string())
            }
            CouplingConfigError::Invalid(_) => {
                VelgaugeError::input_validation("INPUT.CONFIG_INVALID", error.to_string())
            }
        }
    }
}

pub fn load_coupling_config(
    config_path: impl AsRef<Path>,
) -> Result<CouplingConfig, CouplingConfigError> {
    let config_path = config_path.as_ref();
    let source = fs::read_to_string(config_path).map_err(|source| CouplingConfigError::Read {
        path: config_path.to_path_buf(),
        source,
    })?;
    let config: CouplingConfig =
        serde_json::from_str(&source).map_err(|source| CouplingConfigError::Parse {
            path: config_path.to_path_buf(),
            source,
        })?;
    config.validate()?;
    Ok(config)
}
