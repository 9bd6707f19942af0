pub mod config;
pub mod constants;

pub use config::{
    CouplingConfig, CouplingConfigError, CouplingConfigOverrides, DEFAULT_CHARGE,
    load_coupling_config,
};
