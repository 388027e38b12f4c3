use std::fs;
use std::io::BufReader;

use serde::{Deserialize, Serialize};

use crate::conf::ConfigError;

#[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ExternalConfig {
    pub input: Option<String>,
    pub output: Option<String>,
    pub output_format: Option<String>,
    pub batch_size: Option<usize>,
    pub field_types: Option<Vec<String>>,
    pub null_marker: Option<String>,

    pub publish: Option<bool>,
    pub extract_name: Option<String>,
    pub work_dir: Option<String>,

    pub host: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub site_id: Option<String>,
    pub project: Option<String>,
    pub datasource: Option<String>,
    pub overwrite: Option<bool>,
}

impl ExternalConfig {
    pub fn from_yaml_file(fname: &str) -> Result<ExternalConfig, ConfigError> {
        let file = fs::File::open(fname)
            .map_err(|e| ConfigError::new(&format!("cannot open {}: {}", fname, e)))?;
        Self::from_reader(BufReader::new(file))
    }

    pub fn from_reader<R: std::io::Read>(rdr: R) -> Result<ExternalConfig, ConfigError> {
        serde_yaml::from_reader(rdr).map_err(|e| ConfigError::new(&e.to_string()))
    }
}
