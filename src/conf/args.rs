use clap::Parser;

use crate::conf::{ConfigError, ExternalConfig};

#[derive(Parser, Debug, Default)]
#[clap(name = "rowprint")]
#[clap(version = "0.1")]
#[clap(about = "Prints query results as delimited records or typed extracts", long_about = None)]
pub struct MyArgs {
    ///Input CSV with a header row. Use - for stdin (default)
    #[clap(short, long)]
    pub input: Option<String>,

    ///Output destination for delimited records. Use - for stdout (default)
    #[clap(short, long)]
    pub output: Option<String>,

    ///Output format. One of:
    ///     delimited (default)
    ///     extract
    #[clap(short = 'f', long)]
    pub output_format: Option<String>,

    ///Rows per batch handed to the printer
    #[clap(short = 'b', long)]
    pub batch_size: Option<usize>,

    /// Yaml config file to use for default values
    /// command line options still override conf values
    #[clap(short, long)]
    pub conf: Option<String>,

    /// Field types in column order, can be multiple or comma separated.
    /// E.g. -t bigint,varchar -t timestamp
    #[clap(short = 't', long = "field-type")]
    pub field_types: Vec<String>,

    /// Input cells equal to this text are read as NULL (default: empty cell)
    #[clap(long)]
    pub null_marker: Option<String>,

    /// Publish the extract to the server after writing it
    #[clap(long)]
    pub publish: bool,

    /// Local extract file name when not publishing
    #[clap(long)]
    pub extract_name: Option<String>,

    /// Directory for the temporary extract when publishing
    #[clap(long)]
    pub work_dir: Option<String>,

    /// Server host, a file:// URL or a directory path
    #[clap(long)]
    pub host: Option<String>,

    #[clap(long)]
    pub username: Option<String>,

    #[clap(long)]
    pub password: Option<String>,

    #[clap(long)]
    pub site_id: Option<String>,

    /// Server project to publish into
    #[clap(long)]
    pub project: Option<String>,

    /// Datasource name on the server
    #[clap(long)]
    pub datasource: Option<String>,

    /// Replace an existing datasource on the server
    #[clap(long)]
    pub overwrite: bool,
}

impl MyArgs {
    pub fn get_external_conf(&self) -> Result<ExternalConfig, ConfigError> {
        match &self.conf {
            Some(fname) => ExternalConfig::from_yaml_file(fname),
            None => Ok(ExternalConfig::default()),
        }
    }
}
