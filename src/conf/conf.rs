use std::fs;
use std::io::{self, BufReader, BufWriter, Read};

use crate::conf::{ConfigError, ExternalConfig, ExtractConfig, MyArgs};
use crate::schema::FieldType;
use crate::DynBoxWrite;

macro_rules! args_or_external_opt_default {
    ($a:expr, $b:expr, $prop:ident, $def:expr) => {
        $a.$prop.as_ref().or($b.$prop.as_ref()).unwrap_or($def)
    };
}

macro_rules! args_or_external_bool_default {
    ($a:expr, $b:expr, $prop:ident, $def:expr) => {
        if $a.$prop {
            true
        } else {
            $b.$prop.unwrap_or($def)
        }
    };
}

macro_rules! args_or_external_vec_default {
    ($a:expr, $b:expr, $prop:ident, $def:expr) => {
        if !$a.$prop.is_empty() {
            &$a.$prop
        } else {
            match $b.$prop.as_ref() {
                Some(v) if !v.is_empty() => v,
                _ => $def,
            }
        }
    };
}

pub const DEFAULT_BATCH_SIZE: usize = 1000;
pub const DEFAULT_EXTRACT_NAME: &str = "extract.arrow";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Delimited,
    Extract,
}

impl OutputFormat {
    pub fn from_name(s: &str) -> Result<OutputFormat, ConfigError> {
        match s.to_ascii_lowercase().as_str() {
            "delimited" | "sqpug" => Ok(OutputFormat::Delimited),
            "extract" | "tde" => Ok(OutputFormat::Extract),
            x => Err(ConfigError::new(&format!("Unknown output format: {}", x))),
        }
    }
}

#[derive(Debug, Clone)]
pub struct RowprintConfig {
    input: String,
    output: String,
    output_format: OutputFormat,
    batch_size: usize,
    field_types: Vec<FieldType>,
    null_marker: String,
    publish: bool,
    extract: ExtractConfig,
}

impl RowprintConfig {
    pub fn new(args: MyArgs) -> Result<RowprintConfig, ConfigError> {
        let external_conf = args.get_external_conf()?;
        Self::merge(&args, &external_conf)
    }

    pub fn merge(args: &MyArgs, external_conf: &ExternalConfig) -> Result<RowprintConfig, ConfigError> {
        let dash = "-".to_string();
        let empty = String::new();
        let no_types: Vec<String> = Vec::new();

        let input = args_or_external_opt_default!(args, external_conf, input, &dash);
        let output = args_or_external_opt_default!(args, external_conf, output, &dash);
        let format_name = "delimited".to_string();
        let output_format = OutputFormat::from_name(args_or_external_opt_default!(
            args,
            external_conf,
            output_format,
            &format_name
        ))?;
        let batch_size =
            *args_or_external_opt_default!(args, external_conf, batch_size, &DEFAULT_BATCH_SIZE);
        if batch_size == 0 {
            return Err(ConfigError::new("batch_size must be at least 1"));
        }
        let type_names = args_or_external_vec_default!(args, external_conf, field_types, &no_types);
        let field_types: Vec<FieldType> = type_names
            .iter()
            .flat_map(|s| s.split(','))
            .filter(|s| !s.trim().is_empty())
            .map(FieldType::from_type_name)
            .collect();
        let null_marker = args_or_external_opt_default!(args, external_conf, null_marker, &empty);
        let publish = args_or_external_bool_default!(args, external_conf, publish, false);

        let default_extract_name = DEFAULT_EXTRACT_NAME.to_string();
        let dot = ".".to_string();
        let extract = ExtractConfig::builder()
            .host(args_or_external_opt_default!(args, external_conf, host, &empty))
            .username(args_or_external_opt_default!(args, external_conf, username, &empty))
            .password(args_or_external_opt_default!(args, external_conf, password, &empty))
            .site_id(args_or_external_opt_default!(args, external_conf, site_id, &empty))
            .project(args_or_external_opt_default!(args, external_conf, project, &empty))
            .datasource(args_or_external_opt_default!(args, external_conf, datasource, &empty))
            .extract_name(args_or_external_opt_default!(
                args,
                external_conf,
                extract_name,
                &default_extract_name
            ))
            .work_dir(args_or_external_opt_default!(args, external_conf, work_dir, &dot))
            .overwrite(args_or_external_bool_default!(args, external_conf, overwrite, false))
            .build();

        if publish {
            if output_format != OutputFormat::Extract {
                return Err(ConfigError::new("--publish requires the extract output format"));
            }
            if extract.host().is_empty() {
                return Err(ConfigError::new("Publishing requires a server host"));
            }
            if extract.datasource().is_empty() {
                return Err(ConfigError::new("Publishing requires a datasource name"));
            }
        }

        Ok(Self {
            input: input.to_string(),
            output: output.to_string(),
            output_format,
            batch_size,
            field_types,
            null_marker: null_marker.to_string(),
            publish,
            extract,
        })
    }

    pub fn get_read(&self) -> Result<Box<dyn Read>, io::Error> {
        let reader: Box<dyn Read> = if self.input == "-" {
            Box::new(BufReader::new(io::stdin()))
        } else {
            Box::new(BufReader::new(fs::File::open(&self.input)?))
        };
        Ok(reader)
    }

    pub fn get_outp(&self) -> Result<DynBoxWrite, io::Error> {
        let writer: DynBoxWrite = if self.output == "-" {
            Box::new(BufWriter::new(io::stdout()))
        } else {
            Box::new(BufWriter::new(fs::File::create(&self.output)?))
        };
        Ok(writer)
    }

    pub fn output_format(&self) -> OutputFormat {
        self.output_format
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    pub fn field_types(&self) -> &[FieldType] {
        &self.field_types
    }

    pub fn null_marker(&self) -> &str {
        &self.null_marker
    }

    pub fn publish(&self) -> bool {
        self.publish
    }

    pub fn extract_config(&self) -> &ExtractConfig {
        &self.extract
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_args() -> MyArgs {
        MyArgs {
            input: Some("rows.csv".to_string()),
            field_types: vec!["bigint,varchar".to_string(), "date".to_string()],
            ..MyArgs::default()
        }
    }

    #[test]
    fn new_works() {
        let hc = RowprintConfig::new(test_args()).unwrap();
        assert_eq!(hc.output_format(), OutputFormat::Delimited);
        assert_eq!(hc.batch_size(), DEFAULT_BATCH_SIZE);
        assert_eq!(
            hc.field_types(),
            &[FieldType::BigInt, FieldType::Varchar, FieldType::Date]
        );
        assert_eq!(hc.null_marker(), "");
        assert_eq!(hc.extract_config().extract_name(), DEFAULT_EXTRACT_NAME);
        assert!(!hc.publish());
    }

    #[test]
    fn args_override_external() {
        let ext = ExternalConfig {
            output_format: Some("csv".to_string()),
            batch_size: Some(10),
            field_types: Some(vec!["double".to_string()]),
            host: Some("/srv".to_string()),
            overwrite: Some(true),
            ..ExternalConfig::default()
        };
        let args = MyArgs {
            output_format: Some("extract".to_string()),
            ..test_args()
        };
        let hc = RowprintConfig::merge(&args, &ext).unwrap();
        assert_eq!(hc.output_format(), OutputFormat::Extract);
        assert_eq!(hc.batch_size(), 10);
        assert_eq!(hc.field_types().len(), 3);
        assert_eq!(hc.extract_config().host(), "/srv");
        assert!(hc.extract_config().overwrite());
    }

    #[test]
    fn unknown_format_is_rejected() {
        let args = MyArgs {
            output_format: Some("csv".to_string()),
            ..test_args()
        };
        assert!(RowprintConfig::merge(&args, &ExternalConfig::default()).is_err());
    }

    #[test]
    fn publish_needs_target() {
        let args = MyArgs {
            output_format: Some("extract".to_string()),
            publish: true,
            ..test_args()
        };
        assert!(RowprintConfig::merge(&args, &ExternalConfig::default()).is_err());
        let args = MyArgs {
            host: Some("/srv".to_string()),
            datasource: Some("sales".to_string()),
            ..args
        };
        let hc = RowprintConfig::merge(&args, &ExternalConfig::default()).unwrap();
        assert!(hc.publish());
    }
}
