// Copyright 2022 Asen Lazarov

use std::error::Error;
use std::io::{Read, Write};

use clap::Parser;
use log::{debug, info};

use conf::*;
use input::CsvRowSource;
use printer::{DelimitedRecordPrinter, DynOutputPrinter, ExtractFilePrinter};
use publish::{DirectoryServer, DynServerConnection};
use schema::ResultSchema;

mod conf;
mod extract;
mod input;
mod printer;
mod publish;
mod schema;
#[cfg(test)]
mod test_log;

pub type DynError = Box<dyn Error>;
pub type DynBoxWrite = Box<dyn Write>;

fn build_printer(conf: &RowprintConfig, schema: &ResultSchema) -> Result<DynOutputPrinter, DynError> {
    let printer: DynOutputPrinter = match conf.output_format() {
        OutputFormat::Delimited => Box::new(DelimitedRecordPrinter::new(
            schema.field_names(),
            conf.get_outp()?,
        )),
        OutputFormat::Extract => {
            let publisher: Option<DynServerConnection> = if conf.publish() {
                Some(Box::new(DirectoryServer::new()))
            } else {
                None
            };
            Box::new(ExtractFilePrinter::create(
                schema.clone(),
                conf.extract_config().clone(),
                publisher,
            )?)
        }
    };
    Ok(printer)
}

fn print_all<R: Read>(
    src: &mut CsvRowSource<R>,
    printer: &mut DynOutputPrinter,
) -> Result<usize, DynError> {
    let mut total = 0;
    let mut batch = src.next_batch()?;
    while !batch.is_empty() {
        let next = src.next_batch()?;
        total += batch.len();
        debug!("Printing batch of {} rows", batch.len());
        printer.print_rows(&batch, next.is_empty())?;
        batch = next;
    }
    printer.finish()?;
    Ok(total)
}

fn main() -> Result<(), DynError> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args: MyArgs = MyArgs::parse();
    let conf = RowprintConfig::new(args)?;
    let mut src = CsvRowSource::new(
        conf.get_read()?,
        conf.field_types(),
        conf.null_marker(),
        conf.batch_size(),
    )?;
    let mut printer = build_printer(&conf, src.schema())?;
    let total = print_all(&mut src, &mut printer)?;
    info!("Printed {} rows", total);
    Ok(())
}

#[test]
fn verify_app() {
    use clap::CommandFactory;
    MyArgs::command().debug_assert()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::FieldType;

    fn config(args: MyArgs) -> RowprintConfig {
        RowprintConfig::merge(&args, &ExternalConfig::default()).unwrap()
    }

    #[test]
    fn prints_csv_as_delimited_records() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("out.txt");
        let conf = config(MyArgs {
            output: Some(out.to_str().unwrap().to_string()),
            batch_size: Some(2),
            field_types: vec!["bigint,varchar,double".to_string()],
            ..MyArgs::default()
        });
        let data = "id,_name,score\n1,bob,2\n2,amy,\n3,_x,0.5\n";
        let mut src =
            CsvRowSource::new(data.as_bytes(), conf.field_types(), conf.null_marker(), 2).unwrap();
        let mut printer = build_printer(&conf, src.schema()).unwrap();
        assert_eq!(print_all(&mut src, &mut printer).unwrap(), 3);
        drop(printer);
        assert_eq!(
            std::fs::read_to_string(&out).unwrap(),
            "1|name&bob\u{1e}score&2.0\n2|name&amy\u{1e}score&\n3|name&_x\u{1e}score&0.5\n"
        );
    }

    #[test]
    fn publishes_extract_into_directory_server() {
        let dir = tempfile::tempdir().unwrap();
        let server_root = dir.path().join("server");
        std::fs::create_dir(&server_root).unwrap();
        let conf = config(MyArgs {
            output_format: Some("extract".to_string()),
            field_types: vec!["bigint".to_string(), "date".to_string()],
            publish: true,
            work_dir: Some(dir.path().to_str().unwrap().to_string()),
            host: Some(format!("file://{}", server_root.display())),
            username: Some("analyst".to_string()),
            site_id: Some("finance".to_string()),
            project: Some("sales".to_string()),
            datasource: Some("daily".to_string()),
            ..MyArgs::default()
        });
        assert_eq!(conf.field_types(), &[FieldType::BigInt, FieldType::Date]);
        let data = "id,day\n1,2024-01-05\n2,\n";
        let mut src =
            CsvRowSource::new(data.as_bytes(), conf.field_types(), conf.null_marker(), 10)
                .unwrap();
        let mut printer = build_printer(&conf, src.schema()).unwrap();
        assert_eq!(print_all(&mut src, &mut printer).unwrap(), 2);

        let published = server_root.join("finance").join("sales").join("daily.arrow");
        assert!(published.is_file());
        assert!(!dir.path().join(crate::printer::TEMP_EXTRACT_NAME).exists());
    }
}
