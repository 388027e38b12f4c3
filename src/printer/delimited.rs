use std::io::Write;

use crate::printer::{format_value, OutputPrinter};
use crate::schema::{Row, Value};
use crate::DynError;

/// Separates the `field&value` pairs of one record.
pub const RECORD_SEPARATOR: char = '\u{1e}';

/// Writes one delimited record per row:
/// `value0|field1&value1<RS>field2&value2...\n`.
///
/// Rows are written as they arrive; nothing is buffered across calls
/// beyond what the sink itself buffers.
pub struct DelimitedRecordPrinter<W: Write> {
    field_names: Vec<String>,
    writer: W,
}

impl<W: Write> DelimitedRecordPrinter<W> {
    pub fn new(field_names: Vec<String>, writer: W) -> Self {
        Self {
            field_names,
            writer,
        }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

pub fn format_row(field_names: &[String], row: &[Value]) -> String {
    let mut out = String::new();
    let pairs = field_names.len().min(row.len());
    if pairs > 0 {
        out.push_str(&format_value(&row[0]));
        out.push('|');
    }
    for i in 1..pairs {
        let field = &field_names[i];
        out.push_str(field.strip_prefix('_').unwrap_or(field));
        out.push('&');
        out.push_str(&format_value(&row[i]));
        if i + 1 < field_names.len() {
            out.push(RECORD_SEPARATOR);
        }
    }
    out.push('\n');
    out
}

impl<W: Write> OutputPrinter for DelimitedRecordPrinter<W> {
    fn print_rows(&mut self, rows: &[Row], _complete: bool) -> Result<(), DynError> {
        for row in rows {
            self.writer
                .write_all(format_row(&self.field_names, row).as_bytes())?;
        }
        Ok(())
    }

    fn finish(&mut self) -> Result<(), DynError> {
        self.print_rows(&[], true)?;
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    fn names(n: &[&str]) -> Vec<String> {
        n.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn strips_underscore_from_field_names() {
        let row = vec![Value::from("3"), Value::from("bob")];
        assert_eq!(format_row(&names(&["id", "_name"]), &row), "3|name&bob\n");
    }

    #[test]
    fn separates_pairs_with_record_separator() {
        let row = vec![Value::BigInt(1), Value::BigInt(2), Value::BigInt(3)];
        assert_eq!(
            format_row(&names(&["a", "_b", "c"]), &row),
            "1|b&2\u{1e}c&3\n"
        );
    }

    #[test]
    fn first_value_is_bare() {
        let row = vec![Value::from("_x"), Value::Null, Value::Bool(true)];
        assert_eq!(
            format_row(&names(&["_target", "__k", "v"]), &row),
            "_x|_k&\u{1e}v&true\n"
        );
    }

    #[test]
    fn single_and_empty_rows() {
        assert_eq!(format_row(&names(&["a"]), &[Value::Integer(5)]), "5|\n");
        assert_eq!(format_row(&names(&["a", "b"]), &[]), "\n");
    }

    #[test]
    fn short_row_keeps_trailing_separator() {
        let row = vec![Value::from("1"), Value::from("2")];
        assert_eq!(
            format_row(&names(&["a", "b", "c"]), &row),
            "1|b&2\u{1e}\n"
        );
    }

    #[test]
    fn print_rows_writes_each_row() {
        let mut p = DelimitedRecordPrinter::new(names(&["id", "_name"]), Vec::new());
        p.print_rows(&[vec![Value::from("3"), Value::from("bob")]], false)
            .unwrap();
        p.print_rows(
            &[
                vec![Value::from("4"), Value::from("amy")],
                vec![Value::from("5"), Value::Null],
            ],
            true,
        )
        .unwrap();
        p.finish().unwrap();
        let out = String::from_utf8(p.into_inner()).unwrap();
        assert_eq!(out, "3|name&bob\n4|name&amy\n5|name&\n");
    }

    struct FlushCounter {
        written: Vec<u8>,
        flushes: usize,
    }

    impl Write for FlushCounter {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.written.extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            self.flushes += 1;
            Ok(())
        }
    }

    #[test]
    fn finish_flushes_without_writing() {
        let sink = FlushCounter {
            written: Vec::new(),
            flushes: 0,
        };
        let mut p = DelimitedRecordPrinter::new(names(&["a"]), sink);
        p.finish().unwrap();
        let sink = p.into_inner();
        assert!(sink.written.is_empty());
        assert_eq!(sink.flushes, 1);
    }

    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn write_errors_propagate() {
        let mut p = DelimitedRecordPrinter::new(names(&["a"]), BrokenPipe);
        assert!(p.print_rows(&[vec![Value::Integer(1)]], false).is_err());
    }
}
