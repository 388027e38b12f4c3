use crate::schema::Row;
use crate::DynError;

/// Serializes batches of result rows to some sink.
pub trait OutputPrinter {
    /// `complete` is set on the last batch of a result.
    fn print_rows(&mut self, rows: &[Row], complete: bool) -> Result<(), DynError>;

    fn finish(&mut self) -> Result<(), DynError>;
}

pub type DynOutputPrinter = Box<dyn OutputPrinter>;
