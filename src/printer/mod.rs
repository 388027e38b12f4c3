mod delimited;
mod extract_printer;
mod format;
mod output_printer;

pub use delimited::*;
pub use extract_printer::*;
pub use format::*;
pub use output_printer::*;
