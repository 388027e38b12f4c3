mod error;
#[allow(clippy::module_inception)]
mod extract;
mod row;
mod table;
mod types;

pub use error::*;
pub use extract::*;
pub use row::*;
pub use table::*;
pub use types::*;
