mod directory;
mod error;

use std::path::Path;

pub use directory::*;
pub use error::*;

/// Connection to an analytics server that extracts are published to.
pub trait ServerConnection {
    fn connect(
        &mut self,
        host: &str,
        username: &str,
        password: &str,
        site_id: &str,
    ) -> Result<(), PublishError>;

    fn publish_extract(
        &mut self,
        extract: &Path,
        project: &str,
        datasource: &str,
        overwrite: bool,
    ) -> Result<(), PublishError>;

    fn disconnect(&mut self) -> Result<(), PublishError>;
}

pub type DynServerConnection = Box<dyn ServerConnection>;
