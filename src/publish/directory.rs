use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, info};

use crate::publish::{PublishError, ServerConnection};

/// File extension of published datasources.
pub const DATASOURCE_EXTENSION: &str = "arrow";

/// A server connection that publishes extracts into a shared directory
/// tree, laid out as `<root>/<site>/<project>/<datasource>.arrow`.
///
/// The host is either a `file://` URL or a plain path to an existing
/// directory.
#[derive(Debug, Default)]
pub struct DirectoryServer {
    site_root: Option<PathBuf>,
}

impl DirectoryServer {
    pub fn new() -> Self {
        Self::default()
    }

    fn parse_host(host: &str) -> Result<PathBuf, PublishError> {
        let host = host.trim();
        if host.is_empty() {
            return Err(PublishError::invalid_argument("host is empty"));
        }
        match host.split_once("://") {
            Some(("file", path)) if !path.is_empty() => Ok(PathBuf::from(path)),
            Some(("file", _)) => Err(PublishError::invalid_argument("file URL has no path")),
            Some((scheme, _)) => Err(PublishError::invalid_argument(&format!(
                "unsupported host scheme '{}'",
                scheme
            ))),
            None => Ok(PathBuf::from(host)),
        }
    }

    fn check_name(what: &str, name: &str) -> Result<(), PublishError> {
        if name.trim().is_empty() {
            return Err(PublishError::invalid_argument(&format!("{} is empty", what)));
        }
        if name.contains('/') || name.contains('\\') || name == "." || name == ".." {
            return Err(PublishError::invalid_argument(&format!(
                "{} '{}' is not a valid name",
                what, name
            )));
        }
        Ok(())
    }
}

impl ServerConnection for DirectoryServer {
    fn connect(
        &mut self,
        host: &str,
        username: &str,
        _password: &str,
        site_id: &str,
    ) -> Result<(), PublishError> {
        let root = Self::parse_host(host)?;
        if !root.exists() {
            return Err(PublishError::init(&format!(
                "server root {} does not exist",
                root.display()
            )));
        }
        if !root.is_dir() {
            return Err(PublishError::transport(&format!(
                "server root {} is not a directory",
                root.display()
            )));
        }
        if username.trim().is_empty() {
            return Err(PublishError::not_authenticated("username is empty"));
        }
        let site_root = if site_id.is_empty() {
            root
        } else {
            Self::check_name("site", site_id)?;
            root.join(site_id)
        };
        info!("Connected to {} as {}", site_root.display(), username);
        self.site_root = Some(site_root);
        Ok(())
    }

    fn publish_extract(
        &mut self,
        extract: &Path,
        project: &str,
        datasource: &str,
        overwrite: bool,
    ) -> Result<(), PublishError> {
        let site_root = self
            .site_root
            .as_ref()
            .ok_or_else(|| PublishError::not_authenticated("not connected"))?;
        Self::check_name("project", project)?;
        Self::check_name("datasource", datasource)?;
        if !extract.is_file() {
            return Err(PublishError::invalid_argument(&format!(
                "extract {} does not exist",
                extract.display()
            )));
        }
        let project_dir = site_root.join(project);
        fs::create_dir_all(&project_dir)
            .map_err(|e| PublishError::transport(&e.to_string()))?;
        let target = project_dir.join(format!("{}.{}", datasource, DATASOURCE_EXTENSION));
        if target.exists() && !overwrite {
            return Err(PublishError::server(&format!(
                "datasource '{}' already exists in project '{}'",
                datasource, project
            )));
        }
        let bytes = fs::copy(extract, &target)
            .map_err(|e| PublishError::transport(&e.to_string()))?;
        debug!("Copied {} bytes to {}", bytes, target.display());
        Ok(())
    }

    fn disconnect(&mut self) -> Result<(), PublishError> {
        self.site_root = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::publish::PublishErrorCategory;

    fn connected(root: &Path) -> DirectoryServer {
        let mut server = DirectoryServer::new();
        server
            .connect(root.to_str().unwrap(), "analyst", "secret", "site1")
            .unwrap();
        server
    }

    #[test]
    fn connect_classifies_failures() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().to_str().unwrap().to_string();
        let mut server = DirectoryServer::new();

        let err = server.connect("https://example.com", "u", "p", "").unwrap_err();
        assert_eq!(err.category(), PublishErrorCategory::InvalidArgument);

        let missing = dir.path().join("nope");
        let err = server
            .connect(missing.to_str().unwrap(), "u", "p", "")
            .unwrap_err();
        assert_eq!(err.category(), PublishErrorCategory::Init);

        let file = dir.path().join("plain");
        fs::write(&file, b"x").unwrap();
        let err = server.connect(file.to_str().unwrap(), "u", "p", "").unwrap_err();
        assert_eq!(err.category(), PublishErrorCategory::Transport);

        let err = server.connect(&root, "", "p", "").unwrap_err();
        assert_eq!(err.category(), PublishErrorCategory::NotAuthenticated);

        server.connect(&format!("file://{}", root), "u", "p", "").unwrap();
    }

    #[test]
    fn publish_requires_connection() {
        let dir = tempfile::tempdir().unwrap();
        let extract = dir.path().join("e.arrow");
        fs::write(&extract, b"data").unwrap();
        let mut server = DirectoryServer::new();
        let err = server
            .publish_extract(&extract, "proj", "ds", true)
            .unwrap_err();
        assert_eq!(err.category(), PublishErrorCategory::NotAuthenticated);
    }

    #[test]
    fn publish_copies_and_honors_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let extract = dir.path().join("e.arrow");
        fs::write(&extract, b"first").unwrap();
        let mut server = connected(dir.path());

        server.publish_extract(&extract, "proj", "sales", false).unwrap();
        let target = dir.path().join("site1").join("proj").join("sales.arrow");
        assert_eq!(fs::read(&target).unwrap(), b"first");

        fs::write(&extract, b"second").unwrap();
        let err = server
            .publish_extract(&extract, "proj", "sales", false)
            .unwrap_err();
        assert_eq!(err.category(), PublishErrorCategory::Server);
        assert_eq!(fs::read(&target).unwrap(), b"first");

        server.publish_extract(&extract, "proj", "sales", true).unwrap();
        assert_eq!(fs::read(&target).unwrap(), b"second");

        server.disconnect().unwrap();
        assert!(server.publish_extract(&extract, "proj", "sales", true).is_err());
    }

    #[test]
    fn publish_rejects_bad_names() {
        let dir = tempfile::tempdir().unwrap();
        let extract = dir.path().join("e.arrow");
        fs::write(&extract, b"x").unwrap();
        let mut server = connected(dir.path());
        for (project, ds) in [("", "ds"), ("proj", ""), ("../up", "ds"), ("proj", "a/b")] {
            let err = server.publish_extract(&extract, project, ds, true).unwrap_err();
            assert_eq!(err.category(), PublishErrorCategory::InvalidArgument);
        }
    }
}
