use std::path::{Path, PathBuf};

/// Where an extract is written locally and where it is published to.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractConfig {
    host: String,
    username: String,
    password: String,
    site_id: String,
    project: String,
    extract_name: String,
    datasource: String,
    overwrite: bool,
    work_dir: PathBuf,
}

impl ExtractConfig {
    pub fn builder() -> ExtractConfigBuilder {
        ExtractConfigBuilder::default()
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn password(&self) -> &str {
        &self.password
    }

    pub fn site_id(&self) -> &str {
        &self.site_id
    }

    pub fn project(&self) -> &str {
        &self.project
    }

    pub fn extract_name(&self) -> &str {
        &self.extract_name
    }

    pub fn datasource(&self) -> &str {
        &self.datasource
    }

    pub fn overwrite(&self) -> bool {
        self.overwrite
    }

    pub fn work_dir(&self) -> &Path {
        &self.work_dir
    }
}

#[derive(Debug, Clone, Default)]
pub struct ExtractConfigBuilder {
    host: String,
    username: String,
    password: String,
    site_id: String,
    project: String,
    extract_name: String,
    datasource: String,
    overwrite: bool,
    work_dir: Option<PathBuf>,
}

impl ExtractConfigBuilder {
    pub fn host(mut self, host: &str) -> Self {
        self.host = host.to_string();
        self
    }

    pub fn username(mut self, username: &str) -> Self {
        self.username = username.to_string();
        self
    }

    pub fn password(mut self, password: &str) -> Self {
        self.password = password.to_string();
        self
    }

    pub fn site_id(mut self, site_id: &str) -> Self {
        self.site_id = site_id.to_string();
        self
    }

    pub fn project(mut self, project: &str) -> Self {
        self.project = project.to_string();
        self
    }

    pub fn extract_name(mut self, extract_name: &str) -> Self {
        self.extract_name = extract_name.to_string();
        self
    }

    pub fn datasource(mut self, datasource: &str) -> Self {
        self.datasource = datasource.to_string();
        self
    }

    pub fn overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }

    pub fn work_dir<P: AsRef<Path>>(mut self, work_dir: P) -> Self {
        self.work_dir = Some(work_dir.as_ref().to_path_buf());
        self
    }

    pub fn build(self) -> ExtractConfig {
        ExtractConfig {
            host: self.host,
            username: self.username,
            password: self.password,
            site_id: self.site_id,
            project: self.project,
            extract_name: self.extract_name,
            datasource: self.datasource,
            overwrite: self.overwrite,
            work_dir: self.work_dir.unwrap_or_else(|| PathBuf::from(".")),
        }
    }
}
