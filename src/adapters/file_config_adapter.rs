//! INI file configuration adapter.

use crate::domain::error::SlippageLabError;
use crate::ports::config_port::ConfigPort;
use configparser::ini::Ini;
use std::path::Path;

#[derive(Debug)]
pub struct FileConfigAdapter {
    config: Ini,
}

impl FileConfigAdapter {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, SlippageLabError> {
        let path = path.as_ref();
        let mut config = Ini::new();
        config
            .load(path)
            .map_err(|reason| SlippageLabError::ConfigParse {
                file: path.display().to_string(),
                reason,
            })?;
        Ok(Self { config })
    }

    pub fn from_string(content: &str) -> Result<Self, SlippageLabError> {
        let mut config = Ini::new();
        config
            .read(content.to_string())
            .map_err(|reason| SlippageLabError::ConfigParse {
                file: "<string>".to_string(),
                reason,
            })?;
        Ok(Self { config })
    }

    /// An adapter with no sections; every lookup finds nothing.
    pub fn empty() -> Self {
        Self { config: Ini::new() }
    }
}

impl ConfigPort for FileConfigAdapter {
    fn get_string(&self, section: &str, key: &str) -> Option<String> {
        self.config.get(section, key)
    }

    fn get_int(&self, section: &str, key: &str) -> Result<Option<i64>, String> {
        self.config.getint(section, key)
    }

    fn get_double(&self, section: &str, key: &str) -> Result<Option<f64>, String> {
        self.config.getfloat(section, key)
    }
}
