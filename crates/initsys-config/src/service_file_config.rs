use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use confique::{Config, json5, toml, yaml};
use initsys_core::{Builder, OptionValue, ServiceDescriptor};
use serde::Deserialize;
use tracing::debug;

use crate::{ConfigFileType, ConfigLoadError};

/// A service descriptor as written in a configuration file.
#[derive(Config, Clone, Debug)]
pub struct ServiceFileConfig {
    /// Service identifier. Used for unit, script and plist names.
    pub name: String,
    /// Human-readable name shown by the init system.
    pub display_name: Option<String>,
    #[config(default = "")]
    pub description: String,
    /// Defaults to the current executable.
    pub executable: Option<PathBuf>,
    #[config(default = [])]
    pub arguments: Vec<String>,
    pub working_directory: Option<PathBuf>,
    pub chroot: Option<PathBuf>,
    /// Account the service runs as.
    pub user_name: Option<String>,
    /// Services that must be started first.
    #[config(default = [])]
    pub dependencies: Vec<String>,
    pub environment: Option<BTreeMap<String, String>>,
    /// Backend options such as `UserService` or `RestartSec`.
    pub options: Option<BTreeMap<String, OptionSetting>>,
}

#[derive(Deserialize, Clone, Debug, PartialEq)]
#[serde(untagged)]
pub enum OptionSetting {
    Bool(bool),
    Int(i64),
    String(String),
}

impl From<OptionSetting> for OptionValue {
    fn from(setting: OptionSetting) -> Self {
        match setting {
            OptionSetting::Bool(value) => OptionValue::Bool(value),
            OptionSetting::Int(value) => OptionValue::Int(value),
            OptionSetting::String(value) => OptionValue::String(value),
        }
    }
}

impl ServiceFileConfig {
    /// Loads the file at `path`. The format follows the file extension.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigLoadError> {
        let path = path.as_ref();
        if ConfigFileType::from_path(path).is_none() {
            return Err(ConfigLoadError(
                path.to_owned(),
                "unrecognized file extension".to_owned(),
            ));
        }
        if !path.exists() {
            return Err(ConfigLoadError(path.to_owned(), "file not found".to_owned()));
        }
        debug!("Loading service file {path:#?}");
        Self::builder()
            .file(path)
            .load()
            .map_err(|e| ConfigLoadError(path.to_owned(), e.to_string()))
    }

    /// Commented template listing every field.
    pub fn template(file_type: ConfigFileType) -> String {
        match file_type {
            ConfigFileType::Toml => toml::template::<Self>(toml::FormatOptions::default()),
            ConfigFileType::Yaml => yaml::template::<Self>(yaml::FormatOptions::default()),
            ConfigFileType::Json5 => json5::template::<Self>(json5::FormatOptions::default()),
        }
    }

    pub fn into_builder(self) -> Builder {
        let mut builder = ServiceDescriptor::builder(self.name)
            .with_description(self.description)
            .with_args(self.arguments);
        if let Some(display_name) = self.display_name {
            builder = builder.with_display_name(display_name);
        }
        if let Some(executable) = self.executable {
            builder = builder.with_executable(executable);
        }
        if let Some(working_directory) = self.working_directory {
            builder = builder.with_working_directory(working_directory);
        }
        if let Some(chroot) = self.chroot {
            builder = builder.with_chroot(chroot);
        }
        if let Some(user_name) = self.user_name {
            builder = builder.with_user_name(user_name);
        }
        for dependency in self.dependencies {
            builder = builder.with_dependency(dependency);
        }
        for (key, value) in self.environment.unwrap_or_default() {
            builder = builder.with_environment_variable(key, value);
        }
        for (key, value) in self.options.unwrap_or_default() {
            builder = builder.with_option(key, value);
        }
        builder
    }

    pub fn to_descriptor(&self) -> ServiceDescriptor {
        self.clone().into_builder().build()
    }
}

#[cfg(test)]
#[path = "./service_file_config_test.rs"]
mod service_file_config_test;
