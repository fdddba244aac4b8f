use std::env::current_exe;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::{Error, OptionValue, Options, Result};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvironmentVariable {
    pub name: String,
    pub value: String,
}

/// Everything a backend needs to know about the service it registers.
///
/// Built once through [`Builder`] and treated as read-only afterwards.
#[derive(Clone, Debug)]
pub struct ServiceDescriptor {
    name: String,
    display_name: Option<String>,
    description: String,
    executable: Option<PathBuf>,
    arguments: Vec<String>,
    working_directory: Option<PathBuf>,
    chroot: Option<PathBuf>,
    user_name: Option<String>,
    dependencies: Vec<String>,
    environment_variables: Vec<EnvironmentVariable>,
    options: Options,
}

impl ServiceDescriptor {
    pub fn builder(name: impl Into<String>) -> Builder {
        Builder::new(name)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn display_name(&self) -> Option<&str> {
        self.display_name.as_deref()
    }

    /// The display name when one is set, otherwise the service name.
    pub fn display(&self) -> &str {
        match self.display_name.as_deref() {
            Some(display_name) if !display_name.is_empty() => display_name,
            _ => &self.name,
        }
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn arguments(&self) -> &[String] {
        &self.arguments
    }

    pub fn working_directory(&self) -> Option<&Path> {
        self.working_directory.as_deref()
    }

    pub fn chroot(&self) -> Option<&Path> {
        self.chroot.as_deref()
    }

    pub fn user_name(&self) -> Option<&str> {
        self.user_name.as_deref()
    }

    pub fn dependencies(&self) -> &[String] {
        &self.dependencies
    }

    pub fn environment_variables(&self) -> &[EnvironmentVariable] {
        &self.environment_variables
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Absolute path of the program the init system should launch. Falls back to the
    /// currently running executable when none was configured.
    pub fn exec_path(&self) -> Result<PathBuf> {
        match &self.executable {
            Some(executable) if executable.is_absolute() => Ok(executable.clone()),
            Some(executable) => std::path::absolute(executable)
                .map_err(Error::filesystem("resolving executable", executable)),
            None => current_exe().map_err(Error::filesystem("resolving executable", "<current exe>")),
        }
    }
}

#[derive(Clone, Debug)]
pub struct Builder {
    name: String,
    display_name: Option<String>,
    description: String,
    executable: Option<PathBuf>,
    arguments: Vec<String>,
    working_directory: Option<PathBuf>,
    chroot: Option<PathBuf>,
    user_name: Option<String>,
    dependencies: Vec<String>,
    environment_variables: Vec<EnvironmentVariable>,
    options: Options,
}

impl Builder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            display_name: None,
            description: "".to_owned(),
            executable: None,
            arguments: vec![],
            working_directory: None,
            chroot: None,
            user_name: None,
            dependencies: vec![],
            environment_variables: vec![],
            options: Options::default(),
        }
    }

    pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = Some(display_name.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_executable(mut self, executable: impl Into<PathBuf>) -> Self {
        self.executable = Some(executable.into());
        self
    }

    pub fn with_args<T: Into<String>>(mut self, args: impl IntoIterator<Item = T>) -> Self {
        self.arguments = args.into_iter().map(|a| a.into()).collect();
        self
    }

    pub fn with_working_directory(mut self, working_directory: impl Into<PathBuf>) -> Self {
        self.working_directory = Some(working_directory.into());
        self
    }

    pub fn with_chroot(mut self, chroot: impl Into<PathBuf>) -> Self {
        self.chroot = Some(chroot.into());
        self
    }

    pub fn with_user_name(mut self, user_name: impl Into<String>) -> Self {
        self.user_name = Some(user_name.into());
        self
    }

    pub fn with_dependency(mut self, dependency: impl Into<String>) -> Self {
        self.dependencies.push(dependency.into());
        self
    }

    pub fn with_environment_variable(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.environment_variables.push(EnvironmentVariable {
            name: key.into(),
            value: value.into(),
        });
        self
    }

    pub fn with_option(mut self, key: impl Into<String>, value: impl Into<OptionValue>) -> Self {
        self.options.insert(key, value);
        self
    }

    pub fn with_options(mut self, options: Options) -> Self {
        self.options = options;
        self
    }

    pub fn build(self) -> ServiceDescriptor {
        ServiceDescriptor {
            name: self.name,
            display_name: self.display_name,
            description: self.description,
            executable: self.executable,
            arguments: self.arguments,
            working_directory: self.working_directory,
            chroot: self.chroot,
            user_name: self.user_name,
            dependencies: self.dependencies,
            environment_variables: self.environment_variables,
            options: self.options,
        }
    }
}

#[cfg(test)]
#[path = "./descriptor_test.rs"]
mod descriptor_test;
