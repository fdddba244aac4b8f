use std::collections::BTreeMap;
use std::path::Path;

use initsys_core::{
    EnvironmentVariable, Options, ServiceDescriptor, TemplateError, TemplateErrorKind,
};
use minijinja::{ErrorKind, UndefinedBehavior, Value};
use serde::Serialize;

/// Where the text of a template comes from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TemplateSource {
    Builtin(&'static str),
    Override(String),
}

impl TemplateSource {
    /// Uses the override stored under `key` when it is set and non-empty.
    pub fn from_options(options: &Options, key: &str, builtin: &'static str) -> Self {
        let custom = options.string(key, "");
        if custom.is_empty() {
            TemplateSource::Builtin(builtin)
        } else {
            TemplateSource::Override(custom)
        }
    }

    pub fn text(&self) -> &str {
        match self {
            TemplateSource::Builtin(text) => text,
            TemplateSource::Override(text) => text,
        }
    }
}

/// Fields exposed to a template: the descriptor plus backend extras.
#[derive(Clone, Debug, Serialize)]
pub struct Context {
    name: String,
    display_name: String,
    description: String,
    path: String,
    arguments: Vec<String>,
    working_directory: Option<String>,
    chroot: Option<String>,
    user_name: Option<String>,
    dependencies: Vec<String>,
    environment_variables: Vec<EnvironmentVariable>,
    #[serde(flatten)]
    extra: BTreeMap<String, Value>,
}

impl Context {
    pub fn new(descriptor: &ServiceDescriptor, path: &Path) -> Self {
        let display = |p: &Path| p.to_string_lossy().into_owned();
        Self {
            name: descriptor.name().to_owned(),
            display_name: descriptor.display().to_owned(),
            description: descriptor.description().to_owned(),
            path: display(path),
            arguments: descriptor.arguments().to_vec(),
            working_directory: descriptor.working_directory().map(display),
            chroot: descriptor.chroot().map(display),
            user_name: descriptor.user_name().map(ToOwned::to_owned),
            dependencies: descriptor.dependencies().to_vec(),
            environment_variables: descriptor.environment_variables().to_vec(),
            extra: BTreeMap::new(),
        }
    }

    pub fn with(mut self, key: &str, value: impl Serialize) -> Self {
        self.extra
            .insert(key.to_owned(), Value::from_serialize(value));
        self
    }
}

fn quote(value: String) -> String {
    format!("\"{}\"", value.replace('"', "\\\""))
}

fn escape_spaces(value: String) -> String {
    value.replace(' ', "\\x20")
}

pub(crate) fn xml_escape(value: &str) -> String {
    quick_xml::escape::escape(value).into_owned()
}

fn environment() -> minijinja::Environment<'static> {
    let mut env = minijinja::Environment::new();
    env.set_undefined_behavior(UndefinedBehavior::Strict);
    env.set_trim_blocks(true);
    env.set_lstrip_blocks(true);
    env.set_keep_trailing_newline(true);
    env.add_function("bool", |value: bool| if value { "true" } else { "false" });
    env.add_filter("cmd", quote);
    env.add_filter("cmd_escape", escape_spaces);
    env.add_filter("xml", |value: String| xml_escape(&value));
    env
}

fn template_error(err: minijinja::Error) -> TemplateError {
    let kind = match err.kind() {
        ErrorKind::SyntaxError | ErrorKind::UnknownFilter | ErrorKind::UnknownFunction => {
            TemplateErrorKind::Syntax
        }
        ErrorKind::UndefinedError => TemplateErrorKind::MissingField,
        _ => TemplateErrorKind::Render,
    };
    let message = match err.detail() {
        Some(detail) => format!("{detail} (line {})", err.line().unwrap_or_default()),
        None => err.to_string(),
    };
    TemplateError::new(kind, message)
}

pub fn render(source: &TemplateSource, context: &Context) -> Result<String, TemplateError> {
    environment()
        .render_str(source.text(), context)
        .map_err(template_error)
}

#[cfg(test)]
#[path = "./template_test.rs"]
mod template_test;
