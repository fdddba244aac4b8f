use std::path::Path;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConfigFileType {
    Toml,
    Yaml,
    Json5,
}

impl ConfigFileType {
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()? {
            "toml" => Some(ConfigFileType::Toml),
            "yaml" | "yml" => Some(ConfigFileType::Yaml),
            "json5" | "json" => Some(ConfigFileType::Json5),
            _ => None,
        }
    }
}
