use serde::{Deserialize, Serialize};

/// Canonical service state, independent of the native init system's vocabulary.
///
/// "Not installed" is not a state: it's reported as [`crate::Error::NotInstalled`].
#[derive(
    strum::Display,
    strum::EnumProperty,
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
)]
pub enum Status {
    #[strum(props(color = "yellow"))]
    Unknown,
    #[strum(props(color = "green"))]
    Running,
    #[strum(props(color = "red"))]
    Stopped,
}

impl Status {
    #[cfg(feature = "pretty-print")]
    pub fn pretty_print(&self) -> String {
        use owo_colors::{AnsiColors, OwoColorize};
        use strum::EnumProperty;

        let val = self.to_string();
        let color: AnsiColors = self.get_str("color").unwrap_or("default").into();
        val.color(color).to_string()
    }
}

#[cfg(test)]
#[path = "./status_test.rs"]
mod status_test;
