mod config_file_type;
mod error;
mod service_file_config;

pub use config_file_type::*;
pub use error::*;
pub use service_file_config::*;
