mod descriptor;
pub use descriptor::*;

mod error;
pub use error::*;

mod options;
pub use options::*;

pub mod process;

mod status;
pub use status::Status;

pub type BoxedError = Box<dyn std::error::Error + Send + Sync + 'static>;
