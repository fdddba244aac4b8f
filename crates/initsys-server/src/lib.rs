mod interface;
pub use interface::*;

mod run;
pub use run::*;

mod service_error;
pub use service_error::*;

mod signal;
pub use signal::{TerminationSignals, wait_for_termination};

pub use initsys_client::Manager;
