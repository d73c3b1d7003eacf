pub mod cpu_features;
pub mod log_setup;
pub mod test_utils;

pub use log_setup::setup_logging;
