pub mod log_loader;

pub use log_loader::{list_log_files, load_all_logs, load_eval_log};
