pub mod canonical;
pub mod config;

pub use canonical::{sha256, sha256_hex, Sha256Digest};
pub use config::{resolve_config_path, resolve_results_dir};
