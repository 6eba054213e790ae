#![forbid(unsafe_code)]
//! Shared primitives for the SorteiAki workspace.
//!
//! Nothing in here knows about raffles. The crate owns the error taxonomy,
//! canonical hashing used for audit digests, the clock port and config path
//! resolution.

pub mod domain;
pub mod errors;
pub mod ports;

pub use domain::canonical;
pub use domain::{resolve_config_path, resolve_results_dir, sha256, sha256_hex, Sha256Digest};
pub use errors::{ConfigPathScope, Error, ErrorCode, ExitCode, MachineError, Result};
pub use ports::{ClockPort, FixedClock, SystemClock};

pub const CRATE_NAME: &str = "sorteiaki-core";

pub const ENV_SORTEIAKI_LOG_LEVEL: &str = "SORTEIAKI_LOG_LEVEL";
pub const ENV_SORTEIAKI_LOG_JSON: &str = "SORTEIAKI_LOG_JSON";
pub const ENV_SORTEIAKI_CONFIG: &str = "SORTEIAKI_CONFIG";
pub const ENV_SORTEIAKI_RESULTS_DIR: &str = "SORTEIAKI_RESULTS_DIR";
pub const ENV_SORTEIAKI_ACCESS_TOKEN: &str = "SORTEIAKI_ACCESS_TOKEN";
pub const ENV_SORTEIAKI_GRAPH_BASE_URL: &str = "SORTEIAKI_GRAPH_BASE_URL";
