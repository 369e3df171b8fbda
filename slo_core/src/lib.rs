pub mod config;
pub mod definition;
pub mod error;
pub mod history;
pub mod kind;
pub mod parser;

pub use config::{TrackerConfig, TrackerConfigBuilder, TrackerDocument};
pub use definition::SloDefinition;
pub use error::{Result, SloError};
pub use history::{Observation, SloHistory};
pub use kind::{BudgetRule, Direction, SloKind};
pub use parser::{parse_config_from_file, parse_config_from_str};

/// Default SLO name used by availability recordings.
pub const AVAILABILITY: &str = "availability";
/// Default SLO name used by latency recordings.
pub const LATENCY_P99: &str = "latency_p99";
/// Default SLO name used by error rate recordings.
pub const ERROR_RATE: &str = "error_rate";
