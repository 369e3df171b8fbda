pub mod catalog;
pub mod error;
pub mod exporters;
pub mod facade;
pub mod labels;
pub mod prometheus;
pub mod report;
pub mod sink;
pub mod tracker;

pub use catalog::{FamilyKind, MetricFamily, CATALOG};
pub use error::{Result, SinkError};
pub use facade::FacadeSink;
pub use labels::LabelSet;
pub use self::prometheus::PrometheusSink;
pub use report::{SloReport, SloStatus};
pub use sink::MetricsSink;
pub use tracker::SloTracker;
