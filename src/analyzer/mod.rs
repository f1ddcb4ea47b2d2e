pub mod breakdown;
pub mod dashboard;
pub mod metrics;
pub mod recurring;
pub mod stats;
pub mod status;
pub mod temporal;
pub mod users;

pub use dashboard::{build_dashboard, DashboardData};
pub use metrics::{compute_metrics, MetricsSnapshot};
pub use status::{filter_tickets, partition_by_status, StatusFilter, StatusPartition};
