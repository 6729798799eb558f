pub mod fetch_service;
pub mod reconcile_service;

pub use fetch_service::FetchService;
pub use reconcile_service::{AssetOutcome, ReconcileOptions, ReconcileService, ReconcileSummary};
