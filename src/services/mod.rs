pub mod aggregate;
pub mod loader_service;
pub mod report_service;
pub mod resolver_service;

pub use loader_service::{DataSources, LoaderService};
pub use report_service::{ReportParams, run_catalog, run_report};
pub use resolver_service::{ResolvedClaim, ResolvedClaims};
