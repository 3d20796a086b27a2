//! Kernel module - ingestion pipeline infrastructure.

pub mod refresh;
pub mod sources;

pub use refresh::{RefreshCoordinator, RefreshReport, SourceOutcome};
pub use sources::{
    default_sources, GithubJobsSource, JobSource, RemoteOkSource, RozeeSource, SourceError,
    WeWorkRemotelySource,
};
