pub mod equipment;
pub mod ingest;
pub mod monitoring;
pub mod pipeline;
pub mod reporting;
pub mod shared;
pub mod zones;
