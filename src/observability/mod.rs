// Observability: metrics recorded by the normalization, reconciliation and supplier phases

pub mod metrics;

pub use metrics::init;
