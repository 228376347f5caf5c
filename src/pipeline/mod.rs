pub mod pipeline_config;
pub mod processing;
pub mod storage;
