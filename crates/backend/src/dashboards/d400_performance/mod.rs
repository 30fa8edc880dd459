pub mod metrics;
pub mod repository;
pub mod service;
