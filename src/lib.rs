pub mod api;
pub mod config;
pub mod error;
pub mod geometry;
pub mod instances;
pub mod optimizer;
pub mod placement;
pub mod scorer;
// cmd and reports are modules of the binary crate (main).
