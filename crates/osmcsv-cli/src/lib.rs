//! CLI library components for the OSM CSV transpiler.

pub mod logging;
pub mod pipeline;
