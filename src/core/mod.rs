pub mod series;
pub mod stats;
pub mod workflow;
