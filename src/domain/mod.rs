// Domain layer - Plain data with no I/O
pub mod chart;
pub mod measurement;
pub mod series;
pub mod window;
