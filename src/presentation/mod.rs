// Presentation layer - Terminal rendering and navigation input
pub mod console;
pub mod text_chart;
