// Application layer - Paging, binding and the collaborator seams
pub mod dashboard_controller;
pub mod measurement_source;
pub mod render_surface;
pub mod resize;
pub mod series_binder;
