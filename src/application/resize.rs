// Resize adapter - Container height from container width
use crate::application::render_surface::RenderSurface;

const WIDE_LAYOUT_MIN_WIDTH: u32 = 500;

/// Half the width on wide containers, square otherwise.
pub fn chart_height(width: u32) -> u32 {
    if width > WIDE_LAYOUT_MIN_WIDTH {
        width / 2
    } else {
        width
    }
}

pub fn fit_to_width<S: RenderSurface>(surface: &mut S) -> u32 {
    let height = chart_height(surface.container_width());
    surface.set_container_height(height);
    height
}
