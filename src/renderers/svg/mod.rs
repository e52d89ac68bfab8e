//! SVG rendering output
//!
//! A `RenderingAdapter` that draws the measure as an SVG document. Used by
//! native hosts and tests; the browser front end draws with VexFlow instead.

mod document;
mod elements;

use document::{default_geometry, render_entries, render_staff, SURFACE_HEIGHT, SURFACE_WIDTH};
use elements::SvgBuilder;

use crate::errors::EditorError;
use crate::models::Measure;
use crate::renderers::{RenderingAdapter, StaffGeometry};

/// SVG staff renderer
#[derive(Debug, Clone)]
pub struct SvgStaffRenderer {
    geometry: StaffGeometry,
    staff: SvgBuilder,
    placeholder: Option<(f64, f64)>,
    render_count: usize,
}

impl SvgStaffRenderer {
    pub fn new() -> Self {
        Self {
            geometry: default_geometry(),
            staff: SvgBuilder::new(),
            placeholder: None,
            render_count: 0,
        }
    }

    pub fn geometry(&self) -> StaffGeometry {
        self.geometry
    }

    pub fn placeholder(&self) -> Option<(f64, f64)> {
        self.placeholder
    }

    /// Number of completed `render` calls
    pub fn render_count(&self) -> usize {
        self.render_count
    }

    /// The current drawing, including the hover marker if one is shown
    pub fn document(&self) -> String {
        let mut overlay = SvgBuilder::new();
        if let Some((x, y)) = self.placeholder {
            overlay.placeholder(x, y);
        }
        self.staff.build(SURFACE_WIDTH, SURFACE_HEIGHT, overlay.elements())
    }
}

impl Default for SvgStaffRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl RenderingAdapter for SvgStaffRenderer {
    fn render(&mut self, measure: &Measure) -> Result<StaffGeometry, EditorError> {
        let mut svg = SvgBuilder::new();
        render_staff(&mut svg, &self.geometry, measure);
        render_entries(&mut svg, &self.geometry, measure);

        self.staff = svg;
        self.render_count += 1;
        log::debug!(
            "rendered {} entries into {} svg elements",
            measure.entries().len(),
            self.staff.elements().len()
        );
        Ok(self.geometry)
    }

    fn show_placeholder(&mut self, x: f64, y: f64) {
        self.placeholder = Some((x, y));
    }

    fn clear_placeholder(&mut self) {
        self.placeholder = None;
    }
}
