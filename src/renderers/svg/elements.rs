//! SVG element builder
//!
//! Accumulates SVG elements as strings and assembles the final document.

pub(super) const NOTE_COLOR: &str = "#1a1a1a";
pub(super) const STAFF_COLOR: &str = "#555555";
pub(super) const PLACEHOLDER_COLOR: &str = "blue";

pub(super) const NOTEHEAD_RX: f64 = 5.5;
pub(super) const NOTEHEAD_RY: f64 = 4.0;
pub(super) const STEM_WIDTH: f64 = 1.2;
pub(super) const STAFF_LINE_WIDTH: f64 = 0.8;

#[derive(Debug, Clone, Default)]
pub(super) struct SvgBuilder {
    elements: Vec<String>,
}

impl SvgBuilder {
    pub(super) fn new() -> Self {
        Self::default()
    }

    pub(super) fn elements(&self) -> &[String] {
        &self.elements
    }

    pub(super) fn line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, color: &str, width: f64) {
        self.elements.push(format!(
            r#"<line x1="{:.1}" y1="{:.1}" x2="{:.1}" y2="{:.1}" stroke="{}" stroke-width="{:.1}"/>"#,
            x1, y1, x2, y2, color, width
        ));
    }

    pub(super) fn text(&mut self, x: f64, y: f64, content: &str, size: f64, anchor: &str) {
        let escaped = content
            .replace('&', "&amp;")
            .replace('<', "&lt;")
            .replace('>', "&gt;");
        self.elements.push(format!(
            r#"<text x="{:.1}" y="{:.1}" font-size="{:.0}" fill="{}" text-anchor="{}">{}</text>"#,
            x, y, size, NOTE_COLOR, anchor, escaped
        ));
    }

    pub(super) fn notehead(&mut self, cx: f64, cy: f64, filled: bool) {
        if filled {
            self.elements.push(format!(
                r#"<ellipse cx="{:.1}" cy="{:.1}" rx="{:.1}" ry="{:.1}" fill="{}" transform="rotate(-15,{:.1},{:.1})"/>"#,
                cx, cy, NOTEHEAD_RX, NOTEHEAD_RY, NOTE_COLOR, cx, cy
            ));
        } else {
            let sw = 2.0;
            self.elements.push(format!(
                r#"<ellipse cx="{:.1}" cy="{:.1}" rx="{:.1}" ry="{:.1}" fill="none" stroke="{}" stroke-width="{:.1}" transform="rotate(-15,{:.1},{:.1})"/>"#,
                cx, cy, NOTEHEAD_RX - sw / 2.0, NOTEHEAD_RY - sw / 2.0, NOTE_COLOR, sw, cx, cy
            ));
        }
    }

    /// Dashed hover marker; ignores pointer events so it never steals hovers
    pub(super) fn placeholder(&mut self, cx: f64, cy: f64) {
        self.elements.push(format!(
            r#"<circle id="placeholder" cx="{:.1}" cy="{:.1}" r="8" fill="none" stroke="{}" stroke-dasharray="4,2" pointer-events="none"/>"#,
            cx, cy, PLACEHOLDER_COLOR
        ));
    }

    pub(super) fn build(&self, width: f64, height: f64, extra: &[String]) -> String {
        let mut svg = format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {} {}" width="{}" height="{}">"#,
            width, height, width, height
        );
        svg.push('\n');
        for el in self.elements.iter().chain(extra) {
            svg.push_str("  ");
            svg.push_str(el);
            svg.push('\n');
        }
        svg.push_str("</svg>\n");
        svg
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_is_escaped() {
        let mut svg = SvgBuilder::new();
        svg.text(0.0, 0.0, "<&>", 12.0, "start");
        assert!(svg.elements()[0].contains("&lt;&amp;&gt;"));
    }

    #[test]
    fn test_build_wraps_elements() {
        let mut svg = SvgBuilder::new();
        svg.line(0.0, 1.0, 2.0, 3.0, STAFF_COLOR, STAFF_LINE_WIDTH);
        let doc = svg.build(100.0, 50.0, &[]);
        assert!(doc.starts_with("<svg"));
        assert!(doc.contains(r#"<line x1="0.0" y1="1.0" x2="2.0" y2="3.0""#));
        assert!(doc.trim_end().ends_with("</svg>"));
    }
}
