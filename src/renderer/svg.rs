//! SVG generation for LCD display states

use crate::lcd::annunciator::Annunciators;
use crate::lcd::cells::DisplayCells;
use crate::lcd::font::Segment;
use crate::stylesheet::LcdStyle;

use super::geometry::{
    annunciator_position, cell_origin, panel_bounds, punct_marks, segment_polygon, BoundingBox,
    Point, ANNUNCIATOR_FONT_SIZE,
};
use super::SvgConfig;

/// Build SVG elements incrementally
pub struct SvgBuilder {
    config: SvgConfig,
    styles: Vec<String>,
    elements: Vec<String>,
    indent: usize,
}

impl SvgBuilder {
    /// Create a new SVG builder
    pub fn new(config: SvgConfig) -> Self {
        Self {
            config,
            styles: vec![],
            elements: vec![],
            indent: 1,
        }
    }

    /// Add CSS rules for the palette
    ///
    /// Each rule is XML-escaped.
    pub fn add_stylesheet(&mut self, style: &LcdStyle) {
        let prefix = &self.config.class_prefix;
        let rules = [
            format!(".{prefix}panel {{ fill: {}; }}", style.background),
            format!(".{prefix}on {{ fill: {}; }}", style.segment_on),
            format!(".{prefix}off {{ fill: {}; }}", style.segment_off),
            format!(
                ".{prefix}annunciator {{ fill: {}; font-family: {}; }}",
                style.annunciator, style.font_family
            ),
        ];
        self.styles.extend(rules.iter().map(|rule| escape_xml(rule)));
    }

    fn class(&self, name: &str) -> String {
        format!("{}{}", self.config.class_prefix, name)
    }

    fn indent_str(&self) -> String {
        if self.config.pretty_print {
            "  ".repeat(self.indent)
        } else {
            String::new()
        }
    }

    fn newline(&self) -> &str {
        if self.config.pretty_print {
            "\n"
        } else {
            ""
        }
    }

    /// Add a rectangle element
    pub fn add_rect(&mut self, bounds: BoundingBox, classes: &[String]) {
        self.elements.push(format!(
            r#"{}<rect class="{}" x="{}" y="{}" width="{}" height="{}"/>"#,
            self.indent_str(),
            classes.join(" "),
            bounds.x,
            bounds.y,
            bounds.width,
            bounds.height
        ));
    }

    /// Add a polygon element
    pub fn add_polygon(&mut self, points: &[Point], classes: &[String]) {
        let points_str: String = points
            .iter()
            .map(|p| format!("{},{}", p.x, p.y))
            .collect::<Vec<_>>()
            .join(" ");

        self.elements.push(format!(
            r#"{}<polygon class="{}" points="{}"/>"#,
            self.indent_str(),
            classes.join(" "),
            points_str
        ));
    }

    /// Add a circle element
    pub fn add_circle(&mut self, center: Point, r: f64, classes: &[String]) {
        self.elements.push(format!(
            r#"{}<circle class="{}" cx="{}" cy="{}" r="{}"/>"#,
            self.indent_str(),
            classes.join(" "),
            center.x,
            center.y,
            r
        ));
    }

    /// Add a text element
    pub fn add_text(&mut self, text: &str, position: Point, font_size: f64, classes: &[String]) {
        self.elements.push(format!(
            r#"{}<text class="{}" x="{}" y="{}" font-size="{}">{}</text>"#,
            self.indent_str(),
            classes.join(" "),
            position.x,
            position.y,
            font_size,
            escape_xml(text)
        ));
    }

    /// Add a group element with optional ID and classes
    pub fn start_group(&mut self, id: Option<&str>, classes: &[String]) {
        let id_attr = id.map(|i| format!(r#" id="{}""#, i)).unwrap_or_default();
        let class_attr = if classes.is_empty() {
            String::new()
        } else {
            format!(r#" class="{}""#, classes.join(" "))
        };

        self.elements
            .push(format!("{}<g{}{}>", self.indent_str(), id_attr, class_attr));
        self.indent += 1;
    }

    /// Close a group element
    pub fn end_group(&mut self) {
        self.indent = self.indent.saturating_sub(1);
        self.elements.push(format!("{}</g>", self.indent_str()));
    }

    /// Build the final SVG string
    pub fn build(self, viewbox: BoundingBox) -> String {
        let padding = self.config.viewbox_padding;
        let vb_x = viewbox.x - padding;
        let vb_y = viewbox.y - padding;
        let vb_w = viewbox.width + 2.0 * padding;
        let vb_h = viewbox.height + 2.0 * padding;

        let nl = self.newline();

        let mut svg = String::new();

        if self.config.standalone {
            svg.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="no"?>"#);
            svg.push_str(nl);
        }

        // Explicit size so converters pick up the physical dimensions
        svg.push_str(&format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}" viewBox="{} {} {} {}">"#,
            vb_w, vb_h, vb_x, vb_y, vb_w, vb_h
        ));
        svg.push_str(nl);

        if !self.styles.is_empty() {
            svg.push_str("  <style>");
            svg.push_str(nl);
            for style in &self.styles {
                svg.push_str("    ");
                svg.push_str(style);
                svg.push_str(nl);
            }
            svg.push_str("  </style>");
            svg.push_str(nl);
        }

        for elem in &self.elements {
            svg.push_str(elem);
            svg.push_str(nl);
        }

        svg.push_str("</svg>");

        svg
    }
}

/// Render laid-out cells and annunciators to an SVG string
pub fn render_svg(
    display: &DisplayCells,
    annunciators: &Annunciators,
    config: &SvgConfig,
    style: &LcdStyle,
) -> String {
    let mut builder = SvgBuilder::new(config.clone());
    builder.add_stylesheet(style);

    let panel = panel_bounds();
    let panel_class = builder.class("panel");
    builder.add_rect(panel, &[panel_class]);

    let on = builder.class("on");
    let off = builder.class("off");
    let segment_class = builder.class("segment");

    for (index, cell) in display.cells.iter().enumerate() {
        let origin = cell_origin(index);
        let cell_id = format!("cell-{}", index);
        let cell_class = builder.class("cell");
        builder.start_group(Some(&cell_id), &[cell_class]);

        for segment in Segment::ALL {
            let lit = cell.glyph.is_lit(segment);
            if !lit && !config.show_unlit {
                continue;
            }
            let state = if lit { on.clone() } else { off.clone() };
            builder.add_polygon(
                &segment_polygon(segment, origin),
                &[segment_class.clone(), format!("{}-{}", segment_class, segment.name()), state],
            );
        }

        if let Some(punct) = cell.punct {
            let (dots, tail) = punct_marks(punct, origin);
            let punct_class = builder.class("punct");
            for (center, r) in dots {
                builder.add_circle(center, r, &[punct_class.clone(), on.clone()]);
            }
            if let Some(tail) = tail {
                builder.add_polygon(&tail, &[punct_class, on.clone()]);
            }
        }

        builder.end_group();
    }

    if !annunciators.is_empty() {
        let row_class = builder.class("annunciators");
        builder.start_group(None, &[row_class]);
        let ann_class = builder.class("annunciator");
        for annunciator in annunciators.active() {
            builder.add_text(
                annunciator.label(),
                annunciator_position(annunciator.slot()),
                ANNUNCIATOR_FONT_SIZE,
                &[ann_class.clone()],
            );
        }
        builder.end_group();
    }

    builder.build(panel)
}

/// Escape special XML characters
fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lcd::annunciator::Annunciator;

    fn render(text: &str, anns: Annunciators, config: SvgConfig) -> String {
        let cells = DisplayCells::parse(text).unwrap();
        render_svg(&cells, &anns, &config, &LcdStyle::default())
    }

    #[test]
    fn test_escape_xml() {
        assert_eq!(escape_xml("a < b"), "a &lt; b");
        assert_eq!(escape_xml("a & b"), "a &amp; b");
    }

    #[test]
    fn test_blank_display_has_panel_and_cells() {
        let svg = render("", Annunciators::new(), SvgConfig::default());
        assert!(svg.starts_with("<?xml"));
        assert!(svg.ends_with("</svg>"));
        assert!(svg.contains("lcd-panel"));
        assert!(svg.contains(r#"id="cell-0""#));
        assert!(svg.contains(r#"id="cell-11""#));
        assert!(!svg.contains("<polygon"));
        assert!(!svg.contains("lcd-annunciators"));
    }

    #[test]
    fn test_lit_segments_only_by_default() {
        let svg = render("1", Annunciators::new(), SvgConfig::default());
        assert_eq!(svg.matches("<polygon").count(), 2);
        assert!(svg.contains("lcd-segment-b"));
        assert!(svg.contains("lcd-segment-c"));
        assert!(!svg.contains(r#"lcd-off""#));
    }

    #[test]
    fn test_unlit_segments_when_enabled() {
        let config = SvgConfig {
            show_unlit: true,
            ..SvgConfig::default()
        };
        let svg = render("1", Annunciators::new(), config);
        assert_eq!(svg.matches("<polygon").count(), 14 * 12);
        assert_eq!(svg.matches("lcd-on").count(), 2 + 1);
    }

    #[test]
    fn test_annunciator_row() {
        let anns = Annunciators::new().with(Annunciator::Prgm);
        let svg = render("01 LBL", anns, SvgConfig::default());
        assert!(svg.contains(">PRGM</text>"));
        assert!(!svg.contains(">ALPHA</text>"));
    }

    #[test]
    fn test_palette_values_are_escaped() {
        let style = LcdStyle {
            font_family: "Foo & <Bar>".to_string(),
            ..LcdStyle::default()
        };
        let cells = DisplayCells::parse("1").unwrap();
        let svg = render_svg(&cells, &Annunciators::new(), &SvgConfig::default(), &style);
        assert!(svg.contains("font-family: Foo &amp; &lt;Bar&gt;;"));
        assert!(!svg.contains("Foo & <Bar>"));
    }

    #[test]
    fn test_zero_padding_fits_panel() {
        let tight = render("", Annunciators::new(), SvgConfig {
            viewbox_padding: 0.0,
            ..SvgConfig::default()
        });
        let panel = panel_bounds();
        assert!(tight.contains(&format!(
            r#"viewBox="{} {} {} {}""#,
            panel.x, panel.y, panel.width, panel.height
        )));
    }

    #[test]
    fn test_punctuation_is_drawn() {
        let svg = render("1,2:", Annunciators::new(), SvgConfig::default());
        assert!(svg.contains("lcd-punct"));
        assert_eq!(svg.matches("<circle").count(), 3);
    }

    #[test]
    fn test_compact_output() {
        let config = SvgConfig {
            pretty_print: false,
            standalone: false,
            ..SvgConfig::default()
        };
        let svg = render("A", Annunciators::new(), config);
        assert!(svg.starts_with("<svg"));
        assert!(!svg.contains('\n'));
    }

    #[test]
    fn test_class_prefix_removed() {
        let config = SvgConfig {
            class_prefix: String::new(),
            ..SvgConfig::default()
        };
        let svg = render("A", Annunciators::new(), config);
        assert!(svg.contains(r#"class="panel""#));
        assert!(!svg.contains("lcd-"));
    }
}
