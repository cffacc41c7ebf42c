//! SVG export of laid-out frames
//!
//! Turns a [`RenderNode`] tree with computed bounds into a standalone SVG
//! document. Gradients are emitted as `<linearGradient>` definitions in
//! bounding-box units, outline trims become dash patterns over a unit
//! `pathLength`, and rotation/scale are applied around each node's center
//! to the node and everything inside it.

use std::fmt::Write;

use motif_core::{Brush, Color, Size};

use crate::element::ElementKind;
use crate::layout::LayoutError;
use crate::render_state::RenderNode;

/// Glyph drawn for a named symbol
pub fn icon_glyph(name: &str) -> &'static str {
    match name {
        "bolt.car.fill" => "\u{1F697}",
        "mic.fill" => "\u{1F399}",
        _ => "\u{25A1}",
    }
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

fn rgb(color: &Color) -> String {
    format!(
        "rgb({},{},{})",
        (color.r.clamp(0.0, 1.0) * 255.0).round() as u8,
        (color.g.clamp(0.0, 1.0) * 255.0).round() as u8,
        (color.b.clamp(0.0, 1.0) * 255.0).round() as u8
    )
}

/// `fill="..."` style paint attributes for a color
fn paint(attr: &str, color: &Color) -> String {
    if color.a >= 1.0 {
        format!(r#"{attr}="{}""#, rgb(color))
    } else {
        format!(r#"{attr}="{}" {attr}-opacity="{:.3}""#, rgb(color), color.a.max(0.0))
    }
}

struct SvgWriter {
    defs: String,
    body: String,
    gradients: usize,
}

impl SvgWriter {
    fn new() -> Self {
        Self {
            defs: String::new(),
            body: String::new(),
            gradients: 0,
        }
    }

    /// Paint attributes for a brush, defining a gradient when needed
    fn brush(&mut self, brush: &Brush) -> Result<String, LayoutError> {
        match brush {
            Brush::Solid(color) => Ok(paint("fill", color)),
            Brush::Linear(gradient) => {
                let id = format!("g{}", self.gradients);
                self.gradients += 1;
                writeln!(
                    self.defs,
                    r#"    <linearGradient id="{id}" x1="{}" y1="{}" x2="{}" y2="{}">"#,
                    gradient.start.x, gradient.start.y, gradient.end.x, gradient.end.y
                )?;
                for stop in &gradient.stops {
                    writeln!(
                        self.defs,
                        r#"      <stop offset="{:.3}" stop-color="{}" stop-opacity="{:.3}"/>"#,
                        stop.offset,
                        rgb(&stop.color),
                        stop.color.a
                    )?;
                }
                writeln!(self.defs, "    </linearGradient>")?;
                Ok(format!(r#"fill="url(#{id})""#))
            }
        }
    }

    fn node(&mut self, node: &RenderNode, depth: usize) -> Result<(), LayoutError> {
        if node.opacity <= 0.0 {
            return Ok(());
        }

        let indent = "  ".repeat(depth + 1);
        let c = node.bounds.center();
        let mut transform = String::new();
        if node.rotation != 0.0 {
            write!(transform, "rotate({:.3} {:.3} {:.3}) ", node.rotation, c.x, c.y)?;
        }
        if node.scale != 1.0 {
            write!(
                transform,
                "translate({:.3} {:.3}) scale({:.4}) translate({:.3} {:.3})",
                c.x, c.y, node.scale, -c.x, -c.y
            )?;
        }
        let grouped = !transform.is_empty() || node.opacity < 1.0;
        if grouped {
            write!(self.body, r#"{indent}<g data-path="{}""#, escape(&node.path))?;
            if !transform.is_empty() {
                write!(self.body, r#" transform="{}""#, transform.trim_end())?;
            }
            if node.opacity < 1.0 {
                write!(self.body, r#" opacity="{:.3}""#, node.opacity)?;
            }
            writeln!(self.body, ">")?;
        }

        self.paint_node(node, &indent)?;
        for child in &node.children {
            self.node(child, depth + usize::from(grouped))?;
        }

        if grouped {
            writeln!(self.body, "{indent}</g>")?;
        }
        Ok(())
    }

    fn paint_node(&mut self, node: &RenderNode, indent: &str) -> Result<(), LayoutError> {
        let b = node.bounds;
        match &node.kind {
            ElementKind::Circle => {
                let r = b.size.width.min(b.size.height) / 2.0;
                let c = b.center();
                let shape = format!(r#"<circle cx="{:.3}" cy="{:.3}" r="{:.3}""#, c.x, c.y, r);
                self.shape(node, &shape, indent)
            }
            ElementKind::RoundedRect => {
                let radius = node
                    .corner_radius
                    .clamp(0.0, b.size.width.min(b.size.height) / 2.0);
                let shape = format!(
                    r#"<rect x="{:.3}" y="{:.3}" width="{:.3}" height="{:.3}" rx="{:.3}""#,
                    b.origin.x, b.origin.y, b.size.width, b.size.height, radius
                );
                self.shape(node, &shape, indent)
            }
            ElementKind::Text(content) if !content.is_empty() => {
                self.label(node, &escape(content), indent)
            }
            ElementKind::Icon(name) => self.label(node, icon_glyph(name), indent),
            _ => Ok(()),
        }
    }

    fn shape(&mut self, node: &RenderNode, open: &str, indent: &str) -> Result<(), LayoutError> {
        if let Some(stroke) = node.stroke {
            let visible = node.trim_end - node.trim_start;
            if visible <= 0.0 {
                return Ok(());
            }
            write!(
                self.body,
                r#"{indent}{open} fill="none" {} stroke-width="{:.3}""#,
                paint("stroke", &stroke.color),
                stroke.width
            )?;
            if visible < 1.0 {
                write!(
                    self.body,
                    r#" pathLength="1" stroke-dasharray="{visible:.4} 1" stroke-dashoffset="{:.4}""#,
                    -node.trim_start
                )?;
            }
            writeln!(self.body, "/>")?;
        } else if let Some(fill) = &node.fill {
            let attrs = self.brush(fill)?;
            writeln!(self.body, "{indent}{open} {attrs}/>")?;
        }
        Ok(())
    }

    fn label(&mut self, node: &RenderNode, content: &str, indent: &str) -> Result<(), LayoutError> {
        let c = node.bounds.center();
        let color = node.foreground.unwrap_or(Color::BLACK);
        writeln!(
            self.body,
            r#"{indent}<text x="{:.3}" y="{:.3}" font-size="{:.1}" text-anchor="middle" dominant-baseline="central" {}>{content}</text>"#,
            c.x,
            c.y,
            node.font_size,
            paint("fill", &color)
        )?;
        Ok(())
    }
}

/// Render a laid-out tree as an SVG document of the given size
pub fn render_svg(root: &RenderNode, size: Size) -> Result<String, LayoutError> {
    let mut writer = SvgWriter::new();
    writer.node(root, 0)?;

    let mut out = String::new();
    writeln!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
        w = size.width.ceil(),
        h = size.height.ceil()
    )?;
    if !writer.defs.is_empty() {
        writeln!(out, "  <defs>\n{}  </defs>", writer.defs)?;
    }
    writeln!(out, r#"  <rect width="100%" height="100%" fill="white"/>"#)?;
    out.push_str(&writer.body);
    out.push_str("</svg>\n");
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::{circle, icon, text, zstack, Element};
    use crate::layout::compute_layout;
    use crate::render_state::RenderState;

    fn export(tree: &Element) -> String {
        let mut state = RenderState::new();
        state.update(tree);
        let mut root = state.resolve(tree);
        let size = compute_layout(&mut root, 200.0).unwrap();
        render_svg(&root, size).unwrap()
    }

    #[test]
    fn test_trimmed_stroke_uses_dash_pattern() {
        let svg = export(
            &zstack().child(
                circle()
                    .trim(0.0, 0.2)
                    .stroke(Color::PURPLE, 7.0)
                    .frame(100.0, 100.0)
                    .rotation(-90.0),
            ),
        );
        assert!(svg.contains(r#"pathLength="1""#));
        assert!(svg.contains(r#"stroke-dasharray="0.2000 1""#));
        assert!(svg.contains("rotate(-90.000"));
        assert!(svg.contains(r#"fill="none""#));
    }

    #[test]
    fn test_gradient_fill_is_defined() {
        let svg = export(&zstack().child(circle().fill(Color::GREEN.gradient()).frame(10.0, 10.0)));
        assert!(svg.contains(r#"<linearGradient id="g0""#));
        assert!(svg.contains(r#"fill="url(#g0)""#));
    }

    #[test]
    fn test_text_and_icons() {
        let svg = export(
            &zstack()
                .child(text("a<b").foreground(Color::GRAY))
                .child(icon("mic.fill").foreground(Color::WHITE)),
        );
        assert!(svg.contains("a&lt;b"));
        assert!(svg.contains(icon_glyph("mic.fill")));
    }

    #[test]
    fn test_invisible_nodes_skipped() {
        let svg = export(&zstack().child(text("hidden").opacity(0.0)).child(circle().frame(5.0, 5.0)));
        assert!(!svg.contains("hidden"));
        let empty = export(&zstack().child(circle().trim(0.0, 0.0).stroke(Color::BLUE, 1.0).frame(5.0, 5.0)));
        assert!(!empty.contains("<circle"));
    }
}
