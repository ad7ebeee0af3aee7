use std::f64::consts::{PI, TAU};
use std::fmt::Write as _;

use crate::error::{ChartError, ChartResult};
use crate::render::{ArcPrimitive, RenderFrame, RenderGroup, Renderer, TextHAlign};

/// Serializes frames into standalone SVG documents.
#[derive(Debug, Default)]
pub struct SvgRenderer {
    document: String,
}

impl SvgRenderer {
    /// SVG produced by the last successful `render` call.
    #[must_use]
    pub fn document(&self) -> &str {
        &self.document
    }

    #[must_use]
    pub fn into_document(self) -> String {
        self.document
    }
}

impl Renderer for SvgRenderer {
    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()> {
        frame.validate()?;
        let mut out = String::new();
        write_frame(&mut out, frame).map_err(|_| {
            ChartError::InvalidData("failed to serialize frame as svg".to_owned())
        })?;
        self.document = out;
        Ok(())
    }
}

fn write_frame(out: &mut String, frame: &RenderFrame) -> std::fmt::Result {
    writeln!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
        w = frame.viewport.width,
        h = frame.viewport.height
    )?;
    for (index, group) in frame.groups.iter().enumerate() {
        write_group(out, index, group)?;
    }
    out.push_str("</svg>\n");
    Ok(())
}

fn write_group(out: &mut String, index: usize, group: &RenderGroup) -> std::fmt::Result {
    let class = format!("{:?}", group.kind).to_lowercase();
    if let Some(clip) = group.clip {
        writeln!(
            out,
            r#"<clipPath id="clip-{index}"><rect x="{}" y="{}" width="{}" height="{}"/></clipPath>"#,
            clip.left,
            clip.top,
            clip.width().max(0.0),
            clip.height().max(0.0)
        )?;
        writeln!(
            out,
            r#"<g class="sc-{class}" clip-path="url(#clip-{index})"><g transform="translate({},{})">"#,
            group.translate.0, group.translate.1
        )?;
    } else {
        writeln!(
            out,
            r#"<g class="sc-{class}" transform="translate({},{})">"#,
            group.translate.0, group.translate.1
        )?;
    }

    for rect in &group.rects {
        writeln!(
            out,
            r#"<rect x="{}" y="{}" width="{}" height="{}" fill="{}" fill-opacity="{}"/>"#,
            rect.x,
            rect.y,
            rect.width,
            rect.height,
            rect.fill.to_hex(),
            rect.fill.alpha
        )?;
    }
    for arc in &group.arcs {
        writeln!(
            out,
            r#"<path d="{}" fill="{}" fill-opacity="{}"/>"#,
            arc_path(*arc),
            arc.fill.to_hex(),
            arc.fill.alpha
        )?;
    }
    for line in &group.lines {
        writeln!(
            out,
            r#"<line x1="{}" y1="{}" x2="{}" y2="{}" stroke="{}" stroke-opacity="{}" stroke-width="{}"/>"#,
            line.x1,
            line.y1,
            line.x2,
            line.y2,
            line.color.to_hex(),
            line.color.alpha,
            line.stroke_width
        )?;
    }
    for text in &group.texts {
        let anchor = match text.h_align {
            TextHAlign::Left => "start",
            TextHAlign::Center => "middle",
            TextHAlign::Right => "end",
        };
        write!(
            out,
            r#"<text x="{x}" y="{y}" font-size="{}" fill="{}" opacity="{}" text-anchor="{anchor}" dominant-baseline="hanging""#,
            text.font_size_px,
            text.color.to_hex(),
            text.opacity,
            x = text.x,
            y = text.y,
        )?;
        if text.rotation_deg != 0.0 {
            write!(
                out,
                r#" transform="rotate({} {} {})""#,
                text.rotation_deg, text.x, text.y
            )?;
        }
        writeln!(out, ">{}</text>", escape_xml(&text.text))?;
    }

    if group.clip.is_some() {
        out.push_str("</g></g>\n");
    } else {
        out.push_str("</g>\n");
    }
    Ok(())
}

fn polar(cx: f64, cy: f64, radius: f64, angle: f64) -> (f64, f64) {
    (cx + radius * angle.sin(), cy - radius * angle.cos())
}

fn arc_path(arc: ArcPrimitive) -> String {
    let sweep = (arc.end_angle - arc.start_angle).clamp(0.0, TAU);
    // A single SVG arc command cannot describe a full circle.
    let end = if sweep >= TAU - 1e-9 {
        arc.start_angle + TAU - 1e-6
    } else {
        arc.end_angle
    };
    let large = if sweep > PI { 1 } else { 0 };
    let (ox0, oy0) = polar(arc.cx, arc.cy, arc.outer_radius, arc.start_angle);
    let (ox1, oy1) = polar(arc.cx, arc.cy, arc.outer_radius, end);
    let mut path = format!(
        "M{ox0},{oy0}A{r},{r} 0 {large} 1 {ox1},{oy1}",
        r = arc.outer_radius
    );
    if arc.inner_radius > 0.0 {
        let (ix1, iy1) = polar(arc.cx, arc.cy, arc.inner_radius, end);
        let (ix0, iy0) = polar(arc.cx, arc.cy, arc.inner_radius, arc.start_angle);
        path.push_str(&format!(
            "L{ix1},{iy1}A{r},{r} 0 {large} 0 {ix0},{iy0}Z",
            r = arc.inner_radius
        ));
    } else {
        path.push_str(&format!("L{},{}Z", arc.cx, arc.cy));
    }
    path
}

fn escape_xml(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}
