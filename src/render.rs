use crate::geometry::{Divider, Rect, SpotLayout, SpotStyle};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color(pub u8, pub u8, pub u8);

impl Color {
    pub fn hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}

pub const AVAILABLE_FILL: Color = Color(0x6b, 0xcb, 0x77);
pub const OCCUPIED_FILL: Color = Color(0x55, 0x55, 0x55);
pub const LABEL_FILL: Color = Color(0xff, 0x00, 0x00);
pub const DIVIDER_STROKE: Color = Color(0xbb, 0xbb, 0xbb);

pub fn fill_for(style: SpotStyle) -> Color {
    match style {
        SpotStyle::Available => AVAILABLE_FILL,
        SpotStyle::Occupied => OCCUPIED_FILL,
    }
}

/// The drawing surface owns its resources; the layout only asks it to draw.
pub trait Canvas {
    fn fill_rect(&mut self, rect: Rect, fill: Color);
    fn text(&mut self, x: f32, y: f32, font_size: f32, fill: Color, text: &str);
    fn dashed_line(&mut self, line: &Divider, stroke: Color);
}

/// Draws a full frame. Callers re-run this on every input change.
pub fn render_layout<C: Canvas>(layout: &SpotLayout, canvas: &mut C) {
    for spot in &layout.spots {
        canvas.fill_rect(spot.rect, fill_for(spot.style));
        canvas.text(
            spot.label.x,
            spot.label.y,
            spot.label.font_size,
            LABEL_FILL,
            &spot.label.text,
        );
    }
    for divider in &layout.dividers {
        canvas.dashed_line(divider, DIVIDER_STROKE);
    }
}

pub struct SvgCanvas {
    width: f32,
    height: f32,
    body: String,
}

impl SvgCanvas {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            body: String::new(),
        }
    }

    pub fn finish(self) -> String {
        let mut s = String::new();
        s.push_str(&format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w:.0}\" height=\"{h:.0}\" viewBox=\"0 0 {w:.2} {h:.2}\" font-family=\"roboto, sans-serif\">\n",
            w = self.width,
            h = self.height
        ));
        s.push_str(&self.body);
        s.push_str("</svg>\n");
        s
    }
}

impl Canvas for SvgCanvas {
    fn fill_rect(&mut self, rect: Rect, fill: Color) {
        self.body.push_str(&format!(
            "<rect x=\"{:.2}\" y=\"{:.2}\" width=\"{:.2}\" height=\"{:.2}\" fill=\"{}\"/>\n",
            rect.x,
            rect.y,
            rect.width,
            rect.height,
            fill.hex()
        ));
    }

    fn text(&mut self, x: f32, y: f32, font_size: f32, fill: Color, text: &str) {
        // SVG anchors text at the baseline.
        self.body.push_str(&format!(
            "<text x=\"{:.2}\" y=\"{:.2}\" font-size=\"{:.2}\" font-weight=\"bold\" fill=\"{}\">{}</text>\n",
            x,
            y + font_size,
            font_size,
            fill.hex(),
            svg_escape(text)
        ));
    }

    fn dashed_line(&mut self, line: &Divider, stroke: Color) {
        self.body.push_str(&format!(
            "<line x1=\"{:.2}\" y1=\"{:.2}\" x2=\"{:.2}\" y2=\"{:.2}\" stroke=\"{}\" stroke-width=\"2\" stroke-dasharray=\"5 5\"/>\n",
            line.x1,
            line.y1,
            line.x2,
            line.y2,
            stroke.hex()
        ));
    }
}

fn svg_escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

pub fn layout_to_svg(layout: &SpotLayout) -> String {
    let mut canvas = SvgCanvas::new(layout.container.width, layout.container.height);
    render_layout(layout, &mut canvas);
    canvas.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_markup_in_labels() {
        assert_eq!(svg_escape("A<1>&\"b\""), "A&lt;1&gt;&amp;&quot;b&quot;");
    }
}
