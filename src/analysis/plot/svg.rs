//! 极简 SVG 画布

use std::fmt::Write as _;
use std::path::Path;

use crate::error::{AppError, AppResult};

/// matplotlib tab10 配色
pub const PALETTE: [&str; 10] = [
    "#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd", "#8c564b", "#e377c2", "#7f7f7f",
    "#bcbd22", "#17becf",
];

pub fn palette(index: usize) -> &'static str {
    PALETTE[index % PALETTE.len()]
}

/// 文本对齐方式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    Start,
    Middle,
    End,
}

impl Anchor {
    fn as_str(self) -> &'static str {
        match self {
            Anchor::Start => "start",
            Anchor::Middle => "middle",
            Anchor::End => "end",
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct TextStyle {
    pub size: f64,
    pub anchor: Anchor,
    pub bold: bool,
    /// 以文本锚点为中心的旋转角度
    pub rotate: f64,
    pub fill: &'static str,
}

impl TextStyle {
    pub fn new(size: f64) -> Self {
        Self {
            size,
            anchor: Anchor::Middle,
            bold: false,
            rotate: 0.0,
            fill: "#000000",
        }
    }

    pub fn anchor(mut self, anchor: Anchor) -> Self {
        self.anchor = anchor;
        self
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn rotate(mut self, degrees: f64) -> Self {
        self.rotate = degrees;
        self
    }

    pub fn fill(mut self, fill: &'static str) -> Self {
        self.fill = fill;
        self
    }
}

/// SVG 文档
pub struct SvgDocument {
    width: f64,
    height: f64,
    body: String,
}

impl SvgDocument {
    pub fn new(width: f64, height: f64) -> Self {
        let mut doc = Self {
            width,
            height,
            body: String::new(),
        };
        doc.rect(0.0, 0.0, width, height, "#ffffff", 1.0);
        doc
    }

    pub fn rect(&mut self, x: f64, y: f64, w: f64, h: f64, fill: &str, opacity: f64) {
        let _ = writeln!(
            self.body,
            r#"<rect x="{:.1}" y="{:.1}" width="{:.1}" height="{:.1}" fill="{}" fill-opacity="{:.2}"/>"#,
            x, y, w.max(0.0), h.max(0.0), fill, opacity
        );
    }

    pub fn outline(&mut self, x: f64, y: f64, w: f64, h: f64, stroke: &str) {
        let _ = writeln!(
            self.body,
            r#"<rect x="{:.1}" y="{:.1}" width="{:.1}" height="{:.1}" fill="none" stroke="{}" stroke-width="1"/>"#,
            x, y, w, h, stroke
        );
    }

    pub fn line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, stroke: &str, width: f64, opacity: f64) {
        let _ = writeln!(
            self.body,
            r#"<line x1="{:.1}" y1="{:.1}" x2="{:.1}" y2="{:.1}" stroke="{}" stroke-width="{:.1}" stroke-opacity="{:.2}"/>"#,
            x1, y1, x2, y2, stroke, width, opacity
        );
    }

    pub fn circle(&mut self, cx: f64, cy: f64, r: f64, fill: &str, opacity: f64) {
        let _ = writeln!(
            self.body,
            r#"<circle cx="{:.1}" cy="{:.1}" r="{:.1}" fill="{}" fill-opacity="{:.2}"/>"#,
            cx, cy, r, fill, opacity
        );
    }

    /// 多行文本用 `\n` 分隔
    pub fn text(&mut self, x: f64, y: f64, content: &str, style: TextStyle) {
        let transform = if style.rotate != 0.0 {
            format!(r#" transform="rotate({:.1} {:.1} {:.1})""#, style.rotate, x, y)
        } else {
            String::new()
        };
        let weight = if style.bold { "bold" } else { "normal" };

        let _ = write!(
            self.body,
            r#"<text x="{:.1}" y="{:.1}" font-family="sans-serif" font-size="{:.1}" font-weight="{}" text-anchor="{}" fill="{}"{}>"#,
            x,
            y,
            style.size,
            weight,
            style.anchor.as_str(),
            style.fill,
            transform
        );
        for (i, line) in content.split('\n').enumerate() {
            let dy = if i == 0 { 0.0 } else { style.size * 1.2 };
            let _ = write!(
                self.body,
                r#"<tspan x="{:.1}" dy="{:.1}">{}</tspan>"#,
                x,
                dy,
                escape_xml(line)
            );
        }
        self.body.push_str("</text>\n");
    }

    pub fn finish(self) -> String {
        format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w:.0}\" height=\"{h:.0}\" viewBox=\"0 0 {w:.0} {h:.0}\">\n{body}</svg>\n",
            w = self.width,
            h = self.height,
            body = self.body
        )
    }
}

/// 写出 SVG 文件
pub fn save_svg(path: &Path, svg: &str) -> AppResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .map_err(|e| AppError::file_write_failed(parent.display().to_string(), e))?;
    }
    std::fs::write(path, svg).map_err(|e| AppError::file_write_failed(path.display().to_string(), e))
}

pub fn escape_xml(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

/// 近似 viridis 色图，`t` 取值 [0, 1]
pub fn viridis(t: f64) -> String {
    const STOPS: [(f64, [f64; 3]); 5] = [
        (0.00, [68.0, 1.0, 84.0]),
        (0.25, [59.0, 82.0, 139.0]),
        (0.50, [33.0, 145.0, 140.0]),
        (0.75, [94.0, 201.0, 98.0]),
        (1.00, [253.0, 231.0, 37.0]),
    ];

    let t = t.clamp(0.0, 1.0);
    let mut color = STOPS[STOPS.len() - 1].1;
    for pair in STOPS.windows(2) {
        let (t0, c0) = pair[0];
        let (t1, c1) = pair[1];
        if t <= t1 {
            let f = (t - t0) / (t1 - t0);
            color = [
                c0[0] + (c1[0] - c0[0]) * f,
                c0[1] + (c1[1] - c0[1]) * f,
                c0[2] + (c1[2] - c0[2]) * f,
            ];
            break;
        }
    }

    format!(
        "#{:02x}{:02x}{:02x}",
        color[0].round() as u8,
        color[1].round() as u8,
        color[2].round() as u8
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_xml() {
        assert_eq!(escape_xml("Prisoner's <N=20> & co"), "Prisoner&apos;s &lt;N=20&gt; &amp; co");
    }

    #[test]
    fn test_viridis_endpoints() {
        assert_eq!(viridis(0.0), "#440154");
        assert_eq!(viridis(1.0), "#fde725");
        assert_eq!(viridis(2.0), "#fde725");
    }

    #[test]
    fn test_document_renders_multiline_text() {
        let mut doc = SvgDocument::new(100.0, 50.0);
        doc.text(10.0, 10.0, "line one\nline two", TextStyle::new(12.0).bold());
        let svg = doc.finish();
        assert!(svg.starts_with("<svg"));
        assert!(svg.contains("<tspan x=\"10.0\" dy=\"0.0\">line one</tspan>"));
        assert!(svg.contains("line two"));
        assert!(svg.contains("font-weight=\"bold\""));
        assert!(svg.trim_end().ends_with("</svg>"));
    }
}
