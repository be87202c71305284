//! Drawing surfaces for the renderer.

use crate::font::ResolvedFont;
use crate::layout::Rect;
use crate::raster::FlatImage;
use printpdf::*;

/// Stroke for cell borders (cut lines)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrokeStyle {
    /// 0.0 = black, 1.0 = white
    pub gray: f32,
    pub width: f32,
}

/// One line of text with its baseline origin, in points
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextRun<'a> {
    pub text: &'a str,
    pub x: f32,
    pub y: f32,
    pub size: f32,
}

/// Page-oriented drawing target.
///
/// Calls between `begin_page` and `end_page` draw onto that page.
pub trait Canvas {
    fn begin_page(&mut self);
    fn draw_rect(&mut self, rect: Rect, style: &StrokeStyle);
    fn draw_text(&mut self, run: &TextRun<'_>);
    fn draw_image(&mut self, image: &FlatImage, rect: Rect);
    fn end_page(&mut self);
}

// =============================================================================
// Recording
// =============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Rect {
        rect: Rect,
        style: StrokeStyle,
    },
    Text {
        text: String,
        x: f32,
        y: f32,
        size: f32,
    },
    /// Pixel buffers are not retained, only their size
    Image {
        pixel_width: u32,
        pixel_height: u32,
        rect: Rect,
    },
}

/// Canvas that keeps the draw calls per page, for inspection.
#[derive(Debug, Clone, Default)]
pub struct RecordingCanvas {
    pages: Vec<Vec<DrawOp>>,
    open: bool,
}

impl RecordingCanvas {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pages(&self) -> &[Vec<DrawOp>] {
        &self.pages
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn ops(&self) -> impl Iterator<Item = &DrawOp> {
        self.pages.iter().flatten()
    }

    /// Texts drawn on a page, in draw order.
    pub fn texts_on(&self, page: usize) -> Vec<&str> {
        self.pages
            .get(page)
            .into_iter()
            .flatten()
            .filter_map(|op| match op {
                DrawOp::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn is_page_open(&self) -> bool {
        self.open
    }

    fn push(&mut self, op: DrawOp) {
        debug_assert!(self.open, "draw call outside a page");
        if let Some(page) = self.pages.last_mut() {
            page.push(op);
        }
    }
}

impl Canvas for RecordingCanvas {
    fn begin_page(&mut self) {
        self.pages.push(Vec::new());
        self.open = true;
    }

    fn draw_rect(&mut self, rect: Rect, style: &StrokeStyle) {
        self.push(DrawOp::Rect {
            rect,
            style: *style,
        });
    }

    fn draw_text(&mut self, run: &TextRun<'_>) {
        self.push(DrawOp::Text {
            text: run.text.to_string(),
            x: run.x,
            y: run.y,
            size: run.size,
        });
    }

    fn draw_image(&mut self, image: &FlatImage, rect: Rect) {
        self.push(DrawOp::Image {
            pixel_width: image.width,
            pixel_height: image.height,
            rect,
        });
    }

    fn end_page(&mut self) {
        self.open = false;
    }
}

// =============================================================================
// PDF
// =============================================================================

enum PdfFont {
    Embedded(FontId),
    Builtin(BuiltinFont),
}

/// Canvas writing printpdf operations.
pub struct PdfCanvas {
    doc: PdfDocument,
    font: PdfFont,
    page_width_pt: f32,
    page_height_pt: f32,
    pages: Vec<PdfPage>,
    current: Vec<Op>,
}

impl PdfCanvas {
    pub fn new(title: &str, page_width_pt: f32, page_height_pt: f32, font: &ResolvedFont) -> Self {
        let mut doc = PdfDocument::new(title);
        let font = match font {
            ResolvedFont::Embedded { font, .. } => PdfFont::Embedded(doc.add_font(font)),
            ResolvedFont::Builtin(builtin) => PdfFont::Builtin(*builtin),
        };

        Self {
            doc,
            font,
            page_width_pt,
            page_height_pt,
            pages: Vec::new(),
            current: Vec::new(),
        }
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Serialize with the pages drawn so far.
    pub fn finish(mut self) -> Vec<u8> {
        self.doc.pages = std::mem::take(&mut self.pages);
        let mut warnings = Vec::new();
        let bytes = self.doc.save(&PdfSaveOptions::default(), &mut warnings);
        if !warnings.is_empty() {
            log::debug!("PDF serialization produced {} warning(s)", warnings.len());
        }
        bytes
    }
}

fn pt_point(x: f32, y: f32) -> Point {
    Point { x: Pt(x), y: Pt(y) }
}

impl Canvas for PdfCanvas {
    fn begin_page(&mut self) {
        self.current = Vec::new();
    }

    fn draw_rect(&mut self, rect: Rect, style: &StrokeStyle) {
        let corners = [
            (rect.x, rect.y),
            (rect.right(), rect.y),
            (rect.right(), rect.top()),
            (rect.x, rect.top()),
        ];
        let line = Line {
            points: corners
                .iter()
                .map(|&(x, y)| LinePoint {
                    p: pt_point(x, y),
                    bezier: false,
                })
                .collect(),
            is_closed: true,
        };

        self.current.push(Op::SaveGraphicsState);
        self.current.push(Op::SetOutlineColor {
            col: Color::Rgb(Rgb {
                r: style.gray,
                g: style.gray,
                b: style.gray,
                icc_profile: None,
            }),
        });
        self.current.push(Op::SetOutlineThickness { pt: Pt(style.width) });
        self.current.push(Op::DrawLine { line });
        self.current.push(Op::RestoreGraphicsState);
    }

    fn draw_text(&mut self, run: &TextRun<'_>) {
        self.current.push(Op::StartTextSection);
        self.current.push(Op::SetFillColor {
            col: Color::Rgb(Rgb {
                r: 0.0,
                g: 0.0,
                b: 0.0,
                icc_profile: None,
            }),
        });
        self.current.push(Op::SetTextCursor {
            pos: pt_point(run.x, run.y),
        });
        let items = vec![TextItem::Text(run.text.to_string())];
        match &self.font {
            PdfFont::Embedded(font_id) => {
                self.current.push(Op::SetFontSize {
                    size: Pt(run.size),
                    font: font_id.clone(),
                });
                self.current.push(Op::WriteText {
                    items,
                    font: font_id.clone(),
                });
            }
            PdfFont::Builtin(font) => {
                self.current.push(Op::SetFontSizeBuiltinFont {
                    size: Pt(run.size),
                    font: *font,
                });
                self.current.push(Op::WriteTextBuiltinFont { items, font: *font });
            }
        }
        self.current.push(Op::EndTextSection);
    }

    fn draw_image(&mut self, image: &FlatImage, rect: Rect) {
        if image.width == 0 || image.height == 0 {
            return;
        }
        let raw = RawImage {
            pixels: RawImageData::U8(image.pixels.clone()),
            width: image.width as usize,
            height: image.height as usize,
            data_format: RawImageFormat::RGB8,
            tag: Vec::new(),
        };
        let id = self.doc.add_image(&raw);

        // At 72 dpi one pixel is one point; scale from there to the target.
        self.current.push(Op::UseXobject {
            id,
            transform: XObjectTransform {
                translate_x: Some(Pt(rect.x)),
                translate_y: Some(Pt(rect.y)),
                rotate: None,
                scale_x: Some(rect.width / image.width as f32),
                scale_y: Some(rect.height / image.height as f32),
                dpi: Some(72.0),
            },
        });
    }

    fn end_page(&mut self) {
        let ops = std::mem::take(&mut self.current);
        self.pages.push(PdfPage::new(
            Mm::from(Pt(self.page_width_pt)),
            Mm::from(Pt(self.page_height_pt)),
            ops,
        ));
    }
}
