//! Document rendering
//!
//! Walks the deck page by page for each side and issues draw calls to a
//! [`Canvas`]. Geometry comes from the layout module; nothing here touches
//! the filesystem.

use crate::canvas::{Canvas, StrokeStyle, TextRun};
use crate::images::ImageStore;
use crate::layout::{
    GridMapper, ImageRegion, Placement, Rect, Side, TextBox, TextMeasure, TextStyle, fit_image,
    fit_text,
};
use crate::options::{CardLayoutOptions, mm_to_pt};
use crate::types::{Card, ImageRef, Result};

/// Vertical gap between the two placeholder lines
const PLACEHOLDER_LINE_GAP_MM: f32 = 5.0;

/// Pages emitted per side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RenderSummary {
    pub front_pages: usize,
    pub back_pages: usize,
}

pub struct DeckRenderer<'a, F: TextMeasure> {
    cards: &'a [Card],
    options: &'a CardLayoutOptions,
    font: &'a F,
    images: &'a ImageStore,
    mapper: GridMapper,
    stroke: StrokeStyle,
}

impl<'a, F: TextMeasure> DeckRenderer<'a, F> {
    /// Fails with `InvalidLayout` before anything is drawn if the grid is unusable.
    pub fn new(
        cards: &'a [Card],
        options: &'a CardLayoutOptions,
        font: &'a F,
        images: &'a ImageStore,
    ) -> Result<Self> {
        let grid = options.grid_spec()?;
        let mapper = GridMapper::new(grid, options.duplex_policy, cards.len());

        Ok(Self {
            cards,
            options,
            font,
            images,
            mapper,
            stroke: StrokeStyle {
                gray: options.cut_line_gray,
                width: options.cut_line_width_pt,
            },
        })
    }

    pub fn mapper(&self) -> &GridMapper {
        &self.mapper
    }

    /// Draw the question side into `front` and the answer side into `back`.
    pub fn render(&self, front: &mut impl Canvas, back: &mut impl Canvas) -> RenderSummary {
        RenderSummary {
            front_pages: self.render_side(Side::Front, front),
            back_pages: self.render_side(Side::Back, back),
        }
    }

    /// Draw one side, returning the number of pages emitted.
    pub fn render_side(&self, side: Side, canvas: &mut impl Canvas) -> usize {
        let page_count = self.mapper.page_count();
        for page in 0..page_count {
            self.render_page(side, page, canvas);
        }
        page_count
    }

    /// Draw both sides into one canvas: front page k, then back page k.
    ///
    /// Only lines up under `MirroredColumns`, where back page k sits behind
    /// front page k. Returns the number of pages emitted.
    pub fn render_interleaved(&self, canvas: &mut impl Canvas) -> usize {
        let page_count = self.mapper.page_count();
        for page in 0..page_count {
            self.render_page(Side::Front, page, canvas);
            self.render_page(Side::Back, page, canvas);
        }
        2 * page_count
    }

    /// Draw page `page` of the given side's document.
    fn render_page(&self, side: Side, page: usize, canvas: &mut impl Canvas) {
        let source_page = match side {
            Side::Front => page,
            Side::Back => self.mapper.front_page_for_back(page),
        };

        canvas.begin_page();
        for index in self.mapper.cards_on_page(source_page) {
            let placement = self.mapper.place(index, side);
            debug_assert_eq!(placement.page, page);

            let card = &self.cards[index];
            match side {
                Side::Front => self.draw_front(card, &placement, canvas),
                Side::Back => self.draw_back(card, &placement, canvas),
            }
        }
        canvas.end_page();
        log::debug!(
            "{side:?} page {} of {} done",
            page + 1,
            self.mapper.page_count()
        );
    }

    fn draw_front(&self, card: &Card, placement: &Placement, canvas: &mut impl Canvas) {
        let cell = placement.cell();
        canvas.draw_rect(cell, &self.stroke);

        let question = card.question_text();
        let text_area = match &card.image {
            Some(image) => {
                // Question takes the bottom strip, the image the rest
                let margin = mm_to_pt(self.options.image_margin_mm);
                let (region, question_height) = if question.is_some() {
                    let question_height = cell.height * self.options.question_area_ratio;
                    (ImageRegion::upper_part(cell, question_height, margin), question_height)
                } else {
                    (ImageRegion::without_question(cell, margin), 0.0)
                };
                self.draw_image(image, cell, &region, canvas);
                Rect::new(cell.x, cell.y, cell.width, question_height)
            }
            None => cell,
        };

        if let Some(question) = question {
            self.draw_text_block(question, text_area, &self.options.question_style(), canvas);
        }
    }

    fn draw_back(&self, card: &Card, placement: &Placement, canvas: &mut impl Canvas) {
        let cell = placement.cell();
        canvas.draw_rect(cell, &self.stroke);

        if let Some(answer) = card.answer_text() {
            self.draw_text_block(answer, cell, &self.options.answer_style(), canvas);
        }
    }

    fn draw_text_block(&self, text: &str, area: Rect, style: &TextStyle, canvas: &mut impl Canvas) {
        let margin = mm_to_pt(self.options.text_margin_mm);
        let bounds = TextBox::inset(area, margin, margin);
        let block = fit_text(text, self.font, &bounds, style);

        for (line, x, y) in block.positioned_lines(bounds.center_x) {
            if line.is_empty() {
                continue;
            }
            canvas.draw_text(&TextRun {
                text: line,
                x,
                y,
                size: block.font_size,
            });
        }
    }

    fn draw_image(&self, image: &ImageRef, cell: Rect, region: &ImageRegion, canvas: &mut impl Canvas) {
        let drawn = self.images.decode(image).and_then(|flat| {
            let fit = fit_image(flat.width, flat.height, region)?;
            canvas.draw_image(&flat, fit.rect_in(cell));
            Ok(())
        });

        if let Err(e) = drawn {
            log::warn!("{e}; drawing placeholder");
            self.draw_placeholder(image, cell, region, canvas);
        }
    }

    fn draw_placeholder(&self, image: &ImageRef, cell: Rect, region: &ImageRegion, canvas: &mut impl Canvas) {
        let size = self.options.placeholder_font_size_pt;
        let (center_x, center_y) = region.center_in(cell);
        let lines = [
            format!("Image unavailable: {}", image.filename),
            image.placeholder_detail(),
        ];

        for (i, line) in lines.iter().enumerate() {
            let width = self.font.text_width(line, size);
            canvas.draw_text(&TextRun {
                text: line,
                x: center_x - width / 2.0,
                y: center_y - i as f32 * mm_to_pt(PLACEHOLDER_LINE_GAP_MM),
                size,
            });
        }
    }
}
