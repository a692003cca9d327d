//! Flow layout: turns a list of content blocks into positioned draw operations,
//! breaking onto a new page whenever the bottom margin is reached.
//!
//! Coordinates are PDF points with the origin at the bottom-left of a US-Letter page.

use crate::report::metrics::{wrap_text, Font};

pub const PAGE_WIDTH: f32 = 612.0;
pub const PAGE_HEIGHT: f32 = 792.0;
pub const MARGIN: f32 = 72.0;
pub const TEXT_WIDTH: f32 = PAGE_WIDTH - 2.0 * MARGIN;

const LEADING: f32 = 1.25;
const BULLET_INDENT: f32 = 12.0;
const BULLET_TEXT_INDENT: f32 = 24.0;
const CELL_PADDING: f32 = 6.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgb(pub f32, pub f32, pub f32);

impl Rgb {
    pub const BLACK: Rgb = Rgb(0.0, 0.0, 0.0);
    pub const DARK_BLUE: Rgb = Rgb(0.0, 0.0, 0.545);
    pub const DARK_GREEN: Rgb = Rgb(0.0, 0.392, 0.0);
    pub const GREY: Rgb = Rgb(0.502, 0.502, 0.502);
    pub const WHITE_SMOKE: Rgb = Rgb(0.961, 0.961, 0.961);
    pub const BEIGE: Rgb = Rgb(0.961, 0.961, 0.863);
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Align {
    Left,
    Center,
}

/// One unit of report content, laid out top to bottom.
#[derive(Debug, Clone)]
pub enum Block {
    Heading {
        text: String,
        size: f32,
        color: Rgb,
        align: Align,
    },
    Paragraph {
        text: String,
        font: Font,
        size: f32,
    },
    /// Bold label followed by a regular-weight value on the same line.
    Field { label: String, value: String },
    Bullet(String),
    Spacer(f32),
    Table(Table),
}

#[derive(Debug, Clone)]
pub struct Table {
    pub column_widths: Vec<f32>,
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Text {
        x: f32,
        y: f32,
        font: Font,
        size: f32,
        color: Rgb,
        text: String,
    },
    FillRect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        color: Rgb,
    },
    StrokeRect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
    },
}

#[derive(Debug, Clone, Default)]
pub struct Page {
    pub ops: Vec<DrawOp>,
}

/// Lays out `blocks` onto as many pages as needed. Always returns at least one page.
pub fn paginate(blocks: &[Block]) -> Vec<Page> {
    let mut engine = LayoutEngine::new();
    for block in blocks {
        engine.push(block);
    }
    engine.pages
}

struct LayoutEngine {
    pages: Vec<Page>,
    /// Top of the next free line on the current page.
    y: f32,
}

impl LayoutEngine {
    fn new() -> Self {
        Self {
            pages: vec![Page::default()],
            y: PAGE_HEIGHT - MARGIN,
        }
    }

    fn page(&mut self) -> &mut Page {
        let last = self.pages.len() - 1;
        &mut self.pages[last]
    }

    fn page_is_empty(&self) -> bool {
        self.pages.last().map_or(true, |p| p.ops.is_empty())
    }

    fn new_page(&mut self) {
        self.pages.push(Page::default());
        self.y = PAGE_HEIGHT - MARGIN;
    }

    /// Starts a new page unless `height` still fits above the bottom margin.
    /// An empty page always accepts content, so oversized items cannot loop forever.
    fn reserve(&mut self, height: f32) {
        if self.y - height < MARGIN && !self.page_is_empty() {
            self.new_page();
        }
    }

    fn push(&mut self, block: &Block) {
        match block {
            Block::Heading {
                text,
                size,
                color,
                align,
            } => self.heading(text, *size, *color, *align),
            Block::Paragraph { text, font, size } => {
                self.lines(text, *font, *size, MARGIN, TEXT_WIDTH)
            }
            Block::Field { label, value } => self.field(label, value),
            Block::Bullet(text) => self.bullet(text),
            Block::Spacer(height) => {
                if !self.page_is_empty() {
                    self.y -= height;
                }
            }
            Block::Table(table) => self.table(table),
        }
    }

    fn text(&mut self, x: f32, top: f32, font: Font, size: f32, color: Rgb, text: String) {
        self.page().ops.push(DrawOp::Text {
            x,
            y: top - size,
            font,
            size,
            color,
            text,
        });
    }

    fn heading(&mut self, text: &str, size: f32, color: Rgb, align: Align) {
        let line_height = size * LEADING;
        for line in wrap_text(text, Font::Bold, size, TEXT_WIDTH, TEXT_WIDTH) {
            self.reserve(line_height);
            let x = match align {
                Align::Left => MARGIN,
                Align::Center => {
                    let width = Font::Bold.metrics().measure_pt(&line, size);
                    MARGIN + ((TEXT_WIDTH - width) / 2.0).max(0.0)
                }
            };
            let top = self.y;
            self.text(x, top, Font::Bold, size, color, line);
            self.y -= line_height;
        }
        // Space below headings.
        self.y -= size * 0.5;
    }

    fn lines(&mut self, text: &str, font: Font, size: f32, x: f32, width: f32) {
        let line_height = size * LEADING;
        for line in wrap_text(text, font, size, width, width) {
            self.reserve(line_height);
            let top = self.y;
            self.text(x, top, font, size, Rgb::BLACK, line);
            self.y -= line_height;
        }
    }

    fn field(&mut self, label: &str, value: &str) {
        const SIZE: f32 = 10.0;
        let line_height = SIZE * LEADING;
        let label = format!("{label} ");
        let label_width = Font::Bold.metrics().measure_pt(&label, SIZE);

        self.reserve(line_height);
        let top = self.y;
        self.text(MARGIN, top, Font::Bold, SIZE, Rgb::BLACK, label);

        let value_lines = wrap_text(
            value,
            Font::Regular,
            SIZE,
            TEXT_WIDTH - label_width,
            TEXT_WIDTH,
        );
        if value_lines.is_empty() {
            self.y -= line_height;
            return;
        }
        for (i, line) in value_lines.into_iter().enumerate() {
            if i > 0 {
                self.reserve(line_height);
            }
            let x = if i == 0 { MARGIN + label_width } else { MARGIN };
            let top = self.y;
            self.text(x, top, Font::Regular, SIZE, Rgb::BLACK, line);
            self.y -= line_height;
        }
    }

    fn bullet(&mut self, text: &str) {
        const SIZE: f32 = 10.0;
        let line_height = SIZE * LEADING;
        let width = TEXT_WIDTH - BULLET_TEXT_INDENT;
        for (i, line) in wrap_text(text, Font::Regular, SIZE, width, width)
            .into_iter()
            .enumerate()
        {
            self.reserve(line_height);
            let top = self.y;
            if i == 0 {
                self.text(
                    MARGIN + BULLET_INDENT,
                    top,
                    Font::Regular,
                    SIZE,
                    Rgb::BLACK,
                    "\u{2022}".to_string(),
                );
            }
            self.text(
                MARGIN + BULLET_TEXT_INDENT,
                top,
                Font::Regular,
                SIZE,
                Rgb::BLACK,
                line,
            );
            self.y -= line_height;
        }
    }

    fn table(&mut self, table: &Table) {
        let total_width: f32 = table.column_widths.iter().sum();
        let left = MARGIN + ((TEXT_WIDTH - total_width) / 2.0).max(0.0);

        let header = RowStyle {
            font: Font::Bold,
            size: 12.0,
            background: Rgb::GREY,
            color: Rgb::WHITE_SMOKE,
        };
        let body = RowStyle {
            font: Font::Regular,
            size: 10.0,
            background: Rgb::BEIGE,
            color: Rgb::BLACK,
        };

        let header_height = row_height(&table.header, &table.column_widths, &header);
        self.reserve(header_height);
        self.table_row(left, &table.header, &table.column_widths, &header);

        for row in &table.rows {
            let height = row_height(row, &table.column_widths, &body);
            if self.y - height < MARGIN {
                // Rows never split; the header is repeated on the continuation page.
                self.new_page();
                self.table_row(left, &table.header, &table.column_widths, &header);
            }
            self.table_row(left, row, &table.column_widths, &body);
        }
    }

    fn table_row(&mut self, left: f32, cells: &[String], widths: &[f32], style: &RowStyle) {
        let height = row_height(cells, widths, style);
        let line_height = style.size * LEADING;
        let top = self.y;
        let mut x = left;

        for (cell, &width) in cells.iter().zip(widths) {
            self.page().ops.push(DrawOp::FillRect {
                x,
                y: top - height,
                width,
                height,
                color: style.background,
            });

            let inner = width - 2.0 * CELL_PADDING;
            let metrics = style.font.metrics();
            for (i, line) in wrap_text(cell, style.font, style.size, inner, inner)
                .into_iter()
                .enumerate()
            {
                let line_width = metrics.measure_pt(&line, style.size);
                let line_x = x + CELL_PADDING + ((inner - line_width) / 2.0).max(0.0);
                let line_top = top - CELL_PADDING - i as f32 * line_height;
                self.text(line_x, line_top, style.font, style.size, style.color, line);
            }

            self.page().ops.push(DrawOp::StrokeRect {
                x,
                y: top - height,
                width,
                height,
            });
            x += width;
        }

        self.y -= height;
    }
}

struct RowStyle {
    font: Font,
    size: f32,
    background: Rgb,
    color: Rgb,
}

fn row_height(cells: &[String], widths: &[f32], style: &RowStyle) -> f32 {
    let max_lines = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| {
            let inner = width - 2.0 * CELL_PADDING;
            wrap_text(cell, style.font, style.size, inner, inner).len().max(1)
        })
        .max()
        .unwrap_or(1);
    max_lines as f32 * style.size * LEADING + 2.0 * CELL_PADDING
}
