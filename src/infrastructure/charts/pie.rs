use plotters::coord::Shift;
use plotters::element::Pie;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};

use super::{category_color, encode_png, pixel_buffer, FONT};
use crate::domain::error::Result;
use crate::domain::inventory::StockCategory;

const LEGEND_TITLE: &str = "Stock Status";
const LEGEND_WIDTH: u32 = 240;
const LEGEND_LINE: i32 = 28;
const START_ANGLE: f64 = 140.0;

/// One wedge per category, sized by its share of the total count
pub struct PieChart<'a> {
    pub categories: &'a [StockCategory],
    pub counts: &'a [usize],
}

impl PieChart<'_> {
    /// `size` is the side of the square holding the pie; the legend is placed
    /// to its right
    pub fn render(&self, size: u32) -> Result<Vec<u8>> {
        let (width, height) = (size + LEGEND_WIDTH, size);
        let mut pixels = pixel_buffer(width, height);
        {
            let root = BitMapBackend::with_buffer(&mut pixels, (width, height)).into_drawing_area();
            root.fill(&WHITE)?;

            let (pie_area, legend_area) = root.split_horizontally(size as i32);
            self.draw_pie(&pie_area, size)?;
            self.draw_legend(&legend_area)?;
            root.present()?;
        }

        tracing::debug!(wedges = self.categories.len(), size, "Rendered pie chart");
        encode_png(pixels, width, height)
    }

    fn draw_pie(&self, area: &DrawingArea<BitMapBackend<'_>, Shift>, size: u32) -> Result<()> {
        let center = (size as i32 / 2, size as i32 / 2);
        let total: usize = self.counts.iter().sum();

        if total == 0 {
            let style = TextStyle::from((FONT, 20.0).into_font())
                .pos(Pos::new(HPos::Center, VPos::Center));
            area.draw(&Text::new("No data", center, style))?;
            return Ok(());
        }

        let radius = size as f64 * 0.32;
        let sizes: Vec<f64> = self.counts.iter().map(|&count| count as f64).collect();
        let colors: Vec<RGBColor> = self.categories.iter().map(category_color).collect();
        let labels: Vec<&str> = self.categories.iter().map(StockCategory::label).collect();

        let mut pie = Pie::new(&center, &radius, &sizes, &colors, &labels);
        pie.start_angle(START_ANGLE);
        pie.label_style((FONT, 14.0).into_font().color(&BLACK));
        pie.percentages((FONT, 13.0).into_font().color(&BLACK));
        area.draw(&pie)?;

        Ok(())
    }

    fn draw_legend(&self, area: &DrawingArea<BitMapBackend<'_>, Shift>) -> Result<()> {
        let (_, height) = area.dim_in_pixel();
        let rows = self.categories.len() as i32 + 1;
        let top = (height as i32 - rows * LEGEND_LINE) / 2;
        let x = 10;

        area.draw(&Text::new(LEGEND_TITLE, (x, top), (FONT, 18.0).into_font()))?;

        for (i, category) in self.categories.iter().enumerate() {
            let y = top + (i as i32 + 1) * LEGEND_LINE;
            area.draw(&Rectangle::new(
                [(x, y), (x + 24, y + 16)],
                category_color(category).filled(),
            ))?;
            area.draw(&Text::new(category.label(), (x + 32, y), (FONT, 16.0).into_font()))?;
        }

        Ok(())
    }
}
