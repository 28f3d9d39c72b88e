// ============================================================
// CHART RENDERING
// ============================================================
// Bar and pie PNGs drawn per request, returned as base64 strings

pub mod bar;
pub mod pie;

use std::io::Cursor;

use base64::prelude::*;
use image::{ImageFormat, RgbImage};
use plotters::style::RGBColor;

use crate::domain::error::{AppError, Result};
use crate::domain::inventory::{ChartImages, StockCategory, StockReport};
use crate::infrastructure::config::ChartConfig;

pub use bar::BarChart;
pub use pie::PieChart;

pub struct ChartRenderer {
    config: ChartConfig,
}

impl Default for ChartRenderer {
    fn default() -> Self {
        Self::new(ChartConfig::default())
    }
}

impl ChartRenderer {
    pub fn new(config: ChartConfig) -> Self {
        Self { config }
    }

    pub fn render(&self, report: &StockReport) -> Result<ChartImages> {
        let bar = BarChart {
            labels: &report.bar_labels,
            values: &report.bar_values,
            colors: &report.bar_colors,
        }
        .render(self.config.bar_width, self.config.bar_height)?;

        let pie = PieChart {
            categories: &report.pie_colors,
            counts: &report.pie_values,
        }
        .render(self.config.pie_size)?;

        Ok(ChartImages {
            bar: BASE64_STANDARD.encode(bar),
            pie: BASE64_STANDARD.encode(pie),
        })
    }
}

const FONT: &str = "sans-serif";

fn category_color(category: &StockCategory) -> RGBColor {
    let [r, g, b] = category.rgb();
    RGBColor(r, g, b)
}

/// RGB buffer sized for a `width` x `height` bitmap backend
fn pixel_buffer(width: u32, height: u32) -> Vec<u8> {
    vec![0; width as usize * height as usize * 3]
}

fn encode_png(pixels: Vec<u8>, width: u32, height: u32) -> Result<Vec<u8>> {
    let image = RgbImage::from_raw(width, height, pixels).ok_or_else(|| {
        AppError::RenderError(format!("Pixel buffer does not fit {}x{}", width, height))
    })?;

    let mut png = Cursor::new(Vec::new());
    image.write_to(&mut png, ImageFormat::Png)?;
    Ok(png.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::inventory::{CategoryCounts, StockCategory};

    fn decode(encoded: &str) -> image::DynamicImage {
        let bytes = BASE64_STANDARD.decode(encoded).unwrap();
        image::load_from_memory_with_format(&bytes, image::ImageFormat::Png).unwrap()
    }

    fn report() -> StockReport {
        StockReport {
            overstocked: Vec::new(),
            understocked: Vec::new(),
            critical: Vec::new(),
            bar_labels: vec!["Widget".into(), "Gadget".into()],
            bar_values: vec![Some(5.0), Some(25.0)],
            bar_colors: vec![StockCategory::Understocked, StockCategory::Overstocked],
            pie_labels: vec!["Understocked".into(), "Overstocked".into()],
            pie_values: vec![1, 1],
            pie_colors: vec![StockCategory::Understocked, StockCategory::Overstocked],
            color_counts: CategoryCounts(vec![
                (StockCategory::Understocked, 1),
                (StockCategory::Overstocked, 1),
            ]),
            charts: ChartImages::default(),
        }
    }

    #[test]
    fn test_images_decode_to_configured_sizes() {
        let renderer = ChartRenderer::new(ChartConfig {
            bar_width: 640,
            bar_height: 320,
            pie_size: 300,
        });

        let charts = renderer.render(&report()).unwrap();

        let bar = decode(&charts.bar);
        assert_eq!((bar.width(), bar.height()), (640, 320));

        let pie = decode(&charts.pie);
        assert!(pie.width() > 300);
        assert_eq!(pie.height(), 300);
    }

    #[test]
    fn test_short_pixel_buffer_is_render_error() {
        let err = encode_png(vec![0; 10], 4, 4).unwrap_err();
        assert!(matches!(err, AppError::RenderError(_)));
    }

    #[test]
    fn test_empty_report_still_renders() {
        let mut empty = report();
        empty.bar_labels.clear();
        empty.bar_values.clear();
        empty.bar_colors.clear();
        empty.pie_labels.clear();
        empty.pie_values.clear();
        empty.pie_colors.clear();

        let charts = ChartRenderer::default().render(&empty).unwrap();

        assert!(decode(&charts.bar).width() > 0);
        assert!(decode(&charts.pie).width() > 0);
    }
}
