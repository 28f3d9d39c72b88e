use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};

use super::{category_color, encode_png, pixel_buffer, FONT};
use crate::domain::error::Result;
use crate::domain::inventory::StockCategory;

const TITLE: &str = "Inventory Status";
const X_LABEL: &str = "Products";
const Y_LABEL: &str = "Quantity";
const MAX_LABEL_CHARS: usize = 18;
const LABEL_FONT_SIZE: f64 = 12.0;
/// Bars and axis bounds are clamped to this magnitude
const AXIS_LIMIT: f64 = 1e15;
const AXIS_PADDING: f64 = 0.05;

/// One bar per item, in input order; missing heights leave an empty slot
pub struct BarChart<'a> {
    pub labels: &'a [String],
    pub values: &'a [Option<f64>],
    pub colors: &'a [StockCategory],
}

impl BarChart<'_> {
    pub fn render(&self, width: u32, height: u32) -> Result<Vec<u8>> {
        let mut pixels = pixel_buffer(width, height);
        {
            let root = BitMapBackend::with_buffer(&mut pixels, (width, height)).into_drawing_area();
            self.draw(&root)?;
            root.present()?;
        }

        tracing::debug!(bars = self.values.len(), width, height, "Rendered bar chart");
        encode_png(pixels, width, height)
    }

    fn draw(&self, root: &DrawingArea<BitMapBackend<'_>, Shift>) -> Result<()> {
        root.fill(&WHITE)?;
        let (width, height) = root.dim_in_pixel();

        let labels: Vec<String> = self.labels.iter().map(|l| shorten(l)).collect();
        let (lo, hi) = value_range(self.values.iter().flatten().copied());
        let slots = self.values.len().max(1);

        // Labels are turned a quarter so their length sets the label area height
        let widest = labels.iter().map(|l| l.chars().count()).max().unwrap_or(0);
        let label_area = ((widest as f64 * LABEL_FONT_SIZE * 0.6) as u32 + 36).min(height / 3);

        let mut chart = ChartBuilder::on(root)
            .caption(TITLE, (FONT, 24))
            .margin(15)
            .x_label_area_size(label_area)
            .y_label_area_size(80)
            .build_cartesian_2d((0..slots as i32).into_segmented(), lo..hi)?;

        let x_label = |value: &SegmentValue<i32>| match value {
            SegmentValue::CenterOf(i) => labels.get(*i as usize).cloned().unwrap_or_default(),
            _ => String::new(),
        };

        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_labels(slots)
            .x_label_formatter(&x_label)
            .x_label_style(
                (FONT, LABEL_FONT_SIZE)
                    .into_font()
                    .transform(FontTransform::Rotate90),
            )
            .y_label_formatter(&|v: &f64| format_quantity(*v))
            .x_desc(X_LABEL)
            .y_desc(Y_LABEL)
            .draw()?;

        chart.draw_series(self.values.iter().zip(self.colors).enumerate().filter_map(
            |(i, (value, category))| {
                let value = value.filter(|v| v.is_finite())?.clamp(lo, hi);
                let i = i as i32;
                let mut bar = Rectangle::new(
                    [(SegmentValue::Exact(i), 0.0), (SegmentValue::Exact(i + 1), value)],
                    category_color(category).filled(),
                );
                bar.set_margin(0, 0, 3, 3);
                Some(bar)
            },
        ))?;

        if self.values.is_empty() {
            let style = TextStyle::from((FONT, 20.0).into_font())
                .pos(Pos::new(HPos::Center, VPos::Center));
            root.draw(&Text::new("No data", (width as i32 / 2, height as i32 / 2), style))?;
        }

        Ok(())
    }
}

fn shorten(label: &str) -> String {
    if label.chars().count() <= MAX_LABEL_CHARS {
        label.to_string()
    } else {
        let head: String = label.chars().take(MAX_LABEL_CHARS - 2).collect();
        format!("{}..", head)
    }
}

/// Y range holding zero and every finite value, padded a little past the
/// extremes and bounded by `AXIS_LIMIT`
fn value_range(values: impl Iterator<Item = f64>) -> (f64, f64) {
    let (min, max) = values
        .filter(|v| v.is_finite())
        .map(|v| v.clamp(-AXIS_LIMIT, AXIS_LIMIT))
        .fold((0.0_f64, 0.0_f64), |(lo, hi), v| (lo.min(v), hi.max(v)));

    if max <= min {
        return (0.0, 1.0);
    }

    let pad = (max - min) * AXIS_PADDING;
    let lo = if min < 0.0 { min - pad } else { 0.0 };
    (lo, max + pad)
}

/// Tick text: whole numbers plain, fractions to two places, huge values in
/// exponent form
fn format_quantity(value: f64) -> String {
    if value.abs() >= 1e6 {
        format!("{:.1e}", value)
    } else if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        let text = format!("{:.2}", value);
        text.trim_end_matches('0').trim_end_matches('.').to_string()
    }
}
