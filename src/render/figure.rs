//! Figure drawing.

use plotters::coord::ranged1d::{Ranged, ValueFormatter};
use plotters::coord::Shift;
use plotters::prelude::IntoLogRange;
use plotters::prelude::*;

use super::{font_transform, render_error, rgb};
use crate::error::Result;
use crate::figure::{AxisScale, Figure, Panel, Rotation};

const FONT: &str = "sans-serif";

/// Draw every panel of `figure` stacked top to bottom on `root`
pub fn draw_figure<DB: DrawingBackend>(figure: &Figure, root: &DrawingArea<DB, Shift>) -> Result<()> {
    root.fill(&WHITE).map_err(render_error)?;

    let area = match &figure.title {
        Some(title) => root.titled(title, (FONT, 22)).map_err(render_error)?,
        None => root.clone(),
    };

    if figure.panels.is_empty() {
        return Ok(());
    }

    let areas = area.split_evenly((figure.panels.len(), 1));
    for (panel, panel_area) in figure.panels.iter().zip(areas.iter()) {
        draw_panel(panel, panel_area)?;
    }
    Ok(())
}

fn draw_panel<DB: DrawingBackend>(panel: &Panel, area: &DrawingArea<DB, Shift>) -> Result<()> {
    let (x_min, x_max, y_min, y_max) = panel.bounds();

    let mut builder = ChartBuilder::on(area);
    builder
        .margin(12)
        .x_label_area_size(if panel.x_axis.tick_rotation == Rotation::None {
            40
        } else {
            70
        })
        .y_label_area_size(70);
    if let Some(title) = &panel.title {
        builder.caption(title, (FONT, 16));
    }

    match (panel.x_axis.scale, panel.y_axis.scale) {
        (AxisScale::Linear, AxisScale::Linear) => {
            let mut chart = builder
                .build_cartesian_2d(x_min..x_max, y_min..y_max)
                .map_err(render_error)?;
            draw_contents(&mut chart, panel)
        }
        (AxisScale::Log, AxisScale::Linear) => {
            let mut chart = builder
                .build_cartesian_2d((x_min..x_max).log_scale(), y_min..y_max)
                .map_err(render_error)?;
            draw_contents(&mut chart, panel)
        }
        (AxisScale::Linear, AxisScale::Log) => {
            let mut chart = builder
                .build_cartesian_2d(x_min..x_max, (y_min..y_max).log_scale())
                .map_err(render_error)?;
            draw_contents(&mut chart, panel)
        }
        (AxisScale::Log, AxisScale::Log) => {
            let mut chart = builder
                .build_cartesian_2d((x_min..x_max).log_scale(), (y_min..y_max).log_scale())
                .map_err(render_error)?;
            draw_contents(&mut chart, panel)
        }
    }
}

fn draw_contents<'a, DB, X, Y>(
    chart: &mut ChartContext<'a, DB, Cartesian2d<X, Y>>,
    panel: &Panel,
) -> Result<()>
where
    DB: DrawingBackend + 'a,
    X: Ranged<ValueType = f64> + ValueFormatter<f64>,
    Y: Ranged<ValueType = f64> + ValueFormatter<f64>,
{
    let x_ticks = panel.x_axis.ticks;
    let y_ticks = panel.y_axis.ticks;
    let x_formatter = move |v: &f64| x_ticks.format(*v);
    let y_formatter = move |v: &f64| y_ticks.format(*v);

    chart
        .configure_mesh()
        .x_desc(panel.x_axis.label.as_str())
        .y_desc(panel.y_axis.label.as_str())
        .x_labels(8)
        .y_labels(6)
        .x_max_light_lines(0)
        .y_max_light_lines(0)
        .axis_style(BLACK.stroke_width(1))
        .x_label_formatter(&x_formatter)
        .y_label_formatter(&y_formatter)
        .x_label_style(
            (FONT, 12)
                .into_font()
                .transform(font_transform(panel.x_axis.tick_rotation)),
        )
        .y_label_style((FONT, 12))
        .draw()
        .map_err(render_error)?;

    for series in &panel.series {
        let color = rgb(&series.color)?;
        let points: Vec<(f64, f64)> = panel.drawable_points(series).collect();
        let drawn = chart
            .draw_series(LineSeries::new(points, color.stroke_width(1)))
            .map_err(render_error)?;
        if let Some(label) = &series.label {
            drawn
                .label(label.as_str())
                .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 16, y)], color));
        }
    }

    for annotation in &panel.annotations {
        let style = TextStyle::from((FONT, 12).into_font())
            .color(&BLACK)
            .transform(font_transform(annotation.rotation));
        chart
            .draw_series(std::iter::once(Text::new(
                annotation.text.clone(),
                (annotation.x, annotation.y),
                style,
            )))
            .map_err(render_error)?;
    }

    if panel.series.iter().any(|s| s.label.is_some()) {
        chart
            .configure_series_labels()
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()
            .map_err(render_error)?;
    }

    Ok(())
}
