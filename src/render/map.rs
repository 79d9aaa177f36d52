//! Static map drawing: a lon/lat graticule with the canvas markers on top.
//! No tiles are fetched.

use plotters::coord::Shift;
use plotters::prelude::*;

use super::{render_error, rgb};
use crate::error::Result;
use crate::figure::TickFormat;
use crate::maps::{MapCanvas, MarkerShape};

pub fn draw_map<DB: DrawingBackend>(canvas: &MapCanvas, root: &DrawingArea<DB, Shift>) -> Result<()> {
    root.fill(&WHITE).map_err(render_error)?;

    let (min_lon, min_lat, max_lon, max_lat) = canvas.extent();
    let mut chart = ChartBuilder::on(root)
        .margin(10)
        .x_label_area_size(30)
        .y_label_area_size(45)
        .build_cartesian_2d(min_lon..max_lon, min_lat..max_lat)
        .map_err(render_error)?;

    let degrees = |v: &f64| format!("{}°", TickFormat::Number.format(*v));
    chart
        .configure_mesh()
        .x_desc("Longitude")
        .y_desc("Latitude")
        .x_label_formatter(&degrees)
        .y_label_formatter(&degrees)
        .light_line_style(RGBColor(235, 235, 235))
        .draw()
        .map_err(render_error)?;

    let mut skipped = 0usize;
    for marker in canvas.markers() {
        let x = canvas.unwrap_longitude(marker.longitude);
        let y = marker.latitude;
        if !(min_lon..=max_lon).contains(&x) || !(min_lat..=max_lat).contains(&y) {
            skipped += 1;
            continue;
        }

        let color = rgb(&marker.color)?;
        let size = marker.radius.round().max(1.0) as i32;
        match marker.shape {
            MarkerShape::Triangle => chart
                .draw_series(std::iter::once(TriangleMarker::new(
                    (x, y),
                    size,
                    color.filled(),
                )))
                .map_err(render_error)?,
            MarkerShape::Circle => chart
                .draw_series(std::iter::once(Circle::new((x, y), size, color.filled())))
                .map_err(render_error)?,
        };
    }

    if skipped > 0 {
        tracing::debug!(skipped, "Markers outside the visible extent");
    }
    Ok(())
}
