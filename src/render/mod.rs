//! Drawing of figures and maps with `plotters`.
//!
//! SVG is rendered straight into a string. PNG is rendered into an RGB
//! buffer and encoded with `image`.

mod figure;
mod map;

pub use figure::draw_figure;
pub use map::draw_map;

use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::FontTransform;
use std::path::Path;
use tracing::debug;

use crate::colors::parse_color;
use crate::error::{Result, SeisvizError};
use crate::figure::{Figure, Rotation};
use crate::logging::log_timed_operation;
use crate::maps::MapCanvas;
use crate::output::OutputFormat;

pub(crate) fn render_error<E: std::fmt::Display>(e: E) -> SeisvizError {
    SeisvizError::Render {
        message: e.to_string(),
    }
}

/// Opaque RGB for a CSS colour string
pub(crate) fn rgb(color: &str) -> Result<RGBColor> {
    let [r, g, b, _] = parse_color(color)?;
    Ok(RGBColor(r, g, b))
}

/// Counter-clockwise quarter turns to plotters' clockwise transforms
pub(crate) fn font_transform(rotation: Rotation) -> FontTransform {
    match rotation {
        Rotation::None => FontTransform::None,
        Rotation::Deg90 => FontTransform::Rotate270,
        Rotation::Deg180 => FontTransform::Rotate180,
        Rotation::Deg270 => FontTransform::Rotate90,
    }
}

fn render_svg<F>(size: (u32, u32), draw: F) -> Result<String>
where
    F: FnOnce(&DrawingArea<SVGBackend<'_>, Shift>) -> Result<()>,
{
    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, size).into_drawing_area();
        draw(&root)?;
        root.present().map_err(render_error)?;
    }
    Ok(svg)
}

fn render_png<F>(path: &Path, size: (u32, u32), draw: F) -> Result<()>
where
    F: FnOnce(&DrawingArea<BitMapBackend<'_>, Shift>) -> Result<()>,
{
    let (width, height) = size;
    let mut buffer = vec![0u8; width as usize * height as usize * 3];
    {
        let root = BitMapBackend::with_buffer(&mut buffer, size).into_drawing_area();
        draw(&root)?;
        root.present().map_err(render_error)?;
    }

    let img = image::RgbImage::from_raw(width, height, buffer).ok_or_else(|| {
        SeisvizError::ImageEncoding {
            message: format!("buffer does not match a {}x{} image", width, height),
        }
    })?;
    img.save_with_format(path, image::ImageFormat::Png)
        .map_err(|e| SeisvizError::ImageEncoding {
            message: format!("Failed to encode PNG: {}", e),
        })?;
    Ok(())
}

fn write_rendered<F, G>(path: &Path, format: OutputFormat, size: (u32, u32), svg: F, png: G) -> Result<()>
where
    F: FnOnce(&DrawingArea<SVGBackend<'_>, Shift>) -> Result<()>,
    G: FnOnce(&DrawingArea<BitMapBackend<'_>, Shift>) -> Result<()>,
{
    if size.0 == 0 || size.1 == 0 {
        return Err(SeisvizError::invalid_parameter(
            "size",
            format!("cannot render a {}x{} image", size.0, size.1),
        ));
    }

    debug!(path = %path.display(), format = format.extension(), "Rendering");
    let operation = format!("render_{}", format.extension());
    log_timed_operation(&operation, || -> Result<()> {
        match format {
            OutputFormat::Svg => {
                std::fs::write(path, render_svg(size, svg)?)?;
                Ok(())
            }
            OutputFormat::Png => render_png(path, size, png),
            _ => Err(SeisvizError::UnsupportedFormat {
                path: path.display().to_string(),
            }),
        }
    })
}

pub(crate) fn figure_to_svg(figure: &Figure) -> Result<String> {
    render_svg((figure.width, figure.height), |root| draw_figure(figure, root))
}

pub(crate) fn save_figure(figure: &Figure, path: &Path, format: OutputFormat) -> Result<()> {
    write_rendered(
        path,
        format,
        (figure.width, figure.height),
        |root| draw_figure(figure, root),
        |root| draw_figure(figure, root),
    )
}

pub(crate) fn save_map(canvas: &MapCanvas, path: &Path, format: OutputFormat) -> Result<()> {
    write_rendered(
        path,
        format,
        (canvas.width, canvas.height),
        |root| draw_map(canvas, root),
        |root| draw_map(canvas, root),
    )
}
