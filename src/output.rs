//! Output formats and the persist/display contract.
//!
//! Every renderer takes a [`Presentation`] and either hands the result back
//! untouched, writes it to a caller-given path, or writes it to a scratch file
//! for an external viewer. The format is always implied by the extension.

use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::config::Config;
use crate::error::{Result, SeisvizError};
use crate::logging::generate_operation_id;

/// File formats a canvas or figure can be persisted to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Interactive Leaflet page (maps only)
    Html,
    /// Scene dump of the canvas or figure
    Json,
    /// Vector image
    Svg,
    /// Raster image
    Png,
}

impl OutputFormat {
    /// Map a bare extension (no dot, any case) to a format
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "html" | "htm" => Some(OutputFormat::Html),
            "json" => Some(OutputFormat::Json),
            "svg" => Some(OutputFormat::Svg),
            "png" => Some(OutputFormat::Png),
            _ => None,
        }
    }

    /// Resolve the format of an output path from its extension
    pub fn from_path(path: &Path) -> Result<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_extension)
            .ok_or_else(|| SeisvizError::UnsupportedFormat {
                path: path.display().to_string(),
            })
    }

    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Html => "html",
            OutputFormat::Json => "json",
            OutputFormat::Svg => "svg",
            OutputFormat::Png => "png",
        }
    }

    /// Whether figures (as opposed to maps) can be written in this format
    pub fn is_figure_format(&self) -> bool {
        matches!(
            self,
            OutputFormat::Svg | OutputFormat::Png | OutputFormat::Json
        )
    }

    /// Cargo feature this format needs, if any
    pub fn required_feature(&self) -> Option<&'static str> {
        match self {
            OutputFormat::Svg | OutputFormat::Png => Some("figures"),
            OutputFormat::Html | OutputFormat::Json => None,
        }
    }

    /// Whether this build can write the format
    pub fn is_available(&self) -> bool {
        match self.required_feature() {
            Some("figures") => cfg!(feature = "figures"),
            _ => true,
        }
    }

    /// Fail with [`SeisvizError::MissingCapability`] if the format is unavailable
    pub fn ensure_available(&self) -> Result<()> {
        if self.is_available() {
            return Ok(());
        }
        Err(SeisvizError::MissingCapability {
            format: self.extension().to_string(),
            feature: self.required_feature().unwrap_or_default().to_string(),
        })
    }
}

/// What to do with a freshly rendered canvas or figure
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Presentation {
    /// Only return it to the caller
    Return,
    /// Persist it to this path
    Save(PathBuf),
    /// Write it to a scratch file and log the location for a viewer
    #[default]
    Display,
}

impl Presentation {
    /// Shorthand for `Save(path)`
    pub fn save(path: impl Into<PathBuf>) -> Self {
        Presentation::Save(path.into())
    }

    /// Build from the `outfile`/`show` pair: a path wins over `show`
    pub fn from_flags(outfile: Option<PathBuf>, show: bool) -> Self {
        match (outfile, show) {
            (Some(path), _) => Presentation::Save(path),
            (None, true) => Presentation::Display,
            (None, false) => Presentation::Return,
        }
    }
}

/// Fresh scratch path in the OS temp directory for displaying output
pub fn display_path(format: OutputFormat) -> PathBuf {
    std::env::temp_dir().join(format!(
        "seisviz-{}.{}",
        generate_operation_id(),
        format.extension()
    ))
}

/// Log where displayable output was written
pub(crate) fn announce_display(path: &Path) {
    info!(path = %path.display(), "Output ready for display");
}

/// Verify every format the configuration relies on is compiled in.
///
/// Run once at start-up (see [`crate::init`]) so a missing feature shows up as
/// a configuration error before any plot is attempted.
pub fn check_capabilities(config: &Config) -> Result<()> {
    let format = OutputFormat::from_extension(&config.figure.default_extension).ok_or_else(|| {
        SeisvizError::Config {
            message: format!(
                "Unknown default extension: {}",
                config.figure.default_extension
            ),
        }
    })?;

    format.ensure_available().map_err(|e| SeisvizError::Config {
        message: e.to_string(),
    })?;

    debug!(
        default_extension = format.extension(),
        figures = cfg!(feature = "figures"),
        "Output capabilities verified"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_path() {
        assert_eq!(
            OutputFormat::from_path(Path::new("map.html")).unwrap(),
            OutputFormat::Html
        );
        assert_eq!(
            OutputFormat::from_path(Path::new("out/FIG.PNG")).unwrap(),
            OutputFormat::Png
        );
        assert_eq!(
            OutputFormat::from_path(Path::new("a.htm")).unwrap(),
            OutputFormat::Html
        );
        assert!(OutputFormat::from_path(Path::new("figure.pdf")).is_err());
        assert!(OutputFormat::from_path(Path::new("no_extension")).is_err());
    }

    #[test]
    fn test_figure_formats() {
        assert!(OutputFormat::Svg.is_figure_format());
        assert!(OutputFormat::Png.is_figure_format());
        assert!(!OutputFormat::Html.is_figure_format());
    }

    #[test]
    fn test_html_always_available() {
        assert!(OutputFormat::Html.is_available());
        assert!(OutputFormat::Json.ensure_available().is_ok());
    }

    #[test]
    fn test_presentation_from_flags() {
        assert_eq!(
            Presentation::from_flags(Some(PathBuf::from("a.svg")), true),
            Presentation::save("a.svg")
        );
        assert_eq!(Presentation::from_flags(None, true), Presentation::Display);
        assert_eq!(Presentation::from_flags(None, false), Presentation::Return);
    }

    #[test]
    fn test_display_path_is_unique() {
        let a = display_path(OutputFormat::Svg);
        let b = display_path(OutputFormat::Svg);
        assert_ne!(a, b);
        assert_eq!(a.extension().unwrap(), "svg");
    }

    #[test]
    fn test_check_capabilities_default() {
        let config = Config::default();
        assert_eq!(check_capabilities(&config).is_ok(), cfg!(feature = "figures"));
    }
}
