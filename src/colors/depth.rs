//! Depth banding for event markers.
//!
//! Seven colours sampled from the RdYlGn gradient, reddest first. Deeper
//! sources get redder markers; shallow or unknown depths get the greenest.

use once_cell::sync::Lazy;

/// Band thresholds in metres, deepest first.
///
/// Threshold `i` is bound to palette colour `i`, the deepest to the reddest.
/// 5000 m is the third threshold and so takes the third colour (index 2),
/// not the fourth: six thresholds and the "below all" band share seven
/// colours, so no other binding keeps the deepest band reddest.
pub const DEPTH_THRESHOLDS: [f64; 6] = [20000.0, 10000.0, 5000.0, 1000.0, 500.0, 100.0];

static DEPTH_PALETTE: Lazy<Vec<String>> = Lazy::new(|| {
    colorgrad::rd_yl_gn()
        .colors(DEPTH_THRESHOLDS.len() + 1)
        .iter()
        .map(|c| c.to_hex_string())
        .collect()
});

/// The seven band colours as `#rrggbb`, red to green
pub fn depth_palette() -> &'static [String] {
    DEPTH_PALETTE.as_slice()
}

/// Palette index for a depth: 0 for the deepest band, 6 for shallow,
/// missing, zero, negative or NaN depths
pub fn depth_band(depth: Option<f64>) -> usize {
    let depth = match depth {
        Some(d) if d > 0.0 => d,
        _ => return DEPTH_THRESHOLDS.len(),
    };

    DEPTH_THRESHOLDS
        .iter()
        .position(|&threshold| depth >= threshold)
        .unwrap_or(DEPTH_THRESHOLDS.len())
}

/// Marker colour for a depth in metres
pub fn depth_color(depth: Option<f64>) -> &'static str {
    DEPTH_PALETTE[depth_band(depth)].as_str()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_palette_runs_red_to_green() {
        let palette = depth_palette();
        assert_eq!(palette.len(), 7);

        let first = crate::colors::parse_color(&palette[0]).unwrap();
        let last = crate::colors::parse_color(&palette[6]).unwrap();
        assert!(first[0] > first[1], "first colour should be red-dominant");
        assert!(last[1] > last[0], "last colour should be green-dominant");
    }

    #[test]
    fn test_known_depths() {
        assert_eq!(depth_band(Some(25000.0)), 0);
        assert_eq!(depth_band(Some(20000.0)), 0);
        assert_eq!(depth_band(Some(15000.0)), 1);
        assert_eq!(depth_band(Some(5000.0)), 2);
        assert_eq!(depth_band(Some(1000.0)), 3);
        assert_eq!(depth_band(Some(500.0)), 4);
        assert_eq!(depth_band(Some(100.0)), 5);
        assert_eq!(depth_band(Some(50.0)), 6);
    }

    #[test]
    fn test_each_threshold_takes_its_own_colour() {
        let palette = depth_palette();
        for (i, &threshold) in DEPTH_THRESHOLDS.iter().enumerate() {
            assert_eq!(depth_color(Some(threshold)), palette[i]);
        }

        // 5000 m is the third threshold, so the third colour rather than the fourth
        assert_eq!(DEPTH_THRESHOLDS[2], 5000.0);
        assert_eq!(depth_color(Some(5000.0)), palette[2]);
        assert_ne!(depth_color(Some(5000.0)), palette[3]);
        assert_eq!(depth_color(Some(25000.0)), palette[0]);
    }

    #[test]
    fn test_missing_or_zero_depth_is_greenest() {
        let greenest = depth_palette()[6].as_str();
        assert_eq!(depth_color(None), greenest);
        assert_eq!(depth_color(Some(0.0)), greenest);
        assert_eq!(depth_color(Some(-10.0)), greenest);
        assert_eq!(depth_color(Some(f64::NAN)), greenest);
    }

    #[test]
    fn test_band_is_monotonic() {
        let mut previous = depth_band(Some(0.0));
        for step in 0..600 {
            let band = depth_band(Some(step as f64 * 50.0));
            assert!(band <= previous, "band rose from {} to {}", previous, band);
            previous = band;
        }
    }
}
