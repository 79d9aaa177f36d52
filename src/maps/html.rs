//! Leaflet page rendering for map canvases.

use serde::Serialize;

use super::canvas::{MapCanvas, MapMarker};
use crate::error::Result;

const LEAFLET_VERSION: &str = "1.9.4";

#[derive(Serialize)]
struct PageData<'a> {
    center: [f64; 2],
    zoom: u8,
    tiles: &'a str,
    markers: &'a [MapMarker],
}

/// JSON embedded in a `<script>` block must not be able to close it
fn script_safe_json<T: Serialize>(value: &T) -> Result<String> {
    Ok(serde_json::to_string(value)?.replace("</", "<\\/"))
}

pub(super) fn render_page(canvas: &MapCanvas) -> Result<String> {
    let data = PageData {
        center: [canvas.center_latitude, canvas.center_longitude],
        zoom: canvas.zoom,
        tiles: &canvas.tiles,
        markers: canvas.markers(),
    };
    let data_json = script_safe_json(&data)?;

    Ok(format!(
        r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<title>seisviz map</title>
<link rel="stylesheet" href="https://unpkg.com/leaflet@{version}/dist/leaflet.css">
<script src="https://unpkg.com/leaflet@{version}/dist/leaflet.js"></script>
<style>html, body, #map {{ height: 100%; margin: 0; }}</style>
</head>
<body>
<div id="map"></div>
<script>
const data = {data};
const map = L.map("map").setView(data.center, data.zoom);
L.tileLayer(data.tiles, {{ maxZoom: 18 }}).addTo(map);
function tooltip(text) {{
  const span = document.createElement("span");
  span.textContent = text;
  return span;
}}
for (const m of data.markers) {{
  let layer;
  if (m.shape === "triangle") {{
    const size = Math.max(2 * m.radius, 6);
    const svg = `<svg xmlns="http://www.w3.org/2000/svg" width="${{size}}" height="${{size}}">` +
      `<polygon points="${{size / 2}},0 ${{size}},${{size}} 0,${{size}}" ` +
      `fill="${{m.color}}" stroke="black" stroke-width="1"/></svg>`;
    layer = L.marker([m.latitude, m.longitude], {{
      icon: L.divIcon({{ html: svg, className: "", iconSize: [size, size] }})
    }});
  }} else {{
    layer = L.circleMarker([m.latitude, m.longitude], {{
      radius: m.radius, color: m.color, fillColor: m.color, fillOpacity: 0.7, weight: 1
    }});
  }}
  layer.bindTooltip(tooltip(m.tooltip)).addTo(map);
}}
</script>
</body>
</html>
"#,
        version = LEAFLET_VERSION,
        data = data_json,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::maps::canvas::MarkerShape;

    #[test]
    fn test_page_embeds_markers() {
        let mut canvas = MapCanvas::new(35.0, 139.0, 5).unwrap();
        canvas
            .push(MapMarker {
                shape: MarkerShape::Triangle,
                latitude: 35.5,
                longitude: 139.5,
                radius: 6.0,
                color: "#2c7fb8".to_string(),
                tooltip: "JP.ABC (35.5, 139.5) 10 m".to_string(),
            })
            .unwrap();

        let page = render_page(&canvas).unwrap();
        assert!(page.contains("leaflet@1.9.4"));
        assert!(page.contains("JP.ABC (35.5, 139.5) 10 m"));
        assert!(page.contains(r#""shape":"triangle""#));
    }

    #[test]
    fn test_script_safe_json() {
        let json = script_safe_json(&"</script><b>").unwrap();
        assert!(!json.contains("</script>"));
    }
}
