// Server-side HTML assembly. The chart is absolute-positioned divs so the
// page renders correctly on e-reader browsers without canvas or SVG support.
// All coordinates come from the chart layout engine; this module only turns
// them into markup.
use crate::application::render_service::PageModel;
use crate::domain::chart::{self, CHART_HEIGHT, POINT_WIDTH};
use crate::domain::formatting::{format_glucose_value, format_time};
use crate::domain::reading::GlucoseReading;
use crate::domain::settings::DisplaySettings;
use crate::domain::staleness::{DATA_MISSING_TOO_LONG_SECS, STANDARD_CGM_UPDATE_INTERVAL_SECS};
use crate::presentation::client_script::CLIENT_SIDE_SCRIPT;

const HEADER_HEIGHT: f64 = 70.0;
const EXTENDED_WIDTH: f64 = HEADER_HEIGHT * 0.95;

pub fn page(model: &PageModel) -> String {
    // Single source of truth for the cadence constants the client script
    // consumes; nothing else in the markup carries them.
    let config = serde_json::json!({
        "STANDARD_CGM_UPDATE_INTERVAL": STANDARD_CGM_UPDATE_INTERVAL_SECS as i64,
        "DATA_MISSING_TOO_LONG": DATA_MISSING_TOO_LONG_SECS as i64,
    });

    let mut page_title = model.headline.clone();
    if let Some(relative) = &model.relative_change {
        page_title.push_str(&format!(" ({} in {})", relative.change, relative.window));
    }
    if !model.settings.title.is_empty() {
        page_title.push_str(&format!(" \u{2014} {}", model.settings.title));
    }

    let relative_block = match &model.relative_change {
        Some(relative) => format!(
            "<table>\n        <tr><td>{}</td></tr>\n        <tr><td>{}</td></tr>\n      </table>",
            relative.window, relative.change
        ),
        None => String::new(),
    };

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8">
  <meta http-equiv="X-UA-Compatible" content="IE=edge">
  <meta name="viewport" content="width=device-width, initial-scale=1.0">
  <title>{page_title}</title>
  <style type="text/css">{style}</style>
</head>
<body>
  <div id="log">log</div>
  <header>
    <h1>{headline}</h1>
    {relative_block}
    <h2 id="log-toggler">{time_info}</h2>
  </header>
  <main>
    {chart}
  </main>
  <script>
    window.glucopanelConfig = {config};
    {script}
  </script>
</body>
</html>
"#,
        page_title = page_title,
        style = style(),
        headline = model.headline,
        relative_block = relative_block,
        time_info = time_info(model.readings),
        chart = chart(model.settings, model.readings),
        config = config,
        script = CLIENT_SIDE_SCRIPT,
    )
}

/// The header clock: newest reading time plus the live age element the
/// client script keeps updated. A page without data gets a placeholder and
/// no age element, which the script reads as the no-data state.
fn time_info(readings: &[GlucoseReading]) -> String {
    let Some(latest) = readings.first() else {
        return "--:--".to_string();
    };
    format!(
        r#"<span class="time" data-time="{date}">{time}</span> <small id="measurement-age" data-time="{date}">?</small>"#,
        date = latest.date_ms,
        time = format_time(latest.date_ms),
    )
}

fn chart(settings: &DisplaySettings, readings: &[GlucoseReading]) -> String {
    let range = chart::determine_range(settings, readings);
    let points = chart::layout_points(settings, range, readings);

    let band_bottom = chart::map_to_position(range, settings.target_range.lower_mgdl);
    let band_top = chart::map_to_position(range, settings.target_range.upper_mgdl);
    let mut markup = format!(
        r#"<div class="target-range" style="bottom: {}px; height: {}px"></div>"#,
        band_bottom,
        band_top - band_bottom
    );

    for (i, point) in points.iter().enumerate() {
        let mut classes = vec!["point", if i % 2 == 1 { "odd" } else { "even" }];
        // High/low classes don't currently change the appearance; kept for
        // future styling.
        if point.high {
            classes.push("high");
        }
        if point.low {
            classes.push("low");
        }

        markup.push_str(&format!(
            r#"
    <div class="{classes}" style="left: {left}px">
      <span class="value" style="bottom: {bottom}px">
        {value}
        <span class="marker"></span>
      </span>
      <span class="time" data-time="{date}">{time}</span>
    </div>"#,
            classes = classes.join(" "),
            left = point.left,
            bottom = point.bottom,
            value = format_glucose_value(settings.display_units, point.value_mgdl),
            date = point.time_ms,
            time = format_time(point.time_ms),
        ));
    }

    markup
}

/// Replace `${name}` placeholders in a template.
fn fill(template: &str, vars: &[(&str, f64)]) -> String {
    let mut result = template.to_string();
    for (key, value) in vars {
        let placeholder = format!("${{{}}}", key);
        result = result.replace(&placeholder, &value.to_string());
    }
    result
}

fn style() -> String {
    fill(
        STYLE_TEMPLATE,
        &[
            ("header_block_height", HEADER_HEIGHT + 10.0),
            ("header_height", HEADER_HEIGHT),
            ("extended_width", EXTENDED_WIDTH),
            ("h1_font_size", HEADER_HEIGHT * 0.7),
            ("table_font_size", HEADER_HEIGHT * 0.35),
            ("h2_font_size", HEADER_HEIGHT * 0.5),
            ("chart_height", CHART_HEIGHT),
            ("point_width", POINT_WIDTH),
            ("marker_width", POINT_WIDTH * 0.8),
            ("marker_left", POINT_WIDTH * 0.1),
        ],
    )
}

const STYLE_TEMPLATE: &str = r#"
    * {
      margin: 0;
      padding: 0;
    }

    body {
      background: #fff;
      color: #000;
      font-family: sans-serif;
    }

    #log {
      background: #000;
      color: #fff;
      display: none;
    }

    header {
      height: ${header_block_height}px;
      border-bottom: 2px solid #aaa;
      position: relative;
    }

    h1, h2, header table {
      position: absolute;
      top: 0;
      height: ${header_height}px;
      padding: 5px 10px;
    }

    h1 {
      right: ${extended_width}px;
      line-height: ${header_height}px;
      font-size: ${h1_font_size}px;
      text-align: right;
    }

    header table {
      right: 0;
      width: ${extended_width}px;
      font-size: ${table_font_size}px;
      line-height: ${table_font_size}px;
      text-align: right;
      color: #444;
    }

    h2 {
      left: 0;
      font-size: ${h2_font_size}px;
      color: #444;
      text-align: center;
    }

    h2 small {
      font-size: 50%;
      font-weight: normal;
      display: block;
    }

    .stale-data header {
      background: #000;
    }

    .stale-data h1 {
      color: #666;
      font-weight: normal;
    }

    .stale-data h2 {
      color: #fff;
    }

    main {
      height: ${chart_height}px;
      position: relative;
    }

    .target-range {
      position: absolute;
      left: 0;
      background: #ddd;
      width: 100%;
    }

    .point {
      position: absolute;
      top: 0;
      width: ${point_width}px;
      height: ${chart_height}px;
      text-align: center;
    }

    .point .value,
    .point .time {
      position: absolute;
      left: 0;
      width: ${point_width}px;
    }

    .point .value .marker {
      position: absolute;
      background: #444;
      height: 4px;
      width: ${marker_width}px;
      bottom: -4px;
      left: ${marker_left}px;
      border-radius: 2px;
    }

    .point .time {
      bottom: 0;
    }

    .point.odd {
      border-left: 1px solid #aaa;
    }

    .point.even .value {
      font-size: 70%;
    }
    .point.even .time {
      display: none;
    }
"#;
