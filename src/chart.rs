use plotly::common::{Line, Marker, Mode, Title};
use plotly::layout::{Axis, AxisType};
use plotly::{Layout, Scatter};
use wasm_bindgen::prelude::*;

use crate::series::ChartDataset;

const HISTORICAL_COLOR: &str = "rgb(59, 130, 246)";
const FORECAST_COLOR: &str = "#ff6384";

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = Plotly)]
    fn newPlot(div_id: &str, data: JsValue, layout: JsValue);

    #[wasm_bindgen(js_namespace = Plotly)]
    fn purge(div_id: &str);
}

/// The drawing surface the renderer talks to. Trace data and layout cross the
/// boundary as JSON text so the chart logic stays independent of the browser.
pub trait PlotSurface {
    fn new_plot(&mut self, div_id: &str, data_json: &str, layout_json: &str);
    fn purge(&mut self, div_id: &str);
}

/// Live Plotly bindings.
pub struct PlotlySurface;

impl PlotSurface for PlotlySurface {
    fn new_plot(&mut self, div_id: &str, data_json: &str, layout_json: &str) {
        let data = js_sys::JSON::parse(data_json).unwrap();
        let layout = js_sys::JSON::parse(layout_json).unwrap();
        newPlot(div_id, data, layout);
    }

    fn purge(&mut self, div_id: &str) {
        purge(div_id);
    }
}

/// Opaque reference to one live chart. Each render hands out a fresh handle;
/// the previous one is superseded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChartHandle {
    generation: u64,
}

impl ChartHandle {
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// Owns the single chart bound to one div. Plotly leaks canvas state when a
/// plot is re-created over a live one, so every re-render purges the previous
/// chart before drawing the next.
pub struct ChartRenderer<S: PlotSurface> {
    surface: S,
    div_id: String,
    handle: Option<ChartHandle>,
    generation: u64,
}

impl<S: PlotSurface> ChartRenderer<S> {
    pub fn new(surface: S, div_id: impl Into<String>) -> Self {
        Self {
            surface,
            div_id: div_id.into(),
            handle: None,
            generation: 0,
        }
    }

    /// Draw the dataset, tearing down any previous chart first.
    pub fn render(&mut self, dataset: &ChartDataset) -> ChartHandle {
        if self.handle.take().is_some() {
            log::trace!("Purging previous chart in #{}", self.div_id);
            self.surface.purge(&self.div_id);
        }

        let (data_json, layout_json) = plot_args(dataset);
        self.surface.new_plot(&self.div_id, &data_json, &layout_json);

        self.generation += 1;
        let handle = ChartHandle {
            generation: self.generation,
        };
        self.handle = Some(handle);
        log::debug!(
            "Rendered chart generation {} in #{} ({} labels)",
            handle.generation,
            self.div_id,
            dataset.labels.len()
        );
        handle
    }

    pub fn handle(&self) -> Option<ChartHandle> {
        self.handle
    }
}

/// Build the Plotly trace array and layout for a merged dataset. Both series
/// share the label axis; `None` values serialize to `null`, which Plotly
/// leaves as gaps, so each trace starts at its own offset.
fn plot_args(dataset: &ChartDataset) -> (String, String) {
    let historical = Scatter::new(dataset.labels.clone(), dataset.historical.clone())
        .mode(Mode::Lines)
        .name("AirPassengers")
        .line(Line::new().color(HISTORICAL_COLOR).width(2.0));

    let forecast = Scatter::new(dataset.labels.clone(), dataset.forecast.clone())
        .mode(Mode::LinesMarkers)
        .name("AirPassengers Forecast")
        .line(Line::new().color(FORECAST_COLOR).width(2.0))
        .marker(Marker::new().color(FORECAST_COLOR).size(5));

    let layout = Layout::new()
        .title(Title::with_text("AirPassengers Forecast"))
        .x_axis(
            Axis::new()
                .type_(AxisType::Date)
                .tick_format("%b %Y")
                .title(Title::with_text("Date")),
        )
        .y_axis(Axis::new().title(Title::with_text("Passengers")))
        .height(400);

    let data_json = serde_json::to_string(&vec![historical, forecast]).unwrap();
    let layout_json = serde_json::to_string(&layout).unwrap();
    (data_json, layout_json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::series::merge;
    use crate::series::TimePoint;
    use chrono::NaiveDate;

    #[derive(Debug, PartialEq)]
    enum SurfaceCall {
        NewPlot(String),
        Purge(String),
    }

    #[derive(Default)]
    struct RecordingSurface {
        calls: Vec<SurfaceCall>,
        last_data_json: String,
    }

    impl PlotSurface for RecordingSurface {
        fn new_plot(&mut self, div_id: &str, data_json: &str, _layout_json: &str) {
            self.calls.push(SurfaceCall::NewPlot(div_id.to_string()));
            self.last_data_json = data_json.to_string();
        }

        fn purge(&mut self, div_id: &str) {
            self.calls.push(SurfaceCall::Purge(div_id.to_string()));
        }
    }

    fn sample_dataset() -> crate::series::ChartDataset {
        let historical = vec![
            TimePoint {
                date: NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(),
                value: 100.0,
            },
            TimePoint {
                date: NaiveDate::from_ymd_opt(2020, 2, 1).unwrap(),
                value: 110.0,
            },
        ];
        let forecast = vec![TimePoint {
            date: NaiveDate::from_ymd_opt(2020, 3, 1).unwrap(),
            value: 120.0,
        }];
        merge(&historical, &forecast)
    }

    #[test]
    fn first_render_creates_without_teardown() {
        let mut renderer = ChartRenderer::new(RecordingSurface::default(), "forecastChart");
        assert!(renderer.handle().is_none());

        renderer.render(&sample_dataset());

        assert_eq!(
            renderer.surface.calls,
            vec![SurfaceCall::NewPlot("forecastChart".to_string())]
        );
        assert!(renderer.handle().is_some());
    }

    #[test]
    fn second_render_purges_before_recreating() {
        let mut renderer = ChartRenderer::new(RecordingSurface::default(), "forecastChart");

        renderer.render(&sample_dataset());
        renderer.render(&sample_dataset());

        assert_eq!(
            renderer.surface.calls,
            vec![
                SurfaceCall::NewPlot("forecastChart".to_string()),
                SurfaceCall::Purge("forecastChart".to_string()),
                SurfaceCall::NewPlot("forecastChart".to_string()),
            ]
        );
    }

    #[test]
    fn each_render_supersedes_the_previous_handle() {
        let mut renderer = ChartRenderer::new(RecordingSurface::default(), "forecastChart");

        let first = renderer.render(&sample_dataset());
        let second = renderer.render(&sample_dataset());

        assert_ne!(first, second);
        assert_eq!(renderer.handle(), Some(second));
    }

    #[test]
    fn traces_carry_gaps_as_nulls() {
        let mut renderer = ChartRenderer::new(RecordingSurface::default(), "forecastChart");

        renderer.render(&sample_dataset());

        let data: serde_json::Value =
            serde_json::from_str(&renderer.surface.last_data_json).unwrap();
        let traces = data.as_array().unwrap();
        assert_eq!(traces.len(), 2);

        assert_eq!(
            traces[0]["y"],
            serde_json::json!([100.0, 110.0, serde_json::Value::Null])
        );
        assert_eq!(
            traces[1]["y"],
            serde_json::json!([serde_json::Value::Null, serde_json::Value::Null, 120.0])
        );
        assert_eq!(traces[1]["name"], "AirPassengers Forecast");
    }

    #[test]
    fn rendering_an_all_gap_dataset_is_accepted() {
        let mut renderer = ChartRenderer::new(RecordingSurface::default(), "forecastChart");

        let dataset = merge(&[], &[]);
        let handle = renderer.render(&dataset);

        assert_eq!(handle.generation(), 1);
    }
}
