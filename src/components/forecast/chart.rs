use web_sys::HtmlElement;
use yew::prelude::*;

use crate::chart::{ChartRenderer, PlotlySurface};
use crate::series::ChartDataset;

/// The drawing surface the backend page exposes.
const CHART_DIV_ID: &str = "forecastChart";

#[derive(Properties, PartialEq)]
pub struct Props {
    pub dataset: ChartDataset,
}

/// Binds the chart renderer to the `forecastChart` div and redraws whenever
/// the merged dataset changes. The renderer lives across renders so it can
/// purge the previous plot before drawing the next one.
#[function_component(ForecastChart)]
pub fn forecast_chart(props: &Props) -> Html {
    let container_ref = use_node_ref();
    let renderer = use_mut_ref(|| ChartRenderer::new(PlotlySurface, CHART_DIV_ID));
    let dataset = props.dataset.clone();

    use_effect_with(
        (container_ref.clone(), dataset),
        move |(container_ref, dataset)| {
            if let Some(element) = container_ref.cast::<HtmlElement>() {
                element.set_id(CHART_DIV_ID);

                let handle = renderer.borrow_mut().render(dataset);
                log::trace!("Forecast chart now at generation {}", handle.generation());
            }
            || ()
        },
    );

    html! {
        <div ref={container_ref} style="width:100%; height:400px;"></div>
    }
}
