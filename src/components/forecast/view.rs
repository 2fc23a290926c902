use web_sys::HtmlInputElement;
use yew::prelude::*;

use super::chart::ForecastChart;
use crate::api_client::forecast::{fetch_forecast, fetch_historical, parse_periods};
use crate::common::error::ErrorDisplay;
use crate::common::fetch_hook::use_fetch_with_refetch;
use crate::common::loading::Loading;
use crate::common::toast::ToastContext;
use crate::hooks::FetchState;
use crate::series::{merge, Series};
use crate::settings;

/// Page controller for the forecast view. The historical series loads once on
/// mount; each click on the forecast button re-requests the forecast and
/// re-renders the chart. The controls only appear once historical data has
/// settled, so a forecast can never merge against a missing series.
#[function_component(Forecast)]
pub fn forecast() -> Html {
    let (historical_state, refetch_historical) = use_fetch_with_refetch(fetch_historical);
    let forecast_state = use_state(FetchState::<Series>::default);
    let periods_input = use_state(|| "12".to_string());
    let toast_ctx = use_context::<ToastContext>().unwrap();

    let on_periods_input = {
        let periods_input = periods_input.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            periods_input.set(input.value());
        })
    };

    let on_forecast = {
        let periods_input = periods_input.clone();
        let forecast_state = forecast_state.clone();
        let toast_ctx = toast_ctx.clone();

        Callback::from(move |_: MouseEvent| {
            let max_periods = settings::get_settings().max_forecast_periods;
            let periods = match parse_periods(&periods_input, max_periods) {
                Ok(periods) => periods,
                Err(err) => {
                    log::warn!("Rejected forecast horizon {:?}: {}", *periods_input, err);
                    toast_ctx.show_warning(err.to_string());
                    forecast_state.set(FetchState::Error(err));
                    return;
                }
            };

            log::debug!("User requested a {} month forecast", periods);
            forecast_state.set(FetchState::Loading);

            let forecast_state = forecast_state.clone();
            let toast_ctx = toast_ctx.clone();
            wasm_bindgen_futures::spawn_local(async move {
                match fetch_forecast(periods).await {
                    Ok(series) => forecast_state.set(FetchState::Success(series)),
                    Err(err) => {
                        toast_ctx.show_error(err.to_string());
                        forecast_state.set(FetchState::Error(err));
                    }
                }
            });
        })
    };

    html! {
        <div class="card bg-base-100 shadow">
            <div class="card-body">
                <h3 class="card-title text-lg">{"AirPassengers Forecast"}</h3>
                <p class="text-sm text-gray-500 mb-4">
                    {"Monthly passenger counts with an AutoARIMA projection"}
                </p>

                {match &*historical_state {
                    FetchState::Loading => html! {
                        <Loading text={"Loading historical data...".to_string()} />
                    },
                    FetchState::Error(error) => html! {
                        <ErrorDisplay
                            error={error.clone()}
                            on_retry={Some(refetch_historical.clone())}
                        />
                    },
                    FetchState::Success(historical) => {
                        let forecast_points = forecast_state.data().cloned().unwrap_or_default();
                        let dataset = merge(historical, &forecast_points);

                        html! {
                            <>
                                <div class="flex items-end gap-4 mb-4">
                                    <label class="form-control">
                                        <span class="label-text">{"Months to forecast"}</span>
                                        <input
                                            id="periods"
                                            type="number"
                                            class="input input-bordered w-32"
                                            min="1"
                                            value={(*periods_input).clone()}
                                            oninput={on_periods_input.clone()}
                                        />
                                    </label>
                                    <button
                                        class="btn btn-primary"
                                        disabled={forecast_state.is_loading()}
                                        onclick={on_forecast.clone()}
                                    >
                                        {if forecast_state.is_loading() {
                                            html! {
                                                <>
                                                    <span class="loading loading-spinner loading-sm"></span>
                                                    {" Forecasting..."}
                                                </>
                                            }
                                        } else {
                                            html! { {"Get Forecast"} }
                                        }}
                                    </button>
                                </div>
                                <ForecastChart dataset={dataset} />
                            </>
                        }
                    },
                    FetchState::NotStarted => html! { <></> },
                }}
            </div>
        </div>
    }
}
