mod chart;
mod view;

pub use chart::ForecastChart;
pub use view::Forecast;
