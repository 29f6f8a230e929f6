//! Service layer: synthetic data generators and the aggregation facade.
//!
//! Generators are pure functions of their parameters and an injected random
//! source. The facade combines them into the per-page report bundles served by
//! the HTTP layer.

pub mod activity;
pub mod aggregation;
pub mod calendar;
pub mod flow;
pub mod forecast;
pub mod funnel;
pub mod segmentation;
pub mod trends;

pub use activity::{ActivityMatrixGenerator, ActivityParams};
pub use aggregation::AggregationFacade;
pub use calendar::{classify, expand, expand_days, expand_range, HolidayCalendar, HolidayRule};
pub use flow::build_flow_graph;
pub use forecast::{ForecastEngine, ForecastParams};
pub use funnel::build_funnel;
pub use segmentation::segment;
pub use trends::{TrendPair, TrendParams, TrendSynthesizer};
