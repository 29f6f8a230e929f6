pub mod activity;
pub mod date;
pub mod flow;
pub mod funnel;
pub mod segment;
pub mod series;

pub use activity::*;
pub use date::*;
pub use flow::*;
pub use funnel::*;
pub use segment::*;
pub use series::*;
