//! Core domain types.

mod date;
mod holding;
mod price;
mod returns;

pub use date::Date;
pub use holding::HoldingRecord;
pub use price::{PricePoint, PriceSeries};
pub use returns::{MonthlyReturn, PeriodObservation, ReturnRecord, ReturnSeries};
