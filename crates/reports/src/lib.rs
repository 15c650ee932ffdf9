//! `forno-reports` — aggregate reports over record slices.
//!
//! Every report here is a pure reduction: the API layer scans a prefix,
//! hands the records over, and gets back a serializable summary. Nothing in
//! this crate touches storage or the clock; callers pass `now` explicitly.

pub mod finance;
pub mod period;
pub mod popular;
pub mod sales;
pub mod stock;

pub use finance::{ChannelRevenue, FinancialSummary, financial_summary};
pub use period::ReportPeriod;
pub use popular::{ProductSales, popular_products};
pub use sales::{SalesSummary, sales_summary};
pub use stock::low_stock;
