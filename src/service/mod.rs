pub mod aggregate;
pub mod dashboard;
pub mod export;
pub mod filter;
pub mod format;

pub use aggregate::{aggregate, month_end};
pub use dashboard::DashboardService;
pub use export::ExportTable;
pub use filter::{apply_filters, seller_options};
pub use format::format_number;
