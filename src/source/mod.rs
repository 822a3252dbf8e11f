pub mod client;
pub mod dataset;
pub mod html;
pub mod parse;

pub use client::DatasetClient;
pub use dataset::{load_dataset, Dataset};
pub use html::extract_payload;
pub use parse::parse_records;
