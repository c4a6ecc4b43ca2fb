//! Reference Data Adapter - 章 / 卷 / 页 / 诵读者 / 译本目录

mod api_reference_data;
mod json_reference_data;

pub use api_reference_data::ApiReferenceData;
pub use json_reference_data::JsonReferenceData;
