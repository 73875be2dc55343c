pub mod api_utils;
pub mod csv_importer;
pub mod export;
