pub mod data_table;
pub mod reader;

pub use data_table::DataTable;
pub use reader::load_csv_file;
