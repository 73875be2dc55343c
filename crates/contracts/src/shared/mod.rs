pub mod csv_import;
