pub mod aggregate;

pub use aggregate::{expected_headers, PatientColumn, PatientRow};
