pub mod a001_patient;
