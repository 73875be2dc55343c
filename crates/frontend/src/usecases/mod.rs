pub mod u501_sync_patients_to_crm;
