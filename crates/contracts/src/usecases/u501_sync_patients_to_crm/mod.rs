pub mod request;
pub mod response;

pub use request::SyncRequest;
pub use response::{SyncResponse, SyncSummary};

use crate::usecases::common::UseCaseMetadata;

pub struct SyncPatientsToCrm;

impl UseCaseMetadata for SyncPatientsToCrm {
    fn usecase_index() -> &'static str {
        "u501"
    }

    fn usecase_name() -> &'static str {
        "sync_patients_to_crm"
    }

    fn display_name() -> &'static str {
        "Sync to CRM"
    }

    fn description() -> &'static str {
        "Create or update CRM contacts from the rows of an uploaded patient CSV"
    }
}
