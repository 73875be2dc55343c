pub mod crm_api_client;
pub mod error;
pub mod executor;
pub mod payload;

#[cfg(test)]
pub(crate) mod testing;

pub use crm_api_client::{CrmApiClient, CrmContactsApi};
pub use error::SyncError;
pub use executor::SyncExecutor;
pub use payload::SyncPayload;
