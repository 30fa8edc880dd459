pub mod aggregate;
pub mod crm_api_client;
pub mod executor;

pub use crm_api_client::{CrmActivitySource, CrmOwner, HubSpotApiClient};
pub use executor::SyncError;
