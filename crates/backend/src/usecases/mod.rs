pub mod u501_sync_crm_activity;
pub mod u502_map_owners;
