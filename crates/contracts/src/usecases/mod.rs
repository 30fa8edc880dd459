pub mod u501_sync_crm_activity {
    mod request;
    mod response;
    pub use request::*;
    pub use response::*;
}

pub mod u502_map_owners {
    mod response;
    pub use response::*;
}
