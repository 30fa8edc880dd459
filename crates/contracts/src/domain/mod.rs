pub mod common;

pub mod a001_store {
    pub mod aggregate;
}
pub mod a002_sales_rep {
    pub mod aggregate;
}
pub mod a003_daily_revenue_fact {
    pub mod aggregate;
}
pub mod a004_monthly_goal {
    pub mod aggregate;
}
pub mod a005_rep_activity_fact {
    pub mod aggregate;
}
pub mod a006_owner_mapping {
    pub mod aggregate;
}
pub mod a007_entity_group {
    pub mod aggregate;
}
