pub mod a001_store;
pub mod a002_sales_rep;
pub mod a003_daily_revenue_fact;
pub mod a004_monthly_goal;
pub mod a005_rep_activity_fact;
pub mod a006_owner_mapping;
pub mod a007_entity_group;
