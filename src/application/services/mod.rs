pub mod article_service;
pub mod inventory_service;
pub mod portal_service;
pub mod stats_service;
pub mod step_service;
pub mod user_service;
