pub mod article;
pub mod history;
pub mod inventory;
pub mod portal;
pub mod stats;
pub mod step;
pub mod user;
