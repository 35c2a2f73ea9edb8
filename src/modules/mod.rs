pub mod caption;
pub mod health;
