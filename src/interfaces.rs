pub mod repositories;
pub mod views;
