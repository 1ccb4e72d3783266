pub mod notification;
pub mod recipe;
pub mod week;
