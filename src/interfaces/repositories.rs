pub mod about;
pub mod comment;
pub mod prototype;
pub mod session;
