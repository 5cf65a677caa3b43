//! Headless view models. They decide what a renderer shows; they do not
//! render anything themselves.

pub mod about;
pub mod auth_control;
pub mod comments;
pub mod prototypes;
