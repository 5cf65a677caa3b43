pub mod comments;
pub mod focus;
pub mod prototypes;
pub mod session;
pub mod sync_state;
