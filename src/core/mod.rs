pub mod attendance;
pub mod identity;
pub mod log;
pub mod matrix;
pub mod reconcile;
pub mod report;
pub mod roster;
pub mod view;
