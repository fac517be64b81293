pub mod attendance;
pub mod cadet;
pub mod gender;
pub mod matrix;
pub mod status;
