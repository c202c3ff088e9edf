pub mod duration;
pub mod options;
pub mod reply;
