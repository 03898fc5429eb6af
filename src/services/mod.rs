pub mod bootstrap;
pub mod secrets;
