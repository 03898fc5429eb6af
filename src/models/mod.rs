pub mod bootstrap;
pub mod credentials;
