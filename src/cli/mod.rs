pub mod mail;
pub mod server;
