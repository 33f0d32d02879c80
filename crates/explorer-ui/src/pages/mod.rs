pub mod cart;
pub mod launches;
pub mod login;
