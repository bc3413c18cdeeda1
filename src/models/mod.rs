pub mod account;
pub mod requests;

pub use account::{Account, Role, Status};
