pub mod account;
pub mod notifier;

pub use account::AccountService;
pub use notifier::{NoopNotifier, Notifier, SmtpNotifier};
