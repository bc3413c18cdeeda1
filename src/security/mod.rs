pub mod jwt;
pub mod otp;
pub mod password;
pub mod revocation;

pub use jwt::{Claims, JwtKeys};
pub use otp::{OtpPurpose, OtpSource, RandomOtp};
pub use revocation::RevocationRegistry;
