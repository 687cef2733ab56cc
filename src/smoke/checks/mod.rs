//! The planned endpoint checks

pub mod health;
pub mod listing;
pub mod login;

pub use health::HealthCheck;
pub use listing::ListingCheck;
pub use login::LoginCheck;
