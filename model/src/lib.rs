//! API model representations.

pub mod account;
pub mod error;
pub mod record;
pub mod request;
pub mod response;
pub mod stat;

pub use account::Account;
pub use error::ApiError;
pub use record::Record;
pub use response::Ack;
pub use stat::Stat;
