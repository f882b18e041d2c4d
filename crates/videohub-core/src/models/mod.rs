pub mod account;
pub mod video;

pub use account::{Account, AccountResponse};
pub use video::{NewVideo, Video};
