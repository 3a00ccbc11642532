//! Typed bodies carried in the `data` field of normalized notifications.

pub mod account;
pub mod card;
pub mod move_money;
pub mod profile;
pub mod transaction;

pub use account::*;
pub use card::*;
pub use move_money::*;
pub use profile::*;
pub use transaction::*;
