//! Database access layer

pub mod categories;
pub mod grab_records;
pub mod orders;
pub mod rider_settings;
pub mod users;
pub mod wallets;
