//! SeaORM entity definitions.

pub mod blog;
pub mod user;
