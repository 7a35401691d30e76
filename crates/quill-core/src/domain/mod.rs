//! Domain entities - the core business objects.

mod blog;
mod user;

pub use blog::Blog;
pub use user::User;
