#[cfg(test)]
pub mod memory;
pub mod model;
pub mod pg;
pub mod store;

#[cfg(test)]
pub use memory::MemoryUserStore;
pub use model::{NewUser, Profile, User};
pub use pg::PgUserStore;
pub use store::{StoreError, UserStore};
