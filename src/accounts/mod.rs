mod model;
mod postgres;
mod store;

#[cfg(test)]
mod memory;

pub use model::{Account, NewProfile, Profile};
pub use postgres::PgAccountStore;
pub use store::{AccountStore, StoreError};

#[cfg(test)]
pub use memory::InMemoryAccountStore;
