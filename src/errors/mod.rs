pub mod fetch;
pub mod store;

pub use fetch::FetchError;
pub use store::StoreError;
