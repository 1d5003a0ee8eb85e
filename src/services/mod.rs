pub mod device_client;
pub mod poll_service;
pub mod reading_store;
