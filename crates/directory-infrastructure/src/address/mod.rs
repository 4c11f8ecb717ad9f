//! HTTP adapters for the geographic reference dataset

pub mod turkiye_client;

pub use turkiye_client::TurkiyeApiClient;
