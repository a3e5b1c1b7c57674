//! Feed data: the NeoWs HTTP client and the flat dataset it produces.

pub mod dataset;
pub mod neows;

pub use dataset::{Dataset, NeoRow};
pub use neows::NeowsClient;
