// unibridge-api: Async client for UniFi Network controllers (Integration + Legacy)
//
// One `Client` owns the transport and the default site. Operations are
// reached through `client.integration()` or `client.legacy()`, and every
// failure is reported as `Error`, classifiable with `Error::kind`.

pub mod client;
pub mod error;
pub mod integration;
pub mod legacy;
pub mod merge;
pub mod pagination;
pub mod transport;

pub use client::{Client, ClientConfig};
pub use error::{ApiErrorBody, Error, ErrorKind, ResultExt};
pub use integration::IntegrationClient;
pub use integration::types;
pub use legacy::LegacyClient;
pub use legacy::models as legacy_models;
pub use pagination::{DEFAULT_SCAN_PAGE_SIZE, Page, PageRequest};
pub use transport::{TlsMode, TransportConfig};
