//! Client for submitting blog posts to the Atlas content API, with an
//! in-memory mock transport for fully deterministic tests.

pub mod adapter;
pub mod client;
pub mod config;
pub mod content;
pub mod error;
pub mod mock;
pub mod report;

pub use adapter::{
    ReqwestTransport, RestBytes, RestError, RestErrorKind, RestFuture, RestRequest, RestResponse,
    RestResult, RestTransport,
};
pub use client::{API_KEY_HEADER, ContentClient};
pub use config::ClientConfig;
pub use content::{ContentRecord, ContentResource, ContentStatus, Source};
pub use error::{ConfigError, SubmissionError};
pub use mock::{MockBehavior, MockResponse, MockRestAdapter, MockRestStateSnapshot};
pub use report::submit_and_report;
