//! todo-probe: functional test harness for a to-do list web service
//!
//! Drives the service two ways: over its REST API with [`TodoApi`], and
//! through its web UI with a Chromium-backed [`page::TodoPage`]. Both sides
//! are checked against the same record types.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                    TODO-PROBE Architecture                      │
//! ├─────────────────────────────────────────────────────────────────┤
//! │   ┌────────────┐    ┌────────────┐    ┌────────────┐            │
//! │   │ Fixture    │───►│ TodoApi    │───►│ REST       │            │
//! │   │ (reset,    │    │ (reqwest)  │    │ service    │            │
//! │   │  log)      │    └────────────┘    └────────────┘            │
//! │   │            │    ┌────────────┐    ┌────────────┐            │
//! │   │            │───►│ TodoPage   │───►│ Element    │──► CDP /   │
//! │   └────────────┘    │ components │    │ Locator    │    MockDom │
//! │                     └────────────┘    └────────────┘            │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Lookups poll until the element is visible or the timeout elapses; a miss
//! is `None`, never an error. Mutating REST calls take a `verify` flag so
//! negative tests can inspect rejected responses.

#![warn(missing_docs)]

pub mod api;
#[cfg(feature = "browser")]
pub mod browser;
pub mod checks;
pub mod config;
pub mod driver;
pub mod fixture;
pub mod locator;
pub mod logging;
pub mod mock;
pub mod page;
pub mod records;
mod result;

pub use api::{Auth, Credentials, TodoApi};
pub use checks::{check_tag_details, ExpectedTask};
pub use config::{BrowserConfig, ProbeConfig};
pub use driver::{By, DomElement, DomSession, DriverFault};
pub use fixture::{random_tag, ApiFixture};
pub use locator::ElementLocator;
pub use logging::TestLog;
pub use records::{RecordId, TagDetail, TagEntry, TagIndex, Task, TokenInfo};
pub use result::{ProbeError, ProbeResult};

#[cfg(feature = "browser")]
pub use fixture::UiFixture;
