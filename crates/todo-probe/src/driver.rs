//! Driver abstraction the locator polls through.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │  ElementLocator<S: DomSession>                               │
//! ├──────────────────────────────────────────────────────────────┤
//! │  ┌─────────────────────┐        ┌─────────────────────┐      │
//! │  │  CdpSession         │        │  MockDom            │      │
//! │  │  (feature=browser)  │        │  (unit tests)       │      │
//! │  │  chromiumoxide      │        │  in-memory nodes    │      │
//! │  └─────────────────────┘        └─────────────────────┘      │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! A session answers raw, one-shot lookups. Waiting is the locator's job.

use async_trait::async_trait;
use thiserror::Error;

/// Strategy used to locate an element
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum By {
    /// Match the `id` attribute
    Id(String),
    /// Match the `name` attribute (form fields)
    Name(String),
    /// Match an XPath expression
    XPath(String),
}

impl By {
    /// Locate by element id
    #[must_use]
    pub fn id(id: impl Into<String>) -> Self {
        Self::Id(id.into())
    }

    /// Locate by form-field name
    #[must_use]
    pub fn name(name: impl Into<String>) -> Self {
        Self::Name(name.into())
    }

    /// Locate by XPath expression
    #[must_use]
    pub fn xpath(xpath: impl Into<String>) -> Self {
        Self::XPath(xpath.into())
    }

    /// Strategy name, as WebDriver spells it
    #[must_use]
    pub const fn strategy(&self) -> &'static str {
        match self {
            Self::Id(_) => "id",
            Self::Name(_) => "name",
            Self::XPath(_) => "xpath",
        }
    }

    /// The raw selector value
    #[must_use]
    pub fn value(&self) -> &str {
        match self {
            Self::Id(v) | Self::Name(v) | Self::XPath(v) => v,
        }
    }

    /// Equivalent CSS selector, if the strategy has one
    #[must_use]
    pub fn to_css(&self) -> Option<String> {
        match self {
            Self::Id(id) => Some(format!("[id={id:?}]")),
            Self::Name(name) => Some(format!("[name={name:?}]")),
            Self::XPath(_) => None,
        }
    }
}

impl std::fmt::Display for By {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}={}", self.strategy(), self.value())
    }
}

/// Failure reported by a driver for a single lookup or element call
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DriverFault {
    /// Nothing matched the locator
    #[error("no such element: {locator}")]
    NoSuchElement {
        /// Locator that missed
        locator: String,
    },

    /// The element handle no longer belongs to the document
    #[error("stale element: {message}")]
    Stale {
        /// Driver message
        message: String,
    },

    /// The driver gave up waiting on its side
    #[error("driver timeout: {message}")]
    Timeout {
        /// Driver message
        message: String,
    },

    /// Anything else: the session is unusable
    #[error("session fault: {message}")]
    Session {
        /// Driver message
        message: String,
    },
}

impl DriverFault {
    /// Whether the locator should treat this fault as "not there yet"
    #[must_use]
    pub const fn is_miss(&self) -> bool {
        matches!(
            self,
            Self::NoSuchElement { .. } | Self::Stale { .. } | Self::Timeout { .. }
        )
    }
}

impl From<DriverFault> for crate::ProbeError {
    fn from(fault: DriverFault) -> Self {
        Self::Driver {
            message: fault.to_string(),
        }
    }
}

/// A located DOM node
#[async_trait]
pub trait DomElement: Send + Sync {
    /// Whether the node is rendered and not hidden by styling
    async fn is_displayed(&self) -> Result<bool, DriverFault>;

    /// Click the node
    async fn click(&self) -> Result<(), DriverFault>;

    /// Clear an input's value
    async fn clear(&self) -> Result<(), DriverFault>;

    /// Type text into the node
    async fn send_keys(&self, text: &str) -> Result<(), DriverFault>;

    /// Press Enter while the node has focus
    async fn press_enter(&self) -> Result<(), DriverFault>;

    /// Rendered text of the node
    async fn text(&self) -> Result<String, DriverFault>;
}

/// A browser session able to answer one-shot lookups
#[async_trait]
pub trait DomSession: Send + Sync {
    /// Element handle type
    type Element: DomElement;

    /// Every element currently matching `by`, in document order
    async fn find_elements(&self, by: &By) -> Result<Vec<Self::Element>, DriverFault>;

    /// Navigate to `url`
    async fn goto(&self, url: &str) -> Result<(), DriverFault>;

    /// Reload the current document
    async fn refresh(&self) -> Result<(), DriverFault>;
}
