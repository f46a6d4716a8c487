//! Moving snippets to and from FileMaker's clipboard
//!
//! FileMaker only accepts fmxmlsnippet text through its own clipboard
//! format, so both directions go through an [`Automation`] backend. The
//! bridge escapes outgoing text and turns the backend's response into a
//! result.

pub mod escape;
mod osascript;

use std::io;

use thiserror::Error;
use tracing::{debug, warn};

use crate::snippet::Snippet;

pub use escape::prepare_payload;
pub use osascript::{ClipboardConfig, OsascriptAutomation};

/// Response prefix for snippets FileMaker rejected
const XML_VALIDATION_PREFIX: &str = "Error validating XML";
const ERROR_PREFIX: &str = "Error";

/// Backend that talks to the clipboard
pub trait Automation {
    /// Load an escaped payload onto the clipboard; returns the backend's response
    fn push(&mut self, payload: &str) -> io::Result<String>;

    /// Read the clipboard's text
    fn pull(&mut self) -> io::Result<String>;
}

#[derive(Debug, Error)]
pub enum ClipboardError {
    /// FileMaker rejected the snippet
    #[error("{0}")]
    XmlValidation(String),

    #[error("Invalid/Unsupported string. Could be trouble with extended ascii character.\n{0}")]
    Automation(String),

    #[error("Unrecognized clipboard data")]
    Unrecognized(#[source] io::Error),

    #[error("failed to run clipboard automation: {0}")]
    Spawn(#[from] io::Error),
}

/// Pushes snippets through an automation backend
#[derive(Debug)]
pub struct ClipboardBridge<A> {
    automation: A,
}

impl ClipboardBridge<OsascriptAutomation> {
    pub fn osascript(config: ClipboardConfig) -> Self {
        Self::new(OsascriptAutomation::new(config))
    }
}

impl<A: Automation> ClipboardBridge<A> {
    pub fn new(automation: A) -> Self {
        Self { automation }
    }

    pub fn automation(&self) -> &A {
        &self.automation
    }

    /// Serialize and load a snippet; returns the normalized response
    pub fn push(&mut self, snippet: &Snippet) -> Result<String, ClipboardError> {
        self.push_xml(&snippet.to_xml())
    }

    /// Load already serialized snippet XML
    pub fn push_xml(&mut self, xml: &str) -> Result<String, ClipboardError> {
        let payload = prepare_payload(xml);
        debug!(bytes = payload.len(), "pushing snippet to clipboard");
        let response = self.automation.push(&payload)?.replace('\r', "\n");

        if response.starts_with(XML_VALIDATION_PREFIX) {
            warn!("clipboard rejected snippet XML");
            return Err(ClipboardError::XmlValidation(response));
        }
        if response.starts_with(ERROR_PREFIX) {
            warn!("clipboard automation failed");
            return Err(ClipboardError::Automation(response));
        }
        Ok(response)
    }

    /// Read the snippet currently on the clipboard
    pub fn pull(&mut self) -> Result<String, ClipboardError> {
        self.automation
            .pull()
            .map_err(ClipboardError::Unrecognized)
    }
}
