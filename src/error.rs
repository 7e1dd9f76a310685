//! Error types for COLLADA export
//!
//! This module provides error handling for `.dae` writing operations.
//! All errors include error codes for categorization.
//!
//! # Error Codes
//!
//! Error codes follow the pattern: `E<category><number>`
//!
//! Categories:
//! - **E1xxx**: I/O errors
//! - **E2xxx**: XML serialization errors
//!
//! ## Error Codes
//!
//! - `E1001`: I/O error creating or writing the output file
//! - `E2005`: XML writing error

use std::io;
use thiserror::Error;

/// Result type for COLLADA export operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while writing a COLLADA document
#[derive(Error, Debug)]
pub enum Error {
    /// IO error occurred while creating or writing the output file
    ///
    /// **Error Code**: E1001
    ///
    /// **Common Causes**:
    /// - Target directory does not exist
    /// - Insufficient permissions
    /// - Disk full
    #[error("[E1001] I/O error: {0}")]
    Io(#[from] io::Error),

    /// XML writing error
    ///
    /// **Error Code**: E2005
    ///
    /// **Common Causes**:
    /// - Failed to serialize an XML event
    /// - I/O error during writing
    ///
    /// **Suggestions**:
    /// - Ensure the output stream is writable
    #[error("[E2005] XML writing error: {0}")]
    XmlWrite(String),
}

impl Error {
    /// Create an XmlWrite error
    ///
    /// # Arguments
    /// * `message` - Description of the writing error
    pub fn xml_write(message: String) -> Self {
        Error::XmlWrite(message)
    }
}
