//! Error types for the PDSC picker.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while locating, parsing or presenting a `.pdsc` file.
///
/// The `Display` text of each variant is the message shown to the user.
#[derive(Error, Debug)]
pub enum Error {
    /// No workspace folder is open
    #[error("Please open a workspace first")]
    NoWorkspaceOpen,

    /// The description file does not exist at the expected location
    #[error(
        "The {} file does not exist at: {}",
        .0.file_name().unwrap_or_default().to_string_lossy(),
        .0.display()
    )]
    FileNotFound(PathBuf),

    /// XML parsing error
    #[error("Failed to parse the .pdsc file: {0}")]
    XmlParse(#[from] quick_xml::Error),

    /// XML attribute parsing error
    #[error("Failed to parse the .pdsc file: {0}")]
    XmlAttribute(#[from] quick_xml::events::attributes::AttrError),

    /// Document is well-formed at the token level but not as a tree
    #[error("Failed to parse the .pdsc file: {0}")]
    MalformedXml(String),

    /// UTF-8 conversion error
    #[error("Failed to parse the .pdsc file: {0}")]
    Utf8(#[from] std::str::Utf8Error),

    /// Root element is not `package`
    #[error("Invalid .pdsc file: Missing package element")]
    MissingPackageElement,

    /// `package` has no `devices` child
    #[error("Invalid .pdsc file: Missing devices element")]
    MissingDevicesElement,

    /// `devices` has no `family` child
    #[error("Invalid .pdsc file: Missing family element")]
    MissingFamilyElement,

    /// Every family was empty
    #[error("No subfamilies found in the .pdsc file")]
    NoSubFamiliesFound,

    /// A labelled element lacks its label attribute
    #[error("Invalid .pdsc file: {element} element is missing the {attribute} attribute")]
    MissingAttribute {
        /// Element that was missing the attribute
        element: &'static str,
        /// Name of the missing attribute
        attribute: &'static str,
    },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Returns true for structural validation failures of a parsed document.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Error::MissingPackageElement
                | Error::MissingDevicesElement
                | Error::MissingFamilyElement
                | Error::NoSubFamiliesFound
                | Error::MissingAttribute { .. }
        )
    }
}

/// Result type alias for PDSC picker operations.
pub type Result<T> = std::result::Result<T, Error>;
