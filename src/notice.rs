//! Modal notices shown to the user

/// Default notice title
pub const ERROR_TITLE: &str = "Error";
pub const SUCCESS_TITLE: &str = "Success";

pub const TOO_FEW_FILES: &str = "Please choose at least two pdf files";
pub const BLANK_FILE_NAME: &str = "Please enter a file name";
pub const COMBINED: &str = "PDFs successfully combined";

/// A single message with a title, dismissed with "Ok"
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub title: String,
    pub message: String,
}

impl Notice {
    pub fn new(message: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
        }
    }

    /// Notice with the default "Error" title
    pub fn error(message: impl Into<String>) -> Self {
        Self::new(message, ERROR_TITLE)
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(message, SUCCESS_TITLE)
    }

    pub fn is_error(&self) -> bool {
        self.title == ERROR_TITLE
    }
}
