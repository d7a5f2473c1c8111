use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("The item list is empty.")]
    EmptyItemList,

    #[error("The default index ({}) >= length of the list ({})", .index, .len)]
    DefaultIndexOutOfRange { index: i64, len: usize },

    #[error("The default index ({}) < 0.", _0)]
    NegativeDefaultIndex(i64),

    #[error("The default index ({}) is not an integer", _0)]
    NonIntegerDefaultIndex(String),

    #[error("The default index ({}) points to an empty item.", _0)]
    EmptyDefaultItem(usize),

    #[error("Error {} {} file at `{}`: {}", .action, .file_description, .path, .original)]
    Yaml {
        action: String,
        file_description: String,
        path: String,
        original: serde_yaml::Error,
    },

    #[error("IO error with {} file at path `{}`: {}", .file_description, .path, .original)]
    Io {
        file_description: String,
        path: String,
        original: std::io::Error,
    },

    #[error("STDIO error: {}", .0)]
    Stdio(#[from] std::io::Error),

    #[error("The input was closed before a choice was made.")]
    EndOfInput,

    #[error("Interrupted while waiting for a response.")]
    Interrupted,
}

impl Error {
    pub fn yaml_error(
        action: String,
        file_description: String,
        path: String,
        original: serde_yaml::Error,
    ) -> Self {
        Self::Yaml {
            action,
            file_description,
            path,
            original,
        }
    }

    pub fn io_error(file_description: String, path: String, original: std::io::Error) -> Self {
        Self::Io {
            file_description,
            path,
            original,
        }
    }

    /// Whether this error belongs to the configuration class: raised while
    /// setting a menu up, before any prompting happens.
    #[must_use]
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            Error::EmptyItemList
                | Error::DefaultIndexOutOfRange { .. }
                | Error::NegativeDefaultIndex(_)
                | Error::NonIntegerDefaultIndex(_)
                | Error::EmptyDefaultItem(_)
                | Error::Yaml { .. }
                | Error::Io { .. }
        )
    }
}
