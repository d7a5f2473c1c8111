//! Reading menu definitions and item lists.
//!
//! A menu definition is a YAML file providing any of the prompts, items,
//! default index and matching flags. Items can also be read one per line from
//! any reader, which is how piped input is handled.

use std::fs::File;
use std::io::BufRead;

use log::debug;
use serde::Deserialize;
use serde_yaml::Value;

use crate::config::{expand_path, parse_default_index, MatchOptions};
use crate::error::{Error, Result};

/// A menu described in a YAML file. Every field is optional.
#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
pub struct MenuDefinition {
    pub pre: Option<String>,
    pub post: Option<String>,
    #[serde(default)]
    pub items: Vec<String>,
    pub default_index: Option<Value>,
    #[serde(default)]
    pub indexed: bool,
    #[serde(default)]
    pub insensitive: bool,
    #[serde(default)]
    pub search: bool,
    #[serde(default)]
    pub fuzzy: bool,
}

impl MenuDefinition {
    /// The default index, if one is defined.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NonIntegerDefaultIndex`] if the value is not an
    /// integer (or a string holding one).
    pub fn default_index(&self) -> Result<Option<i64>> {
        match &self.default_index {
            None | Some(Value::Null) => Ok(None),
            Some(Value::Number(number)) => number
                .as_i64()
                .map(Some)
                .ok_or_else(|| Error::NonIntegerDefaultIndex(number.to_string())),
            Some(Value::String(text)) => parse_default_index(text).map(Some),
            Some(other) => Err(Error::NonIntegerDefaultIndex(format!("{other:?}"))),
        }
    }

    #[must_use]
    pub fn match_options(&self) -> MatchOptions {
        MatchOptions {
            indexed: self.indexed,
            case_insensitive: self.insensitive,
            search: self.search,
            fuzzy: self.fuzzy,
        }
    }
}

fn get_reader(file_description: &str, path: &str) -> Result<File> {
    File::open(path)
        .map_err(|e| Error::io_error(file_description.to_string(), path.to_string(), e))
}

/// Reads a menu definition from a YAML file. `~` in the path is expanded.
///
/// # Errors
///
/// Returns an error if the file cannot be opened or is not a valid menu
/// definition.
pub fn get_menu_definition(path: &str) -> Result<MenuDefinition> {
    let path = expand_path(path);
    debug!("Reading menu definition from `{path}`");

    let reader = get_reader("menu definition", &path)?;
    serde_yaml::from_reader(reader).map_err(|e| {
        Error::yaml_error(
            "reading".to_string(),
            "menu definition".to_string(),
            path.clone(),
            e,
        )
    })
}

/// Reads items one per line until the end of `reader`.
///
/// # Errors
///
/// Returns an error if reading fails.
pub fn read_items<R: BufRead>(reader: R) -> Result<Vec<String>> {
    let items = reader.lines().collect::<std::io::Result<Vec<String>>>()?;
    debug!("Read {} item line(s)", items.len());
    Ok(items)
}
