// crates/flagtable-core/src/loader/directory.rs
use crate::error::DirectoryLoadError;
use crate::fetch::FetchRequest;
use crate::model::{Country, Directory};
use crate::traits::Fetch;
use log::{info, warn};
use serde_json::Value;
use std::time::Duration;

pub const DIRECTORY_TIMEOUT: Duration = Duration::from_secs(10);

/// Where the code → name mapping lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectorySource {
    pub url: String,
    pub timeout: Duration,
}

impl DirectorySource {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            timeout: DIRECTORY_TIMEOUT,
        }
    }

    /// `<base>/<locale>/codes.json`, e.g. `https://flagcdn.com/pl/codes.json`.
    pub fn for_locale(base: &str, locale: &str) -> Self {
        Self::new(format!("{}/{locale}/codes.json", base.trim_end_matches('/')))
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn request(&self) -> FetchRequest {
        FetchRequest::get(&self.url)
            .timeout(self.timeout)
            .header("Content-Type", "application/json")
    }
}

/// Fetches and parses the whole directory. Either every entry parses or
/// the load fails; there is no partial result.
pub fn load_directory<F: Fetch + ?Sized>(
    fetcher: &F,
    source: &DirectorySource,
) -> Result<Directory, DirectoryLoadError> {
    info!("Loading country directory from {}", source.url);

    let response = fetcher.fetch(&source.request())?;
    if !response.is_success() {
        // The body is still handed to the parser; an error page will fail there.
        warn!(
            "Directory endpoint {} answered with status {}",
            source.url,
            response.status()
        );
    }

    let text = response.into_text()?;
    let directory = parse_directory(&text)?;
    info!("Loaded {} countries", directory.len());
    Ok(directory)
}

/// Parses a flat JSON object of `code -> name` pairs, keeping source order.
pub fn parse_directory(json: &str) -> Result<Directory, DirectoryLoadError> {
    let value: Value = serde_json::from_str(json)?;
    let map = match value {
        Value::Object(map) => map,
        other => {
            return Err(DirectoryLoadError::NotAnObject {
                found: json_type_name(&other),
            })
        }
    };

    let mut countries = Vec::with_capacity(map.len());
    for (code, name) in map {
        let name = match name {
            Value::String(s) => s,
            _ => return Err(DirectoryLoadError::NonStringName { code }),
        };
        if code.trim().is_empty() {
            return Err(DirectoryLoadError::EmptyCode);
        }
        if name.trim().is_empty() {
            return Err(DirectoryLoadError::EmptyName { code });
        }
        countries.push(Country::new(name, code));
    }

    Ok(countries)
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
