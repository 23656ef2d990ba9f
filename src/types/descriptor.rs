//! Call descriptors
//!
//! The structured `METHOD /path` answer produced for every question.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::constants::classify::FALLBACK_PATH;

/// HTTP methods accepted in a call descriptor
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
    Patch,
}

impl HttpMethod {
    pub const ALL: [HttpMethod; 5] = [
        HttpMethod::Get,
        HttpMethod::Post,
        HttpMethod::Put,
        HttpMethod::Delete,
        HttpMethod::Patch,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Patch => "PATCH",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl std::str::FromStr for HttpMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "GET" => Ok(HttpMethod::Get),
            "POST" => Ok(HttpMethod::Post),
            "PUT" => Ok(HttpMethod::Put),
            "DELETE" => Ok(HttpMethod::Delete),
            "PATCH" => Ok(HttpMethod::Patch),
            _ => Err(format!(
                "Unknown HTTP method: {}. Valid values: GET, POST, PUT, DELETE, PATCH",
                s
            )),
        }
    }
}

/// Classification result: which API call answers a question
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CallDescriptor {
    pub method: HttpMethod,
    pub path: String,
}

impl CallDescriptor {
    pub fn new(method: HttpMethod, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
        }
    }

    /// `GET /v1/assets`, used whenever classification cannot complete
    pub fn fallback() -> Self {
        Self::new(HttpMethod::Get, FALLBACK_PATH)
    }

    pub fn is_fallback(&self) -> bool {
        self.method == HttpMethod::Get && self.path == FALLBACK_PATH
    }
}

impl Default for CallDescriptor {
    fn default() -> Self {
        Self::fallback()
    }
}

impl fmt::Display for CallDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.method, self.path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_method_from_str_case_insensitive() {
        assert_eq!("get".parse::<HttpMethod>().unwrap(), HttpMethod::Get);
        assert_eq!(" Delete ".parse::<HttpMethod>().unwrap(), HttpMethod::Delete);
        assert_eq!("PATCH".parse::<HttpMethod>().unwrap(), HttpMethod::Patch);
        assert!("FETCH".parse::<HttpMethod>().is_err());
    }

    #[test]
    fn test_method_display_roundtrips_all() {
        for method in HttpMethod::ALL {
            assert_eq!(method.to_string().parse::<HttpMethod>().unwrap(), method);
        }
    }

    #[test]
    fn test_fallback_descriptor() {
        let fallback = CallDescriptor::fallback();
        assert_eq!(fallback.method, HttpMethod::Get);
        assert_eq!(fallback.path, "/v1/assets");
        assert!(fallback.is_fallback());
        assert_eq!(CallDescriptor::default(), fallback);
        assert_eq!(fallback.to_string(), "GET /v1/assets");
    }

    #[test]
    fn test_serde_uses_uppercase() {
        let json = serde_json::to_string(&HttpMethod::Post).unwrap();
        assert_eq!(json, "\"POST\"");
    }
}
