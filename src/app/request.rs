//! Endpoint and query-parameter handling for ad hoc requests.

use std::collections::HashMap;

use anyhow::{bail, Result};

/// Capitalizes the resource type segment of an endpoint.
///
/// `task/1` becomes `Task/1`; the rest of the path is left untouched.
pub fn normalize_endpoint(endpoint: &str) -> String {
    let endpoint = endpoint.trim_start_matches('/');
    let (resource_type, rest) = match endpoint.split_once('/') {
        Some((head, tail)) => (head, Some(tail)),
        None => (endpoint, None),
    };

    let mut chars = resource_type.chars();
    let mut normalized: String = match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    };
    if let Some(rest) = rest {
        normalized.push('/');
        normalized.push_str(rest);
    }
    normalized
}

/// Parses `key=value` pairs. A repeated key keeps its last value.
///
/// # Errors
///
/// Returns an error for a pair without `=` or with an empty key.
pub fn parse_query_params(pairs: &[String]) -> Result<HashMap<String, String>> {
    let mut params = HashMap::with_capacity(pairs.len());
    for pair in pairs {
        let Some((key, value)) = pair.split_once('=') else {
            bail!("invalid query param {pair:?}, expected key=value");
        };
        if key.is_empty() {
            bail!("invalid query param {pair:?}, empty key");
        }
        params.insert(key.to_string(), value.to_string());
    }
    Ok(params)
}
