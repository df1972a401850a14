use std::fmt::Display;

/// Query parameters for a catalog request.
///
/// Repeated keys are allowed (`includes[]=a&includes[]=b`). Serialisation sorts
/// pairs by key and value, so the same set of parameters always produces the
/// same string regardless of the order they were added in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace every value of `key` with a single value
    pub fn set(&mut self, key: &str, value: impl Display) -> &mut Self {
        self.pairs.retain(|(k, _)| k != key);
        self.append(key, value)
    }

    pub fn append(&mut self, key: &str, value: impl Display) -> &mut Self {
        self.pairs.push((key.to_string(), value.to_string()));
        self
    }

    pub fn append_all<I, V>(&mut self, key: &str, values: I) -> &mut Self
    where
        I: IntoIterator<Item = V>,
        V: Display,
    {
        for value in values {
            self.append(key, value);
        }
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn get_all(&self, key: &str) -> Vec<&str> {
        self.pairs
            .iter()
            .filter(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Percent-encoded `k=v&k=v` string in canonical order
    pub fn to_query_string(&self) -> String {
        let mut pairs: Vec<&(String, String)> = self.pairs.iter().collect();
        pairs.sort();

        pairs
            .into_iter()
            .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&")
    }
}

/// Fully-qualified request URL, used as the identity for caching and dedup
pub fn build_resource_key(base_url: &str, endpoint: &str, params: Option<&QueryParams>) -> String {
    let base = format!("{}{}", base_url.trim_end_matches('/'), endpoint);
    match params {
        Some(params) if !params.is_empty() => format!("{}?{}", base, params.to_query_string()),
        _ => base,
    }
}
