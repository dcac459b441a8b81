// Raw request parameters

use anyhow::Result;

/// Query parameters in request order. Repeated keys are kept; lookups see
/// the first occurrence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchParams {
    pairs: Vec<(String, String)>,
}

pub const PAGE_PARAM: &str = "page";

impl SearchParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        Self { pairs }
    }

    /// Parse `key=value` arguments as given on the command line
    pub fn parse_cli(args: &[String]) -> Result<Self> {
        let mut pairs = Vec::with_capacity(args.len());
        for arg in args {
            match arg.split_once('=') {
                Some((key, value)) if !key.is_empty() => {
                    pairs.push((key.to_string(), value.to_string()))
                }
                _ => anyhow::bail!("Invalid filter '{}', expected key=value", arg),
            }
        }
        Ok(Self { pairs })
    }

    pub fn with(mut self, key: &str, value: &str) -> Self {
        self.pairs.push((key.to_string(), value.to_string()));
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Requested page. Absent or unparsable values mean page 1; the range is
    /// left to the search service.
    pub fn page(&self) -> i64 {
        self.get(PAGE_PARAM)
            .and_then(|p| p.trim().parse::<i64>().ok())
            .unwrap_or(1)
    }

    /// Non-blank values of `fields`, as a flat `key, value, ...` list in
    /// field order. Used to carry the active filters into navigation links.
    pub fn active_filters(&self, fields: &[&str]) -> Vec<String> {
        let mut flat = Vec::new();
        for field in fields {
            if let Some(value) = crate::search::non_blank(self.get(field)) {
                flat.push(field.to_string());
                flat.push(value.to_string());
            }
        }
        flat
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}
