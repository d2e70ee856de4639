//! Endpoint Descriptors
//!
//! A descriptor names one backend operation: method, path template with
//! `{param}` placeholders, and the query parameters it accepts. Each
//! descriptor is bound to its schema and fallback through [`Endpoint`].

use serde::{de::DeserializeOwned, Serialize};

use super::fetched::Unavailable;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    pub fn as_reqwest(&self) -> reqwest::Method {
        match self {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Put => reqwest::Method::PUT,
            HttpMethod::Delete => reqwest::Method::DELETE,
        }
    }
}

impl std::fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HttpMethod::Get => write!(f, "GET"),
            HttpMethod::Post => write!(f, "POST"),
            HttpMethod::Put => write!(f, "PUT"),
            HttpMethod::Delete => write!(f, "DELETE"),
        }
    }
}

/// Static description of one backend operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EndpointDescriptor {
    pub name: &'static str,
    pub method: HttpMethod,
    pub path: &'static str,
    pub query: &'static [&'static str],
}

impl EndpointDescriptor {
    /// Placeholder names in the path template, in order
    pub fn path_params(&self) -> Vec<&'static str> {
        let mut names = Vec::new();
        let mut rest = self.path;
        while let Some(start) = rest.find('{') {
            let after = &rest[start + 1..];
            match after.find('}') {
                Some(end) => {
                    names.push(&after[..end]);
                    rest = &after[end + 1..];
                }
                None => break,
            }
        }
        names
    }

    /// Fill the path template and check query names against the descriptor
    pub fn render(&self, params: &Params) -> Result<String, Unavailable> {
        let mut path = String::with_capacity(self.path.len() + 8);
        let mut rest = self.path;

        while let Some(start) = rest.find('{') {
            path.push_str(&rest[..start]);
            let after = &rest[start + 1..];
            let end = after.find('}').ok_or_else(|| {
                Unavailable::InvalidRequest(format!("unterminated placeholder in {}", self.path))
            })?;
            let name = &after[..end];
            let value = params.path_value(name).ok_or_else(|| {
                Unavailable::InvalidRequest(format!(
                    "missing path parameter '{}' for {}",
                    name, self.name
                ))
            })?;
            path.push_str(&urlencoding::encode(value));
            rest = &after[end + 1..];
        }
        path.push_str(rest);

        if let Some((name, _)) = params
            .query
            .iter()
            .find(|(name, _)| !self.query.contains(name))
        {
            return Err(Unavailable::InvalidRequest(format!(
                "unexpected query parameter '{}' for {}",
                name, self.name
            )));
        }

        Ok(path)
    }
}

impl std::fmt::Display for EndpointDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.method, self.path)?;
        if !self.query.is_empty() {
            let query: Vec<String> = self.query.iter().map(|q| format!("{q}={{{q}}}")).collect();
            write!(f, "?{}", query.join("&"))?;
        }
        Ok(())
    }
}

/// Path and query values for one call
#[derive(Debug, Clone, Default)]
pub struct Params {
    path: Vec<(&'static str, String)>,
    query: Vec<(&'static str, String)>,
}

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn path(mut self, name: &'static str, value: impl ToString) -> Self {
        self.path.push((name, value.to_string()));
        self
    }

    pub fn query(mut self, name: &'static str, value: impl ToString) -> Self {
        self.query.push((name, value.to_string()));
        self
    }

    pub fn query_pairs(&self) -> &[(&'static str, String)] {
        &self.query
    }

    fn path_value(&self, name: &str) -> Option<&str> {
        self.path
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| v.as_str())
    }
}

/// Binds a descriptor to its request schema, response schema and fallback.
///
/// `fallback()` must return a value of the exact type a live success
/// decodes to; the shared `Response` type is what keeps the two aligned.
pub trait Endpoint {
    type Body: Serialize + Sync;
    type Response: DeserializeOwned + Send;

    const DESCRIPTOR: EndpointDescriptor;

    fn fallback() -> Self::Response;
}

#[cfg(test)]
mod tests {
    use super::*;

    const LEAD: EndpointDescriptor = EndpointDescriptor {
        name: "GetLead",
        method: HttpMethod::Get,
        path: "/api/leads/{id}",
        query: &[],
    };

    const REVENUE: EndpointDescriptor = EndpointDescriptor {
        name: "AttributedRevenue",
        method: HttpMethod::Get,
        path: "/api/attribution/revenue/{company_id}",
        query: &["model"],
    };

    #[test]
    fn test_render_path() {
        let path = LEAD.render(&Params::new().path("id", 42)).unwrap();
        assert_eq!(path, "/api/leads/42");
    }

    #[test]
    fn test_render_encodes_values() {
        let path = LEAD.render(&Params::new().path("id", "a/b c")).unwrap();
        assert_eq!(path, "/api/leads/a%2Fb%20c");
    }

    #[test]
    fn test_missing_path_param() {
        let err = LEAD.render(&Params::new()).unwrap_err();
        assert!(matches!(err, Unavailable::InvalidRequest(_)));
    }

    #[test]
    fn test_undeclared_query_param() {
        let params = Params::new().path("company_id", 1).query("limit", 5);
        assert!(REVENUE.render(&params).is_err());

        let params = Params::new().path("company_id", 1).query("model", "linear");
        assert_eq!(
            REVENUE.render(&params).unwrap(),
            "/api/attribution/revenue/1"
        );
    }

    #[test]
    fn test_path_params_and_display() {
        assert_eq!(REVENUE.path_params(), vec!["company_id"]);
        assert_eq!(
            REVENUE.to_string(),
            "GET /api/attribution/revenue/{company_id}?model={model}"
        );
    }
}
