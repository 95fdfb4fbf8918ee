//! Where option lists come from

use std::collections::BTreeMap;
use std::future::Future;

use anyhow::Result;
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tracing::debug;
use url::Url;

use super::display_value;
use crate::config::EngineConfig;
use crate::error::OptionLoadError;
use crate::model::OptionConfig;

/// Produces an option list, possibly asynchronously
#[async_trait]
pub trait OptionSource: Send + Sync {
    /// Stable identity of this source. A loader fetches again only when it changes.
    fn identity(&self) -> String;

    async fn load(&self) -> Result<Vec<Value>>;
}

/// Options declared inline in the field list
#[derive(Debug, Clone, Default)]
pub struct StaticOptions {
    options: Vec<Value>,
}

impl StaticOptions {
    pub fn new(options: Vec<Value>) -> Self {
        Self { options }
    }
}

#[async_trait]
impl OptionSource for StaticOptions {
    fn identity(&self) -> String {
        format!("static:{}", Value::Array(self.options.clone()))
    }

    async fn load(&self) -> Result<Vec<Value>> {
        Ok(self.options.clone())
    }
}

/// Options produced by an async function supplied by the host
pub struct FnOptions<F> {
    identity: String,
    load: F,
}

impl<F> FnOptions<F> {
    pub fn new(identity: impl Into<String>, load: F) -> Self {
        Self {
            identity: identity.into(),
            load,
        }
    }
}

#[async_trait]
impl<F, Fut> OptionSource for FnOptions<F>
where
    F: Fn() -> Fut + Send + Sync,
    Fut: Future<Output = Result<Vec<Value>>> + Send,
{
    fn identity(&self) -> String {
        self.identity.clone()
    }

    async fn load(&self) -> Result<Vec<Value>> {
        (self.load)().await
    }
}

/// Options fetched as JSON with a GET request
#[derive(Debug, Clone)]
pub struct HttpOptions {
    client: Client,
    url: Url,
    response_path: Option<String>,
}

impl HttpOptions {
    pub fn new(client: Client, url: Url) -> Self {
        Self {
            client,
            url,
            response_path: None,
        }
    }

    pub fn with_response_path(mut self, path: impl Into<String>) -> Self {
        self.response_path = Some(path.into());
        self
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Build the source described by a field's option config, or `None` when
    /// the field has no `apiUrl`.
    ///
    /// `route_params` supplies the values that `urlParamMap` forwards as query
    /// parameters; unmapped or missing route parameters are skipped.
    pub fn from_config(
        config: &OptionConfig,
        route_params: &BTreeMap<String, String>,
        engine: &EngineConfig,
        client: Client,
    ) -> Result<Option<Self>, OptionLoadError> {
        let Some(api_url) = config.api_url.as_deref() else {
            return Ok(None);
        };

        let mut url = resolve_url(api_url, engine.api_base_url.as_ref())?;
        {
            let mut query = url.query_pairs_mut();
            for (name, value) in &config.query_params {
                query.append_pair(name, &display_value(value));
            }
            for (route_param, api_param) in &config.url_param_map {
                if let Some(value) = route_params.get(route_param) {
                    query.append_pair(api_param, value);
                }
            }
        }
        // drop a dangling '?' when nothing was appended
        if url.query() == Some("") {
            url.set_query(None);
        }

        Ok(Some(Self {
            client,
            url,
            response_path: config.response_path.clone(),
        }))
    }

    async fn fetch(&self) -> Result<Vec<Value>, OptionLoadError> {
        let url = self.url.to_string();
        debug!(%url, "fetching options");

        let response = self
            .client
            .get(self.url.clone())
            .send()
            .await
            .map_err(|source| OptionLoadError::Http {
                url: url.clone(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(OptionLoadError::Status {
                url,
                status: status.as_u16(),
            });
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| OptionLoadError::Decode {
                url: url.clone(),
                message: e.to_string(),
            })?;

        extract_options(body, self.response_path.as_deref())
    }
}

#[async_trait]
impl OptionSource for HttpOptions {
    fn identity(&self) -> String {
        format!("http:{}", self.url)
    }

    async fn load(&self) -> Result<Vec<Value>> {
        Ok(self.fetch().await?)
    }
}

fn resolve_url(api_url: &str, base: Option<&Url>) -> Result<Url, OptionLoadError> {
    let parsed = match (Url::parse(api_url), base) {
        (Ok(absolute), _) => Ok(absolute),
        (Err(url::ParseError::RelativeUrlWithoutBase), Some(base)) => base.join(api_url),
        (Err(e), _) => Err(e),
    };
    parsed.map_err(|source| OptionLoadError::Url {
        url: api_url.to_string(),
        source,
    })
}

/// Pull the option array out of a response body: at `path` (a JSON pointer)
/// when given, otherwise the body itself or its `data` member.
pub(crate) fn extract_options(
    body: Value,
    path: Option<&str>,
) -> Result<Vec<Value>, OptionLoadError> {
    let shape_error = |path: &str| OptionLoadError::Shape {
        path: path.to_string(),
    };

    match path {
        Some(pointer) => match body.pointer(pointer) {
            Some(Value::Array(items)) => Ok(items.clone()),
            _ => Err(shape_error(pointer)),
        },
        None => match body {
            Value::Array(items) => Ok(items),
            Value::Object(mut map) => match map.remove("data") {
                Some(Value::Array(items)) => Ok(items),
                _ => Err(shape_error("/data")),
            },
            _ => Err(shape_error("")),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_extract_plain_array() {
        let options = extract_options(json!(["a", "b"]), None).unwrap();
        assert_eq!(options, vec![json!("a"), json!("b")]);
    }

    #[test]
    fn test_extract_data_envelope() {
        let options = extract_options(json!({"data": [{"id": 1}], "total": 1}), None).unwrap();
        assert_eq!(options, vec![json!({"id": 1})]);
    }

    #[test]
    fn test_extract_with_pointer() {
        let body = json!({"result": {"items": [1, 2, 3]}});
        let options = extract_options(body.clone(), Some("/result/items")).unwrap();
        assert_eq!(options.len(), 3);
        assert!(matches!(
            extract_options(body, Some("/result")),
            Err(OptionLoadError::Shape { .. })
        ));
    }

    #[test]
    fn test_from_config_builds_query() {
        let config: OptionConfig = serde_json::from_value(json!({
            "apiUrl": "/api/users",
            "queryParams": {"role": "admin", "limit": 50},
            "urlParamMap": {"teamId": "team", "orgId": "org"}
        }))
        .unwrap();
        let engine = EngineConfig {
            api_base_url: Some(Url::parse("https://crm.example.com/").unwrap()),
            ..EngineConfig::default()
        };
        let route = BTreeMap::from([("teamId".to_string(), "42".to_string())]);

        let source = HttpOptions::from_config(&config, &route, &engine, Client::new())
            .unwrap()
            .unwrap();
        assert_eq!(
            source.url().as_str(),
            "https://crm.example.com/api/users?limit=50&role=admin&team=42"
        );
    }

    #[test]
    fn test_relative_url_without_base_is_an_error() {
        let config = OptionConfig {
            api_url: Some("/api/users".to_string()),
            ..Default::default()
        };
        let engine = EngineConfig {
            api_base_url: None,
            ..EngineConfig::default()
        };
        let result = HttpOptions::from_config(&config, &BTreeMap::new(), &engine, Client::new());
        assert!(matches!(result, Err(OptionLoadError::Url { .. })));
    }

    #[test]
    fn test_no_api_url_means_no_source() {
        let result = HttpOptions::from_config(
            &OptionConfig::default(),
            &BTreeMap::new(),
            &EngineConfig::default(),
            Client::new(),
        )
        .unwrap();
        assert!(result.is_none());
    }
}
