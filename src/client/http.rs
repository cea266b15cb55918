use std::sync::Arc;

use reqwest::{header, Client, Method, RequestBuilder};
use serde::{de::DeserializeOwned, Serialize};

use crate::model::auth::MessageResponse;
use crate::model::config::ClientConfig;
use crate::model::error::ApiError;
use crate::{model, SessionStore};

/// Outbound side of the client: joins paths onto the server uri, attaches the
/// bearer credential and turns every failure into an [`ApiError`].
pub struct HttpClient {
    config: ClientConfig,
    session: Arc<dyn SessionStore + Send + Sync>,
    client: Client,
}

impl HttpClient {
    pub fn new(
        config: ClientConfig,
        session: Arc<dyn SessionStore + Send + Sync>,
    ) -> anyhow::Result<Self> {
        tracing::debug!(url = config.base_url.as_str(), timeout = ?config.timeout, "init http client");
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(HttpClient {
            config,
            session,
            client,
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub async fn get<T>(&self, path: &str) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
    {
        self.call(Method::GET, path, None::<&()>).await
    }

    pub async fn post<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        self.call(Method::POST, path, Some(body)).await
    }

    pub async fn put<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        self.call(Method::PUT, path, Some(body)).await
    }

    pub async fn delete<T>(&self, path: &str) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
    {
        self.call(Method::DELETE, path, None::<&()>).await
    }

    async fn call<B, T>(&self, method: Method, path: &str, body: Option<&B>) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        let response_body = self.call_int(method.clone(), path, body).await.map_err(|e| {
            tracing::warn!(method = %method, path, err = %e, "call failed");
            e
        })?;
        decode_body(&response_body).map_err(|e| {
            tracing::warn!(method = %method, path, err = %e, "can't decode response");
            e
        })
    }

    async fn call_int<B>(&self, method: Method, path: &str, body: Option<&B>) -> Result<String, ApiError>
    where
        B: Serialize + ?Sized + Sync,
    {
        let url = self.config.url(path);
        tracing::debug!(method = %method, url, "call");
        let mut request = self.client.request(method, &url);
        request = self.authorize(request).await;
        if let Some(body) = body {
            request = request.json(body);
        }
        let response = request.send().await?;
        let status = response.status();
        let response_body = response.text().await?;
        tracing::trace!(status = status.as_u16(), len = response_body.len(), "response");
        if !status.is_success() {
            let message = serde_json::from_str::<MessageResponse>(&response_body)
                .ok()
                .and_then(|m| m.message);
            return Err(ApiError::from_status(status, message));
        }
        Ok(response_body)
    }

    async fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match self.session.get().await {
            Ok(data) => request.header(header::AUTHORIZATION, data.bearer()),
            Err(model::store::Error::NoSession()) => request,
            Err(e) => {
                tracing::warn!(err = %e, "can't read session, calling without credential");
                request
            }
        }
    }
}

fn decode_body<T>(body: &str) -> Result<T, ApiError>
where
    T: DeserializeOwned,
{
    let body = if body.trim().is_empty() { "null" } else { body };
    serde_json::from_str(body).map_err(|e| ApiError::Decode(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(serde::Deserialize, Debug, PartialEq)]
    struct Data {
        data: Vec<u32>,
    }

    #[test]
    fn test_decode_body() {
        let res: Data = decode_body(r#"{"data": [1, 2], "success": true}"#).unwrap();
        assert_eq!(res, Data { data: vec![1, 2] });
    }

    #[test]
    fn test_decode_empty_body() {
        let res: serde_json::Value = decode_body("").unwrap();
        assert_eq!(res, serde_json::Value::Null);
        let res: Option<Data> = decode_body("  ").unwrap();
        assert_eq!(res, None);
    }

    #[test]
    fn test_decode_wrong_body() {
        let res = decode_body::<Data>("<html>");
        assert!(matches!(res, Err(ApiError::Decode(_))));
    }
}
