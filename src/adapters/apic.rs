use crate::domain::model::{Credentials, QuerySpec, Session, Target};
use crate::domain::ports::{ConfigProvider, FabricApi};
use crate::utils::error::{FabricError, Result};
use async_trait::async_trait;
use reqwest::header::COOKIE;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

const SESSION_COOKIE: &str = "APIC-Cookie";

#[derive(Debug, Serialize)]
struct LoginRequest<'a> {
    #[serde(rename = "aaaUser")]
    aaa_user: LoginUser<'a>,
}

#[derive(Debug, Serialize)]
struct LoginUser<'a> {
    attributes: LoginAttributes<'a>,
}

#[derive(Debug, Serialize)]
struct LoginAttributes<'a> {
    name: &'a str,
    pwd: &'a str,
}

#[derive(Debug, Deserialize)]
struct LoginResponse {
    #[serde(default)]
    imdata: Vec<LoginItem>,
}

#[derive(Debug, Deserialize)]
struct LoginItem {
    #[serde(rename = "aaaLogin")]
    aaa_login: Option<LoginObject>,
}

#[derive(Debug, Deserialize)]
struct LoginObject {
    attributes: TokenAttributes,
}

#[derive(Debug, Deserialize)]
struct TokenAttributes {
    token: String,
}

/// `FabricApi` over HTTPS with a shared connection pool.
#[derive(Debug, Clone)]
pub struct ApicClient {
    client: Client,
}

impl ApicClient {
    pub fn new(verify_tls: bool, timeout: Option<Duration>) -> Result<Self> {
        let mut builder = Client::builder().danger_accept_invalid_certs(!verify_tls);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
        })
    }

    pub fn from_config<C: ConfigProvider>(config: &C) -> Result<Self> {
        Self::new(
            config.verify_tls(),
            config.request_timeout_seconds().map(Duration::from_secs),
        )
    }
}

#[async_trait]
impl FabricApi for ApicClient {
    async fn login(&self, target: &Target, credentials: &Credentials) -> Result<Session> {
        let url = format!("{}/aaaLogin.json", target.api_base());
        let payload = LoginRequest {
            aaa_user: LoginUser {
                attributes: LoginAttributes {
                    name: &credentials.username,
                    pwd: &credentials.password,
                },
            },
        };

        let response = self.client.post(&url).json(&payload).send().await?;
        let status = response.status();
        tracing::debug!("Requested URL: {}", url);
        tracing::debug!("Response Code: {}", status.as_u16());

        let body = response.text().await?;
        if !status.is_success() {
            tracing::error!("{}", body);
            return Err(FabricError::AuthenticationError {
                host: target.name.clone(),
                message: format!("HTTP {}", status.as_u16()),
            });
        }

        let parsed: LoginResponse =
            serde_json::from_str(&body).map_err(|e| FabricError::MalformedResponse {
                host: target.name.clone(),
                message: e.to_string(),
            })?;

        parsed
            .imdata
            .into_iter()
            .next()
            .and_then(|item| item.aaa_login)
            .map(|login| Session::new(login.attributes.token))
            .ok_or_else(|| FabricError::MalformedResponse {
                host: target.name.clone(),
                message: "login response carries no token".to_string(),
            })
    }

    async fn query(
        &self,
        target: &Target,
        session: &Session,
        query: &QuerySpec,
    ) -> Result<serde_json::Value> {
        let url = format!("{}{}", target.api_base(), query);
        let response = self
            .client
            .get(&url)
            .header(COOKIE, format!("{}={}", SESSION_COOKIE, session.token()))
            .send()
            .await?;

        let status = response.status();
        tracing::debug!("Requested URL: {}", url);
        tracing::debug!("Response Code: {}", status.as_u16());

        let body = response.text().await?;
        if !status.is_success() {
            tracing::error!("{}", body);
            return Err(FabricError::QueryError {
                host: target.name.clone(),
                status: status.as_u16(),
                message: body,
            });
        }

        let json: serde_json::Value =
            serde_json::from_str(&body).map_err(|e| FabricError::MalformedResponse {
                host: target.name.clone(),
                message: e.to_string(),
            })?;
        tracing::debug!(
            "{}",
            serde_json::to_string_pretty(&json).unwrap_or_default()
        );
        Ok(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::json;
    use url::Url;

    fn target(server: &MockServer) -> Target {
        Target::new("site-a", Url::parse(&server.base_url()).unwrap())
    }

    #[tokio::test]
    async fn test_login_posts_credentials_and_reads_token() {
        let server = MockServer::start();
        let login_mock = server.mock(|when, then| {
            when.method(POST)
                .path("/api/aaaLogin.json")
                .json_body(json!({"aaaUser": {"attributes": {"name": "admin", "pwd": "secret"}}}));
            then.status(200).json_body(json!({
                "totalCount": "1",
                "imdata": [{"aaaLogin": {"attributes": {"token": "tok-123"}}}]
            }));
        });

        let client = ApicClient::new(false, None).unwrap();
        let session = client
            .login(&target(&server), &Credentials::new("admin", "secret"))
            .await
            .unwrap();

        login_mock.assert();
        assert_eq!(session.token(), "tok-123");
    }

    #[tokio::test]
    async fn test_login_rejected_status() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/api/aaaLogin.json");
            then.status(401).json_body(json!({"imdata": [{"error": {"attributes": {"code": "401"}}}]}));
        });

        let client = ApicClient::new(false, None).unwrap();
        let err = client
            .login(&target(&server), &Credentials::new("admin", "wrong"))
            .await
            .unwrap_err();

        assert!(matches!(err, FabricError::AuthenticationError { .. }));
    }

    #[tokio::test]
    async fn test_login_without_token_is_malformed() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/api/aaaLogin.json");
            then.status(200).json_body(json!({"imdata": []}));
        });

        let client = ApicClient::new(false, None).unwrap();
        let err = client
            .login(&target(&server), &Credentials::new("admin", "secret"))
            .await
            .unwrap_err();

        assert!(matches!(err, FabricError::MalformedResponse { .. }));
    }

    #[tokio::test]
    async fn test_query_sends_session_cookie() {
        let server = MockServer::start();
        let query_mock = server.mock(|when, then| {
            when.method(GET)
                .path("/api/node/class/fvCEp.json")
                .query_param("rsp-subtree", "full")
                .header("Cookie", "APIC-Cookie=tok-123");
            then.status(200).json_body(json!({"totalCount": "0", "imdata": []}));
        });

        let client = ApicClient::new(false, None).unwrap();
        let body = client
            .query(
                &target(&server),
                &Session::new("tok-123"),
                &QuerySpec::new("/node/class/fvCEp.json?rsp-subtree=full"),
            )
            .await
            .unwrap();

        query_mock.assert();
        assert_eq!(body["totalCount"], "0");
    }

    #[tokio::test]
    async fn test_query_error_status_and_bad_json() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/api/node/class/fvCEp.json");
            then.status(403).body("forbidden");
        });
        server.mock(|when, then| {
            when.method(GET).path("/api/node/class/uribv4Route.json");
            then.status(200).body("<html>not json</html>");
        });

        let client = ApicClient::new(false, None).unwrap();
        let session = Session::new("tok");

        let err = client
            .query(&target(&server), &session, &QuerySpec::new("/node/class/fvCEp.json"))
            .await
            .unwrap_err();
        assert!(matches!(err, FabricError::QueryError { status: 403, .. }));

        let err = client
            .query(
                &target(&server),
                &session,
                &QuerySpec::new("/node/class/uribv4Route.json"),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, FabricError::MalformedResponse { .. }));
    }
}
