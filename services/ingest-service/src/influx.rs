use reqwest::{
    header::{AUTHORIZATION, CONTENT_TYPE},
    Client, StatusCode,
};

use crate::config::InfluxConfig;

#[derive(Debug, thiserror::Error)]
pub enum ForwardError {
    #[error("Request failed with status code {}", .status.as_u16())]
    Status { status: StatusCode, body: String },

    #[error("{0}")]
    Transport(#[from] reqwest::Error),
}

/// Posts line protocol to an InfluxDB v2 `/api/v2/write` endpoint.
pub struct InfluxWriter {
    client: Client,
    write_url: String,
    org: String,
    bucket: String,
    auth_header: String,
}

impl InfluxWriter {
    pub fn new(config: &InfluxConfig) -> Result<Self, reqwest::Error> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
            write_url: format!("{}/api/v2/write", config.url.trim_end_matches('/')),
            org: config.org.clone(),
            bucket: config.bucket.clone(),
            auth_header: format!("Token {}", config.token),
        })
    }

    /// One request, no retry. Any 2xx is success.
    pub async fn write(&self, payload: String) -> Result<(), ForwardError> {
        let response = self
            .client
            .post(&self.write_url)
            .query(&[
                ("org", self.org.as_str()),
                ("bucket", self.bucket.as_str()),
                ("precision", "ms"),
            ])
            .header(CONTENT_TYPE, "text/plain")
            .header(AUTHORIZATION, &self.auth_header)
            .body(payload)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ForwardError::Status { status, body });
        }

        tracing::debug!(status = %status, "influx write accepted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::{Matcher, Server};
    use std::time::Duration;

    fn config(url: String) -> InfluxConfig {
        InfluxConfig {
            url,
            org: "some-org".to_string(),
            bucket: "some-bucket".to_string(),
            token: "some-token".to_string(),
            timeout: None,
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 1)]
    async fn posts_payload_with_query_and_headers() {
        let mut mock_server = Server::new_async().await;
        let mock = mock_server
            .mock("POST", "/api/v2/write")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("org".into(), "some-org".into()),
                Matcher::UrlEncoded("bucket".into(), "some-bucket".into()),
                Matcher::UrlEncoded("precision".into(), "ms".into()),
            ]))
            .match_header("Authorization", "Token some-token")
            .match_header("Content-Type", "text/plain")
            .match_body("current value=1 1000")
            .with_status(204)
            .expect(1)
            .create_async()
            .await;

        // Trailing slash on the base URL must not double up.
        let writer = InfluxWriter::new(&config(format!("{}/", mock_server.url()))).unwrap();
        let result = writer.write("current value=1 1000".to_string()).await;

        mock.assert_async().await;
        assert!(result.is_ok());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 1)]
    async fn non_success_status_is_an_error() {
        let mut mock_server = Server::new_async().await;
        let mock = mock_server
            .mock("POST", "/api/v2/write")
            .match_query(Matcher::Any)
            .with_status(401)
            .with_body(r#"{"code":"unauthorized","message":"unauthorized access"}"#)
            .create_async()
            .await;

        let writer = InfluxWriter::new(&config(mock_server.url())).unwrap();
        let err = writer.write(String::new()).await.unwrap_err();

        mock.assert_async().await;
        match &err {
            ForwardError::Status { status, body } => {
                assert_eq!(*status, StatusCode::UNAUTHORIZED);
                assert!(body.contains("unauthorized access"));
            }
            other => panic!("expected status error, got {other:?}"),
        }
        assert_eq!(err.to_string(), "Request failed with status code 401");
    }

    #[tokio::test]
    async fn unreachable_downstream_is_a_transport_error() {
        let writer = InfluxWriter::new(&config("http://127.0.0.1:1".to_string())).unwrap();
        let err = writer.write("current value=1 1".to_string()).await.unwrap_err();
        assert!(matches!(err, ForwardError::Transport(_)));
        assert!(!err.to_string().is_empty());
    }

    #[tokio::test]
    async fn configured_timeout_bounds_the_wait() {
        // Accepts the connection and never answers.
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let hold = tokio::spawn(async move {
            let (socket, _) = listener.accept().await.unwrap();
            tokio::time::sleep(Duration::from_secs(30)).await;
            drop(socket);
        });

        let mut config = config(format!("http://{addr}"));
        config.timeout = Some(Duration::from_millis(200));
        let writer = InfluxWriter::new(&config).unwrap();
        let err = writer.write("current value=1 1".to_string()).await.unwrap_err();

        match err {
            ForwardError::Transport(source) => assert!(source.is_timeout()),
            other => panic!("expected timeout, got {other:?}"),
        }
        hold.abort();
    }
}
