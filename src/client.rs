// src/client.rs
use reqwest::{Client, Url};
use tracing::{info, warn};

use crate::error::{Error, Result};
use crate::models::WalletSnapshot;

/// Default address-lookup endpoint; the address is appended as the last path
/// segment.
pub const DEFAULT_API_URL: &str = "https://blockchain.info/rawaddr";

/// Read-only client for the ledger address API.
///
/// Every `fetch` is one independent GET: no retries, no caching.
#[derive(Debug, Clone)]
pub struct LedgerClient {
    http: Client,
    base_url: String,
}

impl LedgerClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `{base_url}/{address}` with the address percent-encoded as a single
    /// path segment.
    fn address_url(&self, address: &str) -> Result<Url> {
        let mut url = Url::parse(&self.base_url).map_err(|e| {
            Error::InvalidRequest(format!("invalid ledger API url {}: {}", self.base_url, e))
        })?;
        url.path_segments_mut()
            .map_err(|_| {
                Error::InvalidRequest(format!("ledger API url {} cannot take a path", self.base_url))
            })?
            .pop_if_empty()
            .push(address);
        Ok(url)
    }

    /// Fetch the transaction history of `address`.
    pub async fn fetch(&self, address: &str) -> Result<WalletSnapshot> {
        let address = address.trim();
        if address.is_empty() {
            return Err(Error::InvalidRequest("address must not be empty".into()));
        }

        let url = self.address_url(address)?;
        info!("📡 GET {}", url);

        let resp = self.http.get(url).send().await?;
        let resp = resp.error_for_status().inspect_err(|e| {
            warn!("Ledger API rejected {}: {}", address, e);
        })?;
        let text = resp.text().await?;

        let snapshot: WalletSnapshot = serde_json::from_str(&text).inspect_err(|e| {
            warn!("Unparseable ledger payload for {}: {}", address, e);
        })?;
        info!(
            "📩 Decoded {} transactions for {} (final balance {})",
            snapshot.txs.len(),
            address,
            snapshot.final_balance
        );

        Ok(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{sample_payload, t0};
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn client_for(server: &MockServer) -> LedgerClient {
        LedgerClient::new(format!("{}/rawaddr/", server.uri()))
    }

    #[tokio::test]
    async fn decodes_rawaddr_payload() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/rawaddr/1SampleAddr"))
            .respond_with(ResponseTemplate::new(200).set_body_json(sample_payload()))
            .expect(1)
            .mount(&server)
            .await;

        let snap = client_for(&server).await.fetch("1SampleAddr").await.unwrap();
        assert_eq!(snap.final_balance, 300);
        assert_eq!(snap.n_tx, Some(3));
        assert_eq!(snap.txs.len(), 3);
        assert_eq!(snap.txs[0].time, t0());
        assert_eq!(snap.txs[0].inputs[0].address(), Some("1Funder"));
        assert_eq!(snap.txs[2].inputs[0].address(), None);
        assert_eq!(snap.txs[2].outputs[0].addr, None);
        assert_eq!(snap.txs[1].outputs[1].value, 50);
    }

    #[tokio::test]
    async fn address_is_sent_as_one_encoded_segment() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/rawaddr/1Ab%3Fc%23d%2Fe"))
            .respond_with(ResponseTemplate::new(200).set_body_json(sample_payload()))
            .expect(1)
            .mount(&server)
            .await;

        let snap = client_for(&server).await.fetch("1Ab?c#d/e").await.unwrap();
        assert_eq!(snap.txs.len(), 3);
    }

    #[test]
    fn address_url_keeps_base_path() {
        let client = LedgerClient::new("https://blockchain.info/rawaddr/");
        let url = client.address_url("1Abc").unwrap();
        assert_eq!(url.as_str(), "https://blockchain.info/rawaddr/1Abc");

        let root = LedgerClient::new("http://localhost:9000");
        assert_eq!(root.address_url("1Abc").unwrap().as_str(), "http://localhost:9000/1Abc");
    }

    #[tokio::test]
    async fn unusable_base_url_is_rejected() {
        let err = LedgerClient::new("not a url").fetch("1Abc").await.unwrap_err();
        assert!(matches!(err, Error::InvalidRequest(_)), "got {err:?}");
    }

    #[tokio::test]
    async fn http_error_status_is_fetch_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(429))
            .mount(&server)
            .await;

        let err = client_for(&server).await.fetch("1SampleAddr").await.unwrap_err();
        assert!(matches!(err, Error::Fetch(_)), "got {err:?}");
    }

    #[tokio::test]
    async fn unreachable_host_is_fetch_error() {
        let client = LedgerClient::new("http://127.0.0.1:1/rawaddr");
        let err = client.fetch("1SampleAddr").await.unwrap_err();
        assert!(matches!(err, Error::Fetch(_)), "got {err:?}");
    }

    #[tokio::test]
    async fn missing_required_field_is_parse_error() {
        let server = MockServer::start().await;
        let mut payload = sample_payload();
        payload.as_object_mut().unwrap().remove("final_balance");
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(payload))
            .mount(&server)
            .await;

        let err = client_for(&server).await.fetch("1SampleAddr").await.unwrap_err();
        assert!(matches!(err, Error::Parse(_)), "got {err:?}");
    }

    #[tokio::test]
    async fn non_json_body_is_parse_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("Maintenance"))
            .mount(&server)
            .await;

        let err = client_for(&server).await.fetch("1SampleAddr").await.unwrap_err();
        assert!(matches!(err, Error::Parse(_)), "got {err:?}");
    }

    #[tokio::test]
    async fn empty_address_never_hits_the_network() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let err = client_for(&server).await.fetch("   ").await.unwrap_err();
        assert!(matches!(err, Error::InvalidRequest(_)));
    }
}
