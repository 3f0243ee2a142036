//! Client for the Banco Central do Brasil SGS time-series service

use crate::core::series::{FetchError, Observation, RateProvider, SeriesId};
use async_trait::async_trait;
use chrono::NaiveDate;
use serde::Deserialize;
use tracing::debug;

/// Number of samples requested; only the most recent one is wanted.
const LATEST_SAMPLES: usize = 1;

pub struct SgsProvider {
    base_url: String,
}

impl SgsProvider {
    pub fn new(base_url: &str) -> Self {
        SgsProvider {
            base_url: base_url.to_string(),
        }
    }

    /// Query for the most recent sample of `series` within `year`.
    fn series_url(&self, series: SeriesId, year: i32) -> String {
        format!(
            "{}/dados/serie/bcdata.sgs.{}/dados/ultimos/{}?formato=json&dataInicial=01/01/{}&dataFinal=31/12/{}",
            self.base_url, series, LATEST_SAMPLES, year, year
        )
    }
}

/// Wire shape of one SGS sample. The service publishes the value as a
/// string; it is parsed to a number before leaving this module.
#[derive(Debug, Deserialize)]
struct SgsEntry {
    data: String,
    valor: String,
}

impl SgsEntry {
    fn into_observation(self) -> Result<Observation, FetchError> {
        let date = NaiveDate::parse_from_str(&self.data, "%d/%m/%Y")
            .map_err(|e| FetchError::Parse(format!("bad date '{}': {}", self.data, e)))?;
        let value: f64 = self
            .valor
            .parse()
            .map_err(|e| FetchError::Parse(format!("bad value '{}': {}", self.valor, e)))?;
        Ok(Observation { date, value })
    }
}

#[async_trait]
impl RateProvider for SgsProvider {
    async fn fetch_latest(&self, series: SeriesId, year: i32) -> Result<Observation, FetchError> {
        let url = self.series_url(series, year);
        debug!("Requesting series data from {}", url);

        let client = reqwest::Client::builder()
            .user_agent("poupanca/0.1")
            .build()?;
        let response = client.get(&url).send().await?;

        if !response.status().is_success() {
            return Err(FetchError::Upstream(response.status()));
        }

        let body = response.text().await?;
        let entries: Vec<SgsEntry> = serde_json::from_str(&body)
            .map_err(|e| FetchError::Parse(format!("{e}; body: '{body}'")))?;

        let entry = entries
            .into_iter()
            .next()
            .ok_or_else(|| FetchError::Parse(format!("empty result for series {series}")))?;

        let observation = entry.into_observation()?;
        debug!(
            "Latest observation for series {}: {} = {}%",
            series, observation.date, observation.value
        );

        Ok(observation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    // Helper function to create a mock server for one SGS series
    async fn create_sgs_mock_server(
        series: u32,
        mock_response: &str,
        status_code: u16,
    ) -> MockServer {
        let mock_server = MockServer::start().await;
        let expected_path = format!("/dados/serie/bcdata.sgs.{series}/dados/ultimos/1");

        Mock::given(method("GET"))
            .and(path(&expected_path))
            .and(query_param("formato", "json"))
            .respond_with(ResponseTemplate::new(status_code).set_body_string(mock_response))
            .mount(&mock_server)
            .await;
        mock_server
    }

    #[tokio::test]
    async fn test_successful_fetch_parses_numeric_value() {
        let mock_response = r#"[{"data": "19/12/2022", "valor": "13.65"}]"#;
        let mock_server = create_sgs_mock_server(1178, mock_response, 200).await;

        let provider = SgsProvider::new(&mock_server.uri());
        let observation = provider
            .fetch_latest(SeriesId::SELIC_ACCUMULATED, 2022)
            .await
            .unwrap();

        assert_eq!(observation.value, 13.65);
        assert_eq!(
            observation.date,
            NaiveDate::from_ymd_opt(2022, 12, 19).unwrap()
        );
    }

    #[tokio::test]
    async fn test_request_carries_year_interval() {
        let mock_server = MockServer::start().await;
        let expected_path = "/dados/serie/bcdata.sgs.226/dados/ultimos/1";

        Mock::given(method("GET"))
            .and(path(expected_path))
            .and(query_param("formato", "json"))
            .and(query_param("dataInicial", "01/01/2024"))
            .and(query_param("dataFinal", "31/12/2024"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string(r#"[{"data": "30/12/2024", "valor": "0.88"}]"#),
            )
            .mount(&mock_server)
            .await;

        let provider = SgsProvider::new(&mock_server.uri());
        let observation = provider
            .fetch_latest(SeriesId::TR_ACCUMULATED, 2024)
            .await
            .unwrap();

        assert_eq!(observation.value, 0.88);
    }

    #[tokio::test]
    async fn test_upstream_error_status() {
        let mock_server = create_sgs_mock_server(1178, "Server Error", 500).await;

        let provider = SgsProvider::new(&mock_server.uri());
        let result = provider.fetch_latest(SeriesId::SELIC_ACCUMULATED, 2022).await;

        match result {
            Err(FetchError::Upstream(status)) => assert_eq!(status.as_u16(), 500),
            other => panic!("Expected Upstream error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_empty_result_array_is_parse_error() {
        let mock_server = create_sgs_mock_server(1178, "[]", 200).await;

        let provider = SgsProvider::new(&mock_server.uri());
        let result = provider.fetch_latest(SeriesId::SELIC_ACCUMULATED, 2022).await;

        match result {
            Err(FetchError::Parse(message)) => {
                assert!(message.contains("empty result for series 1178"), "{message}")
            }
            other => panic!("Expected Parse error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_non_numeric_value_is_parse_error() {
        let mock_response = r#"[{"data": "19/12/2022", "valor": "n/a"}]"#;
        let mock_server = create_sgs_mock_server(1178, mock_response, 200).await;

        let provider = SgsProvider::new(&mock_server.uri());
        let result = provider.fetch_latest(SeriesId::SELIC_ACCUMULATED, 2022).await;

        match result {
            Err(FetchError::Parse(message)) => {
                assert!(message.contains("bad value 'n/a'"), "{message}")
            }
            other => panic!("Expected Parse error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_unexpected_date_format_is_parse_error() {
        let mock_response = r#"[{"data": "2022-12-19", "valor": "13.65"}]"#;
        let mock_server = create_sgs_mock_server(1178, mock_response, 200).await;

        let provider = SgsProvider::new(&mock_server.uri());
        let result = provider.fetch_latest(SeriesId::SELIC_ACCUMULATED, 2022).await;

        match result {
            Err(FetchError::Parse(message)) => {
                assert!(message.contains("bad date '2022-12-19'"), "{message}")
            }
            other => panic!("Expected Parse error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_malformed_body_is_parse_error() {
        let mock_server = create_sgs_mock_server(1178, r#"{"not": "an array"}"#, 200).await;

        let provider = SgsProvider::new(&mock_server.uri());
        let result = provider.fetch_latest(SeriesId::SELIC_ACCUMULATED, 2022).await;

        assert!(matches!(result, Err(FetchError::Parse(_))));
    }

    #[tokio::test]
    async fn test_unreachable_host_is_network_error() {
        let provider = SgsProvider::new("http://127.0.0.1:1");
        let result = provider.fetch_latest(SeriesId::SELIC_ACCUMULATED, 2022).await;

        assert!(matches!(result, Err(FetchError::Network(_))));
    }
}
