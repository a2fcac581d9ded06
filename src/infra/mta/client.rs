use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::config::Config;
use crate::fetch::auth::ApiKey;
use crate::fetch::{BasicClient, HttpClient, fetch_bytes};
use crate::parser::parse_feed;
use crate::station::{DirectionSuffixes, FeedUpdate};

/// Fetches one subway feed and reshapes it into the station view.
pub struct FeedClient<C> {
    client: C,
    url: String,
    suffixes: DirectionSuffixes,
}

impl FeedClient<ApiKey<BasicClient>> {
    /// Builds a client that sends `config.api_key` as `x-api-key`.
    pub fn from_config(config: &Config) -> Result<Self> {
        let client = ApiKey::x_api_key(BasicClient::new()?, &config.api_key)?;
        Ok(Self::with_client(client, config.feed_url(), config.suffixes()))
    }
}

impl<C: HttpClient> FeedClient<C> {
    pub fn with_client(client: C, url: String, suffixes: DirectionSuffixes) -> Self {
        Self {
            client,
            url,
            suffixes,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Fetches and decodes the current snapshot, then builds the station view.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, the feed answers with a
    /// non-success status, or the body is not a valid `FeedMessage`.
    #[tracing::instrument(skip(self), fields(url = %self.url))]
    pub async fn get_feed(&self) -> Result<FeedUpdate> {
        let bytes = fetch_bytes(&self.client, &self.url)
            .await
            .context("fetching realtime feed")?;
        let feed = parse_feed(&bytes)?;
        debug!(entity_count = feed.entity.len(), "Feed parsed successfully");

        let update = FeedUpdate::from_feed_with(&feed, &self.suffixes);
        info!(
            stations = update.station_status.len(),
            alerts = update.alerts.len(),
            "Feed update ready"
        );
        Ok(update)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::tests::Recorder;
    use crate::gtfs_rt::alert::Effect;
    use crate::station::fixtures::*;
    use prost::Message;

    fn client_for(body: Vec<u8>) -> FeedClient<ApiKey<Recorder>> {
        let client = ApiKey::x_api_key(Recorder::ok(body), "secret").unwrap();
        FeedClient::with_client(
            client,
            "http://feed.test/nyct%2Fgtfs-7".to_string(),
            DirectionSuffixes::default(),
        )
    }

    #[test]
    fn test_from_config_uses_feed_url() {
        let config = Config {
            api_key: "secret".to_string(),
            feed_id: "ace".to_string(),
            direction_suffixes: vec!['N', 'S'],
        };

        let client = FeedClient::from_config(&config).unwrap();

        assert_eq!(client.url(), config.feed_url());
    }

    #[tokio::test]
    async fn test_get_feed_reshapes_snapshot() {
        let body = feed(vec![
            trip_entity("1", Some("7-a"), vec![stop("723N", T + 120, T + 150)]),
            trip_entity("2", Some("7-b"), vec![stop("723N", T + 60, T + 90)]),
            trip_entity("3", Some("7-c"), vec![stop("723S", T + 30, T + 40)]),
            alert_entity("4", Effect::ReducedService, &["", "Fewer trains"]),
        ])
        .encode_to_vec();
        let client = client_for(body);

        let update = client.get_feed().await.unwrap();

        let station = update.station("723").unwrap();
        let north: Vec<_> = station
            .direction("723N")
            .unwrap()
            .iter()
            .map(|u| u.trip_id.as_str())
            .collect();
        assert_eq!(north, vec!["7-b", "7-a"]);
        assert_eq!(station.direction("723S").unwrap().len(), 1);
        assert_eq!(update.alerts[0].header, "Fewer trains");

        let headers = client.client.inner().seen_headers();
        assert_eq!(headers.get("x-api-key").unwrap(), "secret");
    }

    #[tokio::test]
    async fn test_get_feed_fails_on_garbage() {
        let client = client_for(vec![0xFF, 0xFE, 0x00, 0x01]);

        assert!(client.get_feed().await.is_err());
    }
}
