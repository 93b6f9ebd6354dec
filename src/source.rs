use std::{fmt, sync::Arc, time::Duration};

use reqwest::{StatusCode, header::CACHE_CONTROL};
use serde::Serialize;
use tracing::{debug, warn};

use crate::codec;
use crate::config::Config;
use crate::error::{ExchangeError, ExchangeResult};
use crate::exchange::LookupTable;
use crate::snapshot::SnapshotDocument;
use crate::store::ExchangeStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Origin {
    Remote,
    Local,
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Origin::Remote => f.write_str("remote snapshot"),
            Origin::Local => f.write_str("local store"),
        }
    }
}

/// A published `data.json` reachable over HTTP.
#[derive(Debug, Clone)]
pub struct RemoteSnapshot {
    client: reqwest::Client,
    url: String,
}

impl RemoteSnapshot {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }

    /// `Ok(None)` when nothing is published yet.
    pub async fn fetch(&self) -> ExchangeResult<Option<String>> {
        let response = self
            .client
            .get(&self.url)
            .header(CACHE_CONTROL, "no-cache")
            .send()
            .await
            .map_err(unavailable)?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        let document = response
            .error_for_status()
            .map_err(unavailable)?
            .json::<SnapshotDocument>()
            .await
            .map_err(unavailable)?;
        Ok(Some(document.into_payload()?))
    }
}

fn unavailable(err: reqwest::Error) -> ExchangeError {
    ExchangeError::SourceUnavailable(err.to_string())
}

/// One place an encoded table might be found.
#[derive(Clone)]
pub enum SnapshotSource {
    Remote(RemoteSnapshot),
    Local(Arc<dyn ExchangeStore>),
}

impl SnapshotSource {
    pub fn origin(&self) -> Origin {
        match self {
            SnapshotSource::Remote(_) => Origin::Remote,
            SnapshotSource::Local(_) => Origin::Local,
        }
    }

    pub async fn fetch(&self) -> ExchangeResult<Option<String>> {
        match self {
            SnapshotSource::Remote(remote) => remote.fetch().await,
            SnapshotSource::Local(store) => Ok(store.load().await?.map(|stored| stored.encoded)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Located {
    pub encoded: String,
    pub origin: Origin,
}

/// Tries each source in order once. The first one holding a snapshot wins;
/// failures only move on to the next source.
pub async fn locate(sources: &[SnapshotSource]) -> Option<Located> {
    for source in sources {
        let origin = source.origin();
        match source.fetch().await {
            Ok(Some(encoded)) => {
                debug!("Snapshot loaded from {}", origin);
                return Some(Located { encoded, origin });
            }
            Ok(None) => debug!("No snapshot in {}", origin),
            Err(err) => warn!("Could not read {}, trying next source: {}", origin, err),
        }
    }
    None
}

/// Decoded table from the first available source, `None` if not set up.
pub async fn load_table(sources: &[SnapshotSource]) -> ExchangeResult<Option<(LookupTable, Origin)>> {
    match locate(sources).await {
        Some(located) => Ok(Some((codec::decode(&located.encoded)?, located.origin))),
        None => Ok(None),
    }
}

/// Remote snapshot first unless the config prefers the local store.
pub fn build_sources(
    config: &Config,
    store: Arc<dyn ExchangeStore>,
) -> Result<Vec<SnapshotSource>, reqwest::Error> {
    let local = SnapshotSource::Local(store);
    let Some(url) = &config.snapshot_url else {
        return Ok(vec![local]);
    };

    let remote = SnapshotSource::Remote(RemoteSnapshot::new(url.clone(), config.snapshot_timeout)?);
    Ok(if config.prefer_local {
        vec![local, remote]
    } else {
        vec![remote, local]
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exchange::generate;
    use crate::store::MemoryStore;
    use axum::{Json, Router, http::StatusCode as AxumStatus, routing::get};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use tokio::net::TcpListener;

    async fn serve(app: Router) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}/data.json")
    }

    fn table(seed: u64) -> LookupTable {
        let names = ["Ann", "Ben", "Cy", "Di"].map(String::from);
        generate(&names, &mut ChaCha8Rng::seed_from_u64(seed)).unwrap()
    }

    fn remote(url: String) -> SnapshotSource {
        SnapshotSource::Remote(RemoteSnapshot::new(url, Duration::from_secs(2)).unwrap())
    }

    async fn local_with(table: &LookupTable) -> SnapshotSource {
        let store = MemoryStore::new();
        store.finalize(&codec::encode(table).unwrap()).await.unwrap();
        SnapshotSource::Local(Arc::new(store))
    }

    #[tokio::test]
    async fn nothing_anywhere_is_not_set_up() {
        let url = serve(Router::new()).await;
        let sources = vec![remote(url), SnapshotSource::Local(Arc::new(MemoryStore::new()))];
        assert!(locate(&sources).await.is_none());
        assert!(load_table(&sources).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn remote_snapshot_wins_over_local() {
        let published = table(1);
        let document = SnapshotDocument::publish(&published).unwrap();
        let url = serve(Router::new().route(
            "/data.json",
            get(move || {
                let document = document.clone();
                async move { Json(document) }
            }),
        ))
        .await;

        let sources = vec![remote(url), local_with(&table(2)).await];
        let (loaded, origin) = load_table(&sources).await.unwrap().unwrap();
        assert_eq!(origin, Origin::Remote);
        assert_eq!(loaded, published);
    }

    #[tokio::test]
    async fn missing_remote_falls_back_to_local() {
        let url = serve(Router::new()).await;
        let local = table(3);
        let sources = vec![remote(url), local_with(&local).await];
        let (loaded, origin) = load_table(&sources).await.unwrap().unwrap();
        assert_eq!(origin, Origin::Local);
        assert_eq!(loaded, local);
    }

    #[tokio::test]
    async fn failing_remote_falls_back_to_local() {
        let url = serve(Router::new().route(
            "/data.json",
            get(|| async { AxumStatus::INTERNAL_SERVER_ERROR }),
        ))
        .await;
        let sources = vec![remote(url), local_with(&table(4)).await];
        let located = locate(&sources).await.unwrap();
        assert_eq!(located.origin, Origin::Local);
    }

    #[tokio::test]
    async fn unreachable_remote_falls_back_to_local() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let sources = vec![
            remote(format!("http://{addr}/data.json")),
            local_with(&table(5)).await,
        ];
        assert_eq!(locate(&sources).await.unwrap().origin, Origin::Local);
    }

    #[tokio::test]
    async fn corrupt_snapshot_is_a_codec_error() {
        let store = MemoryStore::new();
        store.finalize("definitely not a table").await.unwrap();
        let sources = vec![SnapshotSource::Local(Arc::new(store))];
        assert!(matches!(
            load_table(&sources).await,
            Err(ExchangeError::Codec(_))
        ));
    }

    #[test]
    fn source_order_follows_config() {
        let store: Arc<dyn ExchangeStore> = Arc::new(MemoryStore::new());
        let mut config = Config::default();
        let origins = |sources: Vec<SnapshotSource>| {
            sources.iter().map(SnapshotSource::origin).collect::<Vec<_>>()
        };

        assert_eq!(origins(build_sources(&config, store.clone()).unwrap()), [Origin::Local]);

        config.snapshot_url = Some("http://localhost/data.json".into());
        assert_eq!(
            origins(build_sources(&config, store.clone()).unwrap()),
            [Origin::Remote, Origin::Local]
        );

        config.prefer_local = true;
        assert_eq!(
            origins(build_sources(&config, store).unwrap()),
            [Origin::Local, Origin::Remote]
        );
    }
}
