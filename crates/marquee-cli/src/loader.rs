use marquee_core::SalesNode;

use crate::cache::DiskCache;

/// Where the reference dataset lives.
pub const DATA_URL: &str =
    "https://cdn.rawgit.com/freeCodeCamp/testable-projects-fcc/a80ce8f9/src/data/tree_map/movie-data.json";

/// Data-availability states. `Unloaded` begins a run, `Loading` covers
/// the cache read and the fetch, and the run ends in `Ready` or `Failed`.
/// `Failed` is terminal: there is no retry.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum LoadState {
    #[default]
    Unloaded,
    Loading,
    Ready(SalesNode),
    Failed(String),
}

impl LoadState {
    /// `Unloaded -> Loading`. Any other state is unchanged.
    pub fn begin(self) -> Self {
        match self {
            Self::Unloaded => Self::Loading,
            other => other,
        }
    }

    /// `Loading -> Ready`. Any other state is unchanged.
    pub fn ready(self, data: SalesNode) -> Self {
        match self {
            Self::Loading => Self::Ready(data),
            other => other,
        }
    }

    /// `Loading -> Failed`. Any other state is unchanged.
    pub fn fail(self, message: impl Into<String>) -> Self {
        match self {
            Self::Loading => Self::Failed(message.into()),
            other => other,
        }
    }
}

/// How the loader treats the disk cache for one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CacheMode {
    /// Serve from the cache when possible, write after a fetch.
    #[default]
    ReadWrite,
    /// Skip the cache read, overwrite on a successful fetch.
    Refresh,
    /// Neither read nor write the cache.
    Bypass,
}

/// Cache-or-fetch dataset loader.
pub struct Loader {
    cache: Option<DiskCache>,
    client: reqwest::blocking::Client,
}

impl Loader {
    pub fn new(cache: Option<DiskCache>) -> reqwest::Result<Self> {
        // No request timeout: the reference surface waits indefinitely.
        let client = reqwest::blocking::Client::builder()
            .timeout(None::<std::time::Duration>)
            .build()?;
        Ok(Self { cache, client })
    }

    /// Walks the availability machine once and returns the final state
    /// (always `Ready` or `Failed`).
    pub fn load(&self, mode: CacheMode) -> LoadState {
        let state = LoadState::default().begin();

        if mode == CacheMode::ReadWrite {
            if let Some(data) = self.cache.as_ref().and_then(DiskCache::load) {
                tracing::debug!("dataset served from cache");
                return state.ready(data);
            }
        }

        match self.fetch() {
            Ok(data) => {
                if mode != CacheMode::Bypass {
                    if let Some(cache) = &self.cache {
                        if let Err(err) = cache.store(&data) {
                            tracing::warn!(%err, "failed to write dataset cache");
                        }
                    }
                }
                state.ready(data)
            }
            Err(message) => state.fail(message),
        }
    }

    fn fetch(&self) -> Result<SalesNode, String> {
        tracing::debug!(url = DATA_URL, "fetching dataset");
        let response = self
            .client
            .get(DATA_URL)
            .send()
            .and_then(reqwest::blocking::Response::error_for_status)
            .map_err(|err| err.to_string())?;
        let text = response.text().map_err(|err| err.to_string())?;
        marquee_core::parse_dataset(&text).map_err(|err| err.to_string())
    }
}
