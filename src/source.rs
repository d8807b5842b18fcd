//! Sponsorship sources and the on-disk response cache

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::model::Sponsorship;

/// Errors raised while loading sponsorships
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("cannot read '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid sponsorship data in '{}': {source}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Anything that can hand over the raw sponsorship list
pub trait SponsorSource {
    fn fetch(&self) -> Result<Vec<Sponsorship>, SourceError>;
}

impl<S: SponsorSource + ?Sized> SponsorSource for &S {
    fn fetch(&self) -> Result<Vec<Sponsorship>, SourceError> {
        (**self).fetch()
    }
}

/// In-memory list, mostly useful for callers that fetch on their own
impl SponsorSource for Vec<Sponsorship> {
    fn fetch(&self) -> Result<Vec<Sponsorship>, SourceError> {
        Ok(self.clone())
    }
}

/// A JSON array of sponsorships on disk
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SponsorSource for JsonFileSource {
    fn fetch(&self) -> Result<Vec<Sponsorship>, SourceError> {
        read_list(&self.path)
    }
}

fn read_list(path: &Path) -> Result<Vec<Sponsorship>, SourceError> {
    let content = std::fs::read_to_string(path).map_err(|source| SourceError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| SourceError::Json {
        path: path.to_path_buf(),
        source,
    })
}

/// Serves the cached list when present, otherwise fetches and caches
///
/// With `force` set the cache is never read, but a fresh result still
/// overwrites it. A corrupt cache file is treated as missing.
#[derive(Debug, Clone)]
pub struct CachedSource<S> {
    inner: S,
    cache_file: PathBuf,
    force: bool,
}

impl<S: SponsorSource> CachedSource<S> {
    pub fn new(inner: S, cache_file: impl Into<PathBuf>) -> Self {
        Self {
            inner,
            cache_file: cache_file.into(),
            force: false,
        }
    }

    pub fn with_force(mut self, force: bool) -> Self {
        self.force = force;
        self
    }

    fn store(&self, sponsorships: &[Sponsorship]) -> std::io::Result<()> {
        if let Some(parent) = self.cache_file.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string(sponsorships).map_err(std::io::Error::other)?;
        std::fs::write(&self.cache_file, json)
    }
}

impl<S: SponsorSource> SponsorSource for CachedSource<S> {
    fn fetch(&self) -> Result<Vec<Sponsorship>, SourceError> {
        if !self.force && self.cache_file.exists() {
            match read_list(&self.cache_file) {
                Ok(list) => {
                    tracing::info!(
                        path = %self.cache_file.display(),
                        sponsors = list.len(),
                        "using cached sponsorships"
                    );
                    return Ok(list);
                }
                Err(err) => tracing::warn!("ignoring cache: {err}"),
            }
        }

        let list = self.inner.fetch()?;
        if let Err(err) = self.store(&list) {
            tracing::warn!(path = %self.cache_file.display(), "cannot write cache: {err}");
        }
        Ok(list)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Sponsor;
    use std::cell::Cell;

    struct Counting {
        list: Vec<Sponsorship>,
        calls: Cell<usize>,
    }

    impl SponsorSource for Counting {
        fn fetch(&self) -> Result<Vec<Sponsorship>, SourceError> {
            self.calls.set(self.calls.get() + 1);
            Ok(self.list.clone())
        }
    }

    fn temp_dir(tag: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("sponsorkit-src-{tag}-{}", std::process::id()));
        std::fs::remove_dir_all(&dir).ok();
        dir
    }

    fn counting(logins: &[&str]) -> Counting {
        Counting {
            list: logins
                .iter()
                .map(|l| Sponsorship::new(Sponsor::user(*l, *l, "a.png"), 5.0, "2024-01-01"))
                .collect(),
            calls: Cell::new(0),
        }
    }

    #[test]
    fn test_json_file_source() {
        let dir = temp_dir("json");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("sponsors.json");
        std::fs::write(
            &path,
            r#"[{"sponsor":{"type":"User","login":"a","name":"A","avatarUrl":"a.png"},
                "monthlyDollars":5,"privacyLevel":"PUBLIC","createdAt":"2024-01-01"}]"#,
        )
        .unwrap();

        let list = JsonFileSource::new(&path).fetch().unwrap();
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].sponsor.login, "a");

        std::fs::write(&path, "{").unwrap();
        assert!(matches!(
            JsonFileSource::new(&path).fetch(),
            Err(SourceError::Json { .. })
        ));
        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_missing_file() {
        let err = JsonFileSource::new("/definitely/not/here.json")
            .fetch()
            .unwrap_err();
        assert!(matches!(err, SourceError::Io { .. }));
        assert!(err.to_string().contains("/definitely/not/here.json"));
    }

    #[test]
    fn test_cache_is_consulted_once_written() {
        let dir = temp_dir("cache");
        let cache = dir.join(".cache.json");
        let inner = counting(&["a", "b"]);

        let source = CachedSource::new(&inner, &cache);
        assert_eq!(source.fetch().unwrap().len(), 2);
        assert_eq!(source.fetch().unwrap().len(), 2);
        assert_eq!(inner.calls.get(), 1);
        assert!(cache.exists());

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_force_bypasses_cache() {
        let dir = temp_dir("force");
        let cache = dir.join(".cache.json");
        let inner = counting(&["a"]);

        CachedSource::new(&inner, &cache).fetch().unwrap();
        CachedSource::new(&inner, &cache)
            .with_force(true)
            .fetch()
            .unwrap();
        assert_eq!(inner.calls.get(), 2);

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_corrupt_cache_refetches() {
        let dir = temp_dir("corrupt");
        std::fs::create_dir_all(&dir).unwrap();
        let cache = dir.join(".cache.json");
        std::fs::write(&cache, "not json").unwrap();
        let inner = counting(&["a"]);

        let list = CachedSource::new(&inner, &cache).fetch().unwrap();
        assert_eq!(list.len(), 1);
        assert_eq!(inner.calls.get(), 1);

        std::fs::remove_dir_all(&dir).ok();
    }
}
