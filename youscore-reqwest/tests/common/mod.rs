#![allow(dead_code)]

use std::sync::Mutex;

use async_trait::async_trait;
use dashmap::DashMap;
use youscore_reqwest::{Cache, CacheKey, CachedResponse};

/// In-memory cache keeping the URL each entry was stored under.
#[derive(Default)]
pub struct MapCache {
    pub entries: DashMap<CacheKey, (String, CachedResponse)>,
    pub lookups: Mutex<Vec<String>>,
}

impl MapCache {
    pub fn stored_urls(&self) -> Vec<String> {
        let mut urls: Vec<_> = self
            .entries
            .iter()
            .map(|entry| entry.value().0.clone())
            .collect();
        urls.sort();
        urls
    }
}

#[async_trait]
impl Cache for MapCache {
    async fn get(&self, url: &str, key: &CacheKey) -> Option<CachedResponse> {
        self.lookups.lock().unwrap().push(url.to_owned());
        self.entries.get(key).map(|entry| entry.value().1.clone())
    }

    async fn set(&self, url: &str, key: &CacheKey, response: CachedResponse) {
        self.entries.insert(key.clone(), (url.to_owned(), response));
    }
}
