use dashmap::DashMap;
use log::{debug, info};
use nanoid::nanoid;

use crate::models::url::UrlMapping;

/// Character set for generated short codes.
const CODE_ALPHABET: &[char] = &[
    '0', '1', '2', '3', '4', '5', '6', '7', '8', '9', 'A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'I',
    'J', 'K', 'L', 'M', 'N', 'O', 'P', 'Q', 'R', 'S', 'T', 'U', 'V', 'W', 'X', 'Y', 'Z', 'a', 'b',
    'c', 'd', 'e', 'f', 'g', 'h', 'i', 'j', 'k', 'l', 'm', 'n', 'o', 'p', 'q', 'r', 's', 't', 'u',
    'v', 'w', 'x', 'y', 'z',
];

/// In-memory store mapping short codes to URL records.
///
/// DashMap's sharded locking lets concurrent requests read and write
/// different codes without contending on one global lock, and gives each
/// `record_click` an exclusive per-entry guard so the counter and history
/// stay consistent.
pub struct UrlStore {
    urls: DashMap<String, UrlMapping>,
    code_length: usize,
}

impl UrlStore {
    /// Creates an empty store generating codes of `code_length` characters.
    pub fn new(code_length: usize) -> Self {
        Self {
            urls: DashMap::new(),
            code_length,
        }
    }

    /// Generates a short code for `original_url`, stores the new mapping,
    /// and returns it.
    ///
    /// Codes are unique only by random chance: a colliding code replaces
    /// the previous mapping.
    pub fn shorten(&self, original_url: &str) -> UrlMapping {
        info!("Creating short URL for: {}", original_url);

        let short_code = nanoid!((self.code_length), CODE_ALPHABET);
        let mapping = UrlMapping::new(short_code.clone(), original_url.to_string());
        self.urls.insert(short_code, mapping.clone());

        debug!(
            "Short code generated: {} -> {}",
            mapping.short_code, original_url
        );

        mapping
    }

    /// Returns a snapshot of the mapping for `code`, if one exists.
    pub fn lookup(&self, code: &str) -> Option<UrlMapping> {
        debug!("Looking up short code: {}", code);
        self.urls.get(code).map(|entry| entry.clone())
    }

    /// Records one click against `code`. Unknown codes are ignored.
    ///
    /// The counter increment and history append happen under the entry's
    /// exclusive guard, so concurrent clicks on the same code are never
    /// dropped.
    pub fn record_click(&self, code: &str, user_agent: Option<String>, ip_address: String) {
        if let Some(mut mapping) = self.urls.get_mut(code) {
            info!("Click recorded for {} from IP: {}", code, ip_address);
            mapping.record_click(user_agent, ip_address);
        }
    }

    /// Number of stored mappings.
    pub fn count(&self) -> usize {
        self.urls.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn shorten_returns_code_of_configured_length() {
        let store = UrlStore::new(6);
        let mapping = store.shorten("https://example.com");

        assert_eq!(mapping.short_code.len(), 6);
        assert_eq!(mapping.original_url, "https://example.com");
        assert_eq!(mapping.click_count, 0);
        assert!(mapping.click_history.is_empty());
    }

    #[test]
    fn shorten_respects_other_code_lengths() {
        let store = UrlStore::new(10);
        let mapping = store.shorten("https://example.com");

        assert_eq!(mapping.short_code.len(), 10);
    }

    #[test]
    fn generated_codes_use_only_the_alphabet() {
        let store = UrlStore::new(6);

        for i in 0..50 {
            let mapping = store.shorten(&format!("https://example.com/{}", i));
            for c in mapping.short_code.chars() {
                assert!(
                    CODE_ALPHABET.contains(&c),
                    "invalid character in short code: {}",
                    c
                );
            }
        }
    }

    #[test]
    fn duplicate_urls_get_independent_codes() {
        let store = UrlStore::new(6);
        let first = store.shorten("https://example.com");
        let second = store.shorten("https://example.com");

        assert_ne!(first.short_code, second.short_code);
        assert!(store.lookup(&first.short_code).is_some());
        assert!(store.lookup(&second.short_code).is_some());
    }

    #[test]
    fn lookup_returns_the_stored_url() {
        let store = UrlStore::new(6);
        let created = store.shorten("https://example.com/path?query=1");

        let found = store.lookup(&created.short_code).unwrap();
        assert_eq!(found.original_url, "https://example.com/path?query=1");
        assert_eq!(found.created_at, created.created_at);
    }

    #[test]
    fn lookup_unknown_code_returns_none() {
        let store = UrlStore::new(6);
        assert!(store.lookup("nope").is_none());
    }

    #[test]
    fn record_click_increments_count_and_appends_event() {
        let store = UrlStore::new(6);
        let mapping = store.shorten("https://example.com");

        store.record_click(
            &mapping.short_code,
            Some("Test-Agent".to_string()),
            "127.0.0.1".to_string(),
        );

        let updated = store.lookup(&mapping.short_code).unwrap();
        assert_eq!(updated.click_count, 1);
        assert_eq!(updated.click_history.len(), 1);
        assert_eq!(
            updated.click_history[0].user_agent.as_deref(),
            Some("Test-Agent")
        );
        assert_eq!(updated.click_history[0].ip_address, "127.0.0.1");
    }

    #[test]
    fn record_click_on_unknown_code_is_a_no_op() {
        let store = UrlStore::new(6);
        store.shorten("https://example.com");

        store.record_click("missing", None, "127.0.0.1".to_string());

        assert_eq!(store.count(), 1);
    }

    #[test]
    fn count_tracks_number_of_shortened_urls() {
        let store = UrlStore::new(6);
        assert_eq!(store.count(), 0);

        store.shorten("https://example1.com");
        store.shorten("https://example2.com");

        assert_eq!(store.count(), 2);
    }

    #[test]
    fn concurrent_clicks_are_never_lost() {
        let store = Arc::new(UrlStore::new(6));
        let code = store.shorten("https://example.com").short_code;

        let mut handles = Vec::new();
        for _ in 0..8 {
            let store = Arc::clone(&store);
            let code = code.clone();
            handles.push(thread::spawn(move || {
                for _ in 0..50 {
                    store.record_click(&code, None, "127.0.0.1".to_string());
                }
            }));
        }
        for handle in handles {
            handle.join().unwrap();
        }

        let mapping = store.lookup(&code).unwrap();
        assert_eq!(mapping.click_count, 400);
        assert_eq!(mapping.click_history.len(), 400);
    }

    #[test]
    fn concurrent_shortens_are_all_retrievable() {
        let store = Arc::new(UrlStore::new(6));

        let mut handles = Vec::new();
        for i in 0..8 {
            let store = Arc::clone(&store);
            handles.push(thread::spawn(move || {
                (0..25)
                    .map(|j| {
                        store
                            .shorten(&format!("https://example.com/{}/{}", i, j))
                            .short_code
                    })
                    .collect::<Vec<_>>()
            }));
        }

        let codes: Vec<String> = handles
            .into_iter()
            .flat_map(|handle| handle.join().unwrap())
            .collect();

        assert_eq!(store.count(), 200);
        for code in codes {
            assert!(store.lookup(&code).is_some());
        }
    }
}
