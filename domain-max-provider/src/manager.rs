//! In-memory registry of named, live provider adapters, plus the retry
//! orchestration applied on top of them.

use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::Duration;

use crate::error::{DnsError, Result};
use crate::factory::ProviderFactory;
use crate::traits::DnsProvider;
use crate::types::ProviderConfig;

/// Cap applied to connection tests.
const TEST_TIMEOUT: Duration = Duration::from_secs(30);

/// A registered adapter together with the frozen config it was built from.
#[derive(Clone)]
pub struct RegisteredProvider {
    /// The live adapter.
    pub provider: Arc<dyn DnsProvider>,
    /// Vendor tag the adapter was created for.
    pub provider_type: String,
    /// The config snapshot taken at registration.
    pub config: ProviderConfig,
}

/// Registry of named adapters.
///
/// Lookups take the shared lock side, mutations the exclusive side; no
/// guard is ever held across an `.await`. [`update`](Self::update) builds
/// and validates the replacement adapter before touching the map, so a
/// concurrent [`get`](Self::get) observes either the old or the new
/// adapter, never a missing entry.
pub struct ProviderManager {
    factory: ProviderFactory,
    registry: RwLock<HashMap<String, RegisteredProvider>>,
}

impl Default for ProviderManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ProviderManager {
    /// Manager with a default-policy factory.
    #[must_use]
    pub fn new() -> Self {
        Self::with_factory(ProviderFactory::new())
    }

    /// Manager on top of a pre-configured factory.
    #[must_use]
    pub fn with_factory(factory: ProviderFactory) -> Self {
        Self {
            factory,
            registry: RwLock::new(HashMap::new()),
        }
    }

    /// The factory this manager builds adapters with.
    #[must_use]
    pub fn factory(&self) -> &ProviderFactory {
        &self.factory
    }

    fn read_registry(&self) -> RwLockReadGuard<'_, HashMap<String, RegisteredProvider>> {
        self.registry.read().unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    fn write_registry(&self) -> RwLockWriteGuard<'_, HashMap<String, RegisteredProvider>> {
        self.registry.write().unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    /// Create an adapter, check its config structurally, and insert it
    /// under `name`. On any failure nothing is inserted.
    pub fn register(
        &self,
        name: &str,
        provider_type: &str,
        config: &HashMap<String, String>,
    ) -> Result<()> {
        let provider = self.factory.create_provider(provider_type, config)?;
        provider.validate_config()?;

        let entry = RegisteredProvider {
            provider,
            provider_type: provider_type.to_string(),
            config: ProviderConfig::from_map(config),
        };
        self.write_registry().insert(name.to_string(), entry);
        Ok(())
    }

    /// Look up a registered adapter by name.
    pub fn get(&self, name: &str) -> Result<Arc<dyn DnsProvider>> {
        self.read_registry()
            .get(name)
            .map(|entry| Arc::clone(&entry.provider))
            .ok_or_else(|| not_registered(name))
    }

    /// Look up the full registration entry (adapter + config snapshot).
    pub fn get_registered(&self, name: &str) -> Result<RegisteredProvider> {
        self.read_registry()
            .get(name)
            .cloned()
            .ok_or_else(|| not_registered(name))
    }

    /// Names of all registered adapters.
    #[must_use]
    pub fn list(&self) -> Vec<String> {
        let mut names: Vec<String> = self.read_registry().keys().cloned().collect();
        names.sort();
        names
    }

    /// Replace the adapter registered under `name`.
    ///
    /// The new adapter is created and validated before the write lock is
    /// taken; the swap itself is a single map insert, so concurrent
    /// lookups never observe the name as absent.
    pub fn update(
        &self,
        name: &str,
        provider_type: &str,
        config: &HashMap<String, String>,
    ) -> Result<()> {
        let provider = self.factory.create_provider(provider_type, config)?;
        provider.validate_config()?;

        let entry = RegisteredProvider {
            provider,
            provider_type: provider_type.to_string(),
            config: ProviderConfig::from_map(config),
        };
        self.write_registry().insert(name.to_string(), entry);
        Ok(())
    }

    /// Drop the adapter registered under `name`, if any.
    pub fn remove(&self, name: &str) {
        self.write_registry().remove(name);
    }

    /// Run the adapter's connection test under a 30-second cap.
    pub async fn test(&self, name: &str) -> Result<()> {
        let provider = self.get(name)?;

        match tokio::time::timeout(TEST_TIMEOUT, provider.test_connection()).await {
            Ok(result) => result,
            Err(_) => Err(DnsError::Cancelled {
                detail: format!(
                    "connection test for '{name}' exceeded {}s",
                    TEST_TIMEOUT.as_secs()
                ),
            }),
        }
    }

    /// Test every registered adapter, returning a per-name result map.
    pub async fn test_all(&self) -> HashMap<String, Result<()>> {
        let names = self.list();

        let mut results = HashMap::with_capacity(names.len());
        for name in names {
            let result = self.test(&name).await;
            results.insert(name, result);
        }
        results
    }

    /// Run `operation` under the factory's retry policy.
    ///
    /// Up to `max_retries + 1` attempts; only errors whose kind is
    /// retryable (`NetworkError`, `RateLimited`) trigger another attempt,
    /// with `min(max_delay, initial_delay * factor^(k-1))` slept before
    /// re-attempt `k`. After exhaustion the last error is returned wrapped
    /// with the attempt count.
    pub async fn retry<T, F, Fut>(&self, mut operation: F) -> Result<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let config = self.factory.retry_config().clone();
        let mut last_error: Option<DnsError> = None;

        for attempt in 0..=config.max_retries {
            if attempt > 0 {
                tokio::time::sleep(config.delay_for_attempt(attempt)).await;
            }

            match operation().await {
                Ok(value) => return Ok(value),
                Err(e) if e.is_retryable() => {
                    log::warn!(
                        "attempt {}/{} failed, will retry: {e}",
                        attempt + 1,
                        config.max_retries + 1
                    );
                    last_error = Some(e);
                }
                Err(e) => return Err(e),
            }
        }

        let source = last_error.unwrap_or_else(|| DnsError::NetworkError {
            provider: "manager".to_string(),
            detail: "all retries exhausted with no error captured".to_string(),
        });
        Err(DnsError::RetryExhausted {
            attempts: config.max_retries + 1,
            source: Box::new(source),
        })
    }
}

fn not_registered(name: &str) -> DnsError {
    DnsError::NotFound {
        provider: "manager".to_string(),
        resource: format!("provider '{name}'"),
        raw_message: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::RetryConfig;
    use std::sync::atomic::{AtomicU32, Ordering};

    fn cloudflare_config() -> HashMap<String, String> {
        [("token".to_string(), "tk_test".to_string())].into()
    }

    fn fast_retry_manager(max_retries: u32) -> ProviderManager {
        let mut factory = ProviderFactory::new();
        factory.set_retry_config(RetryConfig {
            max_retries,
            initial_delay: Duration::from_millis(5),
            max_delay: Duration::from_millis(40),
            backoff_factor: 2.0,
        });
        ProviderManager::with_factory(factory)
    }

    #[test]
    fn register_and_get() {
        let manager = ProviderManager::new();
        manager
            .register("cf-prod", "cloudflare", &cloudflare_config())
            .unwrap();

        let provider = manager.get("cf-prod").unwrap();
        assert_eq!(provider.name(), "cloudflare");
        assert_eq!(manager.list(), vec!["cf-prod".to_string()]);
    }

    #[test]
    fn get_unknown_name_fails() {
        let manager = ProviderManager::new();
        let res = manager.get("missing");
        assert!(
            matches!(&res, Err(DnsError::NotFound { .. })),
            "unexpected result: {res:?}"
        );
    }

    #[test]
    fn register_unimplemented_vendor_is_rejected_and_not_inserted() {
        let manager = ProviderManager::new();
        let config: HashMap<String, String> =
            [("api_key".to_string(), "k".to_string())].into();

        let res = manager.register("hw", "huawei", &config);
        assert!(
            matches!(&res, Err(DnsError::NotImplemented { .. })),
            "unexpected result: {res:?}"
        );
        assert!(manager.get("hw").is_err());
        assert!(manager.list().is_empty());
    }

    #[test]
    fn register_with_bad_config_is_not_inserted() {
        let manager = ProviderManager::new();
        let empty = HashMap::new();

        let res = manager.register("ali", "aliyun", &empty);
        assert!(
            matches!(&res, Err(DnsError::ConfigError { .. })),
            "unexpected result: {res:?}"
        );
        assert!(manager.list().is_empty());
    }

    #[test]
    fn update_swaps_entry_in_place() {
        let manager = ProviderManager::new();
        manager
            .register("main", "cloudflare", &cloudflare_config())
            .unwrap();

        let aliyun_config: HashMap<String, String> = [
            ("api_key".to_string(), "AK".to_string()),
            ("api_secret".to_string(), "SK".to_string()),
        ]
        .into();
        manager.update("main", "aliyun", &aliyun_config).unwrap();

        let provider = manager.get("main").unwrap();
        assert_eq!(provider.name(), "aliyun");
        assert_eq!(manager.list().len(), 1);
    }

    #[test]
    fn failed_update_keeps_old_entry() {
        let manager = ProviderManager::new();
        manager
            .register("main", "cloudflare", &cloudflare_config())
            .unwrap();

        let res = manager.update("main", "aliyun", &HashMap::new());
        assert!(res.is_err());

        // The old adapter is still there
        let provider = manager.get("main").unwrap();
        assert_eq!(provider.name(), "cloudflare");
    }

    #[test]
    fn remove_drops_entry() {
        let manager = ProviderManager::new();
        manager
            .register("cf", "cloudflare", &cloudflare_config())
            .unwrap();
        manager.remove("cf");
        assert!(manager.get("cf").is_err());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_get_during_update_never_sees_absence() {
        let manager = Arc::new(ProviderManager::new());
        manager
            .register("shared", "cloudflare", &cloudflare_config())
            .unwrap();

        let reader = {
            let manager = Arc::clone(&manager);
            tokio::task::spawn_blocking(move || {
                for _ in 0..2_000 {
                    let provider = manager
                        .get("shared")
                        .unwrap_or_else(|e| panic!("entry vanished mid-update: {e}"));
                    assert!(matches!(provider.name(), "cloudflare" | "aliyun"));
                }
            })
        };

        let aliyun_config: HashMap<String, String> = [
            ("api_key".to_string(), "AK".to_string()),
            ("api_secret".to_string(), "SK".to_string()),
        ]
        .into();
        for i in 0..200 {
            if i % 2 == 0 {
                manager.update("shared", "aliyun", &aliyun_config).unwrap();
            } else {
                manager
                    .update("shared", "cloudflare", &cloudflare_config())
                    .unwrap();
            }
        }

        reader.await.expect("reader task panicked");
    }

    #[tokio::test]
    async fn retry_succeeds_after_transient_failures() {
        let manager = fast_retry_manager(3);
        let attempts = AtomicU32::new(0);

        let result = manager
            .retry(|| {
                let n = attempts.fetch_add(1, Ordering::SeqCst) + 1;
                async move {
                    if n < 3 {
                        Err(DnsError::NetworkError {
                            provider: "test".to_string(),
                            detail: "connection reset".to_string(),
                        })
                    } else {
                        Ok(n)
                    }
                }
            })
            .await;

        assert_eq!(result.unwrap(), 3);
        assert_eq!(attempts.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn retry_returns_non_retryable_immediately() {
        let manager = fast_retry_manager(3);
        let attempts = AtomicU32::new(0);

        let result: Result<()> = manager
            .retry(|| {
                attempts.fetch_add(1, Ordering::SeqCst);
                async {
                    Err(DnsError::AuthError {
                        provider: "test".to_string(),
                        raw_message: None,
                    })
                }
            })
            .await;

        assert!(matches!(result, Err(DnsError::AuthError { .. })));
        assert_eq!(attempts.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn retry_exhaustion_wraps_last_error_with_attempt_count() {
        let manager = fast_retry_manager(2);
        let attempts = AtomicU32::new(0);

        let result: Result<()> = manager
            .retry(|| {
                attempts.fetch_add(1, Ordering::SeqCst);
                async {
                    Err(DnsError::RateLimited {
                        provider: "test".to_string(),
                        retry_after: None,
                        raw_message: None,
                    })
                }
            })
            .await;

        assert_eq!(attempts.load(Ordering::SeqCst), 3);
        match result {
            Err(DnsError::RetryExhausted { attempts, source }) => {
                assert_eq!(attempts, 3);
                assert!(matches!(*source, DnsError::RateLimited { .. }));
            }
            other => panic!("expected RetryExhausted, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn retry_sleeps_within_configured_bounds() {
        let manager = fast_retry_manager(3);
        let attempts = AtomicU32::new(0);

        let started = std::time::Instant::now();
        let _: Result<()> = manager
            .retry(|| {
                attempts.fetch_add(1, Ordering::SeqCst);
                async {
                    Err(DnsError::NetworkError {
                        provider: "test".to_string(),
                        detail: "timeout".to_string(),
                    })
                }
            })
            .await;
        let elapsed = started.elapsed();

        // Delays: 5ms + 10ms + 20ms = 35ms minimum; the 40ms cap bounds each
        assert!(elapsed >= Duration::from_millis(35), "slept only {elapsed:?}");
        assert!(elapsed < Duration::from_secs(2), "slept too long: {elapsed:?}");
    }
}
