use std::net::{IpAddr, SocketAddr};

use async_trait::async_trait;
use axum::extract::{ConnectInfo, FromRequestParts};
use axum::http::request::Parts;
use chrono_tz::Tz;
use serde::Serialize;
use tokio::time::timeout;
use tracing::{debug, warn};

use crate::auth::AuthUser;
use crate::errors::AppError;
use crate::models::profile::UserProfileRow;
use crate::settings::repo as profile_repo;
use crate::state::AppState;
use crate::timezone::cache::{TimezoneCache, CACHE_OP_TIMEOUT};
use crate::timezone::geoip::TimezoneLocator;
use crate::timezone::{client_ip, is_public_ip};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TimezoneSource {
    /// Auto-detection is off; the saved zone is used as-is.
    Preference,
    /// Detected from the client IP on this request.
    Detected,
    /// Detection was attempted but gave nothing; the saved zone is used.
    Profile,
    /// Nothing usable; the configured default applies.
    Default,
}

/// The timezone in effect for the current request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedTimezone {
    pub tz: Tz,
    pub source: TimezoneSource,
}

/// Geolocates `ip`, consulting the cache first and filling it on a miss.
pub async fn detect_timezone(
    ip: IpAddr,
    locator: &dyn TimezoneLocator,
    cache: &dyn TimezoneCache,
) -> Option<Tz> {
    if !is_public_ip(ip) {
        return None;
    }

    // An unreachable cache counts as a miss.
    match timeout(CACHE_OP_TIMEOUT, cache.get(ip)).await {
        Ok(Ok(Some(name))) => match name.parse::<Tz>() {
            Ok(tz) => return Some(tz),
            Err(_) => debug!("Ignoring cached unknown timezone '{name}' for {ip}"),
        },
        Ok(Ok(None)) => {}
        Ok(Err(e)) => warn!("Timezone cache read failed: {e}"),
        Err(_) => warn!("Timezone cache read timed out after {CACHE_OP_TIMEOUT:?}"),
    }

    let tz = locator.locate(ip).await?;
    match timeout(CACHE_OP_TIMEOUT, cache.put(ip, tz.name())).await {
        Ok(Ok(())) => {}
        Ok(Err(e)) => warn!("Timezone cache write failed: {e}"),
        Err(_) => warn!("Timezone cache write timed out after {CACHE_OP_TIMEOUT:?}"),
    }
    Some(tz)
}

pub async fn resolve_timezone(
    profile: &UserProfileRow,
    ip: Option<IpAddr>,
    locator: &dyn TimezoneLocator,
    cache: &dyn TimezoneCache,
    default: Tz,
) -> ResolvedTimezone {
    let saved = profile.timezone.parse::<Tz>().ok();
    let fallback = |source| match saved {
        Some(tz) => ResolvedTimezone { tz, source },
        None => ResolvedTimezone {
            tz: default,
            source: TimezoneSource::Default,
        },
    };

    if !profile.auto_detect_timezone {
        return fallback(TimezoneSource::Preference);
    }

    if let Some(ip) = ip {
        if let Some(tz) = detect_timezone(ip, locator, cache).await {
            return ResolvedTimezone {
                tz,
                source: TimezoneSource::Detected,
            };
        }
    }

    fallback(TimezoneSource::Profile)
}

#[async_trait]
impl FromRequestParts<AppState> for ResolvedTimezone {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, AppError> {
        if let Some(resolved) = parts.extensions.get::<ResolvedTimezone>() {
            return Ok(*resolved);
        }

        let user = AuthUser::from_request_parts(parts, state).await?;
        let peer = parts
            .extensions
            .get::<ConnectInfo<SocketAddr>>()
            .map(|ConnectInfo(addr)| addr.ip());
        let ip = client_ip(&parts.headers, peer);

        let resolved = match profile_repo::get_or_create_profile(&state.db, user.id()).await {
            Ok(profile) => {
                let resolved = resolve_timezone(
                    &profile,
                    ip,
                    state.tz_locator.as_ref(),
                    state.tz_cache.as_ref(),
                    state.config.default_timezone,
                )
                .await;

                if resolved.source == TimezoneSource::Detected
                    && profile.timezone != resolved.tz.name()
                {
                    if let Err(e) =
                        profile_repo::set_profile_timezone(&state.db, user.id(), resolved.tz.name())
                            .await
                    {
                        warn!("Failed to persist detected timezone: {e}");
                    }
                }
                resolved
            }
            Err(e) => {
                warn!("Error setting timezone: {e}");
                ResolvedTimezone {
                    tz: state.config.default_timezone,
                    source: TimezoneSource::Default,
                }
            }
        };

        parts.extensions.insert(resolved);
        Ok(resolved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timezone::cache::MemoryTimezoneCache;
    use chrono::Utc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use uuid::Uuid;

    struct StubLocator {
        answer: Option<Tz>,
        calls: AtomicUsize,
    }

    impl StubLocator {
        fn new(answer: Option<Tz>) -> Self {
            Self {
                answer,
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl TimezoneLocator for StubLocator {
        async fn locate(&self, _ip: IpAddr) -> Option<Tz> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.answer
        }
    }

    fn profile(timezone: &str, auto_detect: bool) -> UserProfileRow {
        UserProfileRow {
            user_id: Uuid::new_v4(),
            timezone: timezone.to_string(),
            auto_detect_timezone: auto_detect,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn public_ip() -> Option<IpAddr> {
        Some("8.8.8.8".parse().unwrap())
    }

    #[tokio::test]
    async fn test_preference_wins_when_detection_disabled() {
        let locator = StubLocator::new(Some(Tz::Asia__Tokyo));
        let cache = MemoryTimezoneCache::default();
        let resolved = resolve_timezone(
            &profile("Europe/Berlin", false),
            public_ip(),
            &locator,
            &cache,
            Tz::UTC,
        )
        .await;
        assert_eq!(resolved.tz, Tz::Europe__Berlin);
        assert_eq!(resolved.source, TimezoneSource::Preference);
        assert_eq!(locator.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_invalid_preference_uses_default() {
        let locator = StubLocator::new(None);
        let cache = MemoryTimezoneCache::default();
        let resolved = resolve_timezone(
            &profile("Mars/Olympus_Mons", false),
            None,
            &locator,
            &cache,
            Tz::UTC,
        )
        .await;
        assert_eq!(resolved.tz, Tz::UTC);
        assert_eq!(resolved.source, TimezoneSource::Default);
    }

    #[tokio::test]
    async fn test_detection_is_cached() {
        let locator = StubLocator::new(Some(Tz::Asia__Tokyo));
        let cache = MemoryTimezoneCache::default();
        let p = profile("America/New_York", true);

        let first = resolve_timezone(&p, public_ip(), &locator, &cache, Tz::UTC).await;
        let second = resolve_timezone(&p, public_ip(), &locator, &cache, Tz::UTC).await;

        assert_eq!(first.tz, Tz::Asia__Tokyo);
        assert_eq!(first.source, TimezoneSource::Detected);
        assert_eq!(second.tz, Tz::Asia__Tokyo);
        assert_eq!(locator.calls.load(Ordering::SeqCst), 1);
        assert_eq!(
            cache.entries.lock().unwrap().get("timezone_8.8.8.8").cloned(),
            Some("Asia/Tokyo".to_string())
        );
    }

    #[tokio::test]
    async fn test_failed_detection_falls_back_to_profile() {
        let locator = StubLocator::new(None);
        let cache = MemoryTimezoneCache::default();
        let resolved = resolve_timezone(
            &profile("America/Chicago", true),
            public_ip(),
            &locator,
            &cache,
            Tz::UTC,
        )
        .await;
        assert_eq!(resolved.tz, Tz::America__Chicago);
        assert_eq!(resolved.source, TimezoneSource::Profile);
    }

    #[tokio::test]
    async fn test_private_ip_skips_lookup() {
        let locator = StubLocator::new(Some(Tz::Asia__Tokyo));
        let cache = MemoryTimezoneCache::default();
        let resolved = resolve_timezone(
            &profile("America/Chicago", true),
            Some("192.168.1.20".parse().unwrap()),
            &locator,
            &cache,
            Tz::UTC,
        )
        .await;
        assert_eq!(resolved.tz, Tz::America__Chicago);
        assert_eq!(locator.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_stale_cache_entry_is_ignored() {
        let locator = StubLocator::new(Some(Tz::Europe__Paris));
        let cache = MemoryTimezoneCache::default();
        cache
            .put("8.8.8.8".parse().unwrap(), "Not/AZone")
            .await
            .unwrap();

        let tz = detect_timezone("8.8.8.8".parse().unwrap(), &locator, &cache).await;
        assert_eq!(tz, Some(Tz::Europe__Paris));
        assert_eq!(locator.calls.load(Ordering::SeqCst), 1);
    }

    /// A cache whose backend never answers.
    struct UnresponsiveCache;

    #[async_trait]
    impl TimezoneCache for UnresponsiveCache {
        async fn get(&self, _ip: IpAddr) -> anyhow::Result<Option<String>> {
            std::future::pending().await
        }

        async fn put(&self, _ip: IpAddr, _timezone: &str) -> anyhow::Result<()> {
            std::future::pending().await
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_unresponsive_cache_does_not_block_detection() {
        let locator = StubLocator::new(Some(Tz::Europe__Madrid));
        let started = tokio::time::Instant::now();

        let tz = detect_timezone("8.8.8.8".parse().unwrap(), &locator, &UnresponsiveCache).await;

        assert_eq!(tz, Some(Tz::Europe__Madrid));
        assert_eq!(locator.calls.load(Ordering::SeqCst), 1);
        // One bounded read plus one bounded write.
        assert!(started.elapsed() <= CACHE_OP_TIMEOUT * 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_unresponsive_cache_falls_back_to_profile() {
        let locator = StubLocator::new(None);
        let resolved = resolve_timezone(
            &profile("America/Denver", true),
            public_ip(),
            &locator,
            &UnresponsiveCache,
            Tz::UTC,
        )
        .await;
        assert_eq!(resolved.tz, Tz::America__Denver);
        assert_eq!(resolved.source, TimezoneSource::Profile);
    }
}
