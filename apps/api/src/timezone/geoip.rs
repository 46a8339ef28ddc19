//! IP geolocation over free public services, tried in order.

use std::net::IpAddr;
use std::time::Duration;

use async_trait::async_trait;
use chrono_tz::Tz;
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, warn};

const LOOKUP_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy)]
pub struct GeoIpService {
    pub name: &'static str,
    /// `{ip}` is replaced with the address being looked up.
    pub url_template: &'static str,
    pub timezone_key: &'static str,
}

impl GeoIpService {
    fn url(&self, ip: IpAddr) -> String {
        self.url_template.replace("{ip}", &ip.to_string())
    }
}

pub const GEOIP_SERVICES: &[GeoIpService] = &[
    GeoIpService {
        name: "ip-api",
        url_template: "http://ip-api.com/json/{ip}",
        timezone_key: "timezone",
    },
    GeoIpService {
        name: "ipapi",
        url_template: "https://ipapi.co/{ip}/json/",
        timezone_key: "timezone",
    },
];

/// Maps a client address to a timezone. Carried in `AppState` as `Arc<dyn TimezoneLocator>`.
#[async_trait]
pub trait TimezoneLocator: Send + Sync {
    async fn locate(&self, ip: IpAddr) -> Option<Tz>;
}

pub struct HttpTimezoneLocator {
    client: Client,
    services: &'static [GeoIpService],
}

impl HttpTimezoneLocator {
    pub fn new() -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: Client::builder().timeout(LOOKUP_TIMEOUT).build()?,
            services: GEOIP_SERVICES,
        })
    }

    async fn fetch_timezone_name(
        &self,
        service: &GeoIpService,
        ip: IpAddr,
    ) -> Result<Option<String>, reqwest::Error> {
        let payload: Value = self
            .client
            .get(service.url(ip))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(timezone_from_payload(&payload, service.timezone_key))
    }
}

#[async_trait]
impl TimezoneLocator for HttpTimezoneLocator {
    async fn locate(&self, ip: IpAddr) -> Option<Tz> {
        for service in self.services {
            match self.fetch_timezone_name(service, ip).await {
                Ok(Some(name)) => match name.parse::<Tz>() {
                    Ok(tz) => return Some(tz),
                    Err(_) => warn!("Unknown timezone '{name}' from {}", service.name),
                },
                Ok(None) => debug!("{} returned no timezone for {ip}", service.name),
                Err(e) => debug!("Error with {}: {e}", service.name),
            }
        }
        None
    }
}

/// Reads the timezone name out of a geolocation response body.
pub fn timezone_from_payload(payload: &Value, key: &str) -> Option<String> {
    payload
        .get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_service_url_substitution() {
        let ip: IpAddr = "8.8.8.8".parse().unwrap();
        assert_eq!(GEOIP_SERVICES[0].url(ip), "http://ip-api.com/json/8.8.8.8");
        assert_eq!(GEOIP_SERVICES[1].url(ip), "https://ipapi.co/8.8.8.8/json/");
    }

    #[test]
    fn test_timezone_from_ip_api_payload() {
        let payload = json!({"status": "success", "country": "Japan", "timezone": "Asia/Tokyo"});
        assert_eq!(
            timezone_from_payload(&payload, "timezone").as_deref(),
            Some("Asia/Tokyo")
        );
    }

    #[test]
    fn test_timezone_missing_or_blank() {
        assert_eq!(
            timezone_from_payload(&json!({"status": "fail"}), "timezone"),
            None
        );
        assert_eq!(
            timezone_from_payload(&json!({"timezone": ""}), "timezone"),
            None
        );
        assert_eq!(
            timezone_from_payload(&json!({"timezone": 5}), "timezone"),
            None
        );
    }
}
