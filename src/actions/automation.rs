//! Home-automation light control
//!
//! Talks to a Domoticz-style `json.htm` endpoint with single best-effort
//! GET requests. The response is never inspected; there is no retry.

use tracing::{info, warn};

/// Switches the light connected to the automation server
#[allow(async_fn_in_trait)]
pub trait LightSwitch {
    /// Turn the light fully on or off
    async fn set_power(&self, on: bool);

    /// Dim the light to a level in 0..=100
    async fn set_level(&self, level: u8);
}

/// Client for the Domoticz switchlight API
pub struct DomoticzClient {
    client: reqwest::Client,
    base_url: String,
    idx: u32,
}

impl DomoticzClient {
    pub fn new(base_url: impl Into<String>, idx: u32) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
            idx,
        }
    }

    /// Build the switchlight command URL
    fn command_url(&self, switchcmd: &str, level: Option<u8>) -> String {
        let mut url = format!(
            "{}?type=command&param=switchlight&idx={}&switchcmd={}",
            self.base_url, self.idx, switchcmd
        );
        if let Some(level) = level {
            url.push_str(&format!("&level={level}"));
        }
        url
    }

    /// Fire one GET and forget about it
    async fn get(&self, url: String) {
        info!(%url, "automation request");
        match self.client.get(&url).send().await {
            Ok(response) if response.status().is_success() => {}
            Ok(response) => warn!(status = %response.status(), "automation server refused command"),
            Err(e) => warn!(?e, "automation request failed"),
        }
    }
}

impl LightSwitch for DomoticzClient {
    async fn set_power(&self, on: bool) {
        let cmd = if on { "On" } else { "Off" };
        self.get(self.command_url(cmd, None)).await;
    }

    async fn set_level(&self, level: u8) {
        self.get(self.command_url("Set%20Level", Some(level))).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> DomoticzClient {
        DomoticzClient::new("http://localhost:8080/json.htm", 1)
    }

    #[test]
    fn test_on_url() {
        assert_eq!(
            client().command_url("On", None),
            "http://localhost:8080/json.htm?type=command&param=switchlight&idx=1&switchcmd=On"
        );
    }

    #[test]
    fn test_off_url() {
        assert_eq!(
            client().command_url("Off", None),
            "http://localhost:8080/json.htm?type=command&param=switchlight&idx=1&switchcmd=Off"
        );
    }

    #[test]
    fn test_level_url_carries_escaped_command_and_level() {
        assert_eq!(
            client().command_url("Set%20Level", Some(45)),
            "http://localhost:8080/json.htm?type=command&param=switchlight&idx=1&switchcmd=Set%20Level&level=45"
        );
    }

    #[test]
    fn test_idx_is_configurable() {
        let client = DomoticzClient::new("http://localhost:8080/json.htm", 7);
        assert!(client.command_url("On", None).contains("idx=7"));
    }
}
