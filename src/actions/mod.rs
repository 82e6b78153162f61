//! Action handlers for recognized spoken commands
//!
//! Each handler runs at most once per matched command, synchronously on
//! the event-processing task; further events wait until it completes.

mod automation;
mod system;

pub use automation::{DomoticzClient, LightSwitch};
pub use system::{HostSystem, SystemControl};

use tracing::warn;

use crate::dispatch::Command;
use crate::hat::Voice;

/// The effectful side of the command grammar
pub struct Actions<S, L, V> {
    system: S,
    lights: L,
    voice: V,
}

impl<S, L, V> Actions<S, L, V>
where
    S: SystemControl,
    L: LightSwitch,
    V: Voice,
{
    pub fn new(system: S, lights: L, voice: V) -> Self {
        Self {
            system,
            lights,
            voice,
        }
    }

    /// Invoke the handler matching the classified command
    pub async fn run(&self, command: Command) {
        match command {
            Command::PowerOff => self.power_off().await,
            Command::Reboot => self.reboot().await,
            Command::SayIp => self.say_ip().await,
            Command::LightOn => self.light(true).await,
            Command::LightOff => self.light(false).await,
            Command::LightLevel(level) => self.light_level(level).await,
        }
    }

    async fn power_off(&self) {
        self.voice.say("Good bye!").await;
        self.system.shutdown().await;
    }

    async fn reboot(&self) {
        self.voice.say("See you in a bit!").await;
        self.system.reboot().await;
    }

    async fn say_ip(&self) {
        match self.system.primary_ip().await {
            Ok(Some(ip)) => {
                self.voice.say(&format!("My IP address is {ip}")).await;
            }
            Ok(None) => warn!("no network address configured"),
            Err(e) => warn!(?e, "failed to look up network address"),
        }
    }

    async fn light(&self, on: bool) {
        self.lights.set_power(on).await;
    }

    async fn light_level(&self, level: u8) {
        self.lights.set_level(level).await;
        self.voice.say_with("Yes sir!", 150, 10).await;
    }
}

#[cfg(test)]
pub(crate) mod testing {
    //! Recording test doubles shared by action and dispatcher tests

    use std::sync::Arc;
    use std::sync::Mutex;

    use anyhow::Result;

    use super::{LightSwitch, SystemControl};
    use crate::hat::Voice;

    /// Every externally visible effect, in invocation order
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub enum Effect {
        Shutdown,
        Reboot,
        SetPower(bool),
        SetLevel(u8),
        Say(String),
        Status(crate::hat::Status),
        StartConversation,
        StopConversation,
    }

    #[derive(Clone, Default)]
    pub struct EffectLog(pub Arc<Mutex<Vec<Effect>>>);

    impl EffectLog {
        pub fn record(&self, effect: Effect) {
            self.0.lock().unwrap().push(effect);
        }

        pub fn take(&self) -> Vec<Effect> {
            std::mem::take(&mut *self.0.lock().unwrap())
        }
    }

    pub struct FakeSystem {
        pub log: EffectLog,
        pub ip: Option<String>,
    }

    impl SystemControl for FakeSystem {
        async fn shutdown(&self) {
            self.log.record(Effect::Shutdown);
        }

        async fn reboot(&self) {
            self.log.record(Effect::Reboot);
        }

        async fn primary_ip(&self) -> Result<Option<String>> {
            Ok(self.ip.clone())
        }
    }

    pub struct FakeLights {
        pub log: EffectLog,
    }

    impl LightSwitch for FakeLights {
        async fn set_power(&self, on: bool) {
            self.log.record(Effect::SetPower(on));
        }

        async fn set_level(&self, level: u8) {
            self.log.record(Effect::SetLevel(level));
        }
    }

    pub struct FakeVoice {
        pub log: EffectLog,
    }

    impl Voice for FakeVoice {
        async fn say(&self, text: &str) {
            self.log.record(Effect::Say(text.to_string()));
        }

        async fn say_with(&self, text: &str, _pitch: u32, _volume: u32) {
            self.log.record(Effect::Say(text.to_string()));
        }
    }

    pub type FakeActions = super::Actions<FakeSystem, FakeLights, FakeVoice>;

    /// Actions wired entirely to recording fakes
    pub fn fake_actions(ip: Option<String>) -> (FakeActions, EffectLog) {
        let log = EffectLog::default();
        let actions = super::Actions::new(
            FakeSystem {
                log: log.clone(),
                ip,
            },
            FakeLights { log: log.clone() },
            FakeVoice { log: log.clone() },
        );
        (actions, log)
    }
}

#[cfg(test)]
mod tests {
    use super::testing::{fake_actions, Effect};
    use super::*;

    #[tokio::test]
    async fn test_power_off_announces_then_shuts_down() {
        let (actions, log) = fake_actions(None);
        actions.run(Command::PowerOff).await;
        assert_eq!(
            log.take(),
            vec![Effect::Say("Good bye!".to_string()), Effect::Shutdown]
        );
    }

    #[tokio::test]
    async fn test_reboot_announces_then_reboots() {
        let (actions, log) = fake_actions(None);
        actions.run(Command::Reboot).await;
        assert_eq!(
            log.take(),
            vec![Effect::Say("See you in a bit!".to_string()), Effect::Reboot]
        );
    }

    #[tokio::test]
    async fn test_say_ip_announces_address() {
        let (actions, log) = fake_actions(Some("10.0.0.5".to_string()));
        actions.run(Command::SayIp).await;
        assert_eq!(
            log.take(),
            vec![Effect::Say("My IP address is 10.0.0.5".to_string())]
        );
    }

    #[tokio::test]
    async fn test_say_ip_silent_without_address() {
        let (actions, log) = fake_actions(None);
        actions.run(Command::SayIp).await;
        assert!(log.take().is_empty());
    }

    #[tokio::test]
    async fn test_light_level_switches_then_confirms() {
        let (actions, log) = fake_actions(None);
        actions.run(Command::LightLevel(45)).await;
        assert_eq!(
            log.take(),
            vec![
                Effect::SetLevel(45),
                Effect::Say("Yes sir!".to_string())
            ]
        );
    }
}
