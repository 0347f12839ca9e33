//! Per-character health and stamina pools.

use crate::{
    constants::DEFAULT_HEALTH_MAX,
    gauge::{DrainMode, ResourceGauge},
    settings::ValidatedSettings,
};

#[derive(Clone, Debug, PartialEq)]
pub struct CharacterStats {
    pub health: ResourceGauge,
    pub stamina: ResourceGauge,
}

impl CharacterStats {
    /// Health uses the default capacity and never regenerates on its own; stamina is
    /// shaped by the `resource_*` settings.
    pub fn from_settings(settings: &ValidatedSettings) -> Self {
        Self {
            health: ResourceGauge::new(DEFAULT_HEALTH_MAX, 0.0, 0.0, 0.0),
            stamina: ResourceGauge::new(
                settings.resource_max,
                settings.resource_regen_rate,
                settings.resource_regen_speed,
                settings.resource_regen_delay,
            ),
        }
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        !self.health.is_empty()
    }

    pub fn take_damage(&mut self, amount: f32) {
        self.health.drain(amount, DrainMode::Instant, 0.0);
        if !self.is_alive() {
            log::debug!("Health depleted");
        }
    }

    pub fn heal(&mut self, amount: f32) {
        self.health.restore(amount);
    }
}
