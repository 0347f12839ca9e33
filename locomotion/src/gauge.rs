/*!
Bounded resource gauge (stamina, health) with delayed passive regeneration.

Invariants
- `0 <= current <= max` after every operation.
- Regeneration only runs once `regen_delay` seconds have passed since the last drain.

Behavior notes
- Draining an empty gauge is a complete no-op: the value stays at zero and the regen
  timer is not reset.
- A fresh gauge is ready to regenerate immediately.
- Negative or non-finite amounts and time steps are treated as zero.
*/

use num_traits::Float;

use crate::constants::{
    DEFAULT_RESOURCE_MAX, DEFAULT_RESOURCE_REGEN_DELAY, DEFAULT_RESOURCE_REGEN_RATE,
    DEFAULT_RESOURCE_REGEN_SPEED, REGEN_CEILING_EPSILON,
};

/// How a drain amount is interpreted.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum DrainMode {
    /// Remove the amount once.
    Instant,
    /// `amount` is a rate per second, scaled by the step `dt`.
    Constant,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ResourceGauge<T: Float = f32> {
    current: T,
    max: T,
    regen_rate: T,
    regen_speed: T,
    regen_delay: T,
    /// Seconds since the last drain, capped at `regen_delay`.
    since_drain: T,
}

impl Default for ResourceGauge<f32> {
    fn default() -> Self {
        Self::new(
            DEFAULT_RESOURCE_MAX,
            DEFAULT_RESOURCE_REGEN_RATE,
            DEFAULT_RESOURCE_REGEN_SPEED,
            DEFAULT_RESOURCE_REGEN_DELAY,
        )
    }
}

impl<T: Float> ResourceGauge<T> {
    /// Full gauge of capacity `max`.
    pub fn new(max: T, regen_rate: T, regen_speed: T, regen_delay: T) -> Self {
        let max = non_negative(max);
        let regen_delay = non_negative(regen_delay);
        Self {
            current: max,
            max,
            regen_rate: non_negative(regen_rate),
            regen_speed: non_negative(regen_speed),
            regen_delay,
            since_drain: regen_delay,
        }
    }

    #[inline]
    pub fn current(&self) -> T {
        self.current
    }

    #[inline]
    pub fn max(&self) -> T {
        self.max
    }

    #[inline]
    pub fn regen_speed(&self) -> T {
        self.regen_speed
    }

    /// `current / max`, or zero for a zero-capacity gauge.
    pub fn fraction(&self) -> T {
        if self.max > T::zero() {
            self.current / self.max
        } else {
            T::zero()
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.current <= T::zero()
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.current >= self.max
    }

    /// True once the post-drain quiet period has elapsed.
    #[inline]
    pub fn is_regen_ready(&self) -> bool {
        self.since_drain >= self.regen_delay
    }

    /// Removes `amount` (or `amount * dt` for [`DrainMode::Constant`]) and restarts the
    /// regeneration delay.
    pub fn drain(&mut self, amount: T, mode: DrainMode, dt: T) {
        if self.current <= T::zero() {
            return;
        }

        let amount = match mode {
            DrainMode::Instant => non_negative(amount),
            DrainMode::Constant => non_negative(amount) * non_negative(dt),
        };

        self.since_drain = T::zero();
        self.current = (self.current - amount).max(T::zero());
    }

    /// Advances the regen timer by `dt`, then adds `regen_rate * regen_speed * dt` if the
    /// delay has elapsed. The step that reaches the delay already regenerates.
    pub fn regenerate(&mut self, dt: T) {
        let dt = non_negative(dt);

        self.since_drain = (self.since_drain + dt).min(self.regen_delay);
        if !self.is_regen_ready() {
            return;
        }

        let ceiling_eps = T::from(REGEN_CEILING_EPSILON).unwrap_or_else(T::zero);
        if self.current > self.max - ceiling_eps {
            return;
        }

        let gain = self.regen_rate * self.regen_speed * dt;
        self.current = (self.current + gain).min(self.max);
    }

    /// Adds `amount` immediately, ignoring the regen delay.
    pub fn restore(&mut self, amount: T) {
        self.current = (self.current + non_negative(amount)).min(self.max);
    }

    pub fn set_regen_speed(&mut self, speed: T) {
        self.regen_speed = non_negative(speed);
    }
}

#[inline]
fn non_negative<T: Float>(value: T) -> T {
    if value.is_finite() && value > T::zero() {
        value
    } else {
        T::zero()
    }
}
