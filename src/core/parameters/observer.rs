//! Parameter change dispatch
//!
//! The store reports every effective change to a [`ParamObserver`]. The
//! firmware's observer is a [`DispatchTable`]: a map from parameter id to a
//! [`ChangeEffect`], executed through [`SubsystemHooks`] implemented by the
//! owning application. The store itself knows nothing about which
//! subsystems depend on which parameters.

use heapless::Vec;
use kestrel_core::parameters::{ParamId, ParamValue};

/// Receives parameter changes synchronously from the store
pub trait ParamObserver {
    fn param_changed(&mut self, id: ParamId, value: ParamValue);
}

/// Observer that ignores every change
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl ParamObserver for NoopObserver {
    fn param_changed(&mut self, _id: ParamId, _value: ParamValue) {}
}

/// Telemetry streams with a configurable rate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StreamId {
    Heartbeat,
    Status,
    Attitude,
    Imu,
    Mag,
    Baro,
    Airspeed,
    ServoOutput,
    RcRaw,
}

/// Side effect of changing a parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ChangeEffect {
    /// Update the reported system id
    SystemId,
    /// Reconfigure a telemetry stream's rate
    StreamRate(StreamId),
    /// Re-initialize RC input mapping
    ReinitRc,
    /// Re-initialize PWM outputs
    ReinitPwm,
    /// Re-initialize the mixer
    ReinitMixer,
}

/// Actions the dispatch table can trigger on other subsystems
pub trait SubsystemHooks {
    fn set_system_id(&mut self, system_id: i32);
    fn set_stream_rate(&mut self, stream: StreamId, rate_hz: i32);
    fn reinit_rc(&mut self);
    fn reinit_pwm(&mut self);
    fn reinit_mixer(&mut self);
}

/// Maximum number of registered effects
pub const DISPATCH_CAPACITY: usize = 32;

/// Default effects for the compiled-in parameter set
pub const STANDARD_EFFECTS: [(ParamId, ChangeEffect); 25] = [
    (ParamId::SysId, ChangeEffect::SystemId),
    (
        ParamId::StreamHeartbeatRate,
        ChangeEffect::StreamRate(StreamId::Heartbeat),
    ),
    (
        ParamId::StreamStatusRate,
        ChangeEffect::StreamRate(StreamId::Status),
    ),
    (
        ParamId::StreamAttitudeRate,
        ChangeEffect::StreamRate(StreamId::Attitude),
    ),
    (ParamId::StreamImuRate, ChangeEffect::StreamRate(StreamId::Imu)),
    (ParamId::StreamMagRate, ChangeEffect::StreamRate(StreamId::Mag)),
    (ParamId::StreamBaroRate, ChangeEffect::StreamRate(StreamId::Baro)),
    (
        ParamId::StreamAirspeedRate,
        ChangeEffect::StreamRate(StreamId::Airspeed),
    ),
    (
        ParamId::StreamServoOutputRate,
        ChangeEffect::StreamRate(StreamId::ServoOutput),
    ),
    (
        ParamId::StreamRcRawRate,
        ChangeEffect::StreamRate(StreamId::RcRaw),
    ),
    (ParamId::RcType, ChangeEffect::ReinitPwm),
    (ParamId::MotorPwmRate, ChangeEffect::ReinitPwm),
    (ParamId::MotorIdlePwm, ChangeEffect::ReinitPwm),
    (ParamId::MotorMinPwm, ChangeEffect::ReinitPwm),
    (ParamId::MotorMaxPwm, ChangeEffect::ReinitPwm),
    (ParamId::Mixer, ChangeEffect::ReinitMixer),
    (ParamId::FixedWing, ChangeEffect::ReinitMixer),
    (ParamId::RcXChannel, ChangeEffect::ReinitRc),
    (ParamId::RcYChannel, ChangeEffect::ReinitRc),
    (ParamId::RcZChannel, ChangeEffect::ReinitRc),
    (ParamId::RcFChannel, ChangeEffect::ReinitRc),
    (ParamId::RcAttOverrideChannel, ChangeEffect::ReinitRc),
    (ParamId::RcThrOverrideChannel, ChangeEffect::ReinitRc),
    (ParamId::RcAttControlTypeChannel, ChangeEffect::ReinitRc),
    (ParamId::ArmChannel, ChangeEffect::ReinitRc),
];

const _: () = assert!(STANDARD_EFFECTS.len() <= DISPATCH_CAPACITY);

/// Id-keyed change dispatch table
#[derive(Debug)]
pub struct DispatchTable<H: SubsystemHooks> {
    entries: Vec<(ParamId, ChangeEffect), DISPATCH_CAPACITY>,
    hooks: H,
}

impl<H: SubsystemHooks> DispatchTable<H> {
    /// Create an empty table
    pub fn new(hooks: H) -> Self {
        Self {
            entries: Vec::new(),
            hooks,
        }
    }

    /// Create a table with [`STANDARD_EFFECTS`] registered
    pub fn standard(hooks: H) -> Self {
        let mut table = Self::new(hooks);
        for &(id, effect) in STANDARD_EFFECTS.iter() {
            // Fits: checked against DISPATCH_CAPACITY at compile time
            let _ = table.entries.push((id, effect));
        }
        table
    }

    /// Register or replace the effect for `id`
    ///
    /// Returns the entry back if the table is full.
    pub fn register(
        &mut self,
        id: ParamId,
        effect: ChangeEffect,
    ) -> Result<(), (ParamId, ChangeEffect)> {
        if let Some(entry) = self.entries.iter_mut().find(|(e, _)| *e == id) {
            entry.1 = effect;
            return Ok(());
        }
        self.entries.push((id, effect))
    }

    /// Effect registered for `id`
    pub fn effect(&self, id: ParamId) -> Option<ChangeEffect> {
        self.entries
            .iter()
            .find(|(e, _)| *e == id)
            .map(|&(_, effect)| effect)
    }

    pub fn hooks(&self) -> &H {
        &self.hooks
    }

    pub fn hooks_mut(&mut self) -> &mut H {
        &mut self.hooks
    }
}

impl<H: SubsystemHooks> ParamObserver for DispatchTable<H> {
    fn param_changed(&mut self, id: ParamId, value: ParamValue) {
        let Some(effect) = self.effect(id) else {
            return;
        };
        let int_value = match value {
            ParamValue::Int32(v) => v,
            ParamValue::Float(v) => v as i32,
        };
        match effect {
            ChangeEffect::SystemId => self.hooks.set_system_id(int_value),
            ChangeEffect::StreamRate(stream) => self.hooks.set_stream_rate(stream, int_value),
            ChangeEffect::ReinitRc => self.hooks.reinit_rc(),
            ChangeEffect::ReinitPwm => self.hooks.reinit_pwm(),
            ChangeEffect::ReinitMixer => self.hooks.reinit_mixer(),
        }
    }
}
