//! Parameter identifiers and compiled-in defaults
//!
//! The id space is dense: `ParamId as usize` indexes the value, name and
//! type regions of the table directly. [`PARAM_DEFAULTS`] is kept in the
//! same order as the enum; a unit test guards the correspondence.

use super::value::ParamValue;

/// Fixed width of a parameter name (MAVLink param_id length)
pub const PARAM_NAME_LEN: usize = 16;

/// Number of parameters in the table
pub const PARAM_COUNT: usize = 48;

/// Parameter identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ParamId {
    // System
    SysId,

    // Telemetry stream rates (Hz)
    StreamHeartbeatRate,
    StreamStatusRate,
    StreamAttitudeRate,
    StreamImuRate,
    StreamMagRate,
    StreamBaroRate,
    StreamAirspeedRate,
    StreamServoOutputRate,
    StreamRcRawRate,

    // PWM / outputs
    RcType,
    MotorPwmRate,
    MotorIdlePwm,
    MotorMinPwm,
    MotorMaxPwm,

    // Mixer selection
    Mixer,
    FixedWing,

    // RC mapping
    RcXChannel,
    RcYChannel,
    RcZChannel,
    RcFChannel,
    RcAttOverrideChannel,
    RcThrOverrideChannel,
    RcAttControlTypeChannel,
    ArmChannel,
    ArmThreshold,

    // IMU
    AccelScale,
    GyroXBias,
    GyroYBias,
    GyroZBias,
    AccXBias,
    AccYBias,
    AccZBias,
    AccXTempComp,
    AccYTempComp,
    AccZTempComp,

    // Magnetometer hard iron
    MagXBias,
    MagYBias,
    MagZBias,

    // Magnetometer soft iron (row-major 3x3)
    MagA11Comp,
    MagA12Comp,
    MagA13Comp,
    MagA21Comp,
    MagA22Comp,
    MagA23Comp,
    MagA31Comp,
    MagA32Comp,
    MagA33Comp,
}

impl ParamId {
    /// All ids in index order
    pub const ALL: [ParamId; PARAM_COUNT] = [
        ParamId::SysId,
        ParamId::StreamHeartbeatRate,
        ParamId::StreamStatusRate,
        ParamId::StreamAttitudeRate,
        ParamId::StreamImuRate,
        ParamId::StreamMagRate,
        ParamId::StreamBaroRate,
        ParamId::StreamAirspeedRate,
        ParamId::StreamServoOutputRate,
        ParamId::StreamRcRawRate,
        ParamId::RcType,
        ParamId::MotorPwmRate,
        ParamId::MotorIdlePwm,
        ParamId::MotorMinPwm,
        ParamId::MotorMaxPwm,
        ParamId::Mixer,
        ParamId::FixedWing,
        ParamId::RcXChannel,
        ParamId::RcYChannel,
        ParamId::RcZChannel,
        ParamId::RcFChannel,
        ParamId::RcAttOverrideChannel,
        ParamId::RcThrOverrideChannel,
        ParamId::RcAttControlTypeChannel,
        ParamId::ArmChannel,
        ParamId::ArmThreshold,
        ParamId::AccelScale,
        ParamId::GyroXBias,
        ParamId::GyroYBias,
        ParamId::GyroZBias,
        ParamId::AccXBias,
        ParamId::AccYBias,
        ParamId::AccZBias,
        ParamId::AccXTempComp,
        ParamId::AccYTempComp,
        ParamId::AccZTempComp,
        ParamId::MagXBias,
        ParamId::MagYBias,
        ParamId::MagZBias,
        ParamId::MagA11Comp,
        ParamId::MagA12Comp,
        ParamId::MagA13Comp,
        ParamId::MagA21Comp,
        ParamId::MagA22Comp,
        ParamId::MagA23Comp,
        ParamId::MagA31Comp,
        ParamId::MagA32Comp,
        ParamId::MagA33Comp,
    ];

    /// Table index of this id
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Bound-checked conversion from a raw index
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Compiled-in name
    pub fn name(self) -> &'static str {
        PARAM_DEFAULTS[self.index()].name
    }

    /// Compiled-in default value
    pub fn default_value(self) -> ParamValue {
        PARAM_DEFAULTS[self.index()].value
    }
}

/// Compiled-in definition of one parameter
#[derive(Debug, Clone, Copy)]
pub struct ParamDefault {
    /// Id this entry belongs to
    pub id: ParamId,
    /// Name (at most [`PARAM_NAME_LEN`] bytes, ASCII)
    pub name: &'static str,
    /// Default value; its variant fixes the parameter type
    pub value: ParamValue,
}

impl ParamDefault {
    const fn int(id: ParamId, name: &'static str, value: i32) -> Self {
        Self {
            id,
            name,
            value: ParamValue::Int32(value),
        }
    }

    const fn float(id: ParamId, name: &'static str, value: f32) -> Self {
        Self {
            id,
            name,
            value: ParamValue::Float(value),
        }
    }
}

/// Compiled-in defaults, in id order
pub const PARAM_DEFAULTS: [ParamDefault; PARAM_COUNT] = [
    ParamDefault::int(ParamId::SysId, "SYS_ID", 1),
    ParamDefault::int(ParamId::StreamHeartbeatRate, "STRM_HRTBT", 1),
    ParamDefault::int(ParamId::StreamStatusRate, "STRM_STATUS", 10),
    ParamDefault::int(ParamId::StreamAttitudeRate, "STRM_ATTITUDE", 100),
    ParamDefault::int(ParamId::StreamImuRate, "STRM_IMU", 100),
    ParamDefault::int(ParamId::StreamMagRate, "STRM_MAG", 50),
    ParamDefault::int(ParamId::StreamBaroRate, "STRM_BARO", 50),
    ParamDefault::int(ParamId::StreamAirspeedRate, "STRM_AIRSPEED", 20),
    ParamDefault::int(ParamId::StreamServoOutputRate, "STRM_SERVO", 0),
    ParamDefault::int(ParamId::StreamRcRawRate, "STRM_RC", 0),
    // 0 = parallel PWM, 1 = PPM
    ParamDefault::int(ParamId::RcType, "RC_TYPE", 1),
    ParamDefault::int(ParamId::MotorPwmRate, "MOTOR_PWM_UPDT", 490),
    ParamDefault::int(ParamId::MotorIdlePwm, "MOTOR_IDLE_PWM", 1100),
    ParamDefault::int(ParamId::MotorMinPwm, "MOTOR_MIN_PWM", 1000),
    ParamDefault::int(ParamId::MotorMaxPwm, "MOTOR_MAX_PWM", 2000),
    // 0 = quad +, 1 = quad X, 2 = Y6, 3 = X8, 4 = fixed wing
    ParamDefault::int(ParamId::Mixer, "MIXER", 1),
    ParamDefault::int(ParamId::FixedWing, "FIXED_WING", 0),
    ParamDefault::int(ParamId::RcXChannel, "RC_X_CHN", 0),
    ParamDefault::int(ParamId::RcYChannel, "RC_Y_CHN", 1),
    ParamDefault::int(ParamId::RcZChannel, "RC_Z_CHN", 3),
    ParamDefault::int(ParamId::RcFChannel, "RC_F_CHN", 2),
    ParamDefault::int(ParamId::RcAttOverrideChannel, "RC_ATT_OVRD_CHN", 4),
    ParamDefault::int(ParamId::RcThrOverrideChannel, "RC_THR_OVRD_CHN", 4),
    ParamDefault::int(ParamId::RcAttControlTypeChannel, "RC_ATT_CTRL_CHN", 5),
    ParamDefault::int(ParamId::ArmChannel, "ARM_CHANNEL", 7),
    ParamDefault::float(ParamId::ArmThreshold, "ARM_THRESHOLD", 0.15),
    ParamDefault::float(ParamId::AccelScale, "ACC_SCALE", 1.0),
    ParamDefault::float(ParamId::GyroXBias, "GYRO_X_BIAS", 0.0),
    ParamDefault::float(ParamId::GyroYBias, "GYRO_Y_BIAS", 0.0),
    ParamDefault::float(ParamId::GyroZBias, "GYRO_Z_BIAS", 0.0),
    ParamDefault::float(ParamId::AccXBias, "ACC_X_BIAS", 0.0),
    ParamDefault::float(ParamId::AccYBias, "ACC_Y_BIAS", 0.0),
    ParamDefault::float(ParamId::AccZBias, "ACC_Z_BIAS", 0.0),
    ParamDefault::float(ParamId::AccXTempComp, "ACC_X_TEMP_COMP", 0.0),
    ParamDefault::float(ParamId::AccYTempComp, "ACC_Y_TEMP_COMP", 0.0),
    ParamDefault::float(ParamId::AccZTempComp, "ACC_Z_TEMP_COMP", 0.0),
    ParamDefault::float(ParamId::MagXBias, "MAG_X_BIAS", 0.0),
    ParamDefault::float(ParamId::MagYBias, "MAG_Y_BIAS", 0.0),
    ParamDefault::float(ParamId::MagZBias, "MAG_Z_BIAS", 0.0),
    ParamDefault::float(ParamId::MagA11Comp, "MAG_A11_COMP", 1.0),
    ParamDefault::float(ParamId::MagA12Comp, "MAG_A12_COMP", 0.0),
    ParamDefault::float(ParamId::MagA13Comp, "MAG_A13_COMP", 0.0),
    ParamDefault::float(ParamId::MagA21Comp, "MAG_A21_COMP", 0.0),
    ParamDefault::float(ParamId::MagA22Comp, "MAG_A22_COMP", 1.0),
    ParamDefault::float(ParamId::MagA23Comp, "MAG_A23_COMP", 0.0),
    ParamDefault::float(ParamId::MagA31Comp, "MAG_A31_COMP", 0.0),
    ParamDefault::float(ParamId::MagA32Comp, "MAG_A32_COMP", 0.0),
    ParamDefault::float(ParamId::MagA33Comp, "MAG_A33_COMP", 1.0),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_in_id_order() {
        for (index, entry) in PARAM_DEFAULTS.iter().enumerate() {
            assert_eq!(entry.id.index(), index, "{} out of order", entry.name);
            assert_eq!(ParamId::ALL[index], entry.id);
        }
    }

    #[test]
    fn test_names_fit_and_are_unique() {
        for (i, a) in PARAM_DEFAULTS.iter().enumerate() {
            assert!(!a.name.is_empty());
            assert!(a.name.len() <= PARAM_NAME_LEN, "{} too long", a.name);
            assert!(a.name.is_ascii());
            for b in &PARAM_DEFAULTS[i + 1..] {
                assert_ne!(a.name, b.name);
            }
        }
    }

    #[test]
    fn test_from_index_bounds() {
        assert_eq!(ParamId::from_index(0), Some(ParamId::SysId));
        assert_eq!(
            ParamId::from_index(PARAM_COUNT - 1),
            Some(ParamId::MagA33Comp)
        );
        assert_eq!(ParamId::from_index(PARAM_COUNT), None);
    }

    #[test]
    fn test_soft_iron_defaults_to_identity() {
        assert_eq!(ParamId::MagA11Comp.default_value(), ParamValue::Float(1.0));
        assert_eq!(ParamId::MagA12Comp.default_value(), ParamValue::Float(0.0));
        assert_eq!(ParamId::MagA22Comp.default_value(), ParamValue::Float(1.0));
        assert_eq!(ParamId::MagA33Comp.default_value(), ParamValue::Float(1.0));
    }
}
