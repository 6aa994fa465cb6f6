//! IMU and magnetometer correction
//!
//! Corrections are rebuilt from the parameter table each cycle, so a changed
//! bias or coefficient takes effect on the next sample.
//!
//! ```text
//! accel = raw * scale - (temp_comp .* temperature + accel_bias)
//! gyro  = raw - gyro_bias
//! mag   = A * (raw - hard_iron)
//! ```

use nalgebra::{Matrix3, Vector3};

use crate::parameters::{ParamId, ParamTable};

fn vector(table: &ParamTable, ids: [ParamId; 3]) -> Vector3<f32> {
    Vector3::new(
        table.get_float(ids[0]),
        table.get_float(ids[1]),
        table.get_float(ids[2]),
    )
}

/// Accelerometer and gyroscope correction terms
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImuCorrection {
    pub accel_scale: f32,
    pub accel_bias: Vector3<f32>,
    pub accel_temp_comp: Vector3<f32>,
    pub gyro_bias: Vector3<f32>,
}

impl ImuCorrection {
    /// Read the current correction terms from `table`
    pub fn from_params(table: &ParamTable) -> Self {
        Self {
            accel_scale: table.get_float(ParamId::AccelScale),
            accel_bias: vector(
                table,
                [ParamId::AccXBias, ParamId::AccYBias, ParamId::AccZBias],
            ),
            accel_temp_comp: vector(
                table,
                [
                    ParamId::AccXTempComp,
                    ParamId::AccYTempComp,
                    ParamId::AccZTempComp,
                ],
            ),
            gyro_bias: vector(
                table,
                [ParamId::GyroXBias, ParamId::GyroYBias, ParamId::GyroZBias],
            ),
        }
    }

    /// Apply `ACC_SCALE` to a raw accelerometer reading
    pub fn scale_accel(&self, raw: Vector3<f32>) -> Vector3<f32> {
        raw * self.accel_scale
    }

    /// Remove temperature drift and bias from a scaled reading
    pub fn correct_accel(&self, scaled: Vector3<f32>, temperature: f32) -> Vector3<f32> {
        scaled - (self.accel_temp_comp * temperature + self.accel_bias)
    }

    pub fn correct_gyro(&self, raw: Vector3<f32>) -> Vector3<f32> {
        raw - self.gyro_bias
    }

    /// True if every accel and gyro bias is exactly zero
    pub fn biases_are_zero(&self) -> bool {
        self.accel_bias.iter().chain(self.gyro_bias.iter()).all(|&b| b == 0.0)
    }
}

/// Magnetometer hard-iron offset and soft-iron matrix
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MagCorrection {
    pub hard_iron: Vector3<f32>,
    pub soft_iron: Matrix3<f32>,
}

impl MagCorrection {
    /// Read the current correction terms from `table`
    pub fn from_params(table: &ParamTable) -> Self {
        let a = |id| table.get_float(id);
        Self {
            hard_iron: vector(
                table,
                [ParamId::MagXBias, ParamId::MagYBias, ParamId::MagZBias],
            ),
            soft_iron: Matrix3::new(
                a(ParamId::MagA11Comp),
                a(ParamId::MagA12Comp),
                a(ParamId::MagA13Comp),
                a(ParamId::MagA21Comp),
                a(ParamId::MagA22Comp),
                a(ParamId::MagA23Comp),
                a(ParamId::MagA31Comp),
                a(ParamId::MagA32Comp),
                a(ParamId::MagA33Comp),
            ),
        }
    }

    /// Subtract hard iron, then apply the soft-iron transform
    pub fn apply(&self, raw: Vector3<f32>) -> Vector3<f32> {
        self.soft_iron * (raw - self.hard_iron)
    }
}
