//! Configuration command handler
//!
//! Executes parameter and calibration commands received by the telemetry
//! link. The link itself (framing, acknowledgement messages) is outside this
//! crate; it maps its wire commands onto [`Command`] and reports the
//! [`CommandResult`] back.
//!
//! # Safety Checks
//!
//! - Every command is refused while the vehicle is armed
//! - Rejections and failures are logged

use crate::communication::CommandResult;
use crate::core::context::FlightContext;
use crate::core::parameters::ParamObserver;
use crate::core::state::StateManager;
use crate::platform::traits::{NonVolatileMemory, SensorBoard};
use crate::subsystems::estimator::EstimatorHooks;
use crate::subsystems::sensors::Sensors;

/// Configuration commands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Command {
    /// Reload parameters from non-volatile memory
    ReadParams,
    /// Persist parameters to non-volatile memory
    WriteParams,
    /// Restore compiled-in defaults (not persisted)
    SetParamDefaults,
    /// Start gyro and accel calibration
    AccelCalibration,
    /// Start gyro calibration
    GyroCalibration,
    /// Zero the barometer altitude reference
    BaroCalibration,
    /// Zero the differential pressure offset
    AirspeedCalibration,
}

impl Command {
    fn name(self) -> &'static str {
        match self {
            Command::ReadParams => "READ_PARAMS",
            Command::WriteParams => "WRITE_PARAMS",
            Command::SetParamDefaults => "SET_PARAM_DEFAULTS",
            Command::AccelCalibration => "ACCEL_CALIBRATION",
            Command::GyroCalibration => "GYRO_CALIBRATION",
            Command::BaroCalibration => "BARO_CALIBRATION",
            Command::AirspeedCalibration => "AIRSPEED_CALIBRATION",
        }
    }
}

/// Command handler
#[derive(Debug, Default)]
pub struct CommandHandler {}

impl CommandHandler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Execute `command`
    pub fn handle<B, M, O, S, E>(
        &mut self,
        command: Command,
        sensors: &mut Sensors<B>,
        ctx: &mut FlightContext<M, O, S, E>,
    ) -> CommandResult
    where
        B: SensorBoard,
        M: NonVolatileMemory,
        O: ParamObserver,
        S: StateManager,
        E: EstimatorHooks,
    {
        crate::log_debug!("Received command {}", command.name());

        if ctx.state.is_armed() {
            crate::log_warn!("Command {} rejected: vehicle armed", command.name());
            return CommandResult::Failed;
        }

        let ok = match command {
            Command::ReadParams => ctx.params.load().is_ok(),
            Command::WriteParams => ctx.params.save().is_ok(),
            Command::SetParamDefaults => {
                ctx.params.reset_to_defaults();
                true
            }
            Command::AccelCalibration => sensors.start_imu_calibration(ctx).is_ok(),
            Command::GyroCalibration => sensors.start_gyro_calibration(ctx).is_ok(),
            Command::BaroCalibration => sensors.calibrate_baro().is_ok(),
            Command::AirspeedCalibration => sensors.calibrate_airspeed().is_ok(),
        };

        if ok {
            CommandResult::Success
        } else {
            crate::log_warn!("Command {} failed", command.name());
            CommandResult::Failed
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::parameters::{NoopObserver, ParameterStore};
    use crate::core::state::MockStateManager;
    use crate::platform::mock::{MockBoard, MockMemory};
    use crate::subsystems::estimator::MockEstimator;
    use kestrel_core::parameters::{ParamId, IMAGE_SIZE};
    use kestrel_core::sensors::BaroReading;

    type Ctx = FlightContext<MockMemory, NoopObserver, MockStateManager, MockEstimator>;

    fn setup() -> (CommandHandler, Sensors<MockBoard>, Ctx) {
        let ctx = FlightContext::new(
            ParameterStore::new(MockMemory::new(), NoopObserver),
            MockStateManager::new(),
            MockEstimator::default(),
        );
        (CommandHandler::new(), Sensors::new(MockBoard::new()), ctx)
    }

    #[test]
    fn test_write_then_read_params() {
        let (mut handler, mut sensors, mut ctx) = setup();
        ctx.params.set_int(ParamId::SysId, 12).unwrap();

        let result = handler.handle(Command::WriteParams, &mut sensors, &mut ctx);
        assert_eq!(result, CommandResult::Success);
        assert!(!ctx.params.is_dirty());

        ctx.params.set_int(ParamId::SysId, 99).unwrap();
        let result = handler.handle(Command::ReadParams, &mut sensors, &mut ctx);
        assert_eq!(result, CommandResult::Success);
        assert_eq!(ctx.params.get_int(ParamId::SysId), 12);
    }

    #[test]
    fn test_read_params_failure_keeps_table() {
        let (mut handler, mut sensors, mut ctx) = setup();
        ctx.params.set_int(ParamId::SysId, 6).unwrap();

        let result = handler.handle(Command::ReadParams, &mut sensors, &mut ctx);
        assert_eq!(result, CommandResult::Failed);
        assert_eq!(ctx.params.get_int(ParamId::SysId), 6);
    }

    #[test]
    fn test_write_params_failure() {
        let (mut handler, mut sensors, mut ctx) = setup();
        ctx.params.memory_mut().set_fail_writes(true);
        let result = handler.handle(Command::WriteParams, &mut sensors, &mut ctx);
        assert_eq!(result, CommandResult::Failed);
    }

    #[test]
    fn test_set_defaults_does_not_persist() {
        let (mut handler, mut sensors, mut ctx) = setup();
        ctx.params.set_float(ParamId::AccelScale, 2.0).unwrap();

        let result = handler.handle(Command::SetParamDefaults, &mut sensors, &mut ctx);
        assert_eq!(result, CommandResult::Success);
        assert_eq!(ctx.params.get_float(ParamId::AccelScale), 1.0);
        assert_eq!(ctx.params.memory().write_count(), 0);
        assert!(ctx.params.memory().contents()[..IMAGE_SIZE]
            .iter()
            .all(|&b| b == 0xFF));
    }

    #[test]
    fn test_calibration_commands_start_calibrators() {
        let (mut handler, mut sensors, mut ctx) = setup();
        ctx.params.set_float(ParamId::AccXBias, 0.3).unwrap();
        ctx.params.set_float(ParamId::GyroXBias, 0.3).unwrap();

        let result = handler.handle(Command::AccelCalibration, &mut sensors, &mut ctx);
        assert_eq!(result, CommandResult::Success);
        assert!(!sensors.accel_calibration_complete());
        assert!(!sensors.gyro_calibration_complete());
        assert_eq!(ctx.params.get_float(ParamId::AccXBias), 0.0);
        assert_eq!(ctx.params.get_float(ParamId::GyroXBias), 0.0);
    }

    #[test]
    fn test_gyro_calibration_leaves_accel_bias() {
        let (mut handler, mut sensors, mut ctx) = setup();
        ctx.params.set_float(ParamId::AccXBias, 0.3).unwrap();

        let result = handler.handle(Command::GyroCalibration, &mut sensors, &mut ctx);
        assert_eq!(result, CommandResult::Success);
        assert!(!sensors.gyro_calibration_complete());
        assert!(sensors.accel_calibration_complete());
        assert_eq!(ctx.params.get_float(ParamId::AccXBias), 0.3);
    }

    #[test]
    fn test_peripheral_calibration_needs_sensor() {
        let (mut handler, mut sensors, mut ctx) = setup();
        assert_eq!(
            handler.handle(Command::BaroCalibration, &mut sensors, &mut ctx),
            CommandResult::Failed
        );
        assert_eq!(
            handler.handle(Command::AirspeedCalibration, &mut sensors, &mut ctx),
            CommandResult::Failed
        );

        sensors.board_mut().set_baro(BaroReading::default());
        assert_eq!(
            handler.handle(Command::BaroCalibration, &mut sensors, &mut ctx),
            CommandResult::Success
        );
        assert_eq!(sensors.board().baro_calibration_count(), 1);
    }

    #[test]
    fn test_every_command_refused_while_armed() {
        let (mut handler, mut sensors, mut ctx) = setup();
        sensors.board_mut().set_baro(BaroReading::default());
        ctx.params.set_float(ParamId::GyroXBias, 0.3).unwrap();
        ctx.state.set_armed(true);

        for command in [
            Command::ReadParams,
            Command::WriteParams,
            Command::SetParamDefaults,
            Command::AccelCalibration,
            Command::GyroCalibration,
            Command::BaroCalibration,
            Command::AirspeedCalibration,
        ] {
            assert_eq!(
                handler.handle(command, &mut sensors, &mut ctx),
                CommandResult::Failed
            );
        }

        assert_eq!(ctx.params.get_float(ParamId::GyroXBias), 0.3);
        assert_eq!(ctx.params.memory().write_count(), 0);
        assert!(sensors.gyro_calibration_complete());
        assert_eq!(sensors.board().baro_calibration_count(), 0);
    }
}
