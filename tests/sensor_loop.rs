use kestrel::communication::{Command, CommandHandler, CommandResult};
use kestrel::core::context::FlightContext;
use kestrel::core::parameters::{DispatchTable, ParameterStore, StreamId, SubsystemHooks};
use kestrel::core::state::{StateManager, StatusBoard};
use kestrel::platform::mock::{MockBoard, MockMemory};
use kestrel::platform::NonVolatileMemory;
use kestrel::subsystems::estimator::MockEstimator;
use kestrel::subsystems::Sensors;
use kestrel_core::parameters::{ParamId, IMAGE_SIZE};
use kestrel_core::sensors::ImuSample;
use kestrel_core::status::{Event, Fault};
use nalgebra::Vector3;

/// Records what parameter dispatch asked the rest of the firmware to do.
#[derive(Debug, Default)]
struct Hooks {
    system_id: Option<i32>,
    imu_rate: Option<i32>,
    mixer_reinits: u32,
}

impl SubsystemHooks for Hooks {
    fn set_system_id(&mut self, system_id: i32) {
        self.system_id = Some(system_id);
    }

    fn set_stream_rate(&mut self, stream: StreamId, rate_hz: i32) {
        if stream == StreamId::Imu {
            self.imu_rate = Some(rate_hz);
        }
    }

    fn reinit_rc(&mut self) {}

    fn reinit_pwm(&mut self) {}

    fn reinit_mixer(&mut self) {
        self.mixer_reinits += 1;
    }
}

type Ctx = FlightContext<MockMemory, DispatchTable<Hooks>, StatusBoard, MockEstimator>;

fn boot(memory: MockMemory) -> (Sensors<MockBoard>, Ctx, bool) {
    let mut params = ParameterStore::new(memory, DispatchTable::standard(Hooks::default()));
    let loaded = params.init();
    let mut ctx = FlightContext::new(params, StatusBoard::new(), MockEstimator::default());
    let mut sensors = Sensors::new(MockBoard::new());
    sensors.init(&mut ctx).unwrap();
    (sensors, ctx, loaded)
}

fn level_sample(offset: Vector3<f32>, gyro: Vector3<f32>) -> ImuSample {
    ImuSample {
        accel: Vector3::new(0.0, 0.0, -9.80665) + offset,
        gyro,
        temperature: 25.0,
        timestamp_us: 0,
    }
}

fn persisted(ctx: &Ctx) -> MockMemory {
    let mut memory = MockMemory::new();
    memory
        .write(&ctx.params.memory().contents()[..IMAGE_SIZE])
        .unwrap();
    memory
}

#[test]
fn test_first_boot_uses_defaults_and_dispatches() {
    let (_sensors, ctx, loaded) = boot(MockMemory::new());

    assert!(!loaded);
    assert_eq!(ctx.params.memory().write_count(), 1);
    assert_eq!(ctx.params.observer().hooks().system_id, Some(1));
    assert_eq!(ctx.params.observer().hooks().imu_rate, Some(100));
    assert!(ctx.state.has_error(Fault::UncalibratedImu));
}

#[test]
fn test_calibration_survives_reboot() {
    let (mut sensors, mut ctx, _) = boot(MockMemory::new());
    let mut handler = CommandHandler::new();

    let result = handler.handle(Command::AccelCalibration, &mut sensors, &mut ctx);
    assert_eq!(result, CommandResult::Success);

    let offset = Vector3::new(0.05, -0.02, 0.1);
    let drift = Vector3::new(0.002, 0.001, -0.003);
    for _ in 0..1001 {
        sensors.board_mut().push_imu(level_sample(offset, drift));
        assert!(sensors.run(&mut ctx));
    }

    assert!(sensors.gyro_calibration_complete());
    assert!(sensors.accel_calibration_complete());
    assert!(!ctx.state.has_error(Fault::UncalibratedImu));
    assert_eq!(ctx.state.take_event(), Some(Event::CalibrationComplete));
    assert_eq!(ctx.state.take_event(), None);
    assert_eq!(ctx.estimator.adaptive_bias_resets, 1);
    assert_eq!(ctx.estimator.state_resets, 1);

    // Calibration changes stay in RAM until written
    assert!(ctx.params.is_dirty());
    let result = handler.handle(Command::WriteParams, &mut sensors, &mut ctx);
    assert_eq!(result, CommandResult::Success);

    let (_sensors, rebooted, loaded) = boot(persisted(&ctx));
    assert!(loaded);
    assert!(!rebooted.state.has_error(Fault::UncalibratedImu));
    assert!((rebooted.params.get_float(ParamId::AccXBias) - 0.05).abs() < 1e-3);
    assert!((rebooted.params.get_float(ParamId::GyroZBias) + 0.003).abs() < 1e-5);
}

#[test]
fn test_corrupted_image_reboots_with_defaults() {
    let (mut sensors, mut ctx, _) = boot(MockMemory::new());
    // Boot dispatch already re-initialized the mixer for MIXER and FIXED_WING
    assert_eq!(ctx.params.observer().hooks().mixer_reinits, 2);
    ctx.params.set_int(ParamId::Mixer, 3).unwrap();
    assert_eq!(ctx.params.observer().hooks().mixer_reinits, 3);
    let mut handler = CommandHandler::new();
    handler.handle(Command::WriteParams, &mut sensors, &mut ctx);

    let mut memory = persisted(&ctx);
    memory.inject_corruption(200, 0x01);

    let (_sensors, rebooted, loaded) = boot(memory);
    assert!(!loaded);
    assert_eq!(rebooted.params.get_int(ParamId::Mixer), 1);
}

#[test]
fn test_stalled_imu_raises_fault_until_data_returns() {
    let (mut sensors, mut ctx, _) = boot(MockMemory::new());

    for _ in 0..3 {
        sensors.board().time().advance_ms(600);
        assert!(!sensors.run(&mut ctx));
    }
    assert!(ctx.state.has_error(Fault::ImuNotResponding));
    assert_eq!(sensors.board().not_responding_count(), 2);

    sensors
        .board_mut()
        .push_imu(level_sample(Vector3::zeros(), Vector3::zeros()));
    assert!(sensors.run(&mut ctx));
    assert!(!ctx.state.has_error(Fault::ImuNotResponding));
}

#[test]
fn test_commands_refused_in_flight() {
    let (mut sensors, mut ctx, _) = boot(MockMemory::new());
    ctx.state.set_armed(true);
    assert!(ctx.state.is_armed());

    let mut handler = CommandHandler::new();
    let result = handler.handle(Command::GyroCalibration, &mut sensors, &mut ctx);
    assert_eq!(result, CommandResult::Failed);
    assert!(sensors.gyro_calibration_complete());
}
