//! Shared flight state
//!
//! Everything the sensor pipeline reads or mutates besides its own snapshot:
//! the parameter store, the state manager and the estimator. Owned by the
//! application for the lifetime of the program and passed by `&mut` into
//! each entry point, so there is no hidden global state.

use super::parameters::{ParamObserver, ParameterStore};
use super::state::StateManager;
use crate::platform::traits::NonVolatileMemory;
use crate::subsystems::estimator::EstimatorHooks;

/// Shared flight state
pub struct FlightContext<M, O, S, E>
where
    M: NonVolatileMemory,
    O: ParamObserver,
    S: StateManager,
    E: EstimatorHooks,
{
    pub params: ParameterStore<M, O>,
    pub state: S,
    pub estimator: E,
}

impl<M, O, S, E> FlightContext<M, O, S, E>
where
    M: NonVolatileMemory,
    O: ParamObserver,
    S: StateManager,
    E: EstimatorHooks,
{
    pub fn new(params: ParameterStore<M, O>, state: S, estimator: E) -> Self {
        Self {
            params,
            state,
            estimator,
        }
    }
}
