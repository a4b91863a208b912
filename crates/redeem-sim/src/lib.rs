//! # redeem-sim: Payment Simulation and Session Timers
//!
//! Everything time-based in a redemption session:
//!
//! - **Simulator** (`simulator.rs`): `PaymentSimulator`, the staged
//!   confirmation run behind the `ConfirmationDriver` seam.
//! - **Protocol** (`protocol.rs`): completion protocol codes.
//! - **Countdown** (`countdown.rs`): the payment-window and urgency clocks.
//! - **Scope** (`scope.rs`): cancellable timer scopes shared by all of the
//!   above.
//! - **Runtime** (`runtime.rs`): one session wired together, with teardown.
//! - **Config** (`config.rs`): timings from defaults or the environment.
//!
//! All work runs on a single-threaded executor. Delays are cooperative:
//! cancelling a scope resolves every wait inside it immediately.

pub mod config;
pub mod countdown;
pub mod protocol;
pub mod runtime;
pub mod scope;
pub mod simulator;

pub use config::{prefill_from_env, ConfigError, SimulationConfig};
pub use countdown::{Countdown, OnZero, SessionTimers, TimerSnapshot};
pub use protocol::{generate_protocol_code, protocol_code_at, DEFAULT_PROTOCOL_PREFIX};
pub use runtime::RedemptionRuntime;
pub use scope::{Cancelled, TimerScope};
pub use simulator::{PaymentSimulator, SimulationEvent, SimulationStage};
