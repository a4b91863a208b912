//! # redeem-state: Wizard State Machine
//!
//! Owns the session record of one redemption wizard and enforces its step
//! gates.
//!
//! ## Modules
//!
//! - **Session** (`session.rs`): the single owned record (candidate fields,
//!   payment key, consent flag, prize context, completion).
//! - **Machine** (`machine.rs`): `FormStateMachine` with gated forward
//!   navigation, free backward navigation, and the asynchronous
//!   confirmation seam `ConfirmationDriver`.
//! - **Command** (`command.rs`): `handle(event) -> Transition`, the only way
//!   UI adapters talk to the machine.
//! - **View** (`view.rs`): rendering as a pure projection of the session,
//!   including the masked summary.
//! - **Errors** (`error.rs`): guard rejections and frozen-session refusals.
//!
//! ## Design
//!
//! There is no process-wide state. Each machine owns exactly one session,
//! and the session has no public setters: every write goes through a
//! machine entry point or the completion handler, which keeps each field's
//! validity flag consistent with its raw text.

pub mod command;
pub mod error;
pub mod machine;
pub mod session;
pub mod view;

pub use command::{FormEvent, Transition};
pub use error::{Requirement, TransitionError};
pub use machine::{ConfirmationDriver, DriverOutcome, FormStateMachine, SubmitOutcome};
pub use session::{
    Candidate, CompletionRecord, Field, FieldEntry, FormSession, PaymentKey, Prefill,
    PrizeContext, SessionId, StepId,
};
pub use view::{IndicatorState, MaskedSummary, SessionView};
