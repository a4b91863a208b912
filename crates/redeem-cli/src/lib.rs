//! # redeem-cli: Redemption Wizard Command-Line Interface
//!
//! ## Subcommands
//!
//! - `validate`: check one value against a field validator
//! - `mask`: privacy-safe display form of a payment key
//! - `format`: as-you-type formatting of a payment key
//! - `run`: a full simulated redemption session
//!
//! ## Crate Policy
//!
//! - Argument parsing is separated from the handlers.
//! - Handlers delegate to the domain crates; no business logic here.
//! - Results go to stdout (JSON where structured); progress goes to stderr.

pub mod inspect;
pub mod run;
