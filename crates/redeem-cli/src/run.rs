//! # Run Subcommand
//!
//! Drives one redemption session end to end from command-line values:
//! fills step 1, selects and enters the payment key, accepts the terms,
//! and awaits the simulated confirmation. Stage updates go to stderr; the
//! completion record is returned for printing.
//!
//! Ctrl-C during confirmation tears the session down.

use anyhow::{bail, Context};
use clap::Args;

use redeem_core::messages::Notice;
use redeem_core::KeyType;
use redeem_sim::{prefill_from_env, RedemptionRuntime, SimulationConfig, SimulationEvent};
use redeem_state::{CompletionRecord, Field, FormEvent, Prefill, SubmitOutcome, Transition};

/// Arguments for the run subcommand.
#[derive(Args, Debug)]
pub struct RunArgs {
    /// Full name. Falls back to REDEEM_PREFILL_NAME.
    #[arg(long)]
    pub name: Option<String>,

    /// Document number (CPF).
    #[arg(long)]
    pub document: String,

    /// Mobile phone with area code.
    #[arg(long)]
    pub phone: String,

    /// Email address.
    #[arg(long)]
    pub email: String,

    /// Payment key type: cpf, email, phone, or random.
    #[arg(long, default_value = "cpf")]
    pub key_type: KeyType,

    /// Payment key value.
    #[arg(long)]
    pub key: String,

    /// Accept the terms of the redemption.
    #[arg(long)]
    pub accept_terms: bool,

    /// Prize amount shown in the summary. Falls back to REDEEM_PREFILL_PRIZE.
    #[arg(long)]
    pub prize: Option<String>,

    /// Reference protocol shown in the summary. Falls back to REDEEM_PREFILL_PROTOCOL.
    #[arg(long)]
    pub protocol: Option<String>,

    /// Use short stage delays.
    #[arg(long)]
    pub fast: bool,
}

impl RunArgs {
    fn prefill(&self) -> Prefill {
        let env = prefill_from_env();
        Prefill {
            display_name: self.name.clone().or(env.display_name),
            prize_amount: self.prize.clone().or(env.prize_amount),
            protocol: self.protocol.clone().or(env.protocol),
        }
    }

    fn config(&self) -> anyhow::Result<SimulationConfig> {
        if self.fast {
            return Ok(SimulationConfig::fast());
        }
        SimulationConfig::from_env().context("loading simulation config")
    }
}

/// Run a full session. Must be called on a Tokio runtime.
pub async fn execute(args: RunArgs) -> anyhow::Result<CompletionRecord> {
    let mut rt = RedemptionRuntime::start(args.config()?, args.prefill());

    let events = [
        FormEvent::Input {
            field: Field::DocumentId,
            value: args.document.clone(),
        },
        FormEvent::Input {
            field: Field::Phone,
            value: args.phone.clone(),
        },
        FormEvent::Input {
            field: Field::Email,
            value: args.email.clone(),
        },
        FormEvent::Advance,
        FormEvent::SelectKeyType {
            key_type: args.key_type,
        },
        FormEvent::Input {
            field: Field::PaymentKey,
            value: args.key.clone(),
        },
        FormEvent::Advance,
        FormEvent::SetTerms {
            accepted: args.accept_terms,
        },
        FormEvent::Advance,
    ];
    let mut last = Transition::Unchanged;
    for event in events {
        last = apply(&mut rt, event)?;
    }
    if last != Transition::ConfirmRequested {
        bail!("session did not reach confirmation ({last:?})");
    }

    let mut updates = rt.subscribe_simulation();
    let teardown = rt.teardown_handle();
    let outcome = {
        let confirm = rt.confirm();
        tokio::pin!(confirm);
        loop {
            tokio::select! {
                outcome = &mut confirm => break outcome,
                Some(event) = updates.recv() => report(&event),
                _ = tokio::signal::ctrl_c(), if !teardown.is_cancelled() => teardown.cancel(),
            }
        }
    };
    while let Ok(event) = updates.try_recv() {
        report(&event);
    }

    match outcome? {
        SubmitOutcome::Completed(record) | SubmitOutcome::AlreadyCompleted(record) => {
            eprintln!("{}", Notice::PrizeReleased.text());
            Ok(record)
        }
        SubmitOutcome::Cancelled => bail!("redemption cancelled"),
    }
}

fn apply(rt: &mut RedemptionRuntime, event: FormEvent) -> anyhow::Result<Transition> {
    match rt.handle(event) {
        Ok(transition) => {
            if let Transition::FieldUpdated { field, valid: false } = transition {
                tracing::warn!(?field, "field value is invalid");
            }
            Ok(transition)
        }
        Err(err) => match err.notice() {
            Some(notice) => bail!("{}: {err}", notice.text()),
            None => Err(err.into()),
        },
    }
}

fn report(event: &SimulationEvent) {
    match event {
        SimulationEvent::Status { title, detail, .. } => eprintln!("{title} {detail}"),
        SimulationEvent::Completed(_) => {}
        SimulationEvent::Cancelled { stage } => eprintln!("cancelled during {stage}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args() -> RunArgs {
        RunArgs {
            name: Some("Ana Lima".to_string()),
            document: "52998224725".to_string(),
            phone: "11999999999".to_string(),
            email: "ana@mail.com".to_string(),
            key_type: KeyType::Email,
            key: "ana@mail.com".to_string(),
            accept_terms: true,
            prize: Some("R$ 10.000,00".to_string()),
            protocol: None,
            fast: true,
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_completes() {
        let record = execute(args()).await.unwrap();
        assert_eq!(record.prize_amount, "R$ 10.000,00");
        assert_eq!(record.masked_key, "an***@mail.com");
        assert!(record.protocol_code.starts_with("TSN-LIB-2025-"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_without_terms_is_refused() {
        let err = execute(RunArgs {
            accept_terms: false,
            ..args()
        })
        .await
        .unwrap_err();
        assert!(err.to_string().starts_with("Por favor, aceite os termos"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_with_bad_document_is_refused() {
        let err = execute(RunArgs {
            document: "11111111111".to_string(),
            ..args()
        })
        .await
        .unwrap_err();
        assert!(err.to_string().contains("document_id"));
    }
}
