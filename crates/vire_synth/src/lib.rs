//! Structural synthesis of typed expressions.
//!
//! Lowers width-resolved [`Expr`] trees into devices and nets of a
//! [`Design`]. A failed sub-expression reports a diagnostic through the
//! design's sink and yields `Ok(None)`; its siblings keep going so one pass
//! reports as many problems as possible. `Err` is reserved for input that
//! breaks an invariant elaboration is supposed to guarantee.
//!
//! # Usage
//!
//! ```ignore
//! use vire_synth::synthesize;
//! let net = synthesize(&mut design, &expr, &config.synth)?;
//! ```

#![warn(missing_docs)]

mod binary;
mod coerce;
pub mod errors;
mod synth_expr;

pub use coerce::{const_net, crop_to_width, extend, pad_to_width, real_literal};

use synth_expr::{synth_expr, SynthCtx};
use vire_common::VireResult;
use vire_config::SynthConfig;
use vire_ir::{Design, Expr, NetId};

/// Synthesizes one expression tree into `design`.
///
/// Returns the net carrying the expression's value, or `None` if synthesis
/// failed and at least one error-class diagnostic was counted.
pub fn synthesize(
    design: &mut Design,
    expr: &Expr,
    config: &SynthConfig,
) -> VireResult<Option<NetId>> {
    let errors_before = design.errors();
    let mut cx = SynthCtx {
        design: &mut *design,
        config,
    };
    let net = synth_expr(&mut cx, expr)?;
    if net.is_none() {
        log::debug!(
            "expression failed with {} new error(s)",
            design.errors() - errors_before
        );
    }
    Ok(net)
}

/// What happened to one root expression in [`synthesize_all`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RootOutcome {
    /// Synthesized to this net.
    Built(NetId),
    /// Attempted and failed; diagnostics were emitted.
    Failed,
    /// Not attempted because the error limit had been reached.
    Skipped,
}

impl RootOutcome {
    /// The result net, if the root was built.
    pub fn net(self) -> Option<NetId> {
        match self {
            RootOutcome::Built(net) => Some(net),
            RootOutcome::Failed | RootOutcome::Skipped => None,
        }
    }
}

/// Summary of a [`synthesize_all`] run.
#[derive(Debug, Clone, Default)]
pub struct SynthReport {
    /// One entry per root, in input order.
    pub outcomes: Vec<RootOutcome>,
    /// Error-class diagnostics counted by the design at the end of the run.
    pub errors: usize,
}

impl SynthReport {
    /// Number of roots that produced a net.
    pub fn built(&self) -> usize {
        self.count(|o| matches!(o, RootOutcome::Built(_)))
    }

    /// Number of roots that were attempted and failed.
    pub fn failed(&self) -> usize {
        self.count(|o| *o == RootOutcome::Failed)
    }

    /// Number of roots left unattempted.
    pub fn skipped(&self) -> usize {
        self.count(|o| *o == RootOutcome::Skipped)
    }

    /// `true` when every root was built and no errors were counted.
    pub fn is_clean(&self) -> bool {
        self.errors == 0 && self.built() == self.outcomes.len()
    }

    fn count(&self, pred: impl Fn(&RootOutcome) -> bool) -> usize {
        self.outcomes.iter().filter(|o| pred(o)).count()
    }
}

/// Synthesizes each root expression in order.
///
/// Once the design has counted `config.error_limit` errors, the remaining
/// roots are marked [`RootOutcome::Skipped`]. Whether to abort compilation is
/// left to the caller.
pub fn synthesize_all(
    design: &mut Design,
    roots: &[Expr],
    config: &SynthConfig,
) -> VireResult<SynthReport> {
    let mut report = SynthReport::default();
    for (index, root) in roots.iter().enumerate() {
        if config.error_limit.is_some_and(|limit| design.errors() >= limit) {
            let remaining = roots.len() - index;
            log::debug!("error limit reached, skipping {remaining} root expression(s)");
            report
                .outcomes
                .extend(std::iter::repeat(RootOutcome::Skipped).take(remaining));
            break;
        }
        let outcome = match synthesize(design, root, config)? {
            Some(net) => RootOutcome::Built(net),
            None => RootOutcome::Failed,
        };
        report.outcomes.push(outcome);
    }
    report.errors = design.errors();
    log::debug!(
        "synthesized {} of {} root expression(s), {} error(s)",
        report.built(),
        roots.len(),
        report.errors
    );
    Ok(report)
}
