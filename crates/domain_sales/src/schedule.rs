//! Payment-stage allocation over one invoice's grand total
//!
//! The three stages are ordered: token → agreement → registration. Each
//! setter re-derives everything downstream of the stage it touches and
//! leaves upstream stages alone. A new stage proposes "take the rest", and
//! an explicit edit to an intermediate stage shifts only the defaults below
//! it, so no "was this field user-edited" flag is needed.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use core_kernel::Money;

/// The token / agreement / registration breakdown of a grand total
///
/// `remaining` is never stored: it is recomputed on every read from the
/// grand total passed in, so it cannot drift from its formula. If the grand
/// total changes after stages were set, the stage amounts stay frozen and
/// `remaining` exposes the imbalance for the caller to highlight.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentSchedule {
    /// Token advance collected up front
    pub token_amount: Money,
    /// Amount due at agreement
    pub agreement_amount: Money,
    /// When the agreement amount falls due
    pub agreement_due_date: Option<NaiveDate>,
    /// Amount due at registration
    pub registration_amount: Money,
    /// When the registration amount falls due
    pub registration_due_date: Option<NaiveDate>,
}

impl PaymentSchedule {
    /// Creates an all-zero schedule
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the token amount, clamped to `[0, grand_total]`
    ///
    /// The untaken balance is proposed entirely to the agreement stage and
    /// the registration proposal resets to zero, since nothing downstream
    /// has been confirmed against the new token yet.
    pub fn set_token(&mut self, amount: Money, grand_total: Money) {
        self.token_amount = amount.clamp(Money::zero(), grand_total);
        self.agreement_amount = grand_total - self.token_amount;
        self.registration_amount = Money::zero();
    }

    /// Sets the agreement amount, clamped to `[0, grand_total − token]`
    ///
    /// Whatever the agreement does not take is proposed to registration.
    pub fn set_agreement_due(&mut self, amount: Money, grand_total: Money) {
        let balance = grand_total - self.token_amount;
        self.agreement_amount = amount.clamp(Money::zero(), balance);
        self.registration_amount = balance - self.agreement_amount;
    }

    /// Sets the registration amount, clamped to the balance after agreement
    ///
    /// Terminal stage: anything it leaves untaken shows up in `remaining`.
    pub fn set_registration_due(&mut self, amount: Money, grand_total: Money) {
        let balance = grand_total - self.token_amount - self.agreement_amount;
        self.registration_amount = amount.clamp(Money::zero(), balance);
    }

    /// Sets the agreement due date
    pub fn set_agreement_due_date(&mut self, date: Option<NaiveDate>) {
        self.agreement_due_date = date;
    }

    /// Sets the registration due date
    pub fn set_registration_due_date(&mut self, date: Option<NaiveDate>) {
        self.registration_due_date = date;
    }

    /// Sum of the three explicit stages
    pub fn allocated(&self) -> Money {
        self.token_amount + self.agreement_amount + self.registration_amount
    }

    /// `grand_total − token − agreement − registration`, computed on read
    ///
    /// Negative when the grand total shrank after the stages were set.
    pub fn remaining(&self, grand_total: Money) -> Money {
        grand_total - self.allocated()
    }
}
