// 💳 Payment Ledger
//
// Append-only list of tuition payments. Entries are never edited or
// removed once recorded.

use crate::error::{RecordError, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawPayment")]
pub struct Payment {
    amount: f64,
    date: NaiveDate,
}

/// Wire shape of a payment; deserialized payments go through `Payment::new`
#[derive(Deserialize)]
struct RawPayment {
    amount: f64,
    date: NaiveDate,
}

impl TryFrom<RawPayment> for Payment {
    type Error = RecordError;

    fn try_from(raw: RawPayment) -> Result<Self> {
        Payment::new(raw.amount, raw.date)
    }
}

impl Payment {
    /// Build a payment, rejecting amounts that are not strictly positive
    pub fn new(amount: f64, date: NaiveDate) -> Result<Self> {
        // NaN and infinities fail here too
        if !(amount > 0.0 && amount.is_finite()) {
            return Err(RecordError::InvalidArgument(format!(
                "Amount must be positive, got {}",
                amount
            )));
        }
        Ok(Payment { amount, date })
    }

    pub fn amount(&self) -> f64 {
        self.amount
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }
}

impl fmt::Display for Payment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Payment{{amount={:.2}, date={}}}", self.amount, self.date)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PaymentLedger {
    payments: Vec<Payment>,
}

impl PaymentLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, payment: Payment) {
        self.payments.push(payment);
    }

    pub fn as_slice(&self) -> &[Payment] {
        &self.payments
    }

    pub fn iter(&self) -> impl Iterator<Item = &Payment> {
        self.payments.iter()
    }

    pub fn len(&self) -> usize {
        self.payments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.payments.is_empty()
    }

    /// Sum of all recorded amounts
    pub fn total(&self) -> f64 {
        self.payments.iter().map(|p| p.amount).sum()
    }
}

/// Renders as `[Payment{amount=250.50, date=2024-05-01}]`
impl fmt::Display for PaymentLedger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, payment) in self.payments.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", payment)?;
        }
        f.write_str("]")
    }
}

/// Anything that keeps a payment ledger (students only)
pub trait HasPayments {
    fn payments(&self) -> &PaymentLedger;
    fn payments_mut(&mut self) -> &mut PaymentLedger;

    /// Record a payment dated today
    fn register_payment(&mut self, amount: f64) -> Result<Payment> {
        self.register_payment_on(amount, crate::today())
    }

    /// Record a payment with an explicit date
    fn register_payment_on(&mut self, amount: f64, date: NaiveDate) -> Result<Payment> {
        let payment = Payment::new(amount, date).map_err(|e| {
            tracing::warn!(amount, "payment rejected");
            e
        })?;
        tracing::debug!(amount, %date, "payment registered");
        self.payments_mut().push(payment.clone());
        Ok(payment)
    }

    /// Copy of the payment history
    fn view_payments(&self) -> PaymentLedger {
        self.payments().clone()
    }
}
