//! Simulated checkout. Implements PaymentPort without contacting a processor.
//!
//! Card details are validated by the domain type; nothing is stored or transmitted.

use crate::domain::brief::new_reference;
use crate::domain::{CardDetails, DomainError, Receipt, UserProfile};
use crate::ports::PaymentPort;
use chrono::Utc;
use std::time::Duration;
use tracing::info;

/// Approves every charge after a fixed delay.
pub struct SimulatedPayment {
    delay_ms: u64,
}

impl SimulatedPayment {
    pub fn new(delay_ms: u64) -> Self {
        Self { delay_ms }
    }
}

#[async_trait::async_trait]
impl PaymentPort for SimulatedPayment {
    async fn charge(
        &self,
        profile: &UserProfile,
        card: &CardDetails,
        amount_cents: u64,
    ) -> Result<Receipt, DomainError> {
        if amount_cents == 0 {
            return Err(DomainError::Payment("amount must be positive".into()));
        }
        info!(
            email = %profile.email,
            card = %card.masked(),
            expiry = %card.expiry,
            amount_cents,
            "[SIMULATED] charging card"
        );
        tokio::time::sleep(Duration::from_millis(self.delay_ms)).await;

        let receipt = Receipt {
            reference: new_reference(&mut rand::thread_rng()),
            amount_cents,
            masked_card: card.masked(),
            cardholder: card.holder.clone(),
            paid_at: Utc::now(),
        };
        info!(reference = %receipt.reference, "[SIMULATED] payment approved");
        Ok(receipt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Location;

    fn fixtures() -> (UserProfile, CardDetails) {
        (
            UserProfile::new("Ana", "ana@example.com", Location::Dubai).unwrap(),
            CardDetails::new("4000 0566 5566 5556", "09/28", "321", "Ana Lee").unwrap(),
        )
    }

    #[tokio::test]
    async fn test_simulated_charge_returns_receipt() {
        let (profile, card) = fixtures();
        let receipt = SimulatedPayment::new(1)
            .charge(&profile, &card, 2000)
            .await
            .unwrap();
        assert_eq!(receipt.amount_cents, 2000);
        assert_eq!(receipt.masked_card, "**** 5556");
        assert_eq!(receipt.cardholder, "Ana Lee");
        assert!(receipt.reference.starts_with("MS-"));
    }

    #[tokio::test]
    async fn test_zero_amount_rejected() {
        let (profile, card) = fixtures();
        let err = SimulatedPayment::new(1)
            .charge(&profile, &card, 0)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Payment(_)));
    }
}
