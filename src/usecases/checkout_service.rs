//! Checkout use case: charge, brief, welcome letter.
//!
//! Only the charge and the brief can fail the checkout. The welcome letter is
//! best-effort: composition falls back to a template and delivery errors are logged.

use crate::domain::{
    CardDetails, DomainError, MatchResult, Receipt, SessionBrief, UserProfile, WelcomeLetter,
};
use crate::ports::{AiPort, BriefWriterPort, NotifierPort, PaymentPort};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};

/// What the user gets back after paying.
#[derive(Debug)]
pub struct CheckoutOutcome {
    pub receipt: Receipt,
    pub brief_path: PathBuf,
    pub welcome_sent: bool,
}

pub struct CheckoutService {
    payment: Arc<dyn PaymentPort>,
    ai: Arc<dyn AiPort>,
    notifier: Arc<dyn NotifierPort>,
    briefs: Arc<dyn BriefWriterPort>,
    price_cents: u64,
}

impl CheckoutService {
    pub fn new(
        payment: Arc<dyn PaymentPort>,
        ai: Arc<dyn AiPort>,
        notifier: Arc<dyn NotifierPort>,
        briefs: Arc<dyn BriefWriterPort>,
        price_cents: u64,
    ) -> Self {
        Self {
            payment,
            ai,
            notifier,
            briefs,
            price_cents,
        }
    }

    pub fn price_cents(&self) -> u64 {
        self.price_cents
    }

    pub async fn checkout(
        &self,
        profile: &UserProfile,
        matched: &MatchResult,
        card: &CardDetails,
    ) -> Result<CheckoutOutcome, DomainError> {
        let receipt = self
            .payment
            .charge(profile, card, self.price_cents)
            .await?;
        info!(reference = %receipt.reference, "payment accepted");

        let welcome_sent = self.send_welcome(profile, matched).await;

        let brief = SessionBrief::new(profile.clone(), matched.clone(), receipt.reference.clone());
        let brief_path = self.briefs.write_brief(&brief).await?;

        Ok(CheckoutOutcome {
            receipt,
            brief_path,
            welcome_sent,
        })
    }

    /// Compose and deliver the welcome letter. Returns whether delivery succeeded.
    async fn send_welcome(&self, profile: &UserProfile, matched: &MatchResult) -> bool {
        let letter = match self.ai.compose_welcome(profile, matched).await {
            Ok(letter) => letter,
            Err(e) => {
                warn!(error = %e, "welcome letter generation failed, using template");
                WelcomeLetter::fallback(profile, matched)
            }
        };
        match self.notifier.send_welcome(profile, matched, &letter).await {
            Ok(()) => true,
            Err(e) => {
                warn!(error = %e, to = %profile.email, "welcome letter not delivered");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::MockAiAdapter;
    use crate::adapters::documents::MarkdownBriefWriter;
    use crate::adapters::integrations::LogNotifier;
    use crate::adapters::payment::SimulatedPayment;
    use crate::domain::{IntakeData, Location, Matcher};
    use std::sync::Mutex;

    struct BrokenRelay;

    #[async_trait::async_trait]
    impl NotifierPort for BrokenRelay {
        async fn send_welcome(
            &self,
            _: &UserProfile,
            _: &MatchResult,
            _: &WelcomeLetter,
        ) -> Result<(), DomainError> {
            Err(DomainError::Notify("relay unreachable".into()))
        }
    }

    struct DecliningProcessor;

    #[async_trait::async_trait]
    impl PaymentPort for DecliningProcessor {
        async fn charge(
            &self,
            _: &UserProfile,
            _: &CardDetails,
            _: u64,
        ) -> Result<Receipt, DomainError> {
            Err(DomainError::Payment("card declined".into()))
        }
    }

    /// Records every brief reference it is asked to write.
    #[derive(Default)]
    struct RecordingBriefs {
        written: Mutex<Vec<String>>,
    }

    #[async_trait::async_trait]
    impl BriefWriterPort for RecordingBriefs {
        async fn write_brief(&self, brief: &SessionBrief) -> Result<PathBuf, DomainError> {
            self.written
                .lock()
                .unwrap()
                .push(brief.reference.clone());
            Ok(PathBuf::from(format!("{}.md", brief.reference)))
        }
    }

    fn fixtures() -> (UserProfile, MatchResult, CardDetails) {
        let profile = UserProfile::new("Sara", "sara@example.com", Location::Dubai).unwrap();
        let matched = Matcher::default().find_matches(&IntakeData::new("burnout at work", "chess"));
        let card = CardDetails::new("4242 4242 4242 4242", "01/30", "999", "Sara K").unwrap();
        (profile, matched, card)
    }

    #[tokio::test]
    async fn test_checkout_writes_brief_and_sends_welcome() {
        let dir = tempfile::tempdir().unwrap();
        let service = CheckoutService::new(
            Arc::new(SimulatedPayment::new(1)),
            Arc::new(MockAiAdapter::with_delay(1)),
            Arc::new(LogNotifier::new()),
            Arc::new(MarkdownBriefWriter::new(dir.path())),
            2000,
        );
        let (profile, matched, card) = fixtures();

        let outcome = service.checkout(&profile, &matched, &card).await.unwrap();

        assert_eq!(outcome.receipt.amount_cents, 2000);
        assert!(outcome.welcome_sent);
        assert!(outcome.brief_path.exists());
        let md = tokio::fs::read_to_string(&outcome.brief_path).await.unwrap();
        assert!(md.contains(&outcome.receipt.reference));
        assert!(md.contains("Define clear 'clock-out' rituals"));
    }

    #[tokio::test]
    async fn test_notification_failure_does_not_fail_checkout() {
        let briefs = Arc::new(RecordingBriefs::default());
        let service = CheckoutService::new(
            Arc::new(SimulatedPayment::new(1)),
            Arc::new(MockAiAdapter::with_delay(1)),
            Arc::new(BrokenRelay),
            briefs.clone(),
            2000,
        );
        let (profile, matched, card) = fixtures();

        let outcome = service.checkout(&profile, &matched, &card).await.unwrap();

        assert!(!outcome.welcome_sent);
        assert_eq!(*briefs.written.lock().unwrap(), vec![outcome.receipt.reference]);
    }

    #[tokio::test]
    async fn test_declined_payment_writes_nothing() {
        let briefs = Arc::new(RecordingBriefs::default());
        let service = CheckoutService::new(
            Arc::new(DecliningProcessor),
            Arc::new(MockAiAdapter::with_delay(1)),
            Arc::new(LogNotifier::new()),
            briefs.clone(),
            2000,
        );
        let (profile, matched, card) = fixtures();

        let err = service.checkout(&profile, &matched, &card).await.unwrap_err();

        assert!(matches!(err, DomainError::Payment(_)));
        assert!(briefs.written.lock().unwrap().is_empty());
    }
}
