//! Implements InputPort. Inquire-based onboarding wizard.
//!
//! Landing -> intake chat -> loading -> dashboard -> checkout.

use crate::adapters::ui::progress::spinner;
use crate::domain::entities::{format_amount, format_card_number};
use crate::domain::{
    CardDetails, DomainError, IntakeData, Location, MatchResult, Peer, UserProfile,
};
use crate::ports::InputPort;
use crate::usecases::intake_service::{self, CLOSING, FEELINGS_QUESTION, HOBBY_HINT, HOBBY_QUESTION};
use crate::usecases::{CheckoutService, IntakeService, MatchService};
use async_trait::async_trait;
use crossterm::style::Stylize;
use inquire::ui::{Color, RenderConfig, Styled};
use inquire::validator::Validation;
use inquire::{Confirm, InquireError, Password, PasswordDisplayMode, Select, Text};
use std::sync::Arc;
use std::time::Duration;

/// Pause on the loading step so the transition does not feel abrupt.
const LOADING_PAUSE: Duration = Duration::from_millis(1200);

/// Sage prompt prefix for every inquire prompt.
pub fn apply_theme() {
    let config = RenderConfig::default()
        .with_prompt_prefix(Styled::new("🌿").with_fg(Color::LightGreen))
        .with_answered_prompt_prefix(Styled::new("✓").with_fg(Color::DarkGreen));
    inquire::set_global_render_config(config);
}

fn prompt_err(e: InquireError) -> DomainError {
    DomainError::Prompt(e.to_string())
}

fn say(text: &str) {
    println!("{} {}\n", "Mentra:".green().bold(), text);
}

fn non_empty(input: &str) -> Result<Validation, inquire::CustomUserError> {
    if input.trim().is_empty() {
        Ok(Validation::Invalid("Please write a few words.".into()))
    } else {
        Ok(Validation::Valid)
    }
}

fn peer_line(peer: &Peer) -> String {
    format!(
        "{}  {}  · loves {}",
        peer.name.as_str().bold(),
        peer.category.label().to_uppercase().dark_grey(),
        peer.hobby
    )
}

/// Text block shown on the dashboard step.
pub fn dashboard_text(matched: &MatchResult) -> String {
    let mut out = String::new();
    out.push_str("You are not alone.\n");
    out.push_str(&format!("Welcome to {}\n", matched.group_name));
    out.push_str(&format!("Shared Focus: {}\n", matched.focus_label()));
    if matched.user_categories.len() > 1 {
        out.push_str(&format!("Matched for: {}\n", matched.categories_joined(" & ")));
    }
    out.push_str(&format!("Icebreaker: {}\n", matched.icebreaker));
    out
}

/// TUI adapter. Inquire prompts.
pub struct TuiInputPort {
    intake: Arc<IntakeService>,
    matching: Arc<MatchService>,
    checkout: Arc<CheckoutService>,
}

impl TuiInputPort {
    pub fn new(
        intake: Arc<IntakeService>,
        matching: Arc<MatchService>,
        checkout: Arc<CheckoutService>,
    ) -> Self {
        Self {
            intake,
            matching,
            checkout,
        }
    }

    fn landing(&self) -> Result<UserProfile, DomainError> {
        println!("{}\n", "Find your circle. Heal together.".bold());
        let name = Text::new("Your name:")
            .with_validator(|s: &str| non_empty(s))
            .prompt()
            .map_err(prompt_err)?;
        let email = Text::new("Email:")
            .with_validator(|s: &str| -> Result<Validation, inquire::CustomUserError> {
                if s.trim().contains('@') {
                    Ok(Validation::Valid)
                } else {
                    Ok(Validation::Invalid("Enter a valid email address.".into()))
                }
            })
            .prompt()
            .map_err(prompt_err)?;
        loop {
            let location = Select::new("Location:", Location::ALL.to_vec())
                .prompt()
                .map_err(prompt_err)?;
            match UserProfile::new(&name, &email, location) {
                Ok(profile) => return Ok(profile),
                Err(DomainError::Validation(msg)) if !location.is_operating() => {
                    println!("{}\n", msg.yellow());
                }
                Err(e) => return Err(e),
            }
        }
    }

    async fn intake(&self, profile: &UserProfile) -> Result<IntakeData, DomainError> {
        say(&intake_service::greeting(&profile.name));
        say(FEELINGS_QUESTION);
        let feelings = Text::new("You:")
            .with_validator(|s: &str| non_empty(s))
            .prompt()
            .map_err(prompt_err)?;
        say(&self.intake.reflect_feelings(&feelings).await);

        say(&format!("{}\n{}", HOBBY_QUESTION, HOBBY_HINT.dark_grey()));
        let hobby = Text::new("You:")
            .with_validator(|s: &str| non_empty(s))
            .prompt()
            .map_err(prompt_err)?;
        say(&self.intake.reflect_hobby(&hobby).await);
        say(CLOSING);

        let ready = Confirm::new("Meet your circle?")
            .with_default(true)
            .prompt()
            .map_err(prompt_err)?;
        if !ready {
            return Err(DomainError::Prompt("intake cancelled".into()));
        }

        let pb = spinner("Understanding what you shared...");
        let data = self.intake.complete(&feelings, &hobby).await;
        pb.finish_and_clear();
        Ok(data)
    }

    async fn find_circle(&self, intake: &IntakeData) -> MatchResult {
        let pb = spinner("Connecting you with your sphere...");
        let matched = self.matching.match_intake(intake);
        tokio::time::sleep(LOADING_PAUSE).await;
        pb.finish_and_clear();
        matched
    }

    fn dashboard(&self, matched: &MatchResult) {
        println!("{}", dashboard_text(matched).green());
        for peer in &matched.peers {
            println!("  • {}", peer_line(peer));
        }
        println!();
    }

    fn card_details(&self) -> Result<CardDetails, DomainError> {
        loop {
            let number = Text::new("Card number:")
                .with_placeholder("0000 0000 0000 0000")
                .with_formatter(&format_card_number)
                .prompt()
                .map_err(prompt_err)?;
            let expiry = Text::new("Expiry (MM/YY):")
                .prompt()
                .map_err(prompt_err)?;
            let cvc = Password::new("CVC:")
                .without_confirmation()
                .with_display_mode(PasswordDisplayMode::Masked)
                .prompt()
                .map_err(prompt_err)?;
            let holder = Text::new("Cardholder name:")
                .prompt()
                .map_err(prompt_err)?;

            match CardDetails::new(&number, &expiry, &cvc, &holder) {
                Ok(card) => return Ok(card),
                Err(e) => println!("{}\n", e.to_string().red()),
            }
        }
    }

    async fn pay(&self, profile: &UserProfile, matched: &MatchResult) -> Result<(), DomainError> {
        let price = format_amount(self.checkout.price_cents());
        println!(
            "{}  {}  (30-Day Money-Back Guarantee)\n",
            "Commitment fee:".bold(),
            price
        );
        let card = self.card_details()?;

        let pb = spinner("Processing payment and personalizing your welcome packet...");
        let outcome = self.checkout.checkout(profile, matched, &card).await;
        pb.finish_and_clear();
        let outcome = outcome?;

        println!("{}", "You're in!".green().bold());
        println!(
            "Paid {} with {} ({}) · ref {}",
            format_amount(outcome.receipt.amount_cents),
            outcome.receipt.masked_card,
            outcome.receipt.cardholder,
            outcome.receipt.reference
        );
        if outcome.welcome_sent {
            println!("A personalized welcome letter is on its way to {}.", profile.email);
        }
        println!("Session brief saved to {}", outcome.brief_path.display());
        Ok(())
    }
}

#[async_trait]
impl InputPort for TuiInputPort {
    async fn run(&self) -> Result<(), DomainError> {
        let profile = self.landing()?;
        let intake = self.intake(&profile).await?;
        let matched = self.find_circle(&intake).await;
        self.dashboard(&matched);

        let join = Confirm::new(&format!("Secure your spot with {}?", matched.group_name))
            .with_default(true)
            .prompt()
            .map_err(prompt_err)?;
        if !join {
            say("Your circle will be here whenever you are ready.");
            return Ok(());
        }
        self.pay(&profile, &matched).await
    }
}
