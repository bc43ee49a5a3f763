use crate::analytics::{actions, categories, AnalyticsEvent, EventTracker};
use crate::catalog::{DESIRED_LOCATIONS, INVESTMENT_CAPACITIES};
use crate::engagement::notify::{Notice, Notifier};
use regex::Regex;
use serde::Serialize;
use serde_json::json;
use std::collections::BTreeMap;
use std::sync::{Arc, OnceLock};

/// Lifecycle of a form: `Idle → Validating → Submitting → Success | Error`,
/// with `Error` feeding back into the next submit attempt.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionPhase {
    #[default]
    Idle,
    Validating,
    Submitting,
    Success,
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FormField {
    Name,
    Email,
    Phone,
    InvestmentCapacity,
    DesiredLocations,
}

/// Field-level validation messages. Keys are constrained to the form's own
/// fields by construction.
pub type FieldErrors = BTreeMap<FormField, String>;

fn email_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid"))
}

fn phone_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^[+]?[(]?[0-9]{1,4}[)]?[-\s./0-9]*$").expect("phone pattern is valid")
    })
}

pub fn is_valid_email(value: &str) -> bool {
    email_pattern().is_match(value)
}

/// Shape check plus a floor of ten digits once formatting is stripped.
pub fn is_valid_phone(value: &str) -> bool {
    let digits = value.chars().filter(char::is_ascii_digit).count();
    phone_pattern().is_match(value) && digits >= 10
}

/// What a submit attempt resolved to before any delivery happened.
#[derive(Debug)]
pub enum SubmitDecision<P> {
    /// A delivery is already in flight; the attempt is a no-op.
    AlreadySubmitting,
    /// Validation failed; the error map is on the form.
    Invalid,
    /// All fields valid; the payload is ready for the gateway.
    ReadyToDeliver(P),
}

/// How a completed delivery was applied to the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FinishOutcome {
    Succeeded,
    Failed,
    /// The form closed while the delivery was in flight; nothing was applied.
    Stale,
}

/// State for the private access request modal.
#[derive(Debug, Clone)]
pub struct PrivateAccessForm {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub investment_capacity: String,
    desired_locations: Vec<String>,
    phase: SubmissionPhase,
    errors: FieldErrors,
    open: bool,
}

impl Default for PrivateAccessForm {
    fn default() -> Self {
        Self::new()
    }
}

impl PrivateAccessForm {
    pub fn new() -> Self {
        Self {
            name: String::new(),
            email: String::new(),
            phone: String::new(),
            investment_capacity: String::new(),
            desired_locations: Vec::new(),
            phase: SubmissionPhase::Idle,
            errors: FieldErrors::new(),
            open: true,
        }
    }

    pub fn phase(&self) -> SubmissionPhase {
        self.phase
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn is_submitting(&self) -> bool {
        self.phase == SubmissionPhase::Submitting
    }

    pub fn desired_locations(&self) -> &[String] {
        &self.desired_locations
    }

    /// Multi-select toggle: selecting a location twice deselects it.
    pub fn toggle_location(&mut self, location: &str) {
        if let Some(index) = self.desired_locations.iter().position(|l| l == location) {
            self.desired_locations.remove(index);
        } else {
            self.desired_locations.push(location.to_string());
        }
    }

    /// Closing the modal resets the form; a delivery still in flight will
    /// land on a closed form and be discarded by [`PrivateAccessForm::finish`].
    pub fn close(&mut self) {
        self.open = false;
        self.clear_fields();
        self.errors.clear();
        self.phase = SubmissionPhase::Idle;
    }

    fn clear_fields(&mut self) {
        self.name.clear();
        self.email.clear();
        self.phone.clear();
        self.investment_capacity.clear();
        self.desired_locations.clear();
    }

    fn validate(&mut self) -> bool {
        let mut errors = FieldErrors::new();

        if self.name.trim().is_empty() {
            errors.insert(FormField::Name, "Please provide your full name.".to_string());
        }

        if self.email.trim().is_empty() {
            errors.insert(
                FormField::Email,
                "Please provide your email address.".to_string(),
            );
        } else if !is_valid_email(&self.email) {
            errors.insert(
                FormField::Email,
                "Please provide a valid email address.".to_string(),
            );
        }

        if self.phone.trim().is_empty() {
            errors.insert(
                FormField::Phone,
                "Please provide a contact number.".to_string(),
            );
        } else if !is_valid_phone(&self.phone) {
            errors.insert(
                FormField::Phone,
                "Please provide a valid international number for our private concierge."
                    .to_string(),
            );
        }

        if !INVESTMENT_CAPACITIES.contains(&self.investment_capacity.as_str()) {
            errors.insert(
                FormField::InvestmentCapacity,
                "Investment capacity is required to qualify for our portfolio.".to_string(),
            );
        }

        if self.desired_locations.is_empty() {
            errors.insert(
                FormField::DesiredLocations,
                "Please select at least one desired location.".to_string(),
            );
        } else if self
            .desired_locations
            .iter()
            .any(|location| !DESIRED_LOCATIONS.contains(&location.as_str()))
        {
            errors.insert(
                FormField::DesiredLocations,
                "Please choose from the locations we serve.".to_string(),
            );
        }

        self.errors = errors;
        self.errors.is_empty()
    }

    /// Run validation and, if everything passes, move to `Submitting` and
    /// hand back the payload for delivery. Re-entrant submits while a
    /// delivery is in flight are no-ops.
    pub fn submit(&mut self) -> SubmitDecision<PrivateAccessInquiry> {
        if self.is_submitting() {
            return SubmitDecision::AlreadySubmitting;
        }

        self.phase = SubmissionPhase::Validating;
        if !self.validate() {
            self.phase = SubmissionPhase::Error;
            return SubmitDecision::Invalid;
        }

        self.phase = SubmissionPhase::Submitting;
        SubmitDecision::ReadyToDeliver(PrivateAccessInquiry {
            name: self.name.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
            investment_capacity: self.investment_capacity.clone(),
            desired_locations: self.desired_locations.clone(),
            property_name: None,
        })
    }

    /// Apply the delivery result. Success clears the fields and closes the
    /// modal; failure preserves them so the user need not re-enter data. A
    /// result arriving after the modal closed is discarded.
    pub fn finish(&mut self, delivered: Result<(), InquiryError>) -> FinishOutcome {
        if !self.open {
            return FinishOutcome::Stale;
        }

        match delivered {
            Ok(()) => {
                self.clear_fields();
                self.errors.clear();
                self.phase = SubmissionPhase::Success;
                self.open = false;
                FinishOutcome::Succeeded
            }
            Err(_) => {
                self.phase = SubmissionPhase::Error;
                FinishOutcome::Failed
            }
        }
    }
}

/// State for the inline newsletter form.
#[derive(Debug, Clone, Default)]
pub struct NewsletterForm {
    pub email: String,
    phase: SubmissionPhase,
    errors: FieldErrors,
}

impl NewsletterForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> SubmissionPhase {
        self.phase
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn is_submitting(&self) -> bool {
        self.phase == SubmissionPhase::Submitting
    }

    pub fn submit(&mut self) -> SubmitDecision<NewsletterSignup> {
        if self.is_submitting() {
            return SubmitDecision::AlreadySubmitting;
        }

        self.phase = SubmissionPhase::Validating;
        self.errors.clear();
        if self.email.trim().is_empty() || !is_valid_email(&self.email) {
            self.errors.insert(
                FormField::Email,
                "Please provide a valid email address.".to_string(),
            );
            self.phase = SubmissionPhase::Error;
            return SubmitDecision::Invalid;
        }

        self.phase = SubmissionPhase::Submitting;
        SubmitDecision::ReadyToDeliver(NewsletterSignup {
            email: self.email.clone(),
        })
    }

    pub fn finish(&mut self, delivered: Result<(), InquiryError>) -> FinishOutcome {
        match delivered {
            Ok(()) => {
                self.email.clear();
                self.phase = SubmissionPhase::Success;
                FinishOutcome::Succeeded
            }
            Err(_) => {
                self.phase = SubmissionPhase::Error;
                FinishOutcome::Failed
            }
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PrivateAccessInquiry {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub investment_capacity: String,
    pub desired_locations: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub property_name: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewsletterSignup {
    pub email: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "form_type", rename_all = "snake_case")]
pub enum InquiryRecord {
    PrivateAccess(PrivateAccessInquiry),
    Newsletter(NewsletterSignup),
}

#[derive(Debug, thiserror::Error)]
pub enum InquiryError {
    #[error("concierge desk unavailable: {0}")]
    Unavailable(String),
}

/// Receiving end for form submissions. The production build wires in a
/// simulated desk; a real CRM integration replaces it behind this trait.
pub trait ConciergeGateway: Send + Sync {
    fn submit_inquiry(&self, record: InquiryRecord) -> Result<(), InquiryError>;
}

/// Result of driving a form through a full submit attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionOutcome {
    AlreadySubmitting,
    Rejected,
    Accepted,
    Failed,
}

/// Composes the form machines with the gateway, notifier, and analytics.
pub struct EngagementService<G, N> {
    gateway: Arc<G>,
    notifier: Arc<N>,
    tracker: EventTracker,
}

impl<G, N> EngagementService<G, N>
where
    G: ConciergeGateway + 'static,
    N: Notifier + 'static,
{
    pub fn new(gateway: Arc<G>, notifier: Arc<N>, tracker: EventTracker) -> Self {
        Self {
            gateway,
            notifier,
            tracker,
        }
    }

    /// Drive a private access request end to end. Validation errors stay on
    /// the form (rendered inline); delivery outcomes surface as notices.
    pub fn submit_private_access(
        &self,
        form: &mut PrivateAccessForm,
        property_name: Option<&str>,
    ) -> SubmissionOutcome {
        match form.submit() {
            SubmitDecision::AlreadySubmitting => SubmissionOutcome::AlreadySubmitting,
            SubmitDecision::Invalid => SubmissionOutcome::Rejected,
            SubmitDecision::ReadyToDeliver(inquiry) => {
                self.deliver_private_access(form, inquiry, property_name)
            }
        }
    }

    /// Delivery half of the submit flow, for callers that interleave work
    /// (such as a simulated request delay) between validation and delivery.
    /// Validation has already moved the form to `Submitting` by the time
    /// this runs.
    pub fn deliver_private_access(
        &self,
        form: &mut PrivateAccessForm,
        mut inquiry: PrivateAccessInquiry,
        property_name: Option<&str>,
    ) -> SubmissionOutcome {
        inquiry.property_name = property_name.map(str::to_string);

        let subject = inquiry
            .property_name
            .clone()
            .unwrap_or_else(|| "general_inquiry".to_string());
        let capacity = inquiry.investment_capacity.clone();
        let locations = inquiry.desired_locations.clone();

        let delivered = self
            .gateway
            .submit_inquiry(InquiryRecord::PrivateAccess(inquiry));

        match form.finish(delivered) {
            FinishOutcome::Succeeded => {
                self.tracker.track(
                    AnalyticsEvent::new(actions::SUBMIT, categories::FORM)
                        .with_label("private_access")
                        .with_context("investment_capacity", json!(capacity))
                        .with_context("desired_locations", json!(locations))
                        .with_context("property_name", json!(subject)),
                    "/",
                );
                self.notifier.notify(Notice::standard(
                    "Request Received",
                    "A Senior Partner will contact you within 2 hours.",
                ));
                SubmissionOutcome::Accepted
            }
            FinishOutcome::Failed => {
                self.notifier.notify(Notice::destructive(
                    "Submission Failed",
                    "Our concierge desk is unreachable. Your details were kept; please try again.",
                ));
                SubmissionOutcome::Failed
            }
            FinishOutcome::Stale => SubmissionOutcome::Accepted,
        }
    }

    /// Drive a newsletter signup. The inline section has no field-level error
    /// display, so an invalid email surfaces as a destructive notice instead.
    pub fn subscribe_newsletter(&self, form: &mut NewsletterForm) -> SubmissionOutcome {
        match form.submit() {
            SubmitDecision::AlreadySubmitting => SubmissionOutcome::AlreadySubmitting,
            SubmitDecision::Invalid => {
                self.notifier.notify(Notice::destructive(
                    "Invalid Email",
                    "Please provide a valid email address.",
                ));
                SubmissionOutcome::Rejected
            }
            SubmitDecision::ReadyToDeliver(signup) => self.deliver_newsletter(form, signup),
        }
    }

    /// Delivery half of the newsletter flow; see [`Self::deliver_private_access`].
    pub fn deliver_newsletter(
        &self,
        form: &mut NewsletterForm,
        signup: NewsletterSignup,
    ) -> SubmissionOutcome {
        let email = signup.email.clone();
        let delivered = self.gateway.submit_inquiry(InquiryRecord::Newsletter(signup));

        match form.finish(delivered) {
            FinishOutcome::Succeeded => {
                self.tracker.track(
                    AnalyticsEvent::new(actions::SUBMIT, categories::FORM)
                        .with_label("newsletter")
                        .with_context("email", json!(email)),
                    "/",
                );
                self.notifier.notify(Notice::standard(
                    "Welcome to the Inner Circle",
                    "You'll receive our curated insights shortly.",
                ));
                SubmissionOutcome::Accepted
            }
            FinishOutcome::Failed | FinishOutcome::Stale => {
                self.notifier.notify(Notice::destructive(
                    "Subscription Failed",
                    "We could not reach the concierge desk. Please try again.",
                ));
                SubmissionOutcome::Failed
            }
        }
    }
}
