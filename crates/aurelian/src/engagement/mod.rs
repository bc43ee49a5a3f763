//! Engagement state machines: inquiry/newsletter form submission, the
//! simulated vault access gate, and the oracle consultation dialog. All
//! transitions are driven by discrete caller events; the machines own no
//! timers and do no I/O of their own. External effects go through the
//! capability traits ([`ConciergeGateway`], [`notify::Notifier`],
//! [`vault::AccessVerifier`], [`oracle::Recommender`]) so real backends can
//! be substituted without touching the machines.

pub mod forms;
pub mod notify;
pub mod oracle;
pub mod vault;

pub use forms::{
    ConciergeGateway, EngagementService, FieldErrors, FinishOutcome, FormField, InquiryError,
    InquiryRecord, NewsletterForm, NewsletterSignup, PrivateAccessForm, PrivateAccessInquiry,
    SubmissionOutcome, SubmissionPhase, SubmitDecision,
};
pub use notify::{LogNotifier, Notice, NoticeTone, Notifier, RecordingNotifier};
pub use oracle::{
    ConsultationQuery, ConsultationStep, OracleConsultation, Recommendation, Recommender,
    ScriptedRecommender,
};
pub use vault::{
    AccessDenied, AccessLevel, AccessOutcome, AccessVerifier, SimulatedVerifier, VaultAccess,
};
