use std::sync::{Arc, Mutex};

use aurelian::analytics::{EventTracker, RecordingSink};
use aurelian::engagement::notify::RecordingNotifier;
use aurelian::engagement::{
    ConciergeGateway, EngagementService, FormField, InquiryError, InquiryRecord, NewsletterForm,
    PrivateAccessForm, SubmissionOutcome, SubmissionPhase, SubmitDecision,
};

#[derive(Default)]
struct FakeConciergeDesk {
    records: Mutex<Vec<InquiryRecord>>,
    fail_next: Mutex<bool>,
}

impl FakeConciergeDesk {
    fn records(&self) -> Vec<InquiryRecord> {
        self.records.lock().expect("record mutex").clone()
    }

    fn fail_next(&self) {
        *self.fail_next.lock().expect("flag mutex") = true;
    }
}

impl ConciergeGateway for FakeConciergeDesk {
    fn submit_inquiry(&self, record: InquiryRecord) -> Result<(), InquiryError> {
        let mut fail = self.fail_next.lock().expect("flag mutex");
        if *fail {
            *fail = false;
            return Err(InquiryError::Unavailable("desk offline".to_string()));
        }
        self.records.lock().expect("record mutex").push(record);
        Ok(())
    }
}

struct Harness {
    desk: Arc<FakeConciergeDesk>,
    notifier: Arc<RecordingNotifier>,
    sink: RecordingSink,
    service: EngagementService<FakeConciergeDesk, RecordingNotifier>,
}

fn harness() -> Harness {
    let desk = Arc::new(FakeConciergeDesk::default());
    let notifier = Arc::new(RecordingNotifier::default());
    let sink = RecordingSink::default();
    let tracker = EventTracker::new(Arc::new(sink.clone()));
    let service = EngagementService::new(desk.clone(), notifier.clone(), tracker);
    Harness {
        desk,
        notifier,
        sink,
        service,
    }
}

fn qualified_form() -> PrivateAccessForm {
    let mut form = PrivateAccessForm::new();
    form.name = "Jane Doe".to_string();
    form.email = "jane@x.com".to_string();
    form.phone = "+1 212 555 0100".to_string();
    form.investment_capacity = "$10M - $50M".to_string();
    form.toggle_location("London");
    form
}

#[test]
fn qualified_inquiry_is_delivered_and_acknowledged() {
    let h = harness();
    let mut form = qualified_form();

    let outcome = h.service.submit_private_access(&mut form, None);

    assert_eq!(outcome, SubmissionOutcome::Accepted);
    assert_eq!(form.phase(), SubmissionPhase::Success);
    assert!(!form.is_open());
    assert!(form.name.is_empty());
    assert!(form.desired_locations().is_empty());

    let records = h.desk.records();
    assert_eq!(records.len(), 1);
    match &records[0] {
        InquiryRecord::PrivateAccess(inquiry) => {
            assert_eq!(inquiry.email, "jane@x.com");
            assert_eq!(inquiry.investment_capacity, "$10M - $50M");
            assert!(inquiry.property_name.is_none());
        }
        other => panic!("unexpected record {other:?}"),
    }

    let notices = h.notifier.notices();
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].title, "Request Received");

    let events = h.sink.events();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].event.label.as_deref(), Some("private_access"));
    assert_eq!(events[0].event.context["property_name"], "general_inquiry");
}

#[test]
fn property_inquiries_carry_the_property_name() {
    let h = harness();
    let mut form = qualified_form();

    h.service
        .submit_private_access(&mut form, Some("Obsidian Villa"));

    match &h.desk.records()[0] {
        InquiryRecord::PrivateAccess(inquiry) => {
            assert_eq!(inquiry.property_name.as_deref(), Some("Obsidian Villa"));
        }
        other => panic!("unexpected record {other:?}"),
    }
    assert_eq!(
        h.sink.events()[0].event.context["property_name"],
        "Obsidian Villa"
    );
}

#[test]
fn unqualified_inquiry_fails_every_field_and_never_reaches_the_desk() {
    let h = harness();
    let mut form = PrivateAccessForm::new();
    form.email = "bad".to_string();
    form.phone = "123".to_string();

    let outcome = h.service.submit_private_access(&mut form, None);

    assert_eq!(outcome, SubmissionOutcome::Rejected);
    assert_eq!(form.phase(), SubmissionPhase::Error);
    assert_eq!(form.errors().len(), 5);
    assert!(form.errors().contains_key(&FormField::InvestmentCapacity));
    assert!(h.desk.records().is_empty());
    assert!(h.notifier.notices().is_empty());
    assert!(h.sink.events().is_empty());
}

#[test]
fn delivery_step_can_run_detached_from_validation() {
    let h = harness();
    let mut form = qualified_form();

    // The HTTP layer sleeps between these two calls to simulate the request.
    let inquiry = match form.submit() {
        SubmitDecision::ReadyToDeliver(inquiry) => inquiry,
        other => panic!("expected delivery, got {other:?}"),
    };
    assert_eq!(form.phase(), SubmissionPhase::Submitting);

    let outcome = h
        .service
        .deliver_private_access(&mut form, inquiry, Some("The Penthouse"));
    assert_eq!(outcome, SubmissionOutcome::Accepted);
    assert_eq!(form.phase(), SubmissionPhase::Success);
    assert_eq!(h.desk.records().len(), 1);
    assert_eq!(
        h.sink.events()[0].event.context["property_name"],
        "The Penthouse"
    );
}

#[test]
fn in_flight_form_ignores_further_submit_attempts() {
    let h = harness();
    let mut form = qualified_form();

    // Park the machine in the submitting phase, as if a delivery were
    // suspended mid-flight.
    assert!(matches!(
        form.submit(),
        aurelian::engagement::SubmitDecision::ReadyToDeliver(_)
    ));

    assert_eq!(
        h.service.submit_private_access(&mut form, None),
        SubmissionOutcome::AlreadySubmitting
    );
    assert_eq!(
        h.service.submit_private_access(&mut form, None),
        SubmissionOutcome::AlreadySubmitting
    );
    assert!(h.desk.records().is_empty());
}

#[test]
fn delivery_failure_preserves_the_form_for_retry() {
    let h = harness();
    h.desk.fail_next();
    let mut form = qualified_form();

    let outcome = h.service.submit_private_access(&mut form, None);

    assert_eq!(outcome, SubmissionOutcome::Failed);
    assert_eq!(form.phase(), SubmissionPhase::Error);
    assert_eq!(form.name, "Jane Doe");
    assert_eq!(h.notifier.notices()[0].title, "Submission Failed");

    let retry = h.service.submit_private_access(&mut form, None);
    assert_eq!(retry, SubmissionOutcome::Accepted);
    assert_eq!(h.desk.records().len(), 1);
}

#[test]
fn newsletter_flow_emits_the_expected_toasts() {
    let h = harness();

    let mut form = NewsletterForm::new();
    form.email = "not-an-email".to_string();
    assert_eq!(
        h.service.subscribe_newsletter(&mut form),
        SubmissionOutcome::Rejected
    );
    assert_eq!(h.notifier.notices()[0].title, "Invalid Email");
    assert!(h.desk.records().is_empty());

    form.email = "jane@x.com".to_string();
    assert_eq!(
        h.service.subscribe_newsletter(&mut form),
        SubmissionOutcome::Accepted
    );
    assert!(form.email.is_empty());
    assert_eq!(h.notifier.notices()[1].title, "Welcome to the Inner Circle");
    assert!(matches!(
        h.desk.records()[0],
        InquiryRecord::Newsletter(_)
    ));
}
