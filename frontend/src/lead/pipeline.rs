use std::cell::RefCell;

use log::{info, warn};

use crate::lead::draft::{FormDraft, LeadField};
use crate::lead::error::{ChannelError, LeadError};
use crate::lead::payload::{IntakePayload, MailHandoff};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SubmissionState {
    Idle,
    Sending,
    Submitted,
    // Rendered as the red inline banner. No delivery path enters it: the
    // mail fallback absorbs every primary failure.
    Failed,
}

/// Which channel carried the lead.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Delivery {
    Primary,
    Fallback,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SubmissionOutcome {
    Submitted(Delivery),
    Invalid(Vec<LeadField>),
    Ignored,
}

/// The remote intake service.
// Futures run on the wasm main thread only, callers never need `Send`.
#[allow(async_fn_in_trait)]
pub trait IntakeChannel {
    async fn send(&self, payload: &IntakePayload) -> Result<(), ChannelError>;
}

/// Hands a composed message to the visitor's mail client. There is no way
/// to learn whether the message was actually sent.
pub trait MailClient {
    fn compose(&self, handoff: &MailHandoff);
}

/// Tries the intake service first and falls back to the mail client on any
/// failure. Never fails itself.
pub async fn deliver<C, M>(draft: &FormDraft, intake: &C, mail: &M, recipient: &str) -> Delivery
where
    C: IntakeChannel,
    M: MailClient,
{
    let payload = IntakePayload::from(draft);
    match intake.send(&payload).await {
        Ok(()) => {
            info!("Lead from {} delivered to intake", payload.organization);
            Delivery::Primary
        }
        Err(e) => {
            warn!("Intake delivery failed, opening mail client instead: {}", e);
            mail.compose(&MailHandoff::compose(recipient, draft));
            Delivery::Fallback
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SubmissionPipeline {
    draft: FormDraft,
    state: SubmissionState,
}

impl Default for SubmissionPipeline {
    fn default() -> Self {
        Self::new()
    }
}

impl SubmissionPipeline {
    pub fn new() -> Self {
        SubmissionPipeline {
            draft: FormDraft::default(),
            state: SubmissionState::Idle,
        }
    }

    pub fn draft(&self) -> &FormDraft {
        &self.draft
    }

    pub fn state(&self) -> SubmissionState {
        self.state
    }

    pub fn edit(&mut self, field: LeadField, value: impl Into<String>) {
        self.draft.set(field, value);
    }

    /// Validates the draft and moves to `Sending`, returning the snapshot to
    /// deliver. Leaves the state untouched on error.
    pub fn begin(&mut self) -> Result<FormDraft, LeadError> {
        match self.state {
            SubmissionState::Sending => return Err(LeadError::InFlight),
            SubmissionState::Idle => {}
            SubmissionState::Submitted | SubmissionState::Failed => return Err(LeadError::AlreadySubmitted),
        }
        self.draft.validate()?;
        self.state = SubmissionState::Sending;
        Ok(self.draft.clone())
    }

    /// Completes an attempt started by `begin`. Ignored in any other state.
    pub fn finish(&mut self, delivery: Delivery) -> SubmissionOutcome {
        if self.state != SubmissionState::Sending {
            return SubmissionOutcome::Ignored;
        }
        self.state = SubmissionState::Submitted;
        SubmissionOutcome::Submitted(delivery)
    }

    pub fn reset(&mut self) -> Result<(), LeadError> {
        if self.state != SubmissionState::Submitted {
            return Err(LeadError::NotSubmitted);
        }
        self.draft = FormDraft::default();
        self.state = SubmissionState::Idle;
        Ok(())
    }

    /// `begin`, `deliver` and `finish` in one call, for a pipeline with a
    /// single owner. A pipeline shared with event handlers goes through
    /// `begin` and `settle` instead, so no borrow is held while sending.
    pub async fn submit<C, M>(&mut self, intake: &C, mail: &M, recipient: &str) -> SubmissionOutcome
    where
        C: IntakeChannel,
        M: MailClient,
    {
        let draft = match self.begin() {
            Ok(draft) => draft,
            Err(LeadError::Validation { missing }) => return SubmissionOutcome::Invalid(missing),
            Err(_) => return SubmissionOutcome::Ignored,
        };
        let delivery = deliver(&draft, intake, mail, recipient).await;
        self.finish(delivery)
    }
}

/// Delivers a snapshot taken by `begin` and completes the attempt on the
/// shared pipeline. The pipeline is only borrowed after delivery returns.
pub async fn settle<C, M>(
    pipeline: &RefCell<SubmissionPipeline>,
    draft: FormDraft,
    intake: &C,
    mail: &M,
    recipient: &str,
) -> SubmissionOutcome
where
    C: IntakeChannel,
    M: MailClient,
{
    let delivery = deliver(&draft, intake, mail, recipient).await;
    pipeline.borrow_mut().finish(delivery)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lead::channel::with_deadline;
    use crate::lead::draft::filled;
    use crate::lead::payload::MESSAGE_PLACEHOLDER;
    use futures::executor::block_on;
    use futures::future::{pending, ready};
    use std::cell::Cell;

    struct ScriptedIntake {
        result: Result<(), ChannelError>,
        calls: Cell<usize>,
        seen: RefCell<Vec<IntakePayload>>,
    }

    impl ScriptedIntake {
        fn ok() -> Self {
            Self::with(Ok(()))
        }

        fn failing(error: ChannelError) -> Self {
            Self::with(Err(error))
        }

        fn with(result: Result<(), ChannelError>) -> Self {
            ScriptedIntake {
                result,
                calls: Cell::new(0),
                seen: RefCell::new(Vec::new()),
            }
        }
    }

    impl IntakeChannel for ScriptedIntake {
        async fn send(&self, payload: &IntakePayload) -> Result<(), ChannelError> {
            self.calls.set(self.calls.get() + 1);
            self.seen.borrow_mut().push(payload.clone());
            self.result.clone()
        }
    }

    #[derive(Default)]
    struct RecordingMail {
        opened: RefCell<Vec<MailHandoff>>,
    }

    impl MailClient for RecordingMail {
        fn compose(&self, handoff: &MailHandoff) {
            self.opened.borrow_mut().push(handoff.clone());
        }
    }

    fn pipeline_with(draft: FormDraft) -> SubmissionPipeline {
        let mut pipeline = SubmissionPipeline::new();
        for field in LeadField::ALL {
            pipeline.edit(field, draft.get(field));
        }
        pipeline
    }

    #[test]
    fn primary_success_submits_without_mail() {
        let intake = ScriptedIntake::ok();
        let mail = RecordingMail::default();
        let mut pipeline = pipeline_with(filled());

        let outcome = block_on(pipeline.submit(&intake, &mail, "info@example.com"));

        assert_eq!(outcome, SubmissionOutcome::Submitted(Delivery::Primary));
        assert_eq!(pipeline.state(), SubmissionState::Submitted);
        assert_eq!(intake.calls.get(), 1);
        assert_eq!(intake.seen.borrow()[0].subject, "Заявка с сайта: ООО Тест");
        assert!(mail.opened.borrow().is_empty());
    }

    #[test]
    fn begin_moves_to_sending() {
        let mut pipeline = pipeline_with(filled());
        let snapshot = pipeline.begin().unwrap();
        assert_eq!(snapshot, filled());
        assert_eq!(pipeline.state(), SubmissionState::Sending);
    }

    #[test]
    fn every_primary_failure_falls_back() {
        let failures = [
            ChannelError::Network("connection refused".into()),
            ChannelError::Status(500),
            ChannelError::Status(404),
            ChannelError::Timeout(15_000),
            ChannelError::Encode("bad payload".into()),
        ];
        for failure in failures {
            let intake = ScriptedIntake::failing(failure.clone());
            let mail = RecordingMail::default();
            let mut pipeline = pipeline_with(filled());

            let outcome = block_on(pipeline.submit(&intake, &mail, "info@example.com"));

            assert_eq!(outcome, SubmissionOutcome::Submitted(Delivery::Fallback), "{:?}", failure);
            assert_eq!(pipeline.state(), SubmissionState::Submitted);
            assert_eq!(mail.opened.borrow().len(), 1);
        }
    }

    #[test]
    fn missing_field_blocks_everything() {
        for field in LeadField::REQUIRED {
            let mut draft = filled();
            draft.set(field, "");
            let intake = ScriptedIntake::ok();
            let mail = RecordingMail::default();
            let mut pipeline = pipeline_with(draft);

            let outcome = block_on(pipeline.submit(&intake, &mail, "info@example.com"));

            assert_eq!(outcome, SubmissionOutcome::Invalid(vec![field]));
            assert_eq!(pipeline.state(), SubmissionState::Idle);
            assert_eq!(intake.calls.get(), 0);
            assert!(mail.opened.borrow().is_empty());
        }
    }

    #[test]
    fn submit_while_sending_is_ignored() {
        let intake = ScriptedIntake::ok();
        let mail = RecordingMail::default();
        let mut pipeline = pipeline_with(filled());
        pipeline.begin().unwrap();

        let outcome = block_on(pipeline.submit(&intake, &mail, "info@example.com"));

        assert_eq!(outcome, SubmissionOutcome::Ignored);
        assert_eq!(pipeline.state(), SubmissionState::Sending);
        assert_eq!(intake.calls.get(), 0);
        assert_eq!(pipeline.begin(), Err(LeadError::InFlight));
    }

    #[test]
    fn finish_outside_sending_is_ignored() {
        let mut pipeline = pipeline_with(filled());
        assert_eq!(pipeline.finish(Delivery::Primary), SubmissionOutcome::Ignored);
        assert_eq!(pipeline.state(), SubmissionState::Idle);
    }

    #[test]
    fn reset_only_from_submitted() {
        let mut pipeline = pipeline_with(filled());
        assert_eq!(pipeline.reset(), Err(LeadError::NotSubmitted));

        pipeline.begin().unwrap();
        assert_eq!(pipeline.reset(), Err(LeadError::NotSubmitted));
        assert_eq!(pipeline.state(), SubmissionState::Sending);

        pipeline.finish(Delivery::Primary);
        assert_eq!(pipeline.reset(), Ok(()));
        assert_eq!(pipeline.state(), SubmissionState::Idle);
        assert_eq!(pipeline.draft(), &FormDraft::default());
    }

    #[test]
    fn submitted_form_needs_reset_before_next_lead() {
        let intake = ScriptedIntake::ok();
        let mail = RecordingMail::default();
        let mut pipeline = pipeline_with(filled());
        block_on(pipeline.submit(&intake, &mail, "info@example.com"));

        let again = block_on(pipeline.submit(&intake, &mail, "info@example.com"));

        assert_eq!(again, SubmissionOutcome::Ignored);
        assert_eq!(intake.calls.get(), 1);
    }

    #[test]
    fn failing_intake_hands_off_full_lead_by_mail() {
        let draft = FormDraft {
            organization: "ООО Тест".into(),
            contact_name: "Иванов".into(),
            phone: "+7 921 000-00-00".into(),
            city: "Москва".into(),
            activity: "Подрядчик".into(),
            message: "".into(),
        };
        let intake = ScriptedIntake::failing(ChannelError::Status(503));
        let mail = RecordingMail::default();
        let mut pipeline = pipeline_with(draft.clone());

        let outcome = block_on(pipeline.submit(&intake, &mail, "info@example.com"));

        assert_eq!(outcome, SubmissionOutcome::Submitted(Delivery::Fallback));
        assert_eq!(pipeline.state(), SubmissionState::Submitted);
        let opened = mail.opened.borrow();
        assert_eq!(opened.len(), 1);
        let handoff = &opened[0];
        assert_eq!(handoff.recipient, "info@example.com");
        for field in LeadField::REQUIRED {
            assert!(handoff.body.contains(draft.get(field)), "missing {:?}", field);
        }
        assert!(handoff.body.contains("Москва"));
        assert!(handoff.body.contains(&format!("Сообщение: {}", MESSAGE_PLACEHOLDER)));
    }

    struct ResubmittingIntake<'a> {
        pipeline: &'a RefCell<SubmissionPipeline>,
        retried: RefCell<Option<Result<FormDraft, LeadError>>>,
    }

    impl IntakeChannel for ResubmittingIntake<'_> {
        async fn send(&self, _payload: &IntakePayload) -> Result<(), ChannelError> {
            // A second click while the request is in flight.
            *self.retried.borrow_mut() = Some(self.pipeline.borrow_mut().begin());
            Ok(())
        }
    }

    #[test]
    fn settle_leaves_pipeline_free_while_sending() {
        let pipeline = RefCell::new(pipeline_with(filled()));
        let draft = pipeline.borrow_mut().begin().unwrap();
        let intake = ResubmittingIntake {
            pipeline: &pipeline,
            retried: RefCell::new(None),
        };
        let mail = RecordingMail::default();

        let outcome = block_on(settle(&pipeline, draft, &intake, &mail, "info@example.com"));

        assert_eq!(*intake.retried.borrow(), Some(Err(LeadError::InFlight)));
        assert_eq!(outcome, SubmissionOutcome::Submitted(Delivery::Primary));
        assert_eq!(pipeline.borrow().state(), SubmissionState::Submitted);
    }

    #[test]
    fn settle_after_fallback_reports_it() {
        let pipeline = RefCell::new(pipeline_with(filled()));
        let draft = pipeline.borrow_mut().begin().unwrap();
        let intake = ScriptedIntake::failing(ChannelError::Status(500));
        let mail = RecordingMail::default();

        let outcome = block_on(settle(&pipeline, draft, &intake, &mail, "info@example.com"));

        assert_eq!(outcome, SubmissionOutcome::Submitted(Delivery::Fallback));
        assert_eq!(mail.opened.borrow().len(), 1);
    }

    struct HungIntake;

    impl IntakeChannel for HungIntake {
        async fn send(&self, _payload: &IntakePayload) -> Result<(), ChannelError> {
            with_deadline(pending::<Result<(), ChannelError>>(), |_| ready(()), 15_000).await
        }
    }

    #[test]
    fn hung_intake_ends_in_fallback() {
        let mail = RecordingMail::default();
        let mut pipeline = pipeline_with(filled());

        let outcome = block_on(pipeline.submit(&HungIntake, &mail, "info@example.com"));

        assert_eq!(outcome, SubmissionOutcome::Submitted(Delivery::Fallback));
        assert_eq!(pipeline.state(), SubmissionState::Submitted);
        assert_eq!(mail.opened.borrow().len(), 1);
    }

    #[test]
    fn fallback_body_carries_message_when_present() {
        let mut draft = filled();
        draft.set(LeadField::Message, "Интересует пилот на 3 объекта");
        let intake = ScriptedIntake::failing(ChannelError::Network("offline".into()));
        let mail = RecordingMail::default();

        let delivery = block_on(deliver(&draft, &intake, &mail, "info@example.com"));

        assert_eq!(delivery, Delivery::Fallback);
        let body = &mail.opened.borrow()[0].body;
        assert!(body.contains("Интересует пилот на 3 объекта"));
        assert!(!body.contains(MESSAGE_PLACEHOLDER));
    }
}
