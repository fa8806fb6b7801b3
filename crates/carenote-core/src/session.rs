//! Session state for one care manager working one case.
//!
//! Generation calls run outside the session: the caller takes a [`Ticket`]
//! before issuing a call and hands it back with the result. The session uses
//! the ticket to keep at most one call of each kind in flight and to discard
//! results that arrive after a [`Session::reset`].

use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use ts_rs::TS;

use crate::error::CoreError;
use crate::merge::merge_extraction;
use crate::models::assessment::AssessmentField;
use crate::models::care_plan::CarePlan;
use crate::models::extraction::ExtractionResult;
use crate::models::face_sheet::FaceSheetField;
use crate::models::record::CaseRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum SessionStatus {
    Idle,
    Processing,
    GeneratingPlan,
    Completed,
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum RequestKind {
    Extraction,
    CarePlan,
}

impl RequestKind {
    fn label(self) -> &'static str {
        match self {
            RequestKind::Extraction => "extraction",
            RequestKind::CarePlan => "care plan",
        }
    }
}

/// Proof that a call was started, and in which session epoch.
///
/// Handing a ticket back consumes it, so one call cannot be completed twice:
///
/// ```compile_fail
/// use carenote_core::session::Session;
///
/// let mut session = Session::new();
/// let ticket = session.begin_extraction().unwrap();
/// session.fail(ticket, "timed out");
/// session.fail(ticket, "timed out again");
/// ```
#[derive(Debug, PartialEq, Eq)]
pub struct Ticket {
    kind: RequestKind,
    epoch: u64,
}

impl Ticket {
    pub fn kind(&self) -> RequestKind {
        self.kind
    }
}

/// What happened to a result handed back to the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Applied,
    /// The session was reset after the call started.
    Discarded,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Session {
    record: CaseRecord,
    status: SessionStatus,
    last_error: Option<String>,
    extraction_in_flight: bool,
    care_plan_in_flight: bool,
    #[ts(type = "number")]
    epoch: u64,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        Self {
            record: CaseRecord::new(),
            status: SessionStatus::Idle,
            last_error: None,
            extraction_in_flight: false,
            care_plan_in_flight: false,
            epoch: 0,
        }
    }

    pub fn record(&self) -> &CaseRecord {
        &self.record
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn is_in_flight(&self, kind: RequestKind) -> bool {
        match kind {
            RequestKind::Extraction => self.extraction_in_flight,
            RequestKind::CarePlan => self.care_plan_in_flight,
        }
    }

    pub fn begin_extraction(&mut self) -> Result<Ticket, CoreError> {
        self.begin(RequestKind::Extraction)
    }

    pub fn begin_care_plan(&mut self) -> Result<Ticket, CoreError> {
        self.begin(RequestKind::CarePlan)
    }

    fn begin(&mut self, kind: RequestKind) -> Result<Ticket, CoreError> {
        if self.is_in_flight(kind) {
            return Err(CoreError::Busy(kind.label()));
        }
        self.set_in_flight(kind, true);
        self.status = match kind {
            RequestKind::Extraction => SessionStatus::Processing,
            RequestKind::CarePlan => SessionStatus::GeneratingPlan,
        };
        self.last_error = None;
        Ok(Ticket {
            kind,
            epoch: self.epoch,
        })
    }

    /// Merge an extraction result into the record.
    pub fn complete_extraction(&mut self, ticket: Ticket, result: &ExtractionResult) -> Outcome {
        if !self.accept(&ticket, Some(RequestKind::Extraction)) {
            return Outcome::Discarded;
        }
        self.record = merge_extraction(&self.record, result);
        self.status = SessionStatus::Completed;
        Outcome::Applied
    }

    /// Replace the care plan.
    pub fn complete_care_plan(&mut self, ticket: Ticket, plan: CarePlan) -> Outcome {
        if !self.accept(&ticket, Some(RequestKind::CarePlan)) {
            return Outcome::Discarded;
        }
        self.record.care_plan = Some(plan);
        self.status = SessionStatus::Completed;
        Outcome::Applied
    }

    /// Record a failed call. The case record is left exactly as it was.
    pub fn fail(&mut self, ticket: Ticket, message: impl Into<String>) -> Outcome {
        if !self.accept(&ticket, None) {
            return Outcome::Discarded;
        }
        let message = message.into();
        warn!(kind = ticket.kind.label(), error = %message, "request failed");
        self.last_error = Some(message);
        self.status = SessionStatus::Error;
        Outcome::Applied
    }

    /// Clear the case. Calls still in flight will have their results
    /// discarded when they come back.
    pub fn reset(&mut self) {
        self.epoch += 1;
        self.record = CaseRecord::new();
        self.status = SessionStatus::Idle;
        self.last_error = None;
        self.extraction_in_flight = false;
        self.care_plan_in_flight = false;
        info!(epoch = self.epoch, "session reset");
    }

    pub fn update_assessment(
        &mut self,
        id: &str,
        field: AssessmentField,
        value: impl Into<String>,
    ) -> Result<(), CoreError> {
        let item = self
            .record
            .item_mut(id)
            .ok_or_else(|| CoreError::UnknownItem(id.to_string()))?;
        item.set_field(field, value.into())
    }

    pub fn update_face_sheet(&mut self, field: FaceSheetField, value: impl Into<String>) {
        self.record.face_sheet.set(field, value);
    }

    /// Edit the face sheet by wire key, as a form binding would.
    pub fn update_face_sheet_by_key(&mut self, key: &str, value: impl Into<String>) -> Result<(), CoreError> {
        let field =
            FaceSheetField::from_key(key).ok_or_else(|| CoreError::UnknownField(key.to_string()))?;
        self.update_face_sheet(field, value);
        Ok(())
    }

    /// Whether a returning call may touch the session. `expected` is the
    /// kind the completing operation handles; `None` accepts either.
    ///
    /// A ticket from the current epoch always ends its own call, even when
    /// it was handed to the wrong completion and its result is dropped.
    fn accept(&mut self, ticket: &Ticket, expected: Option<RequestKind>) -> bool {
        if ticket.epoch != self.epoch {
            info!(
                kind = ticket.kind.label(),
                ticket_epoch = ticket.epoch,
                epoch = self.epoch,
                "discarding result from before reset"
            );
            return false;
        }
        self.set_in_flight(ticket.kind, false);
        if expected.is_some_and(|kind| kind != ticket.kind) {
            warn!(
                kind = ticket.kind.label(),
                "discarding result handed to the wrong completion"
            );
            return false;
        }
        true
    }

    fn set_in_flight(&mut self, kind: RequestKind, value: bool) {
        match kind {
            RequestKind::Extraction => self.extraction_in_flight = value,
            RequestKind::CarePlan => self.care_plan_in_flight = value,
        }
    }
}
