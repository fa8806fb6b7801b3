use carenote_core::error::CoreError;
use carenote_core::models::assessment::AssessmentField;
use carenote_core::models::care_plan::CarePlan;
use carenote_core::models::extraction::{AssessmentPatch, ExtractionResult};
use carenote_core::models::face_sheet::FaceSheetField;
use carenote_core::session::{Outcome, RequestKind, Session, SessionStatus};

fn extraction(id: &str, situation: &str) -> ExtractionResult {
    ExtractionResult {
        assessment: vec![AssessmentPatch {
            id: id.to_string(),
            situation: situation.to_string(),
            ..Default::default()
        }],
        face_sheet: Default::default(),
    }
}

fn plan(policy: &str) -> CarePlan {
    CarePlan {
        analysis_result: "analysis".to_string(),
        comprehensive_policy: policy.to_string(),
        plan_items: vec![],
        utilizing_strengths: String::new(),
    }
}

#[test]
fn extraction_lifecycle() {
    let mut session = Session::new();
    assert_eq!(session.status(), SessionStatus::Idle);

    let ticket = session.begin_extraction().unwrap();
    assert_eq!(ticket.kind(), RequestKind::Extraction);
    assert_eq!(session.status(), SessionStatus::Processing);
    assert!(session.is_in_flight(RequestKind::Extraction));

    let outcome = session.complete_extraction(ticket, &extraction("10-1", "back pain"));
    assert_eq!(outcome, Outcome::Applied);
    assert_eq!(session.status(), SessionStatus::Completed);
    assert!(!session.is_in_flight(RequestKind::Extraction));
    assert_eq!(session.record().item("10-1").unwrap().situation, "back pain");
}

#[test]
fn duplicate_call_of_same_kind_is_busy() {
    let mut session = Session::new();
    let _ticket = session.begin_extraction().unwrap();

    assert!(matches!(session.begin_extraction(), Err(CoreError::Busy(_))));
    assert!(session.begin_care_plan().is_ok());
}

#[test]
fn stale_result_after_reset_is_discarded() {
    let mut session = Session::new();
    let ticket = session.begin_extraction().unwrap();

    session.reset();
    let outcome = session.complete_extraction(ticket, &extraction("10-1", "late result"));

    assert_eq!(outcome, Outcome::Discarded);
    assert_eq!(session.record().item("10-1").unwrap().situation, "");
    assert_eq!(session.status(), SessionStatus::Idle);
}

#[test]
fn reset_allows_a_new_call_while_the_old_one_is_pending() {
    let mut session = Session::new();
    let stale = session.begin_care_plan().unwrap();
    session.reset();

    let fresh = session.begin_care_plan().unwrap();
    assert_eq!(session.complete_care_plan(stale, plan("old")), Outcome::Discarded);
    assert_eq!(session.complete_care_plan(fresh, plan("new")), Outcome::Applied);
    assert_eq!(
        session.record().care_plan.as_ref().map(|p| p.comprehensive_policy.as_str()),
        Some("new")
    );
}

#[test]
fn failure_keeps_the_record() {
    let mut session = Session::new();
    let ticket = session.begin_extraction().unwrap();
    session.complete_extraction(ticket, &extraction("11-1", "rolls over"));
    let before = session.record().clone();

    let ticket = session.begin_extraction().unwrap();
    assert_eq!(session.fail(ticket, "rate limited"), Outcome::Applied);

    assert_eq!(session.record(), &before);
    assert_eq!(session.status(), SessionStatus::Error);
    assert_eq!(session.last_error(), Some("rate limited"));
    assert!(!session.is_in_flight(RequestKind::Extraction));
}

#[test]
fn failed_plan_keeps_previous_plan() {
    let mut session = Session::new();
    let ticket = session.begin_care_plan().unwrap();
    session.complete_care_plan(ticket, plan("first"));

    let ticket = session.begin_care_plan().unwrap();
    session.fail(ticket, "schema violation");
    assert_eq!(session.record().care_plan, Some(plan("first")));
}

#[test]
fn user_edits() {
    let mut session = Session::new();
    session
        .update_assessment("11-1", AssessmentField::Judgment, "with assistance")
        .unwrap();
    assert_eq!(session.record().item("11-1").unwrap().judgment, "with assistance");

    let err = session
        .update_assessment("11-1", AssessmentField::Judgment, "sometimes")
        .unwrap_err();
    assert!(matches!(err, CoreError::InvalidJudgment { .. }));

    assert!(matches!(
        session.update_assessment("99-1", AssessmentField::Situation, "x"),
        Err(CoreError::UnknownItem(_))
    ));

    session.update_face_sheet(FaceSheetField::Height, "150");
    session.update_face_sheet_by_key("weight", "45").unwrap();
    assert_eq!(session.record().face_sheet.bmi, "20.0");

    assert!(matches!(
        session.update_face_sheet_by_key("nope", "1"),
        Err(CoreError::UnknownField(_))
    ));
}

#[test]
fn second_call_stays_guarded_after_first_completes() {
    let mut session = Session::new();
    let first = session.begin_extraction().unwrap();
    assert_eq!(session.complete_extraction(first, &extraction("10-1", "first")), Outcome::Applied);

    let second = session.begin_extraction().unwrap();
    assert!(session.is_in_flight(RequestKind::Extraction));
    assert!(matches!(session.begin_extraction(), Err(CoreError::Busy(_))));

    assert_eq!(session.complete_extraction(second, &extraction("10-1", "second")), Outcome::Applied);
    assert!(!session.is_in_flight(RequestKind::Extraction));
}

#[test]
fn ticket_of_the_wrong_kind_is_not_applied() {
    let mut session = Session::new();
    let extraction_ticket = session.begin_extraction().unwrap();
    let plan_ticket = session.begin_care_plan().unwrap();

    let outcome = session.complete_extraction(plan_ticket, &extraction("10-1", "misrouted"));

    assert_eq!(outcome, Outcome::Discarded);
    assert_eq!(session.record().item("10-1").unwrap().situation, "");
    assert!(session.is_in_flight(RequestKind::Extraction));
    assert!(!session.is_in_flight(RequestKind::CarePlan));

    assert_eq!(session.complete_care_plan(extraction_ticket, plan("misrouted")), Outcome::Discarded);
    assert_eq!(session.record().care_plan, None);
    assert!(!session.is_in_flight(RequestKind::Extraction));
}
