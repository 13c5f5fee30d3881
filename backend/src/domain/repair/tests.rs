//! Tests for repair construction and intake validation.

use chrono::{Duration, TimeZone};
use rstest::{fixture, rstest};

use super::*;
use crate::domain::validation::ViolationCode;

#[fixture]
fn draft() -> RepairIntakeDraft {
    RepairIntakeDraft {
        device_type: "smartphone".to_owned(),
        device_model: "iPhone 13".to_owned(),
        issue_description: "cracked screen".to_owned(),
        customer_name: "Jane Doe".to_owned(),
        customer_email: "jane@x.com".to_owned(),
        customer_phone: None,
    }
}

#[fixture]
fn received_at() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 5, 4, 10, 30, 0)
        .single()
        .expect("valid timestamp")
}

fn received_repair(draft: RepairIntakeDraft, at: DateTime<Utc>) -> Repair {
    Repair::received(
        RepairId::new(1),
        NewRepair {
            intake: RepairIntake::new(draft).expect("valid intake"),
            user_id: None,
            tracking_code: TrackingCode::parse("REPABCDEFGH").expect("valid code"),
            estimated_completion: Some(at + Duration::days(2)),
            received_at: at,
        },
    )
}

#[rstest]
fn intake_trims_text_fields(mut draft: RepairIntakeDraft) {
    draft.device_model = "  Pixel 8  ".to_owned();
    draft.customer_phone = Some(" 555-0100 ".to_owned());
    let intake = RepairIntake::new(draft).expect("valid intake");
    assert_eq!(intake.device_model(), "Pixel 8");
    assert_eq!(intake.customer_phone(), Some("555-0100"));
}

#[rstest]
#[case::device_type(|d: &mut RepairIntakeDraft| d.device_type.clear(), "deviceType")]
#[case::device_model(|d: &mut RepairIntakeDraft| d.device_model = " ".to_owned(), "deviceModel")]
#[case::issue(|d: &mut RepairIntakeDraft| d.issue_description.clear(), "issueDescription")]
#[case::name(|d: &mut RepairIntakeDraft| d.customer_name.clear(), "customerName")]
#[case::email(|d: &mut RepairIntakeDraft| d.customer_email.clear(), "customerEmail")]
fn intake_reports_missing_field(
    mut draft: RepairIntakeDraft,
    #[case] mutate: fn(&mut RepairIntakeDraft),
    #[case] field: &str,
) {
    mutate(&mut draft);
    let err = RepairIntake::new(draft).expect_err("must reject");
    assert_eq!(err.field(), field);
    assert_eq!(err.code(), ViolationCode::MissingField);
}

#[rstest]
fn intake_rejects_bad_email(mut draft: RepairIntakeDraft) {
    draft.customer_email = "jane-at-x".to_owned();
    let err = RepairIntake::new(draft).expect_err("must reject");
    assert_eq!(err.code(), ViolationCode::InvalidFormat);
}

#[rstest]
fn intake_rejects_overlong_description(mut draft: RepairIntakeDraft) {
    draft.issue_description = "x".repeat(2_001);
    let err = RepairIntake::new(draft).expect_err("must reject");
    assert_eq!(err.code(), ViolationCode::TooLong);
}

#[rstest]
fn received_repair_starts_in_received_with_equal_timestamps(
    draft: RepairIntakeDraft,
    received_at: DateTime<Utc>,
) {
    let repair = received_repair(draft, received_at);
    assert_eq!(repair.status(), RepairStatus::Received);
    assert_eq!(repair.created_at(), repair.updated_at());
    assert_eq!(repair.technician_notes(), "");
    assert_eq!(repair.technician_id(), "");
}

#[rstest]
fn with_status_clamps_backwards_clock(draft: RepairIntakeDraft, received_at: DateTime<Utc>) {
    let repair = received_repair(draft, received_at)
        .with_status(RepairStatus::Diagnosed, received_at - Duration::minutes(5));
    assert_eq!(repair.status(), RepairStatus::Diagnosed);
    assert_eq!(repair.updated_at(), received_at);
}

#[rstest]
fn new_rejects_update_before_creation(draft: RepairIntakeDraft, received_at: DateTime<Utc>) {
    let repair = received_repair(draft, received_at);
    let result = Repair::new(RepairDraft {
        id: repair.id(),
        user_id: None,
        tracking_code: repair.tracking_code().clone(),
        device_type: repair.device_type().to_owned(),
        device_model: repair.device_model().to_owned(),
        issue_description: repair.issue_description().to_owned(),
        status: repair.status(),
        estimated_completion: repair.estimated_completion(),
        created_at: received_at,
        updated_at: received_at - Duration::seconds(1),
        customer_name: repair.customer_name().to_owned(),
        customer_email: repair.customer_email().to_owned(),
        customer_phone: None,
        technician_notes: String::new(),
        technician_id: String::new(),
    });
    assert_eq!(
        result,
        Err(RepairValidationError::UpdatedBeforeCreated { id: RepairId::new(1) })
    );
}
