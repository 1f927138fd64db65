use chrono::NaiveDate;
use tempfile::tempdir;
use tenderwatch::api::clashes::{check_clashes, CheckClashesRequest};
use tenderwatch::api::AppState;
use tenderwatch::db::DbPool;
use tenderwatch::models::tender::TenderRecord;

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

fn tender(
    id: &str,
    pincode: &str,
    local_area: &str,
    department: &str,
    start: NaiveDate,
    end: NaiveDate,
) -> TenderRecord {
    TenderRecord {
        id: id.to_string(),
        pincode: pincode.to_string(),
        area_name: "Andheri".to_string(),
        local_area_name: local_area.to_string(),
        sanction_date: start,
        completion_date: end,
        department: department.to_string(),
    }
}

fn seeded_state(dir: &tempfile::TempDir) -> AppState {
    tenderwatch::utils::logger::init_logging(dir.path().join("logs")).expect("init logging");

    let db_path = dir.path().join("tenders.sqlite");
    let pool = DbPool::new(&db_path).expect("db pool");
    let state = AppState::new(pool).expect("app state");

    let tenders = state.tenders();
    for record in [
        tender(
            "TND-001",
            "400001",
            "Marol",
            "Department of Water Pipeline",
            date(2025, 1, 1),
            date(2025, 1, 10),
        ),
        tender(
            "TND-002",
            "400001",
            "Marol",
            "Department of Roadways",
            date(2025, 1, 5),
            date(2025, 1, 15),
        ),
        tender(
            "TND-003",
            "400001",
            "Chakala",
            "Department of Street Lighting",
            date(2025, 1, 3),
            date(2025, 1, 12),
        ),
        tender(
            "TND-004",
            "400001",
            "Chakala",
            "Department of Roadways",
            date(2025, 1, 8),
            date(2025, 1, 20),
        ),
        tender(
            "TND-005",
            "400001",
            "Saki Naka",
            "Department of Street Lighting",
            date(2025, 3, 1),
            date(2025, 3, 10),
        ),
        tender(
            "TND-006",
            "400099",
            "Marol",
            "Department of Roadways",
            date(2025, 1, 5),
            date(2025, 1, 15),
        ),
    ] {
        tenders.register_tender(record).expect("register tender");
    }

    state
}

#[tokio::test]
async fn check_clashes_groups_by_locality_and_suggests_rework() {
    let dir = tempdir().expect("temp dir");
    let state = seeded_state(&dir);

    let report = check_clashes(
        &state,
        CheckClashesRequest {
            pincode: "400001".to_string(),
        },
    )
    .await
    .expect("check clashes");

    // Marol: TND-001/TND-002 overlap Jan 5..Jan 10; Chakala: TND-003/TND-004
    // overlap Jan 8..Jan 12. Saki Naka's lone tender clashes with nothing,
    // and TND-006 sits in another pincode entirely.
    assert_eq!(report.clashes_by_local_area.len(), 2);

    let marol = report
        .clashes_by_local_area
        .get("Marol")
        .expect("marol group");
    assert_eq!(marol.len(), 2);
    assert_eq!(marol[0].tender_id, "TND-001");
    assert_eq!(marol[0].clashing_tender_id, "TND-002");
    assert_eq!(marol[0].overlap_days, 5);
    assert!(!marol[0].priority_issue);
    assert_eq!(marol[1].tender_id, "TND-002");
    assert!(marol[1].priority_issue);
    assert_eq!(marol[1].tender_start_date, "2025-01-05");
    assert_eq!(marol[1].clashing_tender_end_date, "2025-01-10");

    let chakala = report
        .clashes_by_local_area
        .get("Chakala")
        .expect("chakala group");
    assert_eq!(chakala.len(), 2);
    assert_eq!(chakala[0].overlap_days, 4);

    // Street Lighting yields to Roadways in Chakala; Roadways yields to
    // Water Pipeline in Marol. One suggestion per affected locality, in
    // group order.
    assert_eq!(
        report.suggestions,
        vec![
            "In Marol, reorder work as follows: TND-002 -> TND-001.".to_string(),
            "In Chakala, reorder work as follows: TND-003 -> TND-004.".to_string(),
        ]
    );
}

#[tokio::test]
async fn unknown_pincode_returns_empty_groups_and_the_sentinel() {
    let dir = tempdir().expect("temp dir");
    let state = seeded_state(&dir);

    let report = check_clashes(
        &state,
        CheckClashesRequest {
            pincode: "999999".to_string(),
        },
    )
    .await
    .expect("check clashes");

    assert!(report.clashes_by_local_area.is_empty());
    assert_eq!(
        report.suggestions,
        vec!["No priority clashes detected. No suggestions necessary.".to_string()]
    );

    let json = serde_json::to_string(&report).expect("serialize");
    assert!(json.contains(r#""clashes_by_local_area":{}"#));
}

#[tokio::test]
async fn reports_serialize_with_the_wire_field_names_in_group_order() {
    let dir = tempdir().expect("temp dir");
    let state = seeded_state(&dir);

    let report = check_clashes(
        &state,
        CheckClashesRequest {
            pincode: "400001".to_string(),
        },
    )
    .await
    .expect("check clashes");

    let json = serde_json::to_string(&report).expect("serialize");
    for field in [
        "tender_id",
        "clashing_tender_id",
        "area_name",
        "local_area_name",
        "overlap_days",
        "priority_issue",
        "department",
        "clashing_department",
        "tender_start_date",
        "tender_end_date",
        "clashing_tender_start_date",
        "clashing_tender_end_date",
    ] {
        assert!(json.contains(&format!(r#""{field}""#)), "missing {field}");
    }

    // Marol was encountered first during detection and must stay first in
    // the serialized mapping.
    let marol_at = json.find(r#""Marol""#).expect("marol key");
    let chakala_at = json.find(r#""Chakala""#).expect("chakala key");
    assert!(marol_at < chakala_at);
}

#[tokio::test]
async fn repeated_checks_are_byte_identical() {
    let dir = tempdir().expect("temp dir");
    let state = seeded_state(&dir);

    let request = CheckClashesRequest {
        pincode: "400001".to_string(),
    };
    let first = check_clashes(&state, request.clone())
        .await
        .expect("first check");
    let second = check_clashes(&state, request).await.expect("second check");

    let first_json = serde_json::to_string(&first).expect("serialize");
    let second_json = serde_json::to_string(&second).expect("serialize");
    assert_eq!(first_json, second_json);
}
