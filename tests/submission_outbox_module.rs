use bugdesk::intake::{BugReportPayload, Priority, SubmissionMetadata};
use bugdesk::shared::ids::ReporterId;
use bugdesk::submission::{list_outbox_reports, OutboxSubmissionService, SubmissionService};
use chrono::{TimeZone, Utc};
use std::fs;
use tempfile::tempdir;

fn payload(title: &str, screenshot: Option<&str>) -> BugReportPayload {
    BugReportPayload {
        title: title.to_string(),
        description: "Tapping save on the profile form does nothing".to_string(),
        steps_to_reproduce: "Edit profile, change name, tap Save".to_string(),
        expected_behavior: "The new name is saved".to_string(),
        actual_behavior: "The old name is still shown".to_string(),
        device: "Android device".to_string(),
        browser: "Chrome".to_string(),
        os: "Android".to_string(),
        priority: Priority::Medium,
        screenshot_ref: screenshot.map(str::to_string),
        metadata: SubmissionMetadata::new(
            "https://app.example.com/profile",
            ReporterId::parse("qa-team").expect("reporter"),
            Utc.with_ymd_and_hms(2026, 5, 2, 16, 0, 0)
                .single()
                .expect("timestamp"),
        ),
    }
}

#[test]
fn each_submission_lands_in_its_own_file() {
    let dir = tempdir().expect("tempdir");
    let outbox = dir.path().join("nested/outbox");
    let service = OutboxSubmissionService::new(&outbox);

    let first = service.create(&payload("Profile save fails", None)).expect("first");
    let second = service
        .create(&payload(
            "Avatar upload fails",
            Some("https://files.example.com/avatar.png"),
        ))
        .expect("second");
    assert_ne!(first, second);
    assert!(first.as_str().starts_with("bug-"));

    let files = fs::read_dir(&outbox)
        .expect("read outbox")
        .filter_map(Result::ok)
        .map(|entry| entry.file_name().to_string_lossy().to_string())
        .collect::<Vec<_>>();
    assert_eq!(files.len(), 2);
    assert!(files.contains(&format!("{first}.json")));

    let raw = fs::read_to_string(outbox.join(format!("{second}.json"))).expect("read report");
    let body: serde_json::Value = serde_json::from_str(&raw).expect("json");
    assert_eq!(body["screenshotRef"], "https://files.example.com/avatar.png");
    assert_eq!(body["submittedBy"], "qa-team");
}

#[test]
fn listed_reports_match_what_was_submitted() {
    let dir = tempdir().expect("tempdir");
    let service = OutboxSubmissionService::new(dir.path());
    let submitted = payload("Profile save fails", None);
    let id = service.create(&submitted).expect("create");

    let reports = list_outbox_reports(service.dir()).expect("list");
    assert_eq!(reports, vec![(id, submitted)]);
}

#[test]
fn identical_reports_submitted_together_get_separate_files() {
    let dir = tempdir().expect("tempdir");
    let service = OutboxSubmissionService::new(dir.path());
    let report = payload("Profile save fails", None);
    let ids = (0..3)
        .map(|_| service.create(&report).expect("create"))
        .collect::<Vec<_>>();
    assert_ne!(ids[0], ids[1]);
    assert_ne!(ids[1], ids[2]);
    assert_ne!(ids[0], ids[2]);

    let reports = list_outbox_reports(dir.path()).expect("list");
    assert_eq!(reports.len(), 3);
    assert!(reports.iter().all(|(_, listed)| *listed == report));
}

#[test]
fn corrupt_report_file_is_a_json_error() {
    let dir = tempdir().expect("tempdir");
    fs::write(dir.path().join("bug-000000000000.json"), "not json").expect("write");
    let err = list_outbox_reports(dir.path()).expect_err("corrupt");
    assert!(err.to_string().contains("bug-000000000000.json"));
}
