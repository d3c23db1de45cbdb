//! Batch runner tests against an in-memory transport.

mod mocks;

use contact_sync::{
    BatchRunner, DiagnosticEvent, RawRow, RecordValidator, RecordingSink, RunMode, RunOptions,
    RunStatistics, SubmissionClient, SubmitFailure, SubmitStage, TransportError,
};
use mocks::MockTransport;
use serde_json::json;

fn row(index: usize, org_number: &str, org_name: &str, phone: &str, name: &str) -> RawRow {
    RawRow::new(index)
        .with("Org. Nr Kontaktet", org_number)
        .with("Bedriftsnavn", org_name)
        .with("Mobil BT", phone)
        .with("Navn BT", name)
        .with("Tittel BT", "Daglig leder")
}

fn run_with(
    transport: &MockTransport,
    rows: &[RawRow],
    options: RunOptions,
) -> (RunStatistics, RecordingSink) {
    let client = SubmissionClient::with_transport("http://crm.test/api", transport.clone());
    let mut runner = BatchRunner::new(
        RecordValidator::default(),
        client,
        RecordingSink::new(),
        options,
    );
    let stats = runner.run(rows);
    (stats, runner.into_sink())
}

fn run(transport: &MockTransport, rows: &[RawRow]) -> (RunStatistics, RecordingSink) {
    run_with(transport, rows, RunOptions::default())
}

#[test]
fn test_valid_row_with_blank_title_is_submitted_with_default_position() {
    let transport = MockTransport::new();
    let rows = vec![RawRow::new(1)
        .with("Org. Nr Kontaktet", "123 456 789")
        .with("Bedriftsnavn", "Acme AS")
        .with("Mobil BT", "12345678(1881)")
        .with("Navn BT", "Jane Doe")
        .with("Tittel BT", "")];

    let (stats, _) = run(&transport, &rows);

    assert_eq!(stats.total, 1);
    assert_eq!(stats.successful, 1);
    assert_eq!(stats.default_position, 1);
    assert_eq!(stats.failed(), 0);

    assert_eq!(transport.endpoints(), vec!["add_organization", "add_contact"]);
    let requests = transport.requests();
    assert_eq!(requests[0].url, "http://crm.test/api/add_organization");
    assert_eq!(
        requests[0].body,
        json!({"OrganizationName": "Acme AS", "OrgNumber": 123456789})
    );
    assert_eq!(
        requests[1].body,
        json!({
            "Name": "Jane Doe",
            "Phone": 12345678,
            "OrgNumber": 123456789,
            "PositionName": "Unknown position",
            "Email": null
        })
    );
}

#[test]
fn test_invalid_org_number_makes_no_requests() {
    let transport = MockTransport::new();
    let rows = vec![row(1, "12-34", "Acme AS", "12345678", "Jane Doe")];

    let (stats, sink) = run(&transport, &rows);

    assert_eq!(stats.total, 1);
    assert_eq!(stats.invalid_organization, 1);
    assert_eq!(stats.successful, 0);
    assert!(transport.requests().is_empty());
    assert_eq!(sink.skipped_rows(), vec![1]);
}

#[test]
fn test_invalid_contact_is_counted_and_not_submitted() {
    let transport = MockTransport::new();
    let rows = vec![
        row(1, "123456789", "Acme AS", "1234", "Jane Doe"),
        row(2, "123456789", "Acme AS", "12345678", "  "),
    ];

    let (stats, _) = run(&transport, &rows);

    assert_eq!(stats.invalid_phone, 2);
    assert_eq!(stats.invalid_organization, 0);
    assert_eq!(stats.failed(), 2);
    assert!(transport.requests().is_empty());
}

#[test]
fn test_existing_organization_counts_as_success() {
    let transport = MockTransport::new();
    transport
        .respond("add_organization", 409, "already exists")
        .respond("add_contact", 200, "ok");
    let rows = vec![row(1, "123456789", "Acme AS", "12345678", "Jane Doe")];

    let (stats, sink) = run(&transport, &rows);

    assert_eq!(stats.successful, 1);
    assert_eq!(stats.default_position, 0);
    assert_eq!(transport.endpoints(), vec!["add_organization", "add_contact"]);
    assert!(sink.events.iter().any(|e| matches!(
        e,
        DiagnosticEvent::ContactAdded {
            organization_outcome: contact_sync::OrganizationOutcome::AlreadyExists,
            ..
        }
    )));
}

#[test]
fn test_contact_failure_does_not_stop_the_run() {
    let transport = MockTransport::new();
    transport.respond("add_contact", 500, "internal error");
    let rows = vec![
        row(1, "123456789", "Acme AS", "12345678", "Jane Doe"),
        row(2, "987654321", "Beta AS", "87654321", "Ola Nordmann"),
    ];

    let (stats, sink) = run(&transport, &rows);

    assert_eq!(stats.total, 2);
    assert_eq!(stats.successful, 1);
    assert_eq!(stats.failed(), 1);
    assert_eq!(transport.requests().len(), 4);

    let failures: Vec<_> = sink
        .events
        .iter()
        .filter_map(|e| match e {
            DiagnosticEvent::SubmitFailed { row, failure } => Some((*row, failure.clone())),
            _ => None,
        })
        .collect();
    assert_eq!(
        failures,
        vec![(
            1,
            SubmitFailure::Rejected {
                stage: SubmitStage::Contact,
                status: 500,
                body: "internal error".to_string()
            }
        )]
    );
}

#[test]
fn test_failed_contact_with_blank_title_is_not_counted_as_default_position() {
    let transport = MockTransport::new();
    transport.respond("add_contact", 500, "internal error");
    let rows = vec![row(1, "123456789", "Acme AS", "12345678", "Jane Doe").with("Tittel BT", "")];

    let (stats, _) = run(&transport, &rows);

    assert_eq!(stats.successful, 0);
    assert_eq!(stats.default_position, 0);
    assert_eq!(stats.failed(), 1);
    assert_eq!(
        transport.requests_to("add_contact")[0].body["PositionName"],
        "Unknown position"
    );
}

#[test]
fn test_organization_rejection_skips_contact_request() {
    let transport = MockTransport::new();
    transport.respond("add_organization", 400, "bad request");
    let rows = vec![row(1, "123456789", "Acme AS", "12345678", "Jane Doe")];

    let (stats, _) = run(&transport, &rows);

    assert_eq!(stats.successful, 0);
    assert_eq!(transport.endpoints(), vec!["add_organization"]);
}

#[test]
fn test_transport_error_is_recovered() {
    let transport = MockTransport::new();
    transport.fail(
        "add_organization",
        TransportError::ConnectionFailed("connection refused".to_string()),
    );
    let rows = vec![
        row(1, "123456789", "Acme AS", "12345678", "Jane Doe"),
        row(2, "987654321", "Beta AS", "87654321", "Ola Nordmann"),
    ];

    let (stats, sink) = run(&transport, &rows);

    assert_eq!(stats.successful, 1);
    assert!(sink.events.iter().any(|e| matches!(
        e,
        DiagnosticEvent::SubmitFailed { row: 1, failure } if failure.is_transport()
    )));
    assert_eq!(transport.requests_to("add_contact").len(), 1);
}

#[test]
fn test_contacts_are_not_deduplicated() {
    let transport = MockTransport::new();
    let rows = vec![
        row(1, "123456789", "Acme AS", "12345678", "Jane Doe"),
        row(2, "123456789", "Acme AS", "12345678", "Jane Doe"),
    ];

    let (stats, _) = run(&transport, &rows);

    assert_eq!(stats.successful, 2);
    assert_eq!(transport.requests_to("add_organization").len(), 2);
    assert_eq!(transport.requests_to("add_contact").len(), 2);
}

#[test]
fn test_progress_every_interval_regardless_of_outcome() {
    let transport = MockTransport::new();
    let rows: Vec<RawRow> = (1..=250)
        .map(|i| {
            if i % 2 == 0 {
                row(i, "bad", "Acme AS", "12345678", "Jane Doe")
            } else {
                row(i, "123456789", "Acme AS", "12345678", "Jane Doe")
            }
        })
        .collect();

    let (stats, sink) = run(&transport, &rows);

    assert_eq!(stats.total, 250);
    assert_eq!(stats.successful, 125);
    assert_eq!(stats.invalid_organization, 125);
    assert_eq!(sink.progress_count(), 2);

    let progress: Vec<_> = sink
        .events
        .iter()
        .filter_map(|e| match e {
            DiagnosticEvent::Progress {
                processed,
                total_rows,
                successful,
            } => Some((*processed, *total_rows, *successful)),
            _ => None,
        })
        .collect();
    assert_eq!(progress, vec![(100, 250, 50), (200, 250, 100)]);
}

#[test]
fn test_finished_event_carries_final_statistics() {
    let transport = MockTransport::new();
    let rows = vec![row(1, "123456789", "Acme AS", "12345678", "Jane Doe")];

    let (stats, sink) = run(&transport, &rows);

    match sink.events.last() {
        Some(DiagnosticEvent::Finished(finished)) => {
            assert_eq!(finished.total, stats.total);
            assert_eq!(finished.successful, stats.successful);
        }
        other => panic!("Expected Finished event, got {:?}", other),
    }
    assert!(stats.elapsed().is_some());
}

#[test]
fn test_dry_run_sends_nothing() {
    let transport = MockTransport::new();
    let rows = vec![
        row(1, "123456789", "Acme AS", "12345678", "Jane Doe"),
        row(2, "1", "Acme AS", "12345678", "Jane Doe"),
    ];
    let options = RunOptions {
        dry_run: true,
        ..RunOptions::default()
    };

    let (stats, _) = run_with(&transport, &rows, options);

    assert_eq!(stats.successful, 1);
    assert_eq!(stats.invalid_organization, 1);
    assert!(transport.requests().is_empty());
}

#[test]
fn test_organizations_only_submits_each_number_once() {
    let transport = MockTransport::new();
    transport
        .respond("add_organization", 201, "created")
        .respond("add_organization", 409, "exists");
    let rows = vec![
        row(1, "123456789", "Acme AS", "", ""),
        row(2, "123 456 789", "Acme AS", "", ""),
        row(3, "987654321", "Beta AS", "", ""),
        row(4, "12-34", "Gamma AS", "", ""),
    ];
    let options = RunOptions {
        mode: RunMode::OrganizationsOnly,
        ..RunOptions::default()
    };

    let (stats, _) = run_with(&transport, &rows, options);

    assert_eq!(stats.total, 4);
    assert_eq!(stats.successful, 2);
    assert_eq!(stats.organizations_created, 1);
    assert_eq!(stats.organizations_existing, 1);
    assert_eq!(stats.duplicates_skipped, 1);
    assert_eq!(stats.invalid_organization, 1);
    assert_eq!(stats.failed(), 1);
    assert_eq!(
        transport.endpoints(),
        vec!["add_organization", "add_organization"]
    );
}

#[test]
fn test_organizations_only_dry_run_reports_organizations() {
    let transport = MockTransport::new();
    let rows = vec![
        row(1, "123456789", "Acme AS", "", ""),
        row(2, "123456789", "Acme AS", "", ""),
    ];
    let options = RunOptions {
        mode: RunMode::OrganizationsOnly,
        dry_run: true,
        ..RunOptions::default()
    };

    let (stats, sink) = run_with(&transport, &rows, options);

    assert_eq!(stats.successful, 1);
    assert_eq!(stats.duplicates_skipped, 1);
    assert!(transport.requests().is_empty());

    let would_submit: Vec<_> = sink
        .events
        .iter()
        .filter_map(|e| match e {
            DiagnosticEvent::WouldSubmitOrganization { row, name, number } => {
                Some((*row, name.clone(), number.value()))
            }
            DiagnosticEvent::WouldSubmit { .. } => panic!("Unexpected contact event: {:?}", e),
            _ => None,
        })
        .collect();
    assert_eq!(would_submit, vec![(1, "Acme AS".to_string(), 123456789)]);
}
