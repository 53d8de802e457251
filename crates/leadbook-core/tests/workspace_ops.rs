use assert_matches::assert_matches;
use chrono::NaiveDate;
use leadbook_core::seed::sample_workspace;
use leadbook_core::{
    Client, ClientDraft, ClientStatus, Interaction, InteractionKind, Project, ProjectStatus,
    ServiceDraft, ServiceOption, Workspace, WorkspaceError,
};
use std::collections::HashSet;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn client(id: &str) -> Client {
    Client {
        id: id.to_string(),
        name: "Pat".into(),
        company: "Pat's Plumbing".into(),
        industry: "Trades".into(),
        email: "pat@example.com".into(),
        phone: String::new(),
        website: String::new(),
        project_notes: String::new(),
        status: ClientStatus::Lead,
        last_contacted: None,
        interested_services: Vec::new(),
        interactions: Vec::new(),
    }
}

fn project(id: &str, status: ProjectStatus) -> Project {
    Project {
        id: id.to_string(),
        client_id: "c_1".into(),
        title: "Redesign".into(),
        status,
        deadline: date(2024, 9, 1),
        value: 4000.0,
        description: String::new(),
    }
}

#[test]
fn added_entities_keep_distinct_ids() {
    let mut ws = Workspace::new();
    for id in ["c_1", "c_2", "lead-x"] {
        ws.add_client(client(id)).unwrap();
    }
    for id in ["p_1", "p_2"] {
        ws.add_project(project(id, ProjectStatus::Planning)).unwrap();
    }
    ws.add_service(ServiceOption {
        id: "srv_1".into(),
        name: "SEO".into(),
        description: String::new(),
        price_estimate: 2500.0,
    })
    .unwrap();
    ws.create_client(ClientDraft::default()).unwrap();
    ws.create_service(ServiceDraft::default()).unwrap();

    let client_ids: HashSet<_> = ws.clients().iter().map(|c| c.id.as_str()).collect();
    assert_eq!(client_ids.len(), ws.clients().len());
    assert!(client_ids.contains("c_3"));
    let service_ids: HashSet<_> = ws.services().iter().map(|s| s.id.as_str()).collect();
    assert_eq!(service_ids.len(), 2);
}

#[test]
fn adding_a_taken_id_is_rejected_without_changes() {
    let mut ws = Workspace::new();
    ws.add_client(client("c_1")).unwrap();
    let before = ws.clone();

    assert_matches!(
        ws.add_client(client("c_1")),
        Err(WorkspaceError::DuplicateId { entity: "client", .. })
    );
    assert_eq!(ws, before);
}

#[test]
fn log_interaction_sets_last_contacted_and_appends() {
    let mut ws = sample_workspace().unwrap();
    let logged = Interaction {
        id: "i_99".into(),
        date: date(2024, 2, 14),
        kind: InteractionKind::Call,
        notes: "x".into(),
    };
    ws.log_interaction("c_2", logged.clone()).unwrap();

    let jane = ws.client("c_2").unwrap();
    assert_eq!(jane.last_contacted, Some(date(2024, 2, 14)));
    assert_eq!(jane.last_interaction(), Some(&logged));
}

#[test]
fn add_project_always_starts_in_planning() {
    let mut ws = Workspace::new();
    ws.add_project(project("p_1", ProjectStatus::Completed)).unwrap();
    assert_eq!(ws.project("p_1").unwrap().status, ProjectStatus::Planning);
}

#[test]
fn project_status_moves_freely_between_any_pair() {
    let mut ws = Workspace::new();
    ws.add_project(project("p_1", ProjectStatus::Planning)).unwrap();
    for from in ProjectStatus::ALL {
        for to in ProjectStatus::ALL {
            ws.update_project_status("p_1", from).unwrap();
            ws.update_project_status("p_1", to).unwrap();
            assert_eq!(ws.project("p_1").unwrap().status, to);
        }
    }
}

#[test]
fn client_status_can_be_set_to_anything_via_update() {
    let mut ws = sample_workspace().unwrap();
    let mut bakery = ws.client("c_3").unwrap().clone();
    bakery.status = ClientStatus::Lead;
    ws.update_client(bakery).unwrap();
    assert_eq!(ws.client("c_3").unwrap().status, ClientStatus::Lead);
}

#[test]
fn unknown_ids_report_not_found_and_change_nothing() {
    let mut ws = sample_workspace().unwrap();
    let before = ws.clone();

    assert_matches!(
        ws.update_client(client("nonexistent")),
        Err(WorkspaceError::NotFound { entity: "client", .. })
    );
    assert_matches!(ws.delete_client("nope"), Err(WorkspaceError::NotFound { .. }));
    assert_matches!(
        ws.log_call("nope", date(2024, 1, 1), "hi"),
        Err(WorkspaceError::NotFound { entity: "client", .. })
    );
    assert_matches!(
        ws.toggle_interested_service("nope", "srv_1"),
        Err(WorkspaceError::NotFound { .. })
    );
    assert_matches!(
        ws.update_project_status("nope", ProjectStatus::Review),
        Err(WorkspaceError::NotFound { entity: "project", .. })
    );
    assert_matches!(ws.delete_project("nope"), Err(WorkspaceError::NotFound { .. }));
    assert_matches!(
        ws.delete_service("nope"),
        Err(WorkspaceError::NotFound { entity: "service", .. })
    );

    assert_eq!(ws, before);
}

#[test]
fn deleting_a_service_leaves_client_references() {
    let mut ws = sample_workspace().unwrap();
    ws.delete_service("srv_4").unwrap();
    assert!(ws.service("srv_4").is_none());
    assert!(ws.client("c_2").unwrap().is_interested_in("srv_4"));
}

#[test]
fn generated_ids_continue_after_seed_data() {
    let mut ws = sample_workspace().unwrap();
    assert_eq!(ws.create_client(ClientDraft::default()).unwrap(), "c_4");
    assert_eq!(ws.create_service(ServiceDraft::default()).unwrap(), "srv_5");
    assert_eq!(ws.log_call("c_1", date(2024, 1, 2), "").unwrap(), "i_2");
}

#[test]
fn generated_ids_stay_unique_when_a_suffix_is_at_u64_max() {
    let mut ws = Workspace::new();
    ws.add_client(client("c_18446744073709551615")).unwrap();
    ws.add_client(client("c_1")).unwrap();

    let generated = ws.create_client(ClientDraft::default()).unwrap();
    assert_eq!(generated, "c_2");
    let copies = ws.clients().iter().filter(|c| c.id == generated).count();
    assert_eq!(copies, 1);

    let id = ws.create_client(ClientDraft::default()).unwrap();
    assert_eq!(id, "c_3");
    assert_eq!(ws.clients().len(), 4);
}

#[test]
fn log_call_keeps_working_after_an_interaction_id_at_u64_max() {
    let mut ws = Workspace::new();
    ws.add_client(client("c_1")).unwrap();
    let maxed = Interaction {
        id: "i_18446744073709551615".into(),
        date: date(2024, 2, 1),
        kind: InteractionKind::Email,
        notes: String::new(),
    };
    ws.log_interaction("c_1", maxed).unwrap();

    assert_eq!(ws.log_call("c_1", date(2024, 2, 2), "").unwrap(), "i_1");
    assert_eq!(ws.log_call("c_1", date(2024, 2, 3), "").unwrap(), "i_2");
    assert_eq!(ws.client("c_1").unwrap().interactions.len(), 3);
}

#[test]
fn workspace_json_uses_camel_case_fields() {
    let ws = sample_workspace().unwrap();
    let val = serde_json::to_value(&ws).unwrap();
    let acme = &val["clients"][0];
    assert!(acme["projectNotes"].as_str().unwrap().starts_with("Website is very slow"));
    assert_eq!(acme["lastContacted"], "2023-10-25");
    assert_eq!(acme["interestedServices"][1], "srv_2");
    assert_eq!(val["projects"][0]["status"], "In Progress");
    assert_eq!(val["services"][3]["priceEstimate"], 8000.0);
}
