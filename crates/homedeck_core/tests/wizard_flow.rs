use homedeck_core::{
    App, CatalogError, EditorSession, Group, SetupWizard, WizardError, UNGROUPED,
};
use std::collections::BTreeMap;

fn host_subs() -> BTreeMap<String, String> {
    let mut subs = BTreeMap::new();
    subs.insert("host".to_string(), "nas.local".to_string());
    subs
}

#[test]
fn wizard_assembles_a_board_and_completes_once() {
    let mut wizard = SetupWizard::new();
    wizard
        .session_mut()
        .submit_new_group(Group::new("Media"))
        .unwrap();
    wizard.add_from_template("jellyfin", &host_subs()).unwrap();
    wizard.add_from_template("sonarr", &host_subs()).unwrap();

    // file both seeded apps under Media
    let seeded = wizard.session().view().bucket(UNGROUPED).to_vec();
    wizard.session_mut().finalize_bucket("Media", seeded);

    let config = wizard.complete().unwrap();
    assert!(wizard.is_completed());
    assert_eq!(config.groups.len(), 1);
    assert_eq!(config.apps.len(), 2);
    assert!(config.apps.iter().all(|a| a.group == "Media"));

    let err = wizard.complete().unwrap_err();
    assert!(matches!(err, WizardError::AlreadyCompleted));
}

#[test]
fn unknown_template_is_a_catalog_error() {
    let mut wizard = SetupWizard::new();
    let err = wizard.add_from_template("nope", &host_subs()).unwrap_err();
    assert!(matches!(
        err,
        WizardError::Catalog(CatalogError::TemplateNotFound(id)) if id == "nope"
    ));
}

#[test]
fn template_add_passes_the_same_gate_as_manual_add() {
    let mut wizard = SetupWizard::new();
    wizard.add_from_template("plex", &host_subs()).unwrap();

    // same display name again collides like any duplicate submission
    let err = wizard.add_from_template("plex", &host_subs()).unwrap_err();
    match err {
        WizardError::Session(session_err) => {
            let text = session_err.to_string();
            assert!(text.contains("name"));
        }
        other => panic!("expected Session error, got {other:?}"),
    }
}

#[test]
fn wizard_session_supports_manual_edits_too() {
    let mut wizard = SetupWizard::new();
    wizard
        .session_mut()
        .submit_new_app(App::new("Custom", "http://byo.host:8080"))
        .unwrap();
    wizard.add_from_template("pihole", &host_subs()).unwrap();
    wizard.session_mut().delete_app("Custom").unwrap();

    let config = wizard.complete().unwrap();
    assert_eq!(config.apps.len(), 1);
    assert_eq!(config.apps[0].name, "Pi-hole");
    assert_eq!(config.apps[0].url, "http://nas.local/admin");
}

#[test]
fn completion_payload_reopens_in_the_editor_unchanged() {
    let mut wizard = SetupWizard::new();
    wizard
        .session_mut()
        .submit_new_group(Group::new("Media"))
        .unwrap();
    wizard.add_from_template("radarr", &host_subs()).unwrap();
    let seeded = wizard.session().view().bucket(UNGROUPED).to_vec();
    wizard.session_mut().finalize_bucket("Media", seeded);
    let config = wizard.complete().unwrap();

    let session = EditorSession::from_config(config.clone());
    assert_eq!(session.assemble_config(), config);
    assert_eq!(session.view().bucket("Media")[0].name, "Radarr");
}
