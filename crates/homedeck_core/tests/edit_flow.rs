use homedeck_core::{App, EditorSession, Group, IconSelection, OrganizeError};

fn seeded_session() -> EditorSession {
    let mut session = EditorSession::new();
    session.submit_new_group(Group::new("Media")).unwrap();
    let mut plex = App::new("Plex", "http://nas.local:32400/web");
    plex.group = "Media".to_string();
    session.submit_new_app(plex).unwrap();
    let mut sonarr = App::new("Sonarr", "http://nas.local:8989");
    sonarr.group = "Media".to_string();
    session.submit_new_app(sonarr).unwrap();
    session
        .submit_new_app(App::new("Radarr", "http://nas.local:7878"))
        .unwrap();
    session
}

fn media_bucket(session: &EditorSession) -> Vec<String> {
    session
        .view()
        .bucket("Media")
        .iter()
        .map(|a| a.name.clone())
        .collect()
}

#[test]
fn commit_updates_fields_in_place() {
    let mut session = seeded_session();

    let mut draft = session.begin_app_edit("Sonarr").unwrap();
    draft.app.url = "https://sonarr.internal".to_string();
    draft.app.color = Some("#2e86ab".to_string());
    draft.app.shortcut = Some(3);
    session.commit_app_edit(&draft).unwrap();

    let stored = session.board().app("Sonarr").unwrap();
    assert_eq!(stored.url, "https://sonarr.internal");
    assert_eq!(stored.color.as_deref(), Some("#2e86ab"));
    assert_eq!(stored.shortcut, Some(3));
    // still second in its bucket
    assert_eq!(media_bucket(&session), vec!["Plex", "Sonarr"]);
}

#[test]
fn commit_failure_leaves_everything_untouched() {
    let mut session = seeded_session();
    let board_before = session.board().clone();

    let mut draft = session.begin_app_edit("Sonarr").unwrap();
    draft.app.url = "not a url".to_string();
    let err = session.commit_app_edit(&draft).unwrap_err();
    match err {
        OrganizeError::Invalid(errors) => {
            assert!(errors.get("url").is_some());
        }
        other => panic!("expected Invalid, got {other:?}"),
    }

    assert_eq!(session.board(), &board_before);
    // draft is still open with the rejected input for correction
    assert_eq!(draft.app.url, "not a url");
}

#[test]
fn cancel_is_dropping_the_draft() {
    let mut session = seeded_session();
    let board_before = session.board().clone();

    {
        let mut draft = session.begin_app_edit("Plex").unwrap();
        draft.app.url = "http://elsewhere:9".to_string();
        draft.app.color = Some("#000000".to_string());
        draft.apply_icon(IconSelection {
            name: "rocket".to_string(),
            variant: "solid".to_string(),
            kind: "mdi".to_string(),
        });
        // modal closed without commit
    }

    assert_eq!(session.board(), &board_before);
    assert_eq!(media_bucket(&session), vec!["Plex", "Sonarr"]);
}

#[test]
fn commit_rename_rekeys_the_app() {
    let mut session = seeded_session();

    let mut draft = session.begin_app_edit("Plex").unwrap();
    draft.app.name = "Plex Media Server".to_string();
    assert!(draft.renames());
    session.commit_app_edit(&draft).unwrap();

    assert!(!session.board().has_app("Plex"));
    let stored = session.board().app("Plex Media Server").unwrap();
    assert_eq!(stored.group, "Media");
    assert_eq!(stored.order, 0);
    assert_eq!(media_bucket(&session), vec!["Plex Media Server", "Sonarr"]);
}

#[test]
fn commit_rename_onto_existing_app_is_rejected() {
    let mut session = seeded_session();

    let mut draft = session.begin_app_edit("Plex").unwrap();
    draft.app.name = "Sonarr".to_string();
    let err = session.commit_app_edit(&draft).unwrap_err();
    assert!(matches!(
        err,
        OrganizeError::Invalid(errors) if errors.get("name").is_some()
    ));
    assert!(session.board().has_app("Plex"));
}

#[test]
fn commit_group_move_lands_with_dense_ranks() {
    let mut session = seeded_session();
    session.submit_new_group(Group::new("Arr")).unwrap();

    let mut draft = session.begin_app_edit("Sonarr").unwrap();
    draft.app.group = "Arr".to_string();
    session.commit_app_edit(&draft).unwrap();

    assert_eq!(media_bucket(&session), vec!["Plex"]);
    let arr: Vec<&str> = session
        .view()
        .bucket("Arr")
        .iter()
        .map(|a| a.name.as_str())
        .collect();
    assert_eq!(arr, vec!["Sonarr"]);
    assert_eq!(session.board().app("Sonarr").unwrap().order, 0);
    // source bucket closed its hole
    assert_eq!(session.board().app("Plex").unwrap().order, 0);
}

#[test]
fn commit_to_unknown_group_is_rejected() {
    let mut session = seeded_session();

    let mut draft = session.begin_app_edit("Sonarr").unwrap();
    draft.app.group = "Ghost".to_string();
    let err = session.commit_app_edit(&draft).unwrap_err();
    assert!(matches!(
        err,
        OrganizeError::Invalid(errors) if errors.get("group") == Some("group does not exist")
    ));
}

#[test]
fn shortcut_conflict_blocks_commit() {
    let mut session = seeded_session();

    let mut draft = session.begin_app_edit("Plex").unwrap();
    draft.app.shortcut = Some(1);
    session.commit_app_edit(&draft).unwrap();

    let mut draft = session.begin_app_edit("Sonarr").unwrap();
    draft.app.shortcut = Some(1);
    let err = session.commit_app_edit(&draft).unwrap_err();
    match err {
        OrganizeError::Invalid(errors) => {
            assert_eq!(
                errors.get("shortcut"),
                Some("digit already assigned to Plex")
            );
        }
        other => panic!("expected Invalid, got {other:?}"),
    }

    // keeping your own digit is not a conflict
    let mut draft = session.begin_app_edit("Plex").unwrap();
    draft.app.color = Some("#ffffff".to_string());
    session.commit_app_edit(&draft).unwrap();
}

#[test]
fn group_rename_cascades_to_members_and_bucket() {
    let mut session = seeded_session();

    let mut draft = session.begin_group_edit("Media").unwrap();
    draft.group.name = "Streaming".to_string();
    draft.group.color = Some("#101010".to_string());
    session.commit_group_edit(&draft).unwrap();

    assert!(!session.board().has_group("Media"));
    let stored = session.board().group("Streaming").unwrap();
    assert_eq!(stored.color.as_deref(), Some("#101010"));
    assert_eq!(session.board().app("Plex").unwrap().group, "Streaming");
    assert_eq!(session.board().app("Sonarr").unwrap().group, "Streaming");
    assert!(session.view().bucket("Media").is_empty());
    let streaming: Vec<&str> = session
        .view()
        .bucket("Streaming")
        .iter()
        .map(|a| a.name.as_str())
        .collect();
    assert_eq!(streaming, vec!["Plex", "Sonarr"]);
}

#[test]
fn inline_rename_survives_an_open_gesture() {
    let mut session = seeded_session();

    // drag in flight over the Media bucket
    let mut items = session.view().bucket("Media").to_vec();
    items.swap(0, 1);
    session.consider_bucket("Media", items);

    session.rename_group("Media", "Streaming").unwrap();
    assert!(session.view().has_scratch());
    let streaming: Vec<&str> = session
        .view()
        .bucket("Streaming")
        .iter()
        .map(|a| a.name.as_str())
        .collect();
    assert_eq!(streaming, vec!["Sonarr", "Plex"]);

    // the drop finalizes against the new key
    let items = session.view().bucket("Streaming").to_vec();
    session.finalize_bucket("Streaming", items);
    assert_eq!(session.board().app("Sonarr").unwrap().order, 0);
    assert_eq!(session.board().app("Sonarr").unwrap().group, "Streaming");
}

#[test]
fn apply_icon_flows_into_the_entity_on_commit() {
    let mut session = seeded_session();

    let mut draft = session.begin_app_edit("Radarr").unwrap();
    draft.apply_icon(IconSelection {
        name: "radarr".to_string(),
        variant: "color".to_string(),
        kind: "dashboard".to_string(),
    });
    session.commit_app_edit(&draft).unwrap();

    let icon = &session.board().app("Radarr").unwrap().icon;
    assert_eq!(icon.name, "radarr");
    assert_eq!(icon.variant, "color");
    assert_eq!(icon.kind, "dashboard");
}

#[test]
fn commit_against_a_deleted_entity_reports_not_found() {
    let mut session = seeded_session();

    let draft = session.begin_app_edit("Radarr").unwrap();
    session.delete_app("Radarr").unwrap();
    let err = session.commit_app_edit(&draft).unwrap_err();
    assert!(matches!(err, OrganizeError::AppNotFound(name) if name == "Radarr"));

    let group_draft = session.begin_group_edit("Media").unwrap();
    session.delete_group("Media").unwrap();
    let err = session.commit_group_edit(&group_draft).unwrap_err();
    assert!(matches!(err, OrganizeError::GroupNotFound(name) if name == "Media"));
}

#[test]
fn blank_rename_is_rejected() {
    let mut session = seeded_session();

    let err = session.rename_group("Media", "   ").unwrap_err();
    assert!(matches!(
        err,
        OrganizeError::Invalid(errors) if errors.get("name").is_some()
    ));
    assert!(session.board().has_group("Media"));
}
