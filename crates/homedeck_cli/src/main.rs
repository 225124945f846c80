//! Smoke CLI for the organization engine.
//!
//! # Responsibility
//! - Verify `homedeck_core` linkage and print a board layout.
//! - With a path argument, load that config file instead of the demo board.

use homedeck_core::{EditorSession, Group, JsonFileStore, SetupWizard, UNGROUPED};
use std::collections::BTreeMap;

fn main() {
    println!("homedeck core version={}", homedeck_core::core_version());

    if let Some(path) = std::env::args().nth(1) {
        match JsonFileStore::new(&path).load() {
            Ok(Some(config)) => print_layout(&EditorSession::from_config(config)),
            Ok(None) => println!("no config file at {path}"),
            Err(err) => eprintln!("cannot load {path}: {err}"),
        }
        return;
    }

    match demo_session() {
        Ok(session) => print_layout(&session),
        Err(err) => eprintln!("demo board failed: {err}"),
    }
}

/// Assembles a small board through the wizard, then reopens its payload the
/// way the dashboard would after first save.
fn demo_session() -> Result<EditorSession, Box<dyn std::error::Error>> {
    let mut wizard = SetupWizard::new();
    wizard.session_mut().submit_new_group(Group::new("Media"))?;

    let mut substitutions = BTreeMap::new();
    substitutions.insert("host".to_string(), "nas.local".to_string());
    for id in ["jellyfin", "sonarr", "radarr"] {
        wizard.add_from_template(id, &substitutions)?;
    }

    let seeded = wizard.session().view().bucket(UNGROUPED).to_vec();
    wizard.session_mut().finalize_bucket("Media", seeded);

    let config = wizard.complete()?;
    Ok(EditorSession::from_config(config))
}

fn print_layout(session: &EditorSession) {
    let view = session.view();
    let ungrouped = view.bucket(UNGROUPED);
    if !ungrouped.is_empty() {
        println!("(ungrouped)");
        for app in ungrouped {
            println!("  {} -> {}", app.name, app.url);
        }
    }
    for group in view.groups() {
        println!("{}", group.name);
        for app in view.bucket(&group.name) {
            println!("  {} -> {}", app.name, app.url);
        }
    }
}
