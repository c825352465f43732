use anyhow::Result;
use devomail::cli::{MailCommand, execute};
use devomail::domain::{ContainerState, MailError, REGISTRY_FILE, Registry};
use devomail::infra::FsStore;
use devomail::services::{ContainerService, MailService, StartOutcome};
use devomail::test_support::{MockPrompter, MockRuntime};
use std::fs;
use std::sync::Arc;

struct Harness {
    service: MailService,
    runtime: Arc<MockRuntime>,
    prompter: Arc<MockPrompter>,
    store: Arc<FsStore>,
    _dir: tempfile::TempDir,
}

fn harness() -> Result<Harness> {
    let dir = tempfile::tempdir()?;
    let store = Arc::new(FsStore::new(dir.path().join("mail")));
    let runtime = Arc::new(MockRuntime::new());
    let prompter = Arc::new(MockPrompter::new());
    let service = MailService::new(
        Arc::new(ContainerService::new(runtime.clone())),
        store.clone(),
        prompter.clone(),
    );

    Ok(Harness {
        service,
        runtime,
        prompter,
        store,
        _dir: dir,
    })
}

fn seed(h: &Harness, document: &str) -> Result<()> {
    fs::create_dir_all(h.store.root())?;
    fs::write(h.store.path(REGISTRY_FILE), document)?;
    Ok(())
}

#[test]
fn test_destroy_default_needs_force() -> Result<()> {
    let mut h = harness()?;
    seed(
        &h,
        r#"{"default": "a", "services": [{"name": "a", "type": "mailhog"}]}"#,
    )?;

    let err = h.service.destroy("a", false, false).unwrap_err();
    assert_eq!(
        err.downcast_ref::<MailError>(),
        Some(&MailError::CannotDestroyDefault("a".into()))
    );

    h.service.destroy("a", true, true)?;

    let registry = Registry::load(h.store.as_ref())?;
    assert_eq!(registry.default_name(), None);
    assert!(registry.services().is_empty());
    assert!(h.prompter.get_prompts().is_empty());
    assert!(h.runtime.get_commands().contains(&"remove:mail-a.ws".to_string()));

    let document: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(h.store.path(REGISTRY_FILE))?)?;
    assert_eq!(document, serde_json::json!({"services": []}));

    Ok(())
}

#[test]
fn test_first_start_bootstraps_a_service() -> Result<()> {
    let mut h = harness()?;
    h.prompter.push_text("inbox");
    h.prompter.push_selection(1);

    let outcome = h.service.start(None, false)?;

    assert_eq!(outcome, StartOutcome::Started("mail-inbox.ws".into()));

    let registry = Registry::load(h.store.as_ref())?;
    assert_eq!(registry.services().len(), 1);
    assert_eq!(registry.default_name(), Some("inbox"));

    let spec = h.runtime.get_spec("mail-inbox.ws").expect("container created");
    assert_eq!(spec.image, "mailhog/mailhog:latest");
    assert!(spec.env.contains(&"VIRTUAL_PORT=8025".to_string()));
    assert_eq!(
        h.runtime.get_state("mail-inbox.ws"),
        Some(ContainerState::Running)
    );

    Ok(())
}

#[test]
fn test_create_then_list() -> Result<()> {
    let mut h = harness()?;

    h.service.create(Some("svc"), Some("maildev"), None, None)?;
    let table = h.service.list()?;

    let lines: Vec<&str> = table.lines().collect();
    assert_eq!(lines.len(), 2);
    let cells: Vec<&str> = lines[1].split("  ").filter(|c| !c.is_empty()).map(str::trim).collect();
    assert_eq!(
        cells,
        vec!["svc (default)", "maildev", "mail-svc.ws", "maildev/maildev:latest"]
    );

    Ok(())
}

#[test]
fn test_restart_replaces_running_container() -> Result<()> {
    let mut h = harness()?;
    h.service.create(Some("svc"), Some("mailhog"), None, None)?;
    h.runtime.add_container("mail-svc.ws", ContainerState::Running);

    let outcome = h.service.start(Some("svc"), true)?;

    assert_eq!(outcome, StartOutcome::Started("mail-svc.ws".into()));
    let commands = h.runtime.get_commands();
    let position = |cmd: &str| commands.iter().position(|c| c == cmd);
    let removed = position("remove:mail-svc.ws").expect("removed");
    let created = position("create:mail-svc.ws").expect("created");
    let started = position("start:mail-svc.ws").expect("started");
    assert!(removed < created && created < started);
    assert_eq!(
        h.runtime.get_state("mail-svc.ws"),
        Some(ContainerState::Running)
    );

    Ok(())
}

#[test]
fn test_upgrade_image_is_picked_up_on_restart() -> Result<()> {
    let mut h = harness()?;
    h.service.create(Some("svc"), Some("maildev"), None, None)?;
    h.service.start(None, false)?;

    h.service.upgrade(None, None, Some("registry.local/maildev"), Some("2.1.0"))?;
    h.service.start(None, true)?;

    let spec = h.runtime.get_spec("mail-svc.ws").expect("container recreated");
    assert_eq!(spec.image, "registry.local/maildev:2.1.0");

    Ok(())
}

#[test]
fn test_commands_through_dispatch() -> Result<()> {
    let mut h = harness()?;

    execute(
        MailCommand::Create {
            name: Some("a".into()),
            kind: Some("mailhog".into()),
            image: None,
            image_version: None,
        },
        &mut h.service,
    )?;
    execute(
        MailCommand::Create {
            name: Some("b".into()),
            kind: Some("maildev".into()),
            image: None,
            image_version: None,
        },
        &mut h.service,
    )?;

    let current = execute(MailCommand::Use { name: None }, &mut h.service)?;
    assert_eq!(current.as_deref(), Some("a"));

    let output = execute(MailCommand::Use { name: Some("b".into()) }, &mut h.service)?;
    assert_eq!(output, None);

    let output = execute(
        MailCommand::Start {
            name: None,
            restart: false,
        },
        &mut h.service,
    )?;
    assert_eq!(output.as_deref(), Some("Iniciado em mail-b.ws"));

    let output = execute(
        MailCommand::Start {
            name: None,
            restart: false,
        },
        &mut h.service,
    )?;
    assert_eq!(output, None);

    execute(MailCommand::Stop { name: None }, &mut h.service)?;
    assert!(!h.runtime.container_exists("mail-b.ws"));

    Ok(())
}

#[test]
fn test_engine_failure_propagates() -> Result<()> {
    let mut h = harness()?;
    h.service.create(Some("svc"), Some("mailhog"), None, None)?;
    h.runtime.set_fail_on("create");

    let err = h.service.start(None, false).unwrap_err();

    assert!(err.downcast_ref::<MailError>().is_none());
    assert!(err.to_string().contains("Mock failure on: create"));

    Ok(())
}
