use enter_remap::adapters::editable::TargetEvent;
use enter_remap::core::engine::Readiness;
use enter_remap::domain::model::{
    DomainConfig, DomainConfigPatch, IgnoreReason, KeyAction, KeyBehavior, KeyEvent, Outcome,
    Reply, Request, StoredSettings,
};
use enter_remap::domain::ports::{Editable, NodeProbe, SettingsStore};
use enter_remap::{BufferTarget, EnterKeyEngine, JsonFileStore, PageSnapshot};
use tempfile::TempDir;

const CHAT_PAGE: &str = r#"<body>
  <form>
    <textarea></textarea>
    <button id="send-btn" aria-label="Send message">Send</button>
  </form>
</body>"#;

const SETTINGS_JSON: &str = r#"{
  "domainConfigs": {
    "default": {
      "enabled": null,
      "selector": "",
      "enter": "addNewline",
      "ctrlEnter": "send",
      "shiftEnter": "default"
    },
    "chat.example.com": {
      "enabled": null,
      "selector": "",
      "enter": "send",
      "ctrlEnter": "send",
      "shiftEnter": "addNewline"
    }
  },
  "defaultEnabled": true
}"#;

#[tokio::test]
async fn initialize_from_file_store_applies_domain_config() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("settings.json");
    std::fs::write(&path, SETTINGS_JSON).unwrap();

    let store = JsonFileStore::new(&path);
    let mut engine = EnterKeyEngine::new("chat.example.com", "en");
    assert_eq!(engine.readiness(), Readiness::Loading);

    engine.initialize(&store).await;
    assert_eq!(engine.readiness(), Readiness::Ready);

    // Plain Enter is remapped to "send" for this domain.
    let page = PageSnapshot::parse(CHAT_PAGE);
    let mut target = BufferTarget::textarea("hello", 5);
    match engine.handle_keydown(&KeyEvent::enter(), &mut target, &page.dom()) {
        Outcome::Handled(KeyAction::ClickSend(node)) => {
            assert_eq!(node.attr("id").as_deref(), Some("send-btn"));
        }
        other => panic!("unexpected outcome: {other:?}"),
    }
    assert_eq!(target.value(), "hello");
}

#[tokio::test]
async fn missing_settings_file_still_becomes_ready_with_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let store = JsonFileStore::new(temp_dir.path().join("absent.json"));

    let mut engine = EnterKeyEngine::new("chat.example.com", "en");
    engine.initialize(&store).await;
    assert_eq!(engine.readiness(), Readiness::Ready);

    let page = PageSnapshot::parse(CHAT_PAGE);
    let mut target = BufferTarget::textarea("ab", 1);
    assert_eq!(
        engine.handle_keydown(&KeyEvent::enter(), &mut target, &page.dom()),
        Outcome::Handled(KeyAction::NewlineInserted)
    );
    assert_eq!(target.value(), "a\nb");
    assert_eq!(target.selection(), (2, 2));
}

#[tokio::test]
async fn store_round_trip_preserves_wire_spellings() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("settings.json");
    let store = JsonFileStore::new(&path);

    let mut settings = StoredSettings::default();
    settings.domain_configs.insert(
        "chat.example.com".to_string(),
        DomainConfig {
            enabled: Some(false),
            shift_enter: KeyBehavior::AddNewline,
            ..DomainConfig::default()
        },
    );
    store.save(&settings).await.unwrap();

    let raw = std::fs::read_to_string(&path).unwrap();
    assert!(raw.contains("\"domainConfigs\""));
    assert!(raw.contains("\"defaultEnabled\""));
    assert!(raw.contains("\"shiftEnter\": \"addNewline\""));

    let loaded = store.load().await.unwrap();
    assert_eq!(loaded, settings);
}

#[test]
fn surface_messages_drive_the_next_keydown() {
    let mut engine = EnterKeyEngine::new("chat.example.com", "en");
    engine.initialize_with(StoredSettings::default());
    let page = PageSnapshot::parse(CHAT_PAGE);

    assert_eq!(
        engine.handle_request(Request::GetDomain),
        Reply::Domain {
            domain: "chat.example.com".to_string()
        }
    );

    // Popup flips plain Enter to "send" for this domain.
    let reply = engine.handle_request(Request::ConfigUpdated {
        config: DomainConfigPatch {
            enter: Some(KeyBehavior::Send),
            ..DomainConfigPatch::default()
        },
    });
    assert_eq!(reply, Reply::Success { success: true });

    let mut target = BufferTarget::textarea("hi", 2);
    assert!(matches!(
        engine.handle_keydown(&KeyEvent::enter(), &mut target, &page.dom()),
        Outcome::Handled(KeyAction::ClickSend(_))
    ));

    // Options page turns the site off; the same keydown now passes untouched.
    engine.handle_request(Request::ToggleDomain {
        domain: None,
        enabled: false,
    });
    assert_eq!(
        engine.handle_keydown(&KeyEvent::enter(), &mut target, &page.dom()),
        Outcome::Ignored(IgnoreReason::Disabled)
    );
}

#[test]
fn synthetic_send_keys_are_dispatched_under_suppression() {
    // github.com's adapter sends via a simulated Enter sequence; every one
    // of those synthetic events must see the suppression flag raised, so a
    // captured copy of them could never re-enter the handler.
    let mut engine = EnterKeyEngine::new("github.com", "en");
    engine.initialize_with(StoredSettings::default());
    let page = PageSnapshot::parse(CHAT_PAGE);

    let mut target =
        BufferTarget::textarea("hi", 2).with_suppression_witness(engine.suppression());
    let outcome = engine.handle_keydown(&KeyEvent::ctrl_enter(), &mut target, &page.dom());

    assert_eq!(outcome, Outcome::Handled(KeyAction::SendKeys));
    assert_eq!(target.witnessed_suppression(), &[true, true, true]);
    assert!(!engine.is_suppressed());

    let key_count = target
        .events()
        .iter()
        .filter(|event| matches!(event, TargetEvent::Key { .. }))
        .count();
    assert_eq!(key_count, 3);
}
