use anyhow::Context;
use clap::Parser;
use enter_remap::adapters::sites;
use enter_remap::core::resolver;
use enter_remap::domain::model::{
    GlobalState, IgnoreReason, KeyAction, Outcome, Request, DomainConfigPatch, StoredSettings,
};
use enter_remap::domain::ports::{NodeProbe, SettingsStore};
use enter_remap::utils::validation::{self, Validate};
use enter_remap::utils::logger;
use enter_remap::{BufferTarget, CliConfig, EnterKeyEngine, JsonFileStore, KeywordSet, PageSnapshot};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    logger::init_cli_logger(config.verbose);

    tracing::info!("Starting enter-remap probe");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    if let Err(e) = config.validate() {
        tracing::error!("Configuration validation failed: {}", e);
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }

    let html = std::fs::read_to_string(&config.page)
        .with_context(|| format!("failed to read page snapshot '{}'", config.page))?;
    let snapshot = PageSnapshot::parse(&html);
    let dom = snapshot.dom();
    let keywords = KeywordSet::for_locale(&config.locale);
    tracing::debug!("Keyword set has {} entries", keywords.len());

    let stored = match &config.settings {
        Some(path) => {
            let store = JsonFileStore::new(path);
            match store.load().await {
                Ok(stored) => stored,
                Err(e) => {
                    tracing::warn!("Settings load failed, using defaults: {}", e);
                    StoredSettings::default()
                }
            }
        }
        None => StoredSettings::default(),
    };
    let state = GlobalState::from_stored(stored.clone());

    let domain = match &config.domain {
        Some(raw) => Some(validation::normalize_domain(raw)?),
        None => None,
    };
    if let Some(domain) = &domain {
        tracing::info!("Resolving for domain: {}", domain);
    }

    let domain_selector = domain
        .as_deref()
        .and_then(|d| state.active_config(d).explicit_selector())
        .map(str::to_string);
    let explicit = config.selector.clone().or(domain_selector);
    let adapter = domain.as_deref().and_then(sites::adapter_for);
    let adapter_selector = adapter.and_then(|a| a.selector());

    if config.candidates {
        let ranked = resolver::rank_candidates(&dom, &keywords);
        if ranked.is_empty() {
            println!("No candidates collected.");
        } else {
            println!("{:>6}  {}", "score", "element");
            for candidate in &ranked {
                println!("{:>6}  {}", candidate.score, describe(&candidate.node));
            }
        }
    }

    match resolver::resolve_send_button(&dom, &keywords, explicit.as_deref(), adapter_selector) {
        Some(node) => println!("✅ send button: {}", describe(&node)),
        None => println!("❌ no acceptable send button found"),
    }

    if let Some(chord) = config.key {
        let engine_domain = domain.clone().unwrap_or_else(|| "default".to_string());
        let mut engine = EnterKeyEngine::new(engine_domain, &config.locale);
        engine.initialize_with(stored);
        if let Some(selector) = &config.selector {
            engine.handle_request(Request::ConfigUpdated {
                config: DomainConfigPatch {
                    selector: Some(selector.clone()),
                    ..DomainConfigPatch::default()
                },
            });
        }

        let mut target = BufferTarget::textarea("", 0);
        let outcome = engine.handle_keydown(&chord.to_event(), &mut target, &dom);
        report_outcome(&outcome);
    }

    Ok(())
}

fn describe<N: NodeProbe>(node: &N) -> String {
    let mut parts = vec![format!("<{}>", node.tag())];
    if let Some(id) = node.attr("id") {
        parts.push(format!("#{}", id));
    }
    if let Some(class) = node.attr("class") {
        parts.push(format!(".{}", class.split_whitespace().collect::<Vec<_>>().join(".")));
    }
    if let Some(label) = node.attr("aria-label") {
        parts.push(format!("[aria-label={:?}]", label));
    }
    parts.join(" ")
}

fn report_outcome<N: NodeProbe>(outcome: &Outcome<N>) {
    match outcome {
        Outcome::Ignored(reason) => {
            let why = match reason {
                IgnoreReason::SyntheticSuppressed => "synthetic event suppressed",
                IgnoreReason::NotEnter => "not an Enter keydown",
                IgnoreReason::NotReady => "configuration not loaded yet",
                IgnoreReason::NotEditable => "target is not editable",
                IgnoreReason::Disabled => "domain is disabled",
            };
            println!("➡️  ignored: {}", why);
        }
        Outcome::PassThrough => println!("➡️  pass through to the page"),
        Outcome::Handled(action) => {
            let what = match action {
                KeyAction::ClickSend(node) => format!("click {}", describe(node)),
                KeyAction::SendKeys => "synthetic Enter sequence (send)".to_string(),
                KeyAction::NewlineInserted => "newline inserted at caret".to_string(),
                KeyAction::NewlineKeys => "synthetic Shift+Enter sequence (newline)".to_string(),
                KeyAction::Blocked => "blocked".to_string(),
                KeyAction::NoOp => "no send button found, no-op".to_string(),
            };
            println!("✅ handled (native suppressed): {}", what);
        }
    }
}
