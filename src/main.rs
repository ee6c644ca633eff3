use dirdesk::HttpEntityApi;
use dirdesk::cli::{self, Command, parse_command};
use dirdesk::config::Config;
use dirdesk::form::FormField;
use dirdesk::host::TerminalPage;
use dirdesk::panel::{EntityPanel, Page, PageEvent};
use dirdesk::ui::{AlertStack, Severity, validate_email, validate_required};
use dirdesk::view::Action;
use mimalloc::MiMalloc;
use std::io;
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
use url::Url;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

type TerminalPanel = EntityPanel<HttpEntityApi, TerminalPage>;

const REQUIRED_FIELDS: [&str; 2] = ["name", "email"];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let cfg = Config::load()?;

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(cfg.basic.loglevel.clone()));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .compact()
                .with_writer(io::stderr)
                .with_level(true)
                .with_target(false),
        )
        .init();

    let ctx = cfg.context()?;
    info!(
        base_url = %cfg.basic.base_url,
        proxy = %cfg.basic.proxy.as_ref().map_or("<none>", Url::as_str),
        request_timeout_secs = ?cfg.basic.request_timeout_secs,
        loglevel = %cfg.basic.loglevel,
        entity_type = %ctx.token(),
        entity_name = %ctx.name(),
        "Configuration loaded"
    );

    let api = HttpEntityApi::from_config(&cfg.basic, &ctx)?;
    let alerts = AlertStack::new(cfg.alert_timing());
    let mut panel = EntityPanel::new(ctx, api, TerminalPage::new(), alerts);

    panel.dispatch(PageEvent::Loaded).await;
    flush(&mut panel);

    // Reads stay on this thread: delete prompts read stdin too.
    let mut line = String::new();
    loop {
        line.clear();
        if io::stdin().read_line(&mut line)? == 0 {
            break;
        }

        let command = match parse_command(&line) {
            Ok(Some(Command::Quit)) => break,
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(err) => {
                eprintln!("{err}");
                continue;
            }
        };
        run(&mut panel, command).await;
        flush(&mut panel);
    }

    info!("Session closed.");
    Ok(())
}

async fn run(panel: &mut TerminalPanel, command: Command) {
    match command {
        Command::Count => panel.load_count().await,
        Command::Search(term) => {
            panel.page_mut().set_search_term(&term);
            panel.dispatch(PageEvent::SearchClicked).await;
        }
        Command::List => panel.dispatch(PageEvent::LoadAll).await,
        Command::Add(fields) => {
            if check_add_form(panel, &fields) {
                panel.page_mut().set_form(fields);
                panel.dispatch(PageEvent::SubmitAddForm).await;
            }
        }
        Command::Update { id, fields } => panel.update(&id, &fields).await,
        Command::Delete(id) => panel.dispatch(PageEvent::Click(Action::Delete(id))).await,
        Command::Clear => panel.dispatch(PageEvent::ClearSearch).await,
        Command::Download(dir) => {
            if let Some(path) = panel.download(&dir).await {
                println!("saved {}", path.display());
            }
        }
        Command::Help => println!("{}", cli::help()),
        Command::Quit => {}
    }
}

/// Client-side checks before an add: required fields, then email shape.
fn check_add_form(panel: &mut TerminalPanel, fields: &[FormField]) -> bool {
    let alerts = panel.alerts().clone();
    let page = panel.page_mut();

    let required: Vec<FormField> = REQUIRED_FIELDS
        .iter()
        .map(|name| {
            fields
                .iter()
                .find(|f| f.name == *name)
                .cloned()
                .unwrap_or_else(|| FormField::new(*name, ""))
        })
        .collect();
    if !validate_required(&required, &alerts, |f| page.focus_field(&f.name)) {
        return false;
    }

    if let Some(email) = required.iter().find(|f| f.name == "email")
        && !validate_email(email.value.trim())
    {
        alerts.show("Please enter a valid email address", Severity::Error);
        page.focus_field(&email.name);
        return false;
    }
    true
}

fn flush(panel: &mut TerminalPanel) {
    let alerts = panel.alerts().clone();
    panel.page_mut().flush_alerts(&alerts);
}
