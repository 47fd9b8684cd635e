use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use global_notifications::config::Config;
use global_notifications::telemetry::init_tracing;
use global_notifications::ui::{ListFrame, ListView};
use global_notifications::{NotificationStore, Payload};
use tokio::signal;
use tokio::time::sleep;
use tracing::info;

use super::cli::Cli;

const DEFAULT_CONFIG: &str = "notifications.toml";
const CONFIRM_AFTER: Duration = Duration::from_secs(5);

pub async fn run(cli: Cli) -> Result<()> {
    init_tracing(cli.log_filter.as_deref(), cli.json_logs)?;

    let config_path = cli.config.unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG));
    let mut config = Config::from_env_and_file(&config_path)
        .with_context(|| format!("loading {}", config_path.display()))?;
    if cli.reverse {
        config.list.reverse = true;
    }

    let store = NotificationStore::new(config.defaults);
    let mut list = ListView::mount(&store, config.list);

    for message in cli.messages {
        let mut payload = Payload::new().content(message);
        if let Some(duration) = cli.duration {
            payload = payload.duration(duration);
        }
        store.notify(cli.kind, payload);
    }

    let confirm = cli.confirm.then(|| {
        store.error(
            Payload::new()
                .title("Confirm")
                .content("Auto-confirming shortly")
                .ok(|| true)
                .cancel(|| false),
        )
    });

    print_frame(&list.frame());
    if store.snapshot().iter().all(|note| note.duration().is_none()) && confirm.is_none() {
        info!("no notification expires; press Ctrl-C to dismiss all");
    }

    let confirm_timer = sleep(CONFIRM_AFTER);
    tokio::pin!(confirm_timer);
    let mut confirm_pending = confirm.is_some();

    while !store.is_empty() {
        tokio::select! {
            _ = signal::ctrl_c() => {
                let hidden = store.hide_all();
                info!(hidden, "interrupted; hiding closeable notifications");
                if let Some(id) = confirm {
                    list.click_cancel(&id);
                    store.hide(&id);
                }
            }
            () = &mut confirm_timer, if confirm_pending => {
                confirm_pending = false;
                if let Some(id) = confirm {
                    list.click_ok(&id);
                }
            }
            frame = list.next_frame() => print_frame(&frame),
        }
    }

    print_frame(&list.frame());
    list.unmount();
    Ok(())
}

fn print_frame(frame: &ListFrame) {
    for (id, slide) in &frame.leaving {
        println!("  - {id} (slide {}% over {:?})", slide.to_percent, slide.duration);
    }
    for (id, slide) in &frame.entering {
        println!("  + {id} (slide from {}% over {:?})", slide.from_percent, slide.duration);
    }
    println!("[{}] {} visible", frame.wrapper_class, frame.items.len());
    for item in &frame.items {
        let title = item.title.as_deref().unwrap_or("");
        let content = item.content.as_deref().unwrap_or("");
        let mut buttons = Vec::new();
        if let Some(label) = &item.ok {
            buttons.push(format!("[{label}]"));
        }
        if let Some(label) = &item.cancel {
            buttons.push(format!("[{label}]"));
        }
        println!(
            "  {:<7} {title} {content} {}",
            item.kind.as_str(),
            buttons.join(" ")
        );
    }
}
