use anyhow::{Context, Result, anyhow};
use chrono::Local;
use std::time::Instant;

use folio_inbox::config::Config;
use folio_inbox::inbox::render::{format_date, preview, render_message_detail, render_message_list};
use folio_inbox::inbox::{
    DateBucket, FilterCriteria, HttpTransport, LocalStore, MessageService, StatusFilter, demo,
    filter,
};
use folio_inbox::logging;

/// Value following `flag` on the command line
fn flag_value(args: &[String], flag: &str) -> Result<Option<String>> {
    match args.iter().position(|a| a == flag) {
        Some(i) => args
            .get(i + 1)
            .cloned()
            .map(Some)
            .ok_or_else(|| anyhow!("{} needs a value", flag)),
        None => Ok(None),
    }
}

fn main() -> Result<()> {
    logging::init_stderr();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let json = args.iter().any(|a| a == "--json");
    let list = args.iter().any(|a| a == "--list");
    let seed = args.iter().any(|a| a == "--seed");

    let mut criteria = FilterCriteria::default();
    if let Some(search) = flag_value(&args, "--search")? {
        criteria.search = search;
    }
    if let Some(status) = flag_value(&args, "--status")? {
        criteria.status = status.parse::<StatusFilter>().map_err(|e| anyhow!(e))?;
    }
    if let Some(date) = flag_value(&args, "--date")? {
        criteria.date = date.parse::<DateBucket>().map_err(|e| anyhow!(e))?;
    }
    let html_path = flag_value(&args, "--html")?;
    let detail_id = flag_value(&args, "--detail")?;

    let config = Config::load();
    let store = LocalStore::in_dir(config.storage.data_dir());
    if seed {
        let added = demo::seed_if_empty(&store);
        println!("Seeded {} demo messages", added);
    }

    let transport = HttpTransport::from_config(&config.api)?;
    println!("Contacts API: {}", transport.base_url());
    let service = MessageService::new(Box::new(transport), store);

    let start = Instant::now();
    let listed = service.list();
    let source = listed.source;
    let messages = listed.into_inner();
    println!(
        "Loaded {} messages from {:?} in {:?}",
        messages.len(),
        source,
        start.elapsed()
    );

    let now = Local::now();
    let stats = service.stats(&now);
    if json {
        println!("{}", serde_json::to_string_pretty(&stats.value)?);
    } else {
        println!("\nTotal:  {}", stats.value.total);
        println!("Today:  {}", stats.value.today);
        println!("Recent: {}", stats.value.recent);
        println!("Unread: {}", stats.value.unread);
    }

    let visible = filter(&messages, &criteria, &now);

    if list {
        println!("\n{} of {} messages match", visible.len(), messages.len());
        for m in &visible {
            println!(
                "  [{:<7}] {}  {} <{}>",
                m.status.as_str(),
                format_date(&m.created_at),
                m.name,
                m.email
            );
            println!("            {}", preview(&m.message));
        }
    }

    if let Some(id) = detail_id {
        let message = messages
            .iter()
            .find(|m| m.id == id)
            .ok_or_else(|| anyhow!("no message with id {}", id))?;
        println!("\n{}", render_message_detail(message));
    }

    if let Some(path) = html_path {
        std::fs::write(&path, render_message_list(&visible))
            .with_context(|| format!("writing {}", path))?;
        println!("Wrote {} messages to {}", visible.len(), path);
    }

    Ok(())
}
