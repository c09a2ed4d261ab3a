//! Record command implementation.

use crate::dispatcher::AnalyticsCategory;
use crate::event::AnalyticsEvent;
use crate::registry::PluginRegistry;
use crate::Result;
use clap::Args;

/// Arguments for the record command
#[derive(Args)]
pub struct RecordArgs {
    /// Event name
    pub name: String,

    /// Key of the plugin to record with, instead of the analytics default
    #[arg(long)]
    pub plugin: Option<String>,

    /// Event property as key=value; JSON values are parsed, anything else is a string
    #[arg(short = 'p', long = "property", value_parser = parse_property)]
    pub properties: Vec<(String, serde_json::Value)>,

    /// Disable analytics before recording (the event is dropped)
    #[arg(long)]
    pub disabled: bool,
}

/// Run the record command
pub fn run(
    args: RecordArgs,
    analytics: &AnalyticsCategory,
    registry: &PluginRegistry,
) -> Result<()> {
    if args.disabled {
        analytics.disable();
    }

    let event = args
        .properties
        .into_iter()
        .fold(AnalyticsEvent::new(args.name), |event, (key, value)| {
            event.with_property(key, value)
        });
    let id = event.id();

    match &args.plugin {
        Some(key) => analytics.record_event_with_plugin(event, key)?,
        None => analytics.record_event(event)?,
    }
    registry.flush_all()?;

    if analytics.is_enabled() {
        println!("Recorded event {}", id);
    } else {
        println!("Analytics disabled, event {} dropped", id);
    }
    Ok(())
}

fn parse_property(raw: &str) -> std::result::Result<(String, serde_json::Value), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected key=value, got '{}'", raw))?;

    let key = key.trim();
    if key.is_empty() {
        return Err(format!("property key missing in '{}'", raw));
    }

    let value = serde_json::from_str(value)
        .unwrap_or_else(|_| serde_json::Value::String(value.to_string()));
    Ok((key.to_string(), value))
}
