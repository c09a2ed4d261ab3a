//! Plugins command implementation.

use crate::category::Category;
use crate::registry::PluginRegistry;
use crate::Result;
use clap::Args;
use std::fmt::Write;

/// Arguments for the plugins command
#[derive(Args)]
pub struct PluginsArgs {
    /// Print descriptors as JSON
    #[arg(long)]
    pub json: bool,
}

/// Run the plugins command
pub fn run(args: PluginsArgs, registry: &PluginRegistry) -> Result<()> {
    print!("{}", render(&args, registry)?);
    Ok(())
}

/// Render the plugin listing, as a table or as JSON
pub fn render(args: &PluginsArgs, registry: &PluginRegistry) -> Result<String> {
    let plugins = registry.plugins();

    if args.json {
        let mut json = serde_json::to_string_pretty(&plugins)?;
        json.push('\n');
        return Ok(json);
    }

    if plugins.is_empty() {
        return Ok("No plugins registered.\n".to_string());
    }

    let default = registry.default_key(Category::Analytics);
    let mut out = String::from("Registered plugins:\n\n");
    for descriptor in &plugins {
        let marker = if default.as_deref() == Some(descriptor.key.as_str()) {
            " (default)"
        } else {
            ""
        };
        // Writing into a String cannot fail.
        let _ = writeln!(
            out,
            "  {:<16} {:<10} {} v{}{}",
            descriptor.key,
            descriptor.category.as_str(),
            descriptor.name,
            descriptor.version,
            marker
        );
    }

    Ok(out)
}
