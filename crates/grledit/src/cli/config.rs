//! `grledit config`: resolved paths and effective settings.

use grledit::EditorConfig;
use grledit_protocol::paths::{default_config_path, grledit_home};
use grledit_protocol::evaluate_url;

#[derive(Debug)]
pub struct ConfigArgs {
    pub json: bool,
}

pub fn run(args: ConfigArgs) -> anyhow::Result<()> {
    let home = grledit_home();
    let config_path = default_config_path();
    let logs = home.join("logs");
    let config = EditorConfig::load(&config_path)?;
    let endpoint = config.resolve_endpoint(None);
    let evaluate = evaluate_url(&endpoint).unwrap_or_else(|e| format!("invalid ({})", e));

    if args.json {
        let report = serde_json::json!({
            "home": home.to_string_lossy(),
            "config": {
                "path": config_path.to_string_lossy(),
                "exists": config_path.exists(),
            },
            "logs": {
                "path": logs.to_string_lossy(),
                "exists": logs.exists(),
            },
            "endpoint": endpoint,
            "evaluate_url": evaluate,
            "block_placement": config.block_placement.as_str(),
            "request_shape": config.request_shape.as_str(),
            "request_timeout_secs": config.request_timeout_secs,
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("GRLEDIT CONFIGURATION");
        println!("=====================");
        println!();
        println!("Home:     {}", home.display());
        println!(
            "Config:   {} ({})",
            config_path.display(),
            if config_path.exists() { "exists" } else { "not found, using defaults" }
        );
        println!("Logs:     {}", logs.display());
        println!();
        println!("Endpoint:        {}", endpoint);
        println!("  Evaluate URL:  {}", evaluate);
        println!("Block placement: {}", config.block_placement.as_str());
        println!("Request shape:   {}", config.request_shape.as_str());
        match config.request_timeout_secs {
            Some(secs) => println!("Timeout:         {}s", secs),
            None => println!("Timeout:         none"),
        }
    }

    Ok(())
}
