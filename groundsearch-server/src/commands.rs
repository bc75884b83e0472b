use anyhow::Result;
use colored::Colorize;
use std::path::Path;

use groundsearch_core::modules::config as core_config;
use groundsearch_types::AppConfig;

use crate::cli::ConfigCommands;

pub fn handle_config_command(cmd: ConfigCommands, config_path: Option<&Path>) -> Result<()> {
    match cmd {
        ConfigCommands::Show { json } => show_config(json, config_path),
    }
}

fn show_config(json: bool, config_path: Option<&Path>) -> Result<()> {
    let config = core_config::load_config(config_path)?;

    if json {
        // api_key is skipped by the serializer
        println!("{}", serde_json::to_string_pretty(&config)?);
    } else {
        print_summary(&config);
    }
    Ok(())
}

fn print_summary(config: &AppConfig) {
    println!("{}", "Server:".cyan().bold());
    println!("  Listen: {}", config.server.bind_address());
    println!("  Static dir: {}", config.server.static_dir.as_deref().unwrap_or("(disabled)"));
    println!("  Allowed origins: {}", config.server.allowed_origins.join(", "));

    println!("{}", "Model:".cyan().bold());
    println!("  Name: {}", config.model.model);
    println!("  Endpoint: {}", config.model.base_url);
    println!("  API Key: {}", mask_key(&config.model.api_key));
    println!(
        "  Decoding: temperature={} topP={} topK={} maxOutputTokens={}",
        config.model.temperature,
        config.model.top_p,
        config.model.top_k,
        config.model.max_output_tokens
    );
    println!(
        "  Timeout: {}s, retries: {}",
        config.model.request_timeout_secs, config.model.max_retries
    );

    println!("{}", "Sessions:".cyan().bold());
    println!("  TTL: {}s", config.session.ttl_secs);
    println!("  Max sessions: {}", config.session.max_sessions);
}

fn mask_key(key: &str) -> String {
    if key.is_empty() {
        return "(not set)".to_string();
    }
    let chars: Vec<char> = key.chars().collect();
    if chars.len() <= 8 {
        return "*".repeat(chars.len());
    }
    let head: String = chars[..4].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}...{}", head, tail)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_key() {
        assert_eq!(mask_key(""), "(not set)");
        assert_eq!(mask_key("short"), "*****");
        assert_eq!(mask_key("AIzaSyABCDEFGHIJ1234"), "AIza...1234");
    }
}
