//! Form check CLI
//!
//! Loads a field list and a set of values, then reports which fields are
//! visible and which visible fields fail validation.
//!
//! # Usage
//!
//! ```bash
//! # Visibility and errors for a field list with its defaults
//! form-check --fields fields.yaml
//!
//! # With values, printing the normalized payload when they pass
//! form-check --fields fields.json --values record.json --submit
//!
//! # Fetch `apiUrl` option lists first, forwarding a route parameter
//! form-check --fields fields.yaml --api-base-url https://api.example.com --param teamId=7
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use async_trait::async_trait;
use clap::Parser;

use form_engine::options::HttpOptions;
use form_engine::{
    load_fields, EngineConfig, FieldDescriptor, FormSession, FormValueMap, SubmitHandler,
    SubmitOutcome,
};

#[derive(Parser)]
#[command(name = "form-check")]
#[command(version)]
#[command(about = "Check form values against a field list")]
struct Args {
    /// Field list (.json, .yaml or .yml)
    #[arg(short, long)]
    fields: PathBuf,

    /// JSON object of initial values
    #[arg(short, long)]
    values: Option<PathBuf>,

    /// Run a submit and print the normalized payload
    #[arg(long)]
    submit: bool,

    /// Base URL for relative option endpoints
    #[arg(long, env = "FORM_API_BASE_URL")]
    api_base_url: Option<url::Url>,

    /// Route parameter forwarded through `urlParamMap` (KEY=VALUE, repeatable)
    #[arg(long = "param", value_parser = parse_param)]
    params: Vec<(String, String)>,
}

fn parse_param(raw: &str) -> Result<(String, String), String> {
    raw.split_once('=')
        .map(|(k, v)| (k.trim().to_string(), v.trim().to_string()))
        .filter(|(k, _)| !k.is_empty())
        .ok_or_else(|| format!("expected KEY=VALUE, got '{raw}'"))
}

/// Prints the payload instead of sending it anywhere
struct PrintPayload;

#[async_trait]
impl SubmitHandler for PrintPayload {
    async fn submit(&self, payload: &FormValueMap) -> anyhow::Result<()> {
        println!("{}", serde_json::to_string_pretty(payload)?);
        Ok(())
    }
}

/// Fetch the options of every field that declares an `apiUrl`
async fn load_remote_options(
    session: &mut FormSession<'_>,
    fields: &[FieldDescriptor],
    route_params: &BTreeMap<String, String>,
) -> anyhow::Result<()> {
    let config = session.config().clone();
    let client = config.http_client()?;

    for field in fields {
        let Some(option_config) = field.option_config() else {
            continue;
        };
        let Some(source) =
            HttpOptions::from_config(option_config, route_params, &config, client.clone())?
        else {
            continue;
        };
        let loaded = session.load_options(&field.name, &source).await?.len();
        match session.loader(&field.name).and_then(|l| l.last_error()) {
            Some(error) => println!("  {}: failed to load options ({error})", field.name),
            None => println!("  {}: {loaded} options", field.name),
        }
    }
    Ok(())
}

fn read_values(path: &Path) -> anyhow::Result<FormValueMap> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("reading values from {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("{} is not a JSON object of values", path.display()))
}

async fn run(args: Args) -> anyhow::Result<bool> {
    let fields = load_fields(&args.fields)?;
    let initial = match &args.values {
        Some(path) => read_values(path)?,
        None => FormValueMap::new(),
    };

    let mut config = EngineConfig::default();
    if args.api_base_url.is_some() {
        config.api_base_url = args.api_base_url;
    }

    let mut session = FormSession::with_config(&fields, initial, config)?;
    tracing::info!(session = %session.id(), fields = fields.len(), "checking form");

    if fields
        .iter()
        .any(|f| f.option_config().is_some_and(|c| c.api_url.is_some()))
    {
        println!("Options:");
        let route_params: BTreeMap<String, String> = args.params.into_iter().collect();
        load_remote_options(&mut session, &fields, &route_params).await?;
    }

    println!("Visibility:");
    for (name, visible) in session.visibility().iter() {
        println!("  {name}: {}", if visible { "visible" } else { "hidden" });
    }

    if args.submit {
        return match session.submit(&PrintPayload).await? {
            SubmitOutcome::Submitted => Ok(true),
            SubmitOutcome::Invalid(errors) => {
                println!("Errors:");
                for (name, message) in &errors {
                    println!("  {name}: {message}");
                }
                Ok(false)
            }
            SubmitOutcome::AlreadyPending => Ok(false),
        };
    }

    let errors = session
        .schema()
        .validate_visible(&session.normalized_values(), session.visibility());
    if errors.is_empty() {
        println!("No errors");
        return Ok(true);
    }
    println!("Errors:");
    for (name, message) in &errors {
        println!("  {name}: {message}");
    }
    Ok(false)
}

#[tokio::main]
async fn main() -> ExitCode {
    // Load .env file if present
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .init();

    let args = Args::parse();

    match run(args).await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::from(2)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_params_parse() {
        assert_eq!(
            parse_param("teamId = 7").unwrap(),
            ("teamId".to_string(), "7".to_string())
        );
        assert_eq!(
            parse_param("q=a=b").unwrap(),
            ("q".to_string(), "a=b".to_string())
        );
        assert!(parse_param("teamId").is_err());
        assert!(parse_param("=7").is_err());
    }

    #[test]
    fn test_args_accept_repeated_params() {
        let args = Args::try_parse_from([
            "form-check",
            "--fields",
            "fields.yaml",
            "--api-base-url",
            "http://localhost:8080/",
            "--param",
            "teamId=7",
            "--param",
            "org=acme",
        ])
        .unwrap();
        assert_eq!(args.params.len(), 2);
        assert_eq!(args.api_base_url.unwrap().as_str(), "http://localhost:8080/");
    }
}
