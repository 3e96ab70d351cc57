//! Interactive clinical assistant over a durable conversation context.

mod assistant;
mod repl;

use anyhow::{Context, bail};
use assistant::{Assistant, CaseOutcome};
use clap::Parser;
use log::{info, warn};
use remedy_rs_config::RemedyConfig;
use remedy_rs_context::{ContextError, ContextManager};
use remedy_rs_knowledge::{KnowledgeClient, KnowledgeSettings};
use remedy_rs_llm::AnthropicModel;
use repl::{SlashCommand, parse_slash_command};
use std::io::Write as _;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};

/// Command-line options for the assistant.
#[derive(Parser)]
#[command(name = "remedy", version)]
struct Cli {
    /// Optional path to a remedy.json5 config file
    #[arg(long)]
    config: Option<PathBuf>,
    /// Checkpoint file for saving and restoring the conversation context
    #[arg(long)]
    checkpoint: Option<PathBuf>,
    /// Turns included in each context window
    #[arg(long)]
    window_size: Option<usize>,
    /// Model name for the hosted API
    #[arg(long)]
    model: Option<String>,
}

/// Entry point for the Remedy assistant.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = env_logger::builder()
        .format_timestamp_millis()
        .parse_default_env()
        .try_init();

    let cli = Cli::parse();
    let config = if let Some(path) = cli.config.as_ref() {
        info!("loading config from path: {}", path.display());
        RemedyConfig::load_from_path(path).context("failed to load config")?
    } else {
        let cwd = std::env::current_dir().context("cwd")?;
        RemedyConfig::load_or_default(&cwd).context("failed to load config")?
    };

    let Ok(api_key) = std::env::var("ANTHROPIC_API_KEY") else {
        bail!("ANTHROPIC_API_KEY is required to run the assistant");
    };
    let model_name = cli.model.clone().unwrap_or_else(|| config.model.name.clone());
    info!("building model client (model={model_name})");
    let model = AnthropicModel::new(api_key)
        .context("failed to build model client")?
        .with_model(model_name);

    let knowledge = KnowledgeClient::new(KnowledgeSettings {
        request_timeout: Duration::from_secs(config.knowledge.request_timeout_secs),
        openfda_url: config.knowledge.openfda_url.clone(),
        rxnorm_url: config.knowledge.rxnorm_url.clone(),
        medline_url: config.knowledge.medline_url.clone(),
        nice_url: config.knowledge.nice_url.clone(),
        health_gov_url: config.knowledge.health_gov_url.clone(),
    })
    .context("failed to build knowledge client")?;

    let checkpoint_path = cli
        .checkpoint
        .clone()
        .unwrap_or_else(|| PathBuf::from(&config.context.checkpoint_path));
    let window_size = cli.window_size.unwrap_or(config.context.window_size);

    let context = ContextManager::new();
    if checkpoint_path.exists() {
        context
            .restore(&checkpoint_path)
            .context("failed to restore checkpoint")?;
        println!(
            "Resumed previous session ({} turns) from {}",
            context.turn_count(),
            checkpoint_path.display()
        );
    }

    let assistant = Assistant::new(
        context,
        knowledge,
        Arc::new(model),
        window_size,
        config.model.max_tokens,
    );

    println!("Clinical Decision Support System");
    println!("Describe your symptoms, or use /save, /load, /state, /tools, /window, /drug, /condition, /quit.");
    println!("Educational information only; not a substitute for professional medical advice.");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("you> ");
        std::io::stdout().flush()?;
        let Some(line) = lines.next_line().await? else {
            break;
        };
        if line.trim().is_empty() {
            continue;
        }
        match parse_slash_command(&line) {
            Ok(Some(command)) => {
                if handle_command(command, &assistant, &checkpoint_path).await? {
                    break;
                }
            }
            Ok(None) => match assistant.handle_case(line.trim()).await {
                Ok(outcome) => print_outcome(&outcome),
                Err(err) => eprintln!("error: {err:#}"),
            },
            Err(usage) => println!("{usage}"),
        }
    }

    assistant
        .context()
        .checkpoint(&checkpoint_path)
        .context("failed to checkpoint on exit")?;
    println!("Session saved to {}", checkpoint_path.display());
    Ok(())
}

/// Execute a slash command; returns true when the loop should exit.
async fn handle_command(
    command: SlashCommand,
    assistant: &Assistant,
    default_checkpoint: &Path,
) -> anyhow::Result<bool> {
    match command {
        SlashCommand::Save(path) => {
            let target = path.unwrap_or_else(|| default_checkpoint.to_path_buf());
            match assistant.context().checkpoint(&target) {
                Ok(()) => println!("Context saved to {}", target.display()),
                Err(err) => println!("save failed: {err}"),
            }
        }
        SlashCommand::Load(path) => {
            let source = path.unwrap_or_else(|| default_checkpoint.to_path_buf());
            match assistant.context().restore(&source) {
                Ok(()) => println!(
                    "Context restored from {} ({} turns)",
                    source.display(),
                    assistant.context().turn_count()
                ),
                Err(err @ ContextError::NotFound(_)) => {
                    println!("{err}; use /save to create one")
                }
                Err(err @ (ContextError::Format(_) | ContextError::UnsupportedVersion(_))) => {
                    println!("{err}; fix or regenerate the checkpoint file")
                }
                Err(err) => println!("load failed: {err}"),
            }
        }
        SlashCommand::State => {
            let window = assistant.context().context_window(Some(0));
            if window.state.is_empty() {
                println!("No session state recorded yet.");
            }
            for (key, value) in &window.state {
                println!("{key} = {value}");
            }
        }
        SlashCommand::Tools => {
            let window = assistant.context().context_window(Some(0));
            if window.tool_usage.is_empty() {
                println!("No tools used yet.");
            }
            for (name, record) in &window.tool_usage {
                println!("{name}: {} (last used {})", record.count, record.last_used_at);
            }
        }
        SlashCommand::Window(size) => {
            let window = assistant.context().context_window(size);
            if window.turns.is_empty() {
                println!("No conversation recorded yet.");
            }
            for turn in &window.turns {
                println!("[{}] {}", turn.role.as_str(), turn.content);
            }
        }
        SlashCommand::Drug(name) => {
            let info = assistant.drug_lookup(&name).await?;
            if info.is_empty() {
                println!("No drug information found for {name}.");
            } else {
                println!(
                    "Found {} FDA label(s) and {} RxNorm group(s) for {name}.",
                    info.fda_labels.len(),
                    info.rxnorm_groups.len()
                );
            }
        }
        SlashCommand::Condition(name) => {
            let details = assistant.condition_lookup(&name).await?;
            let search = assistant.guideline_search(&name).await?;
            println!(
                "Found {} reference page(s), {} NICE result(s), {} health.gov result(s) for {name}.",
                details.entries.len(),
                search.nice.len(),
                search.health_gov.len()
            );
        }
        SlashCommand::Quit => {
            return Ok(true);
        }
    }
    Ok(false)
}

/// Print an analyzed case the way the REPL presents results.
fn print_outcome(outcome: &CaseOutcome) {
    if outcome.report.is_empty() {
        warn!("no symptoms matched the input");
    }
    println!("Analysis:");
    println!("  symptoms: {}", outcome.report.symptoms.join(", "));
    println!(
        "  conditions: {}",
        outcome
            .differential
            .conditions
            .iter()
            .map(|c| c.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    );
    println!("  urgency: {}", outcome.differential.urgency.as_str());
    println!();
    println!("{}", outcome.response);
}
