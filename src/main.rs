//! Strategy Wizard
//!
//! Validates AI trading strategy configurations step by step, derives
//! defaults between steps and submits the result to the strategy backend.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use strategy_wizard::api::{ClientConfig, HttpStrategyClient, StrategyApi};
use strategy_wizard::error::WizardError;
use strategy_wizard::models::{resolve_limits, AssetClass, StrategyType};
use strategy_wizard::validation::{
    create_ai_model_schema, create_copy_trading_strategy_schema, create_exchange_schema,
    create_trading_strategy_schema, AiModelForm, ExchangeForm, MessageCatalog, TradingForm,
    Translator, ValidationErrors, Validator,
};
use strategy_wizard::wizard::{
    format_timestamp, parse_date_time, Lookups, PromptLibrary, StrategyWizard, SubmitOutcome,
    WizardMode,
};

/// Strategy configuration wizard CLI.
#[derive(Parser)]
#[command(name = "stratwiz")]
#[command(about = "Validate and create AI trading strategies", long_about = None)]
struct Cli {
    /// Strategy backend base URL
    #[arg(long, env = "STRATEGY_API_URL", default_value = "http://localhost:8000")]
    api_url: String,

    /// Request timeout in seconds
    #[arg(long, env = "STRATEGY_API_TIMEOUT_SECS", default_value = "30")]
    timeout_secs: u64,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show decision interval limits per asset class
    Limits,

    /// Validate a draft file offline, step by step
    Validate {
        /// Draft JSON with `ai_model`, `exchange` and `trading` sections
        file: PathBuf,

        /// Validate the trading section as a copied strategy (inline prompt)
        #[arg(long)]
        copy: bool,
    },

    /// Create a strategy from a draft file
    Create {
        /// Draft JSON with `ai_model`, `exchange` and `trading` sections
        file: PathBuf,

        /// Print the payload instead of submitting it
        #[arg(long)]
        dry_run: bool,
    },

    /// Create a copy of an existing strategy
    Copy {
        /// Strategy to copy
        strategy_id: String,

        /// Draft JSON whose values override the copied ones
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Print the payload instead of submitting it
        #[arg(long)]
        dry_run: bool,
    },

    /// List existing strategies
    Strategies,

    /// Manage saved prompt templates
    Prompts {
        #[command(subcommand)]
        command: PromptCommands,
    },

    /// Convert between epoch milliseconds and date-time input strings
    Time {
        #[command(subcommand)]
        command: TimeCommands,
    },
}

#[derive(Subcommand)]
enum PromptCommands {
    /// List templates
    List {
        /// Only templates for this asset class (crypto, stock)
        #[arg(short, long)]
        asset_class: Option<AssetClass>,
    },

    /// Save a new template
    Create {
        /// Template name
        name: String,

        /// Prompt text
        #[arg(short, long, conflicts_with = "file")]
        content: Option<String>,

        /// Read the prompt text from a file
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Asset class the template is meant for
        #[arg(short, long)]
        asset_class: Option<AssetClass>,
    },

    /// Delete a template
    Delete {
        /// Template id
        id: String,
    },
}

#[derive(Subcommand)]
enum TimeCommands {
    /// Epoch milliseconds to `YYYY-MM-DDTHH:mm` local time
    Format { timestamp_ms: i64 },

    /// `YYYY-MM-DDTHH:mm` local time to epoch milliseconds
    Parse { value: String },
}

/// Draft file layout. Each section holds only the fields to set.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct DraftFile {
    ai_model: Map<String, Value>,
    exchange: Map<String, Value>,
    trading: Map<String, Value>,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    // Setup logging
    let log_level = match cli.log_level.to_lowercase().as_str() {
        level @ ("trace" | "debug" | "warn" | "error") => level.to_string(),
        _ => "info".to_string(),
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let translator: Arc<dyn Translator + Send + Sync> = Arc::new(MessageCatalog::english());
    let client_config = ClientConfig {
        request_timeout: Duration::from_secs(cli.timeout_secs),
        ..ClientConfig::with_base_url(cli.api_url.clone())
    };

    match cli.command {
        Commands::Limits => {
            println!("\n{:<8} {:>6} {:>6} {:<8}", "ASSET", "MIN", "MAX", "UNIT");
            println!("{}", "-".repeat(31));
            for asset_class in [AssetClass::Crypto, AssetClass::Stock] {
                let limits = resolve_limits(asset_class);
                println!(
                    "{:<8} {:>6} {:>6} {:<8}",
                    asset_class.as_str(),
                    limits.min,
                    limits.max,
                    limits.unit
                );
            }
        }

        Commands::Validate { file, copy } => {
            let draft = read_draft(&file)?;
            let ai_model: AiModelForm = overlay(&AiModelForm::default(), &draft.ai_model)?;
            let exchange: ExchangeForm = overlay(&ExchangeForm::default(), &draft.exchange)?;
            let trading: TradingForm = overlay(&TradingForm::default(), &draft.trading)?;

            let t = &*translator;
            let trading_schema = if copy {
                create_copy_trading_strategy_schema(t, exchange.trading_mode, exchange.asset_class)
            } else {
                create_trading_strategy_schema(t, exchange.trading_mode, exchange.asset_class)
            };
            let results = [
                (
                    "AI model",
                    create_ai_model_schema(t).validate(&ai_model).map(drop),
                ),
                (
                    "Exchange",
                    create_exchange_schema(t).validate(&exchange).map(drop),
                ),
                ("Trading", trading_schema.validate(&trading).map(drop)),
            ];

            let mut failed = 0;
            for (step, result) in &results {
                match result {
                    Ok(()) => println!("{step:<10} ok"),
                    Err(errors) => {
                        failed += 1;
                        println!("{step:<10} invalid");
                        print_issues(errors);
                    }
                }
            }

            let limits = trading_schema.interval_limits();
            println!(
                "\nDecision interval for {}: {}..={} ({})",
                exchange.asset_class, limits.min, limits.max, limits.unit
            );

            if failed > 0 {
                anyhow::bail!("{} of {} steps failed validation", failed, results.len());
            }
        }

        Commands::Create { file, dry_run } => {
            let draft = read_draft(&file)?;
            let client = HttpStrategyClient::new(client_config)?;
            let mut wizard = StrategyWizard::new(translator.clone());

            apply_setup_overrides(&mut wizard, &draft)?;
            leave_setup_steps(&mut wizard, &client).await?;

            if let Some(value) = draft.trading.get("strategy_type") {
                let strategy_type: StrategyType = serde_json::from_value(value.clone())
                    .context("Invalid strategy_type in draft")?;
                wizard.set_strategy_type(strategy_type);
            }
            let derived = wizard.draft().trading.clone();
            let mut trading: TradingForm = overlay(&derived, &draft.trading)?;
            trading.fill_blanks_from(&derived);
            wizard.draft_mut().trading = trading;

            let prompts = PromptLibrary::new(&client, &*translator)
                .list(Some(wizard.prompt_asset_class()))
                .await
                .context("Failed to load prompt templates")?;
            wizard.reconcile(&prompts);

            finish(&mut wizard, &client, dry_run).await?;
        }

        Commands::Copy {
            strategy_id,
            file,
            dry_run,
        } => {
            let client = HttpStrategyClient::new(client_config)?;
            let detail = client
                .get_strategy_detail(&strategy_id)
                .await
                .with_context(|| format!("Failed to load strategy {}", strategy_id))?;
            info!(strategy_id = %strategy_id, name = %detail.strategy_name, "Copying strategy");

            let draft = match file {
                Some(path) => read_draft(&path)?,
                None => DraftFile::default(),
            };
            let mut wizard = StrategyWizard::for_copy(translator.clone(), &detail);

            apply_setup_overrides(&mut wizard, &draft)?;
            leave_setup_steps(&mut wizard, &client).await?;

            let trading: TradingForm = overlay(&wizard.draft().trading, &draft.trading)?;
            wizard.draft_mut().trading = trading;
            wizard.reconcile(&[]);

            finish(&mut wizard, &client, dry_run).await?;
        }

        Commands::Strategies => {
            let client = HttpStrategyClient::new(client_config)?;
            let strategies = client.list_strategies().await?;

            if strategies.is_empty() {
                println!("No strategies yet. Use 'stratwiz create <draft.json>' to add one.");
                return Ok(());
            }

            println!("\n{:<38} {:<32} {:<10}", "ID", "NAME", "STATUS");
            println!("{}", "-".repeat(82));
            for strategy in strategies {
                println!(
                    "{:<38} {:<32} {:<10}",
                    strategy.strategy_id,
                    truncate(&strategy.strategy_name, 30),
                    strategy.status
                );
            }
        }

        Commands::Prompts { command } => {
            let client = HttpStrategyClient::new(client_config)?;
            let library = PromptLibrary::new(&client, &*translator);

            match command {
                PromptCommands::List { asset_class } => {
                    let prompts = library.list(asset_class).await?;

                    println!("\n{:<38} {:<24} {:<8}", "ID", "NAME", "ASSET");
                    println!("{}", "-".repeat(72));
                    for prompt in prompts {
                        println!(
                            "{:<38} {:<24} {:<8}",
                            prompt.id,
                            truncate(&prompt.name, 22),
                            prompt.asset_class.map(|a| a.as_str()).unwrap_or("any")
                        );
                    }
                }

                PromptCommands::Create {
                    name,
                    content,
                    file,
                    asset_class,
                } => {
                    let content = match (content, file) {
                        (Some(text), _) => text,
                        (None, Some(path)) => std::fs::read_to_string(&path)
                            .with_context(|| format!("Failed to read {}", path.display()))?,
                        (None, None) => String::new(),
                    };
                    let prompt = library.create(&name, &content, asset_class).await?;
                    println!("Created prompt {} ({})", prompt.id, prompt.name);
                }

                PromptCommands::Delete { id } => {
                    library
                        .delete(&id)
                        .await
                        .with_context(|| format!("Failed to delete prompt {}", id))?;
                    println!("Deleted prompt {}", id);
                }
            }
        }

        Commands::Time { command } => match command {
            TimeCommands::Format { timestamp_ms } => {
                println!("{}", format_timestamp(Some(timestamp_ms)));
            }
            TimeCommands::Parse { value } => {
                let timestamp = parse_date_time(&value).with_context(|| {
                    format!("'{}' is not a valid YYYY-MM-DDTHH:mm local time", value)
                })?;
                println!("{}", timestamp);
            }
        },
    }

    Ok(())
}

fn read_draft(path: &Path) -> Result<DraftFile> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("Failed to parse {}", path.display()))
}

/// Set the keys present in `overrides` on top of `base`.
fn overlay<T: Serialize + DeserializeOwned>(base: &T, overrides: &Map<String, Value>) -> Result<T> {
    let mut value = serde_json::to_value(base)?;
    if let Value::Object(fields) = &mut value {
        for (key, v) in overrides {
            fields.insert(key.clone(), v.clone());
        }
    }
    serde_json::from_value(value).context("Invalid value in draft")
}

fn apply_setup_overrides(wizard: &mut StrategyWizard, draft: &DraftFile) -> Result<()> {
    let current = wizard.draft_mut();
    current.ai_model = overlay(&current.ai_model, &draft.ai_model)?;
    current.exchange = overlay(&current.exchange, &draft.exchange)?;
    Ok(())
}

/// Walk the wizard through the model and exchange steps.
async fn leave_setup_steps(wizard: &mut StrategyWizard, api: &dyn StrategyApi) -> Result<()> {
    if let Err(e) = wizard.advance(&Lookups::default()) {
        print_issues(wizard.issues());
        return Err(e).context("AI model step is invalid");
    }

    let lookups = wizard
        .fetch_lookups(api)
        .await
        .context("Failed to load existing strategy names")?;
    if let Err(e) = wizard.advance(&lookups) {
        print_issues(wizard.issues());
        return Err(e).context("Exchange step is invalid");
    }
    Ok(())
}

async fn finish(wizard: &mut StrategyWizard, api: &dyn StrategyApi, dry_run: bool) -> Result<()> {
    let trading = &wizard.draft().trading;
    let mode = match wizard.mode() {
        WizardMode::Create => "new",
        WizardMode::Copy => "copy",
    };
    println!("\nStrategy:  {} ({})", trading.strategy_name, mode);
    println!("Type:      {}", trading.strategy_type);
    println!("Symbols:   {}", trading.symbols.join(", "));

    if dry_run {
        let payload = match wizard.compose_payload() {
            Ok(payload) => payload,
            Err(e) => {
                if let WizardError::Validation(errors) = &e {
                    print_issues(errors);
                }
                return Err(e).context("Trading config is invalid");
            }
        };
        println!("\n{}", serde_json::to_string_pretty(&payload)?);
        return Ok(());
    }

    match wizard.submit(api).await {
        Ok(SubmitOutcome::Created { strategy_id }) => {
            println!("\nCreated strategy {}", strategy_id);
            Ok(())
        }
        Ok(SubmitOutcome::Rejected { .. }) | Err(_) => {
            print_issues(wizard.issues());
            let reason = wizard.submit_error().unwrap_or("trading config is invalid");
            anyhow::bail!("Strategy was not created: {}", reason)
        }
    }
}

fn print_issues(errors: &ValidationErrors) {
    for issue in &errors.issues {
        println!("  - {:<18} {}", issue.path, issue.message);
    }
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
