//! Command-line front end for the Welsh dictionary lookup and saved-word
//! cache. Each subcommand is one logical user action; sub-steps within it
//! run strictly sequentially.

use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use geirio_config::{Config, ProviderKind};
use geirio_core::{
    LocalProvider, LookupError, LookupOutcome, LookupProvider, Orchestrator, ProxyProvider,
    RemoteProvider,
};
use geirio_gpc::{GpcClient, ProxyClient};
use geirio_lexicon::LexiconService;
use geirio_store::WordStore;
use geirio_translate::TranslationService;
use geirio_types::{CachedWord, Lang, MatchCandidate};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "geirio", about = "Welsh-English dictionary lookup and saved-word cache")]
struct Cli {
    /// Lookup backend: local, remote, or proxy (default from GEIRIO_PROVIDER).
    #[arg(long, global = true)]
    provider: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Search for a word and show its definitions.
    Lookup {
        word: String,
        /// Language of the query term.
        #[arg(long, default_value = "welsh")]
        lang: Lang,
        /// Fetch definitions for match number N from the result list.
        #[arg(long, value_name = "N")]
        pick: Option<usize>,
    },
    /// Search for a word and save the selected match to the word cache.
    Save {
        word: String,
        #[arg(long, default_value = "welsh")]
        lang: Lang,
        /// Save match number N instead of the auto-selected or first match.
        #[arg(long, value_name = "N")]
        pick: Option<usize>,
    },
    /// List the saved words.
    Saved,
    /// Fill in missing translations for saved words.
    Backfill,
    /// Delete all saved words.
    Clear,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let mut config = Config::new();
    if let Some(provider) = &cli.provider {
        config.provider = match provider.as_str() {
            "local" => ProviderKind::Local,
            "remote" => ProviderKind::Remote,
            "proxy" => ProviderKind::Proxy,
            other => anyhow::bail!("unknown provider: {other} (expected local, remote or proxy)"),
        };
    }

    run(cli.command, config).await
}

async fn run(command: Command, config: Config) -> anyhow::Result<()> {
    let store = WordStore::new(&config.cache);

    match command {
        Command::Lookup { word, lang, pick } => {
            let orchestrator = Orchestrator::new(build_provider(&config));
            let outcome = do_lookup(&orchestrator, &word, lang).await?;
            print_outcome(&outcome);

            if pick.is_some() {
                let Some((candidate, definitions)) =
                    pick_candidate(&orchestrator, &outcome, lang, pick).await?
                else {
                    return Ok(());
                };
                print_definitions(candidate.headword(), &definitions);
            }
        }
        Command::Save { word, lang, pick } => {
            let orchestrator = Orchestrator::new(build_provider(&config));
            let outcome = do_lookup(&orchestrator, &word, lang).await?;

            let Some(selected) = pick_candidate(&orchestrator, &outcome, lang, pick).await? else {
                println!("No match found.");
                return Ok(());
            };
            let (candidate, definitions) = selected;
            if definitions.is_empty() {
                println!("No definition found, nothing saved.");
                return Ok(());
            }

            let mut cached = CachedWord {
                definitions: Some(definitions),
                ..Default::default()
            };
            cached.set_side(lang, candidate.headword().to_string());

            let translator = TranslationService::new(&config.translator);
            let added = store
                .add_with_translation(cached, lang, &translator)
                .await
                .context("failed to save word")?;
            if added {
                println!("Word saved: {}", candidate.headword());
            } else {
                println!("Already saved: {}", candidate.headword());
            }
        }
        Command::Saved => {
            let words = store.get_all().await;
            if words.is_empty() {
                println!("No saved words.");
            }
            for word in words {
                print_cached(&word);
            }
        }
        Command::Backfill => {
            let translator = TranslationService::new(&config.translator);
            let filled = store
                .backfill_missing_translations(&translator)
                .await
                .context("failed to backfill translations")?;
            println!("Filled {filled} missing translation(s).");
        }
        Command::Clear => {
            store.clear().await.context("failed to clear saved words")?;
            println!("Saved words cleared.");
        }
    }

    Ok(())
}

fn build_provider(config: &Config) -> Arc<dyn LookupProvider> {
    match config.provider {
        ProviderKind::Local => Arc::new(LocalProvider::new(Arc::new(LexiconService::new(
            &config.lexicon,
        )))),
        ProviderKind::Remote => Arc::new(RemoteProvider::new(GpcClient::new(&config.gpc))),
        ProviderKind::Proxy => Arc::new(ProxyProvider::new(ProxyClient::new(&config.gpc))),
    }
}

async fn do_lookup(
    orchestrator: &Orchestrator,
    word: &str,
    lang: Lang,
) -> anyhow::Result<LookupOutcome> {
    match orchestrator.lookup(word, lang).await {
        Ok(outcome) => Ok(outcome),
        Err(LookupError::EmptyQuery) => anyhow::bail!("please enter a word"),
        Err(LookupError::Backend(e)) => {
            tracing::error!(error = %e, "lookup failed");
            anyhow::bail!("dictionary lookup failed, please try again")
        }
    }
}

/// Resolve a 1-based match number against the displayed result list.
fn pick_from(matches: &[MatchCandidate], pick: usize) -> anyhow::Result<&MatchCandidate> {
    pick.checked_sub(1)
        .and_then(|i| matches.get(i))
        .with_context(|| format!("no match number {pick} (found {} matches)", matches.len()))
}

/// The explicitly picked candidate when `--pick` was given, otherwise the
/// auto-selected match, otherwise the top-ranked candidate with its
/// definitions fetched explicitly (English-direction remote searches do not
/// auto-select).
async fn pick_candidate(
    orchestrator: &Orchestrator,
    outcome: &LookupOutcome,
    lang: Lang,
    pick: Option<usize>,
) -> anyhow::Result<Option<(MatchCandidate, Vec<geirio_types::DefinitionBlock>)>> {
    let candidate = match pick {
        Some(n) => {
            if outcome.matches.is_empty() {
                return Ok(None);
            }
            pick_from(&outcome.matches, n)?
        }
        None => {
            if let Some(selected) = &outcome.selected {
                return Ok(Some((selected.clone(), outcome.definitions.clone())));
            }
            let Some(first) = outcome.matches.first() else {
                return Ok(None);
            };
            first
        }
    };

    if outcome.selected.as_ref() == Some(candidate) {
        return Ok(Some((candidate.clone(), outcome.definitions.clone())));
    }
    let definitions = orchestrator
        .fetch_definitions(candidate, lang)
        .await
        .context("failed to fetch definitions")?;
    Ok(Some((candidate.clone(), definitions)))
}

fn print_outcome(outcome: &LookupOutcome) {
    if outcome.matches.is_empty() {
        println!("No match found.");
        return;
    }

    println!(
        "{} {} found:",
        outcome.matches.len(),
        if outcome.matches.len() == 1 { "match" } else { "matches" }
    );
    for (n, candidate) in outcome.matches.iter().enumerate() {
        println!("  {}. {}", n + 1, candidate.headword());
    }

    if let Some(selected) = &outcome.selected {
        print_definitions(selected.headword(), &outcome.definitions);
    }
}

fn print_definitions(headword: &str, definitions: &[geirio_types::DefinitionBlock]) {
    println!("\n{headword}");
    if definitions.is_empty() {
        println!("  No definition found.");
    }
    for def in definitions {
        match &def.part_of_speech {
            Some(pos) => println!("  [{pos}] {}", def.text),
            None => println!("  {}", def.text),
        }
    }
}

fn print_cached(word: &CachedWord) {
    let welsh = word.welsh.as_deref().unwrap_or("-");
    let english = word.english.as_deref().unwrap_or("-");
    let marker = if word.is_translated == Some(true) {
        " (machine translated)"
    } else {
        ""
    };
    println!("{welsh} = {english}{marker}");
    for def in word.definitions.iter().flatten() {
        match &def.part_of_speech {
            Some(pos) => println!("    [{pos}] {}", def.text),
            None => println!("    {}", def.text),
        }
    }
}
