use anyhow::Context;
use clap::Parser;

use kartei::args::{parse_word_list, AnalyzeArgs, Cli, Commands, EnglishArgs, InputArgs, NormalizeArgs, PrepareArgs};
use kartei::builder::{WordData, WordDataBuilder};
use kartei::card;
use kartei::config::{self, Config, Providers};
use kartei::nlp::classify::{self, Surface};
use kartei::normalize::normalize;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match Cli::parse().cmd {
        Commands::Prepare(args) => prepare(args).await,
        Commands::Normalize(args) => normalize_inputs(args),
        Commands::Analyze(args) => analyze(args).await,
        Commands::English(args) => english(args).await,
    }
}

fn read_items(input: &InputArgs, hint: Option<&str>) -> anyhow::Result<Vec<(String, Option<String>)>> {
    let items = match &input.file {
        Some(path) => {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read words from '{}'", path.display()))?;
            parse_word_list(&content)
        }
        None => input
            .word
            .iter()
            .map(|word| (word.clone(), hint.map(String::from)))
            .collect(),
    };
    log::info!("preparing {} word(s)", items.len());
    Ok(items)
}

/// Tells the user whether to fix the input or just try again.
fn explain(err: kartei::Error) -> anyhow::Error {
    let advice = if err.is_user_error() {
        "check the word and try again"
    } else if err.is_transient() {
        "an upstream service misbehaved, retrying may help"
    } else {
        "preparing card data failed"
    };
    anyhow::Error::new(err).context(advice)
}

async fn prepare(args: PrepareArgs) -> anyhow::Result<()> {
    let items = read_items(&args.input, args.hint.as_deref())?;

    let config = args.providers.config();
    let providers = Providers::from_config(&config).await?;
    let builder = WordDataBuilder::new(providers, config.languages);

    let results = builder
        .prepare_batch(items.iter().map(|(word, hint)| (word.as_str(), hint.as_deref())))
        .await
        .map_err(explain)?;

    for word in &results {
        if args.preview {
            print_preview(word);
        } else {
            println!("{}", serde_json::to_string(word)?);
        }
    }
    log::info!("prepared {} word(s)", results.len());
    Ok(())
}

async fn english(args: EnglishArgs) -> anyhow::Result<()> {
    let items = read_items(&args.input, args.hint.as_deref())?;

    let config = args.config();
    let providers = Providers::without_analysis(&config).await?;
    let builder = WordDataBuilder::new(providers, config.languages);

    let results = builder
        .prepare_english_batch(items.iter().map(|(word, hint)| (word.as_str(), hint.as_deref())))
        .await
        .map_err(explain)?;
    for word in &results {
        println!("{}", serde_json::to_string(word)?);
    }
    log::info!("prepared {} English word(s)", results.len());
    Ok(())
}

fn print_preview(word: &WordData) {
    let article = word
        .noun_properties
        .as_ref()
        .map(|noun| format!("{} ", noun.article))
        .unwrap_or_default();
    println!("{article}{}", card::headword(word));
    println!("  say: {}", card::spoken_word(word));
    println!("  {}", card::combined_translation(word));
    println!("  {}", word.example_sentence);
    println!("  {}", word.example_sentence_translated);
}

fn normalize_inputs(args: NormalizeArgs) -> anyhow::Result<()> {
    for input in &args.input {
        match normalize(input) {
            Ok(normalized) => println!("{}", serde_json::to_string(&normalized)?),
            Err(err) => eprintln!("\"{input}\": {err}"),
        }
    }
    Ok(())
}

async fn analyze(args: AnalyzeArgs) -> anyhow::Result<()> {
    let normalized = normalize(&args.word)?;
    anyhow::ensure!(
        !normalized.is_phrase,
        "\"{}\" is a phrase, phrases are not tagged",
        normalized.core
    );

    let config = Config {
        tagger: args.tagger,
        lexicon: args.lexicon,
        ..Config::new("")
    };
    let tagger = config::build_tagger(&config).await?;
    let analyzed = tagger.analyze(normalized.bare()).await?;
    let surface = Surface {
        word: normalized.bare(),
        is_reflexive: normalized.is_reflexive,
    };
    let pos = classify::classify(&surface, &analyzed.tag)?;
    println!("{}\t{}\t{pos}", analyzed.lemma, analyzed.tag);
    Ok(())
}
