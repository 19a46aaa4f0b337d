use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing::{debug, info, warn};

use docsim::config::Config;
use docsim::corpus::source::Source;
use docsim::corpus::{Corpus, SourceMap, StopWords};
use docsim::embedding::{Doc2Vec, TrainingMode};
use docsim::output::terminal;
use docsim::pipeline::{query, train};

/// docsim: find the documents most similar to a line of text.
///
/// Every line of every source file becomes a tagged document. A paragraph
/// vector model is trained on the whole corpus and queried by tag.
#[derive(Parser)]
#[command(name = "docsim", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct SourceArgs {
    /// Source file and tag prefix as PATH=PREFIX (repeatable, order kept).
    /// Defaults to train-blocked.txt=TRAIN_BL and train-nonblocked.txt=TRAIN_NBL
    #[arg(long = "source", short = 's', value_name = "PATH=PREFIX")]
    sources: Vec<Source>,

    /// Keep stop words instead of filtering them out
    #[arg(long)]
    keep_stop_words: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Train on the sources and print the documents most similar to TEXT
    Query {
        /// Query text; normalized like corpus lines before lookup
        #[arg(default_value = "fang lizhi")]
        text: String,

        #[command(flatten)]
        sources: SourceArgs,

        /// Number of similar documents to show (default: 4)
        #[arg(long)]
        top_n: Option<usize>,

        /// Training passes over the shuffled corpus (default: 20)
        #[arg(long)]
        passes: Option<usize>,

        /// Seed for initialization, sampling, and shuffling (default: 1)
        #[arg(long)]
        seed: Option<u64>,

        /// Training mode: dm or dbow (default: dm)
        #[arg(long)]
        mode: Option<TrainingMode>,

        /// Infer a vector when TEXT is not a document in the corpus
        #[arg(long)]
        infer: bool,

        /// Print results as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the filtered text of the document with TAG
    Show {
        /// Tag such as TRAIN_BL_0
        tag: String,

        #[command(flatten)]
        sources: SourceArgs,
    },

    /// List every tag in corpus order with its filtered text
    Tags {
        #[command(flatten)]
        sources: SourceArgs,

        /// Print the corpus as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    // Logs go to stderr so query output stays clean on stdout
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("docsim=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut config = Config::load()?;

    match cli.command {
        Commands::Query {
            text,
            sources,
            top_n,
            passes,
            seed,
            mode,
            infer,
            json,
        } => {
            if let Some(passes) = passes {
                config.model.passes = passes;
            }
            if let Some(seed) = seed {
                config.model.seed = seed;
            }
            if let Some(mode) = mode {
                config.model.mode = mode;
            }
            let top_n = top_n.unwrap_or(config.top_n);
            config.validate()?;

            let (corpus, stop_words) = load_corpus(&sources, &config)?;

            let mut model = Doc2Vec::new(config.model.clone());
            let report = train::train_model(
                &mut model,
                &corpus,
                config.model.passes,
                config.model.seed.wrapping_add(1),
                !json,
            )
            .context("Training failed")?;
            info!(
                passes = report.passes.len(),
                words = report.words_trained(),
                "Model trained"
            );

            let result = if infer {
                query::similar_or_inferred(
                    &model,
                    &corpus,
                    &stop_words,
                    &text,
                    top_n,
                    config.infer_epochs,
                )?
            } else {
                query::similar_to_text(&model, &corpus, &stop_words, &text, top_n).with_context(
                    || format!("Query {text:?} is not a document in the corpus (try --infer)"),
                )?
            };

            if json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                terminal::display_query_result(&result);
            }
        }

        Commands::Show { tag, sources } => {
            let (corpus, _) = load_corpus(&sources, &config)?;
            let text = match corpus.text_for_tag(&tag) {
                Ok(text) => text,
                Err(err) if err.is_not_found() => {
                    return Err(anyhow::Error::new(err).context("Run `docsim tags` to list tags"));
                }
                Err(err) => return Err(err.into()),
            };
            terminal::display_document(&tag, &text);
        }

        Commands::Tags { sources, json } => {
            let (corpus, _) = load_corpus(&sources, &config)?;
            if json {
                println!("{}", serde_json::to_string_pretty(corpus.documents())?);
            } else {
                terminal::display_corpus(&corpus);
            }
        }
    }

    Ok(())
}

/// Build the source map and stop-word set, then load every source once.
fn load_corpus(args: &SourceArgs, config: &Config) -> Result<(Corpus, StopWords)> {
    let sources = if args.sources.is_empty() {
        SourceMap::default_training()
    } else {
        SourceMap::new(args.sources.clone())?
    };

    let stop_words = if args.keep_stop_words || !config.stop_words {
        StopWords::none()
    } else {
        StopWords::english()
    };

    debug!(
        sources = sources.len(),
        stop_words = stop_words.len(),
        "Loading corpus"
    );
    let corpus = docsim::corpus::load(&sources, &stop_words).context("Failed to load corpus")?;

    if corpus.is_empty() {
        warn!("The sources contain no lines");
    }

    Ok((corpus, stop_words))
}
