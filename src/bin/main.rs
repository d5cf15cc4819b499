use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use lexicon_core::config::{
    required_env, Config, DEFAULT_TEXT_MODEL, DEFAULT_VOICE_ID, ELEVENLABS_API_KEY, ELEVENLABS_VOICE_ID,
    OPENAI_API_KEY, OPENAI_MODEL,
};
use lexicon_core::core::alternate::{check_symmetry, renumber, split_compounds};
use lexicon_core::core::feminine::add_feminine_forms;
use lexicon_core::core::numerals::split_numerals;
use lexicon_core::core::possessive::PossessiveDeriver;
use lexicon_core::core::types::Gender;
use lexicon_core::ingest::{AddOutcome, Ingestor, NewEntry};
use lexicon_core::media::reconcile;
use lexicon_core::persistence::{load_sentences, save_sentences, write_json_atomic};
use lexicon_core::pipeline::{audio, images, sentences, text, Throttle};
use lexicon_core::services::elevenlabs::ElevenLabs;
use lexicon_core::services::openai::OpenAiText;
use lexicon_core::services::{image_generator, HttpDownloader};
use lexicon_core::{Error, Lexicon};
use log::{info, warn};
use std::path::PathBuf;
use std::time::Duration;

/// Authoring jobs for the Emirati vocabulary database
#[derive(Parser, Debug)]
#[command(name = "lexicon", version, about = "Batch jobs over logic.json and sentences.json")]
struct Args {
    /// Vocabulary database
    #[arg(long, global = true, default_value = "logic.json")]
    data: PathBuf,

    /// Canonical sentences file
    #[arg(long, global = true, default_value = "sentences.json")]
    sentences: PathBuf,

    /// Extra copies of sentences.json to keep in sync (repeatable)
    #[arg(long = "mirror", global = true)]
    mirrors: Vec<PathBuf>,

    #[arg(long, global = true, default_value = "media")]
    media_dir: PathBuf,

    #[arg(long, global = true, default_value = "audio")]
    audio_dir: PathBuf,

    #[arg(long, global = true, default_value = "images")]
    image_dir: PathBuf,

    /// Pause after every external API call
    #[arg(long, global = true, default_value_t = 1500)]
    throttle_ms: u64,

    /// Chat model for text jobs
    #[arg(long, global = true, env = OPENAI_MODEL, default_value = DEFAULT_TEXT_MODEL)]
    model: String,

    /// ElevenLabs voice for audio jobs
    #[arg(long, global = true, env = ELEVENLABS_VOICE_ID, default_value = DEFAULT_VOICE_ID)]
    voice: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Derive the eight possessive forms of every noun
    Possessives {
        /// Only nouns of this `type`
        #[arg(long = "type")]
        kind: Option<String>,
        #[arg(long)]
        dry_run: bool,
    },
    /// Add feminine agreement forms to adjectives
    Feminine {
        #[arg(long)]
        dry_run: bool,
    },
    /// Split "a/b" compound records into linked alternate pairs
    SplitAlternates {
        #[arg(long)]
        dry_run: bool,
    },
    /// Make two records each other's alternate
    Link { a: u64, b: u64 },
    /// Renumber ids densely from 1
    Renumber,
    /// Move numeral items into the numerals array
    SplitNumerals,
    /// Report alternate-pair problems (read-only)
    Check,
    /// Append one record
    Add {
        #[arg(long)]
        chat: String,
        #[arg(long, default_value = "")]
        ar: String,
        #[arg(long)]
        eng: String,
        #[arg(long)]
        pos: String,
        #[arg(long = "type")]
        kind: Option<String>,
        /// m or f
        #[arg(long)]
        gender: Option<String>,
    },
    /// Append every entry of a JSON array file
    Import { file: PathBuf },
    /// Write the media manifest for the media directory
    Manifest {
        #[arg(long, default_value = "media-manifest.json")]
        out: PathBuf,
    },
    /// Fill missing Arabic from Arabizi via the text model
    Transliterate {
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Fill missing English glosses via the text model
    Translate {
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Render word audio for records without an mp3
    Audio {
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Generate picture-quiz sentences
    Sentences {
        #[arg(short = 'n', long, default_value_t = 5)]
        count: usize,
    },
    /// Download sentence images still stored as URLs
    FetchImages {
        #[arg(long)]
        dry_run: bool,
    },
}

fn build_config(args: &Args) -> Config {
    let mut config = Config::default();
    config.data_path = args.data.clone();
    config.sentences_path = args.sentences.clone();
    config.mirrors = args.mirrors.clone();
    config.media_dir = args.media_dir.clone();
    config.audio_dir = args.audio_dir.clone();
    config.image_dir = args.image_dir.clone();
    config.throttle = Duration::from_millis(args.throttle_ms);
    config.text_model = args.model.clone();
    config.voice_id = args.voice.clone();
    config
}

fn parse_gender(s: Option<&str>) -> Result<Option<Gender>> {
    match s {
        None => Ok(None),
        Some(raw) => match Gender::parse(raw) {
            Some(g) => Ok(Some(g)),
            None => bail!("gender must be 'm' or 'f', got '{}'", raw),
        },
    }
}

/// Opens the database, runs `f`, and writes it back unless `dry_run`.
fn mutate<F>(config: &Config, dry_run: bool, f: F) -> Result<()>
where
    F: FnOnce(&mut Lexicon) -> lexicon_core::Result<()>,
{
    Lexicon::edit_with(&config.data_path, dry_run, f)
        .with_context(|| format!("updating {}", config.data_path.display()))
}

fn text_model(config: &Config) -> Result<OpenAiText> {
    Ok(OpenAiText::new(required_env(OPENAI_API_KEY)?, &config.text_model)?)
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();
    let config = build_config(&args);
    let throttle = Throttle::new(config.throttle);

    match args.command {
        Command::Possessives { kind, dry_run } => mutate(&config, dry_run, |lex| {
            let report = PossessiveDeriver::new().derive_all(lex.items_mut(), kind.as_deref());
            for chat in &report.flagged {
                warn!("Review possessives of '{}'", chat);
            }
            Ok(())
        }),
        Command::Feminine { dry_run } => mutate(&config, dry_run, |lex| {
            add_feminine_forms(lex.items_mut());
            Ok(())
        }),
        Command::SplitAlternates { dry_run } => mutate(&config, dry_run, |lex| {
            let items = std::mem::take(lex.items_mut());
            let (split, _) = split_compounds(items);
            *lex.items_mut() = split;
            Ok(())
        }),
        Command::Link { a, b } => mutate(&config, false, |lex| {
            lex.link_alternates(a, b)?;
            info!("Linked {} <-> {}", a, b);
            Ok(())
        }),
        Command::Renumber => mutate(&config, false, |lex| {
            let cleared = renumber(lex.items_mut());
            info!("Renumbered {} records ({} dangling alternates cleared)", lex.items().len(), cleared);
            Ok(())
        }),
        Command::SplitNumerals => mutate(&config, false, |lex| {
            split_numerals(&mut lex.db);
            Ok(())
        }),
        Command::Check => {
            let lexicon = Lexicon::open(&config.data_path)?;
            let issues = check_symmetry(lexicon.items());
            for issue in &issues {
                warn!("{:?}", issue);
            }
            info!("{} records, {} alternate issues", lexicon.items().len(), issues.len());
            Ok(())
        }
        Command::Add { chat, ar, eng, pos, kind, gender } => {
            let gender = parse_gender(gender.as_deref())?;
            mutate(&config, false, |lex| {
                let mut ingestor = Ingestor::new(lex);
                let entry = NewEntry { ar, chat, eng, pos, kind, gender, ..Default::default() };
                match ingestor.add(lex, entry) {
                    AddOutcome::Added { .. } => Ok(()),
                    AddOutcome::Duplicate { existing } => {
                        Err(Error::InvalidRecord(format!("already present as record {}", existing)))
                    }
                    AddOutcome::Invalid(why) => Err(Error::InvalidRecord(why.to_string())),
                }
            })
        }
        Command::Import { file } => mutate(&config, false, |lex| {
            let mut ingestor = Ingestor::new(lex);
            ingestor.import(lex, &file)?;
            Ok(())
        }),
        Command::Manifest { out } => {
            let lexicon = Lexicon::open(&config.data_path)?;
            let manifest = reconcile(lexicon.items(), &config.media_dir)?;
            write_json_atomic(&manifest, &out)?;
            info!("Manifest written to {}", out.display());
            Ok(())
        }
        Command::Transliterate { limit } => {
            let model = text_model(&config)?;
            mutate(&config, false, |lex| {
                text::transliterate_missing(lex.items_mut(), &model, throttle, limit);
                Ok(())
            })
        }
        Command::Translate { limit } => {
            let model = text_model(&config)?;
            mutate(&config, false, |lex| {
                text::translate_missing(lex.items_mut(), &model, throttle, limit);
                Ok(())
            })
        }
        Command::Audio { limit } => {
            let synth = ElevenLabs::new(required_env(ELEVENLABS_API_KEY)?)?;
            let lexicon = Lexicon::open(&config.data_path)?;
            audio::generate_word_audio(
                lexicon.items(),
                &synth,
                &config.voice_id,
                &config.audio_dir,
                throttle,
                limit,
            )?;
            Ok(())
        }
        Command::Sentences { count } => {
            let model = text_model(&config)?;
            let speech = ElevenLabs::new(required_env(ELEVENLABS_API_KEY)?)?;
            let generator = image_generator()?;
            let downloader = HttpDownloader::new()?;
            let lexicon = Lexicon::open(&config.data_path)?;
            let services = sentences::SentenceServices {
                text: &model,
                speech: &speech,
                images: generator.as_ref(),
                downloader: &downloader,
            };
            sentences::run(services, &config, lexicon.items(), count)?;
            Ok(())
        }
        Command::FetchImages { dry_run } => {
            let downloader = HttpDownloader::new()?;
            let mut file = load_sentences(&config.sentences_path)?;
            let report =
                images::fetch_remote_images(&mut file, &downloader, &config.image_dir, throttle, dry_run)?;
            if !dry_run && report.succeeded > 0 {
                save_sentences(&mut file, &config.sentences_path, &config.mirrors)?;
            }
            Ok(())
        }
    }
}
