use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use smartcare::{
    Config, FileStorage, OutlineEntry, PreferenceStore, Profile, ProfileField, Questionnaire,
    Session, TomlPreferences,
};
use smartcare_dialoguer::DialoguerBackend;
use tracing::info;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[derive(Parser)]
#[command(name = "smartcare", version, about = "Fill in smartcare questionnaires")]
struct Cli {
    #[arg(long, help = "Config file (defaults to <config dir>/smartcare/config.toml)")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(about = "Store a questionnaire JSON file as the current questionnaire")]
    Import { file: PathBuf },
    #[command(about = "Print the current questionnaire with all sub-answers")]
    Show,
    #[command(about = "Answer the current questionnaire")]
    Fill {
        #[arg(long, help = "Use prompts without colors")]
        plain: bool,
        #[arg(long, help = "Ignore answers saved earlier")]
        fresh: bool,
    },
    #[command(about = "Print the saved feedback as JSON")]
    Export,
    #[command(about = "Delete every saved answer")]
    Reset,
    #[command(subcommand, about = "Account settings")]
    Profile(ProfileCommands),
}

#[derive(Subcommand)]
enum ProfileCommands {
    #[command(about = "Print the account settings")]
    Show,
    #[command(about = "Change one account setting")]
    Set {
        #[arg(help = "firstname, secondname, phonenumber, height, weight or age")]
        field: String,
        value: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config_path = match cli.config {
        Some(path) => path,
        None => Config::default_path()?,
    };
    let config = Config::load_from(&config_path)?;
    let storage = FileStorage::new(config.storage.data_dir());

    match cli.command {
        Commands::Import { file } => {
            let json = fs::read_to_string(&file)
                .with_context(|| format!("Failed to read {}", file.display()))?;
            let questionnaire: Questionnaire = smartcare::from_json(&json)
                .with_context(|| format!("{} is not a questionnaire", file.display()))?;
            smartcare::save_questionnaire(
                &storage,
                &config.storage.questionnaire_file,
                &questionnaire,
            )?;
            println!(
                "Imported '{}' with {} questions.",
                questionnaire.uri,
                questionnaire.len()
            );
        }
        Commands::Show => {
            let questionnaire = current_questionnaire(&storage, &config)?;
            print_outline(&questionnaire);
        }
        Commands::Fill { plain, fresh } => {
            let questionnaire = current_questionnaire(&storage, &config)?;
            let saved = if fresh {
                None
            } else {
                smartcare::load_feedback(&storage, &config.storage.feedback_file)
            };
            let mut session = match saved {
                Some(feedback) => Session::resume(questionnaire, feedback),
                None => Session::start(questionnaire, config.feedback.clone()),
            };

            let backend = if plain {
                DialoguerBackend::plain()
            } else {
                DialoguerBackend::new()
            };
            let result = session.run(&backend);

            // Answers given before a cancellation are kept.
            smartcare::save_feedback(&storage, &config.storage.feedback_file, session.feedback())?;
            match result {
                Err(err) if err.is_cancelled() => println!("Cancelled, progress saved."),
                other => other?,
            }
        }
        Commands::Export => {
            match smartcare::load_feedback(&storage, &config.storage.feedback_file) {
                Some(feedback) => println!("{}", smartcare::to_json(&feedback)?),
                None => println!("No feedback saved."),
            }
        }
        Commands::Reset => {
            let feedback = match smartcare::load_feedback(&storage, &config.storage.feedback_file) {
                Some(mut feedback) => {
                    feedback.reset();
                    feedback
                }
                None => config.feedback.feedback(),
            };
            smartcare::save_feedback(&storage, &config.storage.feedback_file, &feedback)?;
            println!("All answers deleted.");
        }
        Commands::Profile(command) => {
            let mut store = TomlPreferences::open(config.storage.preferences_path());
            match command {
                ProfileCommands::Show => {
                    let profile = Profile::load(&store);
                    for field in ProfileField::ALL {
                        println!("{:<13} {}", format!("{}:", field.label()), profile.field(field));
                    }
                }
                ProfileCommands::Set { field, value } => {
                    let Some(field) = ProfileField::from_key(&field) else {
                        bail!("Unknown profile field '{field}'");
                    };
                    store.set(field.key(), &value);
                    store.flush()?;
                    info!(%field, "profile updated");
                }
            }
        }
    }

    Ok(())
}

fn current_questionnaire(storage: &FileStorage, config: &Config) -> Result<Questionnaire> {
    match smartcare::load_questionnaire(storage, &config.storage.questionnaire_file) {
        Some(questionnaire) => Ok(questionnaire),
        None => bail!(
            "No questionnaire in {}, run `smartcare import <file>` first",
            storage.dir().display()
        ),
    }
}

fn print_outline(questionnaire: &Questionnaire) {
    println!("Questionnaire {}", questionnaire.uri);
    for entry in questionnaire.outline() {
        let indent = "  ".repeat(entry.depth());
        match entry {
            OutlineEntry::Question(question) => {
                println!("{indent}{} [{}]", question.description(), question.uri())
            }
            OutlineEntry::Answer { answer, .. } => {
                println!("{indent}{} answer [{}]", answer.type_name(), answer.uri)
            }
            OutlineEntry::Item { item, .. } => {
                println!("{indent}- {} (score {})", item.item_text, item.item_score)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_fill_flags() {
        let cli = Cli::try_parse_from(["smartcare", "fill", "--plain", "--fresh"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Fill {
                plain: true,
                fresh: true
            }
        ));
        assert!(cli.config.is_none());
    }

    #[test]
    fn parses_profile_set() {
        let cli =
            Cli::try_parse_from(["smartcare", "--config", "c.toml", "profile", "set", "age", "42"])
                .unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("c.toml")));
        match cli.command {
            Commands::Profile(ProfileCommands::Set { field, value }) => {
                assert_eq!(field, "age");
                assert_eq!(value, "42");
            }
            _ => panic!("expected profile set"),
        }
    }

    #[test]
    fn command_is_required() {
        assert!(Cli::try_parse_from(["smartcare"]).is_err());
    }
}
