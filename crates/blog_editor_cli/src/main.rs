//! blog-editor - validate and export card-based blog drafts.
//!
//! # Responsibility
//! - Run the submission pipeline over a draft JSON file.
//! - Print the export, or the grouped validation errors, for scripting.
//!
//! Exit codes: `0` exported, `1` blocked (errors or unconfirmed pruning),
//! `2` unreadable input or bad options.

use blog_editor_core::{
    content_type_catalog, group_errors_by_subcard, import_json, init_logging, ConfigError,
    EditorConfig, EditorSession, IdPolicy, ImportError, LoggingError, SubmitOutcome,
};
use clap::{Parser, Subcommand};
use log::{error, info};
use std::fmt::{Display, Formatter};
use std::io::Read;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "blog-editor")]
#[command(about = "Validate and export card-based blog drafts", long_about = None)]
struct Cli {
    /// Absolute directory for rolling log files (logging is off without it)
    #[arg(long, global = true)]
    log_dir: Option<String>,

    /// Log level: trace|debug|info|warn|error
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Validate a draft, prune empty content and print the export
    Submit {
        /// Draft or export JSON file (`-` reads stdin)
        input: String,

        /// Editor config JSON file
        #[arg(short, long)]
        config: Option<String>,

        /// Accept pruning of empty cards and subcards
        #[arg(long)]
        confirm: bool,

        /// Mint fresh card and subcard ids on import
        #[arg(long)]
        regenerate_ids: bool,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<String>,
    },
    /// List the content types offered by the subcard picker
    Types,
}

#[derive(Debug)]
enum CliError {
    Io { path: String, reason: String },
    Config(ConfigError),
    Logging(LoggingError),
    Import(ImportError),
    Encode(serde_json::Error),
}

impl Display for CliError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, reason } => write!(f, "cannot access `{path}`: {reason}"),
            Self::Config(err) => write!(f, "{err}"),
            Self::Logging(err) => write!(f, "{err}"),
            Self::Import(err) => write!(f, "{err}"),
            Self::Encode(err) => write!(f, "cannot encode output: {err}"),
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<LoggingError> for CliError {
    fn from(value: LoggingError) -> Self {
        Self::Logging(value)
    }
}

impl From<ImportError> for CliError {
    fn from(value: ImportError) -> Self {
        Self::Import(value)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(value: serde_json::Error) -> Self {
        Self::Encode(value)
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(code) => code,
        Err(err) => {
            error!("event=cli_failed module=cli status=error reason={err}");
            eprintln!("error: {err}");
            ExitCode::from(2)
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode, CliError> {
    match cli.command {
        Command::Types => {
            for entry in content_type_catalog() {
                println!("{:<12} {}", entry.kind.as_str(), entry.label);
            }
            Ok(ExitCode::SUCCESS)
        }
        Command::Submit {
            input,
            config,
            confirm,
            regenerate_ids,
            output,
        } => {
            let mut config = match config {
                Some(path) => EditorConfig::from_json_str(&read_input(&path)?)?,
                None => EditorConfig::default(),
            };
            if cli.log_level.is_some() {
                config.log_level = cli.log_level;
                config.validate()?;
            }
            if let Some(log_dir) = cli.log_dir.as_deref() {
                init_logging(config.effective_log_level(), log_dir)?;
            }

            let ids = if regenerate_ids {
                IdPolicy::Regenerate
            } else {
                IdPolicy::Keep
            };
            let state = import_json(&read_input(&input)?, ids)?;
            let mut session = EditorSession::with_state(state, config);
            submit_draft(&mut session, confirm, output.as_deref())
        }
    }
}

fn submit_draft(
    session: &mut EditorSession,
    confirm: bool,
    output: Option<&str>,
) -> Result<ExitCode, CliError> {
    match session.submit(confirm) {
        SubmitOutcome::Success(export) => {
            let json = serde_json::to_string_pretty(&export)?;
            match output {
                Some(path) => std::fs::write(path, json + "\n").map_err(|err| CliError::Io {
                    path: path.to_string(),
                    reason: err.to_string(),
                })?,
                None => println!("{json}"),
            }
            info!(
                "event=cli_submit module=cli status=ok cards={}",
                export.cards.len()
            );
            Ok(ExitCode::SUCCESS)
        }
        SubmitOutcome::NeedsConfirmation(report) => {
            eprintln!(
                "submission would remove {} empty card(s) and {} empty subcard(s); rerun with --confirm",
                report.removed_cards, report.removed_subcards
            );
            Ok(ExitCode::from(1))
        }
        SubmitOutcome::ValidationFailed(errors) => {
            for group in group_errors_by_subcard(&errors) {
                eprintln!("{} ({})", group.label, group.subcard_id);
                for error in &group.errors {
                    eprintln!("  {}: {}", error.field, error.message);
                }
            }
            Ok(ExitCode::from(1))
        }
    }
}

fn read_input(path: &str) -> Result<String, CliError> {
    let io_error = |err: std::io::Error| CliError::Io {
        path: path.to_string(),
        reason: err.to_string(),
    };
    if path == "-" {
        let mut raw = String::new();
        std::io::stdin().read_to_string(&mut raw).map_err(io_error)?;
        return Ok(raw);
    }
    std::fs::read_to_string(path).map_err(io_error)
}

#[cfg(test)]
mod tests {
    use super::{run, submit_draft, Cli, CliError};
    use blog_editor_core::{
        fields, submit, CardPatch, EditorCommand, EditorConfig, EditorSession, SubCard,
        SubCardData, SubCardKind, Zone,
    };
    use clap::Parser;
    use std::process::ExitCode;

    fn session_with_content() -> EditorSession {
        let mut session = EditorSession::new(EditorConfig::default());
        let card_id = session.state().cards[0].id.clone();
        session.apply(&EditorCommand::UpdateCard {
            card_id,
            patch: CardPatch::content("<p>Hello</p>"),
        });
        session
    }

    #[test]
    fn valid_draft_is_written_to_output_file() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("export.json");
        let mut session = session_with_content();
        let expected = submit(session.state()).unwrap();

        let code = submit_draft(&mut session, false, out.to_str()).unwrap();
        assert_eq!(code, ExitCode::SUCCESS);
        let written = std::fs::read_to_string(&out).unwrap();
        assert_eq!(
            written,
            serde_json::to_string_pretty(&expected).unwrap() + "\n"
        );
    }

    #[test]
    fn invalid_draft_exits_with_one_and_keeps_errors() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("export.json");
        let mut session = session_with_content();
        let card_id = session.state().cards[0].id.clone();
        session.apply(&EditorCommand::AddSubCard {
            card_id,
            subcard: SubCard::new(SubCardKind::Cta, Zone::Bottom)
                .with_data(SubCardData::new().with(fields::TITLE, "Join")),
        });

        let code = submit_draft(&mut session, true, out.to_str()).unwrap();
        assert_eq!(code, ExitCode::from(1));
        assert_eq!(session.errors().len(), 1);
        assert!(!out.exists());
    }

    #[test]
    fn pruning_waits_for_confirm_flag() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("export.json");
        let mut session = session_with_content();
        session.apply(&EditorCommand::AddCard);

        let code = submit_draft(&mut session, false, out.to_str()).unwrap();
        assert_eq!(code, ExitCode::from(1));
        assert!(!out.exists());
        assert_eq!(session.state().cards.len(), 2);

        let code = submit_draft(&mut session, true, out.to_str()).unwrap();
        assert_eq!(code, ExitCode::SUCCESS);
        let export: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&out).unwrap()).unwrap();
        assert_eq!(export["cards"].as_array().map(Vec::len), Some(1));
    }

    #[test]
    fn bad_log_level_override_is_a_config_error() {
        let cli =
            Cli::try_parse_from(["blog-editor", "--log-level", "loud", "submit", "draft.json"])
                .unwrap();
        assert!(matches!(run(cli), Err(CliError::Config(_))));
    }

    #[test]
    fn submit_command_reads_draft_and_writes_export() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("draft.json");
        let out = dir.path().join("export.json");
        std::fs::write(
            &input,
            r#"{"cards":[{"id":"c1","content":"<p>Body</p>","isDefault":true}]}"#,
        )
        .unwrap();

        let cli = Cli::try_parse_from([
            "blog-editor",
            "submit",
            input.to_str().unwrap(),
            "--output",
            out.to_str().unwrap(),
        ])
        .unwrap();
        assert_eq!(run(cli).unwrap(), ExitCode::SUCCESS);
        let export: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&out).unwrap()).unwrap();
        assert_eq!(export["cards"][0]["id"], "c1");
    }

    #[test]
    fn missing_input_and_reserved_ids_are_reported() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.json");
        let cli = Cli::try_parse_from(["blog-editor", "submit", missing.to_str().unwrap()]).unwrap();
        assert!(matches!(run(cli), Err(CliError::Io { .. })));

        let reserved = dir.path().join("reserved.json");
        std::fs::write(&reserved, r#"{"cards":[{"id":"general","content":"x"}]}"#).unwrap();
        let cli =
            Cli::try_parse_from(["blog-editor", "submit", reserved.to_str().unwrap()]).unwrap();
        assert!(matches!(run(cli), Err(CliError::Import(_))));
    }
}
