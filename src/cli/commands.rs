//! Command dispatch

use std::io;
use std::path::{Path, PathBuf};

use clap::CommandFactory;
use serde::Serialize;
use tracing::{debug, instrument};

use crate::application::services::{CatalogFormat, CatalogService};
use crate::application::{ApplicationError, FormView};
use crate::cli::args::{
    CatalogCommands, Cli, Commands, ConfigCommands, DocumentFormat, OutputFormat,
};
use crate::cli::render::{catalog_tree, form_tree, selection_line, Glyphs};
use crate::cli::{output, CliError, CliResult};
use crate::config::{global_config_path, local_config_path, Settings};
use crate::domain::{DomainResult, FormEvent, Submission};
use crate::infrastructure::di::ServiceContainer;
use crate::infrastructure::InfraError;

/// JSON report printed by `run --format json`.
#[derive(Debug, Serialize)]
struct RunReport {
    form: FormView,
    submissions: Vec<Submission>,
}

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    let Some(command) = &cli.command else {
        return Err(CliError::Usage(
            "no command given (try `medus run` or `medus --help`)".to_string(),
        ));
    };

    if let Commands::Completion { shell } = command {
        let mut cmd = Cli::command();
        let name = cmd.get_name().to_string();
        clap_complete::generate(*shell, &mut cmd, name, &mut io::stdout());
        return Ok(());
    }

    let dir = working_dir(cli)?;
    let settings = load_settings(cli, &dir)?;
    let container = ServiceContainer::new(settings);

    match command {
        Commands::Run {
            events,
            script,
            format,
        } => cmd_run(&container, events, script.as_deref(), *format),
        Commands::Session => cmd_session(&container),
        Commands::Catalog { command } => cmd_catalog(&container, command),
        Commands::Config { command } => cmd_config(&container, command, &dir),
        Commands::Completion { .. } => Ok(()),
    }
}

fn working_dir(cli: &Cli) -> CliResult<PathBuf> {
    match &cli.dir {
        Some(dir) if dir.is_dir() => Ok(dir.clone()),
        Some(dir) => Err(CliError::InvalidArgs(format!(
            "not a directory: {}",
            dir.display()
        ))),
        None => std::env::current_dir()
            .map_err(|e| InfraError::io("resolve current directory", e).into()),
    }
}

/// Layered settings with CLI flags on top.
fn load_settings(cli: &Cli, dir: &Path) -> CliResult<Settings> {
    let mut settings = Settings::load(Some(dir))?;
    if let Some(catalog) = &cli.catalog {
        settings.catalog = Some(catalog.clone());
    }
    if let Some(mode) = cli.mode {
        settings.mode = mode.into();
    }
    debug!("effective settings: {:?}", settings);
    Ok(settings)
}

#[instrument(skip(container))]
fn cmd_run(
    container: &ServiceContainer,
    events: &[String],
    script: Option<&Path>,
    format: OutputFormat,
) -> CliResult<()> {
    let content = script
        .map(|script| {
            container
                .fs
                .read_to_string(script)
                .map_err(|e| InfraError::io(format!("read script {}", script.display()), e))
        })
        .transpose()?;
    let parsed = collect_events(content.as_deref(), events)?;

    let mut form = container.form_service()?;
    let outcome = form.apply_all(&parsed)?;
    let view = form.view();

    match format {
        OutputFormat::Text => {
            let glyphs = Glyphs::new(container.settings.ascii);
            output::info(&form_tree(&view, glyphs));
            output::info(&selection_line(&view.selected));
            for submission in &outcome.submissions {
                output::action("Submitted", &submission.selected_categories.join(", "));
            }
        }
        OutputFormat::Json => {
            let report = RunReport {
                form: view,
                submissions: outcome.submissions,
            };
            output::info(&to_json(&report)?);
        }
    }
    Ok(())
}

#[instrument(skip(container))]
fn cmd_session(container: &ServiceContainer) -> CliResult<()> {
    let mut form = container.form_service()?;
    let glyphs = Glyphs::new(container.settings.ascii);
    output::info(&form_tree(&form.view(), glyphs));

    let submissions = container
        .session_service()
        .run(&mut form, |view, submission| {
            output::info(&form_tree(view, glyphs));
            output::info(&selection_line(&view.selected));
            if let Some(submission) = submission {
                output::action("Submitted", &submission.selected_categories.join(", "));
            }
        })?;

    output::success(&format!("session ended, {} submission(s)", submissions.len()));
    Ok(())
}

fn cmd_catalog(container: &ServiceContainer, command: &CatalogCommands) -> CliResult<()> {
    match command {
        CatalogCommands::Show => {
            let form = container.form_service()?;
            output::info(&catalog_tree(form.controller().catalog()));
        }
        CatalogCommands::Export { format } => {
            let form = container.form_service()?;
            let format = match format {
                DocumentFormat::Toml => CatalogFormat::Toml,
                DocumentFormat::Json => CatalogFormat::Json,
            };
            output::info(&CatalogService::render(form.controller().catalog(), format)?);
        }
        CatalogCommands::Check { file } => {
            let catalog = container.catalog_service().load_file(file)?;
            output::success(&format!(
                "{}: {} categories, {} subcategories",
                file.display(),
                catalog.len(),
                catalog.subcategory_count()
            ));
        }
    }
    Ok(())
}

fn cmd_config(container: &ServiceContainer, command: &ConfigCommands, dir: &Path) -> CliResult<()> {
    match command {
        ConfigCommands::Show => {
            output::info(&container.settings.to_toml()?);
        }
        ConfigCommands::Init { global } => {
            let path = if *global {
                global_config_path().ok_or_else(|| {
                    CliError::Usage("cannot determine global config directory".to_string())
                })?
            } else {
                local_config_path(dir)
            };
            if container.fs.exists(&path) {
                return Err(CliError::Usage(format!(
                    "config already exists: {}",
                    path.display()
                )));
            }
            container
                .fs
                .ensure_parent(&path)
                .and_then(|_| container.fs.write(&path, &Settings::template()))
                .map_err(|e| InfraError::io(format!("write {}", path.display()), e))?;
            output::action("Created", &path.display());
        }
        ConfigCommands::Path => {
            match global_config_path() {
                Some(path) => print_config_path("global", &path, container),
                None => output::warning("global config directory unavailable"),
            }
            print_config_path("local", &local_config_path(dir), container);
        }
    }
    Ok(())
}

fn print_config_path(label: &str, path: &Path, container: &ServiceContainer) {
    if container.fs.exists(path) {
        output::success(&format!("{label}: {}", path.display()));
    } else {
        output::failure(&format!("{label}: {} (missing)", path.display()));
    }
}

/// Script events first, then positional ones. Positional events are
/// numbered after the script's last line.
fn collect_events(script: Option<&str>, events: &[String]) -> DomainResult<Vec<FormEvent>> {
    let mut parsed = Vec::new();
    let mut offset = 0;
    if let Some(content) = script {
        parsed.extend(FormEvent::parse_script(content)?);
        offset = content.lines().count();
    }
    for (i, event) in events.iter().enumerate() {
        parsed.push(FormEvent::parse_line(event, offset + i + 1)?);
    }
    Ok(parsed)
}

fn to_json<T: Serialize>(value: &T) -> CliResult<String> {
    serde_json::to_string_pretty(value).map_err(|e| {
        ApplicationError::OperationFailed {
            context: "serialize report".to_string(),
            source: Box::new(e),
        }
        .into()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DomainError;

    #[test]
    fn given_script_and_positional_events_when_collecting_then_keeps_order() {
        let events = vec!["submit".to_string()];

        let parsed = collect_events(Some("check 10\ncheck-sub Sport\n"), &events).unwrap();

        assert_eq!(
            parsed,
            vec![
                FormEvent::CheckCategory("10".into()),
                FormEvent::CheckSubcategory("Sport".into()),
                FormEvent::Submit,
            ]
        );
    }

    #[test]
    fn given_bad_positional_event_after_script_when_collecting_then_line_follows_script() {
        let events = vec!["check 35".to_string(), "toggle 10".to_string()];

        let err = collect_events(Some("check 10\n\n# comment\n"), &events).unwrap_err();

        assert!(matches!(err, DomainError::InvalidEvent { line: 5, .. }));
    }

    #[test]
    fn given_no_script_when_collecting_then_positional_events_start_at_one() {
        let events = vec!["toggle 10".to_string()];

        let err = collect_events(None, &events).unwrap_err();

        assert!(matches!(err, DomainError::InvalidEvent { line: 1, .. }));
    }
}
