//! `pmill` - CLI for pagemill
//!
//! This binary provides the command-line interface for working with a
//! front-matter-annotated content tree.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use std::process::ExitCode;

use chrono::{NaiveTime, Utc};
use clap::Parser;

use pagemill::cli::{
    CheckCommand, Cli, Command, ConfigCommand, ListCommand, NewCommand, OutputFormat, ShowCommand,
    TagsCommand,
};
use pagemill::document::{Document, FrontMatter};
use pagemill::lint::ContentLinter;
use pagemill::matter::{self, RawMatter};
use pagemill::store::{ContentStore, ListQuery};
use pagemill::{init_logging, Config, Error};

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    init_logging(cli.verbosity());

    // Load configuration, letting --root override the configured tree
    let mut config = Config::load_from(cli.config.clone())?;
    if let Some(root) = cli.root.clone() {
        config.content.root = Some(root);
    }

    // Execute the command
    match cli.command {
        Command::List(list_cmd) => handle_list(&config, &list_cmd),
        Command::Show(show_cmd) => handle_show(&config, &show_cmd),
        Command::Tags(tags_cmd) => handle_tags(&config, &tags_cmd),
        Command::Check(check_cmd) => handle_check(&config, &check_cmd),
        Command::New(new_cmd) => handle_new(&config, &new_cmd),
        Command::Config(config_cmd) => handle_config(&config, config_cmd),
    }
}

fn open_store(config: &Config) -> Result<ContentStore, Error> {
    ContentStore::open(config.content_root(), &config.content.extensions)
}

fn handle_list(config: &Config, cmd: &ListCommand) -> anyhow::Result<ExitCode> {
    let store = open_store(config)?;

    let query = ListQuery {
        include_drafts: cmd.drafts || config.content.include_drafts,
        tag: cmd.tag.clone(),
        since: cmd
            .since
            .map(|date| date.and_time(NaiveTime::MIN).and_utc()),
        limit: cmd.limit,
    };
    let documents = store.list(&query);

    match cmd.format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&documents)?);
        }
        OutputFormat::Plain => {
            for doc in &documents {
                println!("{}", doc.slug);
            }
        }
        OutputFormat::Table => {
            println!("{:<12} {:<28} {}", "DATE", "SLUG", "TITLE");
            for doc in &documents {
                let date = doc
                    .front_matter
                    .date
                    .map_or_else(|| "-".to_string(), |d| d.date_naive().to_string());
                println!("{date:<12} {:<28} {}", doc.slug, doc.title_or_slug());
            }
            println!();
            println!("{} documents", documents.len());
        }
    }
    Ok(ExitCode::SUCCESS)
}

fn handle_show(config: &Config, cmd: &ShowCommand) -> anyhow::Result<ExitCode> {
    let store = open_store(config)?;
    let document = store.get(&cmd.slug)?;

    if cmd.format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(document)?);
        return Ok(ExitCode::SUCCESS);
    }

    if cmd.matter_only {
        let block = matter::encode(document.style, &document.front_matter.to_pairs())?;
        print!("{block}");
    } else if cmd.body_only {
        print!("{}", document.body);
    } else {
        print!("{}", document.to_source()?);
    }
    Ok(ExitCode::SUCCESS)
}

fn handle_tags(config: &Config, cmd: &TagsCommand) -> anyhow::Result<ExitCode> {
    let store = open_store(config)?;
    let tags = store.tags();

    match cmd.format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&tags)?);
        }
        OutputFormat::Plain => {
            for entry in &tags {
                println!("{}", entry.tag);
            }
        }
        OutputFormat::Table => {
            println!("{:<24} {}", "TAG", "COUNT");
            for entry in &tags {
                println!("{:<24} {}", entry.tag, entry.count);
            }
        }
    }
    Ok(ExitCode::SUCCESS)
}

fn handle_check(config: &Config, cmd: &CheckCommand) -> anyhow::Result<ExitCode> {
    let store = open_store(config)?;
    let linter = ContentLinter::with_config(config.lint.clone());
    let report = linter.check_store(&store);

    if cmd.format == OutputFormat::Json {
        let failures: Vec<serde_json::Value> = store
            .failures()
            .iter()
            .map(|failure| {
                serde_json::json!({
                    "path": failure.path,
                    "error": failure.error.to_string(),
                })
            })
            .collect();
        let output = serde_json::json!({
            "failures": failures,
            "report": report,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        for failure in store.failures() {
            println!("error: {}: {}", failure.path.display(), failure.error);
        }
        for (slug, findings) in &report.document_findings {
            for finding in findings {
                println!("{slug}: {}: {}", finding.rule, finding.message);
            }
        }
        for finding in &report.store_findings {
            println!("{}: {}", finding.rule, finding.message);
        }
        println!(
            "{} documents checked, {} failed to parse, {} findings",
            store.len(),
            store.failures().len(),
            report.total()
        );
    }

    // Parse failures always fail the check; findings only under --strict
    if !store.failures().is_empty() || (cmd.strict && !report.is_clean()) {
        Ok(ExitCode::FAILURE)
    } else {
        Ok(ExitCode::SUCCESS)
    }
}

fn handle_new(config: &Config, cmd: &NewCommand) -> anyhow::Result<ExitCode> {
    let path = config.content_root().join(format!("{}.md", cmd.slug));
    if path.exists() {
        return Err(Error::DocumentExists { path }.into());
    }
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|source| Error::DirectoryCreate {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    let front_matter = FrontMatter {
        title: Some(
            cmd.title
                .clone()
                .unwrap_or_else(|| title_from_slug(&cmd.slug)),
        ),
        date: Some(Utc::now()),
        author: config.authoring.author.clone(),
        description: None,
        meta_img: None,
        tags: cmd.tag.clone(),
        draft: cmd.draft,
        extra: Vec::new(),
    };

    let style = cmd.style.map_or(config.matter_style(), Into::into);
    let block = matter::encode(style, &front_matter.to_pairs())?;
    let source = RawMatter {
        style,
        block,
        body: String::new(),
    }
    .to_source();

    std::fs::write(&path, source)?;
    println!("Created {}", path.display());
    Ok(ExitCode::SUCCESS)
}

/// Derive a human title from a slug: `dynamic-parameters` becomes
/// `Dynamic Parameters`.
fn title_from_slug(slug: &str) -> String {
    slug.split('-')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn handle_config(
    config: &Config,
    cmd: ConfigCommand,
) -> anyhow::Result<ExitCode> {
    match cmd {
        ConfigCommand::Show { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(config)?);
            } else {
                println!("Current Configuration");
                println!("=====================");
                println!();
                println!("[Content]");
                println!("  Root:               {}", config.content_root().display());
                println!(
                    "  Extensions:         {}",
                    config.content.extensions.join(", ")
                );
                println!("  Include drafts:     {}", config.content.include_drafts);
                println!();
                println!("[Lint]");
                println!("  Enabled:            {}", config.lint.enabled);
                println!("  Allow unknown keys: {}", config.lint.allow_unknown_keys);
                println!();
                println!("[Authoring]");
                println!("  Default style:      {}", config.matter_style());
                println!(
                    "  Author:             {}",
                    config.authoring.author.as_deref().unwrap_or("-")
                );
            }
        }
        ConfigCommand::Path => {
            println!("{}", Config::default_config_path().display());
        }
        ConfigCommand::Validate { file } => {
            let path = file.unwrap_or_else(Config::default_config_path);
            println!("Validating configuration: {}", path.display());
            match Config::load_from(Some(path)) {
                Ok(_) => println!("Configuration is valid."),
                Err(e) => {
                    println!("Configuration error: {e}");
                    return Ok(ExitCode::FAILURE);
                }
            }
        }
    }
    Ok(ExitCode::SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_from_slug() {
        assert_eq!(title_from_slug("about"), "About");
        assert_eq!(title_from_slug("dynamic-parameters"), "Dynamic Parameters");
        assert_eq!(title_from_slug("a--b"), "A B");
    }
}
