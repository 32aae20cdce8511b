use clap::Parser;
use mindvault::application::{init::init, ConfigService, EditorSession, ImageOutcome, Vault};
use mindvault::cli::{format_entry, format_entry_list, format_mood_chart, Cli, Commands, EntryArgs};
use mindvault::domain::{filter_entries, total_count, EntryField, EntryId, Mood, MoodHistogram};
use mindvault::error::{Result, VaultError};
use mindvault::infrastructure::{
    AssumeYes, Confirm, FileSystemStore, ImageIngest, KeyValueStore, LinePrompt,
};
use std::str::FromStr;
use tracing_subscriber::EnvFilter;

fn main() {
    init_tracing();

    let cli = Cli::parse();

    match run(cli) {
        Ok(_) => std::process::exit(0),
        Err(e) => {
            eprintln!("Error: {}", e.display_with_suggestions());
            std::process::exit(e.exit_code());
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("MINDVAULT_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Some(Commands::Init { path }) => {
            init(&path)?;
            println!("Initialized mindvault at {}", path.display());
            Ok(())
        }
        Some(Commands::New { entry }) => {
            let mut vault = Vault::discover()?;
            let session = &mut vault.session;

            session.start_new();
            apply_entry_args(session, &vault.images, entry)?;
            session.save()?;

            println!("Saved entry {}", session.draft().id);
            Ok(())
        }
        Some(Commands::List { search, limit }) => {
            let vault = Vault::discover()?;
            let query = search.unwrap_or_default();

            let mut entries = filter_entries(vault.session.store().entries(), &query);
            if let Some(limit) = limit {
                entries.truncate(limit);
            }

            println!("{}", format_entry_list(&entries, &query).trim_end());
            Ok(())
        }
        Some(Commands::Show { id }) => {
            let mut vault = Vault::discover()?;
            let session = &mut vault.session;

            open_existing(session, &id)?;
            print!("{}", format_entry(session.draft(), session.mode()));
            Ok(())
        }
        Some(Commands::Edit {
            id,
            entry,
            clear_image,
        }) => {
            let mut vault = Vault::discover()?;
            let session = &mut vault.session;

            open_existing(session, &id)?;
            session.enter_edit_mode();
            apply_entry_args(session, &vault.images, entry)?;
            if clear_image {
                session.update_field(EntryField::Image(None));
            }
            session.save()?;

            println!("Updated entry {}", id);
            Ok(())
        }
        Some(Commands::Delete { id, yes }) => {
            let mut vault = Vault::discover()?;
            let session = &mut vault.session;
            let entry_id = EntryId::from(id.as_str());

            let title = match session.store().get(&entry_id) {
                Some(entry) => entry.display_title().to_string(),
                None => return Err(VaultError::EntryNotFound(id)),
            };

            let mut confirm: Box<dyn Confirm> = if yes {
                Box::new(AssumeYes)
            } else {
                Box::new(LinePrompt::stdio())
            };

            if !confirm.confirm(&format!("Delete entry '{}'?", title))? {
                println!("Deletion cancelled");
                return Ok(());
            }

            session.delete(&entry_id)?;
            println!("Deleted entry {}", id);
            Ok(())
        }
        Some(Commands::Stats) => {
            let vault = Vault::discover()?;
            let entries = vault.session.store().entries();

            let histogram = MoodHistogram::from_entries(entries);
            print!("{}", format_mood_chart(&histogram, total_count(entries)));
            Ok(())
        }
        Some(Commands::Config { key, value, list }) => {
            let repo = FileSystemStore::discover()?;
            let service = ConfigService::new(repo);

            if list {
                let config = service.list()?;
                println!("storage_key = {}", config.storage_key);
                println!("max_image_bytes = {}", config.max_image_bytes);
                println!("created = {}", config.created.to_rfc3339());
                Ok(())
            } else if let Some(k) = key {
                if let Some(v) = value {
                    service.set(&k, &v)?;
                    println!("Set {} = {}", k, v);
                    Ok(())
                } else {
                    let val = service.get(&k)?;
                    println!("{}", val);
                    Ok(())
                }
            } else {
                println!("Usage: mindvault config [--list | <key> [<value>]]");
                println!("Valid keys: storage_key, max_image_bytes, created");
                Ok(())
            }
        }
        None => {
            println!("mindvault - Personal mood journal");
            println!("Use --help for usage information");
            Ok(())
        }
    }
}

fn open_existing<S: KeyValueStore>(session: &mut EditorSession<S>, id: &str) -> Result<()> {
    if session.open(&EntryId::from(id)) {
        Ok(())
    } else {
        Err(VaultError::EntryNotFound(id.to_string()))
    }
}

fn apply_entry_args<S: KeyValueStore>(
    session: &mut EditorSession<S>,
    images: &ImageIngest,
    args: EntryArgs,
) -> Result<()> {
    if let Some(title) = args.title {
        session.update_field(EntryField::Title(title));
    }
    if let Some(content) = args.content {
        session.update_field(EntryField::Content(content));
    }
    if let Some(mood) = args.mood {
        let mood = Mood::from_str(&mood).map_err(VaultError::Config)?;
        session.update_field(EntryField::Mood(mood));
    }
    if let Some(path) = args.image {
        session.attach_image(&path, images)?;
        if session.finish_image()? != ImageOutcome::Applied {
            return Err(VaultError::UnsupportedImage(format!(
                "{} could not be attached",
                path.display()
            )));
        }
    }
    Ok(())
}
