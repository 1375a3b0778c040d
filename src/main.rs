//! Rotation DB - Entry Point
//!
//! Loads the adjustment table and the community skill database, then answers
//! a single query from the command line.

use clap::{Parser, Subcommand};
use rotation_db::fetch::HttpFetcher;
use rotation_db::{DbConfig, DbError, DbIdx, GameIdx, Result, RotationData, SkillDatabase};
use std::path::PathBuf;

/// Query the skill reference database
#[derive(Parser, Debug)]
#[command(name = "rotation-db")]
#[command(about = "Resolve rotations and reconcile action indices against the skill database")]
struct Args {
    /// TOML config file (defaults apply when omitted)
    #[arg(long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Resolve a sequence of database indices into skills
    Resolve {
        /// Class whose catalog is used
        #[arg(long)]
        class: Option<String>,

        /// JSON rotation file ({"class": ..., "sequence": [...]}) instead of --class/indices
        #[arg(long, conflicts_with = "class")]
        rotation: Option<PathBuf>,

        /// Database indices in rotation order
        indices: Vec<u32>,
    },
    /// Check whether a game index and a database index are the same action
    Same {
        #[arg(long)]
        class: String,
        #[arg(long)]
        game: u32,
        #[arg(long)]
        db: u32,
    },
    /// Check whether a database index is in the ignore set
    Ignored { index: u32 },
    /// Find skills by name across all classes
    Find { name: String },
    /// Print what was loaded
    Summary,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("rotation_db=info")),
        )
        .init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => DbConfig::load(path)?,
        None => DbConfig::default(),
    }
    .with_env_overrides()?;

    let fetcher = HttpFetcher::new(config.fetch_timeout())?;
    let db = SkillDatabase::new();
    db.load(&fetcher, &config).await?;

    match args.command {
        Command::Resolve {
            class,
            rotation,
            indices,
        } => {
            let rotation = match rotation {
                Some(path) => read_rotation(&path)?,
                None => RotationData {
                    class_name: class,
                    sequence: indices.into_iter().map(DbIdx).collect(),
                },
            };

            let skills = db.get(&rotation);
            if skills.is_empty() {
                println!("No skills resolved");
            }
            for skill in skills {
                println!("{:>6}  {}", skill.db_index, skill.name);
            }
        }
        Command::Same { class, game, db: db_index } => {
            let same = db.is_same_action(&class, GameIdx(game), DbIdx(db_index));
            println!("{}", same);
        }
        Command::Ignored { index } => {
            println!("{}", db.is_ignored(DbIdx(index)));
        }
        Command::Find { name } => {
            let hits = db.find(&name);
            if hits.is_empty() {
                println!("No skill named {:?}", name);
            }
            for skill in hits {
                println!("{:>6}  {}", skill.db_index, skill.name);
            }
        }
        Command::Summary => {
            let classes = db.class_names();
            println!("{} classes, {} skills", classes.len(), db.skill_count());
            for class in classes {
                println!("  {}", class);
            }
        }
    }

    Ok(())
}

fn read_rotation(path: &std::path::Path) -> Result<RotationData> {
    let content = std::fs::read_to_string(path)?;
    serde_json::from_str(&content)
        .map_err(|e| DbError::MalformedSource(format!("{}: {}", path.display(), e)))
}
