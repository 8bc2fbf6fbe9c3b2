#![forbid(unsafe_code)]
use anyhow::{Context, Result};
use chrono::{Datelike, Utc};
use clap::{Parser, Subcommand};
use prodcal::{
    calendar, io,
    stats::CalendarStats,
    storage::{JsonStorage, Storage},
    FetchConfig, SourceRegistry, WeekConvention,
};
#[cfg(feature = "logging")]
use tracing_subscriber::{fmt::Subscriber, EnvFilter};

/// Générateur de calendrier de production (jours chômés, reportés, écourtés)
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Active les logs (feature `logging`, filtre via RUST_LOG)
    #[arg(long, global = true)]
    log: bool,

    /// Configuration JSON des sources (timeouts, URLs)
    #[arg(long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Générer le calendrier d'une année
    Generate {
        /// Année (par défaut : l'année en cours)
        #[arg(long)]
        year: Option<i32>,
        /// Nom de la source (voir `sources`)
        #[arg(long, default_value = "isdayoff")]
        source: String,
        /// Fichier JSON de sortie (par défaut `calendar-<année>.json`)
        #[arg(long)]
        out: Option<String>,
        /// Export CSV supplémentaire
        #[arg(long)]
        csv: Option<String>,
        /// Ne pas demander les jours pré-fériés écourtés
        #[arg(long)]
        no_preholiday: bool,
        /// Afficher les statistiques
        #[arg(long)]
        stats: bool,
    },

    /// Lister les sources disponibles
    Sources,

    /// Afficher les jours fériés légaux hors week-end
    Holidays {
        #[arg(long)]
        year: Option<i32>,
        /// Convention de semaine de 6 jours
        #[arg(long)]
        six_day: bool,
    },

    /// Statistiques d'un calendrier JSON existant
    Stats {
        #[arg(long)]
        file: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    #[cfg(feature = "logging")]
    if cli.log {
        let _ = Subscriber::builder()
            .with_env_filter(EnvFilter::from_default_env())
            .with_writer(std::io::stderr)
            .try_init();
    }

    let config = match &cli.config {
        Some(path) => FetchConfig::load(path)?,
        None => FetchConfig::default(),
    };

    match cli.cmd {
        Commands::Generate {
            year,
            source,
            out,
            csv,
            no_preholiday,
            stats,
        } => {
            let year = year.unwrap_or_else(current_year);
            let registry = SourceRegistry::standard(&config)?;
            let source = registry.get(&source)?;
            let calendar = calendar::generate(source, year, !no_preholiday)
                .with_context(|| format!("generating calendar {year} from {}", source.name()))?;

            let out = out.unwrap_or_else(|| format!("calendar-{year}.json"));
            let storage = JsonStorage::open(&out)?;
            storage.save(&calendar)?;
            if let Some(path) = csv {
                io::export_calendar_csv(path, &calendar)?;
            }
            println!("Calendar {year} written to {out}");
            if stats {
                println!("{}", CalendarStats::compute(&calendar)?);
            }
        }
        Commands::Sources => {
            let registry = SourceRegistry::standard(&config)?;
            for source in registry.iter() {
                println!("{:<12} {}", source.name(), source.description());
            }
        }
        Commands::Holidays { year, six_day } => {
            let year = year.unwrap_or_else(current_year);
            let week = if six_day {
                WeekConvention::SixDay
            } else {
                WeekConvention::FiveDay
            };
            for day in prodcal::statutory_holidays(year, week)? {
                println!("{day}");
            }
        }
        Commands::Stats { file } => {
            let calendar = JsonStorage::open(&file)?.load()?;
            println!("{}", CalendarStats::compute(&calendar)?);
        }
    }

    Ok(())
}

fn current_year() -> i32 {
    Utc::now().year()
}
