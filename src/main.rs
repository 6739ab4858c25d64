use std::path::PathBuf;

use clap::{Parser, Subcommand};
use time::Date;

use release_planner::Config;
use release_planner::core::{
    AppState, BudgetItem, ExportOptions, FeedbackUpdate, IncomeItem, LocalStore, NewProject,
    PerformanceSummary, Project, ProjectUpdate, ResourceCategory, ResourceFilter, backup,
    catalog, format_date, metrics, parse_date, progress,
};

#[derive(Parser)]
#[command(name = "release-planner")]
#[command(about = "Plan music releases: steps, budgets, countdowns and backups")]
struct Cli {
    /// Directory holding the local store and default backup location
    #[arg(
        long,
        value_name = "DIR",
        env = "RELEASE_PLANNER_HOME",
        default_value = release_planner::config::DEFAULT_DATA_DIR
    )]
    data_dir: PathBuf,

    /// Prefix used for backup file names
    #[arg(
        long,
        env = "RELEASE_PLANNER_PREFIX",
        default_value = release_planner::config::DEFAULT_PREFIX
    )]
    prefix: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Create a release project with the default steps
    Add {
        name: String,
        /// Release date (YYYY-MM-DD)
        #[arg(long, value_parser = parse_date_arg)]
        release_date: Option<Date>,
        #[arg(long)]
        icon: Option<String>,
    },
    /// List projects, priority first
    List,
    /// Show one project with its steps
    Show { id: String },
    /// Edit name, icon or release date
    Edit {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        icon: Option<String>,
        #[arg(long, value_parser = parse_date_arg, conflicts_with = "clear_date")]
        release_date: Option<Date>,
        #[arg(long)]
        clear_date: bool,
    },
    /// Delete a project
    Delete { id: String },
    /// Toggle the priority flag
    Priority { id: String },
    /// Mark a substep completed (or reopen it) and attach notes
    Feedback {
        id: String,
        sub_step: String,
        /// Mark the substep as not completed
        #[arg(long)]
        undo: bool,
        #[arg(long)]
        note: Option<String>,
    },
    /// Add a budget line item
    Budget { id: String, budgeted: f64, actual: f64 },
    /// Add an income line item
    Income { id: String, projected: f64, actual: f64 },
    /// Record post-release performance numbers
    Performance {
        id: String,
        #[arg(long, default_value_t = 0.0)]
        spotify_streams: f64,
        #[arg(long, default_value_t = 0.0)]
        tiktok_views: f64,
        #[arg(long, default_value_t = 0.0)]
        instagram_followers: f64,
        #[arg(long, default_value_t = 0.0)]
        presave_cost: f64,
    },
    /// Compare two projects side by side
    Compare {
        left: String,
        right: String,
        /// Print the comparison as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show or set the theme
    Theme { name: Option<String> },
    /// Browse the resource library
    Resources {
        #[arg(long)]
        category: Option<ResourceCategory>,
        #[arg(long)]
        tag: Option<String>,
        #[arg(long)]
        query: Option<String>,
        /// Only list favorites
        #[arg(long)]
        favorites: bool,
    },
    /// Toggle a resource as favorite
    Favorite { resource_id: String },
    /// Write a backup file
    Export {
        /// Output directory (defaults to <data-dir>/backups)
        #[arg(long, value_name = "DIR")]
        out_dir: Option<PathBuf>,
        /// Compress the backup with zstd
        #[arg(long)]
        compress: bool,
    },
    /// Replace all data with the contents of a backup file
    Import { file: PathBuf },
}

fn parse_date_arg(value: &str) -> Result<Date, String> {
    parse_date(value).map_err(|e| format!("expected YYYY-MM-DD: {e}"))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Cli::parse();
    let config = Config::new(&args.data_dir, args.prefix)?;
    let store = LocalStore::new(config.store_path());
    let mut state = store.load().await?;
    let today = metrics::today();

    let mutated = match args.command {
        Command::Add {
            name,
            release_date,
            icon,
        } => {
            let id = state.add_project(NewProject {
                name,
                icon,
                release_date,
            })?;
            println!("Created project {id}");
            true
        }
        Command::List => {
            list_projects(&state, today);
            false
        }
        Command::Show { id } => {
            let id = state.resolve_id(&id)?;
            show_project(state.project(&id)?, today);
            false
        }
        Command::Edit {
            id,
            name,
            icon,
            release_date,
            clear_date,
        } => {
            let id = state.resolve_id(&id)?;
            let update = ProjectUpdate {
                name,
                icon: icon.map(Some),
                release_date: if clear_date {
                    Some(None)
                } else {
                    release_date.map(Some)
                },
            };
            let project = state.update_project(&id, update)?;
            println!("Updated {}", project.name);
            true
        }
        Command::Delete { id } => {
            let id = state.resolve_id(&id)?;
            let project = state.delete_project(&id)?;
            println!("Deleted {}", project.name);
            true
        }
        Command::Priority { id } => {
            let id = state.resolve_id(&id)?;
            let is_priority = state.toggle_priority(&id)?;
            println!("Priority: {}", if is_priority { "on" } else { "off" });
            true
        }
        Command::Feedback {
            id,
            sub_step,
            undo,
            note,
        } => {
            let id = state.resolve_id(&id)?;
            state.update_feedback(
                &id,
                &sub_step,
                FeedbackUpdate {
                    completed: Some(!undo),
                    notes: note,
                },
            )?;
            let project = state.project(&id)?;
            println!("Progress: {:.0}%", progress::progress_percent(project));
            true
        }
        Command::Budget {
            id,
            budgeted,
            actual,
        } => {
            let id = state.resolve_id(&id)?;
            state.add_budget_item(&id, BudgetItem { budgeted, actual })?;
            true
        }
        Command::Income {
            id,
            projected,
            actual,
        } => {
            let id = state.resolve_id(&id)?;
            state.add_income_item(&id, IncomeItem { projected, actual })?;
            true
        }
        Command::Performance {
            id,
            spotify_streams,
            tiktok_views,
            instagram_followers,
            presave_cost,
        } => {
            let id = state.resolve_id(&id)?;
            state.set_performance_summary(
                &id,
                PerformanceSummary {
                    spotify_streams,
                    tiktok_views,
                    instagram_followers_gained: instagram_followers,
                    presave_cost,
                },
            )?;
            true
        }
        Command::Compare { left, right, json } => {
            let left = state.project(&state.resolve_id(&left)?)?;
            let right = state.project(&state.resolve_id(&right)?)?;
            let comparison = metrics::compare(left, right, today);
            if json {
                println!("{}", serde_json::to_string_pretty(&comparison)?);
            } else {
                print_comparison(&comparison);
            }
            false
        }
        Command::Theme { name } => match name {
            Some(name) => {
                if !catalog::is_known_theme(&name) {
                    anyhow::bail!(
                        "Unknown theme {:?}, expected one of: {}",
                        name,
                        catalog::THEMES.join(", ")
                    );
                }
                state.set_theme(name);
                true
            }
            None => {
                println!("{}", state.theme());
                false
            }
        },
        Command::Resources {
            category,
            tag,
            query,
            favorites,
        } => {
            let filter = ResourceFilter {
                category,
                tag,
                query,
            };
            for entry in filter.apply() {
                let is_favorite = state.favorites().contains(entry.id);
                if favorites && !is_favorite {
                    continue;
                }
                println!(
                    "{} {} [{} / {}] {}",
                    if is_favorite { "*" } else { " " },
                    entry.id,
                    entry.category,
                    entry.kind,
                    entry.title
                );
            }
            false
        }
        Command::Favorite { resource_id } => {
            let is_favorite = state.toggle_favorite(&resource_id)?;
            println!(
                "{} {}",
                if is_favorite { "Added" } else { "Removed" },
                resource_id
            );
            true
        }
        Command::Export { out_dir, compress } => {
            let out_dir = out_dir.unwrap_or_else(|| config.backup_dir());
            let options = ExportOptions {
                prefix: config.prefix().to_string(),
                date: today,
                compress,
            };
            let path = backup::export_to_dir(&out_dir, &state.snapshot(), &options)?;
            println!("Backup written to {}", path.display());
            false
        }
        Command::Import { file } => match backup::import_file(&file).await {
            Ok(imported) => {
                state.replace(imported);
                println!("Imported {} projects", state.projects().len());
                true
            }
            Err(e) => {
                tracing::error!(error = %e, file = %file.display(), "import failed");
                eprintln!("{}", e.user_message());
                std::process::exit(1);
            }
        },
    };

    if mutated {
        store.save(&state)?;
    }
    Ok(())
}

fn list_projects(state: &AppState, today: Date) {
    let projects = state.sorted_projects();
    if projects.is_empty() {
        println!("No projects yet.");
        return;
    }
    for project in projects {
        let summary = metrics::summarize(project, today);
        let countdown = summary
            .countdown
            .map(|countdown| countdown.label)
            .unwrap_or_else(|| "no date".to_string());
        println!(
            "{}{} {:<30} {:>5.1}%  {}",
            if project.is_priority { "!" } else { " " },
            project.id.chars().take(8).collect::<String>(),
            project.name,
            summary.progress_percent,
            countdown
        );
    }
}

fn show_project(project: &Project, today: Date) {
    let summary = metrics::summarize(project, today);
    println!("{} ({})", project.name, project.id);
    if let Some(date) = project.release_date {
        let label = summary
            .countdown
            .as_ref()
            .map(|countdown| countdown.label.as_str())
            .unwrap_or_default();
        let date = format_date(date).unwrap_or_else(|_| date.to_string());
        println!("Release: {date} ({label})");
    }
    println!(
        "Progress: {}/{} ({:.1}%)",
        summary.progress.completed, summary.progress.total, summary.progress_percent
    );
    println!(
        "Budget: {:.2} budgeted / {:.2} spent",
        summary.totals.budget.budgeted, summary.totals.budget.actual
    );
    println!(
        "Income: {:.2} projected / {:.2} earned, net {:.2}",
        summary.totals.income.projected, summary.totals.income.actual, summary.totals.net_actual
    );

    for step in &project.steps {
        let done = progress::step_is_complete(project, step);
        println!("\n[{}] {}", if done { "x" } else { " " }, step.title);
        for sub_step in &step.sub_steps {
            let completed = project.is_sub_step_completed(&sub_step.id);
            println!(
                "    [{}] {} ({})",
                if completed { "x" } else { " " },
                sub_step.title,
                sub_step.id
            );
            if let Some(notes) = project
                .sub_step_feedback
                .get(&sub_step.id)
                .and_then(|feedback| feedback.notes())
            {
                println!("        {notes}");
            }
        }
    }
}

fn print_comparison(comparison: &metrics::Comparison) {
    let (left, right) = (&comparison.left, &comparison.right);
    println!("{:<20} {:>20} {:>20}", "", left.name, right.name);
    println!(
        "{:<20} {:>19.1}% {:>19.1}%",
        "Progress", left.progress_percent, right.progress_percent
    );
    println!(
        "{:<20} {:>20.2} {:>20.2}",
        "Budget spent", left.totals.budget.actual, right.totals.budget.actual
    );
    println!(
        "{:<20} {:>20.2} {:>20.2}",
        "Income earned", left.totals.income.actual, right.totals.income.actual
    );
    println!(
        "{:<20} {:>20.2} {:>20.2}",
        "Net", left.totals.net_actual, right.totals.net_actual
    );
    let label = |summary: &metrics::ProjectSummary| {
        summary
            .countdown
            .as_ref()
            .map(|countdown| countdown.label.clone())
            .unwrap_or_else(|| "-".to_string())
    };
    println!("{:<20} {:>20} {:>20}", "Release", label(left), label(right));
    println!("\nNet difference: {:+.2}", comparison.delta.net_actual);
}
