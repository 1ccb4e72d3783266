use std::sync::Arc;

use anyhow::Context;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use recipe_planner::{
    config::Config,
    models::recipe::Recipe,
    screens::{recipe_detail::RecipeDetailScreen, weekly_plan::WeeklyPlanScreen},
    services::{
        credentials::{CredentialStore, FileCredentials},
        notifications::{ConsoleNotifier, Notifier},
        planner_api::{PlannerApi, PlannerClient},
        schedule::{self, Clock, FixedClock, LocalClock},
    },
};

#[derive(Parser)]
#[command(name = "planner", about = "Weekly meal plan and recipe client")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Store the bearer token used for every request
    Login {
        #[arg(long)]
        token: String,
    },
    /// Forget the stored token
    Logout,
    /// Show this week's plan, Sunday to Saturday
    Week {
        /// Pretend today is this date (YYYY-MM-DD)
        #[arg(long, value_parser = parse_date_arg)]
        today: Option<NaiveDate>,
        /// Print the bucketed week as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show a planned recipe
    Show { recipe_id: i64 },
    /// Add a planned recipe to another day of the plan
    Schedule {
        recipe_id: i64,
        #[arg(long, value_parser = parse_date_arg)]
        date: NaiveDate,
    },
    /// Add one of a planned recipe's ingredients to the shopping list
    AddIngredient { recipe_id: i64, ingredient_id: i64 },
    /// Print the image URL for a recipe image file
    ImageUrl { file_name: String },
}

fn parse_date_arg(s: &str) -> Result<NaiveDate, String> {
    schedule::parse_date(s).map_err(|e| e.to_string())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = Config::from_env()?;
    let credentials = Arc::new(FileCredentials::new(&config.token_file));

    let notifier: Arc<dyn Notifier> = Arc::new(ConsoleNotifier);

    match cli.command {
        Command::Login { token } => {
            credentials.set_token(&token)?;
            info!("Token stored in {}", credentials.path().display());
            println!("Logged in");
        }
        Command::Logout => {
            credentials.clear()?;
            println!("Logged out");
        }
        Command::Week { today, json } => {
            let api = build_client(&config, credentials)?;
            let clock: Arc<dyn Clock> = match today {
                Some(date) => Arc::new(FixedClock(date)),
                None => Arc::new(LocalClock),
            };
            let mut screen = WeeklyPlanScreen::new(api, notifier, clock);
            screen.mount().await;
            let week = screen.week();

            if json {
                println!("{}", serde_json::to_string_pretty(&week)?);
            } else {
                for day in &week.days {
                    let Some(date) = day.date else {
                        continue;
                    };
                    let marker = if date == week.today { " *" } else { "" };
                    println!("{} ({}){}", day.slot, schedule::format_date(date), marker);
                    for recipe in &day.recipes {
                        println!("  [{}] {}", recipe.id, recipe.titulo);
                    }
                }
            }
        }
        Command::Show { recipe_id } => {
            let api = build_client(&config, credentials)?;
            let recipe = find_planned(&api, &notifier, recipe_id).await?;
            let screen = RecipeDetailScreen::new(recipe, api, notifier, Arc::new(LocalClock));
            print_recipe(&screen);
        }
        Command::Schedule { recipe_id, date } => {
            let api = build_client(&config, credentials)?;
            let recipe = find_planned(&api, &notifier, recipe_id).await?;
            let mut screen = RecipeDetailScreen::new(recipe, api, notifier, Arc::new(LocalClock));
            screen.open_date_picker();
            screen.on_date_picked(Some(date)).await;
        }
        Command::AddIngredient {
            recipe_id,
            ingredient_id,
        } => {
            let api = build_client(&config, credentials)?;
            let recipe = find_planned(&api, &notifier, recipe_id).await?;
            let name = recipe
                .ingredientes
                .iter()
                .find(|i| i.id == ingredient_id)
                .map(|i| i.nome.clone())
                .with_context(|| {
                    format!("Ingredient {ingredient_id} is not part of recipe {recipe_id}")
                })?;
            let screen = RecipeDetailScreen::new(recipe, api, notifier, Arc::new(LocalClock));
            screen.add_ingredient_to_list(ingredient_id, &name).await;
        }
        Command::ImageUrl { file_name } => {
            let api = build_client(&config, credentials)?;
            println!("{}", api.image_url(&file_name));
        }
    }

    Ok(())
}

fn build_client(
    config: &Config,
    credentials: Arc<FileCredentials>,
) -> anyhow::Result<Arc<PlannerClient>> {
    let client = PlannerClient::new(&config.api_base_url, credentials, config.request_timeout)
        .context("Failed to build backend client")?;
    Ok(Arc::new(client))
}

/// Looks a recipe up in the user's plan, the way the plan screen hands it
/// to the detail screen. A failed fetch has already been alerted, so the
/// process exits without a second message.
async fn find_planned(
    api: &Arc<PlannerClient>,
    notifier: &Arc<dyn Notifier>,
    recipe_id: i64,
) -> anyhow::Result<Recipe> {
    let mut plan = WeeklyPlanScreen::new(api.clone(), notifier.clone(), Arc::new(LocalClock));
    plan.mount().await;
    if plan.fetch_failed() {
        std::process::exit(1);
    }
    plan.select(recipe_id)
        .with_context(|| format!("Recipe {recipe_id} is not in your plan"))
}

fn print_recipe<A: PlannerApi>(screen: &RecipeDetailScreen<A>) {
    let recipe = screen.recipe();
    println!("{}", recipe.titulo);
    println!("{}", screen.image_url());
    println!(
        "{} | {} | {}",
        screen.formatted_time(),
        screen.servings_label(),
        recipe.dificuldade
    );
    println!();
    println!("Ingredientes:");
    for (ingredient, line) in recipe.ingredientes.iter().zip(screen.ingredient_lines()) {
        println!("  [{}] {}", ingredient.id, line);
    }
    println!();
    println!("Utensílios:");
    println!("  {}", screen.utensils_line());
    println!();
    println!("Modo de Preparo:");
    println!("{}", recipe.modo_preparo);
}
