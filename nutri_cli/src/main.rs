use nutri_core::*;
use clap::{Parser, Subcommand};
use std::borrow::Cow;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "nutri")]
#[command(about = "Nutrition calculator and food lookup", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Use a JSON or CSV food catalog instead of the built-in one
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    /// Read configuration from this file instead of the default location
    #[arg(long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Search foods by name
    Search {
        /// Case-insensitive part of a food name
        query: String,
    },

    /// Show nutrition facts for a quantity of one food
    Facts {
        /// Food id or name
        food: String,

        /// Units consumed (invalid values count as 1)
        #[arg(long, short)]
        quantity: Option<String>,

        /// Print the facts as JSON
        #[arg(long)]
        json: bool,
    },

    /// Estimate BMR and TDEE (missing values come from the [profile] config)
    Energy {
        /// Body weight in kilograms
        #[arg(long, allow_negative_numbers = true)]
        weight: Option<f64>,

        /// Height in centimetres
        #[arg(long, allow_negative_numbers = true)]
        height: Option<f64>,

        /// Age in years
        #[arg(long, allow_negative_numbers = true)]
        age: Option<f64>,

        /// "male" or anything else
        #[arg(long)]
        sex: Option<String>,

        /// sedentary, light, moderate, active or very_active
        #[arg(long)]
        activity: Option<String>,
    },

    /// Energy share of each macronutrient from gram amounts
    Macros {
        protein: f64,
        carbs: f64,
        fat: f64,
    },

    /// Total a day of meals given as FOOD=QUANTITY items
    Plan {
        /// Food id or name with an optional quantity, e.g. "brown rice=1.5"
        #[arg(long = "item", required = true)]
        items: Vec<String>,
    },
}

fn main() -> Result<()> {
    // Keep stdout for command output
    nutri_core::logging::init_with_level("warn");

    let cli = Cli::parse();

    let config = match cli.config {
        Some(ref path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    let catalog_path = cli.catalog.clone().or_else(|| config.catalog.path.clone());
    let catalog: Cow<'_, FoodCatalog> = match catalog_path {
        Some(path) => Cow::Owned(FoodCatalog::load_from(&path)?),
        None => Cow::Borrowed(get_default_catalog()),
    };

    match cli.command {
        Commands::Search { query } => cmd_search(&catalog, &query),
        Commands::Facts {
            food,
            quantity,
            json,
        } => cmd_facts(&catalog, &food, quantity.as_deref(), json),
        Commands::Energy {
            weight,
            height,
            age,
            sex,
            activity,
        } => cmd_energy(&config, weight, height, age, sex, activity),
        Commands::Macros {
            protein,
            carbs,
            fat,
        } => cmd_macros(protein, carbs, fat),
        Commands::Plan { items } => cmd_plan(&catalog, &items),
    }
}

fn cmd_search(catalog: &FoodCatalog, query: &str) -> Result<()> {
    let foods = catalog.search(query);

    if foods.is_empty() {
        println!("No foods found");
        return Ok(());
    }

    for food in foods {
        println!(
            "{:<16} {} cal • {:.1}g protein • {:.1}g carbs • {:.1}g fat  [{}]",
            food.name,
            format_nutrition(food.calories, ""),
            food.protein,
            food.carbs,
            food.fat,
            food.id
        );
    }

    Ok(())
}

fn cmd_facts(
    catalog: &FoodCatalog,
    food: &str,
    quantity: Option<&str>,
    json: bool,
) -> Result<()> {
    let item = catalog
        .find(food)
        .ok_or_else(|| Error::FoodNotFound(food.to_string()))?;
    let quantity = quantity.map(Quantity::parse).unwrap_or_default();
    let facts = nutrition_facts(item, quantity);

    if json {
        println!("{}", serde_json::to_string_pretty(&facts)?);
        return Ok(());
    }

    let n = &facts.nutrition;
    println!("\n  {} × {}", facts.name, facts.quantity);
    println!("  ─────────────────────────────");
    println!("  Calories  {}", format_nutrition(n.calories, " kcal"));
    println!("  Protein   {}", format_nutrition(n.protein_grams, "g"));
    println!("  Carbs     {}", format_nutrition(n.carbs_grams, "g"));
    println!("  Fat       {}", format_nutrition(n.fat_grams, "g"));
    println!("  Fiber     {}", format_nutrition(facts.fiber_grams, "g"));
    print_breakdown(&macro_percentages(
        n.protein_grams,
        n.carbs_grams,
        n.fat_grams,
    ));

    Ok(())
}

fn cmd_energy(
    config: &Config,
    weight: Option<f64>,
    height: Option<f64>,
    age: Option<f64>,
    sex: Option<String>,
    activity: Option<String>,
) -> Result<()> {
    let sex = sex.as_deref().map(Sex::from_name);
    let input = config.profile.biometrics(weight, height, age, sex)?;
    let level = activity
        .as_deref()
        .map(ActivityLevel::from_name)
        .unwrap_or(config.profile.activity_level);

    let bmr = estimate_bmr(&input);
    let tdee = estimate_tdee(bmr, level);

    tracing::debug!("Energy estimate for {:?} at {}", input, level);

    println!("BMR:  {}", format_nutrition(bmr, " kcal/day"));
    println!(
        "TDEE: {} ({}, ×{})",
        format_nutrition(tdee, " kcal/day"),
        level,
        level.multiplier()
    );

    Ok(())
}

fn cmd_macros(protein: f64, carbs: f64, fat: f64) -> Result<()> {
    print_breakdown(&macro_percentages(protein, carbs, fat));
    Ok(())
}

fn cmd_plan(catalog: &FoodCatalog, items: &[String]) -> Result<()> {
    let today = chrono::Local::now().date_naive();

    let mut entries = Vec::with_capacity(items.len());
    for item in items {
        let (name, quantity) = match item.rsplit_once('=') {
            Some((name, quantity)) => (name, Quantity::parse(quantity)),
            None => (item.as_str(), Quantity::ONE),
        };
        let food = catalog
            .find(name)
            .ok_or_else(|| Error::FoodNotFound(name.trim().to_string()))?;
        entries.push(MealEntry::new(food, quantity, today));
    }

    for entry in &entries {
        println!(
            "  {:<16} × {:<5} {}",
            entry.food_name,
            entry.quantity,
            format_nutrition(entry.nutrition.calories, " kcal")
        );
    }

    let totals = daily_totals(&entries, today);
    let n = &totals.nutrition;
    println!("  ─────────────────────────────");
    println!("  Total ({} items, {})", totals.entries, today);
    println!("  Calories  {}", format_nutrition(n.calories, " kcal"));
    println!("  Protein   {}", format_nutrition(n.protein_grams, "g"));
    println!("  Carbs     {}", format_nutrition(n.carbs_grams, "g"));
    println!("  Fat       {}", format_nutrition(n.fat_grams, "g"));
    println!("  Fiber     {}", format_nutrition(totals.fiber_grams, "g"));
    print_breakdown(&totals.macro_breakdown());

    Ok(())
}

fn print_breakdown(breakdown: &MacroBreakdown) {
    println!();
    println!("  Protein {}%", breakdown.protein_pct);
    println!("  Carbs   {}%", breakdown.carbs_pct);
    println!("  Fat     {}%", breakdown.fat_pct);
}
