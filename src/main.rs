use anyhow::{Context, Result};
use association_ledger::{
    load_csv, seed_ledger, CoffeeLedger, CoffeeShop, Domain, Enrollment, EnrollmentLedger,
    HourSpawned, Ledger, LedgerConfig, LedgerSnapshot, NationalParks, ParkLedger, Pizzeria,
    PizzeriaLedger, Price, Role, SpawnLedger, Spawning,
};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "association-ledger", version, about = "Bidirectional association ledgers")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List the available domains
    Domains,
    /// Run the walkthrough scenarios for one domain
    Demo { domain: DomainKind },
    /// Build a ledger from a CSV file (left,right,value) and print it
    Seed {
        domain: DomainKind,
        file: PathBuf,
        /// JSON file overriding the domain's validation bounds,
        /// e.g. demos/wide_prices.json
        #[arg(long)]
        config: Option<PathBuf>,
        /// Print a JSON snapshot instead of text
        #[arg(long)]
        json: bool,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum DomainKind {
    CoffeeShop,
    Pizzeria,
    NationalParks,
    Enrollment,
    Spawning,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Domains => list_domains(),
        Command::Demo { domain } => run_demo(domain)?,
        Command::Seed {
            domain,
            file,
            config,
            json,
        } => match domain {
            DomainKind::CoffeeShop => run_seed::<CoffeeShop>(&file, config.as_deref(), json)?,
            DomainKind::Pizzeria => run_seed::<Pizzeria>(&file, config.as_deref(), json)?,
            DomainKind::NationalParks => run_seed::<NationalParks>(&file, config.as_deref(), json)?,
            DomainKind::Enrollment => run_seed::<Enrollment>(&file, config.as_deref(), json)?,
            DomainKind::Spawning => run_seed::<Spawning>(&file, config.as_deref(), json)?,
        },
    }

    Ok(())
}

fn list_domains() {
    fn line<D: Domain>(key: &str) {
        println!("  {:<15} {} ↔ {} ↔ {}", key, D::LEFT, D::JOIN, D::RIGHT);
    }

    println!("Available domains:");
    line::<CoffeeShop>("coffee-shop");
    line::<Pizzeria>("pizzeria");
    line::<NationalParks>("national-parks");
    line::<Enrollment>("enrollment");
    line::<Spawning>("spawning");
}

// ============================================================================
// SEED
// ============================================================================

fn run_seed<D: Domain>(file: &Path, config: Option<&Path>, json: bool) -> Result<()> {
    let mut ledger: Ledger<D> = match config {
        Some(path) => {
            let config = LedgerConfig::from_json_file(D::default_config(), path)
                .with_context(|| format!("Failed to load config {}", path.display()))?;
            Ledger::with_config(config)?
        }
        None => Ledger::new(),
    };

    let input = load_csv(file)?;
    let summary = seed_ledger(&mut ledger, &input);
    let snapshot = LedgerSnapshot::capture(&ledger)?;

    if json {
        println!("{}", snapshot.to_json_pretty()?);
        return Ok(());
    }

    println!("🌱 Seeded {} ledger from {}", D::JOIN, file.display());
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("✓ Accepted rows: {}", summary.accepted);
    for rejected in &summary.rejected {
        println!("✗ Line {} ({}): {}", rejected.line, rejected.kind, rejected.reason);
    }

    for role in [Role::Left, Role::Right] {
        println!("\n{}s:", D::label(role));
        for entity in snapshot.entities.iter().filter(|e| e.role == role) {
            println!(
                "  {} - {} joins, related: [{}]",
                entity.name,
                entity.join_count,
                entity.counterparts.join(", ")
            );
        }
    }

    println!("\n{} catalog ({}):", D::JOIN, snapshot.catalog_count);
    for join in &snapshot.joins {
        println!("  #{} {}", join.sequence, join.description);
    }

    Ok(())
}

// ============================================================================
// DEMO
// ============================================================================

fn run_demo(domain: DomainKind) -> Result<()> {
    match domain {
        DomainKind::CoffeeShop => demo_coffee_shop(),
        DomainKind::Pizzeria => demo_pizzeria(),
        DomainKind::NationalParks => demo_national_parks(),
        DomainKind::Enrollment => demo_enrollment(),
        DomainKind::Spawning => demo_spawning(),
    }
}

fn demo_coffee_shop() -> Result<()> {
    println!("☕ Coffee Shop");
    let mut ledger = CoffeeLedger::new();

    let steve = ledger.add_left("Steve")?;
    let cappuccino = ledger.add_right("Cappuccino")?;
    ledger.associate(steve, cappuccino, Price(2.0))?;
    ledger.associate(steve, cappuccino, Price(5.0))?;

    println!("  Steve's transactions: {}", ledger.join_count(steve)?);
    println!("  Steve's coffees: {}", ledger.counterparts(steve)?.len());
    println!("  Cappuccino average price: {}", ledger.average(cappuccino)?);

    for bad in [0.0, 51.0] {
        match ledger.associate(steve, cappuccino, Price(bad)) {
            Ok(_) => println!("  Price {} unexpectedly accepted", bad),
            Err(e) => println!("  Price {} rejected: {}", bad, e),
        }
    }
    println!("  Steve's transactions after rejects: {}", ledger.join_count(steve)?);

    let mut shop = CoffeeLedger::new();
    let customer = shop.add_left("Dima")?;
    for (name, price) in [("X", 2.0), ("Y", 5.0), ("Z", 7.0)] {
        shop.place_order(customer, name, price)?;
    }
    let in_range: Vec<&str> = shop
        .counterparts_in_range(customer, 2.0, 5.0)?
        .iter()
        .map(|c| c.name())
        .collect();
    println!("  Dima's coffees priced 2-5: {:?}", in_range);
    println!("  Dima spent: {}", shop.total_spent(customer)?);

    Ok(())
}

fn demo_pizzeria() -> Result<()> {
    println!("🍕 Pizzeria");
    let mut ledger = PizzeriaLedger::new();

    let steve = ledger.add_left("Steve")?;
    let cheese = ledger.add_right("Cheese")?;
    ledger.associate(steve, cheese, Price(2.0))?;
    ledger.associate(steve, cheese, Price(5.0))?;
    ledger.place_order(steve, "Pepperoni", 11.0)?;

    println!("  Cheese orders: {}", ledger.join_count(cheese)?);
    println!("  Cheese average price: {}", ledger.average(cheese)?);
    for join in ledger.catalog_joins() {
        println!("  {}", ledger.describe(join.id())?);
    }

    Ok(())
}

fn demo_national_parks() -> Result<()> {
    println!("🏞️  National Parks");
    let mut ledger = ParkLedger::new();

    let bart = ledger.add_left("Bartholomew")?;
    let park1 = ledger.add_right("Yellowstone")?;
    let park2 = ledger.add_right("Acadia")?;
    ledger.plan_trip(bart, park1)?;
    ledger.plan_trip(bart, park2)?;

    let tom = ledger.add_left("Tom")?;
    ledger.plan_trip(tom, park1)?;
    ledger.plan_trip(tom, park1)?;

    println!("  Bartholomew's parks: {}", ledger.counterparts(bart)?.len());
    println!("  Trips so far: {}", ledger.count());
    println!(
        "  Most frequent visitor to Yellowstone: {}",
        ledger.most_frequent_visitor(park1)?.name()
    );
    for join in ledger.catalog_joins() {
        println!("  {}", ledger.describe(join.id())?);
    }

    Ok(())
}

fn demo_enrollment() -> Result<()> {
    println!("🎓 Enrollment");
    let mut ledger = EnrollmentLedger::new();

    let ann = ledger.add_left("Ann")?;
    let bob = ledger.add_left("Bob")?;
    let databases = ledger.add_right("Databases")?;
    ledger.enroll(ann, databases, "Fall 2024")?;
    ledger.enroll(bob, databases, "Spring 2025")?;

    let roster: Vec<&str> = ledger
        .roster(databases, "Fall 2024")?
        .iter()
        .map(|s| s.name())
        .collect();
    println!("  Databases, Fall 2024: {:?}", roster);
    println!("  Databases students overall: {}", ledger.counterparts(databases)?.len());

    Ok(())
}

fn demo_spawning() -> Result<()> {
    println!("🧟 Spawning");
    let mut ledger = SpawnLedger::new();

    let zombie = ledger.add_left("Zombie")?;
    let plains = ledger.add_right("Plains")?;
    let desert = ledger.add_right("Desert")?;
    ledger.associate(zombie, plains, HourSpawned(22))?;
    ledger.associate(zombie, desert, HourSpawned(23))?;

    println!("  Zombie biomes: {}", ledger.counterparts(zombie)?.len());
    println!("  Average spawn hour in Plains: {}", ledger.average(plains)?);
    for join in ledger.catalog_joins() {
        println!("  {}", ledger.describe(join.id())?);
    }

    Ok(())
}
