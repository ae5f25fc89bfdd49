use clap::{Parser, Subcommand};
use herbal_core::config::path_from_env_value;
use herbal_core::encyclopedia::{
    check_interactions, condition_detail, herb_detail, search_conditions, search_preparations,
};
use herbal_core::export::csv_template;
use herbal_core::mixer::{recommend, ModelTier, Purpose};
use herbal_core::search::{filter_and_sort, SortDirection};
use herbal_core::store::{filter_products, format_idr};
use herbal_core::{Catalog, CoreConfig, NonEmptyText};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "herbal")]
#[command(about = "Herbal encyclopedia and blend mixer CLI")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Search the herb encyclopedia
    Search {
        /// Text matched against name, latin name and description
        query: Option<String>,
        /// Only herbs with this category
        #[arg(long)]
        category: Option<String>,
        /// Sort names Z to A
        #[arg(long)]
        desc: bool,
    },
    /// List herb categories
    Categories,
    /// Show one herb with its interactions, methods and remedies
    Herb {
        /// Herb id, e.g. turmeric
        id: String,
    },
    /// Look up remedies by condition
    Remedies {
        /// Text matched against condition name and description
        query: Option<String>,
    },
    /// Search preparation methods
    Preparations {
        query: Option<String>,
    },
    /// Recommend herbal blends for a free-text prompt
    Recommend {
        /// What the blend should help with, e.g. "saya ingin tidur nyenyak"
        prompt: String,
        /// Use the five-template tier
        #[arg(long)]
        advanced: bool,
        /// relaxation, energy, detox, immunity or focus (Indonesian names accepted)
        #[arg(long)]
        purpose: Option<Purpose>,
        /// Seed for repeatable results
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Check a blend for herb-herb and drug interactions
    Interactions {
        /// Herb ids in the blend
        #[arg(required = true)]
        ids: Vec<String>,
        /// Only drug interactions whose drug name contains this text
        #[arg(long)]
        drug: Option<String>,
    },
    /// List store products
    Products {
        query: Option<String>,
        /// Product category, or "all"
        #[arg(long)]
        category: Option<String>,
    },
    /// Show one product
    Product {
        /// Product id, e.g. 1
        id: String,
    },
    /// Print the CSV template for bulk herb data
    CsvTemplate,
}

fn load_catalog() -> Result<Catalog, Box<dyn std::error::Error>> {
    let catalog_path = path_from_env_value(std::env::var("HERBAL_CATALOG_PATH").ok());
    let cfg = CoreConfig::new(catalog_path, None, None)?;
    Ok(Catalog::load(&cfg)?)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("herbal_core=warn".parse()?),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let Some(command) = cli.command else {
        println!("Use 'herbal --help' for commands");
        return Ok(());
    };
    let catalog = load_catalog()?;

    match command {
        Commands::Search {
            query,
            category,
            desc,
        } => {
            let direction = if desc {
                SortDirection::Desc
            } else {
                SortDirection::Asc
            };
            let herbs = filter_and_sort(
                catalog.herbs(),
                query.as_deref().unwrap_or_default(),
                category.as_deref(),
                direction,
            );
            if herbs.is_empty() {
                println!("No herbs found.");
            }
            for herb in herbs {
                println!(
                    "{:<12} {:<12} {} [{}]",
                    herb.id,
                    herb.name,
                    herb.latin_name,
                    herb.categories.join(", ")
                );
            }
        }
        Commands::Categories => {
            for category in catalog.categories() {
                println!("{category}");
            }
        }
        Commands::Herb { id } => match herb_detail(&catalog, &id) {
            Some(detail) => {
                let herb = &detail.herb;
                println!("{} ({})", herb.name, herb.latin_name);
                println!("{}", herb.description);
                println!("\nManfaat:");
                for benefit in &herb.benefits {
                    println!("  - {benefit}");
                }
                println!("\nDosis dewasa: {}", herb.dosage.adult);
                if !herb.warnings.is_empty() {
                    println!("\nPeringatan:");
                    for warning in &herb.warnings {
                        println!("  - {warning}");
                    }
                }
                if !detail.drug_interactions.is_empty() {
                    println!("\nInteraksi obat:");
                    for i in &detail.drug_interactions {
                        println!("  - {} ({:?}): {}", i.drug, i.severity, i.description);
                    }
                }
                if !detail.preparation_methods.is_empty() {
                    let methods: Vec<_> = detail
                        .preparation_methods
                        .iter()
                        .map(|m| m.name.as_str())
                        .collect();
                    println!("\nCara penyiapan: {}", methods.join(", "));
                }
                for remedy in &detail.remedies {
                    println!("Ramuan untuk {}: {}", remedy.condition_name, remedy.remedy.name);
                }
            }
            None => eprintln!("No herb with id: {id}"),
        },
        Commands::Remedies { query } => {
            let conditions = search_conditions(&catalog, query.as_deref().unwrap_or_default());
            if conditions.is_empty() {
                println!("No conditions found.");
            }
            for condition in conditions {
                let Some(detail) = condition_detail(&catalog, &condition.id) else {
                    continue;
                };
                println!("{}: {}", detail.name, detail.description);
                for remedy in detail.remedies {
                    let herbs: Vec<_> = remedy.herbs.iter().map(|h| h.name.as_str()).collect();
                    println!("  * {} [{}]", remedy.name, herbs.join(", "));
                    println!("    {} / {} / {}", remedy.preparation, remedy.dosage, remedy.duration);
                }
            }
        }
        Commands::Preparations { query } => {
            for method in search_preparations(&catalog, query.as_deref().unwrap_or_default()) {
                println!("{}: {}", method.name, method.description);
                for (n, step) in method.steps.iter().enumerate() {
                    println!("  {}. {step}", n + 1);
                }
            }
        }
        Commands::Recommend {
            prompt,
            advanced,
            purpose,
            seed,
        } => {
            let prompt = NonEmptyText::new(&prompt)?;
            let tier = if advanced {
                ModelTier::Advanced
            } else {
                ModelTier::Standard
            };
            let mut rng = match seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_entropy(),
            };
            let recommendations =
                recommend(&catalog, &prompt, tier, purpose.unwrap_or_default(), &mut rng);
            if recommendations.is_empty() {
                println!("No blends match that purpose.");
            }
            for rec in recommendations {
                println!(
                    "{} ({}, {:?}, rating {:.1})",
                    rec.name, rec.category, rec.complexity, rec.rating
                );
                println!("  {}", rec.description);
                println!("  Herbal: {}", rec.herb_names().join(", "));
                println!("  Tag: {}", rec.tags.join(", "));
                for benefit in &rec.benefits {
                    println!("  - {benefit}");
                }
                println!("  {}", rec.preparation);
            }
        }
        Commands::Interactions { ids, drug } => {
            let report = check_interactions(&catalog, &ids, drug.as_deref());
            for id in &report.unknown_herbs {
                eprintln!("Unknown herb id: {id}");
            }
            for i in &report.herb_interactions {
                println!(
                    "{} + {} ({:?}): {}",
                    i.herbs[0], i.herbs[1], i.effect, i.description
                );
            }
            for i in &report.drug_interactions {
                println!("{} + {} ({:?}): {}", i.herb, i.drug, i.severity, i.description);
            }
            if report.herb_interactions.is_empty() && report.drug_interactions.is_empty() {
                println!("No known interactions.");
            }
        }
        Commands::Products { query, category } => {
            let products = filter_products(
                catalog.products(),
                query.as_deref().unwrap_or_default(),
                category.as_deref(),
            );
            for product in products {
                println!(
                    "{:>2} {:<32} {:>12} stok {:>3} [{}]",
                    product.id,
                    product.name,
                    format_idr(product.price),
                    product.stock,
                    product.category
                );
            }
        }
        Commands::Product { id } => match catalog.product(&id) {
            Some(product) => {
                println!("{} ({})", product.name, product.category);
                println!("{}", product.description);
                println!("Harga: {}", format_idr(product.price));
                println!("Stok: {}", product.stock);
            }
            None => eprintln!("Product not found: {id}"),
        },
        Commands::CsvTemplate => {
            println!("{}", csv_template());
        }
    }

    Ok(())
}
