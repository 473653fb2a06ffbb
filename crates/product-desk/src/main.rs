//! # Product Desk
//!
//! Command-line driver for the product desk and the Pokémon page.
//!
//! - `product-desk demo [--search TEXT] [--sort OPTION]` seeds the sample catalog, adds, edits
//!   and deletes a product, then prints the visible list.
//! - `product-desk pokemon` loads both sections of the Pokémon page and prints them.
//!
//! Settings come from the environment (and a `.env` file); see [`product_desk::config`].

use clap::{Parser, Subcommand};
use product_desk::clients::PokeApiClient;
use product_desk::config::DeskConfig;
use product_desk::lifecycle::ProductDesk;
use product_desk::model::{Product, ProductId, SortOption};
use product_desk::pokemon_page::{ability_rows, ability_title, PokemonPage, Section};
use product_desk::session::EmptyListing;
use product_desk::validation::Field;
use resource_actor::tracing::setup_tracing;
use std::sync::Arc;
use tracing::{info, warn, Instrument};

#[derive(Parser)]
#[command(name = "product-desk", version, about = "Product desk and Pokémon page")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Walk through adding, editing and deleting products
    Demo {
        /// Search text applied to the final listing
        #[arg(long, default_value = "")]
        search: String,

        /// One of default, price-asc, price-desc, stock-asc, stock-desc
        #[arg(long, default_value_t = SortOption::Default)]
        sort: SortOption,
    },
    /// Load the featured ability and the ability list
    Pokemon,
}

#[tokio::main]
async fn main() -> Result<(), String> {
    dotenvy::dotenv().ok();
    setup_tracing();

    let cli = Cli::parse();
    let config = DeskConfig::from_env().map_err(|e| e.to_string())?;

    match cli.command {
        Command::Demo { search, sort } => run_demo(&config, search, sort).await,
        Command::Pokemon => run_pokemon(&config).await,
    }
}

async fn run_demo(config: &DeskConfig, search: String, sort: SortOption) -> Result<(), String> {
    info!("Starting product desk demo");
    let mut desk = ProductDesk::with_sample_catalog(config)
        .await
        .map_err(|e| e.to_string())?;

    let span = tracing::info_span!("product_creation");
    let cable = async {
        // an empty name is rejected and the form is kept
        desk.edit_field(Field::Price, "15000");
        desk.edit_field(Field::Stock, "40");
        if let Err(e) = desk.submit().await {
            warn!(error = %e, "Submit rejected as expected");
        }
        desk.edit_field(Field::Name, "USB Cable");
        desk.submit().await
    }
    .instrument(span)
    .await
    .map_err(|e| e.to_string())?;
    info!(product_id = %cable.id, "Product created successfully");

    let span = tracing::info_span!("product_edit");
    let mouse_id = ProductId::from(2);
    async {
        desk.select_for_edit(&mouse_id).await?;
        desk.edit_field(Field::Stock, "19");
        desk.submit().await
    }
    .instrument(span)
    .await
    .map_err(|e| e.to_string())?;

    let span = tracing::info_span!("product_deletion");
    async {
        // first request is cancelled, second one goes through
        desk.request_delete(&cable.id).await?;
        desk.cancel_delete();
        desk.request_delete(&cable.id).await?;
        desk.confirm_delete().await
    }
    .instrument(span)
    .await
    .map_err(|e| e.to_string())?;

    desk.set_sort(sort);
    desk.set_search(search);
    desk.wait_for_search().await;

    let products = desk.visible_products().await.map_err(|e| e.to_string())?;
    print_products(&products, desk.state().sort, desk.empty_listing());

    desk.shutdown().await?;
    info!("Demo completed successfully");
    Ok(())
}

fn print_products(products: &[Product], sort: SortOption, empty: EmptyListing) {
    println!("Urutkan Berdasarkan: {}", sort.label());
    if products.is_empty() {
        match empty {
            EmptyListing::NoProducts => println!("Belum ada produk."),
            EmptyListing::NoMatches => println!("Tidak ada produk yang cocok."),
        }
        return;
    }
    for product in products {
        let badge = if product.is_low_stock() { "!" } else { " " };
        println!(
            "{:>4}  {:<24} {:>16} {:>6} unit {badge}",
            product.id,
            product.name,
            product.display_price(),
            product.stock
        );
    }
}

async fn run_pokemon(config: &DeskConfig) -> Result<(), String> {
    let api = Arc::new(PokeApiClient::new(config.pokeapi.clone()));
    let mut load = PokemonPage::start(api, config.pokeapi.featured_ability.clone());

    // each section prints as soon as its own fetch ends
    println!("{}", ability_title(load.featured()));
    match load.settled_detail().await {
        Section::Ready(detail) => println!("{}", detail.english_effect()),
        Section::Failed(message) => println!("Error: {message}"),
        Section::Loading => println!("Loading..."),
    }

    println!();
    match load.settled_abilities().await {
        Section::Ready(list) => {
            for row in ability_rows(&list) {
                println!("{:>3}. {}", row.number, row.label);
            }
        }
        Section::Failed(message) => println!("Error: {message}"),
        Section::Loading => println!("Loading..."),
    }

    info!("Pokémon page printed");
    Ok(())
}
