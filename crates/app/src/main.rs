//! TinySteps BD storefront CLI

use std::{process, sync::Arc};

use clap::{Args, Parser, Subcommand};
use tabled::{
    builder::Builder,
    settings::{Alignment, Style, object::Columns},
};
use tokio::sync::Mutex;
use tracing_subscriber::EnvFilter;

use tinysteps::{
    cart::QuantityOutcome,
    checkout::{CheckoutForm, PaymentMethod},
    format::{BanglaTakaFormatter, PriceFormatter, truncate},
    pricing::DeliveryZone,
    products::Product,
};
use tinysteps_app::{
    checkout::{CheckoutFlow, SubmitOutcome},
    config::AppConfig,
    context::AppContext,
    messages,
    session::CartSession,
};

#[derive(Debug, Parser)]
#[command(name = "tinysteps", about = "TinySteps BD storefront", long_about = None)]
struct Cli {
    #[command(flatten)]
    config: AppConfig,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Browse the product catalogue
    Products(ProductsCommand),

    /// Inspect and edit the shopping cart
    Cart(CartCommand),

    /// Validate the checkout form and place the order
    Checkout(Box<CheckoutArgs>),

    /// Show the receipt of the last placed order
    Receipt,
}

#[derive(Debug, Args)]
struct ProductsCommand {
    #[command(subcommand)]
    command: ProductsSubcommand,
}

#[derive(Debug, Subcommand)]
enum ProductsSubcommand {
    /// List every product
    List,

    /// Show one product in full
    Show {
        /// Product id
        id: String,
    },
}

#[derive(Debug, Args)]
struct CartCommand {
    #[command(subcommand)]
    command: CartSubcommand,
}

#[derive(Debug, Subcommand)]
enum CartSubcommand {
    /// Show the cart with totals
    Show {
        /// Delivery area selector, e.g. inside-dhaka
        #[arg(long, default_value = "inside-dhaka")]
        area: String,
    },

    /// Add one unit of a product
    Add {
        /// Product id
        id: String,

        /// Set the line to this quantity after adding
        #[arg(long)]
        quantity: Option<u32>,
    },

    /// Set a line's quantity
    Set {
        /// Product id
        id: String,

        /// New quantity; zero asks for removal
        quantity: u32,
    },

    /// Remove a line
    Remove {
        /// Product id
        id: String,

        /// Confirm the removal without prompting
        #[arg(long)]
        yes: bool,
    },

    /// Empty the cart
    Clear,
}

#[derive(Debug, Args)]
struct CheckoutArgs {
    /// Customer full name
    #[arg(long)]
    name: String,

    /// Customer mobile number
    #[arg(long)]
    phone: String,

    /// Contact email
    #[arg(long, default_value = "")]
    email: String,

    /// Full delivery address
    #[arg(long)]
    address: String,

    /// Delivery area selector, e.g. inside-dhaka
    #[arg(long)]
    area: String,

    /// City or district
    #[arg(long)]
    city: String,

    /// Delivery notes
    #[arg(long, default_value = "")]
    notes: String,

    /// Payment method: cash_on_delivery, bkash, nagad or rocket
    #[arg(long, default_value = "cash_on_delivery")]
    payment_method: PaymentMethod,

    /// Wallet number, for digital payments
    #[arg(long, default_value = "")]
    payment_number: String,

    /// Wallet transaction id, for digital payments
    #[arg(long, default_value = "")]
    transaction_id: String,

    /// Accept the terms and conditions
    #[arg(long)]
    agree_to_terms: bool,
}

#[tokio::main]
pub async fn main() {
    let _env = dotenvy::dotenv();

    let cli = Cli::parse();

    if let Err(error) = init_logging(&cli.config) {
        eprintln!("{error}");
        process::exit(1);
    }

    if let Err(error) = run(cli).await {
        eprintln!("{error}");
        process::exit(1);
    }
}

fn init_logging(config: &AppConfig) -> Result<(), String> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.clone()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init()
        .map_err(|error| format!("failed to initialise logging: {error}"))
}

async fn run(cli: Cli) -> Result<(), String> {
    let context = AppContext::from_config(&cli.config);

    match cli.command {
        Commands::Products(ProductsCommand { command }) => match command {
            ProductsSubcommand::List => list_products(&context).await,
            ProductsSubcommand::Show { id } => show_product(&context, &id).await,
        },
        Commands::Cart(CartCommand { command }) => match command {
            CartSubcommand::Show { area } => show_cart(&context, &area),
            CartSubcommand::Add { id, quantity } => add_to_cart(&context, &id, quantity).await,
            CartSubcommand::Set { id, quantity } => set_quantity(&context, &id, quantity),
            CartSubcommand::Remove { id, yes } => remove_from_cart(&context, &id, yes),
            CartSubcommand::Clear => {
                CartSession::load(Arc::clone(&context.store)).clear();
                println!("cart cleared");
                Ok(())
            }
        },
        Commands::Checkout(args) => checkout(&context, *args).await,
        Commands::Receipt => show_receipt(&context),
    }
}

async fn list_products(context: &AppContext) -> Result<(), String> {
    let products = context
        .api
        .list_products()
        .await
        .map_err(|error| format!("failed to load products: {error}"))?;

    let taka = BanglaTakaFormatter;
    let mut builder = Builder::default();
    builder.push_record(["ID", "Name", "Price", "Category"]);

    for product in &products {
        builder.push_record([
            product.id.clone(),
            truncate(&product.name, 40),
            taka.format(product.price()),
            product.category.clone(),
        ]);
    }

    let mut table = builder.build();
    table.with(Style::rounded());
    table.modify(Columns::new(2..3), Alignment::right());
    println!("{table}");

    Ok(())
}

async fn show_product(context: &AppContext, id: &str) -> Result<(), String> {
    let product = context
        .api
        .get_product(id)
        .await
        .map_err(|error| format!("failed to load product {id}: {error}"))?;

    print_product(&product);
    Ok(())
}

fn print_product(product: &Product) {
    let taka = BanglaTakaFormatter;

    println!("{} ({})", product.name, product.id);
    println!("price: {}", taka.format(product.price()));

    if !product.category.is_empty() {
        println!("category: {}", product.category);
    }
    if !product.sizes().is_empty() {
        println!("sizes: {}", product.sizes().join(", "));
    }
    if !product.colors().is_empty() {
        println!("colors: {}", product.colors().join(", "));
    }
    if let Some(image) = product.main_image() {
        println!("image: {image}");
    }
    if !product.description.is_empty() {
        println!("{}", truncate(&product.description, 200));
    }
}

fn show_cart(context: &AppContext, area: &str) -> Result<(), String> {
    let session = CartSession::load(Arc::clone(&context.store));

    if session.cart().is_empty() {
        println!("{}", messages::EMPTY_CART);
        return Ok(());
    }

    let zone = DeliveryZone::from_selector(area);
    let summary = session.summary(zone);
    let estimate = zone.estimate();
    let taka = BanglaTakaFormatter;

    let mut builder = Builder::default();
    builder.push_record(["ID", "Name", "Qty", "Unit", "Line total"]);

    for item in session.cart().items() {
        builder.push_record([
            item.id.clone(),
            truncate(&item.name, 40),
            item.quantity.to_string(),
            taka.format(item.price),
            taka.format(item.price * rust_decimal::Decimal::from(item.quantity)),
        ]);
    }

    let mut table = builder.build();
    table.with(Style::rounded());
    table.modify(Columns::new(2..5), Alignment::right());
    println!("{table}");

    println!("subtotal:     {}", taka.format(summary.subtotal));
    println!("delivery fee: {}", taka.format(summary.delivery_fee));
    println!("total:        {}", taka.format(summary.total));
    println!(
        "delivery in {}-{} business days",
        estimate.min_business_days, estimate.max_business_days
    );

    Ok(())
}

async fn add_to_cart(
    context: &AppContext,
    id: &str,
    quantity: Option<u32>,
) -> Result<(), String> {
    let product = context
        .api
        .get_product(id)
        .await
        .map_err(|error| format!("failed to load product {id}: {error}"))?;

    let mut session = CartSession::load(Arc::clone(&context.store));
    session.add(id, &product.snapshot());

    if let Some(quantity) = quantity
        && session.set_quantity(id, quantity) == QuantityOutcome::Clamped
    {
        println!("{}", messages::MAX_QUANTITY_WARNING);
    }

    println!("added {} to cart", product.name);
    Ok(())
}

fn set_quantity(context: &AppContext, id: &str, quantity: u32) -> Result<(), String> {
    let mut session = CartSession::load(Arc::clone(&context.store));

    match session.set_quantity(id, quantity) {
        QuantityOutcome::Updated => println!("quantity updated"),
        QuantityOutcome::Clamped => println!("{}", messages::MAX_QUANTITY_WARNING),
        QuantityOutcome::RemovalRequested => {
            session.cancel_removal();
            println!("{}", messages::CONFIRM_REMOVAL);
            println!("run `cart remove {id} --yes` to remove the line");
        }
        QuantityOutcome::NotInCart => return Err(format!("{id} is not in the cart")),
    }

    Ok(())
}

fn remove_from_cart(context: &AppContext, id: &str, yes: bool) -> Result<(), String> {
    let mut session = CartSession::load(Arc::clone(&context.store));

    if !session.request_removal(id) {
        return Err(format!("{id} is not in the cart"));
    }

    if !yes {
        session.cancel_removal();
        println!("{}", messages::CONFIRM_REMOVAL);
        println!("re-run with --yes to confirm");
        return Ok(());
    }

    match session.confirm_removal() {
        Some(removed) => println!("removed {} from cart", removed.name),
        None => println!("nothing to remove"),
    }

    Ok(())
}

async fn checkout(context: &AppContext, args: CheckoutArgs) -> Result<(), String> {
    let form = CheckoutForm {
        customer_name: args.name,
        customer_phone: args.phone,
        customer_email: args.email,
        delivery_address: args.address,
        delivery_area: args.area,
        delivery_city: args.city,
        delivery_notes: args.notes,
        payment_method: args.payment_method,
        payment_number: args.payment_number,
        transaction_id: args.transaction_id,
        agreed_to_terms: args.agree_to_terms,
    };

    let flow = CheckoutFlow::new(Arc::clone(&context.api), Arc::clone(&context.store));
    let session = Mutex::new(CartSession::load(Arc::clone(&context.store)));

    match flow.submit(&session, &form).await {
        SubmitOutcome::Placed(receipt) => {
            let zone = DeliveryZone::from_selector(&form.delivery_area);
            let estimate = zone.estimate();
            let taka = BanglaTakaFormatter;

            println!("order placed: {}", receipt.order_id);
            println!("total: {}", taka.format(receipt.total_amount));
            println!(
                "delivery in {}-{} business days",
                estimate.min_business_days, estimate.max_business_days
            );
            Ok(())
        }
        SubmitOutcome::Invalid(errors) => {
            let mut lines = vec![messages::FORM_INVALID.to_string()];
            for (field, violation) in &errors.violations {
                lines.push(format!("  {}", messages::violation_message(*field, *violation)));
            }
            Err(lines.join("\n"))
        }
        SubmitOutcome::EmptyCart => Err(messages::EMPTY_CART.to_string()),
        SubmitOutcome::Failed(category) => Err(messages::category_message(category).to_string()),
        SubmitOutcome::AlreadySubmitting => Err("an order is already being submitted".to_string()),
    }
}

fn show_receipt(context: &AppContext) -> Result<(), String> {
    let flow = CheckoutFlow::new(Arc::clone(&context.api), Arc::clone(&context.store));

    match flow.last_receipt() {
        Some(receipt) => {
            let taka = BanglaTakaFormatter;
            println!("order:          {}", receipt.order_id);
            println!("customer:       {}", receipt.customer_name);
            println!("total:          {}", taka.format(receipt.total_amount));
            println!("delivery fee:   {}", taka.format(receipt.delivery_fee));
            println!("payment method: {}", receipt.payment_method);
            Ok(())
        }
        None => {
            println!("no order has been placed yet");
            Ok(())
        }
    }
}
