use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Args, Parser, Subcommand};

use storefront_auth::{BearerToken, LoginForm, RegistrationForm, Session, SessionContext};
use storefront_cart::{CartController, CartService, CheckoutRequest, MutationOutcome, ViewMode, reconcile};
use storefront_client::{ClientConfig, StorefrontClient};
use storefront_core::{AddressId, ProductId};

#[derive(Parser, Debug)]
#[command(name = "storefront", version, about = "Storefront command-line client")]
struct Cli {
    #[command(flatten)]
    opts: GlobalOpts,

    #[command(subcommand)]
    command: Command,
}

/// Overrides for the `STOREFRONT_*` configuration.
#[derive(Args, Debug, Clone)]
struct GlobalOpts {
    /// API base URL (env: STOREFRONT_API_URL)
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Per-request timeout in milliseconds (env: STOREFRONT_HTTP_TIMEOUT_MS)
    #[arg(long, global = true)]
    timeout_ms: Option<u64>,

    /// Retries for failed reads (env: STOREFRONT_MAX_RETRIES)
    #[arg(long, global = true)]
    max_retries: Option<u32>,

    /// Bearer token from a previous login
    #[arg(long, global = true, env = "STOREFRONT_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Username the token belongs to
    #[arg(long, global = true, env = "STOREFRONT_USERNAME")]
    username: Option<String>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List products, optionally filtered by a search text
    Products {
        #[arg(long)]
        search: Option<String>,
    },

    /// Inspect or change the cart
    #[command(subcommand)]
    Cart(CartCommand),

    /// Create an account
    Register(RegisterArgs),

    /// Log in and print the session token
    Login(LoginArgs),

    /// Manage shipping addresses
    #[command(subcommand)]
    Addresses(AddressCommand),

    /// Place an order for the current cart
    Checkout {
        /// Id of the shipping address
        #[arg(long)]
        address: String,
    },
}

#[derive(Subcommand, Debug)]
enum CartCommand {
    /// Show the cart
    Show {
        /// Checkout-page rendering with order details
        #[arg(long)]
        read_only: bool,
    },

    /// Set a product's quantity (0 removes it)
    Set {
        product_id: String,
        #[arg(allow_negative_numbers = true)]
        quantity: i64,
    },
}

#[derive(Subcommand, Debug)]
enum AddressCommand {
    List,
    Add { address: String },
}

#[derive(Args, Debug)]
struct RegisterArgs {
    #[arg(long)]
    name: String,
    #[arg(long, default_value = "")]
    email: String,
    #[arg(long, env = "STOREFRONT_PASSWORD", hide_env_values = true)]
    password: String,
    #[arg(long)]
    confirm_password: String,
}

#[derive(Args, Debug)]
struct LoginArgs {
    #[arg(long)]
    username: String,
    #[arg(long, env = "STOREFRONT_PASSWORD", hide_env_values = true)]
    password: String,
}

impl GlobalOpts {
    fn config(&self) -> Result<ClientConfig> {
        let mut config = ClientConfig::from_env().context("invalid STOREFRONT_* environment")?;
        if let Some(url) = &self.api_url {
            config = config.with_endpoint(url.as_str()).context("invalid --api-url")?;
        }
        if let Some(ms) = self.timeout_ms {
            config.timeout = Duration::from_millis(ms);
        }
        if let Some(retries) = self.max_retries {
            config.max_retries = retries;
        }
        Ok(config)
    }

    fn session(&self) -> SessionContext {
        match self.token.clone().and_then(BearerToken::new) {
            Some(token) => SessionContext::authenticated(Session::new(
                token,
                self.username.clone().unwrap_or_default(),
                None,
                Utc::now(),
            )),
            None => SessionContext::guest(),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    storefront_observability::init();

    let cli = Cli::parse();
    let config = cli.opts.config()?;
    tracing::debug!(endpoint = %config.endpoint, "client configured");
    let client = Arc::new(StorefrontClient::new(config, cli.opts.session())?);

    match cli.command {
        Command::Products { search } => cmd_products(&client, search.as_deref()).await,
        Command::Cart(CartCommand::Show { read_only }) => {
            let mode = if read_only { ViewMode::ReadOnly } else { ViewMode::Editable };
            cmd_cart_show(client, mode).await
        }
        Command::Cart(CartCommand::Set { product_id, quantity }) => {
            cmd_cart_set(client, &product_id, quantity).await
        }
        Command::Register(args) => cmd_register(&client, args).await,
        Command::Login(args) => cmd_login(&client, args).await,
        Command::Addresses(AddressCommand::List) => cmd_addresses(&client).await,
        Command::Addresses(AddressCommand::Add { address }) => {
            let addresses = client.add_address(&address).await.context("failed to add address")?;
            print_addresses(&addresses);
            Ok(())
        }
        Command::Checkout { address } => cmd_checkout(&client, &address).await,
    }
}

async fn cmd_products(client: &StorefrontClient, search: Option<&str>) -> Result<()> {
    let products = client
        .fetch_products(search)
        .await
        .context("failed to fetch products")?;

    if products.is_empty() {
        println!("No products found");
    }
    for product in &products {
        println!(
            "{:<28} {:<40} {:>10}  {}/5  [{}]",
            product.id(),
            product.name(),
            product.cost().to_string(),
            product.rating().stars(),
            product.category()
        );
    }
    Ok(())
}

async fn load_controller(client: Arc<StorefrontClient>) -> Result<CartController<StorefrontClient>> {
    let catalog = client.load_catalog().await.context("failed to load catalog")?;
    CartController::load(client, Arc::new(catalog))
        .await
        .context("failed to load cart")
}

async fn cmd_cart_show(client: Arc<StorefrontClient>, mode: ViewMode) -> Result<()> {
    let controller = load_controller(client).await?;
    print!("{}", controller.view(mode)?);
    Ok(())
}

async fn cmd_cart_set(client: Arc<StorefrontClient>, product_id: &str, quantity: i64) -> Result<()> {
    let product_id: ProductId = product_id.parse()?;
    let controller = load_controller(client).await?;

    match controller
        .set_quantity(&product_id, quantity)
        .await
        .with_context(|| format!("failed to update {product_id}"))?
    {
        MutationOutcome::Applied(_) => print!("{}", controller.view(ViewMode::Editable)?),
        MutationOutcome::Discarded => println!("Cart view closed; update discarded"),
    }
    Ok(())
}

async fn cmd_register(client: &StorefrontClient, args: RegisterArgs) -> Result<()> {
    let form = RegistrationForm {
        name: args.name,
        email: args.email,
        password: args.password,
        confirm_password: args.confirm_password,
    };
    client.register(&form).await.context("registration failed")?;
    println!("Registered successfully");
    Ok(())
}

async fn cmd_login(client: &StorefrontClient, args: LoginArgs) -> Result<()> {
    let form = LoginForm {
        username: args.username,
        password: args.password,
    };
    let session = client.login(&form).await.context("login failed")?;

    println!("Logged in as {}", session.username());
    if let Some(balance) = session.balance() {
        println!("Wallet balance: {balance}");
    }
    println!("export STOREFRONT_USERNAME={}", session.username());
    println!("export STOREFRONT_TOKEN={}", session.token().expose());
    Ok(())
}

async fn cmd_addresses(client: &StorefrontClient) -> Result<()> {
    let addresses = client.addresses().await.context("failed to fetch addresses")?;
    print_addresses(&addresses);
    Ok(())
}

fn print_addresses(addresses: &[storefront_client::Address]) {
    if addresses.is_empty() {
        println!("No addresses found for this account. Please add one to proceed");
    }
    for address in addresses {
        println!("{address}");
    }
}

async fn cmd_checkout(client: &StorefrontClient, address: &str) -> Result<()> {
    let address_id: AddressId = address.parse()?;
    let catalog = client.load_catalog().await.context("failed to load catalog")?;
    let entries = client.fetch_cart().await.context("failed to load cart")?;
    let items = reconcile(&entries, &catalog);

    let request = CheckoutRequest::prepare(&items, Some(&address_id), client.session().balance())?;
    client.checkout(&request).await.context("checkout failed")?;
    println!("Order placed ({})", request.total);
    Ok(())
}
