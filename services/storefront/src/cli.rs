//! `rincon` command line: one subcommand per storefront action.

use clap::{Args, Parser, Subcommand};
use rust_decimal::Decimal;

use rincon_domain::id::{
    BrandId, CartLineId, CategoryId, CustomerId, GenderId, OrderId, ProductId, ProductTypeId,
    UserId,
};
use rincon_domain::master_data::{
    Brand, Category, Gender, MasterDataForm, MasterDataKind, MasterDataRecord, ProductType,
};
use rincon_domain::money::format_price;
use rincon_domain::order::{DEFAULT_REGION, Order, OrderStatus, ShippingAddress};
use rincon_domain::product::Product;
use rincon_domain::user::User;

use crate::domain::types::{CartView, CatalogFilter, ProductDraft};
use crate::error::StorefrontError;
use crate::infra::http::RestBackend;
use crate::usecase::auth::{GetProfileUseCase, LoginInput, LoginUseCase};
use crate::usecase::cart::{
    AddToCartInput, AddToCartUseCase, LoadCartUseCase, RemoveCartLineUseCase,
};
use crate::usecase::catalog::{GetProductUseCase, LoadCatalogUseCase};
use crate::usecase::checkout::{CheckoutInput, CheckoutUseCase};
use crate::usecase::master_data::{
    CreateMasterRecordUseCase, DeleteMasterRecordUseCase, LoadMasterDataUseCase,
    UpdateMasterRecordUseCase,
};
use crate::usecase::order::{
    GetOrderUseCase, ListOrderLinesUseCase, ListOrdersUseCase, UpdateOrderStatusUseCase,
};
use crate::usecase::product::{
    CreateProductUseCase, DeleteProductUseCase, ListProductsUseCase, UpdateProductUseCase,
};
use crate::usecase::registration::{RegisterCustomerUseCase, RegistrationForm};
use crate::usecase::user::{ListUsersUseCase, SetUserActiveUseCase};

#[derive(Debug, Parser)]
#[command(name = "rincon", about = "Rincón perfume storefront client")]
pub struct Cli {
    /// Backend root URL. Overrides RINCON_BASE_URL.
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Check credentials and show the resulting session
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Show a user account
    Profile { id: UserId },
    /// Browse purchasable products
    Catalog(CatalogArgs),
    /// Product administration
    #[command(subcommand)]
    Product(ProductCommand),
    /// Shopping cart of a customer
    #[command(subcommand)]
    Cart(CartCommand),
    /// Place an order with the customer's current cart
    Checkout(CheckoutArgs),
    /// Order history and status changes
    #[command(subcommand)]
    Orders(OrderCommand),
    /// Brands, categories, genders and product types
    #[command(subcommand)]
    Master(MasterCommand),
    /// User administration
    #[command(subcommand)]
    Users(UserCommand),
    /// Register a new customer account
    Register(RegisterArgs),
}

#[derive(Debug, Args)]
pub struct CatalogArgs {
    /// Text to look for in the name or description
    #[arg(long)]
    pub text: Option<String>,
    #[arg(long)]
    pub category: Option<CategoryId>,
    #[arg(long)]
    pub brand: Option<BrandId>,
    #[arg(long)]
    pub gender: Option<GenderId>,
}

#[derive(Debug, Subcommand)]
pub enum ProductCommand {
    Get { id: ProductId },
    /// Every product, including inactive ones
    List,
    Create(ProductArgs),
    Update {
        id: ProductId,
        #[command(flatten)]
        product: ProductArgs,
    },
    Delete { id: ProductId },
}

#[derive(Debug, Args)]
pub struct ProductArgs {
    #[arg(long)]
    pub name: String,
    #[arg(long)]
    pub description: Option<String>,
    #[arg(long)]
    pub price: Decimal,
    #[arg(long, default_value_t = 0)]
    pub volume_ml: i32,
    #[arg(long)]
    pub brand: BrandId,
    #[arg(long)]
    pub category: CategoryId,
    #[arg(long)]
    pub product_type: ProductTypeId,
    #[arg(long)]
    pub gender: GenderId,
    #[arg(long)]
    pub aroma: Option<String>,
    #[arg(long)]
    pub olfactory_family: Option<String>,
    #[arg(long)]
    pub image_url: Option<String>,
    #[arg(long, default_value_t = 0)]
    pub stock: i32,
    /// Create or leave the product hidden from the catalog
    #[arg(long)]
    pub inactive: bool,
}

impl From<ProductArgs> for ProductDraft {
    fn from(args: ProductArgs) -> Self {
        Self {
            name: args.name,
            description: args.description,
            price: args.price,
            volume_ml: args.volume_ml,
            brand: args.brand,
            category: args.category,
            product_type: args.product_type,
            gender: args.gender,
            aroma: args.aroma,
            olfactory_family: args.olfactory_family,
            image_url: args.image_url,
            stock: args.stock,
            active: !args.inactive,
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum CartCommand {
    Show {
        #[arg(long)]
        customer: CustomerId,
    },
    /// Set the quantity of a product; a repeated add replaces the quantity
    Add {
        #[arg(long)]
        customer: CustomerId,
        product: ProductId,
        #[arg(long, default_value_t = 1)]
        quantity: i32,
    },
    Remove {
        #[arg(long)]
        customer: CustomerId,
        line: CartLineId,
    },
}

#[derive(Debug, Args)]
pub struct CheckoutArgs {
    #[arg(long)]
    pub customer: CustomerId,
    #[arg(long)]
    pub address: String,
    #[arg(long)]
    pub commune: String,
    #[arg(long, default_value = DEFAULT_REGION)]
    pub region: String,
}

#[derive(Debug, Subcommand)]
pub enum OrderCommand {
    List {
        #[arg(long)]
        customer: CustomerId,
    },
    Show { id: OrderId },
    Lines { id: OrderId },
    /// PENDIENTE, PROCESANDO, ENVIADO, ENTREGADO or CANCELADO
    Status { id: OrderId, status: OrderStatus },
}

#[derive(Debug, Subcommand)]
pub enum MasterCommand {
    /// List one kind, or all four
    List { kind: Option<MasterDataKind> },
    Create {
        kind: MasterDataKind,
        #[command(flatten)]
        form: MasterArgs,
    },
    Update {
        kind: MasterDataKind,
        key: i64,
        #[command(flatten)]
        form: MasterArgs,
    },
    Delete { kind: MasterDataKind, key: i64 },
}

#[derive(Debug, Args)]
pub struct MasterArgs {
    #[arg(long)]
    pub name: String,
    #[arg(long)]
    pub description: Option<String>,
    /// Brands only
    #[arg(long)]
    pub country: Option<String>,
}

impl From<MasterArgs> for MasterDataForm {
    fn from(args: MasterArgs) -> Self {
        Self {
            name: args.name,
            description: args.description,
            country_of_origin: args.country,
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum UserCommand {
    /// All users, with managers awaiting approval
    List,
    Approve { id: UserId },
    Deactivate { id: UserId },
}

#[derive(Debug, Args)]
pub struct RegisterArgs {
    #[arg(long)]
    pub rut: String,
    #[arg(long)]
    pub first_name: String,
    #[arg(long, default_value = "")]
    pub second_name: String,
    #[arg(long)]
    pub first_surname: String,
    #[arg(long, default_value = "")]
    pub second_surname: String,
    #[arg(long)]
    pub email: String,
    #[arg(long)]
    pub password: String,
    #[arg(long)]
    pub confirm_password: String,
    /// YYYY-MM-DD
    #[arg(long)]
    pub birth_date: String,
    #[arg(long)]
    pub phone: String,
    #[arg(long)]
    pub address: String,
    #[arg(long)]
    pub commune: String,
    #[arg(long, default_value = DEFAULT_REGION)]
    pub region: String,
}

impl From<RegisterArgs> for RegistrationForm {
    fn from(args: RegisterArgs) -> Self {
        Self {
            rut: args.rut,
            first_name: args.first_name,
            second_name: args.second_name,
            first_surname: args.first_surname,
            second_surname: args.second_surname,
            email: args.email,
            password: args.password,
            password_confirmation: args.confirm_password,
            birth_date: args.birth_date,
            phone: args.phone,
            address: args.address,
            commune: args.commune,
            region: args.region,
        }
    }
}

/// Execute one command against `backend`, printing results to stdout.
pub async fn run(command: Command, backend: &RestBackend) -> Result<(), StorefrontError> {
    match command {
        Command::Login { email, password } => {
            let uc = LoginUseCase {
                auth: backend.clone(),
                users: backend.clone(),
                customers: backend.clone(),
            };
            let session = uc.execute(LoginInput { email, password }).await?;
            println!("signed in as {} ({})", session.display_name(), session.role);
            println!("user id: {}", session.user.id);
            match &session.customer {
                Some(customer) => println!("customer id: {}", customer.id),
                None => println!("no customer profile"),
            }
        }
        Command::Profile { id } => {
            let uc = GetProfileUseCase {
                users: backend.clone(),
            };
            print_user(&uc.execute(id).await?);
        }
        Command::Catalog(args) => {
            let uc = LoadCatalogUseCase {
                products: backend.clone(),
                master: backend.clone(),
            };
            let catalog = uc.execute().await;
            let filter = CatalogFilter {
                text: args.text,
                category: args.category,
                brand: args.brand,
                gender: args.gender,
            };
            for product in catalog.filtered(&filter) {
                print_product(product);
            }
        }
        Command::Product(command) => run_product(command, backend).await?,
        Command::Cart(command) => run_cart(command, backend).await?,
        Command::Checkout(args) => run_checkout(args, backend).await?,
        Command::Orders(command) => run_orders(command, backend).await?,
        Command::Master(command) => run_master(command, backend).await?,
        Command::Users(command) => run_users(command, backend).await?,
        Command::Register(args) => {
            let uc = RegisterCustomerUseCase {
                customers: backend.clone(),
            };
            let customer = uc.execute(args.into()).await?;
            println!("registered customer {} ({})", customer.id, customer.full_name());
        }
    }
    Ok(())
}

async fn run_product(
    command: ProductCommand,
    backend: &RestBackend,
) -> Result<(), StorefrontError> {
    let products = backend.clone();
    match command {
        ProductCommand::Get { id } => {
            let product = GetProductUseCase { products }.execute(id).await?;
            print_product(&product);
            if let Some(description) = &product.description {
                println!("  {description}");
            }
        }
        ProductCommand::List => {
            let uc = ListProductsUseCase { products };
            for product in uc.execute().await? {
                print_product(&product);
            }
        }
        ProductCommand::Create(args) => {
            let product = CreateProductUseCase { products }
                .execute(args.into())
                .await?;
            println!("created product {}", product.id);
        }
        ProductCommand::Update { id, product: args } => {
            UpdateProductUseCase { products }
                .execute(id, args.into())
                .await?;
            println!("updated product {id}");
        }
        ProductCommand::Delete { id } => {
            DeleteProductUseCase { products }.execute(id).await?;
            println!("deleted product {id}");
        }
    }
    Ok(())
}

async fn run_cart(command: CartCommand, backend: &RestBackend) -> Result<(), StorefrontError> {
    let view = match command {
        CartCommand::Show { customer } => {
            LoadCartUseCase {
                cart: backend.clone(),
            }
            .execute(customer)
            .await?
        }
        CartCommand::Add {
            customer,
            product,
            quantity,
        } => {
            let uc = AddToCartUseCase {
                products: backend.clone(),
                cart: backend.clone(),
            };
            uc.execute(AddToCartInput {
                customer,
                product,
                quantity,
            })
            .await?
        }
        CartCommand::Remove { customer, line } => {
            RemoveCartLineUseCase {
                cart: backend.clone(),
            }
            .execute(line, customer)
            .await?
        }
    };
    print_cart(&view);
    Ok(())
}

async fn run_checkout(args: CheckoutArgs, backend: &RestBackend) -> Result<(), StorefrontError> {
    let cart = LoadCartUseCase {
        cart: backend.clone(),
    }
    .execute(args.customer)
    .await?;

    let uc = CheckoutUseCase::new(
        backend.clone(),
        backend.clone(),
        backend.clone(),
        backend.clone(),
    );
    let receipt = uc
        .execute(CheckoutInput {
            customer: args.customer,
            lines: cart.lines,
            ship_to: ShippingAddress {
                address: args.address,
                commune: args.commune,
                region: args.region,
            },
        })
        .await?;

    println!("order {} placed", receipt.order.id);
    println!("subtotal {}", format_price(receipt.totals.subtotal));
    println!("iva      {}", format_price(receipt.totals.tax));
    println!("total    {}", format_price(receipt.totals.total));
    for warning in &receipt.warnings {
        println!("warning: {} failed: {}", warning.step, warning.detail);
    }
    Ok(())
}

async fn run_orders(command: OrderCommand, backend: &RestBackend) -> Result<(), StorefrontError> {
    let orders = backend.clone();
    match command {
        OrderCommand::List { customer } => {
            let uc = ListOrdersUseCase { orders };
            for order in uc.execute(customer).await? {
                print_order(&order);
            }
        }
        OrderCommand::Show { id } => {
            let order = GetOrderUseCase { orders }.execute(id).await?;
            print_order(&order);
            println!(
                "  ship to {}, {}, {}",
                order.shipping_address, order.shipping_commune, order.shipping_region
            );
            if let Some(tracking) = &order.tracking_number {
                println!("  tracking {tracking}");
            }
        }
        OrderCommand::Lines { id } => {
            let uc = ListOrderLinesUseCase {
                order_lines: backend.clone(),
            };
            for line in uc.execute(id).await? {
                let name = line.product.as_ref().map_or("?", |p| p.name.as_str());
                println!(
                    "{:>4} x {name} @ {} = {}",
                    line.quantity,
                    format_price(line.unit_price),
                    format_price(line.subtotal)
                );
            }
        }
        OrderCommand::Status { id, status } => {
            let order = UpdateOrderStatusUseCase { orders }
                .execute(id, status)
                .await?;
            println!("order {} is now {}", order.id, order.status);
        }
    }
    Ok(())
}

async fn run_master(command: MasterCommand, backend: &RestBackend) -> Result<(), StorefrontError> {
    let master = backend.clone();
    match command {
        MasterCommand::List { kind } => {
            let data = LoadMasterDataUseCase { master }.execute().await;
            let show = |k: MasterDataKind| kind.is_none_or(|wanted| wanted == k);
            let mut records: Vec<MasterDataRecord> = Vec::new();
            if show(MasterDataKind::Brand) {
                records.extend(data.brands.into_iter().map(MasterDataRecord::Brand));
            }
            if show(MasterDataKind::Category) {
                records.extend(data.categories.into_iter().map(MasterDataRecord::Category));
            }
            if show(MasterDataKind::Gender) {
                records.extend(data.genders.into_iter().map(MasterDataRecord::Gender));
            }
            if show(MasterDataKind::ProductType) {
                records.extend(
                    data.product_types
                        .into_iter()
                        .map(MasterDataRecord::ProductType),
                );
            }
            for record in &records {
                println!("{:<13} {:>5}  {}", record.kind(), record.key(), record.name());
            }
        }
        MasterCommand::Create { kind, form } => {
            let uc = CreateMasterRecordUseCase { master };
            let form: MasterDataForm = form.into();
            let record = match kind {
                MasterDataKind::Brand => {
                    MasterDataRecord::Brand(uc.execute::<Brand>(&form).await?)
                }
                MasterDataKind::Category => {
                    MasterDataRecord::Category(uc.execute::<Category>(&form).await?)
                }
                MasterDataKind::Gender => {
                    MasterDataRecord::Gender(uc.execute::<Gender>(&form).await?)
                }
                MasterDataKind::ProductType => {
                    MasterDataRecord::ProductType(uc.execute::<ProductType>(&form).await?)
                }
            };
            println!("created {} {} ({})", record.kind(), record.key(), record.name());
        }
        MasterCommand::Update { kind, key, form } => {
            let uc = UpdateMasterRecordUseCase { master };
            let form: MasterDataForm = form.into();
            match kind {
                MasterDataKind::Brand => {
                    uc.execute::<Brand>(key, &form).await?;
                }
                MasterDataKind::Category => {
                    uc.execute::<Category>(key, &form).await?;
                }
                MasterDataKind::Gender => {
                    uc.execute::<Gender>(key, &form).await?;
                }
                MasterDataKind::ProductType => {
                    uc.execute::<ProductType>(key, &form).await?;
                }
            }
            println!("updated {kind} {key}");
        }
        MasterCommand::Delete { kind, key } => {
            DeleteMasterRecordUseCase { master }
                .execute(kind, key)
                .await?;
            println!("deleted {kind} {key}");
        }
    }
    Ok(())
}

async fn run_users(command: UserCommand, backend: &RestBackend) -> Result<(), StorefrontError> {
    let users = backend.clone();
    match command {
        UserCommand::List => {
            let directory = ListUsersUseCase { users }.execute().await?;
            for user in &directory.all {
                print_user(user);
            }
            if !directory.pending.is_empty() {
                println!();
                println!("awaiting approval:");
                for user in &directory.pending {
                    print_user(user);
                }
            }
        }
        UserCommand::Approve { id } => {
            let user = SetUserActiveUseCase { users }.approve(id).await?;
            println!("approved {}", user.email);
        }
        UserCommand::Deactivate { id } => {
            let user = SetUserActiveUseCase { users }.deactivate(id).await?;
            println!("deactivated {}", user.email);
        }
    }
    Ok(())
}

// ── Output ───────────────────────────────────────────────────────────────────

fn print_product(product: &Product) {
    let brand = product.brand.as_ref().map_or("", |b| b.name.as_str());
    println!(
        "{:>5}  {:<32} {:<16} {:>10}  stock {}",
        product.id,
        product.name,
        brand,
        format_price(product.price),
        product.stock
    );
}

fn print_cart(view: &CartView) {
    if view.is_empty() {
        println!("the cart is empty");
        return;
    }
    for line in &view.lines {
        let (name, price) = line
            .product
            .as_ref()
            .map_or(("?", Decimal::ZERO), |p| (p.name.as_str(), p.price));
        println!(
            "{:>5}  {:<32} {:>3} x {:>10}",
            line.id,
            name,
            line.quantity,
            format_price(price)
        );
    }
    println!("subtotal {}", format_price(view.totals.subtotal));
    println!("iva      {}", format_price(view.totals.tax));
    println!("total    {}", format_price(view.totals.total));
}

fn print_order(order: &Order) {
    println!(
        "{:>5}  {:<20} {:<10} {:>12}",
        order.id,
        order.ordered_at.as_deref().unwrap_or("-"),
        order.status,
        format_price(order.total)
    );
}

fn print_user(user: &User) {
    let roles: Vec<_> = user.roles.iter().map(|r| r.name.as_wire()).collect();
    println!(
        "{:>5}  {:<30} {:<24} {:<8} {}",
        user.id,
        user.email,
        format!("{} {}", user.name, user.surname).trim(),
        if user.active { "active" } else { "inactive" },
        roles.join(",")
    );
}
