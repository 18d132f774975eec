//! In-process mock of the storefront REST backend.
//!
//! Serves the same paths as the real backend from an in-memory store, on an
//! ephemeral localhost port. Every request is recorded, and any
//! `(method, path)` pair can be made to fail with a 500 so tests can drive
//! the client's partial-failure paths.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use axum::extract::{Path, Request, State};
use axum::http::{Method, StatusCode};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get, post, put};
use axum::{Json, Router};
use serde_json::{Value, json};
use tokio::sync::oneshot;
use tower::ServiceBuilder;

use rincon_core::http::{REQUEST_ID_HEADER, propagate_request_id_layer, request_id_layer};
use rincon_domain::auth::{LoginRequest, LoginResponse};
use rincon_domain::cart::{CartLine, CartLineRequest};
use rincon_domain::customer::{Customer, CustomerRequest};
use rincon_domain::id::{
    CartLineId, CustomerId, OrderId, OrderLineId, ProductId, UserId,
};
use rincon_domain::master_data::{
    Brand, Category, Gender, MasterDataKind, MasterRecord, ProductType,
};
use rincon_domain::order::{Order, OrderLine, OrderLineRequest, OrderRequest};
use rincon_domain::product::{Product, ProductRequest};
use rincon_domain::user::User;

/// One request as seen by the mock, before any handler ran.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedRequest {
    pub method: Method,
    pub path: String,
    /// `x-request-id` sent by the client, if any.
    pub request_id: Option<String>,
}

impl RecordedRequest {
    pub fn is(&self, method: &Method, path: &str) -> bool {
        self.method == *method && self.path == path
    }
}

#[derive(Default)]
struct Store {
    last_id: i64,
    users: Vec<User>,
    customers: Vec<Customer>,
    products: Vec<Product>,
    master: HashMap<MasterDataKind, Vec<Value>>,
    cart: Vec<CartLine>,
    orders: Vec<Order>,
    order_lines: Vec<OrderLine>,
    /// `(method, path, successes)`: fail once the log holds that many matches.
    failures: Vec<(Method, String, usize)>,
    requests: Vec<RecordedRequest>,
}

impl Store {
    fn next_id(&mut self) -> i64 {
        self.last_id += 1;
        self.last_id
    }

    /// Keep generated keys clear of explicitly seeded ones.
    fn reserve(&mut self, id: i64) -> i64 {
        if id > 0 {
            self.last_id = self.last_id.max(id);
            id
        } else {
            self.next_id()
        }
    }

    fn master_record<T: MasterRecord>(&self, key: i64) -> Option<T> {
        let field = T::KIND.key_field();
        self.master
            .get(&T::KIND)?
            .iter()
            .find(|v| v[field] == key)
            .and_then(|v| serde_json::from_value(v.clone()).ok())
    }

    fn product(&self, id: ProductId) -> Option<Product> {
        self.products.iter().find(|p| p.id == id).cloned()
    }

    fn product_from_request(&self, id: ProductId, req: ProductRequest) -> Product {
        Product {
            id,
            name: req.name,
            description: req.description,
            price: req.price,
            volume_ml: req.volume_ml,
            brand: self.master_record::<Brand>(req.brand.id.0),
            category: self.master_record::<Category>(req.category.id.0),
            product_type: self.master_record::<ProductType>(req.product_type.id.0),
            gender: self.master_record::<Gender>(req.gender.id.0),
            aroma: req.aroma,
            olfactory_family: req.olfactory_family,
            image_url: req.image_url,
            stock: req.stock,
            active: req.active,
            created_at: None,
            updated_at: Some(now()),
        }
    }
}

type Shared = Arc<Mutex<Store>>;

fn lock(state: &Shared) -> MutexGuard<'_, Store> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

fn now() -> String {
    chrono::Utc::now().to_rfc3339()
}

/// A running mock backend. Shuts down when dropped.
pub struct MockBackend {
    addr: SocketAddr,
    state: Shared,
    shutdown: Option<oneshot::Sender<()>>,
}

impl MockBackend {
    /// Bind `127.0.0.1:0` and serve in a background task.
    pub async fn start() -> Self {
        let state = Shared::default();
        let app = router(state.clone());
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind mock backend");
        let addr = listener.local_addr().expect("mock backend address");
        let (tx, rx) = oneshot::channel::<()>();
        tokio::spawn(async move {
            let _ = axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    let _ = rx.await;
                })
                .await;
        });
        Self {
            addr,
            state,
            shutdown: Some(tx),
        }
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    // ── Failure injection ────────────────────────────────────────────────

    /// Answer `500` to every `method path` request from now on.
    pub fn fail(&self, method: Method, path: impl Into<String>) {
        self.fail_after(method, path, 0);
    }

    /// Let `successes` matching requests through, then answer `500`.
    /// Earlier matches are counted from the request log.
    pub fn fail_after(&self, method: Method, path: impl Into<String>, successes: usize) {
        lock(&self.state)
            .failures
            .push((method, path.into(), successes));
    }

    pub fn clear_failures(&self) {
        lock(&self.state).failures.clear();
    }

    // ── Request log ──────────────────────────────────────────────────────

    pub fn requests(&self) -> Vec<RecordedRequest> {
        lock(&self.state).requests.clone()
    }

    /// Requests other than `GET`, in arrival order.
    pub fn mutations(&self) -> Vec<RecordedRequest> {
        self.requests()
            .into_iter()
            .filter(|r| r.method != Method::GET)
            .collect()
    }

    pub fn clear_requests(&self) {
        lock(&self.state).requests.clear();
    }

    // ── Seeding ──────────────────────────────────────────────────────────

    /// Insert a user; a zero id is replaced by a generated one.
    pub fn seed_user(&self, mut user: User) -> User {
        let mut store = lock(&self.state);
        user.id = UserId(store.reserve(user.id.0));
        store.users.push(user.clone());
        user
    }

    pub fn seed_customer(&self, mut customer: Customer) -> Customer {
        let mut store = lock(&self.state);
        customer.id = CustomerId(store.reserve(customer.id.0));
        store.customers.push(customer.clone());
        customer
    }

    pub fn seed_product(&self, mut product: Product) -> Product {
        let mut store = lock(&self.state);
        product.id = ProductId(store.reserve(product.id.0));
        store.products.push(product.clone());
        product
    }

    /// Insert a master-data record of any kind; returns it with its key set.
    pub fn seed_master<T: MasterRecord>(&self, record: T) -> T {
        let mut store = lock(&self.state);
        let field = T::KIND.key_field();
        let mut value = serde_json::to_value(&record).expect("master record serializes");
        let key = store.reserve(value[field].as_i64().unwrap_or_default());
        value[field] = json!(key);
        store.master.entry(T::KIND).or_default().push(value.clone());
        serde_json::from_value(value).expect("master record round-trips")
    }

    pub fn seed_cart_line(&self, mut line: CartLine) -> CartLine {
        let mut store = lock(&self.state);
        line.id = CartLineId(store.reserve(line.id.0));
        store.cart.push(line.clone());
        line
    }

    pub fn seed_order(&self, mut order: Order) -> Order {
        let mut store = lock(&self.state);
        order.id = OrderId(store.reserve(order.id.0));
        store.orders.push(order.clone());
        order
    }

    pub fn seed_order_line(&self, mut line: OrderLine) -> OrderLine {
        let mut store = lock(&self.state);
        line.id = OrderLineId(store.reserve(line.id.0));
        store.order_lines.push(line.clone());
        line
    }

    // ── Inspection ───────────────────────────────────────────────────────

    pub fn users(&self) -> Vec<User> {
        lock(&self.state).users.clone()
    }

    pub fn customers(&self) -> Vec<Customer> {
        lock(&self.state).customers.clone()
    }

    pub fn products(&self) -> Vec<Product> {
        lock(&self.state).products.clone()
    }

    pub fn product(&self, id: ProductId) -> Option<Product> {
        lock(&self.state).product(id)
    }

    pub fn master(&self, kind: MasterDataKind) -> Vec<Value> {
        lock(&self.state)
            .master
            .get(&kind)
            .cloned()
            .unwrap_or_default()
    }

    pub fn cart_lines(&self, customer: CustomerId) -> Vec<CartLine> {
        lock(&self.state)
            .cart
            .iter()
            .filter(|l| l.customer.map(|c| c.id) == Some(customer))
            .cloned()
            .collect()
    }

    pub fn orders(&self) -> Vec<Order> {
        lock(&self.state).orders.clone()
    }

    pub fn order_lines(&self) -> Vec<OrderLine> {
        lock(&self.state).order_lines.clone()
    }
}

impl Drop for MockBackend {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
    }
}

// ── Router ───────────────────────────────────────────────────────────────────

fn router(state: Shared) -> Router {
    let mut app = Router::new()
        .route("/api/auth/login", post(login))
        .route("/api/usuarios", get(list_users))
        .route("/api/usuarios/{id}", put(update_user))
        .route("/usuarios", post(create_user))
        .route("/usuarios/{id}", get(get_user).delete(delete_user))
        .route("/api/clientes", get(list_customers).post(create_customer))
        .route("/api/clientes/{id}", get(get_customer).put(update_customer))
        .route("/api/productos", get(list_products).post(create_product))
        .route(
            "/api/productos/{id}",
            get(get_product).put(update_product).delete(delete_product),
        )
        .route("/api/carrito", post(add_cart_line))
        .route("/api/carrito/{id}", delete(delete_cart_line))
        .route("/api/carrito/cliente/{cliente_id}", get(list_cart))
        .route("/api/carrito/vaciar/{cliente_id}", delete(clear_cart))
        .route("/api/pedidos", post(create_order))
        .route("/api/pedidos/{id}", get(get_order).put(update_order))
        .route("/api/pedidos/cliente/{cliente_id}", get(list_orders))
        .route("/api/detalles-pedido", post(create_order_line))
        .route("/api/detalles-pedido/pedido/{pedido_id}", get(list_order_lines));
    for kind in MasterDataKind::ALL {
        app = app.merge(master_routes(kind));
    }

    app.with_state(state.clone())
        .layer(
            ServiceBuilder::new()
                .layer(request_id_layer())
                .layer(propagate_request_id_layer()),
        )
        .layer(middleware::from_fn_with_state(state, record_and_inject))
}

async fn record_and_inject(State(state): State<Shared>, req: Request, next: Next) -> Response {
    let method = req.method().clone();
    let path = req.uri().path().to_owned();
    let request_id = req
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned);
    let fail = {
        let mut store = lock(&state);
        let earlier = store.requests.iter().filter(|r| r.is(&method, &path)).count();
        store.requests.push(RecordedRequest {
            method: method.clone(),
            path: path.clone(),
            request_id,
        });
        store
            .failures
            .iter()
            .any(|(m, p, successes)| *m == method && *p == path && earlier >= *successes)
    };
    if fail {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": "injected failure" })),
        )
            .into_response();
    }
    next.run(req).await
}

// ── Auth ─────────────────────────────────────────────────────────────────────

async fn login(State(state): State<Shared>, Json(req): Json<LoginRequest>) -> Json<LoginResponse> {
    let store = lock(&state);
    let user = store
        .users
        .iter()
        .find(|u| u.email == req.email && u.password == req.password && u.active);
    let response = match user {
        Some(u) => LoginResponse {
            message: "Login exitoso".to_owned(),
            user_name: Some(u.name.clone()),
            authenticated: true,
            token: Some(format!("mock-token-{}", u.id)),
        },
        None => LoginResponse {
            message: "Credenciales inválidas".to_owned(),
            user_name: None,
            authenticated: false,
            token: None,
        },
    };
    Json(response)
}

// ── Users ────────────────────────────────────────────────────────────────────

async fn list_users(State(state): State<Shared>) -> Json<Vec<User>> {
    Json(lock(&state).users.clone())
}

async fn get_user(
    State(state): State<Shared>,
    Path(id): Path<i64>,
) -> Result<Json<User>, StatusCode> {
    lock(&state)
        .users
        .iter()
        .find(|u| u.id.0 == id)
        .cloned()
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

async fn create_user(
    State(state): State<Shared>,
    Json(mut user): Json<User>,
) -> (StatusCode, Json<User>) {
    let mut store = lock(&state);
    user.id = UserId(store.next_id());
    store.users.push(user.clone());
    (StatusCode::CREATED, Json(user))
}

async fn update_user(
    State(state): State<Shared>,
    Path(id): Path<i64>,
    Json(mut user): Json<User>,
) -> Result<Json<User>, StatusCode> {
    let mut store = lock(&state);
    let slot = store
        .users
        .iter_mut()
        .find(|u| u.id.0 == id)
        .ok_or(StatusCode::NOT_FOUND)?;
    user.id = UserId(id);
    *slot = user.clone();
    Ok(Json(user))
}

async fn delete_user(State(state): State<Shared>, Path(id): Path<i64>) -> StatusCode {
    let mut store = lock(&state);
    let before = store.users.len();
    store.users.retain(|u| u.id.0 != id);
    if store.users.len() < before {
        StatusCode::NO_CONTENT
    } else {
        StatusCode::NOT_FOUND
    }
}

// ── Customers ────────────────────────────────────────────────────────────────

fn customer_from_request(id: CustomerId, user: User, req: CustomerRequest) -> Customer {
    Customer {
        id,
        user: Some(user),
        rut: req.rut,
        first_name: req.first_name,
        second_name: req.second_name,
        first_surname: req.first_surname,
        second_surname: req.second_surname,
        birth_date: req.birth_date,
        address: req.address,
        commune: req.commune,
        region: req.region,
        phone: req.phone,
        created_at: Some(now()),
    }
}

async fn list_customers(State(state): State<Shared>) -> Json<Vec<Customer>> {
    Json(lock(&state).customers.clone())
}

async fn get_customer(
    State(state): State<Shared>,
    Path(id): Path<i64>,
) -> Result<Json<Customer>, StatusCode> {
    lock(&state)
        .customers
        .iter()
        .find(|c| c.id.0 == id)
        .cloned()
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

async fn create_customer(
    State(state): State<Shared>,
    Json(req): Json<CustomerRequest>,
) -> Result<(StatusCode, Json<Customer>), StatusCode> {
    let mut store = lock(&state);
    if store.customers.iter().any(|c| c.rut == req.rut)
        || store.users.iter().any(|u| u.email == req.user.email)
    {
        return Err(StatusCode::CONFLICT);
    }
    let mut user = req.user.clone();
    user.id = UserId(store.next_id());
    store.users.push(user.clone());
    let id = CustomerId(store.next_id());
    let customer = customer_from_request(id, user, req);
    store.customers.push(customer.clone());
    Ok((StatusCode::CREATED, Json(customer)))
}

async fn update_customer(
    State(state): State<Shared>,
    Path(id): Path<i64>,
    Json(req): Json<CustomerRequest>,
) -> Result<Json<Customer>, StatusCode> {
    let mut store = lock(&state);
    let slot = store
        .customers
        .iter_mut()
        .find(|c| c.id.0 == id)
        .ok_or(StatusCode::NOT_FOUND)?;
    let created_at = slot.created_at.clone();
    let mut customer = customer_from_request(CustomerId(id), req.user.clone(), req);
    customer.created_at = created_at;
    *slot = customer.clone();
    Ok(Json(customer))
}

// ── Products ─────────────────────────────────────────────────────────────────

async fn list_products(State(state): State<Shared>) -> Json<Vec<Product>> {
    Json(lock(&state).products.clone())
}

async fn get_product(
    State(state): State<Shared>,
    Path(id): Path<i64>,
) -> Result<Json<Product>, StatusCode> {
    lock(&state)
        .product(ProductId(id))
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

async fn create_product(
    State(state): State<Shared>,
    Json(req): Json<ProductRequest>,
) -> (StatusCode, Json<Product>) {
    let mut store = lock(&state);
    let id = ProductId(store.next_id());
    let mut product = store.product_from_request(id, req);
    product.created_at = product.updated_at.clone();
    store.products.push(product.clone());
    (StatusCode::CREATED, Json(product))
}

async fn update_product(
    State(state): State<Shared>,
    Path(id): Path<i64>,
    Json(req): Json<ProductRequest>,
) -> Result<Json<Product>, StatusCode> {
    let mut store = lock(&state);
    let id = ProductId(id);
    let created_at = store
        .product(id)
        .ok_or(StatusCode::NOT_FOUND)?
        .created_at;
    let mut product = store.product_from_request(id, req);
    product.created_at = created_at;
    if let Some(slot) = store.products.iter_mut().find(|p| p.id == id) {
        *slot = product.clone();
    }
    Ok(Json(product))
}

async fn delete_product(State(state): State<Shared>, Path(id): Path<i64>) -> StatusCode {
    let mut store = lock(&state);
    let before = store.products.len();
    store.products.retain(|p| p.id.0 != id);
    if store.products.len() < before {
        StatusCode::NO_CONTENT
    } else {
        StatusCode::NOT_FOUND
    }
}

// ── Master data ──────────────────────────────────────────────────────────────

fn master_routes(kind: MasterDataKind) -> Router<Shared> {
    let base = format!("/api/{}", kind.segment());
    Router::new()
        .route(
            &base,
            get(move |State(state): State<Shared>| async move {
                Json(lock(&state).master.get(&kind).cloned().unwrap_or_default())
            })
            .post(
                move |State(state): State<Shared>, Json(body): Json<Value>| async move {
                    create_master(&state, kind, body)
                },
            ),
        )
        .route(
            &format!("{base}/{{id}}"),
            get(move |State(state): State<Shared>, Path(id): Path<i64>| async move {
                get_master(&state, kind, id)
            })
            .put(
                move |State(state): State<Shared>,
                      Path(id): Path<i64>,
                      Json(body): Json<Value>| async move {
                    update_master(&state, kind, id, body)
                },
            )
            .delete(
                move |State(state): State<Shared>, Path(id): Path<i64>| async move {
                    delete_master(&state, kind, id)
                },
            ),
        )
}

fn get_master(state: &Shared, kind: MasterDataKind, id: i64) -> Result<Json<Value>, StatusCode> {
    let field = kind.key_field();
    lock(state)
        .master
        .get(&kind)
        .and_then(|rows| rows.iter().find(|v| v[field] == id).cloned())
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

fn create_master(
    state: &Shared,
    kind: MasterDataKind,
    mut body: Value,
) -> Result<(StatusCode, Json<Value>), StatusCode> {
    if !body.is_object() {
        return Err(StatusCode::BAD_REQUEST);
    }
    let mut store = lock(state);
    body[kind.key_field()] = json!(store.next_id());
    store.master.entry(kind).or_default().push(body.clone());
    Ok((StatusCode::CREATED, Json(body)))
}

fn update_master(
    state: &Shared,
    kind: MasterDataKind,
    id: i64,
    mut body: Value,
) -> Result<Json<Value>, StatusCode> {
    if !body.is_object() {
        return Err(StatusCode::BAD_REQUEST);
    }
    let field = kind.key_field();
    let mut store = lock(state);
    let slot = store
        .master
        .get_mut(&kind)
        .and_then(|rows| rows.iter_mut().find(|v| v[field] == id))
        .ok_or(StatusCode::NOT_FOUND)?;
    body[field] = json!(id);
    *slot = body.clone();
    Ok(Json(body))
}

fn delete_master(state: &Shared, kind: MasterDataKind, id: i64) -> StatusCode {
    let field = kind.key_field();
    let mut store = lock(state);
    let Some(rows) = store.master.get_mut(&kind) else {
        return StatusCode::NOT_FOUND;
    };
    let before = rows.len();
    rows.retain(|v| v[field] != id);
    if rows.len() < before {
        StatusCode::NO_CONTENT
    } else {
        StatusCode::NOT_FOUND
    }
}

// ── Cart ─────────────────────────────────────────────────────────────────────

async fn list_cart(
    State(state): State<Shared>,
    Path(cliente_id): Path<i64>,
) -> Json<Vec<CartLine>> {
    let store = lock(&state);
    let lines = store
        .cart
        .iter()
        .filter(|l| l.customer.map(|c| c.id.0) == Some(cliente_id))
        .map(|l| {
            // Lines are joined against the live product, like the real backend.
            let mut line = l.clone();
            if let Some(id) = line.product_id() {
                line.product = store.product(id).or(line.product);
            }
            line
        })
        .collect();
    Json(lines)
}

async fn add_cart_line(
    State(state): State<Shared>,
    Json(req): Json<CartLineRequest>,
) -> Result<(StatusCode, Json<CartLine>), StatusCode> {
    let mut store = lock(&state);
    let product = store.product(req.product.id).ok_or(StatusCode::NOT_FOUND)?;
    let line = CartLine {
        id: CartLineId(store.next_id()),
        customer: Some(req.customer),
        product: Some(product),
        quantity: req.quantity,
        added_at: Some(now()),
        active: true,
    };
    store.cart.push(line.clone());
    Ok((StatusCode::CREATED, Json(line)))
}

async fn delete_cart_line(State(state): State<Shared>, Path(id): Path<i64>) -> StatusCode {
    let mut store = lock(&state);
    let before = store.cart.len();
    store.cart.retain(|l| l.id.0 != id);
    if store.cart.len() < before {
        StatusCode::NO_CONTENT
    } else {
        StatusCode::NOT_FOUND
    }
}

async fn clear_cart(State(state): State<Shared>, Path(cliente_id): Path<i64>) -> StatusCode {
    lock(&state)
        .cart
        .retain(|l| l.customer.map(|c| c.id.0) != Some(cliente_id));
    StatusCode::NO_CONTENT
}

// ── Orders ───────────────────────────────────────────────────────────────────

fn apply_order_request(order: &mut Order, req: OrderRequest) {
    order.customer = Some(req.customer);
    order.subtotal = req.subtotal;
    order.discount = req.discount;
    order.tax = req.tax;
    order.total = req.total;
    order.status = req.status;
    order.shipping_address = req.shipping_address;
    order.shipping_commune = req.shipping_commune;
    order.shipping_region = req.shipping_region;
}

async fn list_orders(
    State(state): State<Shared>,
    Path(cliente_id): Path<i64>,
) -> Json<Vec<Order>> {
    Json(
        lock(&state)
            .orders
            .iter()
            .filter(|o| o.customer.map(|c| c.id.0) == Some(cliente_id))
            .cloned()
            .collect(),
    )
}

async fn get_order(
    State(state): State<Shared>,
    Path(id): Path<i64>,
) -> Result<Json<Order>, StatusCode> {
    lock(&state)
        .orders
        .iter()
        .find(|o| o.id.0 == id)
        .cloned()
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

async fn create_order(
    State(state): State<Shared>,
    Json(req): Json<OrderRequest>,
) -> (StatusCode, Json<Order>) {
    let mut store = lock(&state);
    let mut order = Order {
        id: OrderId(store.next_id()),
        ordered_at: Some(now()),
        ..Default::default()
    };
    apply_order_request(&mut order, req);
    store.orders.push(order.clone());
    (StatusCode::CREATED, Json(order))
}

async fn update_order(
    State(state): State<Shared>,
    Path(id): Path<i64>,
    Json(req): Json<OrderRequest>,
) -> Result<Json<Order>, StatusCode> {
    let mut store = lock(&state);
    let order = store
        .orders
        .iter_mut()
        .find(|o| o.id.0 == id)
        .ok_or(StatusCode::NOT_FOUND)?;
    apply_order_request(order, req);
    order.updated_at = Some(now());
    Ok(Json(order.clone()))
}

async fn list_order_lines(
    State(state): State<Shared>,
    Path(pedido_id): Path<i64>,
) -> Json<Vec<OrderLine>> {
    Json(
        lock(&state)
            .order_lines
            .iter()
            .filter(|l| l.order.map(|o| o.id.0) == Some(pedido_id))
            .cloned()
            .collect(),
    )
}

async fn create_order_line(
    State(state): State<Shared>,
    Json(req): Json<OrderLineRequest>,
) -> Result<(StatusCode, Json<OrderLine>), StatusCode> {
    let mut store = lock(&state);
    if !store.orders.iter().any(|o| o.id == req.order.id) {
        return Err(StatusCode::NOT_FOUND);
    }
    let line = OrderLine {
        id: OrderLineId(store.next_id()),
        order: Some(req.order),
        product: store.product(req.product.id),
        quantity: req.quantity,
        unit_price: req.unit_price,
        subtotal: req.subtotal,
        discount_applied: req.discount_applied,
    };
    store.order_lines.push(line.clone());
    Ok((StatusCode::CREATED, Json(line)))
}
