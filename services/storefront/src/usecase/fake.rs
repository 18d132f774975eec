//! In-memory implementation of every port for use-case unit tests.
//!
//! Each call is logged as `"<port>.<op>"`; any op listed in `failing`
//! answers an HTTP 500 status error instead of touching the store. An op
//! listed in `failing_after` succeeds the given number of times first.

use std::sync::{Mutex, MutexGuard};

use serde_json::Value;

use rincon_domain::auth::{LoginRequest, LoginResponse};
use rincon_domain::cart::{CartLine, CartLineRequest};
use rincon_domain::customer::{Customer, CustomerRequest};
use rincon_domain::id::{CartLineId, CustomerId, OrderId, OrderLineId, ProductId, UserId};
use rincon_domain::master_data::{MasterDataKind, MasterRecord};
use rincon_domain::order::{Order, OrderLine, OrderLineRequest, OrderRequest};
use rincon_domain::product::{Product, ProductRequest};
use rincon_domain::user::User;

use crate::domain::repository::{
    AuthPort, CartRepository, CustomerRepository, MasterDataRepository, OrderLineRepository,
    OrderRepository, ProductRepository, UserRepository,
};
use crate::error::StorefrontError;

#[derive(Default)]
pub struct FakeState {
    pub last_id: i64,
    pub users: Vec<User>,
    pub customers: Vec<Customer>,
    pub products: Vec<Product>,
    pub master: Vec<(MasterDataKind, Value)>,
    pub cart: Vec<CartLine>,
    pub orders: Vec<Order>,
    pub order_lines: Vec<OrderLine>,
    pub calls: Vec<String>,
    pub failing: Vec<&'static str>,
    pub failing_after: Vec<(&'static str, usize)>,
    /// Product updates received, in order.
    pub product_updates: Vec<(ProductId, ProductRequest)>,
}

impl FakeState {
    fn next_id(&mut self) -> i64 {
        self.last_id += 1;
        self.last_id
    }
}

#[derive(Default)]
pub struct Fake {
    state: Mutex<FakeState>,
}

impl Fake {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(FakeState {
                last_id: 1000,
                ..Default::default()
            }),
        }
    }

    pub fn state(&self) -> MutexGuard<'_, FakeState> {
        self.state.lock().unwrap()
    }

    pub fn fail(&self, op: &'static str) {
        self.state().failing.push(op);
    }

    /// Lets `op` succeed `successes` times, then fails every later call.
    pub fn fail_after(&self, op: &'static str, successes: usize) {
        self.state().failing_after.push((op, successes));
    }

    pub fn calls(&self) -> Vec<String> {
        self.state().calls.clone()
    }

    /// Calls other than reads, in order.
    pub fn writes(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter(|c| !c.ends_with(".list") && !c.ends_with(".find") && !c.ends_with(".login"))
            .collect()
    }

    pub fn with_product(self, product: Product) -> Self {
        self.state().products.push(product);
        self
    }

    pub fn with_user(self, user: User) -> Self {
        self.state().users.push(user);
        self
    }

    pub fn with_cart_line(self, line: CartLine) -> Self {
        self.state().cart.push(line);
        self
    }

    pub fn with_order(self, order: Order) -> Self {
        self.state().orders.push(order);
        self
    }

    pub fn with_master<T: MasterRecord>(self, record: T) -> Self {
        let value = serde_json::to_value(record).unwrap();
        self.state().master.push((T::KIND, value));
        self
    }

    fn call(&self, op: &'static str) -> Result<MutexGuard<'_, FakeState>, StorefrontError> {
        let mut state = self.state();
        let earlier = state.calls.iter().filter(|c| c.as_str() == op).count();
        state.calls.push(op.to_owned());
        let exhausted = state
            .failing_after
            .iter()
            .any(|&(failing, successes)| failing == op && earlier >= successes);
        if exhausted || state.failing.contains(&op) {
            return Err(StorefrontError::Status {
                status: 500,
                path: op.to_owned(),
            });
        }
        Ok(state)
    }
}

impl AuthPort for &Fake {
    async fn login(&self, request: &LoginRequest) -> Result<LoginResponse, StorefrontError> {
        let state = self.call("auth.login")?;
        let ok = state
            .users
            .iter()
            .any(|u| u.email == request.email && u.password == request.password);
        Ok(LoginResponse {
            message: if ok { "ok" } else { "Credenciales inválidas" }.to_owned(),
            user_name: None,
            authenticated: ok,
            token: None,
        })
    }
}

impl UserRepository for &Fake {
    async fn list(&self) -> Result<Vec<User>, StorefrontError> {
        Ok(self.call("users.list")?.users.clone())
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, StorefrontError> {
        Ok(self
            .call("users.find")?
            .users
            .iter()
            .find(|u| u.id == id)
            .cloned())
    }

    async fn create(&self, user: &User) -> Result<User, StorefrontError> {
        let mut state = self.call("users.create")?;
        let mut user = user.clone();
        user.id = UserId(state.next_id());
        state.users.push(user.clone());
        Ok(user)
    }

    async fn update(&self, id: UserId, user: &User) -> Result<User, StorefrontError> {
        let mut state = self.call("users.update")?;
        let slot = state
            .users
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or(StorefrontError::UserNotFound)?;
        *slot = User {
            id,
            ..user.clone()
        };
        Ok(slot.clone())
    }

    async fn delete(&self, id: UserId) -> Result<(), StorefrontError> {
        self.call("users.delete")?.users.retain(|u| u.id != id);
        Ok(())
    }
}

impl CustomerRepository for &Fake {
    async fn list(&self) -> Result<Vec<Customer>, StorefrontError> {
        Ok(self.call("customers.list")?.customers.clone())
    }

    async fn find_by_id(&self, id: CustomerId) -> Result<Option<Customer>, StorefrontError> {
        Ok(self
            .call("customers.find")?
            .customers
            .iter()
            .find(|c| c.id == id)
            .cloned())
    }

    async fn create(&self, customer: &CustomerRequest) -> Result<Customer, StorefrontError> {
        let mut state = self.call("customers.create")?;
        let id = CustomerId(state.next_id());
        let created = Customer {
            id,
            user: Some(customer.user.clone()),
            rut: customer.rut.clone(),
            first_name: customer.first_name.clone(),
            second_name: customer.second_name.clone(),
            first_surname: customer.first_surname.clone(),
            second_surname: customer.second_surname.clone(),
            birth_date: customer.birth_date.clone(),
            address: customer.address.clone(),
            commune: customer.commune.clone(),
            region: customer.region.clone(),
            phone: customer.phone.clone(),
            created_at: None,
        };
        state.customers.push(created.clone());
        Ok(created)
    }

    async fn update(
        &self,
        _id: CustomerId,
        _customer: &CustomerRequest,
    ) -> Result<Customer, StorefrontError> {
        let _state = self.call("customers.update")?;
        Err(StorefrontError::CustomerNotFound)
    }
}

impl ProductRepository for &Fake {
    async fn list(&self) -> Result<Vec<Product>, StorefrontError> {
        Ok(self.call("products.list")?.products.clone())
    }

    async fn find_by_id(&self, id: ProductId) -> Result<Option<Product>, StorefrontError> {
        Ok(self
            .call("products.find")?
            .products
            .iter()
            .find(|p| p.id == id)
            .cloned())
    }

    async fn create(&self, product: &ProductRequest) -> Result<Product, StorefrontError> {
        let mut state = self.call("products.create")?;
        let created = Product {
            id: ProductId(state.next_id()),
            name: product.name.clone(),
            price: product.price,
            stock: product.stock,
            active: product.active,
            ..Default::default()
        };
        state.products.push(created.clone());
        Ok(created)
    }

    async fn update(
        &self,
        id: ProductId,
        product: &ProductRequest,
    ) -> Result<Product, StorefrontError> {
        let mut state = self.call("products.update")?;
        state.product_updates.push((id, product.clone()));
        let slot = state
            .products
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(StorefrontError::ProductNotFound)?;
        slot.name = product.name.clone();
        slot.price = product.price;
        slot.stock = product.stock;
        slot.active = product.active;
        Ok(slot.clone())
    }

    async fn delete(&self, id: ProductId) -> Result<(), StorefrontError> {
        self.call("products.delete")?
            .products
            .retain(|p| p.id != id);
        Ok(())
    }
}

impl MasterDataRepository for &Fake {
    async fn list<T: MasterRecord>(&self) -> Result<Vec<T>, StorefrontError> {
        let state = self.call("master.list")?;
        Ok(state
            .master
            .iter()
            .filter(|(kind, _)| *kind == T::KIND)
            .filter_map(|(_, v)| serde_json::from_value(v.clone()).ok())
            .collect())
    }

    async fn find<T: MasterRecord>(&self, key: i64) -> Result<Option<T>, StorefrontError> {
        let state = self.call("master.find")?;
        Ok(state
            .master
            .iter()
            .find(|(kind, v)| *kind == T::KIND && v[kind.key_field()] == key)
            .and_then(|(_, v)| serde_json::from_value(v.clone()).ok()))
    }

    async fn create<T: MasterRecord>(&self, body: &T::Request) -> Result<T, StorefrontError> {
        let mut state = self.call("master.create")?;
        let mut value = serde_json::to_value(body).unwrap();
        value[T::KIND.key_field()] = state.next_id().into();
        state.master.push((T::KIND, value.clone()));
        Ok(serde_json::from_value(value).unwrap())
    }

    async fn update<T: MasterRecord>(
        &self,
        key: i64,
        body: &T::Request,
    ) -> Result<T, StorefrontError> {
        let mut state = self.call("master.update")?;
        let field = T::KIND.key_field();
        let mut value = serde_json::to_value(body).unwrap();
        value[field] = key.into();
        let slot = state
            .master
            .iter_mut()
            .find(|(kind, v)| *kind == T::KIND && v[field] == key)
            .ok_or(StorefrontError::Status {
                status: 404,
                path: "master".into(),
            })?;
        slot.1 = value.clone();
        Ok(serde_json::from_value(value).unwrap())
    }

    async fn delete(&self, kind: MasterDataKind, key: i64) -> Result<(), StorefrontError> {
        self.call("master.delete")?
            .master
            .retain(|(k, v)| !(*k == kind && v[kind.key_field()] == key));
        Ok(())
    }
}

impl CartRepository for &Fake {
    async fn list(&self, customer: CustomerId) -> Result<Vec<CartLine>, StorefrontError> {
        let state = self.call("cart.list")?;
        Ok(state
            .cart
            .iter()
            .filter(|l| l.customer.map(|c| c.id) == Some(customer))
            .cloned()
            .collect())
    }

    async fn add(&self, line: &CartLineRequest) -> Result<CartLine, StorefrontError> {
        let mut state = self.call("cart.add")?;
        let product = state
            .products
            .iter()
            .find(|p| p.id == line.product.id)
            .cloned();
        let created = CartLine {
            id: CartLineId(state.next_id()),
            customer: Some(line.customer),
            product,
            quantity: line.quantity,
            added_at: None,
            active: true,
        };
        state.cart.push(created.clone());
        Ok(created)
    }

    async fn remove(&self, line: CartLineId) -> Result<(), StorefrontError> {
        self.call("cart.remove")?.cart.retain(|l| l.id != line);
        Ok(())
    }

    async fn clear(&self, customer: CustomerId) -> Result<(), StorefrontError> {
        self.call("cart.clear")?
            .cart
            .retain(|l| l.customer.map(|c| c.id) != Some(customer));
        Ok(())
    }
}

impl OrderRepository for &Fake {
    async fn list_by_customer(&self, customer: CustomerId) -> Result<Vec<Order>, StorefrontError> {
        let state = self.call("orders.list")?;
        Ok(state
            .orders
            .iter()
            .filter(|o| o.customer.map(|c| c.id) == Some(customer))
            .cloned()
            .collect())
    }

    async fn find_by_id(&self, id: OrderId) -> Result<Option<Order>, StorefrontError> {
        Ok(self
            .call("orders.find")?
            .orders
            .iter()
            .find(|o| o.id == id)
            .cloned())
    }

    async fn create(&self, order: &OrderRequest) -> Result<Order, StorefrontError> {
        let mut state = self.call("orders.create")?;
        let created = Order {
            id: OrderId(state.next_id()),
            customer: Some(order.customer),
            subtotal: order.subtotal,
            discount: order.discount,
            tax: order.tax,
            total: order.total,
            status: order.status,
            shipping_address: order.shipping_address.clone(),
            shipping_commune: order.shipping_commune.clone(),
            shipping_region: order.shipping_region.clone(),
            ..Default::default()
        };
        state.orders.push(created.clone());
        Ok(created)
    }

    async fn update(&self, id: OrderId, order: &OrderRequest) -> Result<Order, StorefrontError> {
        let mut state = self.call("orders.update")?;
        let slot = state
            .orders
            .iter_mut()
            .find(|o| o.id == id)
            .ok_or(StorefrontError::OrderNotFound)?;
        slot.status = order.status;
        slot.total = order.total;
        Ok(slot.clone())
    }
}

impl OrderLineRepository for &Fake {
    async fn list_by_order(&self, order: OrderId) -> Result<Vec<OrderLine>, StorefrontError> {
        let state = self.call("order_lines.list")?;
        Ok(state
            .order_lines
            .iter()
            .filter(|l| l.order.map(|o| o.id) == Some(order))
            .cloned()
            .collect())
    }

    async fn create(&self, line: &OrderLineRequest) -> Result<OrderLine, StorefrontError> {
        let mut state = self.call("order_lines.create")?;
        let created = OrderLine {
            id: OrderLineId(state.next_id()),
            order: Some(line.order),
            product: None,
            quantity: line.quantity,
            unit_price: line.unit_price,
            subtotal: line.subtotal,
            discount_applied: line.discount_applied,
        };
        state.order_lines.push(created.clone());
        Ok(created)
    }
}
