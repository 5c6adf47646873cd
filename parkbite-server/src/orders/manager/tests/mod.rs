use super::*;
use crate::db::repository::NotificationRepository;
use crate::payment::{PaymentError, PaymentReceipt, SimulatedGateway};
use shared::message::EventType;
use shared::models::{MenuItem, OrderItemInput, Restaurant, UserRole};
use shared::order::{OrderType, TransitionError};


/// 总是拒绝的网关
#[derive(Debug)]
struct DecliningGateway;

#[async_trait::async_trait]
impl PaymentGateway for DecliningGateway {
    async fn charge(&self, _request: &PaymentRequest) -> Result<PaymentReceipt, PaymentError> {
        Err(PaymentError::Declined)
    }
}

/// 记录扣款次数的网关
#[derive(Debug, Default)]
struct CountingGateway {
    charges: std::sync::atomic::AtomicUsize,
}

impl CountingGateway {
    fn charges(&self) -> usize {
        self.charges.load(std::sync::atomic::Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl PaymentGateway for CountingGateway {
    async fn charge(&self, request: &PaymentRequest) -> Result<PaymentReceipt, PaymentError> {
        self.charges.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        SimulatedGateway::new(0.0).charge(request).await
    }
}

struct Fixture {
    manager: OrdersManager,
    store: MemoryStore,
    bus: MessageBus,
}

impl Fixture {
    fn notifications_for(&self, user_id: &str) -> usize {
        self.store
            .tables()
            .notifications
            .iter()
            .filter(|n| n.user_id == user_id)
            .count()
    }

    async fn stored_status(&self, order_id: &str) -> OrderStatus {
        OrderRepository::new(self.store.clone())
            .find_by_id(order_id)
            .await
            .unwrap()
            .unwrap()
            .status
    }
}

async fn fixture_with(gateway: Arc<dyn PaymentGateway>) -> Fixture {
    let store = MemoryStore::new();
    let catalog = CatalogRepository::new(store.clone());
    let menu = MenuItemRepository::new(store.clone());

    for (id, manager_id, is_open) in [("r1", "mgr-1", true), ("r2", "mgr-2", true), ("r3", "mgr-3", false)] {
        catalog
            .insert_restaurant(Restaurant {
                id: id.to_string(),
                tech_park_id: "tp-1".to_string(),
                manager_id: manager_id.to_string(),
                name: format!("Restaurant {id}"),
                cuisine: "North Indian".to_string(),
                description: String::new(),
                image: None,
                rating: 4.2,
                delivery_time: "25-30 min".to_string(),
                is_open,
                is_veg: false,
            })
            .await
            .unwrap();
    }

    for (id, restaurant_id, name, price, is_available) in [
        ("m1", "r1", "Paneer Tikka", 120, true),
        ("m2", "r1", "Butter Naan", 25, true),
        ("m3", "r1", "Mutton Rogan Josh", 280, false),
        ("m4", "r2", "Masala Dosa", 60, true),
        ("m5", "r3", "Quinoa Bowl", 190, true),
    ] {
        menu.insert(MenuItem {
            id: id.to_string(),
            restaurant_id: restaurant_id.to_string(),
            category_id: "c1".to_string(),
            name: name.to_string(),
            description: String::new(),
            price,
            is_veg: true,
            is_available,
            image: None,
            created_at: 0,
            updated_at: 0,
        })
        .await
        .unwrap();
    }

    let bus = MessageBus::new();
    let notifications = NotificationService::new(store.clone(), bus.clone());
    let manager = OrdersManager::new(store.clone(), gateway, notifications, bus.clone(), 30);
    Fixture {
        manager,
        store,
        bus,
    }
}

async fn fixture() -> Fixture {
    fixture_with(Arc::new(SimulatedGateway::new(0.0))).await
}

fn employee(id: &str) -> CurrentUser {
    CurrentUser {
        id: id.to_string(),
        name: "Ananya".to_string(),
        email: format!("{id}@techcorp.in"),
        role: UserRole::Employee,
        restaurant_id: None,
    }
}

fn restaurant_manager(id: &str, restaurant_id: &str) -> CurrentUser {
    CurrentUser {
        id: id.to_string(),
        name: "Rahul".to_string(),
        email: format!("{id}@spiceroute.in"),
        role: UserRole::Manager,
        restaurant_id: Some(restaurant_id.to_string()),
    }
}

fn line(menu_item_id: &str, name: &str, price: i64, quantity: u32) -> OrderItemInput {
    OrderItemInput {
        menu_item_id: menu_item_id.to_string(),
        name: name.to_string(),
        quantity,
        price,
    }
}

/// [{120×1},{25×2}] delivery: 170 / 25 / 10 / 205
fn delivery_request(method: PaymentMethod) -> CreateOrderRequest {
    CreateOrderRequest {
        restaurant_id: "r1".to_string(),
        order_type: OrderType::Delivery,
        items: vec![line("m1", "Paneer Tikka", 120, 1), line("m2", "Butter Naan", 25, 2)],
        subtotal: 170,
        delivery_charge: 25,
        gst: 10,
        total: 205,
        payment_method: method,
        delivery_address: Some("Block B, 4th floor".to_string()),
        special_instructions: None,
    }
}

async fn place_order(f: &Fixture) -> Order {
    f.manager
        .create_order(&employee("emp-1"), delivery_request(PaymentMethod::Upi))
        .await
        .unwrap()
        .order
}

/// Advance a freshly placed order up to `target`
async fn advance_to(f: &Fixture, order_id: &str, target: OrderStatus) {
    let mgr = restaurant_manager("mgr-1", "r1");
    while f.stored_status(order_id).await != target {
        let estimate = (f.stored_status(order_id).await == OrderStatus::Placed)
            .then(|| "15-20 min".to_string());
        f.manager.advance(&mgr, order_id, estimate).await.unwrap();
    }
}
