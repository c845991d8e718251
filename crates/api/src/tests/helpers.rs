// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test helper functions and fixtures.

use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};

use grand_prix::{FormatCheckedPayment, PaymentConfirmation, PaymentFailure};
use grand_prix_domain::{PaymentDetails, PaymentMethod};
use tracing_subscriber::EnvFilter;

use crate::{
    AuthenticatedActor, CreateDiscountRequest, CreateEventRequest, LoginRequest, LoginResponse,
    PurchaseTicketsRequest, RegisterUserRequest, Session, SessionConfig, VenueConfig,
    create_discount, create_event, login, register_user,
};

pub const ADMIN_EMAIL: &str = "admin@silverstone.example";
pub const CUSTOMER_EMAIL: &str = "ada@example.com";
pub const OTHER_EMAIL: &str = "bob@example.com";
pub const TEST_PASSWORD: &str = "pitlane42";

/// The lowest work factor bcrypt accepts.
pub const TEST_HASH_COST: u32 = 4;

/// Counter for unique scratch directory names so tests stay isolated.
static DIR_COUNTER: AtomicU64 = AtomicU64::new(0);

/// A scratch data directory removed when dropped.
pub struct ScratchDir(pub PathBuf);

impl ScratchDir {
    pub fn create() -> Self {
        let id: u64 = DIR_COUNTER.fetch_add(1, Ordering::SeqCst);
        let path: PathBuf = std::env::temp_dir().join(format!(
            "grand_prix_api_test_{}_{id}",
            std::process::id()
        ));
        let _ = std::fs::remove_dir_all(&path);
        Self(path)
    }
}

impl Drop for ScratchDir {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.0);
    }
}

/// Routes handler logs to the test harness. Set `RUST_LOG` to see them.
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_test_writer()
        .try_init();
}

/// A 2x2 venue with capacity 4 and a cheap bcrypt cost.
pub fn create_test_config() -> SessionConfig {
    SessionConfig {
        password_hash_cost: TEST_HASH_COST,
        venue: VenueConfig {
            venue_id: 1,
            location: String::from("Test Circuit"),
            capacity: 4,
            rows: 2,
            seats_per_row: 2,
        },
        ..SessionConfig::default()
    }
}

pub fn create_test_session() -> Session {
    init_test_tracing();
    Session::in_memory(create_test_config()).unwrap()
}

pub fn create_register_request(name: &str, email: &str) -> RegisterUserRequest {
    RegisterUserRequest {
        name: name.to_string(),
        email: email.to_string(),
        password: TEST_PASSWORD.to_string(),
        admin_code: None,
    }
}

pub fn login_as(session: &mut Session, email: &str) -> LoginResponse {
    login(
        session,
        &LoginRequest {
            email: email.to_string(),
            password: TEST_PASSWORD.to_string(),
        },
    )
    .unwrap()
}

/// Registers a user and returns the actor for a fresh login.
pub fn register_and_login(
    session: &mut Session,
    name: &str,
    email: &str,
    admin_code: Option<&str>,
) -> AuthenticatedActor {
    let mut request: RegisterUserRequest = create_register_request(name, email);
    request.admin_code = admin_code.map(str::to_string);
    register_user(session, &request).unwrap();
    let response: LoginResponse = login_as(session, email);
    session.authenticate(&response.session_token).unwrap()
}

pub fn create_test_admin(session: &mut Session) -> AuthenticatedActor {
    register_and_login(session, "Track Admin", ADMIN_EMAIL, Some("ADMIN123"))
}

pub fn create_test_customer(session: &mut Session) -> AuthenticatedActor {
    register_and_login(session, "Ada", CUSTOMER_EMAIL, None)
}

/// A session with an admin, a customer, event 1 (base 200) and discount 1
/// (10%).
pub fn create_stocked_session() -> (Session, AuthenticatedActor, AuthenticatedActor) {
    let mut session: Session = create_test_session();
    let admin: AuthenticatedActor = create_test_admin(&mut session);
    let customer: AuthenticatedActor = create_test_customer(&mut session);
    create_event(
        &mut session,
        &admin,
        &CreateEventRequest {
            name: String::from("British Grand Prix"),
            date: String::from("2026-07-05"),
            base_price: 200.0,
        },
    )
    .unwrap();
    create_discount(
        &mut session,
        &admin,
        &CreateDiscountRequest {
            description: String::from("Early bird"),
            percentage: 0.1,
        },
    )
    .unwrap();
    (session, admin, customer)
}

pub fn create_purchase_request(seats: &[&str], variant: &str) -> PurchaseTicketsRequest {
    PurchaseTicketsRequest {
        seats: seats.iter().map(|seat| (*seat).to_string()).collect(),
        variant: variant.to_string(),
        group_size: None,
        event_id: 1,
        discount_id: None,
    }
}

pub fn wallet_payment() -> FormatCheckedPayment {
    FormatCheckedPayment::new(PaymentDetails {
        method: PaymentMethod::DigitalWallet,
        holder_name: String::from("Ada Lovelace"),
        card_number: None,
        expiry: None,
    })
}

pub fn card_payment(card_number: &str, expiry: &str) -> FormatCheckedPayment {
    FormatCheckedPayment::new(PaymentDetails {
        method: PaymentMethod::CreditDebit,
        holder_name: String::from("Ada Lovelace"),
        card_number: Some(card_number.to_string()),
        expiry: Some(expiry.to_string()),
    })
}

/// A payment step that always refuses.
pub struct DecliningPayment;

impl PaymentConfirmation for DecliningPayment {
    fn confirm(&mut self, _amount: f64) -> Result<PaymentMethod, PaymentFailure> {
        Err(PaymentFailure::Declined(String::from("insufficient funds")))
    }
}

pub fn assert_price(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}
