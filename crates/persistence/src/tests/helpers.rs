// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use grand_prix::{BookingState, FormatCheckedPayment, PurchaseRequest, purchase};
use grand_prix_domain::{
    Discount, Event, PaymentDetails, PaymentMethod, Role, SeatId, TicketVariantTag, User, Venue,
};
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};

/// Counter for unique scratch directory names so tests stay isolated.
static DIR_COUNTER: AtomicU64 = AtomicU64::new(0);

/// A scratch data directory removed when dropped.
pub struct ScratchDir(pub PathBuf);

impl ScratchDir {
    pub fn create() -> Self {
        let id: u64 = DIR_COUNTER.fetch_add(1, Ordering::SeqCst);
        let path: PathBuf = std::env::temp_dir().join(format!(
            "grand_prix_store_test_{}_{id}",
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

pub fn create_test_venue() -> Venue {
    Venue::new(1, "Silverstone Circuit", 6, 2, 3).unwrap()
}

/// A state with one event, one discount, one customer and one committed
/// two-seat purchase.
pub fn create_test_state() -> BookingState {
    let mut state: BookingState = BookingState::new(create_test_venue());
    state.events.push(
        Event::new(
            1,
            "British Grand Prix",
            grand_prix_domain::parse_event_date("2026-07-05").unwrap(),
            200.0,
        )
        .unwrap(),
    );
    state
        .discounts
        .push(Discount::new(1, "Early bird", 0.1).unwrap());
    state.users.push(User::new(
        1,
        "Ada",
        "ada@example.com",
        String::from("hash"),
        Role::Customer,
    ));

    let mut payment: FormatCheckedPayment = FormatCheckedPayment::new(PaymentDetails {
        method: PaymentMethod::DigitalWallet,
        holder_name: String::from("Ada"),
        card_number: None,
        expiry: None,
    });
    purchase(
        &mut state,
        PurchaseRequest {
            seats: vec![SeatId::new(1, 2), SeatId::new(2, 3)],
            variant: TicketVariantTag::Weekend,
            group_size: None,
            event_id: 1,
            user_id: 1,
            discount_id: Some(1),
        },
        &mut payment,
    )
    .unwrap();
    state
}
