// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{BookingState, PaymentConfirmation, PaymentFailure, PurchaseRequest};
use grand_prix_domain::{
    Discount, Event, PaymentMethod, Role, SeatId, TicketVariantTag, User, Venue,
};
use time::macros::date;

pub const TEST_USER_ID: u32 = 1;
pub const OTHER_USER_ID: u32 = 2;
pub const TEST_EVENT_ID: u32 = 1;
pub const TEST_DISCOUNT_ID: u32 = 1;

/// A 2x2 grid with capacity 4, one race at base 200, two customers and a
/// 10% discount.
pub fn create_test_state() -> BookingState {
    let venue: Venue = Venue::new(1, "Silverstone Circuit", 4, 2, 2).unwrap();
    let mut state: BookingState = BookingState::new(venue);
    state.events.push(
        Event::new(TEST_EVENT_ID, "British Grand Prix", date!(2026 - 07 - 05), 200.0).unwrap(),
    );
    state.users.push(User::new(
        TEST_USER_ID,
        "Ada",
        "ada@example.com",
        String::from("hash"),
        Role::Customer,
    ));
    state.users.push(User::new(
        OTHER_USER_ID,
        "Bob",
        "bob@example.com",
        String::from("hash"),
        Role::Customer,
    ));
    state
        .discounts
        .push(Discount::new(TEST_DISCOUNT_ID, "Early bird", 0.1).unwrap());
    state
}

pub fn create_test_request(seats: &[SeatId], variant: TicketVariantTag) -> PurchaseRequest {
    PurchaseRequest {
        seats: seats.to_vec(),
        variant,
        group_size: None,
        event_id: TEST_EVENT_ID,
        user_id: TEST_USER_ID,
        discount_id: None,
    }
}

pub fn seat(row: u16, number: u16) -> SeatId {
    SeatId::new(row, number)
}

pub fn free_seats(state: &BookingState) -> Vec<SeatId> {
    state
        .venue
        .available_seats()
        .iter()
        .map(|seat| seat.id())
        .collect()
}

/// Confirms every charge and remembers the amounts it saw.
#[derive(Debug, Default)]
pub struct ApprovingPayment {
    pub charged: Vec<f64>,
}

impl PaymentConfirmation for ApprovingPayment {
    fn confirm(&mut self, amount: f64) -> Result<PaymentMethod, PaymentFailure> {
        self.charged.push(amount);
        Ok(PaymentMethod::DigitalWallet)
    }
}

/// Fails every charge the same way.
pub struct FailingPayment(pub PaymentFailure);

impl PaymentConfirmation for FailingPayment {
    fn confirm(&mut self, _amount: f64) -> Result<PaymentMethod, PaymentFailure> {
        Err(self.0.clone())
    }
}
