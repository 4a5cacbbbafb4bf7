use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::{BookingId, NodeId, StaffId};

/// An appointment referencing a staff member and a service node.
///
/// Bookings are created by the public booking flow; the admin application
/// only counts them and removes them when a referenced node is deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Booking {
    pub id: BookingId,
    pub staff_id: StaffId,
    pub node_id: NodeId,
    pub starts_at: NaiveDateTime,
    pub customer_name: String,
    pub customer_phone: String,
    pub created_at: NaiveDateTime,
}

/// Data required to insert a new [`Booking`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewBooking {
    pub staff_id: StaffId,
    pub node_id: NodeId,
    pub starts_at: NaiveDateTime,
    pub customer_name: String,
    pub customer_phone: String,
}
