use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::booking::{Booking as DomainBooking, NewBooking as DomainNewBooking};
use crate::domain::types::TypeConstraintError;

/// Diesel model representing the `bookings` table.
#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::bookings)]
pub struct Booking {
    pub id: i32,
    pub staff_id: i32,
    pub node_id: i32,
    pub starts_at: NaiveDateTime,
    pub customer_name: String,
    pub customer_phone: String,
    pub created_at: NaiveDateTime,
}

/// Insertable form of [`Booking`].
#[derive(Debug, Insertable)]
#[diesel(table_name = crate::schema::bookings)]
pub struct NewBooking {
    pub staff_id: i32,
    pub node_id: i32,
    pub starts_at: NaiveDateTime,
    pub customer_name: String,
    pub customer_phone: String,
}

impl TryFrom<Booking> for DomainBooking {
    type Error = TypeConstraintError;

    fn try_from(row: Booking) -> Result<Self, Self::Error> {
        Ok(Self {
            id: row.id.try_into()?,
            staff_id: row.staff_id.try_into()?,
            node_id: row.node_id.try_into()?,
            starts_at: row.starts_at,
            customer_name: row.customer_name,
            customer_phone: row.customer_phone,
            created_at: row.created_at,
        })
    }
}

impl From<DomainNewBooking> for NewBooking {
    fn from(booking: DomainNewBooking) -> Self {
        Self {
            staff_id: booking.staff_id.get(),
            node_id: booking.node_id.get(),
            starts_at: booking.starts_at,
            customer_name: booking.customer_name,
            customer_phone: booking.customer_phone,
        }
    }
}
