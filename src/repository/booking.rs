use diesel::prelude::*;

use crate::domain::booking::NewBooking;
use crate::domain::types::NodeId;
use crate::models::booking::NewBooking as DbNewBooking;
use crate::repository::{BookingReader, BookingWriter, DieselRepository, RepositoryResult};

impl BookingReader for DieselRepository {
    fn count_bookings_for_node(&self, node_id: NodeId) -> RepositoryResult<i64> {
        use crate::schema::bookings;

        let mut conn = self.conn()?;

        let total = bookings::table
            .filter(bookings::node_id.eq(node_id.get()))
            .count()
            .get_result::<i64>(&mut conn)?;

        Ok(total)
    }
}

impl BookingWriter for DieselRepository {
    fn create_booking(&self, booking: &NewBooking) -> RepositoryResult<usize> {
        use crate::schema::bookings;

        let mut conn = self.conn()?;
        let db_booking: DbNewBooking = booking.clone().into();

        let affected = diesel::insert_into(bookings::table)
            .values(db_booking)
            .execute(&mut conn)?;

        Ok(affected)
    }
}
