use std::collections::HashMap;

use actix_web::{HttpResponse, Responder, post, web};

use crate::domain::types::{StaffId, TimeOffId};
use crate::forms::schedule::{TimeOffForm, TimeOffPayload, WeeklySchedulePayload};
use crate::repository::DieselRepository;
use crate::routes::redirect;
use crate::services::ServiceError;
use crate::services::schedule::{
    add_time_off as add_time_off_service, remove_time_off as remove_time_off_service,
    save_weekly_schedule as save_weekly_schedule_service,
};

fn schedule_url(staff_id: StaffId, saved: bool) -> String {
    if saved {
        format!("/staff/{staff_id}?tab=schedule&saved=1")
    } else {
        format!("/staff/{staff_id}?tab=schedule")
    }
}

#[post("/staff/{staff_id}/schedule")]
pub async fn save_weekly_schedule(
    staff_id: web::Path<i32>,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<HashMap<String, String>>,
) -> impl Responder {
    let staff_id = match StaffId::new(staff_id.into_inner()) {
        Ok(id) => id,
        Err(_) => return HttpResponse::NotFound().finish(),
    };

    // Parsing never fails; malformed times degrade inside the payload.
    let payload = WeeklySchedulePayload::parse(&form);

    match save_weekly_schedule_service(staff_id, payload, repo.get_ref()) {
        Ok(_) => redirect(&schedule_url(staff_id, true)),
        Err(ServiceError::NotFound) => HttpResponse::NotFound().finish(),
        Err(err) => {
            log::error!("Failed to save weekly schedule: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[post("/staff/{staff_id}/time-off")]
pub async fn add_time_off(
    staff_id: web::Path<i32>,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<TimeOffForm>,
) -> impl Responder {
    let staff_id = match StaffId::new(staff_id.into_inner()) {
        Ok(id) => id,
        Err(_) => return HttpResponse::NotFound().finish(),
    };

    // An unparseable start date aborts the whole submission: redirect back
    // with nothing persisted and no error flag.
    let payload: TimeOffPayload = match form.try_into() {
        Ok(payload) => payload,
        Err(e) => {
            log::warn!("Rejected time off form: {e}");
            return redirect(&schedule_url(staff_id, false));
        }
    };

    match add_time_off_service(staff_id, payload, repo.get_ref()) {
        Ok(_) => redirect(&schedule_url(staff_id, true)),
        Err(ServiceError::NotFound) => HttpResponse::NotFound().finish(),
        Err(err) => {
            log::error!("Failed to add time off: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[post("/staff/{staff_id}/time-off/{time_off_id}/delete")]
pub async fn remove_time_off(
    path: web::Path<(i32, i32)>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let (staff_id, time_off_id) = path.into_inner();
    let (staff_id, time_off_id) = match (StaffId::new(staff_id), TimeOffId::new(time_off_id)) {
        (Ok(staff_id), Ok(time_off_id)) => (staff_id, time_off_id),
        _ => return HttpResponse::NotFound().finish(),
    };

    match remove_time_off_service(staff_id, time_off_id, repo.get_ref()) {
        Ok(_) => redirect(&schedule_url(staff_id, true)),
        Err(ServiceError::NotFound) => HttpResponse::NotFound().finish(),
        Err(err) => {
            log::error!("Failed to remove time off: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}
