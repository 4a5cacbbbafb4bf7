use actix_multipart::form::MultipartForm;
use actix_web::{HttpResponse, Responder, get, post, web};
use serde::Deserialize;
use tera::Tera;

use crate::domain::types::StaffId;
use crate::forms::staff::{
    AvatarUploadForm, CreateStaffForm, CreateStaffFormPayload, SaveIntent, UpdateProfileForm,
    UpdateProfileFormPayload, parse_intent, parse_service_selection,
};
use crate::repository::DieselRepository;
use crate::routes::{base_context, redirect, render_template};
use crate::services::ServiceError;
use crate::services::staff::{
    create_staff as create_staff_service, remove_avatar as remove_avatar_service,
    set_services as set_services_service, show_staff_detail as show_staff_detail_service,
    show_staff_list as show_staff_list_service, store_avatar as store_avatar_service,
    update_profile as update_profile_service,
};
use crate::uploads::{ALLOWED_AVATAR_TYPES, MAX_AVATAR_BYTES, UploadStore};

#[derive(Deserialize)]
pub struct DetailQuery {
    #[serde(default)]
    pub tab: Option<String>,
    #[serde(default)]
    pub saved: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

fn detail_url(staff_id: StaffId, tab: &str) -> String {
    format!("/staff/{staff_id}?tab={tab}&saved=1")
}

#[get("/staff")]
pub async fn show_staff_list(
    query: web::Query<DetailQuery>,
    repo: web::Data<DieselRepository>,
    tera: web::Data<Tera>,
) -> impl Responder {
    match show_staff_list_service(repo.get_ref()) {
        Ok(members) => {
            let mut context = base_context(
                "staff",
                query.saved.is_some(),
                query.error.as_deref(),
            );
            context.insert("members", &members);
            render_template(&tera, "staff/list.html", &context)
        }
        Err(err) => {
            log::error!("Failed to render staff list: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[post("/staff")]
pub async fn create_staff(
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<CreateStaffForm>,
) -> impl Responder {
    let payload: CreateStaffFormPayload = match form.try_into() {
        Ok(payload) => payload,
        Err(e) => {
            log::warn!("Rejected staff create form: {e}");
            return redirect("/staff?error=form");
        }
    };

    match create_staff_service(payload, repo.get_ref()) {
        Ok(staff_id) => redirect(&detail_url(staff_id, "profile")),
        Err(err) => {
            log::error!("Failed to create staff member: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[get("/staff/{staff_id}")]
pub async fn show_staff_detail(
    staff_id: web::Path<i32>,
    query: web::Query<DetailQuery>,
    repo: web::Data<DieselRepository>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let staff_id = match StaffId::new(staff_id.into_inner()) {
        Ok(id) => id,
        Err(_) => return HttpResponse::NotFound().finish(),
    };

    match show_staff_detail_service(staff_id, repo.get_ref()) {
        Ok(detail) => {
            let mut context = base_context(
                "staff",
                query.saved.is_some(),
                query.error.as_deref(),
            );
            context.insert("detail", &detail);
            context.insert("tab", query.tab.as_deref().unwrap_or("profile"));
            render_template(&tera, "staff/detail.html", &context)
        }
        Err(ServiceError::NotFound) => HttpResponse::NotFound().finish(),
        Err(err) => {
            log::error!("Failed to render staff detail: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[post("/staff/{staff_id}/profile")]
pub async fn update_profile(
    staff_id: web::Path<i32>,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<UpdateProfileForm>,
) -> impl Responder {
    let staff_id = match StaffId::new(staff_id.into_inner()) {
        Ok(id) => id,
        Err(_) => return HttpResponse::NotFound().finish(),
    };

    let payload: UpdateProfileFormPayload = match form.try_into() {
        Ok(payload) => payload,
        Err(e) => {
            log::warn!("Rejected profile form: {e}");
            return redirect(&format!("/staff/{staff_id}?tab=profile&error=form"));
        }
    };
    let intent = payload.intent;

    match update_profile_service(staff_id, payload.update, repo.get_ref()) {
        Ok(_) => match intent {
            SaveIntent::SaveAndClose => redirect("/staff?saved=1"),
            SaveIntent::Save => redirect(&detail_url(staff_id, "profile")),
        },
        Err(ServiceError::NotFound) => HttpResponse::NotFound().finish(),
        Err(err) => {
            log::error!("Failed to update staff profile: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[post("/staff/{staff_id}/services")]
pub async fn set_services(
    staff_id: web::Path<i32>,
    repo: web::Data<DieselRepository>,
    web::Form(pairs): web::Form<Vec<(String, String)>>,
) -> impl Responder {
    let staff_id = match StaffId::new(staff_id.into_inner()) {
        Ok(id) => id,
        Err(_) => return HttpResponse::NotFound().finish(),
    };

    let submitted = parse_service_selection(&pairs);
    let intent = parse_intent(&pairs);

    match set_services_service(staff_id, submitted, repo.get_ref()) {
        Ok(_) => match intent {
            SaveIntent::SaveAndClose => redirect("/staff?saved=1"),
            SaveIntent::Save => redirect(&detail_url(staff_id, "services")),
        },
        Err(ServiceError::NotFound) => HttpResponse::NotFound().finish(),
        Err(err) => {
            log::error!("Failed to set staff services: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[post("/staff/{staff_id}/avatar")]
pub async fn upload_avatar(
    staff_id: web::Path<i32>,
    repo: web::Data<DieselRepository>,
    uploads: web::Data<UploadStore>,
    MultipartForm(form): MultipartForm<AvatarUploadForm>,
) -> impl Responder {
    let staff_id = match StaffId::new(staff_id.into_inner()) {
        Ok(id) => id,
        Err(_) => return HttpResponse::NotFound().finish(),
    };
    let error_url = |code: &str| format!("/staff/{staff_id}?tab=profile&error={code}");

    // Type and size gates run before anything is placed under the uploads
    // root; a rejected upload leaves no partial write behind.
    let content_type = form
        .avatar
        .content_type
        .as_ref()
        .map(|m| m.essence_str().to_string())
        .unwrap_or_default();
    if !ALLOWED_AVATAR_TYPES.contains(&content_type.as_str()) {
        return redirect(&error_url("type"));
    }
    if form.avatar.size > MAX_AVATAR_BYTES {
        return redirect(&error_url("too_big"));
    }
    let Some(extension) = UploadStore::extension_for(&content_type) else {
        return redirect(&error_url("type"));
    };

    let public_url = match uploads.store_avatar(staff_id, form.avatar.file.path(), extension) {
        Ok(url) => url,
        Err(e) => {
            log::error!("Failed to store avatar upload: {e}");
            return redirect(&error_url("upload"));
        }
    };

    match store_avatar_service(staff_id, &public_url, repo.get_ref()) {
        Ok(previous) => {
            if let Some(previous) = previous {
                uploads.delete_by_public_url(&previous);
            }
            redirect(&detail_url(staff_id, "profile"))
        }
        Err(ServiceError::NotFound) => {
            uploads.delete_by_public_url(&public_url);
            HttpResponse::NotFound().finish()
        }
        Err(err) => {
            log::error!("Failed to record avatar: {err}");
            redirect(&error_url("upload"))
        }
    }
}

#[post("/staff/{staff_id}/avatar/delete")]
pub async fn delete_avatar(
    staff_id: web::Path<i32>,
    repo: web::Data<DieselRepository>,
    uploads: web::Data<UploadStore>,
) -> impl Responder {
    let staff_id = match StaffId::new(staff_id.into_inner()) {
        Ok(id) => id,
        Err(_) => return HttpResponse::NotFound().finish(),
    };

    match remove_avatar_service(staff_id, repo.get_ref()) {
        Ok(previous) => {
            if let Some(previous) = previous {
                uploads.delete_by_public_url(&previous);
            }
            redirect(&detail_url(staff_id, "profile"))
        }
        Err(ServiceError::NotFound) => HttpResponse::NotFound().finish(),
        Err(err) => {
            log::error!("Failed to remove avatar: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}
