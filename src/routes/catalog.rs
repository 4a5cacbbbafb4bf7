use actix_web::{HttpResponse, Responder, get, post, web};
use serde::Deserialize;
use tera::Tera;

use crate::domain::types::NodeId;
use crate::forms::catalog::{
    AddNodeForm, AddNodeFormPayload, TranslationForm, TranslationFormPayload, UpdateNodeForm,
    UpdateNodeFormPayload,
};
use crate::repository::DieselRepository;
use crate::routes::{base_context, redirect, render_template};
use crate::services::ServiceError;
use crate::services::catalog::{
    add_node as add_node_service, delete_node as delete_node_service,
    save_translation as save_translation_service, show_catalog as show_catalog_service,
    show_node as show_node_service, update_node as update_node_service,
};

#[derive(Deserialize)]
pub struct CatalogQuery {
    #[serde(default)]
    pub saved: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

#[get("/services")]
pub async fn show_catalog(
    query: web::Query<CatalogQuery>,
    repo: web::Data<DieselRepository>,
    tera: web::Data<Tera>,
) -> impl Responder {
    match show_catalog_service(repo.get_ref()) {
        Ok(rows) => {
            let mut context = base_context(
                "services",
                query.saved.is_some(),
                query.error.as_deref(),
            );
            context.insert("rows", &rows);
            render_template(&tera, "catalog/index.html", &context)
        }
        Err(err) => {
            log::error!("Failed to render catalog: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[post("/services")]
pub async fn add_node(
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<AddNodeForm>,
) -> impl Responder {
    let payload: AddNodeFormPayload = match form.try_into() {
        Ok(payload) => payload,
        Err(e) => {
            log::warn!("Rejected catalog node form: {e}");
            return redirect("/services?error=form");
        }
    };

    match add_node_service(payload, repo.get_ref()) {
        Ok(true) => redirect("/services?saved=1"),
        Ok(false) => redirect("/services?error=form"),
        Err(ServiceError::NotFound) => redirect("/services?error=form"),
        Err(err) => {
            log::error!("Failed to add catalog node: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[get("/services/{node_id}")]
pub async fn show_node(
    node_id: web::Path<i32>,
    query: web::Query<CatalogQuery>,
    repo: web::Data<DieselRepository>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let node_id = match NodeId::new(node_id.into_inner()) {
        Ok(id) => id,
        Err(_) => return HttpResponse::NotFound().finish(),
    };

    match show_node_service(node_id, repo.get_ref()) {
        Ok(node) => {
            let mut context = base_context(
                "services",
                query.saved.is_some(),
                query.error.as_deref(),
            );
            context.insert("node", &node);
            render_template(&tera, "catalog/node.html", &context)
        }
        Err(ServiceError::NotFound) => HttpResponse::NotFound().finish(),
        Err(err) => {
            log::error!("Failed to render catalog node: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[post("/services/{node_id}/update")]
pub async fn update_node(
    node_id: web::Path<i32>,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<UpdateNodeForm>,
) -> impl Responder {
    let node_id = match NodeId::new(node_id.into_inner()) {
        Ok(id) => id,
        Err(_) => return HttpResponse::NotFound().finish(),
    };

    let payload: UpdateNodeFormPayload = match form.try_into() {
        Ok(payload) => payload,
        Err(e) => {
            log::warn!("Rejected catalog node form: {e}");
            return redirect(&format!("/services/{node_id}?error=form"));
        }
    };

    match update_node_service(node_id, payload, repo.get_ref()) {
        Ok(true) => redirect(&format!("/services/{node_id}?saved=1")),
        Ok(false) => redirect(&format!("/services/{node_id}?error=form")),
        Err(ServiceError::NotFound) => HttpResponse::NotFound().finish(),
        Err(err) => {
            log::error!("Failed to update catalog node: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[post("/services/{node_id}/delete")]
pub async fn delete_node(
    node_id: web::Path<i32>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let node_id = match NodeId::new(node_id.into_inner()) {
        Ok(id) => id,
        Err(_) => return HttpResponse::NotFound().finish(),
    };

    match delete_node_service(node_id, repo.get_ref()) {
        Ok(true) => redirect("/services?saved=1"),
        Ok(false) => redirect("/services?error=form"),
        Err(ServiceError::NotFound) => HttpResponse::NotFound().finish(),
        Err(err) => {
            log::error!("Failed to delete catalog node: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[post("/services/{node_id}/translations")]
pub async fn save_translation(
    node_id: web::Path<i32>,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<TranslationForm>,
) -> impl Responder {
    let node_id = match NodeId::new(node_id.into_inner()) {
        Ok(id) => id,
        Err(_) => return HttpResponse::NotFound().finish(),
    };

    let payload: TranslationFormPayload = match form.try_into() {
        Ok(payload) => payload,
        Err(e) => {
            log::warn!("Rejected translation form: {e}");
            return redirect(&format!("/services/{node_id}?error=form"));
        }
    };

    match save_translation_service(node_id, payload, repo.get_ref()) {
        Ok(true) => redirect(&format!("/services/{node_id}?saved=1")),
        Ok(false) => redirect(&format!("/services/{node_id}?error=form")),
        Err(ServiceError::NotFound) => HttpResponse::NotFound().finish(),
        Err(err) => {
            log::error!("Failed to save translation: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}
