use actix_web::{HttpResponse, Responder, get, web};
use serde::Deserialize;
use tera::Tera;

use crate::domain::types::Locale;
use crate::repository::DieselRepository;
use crate::routes::{base_context, redirect, render_template};
use crate::services::pricing::show_pricing as show_pricing_service;

#[get("/")]
pub async fn index() -> impl Responder {
    redirect("/staff")
}

#[derive(Deserialize)]
pub struct PricingQuery {
    #[serde(default)]
    pub lang: Option<String>,
}

#[get("/pricing")]
pub async fn show_pricing(
    query: web::Query<PricingQuery>,
    repo: web::Data<DieselRepository>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let locale = query
        .lang
        .as_deref()
        .and_then(|lang| Locale::new(lang).ok());

    match show_pricing_service(locale, repo.get_ref()) {
        Ok(rows) => {
            let mut context = base_context("pricing", false, None);
            context.insert("rows", &rows);
            context.insert("lang", &query.lang);
            render_template(&tera, "pricing/index.html", &context)
        }
        Err(err) => {
            log::error!("Failed to render pricing page: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}
