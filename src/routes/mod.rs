use actix_web::HttpResponse;
use actix_web::http::header;
use tera::{Context, Tera};

pub mod catalog;
pub mod main;
pub mod schedule;
pub mod staff;

/// 303 redirect to `location`; every successful form post lands here.
pub fn redirect(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location))
        .finish()
}

pub fn render_template(tera: &Tera, template: &str, context: &Context) -> HttpResponse {
    HttpResponse::Ok().body(tera.render(template, context).unwrap_or_else(|e| {
        log::error!("Failed to render template '{template}': {e}");
        String::new()
    }))
}

/// Shared template context: current page marker plus the `saved`/`error`
/// query flags the redirect contract carries.
pub fn base_context(current_page: &str, saved: bool, error: Option<&str>) -> Context {
    let mut context = Context::new();
    context.insert("current_page", current_page);
    context.insert("saved", &saved);
    context.insert("error", &error);
    context
}
