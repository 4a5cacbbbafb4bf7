use actix_files::Files;
use actix_web::{App, HttpServer, middleware, web};
use tera::Tera;

use pushkind_salon::db::establish_connection_pool;
use pushkind_salon::models::config::ServerConfig;
use pushkind_salon::repository::DieselRepository;
use pushkind_salon::routes::{catalog, main as pages, schedule, staff};
use pushkind_salon::uploads::UploadStore;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(err) = run().await {
        eprintln!("Startup error: {err}");
        std::process::exit(1);
    }
    Ok(())
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let server_config: ServerConfig = config::Config::builder()
        .add_source(config::File::with_name("config").required(false))
        .add_source(config::Environment::default())
        .build()?
        .try_deserialize()?;

    let pool = establish_connection_pool(&server_config.database_url)?;
    let repo = DieselRepository::new(pool);

    std::fs::create_dir_all(&server_config.uploads_dir)?;
    let uploads = UploadStore::new(&server_config.uploads_dir);

    let tera = Tera::new("templates/**/*.html")?;

    let bind_address = server_config.bind_address.clone();
    log::info!("Starting salon admin on http://{bind_address}");

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(repo.clone()))
            .app_data(web::Data::new(tera.clone()))
            .app_data(web::Data::new(uploads.clone()))
            .wrap(middleware::Logger::default())
            .service(Files::new("/uploads", &server_config.uploads_dir))
            .service(Files::new("/static", "./static").prefer_utf8(true))
            .service(pages::index)
            .service(pages::show_pricing)
            .service(staff::show_staff_list)
            .service(staff::create_staff)
            .service(staff::show_staff_detail)
            .service(staff::update_profile)
            .service(staff::set_services)
            .service(staff::upload_avatar)
            .service(staff::delete_avatar)
            .service(schedule::save_weekly_schedule)
            .service(schedule::add_time_off)
            .service(schedule::remove_time_off)
            .service(catalog::show_catalog)
            .service(catalog::add_node)
            .service(catalog::show_node)
            .service(catalog::update_node)
            .service(catalog::delete_node)
            .service(catalog::save_translation)
    })
    .bind(bind_address)?
    .run()
    .await?;

    Ok(())
}
