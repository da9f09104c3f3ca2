use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;

use actix_cors::Cors;
use actix_web::middleware::Logger;
use actix_web::{web, App, HttpServer};
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::PgConnection;
use log::info;

use beer_service::api;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv::dotenv().ok();
    env_logger::init();

    // Read the port on which to listen.
    let port = u16::from_str(&std::env::var("PORT").unwrap_or_else(|_| "1234".into()))
        .expect("Failed to parse $PORT!");

    // Read the IP address on which to listen.
    let ip = IpAddr::from_str(&std::env::var("LISTEN_IP").unwrap_or_else(|_| "127.0.0.1".into()))
        .expect("Failed to parse $LISTEN_IP");

    let listen_addr = SocketAddr::new(ip, port);

    // Create a connection pool to the database.
    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set!");
    let manager = ConnectionManager::<PgConnection>::new(database_url);
    let pool = Pool::builder()
        .build(manager)
        .expect("Failed to create database connection pool!");

    info!("Listening on {}", listen_addr);

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(pool.clone()))
            .wrap(Logger::default())
            .wrap(Cors::permissive())
            .configure(api::configure)
    })
    .bind(listen_addr)?
    .run()
    .await
}
