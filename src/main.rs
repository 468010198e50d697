use std::net::{Ipv6Addr, SocketAddr};

use clap::Parser;
use fintech_api::{
    config::{Args, Credentials},
    db::Db,
    router,
};
use log::info;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt().with_thread_ids(true).init();

    let args = Args::parse();
    let credentials = Credentials::from_env();

    let db = match &args.db_path {
        Some(path) => Db::open(path),
        None => Db::open_in_memory(),
    };

    let app = router(db, credentials);

    info!("started on port {}", args.port);

    axum::Server::bind(&SocketAddr::from((Ipv6Addr::UNSPECIFIED, args.port)))
        .serve(app.into_make_service_with_connect_info::<SocketAddr>())
        .await
        .unwrap();
}
