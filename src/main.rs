//! # Search Server - Entry Point
//! src/main.rs
//!
//! Punto de entrada del servidor: configura logging, carga los índices y
//! corre el loop de aceptación hasta que termina.

use std::sync::Arc;

use anyhow::Context;
use tracing::info;

use search_server::config::Config;
use search_server::error::ServerError;
use search_server::files::FileReader;
use search_server::router::RequestRouter;
use search_server::search::IndexSet;
use search_server::server::Server;

fn main() -> anyhow::Result<()> {
    // Crear configuración (CLI + env)
    let config = Config::new();
    config.validate().map_err(ServerError::Config)?;

    tracing_subscriber::fmt()
        .with_max_level(config.log_level)
        .with_target(false)
        .init();

    config.print_summary();

    let index = IndexSet::load(&config.index_files).context("cargando índices")?;
    info!(indices = index.len(), "Índices listos");

    let router = RequestRouter::new(
        config.static_dir.clone(),
        Arc::new(FileReader),
        Arc::new(index),
    );

    // Crear el servidor
    let mut server = Server::new(config, router);
    let addr = server.bind().context("abriendo el socket de escucha")?;
    info!(addr = %addr, "Servidor listo");

    // Iniciar el servidor (esto bloqueará el thread)
    server.run().context("loop de aceptación")?;

    info!("Servidor detenido");
    Ok(())
}
