//! logger.rs
//! Logger del servicio sobre env_logger.

/// Arma el logger con las directivas dadas (sintaxis de `RUST_LOG`)
/// sin instalarlo.
pub fn build_logger(filter: &str) -> env_logger::Logger {
    env_logger::Builder::new()
        .parse_filters(filter)
        .format_timestamp_secs()
        .build()
}

pub fn init_logger(filter: &str) {
    let logger = build_logger(filter);
    let max_level = logger.filter();
    match log::set_boxed_logger(Box::new(logger)) {
        Ok(()) => log::set_max_level(max_level),
        Err(e) => eprintln!("(init_logger) Logger ya instalado: {}", e),
    }
}
