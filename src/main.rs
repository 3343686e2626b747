fn main() {
    #[cfg(not(target_arch = "wasm32"))]
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // Entry point - delegate to game core
    if let Err(e) = game_core::run() {
        log::error!("Game error: {}", e);
        std::process::exit(1);
    }
}
