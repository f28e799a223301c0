pub mod cmd;
pub mod util;

/// `RUST_LOG` wins when set; otherwise each `-v` raises the level one step from `warn`.
pub fn init_logger(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();
}
