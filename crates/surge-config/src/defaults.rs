//! Default value functions for serde deserialization.
//!
//! These functions forward to constants defined in `surge_core::defaults`.

use surge_core::defaults;

/// Generate default value functions that forward to surge_core::defaults constants.
macro_rules! default_fns {
    ($($fn_name:ident => $const_name:ident : $ty:ty),* $(,)?) => {
        $(
            pub(crate) fn $fn_name() -> $ty {
                defaults::$const_name
            }
        )*
    };
}

/// Generate default value functions that return String from &str constants.
macro_rules! default_string_fns {
    ($($fn_name:ident => $const_name:ident),* $(,)?) => {
        $(
            pub(crate) fn $fn_name() -> String {
                defaults::$const_name.to_string()
            }
        )*
    };
}

default_fns! {
    default_max_connections      => DEFAULT_MAX_CONNECTIONS: u32,
    default_min_connections      => DEFAULT_MIN_CONNECTIONS: u32,
    default_connect_timeout_secs => DEFAULT_CONNECT_TIMEOUT_SECS: u64,
    default_init_schema          => DEFAULT_INIT_SCHEMA: bool,
    default_atomic_batches       => DEFAULT_ATOMIC_BATCHES: bool,
    default_shutdown_timeout_secs => DEFAULT_SHUTDOWN_TIMEOUT_SECS: u64,
}

default_string_fns! {
    default_listen       => DEFAULT_LISTEN,
    default_database_url => DEFAULT_DATABASE_URL,
}
