/// Similar to `info!` macro in tracing, but emitted inside the scope of a [`Logger`](crate::log::Logger).
/// You can pass in the starting time and it will also record how long it took from starting time to now.
/// ```ignore
/// info_time!(log, "str {}, {}", 1, 2);
/// let time = Local::now();
/// info_time!(log, time, "str {}, {}", 1, 2);
/// ```
#[macro_export]
macro_rules! info_time {
    ($log:expr, $strfm:literal $(, $arg:expr)* $(,)?) => {{
        $log.in_scope(|| ::tracing::info!($strfm $(, $arg)*));
    }};
    ($log:expr, $time:expr, $strfm:literal $(, $arg:expr)* $(,)?) => {{
        let run_time = (::chrono::Local::now() - $time)
            .num_microseconds()
            .map(|n| n as f64 / 1_000_000.0)
            .unwrap_or(0.0);
        $log.in_scope(|| ::tracing::info!(runtime_secs = run_time, $strfm $(, $arg)*));
    }};
}
