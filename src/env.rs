use ::std::sync::atomic::{AtomicBool, Ordering};
use ::std::sync::OnceLock;

static WRAP_TOP_LEVEL_OR_VAR: &str = "SEEK_ORDER_WRAP_TOP_LEVEL_OR";

pub fn pagination_max_count() -> &'static Option<u32> {
    static PAGINATION_MAX_COUNT: OnceLock<Option<u32>> = OnceLock::new();
    PAGINATION_MAX_COUNT.get_or_init(|| {
        let count = std::env::var("PAGINATION_MAX_COUNT").ok()?;
        match count.parse::<u32>() {
            Ok(count) => Some(count),
            Err(err) => {
                ::tracing::warn!(%count, %err, "ignoring PAGINATION_MAX_COUNT, it must be a semi-positive integer");
                None
            }
        }
    })
}

fn wrap_top_level_or_flag() -> &'static AtomicBool {
    static WRAP_TOP_LEVEL_OR: OnceLock<AtomicBool> = OnceLock::new();
    WRAP_TOP_LEVEL_OR.get_or_init(|| {
        let enabled = match std::env::var(WRAP_TOP_LEVEL_OR_VAR) {
            Ok(value) => value.parse::<bool>().unwrap_or_else(|err| {
                ::tracing::warn!(%value, %err, "ignoring {WRAP_TOP_LEVEL_OR_VAR}, expected `true` or `false`");
                true
            }),
            Err(_) => true,
        };
        AtomicBool::new(enabled)
    })
}

/// Whether built predicates repeat their leading condition in non-strict form
/// (`a <= ? AND (a < ? OR a = ? AND ...)`) so that planners can use an index
/// range scan. On unless disabled through `SEEK_ORDER_WRAP_TOP_LEVEL_OR` or
/// [`set_wrap_top_level_or`].
pub fn wrap_top_level_or() -> bool {
    wrap_top_level_or_flag().load(Ordering::Relaxed)
}

pub fn set_wrap_top_level_or(enabled: bool) {
    wrap_top_level_or_flag().store(enabled, Ordering::Relaxed);
}
