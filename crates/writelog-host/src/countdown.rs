//! Countdown before termination

use std::time::{Duration, Instant};
use writelog_core::COUNTDOWN_TICK_MS;

/// Replace `[seconds]` in `template` with `remaining`
pub fn countdown_text(template: &str, remaining: u32) -> String {
    template.replace("[seconds]", &remaining.to_string())
}

/// Call `render` with the whole seconds left until `seconds` have passed,
/// refreshing every tick. Returns once the deadline is reached.
pub fn run_countdown<F>(seconds: u32, mut render: F)
where
    F: FnMut(u32),
{
    let deadline = Instant::now() + Duration::from_secs(u64::from(seconds));
    let tick = Duration::from_millis(COUNTDOWN_TICK_MS);

    loop {
        let now = Instant::now();
        if now >= deadline {
            break;
        }
        let left = deadline - now;
        let remaining = left.as_secs() as u32 + u32::from(left.subsec_nanos() > 0);
        render(remaining);
        std::thread::sleep(tick.min(left));
    }
}
