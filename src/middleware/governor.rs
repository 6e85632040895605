use rocket_governor::{Method, Quota, RocketGovernable};

/// Per-client quota for the admin routes that hit the upstream API.
pub struct RateLimitGuard;

impl<'r> RocketGovernable<'r> for RateLimitGuard {
    fn quota(_method: Method, _route_name: &str) -> Quota {
        Quota::per_minute(Self::nonzero(30u32))
    }
}
