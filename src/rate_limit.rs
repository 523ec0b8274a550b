use crate::api::{ForgeClient, RateInfo};
use crate::types::or_null;
use chrono::{Local, TimeZone};

/// Query the remaining API quota. Returns None when the call fails.
pub fn fetch_rate_limit(client: &ForgeClient) -> Option<RateInfo> {
    match client.rate_limit() {
        Ok(response) => Some(response.rate.unwrap_or_default()),
        Err(e) => {
            tracing::warn!("could not fetch rate limit: {}", e);
            None
        }
    }
}

/// Unix timestamp as local time, e.g. `2024-05-01 14:03:00`
pub fn format_reset(reset: i64) -> Option<String> {
    Local
        .timestamp_opt(reset, 0)
        .single()
        .map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())
}

pub fn render_rate_limit(limit: &RateInfo) -> String {
    let reset = limit.reset.and_then(format_reset);
    format!(
        "API rate limit remaining: {}\nRate limit resets at: {}\n",
        or_null(&limit.remaining),
        or_null(&reset)
    )
}

/// Print the quota report. Goes to stderr when stdout carries JSON.
pub fn report(client: &ForgeClient, json: bool) {
    let Some(limit) = fetch_rate_limit(client) else {
        return;
    };
    let text = render_rate_limit(&limit);
    if json {
        eprint!("{}", text);
    } else {
        println!();
        print!("{}", text);
    }
}
