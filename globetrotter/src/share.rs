//! Read-only links for sharing an itinerary.

/// `<base>/shared/<trip_id>`.
pub fn share_link(base_url: &str, trip_id: i64) -> String {
    format!("{}/shared/{}", base_url.trim_end_matches('/'), trip_id)
}

/// Accepts either a bare trip id or a share link and returns the trip id.
pub fn parse_share_target(target: &str) -> Option<i64> {
    let target = target.trim().trim_end_matches('/');
    if let Ok(id) = target.parse::<i64>() {
        return Some(id);
    }
    let (_, tail) = target.rsplit_once("/shared/")?;
    tail.split(['?', '#', '/']).next()?.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn link_round_trips_through_parser() {
        let link = share_link("https://trips.example.com/", 42);
        assert_eq!(link, "https://trips.example.com/shared/42");
        assert_eq!(parse_share_target(&link), Some(42));
    }

    #[test]
    fn parser_accepts_bare_ids_and_ignores_query() {
        assert_eq!(parse_share_target(" 17 "), Some(17));
        assert_eq!(
            parse_share_target("http://localhost:5173/shared/5?ref=mail"),
            Some(5)
        );
        assert_eq!(parse_share_target("http://localhost:5173/trips/5"), None);
        assert_eq!(parse_share_target("abc"), None);
    }
}
