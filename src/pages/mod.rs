//! Page objects: per-screen locator tables plus the operations
//! composed from the element interaction layer.

mod career;
mod login;

pub use career::{CareerPage, UserCarousel};
pub use login::LoginPage;

/// A copy of `list` in reverse order.
pub fn reversed(list: &[String]) -> Vec<String> {
    list.iter().rev().cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reversing_twice_round_trips() {
        let original = vec![
            "Designer".to_string(),
            "Engineer".to_string(),
            "Analyst".to_string(),
        ];

        let once = reversed(&original);
        assert_eq!(once, ["Analyst", "Engineer", "Designer"]);
        assert_eq!(reversed(&once), original);
    }

    #[test]
    fn reversing_empty_list_is_empty() {
        assert!(reversed(&[]).is_empty());
    }
}
