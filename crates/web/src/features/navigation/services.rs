use storage::dto::navigation::NavigationCard;

/// Cards shown on the home screen.
pub fn home_menu() -> Vec<NavigationCard> {
    vec![
        NavigationCard::new(
            Some("map"),
            "Pitches",
            "Browse all registered pitches",
            "/pitches",
        ),
        NavigationCard::new(
            Some("add_location"),
            "Add a pitch",
            "Register a new pitch for your team",
            "/pitches/new",
        ),
        NavigationCard::new(
            Some("verified"),
            "Verified pitches",
            "Pitches confirmed by an administrator",
            "/pitches?isVerified=true",
        ),
        NavigationCard::new(
            Some("groups"),
            "My team",
            "Pitches linked to your team",
            "/team",
        ),
    ]
}
