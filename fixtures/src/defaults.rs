//! Baseline fixture data restored by every reset

/// Email of the administrator seeded by [`crate::FixtureStore::reset`]
pub const ADMIN_EMAIL: &str = "admin@test.example.com";
pub const ADMIN_FIRST_NAME: &str = "Test";
pub const ADMIN_LAST_NAME: &str = "Admin";

/// One-time login code the server accepts in test mode
pub const OTP_CODE: &str = "000000";

pub const MEMBER_NUMBER_PREFIX: &str = "YSH";

/// Fixture tables in deletion order: rows referencing `members` go first
pub const RESET_ORDER: [&str; 8] = [
    "membership_cards",
    "emails_log",
    "payments",
    "members",
    "announcements",
    "gallery_images",
    "bios",
    "site_settings",
];

/// Site settings written by `seed_settings`, keyed by setting name
pub const DEFAULT_SETTINGS: [(&str, &str); 10] = [
    ("hero_title", "Yellowstone Sea Hawkers"),
    (
        "hero_subtitle",
        "Join your fellow Seahawks fans at the Red Door Lounge in Billings for our watch party! Enjoy the game day specials on food and drink, and lots of fun!",
    ),
    ("hero_button_text", "Red Door Lounge \u{2014} 3875 Grand Ave, Billings, MT"),
    ("hero_button_url", "https://maps.app.goo.gl/rSenva2n2pinhLRL7"),
    (
        "about_quote",
        "Yellowstone Sea Hawkers are the most passionate, hardcore, devoted, cheer-crazy, raisin' the roof, no-life-during-football-season-havin' fans on earth.",
    ),
    (
        "about_text",
        "Our primary purpose is to have fun while supporting the Seahawks football team, their coaches, staff, our local charities, and organizations in the city of Billings and its surrounding communities.",
    ),
    (
        "gallery_album_url",
        "https://1drv.ms/a/c/10fffe404656475d/EqrBFR6ebKtMhwnrQj-bm6wBRoAUuX5GI4Rp3EdNVW5kIw?e=l1rltU",
    ),
    ("dues_amount_cents", "2500"),
    ("contact_email", "info@yellowstoneseahawkers.com"),
    ("stripe_publishable_key", ""),
];

/// Member number for the `sequence`-th member of `year`, e.g. `YSH-2026-0002`
pub fn member_number(year: i32, sequence: i64) -> String {
    format!("{MEMBER_NUMBER_PREFIX}-{year}-{sequence:04}")
}

/// Placeholder address for members seeded without an email
pub fn placeholder_email(suffix: u32) -> String {
    format!("test{suffix}@example.com")
}
