//! A small seeded catalog shared by the integration tests.
//!
//! Trending order (48h half-life): btc-100k, nba-finals, election-2026,
//! senate-race, q3-earnings.
//! Volume order: election-2026, btc-100k, nba-finals, senate-race,
//! q3-earnings.

use eventfeed::domain::event::{EventStatus, SportsSection};
use eventfeed::domain::locale::Locale;
use eventfeed::testkit::db::TempDb;
use eventfeed::testkit::fixture::{EventFixture, TagFixture};

pub const VISIBLE_ACTIVE: usize = 5;

pub fn seeded(name: &str) -> TempDb {
    let db = TempDb::create(name);
    seed(&db);
    db
}

pub fn seed(db: &TempDb) {
    db.insert_tag(
        TagFixture::new(1, "politics")
            .name("Politics")
            .main()
            .translation(Locale::De, "Politik"),
    );
    db.insert_tag(TagFixture::new(2, "crypto").name("Crypto").main());
    db.insert_tag(TagFixture::new(3, "sports").name("Sports").main());
    db.insert_tag(TagFixture::new(4, "earnings").name("Earnings"));
    db.insert_tag(TagFixture::new(5, "archived").name("Archived").main().hidden());

    db.insert_event(
        EventFixture::new("e1", "election-2026")
            .title("Election 2026")
            .translation(Locale::De, "Wahl 2026")
            .volume(100_000.0)
            .volume_24h(5_000.0)
            .created_hours_ago(60)
            .tag("politics")
            .market("0xa1", 0.40, 0.44),
    );
    db.insert_event(
        EventFixture::new("e2", "btc-100k")
            .title("Bitcoin above 100k")
            .volume(50_000.0)
            .volume_24h(8_000.0)
            .created_hours_ago(2)
            .recurrence("daily")
            .tag("crypto")
            .market("0xb1", 0.60, 0.62)
            .market("0xb2", 0.10, 0.12),
    );
    db.insert_event(
        EventFixture::new("e3", "nba-finals")
            .title("NBA Finals winner")
            .volume(30_000.0)
            .volume_24h(3_000.0)
            .created_hours_ago(10)
            .sports("nba", Some(SportsSection::Games))
            .tag("sports")
            .market("0xc1", 0.50, 0.52),
    );
    db.insert_event(
        EventFixture::new("e4", "q3-earnings")
            .title("Q3 earnings beat")
            .volume(1_000.0)
            .volume_24h(100.0)
            .created_hours_ago(1)
            .recurrence("weekly")
            .tag("earnings")
            .resolved_market("0xd1"),
    );
    db.insert_event(
        EventFixture::new("e5", "secret-event")
            .title("Secret election")
            .volume(999_999.0)
            .volume_24h(9_999.0)
            .hidden()
            .tag("politics")
            .market("0xf1", 0.20, 0.30),
    );
    db.insert_event(
        EventFixture::new("e6", "old-vote")
            .title("Old vote")
            .status(EventStatus::Resolved)
            .volume(70_000.0)
            .tag("politics")
            .resolved_market("0xa9"),
    );
    db.insert_event(
        EventFixture::new("e7", "senate-race")
            .title("Senate race")
            .volume(20_000.0)
            .volume_24h(1_000.0)
            .created_hours_ago(30)
            .tag("politics")
            .market("0xe1", 0.30, 0.35),
    );
}
