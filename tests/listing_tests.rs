mod support;

use eventfeed::application::listing::LIST_EVENTS_FAILED;
use eventfeed::domain::criteria::{Frequency, ListCriteria};
use eventfeed::domain::event::{EventStatus, SportsSection};
use eventfeed::domain::id::UserId;
use eventfeed::domain::locale::Locale;
use eventfeed::error::Error;
use eventfeed::testkit::db::TempDb;
use eventfeed::testkit::fixture::EventFixture;
use rust_decimal_macros::dec;

use support::catalog::{seeded, VISIBLE_ACTIVE};
use support::slugs;

#[tokio::test]
async fn trending_ranks_by_decayed_daily_volume() {
    let db = seeded("trending");
    let ctx = db.context();

    let result = ctx.listing.list_events(&ListCriteria::default()).await;

    let events = result.data.expect("listing succeeds");
    assert!(result.error.is_none());
    assert_eq!(
        slugs(&events),
        vec!["btc-100k", "nba-finals", "election-2026", "senate-race", "q3-earnings"]
    );
}

#[tokio::test]
async fn new_ranks_by_creation_time() {
    let db = seeded("newest");
    let ctx = db.context();

    let events = ctx
        .listing
        .try_list_events(&ListCriteria::for_tag("new"))
        .await
        .unwrap();

    assert_eq!(
        slugs(&events),
        vec!["q3-earnings", "btc-100k", "nba-finals", "senate-race", "election-2026"]
    );
}

#[tokio::test]
async fn category_listing_ranks_by_total_volume() {
    let db = seeded("category");
    let ctx = db.context();

    let events = ctx
        .listing
        .try_list_events(&ListCriteria::for_tag("politics"))
        .await
        .unwrap();

    // Hidden and resolved events stay out of the default listing.
    assert_eq!(slugs(&events), vec!["election-2026", "senate-race"]);
}

#[tokio::test]
async fn hidden_category_lists_nothing() {
    let db = seeded("hidden-category");
    db.insert_event(EventFixture::new("e8", "in-archive").tag("archived"));
    let ctx = db.context();

    let events = ctx
        .listing
        .try_list_events(&ListCriteria::for_tag("archived"))
        .await
        .unwrap();

    assert!(events.is_empty());
}

#[tokio::test]
async fn unknown_category_lists_nothing() {
    let db = seeded("unknown-category");
    let ctx = db.context();

    let events = ctx
        .listing
        .try_list_events(&ListCriteria::for_tag("no-such-tag"))
        .await
        .unwrap();

    assert!(events.is_empty());
}

#[tokio::test]
async fn resolved_status_lists_resolved_events() {
    let db = seeded("resolved");
    let ctx = db.context();

    let criteria = ListCriteria {
        status: EventStatus::Resolved,
        ..ListCriteria::default()
    };
    let events = ctx.listing.try_list_events(&criteria).await.unwrap();

    assert_eq!(slugs(&events), vec!["old-vote"]);
}

#[tokio::test]
async fn include_hidden_shows_hidden_events() {
    let db = seeded("include-hidden");
    let ctx = db.context();

    let criteria = ListCriteria {
        include_hidden: true,
        ..ListCriteria::for_tag("politics")
    };
    let events = ctx.listing.try_list_events(&criteria).await.unwrap();

    assert_eq!(
        slugs(&events),
        vec!["secret-event", "election-2026", "senate-race"]
    );
    assert!(events[0].is_hidden);
}

#[tokio::test]
async fn search_matches_title_case_insensitively() {
    let db = seeded("search");
    let ctx = db.context();

    let criteria = ListCriteria {
        search: "  bitcoin ".to_string(),
        ..ListCriteria::default()
    };
    let events = ctx.listing.try_list_events(&criteria).await.unwrap();

    assert_eq!(slugs(&events), vec!["btc-100k"]);
}

#[tokio::test]
async fn search_folds_non_ascii_case() {
    let db = TempDb::create("search-unicode");
    db.insert_event(EventFixture::new("u1", "uber-election").title("Über election"));
    db.insert_event(EventFixture::new("u2", "other").title("Ubiquitous"));
    let ctx = db.context();

    for term in ["über", "ÜBER", "Über"] {
        let criteria = ListCriteria {
            search: term.to_string(),
            ..ListCriteria::default()
        };
        let events = ctx.listing.try_list_events(&criteria).await.unwrap();
        assert_eq!(slugs(&events), vec!["uber-election"], "term {term}");
    }
}

#[tokio::test]
async fn search_matches_translated_title_in_locale() {
    let db = seeded("search-translated");
    let ctx = db.context();

    let criteria = ListCriteria {
        search: "wahl".to_string(),
        locale: Locale::De,
        ..ListCriteria::default()
    };
    let events = ctx.listing.try_list_events(&criteria).await.unwrap();

    assert_eq!(slugs(&events), vec!["election-2026"]);
    assert_eq!(events[0].title, "Wahl 2026");
}

#[tokio::test]
async fn search_treats_wildcards_literally() {
    let db = seeded("search-wildcards");
    let ctx = db.context();

    let criteria = ListCriteria {
        search: "%".to_string(),
        ..ListCriteria::default()
    };
    let events = ctx.listing.try_list_events(&criteria).await.unwrap();

    assert!(events.is_empty());
}

#[tokio::test]
async fn translated_titles_fall_back_to_default() {
    let db = seeded("fallback-title");
    let ctx = db.context();

    let criteria = ListCriteria {
        locale: Locale::De,
        ..ListCriteria::for_tag("politics")
    };
    let events = ctx.listing.try_list_events(&criteria).await.unwrap();

    let titles: Vec<&str> = events.iter().map(|e| e.title.as_str()).collect();
    assert_eq!(titles, vec!["Wahl 2026", "Senate race"]);
}

#[tokio::test]
async fn bookmarked_without_viewer_is_empty_not_an_error() {
    let db = seeded("bookmark-anon");
    db.bookmark("alice", "e1");
    let ctx = db.context();

    let criteria = ListCriteria {
        bookmarked: true,
        ..ListCriteria::default()
    };
    let result = ctx.listing.list_events(&criteria).await;

    assert_eq!(result.data, Some(Vec::new()));
    assert!(result.error.is_none());
}

#[tokio::test]
async fn bookmarked_lists_only_the_viewers_bookmarks() {
    let db = seeded("bookmarks");
    db.bookmark("alice", "e1");
    db.bookmark("alice", "e3");
    db.bookmark("bob", "e2");
    let ctx = db.context();

    let criteria = ListCriteria {
        bookmarked: true,
        user_id: Some(UserId::new("alice")),
        ..ListCriteria::default()
    };
    let events = ctx.listing.try_list_events(&criteria).await.unwrap();

    assert_eq!(slugs(&events), vec!["nba-finals", "election-2026"]);
    assert!(events.iter().all(|e| e.is_bookmarked));
}

#[tokio::test]
async fn viewer_bookmarks_are_flagged_in_listing() {
    let db = seeded("bookmark-flags");
    db.bookmark("alice", "e2");
    let ctx = db.context();

    let criteria = ListCriteria {
        user_id: Some(UserId::new("alice")),
        ..ListCriteria::default()
    };
    let events = ctx.listing.try_list_events(&criteria).await.unwrap();

    let flagged: Vec<&str> = events
        .iter()
        .filter(|e| e.is_bookmarked)
        .map(|e| e.slug.as_str())
        .collect();
    assert_eq!(flagged, vec!["btc-100k"]);
}

#[tokio::test]
async fn sports_listing_filters_by_sport_and_section() {
    let db = seeded("sports");
    db.insert_event(
        EventFixture::new("e8", "nba-mvp-props")
            .volume(10.0)
            .sports("nba", Some(SportsSection::Props)),
    );
    db.insert_event(
        EventFixture::new("e9", "ucl-final")
            .volume(5.0)
            .sports("soccer", Some(SportsSection::Games)),
    );
    let ctx = db.context();

    let all = ctx
        .listing
        .try_list_events(&ListCriteria::for_tag("sports"))
        .await
        .unwrap();
    assert_eq!(slugs(&all), vec!["nba-finals", "nba-mvp-props", "ucl-final"]);

    let criteria = ListCriteria {
        sports_sport_slug: Some("nba".to_string()),
        sports_section: Some(SportsSection::Games),
        ..ListCriteria::for_tag("sports")
    };
    let games = ctx.listing.try_list_events(&criteria).await.unwrap();
    assert_eq!(slugs(&games), vec!["nba-finals"]);
}

#[tokio::test]
async fn hide_flags_exclude_tagged_events() {
    let db = seeded("hide-flags");
    let ctx = db.context();

    let criteria = ListCriteria {
        hide_sports: true,
        hide_crypto: true,
        hide_earnings: true,
        ..ListCriteria::default()
    };
    let events = ctx.listing.try_list_events(&criteria).await.unwrap();

    assert_eq!(slugs(&events), vec!["election-2026", "senate-race"]);
}

#[tokio::test]
async fn frequency_filters_by_recurrence() {
    let db = seeded("frequency");
    let ctx = db.context();

    let criteria = ListCriteria {
        frequency: Frequency::Weekly,
        ..ListCriteria::default()
    };
    let events = ctx.listing.try_list_events(&criteria).await.unwrap();

    assert_eq!(slugs(&events), vec!["q3-earnings"]);
}

#[tokio::test]
async fn pagination_slices_the_ranked_list() {
    let db = seeded("pagination");
    let ctx = db.context();

    let criteria = ListCriteria {
        offset: 3,
        ..ListCriteria::default()
    };
    let page = ctx.listing.try_list_events(&criteria).await.unwrap();
    assert_eq!(slugs(&page), vec!["senate-race", "q3-earnings"]);

    let criteria = ListCriteria {
        offset: VISIBLE_ACTIVE,
        ..ListCriteria::default()
    };
    let past_end = ctx.listing.try_list_events(&criteria).await.unwrap();
    assert!(past_end.is_empty());
}

#[tokio::test]
async fn page_size_caps_each_page() {
    let db = TempDb::create("page-size");
    for i in 0..25 {
        db.insert_event(
            EventFixture::new(&format!("p{i:02}"), &format!("event-{i:02}"))
                .volume_24h(f64::from(i)),
        );
    }
    let ctx = db.context();

    let first = ctx
        .listing
        .try_list_events(&ListCriteria::default())
        .await
        .unwrap();
    assert_eq!(first.len(), 20);
    assert_eq!(first[0].slug, "event-24");

    let criteria = ListCriteria {
        offset: 20,
        ..ListCriteria::default()
    };
    let second = ctx.listing.try_list_events(&criteria).await.unwrap();
    assert_eq!(second.len(), 5);
    assert_eq!(second[4].slug, "event-00");
}

#[tokio::test]
async fn hydration_attaches_markets_and_tags() {
    let db = seeded("hydration");
    let ctx = db.context();

    let events = ctx
        .listing
        .try_list_events(&ListCriteria::for_tag("crypto"))
        .await
        .unwrap();

    let btc = &events[0];
    assert_eq!(btc.tags, vec!["crypto"]);
    assert_eq!(btc.markets.len(), 2);
    assert_eq!(btc.markets[0].condition_id.as_str(), "0xb1");
    assert_eq!(btc.markets[0].midpoint, Some(dec!(0.61)));
    assert_eq!(btc.volume, dec!(50000));
}

#[tokio::test]
async fn hidden_tags_are_not_attached() {
    let db = seeded("hidden-tags");
    db.insert_event(
        EventFixture::new("e8", "mixed")
            .volume_24h(1.0)
            .tag("politics")
            .tag("archived"),
    );
    let ctx = db.context();

    let events = ctx
        .listing
        .try_list_events(&ListCriteria {
            search: "mixed".to_string(),
            ..ListCriteria::default()
        })
        .await
        .unwrap();

    assert_eq!(events[0].tags, vec!["politics"]);
}

#[tokio::test]
async fn storage_failure_yields_generic_error() {
    let db = seeded("storage-failure");
    let ctx = db.context();
    {
        use diesel::RunQueryDsl;
        let mut conn = db.pool().get().unwrap();
        diesel::sql_query("DROP TABLE markets").execute(&mut conn).unwrap();
    }

    let result = ctx.listing.list_events(&ListCriteria::default()).await;

    assert!(result.data.is_none());
    assert_eq!(result.error.as_deref(), Some(LIST_EVENTS_FAILED));
}

#[tokio::test]
async fn related_events_share_a_tag() {
    let db = seeded("related");
    db.insert_event(
        EventFixture::new("e8", "governor-race")
            .volume(15_000.0)
            .tag("politics"),
    );
    db.insert_event(
        EventFixture::new("e9", "mayor-race")
            .volume(500.0)
            .tag("politics"),
    );
    let ctx = db.context();

    let related = ctx
        .listing
        .related_events("election-2026", None, Locale::En)
        .await
        .unwrap();

    // Hidden, resolved, and the source event itself are excluded.
    assert_eq!(
        slugs(&related),
        vec!["senate-race", "governor-race", "mayor-race"]
    );
}

#[tokio::test]
async fn related_events_respect_limit_and_tag() {
    let db = seeded("related-limit");
    for i in 0..5 {
        db.insert_event(
            EventFixture::new(&format!("r{i}"), &format!("race-{i}"))
                .volume(f64::from(i))
                .tag("politics"),
        );
    }
    let ctx = db.context();

    let related = ctx
        .listing
        .related_events("election-2026", Some("politics"), Locale::En)
        .await
        .unwrap();
    assert_eq!(related.len(), 3);
    assert_eq!(related[0].slug, "senate-race");

    let none = ctx
        .listing
        .related_events("election-2026", Some("crypto"), Locale::En)
        .await
        .unwrap();
    assert_eq!(slugs(&none), vec!["btc-100k"]);
}

#[tokio::test]
async fn related_events_of_unknown_or_hidden_event_are_not_found() {
    let db = seeded("related-missing");
    let ctx = db.context();

    let missing = ctx
        .listing
        .related_events("no-such-event", None, Locale::En)
        .await;
    assert!(matches!(missing, Err(Error::NotFound(_))));

    let hidden = ctx
        .listing
        .related_events("secret-event", None, Locale::En)
        .await;
    assert!(matches!(hidden, Err(Error::NotFound(_))));
}

#[tokio::test]
async fn main_tags_are_ordered_and_localized() {
    let db = seeded("main-tags");
    let ctx = db.context();

    let tags = ctx.listing.main_tags(Locale::De).await.unwrap();

    let names: Vec<&str> = tags.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, vec!["Politik", "Crypto", "Sports"]);
}
