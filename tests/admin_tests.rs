mod support;

use eventfeed::application::admin::{
    ActionResult, CATEGORY_NOT_FOUND, EVENT_NOT_FOUND, UNAUTHORIZED,
};
use eventfeed::domain::cache_tag::CacheTag;
use eventfeed::domain::criteria::ListCriteria;
use eventfeed::domain::id::EventId;
use eventfeed::domain::locale::Locale;
use eventfeed::domain::settings::{
    GROUP_EVENTS, GROUP_I18N, GROUP_THEME, KEY_AUTO_DEPLOY_NEW_EVENTS, KEY_ENABLED_LOCALES,
    KEY_THEME_PRESET, KEY_THEME_RADIUS,
};
use eventfeed::domain::viewer::Viewer;

use support::catalog::seeded;
use support::slugs;

fn admin() -> Viewer {
    Viewer::admin("root")
}

#[tokio::test]
async fn non_admins_are_rejected_without_writing() {
    let db = seeded("admin-unauthorized");
    let ctx = db.context();
    let unauthorized = ActionResult::failed(UNAUTHORIZED);

    for viewer in [Viewer::anonymous(), Viewer::user("alice")] {
        assert_eq!(
            ctx.admin
                .toggle_event_visibility(&viewer, &EventId::new("e1"), true)
                .await,
            unauthorized
        );
        assert_eq!(
            ctx.admin.update_auto_deploy_new_events(&viewer, false).await,
            unauthorized
        );
        assert_eq!(
            ctx.admin.update_theme_settings(&viewer, "ocean", None).await,
            unauthorized
        );
        assert_eq!(
            ctx.admin.update_enabled_locales(&viewer, &["en", "de"]).await,
            unauthorized
        );
        assert_eq!(
            ctx.admin.update_category(&viewer, "crypto", false, true).await,
            unauthorized
        );
    }

    assert_eq!(db.setting_value(GROUP_EVENTS, KEY_AUTO_DEPLOY_NEW_EVENTS), None);
    let events = ctx
        .listing
        .try_list_events(&ListCriteria::for_tag("politics"))
        .await
        .unwrap();
    assert_eq!(slugs(&events), vec!["election-2026", "senate-race"]);
}

#[tokio::test]
async fn hiding_an_event_removes_it_and_drops_cached_pages() {
    let db = seeded("admin-hide");
    let ctx = db.context();
    ctx.responses
        .insert("events?tag=trending", "[]", vec![CacheTag::EventsAll]);
    ctx.responses.insert(
        "related?slug=election-2026",
        "[]",
        vec![CacheTag::event("election-2026")],
    );
    ctx.responses
        .insert("main-tags?locale=en", "[]", vec![CacheTag::MainTags(Locale::En)]);

    let result = ctx
        .admin
        .toggle_event_visibility(&admin(), &EventId::new("e1"), true)
        .await;

    assert_eq!(result, ActionResult::ok());
    assert!(ctx.responses.get("events?tag=trending").is_none());
    assert!(ctx.responses.get("related?slug=election-2026").is_none());
    assert!(ctx.responses.get("main-tags?locale=en").is_some());

    let events = ctx
        .listing
        .try_list_events(&ListCriteria::for_tag("politics"))
        .await
        .unwrap();
    assert_eq!(slugs(&events), vec!["senate-race"]);
}

#[tokio::test]
async fn unhiding_restores_the_event() {
    let db = seeded("admin-unhide");
    let ctx = db.context();

    let result = ctx
        .admin
        .toggle_event_visibility(&admin(), &EventId::new("e5"), false)
        .await;

    assert!(result.success);
    let events = ctx
        .listing
        .try_list_events(&ListCriteria::for_tag("politics"))
        .await
        .unwrap();
    assert_eq!(slugs(&events)[0], "secret-event");
}

#[tokio::test]
async fn hiding_unknown_event_reports_not_found() {
    let db = seeded("admin-hide-missing");
    let ctx = db.context();

    let result = ctx
        .admin
        .toggle_event_visibility(&admin(), &EventId::new("missing"), true)
        .await;

    assert_eq!(result, ActionResult::failed(EVENT_NOT_FOUND));
}

#[tokio::test]
async fn auto_deploy_update_is_visible_through_the_resolver() {
    let db = seeded("admin-auto-deploy");
    let ctx = db.context();

    assert!(ctx.settings.auto_deploy_new_events_enabled().await);
    assert!(ctx.settings.is_loaded());

    let result = ctx.admin.update_auto_deploy_new_events(&admin(), false).await;

    assert!(result.success);
    assert_eq!(
        db.setting_value(GROUP_EVENTS, KEY_AUTO_DEPLOY_NEW_EVENTS).as_deref(),
        Some("false")
    );
    assert!(!ctx.settings.auto_deploy_new_events_enabled().await);
}

#[tokio::test]
async fn theme_update_validates_and_stores() {
    let db = seeded("admin-theme");
    let ctx = db.context();

    let rejected = ctx
        .admin
        .update_theme_settings(&admin(), "ocean blue", None)
        .await;
    assert!(!rejected.success);
    assert!(rejected.error.is_some());
    assert_eq!(db.setting_value(GROUP_THEME, KEY_THEME_PRESET), None);

    let bad_radius = ctx
        .admin
        .update_theme_settings(&admin(), "ocean", Some("huge"))
        .await;
    assert!(!bad_radius.success);

    let result = ctx
        .admin
        .update_theme_settings(&admin(), " ocean ", Some("0.5rem"))
        .await;
    assert!(result.success);
    assert_eq!(
        db.setting_value(GROUP_THEME, KEY_THEME_PRESET).as_deref(),
        Some("ocean")
    );
    assert_eq!(
        db.setting_value(GROUP_THEME, KEY_THEME_RADIUS).as_deref(),
        Some("0.5rem")
    );

    let theme = ctx.settings.site_settings().await.theme;
    assert_eq!(theme.preset, "ocean");
    assert_eq!(theme.radius.as_deref(), Some("0.5rem"));
}

#[tokio::test]
async fn enabled_locales_are_normalized_and_drop_cached_tags() {
    let db = seeded("admin-locales");
    let ctx = db.context();
    ctx.responses
        .insert("main-tags?locale=de", "[]", vec![CacheTag::MainTags(Locale::De)]);

    let result = ctx
        .admin
        .update_enabled_locales(&admin(), &["fr", "xx", "de", "fr"])
        .await;

    assert!(result.success);
    assert_eq!(
        db.setting_value(GROUP_I18N, KEY_ENABLED_LOCALES).as_deref(),
        Some(r#"["en","de","fr"]"#)
    );
    assert_eq!(
        ctx.settings.enabled_locales().await,
        vec![Locale::En, Locale::De, Locale::Fr]
    );
    assert!(ctx.responses.get("main-tags?locale=de").is_none());
}

#[tokio::test]
async fn hiding_a_category_resets_the_tag_cache() {
    let db = seeded("admin-category");
    let ctx = db.context();

    // Warm the tag index.
    let before = ctx
        .listing
        .try_list_events(&ListCriteria::for_tag("crypto"))
        .await
        .unwrap();
    assert_eq!(slugs(&before), vec!["btc-100k"]);

    let result = ctx
        .admin
        .update_category(&admin(), "crypto", true, true)
        .await;
    assert!(result.success);

    let after = ctx
        .listing
        .try_list_events(&ListCriteria::for_tag("crypto"))
        .await
        .unwrap();
    assert!(after.is_empty());

    let names: Vec<String> = ctx
        .listing
        .main_tags(Locale::En)
        .await
        .unwrap()
        .into_iter()
        .map(|t| t.slug)
        .collect();
    assert_eq!(names, vec!["politics", "sports"]);
}

#[tokio::test]
async fn promoting_a_category_adds_it_to_main_tags() {
    let db = seeded("admin-promote");
    let ctx = db.context();

    let result = ctx
        .admin
        .update_category(&admin(), "earnings", true, false)
        .await;

    assert!(result.success);
    let slugs: Vec<String> = ctx
        .listing
        .main_tags(Locale::En)
        .await
        .unwrap()
        .into_iter()
        .map(|t| t.slug)
        .collect();
    assert_eq!(slugs, vec!["politics", "crypto", "sports", "earnings"]);
}

#[tokio::test]
async fn unknown_category_reports_not_found() {
    let db = seeded("admin-category-missing");
    let ctx = db.context();

    let result = ctx
        .admin
        .update_category(&admin(), "weather", true, false)
        .await;

    assert_eq!(result, ActionResult::failed(CATEGORY_NOT_FOUND));
}
