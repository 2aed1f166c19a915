//! Integration tests for the sold-out loader and sectioned extraction.

mod support;

use shopcat_core::{CatalogKind, SeenNames, StorefrontLayout};
use shopcat_scraper::{EngineSettings, NoPacing, ProgressEvent, Session};

use support::{section, session, sold_out_card, sold_out_page, Script, ScriptedBrowser};

fn load_more_selector() -> String {
    StorefrontLayout::default().load_more_sold_out_selector
}

#[tokio::test]
async fn loader_clicks_until_control_disappears() {
    let browser = ScriptedBrowser::new(Script {
        clickable: [(load_more_selector(), 2)].into(),
        ..Script::default()
    });
    let script = browser.handle();
    let mut events: Vec<ProgressEvent> = Vec::new();

    let outcome = {
        let mut s = session(browser, &mut events);
        s.load_all_sold_out().await
    };

    assert_eq!(outcome.clicks, 2);
    assert!(!outcome.hit_click_limit);
    assert_eq!(script.borrow().clicks.len(), 2);
    assert_eq!(
        events,
        vec![
            ProgressEvent::LoadingSoldOut,
            ProgressEvent::LoadMoreClicked { clicks: 1 },
            ProgressEvent::LoadMoreClicked { clicks: 2 },
            ProgressEvent::SoldOutLoaded { clicks: 2 },
        ]
    );
}

#[tokio::test]
async fn loader_without_control_finishes_immediately() {
    let browser = ScriptedBrowser::new(Script::default());
    let mut events: Vec<ProgressEvent> = Vec::new();

    let outcome = {
        let mut s = session(browser, &mut events);
        s.load_all_sold_out().await
    };

    assert_eq!(outcome.clicks, 0);
    assert_eq!(
        events.last(),
        Some(&ProgressEvent::SoldOutLoaded { clicks: 0 })
    );
}

#[tokio::test]
async fn loader_stops_at_click_limit() {
    let browser = ScriptedBrowser::new(Script {
        clickable: [(load_more_selector(), 50)].into(),
        ..Script::default()
    });
    let script = browser.handle();
    let mut events: Vec<ProgressEvent> = Vec::new();
    let settings = EngineSettings {
        max_load_more_clicks: 3,
        ..EngineSettings::default()
    };

    let outcome = {
        let mut s = Session::new(
            browser,
            StorefrontLayout::default(),
            settings,
            Box::new(NoPacing),
            &mut events,
        )
        .expect("default layout compiles");
        s.load_all_sold_out().await
    };

    assert_eq!(outcome.clicks, 3);
    assert!(outcome.hit_click_limit);
    assert_eq!(script.borrow().clicks.len(), 3);
}

#[tokio::test]
async fn rejected_load_more_click_ends_loading() {
    let browser = ScriptedBrowser::new(Script {
        clickable: [(load_more_selector(), 5)].into(),
        reject_clicks: true,
        ..Script::default()
    });
    let mut events: Vec<ProgressEvent> = Vec::new();

    let outcome = {
        let mut s = session(browser, &mut events);
        s.load_all_sold_out().await
    };

    assert_eq!(outcome.clicks, 0);
}

#[tokio::test]
async fn recommended_section_contributes_nothing() {
    let page = sold_out_page(&[
        section(
            "Produk Habis",
            &[
                sold_out_card("Topi Rajut", "45.000", "300 Terjual"),
                sold_out_card("Syal Batik", "60.000", "2RB Terjual"),
            ],
        ),
        section(
            "Kamu Mungkin Suka",
            &[sold_out_card("Jaket Hujan", "150.000", "10 Terjual")],
        ),
    ]);
    let browser = ScriptedBrowser::new(Script {
        sources: [page].into(),
        ..Script::default()
    });
    let mut events: Vec<ProgressEvent> = Vec::new();
    let mut seen = SeenNames::new();

    let outcome = {
        let mut s = session(browser, &mut events);
        s.extract_sold_out_sections(&mut seen).await
    };

    let names: Vec<&str> = outcome.catalog.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["Topi Rajut", "Syal Batik"]);
    assert_eq!(outcome.catalog.kind(), CatalogKind::SoldOut);
    assert_eq!(outcome.catalog.records()[1].monthly_sales, 2000);
    assert_eq!(outcome.sections_visited, 1);
    assert_eq!(outcome.sections_skipped, 1);
    assert!(!seen.contains("Jaket Hujan"));
    assert!(events.contains(&ProgressEvent::SectionSkipped {
        title: "Kamu Mungkin Suka".to_owned()
    }));
}

#[tokio::test]
async fn sections_share_one_seen_set_and_preview_starts_at_one() {
    let page = sold_out_page(&[
        section("Habis", &[sold_out_card("X", "1.000", "1 Terjual")]),
        section(
            "Habis Juga",
            &[
                sold_out_card("X", "1.000", "1 Terjual"),
                sold_out_card("W", "2.000", "2 Terjual"),
            ],
        ),
    ]);
    let browser = ScriptedBrowser::new(Script {
        sources: [page].into(),
        ..Script::default()
    });
    let mut events: Vec<ProgressEvent> = Vec::new();
    let mut seen = SeenNames::new();

    let outcome = {
        let mut s = session(browser, &mut events);
        s.extract_sold_out_sections(&mut seen).await
    };

    let names: Vec<&str> = outcome.catalog.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["X", "W"]);
    assert_eq!(outcome.sections_visited, 2);

    let previews: Vec<(CatalogKind, usize)> = events
        .iter()
        .filter_map(|e| match e {
            ProgressEvent::RecordPreview { kind, index, .. } => Some((*kind, *index)),
            _ => None,
        })
        .collect();
    assert_eq!(
        previews,
        vec![(CatalogKind::SoldOut, 1), (CatalogKind::SoldOut, 2)]
    );
}

#[tokio::test]
async fn available_cards_inside_sections_are_ignored() {
    let page = sold_out_page(&[section(
        "Habis",
        &[support::available_card("Salah Kelas", "1.000", "1 Terjual")],
    )]);
    let browser = ScriptedBrowser::new(Script {
        sources: [page].into(),
        ..Script::default()
    });
    let mut events: Vec<ProgressEvent> = Vec::new();
    let mut seen = SeenNames::new();

    let outcome = {
        let mut s = session(browser, &mut events);
        s.extract_sold_out_sections(&mut seen).await
    };

    assert!(outcome.catalog.is_empty());
    assert_eq!(outcome.sections_visited, 1);
}

#[tokio::test]
async fn failed_load_more_wait_ends_loading() {
    let browser = ScriptedBrowser::new(Script {
        clickable: [(load_more_selector(), 5)].into(),
        fail_from: [("wait", 1)].into(),
        ..Script::default()
    });
    let script = browser.handle();
    let mut events: Vec<ProgressEvent> = Vec::new();

    let outcome = {
        let mut s = session(browser, &mut events);
        s.load_all_sold_out().await
    };

    assert_eq!(outcome.clicks, 1);
    assert_eq!(script.borrow().clicks.len(), 1);
    assert_eq!(
        events.last(),
        Some(&ProgressEvent::SoldOutLoaded { clicks: 1 })
    );
}

#[tokio::test]
async fn failed_sold_out_snapshot_yields_empty_catalog() {
    let browser = ScriptedBrowser::new(Script {
        fail_from: [("page_source", 0)].into(),
        ..Script::default()
    });
    let mut events: Vec<ProgressEvent> = Vec::new();
    let mut seen = SeenNames::new();

    let outcome = {
        let mut s = session(browser, &mut events);
        s.extract_sold_out_sections(&mut seen).await
    };

    assert!(outcome.catalog.is_empty());
    assert_eq!(outcome.sections_visited, 0);
    assert!(seen.is_empty());
}
