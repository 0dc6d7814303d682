//! Tests for the listing catalog and area alias resolution.

use showtime_engine::catalog::{ShowtimeQuery, TheaterChain};
use showtime_engine::{AreaAliases, Catalog, CatalogError};

// ── Helpers ─────────────────────────────────────────────────────────────────

const SNAPSHOT: &str = r#"{
  "theaters": [
    { "name": "TOHOシネマズ新宿", "area": "新宿", "chain": "toho" },
    { "name": "新宿バルト9", "area": "新宿", "chain": "other" },
    { "name": "グランドシネマサンシャイン池袋", "area": "池袋", "chain": "cinema_sunshine" },
    { "name": "TOHOシネマズ日比谷", "area": "有楽町" }
  ],
  "showtimes": [
    { "date": "2026-10-20", "theater": "TOHOシネマズ新宿", "movieTitle": "ズートピア2",
      "startTime": "14:00", "endTime": "15:48", "format": "IMAX", "audioType": "subtitled" },
    { "date": "2026-10-20", "theater": "TOHOシネマズ新宿", "movieTitle": "ズートピア2",
      "startTime": "10:00", "endTime": "11:48" },
    { "date": "2026-10-20", "theater": "新宿バルト9", "movieTitle": "ズートピア2",
      "startTime": "12:00", "endTime": "13:48", "audioType": "dubbed" },
    { "date": "2026-10-20", "theater": "新宿バルト9", "movieTitle": "シャドウズ・エッジ",
      "startTime": "12:30", "endTime": "14:51" },
    { "date": "2026-10-20", "theater": "グランドシネマサンシャイン池袋", "movieTitle": "ズートピア２",
      "startTime": "18:00", "endTime": "19:48", "format": "IMAX" },
    { "date": "2026-10-20", "theater": "TOHOシネマズ日比谷", "movieTitle": "ワーキングマン",
      "startTime": "23:10", "endTime": "01:15" },
    { "date": "2026-10-21", "theater": "TOHOシネマズ新宿", "movieTitle": "ズートピア2",
      "startTime": "09:00", "endTime": "10:48" },
    { "date": "2026-10-20", "theater": "閉館した映画館", "movieTitle": "ズートピア2",
      "startTime": "09:00", "endTime": "10:48" }
  ],
  "scrapeLog": [
    { "area": "新宿", "scrapedAt": "2026-10-19T21:00:00Z", "showtimeCount": 5, "error": null },
    { "area": "池袋", "scrapedAt": "2026-10-19T21:05:00Z", "showtimeCount": 1 },
    { "area": "有楽町", "scrapedAt": "2026-10-19T20:55:00Z", "error": "timeout" }
  ]
}"#;

fn catalog() -> Catalog {
    Catalog::from_json(SNAPSHOT).expect("fixture snapshot parses")
}

fn areas(names: &[&str]) -> Vec<String> {
    names.iter().map(|n| n.to_string()).collect()
}

// ── Loading ─────────────────────────────────────────────────────────────────

#[test]
fn loads_snapshot() {
    let catalog = catalog();
    assert_eq!(catalog.theaters().len(), 4);
    assert_eq!(catalog.rows().len(), 8);
    assert_eq!(catalog.theaters()[0].chain, Some(TheaterChain::Toho));
    assert_eq!(catalog.theaters()[3].chain, None);
}

#[test]
fn empty_document_is_an_empty_catalog() {
    let catalog = Catalog::from_json("{}").unwrap();
    assert!(catalog.theaters().is_empty());
    assert!(catalog.showtimes_for("2026-10-20", &[]).is_empty());
}

#[test]
fn malformed_snapshot_is_rejected() {
    let err = Catalog::from_json(r#"{"theaters": 3}"#).unwrap_err();
    assert!(matches!(err, CatalogError::Snapshot(_)));
    assert!(err.to_string().starts_with("Invalid listing snapshot"));
}

// ── Flat showtimes for the optimizer ────────────────────────────────────────

#[test]
fn showtimes_for_filters_date_and_area_and_sorts_by_start() {
    let showtimes = catalog().showtimes_for("2026-10-20", &areas(&["新宿"]));

    let starts: Vec<&str> = showtimes.iter().map(|s| s.start_time.as_str()).collect();
    assert_eq!(starts, vec!["10:00", "12:00", "12:30", "14:00"]);
    assert_eq!(showtimes[3].format.as_deref(), Some("IMAX"));
    assert_eq!(showtimes[1].audio_type.as_deref(), Some("dubbed"));
}

#[test]
fn showtimes_for_multiple_areas() {
    let showtimes = catalog().showtimes_for("2026-10-20", &areas(&["新宿", "池袋"]));
    assert_eq!(showtimes.len(), 5);
    assert_eq!(showtimes.last().unwrap().theater, "グランドシネマサンシャイン池袋");
}

#[test]
fn rows_for_unknown_theaters_are_invisible() {
    let showtimes = catalog().showtimes_for("2026-10-20", &[]);
    assert!(showtimes.iter().all(|s| s.theater != "閉館した映画館"));
    assert_eq!(showtimes.len(), 6);
}

#[test]
fn showtimes_for_unknown_area_is_empty() {
    assert!(catalog()
        .showtimes_for("2026-10-20", &areas(&["渋谷"]))
        .is_empty());
}

// ── Grouped report ──────────────────────────────────────────────────────────

#[test]
fn movie_showtimes_groups_by_movie_then_theater() {
    let report = catalog().movie_showtimes(&ShowtimeQuery {
        date: "2026-10-20".into(),
        areas: areas(&["新宿"]),
        ..Default::default()
    });

    assert_eq!(report.areas, vec!["新宿"]);
    assert_eq!(report.movies.len(), 2);
    assert_eq!(report.movies[0].movie_title, "シャドウズ・エッジ");
    assert_eq!(report.movies[1].movie_title, "ズートピア2");

    let zootopia = &report.movies[1];
    assert_eq!(zootopia.theaters.len(), 2);
    assert_eq!(zootopia.theaters[0].theater, "TOHOシネマズ新宿");
    let starts: Vec<&str> = zootopia.theaters[0]
        .showtimes
        .iter()
        .map(|s| s.start_time.as_str())
        .collect();
    assert_eq!(starts, vec!["10:00", "14:00"]);
    assert_eq!(zootopia.theaters[0].showtimes[0].duration_minutes, 108);

    assert_eq!(report.stats.total_movies, 2);
    assert_eq!(report.stats.total_theaters, 2);
    assert_eq!(report.stats.total_showtimes, 4);
}

#[test]
fn movie_showtimes_fuzzy_title_filter() {
    let report = catalog().movie_showtimes(&ShowtimeQuery {
        date: "2026-10-20".into(),
        movie_title: Some("ズートピア".into()),
        ..Default::default()
    });

    // Both spellings match; they stay separate groups.
    let titles: Vec<&str> = report.movies.iter().map(|m| m.movie_title.as_str()).collect();
    assert_eq!(titles, vec!["ズートピア2", "ズートピア２"]);
    assert_eq!(report.movie_title.as_deref(), Some("ズートピア"));
    // No areas requested: the areas actually found are reported.
    assert_eq!(report.areas, vec!["新宿", "池袋"]);
}

#[test]
fn movie_showtimes_theater_filter_is_case_insensitive_substring() {
    let report = catalog().movie_showtimes(&ShowtimeQuery {
        date: "2026-10-20".into(),
        theater: Some("toho".into()),
        ..Default::default()
    });

    let theaters: Vec<&str> = report
        .movies
        .iter()
        .flat_map(|m| m.theaters.iter().map(|t| t.theater.as_str()))
        .collect();
    assert!(theaters.iter().all(|t| t.starts_with("TOHO")));
    assert_eq!(report.stats.total_theaters, 2);
}

#[test]
fn movie_showtimes_reports_midnight_duration() {
    let report = catalog().movie_showtimes(&ShowtimeQuery {
        date: "2026-10-20".into(),
        areas: areas(&["有楽町"]),
        ..Default::default()
    });
    assert_eq!(report.movies[0].theaters[0].showtimes[0].duration_minutes, 125);
}

// ── Movie and theater lists ─────────────────────────────────────────────────

#[test]
fn list_movies_orders_by_reach_then_title() {
    let movies = catalog().list_movies("2026-10-20", &[]);

    assert_eq!(movies[0].title, "ズートピア2");
    assert_eq!(movies[0].theater_count, 2);
    assert_eq!(movies[0].showtime_count, 3);

    let rest: Vec<&str> = movies[1..].iter().map(|m| m.title.as_str()).collect();
    assert_eq!(rest, vec!["シャドウズ・エッジ", "ズートピア２", "ワーキングマン"]);
}

#[test]
fn list_theaters_orders_by_area_then_name() {
    let theaters = catalog().list_theaters(&areas(&["新宿"]));
    let names: Vec<&str> = theaters.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, vec!["TOHOシネマズ新宿", "新宿バルト9"]);

    let all = catalog().list_theaters(&[]);
    assert_eq!(all.len(), 4);
    assert_eq!(all[0].area, "新宿");
}

// ── Status ──────────────────────────────────────────────────────────────────

#[test]
fn data_status_summarizes_snapshot() {
    let status = catalog().data_status();

    assert_eq!(status.last_scraped_at.as_deref(), Some("2026-10-19T21:05:00Z"));
    assert_eq!(status.area_count, 3);
    assert_eq!(status.theater_count, 4);
    assert_eq!(status.showtime_count, 8);
    assert_eq!(status.date_range.from.as_deref(), Some("2026-10-20"));
    assert_eq!(status.date_range.to.as_deref(), Some("2026-10-21"));
}

#[test]
fn data_status_of_empty_catalog() {
    let status = Catalog::default().data_status();
    assert_eq!(status.last_scraped_at, None);
    assert_eq!(status.showtime_count, 0);
    assert_eq!(status.date_range.from, None);
}

// ── Area aliases ────────────────────────────────────────────────────────────

#[test]
fn builtin_aliases_resolve_neighbourhoods() {
    let aliases = AreaAliases::builtin();
    assert_eq!(aliases.resolve("日比谷"), "有楽町");
    assert_eq!(aliases.resolve("表参道"), "渋谷");
    assert_eq!(aliases.resolve("スカイツリー"), "錦糸町");
    assert_eq!(aliases.resolve("新宿"), "新宿");
    assert_eq!(aliases.len(), 20);
}

#[test]
fn resolve_all_dedups_in_first_seen_order() {
    let aliases = AreaAliases::builtin();
    let resolved = aliases.resolve_all(&areas(&["渋谷", "原宿", "丸の内", "日比谷", "新宿"]));
    assert_eq!(resolved, vec!["渋谷", "有楽町", "新宿"]);
}

#[test]
fn aliases_from_json_extend_builtin() {
    let custom = AreaAliases::from_json(r#"{ "みなとみらい": "横浜", "日比谷": "銀座" }"#).unwrap();
    let merged = AreaAliases::builtin().extend(custom);

    assert_eq!(merged.resolve("みなとみらい"), "横浜");
    assert_eq!(merged.resolve("日比谷"), "銀座");
    assert_eq!(merged.resolve("原宿"), "渋谷");
}

#[test]
fn malformed_alias_table_is_rejected() {
    let err = AreaAliases::from_json(r#"["日比谷"]"#).unwrap_err();
    assert!(matches!(err, CatalogError::Aliases(_)));
}
