//! Offline tests for the result parser: everything here runs against static
//! markup, no browser involved.

use serp_scraper::{host_of, parse_results};

/// A trimmed-down but structurally faithful results page.
fn serp_fixture() -> String {
    let mut blocks = String::new();

    // Ordinary organic results
    for (i, (title, href, snippet)) in [
        ("Zumba Fitness - Official Site", "https://www.zumba.com/en-US", "Find a class near you."),
        ("Zumba - Wikipedia", "https://en.wikipedia.org/wiki/Zumba", "Zumba is a fitness program."),
        ("10 Best Zumba Workouts", "https://www.health.example.org/zumba-workouts", "Reviewed routines."),
    ]
    .iter()
    .enumerate()
    {
        blocks.push_str(&format!(
            r#"<div class="MjjYud">
                 <div class="yuRUbf"><a href="{href}" data-ved="x{i}"><h3 class="LC20lb">{title}</h3></a></div>
                 <div class="VwiC3b yXK7lf">{snippet}</div>
               </div>"#,
        ));
    }

    // An ad-like block with no heading: must be skipped
    blocks.push_str(
        r#"<div class="MjjYud">
             <div class="yuRUbf"><a href="https://ads.example.net/click"></a></div>
             <div class="VwiC3b">Sponsored</div>
           </div>"#,
    );

    // A "people also ask" style block with no primary link: must be skipped
    blocks.push_str(
        r#"<div class="MjjYud">
             <h3>People also ask</h3>
             <div class="related-question-pair">What is Zumba?</div>
           </div>"#,
    );

    // One more well-formed result after the skipped blocks
    blocks.push_str(
        r#"<div class="MjjYud">
             <div class="yuRUbf"><a href="https://www.youtube.com/watch?v=abc123"><h3>Zumba Dance Video</h3></a></div>
             <span class="aCOpRe">50 minute session.</span>
           </div>"#,
    );

    format!(
        r#"<html><head><title>zumba - Search</title></head>
           <body><div id="main"><div id="search"><div id="rso">{blocks}</div></div></div></body></html>"#,
    )
}

#[test]
fn parses_organic_results_in_document_order() {
    let results = parse_results(&serp_fixture(), 10);

    assert_eq!(results.len(), 4);
    assert_eq!(results[0].title, "Zumba Fitness - Official Site");
    assert_eq!(results[1].title, "Zumba - Wikipedia");
    assert_eq!(results[2].title, "10 Best Zumba Workouts");
    assert_eq!(results[3].title, "Zumba Dance Video");
}

#[test]
fn ranks_are_contiguous_despite_skipped_blocks() {
    let results = parse_results(&serp_fixture(), 10);

    let ranks: Vec<u32> = results.iter().map(|r| r.rank).collect();
    assert_eq!(ranks, vec![1, 2, 3, 4]);
}

#[test]
fn never_exceeds_max_results() {
    for max in 0..6 {
        let results = parse_results(&serp_fixture(), max);
        assert!(results.len() <= max);
    }
    assert_eq!(parse_results(&serp_fixture(), 2).len(), 2);
}

#[test]
fn domain_matches_url_host() {
    let results = parse_results(&serp_fixture(), 10);

    for result in &results {
        assert_eq!(result.domain, host_of(&result.url));
    }
    assert_eq!(results[0].domain, "www.zumba.com");
    assert_eq!(results[3].domain, "www.youtube.com");
}

#[test]
fn snippet_falls_back_through_the_class_table() {
    let results = parse_results(&serp_fixture(), 10);

    // Third block uses the legacy span.aCOpRe class
    assert_eq!(results[3].snippet, "50 minute session.");
}

#[test]
fn zero_candidate_blocks_yield_an_empty_list() {
    let html = r#"<html><body><div id="search"><p>Your search did not match any documents.</p></div></body></html>"#;
    let results = parse_results(html, 10);
    assert!(results.is_empty());
}

#[test]
fn twelve_blocks_capped_at_five() {
    let blocks: String = (0..12)
        .map(|i| {
            format!(
                r#"<div class="MjjYud"><div class="yuRUbf"><a href="https://site{i}.example/"><h3>Result {i}</h3></a></div></div>"#,
            )
        })
        .collect();
    let html = format!(r#"<html><body><div id="search">{blocks}</div></body></html>"#);

    let results = parse_results(&html, 5);
    assert_eq!(results.len(), 5);
    assert_eq!(results.iter().map(|r| r.rank).collect::<Vec<_>>(), vec![1, 2, 3, 4, 5]);
    assert_eq!(results[4].title, "Result 4");
}

#[test]
fn unparseable_hrefs_produce_empty_domains() {
    let html = r#"<html><body><div id="search">
        <div class="MjjYud"><div class="yuRUbf"><a href="/relative/result"><h3>Relative</h3></a></div></div>
        <div class="MjjYud"><div class="yuRUbf"><a><h3>No href at all</h3></a></div></div>
    </div></body></html>"#;

    let results = parse_results(html, 10);
    assert_eq!(results.len(), 2);
    assert_eq!(results[0].domain, "");
    assert_eq!(results[1].url, "");
    assert_eq!(results[1].domain, "");
}
