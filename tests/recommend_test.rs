use recipes::corpus::{self, normalize, Corpus, RawRecipeRow};
use recipes::Recommender;

fn fixture_recommender() -> Recommender {
    let corpus = corpus::try_load_path("tests/fixtures/recipes.csv")
        .expect("Failed to load fixture corpus");
    Recommender::builder().build(corpus)
}

#[test]
fn test_fixture_drops_unusable_rows() {
    let recommender = fixture_recommender();
    let stats = recommender.stats();

    assert_eq!(stats.load.rows_read, 8);
    assert_eq!(stats.recipes, 5, "Rows 4, 5 and 8 should be dropped");

    let names: Vec<&str> = recommender
        .corpus()
        .iter()
        .map(|r| r.name.as_str())
        .collect();
    assert_eq!(
        names,
        vec!["Tomato Soup", "Garlic Bread", "Chicken Curry", "Pancakes", "Guacamole"]
    );
}

#[test]
fn test_results_are_sorted_bounded_and_in_range() {
    let recommender = fixture_recommender();

    for query in ["onion, garlic", "tomato", "butter, flour, eggs", "chicken, lime"] {
        for top_n in [1, 2, 10] {
            let results = recommender.recommend(query, Some(top_n));

            assert!(results.len() <= top_n);
            for r in &results {
                assert!(r.similarity_score > 0.01 && r.similarity_score <= 1.0);
            }
            for pair in results.windows(2) {
                let (a, b) = (&pair[0], &pair[1]);
                assert!(
                    a.similarity_score > b.similarity_score
                        || (a.similarity_score == b.similarity_score && a.index < b.index),
                    "results out of order for {query:?}"
                );
            }
        }
    }
}

#[test]
fn test_exact_ingredient_query_finds_document() {
    let recommender = fixture_recommender();

    for (index, recipe) in recommender.corpus().iter().enumerate() {
        let results = recommender.recommend(&recipe.ingredients_clean, None);
        let hit = results
            .iter()
            .find(|r| r.index == index)
            .unwrap_or_else(|| panic!("{} not returned for its own ingredients", recipe.name));
        assert!(hit.similarity_score > 0.01);
    }

    let results = recommender.recommend("garlic, butter, bread", Some(1));
    assert_eq!(results[0].name, "Garlic Bread");
    assert!((results[0].similarity_score - 1.0).abs() < 1e-9);
}

#[test]
fn test_unknown_ingredients_return_nothing() {
    let recommender = fixture_recommender();
    assert!(recommender.recommend("saffron, truffle", None).is_empty());
    assert!(recommender.recommend("", None).is_empty());
    assert!(recommender.recommend("the, and, with", None).is_empty());
}

#[test]
fn test_two_overlaps_beat_one() {
    let corpus = Corpus::load(vec![
        RawRecipeRow::new("Tomato Soup", "tomato onion garlic"),
        RawRecipeRow::new("Garlic Bread", "garlic butter bread"),
    ]);
    let recommender = Recommender::builder().build(corpus);

    let results = recommender.recommend("garlic, tomato", None);
    assert_eq!(results.len(), 2);
    assert_eq!(results[0].name, "Tomato Soup");
    assert_eq!(results[1].name, "Garlic Bread");
}

#[test]
fn test_empty_corpus_never_matches() {
    let recommender = Recommender::builder().build(Corpus::empty());
    assert!(recommender.recommend("garlic", None).is_empty());
    assert!(recommender.recommend("garlic, tomato, onion", Some(100)).is_empty());
}

#[test]
fn test_unreadable_corpus_degrades_to_empty() {
    let corpus = corpus::load_path("tests/fixtures/does-not-exist.csv");
    let recommender = Recommender::builder().build(corpus);
    assert!(recommender.recommend("garlic", None).is_empty());
}

#[test]
fn test_normalize_is_idempotent_on_fixture() {
    let raw = std::fs::read_to_string("tests/fixtures/recipes.csv").unwrap();
    for line in raw.lines() {
        let once = normalize(Some(line));
        assert_eq!(normalize(Some(&once)), once);
    }
}

#[test]
fn test_shared_across_threads() {
    let recommender = std::sync::Arc::new(fixture_recommender());
    let expected = recommender.recommend("onion, garlic", None);

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let recommender = recommender.clone();
            std::thread::spawn(move || recommender.recommend("onion, garlic", None))
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), expected);
    }
}
