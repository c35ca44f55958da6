//! Tests for crossword grid placement.

use std::collections::HashMap;

use word_link::{Direction, PlacedWord, WordBank, place, render};

/// Asserts that no cell holds two different characters.
fn assert_no_conflicts(placed: &[PlacedWord]) {
    let mut cells: HashMap<(i32, i32), char> = HashMap::new();
    for letter in placed.iter().flat_map(|w| w.letters()) {
        if let Some(existing) = cells.insert((letter.x(), letter.y()), letter.ch()) {
            assert_eq!(
                existing,
                letter.ch(),
                "Conflict at ({}, {})",
                letter.x(),
                letter.y()
            );
        }
    }
}

/// Asserts the grid starts at (0, 0).
fn assert_normalized(placed: &[PlacedWord]) {
    let letters: Vec<_> = placed.iter().flat_map(|w| w.letters()).collect();
    assert_eq!(letters.iter().map(|l| l.x()).min(), Some(0));
    assert_eq!(letters.iter().map(|l| l.y()).min(), Some(0));
}

/// Asserts each word's letters spell it along its direction.
fn assert_well_formed(placed: &[PlacedWord]) {
    for word in placed {
        let chars: Vec<char> = word.word().chars().collect();
        assert_eq!(word.letters().len(), chars.len());
        let (dx, dy) = word.direction().step();
        for (i, letter) in word.letters().iter().enumerate() {
            assert_eq!(letter.ch(), chars[i]);
            assert_eq!(letter.x(), word.origin().0 + dx * i as i32);
            assert_eq!(letter.y(), word.origin().1 + dy * i as i32);
        }
    }
}

fn sample_lists() -> Vec<Vec<String>> {
    let mut lists: Vec<Vec<String>> = [
        vec!["cat", "map", "apple", "tiger", "pear"],
        vec!["moon", "moon", "moon"],
        vec!["abc", "xyz", "def", "ghi"],
        vec!["ab", "xa", "ya"],
        vec!["sun", "snow", "stone", "storm", "sky", "sea"],
    ]
    .into_iter()
    .map(|list| list.into_iter().map(String::from).collect())
    .collect();

    let bank = WordBank::builtin().expect("Builtin bank parses");
    for category in bank.categories() {
        lists.push(bank.words_in(category).expect("Category exists").to_vec());
    }
    lists
}

#[test]
fn test_single_word_is_horizontal_at_origin() {
    let placed = place(&["hello"]).expect("Placement failed");
    assert_eq!(placed.len(), 1);
    assert_eq!(placed[0].origin(), (0, 0));
    assert_eq!(placed[0].direction(), Direction::Horizontal);
    assert_eq!(render(&placed), "hello");
}

#[test]
fn test_cat_map_cross_on_shared_a() {
    let placed = place(&["cat", "map"]).expect("Placement failed");

    assert_eq!(placed[0].direction(), Direction::Horizontal);
    assert_eq!(placed[1].direction(), Direction::Vertical);

    let cat_a = placed[0].letters()[1];
    let map_a = placed[1].letters()[1];
    assert_eq!(cat_a.ch(), 'a');
    assert!(cat_a.same_cell(&map_a));

    assert_eq!(placed[0].origin(), (0, 1));
    assert_eq!(placed[1].origin(), (1, 0));
    assert_no_conflicts(&placed);
}

#[test]
fn test_first_crossing_in_scan_order_wins() {
    // "tab" shares both 'a' and 't' with "cat"; scanning cat left to right
    // reaches 'a' first.
    let placed = place(&["cat", "tab"]).expect("Placement failed");
    let tab = &placed[1];
    assert_eq!(tab.direction(), Direction::Vertical);
    assert!(tab.letters()[1].same_cell(&placed[0].letters()[1]));
}

#[test]
fn test_colliding_crossing_is_skipped() {
    // "ya" would cross "ab" vertically, but "xa" already holds that column,
    // so it crosses "xa" horizontally instead.
    let placed = place(&["ab", "xa", "ya"]).expect("Placement failed");
    assert_eq!(placed[1].direction(), Direction::Vertical);
    assert_eq!(placed[2].direction(), Direction::Horizontal);
    assert_eq!(placed[2].origin(), (0, 1));
    assert_eq!(placed[0].origin(), (1, 1));
    assert_eq!(placed[1].origin(), (1, 0));
    assert_no_conflicts(&placed);
}

#[test]
fn test_unrelated_words_fall_back_beside_previous() {
    let placed = place(&["cat", "dog", "pun"]).expect("Placement failed");

    assert_eq!(placed[1].direction(), Direction::Vertical);
    assert_eq!(placed[1].origin(), (0, 6));

    assert_eq!(placed[2].direction(), Direction::Horizontal);
    assert_eq!(placed[2].origin(), (6, 6));
    assert_no_conflicts(&placed);
}

#[test]
fn test_duplicate_words_are_each_placed() {
    let placed = place(&["moon", "moon"]).expect("Placement failed");
    assert_eq!(placed.len(), 2);
    assert_ne!(placed[0].direction(), placed[1].direction());
    assert_no_conflicts(&placed);
}

#[test]
fn test_placement_is_deterministic() {
    let words = ["cat", "map", "apple", "tiger", "pear"];
    assert_eq!(place(&words), place(&words));
}

#[test]
fn test_no_conflicting_cells_in_any_layout() {
    for list in sample_lists() {
        let placed = place(&list).expect("Placement failed");
        assert_eq!(placed.len(), list.len());
        assert_no_conflicts(&placed);
        assert_well_formed(&placed);
    }
}

#[test]
fn test_every_layout_is_normalized() {
    for list in sample_lists() {
        let placed = place(&list).expect("Placement failed");
        assert_normalized(&placed);
    }
}

#[test]
fn test_empty_list_is_rejected() {
    let words: Vec<String> = Vec::new();
    assert!(place(&words).is_err());
}
