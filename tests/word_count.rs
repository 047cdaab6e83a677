mod common;

use dictree::{Datum, Dict, Flags};

const TEXT: &str = "\
The quick brown fox jumps over the lazy dog. The dog sleeps;
the fox, being QUICK, runs away. A fox is a fox!";

/// Splits on anything that is not an ASCII letter and lowercases each word.
fn words(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split(|c: char| !c.is_ascii_alphabetic())
        .filter(|w| !w.is_empty())
        .map(str::to_ascii_lowercase)
}

fn count(text: &str) -> Dict {
    let mut dict = Dict::predefined(Flags::STR_INT).unwrap();
    for word in words(text) {
        dict.numeric_upsert(&Datum::from(word), 1, |n| n + 1).unwrap();
    }
    dict
}

#[test]
fn counts_every_word() {
    common::init_tracing();
    let dict = count(TEXT);

    assert_eq!(dict.search(&Datum::str("the")), Some(&Datum::Int(4)));
    assert_eq!(dict.search(&Datum::str("fox")), Some(&Datum::Int(4)));
    assert_eq!(dict.search(&Datum::str("quick")), Some(&Datum::Int(2)));
    assert_eq!(dict.search(&Datum::str("being")), Some(&Datum::Int(1)));
    assert_eq!(dict.search(&Datum::str("cat")), None);

    let total: i64 = dict.values().filter_map(Datum::as_int).sum();
    assert_eq!(total, words(TEXT).count() as i64);
    assert_eq!(dict.len(), 14);
}

#[test]
fn enumerates_words_above_threshold_on_a_clone() {
    common::init_tracing();
    let dict = count(TEXT);
    let copy = dict.try_clone().unwrap();
    drop(dict);

    let threshold = 1;
    let mut frequent = vec![];
    copy.for_each(|word, n| {
        if n.as_int().map_or(false, |n| n > threshold) {
            frequent.push(format!("{}={}", word.as_str().unwrap_or("?"), n.as_int().unwrap_or(0)));
        }
    });

    assert_eq!(frequent, ["a=2", "dog=2", "fox=4", "quick=2", "the=4"]);
}

#[test]
fn empty_text_counts_nothing() {
    let dict = count(" ,.; ");
    assert!(dict.is_empty());
    assert_eq!(dict.first(), None);
}
